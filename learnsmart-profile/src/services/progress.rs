//! Consolidated progress view
//!
//! Profile and goals come from local storage and are the only required
//! parts. Planning, assessment and tracking are queried one after another;
//! each call produces a `Result` that [`ProgressBuilder`] folds in, dropping
//! the corresponding section with a warning when the call failed.

use learnsmart_common::api::types::{ModuleSummary, SkillMasteryEnriched, UserStats, MODULE_COMPLETED};
use learnsmart_common::client::ClientError;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use super::clients::{AssessmentClient, PlanningClient, TrackingClient};
use super::profiles;
use crate::db;
use crate::error::Result;
use crate::identity::Identity;
use crate::models::{
    ActivitySummary, GoalProgress, PlanProgress, ProfileInfo, ProgressView, SkillMasteryShort,
    UserGoal, UserProfile,
};

/// Skills listed in the view
pub const TOP_SKILLS: usize = 5;

/// Remote sources of the progress view
#[derive(Clone)]
pub struct Collaborators {
    pub planning: Arc<dyn PlanningClient>,
    pub assessment: Arc<dyn AssessmentClient>,
    pub tracking: Arc<dyn TrackingClient>,
}

/// Partial view assembled one source at a time
pub struct ProgressBuilder {
    view: ProgressView,
}

impl ProgressBuilder {
    pub fn new(profile: &UserProfile, goals: &[UserGoal]) -> Self {
        let goals = goals
            .iter()
            .map(|g| GoalProgress {
                goal_id: g.id,
                title: g.title.clone(),
                // Goal completion is not tracked yet
                percentage: 0.0,
            })
            .collect();

        Self {
            view: ProgressView {
                profile: ProfileInfo {
                    user_id: profile.user_id,
                    display_name: profile.display_name.clone(),
                },
                goals,
                current_plan: None,
                skills_in_progress: None,
                activity: None,
            },
        }
    }

    /// `Ok(None)` means the user has no plans
    pub fn plan(mut self, result: std::result::Result<Option<PlanProgress>, ClientError>) -> Self {
        match result {
            Ok(plan) => self.view.current_plan = plan,
            Err(e) => warn!("Planning data unavailable: {}", e),
        }
        self
    }

    pub fn skills(mut self, result: std::result::Result<Vec<SkillMasteryEnriched>, ClientError>) -> Self {
        match result {
            Ok(records) => {
                self.view.skills_in_progress = Some(
                    records
                        .into_iter()
                        .take(TOP_SKILLS)
                        .map(|m| SkillMasteryShort {
                            skill_id: m.skill_id,
                            skill_name: m.skill_name,
                            mastery: m.mastery,
                        })
                        .collect(),
                )
            }
            Err(e) => warn!("Assessment data unavailable: {}", e),
        }
        self
    }

    pub fn activity(mut self, result: std::result::Result<UserStats, ClientError>) -> Self {
        match result {
            Ok(stats) => {
                self.view.activity = Some(ActivitySummary {
                    total_hours: stats.total_hours,
                    current_streak: stats.current_streak,
                })
            }
            Err(e) => warn!("Tracking data unavailable: {}", e),
        }
        self
    }

    pub fn build(self) -> ProgressView {
        self.view
    }
}

/// Completed share of a plan's modules
pub fn summarize_modules(modules: &[ModuleSummary]) -> (usize, usize, f64) {
    let total = modules.len();
    let completed = modules
        .iter()
        .filter(|m| m.status.eq_ignore_ascii_case(MODULE_COMPLETED))
        .count();
    let percentage = if total == 0 {
        0.0
    } else {
        completed as f64 * 100.0 / total as f64
    };
    (completed, total, percentage)
}

/// The user's first listed plan with module completion
pub async fn current_plan(
    planning: &dyn PlanningClient,
    user_id: Uuid,
) -> std::result::Result<Option<PlanProgress>, ClientError> {
    let plans = planning.get_plans(&user_id.to_string()).await?;
    let Some(plan) = plans.content.into_iter().next() else {
        return Ok(None);
    };

    let modules = planning.get_modules(plan.id).await?;
    let (completed_modules, total_modules, overall_percentage) = summarize_modules(&modules);

    Ok(Some(PlanProgress {
        plan_id: plan.id,
        goal_id: plan.goal_id,
        status: plan.status,
        completed_modules,
        total_modules,
        overall_percentage,
    }))
}

/// Build the caller's progress view
///
/// Fails only when the caller has no profile.
pub async fn collect_progress(
    pool: &SqlitePool,
    collaborators: &Collaborators,
    identity: &Identity,
) -> Result<ProgressView> {
    let profile = profiles::resolve(pool, identity).await?;
    let goals = db::goals::list_for_user(pool, profile.user_id).await?;
    let user_id = profile.user_id;
    debug!(user_id = %user_id, "Collecting progress");

    let builder = ProgressBuilder::new(&profile, &goals)
        .plan(current_plan(collaborators.planning.as_ref(), user_id).await);
    let builder = builder.skills(collaborators.assessment.get_skill_mastery(user_id).await);
    let builder = builder.activity(collaborators.tracking.get_user_stats(user_id).await);

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn profile() -> UserProfile {
        UserProfile {
            user_id: Uuid::new_v4(),
            auth_user_id: "kc-1".into(),
            email: "ana@example.com".into(),
            display_name: "Ana".into(),
            birth_year: None,
            locale: None,
            timezone: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn goal(user_id: Uuid, title: &str) -> UserGoal {
        UserGoal {
            id: Uuid::new_v4(),
            user_id,
            title: title.into(),
            description: None,
            domain: None,
            target_level: None,
            due_date: None,
            intensity: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn down(service: &'static str) -> ClientError {
        ClientError::Network {
            service,
            message: "connection refused".into(),
        }
    }

    fn module(status: &str) -> ModuleSummary {
        ModuleSummary {
            id: Uuid::new_v4(),
            status: status.into(),
        }
    }

    #[test]
    fn test_all_sources_failing_keeps_profile_and_goals() {
        let profile = profile();
        let goals = vec![goal(profile.user_id, "Learn Rust")];

        let view = ProgressBuilder::new(&profile, &goals)
            .plan(Err(down("planning-service")))
            .skills(Err(down("assessment-service")))
            .activity(Err(down("tracking-service")))
            .build();

        assert_eq!(view.profile.display_name, "Ana");
        assert_eq!(view.goals.len(), 1);
        assert_eq!(view.goals[0].title, "Learn Rust");
        assert_eq!(view.goals[0].percentage, 0.0);
        assert!(view.current_plan.is_none());
        assert!(view.skills_in_progress.is_none());
        assert!(view.activity.is_none());

        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("currentPlan").is_none());
        assert!(json.get("activity").is_none());
    }

    #[test]
    fn test_skills_limited_to_top_five() {
        let records: Vec<_> = (0..7)
            .map(|i| SkillMasteryEnriched {
                skill_id: Uuid::new_v4(),
                skill_name: Some(format!("Skill {}", i)),
                domain_name: None,
                mastery: 1.0 - i as f64 / 10.0,
                attempts: 1,
                last_update: None,
            })
            .collect();

        let view = ProgressBuilder::new(&profile(), &[]).skills(Ok(records)).build();
        let skills = view.skills_in_progress.unwrap();
        assert_eq!(skills.len(), 5);
        assert_eq!(skills[0].skill_name.as_deref(), Some("Skill 0"));
        assert_eq!(skills[4].mastery, 0.6);
    }

    #[test]
    fn test_module_completion_is_case_insensitive() {
        let modules = vec![module("completed"), module("COMPLETED"), module("pending"), module("in_progress")];
        assert_eq!(summarize_modules(&modules), (2, 4, 50.0));
        assert_eq!(summarize_modules(&[]), (0, 0, 0.0));
    }

    #[test]
    fn test_activity_keeps_hours_and_streak() {
        let stats = UserStats {
            total_hours: 2.5,
            current_streak: 4,
            ..Default::default()
        };
        let view = ProgressBuilder::new(&profile(), &[]).activity(Ok(stats)).build();
        assert_eq!(
            view.activity,
            Some(ActivitySummary {
                total_hours: 2.5,
                current_streak: 4
            })
        );
    }
}
