//! Collaborator clients used by the progress view
//!
//! One trait per collaborator so tests can substitute any subset. The HTTP
//! implementations share [`ServiceClient`] and its configured timeout.

use async_trait::async_trait;
use learnsmart_common::api::types::{ModuleSummary, PlanSummary, SkillMasteryEnriched, UserStats};
use learnsmart_common::api::Page;
use learnsmart_common::client::{ClientError, ServiceClient};
use learnsmart_common::config::Service;
use std::time::Duration;
use uuid::Uuid;

#[async_trait]
pub trait PlanningClient: Send + Sync {
    /// First page of the user's plans, newest first
    async fn get_plans(&self, user_id: &str) -> Result<Page<PlanSummary>, ClientError>;

    async fn get_modules(&self, plan_id: Uuid) -> Result<Vec<ModuleSummary>, ClientError>;
}

#[async_trait]
pub trait AssessmentClient: Send + Sync {
    /// Mastery records, highest first
    async fn get_skill_mastery(&self, user_id: Uuid) -> Result<Vec<SkillMasteryEnriched>, ClientError>;
}

#[async_trait]
pub trait TrackingClient: Send + Sync {
    async fn get_user_stats(&self, user_id: Uuid) -> Result<UserStats, ClientError>;
}

pub struct HttpPlanningClient {
    client: ServiceClient,
}

impl HttpPlanningClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        Ok(Self {
            client: ServiceClient::new(Service::Planning, base_url, timeout)?,
        })
    }
}

#[async_trait]
impl PlanningClient for HttpPlanningClient {
    async fn get_plans(&self, user_id: &str) -> Result<Page<PlanSummary>, ClientError> {
        self.client
            .get_json("/plans", &[("userId", user_id.to_string())])
            .await
    }

    async fn get_modules(&self, plan_id: Uuid) -> Result<Vec<ModuleSummary>, ClientError> {
        self.client
            .get_json(&format!("/plans/{}/modules", plan_id), &[])
            .await
    }
}

pub struct HttpAssessmentClient {
    client: ServiceClient,
}

impl HttpAssessmentClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        Ok(Self {
            client: ServiceClient::new(Service::Assessment, base_url, timeout)?,
        })
    }
}

#[async_trait]
impl AssessmentClient for HttpAssessmentClient {
    async fn get_skill_mastery(&self, user_id: Uuid) -> Result<Vec<SkillMasteryEnriched>, ClientError> {
        self.client
            .get_json(&format!("/users/{}/skill-mastery", user_id), &[])
            .await
    }
}

pub struct HttpTrackingClient {
    client: ServiceClient,
}

impl HttpTrackingClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        Ok(Self {
            client: ServiceClient::new(Service::Tracking, base_url, timeout)?,
        })
    }
}

#[async_trait]
impl TrackingClient for HttpTrackingClient {
    async fn get_user_stats(&self, user_id: Uuid) -> Result<UserStats, ClientError> {
        self.client
            .get_json(&format!("/analytics/users/{}/stats", user_id), &[])
            .await
    }
}
