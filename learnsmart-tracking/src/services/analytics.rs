//! Activity statistics
//!
//! Statistics are computed in memory over a user's most recent events
//! (at most [`MAX_EVENTS_SCANNED`]). Calendar days are UTC days. The pure
//! functions take `today` explicitly so streaks can be tested at any date.

use chrono::{Duration, Months, NaiveDate};
use learnsmart_common::api::types::UserStats;
use learnsmart_common::{time, Error, Result};
use sqlx::SqlitePool;
use std::collections::{BTreeMap, HashSet};
use uuid::Uuid;

use crate::db::events::{self, EventFilter};
use crate::models::{
    DailyActivity, LearningEvent, EVENT_ASSESSMENT_COMPLETED, EVENT_ASSESSMENT_STARTED,
    EVENT_CONTENT_VIEW,
};

/// Upper bound on events loaded for one statistics request
pub const MAX_EVENTS_SCANNED: i64 = 10_000;

const DURATION_KEY: &str = "durationSeconds";
const SECONDS_PER_HOUR: f64 = 3600.0;

/// Study time recorded in an event payload, in seconds
///
/// Reads the first number following the `durationSeconds` key, so both
/// `{"durationSeconds": 90}` and `{"durationSeconds": "90"}` yield 90.
/// Missing key or no number after it yields 0.
pub fn extract_duration_seconds(payload: Option<&str>) -> f64 {
    let Some(payload) = payload else {
        return 0.0;
    };
    let Some(key_at) = payload.find(DURATION_KEY) else {
        return 0.0;
    };

    let rest = &payload[key_at + DURATION_KEY.len()..];
    let Some(start) = rest.find(|c: char| c.is_ascii_digit()) else {
        return 0.0;
    };
    let digits = &rest[start..];

    let mut end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    // Optional fractional part
    if digits[end..].starts_with('.') {
        let frac = &digits[end + 1..];
        let frac_len = frac.find(|c: char| !c.is_ascii_digit()).unwrap_or(frac.len());
        if frac_len > 0 {
            end += 1 + frac_len;
        }
    }

    digits[..end].parse().unwrap_or(0.0)
}

/// Consecutive active days ending today, or ending yesterday if today is idle
pub fn calculate_streak(active_days: &HashSet<NaiveDate>, today: NaiveDate) -> i64 {
    let yesterday = today - Duration::days(1);
    let mut current = if active_days.contains(&today) {
        today
    } else if active_days.contains(&yesterday) {
        yesterday
    } else {
        return 0;
    };

    let mut streak = 0;
    while active_days.contains(&current) {
        streak += 1;
        current -= Duration::days(1);
    }
    streak
}

fn distinct_entities(events: &[LearningEvent], types: &[&str]) -> i64 {
    events
        .iter()
        .filter(|e| types.contains(&e.event_type.as_str()))
        .filter_map(|e| e.entity_id)
        .collect::<HashSet<_>>()
        .len() as i64
}

fn total_hours<'a>(events: impl IntoIterator<Item = &'a LearningEvent>) -> f64 {
    events
        .into_iter()
        .map(|e| extract_duration_seconds(e.payload.as_deref()))
        .sum::<f64>()
        / SECONDS_PER_HOUR
}

pub fn calculate_stats(events: &[LearningEvent], today: NaiveDate) -> UserStats {
    let active_days: HashSet<NaiveDate> =
        events.iter().map(|e| e.occurred_at.date_naive()).collect();

    UserStats {
        total_hours: total_hours(events),
        current_streak: calculate_streak(&active_days, today),
        lessons_completed: distinct_entities(events, &[EVENT_CONTENT_VIEW]),
        assessments_taken: distinct_entities(
            events,
            &[EVENT_ASSESSMENT_STARTED, EVENT_ASSESSMENT_COMPLETED],
        ),
        total_events: events.len() as i64,
    }
}

/// Events grouped per calendar day, in date order
pub fn daily_activity(events: &[LearningEvent]) -> Vec<DailyActivity> {
    let mut by_day: BTreeMap<NaiveDate, Vec<&LearningEvent>> = BTreeMap::new();
    for event in events {
        by_day.entry(event.occurred_at.date_naive()).or_default().push(event);
    }

    by_day
        .into_iter()
        .map(|(date, day_events)| DailyActivity {
            date,
            event_count: day_events.len() as i64,
            hours_studied: total_hours(day_events),
        })
        .collect()
}

pub async fn user_stats(pool: &SqlitePool, user_id: Uuid) -> Result<UserStats> {
    let events = events::find_events(pool, &EventFilter::for_user(user_id), MAX_EVENTS_SCANNED, 0).await?;
    Ok(calculate_stats(&events, time::today()))
}

/// Daily activity between two dates, both inclusive
///
/// Defaults: `from` one month before today, `to` today.
pub async fn user_activity(
    pool: &SqlitePool,
    user_id: Uuid,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<Vec<DailyActivity>> {
    let today = time::today();
    let to = to.unwrap_or(today);
    let from = from.unwrap_or_else(|| today.checked_sub_months(Months::new(1)).unwrap_or(today));
    if from > to {
        return Err(Error::InvalidInput(format!("from {} is after to {}", from, to)));
    }

    let filter = EventFilter {
        from: Some(time::start_of_day(from)),
        to: Some(time::end_of_day(to)),
        ..EventFilter::for_user(user_id)
    };
    let events = events::find_events(pool, &filter, MAX_EVENTS_SCANNED, 0).await?;
    Ok(daily_activity(&events))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(event_type: &str, entity: Option<Uuid>, on: NaiveDate, hour: u32, payload: Option<&str>) -> LearningEvent {
        let at = Utc.from_utc_datetime(&on.and_hms_opt(hour, 0, 0).unwrap());
        LearningEvent {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            event_type: event_type.into(),
            entity_type: None,
            entity_id: entity,
            occurred_at: at,
            payload: payload.map(str::to_string),
            created_at: at,
        }
    }

    #[test]
    fn test_duration_extraction() {
        assert_eq!(extract_duration_seconds(Some(r#"{"durationSeconds": 120}"#)), 120.0);
        assert_eq!(extract_duration_seconds(Some(r#"{"durationSeconds":"45"}"#)), 45.0);
        assert_eq!(extract_duration_seconds(Some(r#"{"durationSeconds": 90.5, "score": 7}"#)), 90.5);
        assert_eq!(extract_duration_seconds(Some(r#"{"score": 7}"#)), 0.0);
        assert_eq!(extract_duration_seconds(Some(r#"{"durationSeconds": null}"#)), 0.0);
        assert_eq!(extract_duration_seconds(None), 0.0);
    }

    #[test]
    fn test_duration_ignores_later_numbers() {
        // Only the run right after the key counts
        let payload = r#"{"durationSeconds": 60, "attempt": 3, "score": 88}"#;
        assert_eq!(extract_duration_seconds(Some(payload)), 60.0);
    }

    #[test]
    fn test_streak_three_days_ending_today() {
        let today = day(2024, 3, 10);
        let days: HashSet<_> = [day(2024, 3, 10), day(2024, 3, 9), day(2024, 3, 8)].into();
        assert_eq!(calculate_streak(&days, today), 3);
    }

    #[test]
    fn test_streak_gap_yesterday_and_today() {
        let today = day(2024, 3, 10);
        let days: HashSet<_> = [day(2024, 3, 8)].into();
        assert_eq!(calculate_streak(&days, today), 0);
    }

    #[test]
    fn test_streak_may_end_yesterday() {
        let today = day(2024, 3, 10);
        let days: HashSet<_> = [day(2024, 3, 9), day(2024, 3, 8), day(2024, 3, 6)].into();
        assert_eq!(calculate_streak(&days, today), 2);
    }

    #[test]
    fn test_streak_crosses_month_boundary() {
        let today = day(2024, 3, 1);
        let days: HashSet<_> = [day(2024, 3, 1), day(2024, 2, 29), day(2024, 2, 28)].into();
        assert_eq!(calculate_streak(&days, today), 3);
    }

    #[test]
    fn test_stats_counts_distinct_entities() {
        let today = day(2024, 3, 10);
        let lesson = Some(Uuid::new_v4());
        let quiz = Some(Uuid::new_v4());
        let events = vec![
            event("content_view", lesson, today, 9, Some(r#"{"durationSeconds": 1800}"#)),
            event("content_view", lesson, today, 10, Some(r#"{"durationSeconds": 1800}"#)),
            event("content_view", None, today, 11, None),
            event("assessment_started", quiz, day(2024, 3, 9), 9, None),
            event("assessment_completed", quiz, day(2024, 3, 9), 10, Some(r#"{"durationSeconds": 3600}"#)),
            event("login", None, day(2024, 3, 1), 8, None),
        ];

        let stats = calculate_stats(&events, today);
        assert_eq!(stats.total_hours, 2.0);
        assert_eq!(stats.current_streak, 2);
        assert_eq!(stats.lessons_completed, 1);
        assert_eq!(stats.assessments_taken, 1);
        assert_eq!(stats.total_events, 6);
    }

    #[test]
    fn test_stats_empty() {
        let stats = calculate_stats(&[], day(2024, 3, 10));
        assert_eq!(stats, UserStats::default());
    }

    #[test]
    fn test_daily_activity_groups_by_day() {
        let d1 = day(2024, 3, 9);
        let d2 = day(2024, 3, 10);
        let events = vec![
            event("content_view", None, d2, 9, Some(r#"{"durationSeconds": 1800}"#)),
            event("content_view", None, d1, 9, None),
            event("content_view", None, d2, 14, Some(r#"{"durationSeconds": 900}"#)),
        ];

        let activity = daily_activity(&events);
        assert_eq!(activity.len(), 2);
        assert_eq!(activity[0].date, d1);
        assert_eq!(activity[0].event_count, 1);
        assert_eq!(activity[1].date, d2);
        assert_eq!(activity[1].event_count, 2);
        assert_eq!(activity[1].hours_studied, 0.75);
    }
}
