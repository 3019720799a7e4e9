//! Response grading
//!
//! A response naming an option is graded by that option's correctness flag.
//! A response without an option (free text) cannot be graded automatically;
//! it is recorded as correct with a pending-review message.

use thiserror::Error;
use uuid::Uuid;

use crate::models::AssessmentItem;

pub const FEEDBACK_CORRECT: &str = "Correct!";
pub const FEEDBACK_INCORRECT: &str = "Incorrect";
pub const FEEDBACK_PENDING_REVIEW: &str = "Response recorded. Pending review.";

#[derive(Debug, Clone, PartialEq)]
pub struct Grade {
    pub is_correct: bool,
    pub feedback: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum GradingError {
    #[error("Option not found: {0}")]
    OptionNotFound(Uuid),
}

/// Grade one response against `item`
///
/// The free-text payload is stored by the caller; it does not influence the
/// grade.
pub fn grade(
    item: &AssessmentItem,
    selected_option_id: Option<Uuid>,
    _payload: Option<&str>,
) -> Result<Grade, GradingError> {
    let Some(option_id) = selected_option_id else {
        return Ok(Grade {
            is_correct: true,
            feedback: FEEDBACK_PENDING_REVIEW.to_string(),
        });
    };

    let option = item
        .option(option_id)
        .ok_or(GradingError::OptionNotFound(option_id))?;

    let feedback = if option.is_correct {
        FEEDBACK_CORRECT.to_string()
    } else {
        option
            .feedback_template
            .clone()
            .unwrap_or_else(|| FEEDBACK_INCORRECT.to_string())
    };

    Ok(Grade {
        is_correct: option.is_correct,
        feedback,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemOption;
    use chrono::Utc;

    fn option(is_correct: bool, feedback: Option<&str>) -> ItemOption {
        ItemOption {
            id: Uuid::new_v4(),
            label: None,
            statement: "answer".into(),
            is_correct,
            error_tag: None,
            feedback_template: feedback.map(str::to_string),
        }
    }

    fn item(options: Vec<ItemOption>) -> AssessmentItem {
        AssessmentItem {
            id: Uuid::new_v4(),
            domain_id: Uuid::new_v4(),
            origin: "static".into(),
            item_type: "multiple_choice".into(),
            stem: "2 + 2?".into(),
            difficulty: None,
            metadata: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            options,
            skills: Vec::new(),
        }
    }

    #[test]
    fn test_correct_option() {
        let right = option(true, Some("ignored"));
        let id = right.id;
        let grade = grade(&item(vec![right, option(false, None)]), Some(id), None).unwrap();
        assert!(grade.is_correct);
        assert_eq!(grade.feedback, FEEDBACK_CORRECT);
    }

    #[test]
    fn test_incorrect_option_uses_template() {
        let wrong = option(false, Some("Check the carry"));
        let id = wrong.id;
        let grade = grade(&item(vec![option(true, None), wrong]), Some(id), None).unwrap();
        assert!(!grade.is_correct);
        assert_eq!(grade.feedback, "Check the carry");
    }

    #[test]
    fn test_incorrect_option_without_template() {
        let wrong = option(false, None);
        let id = wrong.id;
        let grade = grade(&item(vec![wrong]), Some(id), None).unwrap();
        assert_eq!(grade.feedback, FEEDBACK_INCORRECT);
    }

    #[test]
    fn test_incorrect_option_with_empty_template() {
        let wrong = option(false, Some(""));
        let id = wrong.id;
        let grade = grade(&item(vec![wrong]), Some(id), None).unwrap();
        assert!(!grade.is_correct);
        assert_eq!(grade.feedback, "");
    }

    #[test]
    fn test_unknown_option() {
        let stray = Uuid::new_v4();
        let result = grade(&item(vec![option(true, None)]), Some(stray), None);
        assert_eq!(result, Err(GradingError::OptionNotFound(stray)));
    }

    #[test]
    fn test_free_text_pending_review() {
        let grade = grade(&item(Vec::new()), None, Some("four")).unwrap();
        assert!(grade.is_correct);
        assert_eq!(grade.feedback, FEEDBACK_PENDING_REVIEW);
    }

    #[test]
    fn test_no_selection_on_choice_item_is_pending_review() {
        let grade = grade(&item(vec![option(false, None)]), None, None).unwrap();
        assert!(grade.is_correct);
        assert_eq!(grade.feedback, FEEDBACK_PENDING_REVIEW);
    }
}
