//! Wire and outcome types of the save endpoint

use serde::{Deserialize, Serialize};

use crate::domain::{HolidayMap, HolidayTable, UserId};

/// Discriminator the ajax dispatcher routes on
pub const FORM_TYPE: &str = "mass_holidays";

/// One user's holiday map, ready to be posted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MassHolidaysRequest {
    pub year: i32,
    pub month: u32,
    pub user_id: UserId,
    pub holiday_data: HolidayMap,
}

impl MassHolidaysRequest {
    /// Collect the classified cells of `user_id` from the table
    pub fn for_user(table: &HolidayTable, user_id: UserId) -> Self {
        Self {
            year: table.year(),
            month: table.month(),
            user_id,
            holiday_data: table.holiday_map(user_id),
        }
    }

    /// Form-encoded body fields, in the order the page sends them
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("form_type", FORM_TYPE.to_string()),
            ("year", self.year.to_string()),
            ("month", self.month.to_string()),
            ("holiday_data", self.holiday_data.to_json()),
            ("user_id", self.user_id.to_string()),
        ]
    }
}

/// JSON body returned by the endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmitResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }
}

/// Whether a submission stands alone or is part of submit-all
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    Single,
    Mass,
}

/// Eventual result of one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Endpoint answered `success: true`
    Accepted,
    /// Endpoint answered `success: false`
    Rejected { message: String },
    /// No usable answer (connection, HTTP status or JSON failure)
    TransportFailed { reason: String },
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted)
    }
}

impl std::fmt::Display for SubmitOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitOutcome::Accepted => write!(f, "saved"),
            SubmitOutcome::Rejected { message } => write!(f, "rejected: {}", message),
            SubmitOutcome::TransportFailed { reason } => write!(f, "not delivered: {}", reason),
        }
    }
}

/// How submit-all folds per-user outcomes into one status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationPolicy {
    /// Every user must be accepted
    #[default]
    AllMustSucceed,
    /// The last user in dispatch order decides, whatever happened before
    LastWins,
}

/// Outcome for one user during submit-all
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserOutcome {
    pub user_id: UserId,
    pub outcome: SubmitOutcome,
}

/// Result of submit-all, outcomes in dispatch order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitAllReport {
    pub policy: AggregationPolicy,
    pub outcomes: Vec<UserOutcome>,
}

impl SubmitAllReport {
    /// Overall status under the configured policy.
    ///
    /// A report without users counts as failed under both policies.
    pub fn succeeded(&self) -> bool {
        match self.policy {
            AggregationPolicy::AllMustSucceed => self.all_succeeded(),
            AggregationPolicy::LastWins => self.last_succeeded(),
        }
    }

    pub fn all_succeeded(&self) -> bool {
        !self.outcomes.is_empty() && self.outcomes.iter().all(|o| o.outcome.is_success())
    }

    pub fn last_succeeded(&self) -> bool {
        self.outcomes
            .last()
            .is_some_and(|o| o.outcome.is_success())
    }

    pub fn failures(&self) -> impl Iterator<Item = &UserOutcome> {
        self.outcomes.iter().filter(|o| !o.outcome.is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DayCell, DayType, Marker, UserRow};

    #[test]
    fn test_form_fields_for_single_holiday() {
        let mut table = HolidayTable::new(2024, 3).unwrap();
        table
            .push_row(UserRow {
                id: UserId(7),
                name: "Ada".into(),
                cells: vec![DayCell::new(15, Marker::Day(DayType::Holiday))],
            })
            .unwrap();

        let request = MassHolidaysRequest::for_user(&table, UserId(7));
        assert_eq!(
            request.form_fields(),
            vec![
                ("form_type", "mass_holidays".to_string()),
                ("year", "2024".to_string()),
                ("month", "3".to_string()),
                ("holiday_data", r#"{"15":"HOLIS"}"#.to_string()),
                ("user_id", "7".to_string()),
            ]
        );
    }

    #[test]
    fn test_response_error_is_optional() {
        let ok: SubmitResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert_eq!(ok, SubmitResponse::ok());

        let failed: SubmitResponse =
            serde_json::from_str(r#"{"success": false, "error": "quota exceeded"}"#).unwrap();
        assert_eq!(failed, SubmitResponse::failed("quota exceeded"));
    }

    fn report(policy: AggregationPolicy, outcomes: &[bool]) -> SubmitAllReport {
        SubmitAllReport {
            policy,
            outcomes: outcomes
                .iter()
                .enumerate()
                .map(|(i, ok)| UserOutcome {
                    user_id: UserId(i as u32 + 1),
                    outcome: if *ok {
                        SubmitOutcome::Accepted
                    } else {
                        SubmitOutcome::Rejected {
                            message: "nope".into(),
                        }
                    },
                })
                .collect(),
        }
    }

    #[test]
    fn test_last_wins_only_looks_at_last_user() {
        let report = report(AggregationPolicy::LastWins, &[true, false, true]);
        assert!(report.succeeded());
        assert!(!report.all_succeeded());
        assert_eq!(report.failures().count(), 1);
    }

    #[test]
    fn test_all_must_succeed_combines_outcomes() {
        assert!(!report(AggregationPolicy::AllMustSucceed, &[true, false, true]).succeeded());
        assert!(report(AggregationPolicy::AllMustSucceed, &[true, true]).succeeded());
    }

    #[test]
    fn test_empty_report_is_a_failure() {
        assert!(!report(AggregationPolicy::AllMustSucceed, &[]).succeeded());
        assert!(!report(AggregationPolicy::LastWins, &[]).succeeded());
    }
}
