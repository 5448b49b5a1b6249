//! Follow-up scheduling.

use crate::types::Status;
use chrono::{Duration, NaiveDate};

/// Days between applying and the follow-up nudge.
pub const FOLLOW_UP_DELAY_DAYS: i64 = 7;

/// Next follow-up date for an application. Pure; recomputed on every
/// status or date edit. Rejected applications are never followed up.
pub fn follow_up(applied_on: NaiveDate, status: Status) -> Option<NaiveDate> {
    match status {
        Status::Rejected => None,
        Status::Pending | Status::Interview => {
            Some(applied_on + Duration::days(FOLLOW_UP_DELAY_DAYS))
        }
    }
}

/// Whether a scheduled follow-up falls inside the agenda horizon.
/// Overdue dates count as due.
pub fn due_within(follow_up: NaiveDate, today: NaiveDate, horizon_days: i64) -> bool {
    follow_up <= today + Duration::days(horizon_days)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_follow_up_pending_is_plus_seven() {
        assert_eq!(
            follow_up(d("2025-11-15"), Status::Pending),
            Some(d("2025-11-22"))
        );
    }

    #[test]
    fn test_follow_up_interview_is_plus_seven() {
        assert_eq!(
            follow_up(d("2025-11-15"), Status::Interview),
            Some(d("2025-11-22"))
        );
    }

    #[test]
    fn test_follow_up_rejected_is_none() {
        assert_eq!(follow_up(d("2025-11-15"), Status::Rejected), None);
    }

    #[test]
    fn test_follow_up_crosses_month_end() {
        assert_eq!(
            follow_up(d("2025-01-28"), Status::Pending),
            Some(d("2025-02-04"))
        );
    }

    #[test]
    fn test_due_within_includes_overdue() {
        assert!(due_within(d("2025-01-01"), d("2025-06-01"), 7));
        assert!(due_within(d("2025-06-05"), d("2025-06-01"), 7));
        assert!(!due_within(d("2025-06-09"), d("2025-06-01"), 7));
    }
}
