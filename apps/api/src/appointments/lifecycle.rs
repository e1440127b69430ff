use chrono::{DateTime, Utc};

use crate::models::appointment::AppointmentStatus;

impl AppointmentStatus {
    /// Allowed moves: scheduled -> confirmed -> completed, with cancelled and
    /// no_show reachable from either non-terminal state. Nothing moves
    /// backwards and terminal states accept no further transitions.
    pub fn can_transition_to(self, next: AppointmentStatus) -> bool {
        use AppointmentStatus::*;
        matches!(
            (self, next),
            (Scheduled, Confirmed)
                | (Scheduled, Cancelled)
                | (Scheduled, NoShow)
                | (Confirmed, Completed)
                | (Confirmed, Cancelled)
                | (Confirmed, NoShow)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            AppointmentStatus::Completed | AppointmentStatus::Cancelled | AppointmentStatus::NoShow
        )
    }
}

/// Booking time policy: the slot must be strictly in the future. A slot equal
/// to the creation instant is rejected.
pub fn schedule_time_ok(scheduled_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    scheduled_at > now
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use crate::models::appointment::AppointmentStatus::*;

    #[test]
    fn test_happy_path_transitions() {
        assert!(Scheduled.can_transition_to(Confirmed));
        assert!(Confirmed.can_transition_to(Completed));
    }

    #[test]
    fn test_cancellation_from_either_open_state() {
        assert!(Scheduled.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(Scheduled.can_transition_to(NoShow));
        assert!(Confirmed.can_transition_to(NoShow));
    }

    #[test]
    fn test_completed_requires_confirmation_first() {
        assert!(!Scheduled.can_transition_to(Completed));
    }

    #[test]
    fn test_no_reverting_out_of_terminal_states() {
        for terminal in [Completed, Cancelled, NoShow] {
            for next in [Scheduled, Confirmed, Completed, Cancelled, NoShow] {
                assert!(
                    !terminal.can_transition_to(next),
                    "{terminal:?} -> {next:?} should be rejected"
                );
            }
        }
    }

    #[test]
    fn test_no_self_transitions() {
        for s in [Scheduled, Confirmed] {
            assert!(!s.can_transition_to(s));
        }
    }

    #[test]
    fn test_terminal_flags() {
        assert!(!Scheduled.is_terminal());
        assert!(!Confirmed.is_terminal());
        assert!(Completed.is_terminal());
        assert!(Cancelled.is_terminal());
        assert!(NoShow.is_terminal());
    }

    #[test]
    fn test_past_slot_rejected() {
        let now = Utc::now();
        assert!(!schedule_time_ok(now - Duration::minutes(1), now));
    }

    #[test]
    fn test_slot_equal_to_now_rejected() {
        let now = Utc::now();
        assert!(!schedule_time_ok(now, now));
    }

    #[test]
    fn test_future_slot_accepted() {
        let now = Utc::now();
        assert!(schedule_time_ok(now + Duration::hours(1), now));
    }
}
