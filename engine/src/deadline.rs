//! Deadline state machine.
//!
//! A deliverable's status is a pure projection of (now, deadline,
//! completed): nothing here is stored, and recomputation with the same
//! inputs always yields the same output. "Now" is injected by the caller
//! so the machine is testable with fixed clocks.
//!
//! Deadlines further out than the fortnight horizon land in the distinct
//! `Scheduled` bucket rather than being misreported as "next week"; the
//! urgent views simply do not surface that bucket.

use crate::config::DeadlineConfig;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Time bucket for a deliverable deadline.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeadlineStatus {
    Completed,
    Overdue,
    DueToday,
    DueTomorrow,
    DueThisWeek,
    DueNextWeek,
    Scheduled,
}

impl DeadlineStatus {
    /// Facet value / wire name for this bucket.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Overdue => "overdue",
            Self::DueToday => "due-today",
            Self::DueTomorrow => "due-tomorrow",
            Self::DueThisWeek => "due-this-week",
            Self::DueNextWeek => "due-next-week",
            Self::Scheduled => "scheduled",
        }
    }

    /// Urgency rank. As "now" advances toward a fixed, uncompleted
    /// deadline the rank never decreases. `Completed` is terminal rather
    /// than urgent and ranks below everything temporal.
    pub fn urgency(&self) -> u8 {
        match self {
            Self::Completed => 0,
            Self::Scheduled => 1,
            Self::DueNextWeek => 2,
            Self::DueThisWeek => 3,
            Self::DueTomorrow => 4,
            Self::DueToday => 5,
            Self::Overdue => 6,
        }
    }

    /// Whether this bucket appears in the urgent views.
    pub fn is_urgent_view(&self) -> bool {
        !matches!(self, Self::Completed | Self::Scheduled)
    }
}

impl std::fmt::Display for DeadlineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grace window attached to an overdue item. Advisory metadata only: it
/// never changes the status label, it tells the UI the item is still
/// recoverable.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GraceWindow {
    /// The original, missed deadline.
    pub deadline: NaiveDate,
    /// Last day the item is still actionable.
    pub until: NaiveDate,
}

impl GraceWindow {
    /// Whether the item is still within its grace window on `now`.
    pub fn is_recoverable(&self, now: NaiveDate) -> bool {
        now <= self.until
    }
}

/// Status bucket plus, for overdue items, the grace window.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DeadlineAssessment {
    pub status: DeadlineStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grace: Option<GraceWindow>,
}

impl DeadlineAssessment {
    fn bucket(status: DeadlineStatus) -> Self {
        Self {
            status,
            grace: None,
        }
    }
}

/// Classify a deliverable deadline against an injected "now".
///
/// Precedence, first match wins:
/// 1. completed (terminal, regardless of how overdue)
/// 2. strictly past by calendar day ⇒ overdue with a grace window
/// 3. same day ⇒ due-today
/// 4. next day ⇒ due-tomorrow
/// 5. within the week horizon ⇒ due-this-week
/// 6. within the fortnight horizon ⇒ due-next-week
/// 7. beyond ⇒ scheduled
///
/// Pure and total: malformed dates cannot reach this function (they are a
/// caller-side validation error), and nothing here panics.
pub fn classify_deadline(
    now: NaiveDate,
    deadline: NaiveDate,
    completed: bool,
    cfg: &DeadlineConfig,
) -> DeadlineAssessment {
    if completed {
        return DeadlineAssessment::bucket(DeadlineStatus::Completed);
    }

    let days_out = (deadline - now).num_days();
    if days_out < 0 {
        let until = deadline
            .checked_add_days(Days::new(cfg.grace_days))
            .unwrap_or(NaiveDate::MAX);
        return DeadlineAssessment {
            status: DeadlineStatus::Overdue,
            grace: Some(GraceWindow { deadline, until }),
        };
    }

    let status = match days_out {
        0 => DeadlineStatus::DueToday,
        1 => DeadlineStatus::DueTomorrow,
        d if d <= cfg.week_horizon_days => DeadlineStatus::DueThisWeek,
        d if d <= cfg.fortnight_horizon_days => DeadlineStatus::DueNextWeek,
        _ => DeadlineStatus::Scheduled,
    };
    DeadlineAssessment::bucket(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn cfg() -> DeadlineConfig {
        DeadlineConfig::default()
    }

    #[test]
    fn overdue_with_grace_window() {
        // Scenario 3: now=June 23, deadline=June 21, graceDays=3.
        let out = classify_deadline(date(2026, 6, 23), date(2026, 6, 21), false, &cfg());
        assert_eq!(out.status, DeadlineStatus::Overdue);
        let grace = out.grace.expect("overdue carries a grace window");
        assert_eq!(grace.deadline, date(2026, 6, 21));
        assert_eq!(grace.until, date(2026, 6, 24));
        assert!(grace.is_recoverable(date(2026, 6, 23)));
        assert!(grace.is_recoverable(date(2026, 6, 24)));
        assert!(!grace.is_recoverable(date(2026, 6, 25)));
    }

    #[test]
    fn same_day_is_due_today() {
        // Scenario 4.
        let out = classify_deadline(date(2026, 6, 23), date(2026, 6, 23), false, &cfg());
        assert_eq!(out.status, DeadlineStatus::DueToday);
        assert_eq!(out.grace, None);
    }

    #[test]
    fn bucket_boundaries() {
        let now = date(2026, 6, 1);
        let cases = [
            (date(2026, 6, 2), DeadlineStatus::DueTomorrow),
            (date(2026, 6, 3), DeadlineStatus::DueThisWeek),
            (date(2026, 6, 8), DeadlineStatus::DueThisWeek), // day 7, inclusive
            (date(2026, 6, 9), DeadlineStatus::DueNextWeek), // day 8
            (date(2026, 6, 15), DeadlineStatus::DueNextWeek), // day 14, inclusive
            (date(2026, 6, 16), DeadlineStatus::Scheduled),  // day 15
        ];
        for (deadline, expected) in cases {
            let out = classify_deadline(now, deadline, false, &cfg());
            assert_eq!(out.status, expected, "deadline {deadline}");
        }
    }

    #[test]
    fn completed_overrides_everything() {
        // Even a deadline a year past stays terminal.
        let out = classify_deadline(date(2026, 6, 23), date(2025, 6, 23), true, &cfg());
        assert_eq!(out.status, DeadlineStatus::Completed);
        assert_eq!(out.grace, None);
    }

    #[test]
    fn urgency_never_decreases_as_now_advances() {
        let deadline = date(2026, 6, 23);
        let mut now = date(2026, 5, 20);
        let mut last = classify_deadline(now, deadline, false, &cfg()).status.urgency();
        for _ in 0..60 {
            now = now.succ_opt().expect("valid date");
            let urgency = classify_deadline(now, deadline, false, &cfg()).status.urgency();
            assert!(
                urgency >= last,
                "urgency moved backward at now={now}: {last} -> {urgency}"
            );
            last = urgency;
        }
        assert_eq!(last, DeadlineStatus::Overdue.urgency());
    }

    #[test]
    fn recomputation_is_idempotent() {
        let a = classify_deadline(date(2026, 6, 23), date(2026, 6, 21), false, &cfg());
        let b = classify_deadline(date(2026, 6, 23), date(2026, 6, 21), false, &cfg());
        assert_eq!(a, b);
    }

    #[test]
    fn custom_horizons_are_respected() {
        let tight = DeadlineConfig {
            grace_days: 1,
            week_horizon_days: 3,
            fortnight_horizon_days: 6,
        };
        let now = date(2026, 6, 1);
        assert_eq!(
            classify_deadline(now, date(2026, 6, 4), false, &tight).status,
            DeadlineStatus::DueThisWeek
        );
        assert_eq!(
            classify_deadline(now, date(2026, 6, 5), false, &tight).status,
            DeadlineStatus::DueNextWeek
        );
        assert_eq!(
            classify_deadline(now, date(2026, 6, 8), false, &tight).status,
            DeadlineStatus::Scheduled
        );
        let overdue = classify_deadline(now, date(2026, 5, 30), false, &tight);
        assert_eq!(
            overdue.grace.expect("grace window").until,
            date(2026, 5, 31)
        );
    }

    #[test]
    fn status_serializes_as_kebab_case_facet_values() {
        let json = serde_json::to_string(&DeadlineStatus::DueThisWeek).expect("serialize");
        assert_eq!(json, "\"due-this-week\"");
        assert_eq!(DeadlineStatus::DueThisWeek.as_str(), "due-this-week");
    }
}
