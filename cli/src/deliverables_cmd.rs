//! Deliverable deadline view: assessment grouped by bucket in urgency
//! order, grace window shown for overdue items.

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use creatorops_engine::{DashboardEngine, DataSet, DeadlineStatus, FilterSpec};
use owo_colors::OwoColorize;

use crate::creators_cmd::paint;

/// Buckets in display order, most urgent first.
const DISPLAY_ORDER: &[DeadlineStatus] = &[
    DeadlineStatus::Overdue,
    DeadlineStatus::DueToday,
    DeadlineStatus::DueTomorrow,
    DeadlineStatus::DueThisWeek,
    DeadlineStatus::DueNextWeek,
    DeadlineStatus::Scheduled,
    DeadlineStatus::Completed,
];

#[derive(Debug, Args)]
pub struct DeliverablesArgs {
    /// Evaluate deadlines as of this date (default: today)
    #[arg(long)]
    pub on: Option<NaiveDate>,

    /// Show only these deadline buckets (repeatable, e.g. "overdue")
    #[arg(long)]
    pub bucket: Vec<String>,
}

pub fn run(engine: &DashboardEngine, data: &DataSet, args: &DeliverablesArgs) -> Result<()> {
    let now = args.on.unwrap_or_else(|| chrono::Local::now().date_naive());
    let assessed = engine.assessed_deliverables(now, &data.deliverables);

    let spec = FilterSpec::new().with_accepted("deadlineStatus", args.bucket.clone());
    let matched = engine.filter(&assessed, &spec);

    for bucket in DISPLAY_ORDER {
        let rows: Vec<_> = matched
            .iter()
            .filter(|a| a.assessment.status == *bucket)
            .collect();
        if rows.is_empty() {
            continue;
        }

        println!("{}", bucket.as_str().bold());
        for entry in rows {
            let deliverable = entry.deliverable;
            let mut line = format!(
                "  {:<12} {:<22} {:<22} due {}",
                deliverable.id, deliverable.creator_name, deliverable.campaign,
                deliverable.deadline,
            );
            if let Some(grace) = entry.assessment.grace {
                if grace.is_recoverable(now) {
                    let note = paint(&format!("grace until {}", grace.until), "orange");
                    line.push_str(&format!(" ({note})"));
                } else {
                    line.push_str(&format!(" ({})", paint("grace expired", "red")));
                }
            }
            println!("{line}");
        }
    }
    println!("{} of {} deliverables", matched.len(), data.deliverables.len());
    Ok(())
}
