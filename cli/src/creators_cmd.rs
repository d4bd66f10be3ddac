//! Creator database view: classify-then-filter over the creator
//! collection, one row per match.

use anyhow::Result;
use clap::Args;
use creatorops_engine::{DashboardEngine, DataSet, FilterSpec, status_style};
use owo_colors::OwoColorize;

#[derive(Debug, Args)]
pub struct CreatorsArgs {
    /// Accept these niches (repeatable)
    #[arg(long)]
    pub niche: Vec<String>,

    /// Accept these platforms (repeatable)
    #[arg(long)]
    pub platform: Vec<String>,

    /// Accept these statuses (repeatable)
    #[arg(long)]
    pub status: Vec<String>,

    /// Accept creators holding at least one of these badges (repeatable)
    #[arg(long)]
    pub badge: Vec<String>,

    /// Accept these derived GMV tiers (repeatable)
    #[arg(long)]
    pub tier: Vec<String>,

    /// Minimum total GMV
    #[arg(long)]
    pub min_gmv: Option<f64>,

    /// Maximum total GMV
    #[arg(long)]
    pub max_gmv: Option<f64>,

    /// Case-insensitive search over name, handle and email
    #[arg(long)]
    pub search: Option<String>,
}

impl CreatorsArgs {
    fn spec(&self) -> FilterSpec {
        let mut spec = FilterSpec::new()
            .with_accepted("niche", self.niche.clone())
            .with_accepted("platform", self.platform.clone())
            .with_accepted("status", self.status.clone())
            .with_accepted("badges", self.badge.clone())
            .with_accepted("gmvTier", self.tier.clone());
        if self.min_gmv.is_some() || self.max_gmv.is_some() {
            spec = spec.with_range(
                "totalGMV",
                self.min_gmv.unwrap_or(0.0),
                self.max_gmv.unwrap_or(f64::MAX),
            );
        }
        if let Some(query) = &self.search {
            spec = spec.with_query(query.clone());
        }
        spec
    }
}

pub fn run(engine: &DashboardEngine, data: &DataSet, args: &CreatorsArgs) -> Result<()> {
    let tiered = engine.tiered_creators(&data.creators);
    let spec = args.spec();
    let matched = engine.filter(&tiered, &spec);

    for entry in &matched {
        let creator = entry.creator;
        let style = status_style(&creator.status);
        println!(
            "{:<12} {:<22} {:<16} {:<12} {:>12}  {}",
            creator.id,
            creator.name,
            creator.handle,
            paint(style.badge, style.color),
            format!("${:.0}", creator.total_gmv),
            entry.gmv_tier.bold(),
        );
    }
    println!("{} of {} creators", matched.len(), data.creators.len());
    Ok(())
}

/// Map an engine color token to terminal color. Unknown tokens render
/// plain.
pub fn paint(text: &str, color: &str) -> String {
    match color {
        "green" => text.green().to_string(),
        "yellow" => text.yellow().to_string(),
        "orange" => text.bright_yellow().to_string(),
        "red" => text.red().to_string(),
        "blue" => text.blue().to_string(),
        "teal" => text.cyan().to_string(),
        "gray" => text.bright_black().to_string(),
        _ => text.to_string(),
    }
}
