use clap::Args;
use serde_json::{json, Value};

use household_finance_core::history::territory::{
    territorial_events, territorial_snapshot, YearStepper, DEFAULT_YEAR,
};
use household_finance_core::history::treaties::{
    filter_treaties, treaties, treaty_types, year_bounds, TreatyFilter,
};

/// Arguments for the treaty browser
#[derive(Args)]
pub struct TreatiesArgs {
    /// Keep only these treaty types (repeatable)
    #[arg(long = "type")]
    pub types: Vec<String>,

    /// Earliest year to include
    #[arg(long)]
    pub from: Option<i32>,

    /// Latest year to include
    #[arg(long)]
    pub to: Option<i32>,

    /// Case-insensitive text search on name, description and signatories
    #[arg(long)]
    pub search: Option<String>,

    /// List the available treaty types and year range instead
    #[arg(long)]
    pub list_types: bool,
}

/// Arguments for the territorial timeline
#[derive(Args)]
pub struct TerritoryArgs {
    /// Year to show (clamped to the timeline)
    #[arg(long)]
    pub year: Option<i32>,

    /// Play the whole timeline from the first year
    #[arg(long, conflicts_with = "year")]
    pub play: bool,

    /// List the key territorial events
    #[arg(long, conflicts_with_all = ["year", "play"])]
    pub events: bool,
}

pub fn run_treaties(args: TreatiesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let table = treaties()?;

    if args.list_types {
        let (first, last) = year_bounds(&table).ok_or("treaty table is empty")?;
        return Ok(json!({
            "types": treaty_types(),
            "first_year": first,
            "last_year": last,
        }));
    }

    let filter = TreatyFilter {
        types: args.types,
        from_year: args.from,
        to_year: args.to,
        search: args.search,
    };
    let rows = filter_treaties(&table, &filter);
    tracing::debug!(matched = rows.len(), total = table.len(), "filtered treaties");
    Ok(serde_json::to_value(rows)?)
}

pub fn run_territory(args: TerritoryArgs) -> Result<Value, Box<dyn std::error::Error>> {
    if args.events {
        return Ok(serde_json::to_value(territorial_events())?);
    }

    let mut stepper = YearStepper::default();
    if args.play {
        stepper.play();
        let mut frames = Vec::new();
        while let Some(year) = stepper.next_frame() {
            frames.push(territorial_snapshot(year));
        }
        return Ok(serde_json::to_value(frames)?);
    }

    stepper.select(args.year.unwrap_or(DEFAULT_YEAR));
    Ok(serde_json::to_value(territorial_snapshot(stepper.selected_year))?)
}
