use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::FinanceError;
use crate::FinanceResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Treaty {
    pub name: String,
    pub date: NaiveDate,
    pub description: String,
    pub signatories: String,
    pub status: String,
    pub treaty_type: String,
    pub reference: String,
}

impl Treaty {
    pub fn year(&self) -> i32 {
        self.date.year()
    }
}

/// Filter over the treaty table. Empty `types` keeps every type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TreatyFilter {
    pub types: Vec<String>,
    pub from_year: Option<i32>,
    pub to_year: Option<i32>,
    /// Case-insensitive match on name, description or signatories.
    pub search: Option<String>,
}

// ---------------------------------------------------------------------------
// Data
// ---------------------------------------------------------------------------

// (name, date, description, signatories, status, type, reference)
const TREATY_ROWS: [(&str, &str, &str, &str, &str, &str, &str); 18] = [
    (
        "Lend-Lease Act (USSR)",
        "1941-10-01",
        "US program to supply the USSR with war material during WWII",
        "US, USSR",
        "Completed 1945",
        "Economic/Military Aid",
        "U.S. Department of State, 'Lend-Lease and Military Aid to the Allies in the Early Years of World War II'",
    ),
    (
        "Yalta Conference Agreement",
        "1945-02-11",
        "Post-WWII reorganization of Europe agreed by US, UK and USSR",
        "US, USSR, UK",
        "Implemented",
        "Post-War Settlement",
        "U.S. Department of State, Office of the Historian, 'The Yalta Conference, 1945'",
    ),
    (
        "Potsdam Conference",
        "1945-08-02",
        "Further decisions on Germany, Poland, and post-war order",
        "US, USSR, UK",
        "Implemented",
        "Post-War Settlement",
        "U.S. Department of State, Office of the Historian, 'The Potsdam Conference, 1945'",
    ),
    (
        "SALT I",
        "1972-05-26",
        "Strategic Arms Limitation Talks between US and USSR",
        "US, USSR",
        "Expired 1977",
        "Arms Control",
        "U.S. Department of State, 'Strategic Arms Limitations Talks/Treaty (SALT) I and II'",
    ),
    (
        "Helsinki Accords",
        "1975-08-01",
        "Agreement recognizing post-WWII borders in Europe",
        "US, USSR, and other European states",
        "Still in effect",
        "Security/Human Rights",
        "Organization for Security and Co-operation in Europe, 'Helsinki Final Act'",
    ),
    (
        "INF Treaty",
        "1987-12-08",
        "Intermediate-Range Nuclear Forces Treaty (US-USSR)",
        "US, USSR",
        "US withdrew 2019, Russia withdrew 2023",
        "Arms Control",
        "U.S. Department of State, 'INF Treaty'",
    ),
    (
        "START I",
        "1991-07-31",
        "Strategic Arms Reduction Treaty between US and USSR",
        "US, USSR",
        "Expired 2009",
        "Arms Control",
        "U.S. Department of State, 'START I'",
    ),
    (
        "Budapest Memorandum",
        "1994-12-05",
        "Security assurances to Ukraine in exchange for giving up nuclear weapons",
        "US, Russia, UK, Ukraine",
        "Russia claimed violation in 2014",
        "Security",
        "UN Document A/49/765",
    ),
    (
        "NATO-Russia Founding Act",
        "1997-05-27",
        "Foundation of cooperation between NATO and Russia",
        "NATO members, Russia",
        "Relations suspended 2014",
        "Security Cooperation",
        "NATO, 'Founding Act'",
    ),
    (
        "START II",
        "1993-01-03",
        "Further strategic arms reductions (never fully implemented)",
        "US, Russia",
        "Never fully implemented, US withdrew 2002",
        "Arms Control",
        "U.S. Department of State, 'START II'",
    ),
    (
        "SORT Treaty",
        "2002-05-24",
        "Strategic Offensive Reductions Treaty (US-Russia)",
        "US, Russia",
        "Superseded by New START",
        "Arms Control",
        "U.S. Department of State, 'SORT Treaty'",
    ),
    (
        "New START Treaty",
        "2010-04-08",
        "Nuclear arms reduction treaty between US and Russia",
        "US, Russia",
        "Extended until 2026",
        "Arms Control",
        "U.S. Department of State, 'New START Treaty'",
    ),
    (
        "Minsk Protocol",
        "2014-09-05",
        "Ceasefire agreement during Donbas conflict in Ukraine",
        "Ukraine, Russia, OSCE",
        "Limited implementation",
        "Ceasefire",
        "OSCE, 'Minsk Protocol'",
    ),
    (
        "Minsk II",
        "2015-02-12",
        "Follow-up to the Minsk Protocol",
        "Ukraine, Russia, Germany, France",
        "Limited implementation",
        "Ceasefire",
        "United Nations, 'Minsk II'",
    ),
    (
        "New START Extension",
        "2021-02-03",
        "Extension of the New START treaty until February 2026",
        "US, Russia",
        "Active until 2026",
        "Arms Control",
        "U.S. Department of State, 'New START Extension 2021'",
    ),
    (
        "Donbas Ceasefire 2023 (Hypothetical)",
        "2023-06-15",
        "Attempted ceasefire in Donbas amid ongoing tensions (hypothetical)",
        "Ukraine, Russia, OSCE",
        "Partially implemented (hypothetical)",
        "Ceasefire",
        "OSCE, 'Donbas Ceasefire Agreement 2023' (hypothetical)",
    ),
    (
        "Crimea Status Accord 2024 (Hypothetical)",
        "2024-03-20",
        "Agreement addressing Crimea's status with international oversight (hypothetical)",
        "Ukraine, Russia, US, EU",
        "Under negotiation (hypothetical)",
        "Territorial/Security",
        "UN, 'Crimea Status Accord 2024' (hypothetical)",
    ),
    (
        "US-Russia Arms Limitation Talks 2025 (Hypothetical)",
        "2025-01-15",
        "New talks to limit emerging tech-based arms (hypothetical)",
        "US, Russia",
        "Initial talks ongoing (hypothetical)",
        "Arms Control",
        "U.S. Department of State, 'Arms Limitation Talks 2025' (hypothetical)",
    ),
];

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// The full treaty table in its published order.
pub fn treaties() -> FinanceResult<Vec<Treaty>> {
    TREATY_ROWS
        .iter()
        .map(|&(name, date, description, signatories, status, treaty_type, reference)| {
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| {
                FinanceError::InvalidInput {
                    field: "date".into(),
                    reason: format!("{name}: {e}"),
                }
            })?;
            Ok(Treaty {
                name: name.into(),
                date,
                description: description.into(),
                signatories: signatories.into(),
                status: status.into(),
                treaty_type: treaty_type.into(),
                reference: reference.into(),
            })
        })
        .collect()
}

/// Distinct treaty types, sorted.
pub fn treaty_types() -> Vec<String> {
    let mut types: Vec<String> = TREATY_ROWS.iter().map(|row| row.5.to_string()).collect();
    types.sort();
    types.dedup();
    types
}

/// Earliest and latest treaty year.
pub fn year_bounds(table: &[Treaty]) -> Option<(i32, i32)> {
    let min = table.iter().map(Treaty::year).min()?;
    let max = table.iter().map(Treaty::year).max()?;
    Some((min, max))
}

pub fn filter_treaties(table: &[Treaty], filter: &TreatyFilter) -> Vec<Treaty> {
    let needle = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    table
        .iter()
        .filter(|t| filter.types.is_empty() || filter.types.iter().any(|ty| ty == &t.treaty_type))
        .filter(|t| filter.from_year.map_or(true, |y| t.year() >= y))
        .filter(|t| filter.to_year.map_or(true, |y| t.year() <= y))
        .filter(|t| match &needle {
            Some(n) => {
                t.name.to_lowercase().contains(n)
                    || t.description.to_lowercase().contains(n)
                    || t.signatories.to_lowercase().contains(n)
            }
            None => true,
        })
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_parses() {
        let table = treaties().unwrap();
        assert_eq!(table.len(), 18);
        assert_eq!(table[0].name, "Lend-Lease Act (USSR)");
        assert_eq!(table[0].date, NaiveDate::from_ymd_opt(1941, 10, 1).unwrap());
    }

    #[test]
    fn test_year_bounds() {
        let table = treaties().unwrap();
        assert_eq!(year_bounds(&table), Some((1941, 2025)));
        assert_eq!(year_bounds(&[]), None);
    }

    #[test]
    fn test_types_sorted_and_distinct() {
        let types = treaty_types();
        assert_eq!(types.len(), 8);
        assert_eq!(types[0], "Arms Control");
        let mut sorted = types.clone();
        sorted.sort();
        assert_eq!(types, sorted);
    }

    #[test]
    fn test_filter_by_type_and_years() {
        let table = treaties().unwrap();
        let filter = TreatyFilter {
            types: vec!["Arms Control".into()],
            from_year: Some(1990),
            to_year: Some(2010),
            search: None,
        };
        let names: Vec<String> = filter_treaties(&table, &filter)
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, ["START I", "START II", "SORT Treaty", "New START Treaty"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let table = treaties().unwrap();
        let filter = TreatyFilter {
            search: Some("  minsk ".into()),
            ..Default::default()
        };
        assert_eq!(filter_treaties(&table, &filter).len(), 2);

        let by_signatory = TreatyFilter {
            search: Some("OSCE".into()),
            ..Default::default()
        };
        assert_eq!(filter_treaties(&table, &by_signatory).len(), 2);
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let table = treaties().unwrap();
        assert_eq!(filter_treaties(&table, &TreatyFilter::default()).len(), table.len());
    }
}
