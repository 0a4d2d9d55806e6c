use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const FIRST_YEAR: i32 = 1920;
pub const LAST_YEAR: i32 = 2024;
pub const DEFAULT_YEAR: i32 = 1991;

/// An event is shown as context when it lies within this many years.
const EVENT_WINDOW_YEARS: i32 = 3;

const TERRITORIAL_EVENTS: [(i32, &str); 6] = [
    (1922, "Formation of USSR"),
    (1954, "Crimea transferred to Ukrainian SSR"),
    (1991, "Dissolution of USSR, Ukrainian independence"),
    (2014, "Russia annexes Crimea"),
    (2022, "Russia invades Ukraine"),
    (2024, "Crimea Status Accord (hypothetical)"),
];

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerritorialPhase {
    PostWwi,
    Soviet,
    PostSoviet,
    PostAnnexation,
    PostInvasion,
    PostAccord,
}

impl TerritorialPhase {
    pub fn for_year(year: i32) -> Self {
        match year {
            y if y < 1922 => Self::PostWwi,
            y if y < 1991 => Self::Soviet,
            y if y < 2014 => Self::PostSoviet,
            y if y < 2022 => Self::PostAnnexation,
            y if y < 2024 => Self::PostInvasion,
            _ => Self::PostAccord,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::PostWwi => "Post-WWI Period (Early Soviet Russia)",
            Self::Soviet => "Soviet Period",
            Self::PostSoviet => "Post-Soviet Period",
            Self::PostAnnexation => "Post-2014 Period",
            Self::PostInvasion => "Post-2022 Invasion",
            Self::PostAccord => "Post-2024 Accord (Hypothetical)",
        }
    }

    pub fn ukraine_status(self) -> &'static str {
        match self {
            Self::PostWwi => "Various entities/disputed",
            Self::Soviet => "Ukrainian SSR (part of USSR)",
            Self::PostSoviet => "Independent Ukraine",
            Self::PostAnnexation => "Ukraine (Crimea under Russian control)",
            Self::PostInvasion => "Ukraine (parts occupied by Russia)",
            Self::PostAccord => "Ukraine (Crimea status under negotiation)",
        }
    }

    pub fn russia_status(self) -> &'static str {
        match self {
            Self::PostWwi => "Early Soviet Russia",
            Self::Soviet => "Russian SFSR (part of USSR)",
            Self::PostSoviet => "Russian Federation",
            Self::PostAnnexation => "Russian Federation (including Crimea)",
            Self::PostInvasion => "Russian Federation (claims additional Ukrainian territories)",
            Self::PostAccord => "Russian Federation (Crimea status disputed)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegionStatus {
    Occupied,
    Disputed,
}

/// A point marker on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkedRegion {
    pub name: &'static str,
    pub lon: i32,
    pub lat: i32,
    pub status: RegionStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TerritorialEvent {
    pub year: i32,
    pub description: &'static str,
}

/// Everything the map view needs for one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TerritorialSnapshot {
    pub year: i32,
    pub phase: TerritorialPhase,
    pub title: &'static str,
    pub ukraine_status: &'static str,
    pub russia_status: &'static str,
    pub marked_regions: Vec<MarkedRegion>,
    pub nearby_event: Option<TerritorialEvent>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn territorial_events() -> Vec<TerritorialEvent> {
    TERRITORIAL_EVENTS
        .iter()
        .map(|&(year, description)| TerritorialEvent { year, description })
        .collect()
}

/// Closest territorial event within the context window. Ties go to the
/// earlier event.
pub fn nearest_event(year: i32) -> Option<TerritorialEvent> {
    TERRITORIAL_EVENTS
        .iter()
        .min_by_key(|(event_year, _)| ((event_year - year).abs(), *event_year))
        .filter(|(event_year, _)| (event_year - year).abs() <= EVENT_WINDOW_YEARS)
        .map(|&(year, description)| TerritorialEvent { year, description })
}

/// The map state for `year`.
pub fn territorial_snapshot(year: i32) -> TerritorialSnapshot {
    let phase = TerritorialPhase::for_year(year);
    TerritorialSnapshot {
        year,
        phase,
        title: phase.title(),
        ukraine_status: phase.ukraine_status(),
        russia_status: phase.russia_status(),
        marked_regions: marked_regions(phase),
        nearby_event: nearest_event(year),
    }
}

fn marked_regions(phase: TerritorialPhase) -> Vec<MarkedRegion> {
    let region = |name, lon, lat, status| MarkedRegion { name, lon, lat, status };
    match phase {
        TerritorialPhase::PostAnnexation => {
            vec![region("Crimea", 34, 45, RegionStatus::Occupied)]
        }
        TerritorialPhase::PostInvasion => vec![
            region("Crimea", 34, 45, RegionStatus::Occupied),
            region("Donetsk", 37, 47, RegionStatus::Occupied),
            region("Luhansk", 38, 48, RegionStatus::Occupied),
            region("Zaporizhzhia/Kherson", 36, 46, RegionStatus::Occupied),
        ],
        TerritorialPhase::PostAccord => {
            vec![region("Crimea", 34, 45, RegionStatus::Disputed)]
        }
        _ => Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Year stepper
// ---------------------------------------------------------------------------

/// Selected year and play flag for the territorial timeline.
///
/// Owned by the presentation layer. Playback is cooperative: the caller asks
/// for the next frame, renders [`territorial_snapshot`] for it and waits its
/// own delay. Pausing between frames cancels playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearStepper {
    pub selected_year: i32,
    pub playing: bool,
}

impl Default for YearStepper {
    fn default() -> Self {
        Self {
            selected_year: DEFAULT_YEAR,
            playing: false,
        }
    }
}

impl YearStepper {
    /// Select a year, clamped to the timeline.
    pub fn select(&mut self, year: i32) {
        self.selected_year = year.clamp(FIRST_YEAR, LAST_YEAR);
    }

    /// Restart playback from the first year.
    pub fn play(&mut self) {
        self.selected_year = FIRST_YEAR;
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Year to render next, or `None` once playback has stopped. Playback
    /// stops by itself after the last year.
    pub fn next_frame(&mut self) -> Option<i32> {
        if !self.playing {
            return None;
        }
        let year = self.selected_year;
        if year >= LAST_YEAR {
            self.playing = false;
        } else {
            self.selected_year += 1;
        }
        Some(year)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
