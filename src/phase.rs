use serde::Serialize;

use crate::scene::{self, Color};

pub const MOON_NEW: Color = Color::rgb(204, 204, 204);
pub const MOON_QUARTER: Color = Color::rgb(102, 102, 102);
pub const MOON_FULL: Color = Color::rgb(34, 34, 34);

/// Shade band for the Moon glyph, selected from the illuminated fraction
/// alone. Waxing and waning quarters share a shade but stay distinct
/// bands. The band boundaries leave exactly one value (0.875) unclaimed;
/// that falls through to `Indeterminate` and paints plain black.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhaseBand {
    New,
    WaxingQuarter,
    Full,
    WaningQuarter,
    Indeterminate,
}

impl PhaseBand {
    pub fn classify(fraction: f64) -> Self {
        if fraction < 0.125 || fraction > 0.875 {
            PhaseBand::New
        } else if (0.125..0.375).contains(&fraction) {
            PhaseBand::WaxingQuarter
        } else if (0.375..0.625).contains(&fraction) {
            PhaseBand::Full
        } else if (0.625..0.875).contains(&fraction) {
            PhaseBand::WaningQuarter
        } else {
            PhaseBand::Indeterminate
        }
    }

    pub fn fill(self) -> Color {
        match self {
            PhaseBand::New => MOON_NEW,
            PhaseBand::WaxingQuarter | PhaseBand::WaningQuarter => MOON_QUARTER,
            PhaseBand::Full => MOON_FULL,
            PhaseBand::Indeterminate => scene::INK,
        }
    }
}

/// Between-tick illumination movement. Display-only; the band above never
/// consults it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseTrend {
    Waxing,
    Waning,
    Unchanged,
}

impl PhaseTrend {
    pub fn from_fractions(current: f64, previous: f64) -> Self {
        if current > previous {
            PhaseTrend::Waxing
        } else if current < previous {
            PhaseTrend::Waning
        } else {
            PhaseTrend::Unchanged
        }
    }

    pub fn word(self) -> &'static str {
        match self {
            PhaseTrend::Waxing => "waxing",
            PhaseTrend::Waning => "waning",
            PhaseTrend::Unchanged => "",
        }
    }
}

/// Shade for the Moon glyph at the given illuminated fraction.
pub fn moon_shade(fraction: f64) -> Color {
    PhaseBand::classify(fraction).fill()
}
