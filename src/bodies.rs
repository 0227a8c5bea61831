use serde::{Deserialize, Serialize};

use crate::scene::{self, Color};

pub const SUPERIOR_RED: Color = Color::rgb(178, 34, 34);
pub const MARS_RED: Color = Color::rgb(139, 0, 0);
pub const ICE_BLUE: Color = Color::rgb(0, 191, 255);

/// Fraction of the dial radius where the Moon glyph sits; its shade comes
/// from the phase selector rather than the placement table.
pub const MOON_RADIUS_FRACTION: f64 = 0.1;

/// The nine plotted bodies. Lowercase serde names double as the tokens in
/// snapshot files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyId {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

/// Paint order on the dial: Moon underneath, then the Sun outward through
/// the planets.
pub const DRAW_ORDER: [BodyId; 9] = [
    BodyId::Moon,
    BodyId::Sun,
    BodyId::Mercury,
    BodyId::Venus,
    BodyId::Mars,
    BodyId::Jupiter,
    BodyId::Saturn,
    BodyId::Uranus,
    BodyId::Neptune,
];

impl BodyId {
    pub fn glyph(self) -> &'static str {
        match self {
            BodyId::Sun => "\u{2609}",
            BodyId::Moon => "\u{263E}",
            BodyId::Mercury => "\u{263F}",
            BodyId::Venus => "\u{2640}",
            BodyId::Mars => "\u{2642}",
            BodyId::Jupiter => "\u{2643}",
            BodyId::Saturn => "\u{2644}",
            BodyId::Uranus => "\u{26E2}",
            BodyId::Neptune => "\u{2646}",
        }
    }
}

/// Geocentric position of one body as the dial needs it: right ascension
/// for the angle, distance for the Mercury/Venus inferior test.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyState {
    pub ra_deg: f64,
    pub distance_au: f64,
}

/// One tick's sky: every plotted body plus the Moon's illuminated
/// fraction, as delivered by the ephemeris source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkyState {
    pub sun: BodyState,
    pub moon: BodyState,
    pub mercury: BodyState,
    pub venus: BodyState,
    pub mars: BodyState,
    pub jupiter: BodyState,
    pub saturn: BodyState,
    pub uranus: BodyState,
    pub neptune: BodyState,
    pub moon_fraction: f64,
}

impl SkyState {
    pub fn body(&self, id: BodyId) -> &BodyState {
        match id {
            BodyId::Sun => &self.sun,
            BodyId::Moon => &self.moon,
            BodyId::Mercury => &self.mercury,
            BodyId::Venus => &self.venus,
            BodyId::Mars => &self.mars,
            BodyId::Jupiter => &self.jupiter,
            BodyId::Saturn => &self.saturn,
            BodyId::Uranus => &self.uranus,
            BodyId::Neptune => &self.neptune,
        }
    }
}

/// Display radius fraction and color for a body. Mercury and Venus swap
/// between an inner black slot and an outer firebrick slot depending on
/// whether they are nearer than the Sun; a distance exactly equal to the
/// Sun's takes the superior slot.
pub fn placement(body: BodyId, state: &BodyState, sun: &BodyState) -> (f64, Color) {
    match body {
        BodyId::Sun => (0.3, scene::INK),
        BodyId::Moon => (MOON_RADIUS_FRACTION, scene::INK),
        BodyId::Mercury => {
            if state.distance_au < sun.distance_au {
                (0.25, scene::INK)
            } else {
                (0.35, SUPERIOR_RED)
            }
        }
        BodyId::Venus => {
            if state.distance_au < sun.distance_au {
                (0.2, scene::INK)
            } else {
                (0.4, SUPERIOR_RED)
            }
        }
        BodyId::Mars => (0.5, MARS_RED),
        BodyId::Jupiter => (0.55, scene::SOFT_GREY),
        BodyId::Saturn => (0.58, scene::SOFT_GREY),
        BodyId::Uranus => (0.62, ICE_BLUE),
        BodyId::Neptune => (0.67, ICE_BLUE),
    }
}
