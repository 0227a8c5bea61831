use serde::Serialize;

// Palette shared across the dial. Values match the classic face: tk-style
// purple/grey plus pure primaries for the three time systems.
pub const INK: Color = Color::rgb(0, 0, 0);
pub const DIAL_PURPLE: Color = Color::rgb(160, 32, 240);
pub const SIDEREAL_BLUE: Color = Color::rgb(0, 0, 255);
pub const UT_RED: Color = Color::rgb(255, 0, 0);
pub const SOFT_GREY: Color = Color::rgb(190, 190, 190);
pub const EVENT_GREEN: Color = Color::rgb(0, 255, 0);
pub const NIGHT_SHADE: Color = Color::rgb(238, 238, 238);

/// RGB triple carried by every primitive; the painter maps it onto the
/// backend color type at draw time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The four shapes the dial is built from. Angles are dial angles in
/// radians; a wedge fills the pie from `start_angle` backward through
/// `extent_deg` degrees (toward earlier hours).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Circle {
        center: Point,
        radius: f64,
        outline: Color,
        width: f32,
    },
    Segment {
        from: Point,
        to: Point,
        color: Color,
        width: f32,
        arrow: bool,
    },
    Wedge {
        center: Point,
        radius: f64,
        start_angle: f64,
        extent_deg: f64,
        fill: Color,
    },
    Glyph {
        at: Point,
        text: String,
        color: Color,
        size: f32,
    },
}

/// One tick's worth of draw calls, in paint order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DialScene {
    pub primitives: Vec<Primitive>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PrimitiveCounts {
    pub circles: usize,
    pub segments: usize,
    pub wedges: usize,
    pub glyphs: usize,
}

impl PrimitiveCounts {
    pub fn total(&self) -> usize {
        self.circles + self.segments + self.wedges + self.glyphs
    }
}

impl DialScene {
    pub fn circle(&mut self, center: Point, radius: f64, outline: Color, width: f32) {
        self.primitives.push(Primitive::Circle {
            center,
            radius,
            outline,
            width,
        });
    }

    pub fn segment(&mut self, from: Point, to: Point, color: Color, width: f32) {
        self.primitives.push(Primitive::Segment {
            from,
            to,
            color,
            width,
            arrow: false,
        });
    }

    /// Segment with an arrowhead at `to`; used for the three hands.
    pub fn hand(&mut self, from: Point, to: Point, color: Color, width: f32) {
        self.primitives.push(Primitive::Segment {
            from,
            to,
            color,
            width,
            arrow: true,
        });
    }

    pub fn wedge(
        &mut self,
        center: Point,
        radius: f64,
        start_angle: f64,
        extent_deg: f64,
        fill: Color,
    ) {
        self.primitives.push(Primitive::Wedge {
            center,
            radius,
            start_angle,
            extent_deg,
            fill,
        });
    }

    pub fn glyph(&mut self, at: Point, text: impl Into<String>, color: Color, size: f32) {
        self.primitives.push(Primitive::Glyph {
            at,
            text: text.into(),
            color,
            size,
        });
    }

    pub fn counts(&self) -> PrimitiveCounts {
        let mut counts = PrimitiveCounts::default();
        for primitive in &self.primitives {
            match primitive {
                Primitive::Circle { .. } => counts.circles += 1,
                Primitive::Segment { .. } => counts.segments += 1,
                Primitive::Wedge { .. } => counts.wedges += 1,
                Primitive::Glyph { .. } => counts.glyphs += 1,
            }
        }
        counts
    }
}
