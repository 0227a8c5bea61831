use eframe::egui::{self, Align2, Color32, FontId, Pos2, Shape, Stroke};

use crate::scene::{Color, DialScene, Point, Primitive};

pub fn egui_color(color: Color) -> Color32 {
    Color32::from_rgb(color.r, color.g, color.b)
}

fn translate(origin: Pos2, point: &Point) -> Pos2 {
    Pos2::new(origin.x + point.x as f32, origin.y + point.y as f32)
}

/// Replay one scene into the canvas painter, origin at the canvas
/// top-left. Primitives arrive already in paint order.
pub fn paint_scene(painter: &egui::Painter, origin: Pos2, scene: &DialScene) {
    for primitive in &scene.primitives {
        match primitive {
            Primitive::Circle {
                center,
                radius,
                outline,
                width,
            } => {
                painter.circle_stroke(
                    translate(origin, center),
                    *radius as f32,
                    Stroke::new(*width, egui_color(*outline)),
                );
            }
            Primitive::Segment {
                from,
                to,
                color,
                width,
                arrow,
            } => {
                let from = translate(origin, from);
                let to = translate(origin, to);
                let stroke = Stroke::new(*width, egui_color(*color));
                painter.line_segment([from, to], stroke);
                if *arrow {
                    paint_arrowhead(painter, from, to, stroke);
                }
            }
            Primitive::Wedge {
                center,
                radius,
                start_angle,
                extent_deg,
                fill,
            } => {
                paint_wedge(
                    painter,
                    translate(origin, center),
                    *radius,
                    *start_angle,
                    *extent_deg,
                    egui_color(*fill),
                );
            }
            Primitive::Glyph {
                at,
                text,
                color,
                size,
            } => {
                painter.text(
                    translate(origin, at),
                    Align2::CENTER_CENTER,
                    text,
                    FontId::monospace(*size),
                    egui_color(*color),
                );
            }
        }
    }
}

/// Two barbs swept back thirty degrees either side of the shaft tip.
fn paint_arrowhead(painter: &egui::Painter, from: Pos2, to: Pos2, stroke: Stroke) {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let length = (dx * dx + dy * dy).sqrt();
    if length < f32::EPSILON {
        return;
    }
    let ux = dx / length;
    let uy = dy / length;
    let size = 10.0_f32.min(length / 3.0);
    for side in [-0.5f32, 0.5] {
        let cos = 0.866_025_4;
        let bx = ux * cos - uy * side;
        let by = ux * side + uy * cos;
        painter.line_segment(
            [to, Pos2::new(to.x - bx * size, to.y - by * size)],
            stroke,
        );
    }
}

/// Pie slice from `start_angle` sweeping `extent_deg` degrees backward
/// toward earlier hours. Painted as a fan of triangles since the night
/// span regularly exceeds a half turn and a single polygon would not stay
/// convex.
fn paint_wedge(
    painter: &egui::Painter,
    center: Pos2,
    radius: f64,
    start_angle: f64,
    extent_deg: f64,
    fill: Color32,
) {
    if extent_deg <= 0.0 {
        return;
    }
    let extent = extent_deg.to_radians();
    let steps = (extent_deg / 4.0).ceil().max(1.0) as usize;
    let begin = start_angle - extent;
    let mut previous = rim_point(center, radius, begin);
    for step in 1..=steps {
        let angle = begin + extent * step as f64 / steps as f64;
        let next = rim_point(center, radius, angle);
        painter.add(Shape::convex_polygon(
            vec![center, previous, next],
            fill,
            Stroke::NONE,
        ));
        previous = next;
    }
}

fn rim_point(center: Pos2, radius: f64, angle: f64) -> Pos2 {
    Pos2::new(
        center.x + (radius * angle.cos()) as f32,
        center.y + (radius * angle.sin()) as f32,
    )
}
