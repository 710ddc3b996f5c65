//! Snapshot pie chart.

use super::svg::{category_color, Anchor, SvgDocument};
use crate::core::CategoryCount;
use std::f64::consts::PI;

const WIDTH: u32 = 640;
const HEIGHT: u32 = 640;
const RADIUS: f64 = 220.0;
const START_ANGLE_DEG: f64 = 90.0;

/// Point on the circle at `angle` radians, counter-clockwise from 3 o'clock.
fn polar(cx: f64, cy: f64, radius: f64, angle: f64) -> (f64, f64) {
    (cx + radius * angle.cos(), cy - radius * angle.sin())
}

/// Angular extent of each slice in radians, starting at 90° and running
/// counter-clockwise. Returns `(start, end)` pairs.
pub fn slice_angles(counts: &[CategoryCount]) -> Vec<(f64, f64)> {
    let total: usize = counts.iter().map(|c| c.count).sum();
    if total == 0 {
        return Vec::new();
    }

    let mut start = START_ANGLE_DEG.to_radians();
    counts
        .iter()
        .map(|c| {
            let sweep = 2.0 * PI * c.count as f64 / total as f64;
            let slice = (start, start + sweep);
            start += sweep;
            slice
        })
        .collect()
}

/// Render a pie with one slice per category and `%.1f%%` labels.
pub fn render_pie(title: &str, counts: &[CategoryCount]) -> String {
    let mut doc = SvgDocument::new(WIDTH, HEIGHT);
    let (cx, cy) = (doc.width() / 2.0, doc.height() / 2.0 + 20.0);
    doc.text(cx, 32.0, 16, Anchor::Middle, title);

    let slices: Vec<CategoryCount> = counts.iter().filter(|c| c.count > 0).cloned().collect();
    let total: usize = slices.iter().map(|c| c.count).sum();

    if total == 0 {
        doc.text(cx, cy, 14, Anchor::Middle, "No data");
        return doc.finish();
    }

    for (count, (start, end)) in slices.iter().zip(slice_angles(&slices)) {
        let fill = category_color(count.category);
        if slices.len() == 1 {
            doc.circle(cx, cy, RADIUS, fill, "black");
        } else {
            let (x1, y1) = polar(cx, cy, RADIUS, start);
            let (x2, y2) = polar(cx, cy, RADIUS, end);
            let large_arc = u8::from(end - start > PI);
            let r = RADIUS;
            doc.raw(&format!(
                r#"<path d="M {cx:.2} {cy:.2} L {x1:.2} {y1:.2} A {r:.2} {r:.2} 0 {large_arc} 0 {x2:.2} {y2:.2} Z" fill="{fill}" stroke="black" stroke-width="1"/>"#
            ));
        }

        let mid = (start + end) / 2.0;
        let share = count.count as f64 * 100.0 / total as f64;
        let (px, py) = polar(cx, cy, RADIUS * 0.6, mid);
        doc.text(px, py, 13, Anchor::Middle, &format!("{share:.1}%"));

        let (lx, ly) = polar(cx, cy, RADIUS * 1.12, mid);
        let anchor = if mid.cos() > 0.1 {
            Anchor::Start
        } else if mid.cos() < -0.1 {
            Anchor::End
        } else {
            Anchor::Middle
        };
        doc.text(lx, ly, 13, anchor, count.category.label());
    }

    doc.finish()
}
