//! Trend line chart: one series per cleaned category.

use super::svg::{category_color, series_color, Anchor, SvgDocument};
use crate::core::TrendPoint;
use crate::risk::CleanedCategory;
use std::collections::BTreeMap;

const WIDTH: u32 = 960;
const HEIGHT: u32 = 480;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 210.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 60.0;
const MAX_X_TICKS: i64 = 20;

/// Round a raw tick step up to 1, 2 or 5 times a power of ten.
pub fn nice_step(raw: f64) -> f64 {
    if raw <= 0.0 || !raw.is_finite() {
        return 1.0;
    }
    let magnitude = 10f64.powi(raw.log10().floor() as i32);
    let residual = raw / magnitude;
    let nice = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    (nice * magnitude).max(1.0)
}

/// Points of each category in year order.
pub fn series_by_category(points: &[TrendPoint]) -> BTreeMap<CleanedCategory, Vec<(i32, usize)>> {
    let mut series: BTreeMap<CleanedCategory, Vec<(i32, usize)>> = BTreeMap::new();
    for point in points {
        series
            .entry(point.category)
            .or_default()
            .push((point.year, point.count));
    }
    for values in series.values_mut() {
        values.sort_unstable();
    }
    series
}

struct Axes {
    x_min: i32,
    x_max: i32,
    y_max: f64,
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
}

impl Axes {
    fn x(&self, year: i32) -> f64 {
        let span = self.x_span() as f64;
        let offset = i64::from(year) - i64::from(self.x_min);
        self.left + offset as f64 / span * (self.right - self.left)
    }

    fn x_span(&self) -> i64 {
        i64::from(self.x_max) - i64::from(self.x_min)
    }

    fn y(&self, count: f64) -> f64 {
        self.bottom - count / self.y_max * (self.bottom - self.top)
    }
}

/// Render the trend chart with year on x and entity count on y.
pub fn render_trend(title: &str, points: &[TrendPoint]) -> String {
    let mut doc = SvgDocument::new(WIDTH, HEIGHT);
    doc.text(doc.width() / 2.0, 24.0, 16, Anchor::Middle, title);

    let (Some(first), Some(last)) = (
        points.iter().map(|p| p.year).min(),
        points.iter().map(|p| p.year).max(),
    ) else {
        doc.text(doc.width() / 2.0, doc.height() / 2.0, 14, Anchor::Middle, "No data");
        return doc.finish();
    };

    let (x_min, x_max) = if first == last {
        (first.saturating_sub(1), last.saturating_add(1))
    } else {
        (first, last)
    };
    let max_count = points.iter().map(|p| p.count).max().unwrap_or(0) as f64;
    let y_step = nice_step(max_count / 5.0);
    let y_max = ((max_count / y_step).ceil() * y_step).max(y_step);

    let axes = Axes {
        x_min,
        x_max,
        y_max,
        left: MARGIN_LEFT,
        right: doc.width() - MARGIN_RIGHT,
        top: MARGIN_TOP,
        bottom: doc.height() - MARGIN_BOTTOM,
    };

    draw_grid(&mut doc, &axes, y_step);
    draw_series(&mut doc, &axes, points);

    doc.text(
        (axes.left + axes.right) / 2.0,
        doc.height() - 18.0,
        13,
        Anchor::Middle,
        "Year",
    );
    doc.rotated_text(18.0, (axes.top + axes.bottom) / 2.0, 13, -90.0, "Number of Companies");

    doc.finish()
}

fn draw_grid(doc: &mut SvgDocument, axes: &Axes, y_step: f64) {
    let mut tick = 0.0;
    while tick <= axes.y_max + 1e-9 {
        let y = axes.y(tick);
        doc.line(axes.left, y, axes.right, y, "#e5e5e5", 1.0);
        doc.text(axes.left - 8.0, y, 11, Anchor::End, &format!("{tick}"));
        tick += y_step;
    }

    let every = (axes.x_span() + MAX_X_TICKS - 1) / MAX_X_TICKS;
    let every = usize::try_from(every.max(1)).unwrap_or(usize::MAX);
    for year in (axes.x_min..=axes.x_max).step_by(every) {
        let x = axes.x(year);
        doc.line(x, axes.bottom, x, axes.bottom + 5.0, "black", 1.0);
        doc.text(x, axes.bottom + 16.0, 11, Anchor::Middle, &year.to_string());
    }

    doc.line(axes.left, axes.bottom, axes.right, axes.bottom, "black", 1.0);
    doc.line(axes.left, axes.top, axes.left, axes.bottom, "black", 1.0);
}

fn draw_series(doc: &mut SvgDocument, axes: &Axes, points: &[TrendPoint]) {
    let legend_x = axes.right + 20.0;
    doc.rect(legend_x - 10.0, axes.top - 10.0, 180.0, 30.0 + 22.0 * 4.0, "white", "#cccccc");
    doc.text(legend_x, axes.top + 6.0, 13, Anchor::Start, "Risk Category");

    for (index, (category, values)) in series_by_category(points).into_iter().enumerate() {
        let stroke = series_color(category);
        let coords: Vec<(f64, f64)> = values
            .iter()
            .map(|(year, count)| (axes.x(*year), axes.y(*count as f64)))
            .collect();

        doc.polyline(&coords, stroke, 2.0);
        for (x, y) in &coords {
            doc.circle(*x, *y, 4.0, category_color(category), stroke);
        }

        let ly = axes.top + 30.0 + 22.0 * index as f64;
        doc.line(legend_x, ly, legend_x + 24.0, ly, stroke, 2.0);
        doc.circle(legend_x + 12.0, ly, 4.0, category_color(category), stroke);
        doc.text(legend_x + 32.0, ly, 12, Anchor::Start, category.label());
    }
}
