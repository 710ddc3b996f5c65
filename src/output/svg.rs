//! Minimal SVG document builder shared by the chart renderers.

use crate::risk::CleanedCategory;
use html_escape::encode_text;
use std::fmt::Write as _;

/// Pastel palette, one fixed color per cleaned category.
pub fn category_color(category: CleanedCategory) -> &'static str {
    match category {
        CleanedCategory::TrueReducer => "#a1c9f4",
        CleanedCategory::OffsetHeavy => "#ffb482",
        CleanedCategory::PotentialGreenwasher => "#8de5a1",
        CleanedCategory::Other => "#ff9f9b",
    }
}

/// Darker stroke for line series so they stay visible on white.
pub fn series_color(category: CleanedCategory) -> &'static str {
    match category {
        CleanedCategory::TrueReducer => "#4c72b0",
        CleanedCategory::OffsetHeavy => "#dd8452",
        CleanedCategory::PotentialGreenwasher => "#55a868",
        CleanedCategory::Other => "#c44e52",
    }
}

/// Text anchor for a label placed outside a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// Accumulates SVG elements and closes the document on [`SvgDocument::finish`].
#[derive(Debug)]
pub struct SvgDocument {
    body: String,
    width: u32,
    height: u32,
}

impl SvgDocument {
    pub fn new(width: u32, height: u32) -> Self {
        let mut body = String::new();
        let _ = writeln!(
            body,
            r#"<rect x="0" y="0" width="{width}" height="{height}" fill="white"/>"#
        );
        Self {
            body,
            width,
            height,
        }
    }

    pub fn width(&self) -> f64 {
        self.width as f64
    }

    pub fn height(&self) -> f64 {
        self.height as f64
    }

    pub fn raw(&mut self, element: &str) {
        self.body.push_str(element);
        self.body.push('\n');
    }

    pub fn text(&mut self, x: f64, y: f64, size: u32, anchor: Anchor, content: &str) {
        let _ = writeln!(
            self.body,
            r#"<text x="{x:.2}" y="{y:.2}" font-family="sans-serif" font-size="{size}" text-anchor="{}" dominant-baseline="middle">{}</text>"#,
            anchor.as_str(),
            encode_text(content)
        );
    }

    pub fn rotated_text(&mut self, x: f64, y: f64, size: u32, angle: f64, content: &str) {
        let _ = writeln!(
            self.body,
            r#"<text x="{x:.2}" y="{y:.2}" font-family="sans-serif" font-size="{size}" text-anchor="middle" dominant-baseline="middle" transform="rotate({angle:.1} {x:.2} {y:.2})">{}</text>"#,
            encode_text(content)
        );
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &str, width: f64) {
        let _ = writeln!(
            self.body,
            r#"<line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}" stroke="{stroke}" stroke-width="{width}"/>"#
        );
    }

    pub fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: &str, stroke: &str) {
        let _ = writeln!(
            self.body,
            r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="{r:.2}" fill="{fill}" stroke="{stroke}" stroke-width="1"/>"#
        );
    }

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &str, stroke: &str) {
        let _ = writeln!(
            self.body,
            r#"<rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" fill="{fill}" stroke="{stroke}" stroke-width="1"/>"#
        );
    }

    pub fn polyline(&mut self, points: &[(f64, f64)], stroke: &str, width: f64) {
        let coords: Vec<String> = points
            .iter()
            .map(|(x, y)| format!("{x:.2},{y:.2}"))
            .collect();
        let _ = writeln!(
            self.body,
            r#"<polyline points="{}" fill="none" stroke="{stroke}" stroke-width="{width}"/>"#,
            coords.join(" ")
        );
    }

    pub fn finish(self) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n{body}</svg>\n",
            w = self.width,
            h = self.height,
            body = self.body
        )
    }
}
