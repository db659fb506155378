//! Horizontal bar chart for the vote tally.
//!
//! [`BarChart`] serializes to JSON for clients that draw their own chart,
//! and [`BarChart::render_svg`] produces a self-contained SVG document.

use std::fmt::Write as _;

use serde::Serialize;

use crate::tally::VoteTally;

pub const CHART_TITLE: &str = "Vote distribution for the workshop time interval";
pub const CATEGORY_LABEL: &str = "Interval";
pub const VALUE_LABEL: &str = "Votes Number";

/* --------------------------------------------------------------------------
Layout constants (pixels)
-------------------------------------------------------------------------- */

const WIDTH: u32 = 760;
const TITLE_HEIGHT: u32 = 48;
const LABEL_COLUMN: u32 = 260;
const RIGHT_MARGIN: u32 = 60;
const BAR_HEIGHT: u32 = 28;
const BAR_GAP: u32 = 12;
const AXIS_HEIGHT: u32 = 40;

/// Rotated through for successive bars.
const PALETTE: [&str; 6] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarChart {
    pub title: &'static str,
    pub category_label: &'static str,
    pub value_label: &'static str,
    pub horizontal: bool,
    pub bars: Vec<Bar>,
}

impl BarChart {
    /// One bar per tally entry, in tally order.
    pub fn from_tally(tally: &VoteTally) -> Self {
        Self {
            title: CHART_TITLE,
            category_label: CATEGORY_LABEL,
            value_label: VALUE_LABEL,
            horizontal: true,
            bars: tally
                .entries
                .iter()
                .map(|e| Bar {
                    label: e.interval.clone(),
                    value: e.votes,
                })
                .collect(),
        }
    }

    pub fn height(&self) -> u32 {
        let rows = u32::try_from(self.bars.len()).unwrap_or(u32::MAX).max(1);
        TITLE_HEIGHT + rows * (BAR_HEIGHT + BAR_GAP) + AXIS_HEIGHT
    }

    /// Render the chart as an SVG document.
    ///
    /// An empty chart still has its title and axis; it just has no bars.
    pub fn render_svg(&self) -> String {
        let height = self.height();
        let plot_width = WIDTH - LABEL_COLUMN - RIGHT_MARGIN;
        let axis_y = height - AXIS_HEIGHT;
        let max_value = self.bars.iter().map(|b| b.value).max().unwrap_or(0);

        let mut svg = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{height}" viewBox="0 0 {WIDTH} {height}" font-family="sans-serif">"#
        );
        let _ = writeln!(
            svg,
            r#"  <text x="{}" y="28" text-anchor="middle" font-size="16" font-weight="bold">{}</text>"#,
            WIDTH / 2,
            escape_xml(self.title)
        );

        for (i, bar) in self.bars.iter().enumerate() {
            let row = u32::try_from(i).unwrap_or(u32::MAX);
            let y = TITLE_HEIGHT + row * (BAR_HEIGHT + BAR_GAP);
            let width = scale(bar.value, max_value, plot_width);
            let color = PALETTE[i % PALETTE.len()];
            let text_y = y + BAR_HEIGHT / 2 + 5;

            let _ = writeln!(
                svg,
                r#"  <text x="{}" y="{text_y}" text-anchor="end" font-size="13">{}</text>"#,
                LABEL_COLUMN - 8,
                escape_xml(&bar.label)
            );
            let _ = writeln!(
                svg,
                r#"  <rect x="{LABEL_COLUMN}" y="{y}" width="{width}" height="{BAR_HEIGHT}" fill="{color}"/>"#
            );
            let _ = writeln!(
                svg,
                r#"  <text x="{}" y="{text_y}" font-size="13">{}</text>"#,
                LABEL_COLUMN + width + 6,
                bar.value
            );
        }

        let _ = writeln!(
            svg,
            r##"  <line x1="{LABEL_COLUMN}" y1="{axis_y}" x2="{}" y2="{axis_y}" stroke="#333"/>"##,
            LABEL_COLUMN + plot_width
        );
        let _ = writeln!(
            svg,
            r#"  <text x="{}" y="{}" text-anchor="middle" font-size="13">{}</text>"#,
            LABEL_COLUMN + plot_width / 2,
            axis_y + 28,
            escape_xml(self.value_label)
        );
        svg.push_str("</svg>\n");
        svg
    }
}

fn scale(value: u64, max_value: u64, plot_width: u32) -> u32 {
    if max_value == 0 {
        return 0;
    }
    let scaled = value.saturating_mul(u64::from(plot_width)) / max_value;
    u32::try_from(scaled).unwrap_or(plot_width)
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
