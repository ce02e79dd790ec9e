//! HTML chart renderer.
//!
//! Projects the pattern into a square cell list (row and column 0 hold axis
//! labels) and hands it to the embedded `chart.html` template.

use minijinja::Environment;
use serde::Serialize;
use tracing::trace;

use crate::error::{ParseErrorKind, Result, StitchError};
use crate::types::Pattern;

use super::grid::{Grid, Stitches};

const TEMPLATE_NAME: &str = "chart.html";
const TEMPLATE: &str = include_str!("../../templates/chart.html");

const FONT_SIZE: &str = "font-size: 6pt";
const VLINE_SYMBOL: &str = "|";
const HLINE_SYMBOL: &str = "---";
const HLINE_PARTIAL: &str = "-";

/// One rendered grid cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HtmlCell {
    /// `<col>x<row>`, zero padded.
    pub id: String,
    /// Inner HTML: an axis label or a coloured line glyph.
    pub value: String,
    /// Inline CSS.
    pub style: String,
}

/// Template context for an HTML chart.
#[derive(Debug, Clone, Serialize)]
pub struct HtmlChart {
    /// Cells per row, including the label column.
    pub size: usize,
    /// Row-major cells.
    pub cells: Vec<HtmlCell>,
    pub legend: Vec<String>,
}

impl HtmlChart {
    pub fn from_pattern(pattern: &Pattern) -> Result<Self> {
        let size = pattern.size() + 1;
        let width = pattern.size().to_string().len() + 2;
        let grid = Grid::new(pattern, size)?;

        let mut cells = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                let label = match (row, col) {
                    (0, 0) => String::new(),
                    (0, _) => col.to_string(),
                    (_, 0) => row.to_string(),
                    _ => String::new(),
                };
                let (style, glyph) = layout(&grid.at(col, row))?;
                cells.push(HtmlCell {
                    id: format!("{:0width$}x{:0width$}", col, row, width = width),
                    value: glyph.unwrap_or(label),
                    style,
                });
            }
        }

        let mut legend: Vec<String> = pattern
            .colors()
            .values()
            .map(|usage| format!("color: {} (count {})", usage.label, usage.count))
            .collect();
        legend.sort();

        Ok(Self {
            size,
            cells,
            legend,
        })
    }
}

fn color_line(symbol: &str, color: &str) -> String {
    format!("<div style=\"color: {}\">{}</div>", color, symbol)
}

/// Inline style and optional line glyph for one cell.
fn layout(stitches: &Stitches) -> Result<(String, Option<String>)> {
    let mut style = Vec::new();

    if stitches.has_straight_line() || stitches.has_diagonal() {
        style.push(FONT_SIZE.to_string());
    }
    let edges = [
        ("top", stitches.top),
        ("bottom", stitches.bottom),
        ("left", stitches.left),
        ("right", stitches.right),
    ];
    for (side, color) in edges {
        if let Some(color) = color {
            style.push(format!(
                "border-{side}-style: solid; border-{side}-color: {color}"
            ));
        }
    }
    if let Some(color) = stitches.cross {
        style.push(format!("background-color: {}", color));
    }

    let glyph = match (stitches.hline, stitches.vline) {
        (Some(h), Some(v)) => {
            let partial = color_line(HLINE_PARTIAL, h);
            Some(format!("{}{}{}", partial, color_line(VLINE_SYMBOL, v), partial))
        }
        (Some(h), None) => Some(color_line(HLINE_SYMBOL, h)),
        (None, Some(v)) => Some(color_line(VLINE_SYMBOL, v)),
        (None, None) => None,
    };

    let glyph = match (stitches.backslash, stitches.slash) {
        (None, None) => glyph,
        _ if glyph.is_some() => {
            return Err(StitchError::bare(ParseErrorKind::IncompatibleLineCombination));
        }
        (Some(_), Some(_)) => {
            return Err(StitchError::bare(ParseErrorKind::CrossStitchLineConflict));
        }
        (Some(color), None) => Some(color_line("\\", color)),
        (None, Some(color)) => Some(color_line("/", color)),
    };

    Ok((style.join("; "), glyph))
}

/// Render a pattern as an HTML page.
pub fn render_html(pattern: &Pattern) -> Result<String> {
    let chart = HtmlChart::from_pattern(pattern)?;

    let mut env = Environment::new();
    env.add_template(TEMPLATE_NAME, TEMPLATE)?;
    let output = env.get_template(TEMPLATE_NAME)?.render(&chart)?;

    trace!(cells = chart.cells.len(), "rendered html chart");
    Ok(output)
}
