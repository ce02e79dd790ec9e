//! Rendering module for stitch.
//!
//! This module projects a parsed [`Pattern`] into an output format: an ASCII
//! chart with a colour legend, or an HTML page.

mod ascii;
mod grid;
mod html;
mod options;
mod warning;

pub use ascii::{render_ascii, SYMBOLS, WARN_OUT_OF_SYMBOLS, WARN_STITCH_AND_LINE};
pub use grid::{Edges, Grid, Stitches, MAX_GRID_CELLS};
pub use html::{render_html, HtmlCell, HtmlChart};
pub use options::{RenderOptions, ASCII_NO_DELIMITER};
pub use warning::Warnings;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StitchError};
use crate::types::Pattern;

/// Output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Ascii,
    Html,
}

impl FromStr for Format {
    type Err = StitchError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ascii" => Ok(Format::Ascii),
            "html" => Ok(Format::Html),
            _ => Err(StitchError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Ascii => write!(f, "ascii"),
            Format::Html => write!(f, "html"),
        }
    }
}

/// Render a pattern in the given format.
pub fn render(pattern: &Pattern, format: Format, options: &RenderOptions) -> Result<Vec<u8>> {
    let output = match format {
        Format::Ascii => render_ascii(pattern, options)?,
        Format::Html => render_html(pattern)?,
    };
    Ok(output.into_bytes())
}

/// Render a pattern in a format given by name (`ascii` or `html`).
pub fn build(pattern: &Pattern, format: &str, options: &RenderOptions) -> Result<Vec<u8>> {
    render(pattern, format.parse()?, options)
}
