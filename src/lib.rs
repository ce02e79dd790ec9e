//! stitch - Cross-stitch chart compiler
//!
//! A library for compiling a small block-structured chart language into a
//! cross-stitch pattern and rendering it as an ASCII chart or an HTML page.

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod parser;
pub mod render;
pub mod types;

pub use config::ChartConfig;
pub use error::{ParseErrorKind, Result, StitchError};
pub use parser::{parse, Parser};
pub use render::{build, render, Format, RenderOptions};
pub use types::{
    Action, Cell, ColorResolver, ColorUsage, Entry, NamedColors, Offset, Pattern, PatternBuilder,
    StitchMode,
};
