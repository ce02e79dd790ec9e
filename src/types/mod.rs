//! Core domain types for stitch.
//!
//! This module contains the fundamental types used throughout the pipeline:
//! - `StitchMode` - the nine visual stitch treatments
//! - `Action` - a committed paint operation from the parser
//! - `Pattern` - the resolved grid model consumed by the renderers
//! - `NamedColors` - colour name resolution

mod action;
mod builder;
mod colour;
mod pattern;
mod stitch;

pub use action::{Action, Offset, PaletteEntry};
pub use builder::{build_pattern, PatternBuilder};
pub use colour::{ColorResolver, NamedColors, NO_COLOR};
pub use pattern::{Cell, ColorUsage, Entry, Pattern};
pub use stitch::StitchMode;
