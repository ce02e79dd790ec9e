//! Paint actions produced by the parser.

use std::collections::BTreeMap;

use super::StitchMode;

/// One palette assignment: `symbol => raw`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    pub symbol: char,
    /// The colour as written in the source.
    pub raw: String,
    /// Named-lookup result, or the raw string when no name matched.
    pub resolved: String,
}

/// Grid placement offset applied to a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A paint operation: palette, stitch mode, offset and character grid.
///
/// Actions are built up across blocks and sealed by a `commit`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Action {
    pub palette: BTreeMap<char, PaletteEntry>,
    pub mode: Option<StitchMode>,
    pub rows: Vec<String>,
    pub offset: Offset,
}

impl Action {
    pub fn has_pattern(&self) -> bool {
        !self.rows.is_empty()
    }

    /// Iterate over `(column, row, symbol)` for every character in the pattern.
    pub fn symbols(&self) -> impl Iterator<Item = (usize, usize, char)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(y, row)| row.chars().enumerate().map(move |(x, c)| (x, y, c)))
    }
}
