//! The resolved chart model shared by both projectors.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::{ParseErrorKind, Result, StitchError};

use super::StitchMode;

/// A 1-based grid coordinate. Row and column 0 hold axis labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub y: i32,
    pub x: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.x, self.y)
    }
}

/// All cells sharing one resolved colour and stitch mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub color: String,
    pub mode: StitchMode,
    pub cells: BTreeSet<Cell>,
    /// Paint sequence number of the latest stroke on each cell.
    painted: BTreeMap<Cell, u64>,
}

impl Entry {
    pub fn new(color: impl Into<String>, mode: StitchMode) -> Self {
        Self {
            color: color.into(),
            mode,
            cells: BTreeSet::new(),
            painted: BTreeMap::new(),
        }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Record a stroke on `cell`. Returns true if the cell is new to this entry.
    pub(crate) fn paint(&mut self, cell: Cell, seq: u64) -> bool {
        self.painted.insert(cell, seq);
        self.cells.insert(cell)
    }

    /// Cells with the sequence number of their latest stroke.
    pub fn strokes(&self) -> impl Iterator<Item = (Cell, u64)> + '_ {
        self.painted.iter().map(|(cell, seq)| (*cell, *seq))
    }
}

/// Legend data for one resolved colour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorUsage {
    /// Representative source spelling (last writer wins).
    pub label: String,
    pub count: usize,
}

/// A resolved chart: grid size, stitch entries and colour usage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    size: usize,
    entries: Vec<Entry>,
    colors: BTreeMap<String, ColorUsage>,
}

impl Pattern {
    /// Create an empty pattern. Fails if `size` is below 1.
    pub fn new(size: i64) -> Result<Self> {
        if size < 1 {
            return Err(StitchError::bare(ParseErrorKind::InvalidSize));
        }
        Ok(Self {
            size: size as usize,
            entries: Vec::new(),
            colors: BTreeMap::new(),
        })
    }

    pub(crate) fn with_contents(
        mut self,
        entries: Vec<Entry>,
        colors: BTreeMap<String, ColorUsage>,
    ) -> Self {
        self.entries = entries;
        self.colors = colors;
        self
    }

    /// Largest coordinate on either axis.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Colour usage keyed by resolved colour.
    pub fn colors(&self) -> &BTreeMap<String, ColorUsage> {
        &self.colors
    }

    pub fn usage(&self, color: &str) -> Option<&ColorUsage> {
        self.colors.get(color)
    }

    /// The entry for a colour/mode pair, if any cell uses it.
    pub fn entry(&self, color: &str, mode: StitchMode) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|e| e.mode == mode && e.color == color)
    }
}
