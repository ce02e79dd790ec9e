//! Coordinate index over a pattern.
//!
//! Both renderers look up what is stitched at each grid position. The grid
//! is built once per render from the pattern's entries into a flat arena
//! addressed by `(x, y)`.

use crate::error::{ParseErrorKind, Result, StitchError};
use crate::types::{Pattern, StitchMode};

/// Largest number of grid positions a render will allocate.
pub const MAX_GRID_CELLS: usize = 1 << 22;

/// Colours stitched at one grid position, one slot per stitch mode.
///
/// When several strokes share a mode at the same position the most recently
/// painted one wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stitches<'a> {
    pub cross: Option<&'a str>,
    pub top: Option<&'a str>,
    pub bottom: Option<&'a str>,
    pub left: Option<&'a str>,
    pub right: Option<&'a str>,
    pub hline: Option<&'a str>,
    pub vline: Option<&'a str>,
    pub backslash: Option<&'a str>,
    pub slash: Option<&'a str>,
}

impl<'a> Stitches<'a> {
    fn set(&mut self, mode: StitchMode, color: &'a str) {
        let slot = match mode {
            StitchMode::CrossStitch => &mut self.cross,
            StitchMode::TopEdge => &mut self.top,
            StitchMode::BottomEdge => &mut self.bottom,
            StitchMode::LeftEdge => &mut self.left,
            StitchMode::RightEdge => &mut self.right,
            StitchMode::HorizontalLine => &mut self.hline,
            StitchMode::VerticalLine => &mut self.vline,
            StitchMode::DiagonalBackslash => &mut self.backslash,
            StitchMode::DiagonalSlash => &mut self.slash,
        };
        *slot = Some(color);
    }

    /// A horizontal or vertical line is present.
    pub fn has_straight_line(&self) -> bool {
        self.hline.is_some() || self.vline.is_some()
    }

    /// A diagonal line is present.
    pub fn has_diagonal(&self) -> bool {
        self.backslash.is_some() || self.slash.is_some()
    }
}

/// Edges visible on a cell after merging with its neighbours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Edges {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

/// A square arena of [`Stitches`] covering `0..extent` on both axes.
#[derive(Debug)]
pub struct Grid<'a> {
    extent: usize,
    cells: Vec<Stitches<'a>>,
}

impl<'a> Grid<'a> {
    /// Index every entry cell that falls inside `0..extent`, applying
    /// strokes in paint order. Fails if the grid would exceed [`MAX_GRID_CELLS`].
    pub fn new(pattern: &'a Pattern, extent: usize) -> Result<Self> {
        let len = extent
            .checked_mul(extent)
            .filter(|&len| len <= MAX_GRID_CELLS)
            .ok_or_else(|| StitchError::bare(ParseErrorKind::ChartTooLarge(pattern.size())))?;

        let mut strokes: Vec<_> = pattern
            .entries()
            .iter()
            .flat_map(|entry| entry.strokes().map(move |(cell, seq)| (seq, cell, entry)))
            .collect();
        strokes.sort_by_key(|(seq, _, _)| *seq);

        let mut cells = vec![Stitches::default(); len];
        for (_, cell, entry) in strokes {
            if cell.x < 0 || cell.y < 0 {
                continue;
            }
            let (x, y) = (cell.x as usize, cell.y as usize);
            if x < extent && y < extent {
                cells[y * extent + x].set(entry.mode, &entry.color);
            }
        }
        Ok(Self { extent, cells })
    }

    pub fn extent(&self) -> usize {
        self.extent
    }

    /// Stitches at `(x, y)`; empty outside the grid.
    pub fn at(&self, x: usize, y: usize) -> Stitches<'a> {
        if x < self.extent && y < self.extent {
            self.cells[y * self.extent + x]
        } else {
            Stitches::default()
        }
    }

    /// Edges at `(x, y)`, including edges declared by the neighbour on the
    /// other side. Rows grow downward: the cell above has the lower `y`.
    pub fn edges(&self, x: usize, y: usize) -> Edges {
        let here = self.at(x, y);
        let above = y.checked_sub(1).map(|y| self.at(x, y)).unwrap_or_default();
        let below = self.at(x, y + 1);
        let before = x.checked_sub(1).map(|x| self.at(x, y)).unwrap_or_default();
        let after = self.at(x + 1, y);

        Edges {
            top: here.top.is_some() || above.bottom.is_some(),
            bottom: here.bottom.is_some() || below.top.is_some(),
            left: here.left.is_some() || before.right.is_some(),
            right: here.right.is_some() || after.left.is_some(),
        }
    }
}
