//! Rasterizes committed actions into a [`Pattern`].

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::error::{ParseErrorKind, Result, StitchError};

use super::colour::NO_COLOR;
use super::{Action, Cell, ColorUsage, Entry, Pattern, StitchMode};

/// Accumulates entries and colour usage across actions.
#[derive(Debug, Default)]
pub struct PatternBuilder {
    entries: Vec<Entry>,
    index: HashMap<(String, StitchMode), usize>,
    colors: BTreeMap<String, ColorUsage>,
    max: i64,
    strokes: u64,
}

impl PatternBuilder {
    pub fn new() -> Self {
        Self {
            max: -1,
            ..Default::default()
        }
    }

    /// Paint one committed action onto the grid.
    pub fn add(&mut self, action: &Action) -> Result<()> {
        let mode = action
            .mode
            .ok_or_else(|| StitchError::parse(ParseErrorKind::InvalidStitchMode, &action.rows))?;

        for (col, row, symbol) in action.symbols() {
            let x = col as i64 + i64::from(action.offset.x);
            let y = row as i64 + i64::from(action.offset.y);
            self.max = self.max.max(x).max(y);

            let colour = action
                .palette
                .get(&symbol)
                .ok_or_else(|| StitchError::parse(ParseErrorKind::SymbolUnknown, &action.rows))?;

            if colour.resolved == NO_COLOR {
                continue;
            }

            let cell = Cell::new((x + 1) as i32, (y + 1) as i32);
            let key = (colour.resolved.clone(), mode);
            let idx = match self.index.get(&key) {
                Some(&idx) => idx,
                None => {
                    self.entries.push(Entry::new(colour.resolved.clone(), mode));
                    self.index.insert(key, self.entries.len() - 1);
                    self.entries.len() - 1
                }
            };

            let usage = self
                .colors
                .entry(colour.resolved.clone())
                .or_insert_with(|| ColorUsage {
                    label: colour.raw.clone(),
                    count: 0,
                });
            usage.label = colour.raw.clone();
            self.strokes += 1;
            if self.entries[idx].paint(cell, self.strokes) {
                usage.count += 1;
            }
        }

        Ok(())
    }

    /// Seal the accumulated entries into a pattern.
    pub fn build(self) -> Result<Pattern> {
        let pattern = Pattern::new(self.max + 1)?;
        debug!(
            size = pattern.size(),
            entries = self.entries.len(),
            colors = self.colors.len(),
            "built pattern"
        );
        Ok(pattern.with_contents(self.entries, self.colors))
    }
}

/// Build a pattern from a list of committed actions.
pub fn build_pattern(actions: &[Action]) -> Result<Pattern> {
    let mut builder = PatternBuilder::new();
    for action in actions {
        builder.add(action)?;
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Offset, PaletteEntry};
    use std::collections::BTreeSet;

    fn action(palette: &[(char, &str)], mode: StitchMode, rows: &[&str]) -> Action {
        Action {
            palette: palette
                .iter()
                .map(|(symbol, colour)| {
                    (
                        *symbol,
                        PaletteEntry {
                            symbol: *symbol,
                            raw: colour.to_string(),
                            resolved: colour.to_string(),
                        },
                    )
                })
                .collect(),
            mode: Some(mode),
            rows: rows.iter().map(|r| r.to_string()).collect(),
            offset: Offset::default(),
        }
    }

    fn cells(entry: &Entry) -> Vec<String> {
        entry.cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_none_is_never_rendered() {
        let a = action(&[('x', "NONE")], StitchMode::CrossStitch, &["xxx", "xxx", "xxx"]);
        let pattern = build_pattern(&[a]).unwrap();
        assert_eq!(pattern.size(), 3);
        assert!(pattern.entries().is_empty());
        assert!(pattern.colors().is_empty());
    }

    #[test]
    fn test_cells_match_symbol_positions() {
        let a = action(&[('a', "#111"), ('.', "NONE")], StitchMode::CrossStitch, &["a.a", ".a."]);
        let pattern = build_pattern(&[a]).unwrap();
        let entry = pattern.entry("#111", StitchMode::CrossStitch).unwrap();
        assert_eq!(cells(entry), vec!["1x1", "3x1", "2x2"]);
        assert_eq!(pattern.usage("#111").unwrap().count, 3);
    }

    #[test]
    fn test_offset_shifts_cells() {
        let mut a = action(&[('a', "#111")], StitchMode::CrossStitch, &["a"]);
        a.offset = Offset::new(1, 2);
        let pattern = build_pattern(&[a]).unwrap();
        let entry = pattern.entry("#111", StitchMode::CrossStitch).unwrap();
        assert_eq!(cells(entry), vec!["2x3"]);
        assert_eq!(pattern.size(), 3);
    }

    #[test]
    fn test_entries_grouped_by_colour_and_mode() {
        let top = action(&[('a', "#111")], StitchMode::TopEdge, &["a"]);
        let bottom = action(&[('a', "#111")], StitchMode::BottomEdge, &["a"]);
        let mut again = action(&[('b', "#111")], StitchMode::TopEdge, &[".b"]);
        again.palette.insert(
            '.',
            PaletteEntry {
                symbol: '.',
                raw: "NONE".to_string(),
                resolved: "NONE".to_string(),
            },
        );

        let pattern = build_pattern(&[top, bottom, again]).unwrap();
        assert_eq!(pattern.entries().len(), 2);

        let top = pattern.entry("#111", StitchMode::TopEdge).unwrap();
        let expected: BTreeSet<Cell> = [Cell::new(1, 1), Cell::new(2, 1)].into_iter().collect();
        assert_eq!(top.cells, expected);
        assert!(pattern
            .entry("#111", StitchMode::BottomEdge)
            .unwrap()
            .contains(Cell::new(1, 1)));
        assert_eq!(pattern.usage("#111").unwrap().count, 3);
    }

    #[test]
    fn test_last_label_wins() {
        let mut first = action(&[('a', "red")], StitchMode::CrossStitch, &["a"]);
        first.palette.get_mut(&'a').unwrap().resolved = "rgb(1, 2, 3)".to_string();
        let mut second = action(&[('b', "crimson")], StitchMode::CrossStitch, &[".b"]);
        second.palette.get_mut(&'b').unwrap().resolved = "rgb(1, 2, 3)".to_string();
        second.palette.insert(
            '.',
            PaletteEntry {
                symbol: '.',
                raw: "NONE".to_string(),
                resolved: "NONE".to_string(),
            },
        );

        let pattern = build_pattern(&[first, second]).unwrap();
        let usage = pattern.usage("rgb(1, 2, 3)").unwrap();
        assert_eq!(usage.label, "crimson");
        assert_eq!(usage.count, 2);
    }

    #[test]
    fn test_unknown_symbol() {
        let a = action(&[('a', "#111")], StitchMode::CrossStitch, &["ab"]);
        let err = build_pattern(&[a]).unwrap_err();
        assert_eq!(err.kind(), Some(&ParseErrorKind::SymbolUnknown));
        assert_eq!(err.backtrace(), ["ab".to_string()]);
    }

    #[test]
    fn test_negative_offset_can_empty_the_grid() {
        let mut a = action(&[('a', "#111")], StitchMode::CrossStitch, &["a"]);
        a.offset = Offset::new(-2, -2);
        let err = build_pattern(&[a]).unwrap_err();
        assert_eq!(err.kind(), Some(&ParseErrorKind::InvalidSize));
    }
}
