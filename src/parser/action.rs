//! Action parser.
//!
//! Interprets blocks into committed paint actions. One action is in progress
//! at a time; an `action => { commit }` block seals it. Palette and offset
//! carry over to the next action, pattern rows and stitch mode do not.

use tracing::debug;

use crate::error::{ParseErrorKind, Result, StitchError};
use crate::types::{Action, ColorResolver, Offset, PaletteEntry, StitchMode};

use super::block::Block;

/// Separator between a palette symbol and its colour.
pub const PALETTE_ASSIGN: &str = " => ";

/// Separator between offset components.
pub const OFFSET_SEPARATOR: char = 'x';

/// The only supported action.
pub const COMMIT: &str = "commit";

/// Turns a block sequence into committed actions.
pub struct ActionParser<'a> {
    resolver: &'a dyn ColorResolver,
    current: Action,
    actions: Vec<Action>,
}

impl<'a> ActionParser<'a> {
    pub fn new(resolver: &'a dyn ColorResolver) -> Self {
        Self {
            resolver,
            current: Action::default(),
            actions: Vec::new(),
        }
    }

    /// Apply one block to the in-progress action.
    pub fn feed(&mut self, block: &Block) -> Result<()> {
        match block.mode.as_str() {
            "palette" => self.palette(block),
            "pattern" => self.pattern(block),
            "mode" => self.mode(block),
            "offset" => self.offset(block),
            "action" => self.action(block),
            _ => Err(block.error(ParseErrorKind::UnknownModeInBlock)),
        }
    }

    /// Finish parsing; fails if a pattern was never committed.
    pub fn finish(self) -> Result<Vec<Action>> {
        if self.current.has_pattern() {
            return Err(StitchError::bare(ParseErrorKind::UncommittedPattern));
        }
        Ok(self.actions)
    }

    fn palette(&mut self, block: &Block) -> Result<()> {
        self.current.palette.clear();
        for line in &block.lines {
            let parts: Vec<&str> = line.split(PALETTE_ASSIGN).collect();
            if parts.len() != 2 {
                return Err(block.error(ParseErrorKind::InvalidPaletteAssignment));
            }

            let mut chars = parts[0].chars();
            let symbol = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => return Err(block.error(ParseErrorKind::OnlySingleCharactersAllowed)),
            };
            if self.current.palette.contains_key(&symbol) {
                return Err(block.error(ParseErrorKind::CharacterReused));
            }

            let raw = parts[1].trim();
            self.current.palette.insert(
                symbol,
                PaletteEntry {
                    symbol,
                    raw: raw.to_string(),
                    resolved: self.resolver.resolve_or_literal(raw),
                },
            );
        }
        Ok(())
    }

    fn pattern(&mut self, block: &Block) -> Result<()> {
        if self.current.has_pattern() {
            return Err(block.error(ParseErrorKind::PatternNotCommitted));
        }
        self.current.rows = block.lines.clone();
        Ok(())
    }

    fn mode(&mut self, block: &Block) -> Result<()> {
        if block.lines.len() != 1 {
            return Err(block.error(ParseErrorKind::IncorrectStitchModeSetting));
        }
        let mode = StitchMode::from_token(&block.lines[0])
            .ok_or_else(|| block.error(ParseErrorKind::IncorrectStitchModeSetting))?;

        match self.current.mode {
            Some(current) if current != mode => {
                Err(block.error(ParseErrorKind::StitchingNotCommitted))
            }
            _ => {
                self.current.mode = Some(mode);
                Ok(())
            }
        }
    }

    fn offset(&mut self, block: &Block) -> Result<()> {
        if block.lines.len() != 1 {
            return Err(block.error(ParseErrorKind::InvalidOffset));
        }
        let parts: Vec<&str> = block.lines[0].split(OFFSET_SEPARATOR).collect();
        if parts.len() != 2 {
            return Err(block.error(ParseErrorKind::OffsetFormatInvalid));
        }
        let parse = |s: &str| {
            s.trim()
                .parse::<i32>()
                .map_err(|e| block.error(ParseErrorKind::from(e)))
        };
        self.current.offset = Offset::new(parse(parts[0])?, parse(parts[1])?);
        Ok(())
    }

    fn action(&mut self, block: &Block) -> Result<()> {
        if !block.is_match(COMMIT) {
            return Err(block.error(ParseErrorKind::UnknownAction));
        }
        if !self.current.has_pattern() {
            return Err(block.error(ParseErrorKind::NoPattern));
        }
        if self.current.mode.is_none() {
            return Err(block.error(ParseErrorKind::InvalidStitchMode));
        }

        debug!(
            mode = ?self.current.mode,
            rows = self.current.rows.len(),
            offset_x = self.current.offset.x,
            offset_y = self.current.offset.y,
            "committed action"
        );
        self.actions.push(self.current.clone());
        self.current.rows.clear();
        self.current.mode = None;
        Ok(())
    }
}

/// Parse a block sequence into committed actions.
pub fn parse_blocks(blocks: &[Block], resolver: &dyn ColorResolver) -> Result<Vec<Action>> {
    let mut parser = ActionParser::new(resolver);
    for block in blocks {
        parser.feed(block)?;
    }
    parser.finish()
}
