//! Parser for the chart definition language.
//!
//! Chart source is a sequence of blocks:
//!
//! ```text
//! palette => {
//!     a => red
//!     . => NONE
//! }
//! mode => { xstitch }
//! offset => { 1x2 }
//! pattern => {
//!     a.a
//!     .a.
//! }
//! action => { commit }
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use stitch::parser::Parser;
//! use stitch::types::NamedColors;
//!
//! let colors = NamedColors::builtin();
//! let pattern = Parser::new(&colors).parse(&source)?;
//! ```

pub mod action;
pub mod block;

pub use action::{parse_blocks, ActionParser};
pub use block::{Block, BlockReader, DEFAULT_INCLUDE_DEPTH};

use std::path::PathBuf;

use crate::error::{ParseErrorKind, Result, StitchError};
use crate::types::{build_pattern, Action, ColorResolver, Pattern};

/// Chart parser configured with a colour resolver and include settings.
pub struct Parser<'a> {
    resolver: &'a dyn ColorResolver,
    include_root: Option<PathBuf>,
    max_include_depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(resolver: &'a dyn ColorResolver) -> Self {
        Self {
            resolver,
            include_root: None,
            max_include_depth: DEFAULT_INCLUDE_DEPTH,
        }
    }

    /// Resolve relative include paths against `root`.
    pub fn with_include_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.include_root = Some(root.into());
        self
    }

    pub fn with_max_include_depth(mut self, depth: usize) -> Self {
        self.max_include_depth = depth;
        self
    }

    /// Parse source into the committed action list.
    pub fn parse_actions(&self, source: &str) -> Result<Vec<Action>> {
        let mut reader = BlockReader::new(source).with_max_include_depth(self.max_include_depth);
        if let Some(root) = &self.include_root {
            reader = reader.with_include_root(root);
        }

        let blocks = reader.read_all()?;
        if blocks.is_empty() {
            return Err(StitchError::bare(ParseErrorKind::NoBlocksFound));
        }

        let actions = parse_blocks(&blocks, self.resolver)?;
        if actions.is_empty() {
            return Err(StitchError::bare(ParseErrorKind::NoActionsCommitted));
        }
        Ok(actions)
    }

    /// Parse source all the way to a pattern.
    pub fn parse(&self, source: &str) -> Result<Pattern> {
        let actions = self.parse_actions(source)?;
        build_pattern(&actions)
    }
}

/// Parse source with default include settings.
pub fn parse(source: &str, resolver: &dyn ColorResolver) -> Result<Pattern> {
    Parser::new(resolver).parse(source)
}
