//! Block reader.
//!
//! Splits chart source into `<mode> => { ... }` blocks. `include` blocks are
//! expanded in place: the named files are spliced into the line buffer ahead
//! of the remaining input and reading continues from there.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ParseErrorKind, Result, StitchError};

/// Marker that opens a block.
pub const BLOCK_START: &str = " => {";

/// A line holding only this closes a multi-line block.
pub const BLOCK_END: &str = "}";

/// Block mode that splices files into the input.
pub const INCLUDE_MODE: &str = "include";

/// Default limit on nested includes.
pub const DEFAULT_INCLUDE_DEPTH: usize = 16;

/// One `<mode> => { ... }` unit of chart source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub mode: String,
    pub lines: Vec<String>,
}

impl Block {
    pub fn new(mode: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            mode: mode.into(),
            lines,
        }
    }

    /// True if the block holds exactly the single line `line`.
    pub fn is_match(&self, line: &str) -> bool {
        self.lines.len() == 1 && self.lines[0] == line
    }

    pub(crate) fn error(&self, kind: ParseErrorKind) -> StitchError {
        StitchError::parse(kind, &self.lines)
    }
}

#[derive(Debug, Clone)]
struct SourceLine {
    text: String,
    /// How many includes deep this line came from.
    depth: usize,
}

/// A block found by [`scan`], with the include depth it opened at and the
/// number of buffered lines it used.
struct Scanned {
    block: Block,
    depth: usize,
    consumed: usize,
}

/// Reads blocks from a mutable line buffer, expanding includes as it goes.
#[derive(Debug)]
pub struct BlockReader {
    buffer: VecDeque<SourceLine>,
    include_root: Option<PathBuf>,
    max_include_depth: usize,
}

impl BlockReader {
    pub fn new(source: &str) -> Self {
        Self {
            buffer: to_lines(source, 0).collect(),
            include_root: None,
            max_include_depth: DEFAULT_INCLUDE_DEPTH,
        }
    }

    /// Resolve relative include paths against `root` instead of the working directory.
    pub fn with_include_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.include_root = Some(root.into());
        self
    }

    pub fn with_max_include_depth(mut self, depth: usize) -> Self {
        self.max_include_depth = depth;
        self
    }

    /// Read the next non-include block, or `None` once only blank lines remain.
    pub fn next_block(&mut self) -> Result<Option<Block>> {
        loop {
            let Some(scanned) = scan(&self.buffer)? else {
                self.buffer.clear();
                return Ok(None);
            };
            self.buffer.drain(..scanned.consumed);

            if scanned.block.mode == INCLUDE_MODE {
                self.splice(&scanned.block, scanned.depth)?;
                continue;
            }

            debug!(mode = %scanned.block.mode, lines = scanned.block.lines.len(), "read block");
            return Ok(Some(scanned.block));
        }
    }

    /// Read every remaining block in file order.
    pub fn read_all(mut self) -> Result<Vec<Block>> {
        let mut blocks = Vec::new();
        while let Some(block) = self.next_block()? {
            blocks.push(block);
        }
        Ok(blocks)
    }

    /// Push the contents of each included file onto the front of the buffer.
    fn splice(&mut self, block: &Block, depth: usize) -> Result<()> {
        if depth >= self.max_include_depth {
            return Err(block.error(ParseErrorKind::IncludeDepthExceeded(self.max_include_depth)));
        }

        let mut inserts = Vec::new();
        for line in &block.lines {
            let path = self.include_path(line);
            let data = fs::read_to_string(&path).map_err(|source| StitchError::Include {
                path: path.clone(),
                source,
                backtrace: block.lines.clone(),
            })?;
            debug!(path = %path.display(), depth = depth + 1, "including file");
            inserts.extend(to_lines(&data, depth + 1));
        }

        for line in inserts.into_iter().rev() {
            self.buffer.push_front(line);
        }
        Ok(())
    }

    fn include_path(&self, line: &str) -> PathBuf {
        let path = Path::new(line);
        match &self.include_root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

fn to_lines(source: &str, depth: usize) -> impl Iterator<Item = SourceLine> + '_ {
    source.lines().map(move |text| SourceLine {
        text: text.to_string(),
        depth,
    })
}

/// Find the first block in `lines`.
fn scan(lines: &VecDeque<SourceLine>) -> Result<Option<Scanned>> {
    let mut open: Option<(String, usize)> = None;
    let mut content = Vec::new();

    for (idx, source) in lines.iter().enumerate() {
        let line = source.text.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fail = |kind: ParseErrorKind| -> Result<Option<Scanned>> {
            Err(StitchError::parse(kind, &backtrace(lines, idx)))
        };

        if let Some((mode, depth)) = &open {
            if line == BLOCK_END {
                if content.is_empty() {
                    return fail(ParseErrorKind::EmptyBlock);
                }
                return Ok(Some(Scanned {
                    block: Block::new(mode.clone(), content),
                    depth: *depth,
                    consumed: idx + 1,
                }));
            }
            content.push(line.to_string());
            continue;
        }

        if line.ends_with(BLOCK_START) {
            match block_mode(line) {
                Some(mode) => open = Some((mode.to_string(), source.depth)),
                None => return fail(ParseErrorKind::InvalidStartBlock),
            }
            continue;
        }

        if line.ends_with(BLOCK_END) && line.contains(BLOCK_START) {
            let inner = &line[..line.len() - BLOCK_END.len()];
            let parts: Vec<&str> = inner.split(BLOCK_START).collect();
            if parts.len() != 2 {
                return fail(ParseErrorKind::SingleLineBlockInvalid);
            }
            let body = parts[1].trim();
            if body.is_empty() {
                return fail(ParseErrorKind::EmptyBlock);
            }
            return Ok(Some(Scanned {
                block: Block::new(parts[0], vec![body.to_string()]),
                depth: source.depth,
                consumed: idx + 1,
            }));
        }

        return fail(ParseErrorKind::ExpectedStartOfBlock);
    }

    if open.is_some() {
        return Err(StitchError::parse(
            ParseErrorKind::UnclosedBlock(1),
            &backtrace(lines, lines.len().saturating_sub(1)),
        ));
    }
    Ok(None)
}

/// The mode before the open marker; `None` if the marker appears more than once.
fn block_mode(line: &str) -> Option<&str> {
    let parts: Vec<&str> = line.split(BLOCK_START).collect();
    if parts.len() != 2 {
        return None;
    }
    Some(parts[0])
}

/// Raw lines up to and including `idx`.
fn backtrace(lines: &VecDeque<SourceLine>, idx: usize) -> Vec<String> {
    lines.iter().take(idx + 1).map(|l| l.text.clone()).collect()
}
