//! Render options given as `key=value` pairs.

use crate::error::{Result, StitchError};

/// Option key that removes the dotted column separator from ASCII output.
pub const ASCII_NO_DELIMITER: &str = "ascii-no-delimiter";

/// Options recognised by the renderers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub ascii_no_delimiter: bool,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a single `key=value` setting.
    pub fn set(&mut self, value: &str) -> Result<()> {
        let parts: Vec<&str> = value.split('=').collect();
        if parts.len() != 2 {
            return Err(StitchError::options("invalid key=value pair"));
        }
        match parts[0] {
            ASCII_NO_DELIMITER => {
                self.ascii_no_delimiter = parse_bool(parts[1])?;
            }
            _ => return Err(StitchError::options("unknown option")),
        }
        Ok(())
    }

    /// Apply settings in order; later values override earlier ones.
    pub fn apply<I, S>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for value in values {
            self.set(value.as_ref())?;
        }
        Ok(())
    }
}

fn parse_bool(s: &str) -> Result<bool> {
    match s {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(StitchError::options("invalid boolean value")),
    }
}
