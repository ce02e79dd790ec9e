//! Build command implementation.
//!
//! Reads a chart from a file or stdin, parses it and writes the rendered
//! chart to a file or stdout.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use tracing::debug;

use crate::config::ChartConfig;
use crate::error::{Result, StitchError};
use crate::output::{display_path, plural, Printer};
use crate::parser::Parser;
use crate::render::{render, Format};

/// Chart input, output and rendering flags
#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    /// Chart file to read (stdin when omitted)
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// File to write the rendered chart to (stdout when omitted)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(long, short, value_enum)]
    pub format: Option<Format>,

    /// Render option as key=value (repeatable)
    #[arg(long = "option", value_name = "KEY=VALUE")]
    pub options: Vec<String>,

    /// Config file (defaults to ./stitch.yaml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: BuildArgs) -> Result<()> {
    let cwd = std::env::current_dir().map_err(|e| StitchError::Io {
        path: PathBuf::from("."),
        message: format!("Failed to read working directory: {}", e),
    })?;
    let config = ChartConfig::discover(args.config.as_deref(), &cwd)?;

    let mut stdout = io::stdout().lock();
    let written = build(&args, &config, &mut io::stdin().lock(), &mut stdout)?;

    if let Some(path) = &args.output {
        Printer::new().status("Rendered", &format!("{} ({})", display_path(path), written));
    }
    Ok(())
}

/// Run one build against explicit streams. Returns a short summary of the
/// rendered chart.
pub fn build(
    args: &BuildArgs,
    config: &ChartConfig,
    stdin: &mut dyn Read,
    stdout: &mut dyn Write,
) -> Result<String> {
    let source = read_input(args.input.as_deref(), stdin)?;
    let format = args.format.or(config.format).unwrap_or_default();
    let options = config.render_options(&args.options)?;

    let colors = config.named_colors();
    let mut parser = Parser::new(&colors).with_max_include_depth(config.include_depth);
    if let Some(root) = args.input.as_deref().and_then(Path::parent) {
        parser = parser.with_include_root(root);
    }
    let pattern = parser.parse(&source)?;
    debug!(%format, size = pattern.size(), "parsed chart");

    let rendered = render(&pattern, format, &options)?;
    match &args.output {
        Some(path) => fs::write(path, &rendered).map_err(|e| StitchError::Io {
            path: path.clone(),
            message: format!("Failed to write output: {}", e),
        })?,
        None => stdout.write_all(&rendered).map_err(|e| StitchError::Io {
            path: PathBuf::from("<stdout>"),
            message: e.to_string(),
        })?,
    }

    Ok(format!(
        "{}x{}, {}",
        pattern.size(),
        pattern.size(),
        plural(pattern.colors().len(), "color", "colors")
    ))
}

fn read_input(path: Option<&Path>, stdin: &mut dyn Read) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|e| StitchError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read chart: {}", e),
        }),
        None => {
            let mut source = String::new();
            stdin
                .read_to_string(&mut source)
                .map_err(|e| StitchError::Io {
                    path: PathBuf::from("<stdin>"),
                    message: e.to_string(),
                })?;
            Ok(source)
        }
    }
}
