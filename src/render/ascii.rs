//! ASCII chart renderer.
//!
//! Each chart row becomes two text rows: a border row carrying top edges and
//! a content row carrying left edges and the cell glyph. Cross stitches are
//! drawn with a per-colour symbol listed in a legend under the chart.

use std::fmt::Write as _;

use tracing::trace;

use crate::error::{ParseErrorKind, Result, StitchError};
use crate::types::Pattern;

use super::grid::{Grid, Stitches};
use super::options::RenderOptions;
use super::warning::Warnings;

/// Symbols handed out to cross-stitch colours, in order of first use.
pub const SYMBOLS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Column separator drawn in border rows.
const SEPARATOR: char = '.';

/// Drawn when every symbol is in use.
const OVERFLOW_SYMBOL: char = '?';

pub const WARN_STITCH_AND_LINE: &str = "cannot have stitch+line in ASCII pattern";
pub const WARN_OUT_OF_SYMBOLS: &str = "too many colors for ASCII symbols";

/// Assigns chart symbols to resolved colours.
#[derive(Debug, Default)]
struct SymbolTable {
    assigned: Vec<(String, char)>,
}

impl SymbolTable {
    fn symbol(&mut self, color: &str, warnings: &mut Warnings) -> char {
        if let Some((_, symbol)) = self.assigned.iter().find(|(c, _)| c == color) {
            return *symbol;
        }
        let symbol = match SYMBOLS.chars().nth(self.assigned.len()) {
            Some(symbol) => symbol,
            None => {
                warnings.push(WARN_OUT_OF_SYMBOLS);
                OVERFLOW_SYMBOL
            }
        };
        self.assigned.push((color.to_string(), symbol));
        symbol
    }
}

/// Resolve the glyph drawn inside a cell.
fn glyph(
    stitches: &Stitches,
    symbols: &mut SymbolTable,
    warnings: &mut Warnings,
) -> Result<char> {
    let mut value = ' ';

    if stitches.has_diagonal() {
        if stitches.has_straight_line() || (stitches.backslash.is_some() && stitches.slash.is_some())
        {
            return Err(StitchError::bare(ParseErrorKind::IncompatibleLineCombination));
        }
        value = if stitches.backslash.is_some() { '\\' } else { '/' };
    } else {
        match (stitches.hline.is_some(), stitches.vline.is_some()) {
            (true, true) => value = '+',
            (true, false) => value = '-',
            (false, true) => value = '|',
            (false, false) => {}
        }
    }

    if let Some(color) = stitches.cross {
        if value != ' ' {
            warnings.push(WARN_STITCH_AND_LINE);
        }
        value = symbols.symbol(color, warnings);
    }

    Ok(value)
}

fn is_blank(line: &str) -> bool {
    line.chars().all(|c| c == SEPARATOR || c.is_whitespace())
}

/// Render a pattern as an ASCII chart with legend.
pub fn render_ascii(pattern: &Pattern, options: &RenderOptions) -> Result<String> {
    let separator = if options.ascii_no_delimiter {
        ' '
    } else {
        SEPARATOR
    };
    let grid = Grid::new(pattern, pattern.size() + 3)?;
    let mut symbols = SymbolTable::default();
    let mut warnings = Warnings::new();

    let mut lines = vec![String::new()];
    for y in 0..grid.extent() {
        let mut border = String::new();
        let mut content = String::new();
        for x in 0..grid.extent() {
            let edges = grid.edges(x, y);
            border.push(separator);
            border.push(if edges.top { '-' } else { ' ' });
            content.push(if edges.left { '|' } else { ' ' });
            content.push(glyph(&grid.at(x, y), &mut symbols, &mut warnings)?);
        }
        lines.push(border);
        lines.push(content);
    }

    // Drop trailing blank rows, keeping a single blank row under the chart.
    let mut out = String::new();
    if let Some(last) = lines.iter().rposition(|line| !is_blank(line)) {
        let trailer = lines.get(last + 1).map(String::as_str).unwrap_or("");
        for line in lines[..=last].iter().map(String::as_str).chain([trailer]) {
            out.push_str(line);
            out.push('\n');
        }
    }

    out.push('\n');
    out.push_str("---\n");

    let mut legend: Vec<String> = symbols
        .assigned
        .iter()
        .map(|(color, symbol)| {
            let (label, count) = pattern
                .usage(color)
                .map(|u| (u.label.as_str(), u.count))
                .unwrap_or((color.as_str(), 0));
            format!("color: {} => {} (count: {})", symbol, label, count)
        })
        .collect();
    legend.sort();
    for line in legend {
        out.push_str(&line);
        out.push('\n');
    }

    for (message, count) in warnings.summary() {
        let _ = writeln!(out, "WARN: {} [{}]", message, count);
    }

    trace!(
        colors = symbols.assigned.len(),
        warnings = warnings.len(),
        "rendered ascii chart"
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::types::NamedColors;
    use pretty_assertions::assert_eq;

    fn render(source: &str) -> Result<String> {
        let pattern = parse(source, &NamedColors::builtin()).unwrap();
        render_ascii(&pattern, &RenderOptions::default())
    }

    /// The text after the chart body.
    fn trailer(output: &str) -> &str {
        let start = output.find("---\n").unwrap();
        output[start..].trim_end()
    }

    #[test]
    fn test_single_stitch_chart() {
        let output =
            render("palette => {a => red}\nmode => {xstitch}\npattern => {a}\naction => {commit}")
                .unwrap();

        let expected = [
            "",
            ". . . . ",
            "        ",
            ". . . . ",
            "   a    ",
            ". . . . ",
            "",
            "---",
            "color: a => red (count: 1)",
            "",
        ]
        .join("\n");
        assert_eq!(output, expected);
    }

    #[test]
    fn test_no_delimiter_option() {
        let pattern = parse(
            "palette => {a => red}\nmode => {xstitch}\npattern => {a}\naction => {commit}",
            &NamedColors::builtin(),
        )
        .unwrap();
        let options = RenderOptions {
            ascii_no_delimiter: true,
        };
        let output = render_ascii(&pattern, &options).unwrap();
        assert!(!output.contains('.'));
        assert!(output.contains("   a    \n"));
    }

    #[test]
    fn test_edges_and_lines() {
        let output = render(
            r#"
palette => {
    a => black
    . => NONE
}
mode => { topedge }
pattern => { a }
action => { commit }
mode => { leftedge }
pattern => { a }
action => { commit }
mode => { hline }
pattern => { .a }
action => { commit }
mode => { vline }
pattern => { .a }
action => { commit }
mode => { tlbrline }
pattern => { ..a }
action => { commit }
"#,
        )
        .unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[3], ". .-. . . . ");
        assert_eq!(lines[4], "  |  + \\    ");
    }

    #[test]
    fn test_bottom_edge_drawn_on_row_below() {
        let output =
            render("palette => {a => red}\nmode => {bottomedge}\npattern => {a}\naction => {commit}")
                .unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[3], ". . . . ");
        assert_eq!(lines[5], ". .-. . ");
    }

    #[test]
    fn test_symbols_assigned_in_order() {
        let output = render(
            "palette => {\na => red\nb => #231234\nc => red\n}\nmode => {xstitch}\npattern => {\nab\nc\n}\naction => {commit}",
        )
        .unwrap();

        insta::assert_snapshot!(trailer(&output), @r"
        ---
        color: a => red (count: 2)
        color: b => #231234 (count: 1)
        ");
    }

    #[test]
    fn test_stitch_and_line_warns() {
        let output = render(
            "palette => {a => red}\nmode => {xstitch}\npattern => {a}\naction => {commit}\nmode => {hline}\npattern => {a}\naction => {commit}",
        )
        .unwrap();

        assert!(output.contains("   a    \n"));
        insta::assert_snapshot!(trailer(&output), @r"
        ---
        color: a => red (count: 2)
        WARN: cannot have stitch+line in ASCII pattern [1]
        ");
    }

    #[test]
    fn test_incompatible_lines() {
        let diagonal_and_straight = render(
            "palette => {a => red}\nmode => {vline}\npattern => {a}\naction => {commit}\nmode => {trblline}\npattern => {a}\naction => {commit}",
        );
        assert_eq!(
            diagonal_and_straight.unwrap_err().kind(),
            Some(&ParseErrorKind::IncompatibleLineCombination)
        );

        let both_diagonals = render(
            "palette => {a => red}\nmode => {tlbrline}\npattern => {a}\naction => {commit}\nmode => {trblline}\npattern => {a}\naction => {commit}",
        );
        assert_eq!(
            both_diagonals.unwrap_err().kind(),
            Some(&ParseErrorKind::IncompatibleLineCombination)
        );

        let hline_and_diagonal = render(
            "palette => {a => red}\nmode => {hline}\npattern => {a}\naction => {commit}\nmode => {tlbrline}\npattern => {a}\naction => {commit}",
        );
        assert_eq!(
            hline_and_diagonal.unwrap_err().kind(),
            Some(&ParseErrorKind::IncompatibleLineCombination)
        );
    }

    #[test]
    fn test_line_glyphs() {
        let mut symbols = SymbolTable::default();
        let mut warnings = Warnings::new();
        let mut glyph_of = |stitches: Stitches| glyph(&stitches, &mut symbols, &mut warnings).unwrap();

        let hline = Stitches {
            hline: Some("#111"),
            ..Default::default()
        };
        let vline = Stitches {
            vline: Some("#111"),
            ..Default::default()
        };
        let slash = Stitches {
            slash: Some("#111"),
            ..Default::default()
        };
        let backslash = Stitches {
            backslash: Some("#111"),
            ..Default::default()
        };
        let both = Stitches {
            hline: Some("#111"),
            vline: Some("#222"),
            ..Default::default()
        };

        assert_eq!(glyph_of(hline), '-');
        assert_eq!(glyph_of(vline), '|');
        assert_eq!(glyph_of(slash), '/');
        assert_eq!(glyph_of(backslash), '\\');
        assert_eq!(glyph_of(both), '+');
        assert_eq!(glyph_of(Stitches::default()), ' ');
    }

    #[test]
    fn test_single_line_glyphs_in_chart() {
        let output = render(
            r"
palette => {
    a => black
    . => NONE
}
mode => { hline }
pattern => { a }
action => { commit }
mode => { vline }
pattern => { .a }
action => { commit }
mode => { trblline }
pattern => { ..a }
action => { commit }
",
        )
        .unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[4], "   - | /    ");
    }

    #[test]
    fn test_later_stroke_paints_over_earlier() {
        let pattern = parse(
            "palette => {\nr => #f00\nb => #00f\n. => NONE\n}\nmode => {xstitch}\npattern => {....r}\naction => {commit}\npattern => {b}\nmode => {xstitch}\naction => {commit}\npattern => {r}\nmode => {xstitch}\naction => {commit}",
            &NamedColors::new(),
        )
        .unwrap();
        let output = render_ascii(&pattern, &RenderOptions::default()).unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[4], "   a       a    ");
        insta::assert_snapshot!(trailer(&output), @r"
        ---
        color: a => #f00 (count: 2)
        ");
    }

    #[test]
    fn test_symbol_overflow() {
        let mut symbols = SymbolTable::default();
        let mut warnings = Warnings::new();
        for i in 0..SYMBOLS.len() {
            symbols.symbol(&format!("#{i:06}"), &mut warnings);
        }
        assert!(warnings.is_empty());
        assert_eq!(symbols.symbol("#000000", &mut warnings), 'a');
        assert_eq!(symbols.symbol("#ffffff", &mut warnings), OVERFLOW_SYMBOL);
        assert_eq!(warnings.summary(), vec![(WARN_OUT_OF_SYMBOLS, 1)]);
    }

    #[test]
    fn test_render_is_deterministic() {
        let source = "palette => {\na => red\nb => blue\n}\nmode => {xstitch}\npattern => {\nabab\nbaba\n}\naction => {commit}";
        assert_eq!(render(source).unwrap(), render(source).unwrap());
    }
}
