//! Stitch modes.

/// Visual treatment applied to a cell or one of its edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StitchMode {
    CrossStitch,
    TopEdge,
    BottomEdge,
    LeftEdge,
    RightEdge,
    HorizontalLine,
    VerticalLine,
    /// Top-left to bottom-right diagonal.
    DiagonalBackslash,
    /// Top-right to bottom-left diagonal.
    DiagonalSlash,
}

impl StitchMode {
    pub const ALL: [StitchMode; 9] = [
        StitchMode::CrossStitch,
        StitchMode::TopEdge,
        StitchMode::BottomEdge,
        StitchMode::LeftEdge,
        StitchMode::RightEdge,
        StitchMode::HorizontalLine,
        StitchMode::VerticalLine,
        StitchMode::DiagonalBackslash,
        StitchMode::DiagonalSlash,
    ];

    /// The token used for this mode in chart source.
    pub fn token(self) -> &'static str {
        match self {
            StitchMode::CrossStitch => "xstitch",
            StitchMode::TopEdge => "topedge",
            StitchMode::BottomEdge => "bottomedge",
            StitchMode::LeftEdge => "leftedge",
            StitchMode::RightEdge => "rightedge",
            StitchMode::HorizontalLine => "hline",
            StitchMode::VerticalLine => "vline",
            StitchMode::DiagonalBackslash => "tlbrline",
            StitchMode::DiagonalSlash => "trblline",
        }
    }

    /// Parse a source token.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.token() == token)
    }
}
