//! Colour name resolution.
//!
//! Palette entries name a colour either by a floss/keyword name or by a
//! literal value (`#231234`, `rgb(...)`). Resolution is injected into the
//! parser through [`ColorResolver`] so tests can run against a fixture table.

use std::collections::HashMap;

/// Reserved colour value: cells mapped to it are parsed but never rendered.
pub const NO_COLOR: &str = "NONE";

/// Looks up a colour name, returning the resolved colour value.
pub trait ColorResolver {
    fn resolve(&self, name: &str) -> Option<String>;

    /// Resolve a name, falling back to the raw string as a colour literal.
    fn resolve_or_literal(&self, name: &str) -> String {
        if name == NO_COLOR {
            return name.to_string();
        }
        self.resolve(name).unwrap_or_else(|| name.to_string())
    }
}

/// Built-in floss colour names (name, value).
const FLOSS_COLORS: &[(&str, &str)] = &[
    ("black", "rgb(0, 0, 0)"),
    ("white", "rgb(252, 251, 248)"),
    ("ecru", "rgb(240, 234, 218)"),
    ("red", "rgb(199, 43, 59)"),
    ("darkred", "rgb(167, 19, 43)"),
    ("pink", "rgb(255, 203, 213)"),
    ("orange", "rgb(253, 93, 53)"),
    ("yellow", "rgb(255, 227, 0)"),
    ("gold", "rgb(228, 180, 104)"),
    ("green", "rgb(5, 101, 23)"),
    ("lightgreen", "rgb(136, 186, 145)"),
    ("blue", "rgb(30, 108, 173)"),
    ("lightblue", "rgb(176, 201, 222)"),
    ("navy", "rgb(17, 65, 109)"),
    ("purple", "rgb(99, 54, 102)"),
    ("lavender", "rgb(227, 203, 227)"),
    ("brown", "rgb(152, 94, 51)"),
    ("tan", "rgb(203, 144, 81)"),
    ("grey", "rgb(153, 153, 153)"),
    ("gray", "rgb(153, 153, 153)"),
];

/// A colour table keyed by name.
///
/// Explicit entries win; unknown names fall back to the CSS colour keywords
/// known to the `palette` crate, rendered as `rgb(r, g, b)`.
#[derive(Debug, Clone, Default)]
pub struct NamedColors {
    colors: HashMap<String, String>,
    keywords: bool,
}

impl NamedColors {
    /// An empty table with no keyword fallback.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in floss table with CSS keyword fallback.
    pub fn builtin() -> Self {
        let mut table = Self::new().with_keywords();
        for (name, value) in FLOSS_COLORS {
            table.insert(*name, *value);
        }
        table
    }

    /// Enable the CSS keyword fallback.
    pub fn with_keywords(mut self) -> Self {
        self.keywords = true;
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.colors.insert(name.into(), value.into());
    }

    /// Layer another set of named colours over this one.
    pub fn extend<I, K, V>(&mut self, colors: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in colors {
            self.insert(name, value);
        }
    }
}

impl ColorResolver for NamedColors {
    fn resolve(&self, name: &str) -> Option<String> {
        if let Some(value) = self.colors.get(name) {
            return Some(value.clone());
        }
        if !self.keywords {
            return None;
        }
        palette::named::from_str(&name.to_ascii_lowercase())
            .map(|c| format!("rgb({}, {}, {})", c.red, c.green, c.blue))
    }
}

impl<K, V> FromIterator<(K, V)> for NamedColors
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}
