//! Non-fatal render warnings.

use std::collections::BTreeMap;

/// Collects warnings raised while rendering.
///
/// Warnings never abort a render; they are reported in the output, each
/// distinct message once with the number of times it occurred.
#[derive(Debug, Clone, Default)]
pub struct Warnings {
    messages: Vec<String>,
}

impl Warnings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(%message, "render warning");
        self.messages.push(message);
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Distinct messages with occurrence counts, sorted by message.
    pub fn summary(&self) -> Vec<(&str, usize)> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for message in &self.messages {
            *counts.entry(message.as_str()).or_default() += 1;
        }
        counts.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let warnings = Warnings::new();
        assert!(warnings.is_empty());
        assert!(warnings.summary().is_empty());
    }

    #[test]
    fn test_summary_counts_and_sorts() {
        let mut warnings = Warnings::new();
        warnings.push("zebra");
        warnings.push("apple");
        warnings.push("zebra");

        assert_eq!(warnings.len(), 3);
        assert_eq!(warnings.summary(), vec![("apple", 1), ("zebra", 2)]);
    }
}
