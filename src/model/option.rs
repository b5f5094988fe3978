//! Selectable option types.
//!
//! `SelectOption` is a single (value, label) pair; `OptionSet` is the ordered
//! candidate sequence delivered by an option source. Both are immutable once
//! received.

use serde::{Deserialize, Serialize};

/// One selectable (value, label) pair.
///
/// `value` is an opaque identifier, unique within its `OptionSet`.
/// `label` is the user-facing display text and the text the filter matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectOption {
    value: String,
    label: String,
}

impl SelectOption {
    /// Create an option from its identifier and display text.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Opaque identifier.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Display text.
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Ordered sequence of options.
///
/// Order is preserved from the source and drives both the default display
/// order and keyboard wraparound.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionSet(Vec<SelectOption>);

impl OptionSet {
    /// Wrap an ordered list of options.
    pub fn new(options: Vec<SelectOption>) -> Self {
        Self(options)
    }

    /// Empty set.
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Number of options.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the set holds no options.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Option at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&SelectOption> {
        self.0.get(index)
    }

    /// Iterate options in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, SelectOption> {
        self.0.iter()
    }

    /// Borrow as a slice.
    pub fn as_slice(&self) -> &[SelectOption] {
        &self.0
    }

    /// Position of the first option carrying `value`.
    pub fn position_of_value(&self, value: &str) -> Option<usize> {
        self.0.iter().position(|option| option.value == value)
    }

    /// First option carrying `value`.
    pub fn find_by_value(&self, value: &str) -> Option<&SelectOption> {
        self.0.iter().find(|option| option.value == value)
    }
}

impl From<Vec<SelectOption>> for OptionSet {
    fn from(options: Vec<SelectOption>) -> Self {
        Self(options)
    }
}

impl FromIterator<SelectOption> for OptionSet {
    fn from_iter<I: IntoIterator<Item = SelectOption>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a OptionSet {
    type Item = &'a SelectOption;
    type IntoIter = std::slice::Iter<'a, SelectOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Payload reported when a row of the option list is activated.
///
/// `index` is the row position within the list that was displayed at the
/// time of activation (full set or filtered subset).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    /// The activated option.
    pub suggestion: SelectOption,
    /// Row index in the displayed list.
    pub index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OptionSet {
        OptionSet::new(vec![
            SelectOption::new("a", "Alpha"),
            SelectOption::new("b", "Beta"),
        ])
    }

    #[test]
    fn position_of_value_finds_option_in_source_order() {
        let options = sample();
        assert_eq!(options.position_of_value("b"), Some(1));
        assert_eq!(options.position_of_value("missing"), None);
    }

    #[test]
    fn option_set_deserializes_from_plain_json_array() {
        let json = r#"[{"value":"a","label":"Alpha"},{"value":"b","label":"Beta"}]"#;
        let options: OptionSet = serde_json::from_str(json).unwrap();
        assert_eq!(options, sample());
    }

    #[test]
    fn find_by_value_returns_label() {
        let options = sample();
        assert_eq!(options.find_by_value("a").map(|o| o.label()), Some("Alpha"));
    }
}
