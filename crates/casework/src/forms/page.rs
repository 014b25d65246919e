use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Field name to message, as rendered against the offending input.
pub type FieldErrors = BTreeMap<String, String>;

/// One human-readable line on a summary card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseRow {
    pub label: String,
    pub value: String,
}

impl ResponseRow {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A selectable option with its current checked state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionItem {
    pub value: String,
    pub label: String,
    pub checked: bool,
}

/// Behavior contract every registered page satisfies once hydrated
/// against a case record and a body.
///
/// Defaults cover the common shape (terminal navigation, nothing to
/// validate, nothing to display); concrete pages override per method.
pub trait FormPage: Send {
    fn title(&self) -> String;

    /// Empty iff every invariant for this page holds.
    fn errors(&self) -> FieldErrors {
        FieldErrors::new()
    }

    /// Name of the following page, or `""` when this page ends the task.
    fn next(&self) -> &'static str {
        ""
    }

    /// Name of the preceding page, or `""` when this page starts the task.
    fn previous(&self) -> &'static str {
        ""
    }

    /// Display rows for the summary card. Compound fields collapse into
    /// one formatted row; internal-only components never appear.
    fn response(&self) -> Vec<ResponseRow> {
        Vec::new()
    }

    /// Options for choice-based pages; `None` elsewhere.
    fn items(&self) -> Option<Vec<SelectionItem>> {
        None
    }

    /// The normalized body persisted into the answer store.
    fn answer(&self) -> Value;
}

/// Items for a single-select question: exactly one entry is checked when
/// the field is populated with a known value, none otherwise.
pub(crate) fn radio_items(
    options: &'static [(&'static str, &'static str)],
    selected: Option<&str>,
) -> Vec<SelectionItem> {
    options
        .iter()
        .map(|(value, label)| SelectionItem {
            value: (*value).to_string(),
            label: (*label).to_string(),
            checked: selected == Some(*value),
        })
        .collect()
}

/// Display label for a selected option, falling back to the stored raw
/// value when it is not a registered option.
pub(crate) fn option_label(
    options: &'static [(&'static str, &'static str)],
    selected: &str,
) -> String {
    options
        .iter()
        .find(|(value, _)| *value == selected)
        .map(|(_, label)| (*label).to_string())
        .unwrap_or_else(|| selected.to_string())
}

/// Display form for the yes/no radio values used across date pages.
pub(crate) fn yes_no_label(value: &str) -> String {
    match value {
        "yes" => "Yes".to_string(),
        "no" => "No".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPTIONS: &[(&str, &str)] = &[("one", "Option one"), ("two", "Option two")];

    #[test]
    fn radio_items_check_exactly_the_selected_value() {
        let items = radio_items(OPTIONS, Some("two"));
        let checked: Vec<_> = items.iter().filter(|item| item.checked).collect();
        assert_eq!(checked.len(), 1);
        assert_eq!(checked[0].value, "two");
    }

    #[test]
    fn radio_items_check_nothing_when_unpopulated() {
        let items = radio_items(OPTIONS, None);
        assert!(items.iter().all(|item| !item.checked));
    }

    #[test]
    fn unknown_selection_falls_back_to_raw_value() {
        assert_eq!(option_label(OPTIONS, "three"), "three");
        assert_eq!(option_label(OPTIONS, "one"), "Option one");
    }
}
