//! Selection state for single-choice controls
//!
//! A control's value comes from three sources, in order: the value its owner
//! passes in, the value remembered in the preference store, and a per-control
//! [`DefaultPolicy`] applied to the option list.

use super::quarter::Quarter;

/// One entry in a selection control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownOption {
    pub value: String,
    pub label: String,
}

impl DropdownOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

impl From<&Quarter> for DropdownOption {
    fn from(quarter: &Quarter) -> Self {
        Self::new(quarter.code.clone(), quarter.label.clone())
    }
}

/// Which option a control falls back to when nothing else applies
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DefaultPolicy {
    #[default]
    First,
    Last,
    /// The option with this value, or the first option if it is missing
    MatchValue(String),
}

impl DefaultPolicy {
    pub fn pick<'a>(&self, options: &'a [DropdownOption]) -> Option<&'a DropdownOption> {
        match self {
            DefaultPolicy::First => options.first(),
            DefaultPolicy::Last => options.last(),
            DefaultPolicy::MatchValue(value) => options
                .iter()
                .find(|o| o.value == *value)
                .or_else(|| options.first()),
        }
    }
}

/// Reported to a control's owner after each user selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange {
    pub control_id: String,
    pub index: usize,
    pub value: String,
}

/// Resolve the initial value of a control
///
/// An external or stored candidate is accepted when it names one of the
/// options. While the option list is still empty (reference data not loaded
/// yet) any non-empty candidate is accepted as-is. An empty list with no
/// candidate resolves to `None`.
pub fn resolve_value(
    external: Option<&str>,
    stored: Option<&str>,
    options: &[DropdownOption],
    policy: &DefaultPolicy,
) -> Option<String> {
    let acceptable = |candidate: &str| {
        !candidate.is_empty()
            && (options.is_empty() || options.iter().any(|o| o.value == candidate))
    };

    external
        .filter(|c| acceptable(*c))
        .or_else(|| stored.filter(|c| acceptable(*c)))
        .map(str::to_string)
        .or_else(|| policy.pick(options).map(|o| o.value.clone()))
}

/// Current value and options of one control
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub value: Option<String>,
    pub options: Vec<DropdownOption>,
}

impl SelectionState {
    pub fn resolve(
        external: Option<&str>,
        stored: Option<&str>,
        options: Vec<DropdownOption>,
        policy: &DefaultPolicy,
    ) -> Self {
        let value = resolve_value(external, stored, &options, policy);
        Self { value, options }
    }

    pub fn selected_index(&self) -> Option<usize> {
        let value = self.value.as_deref()?;
        self.options.iter().position(|o| o.value == value)
    }

    /// Label of the current value, or the raw value if it is not an option
    pub fn display_label(&self) -> Option<&str> {
        match self.selected_index() {
            Some(i) => Some(self.options[i].label.as_str()),
            None => self.value.as_deref(),
        }
    }
}
