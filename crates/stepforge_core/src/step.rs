//! Executable UI test step records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One executable UI test step.
///
/// All four fields are always present. A step whose fields are all empty is
/// the placeholder substituted when a batch exhausts its retry budget.
///
/// # Examples
///
/// ```
/// use stepforge_core::StepRecord;
/// use serde_json::json;
///
/// let step = StepRecord::from_value(&json!({
///     "action": "click",
///     "selector": "'Sign In' button",
///     "value": 42,
/// }));
///
/// assert_eq!(step.action, "click");
/// assert_eq!(step.value, "");
/// assert!(step.expected.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Action to perform (click, type, hover, verify, ...)
    pub action: String,
    /// CSS selector or natural-language reference to the element
    pub selector: String,
    /// Value to type or expect
    pub value: String,
    /// Open set of expected UI properties
    pub expected: Map<String, Value>,
}

impl StepRecord {
    /// The all-empty step used as a placeholder.
    pub fn placeholder() -> Self {
        Self::default()
    }

    /// Whether every field is empty.
    pub fn is_placeholder(&self) -> bool {
        self.action.is_empty()
            && self.selector.is_empty()
            && self.value.is_empty()
            && self.expected.is_empty()
    }

    /// Coerce an arbitrary JSON value into a step.
    ///
    /// String fields that are missing or not strings become `""`; `expected`
    /// becomes `{}` unless it is an object. Non-object input yields the
    /// placeholder. Callers that must reject non-objects check that first.
    pub fn from_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::placeholder();
        };

        let text = |key: &str| {
            object
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_default()
        };

        Self {
            action: text("action"),
            selector: text("selector"),
            value: text("value"),
            expected: object
                .get("expected")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default(),
        }
    }
}
