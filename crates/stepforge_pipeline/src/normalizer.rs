//! Turning free-form replies into validated JSON of an expected shape.
//!
//! [`normalize`] strips one code fence, parses strictly, and hands the value
//! to an [`ExpectedShape`]. Shapes never repair length mismatches. The only
//! coercion is [`NestedStrings`] wrapping a flat string array when the batch
//! holds exactly one item.

use serde_json::Value;
use stepforge_core::{StepRecord, SubtaskGroup, strip_code_fence};
use stepforge_error::{ShapeError, ShapeErrorKind};

/// A structural schema a parsed reply must satisfy.
pub trait ExpectedShape {
    /// Value produced when the reply matches.
    type Output;

    /// Validate a parsed reply. `raw` is the unmodified reply text, kept on errors.
    fn validate(&self, value: Value, raw: &str) -> Result<Self::Output, ShapeError>;
}

/// Strip a fence, parse strictly, and validate against `shape`.
///
/// # Errors
///
/// Returns a [`ShapeError`] carrying `raw` when the text is not JSON or does
/// not match the shape.
///
/// # Examples
///
/// ```
/// use stepforge_pipeline::{FlatStrings, normalize};
///
/// let items = normalize("```json\n[\"a\", \"b\"]\n```", &FlatStrings::new(2)).unwrap();
/// assert_eq!(items, vec!["a", "b"]);
///
/// assert!(normalize("[\"a\"]", &FlatStrings::new(2)).is_err());
/// ```
pub fn normalize<S: ExpectedShape + ?Sized>(raw: &str, shape: &S) -> Result<S::Output, ShapeError> {
    let body = strip_code_fence(raw);
    let value: Value = serde_json::from_str(body)
        .map_err(|e| ShapeError::new(ShapeErrorKind::InvalidJson(e.to_string()), raw))?;
    shape.validate(value, raw)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Unwrap a top-level array of exactly `len` elements.
fn exact_array(value: Value, len: usize, raw: &str) -> Result<Vec<Value>, ShapeError> {
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(ShapeError::new(
                ShapeErrorKind::NotAnArray(json_type(&other).to_string()),
                raw,
            ));
        }
    };

    if items.len() != len {
        return Err(ShapeError::new(
            ShapeErrorKind::LengthMismatch {
                expected: len,
                actual: items.len(),
            },
            raw,
        ));
    }

    Ok(items)
}

/// Convert every element to a string, failing on the first non-string.
fn strings(items: Vec<Value>, raw: &str) -> Result<Vec<String>, ShapeError> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::String(s) => Ok(s),
            _ => Err(ShapeError::new(
                ShapeErrorKind::ElementType {
                    index,
                    expected: "a string",
                },
                raw,
            )),
        })
        .collect()
}

/// Flat array of exactly `len` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatStrings {
    len: usize,
}

impl FlatStrings {
    /// Expect exactly `len` strings.
    pub fn new(len: usize) -> Self {
        Self { len }
    }
}

impl ExpectedShape for FlatStrings {
    type Output = Vec<String>;

    fn validate(&self, value: Value, raw: &str) -> Result<Self::Output, ShapeError> {
        strings(exact_array(value, self.len, raw)?, raw)
    }
}

/// Array of exactly `len` string arrays, one per batch item.
///
/// When `len` is 1 and the reply is a flat array of strings, the reply is
/// taken as that single item's group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NestedStrings {
    len: usize,
}

impl NestedStrings {
    /// Expect one string array for each of `len` items.
    pub fn new(len: usize) -> Self {
        Self { len }
    }
}

impl ExpectedShape for NestedStrings {
    type Output = Vec<SubtaskGroup>;

    fn validate(&self, value: Value, raw: &str) -> Result<Self::Output, ShapeError> {
        let value = match value {
            Value::Array(items) if self.len == 1 && items.iter().all(Value::is_string) => {
                Value::Array(vec![Value::Array(items)])
            }
            other => other,
        };

        exact_array(value, self.len, raw)?
            .into_iter()
            .enumerate()
            .map(|(index, group)| match group {
                Value::Array(items) => strings(items, raw),
                _ => Err(ShapeError::new(
                    ShapeErrorKind::ElementType {
                        index,
                        expected: "an array of strings",
                    },
                    raw,
                )),
            })
            .collect()
    }
}

/// Array of exactly `len` step objects.
///
/// Each object is coerced field by field into a [`StepRecord`]; only a
/// non-object element is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepObjects {
    len: usize,
}

impl StepObjects {
    /// Expect exactly `len` step objects.
    pub fn new(len: usize) -> Self {
        Self { len }
    }
}

impl ExpectedShape for StepObjects {
    type Output = Vec<StepRecord>;

    fn validate(&self, value: Value, raw: &str) -> Result<Self::Output, ShapeError> {
        exact_array(value, self.len, raw)?
            .iter()
            .enumerate()
            .map(|(index, step)| {
                if step.is_object() {
                    Ok(StepRecord::from_value(step))
                } else {
                    Err(ShapeError::new(
                        ShapeErrorKind::ElementType {
                            index,
                            expected: "an object",
                        },
                        raw,
                    ))
                }
            })
            .collect()
    }
}
