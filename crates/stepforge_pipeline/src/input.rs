//! Raw task description files.
//!
//! An input file is a list of double-quoted descriptions separated by `,\n`.
//! Descriptions never contain a double quote; generation replaces them with
//! single quotes before writing.

use regex::Regex;
use std::path::Path;
use stepforge_error::{PipelineError, PipelineErrorKind, StorageError, StepforgeResult};
use tracing::{debug, instrument};

/// Every `"..."` span of `text`, in order, spanning lines.
///
/// # Errors
///
/// Returns [`PipelineErrorKind::InvalidPattern`] if the pattern fails to compile.
///
/// # Examples
///
/// ```
/// use stepforge_pipeline::parse_raw_items;
///
/// let items = parse_raw_items("\"Open 'https://a.example'\",\n\"Click\nSubmit\"").unwrap();
/// assert_eq!(items, vec!["Open 'https://a.example'", "Click\nSubmit"]);
/// ```
pub fn parse_raw_items(text: &str) -> StepforgeResult<Vec<String>> {
    let re = Regex::new(r#"(?s)"(.*?)""#)
        .map_err(|e| PipelineError::new(PipelineErrorKind::InvalidPattern(e.to_string())))?;

    Ok(re
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect())
}

/// Single-quoted literals that should appear bare: hex colors, CSS color
/// functions, lengths and durations, and `WxH` dimensions.
const BARE_LITERALS: [&str; 4] = [
    r"'(#[0-9A-Fa-f]{3,8})'",
    r"'((?:rgb|rgba|hsl|hsla)\([^']+\))'",
    r"'(\d+(?:\.\d+)?(?:px|em|rem|vw|vh|%)|\d+(?:ms|s))'",
    r"'(\d{2,4}x\d{2,4}(?:px)?)'",
];

/// Drop the single quotes around numeric and color literals.
///
/// Quotes around human-readable text such as labels, fonts and URLs stay.
///
/// # Errors
///
/// Returns [`PipelineErrorKind::InvalidPattern`] if a pattern fails to compile.
///
/// # Examples
///
/// ```
/// use stepforge_pipeline::unquote_literals;
///
/// let text = unquote_literals("The 'Submit' button is '16px' tall").unwrap();
/// assert_eq!(text, "The 'Submit' button is 16px tall");
/// ```
pub fn unquote_literals(text: &str) -> StepforgeResult<String> {
    BARE_LITERALS
        .iter()
        .try_fold(text.to_string(), |acc, pattern| -> StepforgeResult<String> {
            let re = Regex::new(pattern).map_err(|e| {
                PipelineError::new(PipelineErrorKind::InvalidPattern(e.to_string()))
            })?;
            Ok(re.replace_all(&acc, "$1").into_owned())
        })
}

fn escape_quotes(item: &str) -> String {
    item.replace('"', "'").trim().to_string()
}

/// Make a generated description safe to store between double quotes.
///
/// Inner double quotes become single quotes, surrounding whitespace is
/// trimmed and numeric literals lose their quotes.
///
/// # Errors
///
/// Returns [`PipelineErrorKind::InvalidPattern`] if a pattern fails to compile.
///
/// # Examples
///
/// ```
/// use stepforge_pipeline::sanitize_item;
///
/// assert_eq!(
///     sanitize_item("  Verify \"Login\" is '#228B22' ").unwrap(),
///     "Verify 'Login' is #228B22"
/// );
/// ```
pub fn sanitize_item(item: &str) -> StepforgeResult<String> {
    unquote_literals(&escape_quotes(item))
}

/// Render descriptions in input-file format.
///
/// # Examples
///
/// ```
/// use stepforge_pipeline::render_input;
///
/// let text = render_input(&["a".to_string(), "b \"c\"".to_string()]);
/// assert_eq!(text, "\"a\",\n\"b 'c'\"");
/// ```
pub fn render_input(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("\"{}\"", escape_quotes(item)))
        .collect::<Vec<_>>()
        .join(",\n")
}

/// Read and parse an input file.
///
/// # Errors
///
/// Returns a [`StorageError`] if the file cannot be read.
#[instrument(skip(path), fields(path = %path.display()))]
pub fn read_input_file(path: &Path) -> StepforgeResult<Vec<String>> {
    let text = std::fs::read_to_string(path).map_err(|e| StorageError::read(path, &e))?;
    let items = parse_raw_items(&text)?;
    debug!(items = items.len(), "Parsed input file");
    Ok(items)
}

/// Write descriptions to `path`, creating parent directories.
///
/// # Errors
///
/// Returns a [`StorageError`] if the directory or file cannot be written.
#[instrument(skip(path, items), fields(path = %path.display(), items = items.len()))]
pub fn write_input_file(path: &Path, items: &[String]) -> StepforgeResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| StorageError::directory(parent, &e))?;
    }
    std::fs::write(path, render_input(items)).map_err(|e| StorageError::write(path, &e))?;
    debug!("Wrote input file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_literals_lose_quotes() {
        let text = "Button 'Submit' is '16px' high, color '#ff0000', image '400x300px'";
        assert_eq!(
            unquote_literals(text).unwrap(),
            "Button 'Submit' is 16px high, color #ff0000, image 400x300px"
        );
    }

    #[test]
    fn test_css_functions_and_durations_lose_quotes() {
        let text = "fades to 'rgba(0,0,0,0.5)' in '800ms', then 'hsl(0, 0%, 100%)' after '2s'";
        assert_eq!(
            unquote_literals(text).unwrap(),
            "fades to rgba(0,0,0,0.5) in 800ms, then hsl(0, 0%, 100%) after 2s"
        );
    }

    #[test]
    fn test_text_quotes_are_kept() {
        let text = "Open 'https://shop.example/item/42' and check font 'Roboto' at '75%'";
        assert_eq!(
            unquote_literals(text).unwrap(),
            "Open 'https://shop.example/item/42' and check font 'Roboto' at 75%"
        );
    }
}
