//! Prompt templates for the generation stages.

use stepforge_core::{DatasetSplit, Language};

/// Render `items` as a 1-based ordinal list of quoted entries.
///
/// # Examples
///
/// ```
/// use stepforge_pipeline::enumerate_items;
///
/// let items = vec!["Open the page".to_string(), "Click Login".to_string()];
/// assert_eq!(enumerate_items(&items), "1. \"Open the page\"\n2. \"Click Login\"");
/// ```
pub fn enumerate_items(items: &[String]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. \"{}\"", i + 1, item))
        .collect::<Vec<_>>()
        .join("\n")
}

const TRAIN_ATTRIBUTES: &str = "\
Styles: color, background color, font family, font size, font weight, text alignment, opacity, border, padding, margin, gap
States: visible/hidden, enabled/disabled, focused, hovered, active/selected
Layout: x/y coordinates, width, height, alignment, aspect ratio, offset, tolerance Px, z index, occluded, overflow
Content: text, placeholder, language
Media: muted, playing, fullscreen
Dynamics: transition, animation, movement, parallax, progress direction, scroll, loading, progress value
Data: count, value, time value
Image: source, is loaded, load time, sharpness score GTE, compression artifacts LTE, watermark, natural dimensions
Accessibility: activatable by keyboard, keyboard focusable, keyboard navigable, focus trapping, label";

const TEST_ATTRIBUTES: &str = "\
Styles: fill, visited state color, line height, border radius, box shadow
States: clickable, cursor
Layout: transform, clipping, blurring, left/right, top/bottom
Content: exists, present
Media: source type
Dynamics: duration, auto advance, auto play, timeout
Text: language detection, alt text
Data: date, currency symbol
Image: rendered dimensions, viewport dimensions, video/audio
Accessibility: aria-label, contrast ratio";

/// Language-specific rules for input generation.
fn input_language_rules(language: Language) -> &'static str {
    match language {
        Language::English => {
            "- Never use vague words such as 'correctly', 'quickly' or 'smooth'; give explicit, measurable values."
        }
        Language::Vietnamese => {
            "- Never use vague words such as 'phù hợp', 'nhanh', 'mượt mà' or 'đủ'; give explicit, measurable values.
- Across the descriptions, alternate natural Vietnamese synonyms for the same attribute ('kích thước phông chữ', 'kích thước văn bản') without changing its meaning."
        }
    }
}

/// Prompt asking for `count` raw UI test descriptions for `split`, written in
/// `language`.
///
/// Train and test sets draw on disjoint attribute vocabularies.
pub fn input_prompt(split: DatasetSplit, language: Language, count: usize) -> String {
    let (set_name, allowed, forbidden) = match split {
        DatasetSplit::Train => ("TRAINING", TRAIN_ATTRIBUTES, TEST_ATTRIBUTES),
        DatasetSplit::Test => ("TEST", TEST_ATTRIBUTES, TRAIN_ATTRIBUTES),
    };
    let language_name = language.name();
    let language_rules = input_language_rules(language);

    format!(
        r#"You are a professional UI tester creating {set_name} data.
Generate exactly {count} different UI test descriptions in {language_name}.

Rules:
- Each description is one JSON string and may contain several sentences.
{language_rules}
- Give explicit, measurable values (16px, #228B22, rgb(34,139,34), 800ms, 75%, full URLs, 24px ±2px).
- Use single quotes only for human-readable text such as visible UI text, URLs, fonts and file names ('Submit', 'Roboto').
- Never single-quote numbers, units, color codes or CSS function values ('16px', '#ff0000', '400x300px' are wrong).
- Write compound attribute names as separate words ("background color", not "backgroundColor").

Use ONLY these attributes:
{allowed}

Never use these attributes:
{forbidden}

Return ONLY a JSON array of exactly {count} strings. No numbering, markdown or extra text."#
    )
}

/// Prompt asking to split each requirement of `batch` into atomic UI actions
/// written in `language`.
pub fn decompose_prompt(batch: &[String], language: Language) -> String {
    format!(
        r#"You are a professional UI test case generator.
Convert each natural-language test requirement below into a list of clear, atomic UI actions.
The requirements are written in {language_name}; write every action in {language_name}.

Rules:
- Group properties of the same UI element in the same state into one action.
- Separate actions only for different elements, different states (hover vs normal), different device types, or a user action followed by a verification.
- Split multi-step actions ("log in with user and password" becomes one action per field).
- Do not invent actions that the requirement does not describe.

Example requirement:
1. "Open 'https://www.amazon.com', search for 'Bluetooth speaker' and verify at least 10 products are shown."
Example response:
[
  [
    "Open 'https://www.amazon.com'",
    "Search for 'Bluetooth speaker'",
    "Verify that the search results display at least 10 products"
  ]
]

Requirements:
{requirements}

Return ONLY a JSON array of {count} arrays of strings, one array per requirement, in the same order."#,
        requirements = enumerate_items(batch),
        count = batch.len(),
        language_name = language.name(),
    )
}

/// Field rule for instructions written in `language`.
fn steps_language_rule(language: Language) -> &'static str {
    match language {
        Language::English => "- Write every field in English.",
        Language::Vietnamese => {
            "- The instructions are in Vietnamese. Write actions and expected keys in English, but keep Vietnamese labels and values exactly as given in selector and value (e.g. the 'Đăng nhập' button)."
        }
    }
}

/// Prompt asking for exactly one executable step per instruction in `batch`.
pub fn steps_prompt(batch: &[String], language: Language) -> String {
    format!(
        r#"You are a professional UI test step generator.
Convert each atomic test instruction below into exactly ONE executable UI test step.

Each step is a JSON object with all four fields present:
{{
  "action": "goto, click, type, hover, select, submit, search, locate or verify",
  "selector": "CSS selector or natural description of the element, or empty",
  "value": "value to type or expect, or empty",
  "expected": {{ "property": "expected value" }}
}}

Rules:
{language_rule}
- Use "" for empty strings and {{}} for an empty expected object.
- Only put properties in "expected" that the instruction clearly mentions (status, text, styles, state, dynamics, position, image properties).
- Actions such as click, type or goto always expect "status".

Instructions:
{instructions}

Return ONLY a JSON array of exactly {count} step objects, one per instruction, in the same order."#,
        instructions = enumerate_items(batch),
        count = batch.len(),
        language_rule = steps_language_rule(language),
    )
}
