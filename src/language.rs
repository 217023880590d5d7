//! Language-aware query augmentation.
//!
//! The answering engine responds in whatever language the prompt asks
//! for, so non-English requests get an explicit directive wrapped around
//! the untouched question text.

/// Default language code for inbound requests.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Supported language codes and their display names.
const LANGUAGE_NAMES: &[(&str, &str)] = &[
    ("en", "English"),
    ("hi", "Hindi"),
    ("or", "Odia"),
    ("bn", "Bengali"),
    ("te", "Telugu"),
    ("ta", "Tamil"),
    ("kn", "Kannada"),
];

/// Resolve a language code to its display name.
///
/// Unknown codes resolve to "English" — the directive still gets written
/// with the fallback name instead of being dropped, so the engine always
/// receives an explicit language instruction. The raw code is still
/// logged with the interaction.
pub fn display_name(code: &str) -> &'static str {
    LANGUAGE_NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
        .unwrap_or("English")
}

/// Wrap a question with a respond-in-language directive.
///
/// English questions pass through unchanged. For everything else the
/// original question is embedded verbatim between two directives, so the
/// engine gets both the instruction and the unmodified semantic content.
pub fn augment(question: &str, language: &str) -> String {
    if language == DEFAULT_LANGUAGE {
        return question.to_string();
    }
    let name = display_name(language);
    format!(
        "Please respond in {name} language. User's health question: {question}. \
         Remember to write your entire response in {name}."
    )
}
