/// A language code paired with its English display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

/// Languages documentation repositories typically carry translations for.
///
/// Audits are not restricted to this list; repositories vary.
pub const KNOWN_LANGUAGES: &[Language] = &[
    Language { code: "ar", name: "Arabic" },
    Language { code: "bn", name: "Bengali" },
    Language { code: "de", name: "German" },
    Language { code: "es", name: "Spanish" },
    Language { code: "fa", name: "Persian" },
    Language { code: "fr", name: "French" },
    Language { code: "hi", name: "Hindi" },
    Language { code: "it", name: "Italian" },
    Language { code: "ja", name: "Japanese" },
    Language { code: "ko", name: "Korean" },
    Language { code: "nl", name: "Dutch" },
    Language { code: "pl", name: "Polish" },
    Language { code: "pt", name: "Portuguese" },
    Language { code: "ru", name: "Russian" },
    Language { code: "te", name: "Telugu" },
    Language { code: "th", name: "Thai" },
    Language { code: "tr", name: "Turkish" },
    Language { code: "vi", name: "Vietnamese" },
    Language { code: "zh", name: "Chinese (Simplified)" },
    Language { code: "zh-hant", name: "Chinese (Traditional)" },
];

/// Display name for a known language code.
pub fn language_name(code: &str) -> Option<&'static str> {
    KNOWN_LANGUAGES
        .iter()
        .find(|language| language.code.eq_ignore_ascii_case(code))
        .map(|language| language.name)
}
