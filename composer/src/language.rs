//! Target natural language for generated answers.

/// Supported output languages for the answer text.
///
/// Requests carry a free-form language tag; anything unrecognized falls back
/// to English rather than failing the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    /// English output.
    #[default]
    En,
    /// Chinese output.
    Zh,
}

impl Language {
    /// Lenient parse of a client-supplied tag. `None`, empty, and unknown
    /// values all map to [`Language::En`].
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()) {
            Some(tag) if tag == "zh" || tag.starts_with("zh-") => Language::Zh,
            _ => Language::En,
        }
    }

    /// Language name used inside prompt directives ("Respond in {}.").
    pub fn directive(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Zh => "Chinese",
        }
    }
}
