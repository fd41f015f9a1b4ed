//! Robust extraction of typed values from untrusted provider output.
//!
//! Even with JSON mode requested, providers occasionally wrap the object in
//! code fences or truncate it at the token ceiling. Parsing never propagates
//! an error past the section boundary: callers get `None` and substitute the
//! section's fallback value.

use serde::de::DeserializeOwned;
use tracing::warn;

/// Trim common code-fence wrappers around JSON.
pub fn cleanup_json_like(s: &str) -> String {
    let mut t = s.trim().to_string();
    if t.starts_with("```") {
        t = t
            .trim_start_matches("```json")
            .trim_start_matches("```")
            .to_string();
        if let Some(pos) = t.rfind("```") {
            t.truncate(pos);
        }
    }
    t.trim().to_string()
}

/// Parses a section's raw provider output into `T`, or `None` on any failure.
///
/// Parse errors are warn-logged with the section name and a short snippet of
/// the raw text for attribution.
pub fn parse_section<T: DeserializeOwned>(section: &'static str, raw: &str) -> Option<T> {
    let clean = cleanup_json_like(raw);
    match serde_json::from_str::<T>(&clean) {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(
                section,
                error = %e,
                snippet = %snippet(&clean),
                "failed to parse section JSON, using fallback"
            );
            None
        }
    }
}

fn snippet(s: &str) -> String {
    const MAX: usize = 120;
    if s.len() <= MAX {
        return s.to_string();
    }
    let mut end = MAX;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &s[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::{FeaturesEnvelope, QuestionsEnvelope};

    #[test]
    fn strips_code_fences() {
        let fenced = "```json\n{\"features\": []}\n```";
        assert_eq!(cleanup_json_like(fenced), "{\"features\": []}");

        let bare = "{\"features\": []}";
        assert_eq!(cleanup_json_like(bare), bare);
    }

    #[test]
    fn parses_valid_envelope() {
        let raw = r#"{"features": [{"title": "Brushwork", "description": "Fine lines."}]}"#;
        let env: FeaturesEnvelope = parse_section("artistic_features", raw).unwrap();
        assert_eq!(env.features.len(), 1);
        assert_eq!(env.features[0].title, "Brushwork");
    }

    #[test]
    fn missing_key_defaults_to_empty() {
        let env: QuestionsEnvelope = parse_section("follow_up_questions", "{}").unwrap();
        assert!(env.questions.is_empty());
    }

    #[test]
    fn truncated_json_yields_none() {
        let truncated = r#"{"features": [{"title": "Brush"#;
        assert!(parse_section::<FeaturesEnvelope>("artistic_features", truncated).is_none());
    }

    #[test]
    fn plain_prose_yields_none() {
        assert!(parse_section::<FeaturesEnvelope>("artistic_features", "Sorry, here is text").is_none());
    }
}
