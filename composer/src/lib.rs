//! Structured-answer composer for Dunhuang cultural questions.
//!
//! Public API: [`ResponseComposer::compose`]. It generates an introduction,
//! fans out the artistic / historical / cultural sections concurrently, then
//! derives follow-up questions from everything produced so far, and finally
//! normalizes the aggregate so the caller always receives a fully populated
//! [`ComposedResponse`].
//!
//! Only the introduction step is fatal (the later sections are conditioned on
//! it); every other branch degrades to a named fallback value on provider
//! failure or unparsable JSON.

pub mod error;
pub mod extract;
pub mod language;
pub mod prompts;
pub mod response;

pub use error::ComposerError;
pub use language::Language;
pub use response::{
    ArtisticFeature, ComposedResponse, CulturalContent, CulturalStory, FollowUpQuestion,
};

use std::sync::Arc;

use llm_service::CompletionBackend;
use tracing::{debug, info, warn};

use crate::{
    prompts::SectionDrafts,
    response::{
        CULTURAL_CONTEXT_PLACEHOLDER, FeaturesEnvelope, HISTORICAL_PLACEHOLDER,
        INTRODUCTION_PLACEHOLDER, QuestionsEnvelope, degraded_artistic_features,
    },
};

/// Orchestrates the fixed section-generation pipeline against one provider.
///
/// Stateless and re-entrant: each [`compose`](Self::compose) call owns its
/// in-flight section results and shares nothing with concurrent requests
/// besides the read-only backend handle.
pub struct ResponseComposer {
    backend: Arc<dyn CompletionBackend>,
}

impl ResponseComposer {
    /// Creates a composer over the given completion backend.
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    /// Builds one structured answer for `user_message`.
    ///
    /// Pipeline: introduction (sequential) → artistic + historical + cultural
    /// (concurrent, per-branch degradation) → follow-up questions → normalize.
    ///
    /// # Errors
    /// [`ComposerError::Upstream`] / [`ComposerError::EmptyIntroduction`] when
    /// the introduction call fails; no further provider calls are made.
    pub async fn compose(
        &self,
        user_message: &str,
        language: Language,
    ) -> Result<ComposedResponse, ComposerError> {
        info!(
            message_len = user_message.len(),
            ?language,
            "composing structured response"
        );

        let introduction = self.generate_introduction(user_message, language).await?;

        // The three middle sections only depend on the introduction, so they
        // run concurrently. Each resolves to a value (real or fallback),
        // never an error, so one failing branch cannot cancel its siblings.
        let (artistic_features, historical_significance, cultural_content) = tokio::join!(
            self.generate_artistic_features(&introduction, language),
            self.generate_historical_significance(&introduction, language),
            self.generate_cultural_content(&introduction, language),
        );

        let drafts = SectionDrafts {
            introduction: &introduction,
            artistic_features: &artistic_features,
            historical_significance: &historical_significance,
            cultural_content: &cultural_content,
        };
        let follow_up_questions = self.generate_follow_ups(&drafts, language).await;

        Ok(normalize(
            introduction,
            artistic_features,
            historical_significance,
            cultural_content,
            follow_up_questions,
        ))
    }

    /// Introduction is the only hard dependency of the pipeline.
    async fn generate_introduction(
        &self,
        user_message: &str,
        language: Language,
    ) -> Result<String, ComposerError> {
        let prompt = prompts::introduction_prompt(user_message, language);
        let text = self
            .backend
            .complete(&prompt, &prompts::INTRODUCTION.options())
            .await
            .map_err(|source| ComposerError::Upstream { source })?;

        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(ComposerError::EmptyIntroduction);
        }
        debug!(section = prompts::INTRODUCTION.name, len = text.len(), "section generated");
        Ok(text)
    }

    async fn generate_artistic_features(
        &self,
        introduction: &str,
        language: Language,
    ) -> Vec<ArtisticFeature> {
        let prompt = prompts::artistic_features_prompt(introduction, language);
        match self
            .backend
            .complete(&prompt, &prompts::ARTISTIC_FEATURES.options())
            .await
        {
            Ok(raw) => {
                match extract::parse_section::<FeaturesEnvelope>(prompts::ARTISTIC_FEATURES.name, &raw)
                {
                    Some(env) => env.features,
                    None => degraded_artistic_features(),
                }
            }
            Err(e) => {
                warn!(section = prompts::ARTISTIC_FEATURES.name, error = %e, "section call failed, using fallback");
                degraded_artistic_features()
            }
        }
    }

    async fn generate_historical_significance(
        &self,
        introduction: &str,
        language: Language,
    ) -> String {
        let prompt = prompts::historical_significance_prompt(introduction, language);
        match self
            .backend
            .complete(&prompt, &prompts::HISTORICAL_SIGNIFICANCE.options())
            .await
        {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                warn!(section = prompts::HISTORICAL_SIGNIFICANCE.name, error = %e, "section call failed, using fallback");
                // normalize() masks the blank with the named placeholder
                String::new()
            }
        }
    }

    async fn generate_cultural_content(
        &self,
        introduction: &str,
        language: Language,
    ) -> CulturalContent {
        let prompt = prompts::cultural_content_prompt(introduction, language);
        match self
            .backend
            .complete(&prompt, &prompts::CULTURAL_CONTENT.options())
            .await
        {
            Ok(raw) => {
                match extract::parse_section::<CulturalContent>(prompts::CULTURAL_CONTENT.name, &raw)
                {
                    Some(content) => content,
                    None => CulturalContent::degraded(),
                }
            }
            Err(e) => {
                warn!(section = prompts::CULTURAL_CONTENT.name, error = %e, "section call failed, using fallback");
                CulturalContent::degraded()
            }
        }
    }

    /// Runs only after the introduction and all three parallel sections have
    /// settled; a failure here degrades to an empty list.
    async fn generate_follow_ups(
        &self,
        drafts: &SectionDrafts<'_>,
        language: Language,
    ) -> Vec<FollowUpQuestion> {
        let prompt = prompts::follow_up_prompt(drafts, language);
        match self
            .backend
            .complete(&prompt, &prompts::FOLLOW_UP_QUESTIONS.options())
            .await
        {
            Ok(raw) => extract::parse_section::<QuestionsEnvelope>(
                prompts::FOLLOW_UP_QUESTIONS.name,
                &raw,
            )
            .map(|env| env.questions)
            .unwrap_or_default(),
            Err(e) => {
                warn!(section = prompts::FOLLOW_UP_QUESTIONS.name, error = %e, "section call failed, using fallback");
                Vec::new()
            }
        }
    }
}

/// Coerces every field to its expected shape, substituting the named
/// placeholders for blank prose. Total: never errors, never leaves a field
/// undefined.
fn normalize(
    introduction: String,
    artistic_features: Vec<ArtisticFeature>,
    historical_significance: String,
    cultural_content: CulturalContent,
    follow_up_questions: Vec<FollowUpQuestion>,
) -> ComposedResponse {
    let non_blank = |s: String, placeholder: &str| -> String {
        if s.trim().is_empty() {
            placeholder.to_string()
        } else {
            s
        }
    };

    ComposedResponse {
        introduction: non_blank(introduction, INTRODUCTION_PLACEHOLDER),
        artistic_features,
        historical_significance: non_blank(historical_significance, HISTORICAL_PLACEHOLDER),
        cultural_context: non_blank(cultural_content.context, CULTURAL_CONTEXT_PLACEHOLDER),
        cultural_stories: cultural_content.stories,
        follow_up_questions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use llm_service::{CompletionOptions, LlmError, Provider, ProviderError, ProviderErrorKind};
    use std::sync::Mutex;

    /// Stable marker for which section a prompt belongs to.
    fn section_of(prompt: &str) -> &'static str {
        if prompt.contains("Generate a concise introduction") {
            "introduction"
        } else if prompt.contains("ONLY artistic and visual details") {
            "artistic"
        } else if prompt.contains("ONLY historical context and chronological details") {
            "historical"
        } else if prompt.contains("cultural context and 3 cultural stories") {
            "cultural"
        } else if prompt.contains("follow-up questions") {
            "follow_up"
        } else {
            "unknown"
        }
    }

    const INTRO_TEXT: &str =
        "Hidden behind a painted wall, the Library Cave guarded fifty thousand manuscripts.";
    const HISTORICAL_TEXT: &str =
        "In 1900 the Daoist caretaker Wang Yuanlu uncovered the sealed chamber.";

    /// Scripted backend: records every prompt, fails or corrupts chosen
    /// sections, and otherwise returns canned content per section.
    #[derive(Default)]
    struct FakeBackend {
        calls: Mutex<Vec<String>>,
        fail: Vec<&'static str>,
        truncate_json: Vec<&'static str>,
        blank: Vec<&'static str>,
    }

    impl FakeBackend {
        fn recorded(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl llm_service::CompletionBackend for FakeBackend {
        async fn complete(
            &self,
            prompt: &str,
            _opts: &CompletionOptions,
        ) -> Result<String, LlmError> {
            self.calls.lock().unwrap().push(prompt.to_string());
            let section = section_of(prompt);

            if self.fail.contains(&section) {
                return Err(ProviderError::new(
                    Provider::OpenAi,
                    ProviderErrorKind::EmptyChoices,
                )
                .into());
            }
            if self.blank.contains(&section) {
                return Ok("   ".into());
            }
            if self.truncate_json.contains(&section) {
                return Ok(r#"{"features": [{"title": "Brush"#.into());
            }

            Ok(match section {
                "introduction" => INTRO_TEXT.into(),
                "artistic" => r#"{"features": [
                    {"title": "Mineral pigments", "description": "Ground malachite and azurite laid in flat fields."},
                    {"title": "Iron-line brushwork", "description": "Even, wiry outlines drawn in a single pass."},
                    {"title": "Hierarchical composition", "description": "A central figure flanked by smaller attendants."}
                ]}"#
                .into(),
                "historical" => HISTORICAL_TEXT.into(),
                "cultural" => r#"{"context": "The cave embodies Buddhist devotion to preserving the dharma.",
                    "stories": [
                        {"title": "The sealed scriptures", "story": "Monks hid the texts from advancing armies and sealed the wall."},
                        {"title": "Wang's discovery", "story": "A drifting cigarette's smoke revealed the hollow behind the plaster."},
                        {"title": "The scattered scrolls", "story": "Scholars carried the manuscripts across the world, spreading their wisdom."}
                    ]}"#
                .into(),
                "follow_up" => r#"{"questions": [
                    {"question": "What pigments colored the murals?", "description": "Explore the mineral palette."},
                    {"question": "Who was Wang Yuanlu?", "description": "Meet the cave's discoverer."},
                    {"question": "Why were the scrolls hidden?", "description": "Uncover the sealing legend."}
                ]}"#
                .into(),
                other => panic!("unexpected section: {other}"),
            })
        }
    }

    fn composer(backend: Arc<FakeBackend>) -> ResponseComposer {
        ResponseComposer::new(backend)
    }

    #[tokio::test]
    async fn compose_returns_fully_populated_response() {
        let backend = Arc::new(FakeBackend::default());
        let resp = composer(backend.clone())
            .compose("What is the Library Cave discovery?", Language::En)
            .await
            .unwrap();

        assert_eq!(resp.introduction, INTRO_TEXT);
        assert!(resp.artistic_features.len() >= 1);
        assert_eq!(resp.historical_significance, HISTORICAL_TEXT);
        assert!(!resp.cultural_context.is_empty());
        assert_eq!(resp.cultural_stories.len(), 3);
        assert!((1..=4).contains(&resp.follow_up_questions.len()));
        // one call per section
        assert_eq!(backend.recorded().len(), 5);
    }

    #[tokio::test]
    async fn introduction_failure_short_circuits() {
        let backend = Arc::new(FakeBackend {
            fail: vec!["introduction"],
            ..Default::default()
        });
        let err = composer(backend.clone())
            .compose("hello", Language::En)
            .await
            .unwrap_err();

        assert!(matches!(err, ComposerError::Upstream { .. }));
        // No further provider calls after the failed introduction.
        assert_eq!(backend.recorded().len(), 1);
    }

    #[tokio::test]
    async fn blank_introduction_is_upstream_failure() {
        let backend = Arc::new(FakeBackend {
            blank: vec!["introduction"],
            ..Default::default()
        });
        let err = composer(backend.clone())
            .compose("hello", Language::En)
            .await
            .unwrap_err();
        assert!(matches!(err, ComposerError::EmptyIntroduction));
        assert_eq!(backend.recorded().len(), 1);
    }

    #[tokio::test]
    async fn single_branch_failure_degrades_only_that_section() {
        let backend = Arc::new(FakeBackend {
            fail: vec!["historical"],
            ..Default::default()
        });
        let resp = composer(backend.clone())
            .compose("tell me about the murals", Language::En)
            .await
            .unwrap();

        // Failing branch gets its placeholder, siblings keep real content.
        assert_eq!(
            resp.historical_significance,
            response::HISTORICAL_PLACEHOLDER
        );
        assert_eq!(resp.artistic_features[0].title, "Mineral pigments");
        assert_eq!(resp.cultural_stories.len(), 3);
        assert_eq!(backend.recorded().len(), 5);
    }

    #[tokio::test]
    async fn truncated_json_falls_back_per_field() {
        let backend = Arc::new(FakeBackend {
            truncate_json: vec!["artistic"],
            ..Default::default()
        });
        let resp = composer(backend)
            .compose("tell me about the murals", Language::En)
            .await
            .unwrap();

        assert_eq!(resp.artistic_features.len(), 1);
        assert_eq!(resp.artistic_features[0].title, "Visual Elements");
        // Unaffected fields carry real content.
        assert_eq!(resp.historical_significance, HISTORICAL_TEXT);
        assert_eq!(resp.cultural_stories.len(), 3);
    }

    #[tokio::test]
    async fn failed_cultural_branch_uses_degraded_content() {
        let backend = Arc::new(FakeBackend {
            fail: vec!["cultural"],
            ..Default::default()
        });
        let resp = composer(backend)
            .compose("tell me about the caves", Language::En)
            .await
            .unwrap();

        assert_eq!(
            resp.cultural_context,
            "Cultural context will be displayed here."
        );
        assert_eq!(resp.cultural_stories[0].title, "Cultural Tales");
        assert_eq!(resp.artistic_features.len(), 3);
    }

    #[tokio::test]
    async fn follow_ups_run_last_and_see_all_sections() {
        let backend = Arc::new(FakeBackend::default());
        composer(backend.clone())
            .compose("What is the Library Cave discovery?", Language::En)
            .await
            .unwrap();

        let calls = backend.recorded();
        assert_eq!(calls.len(), 5);
        assert_eq!(section_of(&calls[0]), "introduction");
        let last = calls.last().unwrap();
        assert_eq!(section_of(last), "follow_up");
        // Grounded in previously generated text.
        assert!(last.contains(INTRO_TEXT));
        assert!(last.contains(HISTORICAL_TEXT));
        assert!(last.contains("Mineral pigments"));
        assert!(last.contains("sealed scriptures"));
    }

    #[tokio::test]
    async fn follow_up_failure_degrades_to_empty_list() {
        let backend = Arc::new(FakeBackend {
            fail: vec!["follow_up"],
            ..Default::default()
        });
        let resp = composer(backend)
            .compose("hello", Language::En)
            .await
            .unwrap();
        assert!(resp.follow_up_questions.is_empty());
        assert_eq!(resp.introduction, INTRO_TEXT);
    }

    #[tokio::test]
    async fn chinese_language_directs_every_prompt() {
        let backend = Arc::new(FakeBackend::default());
        composer(backend.clone())
            .compose("你好", Language::Zh)
            .await
            .unwrap();

        let calls = backend.recorded();
        assert_eq!(calls.len(), 5);
        for prompt in &calls {
            assert!(prompt.contains("Respond in Chinese."), "prompt missing zh directive");
        }
    }

    #[tokio::test]
    async fn repeated_calls_keep_structural_shape() {
        let backend = Arc::new(FakeBackend::default());
        let c = composer(backend);
        let a = c.compose("first", Language::En).await.unwrap();
        let b = c.compose("second", Language::En).await.unwrap();
        assert_eq!(a.artistic_features.len(), b.artistic_features.len());
        assert_eq!(a.follow_up_questions.len(), b.follow_up_questions.len());
    }

    #[test]
    fn normalize_masks_blank_prose() {
        let resp = normalize(
            "".into(),
            Vec::new(),
            "  ".into(),
            CulturalContent::default(),
            Vec::new(),
        );
        assert_eq!(resp.introduction, response::INTRODUCTION_PLACEHOLDER);
        assert_eq!(resp.historical_significance, response::HISTORICAL_PLACEHOLDER);
        assert_eq!(resp.cultural_context, response::CULTURAL_CONTEXT_PLACEHOLDER);
        assert!(resp.artistic_features.is_empty());
        assert!(resp.cultural_stories.is_empty());
    }
}
