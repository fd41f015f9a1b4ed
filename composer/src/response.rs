//! Canonical structured-answer schema.
//!
//! One [`ComposedResponse`] is produced per chat request. Every field is
//! guaranteed populated after normalization: prose fields fall back to the
//! named placeholders below, list fields to well-formed (possibly empty)
//! sequences.

use serde::{Deserialize, Serialize};

/// Placeholder shown when the introduction came back blank.
pub const INTRODUCTION_PLACEHOLDER: &str = "Welcome to exploring Dunhuang culture.";

/// Placeholder shown when the historical section failed or came back blank.
pub const HISTORICAL_PLACEHOLDER: &str = "Historical context will be provided.";

/// Placeholder shown when the cultural context came back blank.
pub const CULTURAL_CONTEXT_PLACEHOLDER: &str = "Cultural context will be provided.";

/// One visual/technique item of the artistic section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtisticFeature {
    pub title: String,
    pub description: String,
}

/// One folkloric/spiritual tale of the cultural section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CulturalStory {
    pub title: String,
    pub story: String,
}

/// One suggested follow-up with a short hint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowUpQuestion {
    pub question: String,
    pub description: String,
}

/// The fully assembled answer returned to the HTTP layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposedResponse {
    pub introduction: String,
    pub artistic_features: Vec<ArtisticFeature>,
    pub historical_significance: String,
    pub cultural_context: String,
    pub cultural_stories: Vec<CulturalStory>,
    pub follow_up_questions: Vec<FollowUpQuestion>,
}

/// Intermediate output of the cultural branch (context + stories travel in
/// one provider call).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CulturalContent {
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub stories: Vec<CulturalStory>,
}

impl CulturalContent {
    /// Degraded value substituted when the branch fails or is unparsable.
    pub fn degraded() -> Self {
        Self {
            context: "Cultural context will be displayed here.".into(),
            stories: vec![CulturalStory {
                title: "Cultural Tales".into(),
                story: "Cultural stories will be displayed here.".into(),
            }],
        }
    }
}

/// Degraded artistic section substituted when the branch fails or is unparsable.
pub fn degraded_artistic_features() -> Vec<ArtisticFeature> {
    vec![ArtisticFeature {
        title: "Visual Elements".into(),
        description: "Artistic features will be displayed here.".into(),
    }]
}

/* ===========================================================================
Provider JSON envelopes
======================================================================== */

/// `{"features": [...]}` wrapper the artistic prompt requests.
#[derive(Debug, Default, Deserialize)]
pub struct FeaturesEnvelope {
    #[serde(default)]
    pub features: Vec<ArtisticFeature>,
}

/// `{"questions": [...]}` wrapper the follow-up prompt requests.
#[derive(Debug, Default, Deserialize)]
pub struct QuestionsEnvelope {
    #[serde(default)]
    pub questions: Vec<FollowUpQuestion>,
}
