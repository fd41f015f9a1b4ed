//! Prompt templates and per-section generation constraints.
//!
//! Every prompt is built by deterministic string templating: the shared
//! style-guide preamble, the section's inclusion/exclusion rules and word
//! ceiling, a language directive, and the user question or prior section
//! text. Sampling temperature and token ceilings live in the static
//! [`SectionSpec`] table so the pipeline logic stays invariant while prompt
//! configurations vary.

use llm_service::CompletionOptions;

use crate::{
    language::Language,
    response::{ArtisticFeature, CulturalContent},
};

/// Overarching storytelling and accessibility guidelines shared by every
/// section prompt.
pub const STYLE_GUIDE: &str = "\
STORYTELLING APPROACH:
- Use vivid, descriptive language that paints mental pictures
- Employ storytelling techniques to make history come alive
- Create immersive experiences that transport readers to ancient Dunhuang
- Use sensory details (colors, textures, sounds, atmosphere)
- Explain concepts through engaging narratives and analogies

ACCESSIBILITY GUIDELINES:
- Assume no prior knowledge of Dunhuang, Buddhism, or Chinese history
- Define all technical terms and cultural concepts immediately
- Use familiar comparisons to help readers understand unfamiliar ideas
- Structure information logically from general to specific
- Avoid academic jargon; use conversational, engaging tone

CULTURAL IMMERSION:
- Bring the ancient world to life through rich descriptions
- Help readers visualize the bustling Silk Road trade routes
- Describe the daily life of monks, artists, and pilgrims
- Paint pictures of candlelit caves and colorful murals
- Connect ancient practices to universal human experiences
";

/// Generation constraints for one section of the answer.
///
/// Token ceilings approximate the documented word budgets (the whole answer
/// stays under ~600 words); factual sections run at 0.7, the follow-up
/// generator slightly hotter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionSpec {
    /// Stable section name, used for log attribution.
    pub name: &'static str,
    /// Sampling temperature for this section.
    pub temperature: f32,
    /// Token ceiling for this section.
    pub max_tokens: u32,
    /// Whether the provider is asked for a machine-parsable JSON object.
    pub json_object: bool,
}

impl SectionSpec {
    /// Maps this spec to per-call provider options.
    pub fn options(&self) -> CompletionOptions {
        if self.json_object {
            CompletionOptions::json(self.max_tokens, self.temperature)
        } else {
            CompletionOptions::prose(self.max_tokens, self.temperature)
        }
    }
}

/// ~50 words of prose.
pub const INTRODUCTION: SectionSpec = SectionSpec {
    name: "introduction",
    temperature: 0.7,
    max_tokens: 150,
    json_object: false,
};

/// ~135 words as `{"features": [...]}`.
pub const ARTISTIC_FEATURES: SectionSpec = SectionSpec {
    name: "artistic_features",
    temperature: 0.7,
    max_tokens: 400,
    json_object: true,
};

/// ~85 words of prose.
pub const HISTORICAL_SIGNIFICANCE: SectionSpec = SectionSpec {
    name: "historical_significance",
    temperature: 0.7,
    max_tokens: 250,
    json_object: false,
};

/// ~185 words as `{"context": ..., "stories": [...]}`.
pub const CULTURAL_CONTENT: SectionSpec = SectionSpec {
    name: "cultural_content",
    temperature: 0.7,
    max_tokens: 555,
    json_object: true,
};

/// ~65 words as `{"questions": [...]}`.
pub const FOLLOW_UP_QUESTIONS: SectionSpec = SectionSpec {
    name: "follow_up_questions",
    temperature: 0.8,
    max_tokens: 200,
    json_object: true,
};

/// Text of all previously generated sections, restated inside the follow-up
/// prompt so the questions stay grounded in what was already produced.
#[derive(Debug)]
pub struct SectionDrafts<'a> {
    pub introduction: &'a str,
    pub artistic_features: &'a [ArtisticFeature],
    pub historical_significance: &'a str,
    pub cultural_content: &'a CulturalContent,
}

/// Builds the introduction prompt from the raw user question.
pub fn introduction_prompt(user_message: &str, language: Language) -> String {
    format!(
        "{STYLE_GUIDE}
Generate a concise introduction that serves as a gateway into the world of Dunhuang culture.

CRITICAL REQUIREMENTS:
- MAXIMUM 3-5 sentences only
- Stay under 50 words (part of 500 word total limit)
- Make each sentence vivid and impactful
- Capture the essence without lengthy descriptions
- If the user's question is about a specific topic of Dunhuang, introduce that topic first rather than starting with introductory information about Dunhuang itself.
- If the user does not specify a topic, start with a general introduction to Dunhuang
- If the user types something like a greeting or a casual question, start with a friendly greeting and then introduce Dunhuang.

IMPORTANT: Respond in {lang}.

Create a brief but engaging overview that:
- Paints a vivid picture of the topic's significance in Dunhuang's story
- Introduces the key concept with descriptive language
- Sets the scene with rich atmosphere in minimal words

User's question: {user_message}

Write as if providing a captivating but brief introduction. Maximum 3-5 sentences only.
End with a concluding sentence that summarizes the introduction with a full stop.",
        lang = language.directive(),
    )
}

/// Builds the visual/technique-only artistic prompt from the introduction.
pub fn artistic_features_prompt(introduction: &str, language: Language) -> String {
    format!(
        "{STYLE_GUIDE}
Based on this introduction: \"{introduction}\"

Generate ONLY artistic and visual details that expand on the artistic elements mentioned in the introduction.

CRITICAL REQUIREMENTS:
- MAXIMUM 135 words (part of 500 word total limit)
- Stay concise while being informative
- Focus exclusively on concrete visual elements, techniques, and artistic characteristics
- Do not repeat general information about locations, time periods, or cultural background
- Ensure JSON is properly formatted and complete

IMPORTANT: Respond in {lang}.

Focus ONLY on visual artistic details:
- Specific painting techniques and brushwork methods
- Exact color palettes and pigment materials used
- Detailed compositional arrangements and layouts
- Sculptural techniques and carving methods
- Iconographic symbols and their visual representations
- Decorative patterns and artistic motifs
- Architectural elements and design features
- Calligraphy styles, structure, strokes, and ink usage

Avoid mentioning: historical periods, dynasties, cultural background, religious context, or general introductions.

Write as if examining the artwork up close, describing only what the eyes can see.
End each description with a concluding sentence that summarizes the artistic technique with a full stop.

Provide a JSON object with this exact format (ensure complete, valid JSON):
{{
  \"features\": [
    {{\"title\": \"Specific artistic technique\", \"description\": \"Pure visual description with concluding summary sentence.\"}},
    {{\"title\": \"Specific artistic technique\", \"description\": \"Pure visual description with concluding summary sentence.\"}},
    {{\"title\": \"Specific artistic technique\", \"description\": \"Pure visual description with concluding summary sentence.\"}}
  ]
}}",
        lang = language.directive(),
    )
}

/// Builds the chronology-only historical prompt from the introduction.
pub fn historical_significance_prompt(introduction: &str, language: Language) -> String {
    format!(
        "{STYLE_GUIDE}
Based on this introduction: \"{introduction}\"

Generate ONLY historical context and chronological details that expand on the historical elements mentioned in the introduction.

CRITICAL REQUIREMENTS:
- MAXIMUM 85 words (part of 500 word total limit)
- Stay concise while being informative
- Focus exclusively on dates, dynasties, events, and historical developments
- Do not repeat artistic details, cultural practices, or general background information

IMPORTANT: Respond in {lang}.

Focus ONLY on historical facts and chronology:
- Specific dynasties and exact time periods
- Construction dates and building phases
- Political events and imperial patronage
- Archaeological discoveries and documentation
- Historical figures and their specific contributions
- Timeline of development and changes
- Reflection of the characteristics of the society's political, economic, artistic, and cultural development
- Do not mention the specific time periods of the dynasties (e.g., 300-400 AD)

Avoid mentioning: artistic techniques, visual descriptions, religious practices, or cultural meanings.

Write as if creating a historical timeline, focusing purely on when, who, and what happened.
End with a concluding sentence that summarizes the historical significance with a full stop.

Provide only the historical significance text (no JSON, no additional formatting).",
        lang = language.directive(),
    )
}

/// Builds the spiritual/folkloric prompt (context + three stories) from the
/// introduction.
pub fn cultural_content_prompt(introduction: &str, language: Language) -> String {
    format!(
        "{STYLE_GUIDE}
Based on this introduction: \"{introduction}\"

Generate both cultural context and 3 cultural stories related to the topic.

CRITICAL REQUIREMENTS:
- MAXIMUM 185 words total (original 85 + additional 100 words, part of 600 word total limit)
- Cultural context: ~80 words providing spiritual and religious background
- 3 Cultural stories: ~35 words each (~105 words total for all stories)
- Focus on Buddhist culture, Chinese folklore, and spiritual traditions
- Ensure JSON is properly formatted and complete

IMPORTANT: Respond in {lang}.

CULTURAL CONTEXT should cover:
- Buddhist teachings and spiritual significance
- Religious practices and ceremonial importance
- Cultural traditions and spiritual heritage
- Symbolic meanings and sacred narratives

3 CULTURAL STORIES should include:
- Buddhist legends and spiritual tales
- Chinese folktales and mythologies
- Cultural legends connected to Dunhuang or the topic
- Stories about spiritual journeys and transformations
- Tales of cultural heroes and wisdom

Each story should be a complete mini-narrative with beginning, middle, and end.
End cultural context and each story with a concluding sentence with a full stop.

Provide a JSON object with this exact format (ensure complete, valid JSON):
{{
  \"context\": \"Cultural and spiritual background with concluding sentence.\",
  \"stories\": [
    {{\"title\": \"Story Title 1\", \"story\": \"Complete cultural story or tale with concluding sentence.\"}},
    {{\"title\": \"Story Title 2\", \"story\": \"Complete cultural story or tale with concluding sentence.\"}},
    {{\"title\": \"Story Title 3\", \"story\": \"Complete cultural story or tale with concluding sentence.\"}}
  ]
}}",
        lang = language.directive(),
    )
}

/// Builds the follow-up prompt from all previously generated sections.
///
/// List-shaped sections are restated as serialized JSON, prose sections
/// verbatim, so the questions stay anchored to the produced content.
pub fn follow_up_prompt(drafts: &SectionDrafts<'_>, language: Language) -> String {
    let features_json =
        serde_json::to_string(drafts.artistic_features).unwrap_or_else(|_| "[]".into());
    let cultural_json =
        serde_json::to_string(drafts.cultural_content).unwrap_or_else(|_| "{}".into());

    format!(
        "{STYLE_GUIDE}
Based on these sections:
Introduction: \"{intro}\"
Artistic Features: \"{features_json}\"
Historical Context: \"{historical}\"
Cultural Content: \"{cultural_json}\"

Generate short, concise follow-up questions (maximum 8-10 words each) that build directly from the specific content covered in these sections.

CRITICAL REQUIREMENTS:
- MAXIMUM 65 words for this entire section (part of 500 word total limit)
- Each question maximum 8-10 words
- Stay focused on specific content mentioned

IMPORTANT: Respond in {lang}.

Create 3-4 brief questions covering:
- One artistic question based on the artistic features mentioned
- One historical question based on the historical context provided
- One cultural question based on the cultural background covered
- One comparative or related exploration question

Keep questions short and specific. Descriptions should be equally concise (maximum 15 words).
End each description with a concluding phrase that summarizes the exploration opportunity with a full stop.

Provide a JSON object with this exact format:
{{
  \"questions\": [
    {{\"question\": \"Short specific question?\", \"description\": \"Brief hint\"}},
    {{\"question\": \"Short specific question?\", \"description\": \"Brief hint\"}},
    {{\"question\": \"Short specific question?\", \"description\": \"Brief hint\"}}
  ]
}}",
        intro = drafts.introduction,
        historical = drafts.historical_significance,
        lang = language.directive(),
    )
}
