//! AI-assisted draft generation: prompt assembly and strict parsing of the
//! model's JSON answer.

use std::sync::Arc;

use serde::Deserialize;

use crate::domain::slug::slugify;
use crate::domain::{GeneratedContent, GenerationRequest, TargetLength, Tone, Translation};
use crate::error::GenerationError;
use crate::ports::TextModel;

/// SEO budget for meta descriptions, in characters.
pub const META_DESCRIPTION_MAX: usize = 160;
const META_DESCRIPTION_MIN: usize = 140;

/// Word range and read-time label expected for a target length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthProfile {
    pub min_words: u32,
    pub max_words: u32,
    pub read_time: &'static str,
}

impl From<TargetLength> for LengthProfile {
    fn from(length: TargetLength) -> Self {
        match length {
            TargetLength::Short => LengthProfile {
                min_words: 600,
                max_words: 800,
                read_time: "4 min",
            },
            TargetLength::Medium => LengthProfile {
                min_words: 1000,
                max_words: 1300,
                read_time: "6 min",
            },
            TargetLength::Long => LengthProfile {
                min_words: 1600,
                max_words: 2000,
                read_time: "9 min",
            },
        }
    }
}

pub fn tone_directive(tone: Tone) -> &'static str {
    match tone {
        Tone::Formal => {
            "Professional and respectful. Precise vocabulary, no slang, address the reader formally."
        }
        Tone::Conversational => {
            "Warm and close, as if talking to a friend over coffee. Speak directly to the reader."
        }
        Tone::Inspirational => {
            "Hopeful and motivating. Use vivid images and leave the reader ready to take a first step."
        }
    }
}

/// Build the single instruction sent to the text model.
pub fn build_prompt(request: &GenerationRequest) -> String {
    let profile = LengthProfile::from(request.target_length);

    format!(
        r#"You are the content writer of a family and personal-growth coaching practice.
Write a complete blog article about: "{topic}".
Category: {category}.
Tone: {tone}
Length: between {min} and {max} words per language.

Write the article in Spanish (es) and English (en). The English version is a natural
adaptation of the Spanish one, not a literal translation.

Formatting rules for "content":
- Valid HTML only. Do not use <h1>; the page already renders the title.
- Structure sections with <h2> (and <h3> when needed), paragraphs with <p>.
- Include at least one list (<ul> or <ol>) and one <blockquote>.
- Close with a short call to action inviting the reader to book a session or write back.

Rules for the other fields:
- "excerpt": one or two sentences, plain text.
- "metaDescription": plain text between {meta_min} and {meta_max} characters.
- "readTime": "{read_time}".
- "suggestedSlug": lowercase, words separated by dashes, no accents, based on the Spanish title.

Answer with strict JSON and nothing else, exactly in this shape:
{{
  "es": {{"title": "", "excerpt": "", "content": "", "metaDescription": "", "readTime": ""}},
  "en": {{"title": "", "excerpt": "", "content": "", "metaDescription": "", "readTime": ""}},
  "suggestedSlug": ""
}}"#,
        topic = request.topic.trim(),
        category = request.category.trim(),
        tone = tone_directive(request.tone),
        min = profile.min_words,
        max = profile.max_words,
        meta_min = META_DESCRIPTION_MIN,
        meta_max = META_DESCRIPTION_MAX,
        read_time = profile.read_time,
    )
}

/// Remove a surrounding Markdown code fence (```json ... ``` or ``` ... ```).
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the info string ("json", "JSON", ...). It ends at the first
    // newline, or at the first non-letter when the fence is on one line.
    let body = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
    };

    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTranslation {
    title: String,
    excerpt: String,
    content: String,
    meta_description: String,
    #[serde(default)]
    read_time: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGenerated {
    es: RawTranslation,
    en: RawTranslation,
    #[serde(default)]
    suggested_slug: String,
}

/// Parse and validate the model answer into a `GeneratedContent`.
pub fn parse_generated(raw: &str) -> Result<GeneratedContent, GenerationError> {
    let json = strip_code_fence(raw);
    let parsed: RawGenerated = serde_json::from_str(json)
        .map_err(|e| GenerationError::Malformed(format!("response is not the expected JSON: {}", e)))?;

    let es = validate_translation("es", parsed.es)?;
    let en = validate_translation("en", parsed.en)?;

    let mut suggested_slug = slugify(&parsed.suggested_slug);
    if suggested_slug.is_empty() {
        suggested_slug = slugify(&es.title);
    }

    Ok(GeneratedContent {
        es,
        en,
        suggested_slug,
    })
}

fn validate_translation(lang: &str, raw: RawTranslation) -> Result<Translation, GenerationError> {
    for (field, value) in [
        ("title", &raw.title),
        ("excerpt", &raw.excerpt),
        ("content", &raw.content),
    ] {
        if value.trim().is_empty() {
            return Err(GenerationError::Malformed(format!(
                "{}.{} is empty",
                lang, field
            )));
        }
    }

    Ok(Translation {
        title: raw.title.trim().to_string(),
        excerpt: raw.excerpt.trim().to_string(),
        content: raw.content.trim().to_string(),
        meta_description: truncate_chars(raw.meta_description.trim(), META_DESCRIPTION_MAX),
        read_time: raw.read_time.trim().to_string(),
    })
}

fn truncate_chars(value: &str, max: usize) -> String {
    match value.char_indices().nth(max) {
        Some((idx, _)) => value[..idx].trim_end().to_string(),
        None => value.to_string(),
    }
}

/// Turns a topic brief into a bilingual draft using a text model.
#[derive(Clone)]
pub struct DraftGenerator {
    model: Arc<dyn TextModel>,
}

impl DraftGenerator {
    pub fn new(model: Arc<dyn TextModel>) -> Self {
        Self { model }
    }

    /// One model call, no retries. The result is only a draft.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedContent, GenerationError> {
        let prompt = build_prompt(request);
        tracing::debug!(
            topic = %request.topic,
            category = %request.category,
            tone = %request.tone,
            length = %request.target_length,
            "Requesting draft generation"
        );

        let raw = self.model.complete(&prompt).await?;
        let mut content = parse_generated(&raw).inspect_err(|e| {
            tracing::warn!(error = %e, "Text model returned an unusable draft");
        })?;

        let read_time = LengthProfile::from(request.target_length).read_time;
        for translation in [&mut content.es, &mut content.en] {
            if translation.read_time.is_empty() {
                translation.read_time = read_time.to_string();
            }
        }

        Ok(content)
    }
}
