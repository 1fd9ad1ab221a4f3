use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::post::{NewPost, Translation, Translations};

/// Writing style requested from the text model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Formal,
    #[default]
    Conversational,
    Inspirational,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Formal => "formal",
            Tone::Conversational => "conversational",
            Tone::Inspirational => "inspirational",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "formal" => Ok(Tone::Formal),
            "conversational" => Ok(Tone::Conversational),
            "inspirational" => Ok(Tone::Inspirational),
            other => Err(format!("unknown tone '{}'", other)),
        }
    }
}

/// Requested article length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl TargetLength {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetLength::Short => "short",
            TargetLength::Medium => "medium",
            TargetLength::Long => "long",
        }
    }
}

impl fmt::Display for TargetLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetLength {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "short" => Ok(TargetLength::Short),
            "medium" => Ok(TargetLength::Medium),
            "long" => Ok(TargetLength::Long),
            other => Err(format!("unknown target length '{}'", other)),
        }
    }
}

/// Topic brief for a draft. Callers check `topic` and `category` first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub topic: String,
    pub category: String,
    #[serde(default)]
    pub tone: Tone,
    #[serde(default)]
    pub target_length: TargetLength,
}

/// Bilingual draft produced by the text model. Never persisted on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    pub es: Translation,
    pub en: Translation,
    pub suggested_slug: String,
}

impl GeneratedContent {
    /// Accept the draft into a new post that still has to be saved explicitly.
    pub fn into_draft(self, category: &str, author: &str) -> NewPost {
        NewPost {
            slug: self.suggested_slug,
            image: String::new(),
            author: author.to_string(),
            categories: vec![category.to_string()],
            translations: Translations {
                es: self.es,
                en: self.en,
            },
        }
    }
}
