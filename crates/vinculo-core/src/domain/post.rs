use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Supported content languages. Every post carries one translation per variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Es,
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Es, Language::En];

    pub fn code(&self) -> &'static str {
        match self {
            Language::Es => "es",
            Language::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "es" => Ok(Language::Es),
            "en" => Ok(Language::En),
            other => Err(format!("unsupported language '{}'", other)),
        }
    }
}

/// Lifecycle status of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Published,
    Archived,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
            PostStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            "archived" => Ok(PostStatus::Archived),
            other => Err(format!("unknown post status '{}'", other)),
        }
    }
}

/// Language-specific text of a post.
///
/// `content` is HTML written by the admin or drafted by the text model and is
/// rendered unescaped by the public site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Translation {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub meta_description: String,
    pub read_time: String,
}

impl Translation {
    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

/// The pair of translations owned by a post, serialized as `es` / `en`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translations {
    pub es: Translation,
    pub en: Translation,
}

impl Translations {
    pub fn get(&self, language: Language) -> &Translation {
        match language {
            Language::Es => &self.es,
            Language::En => &self.en,
        }
    }

    pub fn get_mut(&mut self, language: Language) -> &mut Translation {
        match language {
            Language::Es => &mut self.es,
            Language::En => &mut self.en,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Language, &Translation)> {
        Language::ALL.into_iter().map(move |lang| (lang, self.get(lang)))
    }

    /// True when every supported language has a non-empty title.
    pub fn is_complete(&self) -> bool {
        self.iter().all(|(_, t)| t.has_title())
    }
}

/// Post aggregate - a bilingual blog article with its category tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub slug: String,
    pub image: String,
    pub published_at: DateTime<Utc>,
    pub author: String,
    pub featured: bool,
    pub status: PostStatus,
    pub categories: Vec<String>,
    #[serde(flatten)]
    pub translations: Translations,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn translation(&self, language: Language) -> &Translation {
        self.translations.get(language)
    }

    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}

/// Draft submitted by an admin. Always stored with status `draft`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub slug: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(flatten)]
    pub translations: Translations,
}

impl NewPost {
    /// Materialize the draft into a post with fresh identity and timestamps.
    pub fn into_post(self, now: DateTime<Utc>) -> Post {
        Post {
            id: Uuid::new_v4(),
            slug: self.slug,
            image: self.image,
            published_at: now,
            author: self.author,
            featured: false,
            status: PostStatus::Draft,
            categories: self.categories,
            translations: self.translations,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update of one translation. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationUpdate {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub meta_description: Option<String>,
    pub read_time: Option<String>,
}

impl TranslationUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.excerpt.is_none()
            && self.content.is_none()
            && self.meta_description.is_none()
            && self.read_time.is_none()
    }

    pub fn blanks_title(&self) -> bool {
        self.title.as_deref().is_some_and(|t| t.trim().is_empty())
    }

    pub fn apply(&self, translation: &mut Translation) {
        if let Some(title) = &self.title {
            translation.title = title.clone();
        }
        if let Some(excerpt) = &self.excerpt {
            translation.excerpt = excerpt.clone();
        }
        if let Some(content) = &self.content {
            translation.content = content.clone();
        }
        if let Some(meta) = &self.meta_description {
            translation.meta_description = meta.clone();
        }
        if let Some(read_time) = &self.read_time {
            translation.read_time = read_time.clone();
        }
    }
}

/// Partial update of a post. Translations are patched per language and per
/// field; a supplied category list replaces the whole set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostUpdate {
    pub slug: Option<String>,
    pub image: Option<String>,
    pub author: Option<String>,
    pub es: Option<TranslationUpdate>,
    pub en: Option<TranslationUpdate>,
    pub categories: Option<Vec<String>>,
}

impl PostUpdate {
    pub fn translation(&self, language: Language) -> Option<&TranslationUpdate> {
        match language {
            Language::Es => self.es.as_ref(),
            Language::En => self.en.as_ref(),
        }
    }

    pub fn blanks_any_title(&self) -> bool {
        Language::ALL
            .into_iter()
            .filter_map(|lang| self.translation(lang))
            .any(TranslationUpdate::blanks_title)
    }

    /// Apply the patch to an in-memory post (used by stores without SQL).
    pub fn apply(&self, post: &mut Post) {
        if let Some(slug) = &self.slug {
            post.slug = slug.clone();
        }
        if let Some(image) = &self.image {
            post.image = image.clone();
        }
        if let Some(author) = &self.author {
            post.author = author.clone();
        }
        for lang in Language::ALL {
            if let Some(patch) = self.translation(lang) {
                patch.apply(post.translations.get_mut(lang));
            }
        }
        if let Some(categories) = &self.categories {
            post.categories = categories.clone();
        }
    }
}

/// Post counts for the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostStats {
    pub published: u64,
    pub draft: u64,
    pub total: u64,
}
