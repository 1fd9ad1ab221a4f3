//! Form-level checks run by the admin surface before any store or model call.

use super::generated::GenerationRequest;
use super::post::{Language, NewPost, Translations};
use super::slug::is_valid_slug;

/// Check a draft before saving. Returns every problem found.
pub fn validate_new_post(draft: &NewPost) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if !is_valid_slug(&draft.slug) {
        errors.push(format!(
            "slug '{}' must be lowercase letters, digits and single dashes",
            draft.slug
        ));
    }
    for lang in missing_titles(&draft.translations) {
        errors.push(format!("title ({}) is required", lang));
    }
    if draft.categories.is_empty() {
        errors.push("at least one category is required".to_string());
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Check a generation brief before calling the text model.
pub fn validate_generation_request(request: &GenerationRequest) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    if request.topic.trim().is_empty() {
        errors.push("topic is required".to_string());
    }
    if request.category.trim().is_empty() {
        errors.push("category is required".to_string());
    }
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Languages whose title is blank.
pub fn missing_titles(translations: &Translations) -> Vec<Language> {
    translations
        .iter()
        .filter(|(_, t)| !t.has_title())
        .map(|(lang, _)| lang)
        .collect()
}
