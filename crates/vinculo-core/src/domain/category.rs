use serde::{Deserialize, Serialize};

use super::post::Language;

/// Per-language display name of a category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNames {
    pub es: String,
    pub en: String,
}

/// Category - fixed reference data seeded with the schema.
///
/// Posts reference categories by `id` only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub color: String,
    pub name: CategoryNames,
}

impl Category {
    pub fn new(id: &str, color: &str, es: &str, en: &str) -> Self {
        Self {
            id: id.to_string(),
            color: color.to_string(),
            name: CategoryNames {
                es: es.to_string(),
                en: en.to_string(),
            },
        }
    }

    pub fn name(&self, language: Language) -> &str {
        match language {
            Language::Es => &self.name.es,
            Language::En => &self.name.en,
        }
    }
}

/// The categories every store is seeded with.
pub fn seed_categories() -> Vec<Category> {
    vec![
        Category::new("crianza", "coral", "Crianza", "Parenting"),
        Category::new("familia", "sage", "Familia", "Family"),
        Category::new("eneagrama", "lavender", "Eneagrama", "Enneagram"),
        Category::new(
            "desarrollo-personal",
            "gold",
            "Desarrollo personal",
            "Personal growth",
        ),
        Category::new("relaciones", "rose", "Relaciones", "Relationships"),
    ]
}
