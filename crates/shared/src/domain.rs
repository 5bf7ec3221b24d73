use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(ProductId);
id_newtype!(SectionId);

/// One catalog item as the backend returns it. The core only inspects
/// `id`, `title` and `price`; everything else rides along for the view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSummary {
    pub name: String,
    pub slug: String,
}

/// Section record attached to a category product fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionMetadata {
    pub name: String,
    pub description: Option<String>,
    pub slug: String,
}

/// What the view shows in the category banner. Falls back to a generic
/// record whenever the backend supplied no section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryInfo {
    pub name: String,
    pub description: String,
}

impl Default for CategoryInfo {
    fn default() -> Self {
        Self {
            name: "Products".into(),
            description: "Browse our products".into(),
        }
    }
}

impl From<SectionMetadata> for CategoryInfo {
    fn from(section: SectionMetadata) -> Self {
        Self {
            name: section.name,
            description: section
                .description
                .unwrap_or_else(|| "Browse our products".into()),
        }
    }
}
