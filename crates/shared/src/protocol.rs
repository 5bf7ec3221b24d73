use serde::{Deserialize, Serialize};

use crate::domain::{Product, SectionMetadata};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeaturedProductsResponse {
    #[serde(default)]
    pub products: Vec<Product>,
}

/// Category listing. `section` is absent when the slug matched nothing;
/// the backend still answers 200 with an empty product list in that case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryProductsResponse {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub section: Option<SectionMetadata>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CategoryInfo;

    #[test]
    fn category_response_tolerates_extra_backend_fields() {
        let raw = r#"{
            "products": [
                { "id": 4, "title": "Face Wash", "price": 249.0, "slug": "face-wash", "stock": 3 }
            ],
            "total": 1,
            "pages": 1,
            "current_page": 1,
            "section": { "name": "Personal Care", "description": null, "slug": "personal-care" }
        }"#;
        let decoded: CategoryProductsResponse = serde_json::from_str(raw).expect("decode");
        assert_eq!(decoded.products.len(), 1);
        assert_eq!(decoded.products[0].id.0, 4);
        // images was absent entirely and defaults to empty.
        assert!(decoded.products[0].images.is_empty());
        assert_eq!(decoded.section.expect("section").slug, "personal-care");
    }

    #[test]
    fn missing_section_decodes_as_none() {
        let raw = r#"{ "products": [], "total": 0, "pages": 0, "section": null }"#;
        let decoded: CategoryProductsResponse = serde_json::from_str(raw).expect("decode");
        assert!(decoded.products.is_empty());
        assert!(decoded.section.is_none());
    }

    #[test]
    fn category_info_falls_back_when_description_is_absent() {
        let info: CategoryInfo = SectionMetadata {
            name: "Household Cleaning".into(),
            description: None,
            slug: "household-cleaning".into(),
        }
        .into();
        assert_eq!(info.name, "Household Cleaning");
        assert_eq!(info.description, "Browse our products");

        assert_eq!(CategoryInfo::default().name, "Products");
        assert_eq!(CategoryInfo::default().description, "Browse our products");
    }
}