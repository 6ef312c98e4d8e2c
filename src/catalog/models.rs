//! Data models for the dismantling catalog

use serde::{Deserialize, Serialize};

use super::loader::CatalogError;

/// How a subcategory of equipment is taken apart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DismantlingConfig {
    /// Sub-units to separate, in dismantling order
    #[serde(default)]
    pub subassemblies: Vec<String>,
    #[serde(default)]
    pub valuable_materials: Vec<String>,
    #[serde(default)]
    pub hazardous_materials: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

impl DismantlingConfig {
    pub fn has_hazardous_materials(&self) -> bool {
        !self.hazardous_materials.is_empty()
    }
}

/// Catalog subcategory; only subcategories with a config are matchable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategory {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dismantling_config: Option<DismantlingConfig>,
}

/// Top-level catalog category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub label: String,
    #[serde(default, alias = "subCategories")]
    pub subcategories: Vec<SubCategory>,
}

/// Ordered, read-only catalog of categories
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DismantlingCatalog {
    categories: Vec<Category>,
}

impl DismantlingCatalog {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Catalog with no categories; every match against it fails
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a catalog from its JSON resource form (`Category[]`)
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let categories: Vec<Category> = serde_json::from_str(text)?;
        Ok(Self { categories })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Subcategories carrying a config, in category then subcategory order
    pub fn configured_subcategories(
        &self,
    ) -> impl Iterator<Item = (&Category, &SubCategory, &DismantlingConfig)> {
        self.categories.iter().flat_map(|category| {
            category.subcategories.iter().filter_map(move |sub| {
                sub.dismantling_config
                    .as_ref()
                    .map(|config| (category, sub, config))
            })
        })
    }

    pub fn configured_count(&self) -> usize {
        self.configured_subcategories().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {
            "label": "Informatique",
            "subcategories": [
                {
                    "label": "Ordinateurs Portables",
                    "dismantlingConfig": {
                        "subassemblies": ["batterie", "ecran"],
                        "valuableMaterials": ["or"],
                        "hazardousMaterials": ["lithium"],
                        "notes": "Retirer la batterie en premier"
                    }
                },
                { "label": "Accessoires" }
            ]
        },
        { "label": "Mobilier", "subCategories": [] }
    ]"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = DismantlingCatalog::from_json(SAMPLE).unwrap();
        assert_eq!(catalog.category_count(), 2);
        assert_eq!(catalog.configured_count(), 1);

        let (category, sub, config) = catalog.configured_subcategories().next().unwrap();
        assert_eq!(category.label, "Informatique");
        assert_eq!(sub.label, "Ordinateurs Portables");
        assert_eq!(config.subassemblies, vec!["batterie", "ecran"]);
        assert!(config.has_hazardous_materials());
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let catalog = DismantlingCatalog::from_json(
            r#"[{"label": "A", "subcategories": [{"label": "B", "dismantlingConfig": {}}]}]"#,
        )
        .unwrap();
        let (_, _, config) = catalog.configured_subcategories().next().unwrap();
        assert!(config.valuable_materials.is_empty());
        assert!(config.notes.is_empty());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(DismantlingCatalog::from_json("{ not json").is_err());
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = DismantlingCatalog::empty();
        assert!(catalog.is_empty());
        assert_eq!(catalog.configured_count(), 0);
    }
}
