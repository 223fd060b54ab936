//! Enumerations read from the dataset's JSON Schema.
//!
//! The schema document is traversed only here; the rest of the tool works
//! from the typed `SchemaCatalog` loaded once at startup.

use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

const DEFINITION_ROOTS: &[&str] = &["/definitions", "/$defs"];
const LICENSE_VARIANTS_PTR: &str = "/brand/properties/license/oneOf";
const ALIAS_PROPERTIES_PTR: &str = "/brand/properties/aliases/properties";

/// One alias classification offered to the maintainer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasCategory {
    pub key: String,
    pub description: String,
}

/// Allowed license types and offered alias categories, in schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaCatalog {
    pub license_types: Vec<String>,
    pub alias_categories: Vec<AliasCategory>,
}

/// Read and parse the schema document at `path`.
///
/// `offered_aliases` restricts (and orders) the alias categories; an empty
/// slice offers every category the schema declares.
pub fn load_catalog(path: &Path, offered_aliases: &[String]) -> Result<SchemaCatalog> {
    let bytes = fs::read(path).with_context(|| format!("read schema {}", path.display()))?;
    let document: Value = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse schema JSON {}", path.display()))?;
    let catalog = catalog_from_document(&document, offered_aliases)
        .with_context(|| format!("extract enumerations from {}", path.display()))?;
    tracing::info!(
        license_types = catalog.license_types.len(),
        alias_categories = catalog.alias_categories.len(),
        "loaded schema catalog"
    );
    Ok(catalog)
}

pub fn catalog_from_document(
    document: &Value,
    offered_aliases: &[String],
) -> Result<SchemaCatalog> {
    let definitions = DEFINITION_ROOTS
        .iter()
        .find_map(|ptr| document.pointer(ptr))
        .ok_or_else(|| anyhow!("schema has no definitions"))?;
    let license_types = license_types(definitions)?;
    let alias_categories = alias_categories(definitions, offered_aliases)?;
    Ok(SchemaCatalog {
        license_types,
        alias_categories,
    })
}

/// License tokens a maintainer may pick from a list.
///
/// Only `enum` variants count. A `const` variant (such as `custom`) carries
/// extra required fields and is never offered.
fn license_types(definitions: &Value) -> Result<Vec<String>> {
    let variants = definitions
        .pointer(LICENSE_VARIANTS_PTR)
        .and_then(Value::as_array)
        .ok_or_else(|| anyhow!("schema is missing brand license variants"))?;

    let mut types: Vec<String> = Vec::new();
    let tokens = variants
        .iter()
        .filter_map(|variant| variant.pointer("/properties/type/enum"))
        .filter_map(Value::as_array)
        .flatten()
        .filter_map(Value::as_str);
    for token in tokens {
        if !types.iter().any(|existing| existing == token) {
            types.push(token.to_string());
        }
    }
    if types.is_empty() {
        return Err(anyhow!("schema declares no enumerated license types"));
    }
    Ok(types)
}

fn alias_categories(definitions: &Value, offered: &[String]) -> Result<Vec<AliasCategory>> {
    let properties = definitions
        .pointer(ALIAS_PROPERTIES_PTR)
        .and_then(Value::as_object)
        .ok_or_else(|| anyhow!("schema is missing brand alias properties"))?;

    let describe = |key: &str, def: &Value| AliasCategory {
        key: key.to_string(),
        description: def
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    };

    let categories: Vec<AliasCategory> = if offered.is_empty() {
        properties
            .iter()
            .map(|(key, def)| describe(key, def))
            .collect()
    } else {
        offered
            .iter()
            .map(|key| {
                properties
                    .get(key)
                    .map(|def| describe(key, def))
                    .ok_or_else(|| {
                        anyhow!("alias category {key:?} is not declared by the schema")
                    })
            })
            .collect::<Result<Vec<_>>>()?
    };
    if categories.is_empty() {
        return Err(anyhow!("schema declares no alias categories"));
    }
    Ok(categories)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_schema() -> Value {
        json!({
            "definitions": {
                "brand": {
                    "properties": {
                        "license": {
                            "oneOf": [
                                {
                                    "properties": {
                                        "type": { "enum": ["MIT", "Apache-2.0", "CC0-1.0"] }
                                    }
                                },
                                {
                                    "properties": {
                                        "type": { "const": "custom" },
                                        "url": { "$ref": "#/definitions/url" }
                                    }
                                }
                            ]
                        },
                        "aliases": {
                            "properties": {
                                "aka": { "description": "Also known as" },
                                "dup": { "description": "Duplicate with a different color" },
                                "old": { "description": "Previously named" }
                            }
                        }
                    }
                }
            }
        })
    }

    #[test]
    fn offers_enumerated_license_types_in_order() {
        let catalog = catalog_from_document(&sample_schema(), &[]).expect("catalog");
        assert_eq!(catalog.license_types, vec!["MIT", "Apache-2.0", "CC0-1.0"]);
        assert!(!catalog.license_types.iter().any(|token| token == "custom"));
    }

    #[test]
    fn const_only_license_variants_are_not_enough() {
        let schema = json!({
            "definitions": {
                "brand": {
                    "properties": {
                        "license": {
                            "oneOf": [
                                { "properties": { "type": { "const": "custom" } } }
                            ]
                        },
                        "aliases": { "properties": { "aka": {} } }
                    }
                }
            }
        });
        let err = catalog_from_document(&schema, &[]).expect_err("no enum");
        assert!(err.to_string().contains("license"));
    }

    #[test]
    fn offers_configured_alias_categories_in_configured_order() {
        let offered = vec!["old".to_string(), "aka".to_string()];
        let catalog = catalog_from_document(&sample_schema(), &offered).expect("catalog");
        let keys: Vec<&str> = catalog
            .alias_categories
            .iter()
            .map(|category| category.key.as_str())
            .collect();
        assert_eq!(keys, vec!["old", "aka"]);
        assert_eq!(catalog.alias_categories[0].description, "Previously named");
    }

    #[test]
    fn offers_every_alias_category_when_unconfigured() {
        let catalog = catalog_from_document(&sample_schema(), &[]).expect("catalog");
        assert_eq!(catalog.alias_categories.len(), 3);
        assert_eq!(catalog.alias_categories[1].key, "dup");
    }

    #[test]
    fn accepts_defs_root() {
        let mut schema = sample_schema();
        let defs = schema["definitions"].take();
        let schema = json!({ "$defs": defs });
        assert!(catalog_from_document(&schema, &[]).is_ok());
    }

    #[test]
    fn rejects_unknown_offered_category() {
        let offered = vec!["loc".to_string()];
        let err = catalog_from_document(&sample_schema(), &offered).expect_err("unknown key");
        assert!(err.to_string().contains("loc"));
    }

    #[test]
    fn rejects_schema_without_license_variants() {
        let schema = json!({ "definitions": { "brand": { "properties": {} } } });
        let err = catalog_from_document(&schema, &[]).expect_err("missing license");
        assert!(err.to_string().contains("license"));
    }

    #[test]
    fn load_catalog_reports_malformed_document() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("schema.json");
        std::fs::write(&path, "{ not json").expect("write schema");
        assert!(load_catalog(&path, &[]).is_err());
    }
}
