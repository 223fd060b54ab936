//! Canonical brand record and its construction from completed answers.
use crate::util::normalize_hex;
use crate::workflow::Answers;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One dataset entry as written by this tool.
///
/// Optional parts are omitted from the JSON entirely when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandRecord {
    pub title: String,
    pub hex: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guidelines: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliases: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    #[serde(rename = "type")]
    pub license_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Shape a completed answer set into a record.
///
/// Gate flags decide which optional parts exist; an alias category is kept
/// only when it was selected and its list is non-empty.
pub fn build_record(answers: &Answers) -> Result<BrandRecord> {
    let mut record = BrandRecord {
        title: required(&answers.title, "title")?.to_string(),
        hex: normalize_hex(required(&answers.hex, "hex")?),
        source: required(&answers.source, "source")?.to_string(),
        guidelines: None,
        license: None,
        aliases: None,
    };

    if answers.has_guidelines {
        record.guidelines = Some(required(&answers.guidelines, "guidelines")?.to_string());
    }

    if answers.has_license {
        let license_type = required(&answers.license_type, "license type")?;
        let url = answers
            .license_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_string);
        record.license = Some(License {
            license_type: license_type.to_string(),
            url,
        });
    }

    if answers.has_aliases {
        let mut aliases = Map::new();
        for key in &answers.alias_categories {
            let Some(list) = answers.alias_lists.get(key) else {
                continue;
            };
            if list.is_empty() {
                continue;
            }
            aliases.insert(key.clone(), Value::from(list.clone()));
        }
        if !aliases.is_empty() {
            record.aliases = Some(aliases);
        }
    }

    Ok(record)
}

fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| anyhow!("answer set is missing {field}"))
}
