//! Brand dataset loading, sorted insertion, and full rewrite.
//!
//! Existing entries keep every field they carry; only the title is
//! interpreted, for collision checks and ordering.
use crate::record::BrandRecord;
use crate::staging::write_atomic;
use crate::util::collate_titles;
use crate::validate::TitleIndex;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// A dataset entry, with its title lifted out and the rest kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredBrand {
    pub title: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl StoredBrand {
    pub fn from_record(record: &BrandRecord) -> Result<Self> {
        let value = serde_json::to_value(record).context("serialize brand record")?;
        serde_json::from_value(value).context("convert brand record to dataset entry")
    }
}

/// The whole dataset document: the brand list plus any other top-level keys.
#[derive(Debug, Clone)]
pub struct DataFile {
    list_key: String,
    brands: Vec<StoredBrand>,
    document: Map<String, Value>,
}

impl DataFile {
    pub fn from_value(value: Value, list_key: &str) -> Result<Self> {
        let Value::Object(mut document) = value else {
            return Err(anyhow!("dataset root must be a JSON object"));
        };
        let list = document
            .get_mut(list_key)
            .ok_or_else(|| anyhow!("dataset has no {list_key:?} list"))?
            .take();
        let brands: Vec<StoredBrand> = serde_json::from_value(list)
            .with_context(|| format!("parse {list_key:?} entries"))?;
        Ok(DataFile {
            list_key: list_key.to_string(),
            brands,
            document,
        })
    }

    pub fn brands(&self) -> &[StoredBrand] {
        &self.brands
    }

    pub fn title_index(&self) -> TitleIndex {
        TitleIndex::new(self.brands.iter().map(|brand| brand.title.as_str()))
    }

    /// Add one brand and restore title order.
    pub fn insert_sorted(&mut self, record: &BrandRecord) -> Result<()> {
        self.brands.push(StoredBrand::from_record(record)?);
        self.brands.sort_by(|a, b| collate_titles(&a.title, &b.title));
        Ok(())
    }

    pub fn to_value(&self) -> Result<Value> {
        let mut document = self.document.clone();
        let brands = serde_json::to_value(&self.brands).context("serialize dataset entries")?;
        document.insert(self.list_key.clone(), brands);
        Ok(Value::Object(document))
    }

    /// Render the document with four-space indentation and a trailing newline.
    pub fn to_pretty_bytes(&self) -> Result<Vec<u8>> {
        let value = self.to_value()?;
        let mut bytes = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut bytes, formatter);
        value
            .serialize(&mut serializer)
            .context("serialize dataset")?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}

pub fn load_dataset(path: &Path, list_key: &str) -> Result<DataFile> {
    let bytes = fs::read(path).with_context(|| format!("read dataset {}", path.display()))?;
    let value: Value = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse dataset JSON {}", path.display()))?;
    let data = DataFile::from_value(value, list_key)
        .with_context(|| format!("load dataset {}", path.display()))?;
    tracing::info!(path = %path.display(), brands = data.brands().len(), "loaded dataset");
    Ok(data)
}

pub fn write_dataset(path: &Path, data: &DataFile) -> Result<()> {
    let bytes = data.to_pretty_bytes()?;
    write_atomic(path, &bytes)?;
    tracing::info!(path = %path.display(), brands = data.brands().len(), "wrote dataset");
    Ok(())
}
