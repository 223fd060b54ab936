//! Shared fixtures for end-to-end tests of the `brand-add` binary.

use serde_json::{json, Value};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// A scratch directory holding a dataset and schema for one run.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp workspace");
        let workspace = Workspace { dir };
        workspace.write_json(&workspace.schema_path(), &schema());
        workspace.write_json(&workspace.data_path(), &dataset());
        workspace
    }

    pub fn data_path(&self) -> PathBuf {
        self.dir.path().join("_data/simple-icons.json")
    }

    pub fn schema_path(&self) -> PathBuf {
        self.dir.path().join(".jsonschema.json")
    }

    pub fn write_json(&self, path: &std::path::Path, value: &Value) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent directory");
        }
        let text = serde_json::to_string_pretty(value).expect("serialize fixture");
        std::fs::write(path, text).expect("write fixture");
    }

    pub fn data_bytes(&self) -> Vec<u8> {
        std::fs::read(self.data_path()).expect("read dataset")
    }

    pub fn data_json(&self) -> Value {
        serde_json::from_slice(&self.data_bytes()).expect("parse dataset")
    }

    /// Run the binary from the workspace root with `lines` piped to stdin.
    pub fn run(&self, lines: &[&str]) -> Output {
        let mut child = Command::new(env!("CARGO_BIN_EXE_brand-add"))
            .current_dir(self.dir.path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("spawn brand-add");
        {
            let mut stdin = child.stdin.take().expect("child stdin");
            for line in lines {
                writeln!(stdin, "{line}").expect("write answer");
            }
        }
        child.wait_with_output().expect("wait for brand-add")
    }
}

pub fn schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "definitions": {
            "url": { "type": "string", "pattern": "^https://[^\\s]+$" },
            "brand": {
                "type": "object",
                "properties": {
                    "title": { "type": "string" },
                    "license": {
                        "oneOf": [
                            {
                                "properties": {
                                    "type": {
                                        "enum": ["MIT", "Apache-2.0", "CC0-1.0", "CC-BY-4.0"]
                                    }
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
                            "loc": { "description": "Localized title" },
                            "old": { "description": "Previously named" }
                        }
                    }
                }
            }
        }
    })
}

pub fn dataset() -> Value {
    json!({
        "icons": [
            { "title": "Alpha", "hex": "000000", "source": "https://alpha.example" },
            { "title": "GitHub", "hex": "181717", "source": "https://github.com/logos" },
            { "title": "Omega", "hex": "ABCDEF", "source": "https://omega.example",
              "aliases": { "loc": { "de-DE": "Omega DE" } } }
        ]
    })
}

pub fn titles(data: &Value) -> Vec<String> {
    data["icons"]
        .as_array()
        .expect("icons array")
        .iter()
        .map(|brand| brand["title"].as_str().expect("title").to_string())
        .collect()
}
