//! CLI argument parsing for the add-brand session.
//!
//! Invoked bare, the tool runs the interactive prompts against the default
//! dataset and schema locations; flags only relocate inputs or tune output.
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;

pub const DEFAULT_DATA_PATH: &str = "_data/simple-icons.json";
pub const DEFAULT_SCHEMA_PATH: &str = ".jsonschema.json";
pub const DEFAULT_LIST_KEY: &str = "icons";
/// Alias categories offered when none are configured.
pub const DEFAULT_ALIAS_CATEGORIES: &[&str] = &["aka", "old"];

#[derive(Parser, Debug)]
#[command(
    name = "brand-add",
    version,
    about = "Interactively add a brand entry to the brand dataset",
    after_help = "Prompts for title, color, source, and optional guidelines, license and aliases,\nthen rewrites the dataset sorted by title after confirmation.\n\nExamples:\n  brand-add\n  brand-add --data _data/simple-icons.json --schema .jsonschema.json\n  brand-add --alias-category aka --alias-category loc"
)]
pub struct RootArgs {
    /// Dataset JSON document to extend
    #[arg(long, value_name = "PATH", default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// JSON Schema declaring license types and alias categories
    #[arg(long, value_name = "PATH", default_value = DEFAULT_SCHEMA_PATH)]
    pub schema: PathBuf,

    /// Top-level key holding the brand list
    #[arg(long, value_name = "KEY", default_value = DEFAULT_LIST_KEY)]
    pub list_key: String,

    /// Alias category to offer (repeatable; defaults to aka and old)
    #[arg(long = "alias-category", value_name = "KEY")]
    pub alias_categories: Vec<String>,

    /// Disable colored previews
    #[arg(long)]
    pub no_color: bool,

    /// Emit debug logs to stderr
    #[arg(long)]
    pub verbose: bool,
}

/// Resolved configuration for one session.
#[derive(Debug, Clone)]
pub struct Settings {
    pub data_path: PathBuf,
    pub schema_path: PathBuf,
    pub list_key: String,
    pub alias_categories: Vec<String>,
    pub color: bool,
}

impl Settings {
    pub fn from_args(args: RootArgs) -> Self {
        let alias_categories = if args.alias_categories.is_empty() {
            DEFAULT_ALIAS_CATEGORIES
                .iter()
                .map(|key| key.to_string())
                .collect()
        } else {
            args.alias_categories
        };
        let color = !args.no_color
            && std::env::var_os("NO_COLOR").is_none()
            && std::io::stdout().is_terminal();
        Settings {
            data_path: args.data,
            schema_path: args.schema,
            list_key: args.list_key,
            alias_categories,
            color,
        }
    }
}
