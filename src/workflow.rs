//! The add-brand session: gated prompts, confirmation, merge, and write.
//!
//! The session is an explicit state machine. A rejected answer re-enters the
//! same step with the reason shown and leaves `Answers` untouched; gates only
//! decide which step comes next.
use crate::cli::Settings;
use crate::dataset::{load_dataset, write_dataset};
use crate::output;
use crate::prompt::{Choice, LinePrompter, Prompter};
use crate::record::{build_record, BrandRecord};
use crate::schema::{load_catalog, SchemaCatalog};
use crate::util::normalize_hex;
use crate::validate::{
    validate_alias_list, validate_hex, validate_optional_url, validate_title, validate_url,
    TitleIndex, Verdict,
};
use anyhow::Result;
use std::collections::BTreeMap;
use std::io;
use std::process::ExitCode;

/// Accepted answers collected so far, one field per prompt outcome.
#[derive(Debug, Clone, Default)]
pub struct Answers {
    pub title: Option<String>,
    pub hex: Option<String>,
    pub source: Option<String>,
    pub has_guidelines: bool,
    pub guidelines: Option<String>,
    pub has_license: bool,
    pub license_type: Option<String>,
    pub license_url: Option<String>,
    pub has_aliases: bool,
    /// Selected category keys, in catalog order.
    pub alias_categories: Vec<String>,
    pub alias_lists: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Title,
    Hex,
    Source,
    AskGuidelines,
    Guidelines,
    AskLicense,
    LicenseType,
    LicenseUrl,
    AskAliases,
    SelectAliasCategories,
    /// List prompt for the n-th selected alias category.
    AliasList(usize),
    Confirm,
}

#[derive(Debug)]
pub enum Outcome {
    Confirmed(BrandRecord),
    Aborted,
}

/// Drive the prompt sequence until the maintainer confirms or declines.
pub fn run_session<P: Prompter>(
    prompter: &mut P,
    catalog: &SchemaCatalog,
    titles: &TitleIndex,
) -> Result<Outcome> {
    let mut answers = Answers::default();
    let mut step = Step::Title;
    loop {
        tracing::debug!(?step, "prompt");
        step = match step {
            Step::Title => match ask_validated(prompter, "Title", |input| {
                validate_title(input, titles)
            })? {
                Some(title) => {
                    answers.title = Some(title);
                    Step::Hex
                }
                None => Step::Title,
            },
            Step::Hex => match ask_validated(prompter, "Hex", validate_hex)? {
                Some(hex) => {
                    prompter.show(&format!("  {}", output::hex_preview(&normalize_hex(&hex))))?;
                    answers.hex = Some(hex);
                    Step::Source
                }
                None => Step::Hex,
            },
            Step::Source => match ask_validated(prompter, "Source URL", validate_url)? {
                Some(source) => {
                    answers.source = Some(source);
                    Step::AskGuidelines
                }
                None => Step::Source,
            },
            Step::AskGuidelines => {
                answers.has_guidelines = prompter.confirm("The brand has brand guidelines?", true)?;
                if answers.has_guidelines {
                    Step::Guidelines
                } else {
                    Step::AskLicense
                }
            }
            Step::Guidelines => {
                match ask_validated(prompter, "Brand guidelines URL", validate_url)? {
                    Some(url) => {
                        answers.guidelines = Some(url);
                        Step::AskLicense
                    }
                    None => Step::Guidelines,
                }
            }
            Step::AskLicense => {
                answers.has_license = prompter.confirm("The brand has a license?", true)?;
                if answers.has_license {
                    Step::LicenseType
                } else {
                    Step::AskAliases
                }
            }
            Step::LicenseType => {
                let license_type =
                    prompter.search_select("License type", &catalog.license_types)?;
                if catalog.license_types.contains(&license_type) {
                    answers.license_type = Some(license_type);
                    Step::LicenseUrl
                } else {
                    prompter.warn("Pick one of the listed license types")?;
                    Step::LicenseType
                }
            }
            Step::LicenseUrl => {
                match ask_validated(prompter, "License URL (optional)", validate_optional_url)? {
                    Some(url) => {
                        answers.license_url = url;
                        Step::AskAliases
                    }
                    None => Step::LicenseUrl,
                }
            }
            Step::AskAliases => {
                answers.has_aliases = prompter.confirm("This brand has aliases?", false)?;
                if answers.has_aliases {
                    Step::SelectAliasCategories
                } else {
                    Step::Confirm
                }
            }
            Step::SelectAliasCategories => {
                let choices: Vec<Choice<'_>> = catalog
                    .alias_categories
                    .iter()
                    .map(|category| Choice {
                        name: &category.key,
                        description: &category.description,
                    })
                    .collect();
                let picked = prompter.multi_select("What types of aliases?", &choices)?;
                answers.alias_categories = picked
                    .into_iter()
                    .filter_map(|idx| catalog.alias_categories.get(idx))
                    .map(|category| category.key.clone())
                    .collect();
                Step::AliasList(0)
            }
            Step::AliasList(idx) => match answers.alias_categories.get(idx).cloned() {
                None => Step::Confirm,
                Some(key) => {
                    let description = catalog
                        .alias_categories
                        .iter()
                        .find(|category| category.key == key)
                        .map(|category| category.description.as_str())
                        .unwrap_or_default();
                    let message = format!("{key} ({description}), separated by commas");
                    match ask_validated(prompter, &message, validate_alias_list)? {
                        Some(aliases) => {
                            prompter.show(&format!("  {}", output::alias_preview(&aliases)))?;
                            answers.alias_lists.insert(key, aliases);
                            Step::AliasList(idx + 1)
                        }
                        None => Step::AliasList(idx),
                    }
                }
            },
            Step::Confirm => {
                let record = build_record(&answers)?;
                prompter.show(&output::record_preview(&record)?)?;
                let outcome = if prompter.confirm("Is this OK?", true)? {
                    Outcome::Confirmed(record)
                } else {
                    Outcome::Aborted
                };
                let confirmed = matches!(outcome, Outcome::Confirmed(_));
                tracing::debug!(confirmed, "session finished");
                return Ok(outcome);
            }
        };
    }
}

/// Ask once; `None` means the answer was rejected and the reason was shown.
fn ask_validated<P, T, F>(prompter: &mut P, message: &str, validate: F) -> Result<Option<T>>
where
    P: Prompter,
    F: FnOnce(&str) -> Verdict<T>,
{
    let input = prompter.input(message)?;
    match validate(&input) {
        Ok(value) => Ok(Some(value)),
        Err(rejection) => {
            tracing::debug!(%rejection, "answer rejected");
            prompter.warn(&rejection.to_string())?;
            Ok(None)
        }
    }
}

/// Load inputs, run the terminal session, and persist on confirmation.
pub fn run_add(settings: &Settings) -> Result<ExitCode> {
    let catalog = load_catalog(&settings.schema_path, &settings.alias_categories)?;
    let mut data = load_dataset(&settings.data_path, &settings.list_key)?;
    let titles = data.title_index();

    let stdin = io::stdin();
    let mut prompter = LinePrompter::new(stdin.lock(), io::stdout());
    match run_session(&mut prompter, &catalog, &titles)? {
        Outcome::Confirmed(record) => {
            data.insert_sorted(&record)?;
            write_dataset(&settings.data_path, &data)?;
            prompter.show(&format!("Added {} to {}", record.title, settings.data_path.display()))?;
            Ok(ExitCode::SUCCESS)
        }
        Outcome::Aborted => {
            eprintln!("Aborted.");
            Ok(ExitCode::FAILURE)
        }
    }
}

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;
