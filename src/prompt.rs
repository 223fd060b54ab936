//! Line-oriented interactive prompts.
//!
//! The orchestrator talks to a `Prompter`; the terminal implementation reads
//! one line per answer so sessions can also be driven from a pipe.
use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use std::io::{BufRead, Write};

/// A selectable entry for `Prompter::multi_select`.
#[derive(Debug, Clone, Copy)]
pub struct Choice<'a> {
    pub name: &'a str,
    pub description: &'a str,
}

pub trait Prompter {
    /// Free-text answer, without the line terminator.
    fn input(&mut self, message: &str) -> Result<String>;
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool>;
    /// Pick exactly one of `choices`, narrowing by typed text.
    fn search_select(&mut self, message: &str, choices: &[String]) -> Result<String>;
    /// Indices of the picked choices, in choice order.
    fn multi_select(&mut self, message: &str, choices: &[Choice<'_>]) -> Result<Vec<usize>>;
    fn warn(&mut self, reason: &str) -> Result<()>;
    fn show(&mut self, text: &str) -> Result<()>;
}

pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        LinePrompter { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    fn ask(&mut self, message: &str, hint: &str) -> Result<String> {
        if hint.is_empty() {
            write!(self.output, "{} {} ", "?".green().bold(), message.bold())?;
        } else {
            write!(
                self.output,
                "{} {} {} ",
                "?".green().bold(),
                message.bold(),
                hint.dimmed()
            )?;
        }
        self.output.flush().context("flush prompt")?;
        self.read_line()
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line).context("read answer")?;
        if read == 0 {
            return Err(anyhow!("input ended before the record was confirmed"));
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }

    fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{line}").context("write prompt output")
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn input(&mut self, message: &str) -> Result<String> {
        self.ask(message, "")
    }

    fn confirm(&mut self, message: &str, default: bool) -> Result<bool> {
        let hint = if default { "(Y/n)" } else { "(y/N)" };
        loop {
            let answer = self.ask(message, hint)?;
            match answer.trim().to_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.warn("Please answer y or n")?,
            }
        }
    }

    fn search_select(&mut self, message: &str, choices: &[String]) -> Result<String> {
        let mut listed: Vec<&String> = Vec::new();
        loop {
            let query = self.ask(message, "(type to filter)")?;
            let query = query.trim();

            if let Ok(number) = query.parse::<usize>() {
                if let Some(choice) = number.checked_sub(1).and_then(|idx| listed.get(idx)) {
                    return Ok((*choice).clone());
                }
            }

            let needle = query.to_lowercase();
            if let Some(exact) = choices
                .iter()
                .find(|choice| !needle.is_empty() && choice.to_lowercase() == needle)
            {
                return Ok(exact.clone());
            }

            let candidates: Vec<&String> = choices
                .iter()
                .filter(|choice| choice.to_lowercase().contains(&needle))
                .collect();
            match candidates.len() {
                0 => self.warn(&format!("Nothing matches {query:?}"))?,
                1 => return Ok(candidates[0].clone()),
                _ => {
                    for (idx, candidate) in candidates.iter().enumerate() {
                        self.say(&format!("  {:>3}) {candidate}", idx + 1))?;
                    }
                    let hint = "  Type more to narrow, or a number to pick".dimmed();
                    self.say(&hint.to_string())?;
                    listed = candidates;
                }
            }
        }
    }

    fn multi_select(&mut self, message: &str, choices: &[Choice<'_>]) -> Result<Vec<usize>> {
        loop {
            self.say(&format!("{} {}", "?".green().bold(), message.bold()))?;
            for (idx, choice) in choices.iter().enumerate() {
                self.say(&format!(
                    "  {:>3}) {} {}",
                    idx + 1,
                    choice.name,
                    choice.description.dimmed()
                ))?;
            }
            let answer = self.ask(
                "Select",
                "(numbers or keys, comma separated; blank for none)",
            )?;

            let mut picked = Vec::new();
            let mut unknown = None;
            for token in answer
                .split(|ch: char| ch == ',' || ch.is_whitespace())
                .filter(|token| !token.is_empty())
            {
                let by_number = token
                    .parse::<usize>()
                    .ok()
                    .and_then(|number| number.checked_sub(1))
                    .filter(|idx| *idx < choices.len());
                let by_name = || {
                    choices
                        .iter()
                        .position(|choice| choice.name.eq_ignore_ascii_case(token))
                };
                match by_number.or_else(by_name) {
                    Some(idx) => picked.push(idx),
                    None => {
                        unknown = Some(token.to_string());
                        break;
                    }
                }
            }

            if let Some(token) = unknown {
                self.warn(&format!("Unknown choice {token:?}"))?;
                continue;
            }
            picked.sort_unstable();
            picked.dedup();
            return Ok(picked);
        }
    }

    fn warn(&mut self, reason: &str) -> Result<()> {
        self.say(&format!("{} {}", ">>".red().bold(), reason.red()))
    }

    fn show(&mut self, text: &str) -> Result<()> {
        self.say(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn scripted(script: &str) -> LinePrompter<Cursor<Vec<u8>>, Vec<u8>> {
        LinePrompter::new(Cursor::new(script.as_bytes().to_vec()), Vec::new())
    }

    fn licenses() -> Vec<String> {
        ["MIT", "Apache-2.0", "CC0-1.0", "CC-BY-4.0"]
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn input_strips_line_terminators_only() {
        let mut prompter = scripted("  spaced title \r\n");
        assert_eq!(prompter.input("Title").expect("input"), "  spaced title ");
    }

    #[test]
    fn end_of_input_is_an_error() {
        let mut prompter = scripted("");
        let err = prompter.input("Title").expect_err("eof");
        assert!(err.to_string().contains("input ended"));
    }

    #[test]
    fn confirm_uses_default_and_reasks_on_noise() {
        let mut prompter = scripted("\nmaybe\nNO\nYes\n");
        assert!(!prompter.confirm("Aliases?", false).expect("default"));
        assert!(!prompter.confirm("Guidelines?", true).expect("after retry"));
        assert!(prompter.confirm("License?", false).expect("yes"));
        let output = String::from_utf8(prompter.into_output()).expect("utf8");
        assert!(output.contains("Please answer y or n"));
    }

    #[test]
    fn search_select_narrows_by_substring() {
        let mut prompter = scripted("cc\nby\n");
        assert_eq!(
            prompter.search_select("License", &licenses()).expect("select"),
            "CC-BY-4.0"
        );
        let output = String::from_utf8(prompter.into_output()).expect("utf8");
        assert!(output.contains("CC0-1.0"));
    }

    #[test]
    fn search_select_prefers_exact_match_and_numbers() {
        let mut prompter = scripted("mit\n");
        assert_eq!(
            prompter.search_select("License", &licenses()).expect("exact"),
            "MIT"
        );

        let mut prompter = scripted("cc\n2\n");
        assert_eq!(
            prompter.search_select("License", &licenses()).expect("number"),
            "CC-BY-4.0"
        );
    }

    #[test]
    fn search_select_never_returns_unlisted_values() {
        let mut prompter = scripted("GPL\nApache\n");
        assert_eq!(
            prompter.search_select("License", &licenses()).expect("select"),
            "Apache-2.0"
        );
        let output = String::from_utf8(prompter.into_output()).expect("utf8");
        assert!(output.contains("Nothing matches"));
    }

    #[test]
    fn multi_select_accepts_numbers_and_keys() {
        let choices = [
            Choice {
                name: "aka",
                description: "Also known as",
            },
            Choice {
                name: "old",
                description: "Previously named",
            },
        ];
        let mut prompter = scripted("OLD, 1, old\n");
        assert_eq!(
            prompter.multi_select("Categories", &choices).expect("select"),
            vec![0, 1]
        );

        let mut prompter = scripted("\n");
        assert!(prompter
            .multi_select("Categories", &choices)
            .expect("blank")
            .is_empty());

        let mut prompter = scripted("dup\n2\n");
        assert_eq!(
            prompter.multi_select("Categories", &choices).expect("retry"),
            vec![1]
        );
    }
}
