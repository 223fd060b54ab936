//! Cosmetic terminal rendering for previews.
//!
//! Nothing here feeds back into validation; with color disabled every helper
//! degrades to plain text.
use crate::record::BrandRecord;
use crate::util::relative_luminance;
use anyhow::{Context, Result};
use colored::Colorize;

/// Luminance above which black text reads better than white.
const LIGHT_BACKGROUND_LUMINANCE: f64 = 0.4;

pub fn configure(color: bool) {
    if !color {
        colored::control::set_override(false);
    }
}

/// Show a normalized color as a swatch with contrasting text.
pub fn hex_preview(hex: &str) -> String {
    let label = format!(" #{hex} ");
    let Some(luminance) = relative_luminance(hex) else {
        return label;
    };
    let channel = |idx: usize| u8::from_str_radix(&hex[idx * 2..idx * 2 + 2], 16).unwrap_or(0);
    let (r, g, b) = (channel(0), channel(1), channel(2));
    let swatch = label.on_truecolor(r, g, b);
    if luminance > LIGHT_BACKGROUND_LUMINANCE {
        swatch.black().to_string()
    } else {
        swatch.white().to_string()
    }
}

pub fn alias_preview(aliases: &[String]) -> String {
    aliases
        .iter()
        .map(|alias| format!("[{alias}]").cyan().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Pretty JSON of the record about to be written.
pub fn record_preview(record: &BrandRecord) -> Result<String> {
    let json = serde_json::to_string_pretty(record).context("render record preview")?;
    Ok(format!("{}\n{json}", "About to add:".bold()))
}
