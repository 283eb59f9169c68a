use anyhow::{Context, Result, bail};
use chrono::Local;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use calopal_core::models::FoodItem;

/// Parse a food name typed by the user. Surrounding whitespace is dropped.
pub(crate) fn parse_name(s: &str) -> Result<String> {
    let name = s.trim();
    if name.is_empty() {
        bail!("Please enter a food name");
    }
    Ok(name.to_string())
}

/// Parse a calorie count typed by the user. Accepts "95" or "95kcal".
pub(crate) fn parse_calories(s: &str) -> Result<i64> {
    let trimmed = s.trim();
    let trimmed = trimmed.strip_suffix("kcal").unwrap_or(trimmed).trim();
    let value: i64 = trimmed.parse().with_context(|| {
        format!("Invalid calories: '{s}'. Use a whole number like '95' or '95kcal'")
    })?;
    if value < 0 {
        bail!("Calories must not be negative");
    }
    Ok(value)
}

/// Ask the user for a yes/no answer on stderr. Anything but y/yes is a no.
pub(crate) fn confirm(prompt: &str) -> Result<bool> {
    eprint!("{prompt} [y/N]: ");
    io::stderr().flush()?;
    let stdin = io::stdin();
    let line = match stdin.lock().lines().next() {
        Some(line) => line?,
        None => return Ok(false),
    };
    Ok(is_yes(&line))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

pub(crate) fn format_logged_at(item: &FoodItem) -> String {
    item.created_at
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

pub(crate) fn print_item_table(items: &[FoodItem]) {
    #[derive(Tabled)]
    struct ItemRow {
        #[tabled(rename = "ID")]
        id: i64,
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "Calories")]
        calories: i64,
        #[tabled(rename = "Logged")]
        logged: String,
    }

    let rows: Vec<ItemRow> = items
        .iter()
        .map(|item| ItemRow {
            id: item.id,
            name: truncate(&item.name, 40),
            calories: item.calories,
            logged: format_logged_at(item),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::single(2)).with(Alignment::right()))
        .to_string();
    println!("{table}");
}

pub(crate) fn json_error(message: &str) -> String {
    #[derive(Serialize)]
    struct CliError<'a> {
        error: &'a str,
    }
    serde_json::to_string(&CliError { error: message })
        .unwrap_or_else(|_| format!("{{\"error\":\"{message}\"}}"))
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let end = s
            .char_indices()
            .nth(max.saturating_sub(3))
            .map_or(s.len(), |(i, _)| i);
        format!("{}...", &s[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_name() {
        assert_eq!(parse_name("  Apple ").unwrap(), "Apple");
        assert!(parse_name("").is_err());
        assert!(parse_name("   ").is_err());
    }

    #[test]
    fn test_parse_calories() {
        assert_eq!(parse_calories("95").unwrap(), 95);
        assert_eq!(parse_calories(" 120 ").unwrap(), 120);
        assert_eq!(parse_calories("95kcal").unwrap(), 95);
        assert_eq!(parse_calories("95 kcal").unwrap(), 95);
        assert_eq!(parse_calories("0").unwrap(), 0);
    }

    #[test]
    fn test_parse_calories_invalid() {
        assert!(parse_calories("abc").is_err());
        assert!(parse_calories("").is_err());
        assert!(parse_calories("9.5").is_err());
    }

    #[test]
    fn test_parse_calories_negative() {
        assert!(parse_calories("-50").is_err());
    }

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y"));
        assert!(is_yes("YES\n"));
        assert!(!is_yes("n"));
        assert!(!is_yes(""));
    }

    #[test]
    fn test_json_error() {
        let out = json_error("Item 3 not found");
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["error"], "Item 3 not found");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world this is long", 10), "hello w...");
    }

    #[test]
    fn test_truncate_tiny_max() {
        assert_eq!(truncate("hello", 2), "...");
        assert_eq!(truncate("hello", 0), "...");
        assert_eq!(truncate("", 0), "");
    }

    #[test]
    fn test_truncate_utf8() {
        assert_eq!(truncate("Crème fraîche", 10), "Crème f...");
        assert_eq!(truncate("日清カップヌードル", 8), "日清カップ...");
    }
}
