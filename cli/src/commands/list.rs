use anyhow::{Context, Result};
use serde::Serialize;
use std::process;

use calopal_core::FoodLogService;
use calopal_core::models::{FoodItem, FoodLogSummary};

use super::helpers::{confirm, print_item_table};

#[derive(Serialize)]
struct ItemList {
    items: Vec<FoodItem>,
    total_calories: i64,
}

pub(crate) async fn cmd_list(svc: &FoodLogService, json: bool) -> Result<()> {
    let items = svc.get_all_items().await.context("Failed to load items")?;
    let total_calories = svc.get_total_calories().await?;

    if json {
        println!("{}", list_json(items, total_calories)?);
        return Ok(());
    }

    if items.is_empty() {
        eprintln!("No items logged");
        process::exit(2);
    }

    print_item_table(&items);
    println!("\n{}", total_line(items.len(), total_calories));
    Ok(())
}

fn list_json(items: Vec<FoodItem>, total_calories: i64) -> Result<String> {
    let list = ItemList {
        items,
        total_calories,
    };
    Ok(serde_json::to_string_pretty(&list)?)
}

fn total_line(count: usize, total_calories: i64) -> String {
    format!("Total: {total_calories} kcal across {count} item(s)")
}

fn summary_line(summary: &FoodLogSummary) -> String {
    let total = summary.total_calories;
    let count = summary.item_count;
    format!("{total} kcal ({count} item(s))")
}

pub(crate) async fn cmd_total(svc: &FoodLogService, json: bool) -> Result<()> {
    let summary = svc
        .get_summary()
        .await
        .context("Failed to compute total")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", summary_line(&summary));
    }
    Ok(())
}

pub(crate) async fn cmd_clear(svc: &FoodLogService, yes: bool, json: bool) -> Result<()> {
    if !yes && !confirm("Delete ALL logged items?")? {
        eprintln!("Aborted");
        process::exit(2);
    }

    let removed = svc
        .delete_all_items()
        .await
        .context("Failed to clear items")?;

    if json {
        println!("{}", serde_json::json!({ "deleted": removed }));
    } else {
        println!("Deleted {removed} item(s)");
    }
    Ok(())
}
