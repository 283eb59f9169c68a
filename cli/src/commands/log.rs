use anyhow::{Context, Result};

use calopal_core::FoodLogService;

use super::helpers::{parse_calories, parse_name};

pub(crate) async fn cmd_add(
    svc: &FoodLogService,
    name: &str,
    calories: &str,
    json: bool,
) -> Result<()> {
    let name = parse_name(name)?;
    let calories = parse_calories(calories)?;

    let id = svc
        .add_item(&name, calories)
        .await
        .context("Failed to add item")?;
    // Re-read so the output reflects what the store assigned.
    let item = svc
        .get_item_by_id(id)
        .await?
        .with_context(|| format!("Item {id} vanished after insert"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&item)?);
    } else {
        let name = &item.name;
        let cal = item.calories;
        println!("Added: {name} — {cal} kcal (id {id})");
    }

    Ok(())
}
