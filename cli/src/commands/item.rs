use anyhow::{Context, Result, bail};
use std::process;

use calopal_core::FoodLogService;
use calopal_core::models::FoodItem;

use super::helpers::{format_logged_at, json_error, parse_calories, parse_name};

fn exit_not_found(id: i64, json: bool) -> ! {
    if json {
        println!("{}", json_error(&format!("Item {id} not found")));
    } else {
        eprintln!("Item {id} not found");
    }
    process::exit(2);
}

fn item_line(item: &FoodItem) -> String {
    let id = item.id;
    let name = &item.name;
    let cal = item.calories;
    let logged = format_logged_at(item);
    format!("[{id}] {name} — {cal} kcal (logged {logged})")
}

pub(crate) async fn cmd_show(svc: &FoodLogService, id: i64, json: bool) -> Result<()> {
    let Some(item) = svc.get_item_by_id(id).await? else {
        exit_not_found(id, json);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&item)?);
    } else {
        println!("{}", item_line(&item));
    }
    Ok(())
}

pub(crate) async fn cmd_update(
    svc: &FoodLogService,
    id: i64,
    name: Option<&str>,
    calories: Option<&str>,
    json: bool,
) -> Result<()> {
    if name.is_none() && calories.is_none() {
        bail!("Nothing to update. Provide at least one of --name or --calories");
    }

    let name = name.map(parse_name).transpose()?;
    let calories = calories.map(parse_calories).transpose()?;

    let Some(current) = svc.get_item_by_id(id).await? else {
        exit_not_found(id, json);
    };
    let name = name.unwrap_or(current.name);
    let calories = calories.unwrap_or(current.calories);

    if !svc
        .update_item(id, &name, calories)
        .await
        .context("Failed to update item")?
    {
        // Deleted between the read and the write.
        exit_not_found(id, json);
    }

    let item = svc
        .get_item_by_id(id)
        .await?
        .with_context(|| format!("Item {id} vanished after update"))?;
    if json {
        println!("{}", serde_json::to_string_pretty(&item)?);
    } else {
        println!("Updated: {}", item_line(&item));
    }
    Ok(())
}

pub(crate) async fn cmd_delete(svc: &FoodLogService, id: i64, json: bool) -> Result<()> {
    if svc
        .delete_item(id)
        .await
        .context("Failed to delete item")?
    {
        if json {
            println!("{}", serde_json::json!({ "deleted": id }));
        } else {
            println!("Deleted item {id}");
        }
        Ok(())
    } else {
        exit_not_found(id, json);
    }
}
