use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: i64,
    pub name: String,
    pub calories: i64,
    pub created_at: DateTime<Utc>,
}

/// Write payload for inserts and updates. Built through [`NewFoodItem::new`]
/// so the name is already trimmed and checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFoodItem {
    pub name: String,
    pub calories: i64,
}

impl NewFoodItem {
    pub fn new(name: &str, calories: i64) -> Result<Self> {
        let name = validate_item(name, calories)?;
        Ok(Self { name, calories })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodLogSummary {
    pub item_count: i64,
    pub total_calories: i64,
}

/// Validate a food item payload, returning the trimmed name.
pub fn validate_item(name: &str, calories: i64) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StoreError::Validation(
            "Food name must not be empty".to_string(),
        ));
    }
    if calories < 0 {
        return Err(StoreError::Validation(format!(
            "Calories must not be negative (got {calories})"
        )));
    }
    Ok(name.to_string())
}
