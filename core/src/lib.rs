pub mod db;
pub mod error;
pub mod models;
pub mod service;

pub use error::{Result, StoreError};
pub use models::{FoodItem, FoodLogSummary, NewFoodItem};
pub use service::{FoodLogService, StoreLocation};
