mod client;
mod types;

pub use client::NutritionClient;
pub use types::{LookupError, Product};
