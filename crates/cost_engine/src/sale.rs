//! The module contains the representation of a livestock sale.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::money::is_usable;

/// A sale of animals: revenue and, when weighed, the kilograms sold.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: String,
    pub amount: f64,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    pub date: NaiveDate,
}

impl Sale {
    pub fn new(id: impl Into<String>, amount: f64, weight_kg: Option<f64>, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            amount,
            weight_kg,
            date,
        }
    }

    /// Weight counted towards the quantity sold. A missing, negative or
    /// non-finite weight counts as 0.
    #[must_use]
    pub fn counted_weight(&self) -> f64 {
        match self.weight_kg {
            Some(weight) if is_usable(weight) => weight,
            Some(weight) => {
                tracing::warn!("ignoring invalid weight {weight} on sale {}", self.id);
                0.0
            }
            None => 0.0,
        }
    }
}
