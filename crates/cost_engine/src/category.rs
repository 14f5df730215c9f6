//! Expense categories and their OPEX/CAPEX classification.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{EngineError, util::normalize_category_key};

/// Closed set of one-time expense categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum ExpenseCategory {
    Vaccines,
    Feed,
    Veterinary,
    Maintenance,
    Equipment,
    BuildingFitout,
    HeavyEquipment,
    BreedingStockPurchase,
    Other,
}

impl ExpenseCategory {
    /// Every category, in declaration order.
    pub const ALL: [ExpenseCategory; 9] = [
        ExpenseCategory::Vaccines,
        ExpenseCategory::Feed,
        ExpenseCategory::Veterinary,
        ExpenseCategory::Maintenance,
        ExpenseCategory::Equipment,
        ExpenseCategory::BuildingFitout,
        ExpenseCategory::HeavyEquipment,
        ExpenseCategory::BreedingStockPurchase,
        ExpenseCategory::Other,
    ];

    /// Canonical snake_case code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            ExpenseCategory::Vaccines => "vaccines",
            ExpenseCategory::Feed => "feed",
            ExpenseCategory::Veterinary => "veterinary",
            ExpenseCategory::Maintenance => "maintenance",
            ExpenseCategory::Equipment => "equipment",
            ExpenseCategory::BuildingFitout => "building_fitout",
            ExpenseCategory::HeavyEquipment => "heavy_equipment",
            ExpenseCategory::BreedingStockPurchase => "breeding_stock_purchase",
            ExpenseCategory::Other => "other",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ExpenseCategory {
    type Err = EngineError;

    /// Parses a canonical code or one of the historical French names, ignoring
    /// case, accents and `-`/space separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let category = match normalize_category_key(s).as_str() {
            "vaccines" | "vaccins" | "vaccin" => ExpenseCategory::Vaccines,
            "feed" | "alimentation" | "aliment" => ExpenseCategory::Feed,
            "veterinary" | "veterinaire" => ExpenseCategory::Veterinary,
            "maintenance" | "entretien" => ExpenseCategory::Maintenance,
            "equipment" | "equipement" => ExpenseCategory::Equipment,
            "building_fitout" | "amenagement_batiment" => ExpenseCategory::BuildingFitout,
            "heavy_equipment" | "equipement_lourd" => ExpenseCategory::HeavyEquipment,
            "breeding_stock_purchase" | "achat_sujet" => ExpenseCategory::BreedingStockPurchase,
            "other" | "autre" => ExpenseCategory::Other,
            _ => return Err(EngineError::UnknownCategory(s.trim().to_string())),
        };
        Ok(category)
    }
}

impl TryFrom<String> for ExpenseCategory {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Accounting class of an expense.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExpenseClass {
    /// Operating expense, recognized entirely in the period it occurs.
    Opex,
    /// Capital expense, spread over the amortization window.
    Capex,
}

/// Category → class lookup used by the engine.
///
/// Implementations must be total over [`ExpenseCategory`].
pub trait Classify {
    fn classify(&self, category: ExpenseCategory) -> ExpenseClass;

    fn is_capital(&self, category: ExpenseCategory) -> bool {
        self.classify(category) == ExpenseClass::Capex
    }
}

impl<T: Classify + ?Sized> Classify for &T {
    fn classify(&self, category: ExpenseCategory) -> ExpenseClass {
        (**self).classify(category)
    }
}

/// The shipped classification: buildings, heavy equipment and breeding stock
/// are capital; everything else is operating.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StandardClassification;

impl Classify for StandardClassification {
    fn classify(&self, category: ExpenseCategory) -> ExpenseClass {
        match category {
            ExpenseCategory::BuildingFitout
            | ExpenseCategory::HeavyEquipment
            | ExpenseCategory::BreedingStockPurchase => ExpenseClass::Capex,
            ExpenseCategory::Vaccines
            | ExpenseCategory::Feed
            | ExpenseCategory::Veterinary
            | ExpenseCategory::Maintenance
            | ExpenseCategory::Equipment
            | ExpenseCategory::Other => ExpenseClass::Opex,
        }
    }
}

/// A complete, editable classification.
///
/// Starts from [`StandardClassification`]; individual categories can then be
/// reassigned, e.g. from project configuration.
///
/// ```rust
/// use cost_engine::{ClassificationTable, Classify, ExpenseCategory, ExpenseClass};
///
/// let table = ClassificationTable::standard()
///     .with(ExpenseCategory::Equipment, ExpenseClass::Capex);
/// assert!(table.is_capital(ExpenseCategory::Equipment));
/// assert!(!table.is_capital(ExpenseCategory::Feed));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassificationTable {
    classes: [ExpenseClass; ExpenseCategory::ALL.len()],
}

impl ClassificationTable {
    #[must_use]
    pub fn standard() -> Self {
        Self::from_classifier(&StandardClassification)
    }

    /// Snapshot any classifier into a table.
    #[must_use]
    pub fn from_classifier(classifier: &impl Classify) -> Self {
        Self {
            classes: ExpenseCategory::ALL.map(|category| classifier.classify(category)),
        }
    }

    #[must_use]
    pub fn with(mut self, category: ExpenseCategory, class: ExpenseClass) -> Self {
        self.set(category, class);
        self
    }

    pub fn set(&mut self, category: ExpenseCategory, class: ExpenseClass) {
        self.classes[category.index()] = class;
    }

    /// Categories currently classified as `class`, in declaration order.
    pub fn categories(&self, class: ExpenseClass) -> impl Iterator<Item = ExpenseCategory> + '_ {
        ExpenseCategory::ALL
            .into_iter()
            .filter(move |category| self.classify(*category) == class)
    }
}

impl Default for ClassificationTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl Classify for ClassificationTable {
    fn classify(&self, category: ExpenseCategory) -> ExpenseClass {
        self.classes[category.index()]
    }
}
