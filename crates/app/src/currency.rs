use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Currency the farm keeps its books in.
///
/// Only used to label reports: the engine is currency-agnostic and never
/// converts amounts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// West African CFA franc.
    #[default]
    Xof,
    Eur,
}

impl Currency {
    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Xof => "XOF",
            Currency::Eur => "EUR",
        }
    }

    /// Decimal places of the currency's minor unit.
    #[must_use]
    pub const fn minor_units(self) -> u32 {
        match self {
            Currency::Xof => 0,
            Currency::Eur => 2,
        }
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = AppError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "XOF" | "FCFA" => Ok(Currency::Xof),
            "EUR" => Ok(Currency::Eur),
            other => Err(AppError::Settings(format!("unsupported currency: {other}"))),
        }
    }
}
