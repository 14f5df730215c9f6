//! CSV loaders for the expense and sales ledgers.
//!
//! Rows that cannot be parsed are logged and skipped so one bad line does not
//! hide the rest of the ledger.
use std::{fs::File, io::Read, path::Path};

use chrono::NaiveDate;
use cost_engine::{Expense, ExpenseCategory, Sale, parse_amount, parse_quantity};
use serde::{Deserialize, de::DeserializeOwned};

use crate::error::{AppError, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Deserialize)]
struct ExpenseRow {
    id: String,
    category: String,
    amount: String,
    date: String,
    #[serde(default)]
    label: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SaleRow {
    id: String,
    amount: String,
    #[serde(default)]
    weight_kg: Option<String>,
    date: String,
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| AppError::InvalidRecord(format!("invalid date '{}'", raw.trim())))
}

impl TryFrom<ExpenseRow> for Expense {
    type Error = AppError;

    fn try_from(row: ExpenseRow) -> Result<Self> {
        let category: ExpenseCategory = row.category.parse()?;
        let expense = Expense::new(
            row.id.trim(),
            category,
            parse_amount(&row.amount)?,
            parse_date(&row.date)?,
        );
        Ok(match row.label {
            Some(label) => expense.with_label(label),
            None => expense,
        })
    }
}

impl TryFrom<SaleRow> for Sale {
    type Error = AppError;

    fn try_from(row: SaleRow) -> Result<Self> {
        let weight_kg = match row.weight_kg.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_quantity(raw)?),
        };
        Ok(Sale::new(
            row.id.trim(),
            parse_amount(&row.amount)?,
            weight_kg,
            parse_date(&row.date)?,
        ))
    }
}

fn read_rows<R, Row, T>(reader: R, kind: &str) -> Result<Vec<T>>
where
    R: Read,
    Row: DeserializeOwned,
    T: TryFrom<Row, Error = AppError>,
{
    let mut csv = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for (index, row) in csv.deserialize::<Row>().enumerate() {
        // header is line 1
        let line = index + 2;
        match row.map_err(AppError::from).and_then(T::try_from) {
            Ok(record) => records.push(record),
            Err(err) => tracing::warn!("skipping {kind} on line {line}: {err}"),
        }
    }
    tracing::debug!("loaded {} {kind} rows", records.len());
    Ok(records)
}

pub fn read_expenses<R: Read>(reader: R) -> Result<Vec<Expense>> {
    read_rows::<_, ExpenseRow, _>(reader, "expense")
}

pub fn read_sales<R: Read>(reader: R) -> Result<Vec<Sale>> {
    read_rows::<_, SaleRow, _>(reader, "sale")
}

/// Reads a ledger file, or returns an empty ledger when no path is set.
pub fn load<T>(path: Option<&str>, read: impl Fn(File) -> Result<Vec<T>>) -> Result<Vec<T>> {
    match path {
        Some(path) => read(File::open(Path::new(path))?),
        None => Ok(Vec::new()),
    }
}
