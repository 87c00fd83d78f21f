//! Core types for spendlog

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single expense record.
///
/// `amount` is kept in its canonical wire form: a string with exactly two
/// fraction digits. Records are never updated or deleted once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Expense {
    /// Monotonically assigned identifier, never reused within a process
    pub id: u64,
    /// Amount as a two-decimal string, e.g. "25.00"
    pub amount: String,
    /// Free-text description
    pub description: String,
    /// Free-text category
    pub category: String,
    /// Caller-supplied date text, not validated
    pub date: String,
}

impl Expense {
    pub fn new(id: u64, amount: f64, description: String, category: String, date: String) -> Self {
        Self {
            id,
            amount: format_amount(amount),
            description,
            category,
            date,
        }
    }
}

/// Format an amount into its canonical two-decimal string form.
///
/// Uses Rust's float formatting, which rounds ties to even on the decimal
/// expansion. 19.999 formats to "20.00".
pub fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}
