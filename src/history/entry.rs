use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::calculation::Calculation;
use crate::display::format_number;

/// One performed calculation: its inputs and its result.
///
/// Field order matches the columns of the history file. Numbers are stored
/// as decimal strings so a save/load round trip is exact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub operation: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub operand_a: Decimal,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub operand_b: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str")]
    pub result: Decimal,
}

impl HistoryEntry {
    pub fn new(
        operation: impl Into<String>,
        operand_a: Decimal,
        operand_b: Option<Decimal>,
        result: Decimal,
    ) -> Self {
        HistoryEntry {
            operation: operation.into(),
            operand_a,
            operand_b,
            result,
        }
    }

    pub fn from_calculation(calculation: &Calculation, result: Decimal) -> Self {
        HistoryEntry::new(calculation.operation.name(), calculation.a, calculation.b, result)
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}", self.operation, format_number(self.operand_a))?;
        if let Some(b) = self.operand_b {
            write!(f, ", {}", format_number(b))?;
        }
        write!(f, ") = {}", format_number(self.result))
    }
}
