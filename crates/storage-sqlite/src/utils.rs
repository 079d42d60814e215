//! Conversion helpers shared by the storage models.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses a decimal persisted as TEXT. Amounts are written by this crate via
/// `Decimal::to_string`, so a parse failure means external tampering; it is
/// logged and treated as zero rather than poisoning every read on the row.
pub fn parse_decimal(value: &str, field_name: &str) -> Decimal {
    match Decimal::from_str(value) {
        Ok(d) => d,
        Err(e) => {
            log::error!("Failed to parse {} '{}' as Decimal: {}", field_name, value, e);
            Decimal::ZERO
        }
    }
}

/// Parses an optional decimal column.
pub fn parse_decimal_opt(value: Option<&str>, field_name: &str) -> Option<Decimal> {
    value.map(|v| parse_decimal(v, field_name))
}
