//! Idempotency key computation for settlement deduplication.
//!
//! The key is a stable fingerprint of the request's semantic content, so a
//! client's retried request is provably the same request even when it arrives
//! over a fresh connection.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sha2::{Digest, Sha256};

/// Computes a stable idempotency key for a settlement request.
///
/// SHA-256 over account id, effective date, normalized payment amount, and a
/// caller-supplied nonce (or payload hash). Two submissions with identical
/// inputs always map to the same key; any changed input produces a new one.
pub fn compute_settlement_key(
    account_id: &str,
    effective_date: NaiveDate,
    payment: Decimal,
    nonce: &str,
) -> String {
    let mut hasher = Sha256::new();

    hasher.update(account_id.as_bytes());
    hasher.update(b"|");
    hasher.update(effective_date.format("%Y-%m-%d").to_string().as_bytes());
    hasher.update(b"|");
    hasher.update(normalize_decimal(payment).as_bytes());
    hasher.update(b"|");
    hasher.update(nonce.as_bytes());

    hex::encode(hasher.finalize())
}

/// Normalize decimal to a consistent string format (trailing zeros stripped).
fn normalize_decimal(d: Decimal) -> String {
    d.normalize().to_string()
}
