use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Tolerance for bound comparisons on money amounts.
///
/// Amounts are rounded half-up to one decimal at comparison boundaries, so
/// half a unit of that scale absorbs accumulated rounding drift without
/// letting a real over-payment through.
pub const EPSILON: Decimal = dec!(0.05);

/// Decimal places used when rounding money for comparisons.
pub const MONEY_SCALE: u32 = 1;

/// Total share percentage applied to company-client accounts, regardless of
/// the configured per-account split.
pub const COMPANY_TOTAL_SHARE_PCT: Decimal = dec!(10);

/// Default bounded wait when acquiring an account lock, in milliseconds.
pub const DEFAULT_LOCK_TIMEOUT_MS: u64 = 5_000;

/// Default freshness window for cached balance entries, in seconds.
/// A "now" read older than this triggers a synchronous recompute.
pub const DEFAULT_CACHE_FRESHNESS_SECS: i64 = 3_600;
