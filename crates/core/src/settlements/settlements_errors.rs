use rust_decimal::Decimal;
use thiserror::Error;

/// Guard rejections from the loss-settlement state machine.
///
/// The first failing guard aborts the transaction with zero side effects.
/// None of these are retry-safe with unchanged inputs: each reflects either a
/// request the caller must change or account state that has genuinely moved
/// (for example a concurrent request already settled the loss).
#[derive(Error, Debug)]
pub enum SettlementError {
    #[error("No active loss to settle")]
    NoActiveLoss,

    #[error("Account shows a profit of {profit}; loss settlement is not applicable")]
    ProfitExists { profit: Decimal },

    #[error("Total share percentage must be positive, got {total_share_pct}")]
    InvalidSharePercent { total_share_pct: Decimal },

    #[error("Payment would close {capital_closed} of capital but only {loss} is outstanding")]
    ExceedsLoss {
        capital_closed: Decimal,
        loss: Decimal,
    },

    #[error("Settlement would drive the loss negative ({loss_new})")]
    NegativeLoss { loss_new: Decimal },

    /// Computed values contradicted the defining relationship between loss
    /// and the two balances. A programming-level defect signal: logged
    /// distinctly, never clamped.
    #[error("Settlement invariant violated: {0}")]
    InvariantViolation(String),

    #[error("A settlement with idempotency key {idempotency_key} already exists")]
    DuplicateSettlement { idempotency_key: String },

    #[error("Payment {payment} exceeds the pending amount {pending}")]
    OverPayment { payment: Decimal, pending: Decimal },
}
