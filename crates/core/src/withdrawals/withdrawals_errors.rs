use rust_decimal::Decimal;
use thiserror::Error;

/// Guard rejections from the profit-withdrawal state machine.
#[derive(Error, Debug)]
pub enum WithdrawalError {
    #[error("No active profit to withdraw")]
    NoActiveProfit,

    #[error("Withdrawal {withdrawal} exceeds the active profit {profit}")]
    ExceedsProfit {
        withdrawal: Decimal,
        profit: Decimal,
    },

    #[error("Withdrawal would drive the current balance negative ({balance})")]
    NegativeBalance { balance: Decimal },
}
