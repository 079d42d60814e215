use chrono::{NaiveDate, Utc};
use rust_decimal_macros::dec;
use std::str::FromStr;

use crate::ledger::{EventKind, LedgerEvent, NewLedgerEvent};

fn event(kind: EventKind, date: NaiveDate, sequence: i64) -> LedgerEvent {
    LedgerEvent {
        id: format!("evt-{}", sequence),
        account_id: "acc-1".to_string(),
        kind,
        amount: dec!(10),
        effective_date: date,
        sequence,
        total_share_pct: None,
        capital_closed: None,
        idempotency_key: None,
        created_at: Utc::now(),
    }
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::from_str(s).unwrap()
}

#[test]
fn kind_round_trips_through_str() {
    for kind in [
        EventKind::Funding,
        EventKind::BalanceRecord,
        EventKind::Settlement,
        EventKind::Withdrawal,
    ] {
        assert_eq!(EventKind::from_str(kind.as_str()).unwrap(), kind);
    }
    assert!(EventKind::from_str("DIVIDEND").is_err());
}

#[test]
fn same_date_funding_sorts_before_settlement() {
    let d = date("2026-03-10");
    // Settlement appended first, funding second: date + kind priority must
    // still order the funding ahead of the settlement.
    let settlement = event(EventKind::Settlement, d, 1);
    let funding = event(EventKind::Funding, d, 2);

    let mut events = vec![settlement.clone(), funding.clone()];
    events.sort_by_key(|e| e.sort_key());

    assert_eq!(events[0].kind, EventKind::Funding);
    assert_eq!(events[1].kind, EventKind::Settlement);
}

#[test]
fn sequence_breaks_ties_within_a_kind() {
    let d = date("2026-03-10");
    let first = event(EventKind::BalanceRecord, d, 3);
    let second = event(EventKind::BalanceRecord, d, 7);

    let mut events = vec![second.clone(), first.clone()];
    events.sort_by_key(|e| e.sort_key());

    assert_eq!(events[0].sequence, 3);
    assert_eq!(events[1].sequence, 7);
}

#[test]
fn earlier_date_wins_over_priority() {
    let settlement = event(EventKind::Settlement, date("2026-03-09"), 1);
    let funding = event(EventKind::Funding, date("2026-03-10"), 2);

    let mut events = vec![funding.clone(), settlement.clone()];
    events.sort_by_key(|e| e.sort_key());

    assert_eq!(events[0].kind, EventKind::Settlement);
}

#[test]
fn settlement_event_requires_frozen_fields() {
    let mut new_event = NewLedgerEvent {
        account_id: "acc-1".to_string(),
        kind: EventKind::Settlement,
        amount: dec!(3),
        effective_date: date("2026-03-10"),
        total_share_pct: Some(dec!(10)),
        capital_closed: Some(dec!(30)),
        idempotency_key: Some("abc".to_string()),
    };
    assert!(new_event.validate().is_ok());

    new_event.capital_closed = None;
    assert!(new_event.validate().is_err());
}

#[test]
fn funding_must_be_positive() {
    let new_event = NewLedgerEvent::funding("acc-1", dec!(-5), date("2026-03-10"));
    assert!(new_event.validate().is_err());
}
