// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use nestegg::error::CoreError;
use nestegg::{db, ledger};
use rusqlite::Connection;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn.execute(
        "INSERT INTO users(username, favorite_currency) VALUES ('alice','USD')",
        [],
    )
    .unwrap();
    conn
}

#[test]
fn credit_creates_row_lazily() {
    let conn = setup();
    assert_eq!(ledger::get_total(&conn, 1, "USD").unwrap(), 0);
    assert!(!ledger::has_currency(&conn, 1, "USD").unwrap());

    let total = ledger::credit(&conn, 1, "USD", 100).unwrap();
    assert_eq!(total, 100);
    assert!(ledger::has_currency(&conn, 1, "USD").unwrap());

    assert_eq!(ledger::credit(&conn, 1, "USD", 25).unwrap(), 125);
}

#[test]
fn debit_rejects_more_than_available() {
    let conn = setup();
    ledger::credit(&conn, 1, "USD", 100).unwrap();

    let err = ledger::debit(&conn, 1, "USD", 150).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CoreError>(),
        Some(CoreError::InsufficientFunds { .. })
    ));
    // Nothing moved.
    assert_eq!(ledger::get_total(&conn, 1, "USD").unwrap(), 100);
}

#[test]
fn debit_on_missing_row_is_insufficient() {
    let conn = setup();
    let err = ledger::debit(&conn, 1, "EUR", 1).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CoreError>(),
        Some(CoreError::InsufficientFunds { .. })
    ));
}

#[test]
fn debit_to_zero_keeps_the_row() {
    let conn = setup();
    ledger::credit(&conn, 1, "USD", 100).unwrap();
    assert_eq!(ledger::debit(&conn, 1, "USD", 100).unwrap(), 0);
    // Zeroed, never deleted.
    assert!(ledger::has_currency(&conn, 1, "USD").unwrap());
    assert_eq!(ledger::get_total(&conn, 1, "USD").unwrap(), 0);
}

#[test]
fn running_total_matches_history() {
    let conn = setup();
    let mut expected = 0i64;
    for (credit, amount) in [
        (true, 500),
        (false, 120),
        (true, 40),
        (false, 300),
        (true, 7),
    ] {
        if credit {
            ledger::credit(&conn, 1, "USD", amount).unwrap();
            expected += amount;
        } else {
            ledger::debit(&conn, 1, "USD", amount).unwrap();
            expected -= amount;
        }
        let total = ledger::get_total(&conn, 1, "USD").unwrap();
        assert_eq!(total, expected);
        assert!(total >= 0);
    }
}

#[test]
fn balances_and_currencies_are_per_user() {
    let conn = setup();
    conn.execute(
        "INSERT INTO users(username, favorite_currency) VALUES ('bob','EUR')",
        [],
    )
    .unwrap();
    ledger::credit(&conn, 1, "USD", 10).unwrap();
    ledger::credit(&conn, 1, "EUR", 20).unwrap();
    ledger::credit(&conn, 2, "JPY", 30).unwrap();

    let balances = ledger::balances(&conn, 1).unwrap();
    assert_eq!(balances.len(), 2);
    assert_eq!(balances[0].currency, "EUR");
    assert_eq!(balances[0].total, 20);
    assert_eq!(balances[1].currency, "USD");
    assert_eq!(balances[1].total, 10);

    assert_eq!(ledger::currencies(&conn, 2).unwrap(), vec!["JPY"]);
}
