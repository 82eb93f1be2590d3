// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use nestegg::error::CoreError;
use nestegg::rates::{self, RateTable};
use nestegg::{db, ledger, networth};
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
fn balances_sum_in_the_favorite_currency() {
    let conn = setup();
    ledger::credit(&conn, 1, "USD", 100).unwrap();
    ledger::credit(&conn, 1, "EUR", 50).unwrap();

    let table = RateTable::from_json(
        "USD",
        r#"{"conversion_rates": {"USD": 1.0, "EUR": 0.9}}"#,
    )
    .unwrap();
    let total = networth::convert_balances(&ledger::balances(&conn, 1).unwrap(), &table).unwrap();
    // 100 + 50 / 0.9
    assert_eq!(format!("{:.2}", total.round_dp(2)), "155.56");
}

#[test]
fn base_currency_passes_through_without_a_rate() {
    let table = RateTable::from_json("USD", r#"{"conversion_rates": {"EUR": 0.9}}"#).unwrap();
    let converted = table.convert_to_base(100, "USD").unwrap();
    assert_eq!(converted.to_string(), "100");
}

#[test]
fn missing_rate_for_a_held_currency_is_unknown() {
    let table = RateTable::from_json("USD", r#"{"conversion_rates": {"EUR": 0.9}}"#).unwrap();
    let err = table.convert_to_base(10, "GBP").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CoreError>(),
        Some(CoreError::UnknownCurrency(_))
    ));
}

#[test]
fn malformed_rates_are_rejected() {
    assert!(RateTable::from_json("USD", r#"{"conversion_rates": {"EUR": 0.0}}"#).is_err());
    assert!(RateTable::from_json("USD", r#"{"conversion_rates": {"EUR": -3.1}}"#).is_err());
    assert!(RateTable::from_json("USD", "not json at all").is_err());
    assert!(RateTable::from_json("USD", r#"{"rates": {"EUR": 0.9}}"#).is_err());
}

#[test]
fn rate_lookup_and_currency_listing() {
    let table = RateTable::from_json(
        "USD",
        r#"{"conversion_rates": {"EUR": 0.9, "JPY": 150.0}}"#,
    )
    .unwrap();
    assert_eq!(table.base(), "USD");
    assert_eq!(table.currencies(), vec!["EUR", "JPY"]);
    assert!(table.rate("EUR").is_some());
    assert!(table.rate("GBP").is_none());
}

#[test]
fn fetch_without_configured_keys_is_provider_unavailable() {
    let conn = setup();
    let err = rates::fetch(&conn, "USD").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CoreError>(),
        Some(CoreError::RateProviderUnavailable(_))
    ));
}
