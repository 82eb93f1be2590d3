// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use nestegg::error::CoreError;
use nestegg::models::{TxStatus, WishStatus};
use nestegg::wishlist::{self, NewWish, WishEdit};
use nestegg::{db, journal, ledger};
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

fn camera(price: i64) -> NewWish {
    NewWish {
        user_id: 1,
        year: 2025,
        price,
        currency: "USD".into(),
        details: Some("camera".into()),
        link: Some("https://example.com/camera".into()),
    }
}

#[test]
fn add_list_and_years() {
    let conn = setup();
    wishlist::add(&conn, &camera(60)).unwrap();
    let mut other = camera(90);
    other.year = 2026;
    other.details = Some("lens".into());
    wishlist::add(&conn, &other).unwrap();

    let this_year = wishlist::list(&conn, 1, Some(2025)).unwrap();
    assert_eq!(this_year.len(), 1);
    assert_eq!(this_year[0].details.as_deref(), Some("camera"));
    assert_eq!(this_year[0].status, WishStatus::Pending);

    let all = wishlist::list(&conn, 1, None).unwrap();
    assert_eq!(all.len(), 2);

    assert_eq!(wishlist::years(&conn, 1).unwrap(), vec![2025, 2026]);
}

#[test]
fn fund_without_any_ledger_row_is_unknown_currency() {
    let mut conn = setup();
    let wish_id = wishlist::add(&conn, &camera(50)).unwrap();

    let err = wishlist::fund(&mut conn, wish_id).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CoreError>(),
        Some(CoreError::UnknownCurrency(_))
    ));
    let wish = wishlist::get(&conn, wish_id).unwrap();
    assert_eq!(wish.status, WishStatus::Pending);
    assert_eq!(wish.trans_id, None);
}

#[test]
fn fund_with_short_balance_is_insufficient() {
    let mut conn = setup();
    ledger::credit(&conn, 1, "USD", 30).unwrap();
    let wish_id = wishlist::add(&conn, &camera(50)).unwrap();

    let err = wishlist::fund(&mut conn, wish_id).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CoreError>(),
        Some(CoreError::InsufficientFunds { .. })
    ));
    assert_eq!(ledger::get_total(&conn, 1, "USD").unwrap(), 30);
    assert_eq!(
        wishlist::get(&conn, wish_id).unwrap().status,
        WishStatus::Pending
    );
}

#[test]
fn fund_debits_and_materializes_the_withdrawal() {
    let mut conn = setup();
    ledger::credit(&conn, 1, "USD", 100).unwrap();
    let wish_id = wishlist::add(&conn, &camera(60)).unwrap();

    let trans_id = wishlist::fund(&mut conn, wish_id).unwrap();
    assert_eq!(ledger::get_total(&conn, 1, "USD").unwrap(), 40);

    let wish = wishlist::get(&conn, wish_id).unwrap();
    assert_eq!(wish.status, WishStatus::Done);
    assert_eq!(wish.trans_id, Some(trans_id));

    let rec = journal::get(&conn, trans_id).unwrap();
    assert_eq!(rec.status, TxStatus::Withdraw);
    assert_eq!(rec.amount, 60);
    assert_eq!(rec.currency, "USD");
    assert_eq!(rec.details.as_deref(), Some("camera"));
    assert_eq!(
        rec.details_link.as_deref(),
        Some("https://example.com/camera")
    );
    assert_eq!(rec.wish_id, Some(wish_id));
}

#[test]
fn fund_then_unfund_restores_the_ledger_exactly() {
    let mut conn = setup();
    ledger::credit(&conn, 1, "USD", 100).unwrap();
    let wish_id = wishlist::add(&conn, &camera(60)).unwrap();

    let trans_id = wishlist::fund(&mut conn, wish_id).unwrap();
    wishlist::unfund(&mut conn, wish_id).unwrap();

    assert_eq!(ledger::get_total(&conn, 1, "USD").unwrap(), 100);
    let wish = wishlist::get(&conn, wish_id).unwrap();
    assert_eq!(wish.status, WishStatus::Pending);
    assert_eq!(wish.trans_id, None);

    let err = journal::get(&conn, trans_id).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CoreError>(),
        Some(CoreError::NotFound(_))
    ));
}

#[test]
fn fund_twice_is_rejected() {
    let mut conn = setup();
    ledger::credit(&conn, 1, "USD", 200).unwrap();
    let wish_id = wishlist::add(&conn, &camera(60)).unwrap();
    wishlist::fund(&mut conn, wish_id).unwrap();

    assert!(wishlist::fund(&mut conn, wish_id).is_err());
    // Only one debit happened.
    assert_eq!(ledger::get_total(&conn, 1, "USD").unwrap(), 140);
}

#[test]
fn unfund_pending_is_rejected() {
    let mut conn = setup();
    let wish_id = wishlist::add(&conn, &camera(60)).unwrap();
    assert!(wishlist::unfund(&mut conn, wish_id).is_err());
}

#[test]
fn edit_applies_only_while_pending() {
    let mut conn = setup();
    ledger::credit(&conn, 1, "USD", 100).unwrap();
    let wish_id = wishlist::add(&conn, &camera(60)).unwrap();

    wishlist::edit(
        &conn,
        wish_id,
        &WishEdit {
            price: Some(80),
            details: Some("better camera".into()),
            ..Default::default()
        },
    )
    .unwrap();
    let wish = wishlist::get(&conn, wish_id).unwrap();
    assert_eq!(wish.price, 80);
    assert_eq!(wish.details.as_deref(), Some("better camera"));

    wishlist::fund(&mut conn, wish_id).unwrap();
    let err = wishlist::edit(
        &conn,
        wish_id,
        &WishEdit {
            price: Some(10),
            ..Default::default()
        },
    )
    .unwrap_err();
    assert!(err.to_string().contains("only pending"));
    assert_eq!(wishlist::get(&conn, wish_id).unwrap().price, 80);
}

#[test]
fn deleting_a_funded_wish_keeps_the_withdrawal() {
    let mut conn = setup();
    ledger::credit(&conn, 1, "USD", 100).unwrap();
    let wish_id = wishlist::add(&conn, &camera(60)).unwrap();
    let trans_id = wishlist::fund(&mut conn, wish_id).unwrap();

    wishlist::delete(&conn, wish_id).unwrap();

    // The money stays spent; only the back-reference is gone.
    assert_eq!(ledger::get_total(&conn, 1, "USD").unwrap(), 40);
    let rec = journal::get(&conn, trans_id).unwrap();
    assert_eq!(rec.wish_id, None);
}

#[test]
fn delete_missing_is_not_found() {
    let conn = setup();
    let err = wishlist::delete(&conn, 42).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CoreError>(),
        Some(CoreError::NotFound(_))
    ));
}
