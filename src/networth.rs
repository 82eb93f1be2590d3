// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger;
use crate::models::LedgerEntry;
use crate::rates::{self, RateTable};
use crate::utils::favorite_currency;
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

/// Every balance the user holds, converted into their favorite currency and
/// summed. Returns the total alongside the currency it is denominated in.
pub fn total_in_favorite_currency(conn: &Connection, user_id: i64) -> Result<(Decimal, String)> {
    let favorite = favorite_currency(conn, user_id)?;
    let table = rates::fetch(conn, &favorite)?;
    let total = convert_balances(&ledger::balances(conn, user_id)?, &table)?;
    Ok((total, favorite))
}

/// Aggregation step split from the fetch so it runs against any rate table.
pub fn convert_balances(balances: &[LedgerEntry], table: &RateTable) -> Result<Decimal> {
    let mut total = Decimal::ZERO;
    for entry in balances {
        total += table.convert_to_base(entry.total, &entry.currency)?;
    }
    Ok(total)
}
