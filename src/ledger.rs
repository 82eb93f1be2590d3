// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::CoreError;
use crate::models::LedgerEntry;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

/// Current (user, currency) total; zero when no row exists yet.
pub fn get_total(conn: &Connection, user_id: i64, currency: &str) -> Result<i64> {
    let total: Option<i64> = conn
        .query_row(
            "SELECT total FROM networth WHERE user_id=?1 AND currency=?2",
            params![user_id, currency],
            |r| r.get(0),
        )
        .optional()?;
    Ok(total.unwrap_or(0))
}

/// Whether the user holds (or ever held) this currency at all. The wishlist
/// engine distinguishes a missing row from a short one.
pub fn has_currency(conn: &Connection, user_id: i64, currency: &str) -> Result<bool> {
    let hit: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM networth WHERE user_id=?1 AND currency=?2",
            params![user_id, currency],
            |r| r.get(0),
        )
        .optional()?;
    Ok(hit.is_some())
}

/// Add to the (user, currency) total, creating the row lazily. Returns the
/// new total.
pub fn credit(conn: &Connection, user_id: i64, currency: &str, amount: i64) -> Result<i64> {
    conn.execute(
        "INSERT INTO networth(user_id, currency, total) VALUES (?1, ?2, ?3)
         ON CONFLICT(user_id, currency) DO UPDATE SET total = total + excluded.total",
        params![user_id, currency, amount],
    )?;
    get_total(conn, user_id, currency)
}

/// Subtract from the (user, currency) total. Callers pair this with other
/// writes inside an immediate transaction so the sufficiency check and the
/// update see the same persisted total.
pub fn debit(conn: &Connection, user_id: i64, currency: &str, amount: i64) -> Result<i64> {
    let total = get_total(conn, user_id, currency)?;
    if amount > total {
        return Err(CoreError::InsufficientFunds {
            currency: currency.to_string(),
            available: total,
            requested: amount,
        }
        .into());
    }
    conn.execute(
        "UPDATE networth SET total = total - ?3 WHERE user_id=?1 AND currency=?2",
        params![user_id, currency, amount],
    )?;
    Ok(total - amount)
}

pub fn balances(conn: &Connection, user_id: i64) -> Result<Vec<LedgerEntry>> {
    let mut stmt = conn.prepare(
        "SELECT user_id, currency, total FROM networth WHERE user_id=?1 ORDER BY currency",
    )?;
    let rows = stmt.query_map(params![user_id], |r| {
        Ok(LedgerEntry {
            user_id: r.get(0)?,
            currency: r.get(1)?,
            total: r.get(2)?,
        })
    })?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn currencies(conn: &Connection, user_id: i64) -> Result<Vec<String>> {
    let mut stmt =
        conn.prepare("SELECT currency FROM networth WHERE user_id=?1 ORDER BY currency")?;
    let rows = stmt.query_map(params![user_id], |r| r.get::<_, String>(0))?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}
