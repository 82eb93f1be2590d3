// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::CoreError;
use crate::journal::{self, NewTransaction};
use crate::ledger;
use crate::models::{TxStatus, WishStatus, WishlistItem};
use anyhow::Result;
use chrono::Utc;
use rusqlite::{params, Connection, TransactionBehavior};

const COLS: &str = "id, user_id, year, price, currency, details, link, status, trans_id";

#[derive(Debug, Clone)]
pub struct NewWish {
    pub user_id: i64,
    pub year: i32,
    pub price: i64,
    pub currency: String,
    pub details: Option<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct WishEdit {
    pub year: Option<i32>,
    pub price: Option<i64>,
    pub currency: Option<String>,
    pub details: Option<String>,
    pub link: Option<String>,
}

pub fn add(conn: &Connection, w: &NewWish) -> Result<i64> {
    if w.price <= 0 {
        anyhow::bail!("wish price must be positive, got {}", w.price);
    }
    conn.execute(
        "INSERT INTO wishlist(user_id, year, price, currency, details, link, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, 'pending')",
        params![w.user_id, w.year, w.price, w.currency, w.details, w.link],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get(conn: &Connection, wish_id: i64) -> Result<WishlistItem> {
    let sql = format!("SELECT {} FROM wishlist WHERE id=?1", COLS);
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params![wish_id])?;
    match rows.next()? {
        Some(r) => read_wish(r),
        None => Err(CoreError::NotFound(format!("wish {}", wish_id)).into()),
    }
}

pub fn list(conn: &Connection, user_id: i64, year: Option<i32>) -> Result<Vec<WishlistItem>> {
    let mut sql = format!("SELECT {} FROM wishlist WHERE user_id=?", COLS);
    let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(user_id)];
    if let Some(y) = year {
        sql.push_str(" AND year=?");
        params_vec.push(Box::new(y));
    }
    sql.push_str(" ORDER BY id ASC");

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(rusqlite::params_from_iter(
        params_vec.iter().map(|p| p.as_ref()),
    ))?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        out.push(read_wish(r)?);
    }
    Ok(out)
}

pub fn years(conn: &Connection, user_id: i64) -> Result<Vec<i32>> {
    let mut stmt =
        conn.prepare("SELECT DISTINCT year FROM wishlist WHERE user_id=?1 ORDER BY year")?;
    let rows = stmt.query_map(params![user_id], |r| r.get::<_, i32>(0))?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// Edits are permitted only while pending; a funded wish already has a
/// transaction carrying its old price and details.
pub fn edit(conn: &Connection, wish_id: i64, changes: &WishEdit) -> Result<()> {
    let wish = get(conn, wish_id)?;
    if wish.status == WishStatus::Done {
        anyhow::bail!("wish {} is funded; only pending wishes can be edited", wish_id);
    }
    let new_price = changes.price.unwrap_or(wish.price);
    if new_price <= 0 {
        anyhow::bail!("wish price must be positive, got {}", new_price);
    }
    conn.execute(
        "UPDATE wishlist SET year=?1, price=?2, currency=?3, details=?4, link=?5 WHERE id=?6",
        params![
            changes.year.unwrap_or(wish.year),
            new_price,
            changes.currency.clone().unwrap_or(wish.currency),
            changes.details.clone().or(wish.details),
            changes.link.clone().or(wish.link),
            wish_id
        ],
    )?;
    Ok(())
}

/// Removes the wish in any state. A funding transaction stays in the journal
/// with its back-reference cleared.
pub fn delete(conn: &Connection, wish_id: i64) -> Result<()> {
    let n = conn.execute("DELETE FROM wishlist WHERE id=?1", params![wish_id])?;
    if n == 0 {
        return Err(CoreError::NotFound(format!("wish {}", wish_id)).into());
    }
    Ok(())
}

/// pending -> done: debit the ledger by the wish's price and materialize the
/// withdrawal in the journal, linked both ways. Returns the transaction id.
pub fn fund(conn: &mut Connection, wish_id: i64) -> Result<i64> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let wish = get(&tx, wish_id)?;
    if wish.status == WishStatus::Done {
        anyhow::bail!("wish {} is already funded", wish_id);
    }
    if !ledger::has_currency(&tx, wish.user_id, &wish.currency)? {
        return Err(CoreError::UnknownCurrency(wish.currency).into());
    }
    ledger::debit(&tx, wish.user_id, &wish.currency, wish.price)?;
    let trans_id = journal::insert(
        &tx,
        &NewTransaction {
            user_id: wish.user_id,
            date: Utc::now().date_naive(),
            currency: wish.currency.clone(),
            amount: wish.price,
            status: TxStatus::Withdraw,
            category: None,
            details: wish.details.clone(),
            details_link: wish.link.clone(),
            wish_id: Some(wish_id),
        },
    )?;
    tx.execute(
        "UPDATE wishlist SET status='done', trans_id=?1 WHERE id=?2",
        params![trans_id, wish_id],
    )?;
    tx.commit()?;
    Ok(trans_id)
}

/// done -> pending: drop the funding transaction and credit the price back.
/// Crediting back never fails, so this is always reversible.
pub fn unfund(conn: &mut Connection, wish_id: i64) -> Result<()> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let wish = get(&tx, wish_id)?;
    if wish.status == WishStatus::Pending {
        anyhow::bail!("wish {} is not funded", wish_id);
    }
    let trans_id = wish
        .trans_id
        .ok_or_else(|| CoreError::NotFound(format!("funding transaction for wish {}", wish_id)))?;
    tx.execute(
        "UPDATE wishlist SET status='pending', trans_id=NULL WHERE id=?1",
        params![wish_id],
    )?;
    tx.execute("DELETE FROM trans WHERE id=?1", params![trans_id])?;
    ledger::credit(&tx, wish.user_id, &wish.currency, wish.price)?;
    tx.commit()?;
    Ok(())
}

fn read_wish(r: &rusqlite::Row<'_>) -> Result<WishlistItem> {
    let status: String = r.get(7)?;
    Ok(WishlistItem {
        id: r.get(0)?,
        user_id: r.get(1)?,
        year: r.get(2)?,
        price: r.get(3)?,
        currency: r.get(4)?,
        details: r.get(5)?,
        link: r.get(6)?,
        status: status.parse()?,
        trans_id: r.get(8)?,
    })
}
