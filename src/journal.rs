// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::CoreError;
use crate::ledger;
use crate::models::{TransactionRecord, TxStatus};
use anyhow::Result;
use chrono::NaiveDate;
use regex::Regex;
use rusqlite::{params, Connection, TransactionBehavior};

const COLS: &str = "id, user_id, date, currency, amount, status, category, details, details_link, wish_id";

#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub user_id: i64,
    pub date: NaiveDate,
    pub currency: String,
    pub amount: i64,
    pub status: TxStatus,
    pub category: Option<String>,
    pub details: Option<String>,
    pub details_link: Option<String>,
    pub wish_id: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct TransEdit {
    pub date: Option<NaiveDate>,
    pub amount: Option<i64>,
    pub category: Option<String>,
    pub details: Option<String>,
    pub details_link: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TransFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub status: Option<TxStatus>,
    pub category: Option<String>,
    /// Regex matched against the details text.
    pub details: Option<String>,
    pub limit: Option<usize>,
}

/// Insert the transaction and apply its ledger effect as one unit. A failed
/// debit aborts the whole operation; the record is not persisted.
pub fn record(conn: &mut Connection, nt: &NewTransaction) -> Result<TransactionRecord> {
    if nt.amount <= 0 {
        anyhow::bail!("transaction amount must be positive, got {}", nt.amount);
    }
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let trans_id = insert(&tx, nt)?;
    match nt.status {
        TxStatus::Deposit => {
            ledger::credit(&tx, nt.user_id, &nt.currency, nt.amount)?;
        }
        TxStatus::Withdraw => {
            ledger::debit(&tx, nt.user_id, &nt.currency, nt.amount)?;
        }
    }
    let record = get_in(&tx, trans_id)?;
    tx.commit()?;
    Ok(record)
}

/// Bare row insert; ledger bookkeeping is the caller's business. Used by
/// `record` and by the wishlist funding path, which runs its own transaction.
pub(crate) fn insert(conn: &Connection, nt: &NewTransaction) -> Result<i64> {
    conn.execute(
        "INSERT INTO trans(user_id, date, currency, amount, status, category, details, details_link, wish_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            nt.user_id,
            nt.date,
            nt.currency,
            nt.amount,
            nt.status.as_str(),
            nt.category,
            nt.details,
            nt.details_link,
            nt.wish_id
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get(conn: &Connection, trans_id: i64) -> Result<TransactionRecord> {
    get_in(conn, trans_id)
}

fn get_in(conn: &Connection, trans_id: i64) -> Result<TransactionRecord> {
    let sql = format!("SELECT {} FROM trans WHERE id=?1", COLS);
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params![trans_id])?;
    match rows.next()? {
        Some(r) => read_record(r),
        None => Err(CoreError::NotFound(format!("transaction {}", trans_id)).into()),
    }
}

/// Re-derives the ledger delta: the old amount's effect is reversed and the
/// new amount applied in the original direction. A resulting negative total
/// rejects the edit with nothing mutated.
pub fn edit(conn: &mut Connection, trans_id: i64, changes: &TransEdit) -> Result<()> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let old = get_in(&tx, trans_id)?;

    let new_amount = changes.amount.unwrap_or(old.amount);
    if new_amount <= 0 {
        anyhow::bail!("transaction amount must be positive, got {}", new_amount);
    }

    let total = ledger::get_total(&tx, old.user_id, &old.currency)?;
    let new_total = match old.status {
        TxStatus::Withdraw => total + old.amount - new_amount,
        TxStatus::Deposit => total - old.amount + new_amount,
    };
    if new_total < 0 {
        return Err(match old.status {
            TxStatus::Withdraw => CoreError::InsufficientFunds {
                currency: old.currency.clone(),
                available: total + old.amount,
                requested: new_amount,
            },
            TxStatus::Deposit => CoreError::InsufficientFunds {
                currency: old.currency.clone(),
                available: total,
                requested: old.amount - new_amount,
            },
        }
        .into());
    }

    set_total(&tx, old.user_id, &old.currency, new_total)?;
    tx.execute(
        "UPDATE trans SET date=?1, amount=?2, category=?3, details=?4, details_link=?5 WHERE id=?6",
        params![
            changes.date.unwrap_or(old.date),
            new_amount,
            changes.category.clone().or(old.category),
            changes.details.clone().or(old.details),
            changes.details_link.clone().or(old.details_link),
            trans_id
        ],
    )?;
    tx.commit()?;
    Ok(())
}

/// Reverses the transaction's ledger effect and removes it. Any wishlist
/// item funded by this transaction goes back to pending with its link
/// cleared.
pub fn delete(conn: &mut Connection, trans_id: i64) -> Result<()> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let old = get_in(&tx, trans_id)?;

    let total = ledger::get_total(&tx, old.user_id, &old.currency)?;
    let new_total = match old.status {
        TxStatus::Deposit => {
            let t = total - old.amount;
            if t < 0 {
                return Err(CoreError::WouldOrphanBalance(old.currency.clone()).into());
            }
            t
        }
        TxStatus::Withdraw => total + old.amount,
    };

    set_total(&tx, old.user_id, &old.currency, new_total)?;
    tx.execute(
        "UPDATE wishlist SET status='pending', trans_id=NULL WHERE trans_id=?1",
        params![trans_id],
    )?;
    tx.execute("DELETE FROM trans WHERE id=?1", params![trans_id])?;
    tx.commit()?;
    Ok(())
}

/// Records ordered by id ascending, filtered by inclusive date range and the
/// optional predicates.
pub fn list(conn: &Connection, user_id: i64, filter: &TransFilter) -> Result<Vec<TransactionRecord>> {
    let mut sql = format!("SELECT {} FROM trans WHERE user_id=?", COLS);
    let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(user_id)];

    if let Some(from) = filter.from {
        sql.push_str(" AND date>=?");
        params_vec.push(Box::new(from));
    }
    if let Some(to) = filter.to {
        sql.push_str(" AND date<=?");
        params_vec.push(Box::new(to));
    }
    if let Some(status) = filter.status {
        sql.push_str(" AND status=?");
        params_vec.push(Box::new(status.as_str().to_string()));
    }
    if let Some(category) = &filter.category {
        sql.push_str(" AND category=?");
        params_vec.push(Box::new(category.clone()));
    }
    sql.push_str(" ORDER BY id ASC");

    let matcher = match &filter.details {
        Some(pat) => Some(
            Regex::new(pat)
                .map_err(|e| anyhow::anyhow!("invalid details pattern '{}': {}", pat, e))?,
        ),
        None => None,
    };

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(rusqlite::params_from_iter(
        params_vec.iter().map(|p| p.as_ref()),
    ))?;

    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let record = read_record(r)?;
        if let Some(re) = &matcher {
            let hit = record.details.as_deref().is_some_and(|d| re.is_match(d));
            if !hit {
                continue;
            }
        }
        out.push(record);
    }
    if let Some(limit) = filter.limit {
        out.truncate(limit);
    }
    Ok(out)
}

// Absolute write-back used by edit/delete, which compute the new total from
// the reversed delta.
fn set_total(conn: &Connection, user_id: i64, currency: &str, total: i64) -> Result<()> {
    conn.execute(
        "INSERT INTO networth(user_id, currency, total) VALUES (?1, ?2, ?3)
         ON CONFLICT(user_id, currency) DO UPDATE SET total=excluded.total",
        params![user_id, currency, total],
    )?;
    Ok(())
}

fn read_record(r: &rusqlite::Row<'_>) -> Result<TransactionRecord> {
    let status: String = r.get(5)?;
    Ok(TransactionRecord {
        id: r.get(0)?,
        user_id: r.get(1)?,
        date: r.get(2)?,
        currency: r.get(3)?,
        amount: r.get(4)?,
        status: status.parse()?,
        category: r.get(6)?,
        details: r.get(7)?,
        details_link: r.get(8)?,
        wish_id: r.get(9)?,
    })
}
