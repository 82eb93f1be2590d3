// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Stored totals that disagree with a replay of the journal
    let mut stmt = conn.prepare(
        "SELECT n.user_id, n.currency, n.total,
                COALESCE((SELECT SUM(CASE t.status WHEN 'deposit' THEN t.amount ELSE -t.amount END)
                          FROM trans t WHERE t.user_id=n.user_id AND t.currency=n.currency), 0)
         FROM networth n ORDER BY n.user_id, n.currency",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let user_id: i64 = r.get(0)?;
        let ccy: String = r.get(1)?;
        let total: i64 = r.get(2)?;
        let replayed: i64 = r.get(3)?;
        if total != replayed {
            rows.push(vec![
                "ledger_drift".into(),
                format!(
                    "user {} {}: stored {} vs journal {}",
                    user_id, ccy, total, replayed
                ),
            ]);
        }
        if total < 0 {
            rows.push(vec![
                "negative_total".into(),
                format!("user {} {}: {}", user_id, ccy, total),
            ]);
        }
    }

    // 2) Journal currencies with no ledger row at all
    let mut stmt2 = conn.prepare(
        "SELECT DISTINCT user_id, currency FROM trans
         EXCEPT SELECT user_id, currency FROM networth",
    )?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let user_id: i64 = r.get(0)?;
        let ccy: String = r.get(1)?;
        rows.push(vec![
            "txn_currency_no_ledger".into(),
            format!("user {} {}", user_id, ccy),
        ]);
    }

    // 3) Wish/transaction link invariants
    for (issue, sql) in [
        (
            "done_wish_unlinked",
            "SELECT id FROM wishlist WHERE status='done' AND trans_id IS NULL",
        ),
        (
            "pending_wish_linked",
            "SELECT id FROM wishlist WHERE status='pending' AND trans_id IS NOT NULL",
        ),
        (
            "wish_link_dangling",
            "SELECT w.id FROM wishlist w LEFT JOIN trans t ON w.trans_id=t.id
             WHERE w.trans_id IS NOT NULL AND t.id IS NULL",
        ),
    ] {
        let mut stmt = conn.prepare(sql)?;
        let mut cur = stmt.query([])?;
        while let Some(r) = cur.next()? {
            let id: i64 = r.get(0)?;
            rows.push(vec![issue.into(), format!("wish {}", id)]);
        }
    }

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
