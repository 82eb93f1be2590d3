// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::journal::{self, NewTransaction, TransEdit, TransFilter};
use crate::models::TxStatus;
use crate::utils::{
    id_for_user, maybe_print_json, normalize_currency, parse_amount, parse_date, pretty_table,
};
use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("deposit", sub)) => record(conn, sub, TxStatus::Deposit)?,
        Some(("withdraw", sub)) => record(conn, sub, TxStatus::Withdraw)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("delete", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            journal::delete(conn, id)?;
            println!("Deleted transaction {}", id);
        }
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn record(conn: &mut Connection, sub: &clap::ArgMatches, status: TxStatus) -> Result<()> {
    let user = sub.get_one::<String>("user").unwrap();
    let user_id = id_for_user(conn, user)?;
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let currency = normalize_currency(sub.get_one::<String>("currency").unwrap());
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => Utc::now().date_naive(),
    };

    let rec = journal::record(
        conn,
        &NewTransaction {
            user_id,
            date,
            currency,
            amount,
            status,
            category: sub.get_one::<String>("category").cloned(),
            details: sub.get_one::<String>("details").cloned(),
            details_link: sub.get_one::<String>("link").cloned(),
            wish_id: None,
        },
    )?;
    println!(
        "Recorded {} of {} {} on {} (id {})",
        rec.status, rec.amount, rec.currency, rec.date, rec.id
    );
    Ok(())
}

fn edit(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let changes = TransEdit {
        date: sub
            .get_one::<String>("date")
            .map(|s| parse_date(s))
            .transpose()?,
        amount: sub
            .get_one::<String>("amount")
            .map(|s| parse_amount(s))
            .transpose()?,
        category: sub.get_one::<String>("category").cloned(),
        details: sub.get_one::<String>("details").cloned(),
        details_link: sub.get_one::<String>("link").cloned(),
    };
    journal::edit(conn, id, &changes)?;
    println!("Edited transaction {}", id);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user = sub.get_one::<String>("user").unwrap();
    let user_id = id_for_user(conn, user)?;

    // Last 30 days unless a range is given.
    let to = match sub.get_one::<String>("to") {
        Some(s) => parse_date(s)?,
        None => Utc::now().date_naive(),
    };
    let from = match sub.get_one::<String>("from") {
        Some(s) => parse_date(s)?,
        None => to - chrono::Duration::days(30),
    };

    let filter = TransFilter {
        from: Some(from),
        to: Some(to),
        status: sub
            .get_one::<String>("status")
            .map(|s| s.parse())
            .transpose()?,
        category: sub.get_one::<String>("category").cloned(),
        details: sub.get_one::<String>("details").cloned(),
        limit: sub.get_one::<usize>("limit").copied(),
    };
    let data = journal::list(conn, user_id, &filter)?;

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.to_string(),
                    r.status.to_string(),
                    r.amount.to_string(),
                    r.currency.clone(),
                    r.category.clone().unwrap_or_default(),
                    r.details.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Status", "Amount", "CCY", "Category", "Details"],
                rows,
            )
        );
    }
    Ok(())
}
