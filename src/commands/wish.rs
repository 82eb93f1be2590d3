// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{id_for_user, maybe_print_json, normalize_currency, parse_amount, pretty_table};
use crate::wishlist::{self, NewWish, WishEdit};
use anyhow::Result;
use chrono::{Datelike, Utc};
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("delete", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            wishlist::delete(conn, id)?;
            println!("Deleted wish {}", id);
        }
        Some(("list", sub)) => list(conn, sub)?,
        Some(("years", sub)) => {
            let user = sub.get_one::<String>("user").unwrap();
            let user_id = id_for_user(conn, user)?;
            for year in wishlist::years(conn, user_id)? {
                println!("{}", year);
            }
        }
        Some(("fund", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let trans_id = wishlist::fund(conn, id)?;
            println!("Funded wish {} (transaction {})", id, trans_id);
        }
        Some(("unfund", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            wishlist::unfund(conn, id)?;
            println!("Wish {} is pending again", id);
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = sub.get_one::<String>("user").unwrap();
    let user_id = id_for_user(conn, user)?;
    let price = parse_amount(sub.get_one::<String>("price").unwrap())?;
    let currency = normalize_currency(sub.get_one::<String>("currency").unwrap());
    let year = sub
        .get_one::<i32>("year")
        .copied()
        .unwrap_or_else(|| Utc::now().date_naive().year());

    let id = wishlist::add(
        conn,
        &NewWish {
            user_id,
            year,
            price,
            currency,
            details: sub.get_one::<String>("details").cloned(),
            link: sub.get_one::<String>("link").cloned(),
        },
    )?;
    println!("Added wish {} for {}", id, year);
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let changes = WishEdit {
        year: sub.get_one::<i32>("year").copied(),
        price: sub
            .get_one::<String>("price")
            .map(|s| parse_amount(s))
            .transpose()?,
        currency: sub
            .get_one::<String>("currency")
            .map(|s| normalize_currency(s)),
        details: sub.get_one::<String>("details").cloned(),
        link: sub.get_one::<String>("link").cloned(),
    };
    wishlist::edit(conn, id, &changes)?;
    println!("Edited wish {}", id);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user = sub.get_one::<String>("user").unwrap();
    let user_id = id_for_user(conn, user)?;
    let year = if sub.get_flag("all") {
        None
    } else {
        Some(
            sub.get_one::<i32>("year")
                .copied()
                .unwrap_or_else(|| Utc::now().date_naive().year()),
        )
    };

    let data = wishlist::list(conn, user_id, year)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|w| {
                vec![
                    w.id.to_string(),
                    w.year.to_string(),
                    w.price.to_string(),
                    w.currency.clone(),
                    w.status.to_string(),
                    w.details.clone().unwrap_or_default(),
                    w.trans_id.map(|t| t.to_string()).unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Year", "Price", "CCY", "Status", "Details", "Tx"],
                rows,
            )
        );
    }
    Ok(())
}
