// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::User;
use crate::utils::{
    id_for_user, maybe_print_json, normalize_currency, pretty_table, set_favorite_currency,
};
use anyhow::Result;
use rusqlite::{params, Connection};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let username = sub.get_one::<String>("username").unwrap().trim().to_string();
            let ccy = normalize_currency(sub.get_one::<String>("currency").unwrap());
            conn.execute(
                "INSERT INTO users(username, favorite_currency) VALUES (?1, ?2)",
                params![username, ccy],
            )?;
            println!("Added user '{}' (favorite currency {})", username, ccy);
        }
        Some(("list", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let mut stmt =
                conn.prepare("SELECT id, username, favorite_currency FROM users ORDER BY id")?;
            let rows = stmt.query_map([], |r| {
                Ok(User {
                    id: r.get(0)?,
                    username: r.get(1)?,
                    favorite_currency: r.get(2)?,
                })
            })?;
            let mut data = Vec::new();
            for row in rows {
                data.push(row?);
            }
            if !maybe_print_json(json_flag, jsonl_flag, &data)? {
                let rows: Vec<Vec<String>> = data
                    .iter()
                    .map(|u| {
                        vec![
                            u.id.to_string(),
                            u.username.clone(),
                            u.favorite_currency.clone(),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["Id", "Username", "Favorite"], rows));
            }
        }
        Some(("set-currency", sub)) => {
            let username = sub.get_one::<String>("username").unwrap();
            let ccy = normalize_currency(sub.get_one::<String>("currency").unwrap());
            let user_id = id_for_user(conn, username)?;
            set_favorite_currency(conn, user_id, &ccy)?;
            println!("Favorite currency for '{}' is {} now", username, ccy);
        }
        _ => {}
    }
    Ok(())
}
