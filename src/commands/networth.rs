// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger;
use crate::networth;
use crate::utils::{id_for_user, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => {
            let user = sub.get_one::<String>("user").unwrap();
            let user_id = id_for_user(conn, user)?;
            let (total, favorite) = networth::total_in_favorite_currency(conn, user_id)?;
            println!("{} {}", total.round_dp(2), favorite);
        }
        Some(("details", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let user = sub.get_one::<String>("user").unwrap();
            let user_id = id_for_user(conn, user)?;
            let data = ledger::balances(conn, user_id)?;
            if !maybe_print_json(json_flag, jsonl_flag, &data)? {
                let rows: Vec<Vec<String>> = data
                    .iter()
                    .map(|e| vec![e.currency.clone(), e.total.to_string()])
                    .collect();
                println!("{}", pretty_table(&["Currency", "Total"], rows));
            }
        }
        _ => {}
    }
    Ok(())
}
