// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::rates::{self, FALLBACK_KEY_SETTING, PRIMARY_KEY_SETTING};
use crate::utils::{normalize_currency, pretty_table, set_setting};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-key", sub)) => {
            let key = sub.get_one::<String>("key").unwrap();
            set_setting(conn, PRIMARY_KEY_SETTING, key)?;
            println!("Primary rate provider key set");
        }
        Some(("set-fallback-key", sub)) => {
            let key = sub.get_one::<String>("key").unwrap();
            set_setting(conn, FALLBACK_KEY_SETTING, key)?;
            println!("Fallback rate provider key set");
        }
        Some(("show", sub)) => {
            let base = normalize_currency(sub.get_one::<String>("base").unwrap());
            let table = rates::fetch(conn, &base)?;
            let rows: Vec<Vec<String>> = table
                .currencies()
                .iter()
                .map(|c| {
                    vec![
                        c.to_string(),
                        table.rate(c).map(|r| r.to_string()).unwrap_or_default(),
                    ]
                })
                .collect();
            println!("1 {} =", table.base());
            println!("{}", pretty_table(&["Currency", "Rate"], rows));
        }
        _ => {}
    }
    Ok(())
}
