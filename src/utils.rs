// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rusqlite::{params, Connection, OptionalExtension};

const UA: &str = concat!(
    "nestegg/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/nestegg)"
);

pub fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Whole-unit monetary amount; zero and negatives are rejected.
pub fn parse_amount(s: &str) -> Result<i64> {
    let n: i64 = s
        .parse()
        .with_context(|| format!("Invalid amount '{}', expected a whole number", s))?;
    if n <= 0 {
        anyhow::bail!("Amount must be positive, got {}", n);
    }
    Ok(n)
}

pub fn normalize_currency(s: &str) -> String {
    s.trim().to_uppercase()
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn id_for_user(conn: &Connection, username: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT id FROM users WHERE username=?1")?;
    let id: i64 = stmt
        .query_row(params![username], |r| r.get(0))
        .with_context(|| format!("User '{}' not found", username))?;
    Ok(id)
}

pub fn favorite_currency(conn: &Connection, user_id: i64) -> Result<String> {
    let ccy: String = conn
        .query_row(
            "SELECT favorite_currency FROM users WHERE id=?1",
            params![user_id],
            |r| r.get(0),
        )
        .with_context(|| format!("User id {} not found", user_id))?;
    Ok(ccy)
}

pub fn set_favorite_currency(conn: &Connection, user_id: i64, ccy: &str) -> Result<()> {
    let n = conn.execute(
        "UPDATE users SET favorite_currency=?1 WHERE id=?2",
        params![ccy, user_id],
    )?;
    if n == 0 {
        anyhow::bail!("User id {} not found", user_id);
    }
    Ok(())
}

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
