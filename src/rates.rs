// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::CoreError;
use crate::utils::{get_setting, http_client};
use anyhow::{Context, Result};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

pub const PRIMARY_KEY_SETTING: &str = "rate_api_key";
pub const FALLBACK_KEY_SETTING: &str = "rate_api_key_fallback";

const PROVIDER_HOST: &str = "https://v6.exchangerate-api.com/v6";

#[derive(Debug, Deserialize)]
struct RateResponse {
    conversion_rates: HashMap<String, f64>,
}

/// Conversion-rate table keyed by a base currency: 1 base = rate[quote].
#[derive(Debug, Clone)]
pub struct RateTable {
    base: String,
    rates: HashMap<String, Decimal>,
}

impl RateTable {
    /// Parse a provider response body. Non-positive or non-finite rates are
    /// treated as malformed so the caller can fall through to the next
    /// provider.
    pub fn from_json(base: &str, body: &str) -> Result<Self> {
        let parsed: RateResponse =
            serde_json::from_str(body).context("malformed rate provider response")?;
        let mut rates = HashMap::new();
        for (ccy, rate) in parsed.conversion_rates {
            if !rate.is_finite() || rate <= 0.0 {
                anyhow::bail!("malformed rate {} for {}", rate, ccy);
            }
            let d = Decimal::try_from(rate)
                .with_context(|| format!("unrepresentable rate {} for {}", rate, ccy))?;
            rates.insert(ccy, d);
        }
        Ok(RateTable {
            base: base.to_string(),
            rates,
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn rate(&self, currency: &str) -> Option<Decimal> {
        self.rates.get(currency).copied()
    }

    pub fn currencies(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.rates.keys().map(String::as_str).collect();
        out.sort_unstable();
        out
    }

    /// amount / rate[currency], expressed in the base currency. Base-currency
    /// amounts pass through unconverted.
    pub fn convert_to_base(&self, amount: i64, currency: &str) -> Result<Decimal> {
        if currency == self.base {
            return Ok(Decimal::from(amount));
        }
        let rate = self
            .rates
            .get(currency)
            .ok_or_else(|| CoreError::UnknownCurrency(currency.to_string()))?;
        Ok(Decimal::from(amount) / *rate)
    }
}

/// Fetch the rate table keyed by `base` from the primary provider, retrying
/// once against the fallback. Both failing is the terminal
/// `RateProviderUnavailable`.
pub fn fetch(conn: &Connection, base: &str) -> Result<RateTable> {
    let urls = provider_urls(conn, base)?;
    if urls.is_empty() {
        return Err(CoreError::RateProviderUnavailable(
            "no API key configured; run `nestegg rates set-key`".into(),
        )
        .into());
    }
    let client = http_client()?;
    let mut last_err = String::new();
    for url in &urls {
        match fetch_from(&client, url, base) {
            Ok(table) => return Ok(table),
            Err(e) => last_err = e.to_string(),
        }
    }
    Err(CoreError::RateProviderUnavailable(last_err).into())
}

fn provider_urls(conn: &Connection, base: &str) -> Result<Vec<String>> {
    let mut urls = Vec::new();
    for key_name in [PRIMARY_KEY_SETTING, FALLBACK_KEY_SETTING] {
        if let Some(key) = get_setting(conn, key_name)? {
            urls.push(format!("{}/{}/latest/{}", PROVIDER_HOST, key, base));
        }
    }
    Ok(urls)
}

fn fetch_from(client: &reqwest::blocking::Client, url: &str, base: &str) -> Result<RateTable> {
    let body = client.get(url).send()?.error_for_status()?.text()?;
    RateTable::from_json(base, &body)
}
