// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Domain failures surfaced to the user. Everything else travels as plain
/// `anyhow` context chains.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("insufficient {currency} funds: have {available}, need {requested}")]
    InsufficientFunds {
        currency: String,
        available: i64,
        requested: i64,
    },
    #[error("no {0} balance exists for this user")]
    UnknownCurrency(String),
    #[error("deleting this deposit would drive the {0} balance negative")]
    WouldOrphanBalance(String),
    #[error("rate provider unavailable: {0}")]
    RateProviderUnavailable(String),
    #[error("{0} not found")]
    NotFound(String),
}
