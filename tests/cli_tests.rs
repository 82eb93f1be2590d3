// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use nestegg::cli;

#[test]
fn deposit_args_parse() {
    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "nestegg", "tx", "deposit", "--user", "alice", "--amount", "100", "--currency", "usd",
        "--details", "payday",
    ]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("deposit", dep_m)) = tx_m.subcommand() {
            assert_eq!(dep_m.get_one::<String>("user").unwrap(), "alice");
            assert_eq!(dep_m.get_one::<String>("amount").unwrap(), "100");
            assert_eq!(dep_m.get_one::<String>("details").unwrap(), "payday");
            assert!(dep_m.get_one::<String>("date").is_none());
        } else {
            panic!("no deposit subcommand");
        }
    } else {
        panic!("no tx subcommand");
    }
}

#[test]
fn list_limit_and_flags_parse() {
    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "nestegg", "tx", "list", "--user", "alice", "--limit", "2", "--jsonl",
    ]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            assert_eq!(*list_m.get_one::<usize>("limit").unwrap(), 2);
            assert!(list_m.get_flag("jsonl"));
            assert!(!list_m.get_flag("json"));
        } else {
            panic!("no list subcommand");
        }
    } else {
        panic!("no tx subcommand");
    }
}

#[test]
fn wish_fund_takes_a_numeric_id() {
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(["nestegg", "wish", "fund", "7"]);
    if let Some(("wish", wish_m)) = matches.subcommand() {
        if let Some(("fund", fund_m)) = wish_m.subcommand() {
            assert_eq!(*fund_m.get_one::<i64>("id").unwrap(), 7);
        } else {
            panic!("no fund subcommand");
        }
    } else {
        panic!("no wish subcommand");
    }
}
