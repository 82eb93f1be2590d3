// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn user_arg() -> Arg {
    Arg::new("user").long("user").required(true)
}

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as a JSON array"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn tx_write_args(cmd: Command) -> Command {
    cmd.arg(user_arg())
        .arg(Arg::new("amount").long("amount").required(true))
        .arg(Arg::new("currency").long("currency").required(true))
        .arg(
            Arg::new("date")
                .long("date")
                .help("YYYY-MM-DD, defaults to today"),
        )
        .arg(Arg::new("category").long("category"))
        .arg(Arg::new("details").long("details"))
        .arg(Arg::new("link").long("link"))
}

pub fn build_cli() -> Command {
    Command::new("nestegg")
        .about("Multi-currency net worth, transaction journal, and wishlist funding")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("user")
                .about("Manage users")
                .subcommand(
                    Command::new("add")
                        .about("Add a user")
                        .arg(Arg::new("username").required(true))
                        .arg(
                            Arg::new("currency")
                                .long("currency")
                                .default_value("USD")
                                .help("Favorite currency for net-worth display"),
                        ),
                )
                .subcommand(json_flags(Command::new("list").about("List users")))
                .subcommand(
                    Command::new("set-currency")
                        .about("Change a user's favorite currency")
                        .arg(Arg::new("username").required(true))
                        .arg(Arg::new("currency").required(true)),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and manage transactions")
                .subcommand(tx_write_args(
                    Command::new("deposit").about("Record a deposit"),
                ))
                .subcommand(tx_write_args(
                    Command::new("withdraw").about("Record a withdrawal"),
                ))
                .subcommand(
                    Command::new("edit")
                        .about("Edit a transaction; the ledger delta is re-derived")
                        .arg(
                            Arg::new("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("details").long("details"))
                        .arg(Arg::new("link").long("link")),
                )
                .subcommand(
                    Command::new("delete")
                        .about("Delete a transaction, reversing its ledger effect")
                        .arg(
                            Arg::new("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions (defaults to the last 30 days)")
                        .arg(user_arg())
                        .arg(Arg::new("from").long("from").help("YYYY-MM-DD inclusive"))
                        .arg(Arg::new("to").long("to").help("YYYY-MM-DD inclusive"))
                        .arg(
                            Arg::new("status")
                                .long("status")
                                .help("deposit or withdraw"),
                        )
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("details")
                                .long("details")
                                .help("Pattern matched against the details text"),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )),
        )
        .subcommand(
            Command::new("wish")
                .about("Manage the wishlist")
                .subcommand(
                    Command::new("add")
                        .about("Add a pending wish")
                        .arg(user_arg())
                        .arg(Arg::new("price").long("price").required(true))
                        .arg(Arg::new("currency").long("currency").required(true))
                        .arg(
                            Arg::new("year")
                                .long("year")
                                .value_parser(value_parser!(i32))
                                .help("Defaults to the current year"),
                        )
                        .arg(Arg::new("details").long("details"))
                        .arg(Arg::new("link").long("link")),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Edit a pending wish")
                        .arg(
                            Arg::new("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(
                            Arg::new("year")
                                .long("year")
                                .value_parser(value_parser!(i32)),
                        )
                        .arg(Arg::new("price").long("price"))
                        .arg(Arg::new("currency").long("currency"))
                        .arg(Arg::new("details").long("details"))
                        .arg(Arg::new("link").long("link")),
                )
                .subcommand(
                    Command::new("delete").about("Delete a wish").arg(
                        Arg::new("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List wishes for a year (defaults to the current year)")
                        .arg(user_arg())
                        .arg(
                            Arg::new("year")
                                .long("year")
                                .value_parser(value_parser!(i32)),
                        )
                        .arg(
                            Arg::new("all")
                                .long("all")
                                .action(ArgAction::SetTrue)
                                .help("Ignore the year filter"),
                        ),
                ))
                .subcommand(
                    Command::new("years")
                        .about("List years that have wishes")
                        .arg(user_arg()),
                )
                .subcommand(
                    Command::new("fund")
                        .about("Fund a pending wish from its currency balance")
                        .arg(
                            Arg::new("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        ),
                )
                .subcommand(
                    Command::new("unfund")
                        .about("Undo a funded wish, crediting the balance back")
                        .arg(
                            Arg::new("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        ),
                ),
        )
        .subcommand(
            Command::new("networth")
                .about("Net worth in the user's favorite currency")
                .subcommand(
                    Command::new("show")
                        .about("Total across all currencies")
                        .arg(user_arg()),
                )
                .subcommand(json_flags(
                    Command::new("details")
                        .about("Per-currency balances")
                        .arg(user_arg()),
                )),
        )
        .subcommand(
            Command::new("rates")
                .about("Rate provider configuration")
                .subcommand(
                    Command::new("set-key")
                        .about("Set the primary provider API key")
                        .arg(Arg::new("key").required(true)),
                )
                .subcommand(
                    Command::new("set-fallback-key")
                        .about("Set the fallback provider API key")
                        .arg(Arg::new("key").required(true)),
                )
                .subcommand(
                    Command::new("show")
                        .about("Fetch and print the conversion table for a base currency")
                        .arg(Arg::new("base").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Report ledger/journal/wishlist inconsistencies"))
}
