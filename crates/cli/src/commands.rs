//! clap command tree.

use clap::{Arg, ArgAction, Command};

/// Build the top-level `redtxn` command.
pub fn build_cli() -> Command {
    Command::new("redtxn")
        .about("Run compensating transactions against an in-memory store")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Print the report as JSON"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log every batch"),
        )
        .subcommand(
            Command::new("demo")
                .about("Run INCR a, INCR b, INCR c against a=1, b=\"123e\", c=1")
                .arg(fail_compensation()),
        )
        .subcommand(
            Command::new("run")
                .about("Execute a plan loaded from a JSON file")
                .arg(
                    Arg::new("plan")
                        .long("plan")
                        .value_name("FILE")
                        .required(true)
                        .help("JSON plan: {\"main\": [...], \"rollback\": [...]}"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_name("FILE")
                        .help("JSON object of initial key/value pairs"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_name("FILE")
                        .help("TOML coordinator configuration"),
                )
                .arg(
                    Arg::new("timeout-ms")
                        .long("timeout-ms")
                        .value_name("MS")
                        .value_parser(clap::value_parser!(u64))
                        .help("Per-round-trip timeout"),
                )
                .arg(
                    Arg::new("latency-ms")
                        .long("latency-ms")
                        .value_name("MS")
                        .value_parser(clap::value_parser!(u64))
                        .help("Simulated store latency per round trip"),
                )
                .arg(fail_compensation()),
        )
}

fn fail_compensation() -> Arg {
    Arg::new("fail-compensation")
        .long("fail-compensation")
        .action(ArgAction::SetTrue)
        .help("Drop the connection before the compensation batch arrives")
}
