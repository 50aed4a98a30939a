// Copyright 2021 Joshua J Baker. All rights reserved.
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file.

//! Prints the json value found on stdin at a path of keys and indexes.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use getjson::{evaluate, parse, read_input, InputMode, Outcome};

/// Environment variable holding the trace filter, e.g. `GETJSON_LOG=debug`.
const LOG_ENV: &str = "GETJSON_LOG";

#[derive(Debug, Parser)]
#[command(name = "getjson")]
#[command(about = "Print the json value on stdin found at a path", long_about = None)]
#[command(version)]
struct Cli {
    /// Read only the first line of stdin as the json text
    #[arg(long)]
    readstring: bool,

    /// Object keys and `[N]` indexes, applied left to right.
    /// `--len` prints the length of the value reached so far.
    #[arg(
        value_name = "SELECTOR",
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    selectors: Vec<String>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mode = if cli.readstring {
        InputMode::FirstLine
    } else {
        InputMode::Document
    };
    let text = read_input(io::stdin().lock(), mode).context("failed to read standard input")?;
    let root = parse(&text)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = match evaluate(root, &cli.selectors)? {
        Outcome::Value(value) => writeln!(out, "{}", value),
        Outcome::Len(len) => writeln!(out, "{}", len),
        Outcome::NotFound => Ok(()),
    };
    written
        .and_then(|()| out.flush())
        .context("failed to write standard output")
}
