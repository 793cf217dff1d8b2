//! `cbc-hmac`: one-shot AES-CBC + HMAC-SHA2 command.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise structured JSON logging on stderr.
//! 3. Read one JSON request from stdin, write one JSON response to stdout.
//!
//! [`Config`]: config::Config

mod config;
mod handler;
mod telemetry;

use std::io;

use anyhow::Result;

fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = config::Config::from_env().map_err(|e| {
        eprintln!("ERROR: cbc-hmac configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;

    // -----------------------------------------------------------------------
    // 3. Request
    // -----------------------------------------------------------------------
    let code = handler::run(&cfg, io::stdin().lock(), io::stdout().lock());
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
