// Copyright (c) 2026 - present fixlog contributors
// SPDX-License-Identifier: MIT

//! fixlog: interactive commit review for wiki bug-fix release logs
//!
//! Reviews a git revision range commit by commit and writes the accepted
//! ones into flat record files and a categorized release log page.

use anyhow::Context;
use clap::Parser;
use fixlog::app;
use fixlog::config::Config;
use fixlog::input::LineInput;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr, the review itself uses stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    config.validate().context("invalid configuration")?;
    info!(source = %config.source.display(), range = ?config.range, "starting fixlog");

    let input = LineInput::new(std::io::stdin().lock());
    let summary = app::run(&config, input, std::io::stdout().lock())
        .with_context(|| format!("review of {} failed", config.source.display()))?;

    info!(outcome = ?summary.outcome, "done");
    Ok(())
}
