// Copyright (c) 2026 - present fixlog contributors
// SPDX-License-Identifier: MIT

//! Terminal output of the review session

use std::io::{self, Write};

use colored::Colorize;
use fixlog_core::records::{ACCEPT_FILE, ACCEPT_LOG_FILE, ACCEPT_PRETTY_FILE, REJECT_FILE};
use fixlog_core::{CategoryTree, MainCategory};
use fixlog_git::Commit;

use crate::session::Tally;

const RULE: &str =
    "------------------------------------------------------------------------------";

/// Show a commit: id, date, author, message and changed files
pub fn commit(out: &mut impl Write, commit: &Commit) -> io::Result<()> {
    writeln!(out, "{RULE}")?;
    writeln!(
        out,
        "{} {} {}",
        commit.sha.green(),
        commit.date_label().purple(),
        commit.author.bright_blue()
    )?;
    writeln!(out)?;
    writeln!(out, "{}", commit.message.trim_end())?;
    writeln!(out)?;
    writeln!(out, "{}", format!("Files: ({})", commit.files.len()).yellow())?;
    for file in &commit.files {
        writeln!(out, "{}", format!("  {} {}", file.status, file.path).yellow())?;
    }
    writeln!(out)
}

/// Show every main category with its sub-categories, indexed
pub fn category_tree(out: &mut impl Write, tree: &CategoryTree) -> io::Result<()> {
    for (i, main) in tree.mains().iter().enumerate() {
        writeln!(out, "\t[{i}] {}", main.name)?;
        for (j, sub) in main.subcategories.iter().enumerate() {
            writeln!(out, "\t\t[{j}] {sub}")?;
        }
    }
    writeln!(out)
}

/// Prompt for accept/skip/exit
pub fn action_prompt(
    out: &mut impl Write,
    position: usize,
    total: usize,
    tally: Tally,
) -> io::Result<()> {
    writeln!(
        out,
        "a=Space={} Enter={} x={} [{position} of {total}] (+{} | -{})",
        "Accept".green(),
        "Skip".red(),
        "Exit".white(),
        tally.accepted,
        tally.rejected
    )?;
    out.flush()
}

/// Prompt for the main category
pub fn main_prompt(out: &mut impl Write, tree: &CategoryTree) -> io::Result<()> {
    let choices: Vec<String> = tree
        .mains()
        .iter()
        .enumerate()
        .map(|(i, main)| format!("[{i}] {}", main.name))
        .collect();
    writeln!(
        out,
        "Select main category (v=View all categories, m=Commit message, b=Back): \n\t{}",
        choices.join(" | ")
    )?;
    out.flush()
}

/// Prompt for a sub-category of `main`
pub fn sub_prompt(out: &mut impl Write, index: usize, main: &MainCategory) -> io::Result<()> {
    let choices: Vec<String> = main
        .subcategories
        .iter()
        .enumerate()
        .map(|(i, sub)| format!("[{i}] {sub}"))
        .collect();
    writeln!(
        out,
        "[{index}] {}: Select sub category (v=View all categories, m=Commit message, \
         Enter=No sub-category, b=Select other main category): \n\t{}",
        main.name,
        choices.join(" | ")
    )?;
    out.flush()
}

/// Report input that means nothing at this point
pub fn invalid(out: &mut impl Write, input: &str) -> io::Result<()> {
    writeln!(out, "Invalid input {input:?}")
}

/// Report an accept that could not be recorded
pub fn not_accepted(out: &mut impl Write, reason: &impl std::fmt::Display) -> io::Result<()> {
    writeln!(out, "{} {reason}", "Not accepted:".red().bold())
}

/// Final counts of the written files
pub fn exit_summary(out: &mut impl Write, tally: Tally) -> io::Result<()> {
    writeln!(
        out,
        "  Written {} ({}) {} ({}) {} ({}) {} ({})",
        ACCEPT_FILE.green(),
        tally.accepted,
        ACCEPT_LOG_FILE.yellow(),
        tally.accepted,
        ACCEPT_PRETTY_FILE.blue(),
        tally.accepted,
        REJECT_FILE.red(),
        tally.rejected
    )
}
