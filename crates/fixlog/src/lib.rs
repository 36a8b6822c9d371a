// Copyright (c) 2026 - present fixlog contributors
// SPDX-License-Identifier: MIT

//! fixlog library
//!
//! This module exports the review tool's building blocks for use in
//! integration tests and by the `fixlog` binary.

pub mod app;
pub mod config;
pub mod display;
pub mod filter;
pub mod input;
pub mod session;
