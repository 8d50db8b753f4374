// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate contains the integration test suite for the note editing crates.
//!
//! - The `util` module contains helpers shared by the topic modules.
//! - We do not use the default Rust test harness, but instead use this `mod.rs` file as the
//!   entry point to run all other tests, so that shared helpers live in one place.
//! - Put new tests into the module matching their topic (document, codec, formatting, session,
//!   store) and start the test name with that topic, e.g. `session_toggle_bold_on_caret`.

#![allow(missing_docs, reason = "we don't need docs for testing")]

mod document;
mod util;
