// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative formatting for [`rich_text`].
//!
//! A [`FormattingDefinition`] is an ordered list of [`Constraint`]s. Each constraint derives one
//! attribute key of a run from the run's other attributes and a [`FormattingContext`]. Applying
//! the definition re-derives those keys over the whole text, so the result depends only on the
//! semantic attributes and the context, never on formatting applied earlier.
//!
//! ## Example
//!
//! ```
//! use rich_text::{ParagraphFormat, RichText, ScopeRegistry};
//! use rich_text_format::{FormattingContext, FormattingDefinition};
//!
//! let definition = FormattingDefinition::note(&ScopeRegistry::standard()).unwrap();
//! let mut text = RichText::new("Title\nBody");
//! text.transform(0..6, |attrs| attrs.paragraph_format = Some(ParagraphFormat::Heading1))
//!     .unwrap();
//!
//! definition.apply(&mut text, &FormattingContext::default());
//! assert!(text.attributes_at(0).unwrap().font.is_some());
//! assert!(text.attributes_at(6).unwrap().font.is_none());
//! ```
//!
//! ## Features
//!
//! - `std` (enabled by default): Enables `std` support in dependencies.
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

extern crate alloc;

mod constraint;
mod constraints;
mod context;
mod definition;


pub use crate::constraint::{Constraint, Derived};
pub use crate::constraints::{
    HeadingColor, LocationPillBackground, LocationPillForeground, NormalizeFonts,
};
pub use crate::context::FormattingContext;
pub use crate::definition::{FormattingDefinition, FormattingDefinitionBuilder};
