// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rich Text is a run-based attributed text model for note content.
//!
//! A [`RichText`] is a UTF-8 string partitioned into runs, each carrying one [`Attributes`]
//! mapping drawn from a closed vocabulary of [`AttributeKey`]s. Which keys a processing context
//! may see is declared once in a [`ScopeRegistry`]: derived visual keys are visible while editing
//! but are never persisted by the [`AttributeCodec`].
//!
//! ## Example
//!
//! ```
//! use rich_text::{AttributeCodec, Attributes, LocationId, RichText};
//!
//! let mut text = RichText::new("Meet at ");
//! let pill = Attributes {
//!     location: Some(LocationId::new("cafe")),
//!     ..Attributes::default()
//! };
//! text.push_str("Cafe", pill);
//!
//! let codec = AttributeCodec::storage();
//! let bytes = codec.encode(&text).unwrap();
//! assert_eq!(codec.decode(&bytes).unwrap(), text);
//! ```
//!
//! ## Features
//!
//! - `std` (enabled by default): Enables `std` support in the serialization and logging
//!   dependencies.
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

mod attribute;
mod attribute_set;
mod codec;
mod error;
mod rich_text;
mod scope;

pub use crate::attribute::{
    AttributeKey, AttributeValue, Attributes, Font, FontSize, FontWeight, Invalidation,
    LineStyle, ListFormat, LocationId, ParagraphFormat, RunBoundary, SemanticColor,
};
pub use crate::attribute_set::AttributeSet;
pub use crate::codec::{AttributeCodec, CodecError, CodecErrorKind, StoredText};
pub use crate::error::{Error, ErrorKind};
pub use crate::rich_text::{RichText, Runs};
pub use crate::scope::{
    AttributeScope, KeyDeclaration, ScopeError, ScopeErrorKind, ScopeRegistry,
    STANDARD_DECLARATIONS,
};
