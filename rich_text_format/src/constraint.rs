// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt::Debug;

use rich_text::{AttributeKey, AttributeValue, Attributes};

use crate::FormattingContext;

/// The outcome of evaluating a [`Constraint`] on one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Derived {
    /// Leave the constrained key as it is.
    Unchanged,
    /// Set the constrained key to this value.
    Set(AttributeValue),
    /// Unset the constrained key.
    Cleared,
}

/// A declarative rule deriving one attribute key from others.
///
/// A constraint writes only [`key`](Self::key). Its output depends only on the attributes of the
/// run it is evaluated on and on the [`FormattingContext`], never on neighbouring runs.
pub trait Constraint: Debug {
    /// A short name used in log output.
    fn name(&self) -> &'static str;

    /// The key this constraint writes.
    fn key(&self) -> AttributeKey;

    /// The keys this constraint inspects.
    fn reads(&self) -> &'static [AttributeKey];

    /// Evaluates the rule for one run.
    fn constrain(&self, attributes: &Attributes, context: &FormattingContext) -> Derived;
}
