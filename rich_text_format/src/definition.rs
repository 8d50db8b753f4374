// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::vec::Vec;

use rich_text::{AttributeScope, RichText, ScopeError, ScopeRegistry};

use crate::{
    Constraint, Derived, FormattingContext, HeadingColor, LocationPillBackground,
    LocationPillForeground, NormalizeFonts,
};

/// An ordered list of [`Constraint`]s applied as one formatting pass.
///
/// Constraints run in declaration order, each over the whole text, so later constraints see the
/// values derived by earlier ones.
#[derive(Debug)]
pub struct FormattingDefinition {
    constraints: Vec<Box<dyn Constraint>>,
}

impl FormattingDefinition {
    /// Starts declaring a definition.
    pub fn builder() -> FormattingDefinitionBuilder {
        FormattingDefinitionBuilder::default()
    }

    /// The formatting pass used for note content.
    ///
    /// Fonts are normalized first, then heading colors are derived, then location pills are
    /// decorated.
    pub fn note(registry: &ScopeRegistry) -> Result<Self, ScopeError> {
        Self::builder()
            .constraint(NormalizeFonts)
            .constraint(HeadingColor)
            .constraint(LocationPillBackground)
            .constraint(LocationPillForeground)
            .build(registry)
    }

    /// The constraints, in application order.
    pub fn constraints(&self) -> impl Iterator<Item = &dyn Constraint> + '_ {
        self.constraints.iter().map(Box::as_ref)
    }

    /// Re-derives every constrained key over the whole of `text`.
    pub fn apply(&self, text: &mut RichText, context: &FormattingContext) {
        log::debug!(
            "formatting {} bytes with {} constraints, {} pill locations",
            text.len(),
            self.constraints.len(),
            context.pill_locations().len()
        );
        for constraint in &self.constraints {
            let key = constraint.key();
            text.map_attributes(|attributes| match constraint.constrain(attributes, context) {
                Derived::Unchanged => {}
                Derived::Set(value) if value.key() == key => attributes.set(value),
                Derived::Set(value) => log::warn!(
                    "constraint `{}` derived `{}` but only writes `{key}`; ignoring it",
                    constraint.name(),
                    value.key()
                ),
                Derived::Cleared => attributes.remove(key),
            });
        }
    }
}

/// Builder for [`FormattingDefinition`].
#[derive(Debug, Default)]
#[must_use]
pub struct FormattingDefinitionBuilder {
    constraints: Vec<Box<dyn Constraint>>,
}

impl FormattingDefinitionBuilder {
    /// Appends a constraint to the pass.
    pub fn constraint(mut self, constraint: impl Constraint + 'static) -> Self {
        self.constraints.push(Box::new(constraint));
        self
    }

    /// Checks every read and written key against the editing scope of `registry`.
    pub fn build(self, registry: &ScopeRegistry) -> Result<FormattingDefinition, ScopeError> {
        for constraint in &self.constraints {
            registry.require(constraint.key(), AttributeScope::Editing)?;
            for key in constraint.reads() {
                registry.require(*key, AttributeScope::Editing)?;
            }
        }
        Ok(FormattingDefinition {
            constraints: self.constraints,
        })
    }
}
