// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declared visibility of attribute keys per processing context.
//!
//! Every [`AttributeKey`] must be declared exactly once, stating whether it is persisted
//! ([`AttributeScope::Storage`]) and whether it is visible in the live editor
//! ([`AttributeScope::Editing`]). Derived visual keys are editing-only: they are recomputed
//! rather than stored.

use alloc::vec::Vec;
use core::fmt;

use crate::AttributeKey;

/// A processing context that sees a subset of attribute keys.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AttributeScope {
    /// Keys that are persisted by the codec.
    Storage,
    /// Keys visible in the live editor.
    Editing,
}

impl fmt::Display for AttributeScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Storage => "storage",
            Self::Editing => "editing",
        })
    }
}

/// Scope membership of one key.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KeyDeclaration {
    /// The declared key.
    pub key: AttributeKey,
    /// Whether the key is visible in [`AttributeScope::Storage`].
    pub storage: bool,
    /// Whether the key is visible in [`AttributeScope::Editing`].
    pub editing: bool,
}

impl KeyDeclaration {
    /// Returns `true` if the key is visible in `scope`.
    pub const fn is_in(self, scope: AttributeScope) -> bool {
        match scope {
            AttributeScope::Storage => self.storage,
            AttributeScope::Editing => self.editing,
        }
    }
}

/// The built-in declaration table for note content.
pub const STANDARD_DECLARATIONS: &[KeyDeclaration] = &[
    KeyDeclaration {
        key: AttributeKey::ParagraphFormat,
        storage: true,
        editing: true,
    },
    KeyDeclaration {
        key: AttributeKey::ListFormat,
        storage: true,
        editing: true,
    },
    KeyDeclaration {
        key: AttributeKey::Location,
        storage: true,
        editing: true,
    },
    KeyDeclaration {
        key: AttributeKey::Font,
        storage: true,
        editing: true,
    },
    KeyDeclaration {
        key: AttributeKey::Underline,
        storage: true,
        editing: true,
    },
    KeyDeclaration {
        key: AttributeKey::Strikethrough,
        storage: true,
        editing: true,
    },
    KeyDeclaration {
        key: AttributeKey::ForegroundColor,
        storage: false,
        editing: true,
    },
    KeyDeclaration {
        key: AttributeKey::BackgroundColor,
        storage: false,
        editing: true,
    },
];

/// A validated table of key declarations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScopeRegistry {
    declarations: Vec<KeyDeclaration>,
}

impl Default for ScopeRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl ScopeRegistry {
    /// Validates a declaration table.
    ///
    /// Fails if a key is missing, declared twice, or persisted without being editable.
    pub fn new(declarations: &[KeyDeclaration]) -> Result<Self, ScopeError> {
        for key in AttributeKey::ALL {
            let mut matching = declarations.iter().filter(|d| d.key == key);
            let Some(declaration) = matching.next() else {
                return Err(ScopeError::new(ScopeErrorKind::Undeclared, key, None));
            };
            if matching.next().is_some() {
                return Err(ScopeError::new(
                    ScopeErrorKind::DuplicateDeclaration,
                    key,
                    None,
                ));
            }
            if declaration.storage && !declaration.editing {
                return Err(ScopeError::new(
                    ScopeErrorKind::NotInEditing,
                    key,
                    Some(AttributeScope::Editing),
                ));
            }
        }
        Ok(Self {
            declarations: declarations.to_vec(),
        })
    }

    /// The registry built from [`STANDARD_DECLARATIONS`].
    pub fn standard() -> Self {
        Self {
            declarations: STANDARD_DECLARATIONS.to_vec(),
        }
    }

    /// The declaration of `key`.
    pub fn declaration(&self, key: AttributeKey) -> Option<&KeyDeclaration> {
        self.declarations.iter().find(|d| d.key == key)
    }

    /// Returns `true` if `key` is visible in `scope`.
    pub fn contains(&self, key: AttributeKey, scope: AttributeScope) -> bool {
        self.declaration(key).is_some_and(|d| d.is_in(scope))
    }

    /// The keys visible in `scope`, in declaration order.
    pub fn keys(&self, scope: AttributeScope) -> impl Iterator<Item = AttributeKey> + '_ {
        self.declarations
            .iter()
            .filter(move |d| d.is_in(scope))
            .map(|d| d.key)
    }

    /// Fails with [`ScopeErrorKind::NotInScope`] unless `key` is visible in `scope`.
    pub fn require(&self, key: AttributeKey, scope: AttributeScope) -> Result<(), ScopeError> {
        if self.contains(key, scope) {
            Ok(())
        } else {
            Err(ScopeError::new(ScopeErrorKind::NotInScope, key, Some(scope)))
        }
    }
}

/// A configuration error in a scope declaration or in a component that depends on one.
///
/// These are startup errors: they describe a wiring mistake, not a runtime condition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScopeError {
    kind: ScopeErrorKind,
    key: AttributeKey,
    scope: Option<AttributeScope>,
}

impl ScopeError {
    pub(crate) const fn new(
        kind: ScopeErrorKind,
        key: AttributeKey,
        scope: Option<AttributeScope>,
    ) -> Self {
        Self { kind, key, scope }
    }

    /// The category of this error.
    pub fn kind(&self) -> ScopeErrorKind {
        self.kind
    }

    /// The offending key.
    pub fn key(&self) -> AttributeKey {
        self.key
    }

    /// The scope the key was required in, when relevant.
    pub fn scope(&self) -> Option<AttributeScope> {
        self.scope
    }
}

impl fmt::Display for ScopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.scope) {
            (ScopeErrorKind::Undeclared, _) => {
                write!(f, "attribute key `{}` has no scope declaration", self.key)
            }
            (ScopeErrorKind::DuplicateDeclaration, _) => {
                write!(f, "attribute key `{}` is declared more than once", self.key)
            }
            (ScopeErrorKind::NotInEditing, _) => write!(
                f,
                "attribute key `{}` is persisted but not visible while editing",
                self.key
            ),
            (ScopeErrorKind::NotInScope, Some(scope)) => write!(
                f,
                "attribute key `{}` is not registered in the {scope} scope",
                self.key
            ),
            (ScopeErrorKind::NotInScope, None) => {
                write!(f, "attribute key `{}` is not registered", self.key)
            }
        }
    }
}

impl core::error::Error for ScopeError {}

/// The category of a [`ScopeError`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScopeErrorKind {
    /// A key has no declaration.
    Undeclared,
    /// A key is declared more than once.
    DuplicateDeclaration,
    /// A key is persisted but not visible in the editing scope.
    NotInEditing,
    /// A key was required in a scope it is not declared in.
    NotInScope,
}
