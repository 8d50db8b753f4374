// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scope-restricted serialization of [`RichText`].
//!
//! The wire form is a JSON object holding the plain text and its runs:
//!
//! ```json
//! {"text":"Hi there","runs":[{"start":0,"end":3,"attrs":{}},{"start":3,"end":8,"attrs":{"font":{"size":"body","weight":"bold","italic":false}}}]}
//! ```
//!
//! Offsets are UTF-8 byte indices. Only keys visible in the codec's [`AttributeScope`] are
//! written, and keys outside it are dropped when reading.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::OnceCell;
use core::fmt;

use serde::{Deserialize, Serialize};

use crate::rich_text::Run;
use crate::{AttributeScope, Attributes, RichText, ScopeRegistry};

#[derive(Serialize)]
struct EncodedText<'a> {
    text: &'a str,
    runs: Vec<EncodedRun<'a>>,
}

#[derive(Serialize)]
struct EncodedRun<'a> {
    start: usize,
    end: usize,
    attrs: &'a Attributes,
}

#[derive(Deserialize)]
struct DecodedText {
    text: String,
    #[serde(default)]
    runs: Vec<DecodedRun>,
}

#[derive(Deserialize)]
struct DecodedRun {
    start: usize,
    end: usize,
    #[serde(default)]
    attrs: Attributes,
}

/// Encodes and decodes [`RichText`] restricted to one [`AttributeScope`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeCodec {
    registry: ScopeRegistry,
    scope: AttributeScope,
}

impl Default for AttributeCodec {
    fn default() -> Self {
        Self::storage()
    }
}

impl AttributeCodec {
    /// A codec for `scope` of `registry`.
    pub fn new(registry: ScopeRegistry, scope: AttributeScope) -> Self {
        Self { registry, scope }
    }

    /// The codec used for persisted note content.
    pub fn storage() -> Self {
        Self::new(ScopeRegistry::standard(), AttributeScope::Storage)
    }

    /// The scope this codec reads and writes.
    pub fn scope(&self) -> AttributeScope {
        self.scope
    }

    /// Serializes `text`, dropping keys outside the codec's scope.
    pub fn encode(&self, text: &RichText) -> Result<Vec<u8>, CodecError> {
        let restricted = text.restricted_to(&self.registry, self.scope);
        let encoded = EncodedText {
            text: restricted.as_str(),
            runs: restricted
                .runs()
                .map(|(range, attrs)| EncodedRun {
                    start: range.start,
                    end: range.end,
                    attrs,
                })
                .collect(),
        };
        serde_json::to_vec(&encoded).map_err(|err| CodecError::new(CodecErrorKind::Encode, err))
    }

    /// Deserializes text written by [`encode`](Self::encode).
    ///
    /// Fails with [`CodecErrorKind::CorruptData`] when the bytes are not valid JSON, carry values
    /// outside the attribute vocabulary, or describe runs that do not tile the text.
    pub fn decode(&self, bytes: &[u8]) -> Result<RichText, CodecError> {
        let decoded: DecodedText = serde_json::from_slice(bytes)
            .map_err(|err| CodecError::new(CodecErrorKind::CorruptData, err))?;
        let text = decoded.text;

        let mut runs = Vec::with_capacity(decoded.runs.len());
        let mut expected = 0;
        for run in decoded.runs {
            if run.start != expected || run.end <= run.start || run.end > text.len() {
                return Err(CodecError::new(
                    CodecErrorKind::CorruptData,
                    format_args!(
                        "run {}..{} does not continue from {expected} within {} bytes",
                        run.start,
                        run.end,
                        text.len()
                    ),
                ));
            }
            if !text.is_char_boundary(run.end) {
                return Err(CodecError::new(
                    CodecErrorKind::CorruptData,
                    format_args!("run end {} is not on a character boundary", run.end),
                ));
            }
            let mut attributes = run.attrs;
            attributes.retain(|key| self.registry.contains(key, self.scope));
            runs.push(Run {
                range: run.start..run.end,
                attributes,
            });
            expected = run.end;
        }
        if expected != text.len() {
            return Err(CodecError::new(
                CodecErrorKind::CorruptData,
                format_args!("runs cover {expected} of {} bytes", text.len()),
            ));
        }
        Ok(RichText::from_parts(text, runs))
    }

    /// Like [`decode`](Self::decode), but substitutes an empty document on failure.
    pub fn decode_or_empty(&self, bytes: &[u8]) -> RichText {
        self.decode(bytes).unwrap_or_else(|err| {
            log::warn!("discarding undecodable note content: {err}");
            RichText::default()
        })
    }
}

/// Error returned by [`AttributeCodec`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodecError {
    kind: CodecErrorKind,
    detail: String,
}

impl CodecError {
    fn new(kind: CodecErrorKind, detail: impl fmt::Display) -> Self {
        Self {
            kind,
            detail: detail.to_string(),
        }
    }

    /// The category of this error.
    pub fn kind(&self) -> CodecErrorKind {
        self.kind
    }

    /// A human-readable description of what went wrong.
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            CodecErrorKind::CorruptData => write!(f, "corrupt rich text data: {}", self.detail),
            CodecErrorKind::Encode => write!(f, "failed to encode rich text: {}", self.detail),
        }
    }
}

impl core::error::Error for CodecError {}

/// The category of a [`CodecError`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum CodecErrorKind {
    /// The input is not a valid encoding.
    CorruptData,
    /// The value could not be serialized.
    Encode,
}

/// Persisted rich text content with lazy decoding.
///
/// The raw bytes are decoded on first access to [`value`](Self::value); undecodable bytes read
/// as an empty document. Bytes are only re-encoded by [`will_save`](Self::will_save) after the
/// value was replaced.
#[derive(Clone, Debug, Default)]
pub struct StoredText {
    data: Vec<u8>,
    value: OnceCell<RichText>,
    changed: bool,
    codec: AttributeCodec,
}

impl StoredText {
    /// Wraps previously persisted bytes.
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }

    /// A record holding `value` that has not been encoded yet.
    pub fn from_value(value: RichText) -> Self {
        Self {
            value: OnceCell::from(value),
            changed: true,
            ..Self::default()
        }
    }

    /// The decoded content.
    pub fn value(&self) -> &RichText {
        self.value.get_or_init(|| {
            if self.data.is_empty() {
                RichText::default()
            } else {
                self.codec.decode_or_empty(&self.data)
            }
        })
    }

    /// Replaces the content and marks the record as changed.
    pub fn set_value(&mut self, value: RichText) {
        self.value = OnceCell::from(value);
        self.changed = true;
    }

    /// Returns `true` if the content changed since it was last encoded.
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Encodes the content if it changed, returning whether new bytes were produced.
    pub fn will_save(&mut self) -> Result<bool, CodecError> {
        if !self.changed {
            return Ok(false);
        }
        if let Some(value) = self.value.get() {
            self.data = self.codec.encode(value)?;
        }
        self.changed = false;
        Ok(true)
    }

    /// The persisted bytes, as of the last [`will_save`](Self::will_save).
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}
