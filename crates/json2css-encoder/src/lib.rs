//! json2css Encoder
//!
//! Serializes a stylesheet tree into CSS text. Each node writes its own
//! canonical form; parents add the grammar punctuation between children
//! (commas between selectors, semicolons between declarations, braces
//! around blocks).
//!
//! ```text
//! Vec<Statement> → Encoder::encode() → b"p,span{color:red};"
//! ```
//!
//! Every top-level statement is followed by `;`, including the last one.

mod at_rule;
mod emitter;
mod rule;
mod selector;

use std::io::{self, Write};

use json2css_tree::{Registry, Statement};

use crate::emitter::{Emitter, SEMICOLON};

/// Encoding error.
///
/// The first error stops encoding. Bytes already written to the sink stay
/// there; callers should discard the output on error.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("ruleset has no declarations")]
    MissingDeclaration,

    #[error("ruleset has no selectors")]
    MissingSelector,

    #[error("unknown at-rule identifier type {0:?}")]
    UnknownIdentifierType(String),

    #[error("@{tag} cannot carry {found} information")]
    InformationMismatch { tag: String, found: &'static str },

    #[error("nesting deeper than {limit} levels")]
    DepthLimitExceeded { limit: usize },

    #[error("failed to write CSS output: {0}")]
    Io(#[from] io::Error),
}

/// Knobs for one [`Encoder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Reject rulesets with an empty selector list (`MissingSelector`).
    pub require_selectors: bool,
    /// Maximum nesting of `:not(...)` and at-rule bodies.
    pub max_depth: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            require_selectors: false,
            max_depth: 64,
        }
    }
}

/// A configured encoder. Stateless between calls; share it freely.
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    registry: Registry,
    options: EncodeOptions,
}

impl Encoder {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            options: EncodeOptions::default(),
        }
    }

    pub fn with_options(mut self, options: EncodeOptions) -> Self {
        self.options = options;
        self
    }

    /// Encode statements into a fresh buffer.
    pub fn encode(&self, statements: &[Statement]) -> Result<Vec<u8>, EncodeError> {
        let mut buf = Vec::new();
        self.encode_to(statements, &mut buf)?;
        log::debug!(
            "encoded {} statement(s) into {} byte(s)",
            statements.len(),
            buf.len()
        );
        Ok(buf)
    }

    /// Encode statements into `dst`, failing if the sink does.
    pub fn encode_to<W: Write>(&self, statements: &[Statement], dst: W) -> Result<(), EncodeError> {
        let mut emitter = Emitter::new(dst, &self.registry, &self.options);
        for statement in statements {
            emitter.statement(statement)?;
            emitter.byte(SEMICOLON)?;
        }
        Ok(())
    }

    pub fn encode_to_string(&self, statements: &[Statement]) -> Result<String, EncodeError> {
        let bytes = self.encode(statements)?;
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
    }
}

/// Encode statements with the standard registry and default options.
pub fn encode(statements: &[Statement]) -> Result<Vec<u8>, EncodeError> {
    Encoder::default().encode(statements)
}

impl<W: Write> Emitter<'_, W> {
    pub(crate) fn statement(&mut self, statement: &Statement) -> Result<(), EncodeError> {
        match statement {
            Statement::AtRule(rule) => self.at_rule(rule),
            Statement::Ruleset(ruleset) => self.ruleset(ruleset),
            Statement::Empty => Ok(()),
        }
    }
}
