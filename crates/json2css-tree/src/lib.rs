//! json2css Tree
//!
//! The typed model of a stylesheet's structure, plus the JSON side of it:
//! decoding a JSON document into the tree and serializing a tree back out.
//!
//! ```text
//! JSON → Decoder (+ Registry) → Vec<Statement> → serde_json → JSON
//! ```

pub mod ast;
pub mod decode;
pub mod registry;

pub use ast::{
    AtRule, Attribute, CharsetInfo, Combinator, Condition, Declaration, FontFaceInfo, Identifier,
    Information, KeyframesInfo, MediaInfo, MediaType, Pseudo, Query, Ruleset, Selector, Simple,
    Statement, Value,
};
pub use decode::Decoder;
pub use registry::{InformationKind, Registry};

/// Errors raised while turning JSON into a tree.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid stylesheet JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown at-rule identifier type {0:?}")]
    UnknownIdentifierType(String),

    #[error("invalid information for @{tag}: {source}")]
    InvalidInformation {
        tag: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("statement has both an at-rule and a ruleset")]
    AmbiguousStatement,
}

/// Decode a JSON array of statements using the standard registry.
pub fn from_str(json: &str) -> Result<Vec<Statement>, DecodeError> {
    Decoder::new(&Registry::standard()).decode_str(json)
}

/// Serialize statements to compact JSON.
pub fn to_string(statements: &[Statement]) -> Result<String, serde_json::Error> {
    serde_json::to_string(statements)
}

pub fn to_string_pretty(statements: &[Statement]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(statements)
}

pub fn to_vec(statements: &[Statement]) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(statements)
}
