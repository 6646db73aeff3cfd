//! Stylesheet tree.
//!
//! Every node mirrors one piece of CSS grammar: statements at the top,
//! at-rules and rulesets below them, then selectors and declarations.
//! Field names on the JSON side follow the established wire format
//! (`atrule`, `ident`, `combinate`, `pseudo_classes`, ...).
//!
//! Textual fields that are optional in CSS are plain `String`s where the
//! empty string means "absent". Empty fields and lists are skipped when
//! the tree is serialized back to JSON.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::registry::InformationKind;

// ---------------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------------

/// A top-level (or nested) building block of a stylesheet.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Statement {
    /// An `@`-rule such as `@media` or `@charset`.
    AtRule(AtRule),

    /// A selector list with its declaration block.
    Ruleset(Ruleset),

    /// A statement with neither part populated. Encodes to nothing.
    #[default]
    Empty,
}

impl Serialize for Statement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match self {
            Statement::AtRule(rule) => map.serialize_entry("atrule", rule)?,
            Statement::Ruleset(ruleset) => map.serialize_entry("ruleset", ruleset)?,
            Statement::Empty => {}
        }
        map.end()
    }
}

impl From<AtRule> for Statement {
    fn from(rule: AtRule) -> Self {
        Statement::AtRule(rule)
    }
}

impl From<Ruleset> for Statement {
    fn from(ruleset: Ruleset) -> Self {
        Statement::Ruleset(ruleset)
    }
}

/// An at-rule: its identifier plus an optional body of nested statements.
///
/// `@keyframes` and `@media` carry their rulesets in `nested`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtRule {
    #[serde(rename = "ident")]
    pub identifier: Identifier,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<Statement>,
}

impl AtRule {
    pub fn new(identifier: Identifier) -> Self {
        Self {
            identifier,
            nested: Vec::new(),
        }
    }

    pub fn with_nested(mut self, nested: Vec<Statement>) -> Self {
        self.nested = nested;
        self
    }
}

/// The `@type info` head of an at-rule.
///
/// `kind` is the registry tag (`charset`, `media`, ...). The concrete
/// `Information` variant is chosen from that tag when decoding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identifier {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<Information>,
}

impl Identifier {
    /// Build an identifier whose tag is the canonical tag of `info`.
    pub fn from_info(info: Information) -> Self {
        Self {
            kind: info.kind().tag().to_string(),
            info: Some(info),
        }
    }
}

/// The at-rule specific payload.
///
/// Serialized without a tag: the tag lives on the enclosing [`Identifier`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Information {
    Charset(CharsetInfo),
    Keyframes(KeyframesInfo),
    Media(MediaInfo),
    FontFace(FontFaceInfo),
}

impl Information {
    pub fn kind(&self) -> InformationKind {
        match self {
            Information::Charset(_) => InformationKind::Charset,
            Information::Keyframes(_) => InformationKind::Keyframes,
            Information::Media(_) => InformationKind::Media,
            Information::FontFace(_) => InformationKind::FontFace,
        }
    }
}

/// `@charset "value"`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CharsetInfo {
    #[serde(default)]
    pub value: String,
}

/// `@keyframes name`. The frames themselves are the at-rule's nested rulesets.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KeyframesInfo {
    #[serde(default)]
    pub value: String,
}

/// `@media query, query`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MediaInfo {
    #[serde(default)]
    pub queries: Vec<Query>,
}

/// `@font-face {declarations}`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FontFaceInfo {
    #[serde(default)]
    pub declarations: Vec<Declaration>,
}

// ---------------------------------------------------------------------------
// Media queries
// ---------------------------------------------------------------------------

/// One media query: an optional media type followed by conditions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Query {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<MediaType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

/// A media type with an optional `only` / `not` prefix.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub operator: String,
    #[serde(default)]
    pub value: String,
}

/// A `(feature:value)` test with an optional `and` / `or` prefix.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub operator: String,
    #[serde(default)]
    pub feature: String,
    #[serde(default)]
    pub value: String,
}

// ---------------------------------------------------------------------------
// Rulesets and selectors
// ---------------------------------------------------------------------------

/// `selector,selector{declaration;declaration}`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Ruleset {
    #[serde(default)]
    pub selectors: Vec<Selector>,
    #[serde(default)]
    pub declarations: Vec<Declaration>,
}

impl Ruleset {
    pub fn new(selectors: Vec<Selector>, declarations: Vec<Declaration>) -> Self {
        Self {
            selectors,
            declarations,
        }
    }
}

/// A simple selector followed by a chain of combinators.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Selector {
    #[serde(default)]
    pub simple: Simple,
    #[serde(rename = "combinate", default, skip_serializing_if = "Vec::is_empty")]
    pub combinators: Vec<Combinator>,
}

impl Selector {
    pub fn new(simple: Simple) -> Self {
        Self {
            simple,
            combinators: Vec::new(),
        }
    }

    /// Append `combinator simple` to the chain.
    pub fn then(mut self, combinator: &str, simple: Simple) -> Self {
        self.combinators.push(Combinator {
            combinator: combinator.to_string(),
            simple,
        });
        self
    }
}

impl From<Simple> for Selector {
    fn from(simple: Simple) -> Self {
        Selector::new(simple)
    }
}

/// A relationship operator (`>`, `~`, `+`, or a space) and the selector after it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Combinator {
    #[serde(default)]
    pub combinator: String,
    #[serde(default)]
    pub simple: Simple,
}

/// A sequence of simple selectors applying to one element.
///
/// Negations are themselves `Simple`s, so `:not(:not(...))` nests freely.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Simple {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub element: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pseudo_elements: Vec<Pseudo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pseudo_classes: Vec<Pseudo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub negations: Vec<Simple>,
}

impl Simple {
    /// A simple selector naming only an element (`div`, `*`, `ns|*`).
    pub fn element(name: &str) -> Self {
        Self {
            element: name.to_string(),
            ..Self::default()
        }
    }
}

/// A pseudo-class or pseudo-element: `ident` or `ident(func)`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Pseudo {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ident: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub func: String,
}

impl Pseudo {
    pub fn ident(ident: &str) -> Self {
        Self {
            ident: ident.to_string(),
            func: String::new(),
        }
    }

    pub fn function(ident: &str, func: &str) -> Self {
        Self {
            ident: ident.to_string(),
            func: func.to_string(),
        }
    }
}

/// An attribute matcher: `[attr]`, `[attr op "value"]`, `[attr op "value" modifier]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(default)]
    pub attr: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub operator: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub modifier: String,
}

// ---------------------------------------------------------------------------
// Declarations
// ---------------------------------------------------------------------------

/// `property:a b,c d`: comma-separated groups of space-separated tokens.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "DeclarationRepr")]
pub struct Declaration {
    pub property: String,
    pub values: Vec<Value>,
}

impl Declaration {
    /// A declaration with a single value group.
    pub fn new(property: &str, tokens: &[&str]) -> Self {
        Self {
            property: property.to_string(),
            values: vec![Value::from(tokens)],
        }
    }

    /// A declaration with several comma-separated value groups.
    pub fn grouped(property: &str, groups: &[&[&str]]) -> Self {
        Self {
            property: property.to_string(),
            values: groups.iter().map(|tokens| Value::from(*tokens)).collect(),
        }
    }
}

/// One comma-separated group of a declaration value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Value {
    #[serde(default)]
    pub values: Vec<String>,
}

impl From<&[&str]> for Value {
    fn from(tokens: &[&str]) -> Self {
        Self {
            values: tokens.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Accepts both the grouped form (`"values": [{"values": [...]}]`) and the
/// flat single-group form (`"value": ["1px", "solid", "red"]`).
#[derive(Deserialize)]
struct DeclarationRepr {
    #[serde(default)]
    property: String,
    #[serde(default)]
    values: Vec<Value>,
    #[serde(default)]
    value: Vec<String>,
}

impl From<DeclarationRepr> for Declaration {
    fn from(repr: DeclarationRepr) -> Self {
        let mut values = repr.values;
        if !repr.value.is_empty() {
            values.push(Value { values: repr.value });
        }
        Self {
            property: repr.property,
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_declaration_flat_value() {
        let decl: Declaration =
            serde_json::from_str(r#"{"property":"border","value":["1px","solid","red"]}"#)
                .unwrap();
        assert_eq!(decl, Declaration::new("border", &["1px", "solid", "red"]));
    }

    #[test]
    fn test_declaration_grouped_values() {
        let decl: Declaration = serde_json::from_str(
            r#"{"property":"font-family",
                "values":[{"values":["Open","Sans"]},{"values":["serif"]}]}"#,
        )
        .unwrap();
        assert_eq!(
            decl,
            Declaration::grouped("font-family", &[&["Open", "Sans"], &["serif"]])
        );
    }

    #[test]
    fn test_declaration_serializes_grouped() {
        let json = serde_json::to_string(&Declaration::new("color", &["red"])).unwrap();
        assert_eq!(json, r#"{"property":"color","values":[{"values":["red"]}]}"#);
    }

    #[test]
    fn test_simple_skips_empty_fields() {
        let json = serde_json::to_string(&Simple::element("p")).unwrap();
        assert_eq!(json, r#"{"element":"p"}"#);
    }

    #[test]
    fn test_selector_combinate_field() {
        let selector: Selector = serde_json::from_str(
            r#"{"simple":{"element":"div"},
                "combinate":[{"combinator":">","simple":{"element":"p"}}]}"#,
        )
        .unwrap();
        assert_eq!(selector, Selector::new(Simple::element("div")).then(">", Simple::element("p")));
    }

    #[test]
    fn test_empty_statement_serializes_to_empty_object() {
        assert_eq!(serde_json::to_string(&Statement::Empty).unwrap(), "{}");
    }

    #[test]
    fn test_identifier_serializes_info_untagged() {
        let ident = Identifier::from_info(Information::Charset(CharsetInfo {
            value: "utf-8".into(),
        }));
        assert_eq!(
            serde_json::to_string(&ident).unwrap(),
            r#"{"type":"charset","info":{"value":"utf-8"}}"#
        );
    }

    #[test]
    fn test_information_kind() {
        let info = Information::Media(MediaInfo::default());
        assert_eq!(info.kind(), InformationKind::Media);
    }
}
