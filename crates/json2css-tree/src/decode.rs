//! JSON → tree decoding.
//!
//! serde handles the shape of the document. The only part it cannot do on
//! its own is the at-rule payload, whose type depends on the sibling `type`
//! tag; that is resolved here against an explicit [`Registry`].

use serde::Deserialize;

use crate::ast::{AtRule, Identifier, Ruleset, Statement};
use crate::registry::Registry;
use crate::DecodeError;

/// A statement as it appears on the wire, before at-rule payloads are typed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawStatement {
    #[serde(default)]
    pub atrule: Option<RawAtRule>,
    #[serde(default)]
    pub ruleset: Option<Ruleset>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAtRule {
    pub ident: RawIdentifier,
    #[serde(default)]
    pub nested: Vec<RawStatement>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub info: Option<serde_json::Value>,
}

/// Resolves raw statements into the typed tree.
pub struct Decoder<'r> {
    registry: &'r Registry,
}

impl<'r> Decoder<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Decode a JSON array of statements.
    pub fn decode_str(&self, json: &str) -> Result<Vec<Statement>, DecodeError> {
        let raw: Vec<RawStatement> = serde_json::from_str(json)?;
        self.decode_raw(raw)
    }

    pub fn decode_slice(&self, json: &[u8]) -> Result<Vec<Statement>, DecodeError> {
        let raw: Vec<RawStatement> = serde_json::from_slice(json)?;
        self.decode_raw(raw)
    }

    pub fn decode_value(&self, json: serde_json::Value) -> Result<Vec<Statement>, DecodeError> {
        let raw: Vec<RawStatement> = serde_json::from_value(json)?;
        self.decode_raw(raw)
    }

    /// Type the at-rule payloads of already-deserialized statements.
    pub fn decode_raw(&self, raw: Vec<RawStatement>) -> Result<Vec<Statement>, DecodeError> {
        log::debug!("decoding {} statement(s)", raw.len());
        raw.into_iter().map(|s| self.statement(s)).collect()
    }

    fn statement(&self, raw: RawStatement) -> Result<Statement, DecodeError> {
        match (raw.atrule, raw.ruleset) {
            (Some(_), Some(_)) => Err(DecodeError::AmbiguousStatement),
            (Some(rule), None) => Ok(Statement::AtRule(self.at_rule(rule)?)),
            (None, Some(ruleset)) => Ok(Statement::Ruleset(ruleset)),
            (None, None) => Ok(Statement::Empty),
        }
    }

    fn at_rule(&self, raw: RawAtRule) -> Result<AtRule, DecodeError> {
        let identifier = self.identifier(raw.ident)?;
        let nested = raw
            .nested
            .into_iter()
            .map(|s| self.statement(s))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(AtRule { identifier, nested })
    }

    fn identifier(&self, raw: RawIdentifier) -> Result<Identifier, DecodeError> {
        let kind = self
            .registry
            .resolve(&raw.kind)
            .ok_or_else(|| DecodeError::UnknownIdentifierType(raw.kind.clone()))?;

        let info = match raw.info {
            None => None,
            Some(value) => Some(kind.decode(value).map_err(|source| {
                DecodeError::InvalidInformation {
                    tag: raw.kind.clone(),
                    source,
                }
            })?),
        };

        Ok(Identifier {
            kind: raw.kind,
            info,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{
        CharsetInfo, Condition, Declaration, FontFaceInfo, Information, KeyframesInfo, MediaType,
        Query, Selector, Simple,
    };
    use crate::registry::InformationKind;
    use pretty_assertions::assert_eq;

    fn decode(json: &str) -> Result<Vec<Statement>, DecodeError> {
        Decoder::new(&Registry::standard()).decode_str(json)
    }

    #[test]
    fn test_decode_ruleset() {
        let statements = decode(
            r#"[{"ruleset":{"selectors":[{"simple":{"element":"p"}}],
                "declarations":[{"property":"color","value":["red"]},
                                {"property":"border","value":["1px","solid","red"]}]}}]"#,
        )
        .unwrap();
        assert_eq!(
            statements,
            vec![Statement::Ruleset(Ruleset::new(
                vec![Selector::new(Simple::element("p"))],
                vec![
                    Declaration::new("color", &["red"]),
                    Declaration::new("border", &["1px", "solid", "red"]),
                ],
            ))]
        );
    }

    #[test]
    fn test_decode_charset() {
        let statements =
            decode(r#"[{"atrule":{"ident":{"type":"charset","info":{"value":"utf-8"}}}}]"#)
                .unwrap();
        assert_eq!(
            statements,
            vec![Statement::AtRule(AtRule::new(Identifier::from_info(
                Information::Charset(CharsetInfo {
                    value: "utf-8".into()
                })
            )))]
        );
    }

    #[test]
    fn test_decode_media_with_nested() {
        let statements = decode(
            r#"[{"atrule":{
                "ident":{"type":"media","info":{"queries":[
                    {"type":{"operator":"only","value":"screen"},
                     "conditions":[{"operator":"and","feature":"max-width","value":"600px"}]}]}},
                "nested":[{"ruleset":{"selectors":[{"simple":{"element":"p"}}],
                           "declarations":[{"property":"color","value":["red"]}]}}]}}]"#,
        )
        .unwrap();

        let Statement::AtRule(rule) = &statements[0] else {
            panic!("expected at-rule");
        };
        let Some(Information::Media(media)) = &rule.identifier.info else {
            panic!("expected media information");
        };
        assert_eq!(
            media.queries,
            vec![Query {
                media_type: Some(MediaType {
                    operator: "only".into(),
                    value: "screen".into(),
                }),
                conditions: vec![Condition {
                    operator: "and".into(),
                    feature: "max-width".into(),
                    value: "600px".into(),
                }],
            }]
        );
        assert_eq!(rule.nested.len(), 1);
    }

    #[test]
    fn test_decode_font_face() {
        let statements = decode(
            r#"[{"atrule":{"ident":{"type":"font-face","info":{"declarations":[
                {"property":"font-family","value":["Open"]}]}}}}]"#,
        )
        .unwrap();
        let Statement::AtRule(rule) = &statements[0] else {
            panic!("expected at-rule");
        };
        assert_eq!(
            rule.identifier.info,
            Some(Information::FontFace(FontFaceInfo {
                declarations: vec![Declaration::new("font-family", &["Open"])],
            }))
        );
    }

    #[test]
    fn test_decode_unknown_type() {
        let err = decode(r#"[{"atrule":{"ident":{"type":"unknown","info":{}}}}]"#).unwrap_err();
        assert!(matches!(err, DecodeError::UnknownIdentifierType(ref tag) if tag == "unknown"));
    }

    #[test]
    fn test_decode_unknown_type_in_nested() {
        let err = decode(
            r#"[{"atrule":{"ident":{"type":"media"},
                "nested":[{"atrule":{"ident":{"type":"page"}}}]}}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, DecodeError::UnknownIdentifierType(ref tag) if tag == "page"));
    }

    #[test]
    fn test_decode_invalid_information() {
        let err = decode(r#"[{"atrule":{"ident":{"type":"media","info":{"queries":42}}}}]"#)
            .unwrap_err();
        assert!(matches!(err, DecodeError::InvalidInformation { ref tag, .. } if tag == "media"));
    }

    #[test]
    fn test_decode_missing_info() {
        let statements = decode(r#"[{"atrule":{"ident":{"type":"keyframes"}}}]"#).unwrap();
        let Statement::AtRule(rule) = &statements[0] else {
            panic!("expected at-rule");
        };
        assert_eq!(rule.identifier.info, None);
    }

    #[test]
    fn test_decode_ambiguous_statement() {
        let err = decode(
            r#"[{"atrule":{"ident":{"type":"charset","info":{"value":"a"}}},
                "ruleset":{"selectors":[],"declarations":[]}}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, DecodeError::AmbiguousStatement));
    }

    #[test]
    fn test_decode_rejects_combined_statement() {
        // A statement holds one at-rule or one ruleset, never both. Picking
        // either half would silently drop the other.
        let err = decode(
            r#"[{"atrule":{"ident":{"type":"charset","info":{"value":"utf-8"}}},
                "ruleset":{"selectors":[{"simple":{"element":"p"}}],
                  "declarations":[{"property":"color","value":["red"]},
                                  {"property":"border","value":["1px","solid","red"]}]}}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, DecodeError::AmbiguousStatement));
        assert_eq!(err.to_string(), "statement has both an at-rule and a ruleset");
    }

    #[test]
    fn test_decode_empty_statement() {
        assert_eq!(decode("[{}]").unwrap(), vec![Statement::Empty]);
    }

    #[test]
    fn test_decode_malformed_json() {
        assert!(matches!(decode("[{"), Err(DecodeError::Json(_))));
        assert!(matches!(decode(r#"{"ruleset":{}}"#), Err(DecodeError::Json(_))));
    }

    #[test]
    fn test_decode_with_alias() {
        let registry = Registry::standard().with("-webkit-keyframes", InformationKind::Keyframes);
        let statements = Decoder::new(&registry)
            .decode_str(
                r#"[{"atrule":{"ident":{"type":"-webkit-keyframes","info":{"value":"spin"}}}}]"#,
            )
            .unwrap();
        let Statement::AtRule(rule) = &statements[0] else {
            panic!("expected at-rule");
        };
        assert_eq!(rule.identifier.kind, "-webkit-keyframes");
        assert_eq!(
            rule.identifier.info,
            Some(Information::Keyframes(KeyframesInfo {
                value: "spin".into()
            }))
        );
    }

    #[test]
    fn test_decode_respects_registry() {
        let registry = Registry::empty();
        let err = Decoder::new(&registry)
            .decode_str(r#"[{"atrule":{"ident":{"type":"charset"}}}]"#)
            .unwrap_err();
        assert!(matches!(err, DecodeError::UnknownIdentifierType(_)));
    }
}
