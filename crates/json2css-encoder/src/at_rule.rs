//! At-rule encoding: `@type info{nested}`.
//!
//! The tag is checked against the registry before anything is written, and
//! a payload must be the variant registered for its tag.

use std::io::Write;

use json2css_tree::{AtRule, Condition, Identifier, Information, MediaInfo, MediaType, Query};

use crate::emitter::{
    Emitter, AT_SIGN, COLON, COMMA, LEFT_CURLY_BRACKET, LEFT_PARENTHESIS, RIGHT_CURLY_BRACKET,
    RIGHT_PARENTHESIS, SPACE,
};
use crate::EncodeError;

impl<W: Write> Emitter<'_, W> {
    /// Nested statements are written back to back inside braces, with no
    /// separator between siblings.
    pub(crate) fn at_rule(&mut self, rule: &AtRule) -> Result<(), EncodeError> {
        self.identifier(&rule.identifier)?;

        if !rule.nested.is_empty() {
            self.nested(|e| {
                e.byte(LEFT_CURLY_BRACKET)?;
                for statement in &rule.nested {
                    e.statement(statement)?;
                }
                e.byte(RIGHT_CURLY_BRACKET)
            })?;
        }

        Ok(())
    }

    pub(crate) fn identifier(&mut self, identifier: &Identifier) -> Result<(), EncodeError> {
        let kind = self
            .registry
            .resolve(&identifier.kind)
            .ok_or_else(|| EncodeError::UnknownIdentifierType(identifier.kind.clone()))?;

        if let Some(info) = &identifier.info {
            if info.kind() != kind {
                return Err(EncodeError::InformationMismatch {
                    tag: identifier.kind.clone(),
                    found: info.kind().tag(),
                });
            }
        }

        self.byte(AT_SIGN)?;
        self.text(&identifier.kind)?;

        if let Some(info) = &identifier.info {
            self.byte(SPACE)?;
            self.information(info)?;
        }

        Ok(())
    }

    pub(crate) fn information(&mut self, info: &Information) -> Result<(), EncodeError> {
        match info {
            Information::Charset(charset) => self.quoted(&charset.value),
            Information::Keyframes(keyframes) => self.text(&keyframes.value),
            Information::Media(media) => self.media(media),
            Information::FontFace(font_face) => self.declaration_block(&font_face.declarations),
        }
    }

    fn media(&mut self, media: &MediaInfo) -> Result<(), EncodeError> {
        self.join(&media.queries, COMMA, |e, query| e.query(query))
    }

    /// The media type, then each condition; items are space separated.
    pub(crate) fn query(&mut self, query: &Query) -> Result<(), EncodeError> {
        let mut first = true;

        if let Some(media_type) = &query.media_type {
            self.media_type(media_type)?;
            first = false;
        }

        for condition in &query.conditions {
            if !first {
                self.byte(SPACE)?;
            }
            self.condition(condition)?;
            first = false;
        }

        Ok(())
    }

    pub(crate) fn media_type(&mut self, media_type: &MediaType) -> Result<(), EncodeError> {
        if !media_type.operator.is_empty() {
            self.text(&media_type.operator)?;
            self.byte(SPACE)?;
        }
        self.text(&media_type.value)
    }

    pub(crate) fn condition(&mut self, condition: &Condition) -> Result<(), EncodeError> {
        if !condition.operator.is_empty() {
            self.text(&condition.operator)?;
            self.byte(SPACE)?;
        }
        self.byte(LEFT_PARENTHESIS)?;
        self.text(&condition.feature)?;
        self.byte(COLON)?;
        self.text(&condition.value)?;
        self.byte(RIGHT_PARENTHESIS)
    }
}
