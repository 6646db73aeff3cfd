//! Ruleset and declaration encoding.

use std::io::Write;

use json2css_tree::{Declaration, Ruleset, Value};

use crate::emitter::{
    Emitter, COLON, COMMA, LEFT_CURLY_BRACKET, RIGHT_CURLY_BRACKET, SEMICOLON, SPACE,
};
use crate::EncodeError;

impl<W: Write> Emitter<'_, W> {
    /// `selector,selector{declaration;declaration}`
    ///
    /// Declarations are required. Selectors are required only under
    /// `EncodeOptions::require_selectors`; otherwise an empty list heads
    /// straight into the block.
    pub(crate) fn ruleset(&mut self, ruleset: &Ruleset) -> Result<(), EncodeError> {
        if self.options.require_selectors && ruleset.selectors.is_empty() {
            return Err(EncodeError::MissingSelector);
        }
        if ruleset.declarations.is_empty() {
            return Err(EncodeError::MissingDeclaration);
        }

        self.join(&ruleset.selectors, COMMA, |e, selector| e.selector(selector))?;
        self.declaration_block(&ruleset.declarations)
    }

    /// `{declaration;declaration}`, shared with `@font-face`.
    pub(crate) fn declaration_block(
        &mut self,
        declarations: &[Declaration],
    ) -> Result<(), EncodeError> {
        self.byte(LEFT_CURLY_BRACKET)?;
        self.join(declarations, SEMICOLON, |e, declaration| e.declaration(declaration))?;
        self.byte(RIGHT_CURLY_BRACKET)
    }

    pub(crate) fn declaration(&mut self, declaration: &Declaration) -> Result<(), EncodeError> {
        self.text(&declaration.property)?;
        self.byte(COLON)?;
        self.join(&declaration.values, COMMA, |e, value| e.value(value))
    }

    pub(crate) fn value(&mut self, value: &Value) -> Result<(), EncodeError> {
        self.join(&value.values, SPACE, |e, token| e.text(token))
    }
}
