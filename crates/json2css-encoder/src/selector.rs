//! Selector encoding.
//!
//! A simple selector is emitted in grammar order: element, classes,
//! attributes, pseudo-elements, pseudo-classes, negations.

use std::io::Write;

use json2css_tree::{Attribute, Combinator, Pseudo, Selector, Simple};

use crate::emitter::{
    Emitter, COLON, LEFT_PARENTHESIS, LEFT_SQUARE_BRACKET, PERIOD, RIGHT_PARENTHESIS,
    RIGHT_SQUARE_BRACKET, SPACE,
};
use crate::EncodeError;

impl<W: Write> Emitter<'_, W> {
    pub(crate) fn selector(&mut self, selector: &Selector) -> Result<(), EncodeError> {
        self.simple(&selector.simple)?;
        for combinator in &selector.combinators {
            self.combinator(combinator)?;
        }
        Ok(())
    }

    /// The symbol is written verbatim, so the descendant combinator is a literal space.
    pub(crate) fn combinator(&mut self, combinator: &Combinator) -> Result<(), EncodeError> {
        self.text(&combinator.combinator)?;
        self.simple(&combinator.simple)
    }

    pub(crate) fn simple(&mut self, simple: &Simple) -> Result<(), EncodeError> {
        self.text(&simple.element)?;

        if !simple.classes.is_empty() {
            self.byte(PERIOD)?;
            self.join(&simple.classes, PERIOD, |e, class| e.text(class))?;
        }

        for attribute in &simple.attributes {
            self.attribute(attribute)?;
        }

        for pseudo in &simple.pseudo_elements {
            self.byte(COLON)?;
            self.byte(COLON)?;
            self.pseudo(pseudo)?;
        }

        for pseudo in &simple.pseudo_classes {
            self.byte(COLON)?;
            self.pseudo(pseudo)?;
        }

        for negation in &simple.negations {
            self.nested(|e| {
                e.text(":not(")?;
                e.simple(negation)?;
                e.byte(RIGHT_PARENTHESIS)
            })?;
        }

        Ok(())
    }

    pub(crate) fn pseudo(&mut self, pseudo: &Pseudo) -> Result<(), EncodeError> {
        self.text(&pseudo.ident)?;
        if !pseudo.func.is_empty() {
            self.byte(LEFT_PARENTHESIS)?;
            self.text(&pseudo.func)?;
            self.byte(RIGHT_PARENTHESIS)?;
        }
        Ok(())
    }

    pub(crate) fn attribute(&mut self, attribute: &Attribute) -> Result<(), EncodeError> {
        self.byte(LEFT_SQUARE_BRACKET)?;
        self.text(&attribute.attr)?;
        self.text(&attribute.operator)?;
        if !attribute.value.is_empty() {
            self.quoted(&attribute.value)?;
        }
        if !attribute.modifier.is_empty() {
            self.byte(SPACE)?;
            self.text(&attribute.modifier)?;
        }
        self.byte(RIGHT_SQUARE_BRACKET)
    }
}
