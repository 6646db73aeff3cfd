//! Primitive token writer.
//!
//! `Emitter` owns the output sink for one encoding call. Node encoders in
//! the sibling modules are `impl` blocks on it; this module only knows how
//! to put punctuation and text on the wire.

use std::io::Write;

use json2css_tree::Registry;

use crate::{EncodeError, EncodeOptions};

pub(crate) const SPACE: u8 = b' ';
pub(crate) const DOUBLE_QUOTE: u8 = b'"';
pub(crate) const LEFT_PARENTHESIS: u8 = b'(';
pub(crate) const RIGHT_PARENTHESIS: u8 = b')';
pub(crate) const COMMA: u8 = b',';
pub(crate) const PERIOD: u8 = b'.';
pub(crate) const COLON: u8 = b':';
pub(crate) const SEMICOLON: u8 = b';';
pub(crate) const AT_SIGN: u8 = b'@';
pub(crate) const LEFT_SQUARE_BRACKET: u8 = b'[';
pub(crate) const RIGHT_SQUARE_BRACKET: u8 = b']';
pub(crate) const LEFT_CURLY_BRACKET: u8 = b'{';
pub(crate) const RIGHT_CURLY_BRACKET: u8 = b'}';

pub(crate) struct Emitter<'a, W: Write> {
    out: W,
    pub(crate) registry: &'a Registry,
    pub(crate) options: &'a EncodeOptions,
    depth: usize,
}

impl<'a, W: Write> Emitter<'a, W> {
    pub(crate) fn new(out: W, registry: &'a Registry, options: &'a EncodeOptions) -> Self {
        Self {
            out,
            registry,
            options,
            depth: 0,
        }
    }

    pub(crate) fn byte(&mut self, b: u8) -> Result<(), EncodeError> {
        self.out.write_all(&[b])?;
        Ok(())
    }

    pub(crate) fn text(&mut self, s: &str) -> Result<(), EncodeError> {
        self.out.write_all(s.as_bytes())?;
        Ok(())
    }

    /// `"text"`
    pub(crate) fn quoted(&mut self, s: &str) -> Result<(), EncodeError> {
        self.byte(DOUBLE_QUOTE)?;
        self.text(s)?;
        self.byte(DOUBLE_QUOTE)
    }

    /// Encode each item with `f`, writing `separator` between items (never after the last).
    pub(crate) fn join<T>(
        &mut self,
        items: &[T],
        separator: u8,
        mut f: impl FnMut(&mut Self, &T) -> Result<(), EncodeError>,
    ) -> Result<(), EncodeError> {
        for (idx, item) in items.iter().enumerate() {
            if idx > 0 {
                self.byte(separator)?;
            }
            f(self, item)?;
        }
        Ok(())
    }

    /// Run `f` one nesting level deeper, failing once `max_depth` is exceeded.
    pub(crate) fn nested(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<(), EncodeError>,
    ) -> Result<(), EncodeError> {
        if self.depth >= self.options.max_depth {
            return Err(EncodeError::DepthLimitExceeded {
                limit: self.options.max_depth,
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}
