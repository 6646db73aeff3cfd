//! At-rule registry.
//!
//! Maps an at-rule type tag (`charset`, `keyframes`, ...) to the
//! [`Information`] variant that carries its payload. The decoder uses it to
//! pick the variant for an untyped `info` object; the encoder uses it to
//! reject identifiers whose tag is not registered.
//!
//! A registry is a plain value. Build one, then hand it to whoever needs it.

use std::collections::BTreeMap;

use crate::ast::{CharsetInfo, FontFaceInfo, Information, KeyframesInfo, MediaInfo};

/// The closed set of at-rule payload shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InformationKind {
    Charset,
    Keyframes,
    Media,
    FontFace,
}

impl InformationKind {
    pub const ALL: [InformationKind; 4] = [
        InformationKind::Charset,
        InformationKind::Keyframes,
        InformationKind::Media,
        InformationKind::FontFace,
    ];

    /// The canonical at-rule name for this payload shape.
    pub fn tag(self) -> &'static str {
        match self {
            InformationKind::Charset => "charset",
            InformationKind::Keyframes => "keyframes",
            InformationKind::Media => "media",
            InformationKind::FontFace => "font-face",
        }
    }

    /// Construct the matching variant from an untyped `info` payload.
    pub fn decode(self, info: serde_json::Value) -> Result<Information, serde_json::Error> {
        Ok(match self {
            InformationKind::Charset => {
                Information::Charset(serde_json::from_value::<CharsetInfo>(info)?)
            }
            InformationKind::Keyframes => {
                Information::Keyframes(serde_json::from_value::<KeyframesInfo>(info)?)
            }
            InformationKind::Media => {
                Information::Media(serde_json::from_value::<MediaInfo>(info)?)
            }
            InformationKind::FontFace => {
                Information::FontFace(serde_json::from_value::<FontFaceInfo>(info)?)
            }
        })
    }
}

/// Tag → payload shape table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    entries: BTreeMap<String, InformationKind>,
}

impl Registry {
    /// A registry that knows no at-rules at all.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// `charset`, `keyframes`, `media` and `font-face`.
    pub fn standard() -> Self {
        InformationKind::ALL
            .into_iter()
            .fold(Self::empty(), |registry, kind| registry.with(kind.tag(), kind))
    }

    /// Register `tag`, replacing any previous entry for it.
    ///
    /// Aliases are plain entries: `with("-webkit-keyframes", InformationKind::Keyframes)`.
    pub fn with(mut self, tag: &str, kind: InformationKind) -> Self {
        self.entries.insert(tag.to_string(), kind);
        self
    }

    pub fn resolve(&self, tag: &str) -> Option<InformationKind> {
        let kind = self.entries.get(tag).copied();
        log::trace!("resolve at-rule tag {tag:?} -> {kind:?}");
        kind
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }

    /// Registered tags in sorted order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}
