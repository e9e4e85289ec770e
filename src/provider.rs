//! Read-only glyph lookups used when composing proof text.
//!
//! Everything that builds strings from a font goes through [`GlyphProvider`]
//! rather than a concrete [`Font`], so the same code runs against a loaded
//! source or a plain list of glyph names.
use crate::Font;
use std::collections::{BTreeMap, BTreeSet};

/// Glyph existence and character-to-glyph lookups
pub trait GlyphProvider {
    /// Does the font have a glyph with exactly this name?
    fn has_glyph(&self, name: &str) -> bool;

    /// The name of the glyph encoding this character, if any
    fn glyph_name_for_char(&self, c: char) -> Option<String>;

    /// Can this character be displayed? It can if some glyph encodes it, or
    /// if a glyph is named after the character itself.
    fn has_char(&self, c: char) -> bool {
        self.glyph_name_for_char(c).is_some() || self.has_glyph(c.encode_utf8(&mut [0; 4]))
    }
}

impl GlyphProvider for Font {
    fn has_glyph(&self, name: &str) -> bool {
        self.glyphs.get(name).is_some()
    }

    fn glyph_name_for_char(&self, c: char) -> Option<String> {
        self.glyph_for_char(c).map(|g| g.name.clone())
    }
}

/// An in-memory glyph set: a bag of glyph names plus a character map
#[derive(Debug, Clone, Default)]
pub struct GlyphSet {
    names: BTreeSet<String>,
    cmap: BTreeMap<char, String>,
}

impl GlyphSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an unencoded glyph
    pub fn with_glyph(mut self, name: impl Into<String>) -> Self {
        self.names.insert(name.into());
        self
    }

    /// Add an encoded glyph
    pub fn with_char(mut self, c: char, name: impl Into<String>) -> Self {
        let name = name.into();
        self.names.insert(name.clone());
        self.cmap.insert(c, name);
        self
    }

    /// Add every character of the string, each under a `uniXXXX` name
    pub fn with_chars(self, chars: &str) -> Self {
        chars
            .chars()
            .fold(self, |set, c| set.with_char(c, format!("uni{:04X}", c as u32)))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl GlyphProvider for GlyphSet {
    fn has_glyph(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    fn glyph_name_for_char(&self, c: char) -> Option<String> {
        self.cmap.get(&c).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Glyph;

    #[test]
    fn test_font_provider() {
        let mut font = Font::new();
        let mut a = Glyph::new("A");
        a.codepoints = vec![0x41];
        font.glyphs.push(a);
        font.glyphs.push(Glyph::new("zero.osf"));
        assert!(font.has_char('A'));
        assert!(!font.has_char('B'));
        assert!(font.has_glyph("zero.osf"));
        assert_eq!(font.glyph_name_for_char('A').as_deref(), Some("A"));
    }

    #[test]
    fn test_glyph_named_after_character() {
        let set = GlyphSet::new().with_glyph("x");
        assert!(set.has_char('x'));
        assert!(set.glyph_name_for_char('x').is_none());
    }
}
