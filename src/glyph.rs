use crate::{common::FormatSpecific, layer::Layer, LayerType};
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlyphList(pub Vec<Glyph>);
impl GlyphList {
    pub fn get(&self, g: &str) -> Option<&Glyph> {
        self.0.iter().find(|&glyph| glyph.name == g)
    }
    pub fn get_mut(&mut self, g: &str) -> Option<&mut Glyph> {
        self.0.iter_mut().find(|glyph| glyph.name == g)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Glyph> {
        self.0.iter()
    }
}

impl Deref for GlyphList {
    type Target = Vec<Glyph>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl DerefMut for GlyphList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// The top-level glyph categories used by Glyphs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GlyphCategory {
    Letter,
    Number,
    Punctuation,
    Symbol,
    Mark,
    Separator,
    Other,
    #[default]
    Unknown,
}

impl GlyphCategory {
    pub fn from_name(s: &str) -> Self {
        match s {
            "Letter" => GlyphCategory::Letter,
            "Number" => GlyphCategory::Number,
            "Punctuation" => GlyphCategory::Punctuation,
            "Symbol" => GlyphCategory::Symbol,
            "Mark" => GlyphCategory::Mark,
            "Separator" => GlyphCategory::Separator,
            "Other" => GlyphCategory::Other,
            _ => GlyphCategory::Unknown,
        }
    }

    /// Best guess at the category and subcategory of an encoded glyph, for
    /// sources which do not record them.
    pub fn infer(codepoint: u32) -> (Self, Option<String>) {
        let Some(c) = char::from_u32(codepoint) else {
            return (GlyphCategory::Unknown, None);
        };
        if is_combining_mark(codepoint) {
            (GlyphCategory::Mark, Some("Nonspacing".to_string()))
        } else if is_currency(c) {
            (GlyphCategory::Symbol, Some("Currency".to_string()))
        } else if c.is_alphabetic() {
            let sub = if c.is_uppercase() {
                "Uppercase"
            } else if c.is_lowercase() {
                "Lowercase"
            } else {
                "Other"
            };
            (GlyphCategory::Letter, Some(sub.to_string()))
        } else if c.is_numeric() {
            (GlyphCategory::Number, Some("Decimal Digit".to_string()))
        } else if c.is_whitespace() {
            (GlyphCategory::Separator, Some("Space".to_string()))
        } else if (c.is_ascii_punctuation() && !"+<=>^`|~".contains(c))
            || matches!(codepoint, 0xA1 | 0xA7 | 0xAB | 0xB6 | 0xB7 | 0xBB | 0xBF)
            || (0x2010..=0x205E).contains(&codepoint)
        {
            (GlyphCategory::Punctuation, None)
        } else if c.is_control() {
            (GlyphCategory::Other, None)
        } else {
            (GlyphCategory::Symbol, None)
        }
    }
}

fn is_combining_mark(cp: u32) -> bool {
    matches!(cp,
        0x0300..=0x036F | 0x0483..=0x0489 | 0x1AB0..=0x1AFF | 0x1DC0..=0x1DFF
        | 0x20D0..=0x20FF | 0xFE20..=0xFE2F)
}

fn is_currency(c: char) -> bool {
    matches!(c, '$' | '¢' | '£' | '¤' | '¥' | '֏' | '؋' | '৲' | '৳' | '฿' | '៛' | '﷼')
        || ('\u{20A0}'..='\u{20C0}').contains(&c)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Glyph {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_name: Option<String>,
    #[serde(default)]
    pub category: GlyphCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub codepoints: Vec<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub layers: Vec<Layer>,
    pub exported: bool,
    #[serde(default, skip_serializing_if = "FormatSpecific::is_empty")]
    pub format_specific: FormatSpecific,
}

impl Glyph {
    pub fn new(name: impl Into<String>) -> Self {
        Glyph {
            name: name.into(),
            production_name: None,
            category: GlyphCategory::Unknown,
            subcategory: None,
            codepoints: vec![],
            layers: vec![],
            exported: true,
            format_specific: FormatSpecific::default(),
        }
    }

    /// The character this glyph encodes, if any
    pub fn character(&self) -> Option<char> {
        self.codepoints.first().copied().and_then(char::from_u32)
    }

    pub fn is_nonspacing_mark(&self) -> bool {
        self.category == GlyphCategory::Mark && self.subcategory.as_deref() == Some("Nonspacing")
    }

    pub fn is_currency(&self) -> bool {
        self.category == GlyphCategory::Symbol && self.subcategory.as_deref() == Some("Currency")
    }

    pub fn get_layer(&self, id: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id.as_deref() == Some(id))
    }

    /// The main drawing of this glyph for the given master
    pub fn master_layer(&self, master_id: &str) -> Option<&Layer> {
        self.layers
            .iter()
            .find(|l| l.master == LayerType::DefaultForMaster(master_id.to_string()))
    }

    pub fn master_layer_mut(&mut self, master_id: &str) -> Option<&mut Layer> {
        self.layers
            .iter_mut()
            .find(|l| l.master == LayerType::DefaultForMaster(master_id.to_string()))
    }
}

#[cfg(feature = "glyphs")]
mod glyphs {
    use super::*;
    use glyphslib::glyphs3::Glyph as G3Glyph;

    impl From<&G3Glyph> for Glyph {
        fn from(val: &G3Glyph) -> Self {
            let (inferred_category, inferred_subcategory) = val
                .unicode
                .first()
                .map(|&cp| GlyphCategory::infer(cp))
                .unwrap_or_default();
            let category = val
                .category
                .as_deref()
                .map(GlyphCategory::from_name)
                .unwrap_or(inferred_category);
            let subcategory = if val.category.is_some() {
                val.subcategory.clone()
            } else {
                val.subcategory.clone().or(inferred_subcategory)
            };
            Glyph {
                name: val.name.clone(),
                production_name: val.production.clone(),
                category,
                subcategory,
                codepoints: val.unicode.clone(),
                layers: val.layers.iter().map(Layer::from).collect(),
                exported: val.export,
                format_specific: FormatSpecific::default(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case('A', GlyphCategory::Letter, Some("Uppercase"))]
    #[case('ж', GlyphCategory::Letter, Some("Lowercase"))]
    #[case('7', GlyphCategory::Number, Some("Decimal Digit"))]
    #[case('€', GlyphCategory::Symbol, Some("Currency"))]
    #[case('$', GlyphCategory::Symbol, Some("Currency"))]
    #[case('\u{0301}', GlyphCategory::Mark, Some("Nonspacing"))]
    #[case('¿', GlyphCategory::Punctuation, None)]
    #[case('‹', GlyphCategory::Punctuation, None)]
    #[case('+', GlyphCategory::Symbol, None)]
    #[case(' ', GlyphCategory::Separator, Some("Space"))]
    fn test_infer_category(
        #[case] c: char,
        #[case] category: GlyphCategory,
        #[case] subcategory: Option<&str>,
    ) {
        let (got_category, got_subcategory) = GlyphCategory::infer(c as u32);
        assert_eq!(got_category, category);
        assert_eq!(got_subcategory.as_deref(), subcategory);
    }
}
