//! Proof text for checking spacing, kerning and marks in an edit view.
//!
//! Each function returns the text of one or more tabs; hand them to a
//! [`TabSink`](crate::TabSink) to open them.
use crate::{
    filters::GlyphSelection,
    kerning::{render_tokens, Token},
    Font, Glyph, GlyphCategory, GlyphsmithError, Layer,
};
use indexmap::IndexMap;

/// The letters placed after each glyph by [`alongside_alphabet`]. `h` and
/// `l` are doubled to show the glyph between straight stems.
pub const ALPHABET: &str = "abcdefghhijkllmnopqrstuvwxyz";

const PAIRS_PER_LINE: usize = 10;
const SIDEBEARING_TOLERANCE: f32 = 0.001;

/// The glyph as its character when encoded, otherwise as a `/name` reference
pub fn glyph_token(glyph: &Glyph) -> Token {
    match glyph.character() {
        Some(c) => Token::char(c.to_string()),
        None => Token::glyph(glyph.name.as_str()),
    }
}

fn token_list<'a>(glyphs: impl IntoIterator<Item = &'a Glyph>) -> String {
    glyphs
        .into_iter()
        .map(|g| glyph_token(g).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// One tab per currency symbol, setting it around every figure between
/// lower and upper case context
pub fn currency_tabs(font: &Font) -> Vec<String> {
    font.glyphs
        .iter()
        .filter(|g| g.is_currency())
        .filter_map(|glyph| {
            let Some(c) = glyph.character() else {
                log::debug!("Skipping unencoded currency glyph {}", glyph.name);
                return None;
            };
            let lines: Vec<String> = (0..10)
                .map(|d| format!("nn{c}{d}{c}nn HH{c}{d}{c}HH", c = c, d = d))
                .collect();
            Some(lines.join("\n"))
        })
        .collect()
}

/// The selected glyphs each followed by every letter of `alphabet`, ten
/// pairs to a line, with a blank line between glyphs
pub fn alongside_alphabet(font: &Font, selection: &GlyphSelection, alphabet: &str) -> String {
    selection
        .glyphs(font)
        .into_iter()
        .map(|glyph| {
            let token = glyph_token(glyph);
            let pairs: Vec<Token> = alphabet
                .chars()
                .flat_map(|letter| [token.clone(), Token::char(letter.to_string())])
                .collect();
            pairs
                .chunks(PAIRS_PER_LINE * 2)
                .map(render_tokens)
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn nonspacing_marks(font: &Font) -> Vec<&str> {
    font.glyphs
        .iter()
        .filter(|g| g.is_nonspacing_mark())
        .map(|g| g.name.as_str())
        .collect()
}

/// One letter showing each mark: for every nonspacing mark, the
/// alphabetically first letter built with it
pub fn diacritic_specimen(font: &Font) -> String {
    let mut users: IndexMap<&str, Vec<&str>> = nonspacing_marks(font)
        .into_iter()
        .map(|mark| (mark, vec![]))
        .collect();
    for glyph in font.glyphs.iter().filter(|g| g.category == GlyphCategory::Letter) {
        for layer in &glyph.layers {
            let mark = layer
                .components()
                .map(|c| c.reference.as_str())
                .find(|r| users.contains_key(r));
            if let Some(list) = mark.and_then(|m| users.get_mut(m)) {
                list.push(glyph.name.as_str());
            }
        }
    }
    users.sort_keys();
    let mut examples: Vec<&str> = users
        .values()
        .filter_map(|names| names.iter().min().copied())
        .collect();
    examples.sort();
    let tokens: Vec<Token> = examples
        .iter()
        .filter_map(|name| font.glyphs.get(name))
        .map(glyph_token)
        .collect();
    render_tokens(&tokens)
}

/// One tab per mark, listing every glyph whose first layer uses it.
/// Suffixed variants of a mark (`acutecomb.case`) share the tab of the
/// plain mark, on a line of their own.
pub fn diacritic_tabs(font: &Font) -> Vec<String> {
    let mut tabs: IndexMap<&str, Vec<String>> = IndexMap::new();
    for mark in nonspacing_marks(font) {
        let tokens: Vec<Token> = font
            .glyphs
            .iter()
            .filter_map(|glyph| {
                let layer = glyph.layers.first()?;
                let count = layer.components().filter(|c| c.reference == mark).count();
                Some((0..count).map(move |_| glyph))
            })
            .flatten()
            .map(glyph_token)
            .collect();
        let base = mark.split('.').next().unwrap_or(mark);
        tabs.entry(base).or_default().push(render_tokens(&tokens));
    }
    tabs.into_values()
        .map(|lines| lines.join("\n"))
        .filter(|text| !text.trim().is_empty())
        .collect()
}

fn sidebearings(font: &Font, glyph: &Glyph, layer: &Layer) -> Option<(f32, f32)> {
    let decomposed = layer.decomposed(&font.glyphs);
    match (decomposed.lsb(), decomposed.rsb()) {
        (Ok(lsb), Ok(rsb)) => Some((lsb, rsb)),
        (Err(e), _) | (_, Err(e)) => {
            log::warn!("Cannot measure {}: {}", glyph.name, e);
            None
        }
    }
}

/// Glyphs whose side bearings on some master differ from those on the
/// reference master (the first master if none is named)
pub fn unsynced_sidebearings(
    font: &Font,
    reference: Option<&str>,
) -> Result<String, GlyphsmithError> {
    let reference = match reference {
        Some(name) => font
            .master(name)
            .ok_or_else(|| GlyphsmithError::MasterNotFound(name.to_string()))?,
        None => font
            .masters
            .first()
            .ok_or_else(|| GlyphsmithError::MasterNotFound("(none)".to_string()))?,
    };
    let unsynced = font.glyphs.iter().filter(|glyph| {
        let Some(expected) = glyph
            .master_layer(&reference.id)
            .and_then(|layer| sidebearings(font, glyph, layer))
        else {
            return false;
        };
        font.masters
            .iter()
            .filter_map(|master| glyph.master_layer(&master.id))
            .filter_map(|layer| sidebearings(font, glyph, layer))
            .any(|(lsb, rsb)| {
                (lsb - expected.0).abs() > SIDEBEARING_TOLERANCE
                    || (rsb - expected.1).abs() > SIDEBEARING_TOLERANCE
            })
    });
    Ok(token_list(unsynced))
}

/// One tab per master listing the glyphs drawn with live strokes there
pub fn live_stroke_tabs(font: &Font) -> Vec<String> {
    font.masters
        .iter()
        .filter_map(|master| {
            let stroked: Vec<&Glyph> = font
                .glyphs
                .iter()
                .filter(|glyph| {
                    glyph
                        .master_layer(&master.id)
                        .is_some_and(|l| l.paths().any(|p| p.has_live_stroke()))
                })
                .collect();
            if stroked.is_empty() {
                log::info!("No stroked glyphs in {}", master.display_name());
                return None;
            }
            log::info!(
                "Found strokes in {} glyph(s) of {}",
                stroked.len(),
                master.display_name()
            );
            Some(format!("-- {}\n{}", master.display_name(), token_list(stroked)))
        })
        .collect()
}
