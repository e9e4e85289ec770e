use crate::{glyph::GlyphList, Font, GlyphsmithError, Master};
use std::{fs, path::PathBuf};

pub fn load(path: PathBuf) -> Result<Font, GlyphsmithError> {
    log::debug!("Reading to string");
    let s = fs::read_to_string(&path).map_err(|source| GlyphsmithError::FileIO {
        path: path.clone(),
        source,
    })?;
    load_str(&s, path)
}

pub fn load_str(s: &str, path: PathBuf) -> Result<Font, GlyphsmithError> {
    let mut font = Font::new();
    let glyphs_font =
        glyphslib::Font::load_str(s).map_err(|source| GlyphsmithError::PlistParse {
            message: source.to_string(),
            path: path.clone(),
        })?;
    let glyphs_font = glyphs_font
        .as_glyphs3()
        .ok_or_else(|| GlyphsmithError::WrongConvertor { path })?;

    font.masters = glyphs_font
        .masters
        .iter()
        .map(|master| Master::new(master.name.clone(), master.id.clone()))
        .collect();
    font.glyphs = GlyphList(glyphs_font.glyphs.iter().map(Into::into).collect());
    font.names.family_name = glyphs_font.family_name.clone().into();
    font.upm = glyphs_font.units_per_em as u16;
    if !glyphs_font.note.is_empty() {
        font.note = Some(glyphs_font.note.clone());
    }
    log::debug!(
        "Loaded {} glyphs in {} masters",
        font.glyphs.len(),
        font.masters.len()
    );
    Ok(font)
}
