//! # Glyphsmith
//!
//! Glyphsmith automates the small, repetitive jobs of font production on
//! font sources: generating kerning strings, opening proof tabs for
//! currency symbols, marks and side bearings, and cleaning up components,
//! colour layers, master layers and licence metadata.
//!
//! Sources are loaded into a single font model, whatever their format:
//!
//! - Glyphs 3 files (`.glyphs`), with the `glyphs` feature
//! - UFO (`.ufo`), with the `ufo` feature
//! - Glyphsmith's own JSON (`.json`)
//!
//! ```no_run
//! use glyphsmith::kerning::{
//!     GenerationRequest, GroupKind, KerningConfig, KerningStringMaker, Script, SecondarySelection,
//! };
//!
//! let font = glyphsmith::load("MyFont.glyphs")?;
//! let config = KerningConfig::default();
//! let request = GenerationRequest::new(
//!     Script::Latin,
//!     GroupKind::Upper,
//!     vec![SecondarySelection::new(GroupKind::Lower)],
//! );
//! let mut tabs: Vec<String> = vec![];
//! KerningStringMaker::new(&config).run(&request, &font, &mut tabs)?;
//! # Ok::<(), glyphsmith::GlyphsmithError>(())
//! ```
#![deny(clippy::unwrap_used, clippy::expect_used)]

mod common;
/// Format convertors
pub mod convertors;
mod error;
/// Filters which modify a font in place
pub mod filters;
mod font;
mod glyph;
mod i18ndictionary;
/// The kerning string generator
pub mod kerning;
mod layer;
mod master;
/// Font naming and licensing metadata
pub mod names;
pub mod proofs;
mod provider;
mod shape;
mod tabs;
pub mod wordfilter;

pub use crate::{
    common::{FormatSpecific, Node, NodeType},
    error::GlyphsmithError,
    font::Font,
    glyph::{Glyph, GlyphCategory, GlyphList},
    i18ndictionary::I18NDictionary,
    layer::{Layer, LayerType},
    master::Master,
    names::Names,
    provider::{GlyphProvider, GlyphSet},
    shape::{Component, Path, Shape},
    tabs::{open_tabs, DirectoryTabs, StdoutTabs, TabSink},
};
use std::path::PathBuf;

/// Load a font source, choosing a convertor by file extension
pub fn load(filename: impl Into<PathBuf>) -> Result<Font, GlyphsmithError> {
    let pb = filename.into();
    let pb_clone = pb.clone();

    let mut font: Font = match pb.extension() {
        Some(ext) if ext == "json" => {
            let file = std::fs::File::open(&pb).map_err(|source| GlyphsmithError::FileIO {
                path: pb.clone(),
                source,
            })?;
            Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
        }
        #[cfg(feature = "ufo")]
        Some(ext) if ext == "ufo" => crate::convertors::ufo::load(pb),
        #[cfg(feature = "glyphs")]
        Some(ext) if ext == "glyphs" => crate::convertors::glyphs3::load(pb),
        _ => Err(GlyphsmithError::UnknownFileType { path: pb }),
    }?;
    font.source = Some(pb_clone);
    Ok(font)
}

/// Write a font as UFO or JSON, depending on the extension
pub fn save(font: &Font, filename: impl Into<PathBuf>) -> Result<(), GlyphsmithError> {
    font.save(filename)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_unknown_file_type() {
        assert!(matches!(
            load("font.vfb"),
            Err(GlyphsmithError::UnknownFileType { .. })
        ));
    }

    #[test]
    fn test_json_round_trip_through_disk() {
        let mut font = Font::new();
        font.names.family_name.set_default("Cardume".to_string());
        let mut glyph = Glyph::new("A");
        glyph.codepoints.push(0x41);
        glyph.layers.push(Layer::new(600.0));
        font.glyphs.push(glyph);
        let path = std::env::temp_dir().join(format!("glyphsmith-{}.json", std::process::id()));
        save(&font, &path).unwrap();
        let loaded = load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded.source.as_deref(), Some(path.as_path()));
        assert_eq!(loaded.glyphs, font.glyphs);
        assert_eq!(loaded.names, font.names);
    }
}
