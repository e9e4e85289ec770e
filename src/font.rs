use crate::{
    common::FormatSpecific, glyph::GlyphList, master::Master, names::Names, GlyphsmithError,
    Layer,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub upm: u16,
    #[serde(default)]
    pub masters: Vec<Master>,
    #[serde(default)]
    pub glyphs: GlyphList,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub names: Names,
    #[serde(default, skip_serializing_if = "FormatSpecific::is_empty")]
    pub format_specific: FormatSpecific,
    /// Where this font was loaded from
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for Font {
    fn default() -> Self {
        Self::new()
    }
}

impl Font {
    pub fn new() -> Self {
        Font {
            upm: 1000,
            masters: vec![],
            glyphs: GlyphList(vec![]),
            note: None,
            names: Names::default(),
            format_specific: FormatSpecific::default(),
            source: None,
        }
    }

    /// Find a master by its display name
    pub fn master(&self, master_name: &str) -> Option<&Master> {
        self.masters
            .iter()
            .find(|m| m.name.get_default().map(|x| x.as_str()) == Some(master_name))
    }

    pub fn master_layer_for(&self, glyphname: &str, master: &Master) -> Option<&Layer> {
        self.glyphs.get(glyphname)?.master_layer(&master.id)
    }

    /// Find the first glyph which encodes the given character
    pub fn glyph_for_char(&self, c: char) -> Option<&crate::Glyph> {
        let cp = c as u32;
        self.glyphs.iter().find(|g| g.codepoints.contains(&cp))
    }

    /// Write the font out; the format is chosen by the file extension
    pub fn save(&self, filename: impl Into<PathBuf>) -> Result<(), GlyphsmithError> {
        let path = filename.into();
        match path.extension() {
            Some(ext) if ext == "json" => {
                let file =
                    std::fs::File::create(&path).map_err(|source| GlyphsmithError::FileIO {
                        path: path.clone(),
                        source,
                    })?;
                serde_json::to_writer_pretty(std::io::BufWriter::new(file), self)?;
                Ok(())
            }
            #[cfg(feature = "ufo")]
            Some(ext) if ext == "ufo" => {
                crate::convertors::ufo::as_norad(self)?.save(&path)?;
                Ok(())
            }
            _ => Err(GlyphsmithError::UnknownFileType { path }),
        }
    }
}
