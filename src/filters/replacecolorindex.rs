use crate::{
    filters::{FontFilter, GlyphSelection},
    GlyphsmithError,
};

/// A filter that moves colour layers from one palette index to another
///
/// A layer matches when its palette attribute, or failing that its
/// `Color N` name, gives the old index. Matching layers get the new index
/// and are renamed to match.
pub struct ReplaceColorIndex {
    from: i64,
    to: i64,
    selection: GlyphSelection,
}

impl ReplaceColorIndex {
    pub fn new(from: i64, to: i64) -> Self {
        ReplaceColorIndex {
            from,
            to,
            selection: GlyphSelection::All,
        }
    }
}

impl FontFilter for ReplaceColorIndex {
    fn apply(&self, font: &mut crate::Font) -> Result<(), GlyphsmithError> {
        log::info!("Replacing colour index {} with {}", self.from, self.to);
        for glyph in font.glyphs.iter_mut() {
            if !self.selection.includes(&glyph.name) {
                continue;
            }
            for layer in glyph.layers.iter_mut() {
                if layer.is_color_layer() && layer.color_palette_index() == Some(self.from) {
                    layer.set_color_palette_index(self.to);
                    log::info!("Updated colour layer {} of {}", self.from, glyph.name);
                }
            }
        }
        Ok(())
    }

    fn select(&mut self, selection: &GlyphSelection) {
        self.selection = selection.clone();
    }

    fn from_str(s: &str) -> Result<Self, GlyphsmithError>
    where
        Self: Sized,
    {
        let bad = || GlyphsmithError::FilterError(format!("Expected FROM:TO colour indices, got {:?}", s));
        let (from, to) = s.split_once(':').ok_or_else(bad)?;
        let from = from.trim().parse().map_err(|_| bad())?;
        let to = to.trim().parse().map_err(|_| bad())?;
        Ok(ReplaceColorIndex::new(from, to))
    }

    #[cfg(feature = "cli")]
    fn arg() -> clap::Arg
    where
        Self: Sized,
    {
        clap::Arg::new("replacecolorindex")
            .long("replace-color-index")
            .help("Move colour layers from one palette index to another")
            .value_name("FROM:TO")
            .action(clap::ArgAction::Append)
    }
}
