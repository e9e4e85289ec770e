use crate::filters::{FontFilter, GlyphSelection};

/// A filter that deletes every colour layer
#[derive(Default)]
pub struct DeleteColorLayers {
    selection: GlyphSelection,
}

impl DeleteColorLayers {
    pub fn new() -> Self {
        DeleteColorLayers::default()
    }
}

impl FontFilter for DeleteColorLayers {
    fn apply(&self, font: &mut crate::Font) -> Result<(), crate::GlyphsmithError> {
        log::info!("Deleting colour layers");
        for glyph in font.glyphs.iter_mut() {
            if !self.selection.includes(&glyph.name) {
                continue;
            }
            let before = glyph.layers.len();
            glyph.layers.retain(|layer| !layer.is_color_layer());
            if glyph.layers.len() != before {
                log::info!(
                    "Deleted {} colour layer(s) of {}",
                    before - glyph.layers.len(),
                    glyph.name
                );
            }
        }
        Ok(())
    }

    fn select(&mut self, selection: &GlyphSelection) {
        self.selection = selection.clone();
    }

    fn from_str(_s: &str) -> Result<Self, crate::GlyphsmithError>
    where
        Self: Sized,
    {
        Ok(DeleteColorLayers::new())
    }

    #[cfg(feature = "cli")]
    fn arg() -> clap::Arg
    where
        Self: Sized,
    {
        clap::Arg::new("deletecolorlayers")
            .long("delete-color-layers")
            .help("Delete all colour palette layers")
            .action(clap::ArgAction::SetTrue)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::filters::tests::{extra_layer, test_font};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_delete_color_layers() {
        let mut font = test_font();
        let a = font.glyphs.get_mut("A").unwrap();
        a.layers.push(extra_layer("m01", "c1", "Color 1"));
        let mut by_attribute = extra_layer("m01", "c2", "Red");
        by_attribute.set_color_palette_index(2);
        by_attribute.name = Some("Red".to_string());
        a.layers.push(by_attribute);
        a.layers.push(extra_layer("m01", "s1", "Sketch"));
        DeleteColorLayers::new().apply(&mut font).unwrap();
        let names: Vec<Option<&str>> = font
            .glyphs
            .get("A")
            .unwrap()
            .layers
            .iter()
            .map(|l| l.name.as_deref())
            .collect();
        assert_eq!(names, vec![None, None, Some("Sketch")]);
    }
}
