use crate::{
    filters::{FontFilter, GlyphSelection},
    Shape,
};

const DEFAULT_SUFFIX: &str = ".fina";

/// A filter that removes components whose glyph name contains a suffix,
/// `.fina` unless told otherwise, from master layers
pub struct RemoveComponentsWithSuffix {
    suffix: String,
    selection: GlyphSelection,
}

impl RemoveComponentsWithSuffix {
    pub fn new(suffix: impl Into<String>) -> Self {
        RemoveComponentsWithSuffix {
            suffix: suffix.into(),
            selection: GlyphSelection::All,
        }
    }
}

impl Default for RemoveComponentsWithSuffix {
    fn default() -> Self {
        Self::new(DEFAULT_SUFFIX)
    }
}

impl FontFilter for RemoveComponentsWithSuffix {
    fn apply(&self, font: &mut crate::Font) -> Result<(), crate::GlyphsmithError> {
        log::info!("Removing components containing {:?}", self.suffix);
        for glyph in font.glyphs.iter_mut() {
            if !self.selection.includes(&glyph.name) {
                continue;
            }
            for layer in glyph.layers.iter_mut().filter(|l| l.is_master_layer()) {
                let before = layer.shapes.len();
                layer.shapes.retain(|shape| match shape {
                    Shape::Component(c) => !c.reference.contains(self.suffix.as_str()),
                    Shape::Path(_) => true,
                });
                let removed = before - layer.shapes.len();
                if removed > 0 {
                    log::info!(
                        "Removed {} component(s) from {} (layer {})",
                        removed,
                        glyph.name,
                        layer.name.as_deref().or(layer.id.as_deref()).unwrap_or("?")
                    );
                }
            }
        }
        Ok(())
    }

    fn select(&mut self, selection: &GlyphSelection) {
        self.selection = selection.clone();
    }

    fn from_str(s: &str) -> Result<Self, crate::GlyphsmithError>
    where
        Self: Sized,
    {
        let s = s.trim();
        if s.is_empty() {
            Ok(RemoveComponentsWithSuffix::default())
        } else {
            Ok(RemoveComponentsWithSuffix::new(s))
        }
    }

    #[cfg(feature = "cli")]
    fn arg() -> clap::Arg
    where
        Self: Sized,
    {
        clap::Arg::new("removecomponentswithsuffix")
            .long("remove-components-with-suffix")
            .help("Remove components whose name contains the suffix (default .fina) from master layers")
            .value_name("SUFFIX")
            .action(clap::ArgAction::Append)
            .num_args(0..=1)
            .default_missing_value("")
            .required(false)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        filters::tests::{extra_layer, master_layer},
        Component, Font, Glyph,
    };
    use pretty_assertions::assert_eq;

    fn font() -> Font {
        let mut glyph = Glyph::new("beh-ar.fina.alt");
        let mut layer = master_layer("m01");
        layer.push_component(Component::new("behDotless-ar.fina"));
        layer.push_component(Component::new("dotbelow-ar"));
        glyph.layers.push(layer);
        let mut extra = extra_layer("m01", "x1", "Sketch");
        extra.push_component(Component::new("behDotless-ar.fina"));
        glyph.layers.push(extra);
        let mut font = Font::new();
        font.glyphs.push(glyph);
        font
    }

    #[test]
    fn test_removes_fina_from_master_layers_only() {
        let mut font = font();
        RemoveComponentsWithSuffix::from_str("")
            .unwrap()
            .apply(&mut font)
            .unwrap();
        let glyph = font.glyphs.get("beh-ar.fina.alt").unwrap();
        let refs: Vec<&str> = glyph.layers[0]
            .components()
            .map(|c| c.reference.as_str())
            .collect();
        assert_eq!(refs, vec!["dotbelow-ar"]);
        assert_eq!(glyph.layers[1].components().count(), 1);
    }

    #[test]
    fn test_custom_suffix() {
        let mut font = font();
        RemoveComponentsWithSuffix::from_str("-ar")
            .unwrap()
            .apply(&mut font)
            .unwrap();
        assert_eq!(
            font.glyphs.get("beh-ar.fina.alt").unwrap().layers[0]
                .components()
                .count(),
            0
        );
    }
}
