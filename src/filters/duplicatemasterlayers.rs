use crate::{
    filters::{FontFilter, GlyphSelection},
    GlyphsmithError, LayerType,
};
use uuid::Uuid;

/// A filter that keeps a named copy of every master layer
pub struct DuplicateMasterLayers {
    prefix: String,
    selection: GlyphSelection,
}

impl DuplicateMasterLayers {
    pub fn new(prefix: impl Into<String>) -> Self {
        DuplicateMasterLayers {
            prefix: prefix.into(),
            selection: GlyphSelection::All,
        }
    }
}

impl FontFilter for DuplicateMasterLayers {
    fn apply(&self, font: &mut crate::Font) -> Result<(), GlyphsmithError> {
        log::info!("Duplicating master layers as {:?}", self.prefix);
        let mut count = 0;
        for glyph in font.glyphs.iter_mut() {
            if !self.selection.includes(&glyph.name) {
                continue;
            }
            for master in font.masters.iter() {
                let Some(original) = glyph.master_layer(&master.id) else {
                    log::warn!("{} has no layer for master {}", glyph.name, master.display_name());
                    continue;
                };
                let mut duplicate = original.clone();
                duplicate.name = Some(format!("{} ({})", self.prefix, master.display_name()));
                duplicate.id = Some(Uuid::new_v4().to_string());
                duplicate.master = LayerType::AssociatedWithMaster(master.id.clone());
                glyph.layers.push(duplicate);
            }
            count += 1;
        }
        log::info!("Layers duplicated for {} glyph(s)", count);
        Ok(())
    }

    fn select(&mut self, selection: &GlyphSelection) {
        self.selection = selection.clone();
    }

    fn from_str(s: &str) -> Result<Self, GlyphsmithError>
    where
        Self: Sized,
    {
        let prefix = s.trim();
        if prefix.is_empty() {
            return Err(GlyphsmithError::FilterError(
                "A layer name prefix is required".to_string(),
            ));
        }
        Ok(DuplicateMasterLayers::new(prefix))
    }

    #[cfg(feature = "cli")]
    fn arg() -> clap::Arg
    where
        Self: Sized,
    {
        clap::Arg::new("duplicatemasterlayers")
            .long("duplicate-master-layers")
            .help("Copy each master layer to a new layer named \"PREFIX (master)\"")
            .value_name("PREFIX")
            .action(clap::ArgAction::Append)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::filters::tests::test_font;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_duplicate_master_layers() {
        let mut font = test_font();
        DuplicateMasterLayers::from_str("Before Spacing")
            .unwrap()
            .apply(&mut font)
            .unwrap();
        let a = font.glyphs.get("A").unwrap();
        assert_eq!(a.layers.len(), 4);
        let copy = &a.layers[3];
        assert_eq!(copy.name.as_deref(), Some("Before Spacing (Bold)"));
        assert_eq!(copy.master, LayerType::AssociatedWithMaster("m02".to_string()));
        assert_eq!(copy.shapes, a.layers[1].shapes);
        assert_ne!(copy.id, a.layers[2].id);
        assert_ne!(copy.id.as_deref(), Some("m02"));
    }

    #[test]
    fn test_empty_prefix_is_an_error() {
        assert!(DuplicateMasterLayers::from_str("  ").is_err());
    }
}
