use crate::{
    filters::{FontFilter, GlyphSelection},
    Glyph, GlyphsmithError, Layer, LayerType,
};
use uuid::Uuid;

/// A filter that copies the shapes of some layers onto others
///
/// Layers are named, and matched within each master: the shapes of every
/// source layer of a master are appended to every target layer of the same
/// master. Targets a glyph lacks are created when it has something to copy.
pub struct CopyLayerShapes {
    sources: Vec<String>,
    targets: Vec<String>,
    /// Empty the targets before copying
    replace: bool,
    selection: GlyphSelection,
}

impl CopyLayerShapes {
    pub fn new(sources: Vec<String>, targets: Vec<String>, replace: bool) -> Self {
        CopyLayerShapes {
            sources,
            targets,
            replace,
            selection: GlyphSelection::All,
        }
    }

    fn copy_for_master(&self, glyph: &mut Glyph, master_id: &str) {
        let belongs = |layer: &Layer, name: &str| {
            layer.master.master_id() == Some(master_id) && layer.name.as_deref() == Some(name)
        };
        let shapes: Vec<_> = self
            .sources
            .iter()
            .filter_map(|name| glyph.layers.iter().find(|l| belongs(l, name)))
            .flat_map(|l| l.shapes.iter().cloned())
            .collect();
        let has_source = self
            .sources
            .iter()
            .any(|name| glyph.layers.iter().any(|l| belongs(l, name)));
        if !has_source {
            return;
        }
        let width = glyph
            .master_layer(master_id)
            .map(|l| l.width)
            .unwrap_or_default();
        for target in &self.targets {
            let index = match glyph.layers.iter().position(|l| belongs(l, target)) {
                Some(index) => index,
                None => {
                    glyph.layers.push(new_layer(target, master_id, width));
                    glyph.layers.len() - 1
                }
            };
            let layer = &mut glyph.layers[index];
            if self.replace {
                layer.shapes.clear();
                log::info!("Removed shapes in {} of {}", target, glyph.name);
            }
            layer.shapes.extend(shapes.iter().cloned());
            log::info!(
                "Copied {} to {} of {}",
                self.sources.join(", "),
                target,
                glyph.name
            );
        }
    }
}

fn new_layer(name: &str, master_id: &str, width: f32) -> Layer {
    let mut layer = Layer {
        width,
        name: Some(name.to_string()),
        id: Some(Uuid::new_v4().to_string()),
        master: LayerType::AssociatedWithMaster(master_id.to_string()),
        ..Default::default()
    };
    if let Some(index) = layer.color_palette_index() {
        layer.set_color_palette_index(index);
    }
    layer
}

impl FontFilter for CopyLayerShapes {
    fn apply(&self, font: &mut crate::Font) -> Result<(), GlyphsmithError> {
        log::info!(
            "Copying shapes from {} to {}",
            self.sources.join(", "),
            self.targets.join(", ")
        );
        let master_ids: Vec<String> = font.masters.iter().map(|m| m.id.clone()).collect();
        for glyph in font.glyphs.iter_mut() {
            if !self.selection.includes(&glyph.name) {
                continue;
            }
            if glyph.layers.is_empty() {
                log::warn!("{} has no layers", glyph.name);
                continue;
            }
            for master_id in &master_ids {
                self.copy_for_master(glyph, master_id);
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
        let (mapping, replace) = match s.trim().strip_suffix('!') {
            Some(mapping) => (mapping, true),
            None => (s.trim(), false),
        };
        let names = |list: &str| -> Vec<String> {
            list.split(',')
                .map(|n| n.trim())
                .filter(|n| !n.is_empty())
                .map(String::from)
                .collect()
        };
        let (sources, targets) = mapping
            .split_once('>')
            .map(|(sources, targets)| (names(sources), names(targets)))
            .unwrap_or_default();
        if sources.is_empty() || targets.is_empty() {
            return Err(GlyphsmithError::FilterError(format!(
                "Expected SOURCES>TARGETS layer names, got {:?}",
                s
            )));
        }
        if sources.iter().any(|s| targets.contains(s)) {
            return Err(GlyphsmithError::FilterError(
                "A layer cannot be both source and target".to_string(),
            ));
        }
        Ok(CopyLayerShapes::new(sources, targets, replace))
    }

    #[cfg(feature = "cli")]
    fn arg() -> clap::Arg
    where
        Self: Sized,
    {
        clap::Arg::new("copylayershapes")
            .long("copy-layer-shapes")
            .help("Copy shapes between named layers, e.g. \"Color 3>Color 1\"; end with ! to empty the targets first")
            .value_name("SOURCES>TARGETS")
            .action(clap::ArgAction::Append)
    }
}
