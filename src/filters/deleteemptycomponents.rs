use crate::{
    filters::{FontFilter, GlyphSelection},
    glyph::GlyphList,
    Layer, Shape,
};

/// A filter that removes components pointing at glyphs with nothing drawn
///
/// The referenced glyph's layer is matched by layer id first, then by
/// master. Components referring to glyphs the font lacks are left alone.
#[derive(Default)]
pub struct DeleteEmptyComponents {
    selection: GlyphSelection,
}

impl DeleteEmptyComponents {
    pub fn new() -> Self {
        DeleteEmptyComponents::default()
    }
}

fn referenced_layer<'a>(glyphs: &'a GlyphList, reference: &str, layer: &Layer) -> Option<&'a Layer> {
    let glyph = glyphs.get(reference)?;
    layer
        .id
        .as_deref()
        .and_then(|id| glyph.get_layer(id))
        .or_else(|| {
            layer
                .master
                .master_id()
                .and_then(|master| glyph.master_layer(master))
        })
}

fn is_empty_component(glyphs: &GlyphList, shape: &Shape, layer: &Layer) -> bool {
    match shape {
        Shape::Component(component) => referenced_layer(glyphs, &component.reference, layer)
            .is_some_and(|l| l.shapes.is_empty()),
        Shape::Path(_) => false,
    }
}

impl FontFilter for DeleteEmptyComponents {
    fn apply(&self, font: &mut crate::Font) -> Result<(), crate::GlyphsmithError> {
        log::info!("Deleting empty components");
        // Removals are worked out against the untouched glyph list first
        let mut removals: Vec<(usize, usize, Vec<usize>)> = vec![];
        for (glyph_index, glyph) in font.glyphs.iter().enumerate() {
            if !self.selection.includes(&glyph.name) {
                continue;
            }
            for (layer_index, layer) in glyph.layers.iter().enumerate() {
                let empty: Vec<usize> = layer
                    .shapes
                    .iter()
                    .enumerate()
                    .filter(|(_, shape)| is_empty_component(&font.glyphs, shape, layer))
                    .map(|(i, _)| i)
                    .collect();
                if !empty.is_empty() {
                    removals.push((glyph_index, layer_index, empty));
                }
            }
        }
        for (glyph_index, layer_index, empty) in removals {
            let glyph = &mut font.glyphs[glyph_index];
            let glyph_name = glyph.name.clone();
            let layer = &mut glyph.layers[layer_index];
            for index in empty.into_iter().rev() {
                let removed = layer.shapes.remove(index);
                if let Shape::Component(component) = removed {
                    log::info!(
                        "Deleted empty component {} in {} (layer {})",
                        component.reference,
                        glyph_name,
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

    fn from_str(_s: &str) -> Result<Self, crate::GlyphsmithError>
    where
        Self: Sized,
    {
        Ok(DeleteEmptyComponents::new())
    }

    #[cfg(feature = "cli")]
    fn arg() -> clap::Arg
    where
        Self: Sized,
    {
        clap::Arg::new("deleteemptycomponents")
            .long("delete-empty-components")
            .help("Delete components whose referenced glyph layer has no shapes")
            .action(clap::ArgAction::SetTrue)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{filters::tests::test_font, Component};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_delete_empty_components() {
        let mut font = test_font();
        DeleteEmptyComponents::new().apply(&mut font).unwrap();
        let aacute = font.glyphs.get("Aacute").unwrap();
        for layer in &aacute.layers {
            let refs: Vec<&str> = layer.components().map(|c| c.reference.as_str()).collect();
            assert_eq!(refs, vec!["A"]);
        }
    }

    #[test]
    fn test_missing_reference_is_kept() {
        let mut font = test_font();
        font.glyphs.get_mut("Aacute").unwrap().layers[0].push_component(Component::new("nope"));
        DeleteEmptyComponents::new().apply(&mut font).unwrap();
        assert_eq!(
            font.glyphs.get("Aacute").unwrap().layers[0].components().count(),
            2
        );
    }

    #[test]
    fn test_respects_selection() {
        let mut font = test_font();
        let mut filter = DeleteEmptyComponents::new();
        filter.select(&GlyphSelection::parse("A"));
        filter.apply(&mut font).unwrap();
        assert_eq!(
            font.glyphs.get("Aacute").unwrap().layers[0].components().count(),
            2
        );
    }
}
