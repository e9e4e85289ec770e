use crate::{
    common::FormatSpecific, glyph::GlyphList, shape::Shape, Component, GlyphsmithError, Path,
};
use kurbo::Shape as _;
use serde::{Deserialize, Serialize};

/// Layer attribute holding the CPAL palette index of a colour layer
pub const KEY_COLOR_PALETTE: &str = "colorPalette";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum LayerType {
    DefaultForMaster(String),
    AssociatedWithMaster(String),
    #[default]
    FreeFloating,
}

impl LayerType {
    pub fn is_default(&self) -> bool {
        matches!(self, LayerType::FreeFloating)
    }

    /// The master this layer belongs to, whether as its main drawing or as an extra layer
    pub fn master_id(&self) -> Option<&str> {
        match self {
            LayerType::DefaultForMaster(m) | LayerType::AssociatedWithMaster(m) => Some(m),
            LayerType::FreeFloating => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub width: f32,
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "LayerType::is_default")]
    pub master: LayerType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shapes: Vec<Shape>,
    #[serde(default, skip_serializing_if = "FormatSpecific::is_empty")]
    pub format_specific: FormatSpecific,
}

impl Layer {
    pub fn new(width: f32) -> Layer {
        Layer {
            width,
            ..Default::default()
        }
    }

    pub fn is_master_layer(&self) -> bool {
        matches!(self.master, LayerType::DefaultForMaster(_))
    }

    pub fn components(&self) -> impl DoubleEndedIterator<Item = &Component> {
        self.shapes.iter().filter_map(|shape| match shape {
            Shape::Component(c) => Some(c),
            Shape::Path(_) => None,
        })
    }

    pub fn paths(&self) -> impl DoubleEndedIterator<Item = &Path> {
        self.shapes.iter().filter_map(|shape| match shape {
            Shape::Path(p) => Some(p),
            Shape::Component(_) => None,
        })
    }

    pub fn push_component(&mut self, c: Component) {
        self.shapes.push(Shape::Component(c))
    }

    pub fn push_path(&mut self, p: Path) {
        self.shapes.push(Shape::Path(p))
    }

    pub fn has_components(&self) -> bool {
        self.components().next().is_some()
    }

    /// The CPAL palette index of a colour layer.
    ///
    /// Glyphs stores this as a layer attribute; older files and hand-made
    /// fonts only carry it in a layer name of the form `Color N`.
    pub fn color_palette_index(&self) -> Option<i64> {
        self.format_specific.get_i64(KEY_COLOR_PALETTE).or_else(|| {
            self.name
                .as_deref()
                .and_then(|n| n.strip_prefix("Color "))
                .and_then(|n| n.trim().parse().ok())
        })
    }

    pub fn is_color_layer(&self) -> bool {
        self.format_specific.contains_key(KEY_COLOR_PALETTE)
            || self
                .name
                .as_deref()
                .is_some_and(|name| name.starts_with("Color"))
    }

    pub fn set_color_palette_index(&mut self, index: i64) {
        self.format_specific
            .insert(KEY_COLOR_PALETTE.to_string(), index.into());
        self.name = Some(format!("Color {}", index));
    }

    /// A copy of this layer with all components flattened into paths
    pub fn decomposed(&self, glyphs: &GlyphList) -> Layer {
        let decomposed_shapes = self.decomposed_components(glyphs).into_iter().map(Shape::Path);
        Layer {
            shapes: self
                .shapes
                .iter()
                .filter(|sh| matches!(sh, Shape::Path(_)))
                .cloned()
                .chain(decomposed_shapes)
                .collect(),
            ..self.clone()
        }
    }

    /// The outlines of this layer's components, resolved through the
    /// same master's layers of the referenced glyphs
    pub fn decomposed_components(&self, glyphs: &GlyphList) -> Vec<Path> {
        let mut paths = vec![];
        if let Some(master_id) = self.master.master_id() {
            for component in self.components() {
                flatten_component(
                    glyphs,
                    master_id,
                    component,
                    kurbo::Affine::IDENTITY,
                    0,
                    &mut paths,
                );
            }
        }
        paths
    }

    pub fn bounds(&self) -> Result<kurbo::Rect, GlyphsmithError> {
        if self.has_components() {
            return Err(GlyphsmithError::NeedsDecomposition);
        }
        let mut bounds: Option<kurbo::Rect> = None;
        for path in self.paths() {
            let rect = path.to_kurbo()?.bounding_box();
            bounds = Some(bounds.map_or(rect, |b| b.union(rect)));
        }
        Ok(bounds.unwrap_or_default())
    }

    /// Left sidebearing of an outline-only layer
    pub fn lsb(&self) -> Result<f32, GlyphsmithError> {
        Ok(self.bounds()?.min_x() as f32)
    }

    /// Right sidebearing of an outline-only layer
    pub fn rsb(&self) -> Result<f32, GlyphsmithError> {
        Ok(self.width - self.bounds()?.max_x() as f32)
    }
}

/// Components nested deeper than this are assumed to be cyclic
const MAX_COMPONENT_DEPTH: usize = 32;

fn flatten_component(
    glyphs: &GlyphList,
    master_id: &str,
    component: &Component,
    outer: kurbo::Affine,
    depth: usize,
    out: &mut Vec<Path>,
) {
    if depth > MAX_COMPONENT_DEPTH {
        log::warn!("Component {} nests too deeply; skipping", component.reference);
        return;
    }
    let Some(layer) = glyphs
        .get(&component.reference)
        .and_then(|g| g.master_layer(master_id))
    else {
        return;
    };
    let transform = outer * component.transform;
    for shape in &layer.shapes {
        match shape {
            Shape::Path(p) => out.push(p.transformed(transform)),
            Shape::Component(c) => {
                flatten_component(glyphs, master_id, c, transform, depth + 1, out)
            }
        }
    }
}

#[cfg(feature = "glyphs")]
pub(crate) mod glyphs {
    use super::*;

    impl From<&glyphslib::glyphs3::Layer> for Layer {
        fn from(val: &glyphslib::glyphs3::Layer) -> Self {
            let mut format_specific = FormatSpecific::default();
            for (key, value) in val.attr.iter() {
                format_specific.insert(
                    key.to_string(),
                    serde_json::to_value(value).unwrap_or_default(),
                );
            }
            Layer {
                id: Some(val.layer_id.clone()),
                master: match &val.associated_master_id {
                    Some(m) => LayerType::AssociatedWithMaster(m.clone()),
                    None => LayerType::DefaultForMaster(val.layer_id.clone()),
                },
                name: val.name.clone(),
                shapes: val.shapes.iter().map(Into::into).collect(),
                width: val.width,
                format_specific,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{Glyph, Node, NodeType};
    use pretty_assertions::assert_eq;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Path {
        Path {
            nodes: vec![
                Node::new(x0, y0, NodeType::Line),
                Node::new(x1, y0, NodeType::Line),
                Node::new(x1, y1, NodeType::Line),
                Node::new(x0, y1, NodeType::Line),
            ],
            closed: true,
            format_specific: FormatSpecific::default(),
        }
    }

    fn master_layer(width: f32) -> Layer {
        Layer {
            width,
            id: Some("m01".to_string()),
            master: LayerType::DefaultForMaster("m01".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_sidebearings() {
        let mut layer = master_layer(500.0);
        layer.push_path(rect(50.0, 0.0, 420.0, 700.0));
        assert_eq!(layer.lsb().unwrap(), 50.0);
        assert_eq!(layer.rsb().unwrap(), 80.0);
    }

    #[test]
    fn test_bounds_needs_decomposition() {
        let mut layer = master_layer(500.0);
        layer.push_component(Component::new("A"));
        assert!(matches!(
            layer.bounds(),
            Err(GlyphsmithError::NeedsDecomposition)
        ));
    }

    #[test]
    fn test_decompose_nested_components() {
        let mut glyphs = GlyphList::default();
        let mut dot = Glyph::new("dot");
        let mut dot_layer = master_layer(100.0);
        dot_layer.push_path(rect(0.0, 0.0, 10.0, 10.0));
        dot.layers.push(dot_layer);
        glyphs.push(dot);

        let mut colon = Glyph::new("colon");
        let mut colon_layer = master_layer(100.0);
        let mut upper = Component::new("dot");
        upper.transform = kurbo::Affine::translate((0.0, 100.0));
        colon_layer.push_component(Component::new("dot"));
        colon_layer.push_component(upper);
        colon.layers.push(colon_layer);
        glyphs.push(colon);

        let mut layer = master_layer(300.0);
        let mut shifted = Component::new("colon");
        shifted.transform = kurbo::Affine::translate((40.0, 0.0));
        layer.push_component(shifted);

        let flat = layer.decomposed(&glyphs);
        assert!(!flat.has_components());
        assert_eq!(flat.paths().count(), 2);
        assert_eq!(
            flat.bounds().unwrap(),
            kurbo::Rect::new(40.0, 0.0, 50.0, 110.0)
        );
    }

    #[test]
    fn test_cyclic_components_terminate() {
        let mut glyphs = GlyphList::default();
        let mut ouroboros = Glyph::new("ouroboros");
        let mut layer = master_layer(100.0);
        layer.push_path(rect(0.0, 0.0, 10.0, 10.0));
        layer.push_component(Component::new("ouroboros"));
        ouroboros.layers.push(layer.clone());
        glyphs.push(ouroboros);

        let flat = layer.decomposed(&glyphs);
        assert!(flat.paths().count() > 1);
        assert!(!flat.has_components());
    }

    #[test]
    fn test_color_palette_from_name_or_attribute() {
        let mut layer = master_layer(0.0);
        layer.name = Some("Color 3".to_string());
        assert_eq!(layer.color_palette_index(), Some(3));
        assert!(layer.is_color_layer());
        layer.set_color_palette_index(1);
        assert_eq!(layer.name.as_deref(), Some("Color 1"));
        assert_eq!(layer.color_palette_index(), Some(1));
    }
}
