use crate::{
    common::{FormatSpecific, Node, NodeType},
    GlyphsmithError,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smol_str::SmolStr;

/// Attribute set by Glyphs on paths which carry a live (unexpanded) stroke
pub const KEY_STROKE_WIDTH: &str = "strokeWidth";

fn is_identity(t: &kurbo::Affine) -> bool {
    *t == kurbo::Affine::IDENTITY
}

fn serialize_affine<S: Serializer>(t: &kurbo::Affine, s: S) -> Result<S::Ok, S::Error> {
    t.as_coeffs().serialize(s)
}

fn deserialize_affine<'de, D: Deserializer<'de>>(d: D) -> Result<kurbo::Affine, D::Error> {
    let coeffs: [f64; 6] = Deserialize::deserialize(d)?;
    Ok(kurbo::Affine::new(coeffs))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A component in a glyph
pub struct Component {
    /// The referenced glyph name
    pub reference: SmolStr,
    /// The transformation applied to the component
    #[serde(
        default,
        skip_serializing_if = "is_identity",
        serialize_with = "serialize_affine",
        deserialize_with = "deserialize_affine"
    )]
    pub transform: kurbo::Affine,
    #[serde(default, skip_serializing_if = "FormatSpecific::is_empty")]
    pub format_specific: FormatSpecific,
}

impl Component {
    pub fn new(reference: impl Into<SmolStr>) -> Self {
        Component {
            reference: reference.into(),
            transform: kurbo::Affine::IDENTITY,
            format_specific: FormatSpecific::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// A path in a glyph
pub struct Path {
    pub nodes: Vec<Node>,
    pub closed: bool,
    /// Format-specific data; Glyphs path attributes such as `strokeWidth` land here
    #[serde(default, skip_serializing_if = "FormatSpecific::is_empty")]
    pub format_specific: FormatSpecific,
}

impl Path {
    /// Does this path carry a live stroke rather than a filled outline?
    pub fn has_live_stroke(&self) -> bool {
        self.format_specific.contains_key(KEY_STROKE_WIDTH)
    }

    /// Converts the `Path` to a [`kurbo::BezPath`].
    pub fn to_kurbo(&self) -> Result<kurbo::BezPath, GlyphsmithError> {
        let mut bez = kurbo::BezPath::new();
        // Closed contours are drawn from their last on-curve point, so that
        // trailing off-curves wrap round to the start
        let start = if self.closed {
            self.nodes
                .iter()
                .rposition(|n| n.nodetype != NodeType::OffCurve)
                .unwrap_or(0)
        } else {
            0
        };
        let mut order = self.nodes[start..].iter().chain(&self.nodes[..start]);
        if let Some(first) = order.next() {
            bez.move_to(first.point());
        }
        let mut pending: Vec<kurbo::Point> = vec![];
        for node in order {
            let pt = node.point();
            match node.nodetype {
                NodeType::OffCurve => {
                    pending.push(pt);
                    continue;
                }
                NodeType::Move => bez.move_to(pt),
                NodeType::Line => bez.line_to(pt),
                NodeType::Curve => match pending.as_slice() {
                    [c] => bez.quad_to(*c, pt),
                    [c1, c2] => bez.curve_to(*c1, *c2, pt),
                    _ => return Err(GlyphsmithError::BadPath),
                },
                NodeType::QCurve => {
                    // Runs of quadratic off-curves imply on-curves at their midpoints
                    for (i, c) in pending.iter().enumerate() {
                        let end = pending.get(i + 1).map_or(pt, |next| c.midpoint(*next));
                        bez.quad_to(*c, end);
                    }
                }
            }
            pending.clear();
        }
        if self.closed {
            bez.close_path();
        }
        Ok(bez)
    }

    pub(crate) fn transformed(&self, transform: kurbo::Affine) -> Path {
        Path {
            nodes: self
                .nodes
                .iter()
                .map(|node| node.moved_to(transform * node.point()))
                .collect(),
            closed: self.closed,
            format_specific: self.format_specific.clone(),
        }
    }
}

/// A shape in a glyph, either a component or a path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Shape {
    Component(Component),
    Path(Path),
}

#[cfg(feature = "glyphs")]
mod glyphs {
    use super::*;

    impl From<&glyphslib::glyphs3::Shape> for Shape {
        fn from(val: &glyphslib::glyphs3::Shape) -> Self {
            match val {
                glyphslib::glyphs3::Shape::Component(c) => Shape::Component(c.into()),
                glyphslib::glyphs3::Shape::Path(p) => Shape::Path(p.into()),
            }
        }
    }

    impl From<&glyphslib::glyphs3::Component> for Component {
        fn from(val: &glyphslib::glyphs3::Component) -> Self {
            // Glyphs applies scale, then rotation, then the offset
            let transform = kurbo::Affine::translate((val.position.0 as f64, val.position.1 as f64))
                * kurbo::Affine::rotate((val.angle as f64).to_radians())
                * kurbo::Affine::scale_non_uniform(val.scale.0 as f64, val.scale.1 as f64);
            Component {
                reference: SmolStr::from(&val.component_glyph),
                transform,
                format_specific: FormatSpecific::default(),
            }
        }
    }

    fn load_node(node: &glyphslib::glyphs3::Node) -> Node {
        use glyphslib::common::NodeType as G3;
        let (nodetype, smooth) = match node.node_type {
            G3::Line => (NodeType::Line, false),
            G3::LineSmooth => (NodeType::Line, true),
            G3::OffCurve => (NodeType::OffCurve, false),
            G3::Curve => (NodeType::Curve, false),
            G3::CurveSmooth => (NodeType::Curve, true),
            G3::QCurve => (NodeType::QCurve, false),
            G3::QCurveSmooth => (NodeType::QCurve, true),
        };
        Node {
            x: node.x as f64,
            y: node.y as f64,
            nodetype,
            smooth,
        }
    }

    impl From<&glyphslib::glyphs3::Path> for Path {
        fn from(val: &glyphslib::glyphs3::Path) -> Self {
            let mut format_specific = FormatSpecific::default();
            for (key, value) in val.attr.iter() {
                format_specific.insert(
                    key.to_string(),
                    serde_json::to_value(value).unwrap_or_default(),
                );
            }
            Path {
                nodes: val.nodes.iter().map(load_node).collect(),
                closed: val.closed,
                format_specific,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use pretty_assertions::assert_eq;

    fn square() -> Path {
        Path {
            nodes: vec![
                Node::new(10.0, 0.0, NodeType::Line),
                Node::new(90.0, 0.0, NodeType::Line),
                Node::new(90.0, 80.0, NodeType::Line),
                Node::new(10.0, 80.0, NodeType::Line),
            ],
            closed: true,
            format_specific: FormatSpecific::default(),
        }
    }

    #[test]
    fn test_square_bounds() {
        use kurbo::Shape as _;
        let bbox = square().to_kurbo().unwrap().bounding_box();
        assert_eq!(bbox, kurbo::Rect::new(10.0, 0.0, 90.0, 80.0));
    }

    #[test]
    fn test_quadratic_runs_imply_midpoints() {
        let path = Path {
            nodes: vec![
                Node::new(0.0, 100.0, NodeType::OffCurve),
                Node::new(100.0, 100.0, NodeType::OffCurve),
                Node::new(100.0, 0.0, NodeType::QCurve),
                Node::new(0.0, 0.0, NodeType::Line),
            ],
            closed: true,
            format_specific: FormatSpecific::default(),
        };
        let bez = path.to_kurbo().unwrap();
        assert_eq!(
            bez.elements(),
            &[
                kurbo::PathEl::MoveTo((0.0, 0.0).into()),
                kurbo::PathEl::QuadTo((0.0, 100.0).into(), (50.0, 100.0).into()),
                kurbo::PathEl::QuadTo((100.0, 100.0).into(), (100.0, 0.0).into()),
                kurbo::PathEl::ClosePath,
            ]
        );
    }

    #[test]
    fn test_curve_without_offcurves_is_bad() {
        let path = Path {
            nodes: vec![
                Node::new(0.0, 0.0, NodeType::Line),
                Node::new(10.0, 10.0, NodeType::Curve),
            ],
            closed: false,
            format_specific: FormatSpecific::default(),
        };
        assert!(matches!(path.to_kurbo(), Err(GlyphsmithError::BadPath)));
    }

    #[test]
    fn test_live_stroke_attribute() {
        let mut path = square();
        assert!(!path.has_live_stroke());
        path.format_specific
            .insert(KEY_STROKE_WIDTH.to_string(), 20.into());
        assert!(path.has_live_stroke());
    }

    #[test]
    fn test_component_serde_keeps_transform() {
        let mut component = Component::new("acutecomb");
        component.transform = kurbo::Affine::translate((120.0, 40.0));
        let serialized = serde_json::to_string(&Shape::Component(component.clone())).unwrap();
        let deserialized: Shape = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, Shape::Component(component));
    }
}
