//! UFO sources. A UFO holds one master; its default layer becomes the
//! master layer and every other UFO layer an extra layer of that master.
use crate::glyph::GlyphCategory;
use crate::{
    common::FormatSpecific, Component, Font, Glyph, GlyphsmithError, Layer, LayerType, Master,
    Node, NodeType, Path, Shape,
};
use indexmap::IndexSet;
use std::collections::HashSet;

const DEFAULT_MASTER_ID: &str = "public.default";

pub fn load<T: AsRef<std::path::Path>>(path: T) -> Result<Font, GlyphsmithError> {
    let ufo = norad::Font::load(&path)?;
    let mut font = Font::new();
    load_font_info(&mut font, &ufo.font_info);
    load_glyphs(&mut font, &ufo);

    let style = ufo.font_info.style_name.as_deref().unwrap_or("Regular");
    let master = Master::new(style, DEFAULT_MASTER_ID);
    for ufo_layer in ufo.iter_layers() {
        let (layer_id, layer_type) = if ufo_layer.is_default() {
            (master.id.clone(), LayerType::DefaultForMaster(master.id.clone()))
        } else {
            (
                ufo_layer.name().to_string(),
                LayerType::AssociatedWithMaster(master.id.clone()),
            )
        };
        for norad_glyph in ufo_layer.iter() {
            let Some(glyph) = font.glyphs.get_mut(norad_glyph.name().as_str()) else {
                continue;
            };
            let mut layer = load_layer(norad_glyph);
            layer.name = Some(layer_id.clone());
            layer.id = Some(layer_id.clone());
            layer.master = layer_type.clone();
            glyph.layers.push(layer);
        }
    }
    font.masters.push(master);
    Ok(font)
}

pub fn as_norad(font: &Font) -> Result<norad::Font, GlyphsmithError> {
    if font.masters.len() > 1 {
        log::warn!(
            "UFO holds a single master; layers of {} other masters are written as extra layers",
            font.masters.len() - 1
        );
    }
    let mut ufo = norad::Font::new();
    let first_master = font.masters.first().map(|m| m.id.as_str());
    for glyph in font.glyphs.iter() {
        for layer in glyph.layers.iter() {
            let norad_glyph = save_layer(glyph, layer)?;
            if layer.is_master_layer() && layer.master.master_id() == first_master {
                ufo.default_layer_mut().insert_glyph(norad_glyph);
                continue;
            }
            let name = layer
                .name
                .as_deref()
                .or(layer.id.as_deref())
                .unwrap_or("public.background");
            ufo.layers.get_or_create_layer(name)?.insert_glyph(norad_glyph);
        }
    }
    save_info(&mut ufo.font_info, font);
    Ok(ufo)
}

fn save_layer(glyph: &Glyph, layer: &Layer) -> Result<norad::Glyph, GlyphsmithError> {
    let mut norad_glyph = norad::Glyph::new(glyph.name.as_str());
    norad_glyph.width = layer.width as f64;
    norad_glyph.codepoints =
        norad::Codepoints::new(glyph.codepoints.iter().filter_map(|&cp| char::from_u32(cp)));
    for path in layer.paths() {
        norad_glyph.contours.push(save_path(path));
    }
    for component in layer.components() {
        norad_glyph.components.push(save_component(component)?);
    }
    Ok(norad_glyph)
}

fn load_layer(glyph: &norad::Glyph) -> Layer {
    let components = glyph.components.iter().map(|c| Shape::Component(load_component(c)));
    let paths = glyph.contours.iter().map(|c| Shape::Path(load_path(c)));
    Layer {
        shapes: components.chain(paths).collect(),
        ..Layer::new(glyph.width as f32)
    }
}

fn load_component(c: &norad::Component) -> Component {
    let t = &c.transform;
    Component {
        transform: kurbo::Affine::new([
            t.x_scale, t.xy_scale, t.yx_scale, t.y_scale, t.x_offset, t.y_offset,
        ]),
        ..Component::new(c.base.as_str())
    }
}

fn save_component(c: &Component) -> Result<norad::Component, GlyphsmithError> {
    let [x_scale, xy_scale, yx_scale, y_scale, x_offset, y_offset] = c.transform.as_coeffs();
    let transform = norad::AffineTransform {
        x_scale,
        xy_scale,
        yx_scale,
        y_scale,
        x_offset,
        y_offset,
    };
    let base = norad::Name::new(c.reference.as_str())?;
    Ok(norad::Component::new(base, transform, None))
}

fn load_path(c: &norad::Contour) -> Path {
    let open = c
        .points
        .first()
        .is_some_and(|p| p.typ == norad::PointType::Move);
    let mut nodes: Vec<Node> = c.points.iter().map(load_point).collect();
    // UFO contours start with their final on-curve point
    nodes.rotate_left(1);
    Path {
        nodes,
        closed: !open,
        format_specific: FormatSpecific::default(),
    }
}

fn save_path(p: &Path) -> norad::Contour {
    let mut points: Vec<norad::ContourPoint> = p.nodes.iter().map(save_point).collect();
    points.rotate_right(1);
    norad::Contour::new(points, None)
}

fn load_point(p: &norad::ContourPoint) -> Node {
    let nodetype = match p.typ {
        norad::PointType::Move => NodeType::Move,
        norad::PointType::Line => NodeType::Line,
        norad::PointType::OffCurve => NodeType::OffCurve,
        norad::PointType::QCurve => NodeType::QCurve,
        _ => NodeType::Curve,
    };
    Node {
        smooth: p.smooth,
        ..Node::new(p.x, p.y, nodetype)
    }
}

fn save_point(node: &Node) -> norad::ContourPoint {
    let typ = match node.nodetype {
        NodeType::Move => norad::PointType::Move,
        NodeType::Line => norad::PointType::Line,
        NodeType::OffCurve => norad::PointType::OffCurve,
        NodeType::Curve => norad::PointType::Curve,
        NodeType::QCurve => norad::PointType::QCurve,
    };
    norad::ContourPoint::new(node.x, node.y, typ, node.smooth, None, None)
}

fn save_info(info: &mut norad::FontInfo, font: &Font) {
    let names = &font.names;
    for (field, name) in [
        (&mut info.copyright, &names.copyright),
        (&mut info.family_name, &names.family_name),
        (&mut info.open_type_name_description, &names.description),
        (&mut info.open_type_name_designer, &names.designer),
        (&mut info.open_type_name_license, &names.license),
        (&mut info.open_type_name_license_url, &names.license_url),
        (&mut info.open_type_name_manufacturer, &names.manufacturer),
        (&mut info.trademark, &names.trademark),
    ] {
        *field = name.get_default().cloned();
    }
    info.note = font.note.clone();
    info.units_per_em = Some((font.upm as u32).into());
}

fn load_font_info(font: &mut Font, info: &norad::FontInfo) {
    let names = &mut font.names;
    for (name, field) in [
        (&mut names.copyright, &info.copyright),
        (&mut names.family_name, &info.family_name),
        (&mut names.description, &info.open_type_name_description),
        (&mut names.designer, &info.open_type_name_designer),
        (&mut names.license, &info.open_type_name_license),
        (&mut names.license_url, &info.open_type_name_license_url),
        (&mut names.manufacturer, &info.open_type_name_manufacturer),
        (&mut names.trademark, &info.trademark),
    ] {
        if let Some(value) = field {
            *name = value.into();
        }
    }
    font.note = info.note.clone();
    if let Some(upm) = info.units_per_em {
        font.upm = upm.as_f64() as u16;
    }
}

/// A list of strings from the UFO's lib, or nothing if the key is absent
fn lib_strings(ufo: &norad::Font, key: &str) -> Vec<String> {
    ufo.lib
        .get(key)
        .and_then(|v| v.as_array())
        .map(|values| {
            values
                .iter()
                .filter_map(|v| v.as_string())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

fn load_glyphs(font: &mut Font, ufo: &norad::Font) {
    let marks: HashSet<String> = ufo
        .lib
        .get("public.openTypeCategories")
        .and_then(|v| v.as_dictionary())
        .map(|categories| {
            categories
                .iter()
                .filter(|(_, category)| category.as_string() == Some("mark"))
                .map(|(name, _)| name.to_string())
                .collect()
        })
        .unwrap_or_default();
    let skipped: HashSet<String> = lib_strings(ufo, "public.skipExportGlyphs")
        .into_iter()
        .collect();

    // Glyphs named in public.glyphOrder come first, then the rest as stored
    let mut order: IndexSet<String> = lib_strings(ufo, "public.glyphOrder")
        .into_iter()
        .filter(|name| ufo.get_glyph(name.as_str()).is_some())
        .collect();
    order.extend(ufo.iter_names().map(|name| name.to_string()));

    for name in order {
        let Some(norad_glyph) = ufo.get_glyph(name.as_str()) else {
            continue;
        };
        let mut glyph = Glyph::new(name.as_str());
        glyph.codepoints = norad_glyph.codepoints.iter().map(|c| c as u32).collect();
        (glyph.category, glyph.subcategory) = if marks.contains(&name) {
            (GlyphCategory::Mark, Some("Nonspacing".to_string()))
        } else {
            glyph
                .codepoints
                .first()
                .map(|&cp| GlyphCategory::infer(cp))
                .unwrap_or_default()
        };
        glyph.exported = !skipped.contains(&name);
        font.glyphs.push(glyph);
    }
}
