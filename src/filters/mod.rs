/// Macro to declare filters with less boilerplate
///
/// Usage: `declare_filters! { TypeName(module_name) => "cli_name", ... }`
macro_rules! declare_filters {
    ($($(#[$meta:meta])* $type:ident($module:ident) => $name:literal),* $(,)?) => {
        $(
            $(#[$meta])*
            mod $module;
        )*

        $(
            $(#[$meta])*
            pub use $module::$type;
        )*

        #[cfg(feature = "cli")]
        #[doc="Add filter arguments to a clap Command"]
        pub fn filter_group(mut command: clap::Command) -> clap::Command {
            command = command.next_help_heading("Font filters");
            let mut ids = Vec::new();
            $(
                $(#[$meta])*
                {
                    let arg = $type::arg();
                    ids.push(arg.get_id().clone());
                    command = command.arg(arg);
                }
            )*
            command.group(clap::ArgGroup::new("filters").args(ids).multiple(true))
        }

        #[doc="Convert a filter name and argument to a FontFilter instance"]
        pub fn cli_to_filter(name: &str, arg: &str) -> Result<Box<dyn FontFilter>, crate::GlyphsmithError> {
            Ok(match name {
                $(
                    $(#[$meta])*
                    $name => Box::new($type::from_str(arg)?),
                )*
                _ => {
                    return Err(crate::GlyphsmithError::FilterError(format!(
                        "Unknown filter: {}",
                        name
                    )))
                }
            })
        }
    };
}

declare_filters! {
    DeleteEmptyComponents(deleteemptycomponents) => "deleteemptycomponents",
    RemoveComponentsWithSuffix(removecomponentswithsuffix) => "removecomponentswithsuffix",
    DeleteColorLayers(deletecolorlayers) => "deletecolorlayers",
    ReplaceColorIndex(replacecolorindex) => "replacecolorindex",
    CopyLayerShapes(copylayershapes) => "copylayershapes",
    DuplicateMasterLayers(duplicatemasterlayers) => "duplicatemasterlayers",
    SetLicense(setlicense) => "setlicense",
}

/// Which glyphs a filter touches
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GlyphSelection {
    #[default]
    All,
    Named(Vec<String>),
}

impl GlyphSelection {
    /// Parse a comma-separated list of glyph names; an empty list selects everything
    pub fn parse(s: &str) -> Self {
        let names: Vec<String> = s
            .split(',')
            .map(|g| g.trim())
            .filter(|g| !g.is_empty())
            .map(String::from)
            .collect();
        if names.is_empty() {
            GlyphSelection::All
        } else {
            GlyphSelection::Named(names)
        }
    }

    pub fn includes(&self, glyph: &str) -> bool {
        match self {
            GlyphSelection::All => true,
            GlyphSelection::Named(names) => names.iter().any(|n| n == glyph),
        }
    }

    /// The selected glyphs: in font order for everything, otherwise in the
    /// order they were named
    pub fn glyphs<'a>(&self, font: &'a crate::Font) -> Vec<&'a crate::Glyph> {
        match self {
            GlyphSelection::All => font.glyphs.iter().collect(),
            GlyphSelection::Named(names) => names
                .iter()
                .filter_map(|name| {
                    let glyph = font.glyphs.get(name);
                    if glyph.is_none() {
                        log::warn!("Glyph {} not found in font", name);
                    }
                    glyph
                })
                .collect(),
        }
    }
}

/// A trait for font filters that can be applied to a font
pub trait FontFilter {
    /// Apply the filter to the given font
    fn apply(&self, font: &mut crate::Font) -> Result<(), crate::GlyphsmithError>;

    /// Restrict the filter to some glyphs. Filters which act on the whole
    /// font ignore this.
    fn select(&mut self, _selection: &GlyphSelection) {}

    /// Parse a FontFilter from a string argument
    fn from_str(s: &str) -> Result<Self, crate::GlyphsmithError>
    where
        Self: Sized;

    #[cfg(feature = "cli")]
    /// Get the clap argument for this filter
    fn arg() -> clap::Arg
    where
        Self: Sized;
}

#[cfg(test)]
pub(crate) mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{Component, Font, Glyph, Layer, LayerType, Master, Node, NodeType, Path};
    use pretty_assertions::assert_eq;

    pub(crate) fn square() -> Path {
        Path {
            nodes: vec![
                Node::new(0.0, 0.0, NodeType::Line),
                Node::new(100.0, 0.0, NodeType::Line),
                Node::new(100.0, 100.0, NodeType::Line),
                Node::new(0.0, 100.0, NodeType::Line),
            ],
            closed: true,
            format_specific: Default::default(),
        }
    }

    pub(crate) fn master_layer(master: &str) -> Layer {
        Layer {
            width: 500.0,
            id: Some(master.to_string()),
            master: LayerType::DefaultForMaster(master.to_string()),
            ..Default::default()
        }
    }

    pub(crate) fn extra_layer(master: &str, id: &str, name: &str) -> Layer {
        Layer {
            width: 500.0,
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            master: LayerType::AssociatedWithMaster(master.to_string()),
            ..Default::default()
        }
    }

    /// Two masters; `empty` has no outlines, `A` has a square, `Aacute`
    /// is built from `A` and `empty`.
    pub(crate) fn test_font() -> Font {
        let mut font = Font::new();
        font.masters.push(Master::new("Regular", "m01"));
        font.masters.push(Master::new("Bold", "m02"));
        let mut empty = Glyph::new("empty");
        let mut a = Glyph::new("A");
        a.codepoints.push(0x41);
        let mut aacute = Glyph::new("Aacute");
        aacute.codepoints.push(0xC1);
        for master in ["m01", "m02"] {
            empty.layers.push(master_layer(master));
            let mut layer = master_layer(master);
            layer.push_path(square());
            a.layers.push(layer);
            let mut layer = master_layer(master);
            layer.push_component(Component::new("A"));
            layer.push_component(Component::new("empty"));
            aacute.layers.push(layer);
        }
        font.glyphs.push(empty);
        font.glyphs.push(a);
        font.glyphs.push(aacute);
        font
    }

    #[test]
    fn test_selection_parse() {
        assert_eq!(GlyphSelection::parse(""), GlyphSelection::All);
        let selection = GlyphSelection::parse("A, B");
        assert!(selection.includes("B"));
        assert!(!selection.includes("C"));
    }

    #[test]
    fn test_unknown_filter() {
        assert!(matches!(
            cli_to_filter("makeitbold", ""),
            Err(crate::GlyphsmithError::FilterError(_))
        ));
    }

    #[test]
    fn test_filters_chain() {
        let mut font = test_font();
        let filters = vec![
            cli_to_filter("deleteemptycomponents", "").unwrap(),
            cli_to_filter("duplicatemasterlayers", "Backup").unwrap(),
        ];
        for filter in filters {
            filter.apply(&mut font).unwrap();
        }
        let aacute = font.glyphs.get("Aacute").unwrap();
        assert_eq!(aacute.layers.len(), 4);
        assert!(aacute.layers.iter().all(|l| l.components().count() == 1));
    }
}
