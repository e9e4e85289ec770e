use crate::{
    kerning::{
        composer::{compose_block, render_blocks, BlockPlan, LineLayout, OutputBlock, PrimaryToken, Token},
        groups::{CharacterGroup, Controls, GroupKind, KerningConfig, Script},
        numbers::{detect_variants, NumberVariant},
    },
    tabs::TabSink,
    GlyphProvider, GlyphsmithError,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Ordering {
    /// The order the group lists its members in, which clusters similar shapes
    #[default]
    Shape,
    Alphabetical,
}

/// One secondary group to kern the primary group against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecondarySelection {
    pub kind: GroupKind,
    /// For letter groups, the script wanted; `None` means the request's script
    pub script: Option<Script>,
}

impl SecondarySelection {
    pub fn new(kind: GroupKind) -> Self {
        SecondarySelection { kind, script: None }
    }

    pub fn in_script(kind: GroupKind, script: Script) -> Self {
        SecondarySelection {
            kind,
            script: Some(script),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub script: Script,
    pub ordering: Ordering,
    pub primary: GroupKind,
    pub secondaries: Vec<SecondarySelection>,
    pub layout: LineLayout,
}

impl GenerationRequest {
    pub fn new(script: Script, primary: GroupKind, secondaries: Vec<SecondarySelection>) -> Self {
        GenerationRequest {
            script,
            ordering: Ordering::default(),
            primary,
            secondaries,
            layout: LineLayout::default(),
        }
    }

    /// The secondary selections that survive script resolution, deduplicated.
    ///
    /// Letter groups of the other script are dropped so that Latin is never
    /// kerned against Cyrillic.
    pub fn resolved_secondaries(&self) -> Vec<GroupKind> {
        let mut kinds = vec![];
        for selection in &self.secondaries {
            if selection.kind.is_letters() {
                if let Some(script) = selection.script {
                    if script != self.script {
                        log::warn!(
                            "Dropping {:?} {:?}: cannot kern {:?} against {:?}",
                            script,
                            selection.kind,
                            self.script,
                            script
                        );
                        continue;
                    }
                }
            }
            if !kinds.contains(&selection.kind) {
                kinds.push(selection.kind);
            }
        }
        kinds
    }
}

/// The text of one tab: all blocks for a single secondary selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub blocks: Vec<OutputBlock>,
}

impl Tab {
    pub fn text(&self) -> String {
        render_blocks(&self.blocks)
    }
}

/// The primary side of a run, resolved against the font
enum PrimarySide<'a> {
    Characters {
        group: &'a CharacterGroup,
        /// The group's controls, limited to what the font has
        controls: Controls,
        tokens: Vec<PrimaryToken>,
    },
    Numerals(Vec<(String, Vec<PrimaryToken>)>),
}

/// One secondary sequence, ready for composition
struct SecondarySide<'a> {
    label: String,
    group: Option<&'a CharacterGroup>,
    controls: Controls,
    tokens: Vec<Token>,
    /// Set when the sequence is a numeral set, so numerals kern against their own set only
    variant: Option<String>,
}

/// Builds kerning test strings from a [`KerningConfig`]
pub struct KerningStringMaker<'a> {
    config: &'a KerningConfig,
}

impl<'a> KerningStringMaker<'a> {
    pub fn new(config: &'a KerningConfig) -> Self {
        KerningStringMaker { config }
    }

    /// Compose every tab for the request.
    ///
    /// Preconditions are checked before anything is composed; a secondary
    /// selection with nothing to show yields no tab.
    pub fn generate<P: GlyphProvider + ?Sized>(
        &self,
        request: &GenerationRequest,
        provider: &P,
    ) -> Result<Vec<Tab>, GlyphsmithError> {
        let secondaries = request.resolved_secondaries();
        if secondaries.is_empty() {
            return Err(GlyphsmithError::NoSecondaryGroups);
        }
        let variants = detect_variants(provider, &self.config.numerals);
        for warning in variant_warnings(&variants) {
            log::warn!("{}", warning);
        }
        let primary = self.primary_side(request, provider, &variants)?;

        let mut tabs = vec![];
        for kind in secondaries {
            let sides = self.secondary_sides(kind, request, provider, &variants)?;
            let blocks = self.blocks_for(&primary, &sides, request);
            if blocks.is_empty() {
                log::info!("Nothing to kern against {:?}; skipping", kind);
                continue;
            }
            tabs.push(Tab { blocks });
        }
        Ok(tabs)
    }

    /// Compose every tab, then hand them all to the sink
    pub fn run<P: GlyphProvider + ?Sized, S: TabSink + ?Sized>(
        &self,
        request: &GenerationRequest,
        provider: &P,
        sink: &mut S,
    ) -> Result<usize, GlyphsmithError> {
        let tabs = self.generate(request, provider)?;
        for tab in &tabs {
            sink.new_tab(&tab.text())?;
        }
        Ok(tabs.len())
    }

    fn numbers_label(&self) -> &str {
        self.config
            .groups
            .iter()
            .find(|g| g.kind == GroupKind::Numbers)
            .map(|g| g.label.as_str())
            .unwrap_or("Numbers")
    }

    fn primary_side<P: GlyphProvider + ?Sized>(
        &self,
        request: &GenerationRequest,
        provider: &P,
        variants: &[NumberVariant],
    ) -> Result<PrimarySide<'a>, GlyphsmithError> {
        if request.primary == GroupKind::Numbers {
            if variants.is_empty() {
                return Err(GlyphsmithError::EmptyGroup(self.numbers_label().to_string()));
            }
            let sets = variants
                .iter()
                .filter_map(|variant| {
                    let zero = variant.zero()?.to_string();
                    let tokens = numeral_names(variant, request.ordering)
                        .into_iter()
                        .map(|glyph| PrimaryToken::Numeral {
                            glyph,
                            zero: zero.clone(),
                        })
                        .collect();
                    Some((variant.label.clone(), tokens))
                })
                .collect();
            return Ok(PrimarySide::Numerals(sets));
        }
        let group = self.config.resolve(request.primary, request.script)?;
        let members = ordered(group.filtered(provider), request.ordering);
        if members.is_empty() {
            return Err(GlyphsmithError::EmptyGroup(group.label.clone()));
        }
        let tokens = members
            .iter()
            .map(|m| {
                if group.kind == GroupKind::Punctuation {
                    PrimaryToken::punctuation(m)
                } else {
                    PrimaryToken::Letter(m.clone())
                }
            })
            .collect();
        Ok(PrimarySide::Characters {
            group,
            controls: group.controls_in(provider),
            tokens,
        })
    }

    fn secondary_sides<P: GlyphProvider + ?Sized>(
        &self,
        kind: GroupKind,
        request: &GenerationRequest,
        provider: &P,
        variants: &[NumberVariant],
    ) -> Result<Vec<SecondarySide<'a>>, GlyphsmithError> {
        if kind == GroupKind::Numbers {
            return Ok(variants
                .iter()
                .map(|variant| SecondarySide {
                    label: format!("{} ({})", self.numbers_label(), variant.label),
                    group: None,
                    controls: Controls::default(),
                    tokens: numeral_names(variant, request.ordering)
                        .into_iter()
                        .map(Token::Glyph)
                        .collect(),
                    variant: Some(variant.label.clone()),
                })
                .collect());
        }
        let group = self.config.resolve(kind, request.script)?;
        let tokens = ordered(group.filtered(provider), request.ordering)
            .into_iter()
            .map(Token::Char)
            .collect();
        Ok(vec![SecondarySide {
            label: group.label.clone(),
            group: Some(group),
            controls: group.controls_in(provider),
            tokens,
            variant: None,
        }])
    }

    fn blocks_for(
        &self,
        primary: &PrimarySide,
        sides: &[SecondarySide],
        request: &GenerationRequest,
    ) -> Vec<OutputBlock> {
        let mut blocks = vec![];
        match primary {
            PrimarySide::Characters {
                group,
                controls,
                tokens,
            } => {
                for side in sides {
                    let (left, right) = framing(group, controls, side);
                    let plan = BlockPlan {
                        header: format!("{} vs {}", group.label, side.label),
                        primary: tokens,
                        secondary: &side.tokens,
                        left,
                        right,
                        layout: request.layout,
                    };
                    blocks.extend(compose_block(&plan));
                }
            }
            PrimarySide::Numerals(sets) => {
                for (label, tokens) in sets {
                    for side in sides {
                        if side.variant.as_ref().is_some_and(|v| v != label) {
                            continue;
                        }
                        let header = if side.variant.is_some() {
                            format!("{} ({}) vs itself", self.numbers_label(), label)
                        } else {
                            format!("{} ({}) vs {}", self.numbers_label(), label, side.label)
                        };
                        let plan = BlockPlan {
                            header,
                            primary: tokens,
                            secondary: &side.tokens,
                            left: "",
                            right: "",
                            layout: request.layout,
                        };
                        blocks.extend(compose_block(&plan));
                    }
                }
            }
        }
        blocks
    }
}

/// Letter pairs are framed by the primary group's controls, except that
/// capitals against lower case close with the lower-case control.
fn framing<'c>(
    primary: &CharacterGroup,
    controls: &'c Controls,
    secondary: &'c SecondarySide,
) -> (&'c str, &'c str) {
    match secondary.group {
        Some(s) if primary.kind == GroupKind::Upper && s.kind == GroupKind::Lower => {
            (controls.left(), secondary.controls.right())
        }
        _ => (controls.left(), controls.right()),
    }
}

/// The warnings attached to detected numeral sets, tabular or configured
fn variant_warnings(variants: &[NumberVariant]) -> Vec<String> {
    variants
        .iter()
        .filter_map(|v| Some(format!("{}: {}", v.label, v.warning.as_ref()?)))
        .collect()
}

fn ordered(mut members: Vec<String>, ordering: Ordering) -> Vec<String> {
    if ordering == Ordering::Alphabetical {
        members.sort();
    }
    members
}

fn numeral_names(variant: &NumberVariant, ordering: Ordering) -> Vec<String> {
    match ordering {
        Ordering::Shape => variant.glyphs.clone(),
        Ordering::Alphabetical => variant.glyphs_in_numeric_order(),
    }
}
