//! Kerning test strings.
//!
//! A [`KerningConfig`] holds the character groups to draw from. The
//! [`KerningStringMaker`] resolves a [`GenerationRequest`] against a font,
//! detects which numeral sets are present and composes one tab of text per
//! secondary group.
mod composer;
mod groups;
mod maker;
mod numbers;

pub use composer::{
    compose_block, render_blocks, render_tokens, BlockPlan, LineLayout, OutputBlock,
    PrimaryToken, Token,
};
pub use groups::{CharacterGroup, Controls, GroupKind, KerningConfig, Script};
pub use maker::{GenerationRequest, KerningStringMaker, Ordering, SecondarySelection, Tab};
pub use numbers::{
    default_candidates, detect_variants, NumberVariant, VariantCandidate, FIGURE_NAMES,
    FIGURE_ORDER,
};
