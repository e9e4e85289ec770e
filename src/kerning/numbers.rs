use crate::GlyphProvider;
use serde::{Deserialize, Serialize};

/// Digit glyph names in the order they are best reviewed for kerning
pub const FIGURE_ORDER: [&str; 10] = [
    "zero", "one", "seven", "four", "two", "five", "three", "six", "nine", "eight",
];

/// Digit glyph names in numeric order
pub const FIGURE_NAMES: [&str; 10] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

const TABULAR_WARNING: &str = "tabular figures should not be kerned";

/// One numeral set the detector looks for, such as `.osf` figures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantCandidate {
    /// Glyph name suffix, including the leading dot; empty for the default figures
    #[serde(default)]
    pub suffix: String,
    pub label: String,
    #[serde(default)]
    pub priority: u32,
    #[serde(default)]
    pub tabular: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl VariantCandidate {
    fn new(suffix: &str, label: &str, priority: u32, tabular: bool) -> Self {
        VariantCandidate {
            suffix: suffix.to_string(),
            label: label.to_string(),
            priority,
            tabular,
            warning: None,
        }
    }
}

pub fn default_candidates() -> Vec<VariantCandidate> {
    vec![
        VariantCandidate::new("", "Default figures", 0, false),
        VariantCandidate::new(".lf", "Lining figures", 10, false),
        VariantCandidate::new(".osf", "Old-style figures", 20, false),
        VariantCandidate::new(".tf", "Tabular lining figures", 30, true),
        VariantCandidate::new(".tosf", "Tabular old-style figures", 40, true),
        VariantCandidate::new(".sups", "Superiors", 50, false),
        VariantCandidate::new(".sinf", "Inferiors", 60, false),
        VariantCandidate::new(".numr", "Numerators", 70, false),
        VariantCandidate::new(".dnom", "Denominators", 80, false),
    ]
}

/// A numeral set found in the font
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberVariant {
    pub label: String,
    pub suffix: Option<String>,
    /// Present glyph names, in [`FIGURE_ORDER`]
    pub glyphs: Vec<String>,
    /// Digit glyph names that the font lacks
    pub missing: Vec<String>,
    pub warning: Option<String>,
    pub tabular: bool,
}

impl NumberVariant {
    /// The glyph used to frame pairs of this variant: its zero, or failing
    /// that the first digit present.
    pub fn zero(&self) -> Option<&str> {
        let zero = format!("zero{}", self.suffix.as_deref().unwrap_or_default());
        self.glyphs
            .iter()
            .find(|g| **g == zero)
            .or_else(|| self.glyphs.first())
            .map(|s| s.as_str())
    }

    /// Present glyph names in numeric order
    pub fn glyphs_in_numeric_order(&self) -> Vec<String> {
        let suffix = self.suffix.as_deref().unwrap_or_default();
        FIGURE_NAMES
            .iter()
            .map(|name| format!("{}{}", name, suffix))
            .filter(|name| self.glyphs.contains(name))
            .collect()
    }
}

/// Find which of the candidate numeral sets the font has.
///
/// Sets with no digits at all are left out; sets with some digits missing
/// are kept with what is there. Tabular sets sort after the rest.
pub fn detect_variants<P: GlyphProvider + ?Sized>(
    provider: &P,
    candidates: &[VariantCandidate],
) -> Vec<NumberVariant> {
    let mut found: Vec<(u32, NumberVariant)> = vec![];
    for candidate in candidates {
        let (glyphs, missing): (Vec<String>, Vec<String>) = FIGURE_ORDER
            .iter()
            .map(|name| format!("{}{}", name, candidate.suffix))
            .partition(|name| provider.has_glyph(name));
        if glyphs.is_empty() {
            log::debug!("No {} in font", candidate.label);
            continue;
        }
        if !missing.is_empty() {
            log::warn!(
                "{} are incomplete; missing {}",
                candidate.label,
                missing.join(", ")
            );
        }
        let warning = candidate
            .warning
            .clone()
            .or_else(|| candidate.tabular.then(|| TABULAR_WARNING.to_string()));
        found.push((
            candidate.priority,
            NumberVariant {
                label: candidate.label.clone(),
                suffix: (!candidate.suffix.is_empty()).then(|| candidate.suffix.clone()),
                glyphs,
                missing,
                warning,
                tabular: candidate.tabular,
            },
        ));
    }
    found.sort_by_key(|(priority, variant)| (variant.tabular, *priority));
    found.into_iter().map(|(_, variant)| variant).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GlyphSet;
    use pretty_assertions::assert_eq;

    fn with_figures(set: GlyphSet, suffix: &str, names: &[&str]) -> GlyphSet {
        names
            .iter()
            .fold(set, |set, n| set.with_glyph(format!("{}{}", n, suffix)))
    }

    #[test]
    fn test_complete_variant_in_review_order() {
        let font = with_figures(GlyphSet::new(), "", &FIGURE_NAMES);
        let variants = detect_variants(&font, &default_candidates());
        assert_eq!(variants.len(), 1);
        assert_eq!(variants[0].glyphs, FIGURE_ORDER.to_vec());
        assert!(variants[0].missing.is_empty());
        assert_eq!(variants[0].zero(), Some("zero"));
    }

    #[test]
    fn test_empty_variants_are_omitted_and_partial_kept() {
        let font = with_figures(GlyphSet::new(), ".osf", &["one", "two"]);
        let variants = detect_variants(&font, &default_candidates());
        assert_eq!(variants.len(), 1);
        let osf = &variants[0];
        assert_eq!(osf.suffix.as_deref(), Some(".osf"));
        assert_eq!(osf.glyphs, vec!["one.osf", "two.osf"]);
        assert_eq!(osf.missing.len(), 8);
        assert_eq!(osf.zero(), Some("one.osf"));
    }

    #[test]
    fn test_tabular_sorts_last_with_warning() {
        let font = with_figures(GlyphSet::new(), ".tf", &FIGURE_NAMES);
        let font = with_figures(font, ".dnom", &FIGURE_NAMES);
        let font = with_figures(font, ".lf", &FIGURE_NAMES);
        let variants = detect_variants(&font, &default_candidates());
        let labels: Vec<&str> = variants.iter().map(|v| v.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Lining figures", "Denominators", "Tabular lining figures"]
        );
        assert!(variants[2].warning.is_some());
        assert!(variants[0].warning.is_none());
    }

    #[test]
    fn test_numeric_order() {
        let font = with_figures(GlyphSet::new(), ".lf", &["nine", "zero", "three"]);
        let variants = detect_variants(&font, &default_candidates());
        assert_eq!(
            variants[0].glyphs_in_numeric_order(),
            vec!["zero.lf", "three.lf", "nine.lf"]
        );
    }
}
