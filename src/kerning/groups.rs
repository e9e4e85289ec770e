use crate::{
    kerning::numbers::{default_candidates, VariantCandidate},
    GlyphProvider, GlyphsmithError,
};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, path::Path};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Script {
    Latin,
    Cyrillic,
}

/// What sort of characters a group holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum GroupKind {
    Upper,
    Lower,
    Numbers,
    Punctuation,
}

impl GroupKind {
    pub fn is_letters(&self) -> bool {
        matches!(self, GroupKind::Upper | GroupKind::Lower)
    }
}

/// Context placed before and after each kerning pair
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls(pub String, pub String);

impl Controls {
    pub fn new(left: &str, right: &str) -> Self {
        Controls(left.to_string(), right.to_string())
    }

    pub fn left(&self) -> &str {
        &self.0
    }

    pub fn right(&self) -> &str {
        &self.1
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterGroup {
    pub id: String,
    pub label: String,
    pub kind: GroupKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<Script>,
    /// Members in shape order. A two-character member of a punctuation
    /// group is an opening/closing pair.
    pub members: Vec<String>,
    #[serde(default)]
    pub controls: Controls,
}

impl CharacterGroup {
    fn from_chars(
        id: &str,
        label: &str,
        kind: GroupKind,
        script: Option<Script>,
        chars: &str,
        controls: Controls,
    ) -> Self {
        CharacterGroup {
            id: id.to_string(),
            label: label.to_string(),
            kind,
            script,
            members: chars.chars().map(String::from).collect(),
            controls,
        }
    }

    /// The members whose every character is present in the font, in group order
    pub fn filtered<P: GlyphProvider + ?Sized>(&self, provider: &P) -> Vec<String> {
        self.members
            .iter()
            .filter(|member| {
                let present = member.chars().all(|c| provider.has_char(c));
                if !present {
                    log::debug!("{}: dropping {:?}, not in font", self.id, member);
                }
                present
            })
            .cloned()
            .collect()
    }

    /// The group's controls with every character the font lacks removed
    pub fn controls_in<P: GlyphProvider + ?Sized>(&self, provider: &P) -> Controls {
        let present = |side: &str| -> String {
            side.chars()
                .filter(|&c| {
                    let present = provider.has_char(c);
                    if !present {
                        log::debug!("{}: dropping control {:?}, not in font", self.id, c);
                    }
                    present
                })
                .collect()
        };
        Controls(present(self.controls.left()), present(self.controls.right()))
    }
}

/// The character groups and numeral variants the kerning string maker
/// works from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KerningConfig {
    pub groups: Vec<CharacterGroup>,
    #[serde(default = "default_candidates")]
    pub numerals: Vec<VariantCandidate>,
}

const PUNCTUATION: &[&str] = &[
    ".", ",", ":", ";", "-", "_", "/", "\\", "¡!", "¿?", "()", "[]", "{}", "‘’", "‚‘", "’", "‹›",
    "›‹", "*", "#", "&", "@", "©", "¶", "§", "№", "€", "£", "¥", "%", "‰", "™", "ª", "º", "↑",
    "↗", "→", "☚", "☛", "❦",
];

impl Default for KerningConfig {
    fn default() -> Self {
        use GroupKind::*;
        use Script::*;
        KerningConfig {
            groups: vec![
                CharacterGroup::from_chars(
                    "UC_LTN",
                    "Latin upper case",
                    Upper,
                    Some(Latin),
                    "HILEFTKMNUJŊOQCGŒØDBPRÞAÆVWYXZSẞ",
                    Controls::new("OH", "HO"),
                ),
                CharacterGroup::from_chars(
                    "lc_LTN",
                    "Latin lower case",
                    Lower,
                    Some(Latin),
                    "nmuriıjȷŋhlłkoøœecðbpþqdgaætfvywxzsß",
                    Controls::new("on", "no"),
                ),
                CharacterGroup::from_chars(
                    "UC_CYR",
                    "Cyrillic upper case",
                    Upper,
                    Some(Cyrillic),
                    "НИПЏШЫІМЕЦЩДЈЮОФСЄЭЗВРЯГҐТЪЋЂБЬЊЛЉКЖХУЧАЅ",
                    Controls::new("ОН", "НО"),
                ),
                CharacterGroup::from_chars(
                    "lc_CYR",
                    "Cyrillic lower case",
                    Lower,
                    Some(Cyrillic),
                    "нипџшыміцщдјюобфрћђесєэзвягґтьъњлљкжхчуаѕ",
                    Controls::new("он", "но"),
                ),
                CharacterGroup::from_chars(
                    "Numbers",
                    "Numbers",
                    Numbers,
                    None,
                    "0174253698",
                    Controls::new("00", "00"),
                ),
                CharacterGroup {
                    id: "Punctuation".to_string(),
                    label: "Punctuation and Symbols".to_string(),
                    kind: Punctuation,
                    script: None,
                    members: PUNCTUATION.iter().map(|s| s.to_string()).collect(),
                    controls: Controls::default(),
                },
            ],
            numerals: default_candidates(),
        }
    }
}

impl KerningConfig {
    pub fn from_json(s: &str) -> Result<Self, GlyphsmithError> {
        let config: KerningConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, GlyphsmithError> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|source| GlyphsmithError::FileIO {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&s)
    }

    pub fn validate(&self) -> Result<(), GlyphsmithError> {
        let mut seen = HashSet::new();
        for group in &self.groups {
            if !seen.insert(group.id.as_str()) {
                return Err(GlyphsmithError::BadConfig(format!(
                    "group {} is defined twice",
                    group.id
                )));
            }
            if group.kind.is_letters() && group.script.is_none() {
                return Err(GlyphsmithError::BadConfig(format!(
                    "letter group {} has no script",
                    group.id
                )));
            }
            if group.members.iter().any(|m| m.is_empty()) {
                return Err(GlyphsmithError::BadConfig(format!(
                    "group {} has an empty member",
                    group.id
                )));
            }
        }
        for candidate in &self.numerals {
            if !candidate.suffix.is_empty() && !candidate.suffix.starts_with('.') {
                return Err(GlyphsmithError::BadConfig(format!(
                    "numeral suffix {:?} must start with a dot",
                    candidate.suffix
                )));
            }
        }
        Ok(())
    }

    pub fn group(&self, id: &str) -> Option<&CharacterGroup> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// The group for a kind of character. Letter groups are looked up by
    /// script; numbers and punctuation are shared between scripts.
    pub fn resolve(
        &self,
        kind: GroupKind,
        script: Script,
    ) -> Result<&CharacterGroup, GlyphsmithError> {
        self.groups
            .iter()
            .find(|g| g.kind == kind && (!kind.is_letters() || g.script == Some(script)))
            .ok_or_else(|| GlyphsmithError::UnknownGroup(format!("{:?} {:?}", script, kind)))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::GlyphSet;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_filtered_is_subset_of_group() {
        let config = KerningConfig::default();
        let group = config.group("UC_LTN").unwrap();
        let font = GlyphSet::new().with_chars("HOAVZ#");
        let members = group.filtered(&font);
        assert_eq!(members, vec!["H", "O", "A", "V", "Z"]);
        assert!(members.iter().all(|m| group.members.contains(m)));
    }

    #[test]
    fn test_paired_punctuation_needs_both_halves() {
        let config = KerningConfig::default();
        let group = config.group("Punctuation").unwrap();
        let font = GlyphSet::new().with_chars("([.");
        assert_eq!(group.filtered(&font), vec!["."]);
        let font = font.with_chars(")");
        assert_eq!(group.filtered(&font), vec![".", "()"]);
    }

    #[test]
    fn test_controls_drop_missing_characters() {
        let config = KerningConfig::default();
        let group = config.group("UC_LTN").unwrap();
        let font = GlyphSet::new().with_chars("HA");
        assert_eq!(group.controls_in(&font), Controls::new("H", "H"));
        let font = font.with_chars("O");
        assert_eq!(group.controls_in(&font), group.controls);
    }

    #[test]
    fn test_resolve_by_script() {
        let config = KerningConfig::default();
        assert_eq!(
            config.resolve(GroupKind::Lower, Script::Cyrillic).unwrap().id,
            "lc_CYR"
        );
        assert_eq!(
            config.resolve(GroupKind::Numbers, Script::Cyrillic).unwrap().id,
            "Numbers"
        );
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "groups": [
                {"id": "caps", "label": "Caps", "kind": "upper", "script": "latin",
                 "members": ["A", "B"], "controls": ["X", "Y"]}
            ]
        }"#;
        let config = KerningConfig::from_json(json).unwrap();
        assert_eq!(config.groups[0].controls, Controls::new("X", "Y"));
        assert_eq!(config.numerals, default_candidates());
    }

    #[test]
    fn test_config_rejects_duplicate_ids() {
        let json = r#"{
            "groups": [
                {"id": "caps", "label": "Caps", "kind": "punctuation", "members": ["."]},
                {"id": "caps", "label": "Caps", "kind": "punctuation", "members": [","]}
            ]
        }"#;
        assert!(matches!(
            KerningConfig::from_json(json),
            Err(GlyphsmithError::BadConfig(_))
        ));
    }
}
