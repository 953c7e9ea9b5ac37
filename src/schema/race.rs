//! Race name tables — fragment categories, assembly templates, and the
//! per-race data bundle the assembler consumes.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::fragment::Fragment;

/// Lowercase meaning-keyword → evocative phrase list.
pub type GlossTable = FxHashMap<String, Vec<String>>;

/// Fragment-category keys a race table may carry. Each category is one
/// JSON document in the race's data directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Prefix,
    Middle,
    Suffix,
    Given,
    GivenMale,
    GivenFemale,
    Family,
    Lineage,
    Clan,
    Title,
    Descriptor,
    Surname,
    Names,
}

impl Category {
    /// All categories, in loader scan order.
    pub fn all() -> &'static [Category] {
        &[
            Category::Prefix,
            Category::Middle,
            Category::Suffix,
            Category::Given,
            Category::GivenMale,
            Category::GivenFemale,
            Category::Family,
            Category::Lineage,
            Category::Clan,
            Category::Title,
            Category::Descriptor,
            Category::Surname,
            Category::Names,
        ]
    }

    /// File stem of the category's JSON document.
    pub fn file_stem(&self) -> &'static str {
        match self {
            Category::Prefix => "prefixes",
            Category::Middle => "middles",
            Category::Suffix => "suffixes",
            Category::Given => "given",
            Category::GivenMale => "given_male",
            Category::GivenFemale => "given_female",
            Category::Family => "family",
            Category::Lineage => "lineages",
            Category::Clan => "clans",
            Category::Title => "titles",
            Category::Descriptor => "descriptors",
            Category::Surname => "surnames",
            Category::Names => "names",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_stem())
    }
}

/// How two adjacent name elements are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinRule {
    Concatenate,
    #[default]
    Space,
    Hyphen,
}

impl JoinRule {
    pub fn separator(&self) -> &'static str {
        match self {
            JoinRule::Concatenate => "",
            JoinRule::Space => " ",
            JoinRule::Hyphen => "-",
        }
    }
}

/// A probabilistic trailing element (surname, celestial title, clan
/// descriptor) appended after the base name with a space.
///
/// `in_gloss: false` keeps the element out of the poetic meaning; its
/// fragment is still reported in the generated name's part list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailingRule {
    pub category: Category,
    #[serde(default = "chance_always")]
    pub chance: f64,
    #[serde(default = "default_true")]
    pub in_gloss: bool,
}

fn chance_always() -> f64 {
    1.0
}

fn default_true() -> bool {
    true
}

fn default_middle_chance() -> f64 {
    0.3
}

/// The assembly shape a race's names follow: which fragment categories
/// are drawn, in what order, and how they are joined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum RaceTemplate {
    /// Agglutinated stem: prefix + optional middle + suffix, directly
    /// concatenated (Elven, Orcish, Infernal, Genasi styles).
    PrefixMiddleSuffix {
        #[serde(default = "default_middle_chance")]
        middle_chance: f64,
        #[serde(default)]
        trailing: Option<TrailingRule>,
    },
    /// Given name + family name, space-joined. The given side is either
    /// one `given` list (optionally gender-tagged per entry) or split
    /// `given_male`/`given_female` lists.
    GivenFamily {
        #[serde(default)]
        trailing: Option<TrailingRule>,
    },
    /// Lineage lead + space + agglutinated personal stem (Aarakocra).
    LineagePersonal {
        #[serde(default = "default_middle_chance")]
        middle_chance: f64,
    },
    /// Clan lead joined to an agglutinated personal stem with a fixed
    /// separator token (Dragonborn `-k-`).
    ClanPersonal {
        separator: String,
        #[serde(default = "default_middle_chance")]
        middle_chance: f64,
    },
    /// Given name + title/descriptor/marker, joined per `join`.
    GivenTitle {
        #[serde(default)]
        join: JoinRule,
    },
    /// One curated list of complete names; the meaning tag is free-form
    /// flavor text.
    SingleList,
}

impl RaceTemplate {
    /// Categories that must be present and non-empty before assembly.
    /// The given side of `GivenFamily`/`GivenTitle` is validated
    /// separately because either one `given` list or both split lists
    /// satisfy it.
    pub fn required_categories(&self) -> &'static [Category] {
        match self {
            RaceTemplate::PrefixMiddleSuffix { .. } => {
                &[Category::Prefix, Category::Suffix]
            }
            RaceTemplate::GivenFamily { .. } => &[Category::Family],
            RaceTemplate::LineagePersonal { .. } => {
                &[Category::Lineage, Category::Prefix, Category::Suffix]
            }
            RaceTemplate::ClanPersonal { .. } => {
                &[Category::Clan, Category::Prefix, Category::Suffix]
            }
            RaceTemplate::GivenTitle { .. } => &[Category::Title],
            RaceTemplate::SingleList => &[Category::Names],
        }
    }

    /// Whether this shape draws a given-name fragment.
    pub fn uses_given(&self) -> bool {
        matches!(
            self,
            RaceTemplate::GivenFamily { .. } | RaceTemplate::GivenTitle { .. }
        )
    }
}

/// Display metadata for a clan a race's members may belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClanInfo {
    pub name: String,
    pub region: String,
    pub traits: String,
    pub twist: String,
}

/// Everything the assembler needs for one race: the template, the
/// fragment categories, the poetic gloss, and optional clan lore.
#[derive(Debug, Clone)]
pub struct RaceData {
    pub key: String,
    pub template: RaceTemplate,
    pub categories: FxHashMap<Category, Vec<Fragment>>,
    pub gloss: GlossTable,
    pub clans: Vec<ClanInfo>,
    /// Races without a poetic tradition (Common names, curated single
    /// lists) skip the gloss requirement and the poetic line.
    pub poetic: bool,
}

impl RaceData {
    pub fn new(key: impl Into<String>, template: RaceTemplate) -> Self {
        RaceData {
            key: key.into(),
            template,
            categories: FxHashMap::default(),
            gloss: GlossTable::default(),
            clans: Vec::new(),
            poetic: true,
        }
    }

    /// Fragments of a category, or an empty slice when absent.
    pub fn category(&self, cat: Category) -> &[Fragment] {
        self.categories.get(&cat).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn with_category(mut self, cat: Category, fragments: Vec<Fragment>) -> Self {
        self.categories.insert(cat, fragments);
        self
    }

    pub fn with_gloss(mut self, gloss: GlossTable) -> Self {
        self.gloss = gloss;
        self
    }

    pub fn non_poetic(mut self) -> Self {
        self.poetic = false;
        self
    }

    /// Required categories that are absent or empty. The given-side
    /// requirement is satisfied by one `given` list or by both split
    /// gendered lists.
    pub fn missing_categories(&self) -> Vec<Category> {
        let mut missing: Vec<Category> = self
            .template
            .required_categories()
            .iter()
            .copied()
            .filter(|cat| self.category(*cat).is_empty())
            .collect();

        if self.template.uses_given() && !self.has_given_lists() {
            missing.push(Category::Given);
        }
        missing
    }

    fn has_given_lists(&self) -> bool {
        !self.category(Category::Given).is_empty()
            || (!self.category(Category::GivenMale).is_empty()
                && !self.category(Category::GivenFemale).is_empty())
    }
}

/// How the NPC generator names members of a playable race: one name
/// table, or a uniform pick among several (Half-Elf names follow either
/// the Elven or the Common style).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NpcNaming {
    Key(String),
    OneOf(Vec<String>),
}

/// A playable race's profile from `races.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceProfile {
    pub name: String,
    pub rarity: String,
    pub region: String,
    pub description: String,
    pub naming: NpcNaming,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::fragment::Gender;

    fn frag(text: &str) -> Fragment {
        Fragment {
            text: text.to_string(),
            meaning: String::new(),
            ends_vowel: false,
            starts_vowel: false,
            gender: None,
        }
    }

    #[test]
    fn template_json_round_trip() {
        let t = RaceTemplate::ClanPersonal {
            separator: "-k-".to_string(),
            middle_chance: 0.3,
        };
        let json = serde_json::to_string(&t).unwrap();
        let back: RaceTemplate = serde_json::from_str(&json).unwrap();
        assert_eq!(t, back);
    }

    #[test]
    fn template_tagged_shape_parses() {
        let t: RaceTemplate = serde_json::from_str(
            r#"{"shape": "prefix_middle_suffix", "middle_chance": 0.4}"#,
        )
        .unwrap();
        assert!(matches!(
            t,
            RaceTemplate::PrefixMiddleSuffix { middle_chance, trailing: None }
                if (middle_chance - 0.4).abs() < f64::EPSILON
        ));
    }

    #[test]
    fn template_defaults_middle_chance() {
        let t: RaceTemplate =
            serde_json::from_str(r#"{"shape": "lineage_personal"}"#).unwrap();
        assert!(matches!(
            t,
            RaceTemplate::LineagePersonal { middle_chance }
                if (middle_chance - 0.3).abs() < f64::EPSILON
        ));
    }

    #[test]
    fn trailing_rule_defaults() {
        let t: TrailingRule =
            serde_json::from_str(r#"{"category": "surname"}"#).unwrap();
        assert_eq!(t.category, Category::Surname);
        assert!((t.chance - 1.0).abs() < f64::EPSILON);
        assert!(t.in_gloss);
    }

    #[test]
    fn missing_categories_for_stem_shape() {
        let race = RaceData::new(
            "elf",
            RaceTemplate::PrefixMiddleSuffix {
                middle_chance: 0.3,
                trailing: None,
            },
        )
        .with_category(Category::Prefix, vec![frag("Ael")]);
        assert_eq!(race.missing_categories(), vec![Category::Suffix]);
    }

    #[test]
    fn split_given_lists_satisfy_given_requirement() {
        let race = RaceData::new("halfling", RaceTemplate::GivenFamily { trailing: None })
            .with_category(Category::GivenMale, vec![frag("Milo")])
            .with_category(Category::GivenFemale, vec![frag("Rosie")])
            .with_category(Category::Family, vec![frag("Underbough")]);
        assert!(race.missing_categories().is_empty());
    }

    #[test]
    fn lone_gendered_list_does_not_satisfy_given() {
        let race = RaceData::new("halfling", RaceTemplate::GivenFamily { trailing: None })
            .with_category(Category::GivenMale, vec![frag("Milo")])
            .with_category(Category::Family, vec![frag("Underbough")]);
        assert_eq!(race.missing_categories(), vec![Category::Given]);
    }

    #[test]
    fn npc_naming_untagged_forms() {
        let single: NpcNaming = serde_json::from_str(r#""elf""#).unwrap();
        assert_eq!(single, NpcNaming::Key("elf".to_string()));
        let either: NpcNaming = serde_json::from_str(r#"["elf", "common"]"#).unwrap();
        assert_eq!(
            either,
            NpcNaming::OneOf(vec!["elf".to_string(), "common".to_string()])
        );
    }

    #[test]
    fn join_rule_separators() {
        assert_eq!(JoinRule::Concatenate.separator(), "");
        assert_eq!(JoinRule::Space.separator(), " ");
        assert_eq!(JoinRule::Hyphen.separator(), "-");
    }

    #[test]
    fn category_display_matches_file_stem() {
        assert_eq!(Category::GivenMale.to_string(), "given_male");
        assert_eq!(Category::Prefix.to_string(), "prefixes");
    }

    #[test]
    fn gendered_fragment_round_trip() {
        let f = Fragment {
            text: "wyn".to_string(),
            meaning: "peace".to_string(),
            ends_vowel: false,
            starts_vowel: false,
            gender: Some(Gender::Unisex),
        };
        let json = serde_json::to_string(&f).unwrap();
        let back: Fragment = serde_json::from_str(&json).unwrap();
        assert_eq!(f, back);
    }
}
