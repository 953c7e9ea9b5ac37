//! NPC attribute tables and the generated NPC profile.

use serde::{Deserialize, Serialize};

/// One unordered pool of options for a labeled NPC attribute
/// (Appearance, Quirk, Secret, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeCategory {
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub options: Vec<String>,
}

/// The full attribute table, in display order. Categories are sampled
/// independently of each other.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeTable {
    pub categories: Vec<AttributeCategory>,
}

impl AttributeTable {
    pub fn icon_for(&self, category: &str) -> &str {
        self.categories
            .iter()
            .find(|c| c.category == category)
            .and_then(|c| c.icon.as_deref())
            .unwrap_or("\u{2022}")
    }
}

/// A fully generated NPC: name, race lore, and one sampled value per
/// attribute category. Ephemeral, produced per invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct NpcProfile {
    pub name: String,
    pub race: String,
    pub rarity: String,
    pub region: String,
    pub lore: String,
    pub clan: Option<String>,
    pub attributes: Vec<(String, String)>,
}

impl NpcProfile {
    /// Renders the profile as the labeled multi-line description shown
    /// to the table.
    pub fn render(&self, table: &AttributeTable) -> String {
        let mut lines = vec![format!("Name: {}", self.name)];
        if let Some(ref clan) = self.clan {
            lines.push(format!("Clan: {}", clan));
        }
        lines.push(format!("Race: {} ({})", self.race, self.rarity));
        lines.push(format!("Region: {}", self.region));
        lines.push(format!("Lore: {}", self.lore));
        for (category, value) in &self.attributes {
            lines.push(format!("{} {}: {}", table.icon_for(category), category, value));
        }
        lines.join("\n")
    }
}
