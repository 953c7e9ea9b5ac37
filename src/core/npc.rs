//! NPC generation — composes a name-assembly call with independent
//! draws from the attribute table.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::assembler::{assemble, AssemblyError};
use crate::core::store::FragmentStore;
use crate::schema::fragment::GenderFilter;
use crate::schema::npc::{AttributeTable, NpcProfile};
use crate::schema::race::{NpcNaming, RaceProfile};

/// Samples one option per attribute category, in table order. Empty
/// categories are skipped with a warning.
pub fn sample_attributes(table: &AttributeTable, rng: &mut impl Rng) -> Vec<(String, String)> {
    let mut sampled = Vec::with_capacity(table.categories.len());
    for category in &table.categories {
        match category.options.choose(rng) {
            Some(option) => sampled.push((category.category.clone(), option.clone())),
            None => log::warn!("attribute category '{}' is empty", category.category),
        }
    }
    sampled
}

/// Generates a full NPC: a random race profile, a name in that race's
/// style, clan affiliation where the race has clans, and one draw per
/// attribute category.
///
/// A profile whose name tables are missing falls back to an
/// "Unnamed <race>" placeholder rather than failing the NPC.
pub fn generate_npc(
    store: &FragmentStore,
    profiles: &[RaceProfile],
    attributes: &AttributeTable,
    rng: &mut impl Rng,
) -> Result<NpcProfile, AssemblyError> {
    let profile = profiles
        .choose(rng)
        .ok_or_else(|| AssemblyError::MissingData("races".to_string()))?;

    let race_key = match &profile.naming {
        NpcNaming::Key(key) => Some(key.as_str()),
        NpcNaming::OneOf(keys) => keys.choose(rng).map(String::as_str),
    };

    let mut clan = None;
    let name = match race_key.and_then(|key| store.get(key)) {
        Some(race) => match assemble(race, GenderFilter::Any, rng) {
            Ok(generated) => {
                if let Some(clan_info) = race.clans.choose(rng) {
                    clan = Some(clan_info.name.clone());
                    format!("{} of the {} Clan", generated.text, clan_info.name)
                } else {
                    generated.text
                }
            }
            Err(error) => {
                log::warn!("name assembly failed for '{}': {}", profile.name, error);
                format!("Unnamed {}", profile.name)
            }
        },
        None => {
            log::warn!("no name tables for race '{}'", profile.name);
            format!("Unnamed {}", profile.name)
        }
    };

    Ok(NpcProfile {
        name,
        race: profile.name.clone(),
        rarity: profile.rarity.clone(),
        region: profile.region.clone(),
        lore: profile.description.clone(),
        clan,
        attributes: sample_attributes(attributes, rng),
    })
}
