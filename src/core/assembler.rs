//! Name assembly — fragment selection with phonetic smoothing and
//! gender filtering, dispatched over the race's assembly template.

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::core::gloss::render_poetic;
use crate::schema::fragment::{Fragment, GenderFilter};
use crate::schema::race::{Category, RaceData, RaceTemplate, TrailingRule};

#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("unknown race key: {0}")]
    UnknownRace(String),
    #[error("missing or empty name data: {0}")]
    MissingData(String),
    #[error("fragment selection produced no result")]
    AssemblyFailure,
}

/// A name produced by one assembly call, with the fragments it was
/// built from and an optional poetic meaning line. Ephemeral.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedName {
    pub text: String,
    pub parts: Vec<Fragment>,
    pub poetic: Option<String>,
}

impl GeneratedName {
    /// One "<text> = <meaning>" line per fragment, for display.
    pub fn meaning_lines(&self) -> Vec<String> {
        self.parts
            .iter()
            .map(|p| {
                let meaning = if p.meaning.is_empty() { "N/A" } else { &p.meaning };
                format!("{} = {}", p.text, meaning)
            })
            .collect()
    }
}

/// A transition is smooth unless a vowel-ending fragment runs into a
/// vowel-starting one.
fn is_smooth(prev_ends_vowel: bool, next_starts_vowel: bool) -> bool {
    !(prev_ends_vowel && next_starts_vowel)
}

/// Picks from `pool` preferring fragments that join smoothly after a
/// fragment with the given trailing-vowel flag. When no smooth
/// candidate exists the whole pool is used; smoothness alone never
/// fails a selection.
fn pick_smooth<'a>(
    pool: &[&'a Fragment],
    prev_ends_vowel: bool,
    rng: &mut impl Rng,
) -> Option<&'a Fragment> {
    let smooth: Vec<&Fragment> = pool
        .iter()
        .copied()
        .filter(|f| is_smooth(prev_ends_vowel, f.starts_vowel))
        .collect();
    if smooth.is_empty() {
        pool.choose(rng).copied()
    } else {
        smooth.choose(rng).copied()
    }
}

/// Applies the gender filter to a pool. Pools without any gender tags
/// are passed through untouched; an exhausted filter widens back to the
/// full pool with a warning rather than failing.
fn gender_subset<'a>(
    pool: &'a [Fragment],
    filter: GenderFilter,
    label: &str,
) -> Vec<&'a Fragment> {
    if filter == GenderFilter::Any || !pool.iter().any(|f| f.gender.is_some()) {
        return pool.iter().collect();
    }
    let filtered: Vec<&Fragment> = pool.iter().filter(|f| filter.admits(f.gender)).collect();
    if filtered.is_empty() {
        log::warn!(
            "no {:?} or unisex {} found, widening to the full list",
            filter,
            label
        );
        pool.iter().collect()
    } else {
        filtered
    }
}

/// Draws the given-name fragment. Split gendered lists pick the list
/// per the filter (uniformly between the two for `Any`); a single list
/// is filtered by per-entry tags.
fn pick_given<'a>(
    race: &'a RaceData,
    filter: GenderFilter,
    rng: &mut impl Rng,
) -> Result<&'a Fragment, AssemblyError> {
    let males = race.category(Category::GivenMale);
    let females = race.category(Category::GivenFemale);
    if !males.is_empty() && !females.is_empty() {
        let list = match filter {
            GenderFilter::Male => males,
            GenderFilter::Female => females,
            GenderFilter::Any => {
                let lists = [males, females];
                lists[rng.gen_range(0..lists.len())]
            }
        };
        return list.choose(rng).ok_or(AssemblyError::AssemblyFailure);
    }
    let pool = gender_subset(race.category(Category::Given), filter, "given names");
    pool.choose(rng).copied().ok_or(AssemblyError::AssemblyFailure)
}

/// Assembles the agglutinated prefix + optional middle + suffix stem.
/// The middle roll happens before any fragment is drawn.
fn assemble_stem(
    race: &RaceData,
    middle_chance: f64,
    filter: GenderFilter,
    rng: &mut impl Rng,
) -> Result<Vec<Fragment>, AssemblyError> {
    let middles = race.category(Category::Middle);
    let use_middle = rng.gen_bool(middle_chance.clamp(0.0, 1.0)) && !middles.is_empty();

    let prefix = race
        .category(Category::Prefix)
        .choose(rng)
        .ok_or(AssemblyError::AssemblyFailure)?;
    let mut parts = vec![prefix.clone()];
    let mut ends_vowel = prefix.ends_vowel;

    if use_middle {
        let pool: Vec<&Fragment> = middles.iter().collect();
        if let Some(middle) = pick_smooth(&pool, ends_vowel, rng) {
            ends_vowel = middle.ends_vowel;
            parts.push(middle.clone());
        }
    }

    let pool = gender_subset(race.category(Category::Suffix), filter, "suffixes");
    let suffix = pick_smooth(&pool, ends_vowel, rng).ok_or(AssemblyError::AssemblyFailure)?;
    parts.push(suffix.clone());
    Ok(parts)
}

/// Draws the trailing element when the rule fires and its category has
/// entries. An absent or empty trailing list skips silently.
fn pick_trailing(
    race: &RaceData,
    trailing: Option<&TrailingRule>,
    rng: &mut impl Rng,
) -> Option<(Fragment, bool)> {
    let rule = trailing?;
    let pool = race.category(rule.category);
    if pool.is_empty() || !rng.gen_bool(rule.chance.clamp(0.0, 1.0)) {
        return None;
    }
    pool.choose(rng).map(|f| (f.clone(), rule.in_gloss))
}

/// Appends the trailing element, renders the poetic line, and packs the
/// result. A trailing element excluded from the gloss (a surname) is
/// reported in `parts` after the glossed fragments.
fn finish(
    race: &RaceData,
    mut parts: Vec<Fragment>,
    mut text: String,
    trailing: Option<&TrailingRule>,
    rng: &mut impl Rng,
) -> GeneratedName {
    let mut late: Option<Fragment> = None;
    if let Some((frag, in_gloss)) = pick_trailing(race, trailing, rng) {
        text = format!("{} {}", text, frag.text);
        if in_gloss {
            parts.push(frag);
        } else {
            late = Some(frag);
        }
    }
    let poetic = if race.poetic {
        render_poetic(&parts, &race.gloss, rng)
    } else {
        None
    };
    if let Some(frag) = late {
        parts.push(frag);
    }
    GeneratedName { text, parts, poetic }
}

fn concat_texts(parts: &[Fragment]) -> String {
    parts.iter().map(|f| f.text.as_str()).collect()
}

/// Assembles one name for the race under the given gender filter.
///
/// Required categories are validated up front; every failure path is a
/// tagged [`AssemblyError`] for the caller to surface.
pub fn assemble(
    race: &RaceData,
    filter: GenderFilter,
    rng: &mut impl Rng,
) -> Result<GeneratedName, AssemblyError> {
    if let Some(cat) = race.missing_categories().first() {
        return Err(AssemblyError::MissingData(cat.to_string()));
    }
    if race.poetic
        && race.gloss.is_empty()
        && !matches!(race.template, RaceTemplate::SingleList)
    {
        return Err(AssemblyError::MissingData("gloss".to_string()));
    }

    match &race.template {
        RaceTemplate::PrefixMiddleSuffix { middle_chance, trailing } => {
            let stem = assemble_stem(race, *middle_chance, filter, rng)?;
            let text = concat_texts(&stem);
            Ok(finish(race, stem, text, trailing.as_ref(), rng))
        }
        RaceTemplate::GivenFamily { trailing } => {
            let given = pick_given(race, filter, rng)?.clone();
            let family = race
                .category(Category::Family)
                .choose(rng)
                .ok_or(AssemblyError::AssemblyFailure)?
                .clone();
            let text = format!("{} {}", given.text, family.text);
            Ok(finish(race, vec![given, family], text, trailing.as_ref(), rng))
        }
        RaceTemplate::LineagePersonal { middle_chance } => {
            let lineage = race
                .category(Category::Lineage)
                .choose(rng)
                .ok_or(AssemblyError::AssemblyFailure)?
                .clone();
            let stem = assemble_stem(race, *middle_chance, filter, rng)?;
            let text = format!("{} {}", lineage.text, concat_texts(&stem));
            let mut parts = vec![lineage];
            parts.extend(stem);
            Ok(finish(race, parts, text, None, rng))
        }
        RaceTemplate::ClanPersonal { separator, middle_chance } => {
            let clan = race
                .category(Category::Clan)
                .choose(rng)
                .ok_or(AssemblyError::AssemblyFailure)?
                .clone();
            let stem = assemble_stem(race, *middle_chance, filter, rng)?;
            let text = format!("{}{}{}", clan.text, separator, concat_texts(&stem));
            let mut parts = vec![clan];
            parts.extend(stem);
            Ok(finish(race, parts, text, None, rng))
        }
        RaceTemplate::GivenTitle { join } => {
            let given = pick_given(race, filter, rng)?.clone();
            let pool = gender_subset(race.category(Category::Title), filter, "titles");
            let title = pool
                .choose(rng)
                .copied()
                .ok_or(AssemblyError::AssemblyFailure)?
                .clone();
            let text = format!("{}{}{}", given.text, join.separator(), title.text);
            Ok(finish(race, vec![given, title], text, None, rng))
        }
        RaceTemplate::SingleList => {
            let entry = race
                .category(Category::Names)
                .choose(rng)
                .ok_or(AssemblyError::AssemblyFailure)?
                .clone();
            let text = entry.text.clone();
            Ok(GeneratedName {
                text,
                parts: vec![entry],
                poetic: None,
            })
        }
    }
}
