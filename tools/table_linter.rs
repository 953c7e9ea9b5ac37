//! Table Linter — validates name-table coverage and quality.
//!
//! Usage: table_linter <data_dir>
//!
//! Checks every race under `<data_dir>/names/` against its template
//! (required categories, gloss coverage, vowel-flag consistency) and
//! cross-checks `races.json` naming references.

use namewright::core::store::FragmentStore;
use namewright::schema::fragment::Fragment;
use namewright::schema::npc::AttributeTable;
use namewright::schema::race::{Category, NpcNaming, RaceData, RaceProfile, RaceTemplate};
use std::path::Path;
use std::process;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: table_linter <data_dir>");
        process::exit(0);
    }

    let data_dir = Path::new(&args[1]);
    let names_dir = data_dir.join("names");

    let store = match FragmentStore::load_from_dir(&names_dir) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("ERROR: failed to read '{}': {}", names_dir.display(), e);
            process::exit(1);
        }
    };
    println!("Loaded {} races from {}", store.len(), names_dir.display());

    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for issue in store.issues() {
        errors.push(format!("race '{}' failed to load: {}", issue.race, issue.error));
    }

    for key in store.race_keys() {
        let race = store.get(key).unwrap();
        lint_race(race, &mut errors, &mut warnings);
    }

    lint_profiles(data_dir, &store, &mut errors, &mut warnings);
    lint_attributes(data_dir, &mut warnings);

    println!("\n=== Table Lint Report ===\n");
    if errors.is_empty() && warnings.is_empty() {
        println!("All checks passed!");
    }
    for warning in &warnings {
        println!("WARNING: {}", warning);
    }
    for error in &errors {
        println!("ERROR: {}", error);
    }
    println!("\nSummary: {} errors, {} warnings", errors.len(), warnings.len());

    if errors.is_empty() {
        process::exit(0);
    } else {
        process::exit(1);
    }
}

fn lint_race(race: &RaceData, errors: &mut Vec<String>, warnings: &mut Vec<String>) {
    for cat in race.missing_categories() {
        errors.push(format!("race '{}': required category '{}' is missing or empty", race.key, cat));
    }

    let needs_gloss = race.poetic && !matches!(race.template, RaceTemplate::SingleList);
    if needs_gloss && race.gloss.is_empty() {
        errors.push(format!("race '{}': poetic race has no gloss table", race.key));
    }

    for (keyword, phrases) in &race.gloss {
        if phrases.is_empty() {
            errors.push(format!("race '{}': gloss keyword '{}' has no phrases", race.key, keyword));
        }
        if keyword != &keyword.to_lowercase() {
            warnings.push(format!("race '{}': gloss keyword '{}' is not lowercase", race.key, keyword));
        }
    }

    for (cat, fragments) in &race.categories {
        for fragment in fragments {
            lint_fragment(race, *cat, fragment, needs_gloss, errors, warnings);
        }
    }
}

fn lint_fragment(
    race: &RaceData,
    cat: Category,
    fragment: &Fragment,
    needs_gloss: bool,
    errors: &mut Vec<String>,
    warnings: &mut Vec<String>,
) {
    if fragment.text.is_empty() {
        errors.push(format!("race '{}': empty fragment text in '{}'", race.key, cat));
        return;
    }

    // Vowel flags are only authored (and only matter) where smoothing
    // runs; terse entries elsewhere legitimately omit them.
    let smoothed = matches!(cat, Category::Prefix | Category::Middle | Category::Suffix);
    if smoothed {
        if fragment.ends_vowel != fragment.text_ends_vowel() {
            warnings.push(format!(
                "race '{}': '{}' in '{}' declares ends_vowel={} but the text disagrees",
                race.key, fragment.text, cat, fragment.ends_vowel
            ));
        }
        if fragment.starts_vowel != fragment.text_starts_vowel() {
            warnings.push(format!(
                "race '{}': '{}' in '{}' declares starts_vowel={} but the text disagrees",
                race.key, fragment.text, cat, fragment.starts_vowel
            ));
        }
    }

    // Surnames are excluded from the poetic line; single lists carry
    // free-form flavor text.
    let feeds_gloss =
        needs_gloss && cat != Category::Surname && cat != Category::Names;
    if feeds_gloss {
        if let Some(keyword) = fragment.primary_keyword() {
            if !race.gloss.contains_key(&keyword)
                && !race.gloss.keys().any(|k| k.eq_ignore_ascii_case(&keyword))
            {
                warnings.push(format!(
                    "race '{}': keyword '{}' ('{}' in '{}') has no gloss entry",
                    race.key, keyword, fragment.text, cat
                ));
            }
        }
    }
}

fn lint_profiles(
    data_dir: &Path,
    store: &FragmentStore,
    errors: &mut Vec<String>,
    warnings: &mut Vec<String>,
) {
    let path = data_dir.join("races.json");
    if !path.exists() {
        warnings.push("no races.json; NPC generation will have no race profiles".to_string());
        return;
    }
    let profiles: Vec<RaceProfile> = match std::fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|s| serde_json::from_str(&s).map_err(|e| e.to_string()))
    {
        Ok(profiles) => profiles,
        Err(e) => {
            errors.push(format!("races.json failed to parse: {}", e));
            return;
        }
    };

    for profile in &profiles {
        let keys: Vec<&str> = match &profile.naming {
            NpcNaming::Key(key) => vec![key.as_str()],
            NpcNaming::OneOf(keys) => keys.iter().map(String::as_str).collect(),
        };
        for key in keys {
            if store.get(key).is_none() {
                errors.push(format!(
                    "races.json: profile '{}' references unknown race key '{}'",
                    profile.name, key
                ));
            }
        }
    }
}

fn lint_attributes(data_dir: &Path, warnings: &mut Vec<String>) {
    let path = data_dir.join("npc_attributes.json");
    if !path.exists() {
        warnings.push("no npc_attributes.json; NPCs will have no attribute lines".to_string());
        return;
    }
    let table: AttributeTable = match std::fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|s| serde_json::from_str(&s).map_err(|e| e.to_string()))
    {
        Ok(table) => table,
        Err(e) => {
            warnings.push(format!("npc_attributes.json failed to parse: {}", e));
            return;
        }
    };
    for category in &table.categories {
        if category.options.is_empty() {
            warnings.push(format!("attribute category '{}' has no options", category.category));
        }
    }
}
