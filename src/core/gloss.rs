//! Poetic meaning rendering — turns fragment meaning keywords into a
//! one-line evocative gloss of the composed name.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::schema::fragment::Fragment;
use crate::schema::race::GlossTable;

/// Uppercases the first letter, leaving the rest untouched.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Title-cases each whitespace-separated word.
fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Looks up a gloss phrase for a keyword: direct match first, then a
/// case-insensitive scan, then the capitalized keyword itself.
fn lookup_phrase(gloss: &GlossTable, keyword: &str, rng: &mut impl Rng) -> String {
    let options = gloss.get(keyword).or_else(|| {
        gloss
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(keyword))
            .map(|(_, v)| v)
    });
    match options {
        Some(phrases) if !phrases.is_empty() => {
            phrases.choose(rng).cloned().unwrap_or_else(|| capitalize(keyword))
        }
        _ => capitalize(keyword),
    }
}

/// Renders the poetic meaning line for a set of chosen fragments.
///
/// Each fragment contributes its primary meaning keyword (the text
/// before the first `/`, lowercased); fragments with empty meanings are
/// skipped. One phrase is drawn per keyword, then a sentence template is
/// drawn from the fixed set for that keyword count. Four or more
/// keywords degrade to a plain enumerated conjunction.
///
/// Returns `None` when no fragment carries a meaning.
pub fn render_poetic(
    parts: &[Fragment],
    gloss: &GlossTable,
    rng: &mut impl Rng,
) -> Option<String> {
    let keywords: Vec<String> = parts.iter().filter_map(Fragment::primary_keyword).collect();
    if keywords.is_empty() {
        return None;
    }

    let glosses: Vec<String> = keywords
        .iter()
        .map(|k| lookup_phrase(gloss, k, rng))
        .collect();

    let templates: Vec<String> = match glosses.as_slice() {
        [a] => vec![
            format!("Embodiment of {}", a),
            format!("Bearer of {}", a),
            format!("A soul defined by {}", a),
        ],
        [a, b] => vec![
            format!("{} of {}", title_case(a), b),
            format!("Bearer of {}, born of {}", b, a),
            format!("A soul touched by {} and {}", a, b),
            format!("Walker between {} and {}", a, b),
            format!("Voice of the {}, spirit of {}", b, a),
        ],
        [a, b, c] => vec![
            format!("One who walks with {}, guided by {}, keeper of {}", a, b, c),
            format!("A spirit shaped by {}, voice of {}, hand of {}", a, b, c),
            format!("Child of {}, gifted by {}, soul of {}", a, b, c),
            format!("{} made flesh, carved from {} and {}", title_case(c), a, b),
            format!("Heart of {}, mind of {}, destiny of {}", a, b, c),
        ],
        many => {
            let all_but_last = many[..many.len() - 1].join(", ");
            let last = &many[many.len() - 1];
            vec![format!("One connected to {}, and {}", all_but_last, last)]
        }
    };

    templates.choose(rng).cloned()
}
