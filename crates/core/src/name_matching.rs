//! Fuzzy voter-name matching for the "choose your name" flow.
//!
//! Voters are identified by the (name, device) pair, so the same person on
//! a second phone, or typing "sam" instead of "Sam", would otherwise show up
//! as a new voter. Before a name is bound to a session it is compared with
//! the names this device has used before and with every name that has ever
//! voted.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Policy constants
// ---------------------------------------------------------------------------

/// Similarity reported for a case/whitespace-insensitive exact match.
pub const EXACT_MATCH_SIMILARITY: f64 = 1.0;
/// Similarity reported when one name contains the other.
pub const NICKNAME_SIMILARITY: f64 = 0.8;
/// Shortest name (in characters) that may count as a nickname.
pub const MIN_NICKNAME_LEN: usize = 3;
/// Edit-distance similarities below this are reported as 0.
pub const SIMILARITY_FLOOR: f64 = 0.3;

/// Device-history match that asks "which of these is you?".
pub const DEVICE_MATCH_THRESHOLD: f64 = 0.8;
/// Database-wide match that asks "did you mean ...?".
pub const SUGGESTION_THRESHOLD: f64 = 0.6;

// ---------------------------------------------------------------------------
// Similarity
// ---------------------------------------------------------------------------

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Levenshtein distance over Unicode code points, unit costs.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Single rolling row of the DP table.
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            let next = (row[j + 1] + 1).min(row[j] + 1).min(diagonal + cost);
            diagonal = row[j + 1];
            row[j + 1] = next;
        }
    }
    row[b.len()]
}

/// Similarity between two display names, in `[0.0, 1.0]`.
///
/// Both names are trimmed and lower-cased first. Exact matches score 1.0,
/// containment with a shorter side of at least three characters scores 0.8,
/// anything else is `1 - distance / max_len` with values under 0.3 reported
/// as 0.
pub fn name_similarity(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);

    if a == b {
        return EXACT_MATCH_SIMILARITY;
    }

    let len_a = a.chars().count();
    let len_b = b.chars().count();

    if (a.contains(b.as_str()) || b.contains(a.as_str())) && len_a.min(len_b) >= MIN_NICKNAME_LEN
    {
        return NICKNAME_SIMILARITY;
    }

    let max_len = len_a.max(len_b);
    if max_len == 0 {
        return 0.0;
    }

    let similarity = 1.0 - levenshtein(&a, &b) as f64 / max_len as f64;
    if similarity < SIMILARITY_FLOOR {
        0.0
    } else {
        similarity
    }
}

// ---------------------------------------------------------------------------
// Onboarding decision
// ---------------------------------------------------------------------------

/// What the onboarding flow should ask the voter next.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum NameCheck {
    /// The device already used a name close to this one; show every name
    /// the device has used and let the voter pick.
    ExistingOnDevice {
        device_names: Vec<String>,
        closest_match: String,
        similarity: f64,
    },
    /// Other voters used similar names; offer them as suggestions.
    SimilarNames { similar_names: Vec<String> },
    /// Nothing close; accept as a new name.
    New,
}

/// Decide how to treat a candidate name.
///
/// `device_names` is this device's name history, most recent first.
/// `known_names` is every distinct name that has voted. Device matches win
/// over database-wide ones; the first device name at or above
/// [`DEVICE_MATCH_THRESHOLD`] is reported as the closest match.
pub fn check_name(candidate: &str, device_names: &[String], known_names: &[String]) -> NameCheck {
    for existing in device_names {
        let similarity = name_similarity(candidate, existing);
        if similarity >= DEVICE_MATCH_THRESHOLD {
            return NameCheck::ExistingOnDevice {
                device_names: device_names.to_vec(),
                closest_match: existing.clone(),
                similarity,
            };
        }
    }

    let similar_names = find_similar_names(candidate, known_names, SUGGESTION_THRESHOLD);
    if similar_names.is_empty() {
        NameCheck::New
    } else {
        NameCheck::SimilarNames { similar_names }
    }
}

/// Names from `known_names` at or above `threshold`, in input order.
pub fn find_similar_names(candidate: &str, known_names: &[String], threshold: f64) -> Vec<String> {
    known_names
        .iter()
        .filter(|name| !name.trim().is_empty())
        .filter(|name| name_similarity(candidate, name) >= threshold)
        .cloned()
        .collect()
}
