//! Duplicate movie detection and merge planning.
//!
//! Catalog imports are keyed by external id, but manual entry can still
//! produce two rows for the same film. Rows whose titles match after
//! normalisation (and optionally whose years match) form a group; the
//! member with the most votes survives and the rest are merged into it.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::DbId;

/// A movie row as seen by the duplicate planner.
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateCandidate {
    pub movie_id: DbId,
    pub title: String,
    pub year: Option<i32>,
    pub vote_count: i64,
}

/// A set of movies that should collapse into one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateGroup {
    pub normalized_title: String,
    /// Year shared by the group when grouping by year, otherwise `None`.
    pub year: Option<i32>,
    /// Display title taken from the canonical member.
    pub title: String,
    pub canonical_id: DbId,
    /// Members to merge into `canonical_id`, ascending.
    pub duplicate_ids: Vec<DbId>,
    /// Votes across the whole group.
    pub total_votes: i64,
}

impl DuplicateGroup {
    pub fn member_count(&self) -> usize {
        self.duplicate_ids.len() + 1
    }
}

/// Lower-case, trim and collapse internal whitespace runs.
pub fn normalize_title(title: &str) -> String {
    title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Pick the member that survives a merge: most votes, then lowest id.
pub fn select_canonical(members: &[DuplicateCandidate]) -> Option<&DuplicateCandidate> {
    members
        .iter()
        .max_by(|a, b| a.vote_count.cmp(&b.vote_count).then(b.movie_id.cmp(&a.movie_id)))
}

/// Group candidates into duplicate sets with more than one member.
///
/// Groups are returned largest first, then by normalised title. Titles that
/// normalise to the empty string are never grouped.
pub fn plan_duplicate_groups(
    candidates: &[DuplicateCandidate],
    match_year: bool,
) -> Vec<DuplicateGroup> {
    let mut buckets: BTreeMap<(String, Option<i32>), Vec<DuplicateCandidate>> = BTreeMap::new();
    for candidate in candidates {
        let key = normalize_title(&candidate.title);
        if key.is_empty() {
            continue;
        }
        let year = if match_year { candidate.year } else { None };
        buckets.entry((key, year)).or_default().push(candidate.clone());
    }

    let mut groups: Vec<DuplicateGroup> = buckets
        .into_iter()
        .filter(|(_, members)| members.len() > 1)
        .filter_map(|((normalized_title, year), members)| {
            let canonical = select_canonical(&members)?;
            let mut duplicate_ids: Vec<DbId> = members
                .iter()
                .map(|m| m.movie_id)
                .filter(|id| *id != canonical.movie_id)
                .collect();
            duplicate_ids.sort_unstable();
            Some(DuplicateGroup {
                normalized_title,
                year,
                title: canonical.title.clone(),
                canonical_id: canonical.movie_id,
                duplicate_ids,
                total_votes: members.iter().map(|m| m.vote_count).sum(),
            })
        })
        .collect();

    groups.sort_by(|a, b| {
        b.member_count()
            .cmp(&a.member_count())
            .then_with(|| a.normalized_title.cmp(&b.normalized_title))
    });
    groups
}

/// Totals reported after a cleanup run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleanupSummary {
    pub groups_merged: usize,
    pub movies_removed: u64,
    pub votes_moved: u64,
    /// Votes dropped because the canonical movie already had one for the
    /// same voter and device.
    pub votes_dropped: u64,
}
