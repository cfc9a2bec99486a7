//! Appeal scoring: per-movie vote aggregates in, one ranking score out.
//!
//! The score rewards group interest in movies few people have seen, adds
//! smaller bonuses for repeat engagement, known quality and consensus, and
//! penalises movies whose votes come mostly from one voter. Movies below the
//! participation threshold always score zero.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Formula constants
// ---------------------------------------------------------------------------

/// Default minimum number of votes before a movie is scored at all.
pub const DEFAULT_PARTICIPATION_THRESHOLD: i64 = 3;

/// Multiplier applied to `(avg_interest - 1)`.
pub const BASE_INTEREST_WEIGHT: f64 = 2.5;
pub const NOVELTY_WEIGHT: f64 = 1.0;
pub const PARTICIPATION_WEIGHT: f64 = 0.5;
pub const QUALITY_WEIGHT: f64 = 1.0;
pub const CONSENSUS_WEIGHT: f64 = 0.5;

/// Average interest below which the quality bonus is dropped.
pub const QUALITY_GATE_MIN_INTEREST: f64 = 1.5;

/// Share of a movie's votes one voter may cast before being penalised.
pub const CONCENTRATION_LIMIT: f64 = 0.6;
pub const CONCENTRATION_PENALTY_WEIGHT: f64 = 2.0;

pub const MIN_APPEAL_SCORE: f64 = 0.0;
pub const MAX_APPEAL_SCORE: f64 = 9.5;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Tunables for the appeal formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppealConfig {
    /// Movies with fewer total votes than this score zero.
    pub participation_threshold: i64,
}

impl Default for AppealConfig {
    fn default() -> Self {
        Self {
            participation_threshold: DEFAULT_PARTICIPATION_THRESHOLD,
        }
    }
}

impl AppealConfig {
    pub fn new(participation_threshold: i64) -> Result<Self, CoreError> {
        if participation_threshold < 0 {
            return Err(CoreError::Validation(format!(
                "Participation threshold must not be negative, got {participation_threshold}"
            )));
        }
        Ok(Self {
            participation_threshold,
        })
    }
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

/// Everything the formula needs to know about one movie's votes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MovieVoteStats {
    pub total_votes: i64,
    /// Distinct voter names.
    pub unique_voters: i64,
    pub seen_count: i64,
    pub not_seen_count: i64,
    /// Mean vibe over seen votes; `None` when nobody has seen it.
    pub avg_rating: Option<f64>,
    /// Mean vibe over not-seen votes; `None` when everybody has seen it.
    pub avg_interest: Option<f64>,
    /// Seen votes with vibe >= 2.
    pub high_rating_count: i64,
    /// Not-seen votes with vibe >= 2.
    pub high_interest_count: i64,
    /// Largest share of this movie's votes cast under a single name.
    pub top_user_concentration: f64,
}

impl MovieVoteStats {
    /// Seen votes as a fraction of all votes, `0.0` for an empty set.
    pub fn visibility_ratio(&self) -> f64 {
        if self.total_votes == 0 {
            return 0.0;
        }
        self.seen_count as f64 / self.total_votes as f64
    }
}

/// One vote as the aggregator sees it.
#[derive(Debug, Clone, Copy)]
pub struct VoteSample<'a> {
    pub user_name: &'a str,
    pub vibe: i16,
    pub seen: bool,
}

/// Aggregate a single movie's votes in memory.
///
/// Mirrors the grouped SQL query the appeal repository runs, and is what the
/// tests use to reason about the formula without a database.
pub fn aggregate_votes(votes: &[VoteSample<'_>]) -> MovieVoteStats {
    let mut stats = MovieVoteStats {
        total_votes: votes.len() as i64,
        ..MovieVoteStats::default()
    };
    if votes.is_empty() {
        return stats;
    }

    let mut rating_sum = 0i64;
    let mut interest_sum = 0i64;
    let mut per_voter: HashMap<&str, i64> = HashMap::new();

    for vote in votes {
        *per_voter.entry(vote.user_name).or_default() += 1;
        if vote.seen {
            stats.seen_count += 1;
            rating_sum += i64::from(vote.vibe);
            if vote.vibe >= crate::vibe::HIGH_VIBE {
                stats.high_rating_count += 1;
            }
        } else {
            stats.not_seen_count += 1;
            interest_sum += i64::from(vote.vibe);
            if vote.vibe >= crate::vibe::HIGH_VIBE {
                stats.high_interest_count += 1;
            }
        }
    }

    stats.unique_voters = per_voter.len() as i64;
    if stats.seen_count > 0 {
        stats.avg_rating = Some(rating_sum as f64 / stats.seen_count as f64);
    }
    if stats.not_seen_count > 0 {
        stats.avg_interest = Some(interest_sum as f64 / stats.not_seen_count as f64);
    }
    let top = per_voter.values().copied().max().unwrap_or(0);
    stats.top_user_concentration = top as f64 / stats.total_votes as f64;

    stats
}

// ---------------------------------------------------------------------------
// Formula
// ---------------------------------------------------------------------------

/// The individual terms behind a score, exposed for the admin results view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AppealBreakdown {
    pub base: f64,
    pub novelty: f64,
    pub participation: f64,
    pub quality: f64,
    pub consensus: f64,
    pub concentration_penalty: f64,
    /// Final clamped score.
    pub score: f64,
}

/// Compute every term of the appeal formula.
///
/// Below the participation threshold all terms are zero.
pub fn appeal_breakdown(stats: &MovieVoteStats, config: &AppealConfig) -> AppealBreakdown {
    if stats.total_votes < config.participation_threshold || stats.total_votes <= 0 {
        return AppealBreakdown::default();
    }
    let total = stats.total_votes as f64;

    // Literal transform: values above 3 land beyond 5.0 points.
    let base = stats
        .avg_interest
        .map(|interest| (interest - 1.0) * BASE_INTEREST_WEIGHT)
        .unwrap_or(0.0);

    let novelty = stats.not_seen_count as f64 / total * NOVELTY_WEIGHT;

    let participation = if stats.unique_voters > 0 {
        total / stats.unique_voters as f64 * PARTICIPATION_WEIGHT
    } else {
        0.0
    };

    let mut quality = match stats.avg_rating {
        Some(rating) if stats.seen_count > 0 => (rating - 1.0) * QUALITY_WEIGHT,
        _ => 0.0,
    };
    if matches!(stats.avg_interest, Some(interest) if interest < QUALITY_GATE_MIN_INTEREST) {
        quality = 0.0;
    }

    let consensus = (stats.high_rating_count as f64 / total
        + stats.high_interest_count as f64 / total)
        * CONSENSUS_WEIGHT;

    let concentration_penalty = if stats.top_user_concentration > CONCENTRATION_LIMIT {
        (stats.top_user_concentration - CONCENTRATION_LIMIT) * CONCENTRATION_PENALTY_WEIGHT
    } else {
        0.0
    };

    let raw = base + novelty + participation + quality + consensus - concentration_penalty;

    AppealBreakdown {
        base,
        novelty,
        participation,
        quality,
        consensus,
        concentration_penalty,
        score: raw.clamp(MIN_APPEAL_SCORE, MAX_APPEAL_SCORE),
    }
}

/// Appeal score for one movie, in `[0.0, 9.5]`.
pub fn appeal_score(stats: &MovieVoteStats, config: &AppealConfig) -> f64 {
    appeal_breakdown(stats, config).score
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn sample(user_name: &str, vibe: i16, seen: bool) -> VoteSample<'_> {
        VoteSample {
            user_name,
            vibe,
            seen,
        }
    }

    /// Four voters saw it (2,3,2,1), one has not (3).
    fn scenario_votes() -> Vec<VoteSample<'static>> {
        vec![
            sample("ann", 2, true),
            sample("ben", 3, true),
            sample("cat", 2, true),
            sample("dan", 1, true),
            sample("eve", 3, false),
        ]
    }

    // -- Aggregation ---------------------------------------------------------

    #[test]
    fn aggregate_splits_by_seen_flag() {
        let stats = aggregate_votes(&scenario_votes());
        assert_eq!(stats.total_votes, 5);
        assert_eq!(stats.unique_voters, 5);
        assert_eq!(stats.seen_count, 4);
        assert_eq!(stats.not_seen_count, 1);
        assert!((stats.avg_rating.unwrap() - 2.0).abs() < EPS);
        assert!((stats.avg_interest.unwrap() - 3.0).abs() < EPS);
        assert_eq!(stats.high_rating_count, 3);
        assert_eq!(stats.high_interest_count, 1);
        assert!((stats.top_user_concentration - 0.2).abs() < EPS);
        assert!((stats.visibility_ratio() - 0.8).abs() < EPS);
    }

    #[test]
    fn aggregate_empty_is_zeroed() {
        let stats = aggregate_votes(&[]);
        assert_eq!(stats, MovieVoteStats::default());
        assert_eq!(stats.visibility_ratio(), 0.0);
    }

    #[test]
    fn concentration_counts_votes_per_name() {
        // Same name on three devices plus one other voter.
        let votes = vec![
            sample("sam", 2, false),
            sample("sam", 2, false),
            sample("sam", 3, false),
            sample("kim", 1, true),
        ];
        let stats = aggregate_votes(&votes);
        assert_eq!(stats.unique_voters, 2);
        assert!((stats.top_user_concentration - 0.75).abs() < EPS);
    }

    // -- Formula -------------------------------------------------------------

    #[test]
    fn scenario_score_matches_hand_computation() {
        let stats = aggregate_votes(&scenario_votes());
        let b = appeal_breakdown(&stats, &AppealConfig::default());

        assert!((b.base - 5.0).abs() < EPS);
        assert!((b.novelty - 0.2).abs() < EPS);
        assert!((b.participation - 0.5).abs() < EPS);
        assert!((b.quality - 1.0).abs() < EPS);
        assert!((b.consensus - 0.4).abs() < EPS);
        assert_eq!(b.concentration_penalty, 0.0);
        assert!((b.score - 7.1).abs() < EPS);
    }

    #[test]
    fn below_threshold_scores_zero() {
        let votes = vec![sample("a", 6, false), sample("b", 6, false)];
        let stats = aggregate_votes(&votes);
        assert_eq!(appeal_score(&stats, &AppealConfig::default()), 0.0);
        assert_eq!(
            appeal_breakdown(&stats, &AppealConfig::default()),
            AppealBreakdown::default()
        );
    }

    #[test]
    fn threshold_is_injectable() {
        let votes = vec![sample("a", 3, false), sample("b", 3, false)];
        let stats = aggregate_votes(&votes);
        let lenient = AppealConfig::new(2).unwrap();
        assert!(appeal_score(&stats, &lenient) > 0.0);
        assert!(AppealConfig::new(-1).is_err());
    }

    #[test]
    fn zero_threshold_still_scores_nothing_without_votes() {
        let config = AppealConfig::new(0).unwrap();
        assert_eq!(appeal_score(&MovieVoteStats::default(), &config), 0.0);
    }

    #[test]
    fn base_transform_exceeds_five_for_high_interest() {
        // Interest 6 maps to 12.5 base points; the clamp, not the transform,
        // keeps the final score in range.
        let votes = vec![
            sample("a", 6, false),
            sample("b", 6, false),
            sample("c", 6, false),
        ];
        let b = appeal_breakdown(&aggregate_votes(&votes), &AppealConfig::default());
        assert!((b.base - 12.5).abs() < EPS);
        assert_eq!(b.score, MAX_APPEAL_SCORE);
    }

    #[test]
    fn quality_gate_drops_quality_for_weak_interest() {
        let votes = vec![
            sample("a", 6, true),
            sample("b", 6, true),
            sample("c", 1, false),
        ];
        let b = appeal_breakdown(&aggregate_votes(&votes), &AppealConfig::default());
        assert_eq!(b.quality, 0.0);
        assert_eq!(b.base, 0.0);
    }

    #[test]
    fn quality_applies_when_nobody_is_unseen() {
        let votes = vec![
            sample("a", 3, true),
            sample("b", 3, true),
            sample("c", 3, true),
        ];
        let b = appeal_breakdown(&aggregate_votes(&votes), &AppealConfig::default());
        assert!((b.quality - 2.0).abs() < EPS);
        assert_eq!(b.base, 0.0);
        assert_eq!(b.novelty, 0.0);
    }

    #[test]
    fn concentration_penalty_applies_above_sixty_percent() {
        let stats = MovieVoteStats {
            total_votes: 5,
            unique_voters: 2,
            seen_count: 0,
            not_seen_count: 5,
            avg_rating: None,
            avg_interest: Some(2.0),
            high_rating_count: 0,
            high_interest_count: 5,
            top_user_concentration: 0.8,
        };
        let b = appeal_breakdown(&stats, &AppealConfig::default());
        assert!((b.concentration_penalty - 0.4).abs() < EPS);

        let at_limit = MovieVoteStats {
            top_user_concentration: 0.6,
            ..stats
        };
        assert_eq!(
            appeal_breakdown(&at_limit, &AppealConfig::default()).concentration_penalty,
            0.0
        );
    }

    #[test]
    fn score_never_negative() {
        let stats = MovieVoteStats {
            total_votes: 3,
            unique_voters: 0,
            seen_count: 3,
            not_seen_count: 0,
            avg_rating: Some(1.0),
            avg_interest: None,
            high_rating_count: 0,
            high_interest_count: 0,
            top_user_concentration: 1.0,
        };
        assert_eq!(appeal_score(&stats, &AppealConfig::default()), 0.0);
    }

    #[test]
    fn score_stays_in_range_over_all_small_vote_sets() {
        let config = AppealConfig::default();
        let names = ["a", "b", "c"];
        // Every combination of vibe/seen for up to four votes by three names.
        for n in 0..=4usize {
            let combos = 12usize.pow(n as u32);
            for code in 0..combos {
                let mut c = code;
                let votes: Vec<_> = (0..n)
                    .map(|i| {
                        let v = (c % 12) as i16;
                        c /= 12;
                        sample(names[i % names.len()], v % 6 + 1, v >= 6)
                    })
                    .collect();
                let score = appeal_score(&aggregate_votes(&votes), &config);
                assert!(
                    (MIN_APPEAL_SCORE..=MAX_APPEAL_SCORE).contains(&score),
                    "score {score} out of range for {votes:?}"
                );
                if (n as i64) < config.participation_threshold {
                    assert_eq!(score, 0.0);
                }
            }
        }
    }

    #[test]
    fn scoring_is_deterministic() {
        let stats = aggregate_votes(&scenario_votes());
        let config = AppealConfig::default();
        assert_eq!(appeal_score(&stats, &config), appeal_score(&stats, &config));
    }
}
