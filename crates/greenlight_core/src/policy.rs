//! The curation decision policy.
//!
//! Pure functions from proposal history to curation actions. All side
//! effects (reactions, channel posts) are carried out by the caller, so the
//! whole policy is testable without a gateway connection.
//!
//! History is scanned newest-first. Age increases monotonically walking
//! backward, so once a proposal exceeds the grace window of
//! `outdated_after_days + 1` days the scan stops: everything older is
//! assumed handled by a previous pass.

use crate::{CurationConfig, Proposal};
use chrono::{DateTime, Utc};

/// Seconds in a day.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Ratio classification for a vote tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum VoteStatus {
    /// Upvote fraction meets the configured positive ratio
    Positive,
    /// Not enough of the vote is positive (or nobody voted)
    Undecided,
}

/// Upvote and downvote counts read from the reserved reaction slots.
///
/// Slot 0 is the upvote and slot 1 the downvote, by seeding order rather
/// than emoji lookup. If the platform ever reorders reactions the counts
/// would be misattributed; the positional convention is kept deliberately
/// for compatibility with the existing channel history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_new::new)]
pub struct VoteTally {
    /// Upvote count (slot 0)
    pub up: u64,
    /// Downvote count (slot 1)
    pub down: u64,
}

impl VoteTally {
    /// Read the tally from a proposal's reserved reaction slots.
    ///
    /// Returns `None` when fewer than two reactions are present, meaning the
    /// vote controls never landed on the message.
    pub fn from_proposal(proposal: &Proposal) -> Option<Self> {
        match proposal.reactions.as_slice() {
            [up, down, ..] => Some(Self::new(up.count, down.count)),
            _ => None,
        }
    }

    /// Combined vote count.
    pub fn total(&self) -> u64 {
        self.up + self.down
    }

    /// Fraction of votes that are upvotes; 0.0 when nobody voted.
    pub fn ratio(&self) -> f64 {
        if self.total() == 0 {
            return 0.0;
        }
        self.up as f64 / self.total() as f64
    }

    /// The ratio as a truncated integer percentage, for display.
    pub fn percent(&self) -> u32 {
        (self.ratio() * 100.0) as u32
    }

    /// Classify the tally against the configured positive ratio.
    pub fn status(&self, positive_ratio: f64) -> VoteStatus {
        if self.total() > 0 && self.ratio() >= positive_ratio {
            VoteStatus::Positive
        } else {
            VoteStatus::Undecided
        }
    }
}

/// Per-proposal decision made by [`assess`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Verdict {
    /// Leave the proposal as-is
    Skip,
    /// Attach the outdated symbol and move on
    MarkOutdated,
    /// Promote to the greenlit channel
    Promote,
    /// Terminate the scan; everything older is assumed handled
    StopScanning,
}

/// Scan-level action emitted by [`evaluate`].
#[derive(Debug, Clone, PartialEq)]
pub enum Action<'a> {
    /// Attach the outdated symbol to this proposal
    MarkOutdated(&'a Proposal),
    /// Promote this proposal to the greenlit channel
    Promote(&'a Proposal),
    /// The scan terminated at the grace-window bound
    StopScanning,
}

/// Decide what to do with a single proposal.
///
/// The decision procedure, in order:
/// 1. Fewer than two reactions: skip (the vote controls never landed).
/// 2. Greenlit marker present: skip, the proposal is already resolved.
/// 3. Older than the grace window (`outdated_after_days + 1` days): stop the
///    whole scan.
/// 4. Older than `outdated_after_days` days: mark outdated.
/// 5. Otherwise promote when the combined vote count meets the threshold
///    and the tally classifies as positive; both gates are required, so a
///    unanimous but low-visibility proposal waits, and a busy but
///    controversial one is never promoted.
pub fn assess(proposal: &Proposal, config: &CurationConfig, now: DateTime<Utc>) -> Verdict {
    let Some(tally) = VoteTally::from_proposal(proposal) else {
        return Verdict::Skip;
    };

    if proposal.has_custom_reaction(config.greenlit_emoji_id) {
        return Verdict::Skip;
    }

    let age_seconds = proposal.age_seconds(now);
    if age_seconds >= (config.outdated_after_days + 1) * SECONDS_PER_DAY {
        return Verdict::StopScanning;
    }
    if age_seconds >= config.outdated_after_days * SECONDS_PER_DAY {
        return Verdict::MarkOutdated;
    }

    if tally.total() >= config.vote_threshold
        && tally.status(config.positive_ratio) == VoteStatus::Positive
    {
        Verdict::Promote
    } else {
        Verdict::Skip
    }
}

/// Evaluate a newest-first proposal history, yielding the actions to take.
///
/// Short-circuits on the first [`Verdict::StopScanning`]: the terminating
/// [`Action::StopScanning`] is included and no later proposal is looked at.
pub fn evaluate<'a>(
    history: impl IntoIterator<Item = &'a Proposal>,
    config: &CurationConfig,
    now: DateTime<Utc>,
) -> Vec<Action<'a>> {
    let mut actions = Vec::new();
    for proposal in history {
        match assess(proposal, config, now) {
            Verdict::Skip => {}
            Verdict::MarkOutdated => actions.push(Action::MarkOutdated(proposal)),
            Verdict::Promote => actions.push(Action::Promote(proposal)),
            Verdict::StopScanning => {
                actions.push(Action::StopScanning);
                break;
            }
        }
    }
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EmojiIdentity, ProposalBuilder, Reaction};
    use chrono::TimeZone;

    const UPVOTE: u64 = 1001;
    const DOWNVOTE: u64 = 1002;
    const GREENLIT: u64 = 1003;

    fn config() -> CurationConfig {
        CurationConfig {
            suggestion_channel_id: 100,
            greenlit_channel_id: 200,
            upvote_emoji_id: UPVOTE,
            downvote_emoji_id: DOWNVOTE,
            greenlit_emoji_id: GREENLIT,
            outdated_symbol: crate::OUTDATED_SYMBOL.to_string(),
            vote_threshold: 5,
            positive_ratio: 0.6,
            outdated_after_days: 7,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn proposal(id: u64, age_seconds: i64, up: u64, down: u64) -> Proposal {
        ProposalBuilder::default()
            .id(id)
            .author_id(7u64)
            .created_at(now() - chrono::Duration::seconds(age_seconds))
            .reactions(vec![
                Reaction::new(EmojiIdentity::Custom(UPVOTE), up),
                Reaction::new(EmojiIdentity::Custom(DOWNVOTE), down),
            ])
            .build()
            .unwrap()
    }

    fn greenlit(mut p: Proposal) -> Proposal {
        p.reactions
            .push(Reaction::new(EmojiIdentity::Custom(GREENLIT), 1));
        p
    }

    #[test]
    fn fresh_popular_proposal_is_promoted() {
        // threshold 5, ratio 0.6: 4 up / 1 down is 0.8 over 5 votes
        let p = proposal(1, 3600, 4, 1);
        assert_eq!(assess(&p, &config(), now()), Verdict::Promote);
    }

    #[test]
    fn controversial_proposal_meets_threshold_but_not_ratio() {
        // 2 up / 3 down is 0.4 over 5 votes: undecided despite the threshold
        let p = proposal(1, 3600, 2, 3);
        assert_eq!(assess(&p, &config(), now()), Verdict::Skip);
    }

    #[test]
    fn unanimous_proposal_below_threshold_waits() {
        // ratio 1.0 but only 4 total votes
        let p = proposal(1, 3600, 4, 0);
        assert_eq!(assess(&p, &config(), now()), Verdict::Skip);
    }

    #[test]
    fn ratio_boundary_is_inclusive() {
        // 3 up / 2 down is exactly 0.6
        let p = proposal(1, 3600, 3, 2);
        assert_eq!(assess(&p, &config(), now()), Verdict::Promote);
    }

    #[test]
    fn ratio_just_below_boundary_is_undecided() {
        // 59 up / 41 down is 0.59
        let p = proposal(1, 3600, 59, 41);
        assert_eq!(assess(&p, &config(), now()), Verdict::Skip);
    }

    #[test]
    fn greenlit_marker_short_circuits_everything() {
        // Already-resolved proposals are never re-counted, even when their
        // tally or age would otherwise act.
        let popular = greenlit(proposal(1, 3600, 40, 1));
        assert_eq!(assess(&popular, &config(), now()), Verdict::Skip);

        let stale = greenlit(proposal(2, 8 * SECONDS_PER_DAY, 40, 1));
        assert_eq!(assess(&stale, &config(), now()), Verdict::Skip);
    }

    #[test]
    fn missing_vote_controls_are_skipped() {
        let mut p = proposal(1, 3600, 4, 1);
        p.reactions.truncate(1);
        assert_eq!(assess(&p, &config(), now()), Verdict::Skip);

        p.reactions.clear();
        assert_eq!(assess(&p, &config(), now()), Verdict::Skip);
    }

    #[test]
    fn zero_votes_is_undecided_not_a_crash() {
        let p = proposal(1, 3600, 0, 0);
        assert_eq!(assess(&p, &config(), now()), Verdict::Skip);
        assert_eq!(VoteTally::new(0, 0).status(0.0), VoteStatus::Undecided);
    }

    #[test]
    fn outdated_boundary_is_inclusive() {
        // One second shy of 7 days: still pending.
        let p = proposal(1, 7 * SECONDS_PER_DAY - 1, 4, 1);
        assert_eq!(assess(&p, &config(), now()), Verdict::Promote);

        // Exactly 7 days: outdated.
        let p = proposal(2, 7 * SECONDS_PER_DAY, 4, 1);
        assert_eq!(assess(&p, &config(), now()), Verdict::MarkOutdated);

        // 8 days exactly: still outdated, not yet the stop bound.
        let p = proposal(3, 8 * SECONDS_PER_DAY - 1, 4, 1);
        assert_eq!(assess(&p, &config(), now()), Verdict::MarkOutdated);
    }

    #[test]
    fn grace_window_boundary_stops_the_scan() {
        // Exactly 8 days (outdated_after_days + 1): stop, no per-proposal
        // action for this one.
        let p = proposal(1, 8 * SECONDS_PER_DAY, 4, 1);
        assert_eq!(assess(&p, &config(), now()), Verdict::StopScanning);

        // 9 days exactly, same thing.
        let p = proposal(2, 9 * SECONDS_PER_DAY, 4, 1);
        assert_eq!(assess(&p, &config(), now()), Verdict::StopScanning);
    }

    #[test]
    fn evaluate_walks_newest_first_and_stops_at_the_bound() {
        let history = vec![
            proposal(1, 3600, 4, 1),                    // promote
            proposal(2, 3600, 2, 3),                    // skip
            proposal(3, 7 * SECONDS_PER_DAY, 3, 0),     // outdated
            proposal(4, 9 * SECONDS_PER_DAY, 50, 1),    // stop
            proposal(5, 10 * SECONDS_PER_DAY, 50, 1),   // never reached
        ];

        let actions = evaluate(&history, &config(), now());
        assert_eq!(
            actions,
            vec![
                Action::Promote(&history[0]),
                Action::MarkOutdated(&history[2]),
                Action::StopScanning,
            ]
        );
    }

    #[test]
    fn evaluate_emits_nothing_after_stop_regardless_of_later_ages() {
        // A young proposal placed after the stop bound (out-of-order
        // history) must still not be evaluated.
        let history = vec![proposal(1, 9 * SECONDS_PER_DAY, 4, 1), proposal(2, 60, 4, 1)];
        let actions = evaluate(&history, &config(), now());
        assert_eq!(actions, vec![Action::StopScanning]);
    }

    #[test]
    fn evaluate_handles_a_fully_pending_history() {
        let history = vec![proposal(1, 60, 1, 1), proposal(2, 120, 0, 1)];
        assert!(evaluate(&history, &config(), now()).is_empty());
    }

    #[test]
    fn votes_are_read_by_slot_not_emoji_identity() {
        // The seeded order is authoritative: a proposal whose first two
        // reactions are arbitrary emojis still has slot 0 read as the
        // upvote. Deliberate compatibility behavior.
        let mut p = proposal(1, 3600, 0, 0);
        p.reactions = vec![
            Reaction::new(EmojiIdentity::Unicode("\u{1F389}".to_string()), 4),
            Reaction::new(EmojiIdentity::Custom(DOWNVOTE), 1),
        ];
        assert_eq!(assess(&p, &config(), now()), Verdict::Promote);
    }

    #[test]
    fn percent_truncates() {
        assert_eq!(VoteTally::new(4, 1).percent(), 80);
        assert_eq!(VoteTally::new(2, 1).percent(), 66);
        assert_eq!(VoteTally::new(0, 0).percent(), 0);
    }
}
