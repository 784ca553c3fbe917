//! Bracket construction and winner advancement.
//!
//! A bracket is fixed at creation time: rounds 1 and 2 are built straight
//! from the seeds, before anything has been played. Entering a score later
//! only fills the player slots of matches that already exist.
//!
//! The format needs exactly three round-2 matches to feed its three-way
//! final, which holds for 11, 12 and 14 participants. Other counts are
//! rejected with `StorageError::Precondition` before anything is written.

use tracing::{debug, info};

use crate::error::{Result, StorageError};
use crate::models::{MatchRecord, NewMatch, RoundKind};
use crate::store::{MatchStore, ParticipantDirectory};

/// All matches of one round, in creation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketRound {
    pub round: i32,
    pub matches: Vec<MatchRecord>,
}

/// Output of one pairing pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairedRound {
    pub matches: Vec<MatchRecord>,
    /// The last input record when the input count was odd.
    pub bye: Option<MatchRecord>,
}

/// Replace the bracket of `event_id` with one built from `names`.
///
/// Every name is resolved before anything is written. Run this against a
/// store backed by a transaction: a failure at any later step must not
/// leave a half-built bracket behind.
pub async fn build_bracket<S>(
    store: &mut S,
    names: &[String],
    event_id: i32,
) -> Result<Vec<BracketRound>>
where
    S: MatchStore + ParticipantDirectory,
{
    if names.is_empty() {
        return Err(StorageError::InvalidInput(
            "At least one participant is required".to_string(),
        ));
    }

    let mut participants = Vec::with_capacity(names.len());
    for name in names {
        let player_id = store
            .resolve(name)
            .await?
            .ok_or_else(|| StorageError::UnknownParticipant(name.clone()))?;
        participants.push(player_id);
    }

    let round_two = round_two_size(participants.len())?;
    if round_two != 3 {
        return Err(StorageError::Precondition(format!(
            "the final round needs exactly three round-2 matches, found {} for {} participants",
            round_two,
            participants.len()
        )));
    }

    let removed = store.delete_all(event_id).await?;
    debug!(event_id, removed, "Cleared previous bracket");

    let seeds = create_seeds(store, event_id, &participants).await?;
    let first = pair_round(store, event_id, &seeds).await?;
    let second = pair_round(store, event_id, &first.matches).await?;

    let mut second_round = second.matches;
    if let Some(reconciliation) = reconcile(store, event_id, second.bye, first.bye).await? {
        second_round.push(reconciliation);
    }

    let finals = create_final_round(store, event_id, &second_round).await?;

    info!(
        event_id,
        participants = participants.len(),
        "Bracket built"
    );

    Ok(vec![
        BracketRound {
            round: RoundKind::Seed.round(),
            matches: seeds,
        },
        BracketRound {
            round: RoundKind::Pairing.round(),
            matches: first.matches,
        },
        BracketRound {
            round: RoundKind::Reconciled.round(),
            matches: second_round,
        },
        BracketRound {
            round: RoundKind::Final.round(),
            matches: finals,
        },
    ])
}

/// Number of round-2 matches `participants` seeds produce, reconciliation
/// included. A leftover seed with no round-2 leftover to meet is stranded.
pub fn round_two_size(participants: usize) -> Result<usize> {
    let round_one = participants / 2;
    let duo1 = participants % 2 == 1;
    let duo2 = round_one % 2 == 1;

    match (duo2, duo1) {
        (false, true) => Err(StorageError::Precondition(format!(
            "seed {} has no round-2 leftover to be reconciled with",
            participants
        ))),
        (true, true) => Ok(round_one / 2 + 1),
        _ => Ok(round_one / 2),
    }
}

/// One round-0 record per participant, in input order.
pub async fn create_seeds<S: MatchStore>(
    store: &mut S,
    event_id: i32,
    participants: &[i32],
) -> Result<Vec<MatchRecord>> {
    let mut seeds = Vec::with_capacity(participants.len());
    for &player_id in participants {
        seeds.push(store.create(NewMatch::seed(event_id, player_id)).await?);
    }
    Ok(seeds)
}

/// Pair `previous` two at a time, in order, into the next round.
pub async fn pair_round<S: MatchStore>(
    store: &mut S,
    event_id: i32,
    previous: &[MatchRecord],
) -> Result<PairedRound> {
    let mut pairs = previous.chunks_exact(2);
    let mut matches = Vec::with_capacity(previous.len() / 2);

    for pair in pairs.by_ref() {
        let record = store
            .create(NewMatch::pairing(event_id, &pair[0], &pair[1]))
            .await?;
        matches.push(record);
    }

    let bye = pairs.remainder().first().cloned();

    Ok(PairedRound { matches, bye })
}

/// Merge the round-2 leftover (`duo2`) with the round-1 leftover (`duo1`).
///
/// A round-2 leftover on its own plays no further match. A round-1
/// leftover on its own is stranded.
async fn reconcile<S: MatchStore>(
    store: &mut S,
    event_id: i32,
    duo2: Option<MatchRecord>,
    duo1: Option<MatchRecord>,
) -> Result<Option<MatchRecord>> {
    match (duo2, duo1) {
        (None, None) => Ok(None),
        (Some(duo2), None) => {
            debug!(event_id, match_id = duo2.id, "Round-2 leftover not reconciled");
            Ok(None)
        }
        (Some(duo2), Some(duo1)) => {
            let record = store
                .create(NewMatch::pairing(event_id, &duo2, &duo1))
                .await?;
            Ok(Some(record))
        }
        (None, Some(stranded)) => Err(StorageError::Precondition(format!(
            "match {} (round {}) has no opponent to be reconciled with",
            stranded.id, stranded.round
        ))),
    }
}

/// Round-robin decider among the winners of exactly three round-2 matches:
/// (W1 vs W2), (W2 vs W3), (W1 vs W3).
pub async fn create_final_round<S: MatchStore>(
    store: &mut S,
    event_id: i32,
    finalists: &[MatchRecord],
) -> Result<Vec<MatchRecord>> {
    let [first, second, third] = finalists else {
        return Err(StorageError::Precondition(format!(
            "the final round needs exactly three round-2 matches, found {}",
            finalists.len()
        )));
    };

    let mut finals = Vec::with_capacity(3);
    for (a, b) in [(first, second), (second, third), (first, third)] {
        finals.push(store.create(NewMatch::pairing(event_id, a, b)).await?);
    }
    Ok(finals)
}

/// Scores to record for a played match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOutcome {
    pub score1: i32,
    pub score2: i32,
    pub winner_id: i32,
}

/// Record the outcome of a match and hand its winner to the matches it feeds.
pub async fn record_score<S: MatchStore>(
    store: &mut S,
    event_id: i32,
    match_id: i32,
    outcome: MatchOutcome,
) -> Result<MatchRecord> {
    let mut record = store.get(match_id).await?;
    if record.event_id != event_id {
        return Err(StorageError::NotFound);
    }

    if outcome.score1 < 0 || outcome.score2 < 0 {
        return Err(StorageError::InvalidInput(
            "Scores cannot be negative".to_string(),
        ));
    }
    if !record.has_player(outcome.winner_id) {
        return Err(StorageError::InvalidInput(format!(
            "Player {} does not play in match {}",
            outcome.winner_id, match_id
        )));
    }

    record.score1 = outcome.score1;
    record.score2 = outcome.score2;
    record.winner_id = Some(outcome.winner_id);
    store.save(&record).await?;

    let next_round = RoundKind::for_round(record.round)
        .filter(|kind| kind.feeds_next_round())
        .and_then(RoundKind::next);
    if let Some(next_round) = next_round {
        let advanced = advance_winner(store, &record, next_round).await?;
        debug!(match_id, advanced, "Winner advanced");
    }

    Ok(record)
}

async fn advance_winner<S: MatchStore>(
    store: &mut S,
    decided: &MatchRecord,
    next_round: RoundKind,
) -> Result<usize> {
    let mut advanced = 0;

    for mut next in store.query(decided.event_id, next_round.round()).await? {
        if next.last_match1_id == Some(decided.id) {
            next.player1_id = decided.winner_id;
        } else if next.last_match2_id == Some(decided.id) {
            next.player2_id = decided.winner_id;
        } else {
            continue;
        }
        store.save(&next).await?;
        advanced += 1;
    }

    Ok(advanced)
}

/// Every round of an event from the seeds up, stopping at the first empty one.
pub async fn list_rounds<S: MatchStore>(store: &mut S, event_id: i32) -> Result<Vec<BracketRound>> {
    let mut rounds = Vec::new();
    let mut round = 0;

    loop {
        let matches = store.query(event_id, round).await?;
        if matches.is_empty() {
            break;
        }
        rounds.push(BracketRound { round, matches });
        round += 1;
    }

    Ok(rounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryMatchStore;

    const EVENT: i32 = 1;

    fn names(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("P{}", i + 1)).collect()
    }

    fn store_for(count: usize) -> InMemoryMatchStore {
        let names = names(count);
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        InMemoryMatchStore::with_players(&refs)
    }

    fn counts(rounds: &[BracketRound]) -> Vec<usize> {
        rounds.iter().map(|round| round.matches.len()).collect()
    }

    #[tokio::test]
    async fn test_twelve_participants() {
        let mut store = store_for(12);

        let rounds = build_bracket(&mut store, &names(12), EVENT).await.unwrap();

        assert_eq!(counts(&rounds), vec![12, 6, 3, 3]);
        assert_eq!(
            rounds.iter().map(|r| r.round).collect::<Vec<_>>(),
            vec![0, 1, 2, 3]
        );
        let seed_winners: Vec<_> = rounds[0].matches.iter().map(|m| m.winner_id).collect();
        assert_eq!(seed_winners, (1..=12).map(Some).collect::<Vec<_>>());
        assert!(rounds[0].matches.iter().all(|m| m.last_match1_id.is_none()));
    }

    #[tokio::test]
    async fn test_eleven_participants_reconcile_the_leftover_seed() {
        let mut store = store_for(11);

        let rounds = build_bracket(&mut store, &names(11), EVENT).await.unwrap();

        assert_eq!(counts(&rounds), vec![11, 5, 3, 3]);

        let last_seed = &rounds[0].matches[10];
        let last_round_one = &rounds[1].matches[4];
        let reconciliation = &rounds[2].matches[2];
        assert_eq!(reconciliation.last_match1_id, Some(last_round_one.id));
        assert_eq!(reconciliation.last_match2_id, Some(last_seed.id));
        assert_eq!(reconciliation.player2_id, last_seed.winner_id);
        assert_eq!(reconciliation.round, 2);

        // the leftover seed plays no round-1 match
        assert!(
            rounds[1]
                .matches
                .iter()
                .all(|m| !m.has_player(store.player_id("P11")))
        );
    }

    #[tokio::test]
    async fn test_final_round_is_a_three_cycle() {
        let mut store = store_for(12);

        let rounds = build_bracket(&mut store, &names(12), EVENT).await.unwrap();

        let semis: Vec<i32> = rounds[2].matches.iter().map(|m| m.id).collect();
        let links: Vec<_> = rounds[3]
            .matches
            .iter()
            .map(|m| (m.last_match1_id.unwrap(), m.last_match2_id.unwrap()))
            .collect();
        assert_eq!(
            links,
            vec![
                (semis[0], semis[1]),
                (semis[1], semis[2]),
                (semis[0], semis[2])
            ]
        );
        assert!(rounds[3].matches.iter().all(|m| m.round == 3));
        assert!(
            rounds[3]
                .matches
                .iter()
                .all(|m| m.score1 == 0 && m.score2 == 0)
        );
    }

    #[tokio::test]
    async fn test_round_invariant_holds_for_every_record() {
        let mut store = store_for(11);
        build_bracket(&mut store, &names(11), EVENT).await.unwrap();

        let all: Vec<MatchRecord> = store.matches_of(EVENT).into_iter().cloned().collect();
        for record in &all {
            match (record.last_match1_id, record.last_match2_id) {
                (Some(a), Some(b)) => {
                    let a = store.get(a).await.unwrap();
                    let b = store.get(b).await.unwrap();
                    assert_eq!(record.round, a.round.max(b.round) + 1);
                }
                _ => assert_eq!(record.round, 0),
            }
        }
    }

    #[tokio::test]
    async fn test_four_participants_fail_at_final_round() {
        let mut store = InMemoryMatchStore::with_players(&["A", "B", "C", "D"]);
        let input: Vec<String> = ["A", "B", "C", "D"].map(String::from).to_vec();

        let err = build_bracket(&mut store, &input, EVENT).await.unwrap_err();

        match err {
            StorageError::Precondition(msg) => assert!(msg.contains("found 1"), "{}", msg),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_four_participants_pair_in_order() {
        let mut store = InMemoryMatchStore::with_players(&["A", "B", "C", "D"]);
        let seeds = create_seeds(&mut store, EVENT, &[1, 2, 3, 4]).await.unwrap();

        let first = pair_round(&mut store, EVENT, &seeds).await.unwrap();
        let second = pair_round(&mut store, EVENT, &first.matches).await.unwrap();

        let pairs: Vec<_> = first
            .matches
            .iter()
            .map(|m| (m.player1_id, m.player2_id))
            .collect();
        assert_eq!(pairs, vec![(Some(1), Some(2)), (Some(3), Some(4))]);
        assert_eq!(first.bye, None);
        assert_eq!(second.matches.len(), 1);
        assert_eq!(second.matches[0].last_match1_id, Some(first.matches[0].id));
        assert_eq!(second.matches[0].last_match2_id, Some(first.matches[1].id));
        assert_eq!(second.bye, None);
    }

    #[tokio::test]
    async fn test_fourteen_participants() {
        let mut store = store_for(14);

        let rounds = build_bracket(&mut store, &names(14), EVENT).await.unwrap();

        assert_eq!(counts(&rounds), vec![14, 7, 3, 3]);

        // the seventh round-1 match feeds nothing
        let leftover = rounds[1].matches[6].id;
        assert!(store.matches_of(EVENT).iter().all(|m| {
            m.last_match1_id != Some(leftover) && m.last_match2_id != Some(leftover)
        }));
        let semis: Vec<i32> = rounds[2].matches.iter().map(|m| m.id).collect();
        assert_eq!(rounds[3].matches[0].last_match1_id, Some(semis[0]));
        assert_eq!(rounds[3].matches[2].last_match2_id, Some(semis[2]));
    }

    #[test]
    fn test_supported_participant_counts() {
        let supported: Vec<usize> = (1..=64)
            .filter(|&n| matches!(round_two_size(n), Ok(3)))
            .collect();
        assert_eq!(supported, vec![11, 12, 14]);

        assert!(matches!(round_two_size(13), Err(StorageError::Precondition(_))));
        assert_eq!(round_two_size(6).unwrap(), 1);
    }

    #[tokio::test]
    async fn test_thirteen_participants_strand_the_last_seed() {
        let mut store = store_for(13);

        let err = build_bracket(&mut store, &names(13), EVENT).await.unwrap_err();

        assert!(matches!(err, StorageError::Precondition(_)));
        assert!(store.matches_of(EVENT).is_empty());
    }

    #[tokio::test]
    async fn test_failed_rebuild_keeps_previous_bracket() {
        let mut store = store_for(14);
        build_bracket(&mut store, &names(12), EVENT).await.unwrap();
        let before: Vec<MatchRecord> = store.matches_of(EVENT).into_iter().cloned().collect();

        for count in [4, 6, 13] {
            let err = build_bracket(&mut store, &names(count), EVENT)
                .await
                .unwrap_err();
            assert!(matches!(err, StorageError::Precondition(_)), "{}", count);

            let after: Vec<MatchRecord> = store.matches_of(EVENT).into_iter().cloned().collect();
            assert_eq!(after, before);
        }
    }

    #[tokio::test]
    async fn test_blank_name_is_an_unknown_participant() {
        let mut store = store_for(12);
        let mut input = names(12);
        input[3] = String::new();

        let err = build_bracket(&mut store, &input, EVENT).await.unwrap_err();

        assert!(matches!(err, StorageError::UnknownParticipant(ref name) if name.is_empty()));
        assert!(store.matches_of(EVENT).is_empty());
    }

    #[tokio::test]
    async fn test_six_participants_leave_one_round_two_match() {
        let players = ["A", "B", "C", "D", "E", "F"];
        let mut store = InMemoryMatchStore::with_players(&players);
        let seeds = create_seeds(&mut store, EVENT, &[1, 2, 3, 4, 5, 6])
            .await
            .unwrap();

        let first = pair_round(&mut store, EVENT, &seeds).await.unwrap();
        let pairs: Vec<_> = first
            .matches
            .iter()
            .map(|m| (m.player1_id.unwrap(), m.player2_id.unwrap()))
            .collect();
        assert_eq!(pairs, vec![(1, 2), (3, 4), (5, 6)]);

        let second = pair_round(&mut store, EVENT, &first.matches).await.unwrap();
        assert_eq!(second.matches.len(), 1);
        assert_eq!(second.bye.as_ref(), Some(&first.matches[2]));

        let reconciled = reconcile(&mut store, EVENT, second.bye, first.bye)
            .await
            .unwrap();
        assert_eq!(reconciled, None);

        let mut store = InMemoryMatchStore::with_players(&players);
        let input: Vec<String> = players.map(String::from).to_vec();
        let err = build_bracket(&mut store, &input, EVENT).await.unwrap_err();
        match err {
            StorageError::Precondition(msg) => assert!(msg.contains("found 1"), "{}", msg),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_odd_round_returns_bye() {
        let mut store = store_for(3);
        let seeds = create_seeds(&mut store, EVENT, &[1, 2, 3]).await.unwrap();

        let paired = pair_round(&mut store, EVENT, &seeds).await.unwrap();

        assert_eq!(paired.matches.len(), 1);
        assert_eq!(paired.bye, Some(seeds[2].clone()));
    }

    #[tokio::test]
    async fn test_final_round_rejects_wrong_arity() {
        let mut store = store_for(8);
        let seeds = create_seeds(&mut store, EVENT, &[1, 2, 3, 4]).await.unwrap();

        let err = create_final_round(&mut store, EVENT, &seeds)
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::Precondition(_)));
        assert_eq!(store.max_id().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_unknown_participant_is_rejected_before_writing() {
        let mut store = store_for(12);
        build_bracket(&mut store, &names(12), EVENT).await.unwrap();
        let before = store.matches_of(EVENT).len();

        let mut input = names(12);
        input[5] = "Nobody".to_string();
        let err = build_bracket(&mut store, &input, EVENT).await.unwrap_err();

        assert!(matches!(err, StorageError::UnknownParticipant(ref name) if name == "Nobody"));
        assert_eq!(store.matches_of(EVENT).len(), before);
    }

    #[tokio::test]
    async fn test_empty_participant_list() {
        let mut store = InMemoryMatchStore::default();
        let err = build_bracket(&mut store, &[], EVENT).await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_rebuild_replaces_previous_bracket() {
        let mut store = store_for(12);

        let first = build_bracket(&mut store, &names(12), EVENT).await.unwrap();
        let second = build_bracket(&mut store, &names(12), EVENT).await.unwrap();

        assert_eq!(store.matches_of(EVENT).len(), 12 + 6 + 3 + 3);
        assert_eq!(counts(&first), counts(&second));

        // same shape once ids are expressed relative to the first record
        let offset = second[0].matches[0].id - first[0].matches[0].id;
        for (old, new) in first.iter().zip(&second) {
            for (a, b) in old.matches.iter().zip(&new.matches) {
                assert_eq!(b.id - offset, a.id);
                assert_eq!(b.last_match1_id.map(|id| id - offset), a.last_match1_id);
                assert_eq!(b.last_match2_id.map(|id| id - offset), a.last_match2_id);
                assert_eq!((b.player1_id, b.player2_id), (a.player1_id, a.player2_id));
            }
        }
    }

    #[tokio::test]
    async fn test_rebuild_leaves_other_events_alone() {
        let mut store = store_for(12);
        build_bracket(&mut store, &names(12), 2).await.unwrap();

        build_bracket(&mut store, &names(12), EVENT).await.unwrap();
        build_bracket(&mut store, &names(12), EVENT).await.unwrap();

        assert_eq!(store.matches_of(2).len(), 24);
        assert_eq!(store.matches_of(EVENT).len(), 24);
    }

    #[tokio::test]
    async fn test_record_score_advances_into_next_round() {
        let mut store = store_for(12);
        let rounds = build_bracket(&mut store, &names(12), EVENT).await.unwrap();
        let first = rounds[1].matches[0].clone();
        let second = rounds[1].matches[1].clone();
        let semi = rounds[2].matches[0].clone();

        let winner = first.player2_id.unwrap();
        let updated = record_score(
            &mut store,
            EVENT,
            first.id,
            MatchOutcome {
                score1: 1,
                score2: 3,
                winner_id: winner,
            },
        )
        .await
        .unwrap();
        assert_eq!((updated.score1, updated.score2), (1, 3));
        assert_eq!(updated.winner_id, Some(winner));

        let semi_after = store.get(semi.id).await.unwrap();
        assert_eq!(semi_after.player1_id, Some(winner));
        assert_eq!(semi_after.player2_id, None);

        let winner = second.player1_id.unwrap();
        record_score(
            &mut store,
            EVENT,
            second.id,
            MatchOutcome {
                score1: 2,
                score2: 0,
                winner_id: winner,
            },
        )
        .await
        .unwrap();
        assert_eq!(store.get(semi.id).await.unwrap().player2_id, Some(winner));
    }

    #[tokio::test]
    async fn test_record_score_touches_only_dependent_matches() {
        let mut store = store_for(12);
        let rounds = build_bracket(&mut store, &names(12), EVENT).await.unwrap();
        let before: Vec<MatchRecord> = store.matches_of(EVENT).into_iter().cloned().collect();

        let target = &rounds[1].matches[2];
        let winner = target.player1_id.unwrap();
        record_score(
            &mut store,
            EVENT,
            target.id,
            MatchOutcome {
                score1: 4,
                score2: 2,
                winner_id: winner,
            },
        )
        .await
        .unwrap();

        for old in &before {
            let now = store.get(old.id).await.unwrap();
            if now.id == target.id {
                continue;
            }
            let feeds_from_target = now.last_match1_id == Some(target.id)
                || now.last_match2_id == Some(target.id);
            if feeds_from_target {
                assert_eq!(now.round, 2);
                assert!(now.has_player(winner));
            } else {
                assert_eq!(&now, old);
            }
        }
    }

    async fn decide_round(store: &mut InMemoryMatchStore, round: &BracketRound) {
        for record in &round.matches {
            let current = store.get(record.id).await.unwrap();
            let winner = current.player1_id.unwrap();
            record_score(
                store,
                EVENT,
                current.id,
                MatchOutcome {
                    score1: 1,
                    score2: 0,
                    winner_id: winner,
                },
            )
            .await
            .unwrap();
        }
    }

    #[tokio::test]
    async fn test_round_two_winners_fill_the_final_cycle() {
        let mut store = store_for(12);
        let rounds = build_bracket(&mut store, &names(12), EVENT).await.unwrap();

        decide_round(&mut store, &rounds[1]).await;
        decide_round(&mut store, &rounds[2]).await;

        let winners: Vec<Option<i32>> = {
            let mut winners = Vec::new();
            for semi in &rounds[2].matches {
                winners.push(store.get(semi.id).await.unwrap().winner_id);
            }
            winners
        };
        let mut finals = Vec::new();
        for record in &rounds[3].matches {
            let record = store.get(record.id).await.unwrap();
            finals.push((record.player1_id, record.player2_id));
        }
        assert_eq!(
            finals,
            vec![
                (winners[0], winners[1]),
                (winners[1], winners[2]),
                (winners[0], winners[2])
            ]
        );
        // P1, P5 and P9 win every match they play
        assert_eq!(winners, vec![Some(1), Some(5), Some(9)]);
    }

    #[tokio::test]
    async fn test_final_scores_do_not_propagate() {
        let mut store = store_for(12);
        let rounds = build_bracket(&mut store, &names(12), EVENT).await.unwrap();
        decide_round(&mut store, &rounds[1]).await;
        decide_round(&mut store, &rounds[2]).await;
        let before: Vec<MatchRecord> = store.matches_of(EVENT).into_iter().cloned().collect();

        let last = &rounds[3].matches[2];
        let current = store.get(last.id).await.unwrap();
        record_score(
            &mut store,
            EVENT,
            last.id,
            MatchOutcome {
                score1: 0,
                score2: 5,
                winner_id: current.player2_id.unwrap(),
            },
        )
        .await
        .unwrap();

        let mut changed = Vec::new();
        for old in &before {
            if store.get(old.id).await.unwrap() != *old {
                changed.push(old.id);
            }
        }
        assert_eq!(changed, vec![last.id]);
    }

    #[tokio::test]
    async fn test_record_score_rejections() {
        let mut store = store_for(12);
        let rounds = build_bracket(&mut store, &names(12), EVENT).await.unwrap();
        let first = &rounds[1].matches[0];
        let outcome = MatchOutcome {
            score1: 1,
            score2: 0,
            winner_id: first.player1_id.unwrap(),
        };

        let missing = record_score(&mut store, EVENT, 9999, outcome).await;
        assert!(matches!(missing, Err(StorageError::NotFound)));

        let other_event = record_score(&mut store, 2, first.id, outcome).await;
        assert!(matches!(other_event, Err(StorageError::NotFound)));

        let outsider = MatchOutcome {
            winner_id: 12,
            ..outcome
        };
        let err = record_score(&mut store, EVENT, first.id, outsider).await;
        assert!(matches!(err, Err(StorageError::InvalidInput(_))));

        let negative = MatchOutcome {
            score1: -1,
            ..outcome
        };
        let err = record_score(&mut store, EVENT, first.id, negative).await;
        assert!(matches!(err, Err(StorageError::InvalidInput(_))));

        // seeds have no players to win
        let seed = &rounds[0].matches[0];
        let err = record_score(
            &mut store,
            EVENT,
            seed.id,
            MatchOutcome {
                winner_id: seed.winner_id.unwrap(),
                ..outcome
            },
        )
        .await;
        assert!(matches!(err, Err(StorageError::InvalidInput(_))));

        assert_eq!(store.get(first.id).await.unwrap().winner_id, None);
    }

    #[tokio::test]
    async fn test_list_rounds_groups_by_round() {
        let mut store = store_for(11);
        let built = build_bracket(&mut store, &names(11), EVENT).await.unwrap();

        let listed = list_rounds(&mut store, EVENT).await.unwrap();

        assert_eq!(listed, built);
        assert!(list_rounds(&mut store, 2).await.unwrap().is_empty());
    }
}
