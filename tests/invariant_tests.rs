//! Whole-game invariants over random seeds.
//!
//! Each case loads the bundled harbor scenario, then plays a greedy policy:
//! every offered action is attempted on every candidate property. State is
//! checked after every round and every action.

mod common;

use proptest::prelude::*;
use rust_hotel::{
    load_scenario, GameRng, PlayerId, PropertyId, Rejection, Session, SessionConfig,
    TollOutcome,
};

struct Ledger {
    /// Player funds the bank has put in, net of what it took out.
    expected_total: i64,
    peaks: Vec<i64>,
}

impl Ledger {
    fn new(session: &Session) -> Self {
        Self {
            expected_total: total_funds(session),
            peaks: session.players().map(|p| p.peak_funds()).collect(),
        }
    }
}

fn total_funds(session: &Session) -> i64 {
    session.players().map(|p| p.funds()).sum()
}

fn check(session: &Session, ledger: &mut Ledger) -> Result<(), TestCaseError> {
    prop_assert_eq!(total_funds(session), ledger.expected_total);

    for (player, peak) in session.players().zip(ledger.peaks.iter_mut()) {
        prop_assert!(player.funds() >= 0);
        prop_assert!(player.peak_funds() >= player.funds());
        prop_assert!(player.peak_funds() >= *peak);
        *peak = player.peak_funds();

        if !player.is_active() {
            prop_assert_eq!(player.owned_count(), 0);
            prop_assert_eq!(session.position(player.id()), None);
        }
    }

    for property in session.properties().iter() {
        let holders: Vec<PlayerId> = session
            .players()
            .filter(|p| p.owns(property.id()))
            .map(|p| p.id())
            .collect();
        match property.owner() {
            Some(owner) => prop_assert_eq!(holders, vec![owner]),
            None => {
                prop_assert!(holders.is_empty());
                prop_assert!(!property.is_constructed());
            }
        }
    }

    for (tile, path) in session.board().grid().paths() {
        if let Some(target) = session.board().access_target(tile) {
            prop_assert!(path.kind.accepts_access());
            let property = session.property(target).unwrap();
            prop_assert!(property.owner().is_some());
            prop_assert!(property.is_constructed());
        }
    }
    Ok(())
}

fn candidates(session: &Session) -> Vec<PropertyId> {
    let Some(player) = session.current_player() else {
        return Vec::new();
    };
    let mut ids: Vec<PropertyId> = session
        .position(player)
        .map(|tile| {
            session
                .board()
                .adjacent_properties(tile)
                .iter()
                .map(|&(_, id)| id)
                .collect()
        })
        .unwrap_or_default();
    if let Some(p) = session.player(player) {
        ids.extend(p.owned());
    }
    ids
}

fn play(seed: u64, players: usize, rounds: usize) -> Result<(), TestCaseError> {
    let scenario = load_scenario(common::harbor_dir()).unwrap();
    let config = SessionConfig::new()
        .with_player_count(players)
        .with_starting_funds(4_000);
    let mut session = scenario.into_session(config, GameRng::new(seed)).unwrap();
    let mut ledger = Ledger::new(&session);

    for _ in 0..rounds {
        let report = match session.advance_round() {
            Ok(report) => report,
            Err(reason) => {
                prop_assert_eq!(reason, Rejection::GameOver);
                prop_assert!(session.winner().is_some());
                break;
            }
        };
        ledger.expected_total += report.relief_granted.unwrap_or(0);

        let others_at_destination = session
            .players()
            .filter(|p| p.id() != report.player)
            .filter(|p| session.position(p.id()) == Some(report.destination))
            .count();
        prop_assert_eq!(others_at_destination, 0);
        if let TollOutcome::Eliminated { .. } = report.toll {
            prop_assert_eq!(session.position(report.player), None);
        }
        check(&session, &mut ledger)?;

        let offered = session.eligibility();
        if offered.request_relief {
            ledger.expected_total += session.request_relief().unwrap();
        }
        for id in candidates(&session) {
            if offered.acquire_property {
                if let Ok(purchase) = session.acquire_property(id) {
                    if purchase.seller.is_none() {
                        ledger.expected_total -= purchase.cost;
                    }
                }
            }
            if offered.expand_construction {
                if let Ok(expansion) = session.expand_construction(id) {
                    ledger.expected_total -= expansion.cost;
                }
            }
            if offered.acquire_access_point {
                if let Ok(point) = session.acquire_access_point(id) {
                    ledger.expected_total -= point.cost;
                }
            }
            check(&session, &mut ledger)?;
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_invariants_hold(seed in any::<u64>(), players in 2usize..=5, rounds in 1usize..200) {
        play(seed, players, rounds)?;
    }
}

#[test]
fn test_same_seed_same_game() {
    let run = |seed| {
        let scenario = load_scenario(common::harbor_dir()).unwrap();
        let mut session = scenario
            .into_session(SessionConfig::new(), GameRng::new(seed))
            .unwrap();
        (0..40)
            .map_while(|_| session.advance_round().ok())
            .collect::<Vec<_>>()
    };

    assert_eq!(run(11), run(11));
}
