//! Property-based tests for the ASMACAG rules.
//!
//! These tests use proptest to generate parameters, seeds and action
//! sequences and check the rule invariants:
//! - Cards are never created or lost
//! - The board only ever holds number cards
//! - Every enumerated action is valid and steps successfully
//! - Games always end
//! - Observations only resample the opponent's hand

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;
use turnplay_asmacag::{
    AsmacagAction, AsmacagForwardModel, AsmacagObservation, AsmacagParameters, Card, GameState, ScoreDifference,
};
use turnplay_core::{ForwardModel, Observation, Player};
use turnplay_mcts::{BridgeBurningMcts, Mcts, MctsConfig};

// =============================================================================
// Strategies
// =============================================================================

/// Generate small, valid game parameters
fn arb_parameters() -> impl Strategy<Value = AsmacagParameters> {
    (1usize..5, 1usize..8, 1usize..4, 1u8..4, 0u8..5, 1usize..5, 1usize..6, 0usize..4, 0usize..4)
        .prop_map(|(hand, board, points, min, span, limit, normal, mult2, div2)| AsmacagParameters {
            cards_in_hand: hand,
            cards_on_board: board,
            action_points_per_turn: points,
            min_number: min,
            max_number: min + span,
            limit_number_copies: limit,
            normal_number_copies: normal,
            mult2_cards: mult2,
            div2_cards: div2,
        })
        .prop_filter("deck must be dealable", |p| p.validate().is_ok())
}

fn sorted(cards: impl Iterator<Item = Card>) -> Vec<Card> {
    let mut cards: Vec<Card> = cards.collect();
    cards.sort();
    cards
}

/// Play one action from `picks`, valid or not, on the true table.
///
/// Picks index into the enumerated actions; an out-of-range pick plays a
/// card that may not be in hand.
fn play_pick(state: &mut GameState, pick: usize) -> bool {
    let model = AsmacagForwardModel;
    let actions = state.table().actions();
    let action = if pick % 5 == 0 || actions.is_empty() {
        AsmacagAction::alone(Card::Number(state.parameters().max_number))
    } else {
        actions[pick % actions.len()]
    };
    let applied = model.step(state.table_mut(), &action);
    if model.is_turn_finished(state.table()) {
        model.on_turn_ended(state.table_mut());
    }
    applied
}

// =============================================================================
// Dealing
// =============================================================================

proptest! {
    /// A fresh deal uses exactly the full deck with a number-only board
    #[test]
    fn prop_deal_conserves_deck(parameters in arb_parameters(), seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let state = GameState::new(parameters.clone(), &mut rng).unwrap();
        let table = state.table();

        prop_assert_eq!(sorted(table.all_cards()), sorted(parameters.deck().into_iter()));
        prop_assert_eq!(table.hand(0).unwrap().len(), parameters.cards_in_hand);
        prop_assert_eq!(table.hand(1).unwrap().len(), parameters.cards_in_hand);
        prop_assert_eq!(table.board().len(), parameters.cards_on_board);
        prop_assert!(table.board().iter().all(|c| c.is_number()));
    }
}

// =============================================================================
// Stepping
// =============================================================================

proptest! {
    /// Cards are conserved and the board stays number-only under any play
    #[test]
    fn prop_step_conserves_cards(
        parameters in arb_parameters(),
        seed in any::<u64>(),
        picks in prop::collection::vec(any::<usize>(), 0..40)
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut state = GameState::new(parameters.clone(), &mut rng).unwrap();
        let deck = sorted(parameters.deck().into_iter());

        for pick in picks {
            if AsmacagForwardModel.is_terminal(state.table()) {
                break;
            }
            play_pick(&mut state, pick);
            prop_assert_eq!(sorted(state.table().all_cards()), deck.clone());
            prop_assert!(state.table().board().iter().all(|c| c.is_number()));
        }
    }

    /// Every enumerated action is valid and applies without penalty
    #[test]
    fn prop_enumerated_actions_apply(parameters in arb_parameters(), seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let state = GameState::new(parameters.clone(), &mut rng).unwrap();
        let observation = state.observation(&mut rng);

        for action in observation.actions() {
            prop_assert!(observation.is_action_valid(&action));

            let mut next = observation.clone();
            prop_assert!(AsmacagForwardModel.step(&mut next, &action));
            prop_assert_eq!(next.action_points_left(), observation.action_points_left() - 1);
            prop_assert!(next.scores()[0] >= parameters.min_score());
        }
    }

    /// Random play always reaches a terminal state within the hand sizes
    #[test]
    fn prop_random_games_end(parameters in arb_parameters(), seed in any::<u64>()) {
        let model = AsmacagForwardModel;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut state = GameState::new(parameters.clone(), &mut rng).unwrap();

        // Every step removes a card from a hand
        let bound = 2 * parameters.cards_in_hand;
        let mut steps = 0;

        while !model.is_terminal(state.table()) {
            prop_assert!(steps < bound);
            // A player with an empty hand just passes
            if let Some(action) = state.table().random_action(&mut rng) {
                model.step(state.table_mut(), &action);
                steps += 1;
            }
            model.on_turn_ended(state.table_mut());
        }
    }
}

// =============================================================================
// Observations
// =============================================================================

proptest! {
    /// Observations resample only the opponent's hand
    #[test]
    fn prop_observation_preserves_visible(
        parameters in arb_parameters(),
        seed in any::<u64>(),
        picks in prop::collection::vec(any::<usize>(), 0..10)
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut state = GameState::new(parameters, &mut rng).unwrap();
        for pick in picks {
            if AsmacagForwardModel.is_terminal(state.table()) {
                break;
            }
            play_pick(&mut state, pick);
        }

        let table = state.table();
        let observation: AsmacagObservation = state.observation(&mut rng);
        let me = table.current_player();
        let opponent = 1 - me;

        prop_assert_eq!(observation.current_player(), me);
        prop_assert_eq!(observation.hand(me).unwrap(), table.hand(me).unwrap());
        prop_assert_eq!(observation.board(), table.board());
        prop_assert_eq!(observation.discard_deck(), table.discard_deck());
        prop_assert_eq!(observation.scores(), table.scores());
        prop_assert_eq!(observation.hand(opponent).unwrap().len(), table.hand(opponent).unwrap().len());
        prop_assert_eq!(
            sorted(observation.hand(opponent).unwrap().iter().chain(observation.main_deck()).copied()),
            sorted(table.hand(opponent).unwrap().iter().chain(table.main_deck()).copied())
        );
    }
}

// =============================================================================
// Tree search players on ASMACAG
// =============================================================================

#[test]
fn test_tree_search_plans_valid_turns() {
    let mut rng = ChaCha8Rng::seed_from_u64(17);
    let state = GameState::new(AsmacagParameters::default(), &mut rng).unwrap();
    let model = AsmacagForwardModel;
    let observation = state.observation(&mut rng);

    let mut players: Vec<Box<dyn Player<AsmacagForwardModel>>> = vec![
        Box::new(Mcts::<AsmacagObservation, _, _>::new(
            MctsConfig::default(),
            ScoreDifference,
            ChaCha8Rng::seed_from_u64(1),
        )),
        Box::new(Mcts::<AsmacagObservation, _, _>::new(
            MctsConfig::full_rollout(),
            ScoreDifference,
            ChaCha8Rng::seed_from_u64(2),
        )),
        Box::new(BridgeBurningMcts::<AsmacagObservation, _, _>::new(
            MctsConfig::bridge_burning(),
            ScoreDifference,
            ChaCha8Rng::seed_from_u64(3),
        )),
    ];

    for player in players.iter_mut() {
        player.think(&observation, &model, Duration::from_millis(300));

        // A shallow tree may plan fewer actions than there are action points
        let mut table = state.table().clone();
        let mut planned = 0;
        while let Some(action) = player.action(planned) {
            assert!(table.is_action_valid(&action), "{} planned {} at {}", player.name(), action, planned);
            assert!(model.step(&mut table, &action));
            planned += 1;
        }
        assert!(planned >= 1 && planned <= observation.action_points_per_turn());
        assert!(player.forward_model_calls() > 0);
    }
}
