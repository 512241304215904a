//! Playing ASMACAG games between two seated players.

use crate::players::{BoxedPlayer, PlayerKind};
use anyhow::Result;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use turnplay_asmacag::{AsmacagForwardModel, AsmacagParameters, GameState};
use turnplay_core::{ForwardModel, Observation};

/// Settings shared by every game of a match.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchSettings {
    pub budget: Duration,
    /// Maximum number of turns, counting both players
    pub rounds: usize,
    pub parameters: AsmacagParameters,
    pub verbose: bool,
}

/// Outcome of one game, seats in playing order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameRecord {
    pub seed: u64,
    pub players: [String; 2],
    pub scores: [f64; 2],
    /// Seat of the winner, None on a draw
    pub winner: Option<usize>,
    pub turns: usize,
    /// Actions the driver had to pick because the player planned none
    pub substituted_actions: [usize; 2],
    pub invalid_actions: [usize; 2],
    pub forward_model_calls: [u64; 2],
    pub thinking_time: [Duration; 2],
}

/// Play one game from a deal seeded with `seed`.
///
/// Each turn the player to move thinks once on a fresh observation, then
/// the driver asks for one action per action point. A missing action is
/// replaced by a random legal one. The game stops when it is terminal or
/// after `settings.rounds` turns.
pub fn play_game(players: &mut [BoxedPlayer; 2], settings: &MatchSettings, seed: u64) -> Result<GameRecord> {
    let model = AsmacagForwardModel;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut state = GameState::new(settings.parameters.clone(), &mut rng)?;

    let mut record = GameRecord {
        seed,
        players: [players[0].name(), players[1].name()],
        scores: [0.0; 2],
        winner: None,
        turns: 0,
        substituted_actions: [0; 2],
        invalid_actions: [0; 2],
        forward_model_calls: [0; 2],
        thinking_time: [Duration::ZERO; 2],
    };

    if settings.verbose {
        println!("*** Game started with seed {}", seed);
    }

    while record.turns < settings.rounds && !model.is_terminal(state.table()) {
        let seat = state.table().current_player();
        let player = &mut players[seat];

        if settings.verbose {
            println!("\n--- Player {} [{}] turn ---", seat, player.name());
            println!("{}\n", state.table());
        }

        let observation = state.observation(&mut rng);
        let started = Instant::now();
        player.think(&observation, &model, settings.budget);
        let thought = started.elapsed();
        record.thinking_time[seat] += thought;
        if thought > settings.budget {
            log::warn!("{} thought for {:?}, over its {:?} budget", player.name(), thought, settings.budget);
        }

        for index in 0..observation.action_points_per_turn() {
            if model.is_turn_finished(state.table()) || model.is_terminal(state.table()) {
                break;
            }

            let action = match player.action(index) {
                Some(action) => action,
                None => {
                    let Some(action) = state.table().random_action(&mut rng) else {
                        break;
                    };
                    log::debug!("{} planned no action {}, playing {}", player.name(), index, action);
                    record.substituted_actions[seat] += 1;
                    action
                }
            };

            if settings.verbose {
                println!("Player {} selects {}", seat, action);
            }
            if !model.step(state.table_mut(), &action) {
                log::debug!("{} played invalid action {}", player.name(), action);
                record.invalid_actions[seat] += 1;
            }
        }

        model.on_turn_ended(state.table_mut());
        record.turns += 1;
    }

    record.scores = state.table().scores();
    record.winner = state.leader();
    record.forward_model_calls = [players[0].forward_model_calls(), players[1].forward_model_calls()];

    if settings.verbose {
        println!("\n*** Final scores {:?}, winner {:?}", record.scores, record.winner);
    }

    Ok(record)
}

/// Tally of a match between two player kinds.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Standings {
    /// Wins of the first and the second player kind, whatever their seat
    pub wins: [usize; 2],
    pub draws: usize,
    /// Tournament points: 1 per win, 0.5 per draw
    pub points: [f64; 2],
}

impl Standings {
    fn record(&mut self, winner: Option<usize>) {
        match winner {
            Some(kind) => {
                self.wins[kind] += 1;
                self.points[kind] += 1.0;
            }
            None => {
                self.draws += 1;
                self.points[0] += 0.5;
                self.points[1] += 0.5;
            }
        }
    }

    pub fn games(&self) -> usize {
        self.wins[0] + self.wins[1] + self.draws
    }
}

/// Everything a tournament produced, ready to be written as JSON.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TournamentReport {
    pub kinds: [PlayerKind; 2],
    pub settings: MatchSettings,
    pub seed: u64,
    pub standings: Standings,
    /// Games in order; the second kind plays first in odd games
    pub games: Vec<GameRecord>,
}

/// Play `games` games between two player kinds in parallel.
///
/// Seats alternate between games and every game gets fresh players, so
/// games are independent and reproducible from `seed`.
pub fn run_tournament(kinds: [PlayerKind; 2], settings: &MatchSettings, games: usize, seed: u64) -> Result<TournamentReport> {
    let records: Vec<GameRecord> = (0..games)
        .into_par_iter()
        .map(|i| -> Result<GameRecord> {
            let game_seed = seed.wrapping_add(i as u64 * 1000);
            let seats = seating(kinds, i);
            let mut players = [
                seats[0].build(settings.budget, game_seed.wrapping_add(1)),
                seats[1].build(settings.budget, game_seed.wrapping_add(2)),
            ];
            let record = play_game(&mut players, settings, game_seed)?;
            log::info!(
                "game {} ({} vs {}): scores {:?} after {} turns",
                i,
                seats[0],
                seats[1],
                record.scores,
                record.turns
            );
            Ok(record)
        })
        .collect::<Result<_>>()?;

    let mut standings = Standings::default();
    for (i, record) in records.iter().enumerate() {
        // Map the winning seat back to the player kind
        let winner = record.winner.map(|seat| if i % 2 == 0 { seat } else { 1 - seat });
        standings.record(winner);
    }

    Ok(TournamentReport {
        kinds,
        settings: settings.clone(),
        seed,
        standings,
        games: records,
    })
}

/// Seat order for game `index`: kinds swap seats every other game.
fn seating(kinds: [PlayerKind; 2], index: usize) -> [PlayerKind; 2] {
    if index % 2 == 0 {
        kinds
    } else {
        [kinds[1], kinds[0]]
    }
}
