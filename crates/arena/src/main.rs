//! Turnplay arena - play ASMACAG matches between turn-planning players.
//!
//! Plays single verbose games or parallel tournaments between any two
//! of the available players and reports the results.

mod matchup;
mod players;

use anyhow::{ensure, Context, Result};
use clap::{Args, Parser, Subcommand};
use matchup::{play_game, run_tournament, MatchSettings};
use players::PlayerKind;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use turnplay_asmacag::AsmacagParameters;

/// ASMACAG arena for turn-planning players.
#[derive(Parser)]
#[command(name = "turnplay-arena")]
#[command(about = "Play ASMACAG games between tree search and baseline players")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single game.
    Play {
        #[command(flatten)]
        table: TableArgs,

        /// Print every turn and action.
        #[arg(short, long)]
        verbose: bool,
    },

    /// Play many games in parallel, alternating seats.
    Tournament {
        #[command(flatten)]
        table: TableArgs,

        /// Number of games to play.
        #[arg(short, long, default_value = "20")]
        games: usize,

        /// Write a JSON report to this file.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Players and rules shared by both commands.
#[derive(Args)]
struct TableArgs {
    /// First player.
    #[arg(long, value_enum, default_value = "mcts")]
    p0: PlayerKind,

    /// Second player.
    #[arg(long, value_enum, default_value = "random")]
    p1: PlayerKind,

    /// Thinking time per turn, in seconds.
    #[arg(short, long, default_value = "1.0")]
    budget: f64,

    /// Maximum number of turns per game.
    #[arg(short, long, default_value = "100")]
    rounds: usize,

    /// Random seed for reproducibility.
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Action points per turn.
    #[arg(long, default_value = "3")]
    action_points: usize,

    /// Cards dealt to each hand.
    #[arg(long, default_value = "9")]
    hand: usize,

    /// Cards dealt to the board.
    #[arg(long, default_value = "20")]
    board: usize,
}

impl TableArgs {
    fn settings(&self, verbose: bool) -> Result<MatchSettings> {
        ensure!(
            self.budget.is_finite() && self.budget >= 0.0,
            "budget must be a non-negative number of seconds, got {}",
            self.budget
        );

        let parameters = AsmacagParameters {
            action_points_per_turn: self.action_points,
            cards_in_hand: self.hand,
            cards_on_board: self.board,
            ..Default::default()
        };
        parameters.validate().context("Invalid game parameters")?;

        Ok(MatchSettings {
            budget: Duration::from_secs_f64(self.budget),
            rounds: self.rounds,
            parameters,
            verbose,
        })
    }
}

fn cmd_play(table: &TableArgs, verbose: bool) -> Result<()> {
    let settings = table.settings(verbose)?;
    let mut players = [
        table.p0.build(settings.budget, table.seed.wrapping_add(1)),
        table.p1.build(settings.budget, table.seed.wrapping_add(2)),
    ];

    println!("{} vs {} with {:?} per turn", players[0].name(), players[1].name(), settings.budget);

    let record = play_game(&mut players, &settings, table.seed)?;

    println!("Turns played: {}", record.turns);
    for seat in 0..2 {
        println!(
            "P{} {:<24} score {:>6.1}  thinking {:.2?}  forward model calls {}",
            seat,
            record.players[seat],
            record.scores[seat],
            record.thinking_time[seat],
            record.forward_model_calls[seat]
        );
    }
    match record.winner {
        Some(seat) => println!("Winner: P{} {}", seat, record.players[seat]),
        None => println!("Draw"),
    }

    Ok(())
}

fn cmd_tournament(table: &TableArgs, games: usize, output: Option<PathBuf>) -> Result<()> {
    let settings = table.settings(false)?;
    let kinds = [table.p0, table.p1];

    println!(
        "Playing {} games: {} vs {} with {:?} per turn",
        games, kinds[0], kinds[1], settings.budget
    );

    let start = Instant::now();
    let report = run_tournament(kinds, &settings, games, table.seed)?;
    let standings = &report.standings;

    println!("\nCompleted in {:.2}s", start.elapsed().as_secs_f64());
    println!("================================================");
    for (i, kind) in kinds.iter().enumerate() {
        println!(
            "{:<16} wins {:>4} ({:.1}%)  points {:.1}",
            kind.to_string(),
            standings.wins[i],
            percentage(standings.wins[i], standings.games()),
            standings.points[i]
        );
    }
    println!("{:<16} {:>9} ({:.1}%)", "draws", standings.draws, percentage(standings.draws, standings.games()));

    if let Some(path) = output {
        let file = File::create(&path).with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &report)
            .with_context(|| format!("Failed to write report to {:?}", path))?;
        println!("Report saved to: {:?}", path);
    }

    Ok(())
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play { table, verbose } => cmd_play(&table, verbose),
        Commands::Tournament { table, games, output } => cmd_tournament(&table, games, output),
    }
}
