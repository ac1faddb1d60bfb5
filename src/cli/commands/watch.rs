//! Watch command - Step through episodes one turn at a time

use std::io::{self, BufRead};

use anyhow::{Context, Result};
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    cli::output::{print_section, print_turn},
    game::Episode,
    identifiers::EpisodeId,
    learning::{LearningParams, LearningStore},
};

#[derive(Parser, Debug)]
#[command(about = "Render episodes turn by turn, waiting for Enter between turns")]
pub struct WatchArgs {
    /// Stop after this many episodes (runs until interrupted otherwise)
    #[arg(long, short = 'g')]
    pub games: Option<usize>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Advance without waiting for Enter
    #[arg(long, default_value_t = false)]
    pub auto: bool,

    /// Start every episode with an empty history
    #[arg(long, default_value_t = false)]
    pub no_carry_history: bool,
}

/// Block until a line is read; `false` once input is closed
fn wait_for_enter(input: &mut impl BufRead) -> Result<bool> {
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    Ok(read > 0)
}

pub fn execute(args: WatchArgs) -> Result<()> {
    let mut store = LearningStore::new(LearningParams::default())?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::seed_from_u64(rand::random::<u64>()),
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut episode_id = EpisodeId::NONE;
    let mut previous: Option<Episode> = None;

    while args.games.is_none_or(|games| episode_id.value() < games as u64) {
        episode_id = episode_id.next();
        print_section(&format!("Episode {episode_id}"));

        let mut episode = match previous.take() {
            Some(prior) if !args.no_carry_history => Episode::continuing(episode_id, prior),
            _ => Episode::new(episode_id),
        };

        loop {
            let report = episode.advance(&mut store, &mut rng);
            print_turn(&report);
            if report.is_terminal() {
                break;
            }
            if !args.auto && !wait_for_enter(&mut input)? {
                return Ok(());
            }
        }

        println!("Pooled states: {}", store.len());
        previous = Some(episode);

        if !args.auto && !wait_for_enter(&mut input)? {
            return Ok(());
        }
    }

    Ok(())
}
