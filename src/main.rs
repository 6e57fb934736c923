//! EcoSphere Games headless driver
//!
//! Runs either game without a frontend: the ecosystem with a simple advisor
//! making the player's choices, the catcher on its idle autopilot.

use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;

use clap::{Parser, Subcommand};

use ecosphere_games::catcher::{CatcherState, FrameInput, InputFlags, tick};
use ecosphere_games::eco::{ActionOutcome, DevelopKind, EcoView, Ecosystem, ResourceKind};
use ecosphere_games::{Pace, SeededRandom, Settings};

#[derive(Parser, Debug)]
#[command(name = "ecosphere")]
#[command(about = "Headless runner for the EcoSphere ecosystem sim and the catcher arcade loop")]
struct Cli {
    /// Random seed (overrides the settings file)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// JSON settings file
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Pace preset (overrides the settings file)
    #[arg(long, global = true, value_enum)]
    pace: Option<Pace>,

    /// Sleep between steps at the configured pace
    #[arg(long, global = true)]
    realtime: bool,

    /// Print JSON views instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play the ecosystem simulation until it ends
    Eco {
        /// Stop after this many turns
        #[arg(long, default_value_t = 60)]
        turns: u32,
    },
    /// Play the catcher on autopilot
    Catcher {
        /// Stop after this many frames
        #[arg(long, default_value_t = 10_000)]
        frames: u64,
        /// Runs to play; a run that hits the frame limit ends the session
        #[arg(long, default_value_t = 1)]
        runs: u32,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let mut settings = match &cli.settings {
        Some(path) => match Settings::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };
    if let Some(seed) = cli.seed {
        settings.seed = Some(seed);
    }
    if let Some(pace) = cli.pace {
        settings.pace = pace;
    }

    let rng = match settings.seed {
        Some(seed) => SeededRandom::new(seed),
        None => SeededRandom::from_entropy(),
    };
    log::info!(
        "EcoSphere starting (seed {}, pace {})",
        rng.seed(),
        settings.pace.as_str()
    );

    match &cli.command {
        Command::Eco { turns } => run_eco(rng, &settings, &cli, *turns),
        Command::Catcher { frames, runs } => run_catcher(rng, &settings, &cli, *frames, *runs),
    }
}

fn run_eco(rng: SeededRandom, settings: &Settings, cli: &Cli, turns: u32) -> ExitCode {
    let mut eco = Ecosystem::with_rng_and_log(rng, settings.max_log_entries);

    for _ in 0..turns {
        advise(&mut eco);
        if eco.advance_turn().is_none() {
            break;
        }
        if !print_eco(&eco.view(), cli.json) {
            return ExitCode::FAILURE;
        }
        if eco.is_game_over() {
            break;
        }
        if cli.realtime {
            thread::sleep(settings.tick_interval());
        }
    }

    if !cli.json {
        println!();
        for entry in eco.journal().tail(12) {
            println!("{entry}");
        }
        match eco.outcome() {
            Some(outcome) => println!("\n{}", outcome.message()),
            None => println!("\nStopped after turn {}.", eco.resources().turn),
        }
    }
    ExitCode::SUCCESS
}

/// Pick one player action per turn from what the player can see
fn advise(eco: &mut Ecosystem) {
    let view = eco.view();
    let res = &view.resources;

    if view.can_vote {
        eco.cast_vote(res.stability < 70);
    }

    // Accuse the healthiest neighbor now and then; the corruptor rarely loses health
    if res.turn >= 12 && res.turn % 12 == 0 && res.stability > 40 {
        let suspect = view
            .neighbors
            .iter()
            .filter(|n| view.accusation_targets.contains(&n.index))
            .max_by_key(|n| n.health);
        if let Some(suspect) = suspect {
            eco.accuse(suspect.index);
            return;
        }
    }

    let outcome = if res.energy < 20 {
        eco.gather_resource(ResourceKind::Energy)
    } else if res.water < 20 {
        eco.gather_resource(ResourceKind::Water)
    } else if res.dna < 10 {
        eco.gather_resource(ResourceKind::Dna)
    } else if res.research_level < 4 {
        eco.research()
    } else {
        eco.develop(DevelopKind::Fauna)
    };
    if outcome == ActionOutcome::Declined {
        eco.develop(DevelopKind::Flora);
    }
}

fn print_eco(view: &EcoView, json: bool) -> bool {
    if json {
        return print_json(view);
    }
    let res = &view.resources;
    println!(
        "Turn {:>2} | health {:>3} stability {:>3} bio {:>3} | E {:>3} W {:>3} D {:>3} | research {} ({}%)",
        res.turn,
        res.health,
        res.stability,
        res.biodiversity,
        res.energy,
        res.water,
        res.dna,
        res.research_level,
        view.efficiency_percent
    );
    if let Some(event) = &view.event {
        println!("        event: {} ({} turns left)", event.name, event.turns_remaining);
    }
    if let Some(policy) = &view.policy {
        println!("        policy #{}: {}", policy.id, policy.proposal);
    }
    true
}

fn run_catcher(rng: SeededRandom, settings: &Settings, cli: &Cli, frames: u64, runs: u32) -> ExitCode {
    let mut state = CatcherState::with_rng(rng);
    let keys = InputFlags::default();
    let mut best = 0;
    let input = FrameInput {
        idle_mode: true,
        ..Default::default()
    };

    for run in 1..=runs.max(1) {
        while state.frame < frames {
            let report = tick(&mut state, &input);
            if report.points > 0 && !cli.json {
                println!("frame {:>5}: +{} (score {})", state.frame, report.points, state.score);
            }
            if state.is_game_over() {
                break;
            }
            if cli.realtime {
                thread::sleep(settings.frame_interval());
            }
        }

        if cli.json {
            if !print_json(&state.view()) {
                return ExitCode::FAILURE;
            }
        } else if state.is_game_over() {
            println!("Run {run}: hit a stone on frame {} with score {}", state.frame, state.score);
        } else {
            println!("Run {run}: survived {} frames with score {}", state.frame, state.score);
        }

        best = best.max(state.score);
        // Frame limit reached; only a lost run can be restarted
        if !state.restart(&keys) {
            break;
        }
    }

    if !cli.json && runs > 1 {
        println!("\nBest score: {best}");
    }
    ExitCode::SUCCESS
}

fn print_json<T: serde::Serialize>(value: &T) -> bool {
    match serde_json::to_string(value) {
        Ok(json) => {
            println!("{json}");
            true
        }
        Err(e) => {
            log::error!("Failed to serialize view: {e}");
            false
        }
    }
}
