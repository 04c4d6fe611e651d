pub mod cli;
pub mod engine;

use clap::Parser;
use colored::Colorize;
use crate::cli::transcript::Transcript;
use crate::engine::bot;
use crate::engine::game::GameState;
use dialoguer::Input;
use log::warn;
use std::path::PathBuf;

/// Terminal Rummy: arrange 13 cards into three melds of 3 and one meld of 4,
/// with at least one joker-free run, and close before your opponents do.
#[derive(Parser)]
#[command(name = "rummy", version)]
struct Args {
    /// Player names; prompted for when omitted.
    players: Vec<String>,

    /// Number of computer opponents.
    #[arg(long, default_value_t = 0)]
    bots: usize,

    /// Number of 52-card packs shuffled into the deck.
    #[arg(long, default_value_t = 2)]
    packs: usize,

    /// Play without a designated joker rank.
    #[arg(long)]
    no_joker: bool,

    /// Append every game event as a JSON line to this file.
    #[arg(long)]
    transcript: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut humans = args.players;
    if humans.is_empty() && args.bots == 0 {
        for i in 0..2 {
            let name: String = Input::new()
                .with_prompt(format!("Enter name of Player {i}"))
                .interact_text()
                .unwrap();
            humans.push(name);
        }
    }
    if humans.len() + args.bots < 2 {
        eprintln!("Rummy needs at least two players (humans plus bots).");
        std::process::exit(1);
    }

    let bots: Vec<String> = (0..args.bots).map(|i| format!("Bot {}", i + 1)).collect();
    let mut game = GameState::new(humans, bots, args.packs);
    if let Err(message) = game.start(!args.no_joker) {
        eprintln!("Cannot start the game: {message}");
        std::process::exit(1);
    }

    let mut transcript = match &args.transcript {
        Some(path) => Transcript::create(path).unwrap_or_else(|err| {
            warn!("cannot create transcript at {}: {err}", path.display());
            Transcript::disabled()
        }),
        None => Transcript::disabled(),
    };

    if let Some(card) = game.joker_card {
        println!(
            "The joker draw is {card}: every {} plays as a joker this game.",
            card.rank
        );
    }

    while !game.is_over() {
        transcript.record(&game.drain_events());
        if game.current_player().is_bot {
            let name = game.current_player().name.clone();
            if let Err(message) = bot::play_bot_turn(&mut game) {
                eprintln!("{name} cannot act: {message}");
                break;
            }
            println!("{name} has played.");
        } else {
            cli::turn::play_human_turn(&mut game);
        }
    }
    transcript.record(&game.drain_events());

    if let Some(winner) = game.winner {
        let player = &game.players[winner];
        println!("{}", "*** GAME OVER ***".green());
        println!(
            "*** {} won with {}",
            player.name,
            cli::render::hand_line(&player.hand, game.joker_rank)
        );
    }
}
