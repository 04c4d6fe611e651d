use crate::cli::render;
use crate::engine::game::GameState;
use colored::Colorize;
use dialoguer::{Input, Select};

const ACTIONS: [&str; 7] = [
    "Move a card",
    "Pick from the pile",
    "Take from the deck",
    "Drop a card (ends turn)",
    "Sort hand",
    "Close the game",
    "Show rules",
];

/// Runs one human turn: the player acts repeatedly until they drop a card
/// or close successfully. Engine rejections are echoed and the menu shown
/// again, with the hand unchanged.
pub fn play_human_turn(game: &mut GameState) {
    announce_turn(game);
    loop {
        print!("{esc}[2J{esc}[1;1H", esc = 27 as char);
        let player = game.current_player();
        println!("*** {}, your cards:", player.name);
        println!("{}", render::hand_line(&player.hand, game.joker_rank));
        println!("{}", render::table_line(game));

        let choice = Select::new()
            .with_prompt("What would you like to do?")
            .items(&ACTIONS)
            .default(0)
            .interact()
            .unwrap();

        let outcome = match choice {
            0 => move_card(game),
            1 => game.pick_from_pile().map(|_| TurnOutcome::Continue),
            2 => game.take_from_deck().map(|_| TurnOutcome::Continue),
            3 => drop_card(game),
            4 => {
                game.current_player_mut().hand.sort();
                Ok(TurnOutcome::Continue)
            }
            5 => close_game(game),
            6 => {
                println!("{}", render::RULES);
                pause();
                Ok(TurnOutcome::Continue)
            }
            _ => unreachable!(),
        };

        match outcome {
            Ok(TurnOutcome::TurnOver) => return,
            Ok(TurnOutcome::Continue) => {}
            Err(message) => {
                println!("{}", format!("ERROR: {message}").red());
                pause();
            }
        }
    }
}

enum TurnOutcome {
    Continue,
    TurnOver,
}

fn move_card(game: &mut GameState) -> Result<TurnOutcome, &'static str> {
    let what = prompt_code("Card to move (rank + suit initial, e.g. 4H)");
    let anchor = prompt_code_or_empty("Move it before which card? (empty = end of hand)");
    game.current_player_mut()
        .hand
        .move_card(&what, anchor.as_deref())?;
    Ok(TurnOutcome::Continue)
}

fn drop_card(game: &mut GameState) -> Result<TurnOutcome, &'static str> {
    let code = prompt_code("Card to drop");
    game.discard(&code)?;
    Ok(TurnOutcome::TurnOver)
}

fn close_game(game: &mut GameState) -> Result<TurnOutcome, &'static str> {
    let code = prompt_code("Card to drop while closing");
    if game.try_close(&code)? {
        Ok(TurnOutcome::TurnOver)
    } else {
        println!(
            "{}",
            "The hand does not close; the dropped card returns to your hand.".red()
        );
        pause();
        Ok(TurnOutcome::Continue)
    }
}

fn prompt_code(prompt: &str) -> String {
    Input::new()
        .with_prompt(prompt)
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().len() == 2 {
                Ok(())
            } else {
                Err("Enter a two-character code like 4H")
            }
        })
        .interact_text()
        .unwrap()
        .trim()
        .to_string()
}

fn prompt_code_or_empty(prompt: &str) -> Option<String> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .validate_with(|input: &String| -> Result<(), &str> {
            let trimmed = input.trim();
            if trimmed.is_empty() || trimmed.len() == 2 {
                Ok(())
            } else {
                Err("Enter a two-character code like 4H, or nothing")
            }
        })
        .interact_text()
        .unwrap();
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn announce_turn(game: &GameState) {
    print!("{esc}[2J{esc}[1;1H", esc = 27 as char);
    let _: String = Input::new()
        .with_prompt(format!(
            "*** {} to play. Hit enter to continue",
            game.current_player().name
        ))
        .allow_empty(true)
        .interact_text()
        .unwrap();
}

fn pause() {
    let _: String = Input::new()
        .with_prompt("Enter to continue")
        .allow_empty(true)
        .interact_text()
        .unwrap();
}
