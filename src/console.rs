use std::io::{self, BufRead, Write};
use std::path::Path;

use log::info;

use crate::display::{print_cards, print_game, print_notice};
use crate::game::{Bucket, CardKey, Command, GameSession, SampleKey};
use crate::parser::load_roster;

const HELP: &str = "\
commands:
  draw               draw a random person
  boom | pam         send the drawn person to a team
  undo               take back the last assignment
  reset              start over with the same roster
  card <key>         reveal a statistic card
  sample <key>       reveal (or re-roll) a sample card
  show               print the teams
  cards              print all cards
  help | quit";

/// A line typed at the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Show,
    Cards,
    Help,
    Quit,
}

/// Parses one prompt line
pub fn parse_input(line: &str) -> Result<Input, String> {
    let mut words = line.split_whitespace();
    let verb = words.next().unwrap_or("").to_lowercase();
    let arg = words.next();

    let input = match (verb.as_str(), arg) {
        ("draw", None) => Input::Command(Command::Draw),
        ("boom", None) | ("pam", None) => Input::Command(Command::Assign(verb.parse::<Bucket>()?)),
        ("undo", None) => Input::Command(Command::Undo),
        ("reset", None) => Input::Command(Command::Reset),
        ("card", Some(key)) => Input::Command(Command::RevealCard(key.parse::<CardKey>()?)),
        ("sample", Some(key)) => Input::Command(Command::RevealSample(key.parse::<SampleKey>()?)),
        ("show", None) => Input::Show,
        ("cards", None) => Input::Cards,
        ("help", None) | ("?", None) => Input::Help,
        ("quit", None) | ("exit", None) => Input::Quit,
        ("", _) => return Err(String::new()),
        _ => return Err(format!("unknown command '{}', type 'help'", line.trim())),
    };
    Ok(input)
}

/// Plays a game in the terminal until `quit` or end of input
pub fn play<P: AsRef<Path>>(csv_path: P, seed: Option<u64>) -> Result<(), Box<dyn std::error::Error>> {
    println!("Loading roster from {}...", csv_path.as_ref().display());
    let roster = load_roster(&csv_path)?;
    println!("Loaded {} people", roster.len());
    if roster.is_empty() {
        println!("The roster is empty, there is nobody to draw.");
    }
    info!("console game started with {} people", roster.len());

    let mut game = GameSession::with_seed(roster, seed);
    print_game(&game.view());
    println!("\n{}", HELP);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        match parse_input(&line) {
            Ok(Input::Command(command)) => {
                let view = game.apply(command);
                match command {
                    Command::RevealCard(_) | Command::RevealSample(_) => {
                        print_cards(&view);
                        print_notice(&view);
                    }
                    _ => print_game(&view),
                }
            }
            Ok(Input::Show) => print_game(&game.view()),
            Ok(Input::Cards) => print_cards(&game.view()),
            Ok(Input::Help) => println!("{}", HELP),
            Ok(Input::Quit) => break,
            Err(message) if message.is_empty() => {}
            Err(message) => println!("{}", message),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_game_commands() {
        assert_eq!(parse_input("draw"), Ok(Input::Command(Command::Draw)));
        assert_eq!(parse_input("  PAM "), Ok(Input::Command(Command::Assign(Bucket::Pam))));
        assert_eq!(parse_input("boom"), Ok(Input::Command(Command::Assign(Bucket::Boom))));
        assert_eq!(
            parse_input("card median_age"),
            Ok(Input::Command(Command::RevealCard(CardKey::MedianAge)))
        );
        assert_eq!(
            parse_input("sample sample5_undrawn"),
            Ok(Input::Command(Command::RevealSample(SampleKey::Sample5Undrawn)))
        );
        assert_eq!(parse_input("quit"), Ok(Input::Quit));
    }

    #[test]
    fn rejects_unknown_input() {
        assert!(parse_input("card").unwrap_err().contains("unknown command"));
        assert!(parse_input("card nope").unwrap_err().contains("unknown card"));
        assert!(parse_input("dance").is_err());
        assert_eq!(parse_input("   "), Err(String::new()));
    }
}
