//! Local interactive Wordle: same dictionary and scorer as the agent, no
//! server involved.

use std::io::BufRead;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use wordle_agent::Dictionary;
use wordle_agent::MAX_ATTEMPTS;
use wordle_agent::WORD_LENGTH;
use wordle_agent::WordList;
use wordle_agent::scorer;

/// Play Wordle at the terminal.
#[derive(Parser)]
#[command(name = "wordle-play")]
struct Cli {
    /// Newline-delimited word list.
    #[arg(long, default_value = "words.txt")]
    dictionary: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let dictionary = WordList::load(&cli.dictionary).context("loading dictionary")?;
    let secret = dictionary.random_word();

    println!("=====================================");
    println!("🤖 Welcome to Agent Wordle!");
    println!("Try to guess the {WORD_LENGTH}-letter secret word.");
    println!("🟩 = correct, 🟨 = wrong position, ⬛ = not in word.");
    println!("=====================================");

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let mut attempts = 0;

    while attempts < MAX_ATTEMPTS {
        print!(
            "\nAttempt {}/{} — Enter your guess: ",
            attempts + 1,
            MAX_ATTEMPTS
        );
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let guess = line?.trim().to_uppercase();

        if guess.chars().count() != WORD_LENGTH {
            println!("❌ Please enter a {WORD_LENGTH}-letter word.");
            continue;
        }
        if !dictionary.is_valid(&guess) {
            println!("❌ Not a valid word in the dictionary. Try another word!");
            continue;
        }

        let marks = scorer::score(&secret, &guess);
        attempts += 1;
        println!("Feedback: {}", scorer::render(&marks));

        if scorer::is_winning(&marks) {
            println!("🎉 Congratulations! You guessed the word!");
            return Ok(());
        }
    }

    println!("\n😞 Game over! The word was {secret}.");
    Ok(())
}
