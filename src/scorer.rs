//! Pure Wordle scorer.
//!
//! Implements the two-pass, count-consuming scoring rule: exact positional
//! matches are settled first and consume an occurrence of their letter, then
//! remaining positions are marked Present only while unconsumed occurrences
//! of that letter are left in the secret. A plain "does the secret contain
//! this letter" check over-awards Present marks when letters repeat.

use std::collections::HashMap;

/// Per-position verdict for one guessed letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Correct,
    Present,
    Absent,
}

impl Mark {
    /// Emoji rendering used in feedback text and the `wordle_feedback`
    /// artifact.
    pub fn symbol(self) -> char {
        match self {
            Mark::Correct => '🟩',
            Mark::Present => '🟨',
            Mark::Absent => '⬛',
        }
    }
}

/// Score `guess` against `secret`, one [`Mark`] per position.
///
/// Both words are case-normalized before comparison. The caller guarantees
/// equal, positive length.
pub fn score(secret: &str, guess: &str) -> Vec<Mark> {
    let secret: Vec<char> = secret.to_uppercase().chars().collect();
    let guess: Vec<char> = guess.to_uppercase().chars().collect();
    debug_assert_eq!(secret.len(), guess.len());

    let mut marks = vec![Mark::Absent; guess.len()];
    let mut remaining: HashMap<char, usize> = HashMap::new();
    for &letter in &secret {
        *remaining.entry(letter).or_insert(0) += 1;
    }

    // First pass: exact matches consume their letter.
    for (i, (&guessed, &actual)) in guess.iter().zip(secret.iter()).enumerate() {
        if guessed == actual {
            marks[i] = Mark::Correct;
            if let Some(count) = remaining.get_mut(&guessed) {
                *count -= 1;
            }
        }
    }

    // Second pass: misplaced letters, only while occurrences remain.
    for (i, &guessed) in guess.iter().enumerate() {
        if marks[i] == Mark::Correct {
            continue;
        }
        match remaining.get_mut(&guessed) {
            Some(count) if *count > 0 => {
                *count -= 1;
                marks[i] = Mark::Present;
            }
            _ => marks[i] = Mark::Absent,
        }
    }

    marks
}

/// Render a mark sequence as its emoji string, e.g. `⬛🟩🟩🟨🟩`.
pub fn render(marks: &[Mark]) -> String {
    marks.iter().map(|mark| mark.symbol()).collect()
}

/// A guess wins when every position is [`Mark::Correct`].
pub fn is_winning(marks: &[Mark]) -> bool {
    marks.iter().all(|&mark| mark == Mark::Correct)
}
