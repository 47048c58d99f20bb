//! Per-context game sessions and the store that owns them.
//!
//! A [`SessionStore`] maps opaque context identifiers to [`GameSession`]s.
//! One whole turn — lookup or creation, the state-machine step, and both
//! history appends — runs under a single exclusive lock over the map, so
//! concurrent guesses against the same context can never interleave their
//! read-then-write of `attempts`, `complete`, or `history`. That also
//! serializes unrelated contexts; acceptable at this game's traffic.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::dictionary::Dictionary;
use crate::scorer;
use crate::types::Message;
use crate::types::TaskState;

/// Fixed secret-word length.
pub const WORD_LENGTH: usize = 5;

/// Valid guesses allowed before the game is lost.
pub const MAX_ATTEMPTS: u32 = 6;

/// One active Wordle game for a single conversation context.
#[derive(Debug)]
pub struct GameSession {
    secret: String,
    attempts: u32,
    max_attempts: u32,
    complete: bool,
    history: Vec<Message>,
}

impl GameSession {
    fn new(secret: String) -> Self {
        Self {
            secret: secret.to_uppercase(),
            attempts: 0,
            max_attempts: MAX_ATTEMPTS,
            complete: false,
            history: Vec::new(),
        }
    }
}

/// Outcome of one processed turn, snapshotted while the store lock is held.
#[derive(Debug)]
pub struct Turn {
    /// The agent's reply, already appended to the session history.
    pub response: Message,
    pub state: TaskState,
    /// Rendered mark sequence; empty when no scoring happened this turn.
    pub feedback: String,
    pub attempts: u32,
    pub max_attempts: u32,
    pub is_complete: bool,
    pub history: Vec<Message>,
}

/// Owns every live [`GameSession`], keyed by context identifier.
pub struct SessionStore<D> {
    dictionary: D,
    sessions: Mutex<HashMap<String, GameSession>>,
}

impl<D: Dictionary> SessionStore<D> {
    pub fn new(dictionary: D) -> Self {
        Self {
            dictionary,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Run one turn for `context_id`: record the inbound message, step the
    /// state machine with `guess` (already trimmed and uppercased), and
    /// return a snapshot of the result. Creates the session on first sight
    /// of a context; a reset command replaces it wholesale.
    pub fn advance(
        &self,
        context_id: &str,
        task_id: &str,
        user_message: Message,
        guess: &str,
    ) -> Turn {
        let mut sessions = lock(&self.sessions);
        let session = sessions
            .entry(context_id.to_string())
            .or_insert_with(|| GameSession::new(self.dictionary.random_word()));

        // The inbound message is recorded even for invalid input.
        session.history.push(user_message);

        // Reset is honored in any state, completed games included;
        // otherwise a finished context could never be restarted.
        if guess.eq_ignore_ascii_case("new game") || guess.eq_ignore_ascii_case("restart") {
            // Discard the session wholesale; the reset request itself stays
            // with the old history.
            *session = GameSession::new(self.dictionary.random_word());
            let text = format!(
                "🎮 New game started! I'm thinking of a {WORD_LENGTH}-letter word. \
                 You have {} attempts. Make your first guess!",
                session.max_attempts
            );
            return finish(session, task_id, text, TaskState::InputRequired, String::new());
        }

        if session.complete {
            let text = format!(
                "The game is complete! The word was **{}**. Type 'new game' to play again.",
                session.secret
            );
            return finish(session, task_id, text, TaskState::Completed, String::new());
        }

        if guess.chars().count() != session.secret.chars().count() {
            let text = format!("❌ Please enter exactly a {WORD_LENGTH}-letter word.");
            return finish(session, task_id, text, TaskState::InputRequired, String::new());
        }

        if !self.dictionary.is_valid(guess) {
            // Invalid words do not consume an attempt.
            let text = "❌ Not a valid word in the dictionary. Try another word!".to_string();
            return finish(session, task_id, text, TaskState::InputRequired, String::new());
        }

        let marks = scorer::score(&session.secret, guess);
        let feedback = scorer::render(&marks);
        session.attempts += 1;

        if scorer::is_winning(&marks) {
            session.complete = true;
            let text = format!(
                "🎉 Congratulations! You guessed the word in {} attempt(s)!\n\n\
                 Feedback: {feedback}\n\nType 'new game' to play again!",
                session.attempts
            );
            return finish(session, task_id, text, TaskState::Completed, feedback);
        }

        if session.attempts >= session.max_attempts {
            session.complete = true;
            let text = format!(
                "😞 Game over! You've used all {} attempts.\n\n\
                 The word was: **{}**\n\nType 'new game' to play again!",
                session.max_attempts, session.secret
            );
            return finish(session, task_id, text, TaskState::Completed, feedback);
        }

        let text = format!(
            "Attempt {}/{}\n\nFeedback: {feedback}\n\n\
             🟩 = correct position\n🟨 = wrong position\n⬛ = not in word\n\n\
             Make your next guess!",
            session.attempts, session.max_attempts
        );
        finish(session, task_id, text, TaskState::InputRequired, feedback)
    }
}

/// Append the agent reply to the session history and snapshot the turn.
fn finish(
    session: &mut GameSession,
    task_id: &str,
    text: String,
    state: TaskState,
    feedback: String,
) -> Turn {
    let response = Message::agent_text(text, task_id);
    session.history.push(response.clone());
    Turn {
        response,
        state,
        feedback,
        attempts: session.attempts,
        max_attempts: session.max_attempts,
        is_complete: session.complete,
        history: session.history.clone(),
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // A poisoned map is still structurally sound; keep serving.
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    /// Deterministic dictionary: a fixed secret plus a set of valid guesses.
    struct FixedDictionary {
        secret: &'static str,
        valid: &'static [&'static str],
    }

    impl Dictionary for FixedDictionary {
        fn is_valid(&self, word: &str) -> bool {
            let word = word.to_uppercase();
            word == self.secret || self.valid.iter().any(|valid| *valid == word)
        }

        fn random_word(&self) -> String {
            self.secret.to_string()
        }
    }

    fn store() -> SessionStore<FixedDictionary> {
        SessionStore::new(FixedDictionary {
            secret: "CRANE",
            valid: &["TRACE", "SPEED", "ALLEY", "ROBOT", "OOZES", "ERASE"],
        })
    }

    fn guess(store: &SessionStore<FixedDictionary>, context: &str, guess: &str) -> Turn {
        let message = Message {
            kind: crate::types::MessageKind::Message,
            role: crate::types::Role::User,
            parts: vec![crate::types::Part::text(guess)],
            message_id: crate::types::new_id(),
            task_id: None,
            metadata: None,
        };
        store.advance(context, "task-1", message, guess)
    }

    #[test]
    fn fresh_sessions_start_clean() {
        let store = store();
        let turn = guess(&store, "ctx", "HI");
        assert_eq!(turn.attempts, 0);
        assert!(!turn.is_complete);
        assert_eq!(turn.state, TaskState::InputRequired);
        // Inbound plus outbound.
        assert_eq!(turn.history.len(), 2);
    }

    #[test]
    fn wrong_length_does_not_consume_an_attempt() {
        let store = store();
        let turn = guess(&store, "ctx", "CRANES");
        assert_eq!(turn.attempts, 0);
        assert_eq!(turn.feedback, "");
        assert_eq!(turn.state, TaskState::InputRequired);
    }

    #[test]
    fn unknown_words_do_not_consume_an_attempt() {
        let store = store();
        let turn = guess(&store, "ctx", "ZZZZZ");
        assert_eq!(turn.attempts, 0);
        assert_eq!(turn.feedback, "");
        assert_eq!(turn.state, TaskState::InputRequired);
        assert!(
            turn.response
                .first_text()
                .unwrap()
                .contains("Not a valid word")
        );
    }

    #[test]
    fn valid_guesses_accumulate_attempts() {
        let store = store();
        assert_eq!(guess(&store, "ctx", "TRACE").attempts, 1);
        assert_eq!(guess(&store, "ctx", "SPEED").attempts, 2);
        let turn = guess(&store, "ctx", "ZZZZZ");
        assert_eq!(turn.attempts, 2);
    }

    #[test]
    fn winning_completes_the_session() {
        let store = store();
        let turn = guess(&store, "ctx", "CRANE");
        assert_eq!(turn.attempts, 1);
        assert!(turn.is_complete);
        assert_eq!(turn.state, TaskState::Completed);
        assert_eq!(turn.feedback, "🟩🟩🟩🟩🟩");
    }

    #[test]
    fn guesses_after_completion_are_inert() {
        let store = store();
        guess(&store, "ctx", "CRANE");
        let turn = guess(&store, "ctx", "TRACE");
        assert_eq!(turn.attempts, 1);
        assert!(turn.is_complete);
        assert_eq!(turn.state, TaskState::Completed);
        assert_eq!(turn.feedback, "");
        assert!(turn.response.first_text().unwrap().contains("**CRANE**"));
    }

    #[test]
    fn sixth_miss_loses_and_reveals_the_secret() {
        let store = store();
        for _ in 0..5 {
            let turn = guess(&store, "ctx", "TRACE");
            assert!(!turn.is_complete);
        }
        let turn = guess(&store, "ctx", "TRACE");
        assert_eq!(turn.attempts, MAX_ATTEMPTS);
        assert!(turn.is_complete);
        assert_eq!(turn.state, TaskState::Completed);
        assert!(turn.response.first_text().unwrap().contains("**CRANE**"));
    }

    #[test]
    fn reset_replaces_the_session() {
        let store = store();
        guess(&store, "ctx", "CRANE");
        let turn = guess(&store, "ctx", "NEW GAME");
        assert_eq!(turn.attempts, 0);
        assert!(!turn.is_complete);
        assert_eq!(turn.state, TaskState::InputRequired);
        // The fresh session opens with only the agent's reply; the reset
        // request itself went down with the old session.
        assert_eq!(turn.history.len(), 1);

        // And the new game is playable.
        let turn = guess(&store, "ctx", "TRACE");
        assert_eq!(turn.attempts, 1);
    }

    #[test]
    fn reset_works_after_a_loss_too() {
        let store = store();
        for _ in 0..6 {
            guess(&store, "ctx", "TRACE");
        }
        assert!(guess(&store, "ctx", "SPEED").is_complete);

        let turn = guess(&store, "ctx", "RESTART");
        assert_eq!(turn.attempts, 0);
        assert!(!turn.is_complete);
        assert_eq!(turn.state, TaskState::InputRequired);
        assert!(turn.response.first_text().unwrap().contains("New game started"));
    }

    #[test]
    fn restart_works_mid_game_too() {
        let store = store();
        guess(&store, "ctx", "TRACE");
        let turn = guess(&store, "ctx", "RESTART");
        assert_eq!(turn.attempts, 0);
        assert!(!turn.is_complete);
    }

    #[test]
    fn contexts_are_independent() {
        let store = store();
        guess(&store, "a", "TRACE");
        guess(&store, "a", "SPEED");
        let turn = guess(&store, "b", "TRACE");
        assert_eq!(turn.attempts, 1);
    }

    #[test]
    fn concurrent_guesses_never_lose_updates() {
        let store = Arc::new(store());
        let mut handles = Vec::new();
        for _ in 0..5 {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                guess(&store, "ctx", "TRACE").attempts
            }));
        }
        let mut seen: Vec<u32> = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![1, 2, 3, 4, 5]);
    }
}
