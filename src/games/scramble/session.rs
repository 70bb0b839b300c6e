//! Game state for one unscramble session.
//!
//! The session is driven entirely by the caller: user actions are method
//! calls, and the auto-advance after a correct guess is a deadline that the
//! game loop checks with [`Session::tick`]. Every word change bumps a
//! generation counter, and a scheduled advance only fires while the
//! generation it was scheduled for is still current.

use super::ScrambleConfig;
use crate::words::WordList;
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuessResult
{
    Unknown,
    Correct,
    Incorrect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase
{
    /// Waiting for a guess
    Unanswered,
    /// Correct guess, auto-advance pending
    Correct,
    /// Wrong guess, waiting for a retry, an edit or a reveal
    Incorrect,
    /// Answer shown, waiting for next or skip
    Revealed,
    /// Advanced past the last word; only reset leaves this phase
    Completed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Summary
{
    pub score: u32,
    pub words: usize,
    pub correct: u32,
    pub total_attempts: u32,
    pub accuracy: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance
{
    /// Moved to the word at this index
    Next(usize),
    /// Went past the last word. Reported once per game.
    Completed(Summary),
    Ignored,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct AdvanceTicket
{
    generation: u64,
    index: usize,
}

#[derive(Clone, Copy, Debug)]
struct PendingAdvance
{
    ticket: AdvanceTicket,
    due: Instant,
}

pub struct Session
{
    words: WordList,
    rng: StdRng,
    auto_advance: Duration,
    index: usize,
    shuffled: String,
    input: String,
    revealed: bool,
    result: GuessResult,
    score: u32,
    attempts: u32,
    correct_count: u32,
    total_attempts: u32,
    completed: bool,
    generation: u64,
    pending: Option<PendingAdvance>,
}

/// Uniform Fisher-Yates shuffle of the characters of `word`.
///
/// Every permutation is equally likely, so the original order comes back now
/// and then, more often for short words.
pub fn shuffle_word<R: Rng + ?Sized>(word: &str, rng: &mut R) -> String
{
    let mut letters: Vec<char> = word.chars().collect();
    letters.shuffle(rng);
    letters.into_iter().collect()
}

pub fn accuracy_percent(correct: u32, total: u32) -> u32
{
    if total == 0 {
        return 0;
    }
    ((correct as f64 / total as f64) * 100.0).round() as u32
}

impl Session
{
    pub fn new(words: WordList, config: &ScrambleConfig) -> Self
    {
        let mut rng = config.rng();
        let shuffled = shuffle_word(words.first(), &mut rng);
        tracing::info!(words = words.len(), "session started");
        Self {
            words,
            rng,
            auto_advance: config.auto_advance(),
            index: 0,
            shuffled,
            input: String::new(),
            revealed: false,
            result: GuessResult::Unknown,
            score: 0,
            attempts: 0,
            correct_count: 0,
            total_attempts: 0,
            completed: false,
            generation: 0,
            pending: None,
        }
    }

    pub fn phase(&self) -> Phase
    {
        if self.completed {
            return Phase::Completed;
        }
        if self.revealed {
            return Phase::Revealed;
        }
        match self.result {
            GuessResult::Unknown => Phase::Unanswered,
            GuessResult::Correct => Phase::Correct,
            GuessResult::Incorrect => Phase::Incorrect,
        }
    }

    pub fn index(&self) -> usize
    {
        self.index
    }

    pub fn target(&self) -> &str
    {
        self.words.get(self.index).unwrap_or_else(|| self.words.first())
    }

    pub fn shuffled(&self) -> &str
    {
        &self.shuffled
    }

    /// What the board shows: the answer once revealed, the shuffle otherwise.
    pub fn display(&self) -> &str
    {
        if self.revealed { self.target() } else { self.shuffled() }
    }

    pub fn input(&self) -> &str
    {
        &self.input
    }

    pub fn result(&self) -> GuessResult
    {
        self.result
    }

    pub fn is_revealed(&self) -> bool
    {
        self.revealed
    }

    pub fn is_completed(&self) -> bool
    {
        self.completed
    }

    pub fn score(&self) -> u32
    {
        self.score
    }

    /// Guesses submitted, right or wrong. Skips are not counted here.
    pub fn attempts(&self) -> u32
    {
        self.attempts
    }

    pub fn correct_count(&self) -> u32
    {
        self.correct_count
    }

    /// Guesses plus skips.
    pub fn total_attempts(&self) -> u32
    {
        self.total_attempts
    }

    pub fn accuracy(&self) -> u32
    {
        accuracy_percent(self.correct_count, self.total_attempts)
    }

    /// One-based position of the current word and the list length.
    pub fn progress(&self) -> (usize, usize)
    {
        (self.index + 1, self.words.len())
    }

    pub fn summary(&self) -> Summary
    {
        Summary {
            score: self.score,
            words: self.words.len(),
            correct: self.correct_count,
            total_attempts: self.total_attempts,
            accuracy: self.accuracy(),
        }
    }

    /// Time left before a pending auto-advance fires.
    pub fn auto_advance_in(&self, now: Instant) -> Option<Duration>
    {
        self.pending
            .map(|pending| pending.due.saturating_duration_since(now))
    }

    pub fn accepts_input(&self) -> bool
    {
        matches!(self.phase(), Phase::Unanswered | Phase::Incorrect)
    }

    pub fn can_submit(&self) -> bool
    {
        self.phase() == Phase::Unanswered && !self.input.trim().is_empty()
    }

    pub fn can_reveal(&self) -> bool
    {
        matches!(self.phase(), Phase::Unanswered | Phase::Incorrect)
    }

    pub fn can_advance(&self) -> bool
    {
        self.phase() == Phase::Revealed
    }

    pub fn can_skip(&self) -> bool
    {
        matches!(
            self.phase(),
            Phase::Unanswered | Phase::Incorrect | Phase::Revealed
        )
    }

    pub fn push_char(&mut self, ch: char) -> bool
    {
        if !self.begin_edit() {
            return false;
        }
        self.input.push(ch);
        true
    }

    pub fn pop_char(&mut self) -> bool
    {
        if !self.begin_edit() {
            return false;
        }
        self.input.pop().is_some()
    }

    pub fn clear_input(&mut self) -> bool
    {
        if !self.begin_edit() {
            return false;
        }
        self.input.clear();
        true
    }

    fn begin_edit(&mut self) -> bool
    {
        if !self.accepts_input() {
            return false;
        }
        if self.result == GuessResult::Incorrect {
            self.result = GuessResult::Unknown;
        }
        true
    }

    /// Clears the wrong guess so the player can type a new one.
    pub fn retry(&mut self) -> bool
    {
        if self.phase() != Phase::Incorrect {
            return false;
        }
        self.input.clear();
        self.result = GuessResult::Unknown;
        true
    }

    /// Checks the current input against the target word.
    ///
    /// Returns `None` without touching any counter when the input is blank or
    /// the session is not waiting for a guess. A correct guess schedules the
    /// auto-advance relative to `now`.
    pub fn submit_guess(&mut self, now: Instant) -> Option<GuessResult>
    {
        if !self.can_submit() {
            return None;
        }

        let correct = self.input.to_uppercase() == self.target();
        self.attempts += 1;
        self.total_attempts += 1;

        if correct {
            self.score += 1;
            self.correct_count += 1;
            self.result = GuessResult::Correct;
            self.pending = Some(PendingAdvance {
                ticket: self.ticket(),
                due: now + self.auto_advance,
            });
        } else {
            self.result = GuessResult::Incorrect;
        }

        tracing::debug!(
            index = self.index,
            correct,
            score = self.score,
            total_attempts = self.total_attempts,
            "guess submitted"
        );
        Some(self.result)
    }

    pub fn reveal(&mut self) -> bool
    {
        if !self.can_reveal() {
            return false;
        }
        self.revealed = true;
        self.result = GuessResult::Unknown;
        tracing::debug!(index = self.index, "answer revealed");
        true
    }

    /// Moves to the next word, or completes the game when already on the last
    /// one. The score counter is bumped at submit time, so the summary needs no
    /// adjustment for a correct guess that was still waiting to advance.
    pub fn advance(&mut self) -> Advance
    {
        if self.completed {
            return Advance::Ignored;
        }
        self.pending = None;

        if self.index < self.words.last_index() {
            self.index += 1;
            self.generation += 1;
            self.input.clear();
            self.revealed = false;
            self.result = GuessResult::Unknown;
            self.shuffled = self.shuffle_current();
            tracing::debug!(index = self.index, "advanced to next word");
            return Advance::Next(self.index);
        }

        self.completed = true;
        let summary = self.summary();
        tracing::info!(
            score = summary.score,
            words = summary.words,
            accuracy = summary.accuracy,
            "game complete"
        );
        Advance::Completed(summary)
    }

    /// Counts a skipped word as an attempt, then advances.
    pub fn skip(&mut self) -> Advance
    {
        if !self.can_skip() {
            return Advance::Ignored;
        }
        self.total_attempts += 1;
        tracing::debug!(index = self.index, "word skipped");
        self.advance()
    }

    pub fn reset(&mut self)
    {
        self.index = 0;
        self.generation += 1;
        self.pending = None;
        self.input.clear();
        self.revealed = false;
        self.result = GuessResult::Unknown;
        self.score = 0;
        self.attempts = 0;
        self.correct_count = 0;
        self.total_attempts = 0;
        self.completed = false;
        self.shuffled = shuffle_word(self.words.first(), &mut self.rng);
        tracing::info!("session reset");
    }

    pub fn reshuffle(&mut self) -> bool
    {
        if self.completed {
            return false;
        }
        self.shuffled = self.shuffle_current();
        true
    }

    /// Fires the pending auto-advance once its deadline has passed.
    pub fn tick(&mut self, now: Instant) -> Option<Advance>
    {
        let pending = self.pending?;
        if now < pending.due {
            return None;
        }
        self.pending = None;

        if self.completed || pending.ticket != self.ticket() {
            tracing::debug!(
                scheduled_for = pending.ticket.index,
                index = self.index,
                "dropping stale auto-advance"
            );
            return None;
        }
        Some(self.advance())
    }

    fn shuffle_current(&mut self) -> String
    {
        let word = self.words.get(self.index).unwrap_or_else(|| self.words.first());
        shuffle_word(word, &mut self.rng)
    }

    fn ticket(&self) -> AdvanceTicket
    {
        AdvanceTicket {
            generation: self.generation,
            index: self.index,
        }
    }
}
