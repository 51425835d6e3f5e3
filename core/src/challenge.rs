use core::time::Duration;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChallengeResult {
    Success,
    Failure,
    Timeout,
}

impl ChallengeResult {
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

/// A live word-unscramble challenge.
///
/// Submitting consumes the challenge, so a resolved challenge can't be submitted twice.
#[derive(Clone, Debug, PartialEq)]
pub struct Challenge {
    target_word: String,
    scrambled_word: String,
    user_input: String,
    deadline: Instant,
}

impl Challenge {
    /// Picks a word uniformly from `words` and scrambles it.
    pub fn start<R, S>(words: &[S], rng: &mut R, now: Instant, time_limit: Duration) -> Result<Self>
    where
        R: Rng + ?Sized,
        S: AsRef<str>,
    {
        let target_word = words
            .choose(rng)
            .ok_or(GameError::EmptyWordList)?
            .as_ref()
            .to_owned();

        let mut letters: Vec<char> = target_word.chars().collect();
        letters.shuffle(rng);
        let scrambled_word = letters.into_iter().collect();

        log::debug!(
            "Challenge started: {:?}, {} seconds",
            scrambled_word,
            time_limit.as_secs()
        );

        Ok(Self {
            target_word,
            scrambled_word,
            user_input: String::new(),
            deadline: now + time_limit,
        })
    }

    pub fn scrambled_word(&self) -> &str {
        &self.scrambled_word
    }

    pub fn user_input(&self) -> &str {
        &self.user_input
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    #[cfg(test)]
    pub(crate) fn target_word(&self) -> &str {
        &self.target_word
    }

    pub fn push_char(&mut self, c: char) {
        self.user_input.push(c);
    }

    pub fn pop_char(&mut self) {
        self.user_input.pop();
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now > self.deadline
    }

    /// Whether the deadline has passed without a submission.
    pub fn tick(&self, now: Instant) -> bool {
        self.is_expired(now)
    }

    /// Whole seconds left, rounded up.
    pub fn seconds_remaining(&self, now: Instant) -> u64 {
        let remaining = self.deadline.saturating_duration_since(now);
        remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0)
    }

    pub fn submit(self, now: Instant) -> ChallengeResult {
        let result = if self.is_expired(now) {
            ChallengeResult::Timeout
        } else if self.user_input.to_lowercase() == self.target_word.to_lowercase() {
            ChallengeResult::Success
        } else {
            ChallengeResult::Failure
        };
        log::debug!("Challenge resolved: {:?}", result);
        result
    }
}
