//! Debounces the per-frame candidate stream into committed letters.
//!
//! A candidate must be seen continuously for `hold_time` before it is
//! committed, and no two commits may be closer than `cooldown`. After a
//! commit the stabilizer goes back to idle, so holding a letter does not
//! auto-repeat; it has to be held again from scratch.

use std::time::{Duration, Instant};

use crate::types::{ClassificationResult, Letter};

pub const DEFAULT_HOLD_TIME: Duration = Duration::from_millis(500);
pub const DEFAULT_COOLDOWN: Duration = Duration::from_millis(1_000);

/// Source of "now" for the hold and cooldown timers.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pending {
    Idle,
    Holding { letter: Letter, since: Instant },
}

/// Everything the stabilizer carries between frames.
#[derive(Clone, Debug)]
pub struct StabilizerState {
    pub pending: Pending,
    /// `None` until the first commit, so the first letter is never cooled down.
    pub last_commit_at: Option<Instant>,
    pub committed_text: String,
}

impl Default for StabilizerState {
    fn default() -> Self {
        Self {
            pending: Pending::Idle,
            last_commit_at: None,
            committed_text: String::new(),
        }
    }
}

pub struct LetterStabilizer {
    hold_time: Duration,
    cooldown: Duration,
    state: StabilizerState,
}

impl Default for LetterStabilizer {
    fn default() -> Self {
        Self::new(DEFAULT_HOLD_TIME, DEFAULT_COOLDOWN)
    }
}

impl LetterStabilizer {
    pub fn new(hold_time: Duration, cooldown: Duration) -> Self {
        Self {
            hold_time,
            cooldown,
            state: StabilizerState::default(),
        }
    }

    pub fn state(&self) -> &StabilizerState {
        &self.state
    }

    pub fn pending_letter(&self) -> Option<Letter> {
        match self.state.pending {
            Pending::Idle => None,
            Pending::Holding { letter, .. } => Some(letter),
        }
    }

    /// Feed one processed frame. `hands_present` is false when the detector saw
    /// no hand at all. Returns the letter committed by this frame, if any.
    pub fn update(
        &mut self,
        hands_present: bool,
        result: ClassificationResult,
        now: Instant,
    ) -> Option<Letter> {
        if !hands_present {
            if let Pending::Holding { letter, .. } = self.state.pending {
                log::debug!("hand lost, dropping pending {letter}");
            }
            self.state.pending = Pending::Idle;
            return None;
        }

        // A present but unclassified hand keeps the current hold running.
        let letter = result.letter?;

        match self.state.pending {
            Pending::Holding {
                letter: pending,
                since,
            } if pending == letter => {
                if now.saturating_duration_since(since) < self.hold_time {
                    return None;
                }
                if !self.cooled_down(now) {
                    return None;
                }
                self.commit(letter, now);
                Some(letter)
            }
            _ => {
                log::debug!("new candidate {letter}");
                self.state.pending = Pending::Holding { letter, since: now };
                None
            }
        }
    }

    fn cooled_down(&self, now: Instant) -> bool {
        self.state
            .last_commit_at
            .is_none_or(|last| now.saturating_duration_since(last) >= self.cooldown)
    }

    fn commit(&mut self, letter: Letter, now: Instant) {
        self.state.committed_text.push(letter.as_char());
        self.state.last_commit_at = Some(now);
        self.state.pending = Pending::Idle;
        log::info!(
            "committed {letter}, text is now {:?}",
            self.state.committed_text
        );
    }

    /// Fraction of the hold time already spent on the pending letter.
    pub fn hold_progress(&self, now: Instant) -> Option<f32> {
        let Pending::Holding { since, .. } = self.state.pending else {
            return None;
        };
        if self.hold_time.is_zero() {
            return Some(1.0);
        }
        let elapsed = now.saturating_duration_since(since).as_secs_f32();
        Some((elapsed / self.hold_time.as_secs_f32()).min(1.0))
    }

    pub fn committed_text(&self) -> &str {
        &self.state.committed_text
    }

    pub fn clear_text(&mut self) {
        self.state.committed_text.clear();
    }

    /// Removes the last character; returns it, or `None` on an empty buffer.
    pub fn delete_last(&mut self) -> Option<char> {
        self.state.committed_text.pop()
    }

    pub fn push_char(&mut self, c: char) {
        self.state.committed_text.push(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ManualClock, at};

    fn seen(letter: Letter) -> ClassificationResult {
        ClassificationResult::new(letter, 0.8)
    }

    /// Feeds `(millis, letter)` frames with a hand present.
    fn feed(stabilizer: &mut LetterStabilizer, start: Instant, frames: &[(u64, Letter)]) {
        for &(ms, letter) in frames {
            stabilizer.update(true, seen(letter), at(start, ms));
        }
    }

    #[test]
    fn commits_once_hold_time_is_reached() {
        let clock = ManualClock::new();
        let start = clock.start();
        let mut s = LetterStabilizer::default();

        for ms in [0, 100, 300] {
            assert_eq!(s.update(true, seen(Letter::L), at(start, ms)), None);
            assert_eq!(s.committed_text(), "");
        }
        assert_eq!(s.update(true, seen(Letter::L), at(start, 500)), Some(Letter::L));
        assert_eq!(s.committed_text(), "L");

        // The commit put us back to idle; 600 starts a new hold.
        assert_eq!(s.update(true, seen(Letter::L), at(start, 600)), None);
        assert_eq!(s.committed_text(), "L");
    }

    #[test]
    fn scenario_two_commits_respect_cooldown() {
        let clock = ManualClock::new();
        let start = clock.start();
        let mut s = LetterStabilizer::new(
            Duration::from_millis(500),
            Duration::from_millis(1_000),
        );

        feed(
            &mut s,
            start,
            &[(0, Letter::A), (100, Letter::A), (200, Letter::A), (550, Letter::A)],
        );
        assert_eq!(s.committed_text(), "A");

        feed(&mut s, start, &[(600, Letter::A), (1_000, Letter::A)]);
        assert_eq!(s.committed_text(), "A");

        feed(&mut s, start, &[(1_600, Letter::A)]);
        assert_eq!(s.committed_text(), "AA");
    }

    #[test]
    fn ripe_candidate_waits_for_cooldown_without_resetting() {
        let clock = ManualClock::new();
        let start = clock.start();
        let mut s = LetterStabilizer::default();

        feed(&mut s, start, &[(0, Letter::B), (500, Letter::B)]);
        assert_eq!(s.committed_text(), "B");

        // Re-held and ripe at 1100 but the cooldown runs until 1500.
        feed(&mut s, start, &[(600, Letter::B), (1_100, Letter::B), (1_400, Letter::B)]);
        assert_eq!(s.committed_text(), "B");
        assert_eq!(
            s.state().pending,
            Pending::Holding {
                letter: Letter::B,
                since: at(start, 600)
            }
        );

        feed(&mut s, start, &[(1_500, Letter::B)]);
        assert_eq!(s.committed_text(), "BB");
    }

    #[test]
    fn losing_the_hand_restarts_the_hold() {
        let clock = ManualClock::new();
        let start = clock.start();
        let mut s = LetterStabilizer::default();

        feed(&mut s, start, &[(0, Letter::C), (400, Letter::C)]);
        s.update(false, ClassificationResult::none(), at(start, 450));
        assert_eq!(s.pending_letter(), None);

        feed(&mut s, start, &[(500, Letter::C), (900, Letter::C)]);
        assert_eq!(s.committed_text(), "");
        feed(&mut s, start, &[(1_000, Letter::C)]);
        assert_eq!(s.committed_text(), "C");
    }

    #[test]
    fn switching_candidates_discards_progress() {
        let clock = ManualClock::new();
        let start = clock.start();
        let mut s = LetterStabilizer::default();

        feed(&mut s, start, &[(0, Letter::D), (400, Letter::G)]);
        assert_eq!(
            s.state().pending,
            Pending::Holding {
                letter: Letter::G,
                since: at(start, 400)
            }
        );
        feed(&mut s, start, &[(600, Letter::G)]);
        assert_eq!(s.committed_text(), "");
        feed(&mut s, start, &[(900, Letter::G)]);
        assert_eq!(s.committed_text(), "G");
    }

    #[test]
    fn unclassified_hand_keeps_pending_timer() {
        let clock = ManualClock::new();
        let start = clock.start();
        let mut s = LetterStabilizer::default();

        feed(&mut s, start, &[(0, Letter::Y)]);
        s.update(true, ClassificationResult::none(), at(start, 300));
        assert_eq!(s.pending_letter(), Some(Letter::Y));
        feed(&mut s, start, &[(500, Letter::Y)]);
        assert_eq!(s.committed_text(), "Y");
    }

    #[test]
    fn hold_progress_is_clamped() {
        let clock = ManualClock::new();
        let start = clock.start();
        let mut s = LetterStabilizer::default();

        assert_eq!(s.hold_progress(start), None);
        feed(&mut s, start, &[(0, Letter::W)]);
        let half = s.hold_progress(at(start, 250)).unwrap();
        assert!((half - 0.5).abs() < 1e-3);
        assert_eq!(s.hold_progress(at(start, 2_000)), Some(1.0));
    }

    #[test]
    fn buffer_edits() {
        let mut s = LetterStabilizer::default();
        assert_eq!(s.delete_last(), None);
        s.push_char('H');
        s.push_char(' ');
        s.push_char('\n');
        assert_eq!(s.committed_text(), "H \n");
        assert_eq!(s.delete_last(), Some('\n'));
        s.clear_text();
        assert_eq!(s.committed_text(), "");
    }
}
