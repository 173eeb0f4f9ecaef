//! Shared letter-entry session: the recognizer thread writes frames into it,
//! the UI side reads the candidate and edits the committed text.

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Instant,
};

use crate::{
    config::Config,
    gesture::LetterClassifier,
    stabilizer::{Clock, LetterStabilizer, SystemClock},
    types::{ClassificationResult, Landmark, Letter},
};

/// What the UI polls for: the live candidate plus hold feedback.
#[derive(Clone, Debug, PartialEq)]
pub struct CandidateSnapshot {
    pub letter: Option<Letter>,
    pub confidence: f32,
    pub hand_count: usize,
    pub hold_progress: Option<f32>,
}

struct SessionState {
    stabilizer: LetterStabilizer,
    candidate: ClassificationResult,
    hand_count: usize,
}

pub struct LetterSession {
    classifier: LetterClassifier,
    clock: Arc<dyn Clock>,
    state: Mutex<SessionState>,
}

impl LetterSession {
    pub fn new(config: &Config) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &Config, clock: Arc<dyn Clock>) -> Self {
        Self {
            classifier: LetterClassifier::new(config),
            clock,
            state: Mutex::new(SessionState {
                stabilizer: LetterStabilizer::new(config.hold_time, config.cooldown),
                candidate: ClassificationResult::none(),
                hand_count: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Process one frame's hands at the clock's current time.
    pub fn process_frame<H: AsRef<[Landmark]>>(&self, hands: &[H]) -> Option<Letter> {
        self.process_frame_at(hands, self.clock.now())
    }

    /// Process one frame's hands captured at `now`. Returns a newly committed
    /// letter, if this frame completed one.
    pub fn process_frame_at<H: AsRef<[Landmark]>>(
        &self,
        hands: &[H],
        now: Instant,
    ) -> Option<Letter> {
        // Classification is pure; only the stabilizer update needs the lock.
        let result = self.classifier.classify_two_hands(hands);

        let mut state = self.lock();
        state.candidate = result;
        state.hand_count = hands.len();
        state.stabilizer.update(!hands.is_empty(), result, now)
    }

    pub fn current_candidate(&self) -> (Option<Letter>, f32) {
        let state = self.lock();
        (state.candidate.letter, state.candidate.confidence)
    }

    pub fn snapshot(&self) -> CandidateSnapshot {
        let now = self.clock.now();
        let state = self.lock();
        CandidateSnapshot {
            letter: state.candidate.letter,
            confidence: state.candidate.confidence,
            hand_count: state.hand_count,
            hold_progress: state.stabilizer.hold_progress(now),
        }
    }

    pub fn committed_text(&self) -> String {
        self.lock().stabilizer.committed_text().to_string()
    }

    pub fn clear_committed_text(&self) {
        self.lock().stabilizer.clear_text();
        log::info!("committed text cleared");
    }

    /// No-op on an empty buffer.
    pub fn delete_last_character(&self) {
        if let Some(c) = self.lock().stabilizer.delete_last() {
            log::info!("deleted {c:?}");
        }
    }

    pub fn append_space(&self) {
        self.lock().stabilizer.push_char(' ');
    }

    pub fn append_newline(&self) {
        self.lock().stabilizer.push_char('\n');
    }
}
