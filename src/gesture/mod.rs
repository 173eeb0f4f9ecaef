mod rules;
mod two_hand;

pub use rules::FALLBACK_CONFIDENCE;
pub use two_hand::INDEX_CROSS_PX;

use crate::{
    config::Config,
    features::{self, TOUCH_THRESHOLD},
    types::{ClassificationResult, Landmark},
};

use self::two_hand::HandPair;

/// One entry of a first-match-wins decision table. A rule whose guard holds
/// but whose verdict is `None` still ends the scan.
pub struct Rule<T> {
    pub name: &'static str,
    pub applies: fn(&T) -> bool,
    pub decide: fn(&T) -> Option<ClassificationResult>,
}

/// Scan `rules` in order; returns the owning rule's name and its verdict.
fn first_match<T>(
    rules: &[Rule<T>],
    input: &T,
) -> Option<(&'static str, Option<ClassificationResult>)> {
    rules
        .iter()
        .find(|rule| (rule.applies)(input))
        .map(|rule| (rule.name, (rule.decide)(input)))
}

/// Stateless letter classifier. Safe to share across threads.
#[derive(Clone, Debug)]
pub struct LetterClassifier {
    touch_threshold: f32,
    cross_px: f32,
}

impl Default for LetterClassifier {
    fn default() -> Self {
        Self {
            touch_threshold: TOUCH_THRESHOLD,
            cross_px: INDEX_CROSS_PX,
        }
    }
}

impl LetterClassifier {
    pub fn new(config: &Config) -> Self {
        Self {
            touch_threshold: config.touch_threshold,
            cross_px: config.two_hand_touch_px,
        }
    }

    /// Classify one hand. Anything other than 21 landmarks yields no letter.
    pub fn classify(&self, hand: &[Landmark]) -> ClassificationResult {
        let Some(features) = features::extract(hand) else {
            return ClassificationResult::none();
        };

        let result = match first_match(rules::RULES, &features) {
            Some((name, Some(result))) => {
                log::trace!("rule {name} matched");
                result
            }
            Some((name, None)) => {
                log::trace!("rule {name} owned the pose without a letter, using count fallback");
                rules::fallback(features.extended_count())
            }
            None => rules::fallback(features.extended_count()),
        };

        log::trace!(
            "fingers [{}] pinch={} -> {}",
            features.fingers.summary(),
            features.is_pinching(self.touch_threshold),
            result.display_text()
        );

        result
    }

    /// Classify with up to two hands; only the first two hands are looked at.
    pub fn classify_two_hands<H: AsRef<[Landmark]>>(&self, hands: &[H]) -> ClassificationResult {
        let (first, second) = match hands {
            [] => return ClassificationResult::none(),
            [only] => return self.classify(only.as_ref()),
            [first, second, ..] => (first.as_ref(), second.as_ref()),
        };

        let (Some(a), Some(b)) = (features::extract(first), features::extract(second)) else {
            return self.classify(first);
        };

        let pair = HandPair {
            first: a,
            second: b,
            cross_px: self.cross_px,
        };

        match first_match(two_hand::RULES, &pair) {
            Some((name, Some(result))) => {
                log::trace!("two-hand rule {name} matched -> {}", result.display_text());
                result
            }
            _ => self.classify(first),
        }
    }
}
