//! Letters spelled with both hands. Anything not matched here falls back to the
//! single-hand table on the first hand.

use super::Rule;
use crate::{
    features::{HandFeatures, planar_distance},
    types::{ClassificationResult, Finger, Letter},
};

/// Default distance between the two index tips, in pixels, that counts as crossed.
pub const INDEX_CROSS_PX: f32 = 50.0;

pub struct HandPair {
    pub first: HandFeatures,
    pub second: HandFeatures,
    pub cross_px: f32,
}

impl HandPair {
    fn counts(&self) -> (usize, usize) {
        (self.first.extended_count(), self.second.extended_count())
    }

    fn index_tip_gap(&self) -> f32 {
        let tip = Finger::Index.tip();
        planar_distance(self.first.landmarks()[tip], self.second.landmarks()[tip])
    }
}

pub const RULES: &[Rule<HandPair>] = &[
    Rule {
        name: "two_fists",
        applies: |p| p.counts() == (0, 0),
        decide: |_| Some(ClassificationResult::new(Letter::A, 0.80)),
    },
    Rule {
        name: "three_across",
        applies: |p| {
            let (a, b) = p.counts();
            a + b == 3
        },
        decide: |_| Some(ClassificationResult::new(Letter::W, 0.70)),
    },
    Rule {
        name: "two_index",
        applies: |p| {
            p.first.fingers.index() && p.second.fingers.index() && p.counts() == (1, 1)
        },
        decide: |p| {
            if p.index_tip_gap() < p.cross_px {
                Some(ClassificationResult::new(Letter::X, 0.70))
            } else {
                Some(ClassificationResult::new(Letter::H, 0.65))
            }
        },
    },
    Rule {
        name: "double_v",
        applies: |p| p.counts() == (2, 2),
        decide: |p| {
            let (a, b) = (p.first.fingers, p.second.fingers);
            if a.index() && a.middle() && b.index() && b.middle() {
                Some(ClassificationResult::new(Letter::W, 0.75))
            } else {
                None
            }
        },
    },
];
