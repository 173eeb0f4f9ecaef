//! Single-hand letter table.
//!
//! Order is behaviour: the first rule whose guard holds owns the frame, even if
//! its verdict comes back empty, in which case the count fallback applies.
//! Some entries are shadowed by earlier guards and never fire: R by the
//! two-finger rule, E and M by the fists and the pinky rule, T and X by the
//! two-curled rule, Z by the index rule. They stay in place so the table keeps
//! the same shape as the letters it describes.

use super::Rule;
use crate::{
    features::HandFeatures,
    types::{ClassificationResult, Direction, Finger, Letter},
};

/// Confidence used by the extended-count fallback.
pub const FALLBACK_CONFIDENCE: f32 = 0.50;

fn hit(letter: Letter, confidence: f32) -> Option<ClassificationResult> {
    Some(ClassificationResult::new(letter, confidence))
}

pub const RULES: &[Rule<HandFeatures>] = &[
    // Fist shapes.
    Rule {
        name: "fist",
        applies: |f| f.extended_count() == 0 && !f.thumb_extended(),
        decide: |_| hit(Letter::A, 0.80),
    },
    Rule {
        name: "fist_thumb_over",
        applies: |f| f.extended_count() == 0 && f.thumb_extended(),
        decide: |_| hit(Letter::S, 0.75),
    },
    // One finger.
    Rule {
        name: "pinky_only",
        applies: |f| {
            let s = f.fingers;
            s.pinky() && !s.index() && !s.middle() && !s.ring()
        },
        decide: |f| {
            if f.thumb_extended() {
                hit(Letter::Y, 0.90)
            } else {
                hit(Letter::I, 0.85)
            }
        },
    },
    Rule {
        name: "index_only",
        applies: index_only,
        decide: |f| {
            if f.thumb_extended() {
                hit(Letter::L, 0.85)
            } else if f.direction(Finger::Index) == Direction::Up {
                hit(Letter::D, 0.80)
            } else {
                hit(Letter::G, 0.75)
            }
        },
    },
    // Two fingers.
    Rule {
        name: "index_middle",
        applies: index_middle_only,
        decide: |f| {
            let spread = f.distances.index_middle;
            if spread > 0.5 {
                hit(Letter::V, 0.90)
            } else if spread < 0.3 {
                if f.thumb_extended() {
                    hit(Letter::K, 0.75)
                } else {
                    hit(Letter::U, 0.80)
                }
            } else {
                hit(Letter::H, 0.70)
            }
        },
    },
    Rule {
        name: "crossed",
        applies: index_middle_only,
        decide: |f| {
            if f.distances.index_middle < 0.25 {
                hit(Letter::R, 0.75)
            } else {
                None
            }
        },
    },
    // Three fingers.
    Rule {
        name: "three_up",
        applies: |f| {
            let s = f.fingers;
            s.index() && s.middle() && s.ring() && !s.pinky()
        },
        decide: |_| hit(Letter::W, 0.85),
    },
    // Four fingers.
    Rule {
        name: "flat_hand",
        applies: |f| f.extended_count() == 4 && !f.thumb_extended(),
        decide: |f| {
            if f.distances.index_pinky < 1.0 {
                hit(Letter::B, 0.85)
            } else {
                hit(Letter::B, 0.70)
            }
        },
    },
    Rule {
        name: "open_hand",
        applies: |f| f.extended_count() == 4 && f.thumb_extended(),
        decide: |_| hit(Letter::B, 0.70),
    },
    // Circles and curves.
    Rule {
        name: "circle",
        applies: |f| f.distances.thumb_index < 0.4 && f.extended_count() <= 1,
        decide: |_| hit(Letter::O, 0.80),
    },
    Rule {
        name: "curve",
        applies: |f| f.distances.thumb_index > 0.4 && f.distances.thumb_index < 1.0,
        decide: |f| {
            if f.extended_count() >= 2 && f.distances.thumb_pinky < 1.5 {
                hit(Letter::C, 0.75)
            } else {
                None
            }
        },
    },
    Rule {
        name: "pinch_three_up",
        applies: |f| {
            let s = f.fingers;
            s.middle() && s.ring() && s.pinky() && f.distances.thumb_index < 0.35
        },
        decide: |_| hit(Letter::F, 0.80),
    },
    // Curled subsets.
    Rule {
        name: "curled",
        applies: |f| f.extended_count() == 0,
        decide: |_| hit(Letter::E, 0.70),
    },
    Rule {
        name: "three_down",
        applies: |f| {
            let s = f.fingers;
            !s.index() && !s.middle() && !s.ring()
        },
        decide: |f| {
            if f.fingers.pinky() {
                None
            } else {
                hit(Letter::M, 0.65)
            }
        },
    },
    Rule {
        name: "two_down",
        applies: index_middle_curled,
        decide: |f| {
            if f.fingers.ring() || f.fingers.pinky() {
                hit(Letter::N, 0.65)
            } else {
                None
            }
        },
    },
    Rule {
        name: "thumb_between",
        applies: index_middle_curled,
        decide: |f| {
            if f.distances.thumb_index < 0.4 && f.distances.thumb_middle < 0.5 {
                hit(Letter::T, 0.65)
            } else {
                None
            }
        },
    },
    Rule {
        name: "hooked_index",
        applies: index_middle_curled,
        decide: |f| {
            let hand = f.landmarks();
            let tip = hand[Finger::Index.tip()];
            let pip = hand[Finger::Index.tip() - 2];
            if tip[1] > pip[1] {
                hit(Letter::X, 0.70)
            } else {
                None
            }
        },
    },
    // Pointing.
    Rule {
        name: "two_pointing_down",
        applies: |f| f.fingers.index() && f.fingers.middle(),
        decide: |f| pointing_down(f, Letter::P),
    },
    Rule {
        name: "thumb_index_down",
        applies: |f| f.fingers.index() && f.thumb_extended(),
        decide: |f| pointing_down(f, Letter::Q),
    },
    // Static stand-ins for motion letters.
    Rule {
        name: "pinky_hook",
        applies: |f| f.fingers.pinky() && !f.fingers.index(),
        decide: |_| hit(Letter::J, 0.65),
    },
    Rule {
        name: "index_trace",
        applies: index_only,
        decide: |_| hit(Letter::Z, 0.60),
    },
];

fn index_only(f: &HandFeatures) -> bool {
    let s = f.fingers;
    s.index() && !s.middle() && !s.ring() && !s.pinky()
}

fn index_middle_only(f: &HandFeatures) -> bool {
    let s = f.fingers;
    s.index() && s.middle() && !s.ring() && !s.pinky()
}

fn index_middle_curled(f: &HandFeatures) -> bool {
    !f.fingers.index() && !f.fingers.middle()
}

fn pointing_down(f: &HandFeatures, letter: Letter) -> Option<ClassificationResult> {
    if f.direction(Finger::Index) == Direction::Down {
        hit(letter, 0.70)
    } else {
        None
    }
}

/// Coarse guess from the number of extended fingers alone.
pub fn fallback(extended: usize) -> ClassificationResult {
    let letter = match extended {
        0 => Letter::A,
        1 => Letter::D,
        2 => Letter::V,
        3 => Letter::W,
        _ => Letter::B,
    };
    ClassificationResult::new(letter, FALLBACK_CONFIDENCE)
}
