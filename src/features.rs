use crate::types::{Direction, Finger, FingerStates, Landmark, MIDDLE_MCP, NUM_LANDMARKS, WRIST};

/// Default pinch threshold, as a fraction of palm size.
pub const TOUCH_THRESHOLD: f32 = 0.15;

const THUMB_IP: usize = 3;
const THUMB_REACH_RATIO: f32 = 0.8;

/// Tip-to-tip distances divided by palm size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistanceSet {
    pub thumb_index: f32,
    pub thumb_middle: f32,
    pub thumb_ring: f32,
    pub thumb_pinky: f32,
    pub index_middle: f32,
    pub middle_ring: f32,
    pub ring_pinky: f32,
    pub index_pinky: f32,
    /// Wrist to middle MCP, floored at 1.0.
    pub palm_size: f32,
}

/// Everything the letter rules look at for one hand.
#[derive(Clone, Copy, Debug)]
pub struct HandFeatures {
    landmarks: [Landmark; NUM_LANDMARKS],
    pub fingers: FingerStates,
    pub distances: DistanceSet,
}

/// Returns `None` unless the hand has exactly 21 landmarks.
pub fn extract(hand: &[Landmark]) -> Option<HandFeatures> {
    let landmarks: [Landmark; NUM_LANDMARKS] = hand.try_into().ok()?;
    let fingers = finger_states(hand)?;
    let distances = distances(hand)?;
    Some(HandFeatures {
        landmarks,
        fingers,
        distances,
    })
}

pub fn finger_states(hand: &[Landmark]) -> Option<FingerStates> {
    if hand.len() != NUM_LANDMARKS {
        return None;
    }

    let thumb_base = hand[Finger::Thumb.base()];
    let tip_reach = (hand[Finger::Thumb.tip()][0] - thumb_base[0]).abs();
    let ip_reach = (hand[THUMB_IP][0] - thumb_base[0]).abs();

    let mut extended = [false; 5];
    extended[0] = tip_reach > ip_reach * THUMB_REACH_RATIO;
    for finger in &Finger::ALL[1..] {
        let tip = hand[finger.tip()];
        let pip = hand[finger.tip() - 2];
        // Image y grows downward.
        extended[*finger as usize] = tip[1] < pip[1];
    }

    Some(FingerStates::new(extended))
}

pub fn distances(hand: &[Landmark]) -> Option<DistanceSet> {
    if hand.len() != NUM_LANDMARKS {
        return None;
    }

    let palm_size = palm_size(hand);
    let norm = |a: Finger, b: Finger| planar_distance(hand[a.tip()], hand[b.tip()]) / palm_size;

    Some(DistanceSet {
        thumb_index: norm(Finger::Thumb, Finger::Index),
        thumb_middle: norm(Finger::Thumb, Finger::Middle),
        thumb_ring: norm(Finger::Thumb, Finger::Ring),
        thumb_pinky: norm(Finger::Thumb, Finger::Pinky),
        index_middle: norm(Finger::Index, Finger::Middle),
        middle_ring: norm(Finger::Middle, Finger::Ring),
        ring_pinky: norm(Finger::Ring, Finger::Pinky),
        index_pinky: norm(Finger::Index, Finger::Pinky),
        palm_size,
    })
}

fn palm_size(hand: &[Landmark]) -> f32 {
    planar_distance(hand[WRIST], hand[MIDDLE_MCP]).max(1.0)
}

/// Distance in the image plane; z is a relative depth in different units.
pub fn planar_distance(a: Landmark, b: Landmark) -> f32 {
    ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)).sqrt()
}

/// Dominant axis of the base-to-tip vector. Ties go to the vertical axis.
fn direction(hand: &[Landmark; NUM_LANDMARKS], finger: Finger) -> Direction {
    let tip = hand[finger.tip()];
    let base = hand[finger.base()];
    let dx = tip[0] - base[0];
    let dy = tip[1] - base[1];

    if dx.abs() > dy.abs() {
        if dx > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if dy > 0.0 {
        Direction::Down
    } else {
        Direction::Up
    }
}

impl HandFeatures {
    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    pub fn extended_count(&self) -> usize {
        self.fingers.extended_count()
    }

    pub fn thumb_extended(&self) -> bool {
        self.fingers.thumb()
    }

    pub fn direction(&self, finger: Finger) -> Direction {
        direction(&self.landmarks, finger)
    }

    /// True when the two landmarks are closer than `threshold` palm sizes.
    pub fn touching(&self, a: usize, b: usize, threshold: f32) -> bool {
        let (Some(&pa), Some(&pb)) = (self.landmarks.get(a), self.landmarks.get(b)) else {
            return false;
        };
        planar_distance(pa, pb) / self.distances.palm_size < threshold
    }

    pub fn is_pinching(&self, threshold: f32) -> bool {
        self.touching(Finger::Thumb.tip(), Finger::Index.tip(), threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::HandBuilder;

    #[test]
    fn rejects_wrong_landmark_count() {
        let hand = HandBuilder::fist().build();
        assert!(extract(&hand[..20]).is_none());
        let mut long = hand.clone();
        long.push([0.0, 0.0, 0.0]);
        assert!(extract(&long).is_none());
        assert!(extract(&[]).is_none());
    }

    #[test]
    fn short_hands_yield_no_features() {
        let hand = HandBuilder::fist().build();
        for len in [0, 5, 20] {
            assert!(finger_states(&hand[..len]).is_none());
            assert!(distances(&hand[..len]).is_none());
        }
    }

    fn finger_direction(hand: &[Landmark]) -> Direction {
        extract(hand).unwrap().direction(Finger::Index)
    }

    #[test]
    fn curled_fist_has_no_extended_fingers() {
        let hand = HandBuilder::fist().build();
        let features = extract(&hand).unwrap();
        assert_eq!(features.extended_count(), 0);
        assert!(!features.thumb_extended());
    }

    #[test]
    fn detects_each_extended_finger() {
        let hand = HandBuilder::fist()
            .extend(Finger::Index)
            .extend(Finger::Ring)
            .thumb_out()
            .build();
        let fingers = finger_states(&hand).unwrap();
        assert!(fingers.thumb());
        assert!(fingers.index());
        assert!(!fingers.middle());
        assert!(fingers.ring());
        assert!(!fingers.pinky());
        assert_eq!(fingers.extended_count(), 2);
    }

    #[test]
    fn distances_are_normalized_by_palm_size() {
        // Palm is 100px; extended index and middle tips sit 70px apart.
        let hand = HandBuilder::fist()
            .extend(Finger::Index)
            .extend(Finger::Middle)
            .set(Finger::Middle.tip(), 240.0, 220.0)
            .build();
        let d = distances(&hand).unwrap();
        assert!((d.palm_size - 100.0).abs() < 1e-4);
        assert!((d.index_middle - 0.7).abs() < 1e-4);
    }

    #[test]
    fn degenerate_palm_is_floored() {
        let hand = HandBuilder::fist().set(MIDDLE_MCP, 200.0, 400.0).build();
        let d = distances(&hand).unwrap();
        assert_eq!(d.palm_size, 1.0);
        assert!(d.thumb_index.is_finite());
    }

    #[test]
    fn direction_follows_dominant_axis() {
        let up = HandBuilder::fist().extend(Finger::Index).build();
        assert_eq!(finger_direction(&up), Direction::Up);

        let left = HandBuilder::fist()
            .extend(Finger::Index)
            .set(Finger::Index.tip(), 100.0, 255.0)
            .build();
        assert_eq!(finger_direction(&left), Direction::Left);

        let right = HandBuilder::fist()
            .set(Finger::Index.tip(), 260.0, 290.0)
            .build();
        assert_eq!(finger_direction(&right), Direction::Right);

        let down = HandBuilder::fist().set(Finger::Index.tip(), 170.0, 340.0).build();
        assert_eq!(finger_direction(&down), Direction::Down);
    }

    #[test]
    fn pinch_uses_touch_threshold() {
        let pinched = HandBuilder::fist()
            .set(Finger::Thumb.tip(), 160.0, 290.0)
            .build();
        let features = extract(&pinched).unwrap();
        assert!(features.is_pinching(TOUCH_THRESHOLD));

        let open = HandBuilder::fist().build();
        let features = extract(&open).unwrap();
        assert!(!features.is_pinching(TOUCH_THRESHOLD));
        assert!(!features.touching(0, 99, TOUCH_THRESHOLD));
    }
}
