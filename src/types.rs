use std::{fmt, time::Instant};

/// One tracked hand point: x/y in frame pixels, z relative depth.
pub type Landmark = [f32; 3];

pub const NUM_LANDMARKS: usize = 21;
pub const WRIST: usize = 0;
pub const MIDDLE_MCP: usize = 9;

#[derive(Clone, Debug)]
pub struct Frame {
    #[allow(dead_code)]
    pub rgba: Vec<u8>,
    pub width: u32,
    #[allow(dead_code)]
    pub height: u32,
    pub timestamp: Instant,
}

/// Detector output for one frame. An empty `hands` means no hand was seen.
#[derive(Clone, Debug)]
pub struct HandFrame {
    pub hands: Vec<Vec<Landmark>>,
    pub timestamp: Instant,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    pub fn tip(self) -> usize {
        match self {
            Finger::Thumb => 4,
            Finger::Index => 8,
            Finger::Middle => 12,
            Finger::Ring => 16,
            Finger::Pinky => 20,
        }
    }

    /// MCP joint; for the thumb this is landmark 2, not the CMC.
    pub fn base(self) -> usize {
        match self {
            Finger::Thumb => 2,
            Finger::Index => 5,
            Finger::Middle => 9,
            Finger::Ring => 13,
            Finger::Pinky => 17,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Finger::Thumb => "thumb",
            Finger::Index => "index",
            Finger::Middle => "middle",
            Finger::Ring => "ring",
            Finger::Pinky => "pinky",
        }
    }
}

/// Extended/curled flag per finger, indexed in `Finger::ALL` order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FingerStates([bool; 5]);

impl FingerStates {
    pub fn new(extended: [bool; 5]) -> Self {
        Self(extended)
    }

    pub fn is_extended(&self, finger: Finger) -> bool {
        self.0[finger as usize]
    }

    pub fn thumb(&self) -> bool {
        self.is_extended(Finger::Thumb)
    }

    pub fn index(&self) -> bool {
        self.is_extended(Finger::Index)
    }

    pub fn middle(&self) -> bool {
        self.is_extended(Finger::Middle)
    }

    pub fn ring(&self) -> bool {
        self.is_extended(Finger::Ring)
    }

    pub fn pinky(&self) -> bool {
        self.is_extended(Finger::Pinky)
    }

    /// Extended fingers excluding the thumb (0..=4).
    pub fn extended_count(&self) -> usize {
        self.0[1..].iter().filter(|&&up| up).count()
    }

    pub fn summary(&self) -> String {
        Finger::ALL
            .iter()
            .map(|&f| {
                let state = if self.is_extended(f) { "up" } else { "down" };
                format!("{}:{state}", f.label())
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Letter {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
}

impl Letter {
    pub fn as_char(self) -> char {
        (b'A' + self as u8) as char
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Candidate letter for one frame. Confidence is a fixed per-rule score.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassificationResult {
    pub letter: Option<Letter>,
    pub confidence: f32,
}

impl ClassificationResult {
    pub fn new(letter: Letter, confidence: f32) -> Self {
        Self {
            letter: Some(letter),
            confidence,
        }
    }

    pub fn none() -> Self {
        Self {
            letter: None,
            confidence: 0.0,
        }
    }

    pub fn display_text(&self) -> String {
        match self.letter {
            Some(letter) => format!("{letter} ({:.0}%)", self.confidence * 100.0),
            None => "-".to_string(),
        }
    }
}

impl Default for ClassificationResult {
    fn default() -> Self {
        Self::none()
    }
}
