//! Runtime configuration, read from `GESTURE_LETTERS_*` environment variables.

use std::time::Duration;

use crate::{
    error::ConfigError,
    features::TOUCH_THRESHOLD,
    gesture::INDEX_CROSS_PX,
    stabilizer::{DEFAULT_COOLDOWN, DEFAULT_HOLD_TIME},
};

const ENV_HOLD_MS: &str = "GESTURE_LETTERS_HOLD_MS";
const ENV_COOLDOWN_MS: &str = "GESTURE_LETTERS_COOLDOWN_MS";
const ENV_TOUCH_THRESHOLD: &str = "GESTURE_LETTERS_TOUCH_THRESHOLD";
const ENV_TWO_HAND_TOUCH_PX: &str = "GESTURE_LETTERS_TWO_HAND_TOUCH_PX";
const ENV_MAX_HANDS: &str = "GESTURE_LETTERS_MAX_HANDS";
const ENV_MIRROR: &str = "GESTURE_LETTERS_MIRROR";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// How long a candidate must be held before it is committed.
    pub hold_time: Duration,
    /// Minimum gap between two commits.
    pub cooldown: Duration,
    /// Pinch threshold as a fraction of palm size. Only the pinch flag in
    /// trace logs reads it; no letter rule depends on it.
    pub touch_threshold: f32,
    /// Index tips closer than this (pixels) read as crossed in two-hand mode.
    pub two_hand_touch_px: f32,
    /// Hands beyond this count are dropped by the detector stage.
    pub max_hands: usize,
    /// Flip x coordinates of detected hands around the frame width.
    pub mirror: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hold_time: DEFAULT_HOLD_TIME,
            cooldown: DEFAULT_COOLDOWN,
            touch_threshold: TOUCH_THRESHOLD,
            two_hand_touch_px: INDEX_CROSS_PX,
            max_hands: 2,
            mirror: false,
        }
    }
}

impl Config {
    /// Load configuration from the process environment and defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key lookup; missing keys keep their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(ms) = parse::<u64, _>(&lookup, ENV_HOLD_MS)? {
            config.hold_time = Duration::from_millis(ms);
        }
        if let Some(ms) = parse::<u64, _>(&lookup, ENV_COOLDOWN_MS)? {
            config.cooldown = Duration::from_millis(ms);
        }
        if let Some(threshold) = parse::<f32, _>(&lookup, ENV_TOUCH_THRESHOLD)? {
            config.touch_threshold = threshold;
        }
        if let Some(px) = parse::<f32, _>(&lookup, ENV_TWO_HAND_TOUCH_PX)? {
            config.two_hand_touch_px = px;
        }
        if let Some(max) = parse::<usize, _>(&lookup, ENV_MAX_HANDS)? {
            config.max_hands = max;
        }
        if let Some(raw) = lookup(ENV_MIRROR) {
            config.mirror = parse_bool(ENV_MIRROR, &raw)?;
        }

        Ok(config)
    }
}

fn parse<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    raw.trim()
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::Invalid { key, value: raw })
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: raw.to_string(),
        }),
    }
}
