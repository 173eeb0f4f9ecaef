//! Synthetic hands and a hand-driven clock for tests.
//!
//! `HandBuilder::fist()` lays out a right hand in pixel space with the wrist at
//! (200, 400) and the middle MCP at (200, 300), so palm size is exactly 100 and
//! normalized distances read as tip distance / 100.
//!
//! Finger columns: index x=170, middle x=200, ring x=230, pinky x=260.
//! Curled tips sit at y=290 (below the PIP at y=260), extended tips at y=220.
//! The tucked thumb tip is at (140, 330), the extended one at (100, 320).

use std::{
    sync::Mutex,
    time::{Duration, Instant},
};

use crate::{
    stabilizer::Clock,
    types::{Finger, Landmark, NUM_LANDMARKS},
};

#[derive(Clone, Debug)]
pub struct HandBuilder {
    points: [Landmark; NUM_LANDMARKS],
}

impl HandBuilder {
    pub fn fist() -> Self {
        let mut points = [[0.0f32; 3]; NUM_LANDMARKS];
        points[0] = [200.0, 400.0, 0.0];
        points[1] = [160.0, 380.0, 0.0];
        points[2] = [140.0, 360.0, 0.0];
        points[3] = [120.0, 340.0, 0.0];
        points[4] = [140.0, 330.0, 0.0];

        for (finger, x) in [
            (Finger::Index, 170.0),
            (Finger::Middle, 200.0),
            (Finger::Ring, 230.0),
            (Finger::Pinky, 260.0),
        ] {
            let base = finger.base();
            points[base] = [x, 300.0, 0.0];
            points[base + 1] = [x, 260.0, 0.0];
            points[base + 2] = [x, 280.0, 0.0];
            points[base + 3] = [x, 290.0, 0.0];
        }

        Self { points }
    }

    pub fn open_palm() -> Self {
        Self::fist()
            .extend(Finger::Index)
            .extend(Finger::Middle)
            .extend(Finger::Ring)
            .extend(Finger::Pinky)
    }

    pub fn extend(mut self, finger: Finger) -> Self {
        if finger == Finger::Thumb {
            return self.thumb_out();
        }
        let base = finger.base();
        let x = self.points[base][0];
        self.points[base + 2] = [x, 240.0, 0.0];
        self.points[base + 3] = [x, 220.0, 0.0];
        self
    }

    pub fn thumb_out(mut self) -> Self {
        self.points[Finger::Thumb.tip()] = [100.0, 320.0, 0.0];
        self
    }

    pub fn set(mut self, index: usize, x: f32, y: f32) -> Self {
        self.points[index] = [x, y, 0.0];
        self
    }

    pub fn offset(mut self, dx: f32, dy: f32) -> Self {
        for p in self.points.iter_mut() {
            p[0] += dx;
            p[1] += dy;
        }
        self
    }

    pub fn build(self) -> Vec<Landmark> {
        self.points.to_vec()
    }
}

/// Clock that only moves when told to.
pub struct ManualClock {
    start: Instant,
    offset: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }

    pub fn start(&self) -> Instant {
        self.start
    }

    pub fn set_millis(&self, millis: u64) {
        *self.offset.lock().unwrap() = Duration::from_millis(millis);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.start + *self.offset.lock().unwrap()
    }
}

/// `start + millis`, for feeding explicit timestamps.
pub fn at(start: Instant, millis: u64) -> Instant {
    start + Duration::from_millis(millis)
}
