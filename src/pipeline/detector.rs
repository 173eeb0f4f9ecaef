//! Camera frames in, landmark frames out.
//!
//! The landmark model itself is outside this crate; anything implementing
//! [`HandDetector`] can be plugged in, including test stubs.

use std::thread;

use crossbeam_channel::{Receiver, Sender};

use crate::{
    config::Config,
    types::{Frame, HandFrame, Landmark},
};

/// Given an image, return zero or more hands of 21 ordered points each.
pub trait HandDetector: Send + 'static {
    fn detect(&mut self, frame: &Frame) -> anyhow::Result<Vec<Vec<Landmark>>>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DetectorOptions {
    pub max_hands: usize,
    pub mirror: bool,
}

impl From<&Config> for DetectorOptions {
    fn from(config: &Config) -> Self {
        Self {
            max_hands: config.max_hands,
            mirror: config.mirror,
        }
    }
}

pub fn start_detector<D: HandDetector>(
    detector: D,
    options: DetectorOptions,
    frame_rx: Receiver<Frame>,
    hands_tx: Sender<HandFrame>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || run_detector_loop(detector, options, frame_rx, hands_tx))
}

fn run_detector_loop<D: HandDetector>(
    mut detector: D,
    options: DetectorOptions,
    frame_rx: Receiver<Frame>,
    hands_tx: Sender<HandFrame>,
) {
    log::info!(
        "hand detector started (max_hands={}, mirror={})",
        options.max_hands,
        options.mirror
    );

    while let Some(frame) = recv_latest_frame(&frame_rx) {
        let hands = match detector.detect(&frame) {
            Ok(hands) => prepare_hands(hands, &frame, options),
            Err(err) => {
                log::warn!("hand detection failed: {err:?}");
                continue;
            }
        };

        let out = HandFrame {
            hands,
            timestamp: frame.timestamp,
        };
        if hands_tx.send(out).is_err() {
            break;
        }
    }

    log::info!("hand detector stopped");
}

fn recv_latest_frame(frame_rx: &Receiver<Frame>) -> Option<Frame> {
    let mut frame = frame_rx.recv().ok()?;
    // Drop stale frames if detection is still busy to avoid backlog.
    while let Ok(newer) = frame_rx.try_recv() {
        frame = newer;
    }
    Some(frame)
}

fn prepare_hands(
    mut hands: Vec<Vec<Landmark>>,
    frame: &Frame,
    options: DetectorOptions,
) -> Vec<Vec<Landmark>> {
    hands.truncate(options.max_hands);
    if options.mirror {
        let width = frame.width as f32;
        for point in hands.iter_mut().flatten() {
            point[0] = width - point[0];
        }
    }
    hands
}
