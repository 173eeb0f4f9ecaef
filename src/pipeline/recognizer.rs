use std::{sync::Arc, thread};

use crossbeam_channel::Receiver;

use crate::{session::LetterSession, types::HandFrame};

/// Feeds every landmark frame into the session, in arrival order. Frames are
/// never skipped here: the hold and cooldown timers need the full sequence.
pub fn start_recognizer(
    session: Arc<LetterSession>,
    hands_rx: Receiver<HandFrame>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || run_worker_loop(&session, hands_rx))
}

fn run_worker_loop(session: &LetterSession, hands_rx: Receiver<HandFrame>) {
    log::info!("letter recognizer started");

    let mut frames = 0usize;
    for frame in hands_rx.iter() {
        frames += 1;
        if let Some(letter) = session.process_frame_at(&frame.hands, frame.timestamp) {
            log::debug!("frame {frames} committed {letter}");
        }
    }

    log::info!("letter recognizer stopped after {frames} frames");
}
