use std::{io::Read, sync::Arc, time::Instant};

use anyhow::{Context, Result};
use crossbeam_channel::bounded;
use gesture_letters::{config::Config, pipeline, replay, session::LetterSession};

/// Replays a recorded landmark CSV (file argument or stdin) through the
/// recognizer and prints the committed text.
fn main() -> Result<()> {
    env_logger::init();

    let config = Config::load().context("failed to load configuration")?;
    log::info!(
        "hold {:?}, cooldown {:?}",
        config.hold_time,
        config.cooldown
    );

    let script = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read landmark CSV {path}"))?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read landmark CSV from stdin")?;
            text
        }
    };

    let frames =
        replay::parse_script(&script, Instant::now()).context("invalid landmark CSV")?;
    log::info!("replaying {} frames", frames.len());

    let session = Arc::new(LetterSession::new(&config));
    let (hands_tx, hands_rx) = bounded(64);
    let worker = pipeline::start_recognizer(session.clone(), hands_rx);

    for frame in frames {
        hands_tx
            .send(frame)
            .context("recognizer stopped early")?;
    }
    drop(hands_tx);

    if worker.join().is_err() {
        anyhow::bail!("recognizer thread panicked");
    }

    println!("{}", session.committed_text());
    Ok(())
}
