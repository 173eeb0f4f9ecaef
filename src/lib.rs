//! Alphabet letters from hand landmarks.
//!
//! Per frame, [`gesture::LetterClassifier`] turns one or two hands of 21
//! landmarks into a candidate letter; [`stabilizer::LetterStabilizer`]
//! debounces that stream into committed text. [`session::LetterSession`] ties
//! both together behind one lock for the UI side, and [`pipeline`] runs it on
//! worker threads fed by any [`pipeline::HandDetector`].
//!
//! The bundled binary replays recorded landmarks ([`replay`]) straight into the
//! recognizer stage; the detector stage is for embedders that bring a camera
//! and a landmark model.

pub mod config;
pub mod error;
pub mod features;
pub mod gesture;
pub mod pipeline;
pub mod replay;
pub mod session;
pub mod stabilizer;
pub mod types;

#[cfg(test)]
mod test_support;
