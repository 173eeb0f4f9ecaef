//! Recorded landmark streams as CSV.
//!
//! One row per landmark, with a header line:
//!
//! ```text
//! t,hand,idx,x,y,z
//! 0.00,0,0,200,400,0
//! 0.00,0,1,160,380,0
//! ...
//! 0.10,,,,,
//! ```
//!
//! `t` is seconds from the start of the recording and must not go backwards.
//! Rows sharing a `t` form one frame, `hand` groups rows into hands and `idx`
//! is the landmark index (0..21). A row with only `t` is a frame with no
//! hands. Lines starting with `#` are ignored.

use std::{
    collections::BTreeMap,
    io,
    time::{Duration, Instant},
};

use csv::{ReaderBuilder, Trim, Writer};

use crate::{
    error::ReplayError,
    types::{HandFrame, Landmark, NUM_LANDMARKS},
};

const HEADER: [&str; 6] = ["t", "hand", "idx", "x", "y", "z"];

/// Rows collected for the frame currently being read.
struct FrameRows {
    secs: f64,
    timestamp: Instant,
    line: usize,
    hands: BTreeMap<usize, BTreeMap<usize, Landmark>>,
}

impl FrameRows {
    fn finish(self) -> Result<HandFrame, ReplayError> {
        let mut hands = Vec::with_capacity(self.hands.len());
        for (hand, points) in self.hands {
            if points.len() != NUM_LANDMARKS {
                return Err(ReplayError::LandmarkCount {
                    line: self.line,
                    hand,
                    count: points.len(),
                });
            }
            hands.push(points.into_values().collect());
        }
        Ok(HandFrame {
            hands,
            timestamp: self.timestamp,
        })
    }
}

/// Parse a recording; frame timestamps are offsets from `start`.
pub fn parse_script(text: &str, start: Instant) -> Result<Vec<HandFrame>, ReplayError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .comment(Some(b'#'))
        .from_reader(text.as_bytes());

    let mut frames = Vec::new();
    let mut current: Option<FrameRows> = None;

    for result in reader.records() {
        let record = result.map_err(|err| ReplayError::Csv {
            line: err.position().map_or(0, |p| p.line() as usize),
            message: err.to_string(),
        })?;
        let line = record.position().map_or(0, |p| p.line() as usize);

        let stamp = record.get(0).unwrap_or_default();
        let (secs, timestamp) = parse_timestamp(stamp, start, line)?;
        match current.as_ref().map(|frame| frame.secs) {
            Some(last) if secs < last => return Err(ReplayError::OutOfOrder { line }),
            Some(last) if secs == last => {}
            _ => {
                if let Some(done) = current.take() {
                    frames.push(done.finish()?);
                }
                current = Some(FrameRows {
                    secs,
                    timestamp,
                    line,
                    hands: BTreeMap::new(),
                });
            }
        }

        let hand_field = record.get(1).unwrap_or_default();
        if hand_field.is_empty() {
            continue;
        }
        let hand = parse_index(hand_field, usize::MAX, line)?;
        let idx = parse_index(record.get(2).unwrap_or_default(), NUM_LANDMARKS, line)?;
        let point = parse_point(&record, line)?;

        if let Some(frame) = current.as_mut() {
            let points = frame.hands.entry(hand).or_default();
            if points.insert(idx, point).is_some() {
                return Err(ReplayError::Index {
                    line,
                    value: idx.to_string(),
                });
            }
        }
    }

    if let Some(done) = current {
        frames.push(done.finish()?);
    }
    Ok(frames)
}

fn parse_timestamp(
    stamp: &str,
    start: Instant,
    line: usize,
) -> Result<(f64, Instant), ReplayError> {
    let bad = || ReplayError::Timestamp {
        line,
        value: stamp.to_string(),
    };
    let secs: f64 = stamp.parse().map_err(|_| bad())?;
    // Rejects negative, NaN and durations too large to represent.
    let offset = Duration::try_from_secs_f64(secs).map_err(|_| bad())?;
    let timestamp = start.checked_add(offset).ok_or_else(bad)?;
    Ok((secs, timestamp))
}

fn parse_index(field: &str, limit: usize, line: usize) -> Result<usize, ReplayError> {
    field
        .parse()
        .ok()
        .filter(|&i| i < limit)
        .ok_or_else(|| ReplayError::Index {
            line,
            value: field.to_string(),
        })
}

fn parse_point(record: &csv::StringRecord, line: usize) -> Result<Landmark, ReplayError> {
    let bad = || ReplayError::Landmark {
        line,
        value: record.iter().skip(3).collect::<Vec<_>>().join(","),
    };
    if record.len() != HEADER.len() {
        return Err(bad());
    }

    let mut point = [0.0f32; 3];
    for (slot, field) in point.iter_mut().zip(record.iter().skip(3)) {
        *slot = field.parse().map_err(|_| bad())?;
    }
    Ok(point)
}

/// Write frames in the format [`parse_script`] reads. Each entry is a time in
/// seconds and the hands seen at that time.
pub fn write_frames<W: io::Write>(
    out: W,
    frames: &[(f64, Vec<Vec<Landmark>>)],
) -> csv::Result<()> {
    let mut writer = Writer::from_writer(out);
    writer.write_record(HEADER)?;

    for (secs, hands) in frames {
        let t = secs.to_string();
        if hands.is_empty() {
            writer.write_record([t.as_str(), "", "", "", "", ""])?;
        }
        for (hand, points) in hands.iter().enumerate() {
            for (idx, [x, y, z]) in points.iter().enumerate() {
                writer.write_record([
                    t.clone(),
                    hand.to_string(),
                    idx.to_string(),
                    x.to_string(),
                    y.to_string(),
                    z.to_string(),
                ])?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}
