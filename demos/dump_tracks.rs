//! Replays a detection dump through the position tracker.
//!
//! Every input line holds the JSON array of detections of one frame, e.g.
//! `[{"bbox":[10,10,5,5],"c":0,"p":0.9}]`. An empty line is an empty frame.
//!
//! ```text
//! cargo run --example dump_tracks -- detections.jsonl [config.json]
//! ```

use std::io::BufRead;

use ptrack::{Detection, PositionTracker, TrackerConfig};

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();

    let mut args = std::env::args().skip(1);

    let reader: Box<dyn BufRead> = match args.next() {
        Some(path) if path != "-" => Box::new(std::io::BufReader::new(std::fs::File::open(path)?)),
        _ => Box::new(std::io::BufReader::new(std::io::stdin())),
    };

    let config = match args.next() {
        Some(path) => serde_json::from_reader(std::fs::File::open(path)?)?,
        None => TrackerConfig::default(),
    };

    let mut tracker = PositionTracker::with_config(config)?;

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();

        let detections: Vec<Detection> = if line.is_empty() {
            Vec::new()
        } else {
            match serde_json::from_str(line) {
                Ok(dets) => dets,
                Err(err) => {
                    log::warn!("line {}: wrong file format: {}", lineno + 1, err);
                    continue;
                }
            }
        };

        let detections = tracker.add_frame(detections);

        println!("frame {}: {} detections", tracker.most_recent_frame_id(), detections.len());
        for (idx, det) in detections.iter().enumerate() {
            println!("-> {}/{}: {}", idx + 1, detections.len(), det);
        }
        println!("{}", tracker);
    }

    Ok(())
}
