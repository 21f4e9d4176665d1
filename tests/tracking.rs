use ptrack::bbox::BBox;
use ptrack::{Detection, Error, ObjectId, PositionTracker, TrackerConfig, Tracking};

fn det(x: f32, y: f32) -> Detection {
    Detection::new(BBox::ltwh(x, y, 5.0, 5.0), 0, 0.9)
}

fn ids(dets: &[Detection]) -> Vec<ObjectId> {
    dets.iter().map(|d| d.object_id).collect()
}

fn run<T: Tracking>(tracker: &mut T, frames: Vec<Vec<Detection>>) -> Vec<Vec<ObjectId>> {
    frames
        .into_iter()
        .map(|mut frame| {
            tracker.update(&mut frame);
            ids(&frame)
        })
        .collect()
}

#[test]
fn test_documented_scenario() {
    let mut tracker = PositionTracker::new();

    let out = tracker.add_frame(vec![det(10.0, 10.0)]);
    assert_eq!(ids(&out), vec![1]);
    assert_eq!(tracker.len(), 1);

    let out = tracker.add_frame(vec![det(12.0, 10.0)]);
    assert_eq!(ids(&out), vec![1]);
    assert_eq!(tracker.len(), 1);

    for _ in 3..=12 {
        tracker.add(&mut []);
    }
    assert_eq!(tracker.most_recent_frame_id(), 12);
    assert!(tracker.get(1).is_ok());

    tracker.add(&mut []);
    assert_eq!(tracker.get(1).unwrap_err(), Error::NotFound(1));
    assert!(tracker.is_empty());
}

#[test]
fn test_ids_are_monotonic_and_never_reused() {
    let mut tracker = PositionTracker::new();
    tracker.set_age_of_objects_before_deletion(2);

    let mut seen = Vec::new();
    for round in 0..5 {
        let out = tracker.add_frame(vec![det(0.0, 0.0), det(500.0, 500.0)]);
        seen.extend(ids(&out));

        // let both objects age out before the next round
        for _ in 0..3 {
            tracker.add(&mut []);
        }
        assert!(tracker.is_empty(), "round {}", round);
    }

    let expected: Vec<ObjectId> = (1..=10).collect();
    assert_eq!(seen, expected);
    assert_eq!(tracker.most_recent_object_id(), 10);
}

#[test]
fn test_stable_identity_under_small_motion() {
    let mut tracker = PositionTracker::new();

    let frames = (0..30)
        .map(|i| vec![det(10.0 + i as f32 * 7.0, 20.0), det(400.0, 10.0 + i as f32 * 9.0)])
        .collect();

    let out = run(&mut tracker, frames);

    assert!(out.iter().all(|frame| frame == &vec![1, 2]));
    assert_eq!(tracker.len(), 2);
}

#[test]
fn test_jump_beyond_threshold_gets_new_identity() {
    let mut tracker = PositionTracker::new();

    let out = run(
        &mut tracker,
        vec![vec![det(0.0, 0.0)], vec![det(100.0, 0.0)], vec![det(200.5, 0.0)]],
    );

    // exactly 100px still matches, 100.5px does not
    assert_eq!(out, vec![vec![1], vec![1], vec![2]]);
}

#[test]
fn test_eviction_timing_follows_configured_age() {
    let mut tracker = PositionTracker::new();
    tracker.set_age_of_objects_before_deletion(3);

    tracker.add_frame(vec![det(0.0, 0.0)]);
    for frame in 2..=4 {
        tracker.add(&mut []);
        assert!(tracker.get(1).is_ok(), "frame {}", frame);
    }

    tracker.add(&mut []);
    assert!(matches!(tracker.get(1), Err(Error::NotFound(1))));
}

#[test]
fn test_eviction_disabled_keeps_tracks() {
    let mut tracker = PositionTracker::new();
    tracker.set_age_of_objects_before_deletion(0);

    tracker.add_frame(vec![det(0.0, 0.0)]);
    for _ in 0..100 {
        tracker.add(&mut []);
    }

    assert_eq!(tracker.get(1).unwrap().last_seen_frame_id(), 1);
}

#[test]
fn test_matched_track_is_not_evicted() {
    let mut tracker = PositionTracker::new();
    tracker.set_age_of_objects_before_deletion(1);

    for _ in 0..20 {
        let out = tracker.add_frame(vec![det(0.0, 0.0)]);
        assert_eq!(ids(&out), vec![1]);
    }
}

#[test]
fn test_history_cap_holds_after_every_frame() {
    let config = TrackerConfig {
        maximum_number_of_frames_per_object: 12,
        ..Default::default()
    };
    let mut tracker = PositionTracker::with_config(config).unwrap();

    for i in 0..200u64 {
        let frame_id = i + 1;

        // object 2 drops out every fifth frame
        let mut frame = vec![det(300.0, 300.0)];
        if i % 5 != 0 {
            frame.push(det(i as f32, 0.0));
        }
        let out = tracker.add_frame(frame);

        for track in tracker.tracks() {
            assert!(track.history().len() <= 12);
        }

        let steady = tracker.get(1).unwrap();
        assert_eq!(out[0].object_id, 1);
        assert_eq!(steady.first_seen_frame_id(), 1);
        assert_eq!(steady.history().keys().next_back(), Some(&frame_id));

        if i % 5 != 0 {
            let moving = tracker.get(2).unwrap();
            assert_eq!(out[1].object_id, 2);
            assert_eq!(moving.first_seen_frame_id(), 2);
            assert_eq!(moving.history().keys().next_back(), Some(&frame_id));
        }
    }

    let first = tracker.get(1).unwrap();
    assert_eq!(first.first_seen_frame_id(), 1);
    assert_eq!(first.last_seen_frame_id(), 200);
    assert!(first.missing_frames() > 0);
}

#[test]
fn test_low_confidence_detections_never_match() {
    let mut tracker = PositionTracker::new();
    let weak = || Detection::with_probabilities(BBox::ltwh(10.0, 10.0, 5.0, 5.0), vec![(0, 0.1)]);

    let out = tracker.add_frame(vec![weak()]);
    assert_eq!(ids(&out), vec![1]);
    assert!(tracker.get(1).unwrap().classes().is_empty());

    let out = tracker.add_frame(vec![weak()]);
    assert_eq!(ids(&out), vec![2]);
    assert_eq!(tracker.len(), 2);
}

#[test]
fn test_clear_resets_everything() {
    let mut tracker = PositionTracker::new();
    tracker.set_age_of_objects_before_deletion(4);
    tracker.set_maximum_distance_to_consider(7.0).unwrap();
    tracker.set_maximum_number_of_frames_per_object(20).unwrap();

    tracker.add_frame(vec![det(0.0, 0.0), det(100.0, 0.0)]);
    tracker.add_frame(vec![det(1.0, 0.0)]);

    tracker.clear();

    assert_eq!(tracker.len(), 0);
    assert!(tracker.is_empty());
    assert_eq!(tracker.most_recent_object_id(), 0);
    assert_eq!(tracker.most_recent_frame_id(), 0);
    assert_eq!(tracker.config(), &TrackerConfig::default());
    assert_eq!(tracker.age_of_objects_before_deletion(), 10);
    assert_eq!(tracker.maximum_number_of_frames_per_object(), 90);
    assert_eq!(tracker.maximum_distance_to_consider(), 100.0);

    let out = tracker.add_frame(vec![det(0.0, 0.0)]);
    assert_eq!(ids(&out), vec![1]);
}

#[test]
fn test_trait_exposes_tracks() {
    let mut tracker = PositionTracker::new();
    run(&mut tracker, vec![vec![det(0.0, 0.0), det(200.0, 0.0)]]);

    let tracks = Tracking::tracks(&tracker);
    assert_eq!(tracks.iter().map(|t| t.id()).collect::<Vec<_>>(), vec![1, 2]);
    assert!(Tracking::track(&tracker, 3).is_err());
}
