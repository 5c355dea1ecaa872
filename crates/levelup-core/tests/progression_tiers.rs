//! # Progression Tier Tests (T0-T3)
//!
//! End-to-end behaviour of the public API.
//!
//! ## Tiers
//! - T0: Mission counters
//! - T1: World completion and rewards
//! - T2: Range scores
//! - T3: Persistent storage

use levelup_core::{
    KeyValueStore, LevelUp, LevelUpError, LevelUpEvent, MemoryStore, MissionId, Range, Score,
    WorldId,
};
use std::sync::mpsc;

fn channel_progress() -> (
    LevelUp<MemoryStore, mpsc::Sender<LevelUpEvent>>,
    mpsc::Receiver<LevelUpEvent>,
) {
    let (tx, rx) = mpsc::channel();
    (LevelUp::in_memory(tx), rx)
}

// =============================================================================
// TIER T0: MISSION COUNTERS
// =============================================================================

mod t0_mission_counters {
    use super::*;

    /// T0.1: Repeated completions accumulate; a silent revoke posts nothing.
    #[test]
    fn boss_scenario() {
        let (mut progress, rx) = channel_progress();
        let boss = MissionId::new("boss1");

        progress.missions().set_completed(&boss, true).expect("first");
        progress.missions().set_completed(&boss, true).expect("second");
        progress
            .missions()
            .set_completed_with_notify(&boss, false, false)
            .expect("silent revoke");

        assert_eq!(progress.missions().times_completed(&boss).expect("read"), 1);
        assert!(progress.missions().is_completed(&boss).expect("read"));

        let events: Vec<_> = rx.try_iter().collect();
        let completed = LevelUpEvent::MissionCompleted { mission_id: boss };
        assert_eq!(events, vec![completed.clone(), completed]);
    }

    /// T0.2: The counter never goes negative.
    #[test]
    fn revoke_clamps_at_zero() {
        let (mut progress, rx) = channel_progress();
        let m = MissionId::new("m");

        for _ in 0..3 {
            progress.missions().set_completed(&m, false).expect("revoke");
        }

        assert_eq!(progress.missions().times_completed(&m).expect("read"), 0);
        // One revocation event per call, clamp or not.
        assert_eq!(rx.try_iter().count(), 3);
    }

    /// T0.3: A corrupt counter is surfaced instead of reset.
    #[test]
    fn corrupt_counter_propagates() {
        let mut store = MemoryStore::new();
        store
            .set("levelup.missions.m.timesCompleted", "-1")
            .expect("set");
        let mut progress = LevelUp::new(store, ());

        let result = progress.missions().is_completed(&MissionId::new("m"));
        assert!(matches!(result, Err(LevelUpError::CorruptValue { .. })));
    }
}

// =============================================================================
// TIER T1: WORLDS
// =============================================================================

mod t1_worlds {
    use super::*;

    /// T1.1: Completion posts once, re-completion posts nothing, un-completion posts nothing.
    #[test]
    fn completion_lifecycle() {
        let (mut progress, rx) = channel_progress();
        let w = WorldId::new("w");

        assert!(!progress.worlds().is_completed(&w).expect("read"));

        progress.worlds().set_completed(&w, true).expect("complete");
        progress.worlds().set_completed(&w, true).expect("again");
        assert!(progress.worlds().is_completed(&w).expect("read"));
        assert_eq!(
            rx.try_iter().collect::<Vec<_>>(),
            vec![LevelUpEvent::WorldCompleted {
                world_id: w.clone()
            }]
        );

        progress.worlds().set_completed(&w, false).expect("uncomplete");
        assert!(!progress.worlds().is_completed(&w).expect("read"));
        assert_eq!(rx.try_iter().count(), 0);
    }

    /// T1.2: Assigning and clearing a reward both notify.
    #[test]
    fn reward_assignment() {
        let (mut progress, rx) = channel_progress();
        let w = WorldId::new("w");

        progress.worlds().set_reward(&w, Some("r1")).expect("assign");
        assert_eq!(
            progress.worlds().assigned_reward(&w).expect("read").as_deref(),
            Some("r1")
        );

        progress.worlds().set_reward(&w, Some("")).expect("clear");
        assert_eq!(progress.worlds().assigned_reward(&w).expect("read"), None);

        assert_eq!(rx.try_iter().count(), 2);
    }

    /// T1.3: Worlds and missions never collide in the store.
    #[test]
    fn same_id_is_independent_across_kinds() {
        let mut progress = LevelUp::in_memory(());
        progress
            .missions()
            .set_completed(&MissionId::new("x"), true)
            .expect("mission");

        assert!(!progress.worlds().is_completed(&WorldId::new("x")).expect("read"));
    }
}

// =============================================================================
// TIER T2: RANGE SCORES
// =============================================================================

mod t2_range_scores {
    use super::*;
    use serde_json::json;

    /// T2.1: Range validation is strict.
    #[test]
    fn range_validation() {
        assert!(matches!(
            Range::new(10.0, 5.0),
            Err(LevelUpError::InvalidRange { .. })
        ));
        assert!(Range::new(5.0, 10.0).is_ok());
    }

    /// T2.2: Descending scores start at the top of their range.
    #[test]
    fn descending_start_value() {
        let range = Range::new(10.0, 100.0).expect("range");
        let score = Score::range_with_details("time", "Time", false, range);
        assert_eq!(score.start_value(), 100.0);
    }

    /// T2.3: JSON round-trip keeps the bounds.
    #[test]
    fn json_roundtrip() {
        let range = Range::new(10.0, 100.0).expect("range");
        let score = Score::range_with_details("time", "Time", false, range);

        let parsed = Score::range_from_json(&score.to_json()).expect("parse");
        let bounds = parsed.range_bounds().expect("range");
        assert_eq!((bounds.low(), bounds.high()), (10.0, 100.0));
    }

    /// T2.4: Construction from JSON fails without producing a score.
    #[test]
    fn json_construction_errors() {
        assert!(matches!(
            Score::range_from_json(&json!({"itemId": "s", "range": {"high": 1}})),
            Err(LevelUpError::Parse(_))
        ));
        assert!(matches!(
            Score::range_from_json(&json!({"itemId": "s", "range": {"low": 2, "high": 1}})),
            Err(LevelUpError::InvalidRange { .. })
        ));
    }
}

// =============================================================================
// TIER T3: PERSISTENT STORAGE
// =============================================================================

mod t3_persistence {
    use super::*;

    /// T3.1: Mission and world state survive closing the database.
    #[test]
    fn state_survives_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("progress.db");
        let boss = MissionId::new("boss1");
        let w = WorldId::new("w1");

        {
            let mut progress = LevelUp::with_redb(&path, ()).expect("open");
            progress.missions().set_completed(&boss, true).expect("complete");
            progress.worlds().set_completed(&w, true).expect("complete");
            progress.worlds().set_reward(&w, Some("gem")).expect("reward");
        }

        let mut progress = LevelUp::with_redb(&path, ()).expect("reopen");
        assert_eq!(progress.missions().times_completed(&boss).expect("read"), 1);
        assert!(progress.worlds().is_completed(&w).expect("read"));
        assert_eq!(
            progress.worlds().assigned_reward(&w).expect("read").as_deref(),
            Some("gem")
        );
    }
}
