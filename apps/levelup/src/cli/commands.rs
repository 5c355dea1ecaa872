//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.
//! Each command returns a JSON report; `execute` prints it as JSON or text.

use super::{Commands, MissionAction, ScoreAction, WorldAction};
use crate::config::{BackendKind, Config};
use levelup_core::{
    EventBus, KeySchema, LevelUp, LevelUpError, LevelUpEvent, MissionId, Score, StorageBackend,
    WorldId,
};
use serde_json::{Value, json};
use std::path::Path;
use std::sync::{Arc, Mutex};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum size of a score record file (1 MB).
const MAX_SCORE_FILE_SIZE: u64 = 1024 * 1024;

// =============================================================================
// SESSION SETUP
// =============================================================================

/// Progression state opened for one command, plus the events it posts.
pub struct CommandSession {
    pub progress: LevelUp<StorageBackend, EventBus>,
    events: Arc<Mutex<Vec<LevelUpEvent>>>,
}

impl CommandSession {
    /// Open the configured backend and attach an event recorder.
    pub fn open(config: &Config) -> Result<Self, LevelUpError> {
        let store = match config.backend {
            BackendKind::Redb => StorageBackend::open_redb(&config.database)?,
            BackendKind::Memory => StorageBackend::default(),
        };

        let events = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();
        let recorder = Arc::clone(&events);
        bus.subscribe(move |event: &LevelUpEvent| {
            tracing::info!(%event, "progress event");
            if let Ok(mut recorded) = recorder.lock() {
                recorded.push(event.clone());
            }
        });

        let keys = KeySchema::new(config.key_prefix.clone());
        Ok(Self {
            progress: LevelUp::with_keys(store, bus, keys),
            events,
        })
    }

    /// Events posted so far, as display strings.
    pub fn posted_events(&self) -> Vec<String> {
        self.events
            .lock()
            .map(|events| events.iter().map(ToString::to_string).collect())
            .unwrap_or_default()
    }
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Run a command against the configured store and return its report.
pub fn run(command: &Commands, config: &Config) -> Result<Value, LevelUpError> {
    match command {
        Commands::Mission { action } => {
            let mut session = CommandSession::open(config)?;
            cmd_mission(&mut session, action)
        }
        Commands::World { action } => {
            let mut session = CommandSession::open(config)?;
            cmd_world(&mut session, action)
        }
        Commands::Score { action } => match action {
            ScoreAction::Inspect { file } => cmd_score_inspect(file),
        },
    }
}

// =============================================================================
// MISSION COMMANDS
// =============================================================================

/// Execute a mission subcommand.
pub fn cmd_mission(
    session: &mut CommandSession,
    action: &MissionAction,
) -> Result<Value, LevelUpError> {
    let id = match action {
        MissionAction::Complete { id, silent } => {
            let mission = MissionId::new(id.as_str());
            session
                .progress
                .missions()
                .set_completed_with_notify(&mission, true, !silent)?;
            mission
        }
        MissionAction::Revoke { id, silent } => {
            let mission = MissionId::new(id.as_str());
            session
                .progress
                .missions()
                .set_completed_with_notify(&mission, false, !silent)?;
            mission
        }
        MissionAction::SetTimes { id, times } => {
            let mission = MissionId::new(id.as_str());
            session
                .progress
                .missions()
                .set_times_completed(&mission, *times)?;
            mission
        }
        MissionAction::Status { id } => MissionId::new(id.as_str()),
    };

    let missions = session.progress.missions();
    let times_completed = missions.times_completed(&id)?;
    Ok(json!({
        "mission": id.as_str(),
        "times_completed": times_completed,
        "completed": times_completed > 0,
        "events": session.posted_events(),
    }))
}

// =============================================================================
// WORLD COMMANDS
// =============================================================================

/// Execute a world subcommand.
pub fn cmd_world(
    session: &mut CommandSession,
    action: &WorldAction,
) -> Result<Value, LevelUpError> {
    let id = match action {
        WorldAction::Complete { id, silent } => {
            let world = WorldId::new(id.as_str());
            session
                .progress
                .worlds()
                .set_completed_with_notify(&world, true, !silent)?;
            world
        }
        WorldAction::Revoke { id } => {
            let world = WorldId::new(id.as_str());
            session.progress.worlds().set_completed(&world, false)?;
            world
        }
        WorldAction::Reward { id, reward } => {
            let world = WorldId::new(id.as_str());
            session
                .progress
                .worlds()
                .set_reward(&world, reward.as_deref())?;
            world
        }
        WorldAction::Status { id } => WorldId::new(id.as_str()),
    };

    let worlds = session.progress.worlds();
    let completed = worlds.is_completed(&id)?;
    let reward = worlds.assigned_reward(&id)?;
    Ok(json!({
        "world": id.as_str(),
        "completed": completed,
        "reward": reward,
        "events": session.posted_events(),
    }))
}

// =============================================================================
// SCORE COMMANDS
// =============================================================================

/// Parse a score record file and report its normalised form.
pub fn cmd_score_inspect(file: &Path) -> Result<Value, LevelUpError> {
    let metadata = std::fs::metadata(file).map_err(|e| {
        LevelUpError::Io(format!("cannot read '{}': {}", file.display(), e))
    })?;
    if metadata.len() > MAX_SCORE_FILE_SIZE {
        return Err(LevelUpError::Parse(format!(
            "file size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            MAX_SCORE_FILE_SIZE
        )));
    }

    let text = std::fs::read_to_string(file).map_err(|e| {
        LevelUpError::Io(format!("cannot read '{}': {}", file.display(), e))
    })?;
    let record: Value =
        serde_json::from_str(&text).map_err(|e| LevelUpError::Parse(e.to_string()))?;
    let score = Score::from_json(&record)?;

    tracing::debug!(score = score.id(), kind = score.kind().class_name(), "score parsed");
    Ok(json!({ "score": score.to_json() }))
}

// =============================================================================
// TEXT OUTPUT
// =============================================================================

/// Render a report as `key: value` lines.
///
/// Strings print unquoted, arrays print one item per line, and nested
/// objects print as compact JSON.
pub fn render_text(report: &Value) -> String {
    let Value::Object(fields) = report else {
        return format!("{}\n", report);
    };

    let mut out = String::new();
    for (key, value) in fields {
        match value {
            Value::String(s) => out.push_str(&format!("{}: {}\n", key, s)),
            Value::Null => out.push_str(&format!("{}: -\n", key)),
            Value::Array(items) if items.is_empty() => out.push_str(&format!("{}: -\n", key)),
            Value::Array(items) => {
                out.push_str(&format!("{}:\n", key));
                for item in items {
                    match item {
                        Value::String(s) => out.push_str(&format!("  - {}\n", s)),
                        other => out.push_str(&format!("  - {}\n", other)),
                    }
                }
            }
            other => out.push_str(&format!("{}: {}\n", key, other)),
        }
    }
    out
}

// =============================================================================
// TESTS
// =============================================================================
