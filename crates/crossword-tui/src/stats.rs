use crate::game::SessionSummary;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// How many sessions the history keeps
const HISTORY_LIMIT: usize = 100;

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionResult {
    Completed,
    Abandoned,
}

/// Record of a single solving session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: u64,
    pub list_name: String,
    pub result: SessionResult,
    pub word_count: usize,
    pub words_correct: usize,
    pub hints_used: u32,
    pub max_hints: u32,
    pub time_secs: u64,
    /// Unix timestamp when the session ended
    pub timestamp: u64,
}

/// Totals across all sessions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub total_sessions: usize,
    pub completed: usize,
    pub abandoned: usize,
    pub current_streak: usize,
    pub best_streak: usize,
    pub best_time_secs: Option<u64>,
    /// Time spent on completed puzzles
    pub total_time_secs: u64,
    pub total_hints: u64,
    /// Completed without using a hint
    pub hint_free: usize,
}

impl PlayerStats {
    pub fn avg_time_secs(&self) -> Option<u64> {
        if self.completed > 0 {
            Some(self.total_time_secs / self.completed as u64)
        } else {
            None
        }
    }

    pub fn completion_rate(&self) -> f32 {
        if self.total_sessions > 0 {
            self.completed as f32 / self.total_sessions as f32 * 100.0
        } else {
            0.0
        }
    }
}

/// Loads, updates and persists session stats
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsManager {
    pub player: PlayerStats,
    /// Most recent first
    pub history: Vec<SessionRecord>,
    next_id: u64,
    /// Where to persist; None keeps stats in memory only
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl StatsManager {
    /// Stats that are never written to disk
    pub fn in_memory() -> Self {
        Self {
            next_id: 1,
            ..Self::default()
        }
    }

    /// Get the stats file path
    fn save_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("crossword_stats.json")
    }

    /// Load stats from the default file
    pub fn load() -> Self {
        let path = Self::save_path();
        let mut stats: Self = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                warn!("ignoring unreadable stats file {}: {}", path.display(), e);
                Self::in_memory()
            }),
            Err(_) => Self::in_memory(),
        };
        stats.next_id = stats.next_id.max(1);
        stats.path = Some(path);
        stats
    }

    /// Save stats to file
    pub fn save(&self) {
        let Some(path) = &self.path else {
            return;
        };
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = fs::write(path, json) {
                    warn!("failed to write stats to {}: {}", path.display(), e);
                }
            }
            Err(e) => warn!("failed to serialize stats: {}", e),
        }
    }

    /// Record a finished session and persist
    pub fn record_session(&mut self, summary: &SessionSummary, result: SessionResult) -> &SessionRecord {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        let record = SessionRecord {
            id: self.next_id,
            list_name: summary.list_name.clone(),
            result,
            word_count: summary.word_count,
            words_correct: summary.words_correct,
            hints_used: summary.hints_used,
            max_hints: summary.max_hints,
            time_secs: summary.elapsed_secs,
            timestamp,
        };
        self.next_id += 1;

        let player = &mut self.player;
        player.total_sessions += 1;
        player.total_hints += u64::from(summary.hints_used);
        match result {
            SessionResult::Completed => {
                player.completed += 1;
                player.total_time_secs += summary.elapsed_secs;
                player.current_streak += 1;
                player.best_streak = player.best_streak.max(player.current_streak);
                player.best_time_secs = Some(match player.best_time_secs {
                    Some(best) => best.min(summary.elapsed_secs),
                    None => summary.elapsed_secs,
                });
                if summary.hints_used == 0 {
                    player.hint_free += 1;
                }
            }
            SessionResult::Abandoned => {
                player.abandoned += 1;
                player.current_streak = 0;
            }
        }
        debug!("recorded session {} as {:?}", record.id, result);

        self.history.insert(0, record);
        self.history.truncate(HISTORY_LIMIT);
        self.save();
        &self.history[0]
    }

    pub fn recent_sessions(&self, limit: usize) -> &[SessionRecord] {
        &self.history[..limit.min(self.history.len())]
    }
}

/// Format seconds as MM:SS or HH:MM:SS
pub fn format_time(secs: u64) -> String {
    if secs >= 3600 {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        let secs = secs % 60;
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{:02}:{:02}", mins, secs)
    }
}
