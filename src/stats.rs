//! Lifetime statistics, persisted as one flat JSON object in `localStorage`.

use serde::{Deserialize, Serialize};

/// Storage key for the stats blob.
pub const STATS_KEY: &str = "wordsearch-stats";

/// Which per-mode counters a finished game updates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatsBucket {
    Easy,
    Medium,
    Hard,
    Custom,
}

/// Field names match the JSON the page has always written; missing fields
/// load as zero. Times are milliseconds, `best_time == 0` means "no best yet".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameStats {
    pub total_games: u32,
    pub total_completed: u32,
    pub total_time: u64,
    pub best_time: u64,
    pub easy_completed: u32,
    pub easy_played: u32,
    pub medium_completed: u32,
    pub medium_played: u32,
    pub hard_completed: u32,
    pub hard_played: u32,
    pub custom_completed: u32,
    pub custom_played: u32,
}

impl GameStats {
    /// Parse a stored blob, falling back to defaults on malformed input.
    pub fn from_json(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_else(|err| {
            log::warn!("discarding unreadable stats: {err}");
            Self::default()
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    fn bucket_mut(&mut self, bucket: StatsBucket) -> (&mut u32, &mut u32) {
        match bucket {
            StatsBucket::Easy => (&mut self.easy_played, &mut self.easy_completed),
            StatsBucket::Medium => (&mut self.medium_played, &mut self.medium_completed),
            StatsBucket::Hard => (&mut self.hard_played, &mut self.hard_completed),
            StatsBucket::Custom => (&mut self.custom_played, &mut self.custom_completed),
        }
    }

    /// (played, completed) for a bucket.
    pub fn bucket(&self, bucket: StatsBucket) -> (u32, u32) {
        match bucket {
            StatsBucket::Easy => (self.easy_played, self.easy_completed),
            StatsBucket::Medium => (self.medium_played, self.medium_completed),
            StatsBucket::Hard => (self.hard_played, self.hard_completed),
            StatsBucket::Custom => (self.custom_played, self.custom_completed),
        }
    }

    pub fn record_game(&mut self, bucket: StatsBucket, elapsed_ms: u64, completed: bool) {
        self.total_games += 1;
        if completed {
            self.total_completed += 1;
            self.total_time += elapsed_ms;
            if self.best_time == 0 || elapsed_ms < self.best_time {
                self.best_time = elapsed_ms;
            }
        }
        let (played, done) = self.bucket_mut(bucket);
        *played += 1;
        if completed {
            *done += 1;
        }
    }

    pub fn average_time_ms(&self) -> u64 {
        if self.total_completed == 0 {
            0
        } else {
            self.total_time / u64::from(self.total_completed)
        }
    }

    pub fn bucket_summary(&self, bucket: StatsBucket) -> String {
        let (played, completed) = self.bucket(bucket);
        format!("{completed} completed / {played} played")
    }
}

/// Zero-padded `MM:SS`, used by the running game clock.
pub fn format_clock(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1000;
    format!("{minutes:02}:{seconds:02}")
}

/// `M:SS`, used on the statistics screen.
pub fn format_short(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1000;
    format!("{minutes}:{seconds:02}")
}

// --- Browser storage ---------------------------------------------------------

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Read stats; an absent key or unavailable storage yields defaults.
pub fn load_stats() -> GameStats {
    local_storage()
        .and_then(|storage| storage.get_item(STATS_KEY).ok().flatten())
        .map(|raw| GameStats::from_json(&raw))
        .unwrap_or_default()
}

pub fn save_stats(stats: &GameStats) {
    let Some(storage) = local_storage() else {
        log::warn!("stats: storage unavailable");
        return;
    };
    match stats.to_json() {
        Ok(raw) => {
            if storage.set_item(STATS_KEY, &raw).is_err() {
                log::warn!("stats: storage set failed");
            }
        }
        Err(err) => log::warn!("stats: encode failed: {err}"),
    }
}

pub fn clear_stats() {
    if let Some(storage) = local_storage() {
        if storage.remove_item(STATS_KEY).is_err() {
            log::warn!("stats: storage remove failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_completed_game() {
        let mut stats = GameStats::default();
        stats.record_game(StatsBucket::Easy, 90_000, true);
        stats.record_game(StatsBucket::Easy, 60_000, true);
        stats.record_game(StatsBucket::Custom, 120_000, true);
        assert_eq!(stats.total_games, 3);
        assert_eq!(stats.total_completed, 3);
        assert_eq!(stats.best_time, 60_000);
        assert_eq!(stats.average_time_ms(), 90_000);
        assert_eq!(stats.bucket(StatsBucket::Easy), (2, 2));
        assert_eq!(stats.bucket_summary(StatsBucket::Custom), "1 completed / 1 played");
    }

    #[test]
    fn test_abandoned_game_skips_time() {
        let mut stats = GameStats::default();
        stats.record_game(StatsBucket::Hard, 5_000, false);
        assert_eq!(stats.total_games, 1);
        assert_eq!(stats.total_completed, 0);
        assert_eq!(stats.best_time, 0);
        assert_eq!(stats.average_time_ms(), 0);
        assert_eq!(stats.bucket(StatsBucket::Hard), (1, 0));
    }

    #[test]
    fn test_json_uses_camel_case_keys() {
        let mut stats = GameStats::default();
        stats.record_game(StatsBucket::Medium, 1_000, true);
        let raw = stats.to_json().unwrap();
        assert!(raw.contains("\"totalGames\":1"));
        assert!(raw.contains("\"mediumCompleted\":1"));
        assert_eq!(GameStats::from_json(&raw), stats);
    }

    #[test]
    fn test_partial_and_malformed_blobs() {
        let partial = GameStats::from_json(r#"{"totalGames":4,"bestTime":30000}"#);
        assert_eq!(partial.total_games, 4);
        assert_eq!(partial.best_time, 30_000);
        assert_eq!(partial.hard_played, 0);
        assert_eq!(GameStats::from_json("not json"), GameStats::default());
        assert_eq!(GameStats::from_json("null"), GameStats::default());
    }

    #[test]
    fn test_time_formats() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(65_999), "01:05");
        assert_eq!(format_short(65_999), "1:05");
        assert_eq!(format_short(600_000), "10:00");
    }
}
