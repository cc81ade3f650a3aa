use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A user-created binding of a display name to a catalog zone id.
/// Serialized field names are the persisted schema; changing them is a
/// breaking change (there is no versioning or migration).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteCity {
    pub id: String,
    pub name: String,
    #[serde(rename = "timeZoneId")]
    pub time_zone_id: String,
}

/// Ordered favorites list backed by a single JSON file. The whole sequence
/// is the unit of persistence: every successful mutation rewrites the file
/// synchronously before returning.
pub struct FavoritesStore {
    path: PathBuf,
    cities: Vec<FavoriteCity>,
}

impl FavoritesStore {
    /// Read the persisted sequence. Missing file means a fresh start; a file
    /// that fails to parse is treated the same, with a warning, rather than
    /// refusing to start.
    pub fn load(path: PathBuf) -> Self {
        let cities = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(cities) => cities,
                Err(e) => {
                    log::warn!("Corrupt favorites file {}, starting empty: {}", path.display(), e);
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };
        Self { path, cities }
    }

    pub fn cities(&self) -> &[FavoriteCity] {
        &self.cities
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a favorite. Returns `None` without touching state when the
    /// trimmed name or the zone id is empty.
    pub fn add(&mut self, name: &str, time_zone_id: &str) -> Option<&FavoriteCity> {
        let name = name.trim();
        if name.is_empty() || time_zone_id.is_empty() {
            return None;
        }
        let id = self.fresh_id();
        self.cities.push(FavoriteCity {
            id,
            name: name.to_string(),
            time_zone_id: time_zone_id.to_string(),
        });
        self.persist();
        self.cities.last()
    }

    /// Remove by id. Missing ids are a no-op, not an error.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.cities.len();
        self.cities.retain(|c| c.id != id);
        let removed = self.cities.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    // Ids come from the creation timestamp, bumped until unique so two adds
    // within the same millisecond cannot collide.
    fn fresh_id(&self) -> String {
        let mut stamp = Utc::now().timestamp_millis();
        while self.cities.iter().any(|c| c.id == stamp.to_string()) {
            stamp += 1;
        }
        stamp.to_string()
    }

    // Full rewrite of the whole sequence. Failure keeps the in-memory state;
    // the next successful mutation rewrites everything anyway.
    fn persist(&self) {
        if let Some(parent) = self.path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match serde_json::to_string_pretty(&self.cities) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&self.path, json) {
                    log::warn!("Failed to write favorites to {}: {}", self.path.display(), e);
                }
            }
            Err(e) => log::warn!("Failed to serialize favorites: {}", e),
        }
    }
}

pub fn default_favorites_path() -> PathBuf {
    let base = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
            PathBuf::from(home).join(".local/share")
        });
    base.join("zonewatch").join("favorites.json")
}
