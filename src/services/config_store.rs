// Configuration Storage Service
// Handles reader config read/write and version backup

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use super::layout::{PanelPosition, PanelSize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReaderConfig {
    pub version: String,
    /// Active disguise: auto | code | excel | document.
    #[serde(default = "default_disguise_mode")]
    pub disguise_mode: String,
    /// Document-mode font family, or "auto" to keep the sampled font.
    #[serde(default = "default_font_family")]
    pub font_family: String,
    /// Panel opacity, 0–1.
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    /// Content font size chosen from the panel menu ("12px".."18px").
    pub reader_font_size: Option<String>,
    pub reader_position: Option<PanelPosition>,
    pub reader_size: Option<PanelSize>,
    #[serde(default)]
    pub current_chapter: usize,
    #[serde(default)]
    pub last_read_position: f64,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            version: String::new(),
            disguise_mode: default_disguise_mode(),
            font_family: default_font_family(),
            opacity: default_opacity(),
            reader_font_size: None,
            reader_position: None,
            reader_size: None,
            current_chapter: 0,
            last_read_position: 0.0,
        }
    }
}

fn default_disguise_mode() -> String {
    "auto".to_string()
}
fn default_font_family() -> String {
    "auto".to_string()
}
fn default_opacity() -> f64 {
    0.95
}

pub struct ConfigStore {
    config_dir: PathBuf,
    config_file: PathBuf,
}

impl ConfigStore {
    pub fn new(config_dir: PathBuf) -> Self {
        let config_file = config_dir.join("config.json");
        Self {
            config_dir,
            config_file,
        }
    }

    /// Get default config directory
    pub fn default_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("infiltra"))
    }

    /// Ensure config directory exists
    pub fn ensure_dir(&self) -> Result<(), String> {
        fs::create_dir_all(&self.config_dir)
            .map_err(|e| format!("Failed to create config dir: {}", e))
    }

    /// Load configuration from file. Opacity is clamped back into 0–1 so a
    /// hand-edited file cannot push the panel out of its contract.
    pub fn load(&self) -> Result<ReaderConfig, String> {
        if !self.config_file.exists() {
            return Ok(ReaderConfig::default());
        }

        let content = fs::read_to_string(&self.config_file)
            .map_err(|e| format!("Failed to read config: {}", e))?;

        let mut config: ReaderConfig =
            serde_json::from_str(&content).map_err(|e| format!("Failed to parse config: {}", e))?;
        config.opacity = config.opacity.clamp(0.0, 1.0);
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, config: &ReaderConfig) -> Result<(), String> {
        self.ensure_dir()?;

        // Create backup if file exists
        if self.config_file.exists() {
            self.create_backup()?;
        }

        let content = serde_json::to_string_pretty(config)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        fs::write(&self.config_file, content).map_err(|e| format!("Failed to write config: {}", e))
    }

    /// Create a backup of current config
    fn create_backup(&self) -> Result<(), String> {
        let backup_dir = self.config_dir.join("backups");
        fs::create_dir_all(&backup_dir).map_err(|e| format!("Failed to create backup dir: {}", e))?;

        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
        let backup_file = backup_dir.join(format!("config_{}.json", timestamp));

        fs::copy(&self.config_file, &backup_file)
            .map_err(|e| format!("Failed to create backup: {}", e))?;

        // Keep only last 10 backups
        self.cleanup_old_backups(&backup_dir, 10)?;

        Ok(())
    }

    /// Remove old backups, keeping only the most recent N
    fn cleanup_old_backups(&self, backup_dir: &PathBuf, keep: usize) -> Result<(), String> {
        let mut entries: Vec<_> = fs::read_dir(backup_dir)
            .map_err(|e| format!("Failed to read backup dir: {}", e))?
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().map_or(false, |ext| ext == "json"))
            .collect();

        if entries.len() <= keep {
            return Ok(());
        }

        // Sort by modification time (oldest first)
        entries.sort_by_key(|e| {
            e.metadata()
                .and_then(|m| m.modified())
                .unwrap_or(std::time::SystemTime::UNIX_EPOCH)
        });

        // Remove oldest entries
        for entry in entries.iter().take(entries.len() - keep) {
            let _ = fs::remove_file(entry.path());
        }

        Ok(())
    }
}
