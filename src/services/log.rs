use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::error::{Result, TrackerError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LogLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub owner: Option<String>,
    pub event: String,
    pub details: Option<String>,
}

/// Append-only activity log next to the record store. Operations log through
/// this and ignore its errors: logging must never break an operation.
pub struct ActivityLogger {
    log_path: PathBuf,
}

impl ActivityLogger {
    pub fn new() -> Result<Self> {
        let proj = ProjectDirs::from("io", "becandidature", "becandidature")
            .ok_or_else(|| TrackerError::Storage("could not resolve data dir".into()))?;
        let dir = proj.data_local_dir().to_path_buf();
        fs::create_dir_all(&dir)?;

        Ok(Self {
            log_path: dir.join("activity.log"),
        })
    }

    pub fn log(
        &self,
        level: LogLevel,
        owner: Option<&str>,
        event: &str,
        details: Option<&str>,
    ) -> Result<()> {
        let entry = LogEntry {
            timestamp: Utc::now(),
            level,
            owner: owner.map(|o| o.to_string()),
            event: event.to_string(),
            details: details.map(|d| d.to_string()),
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;

        let level_str = match entry.level {
            LogLevel::Info => "🟢",
            LogLevel::Error => "🔴",
        };

        let owner_str = entry.owner.as_deref().unwrap_or("*");
        let details_str = entry.details.as_deref().unwrap_or("");

        writeln!(
            file,
            "{} {} {} {} {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            level_str,
            entry.event,
            owner_str,
            details_str
        )?;

        Ok(())
    }

    pub fn read_logs(&self, owner_filter: Option<&str>, errors_only: bool) -> Result<Vec<String>> {
        if !self.log_path.exists() {
            return Ok(vec![]);
        }

        let file = std::fs::File::open(&self.log_path)?;
        let reader = BufReader::new(file);
        let mut matching_lines = Vec::new();

        for line in reader.lines() {
            let line = line?;

            if errors_only && !line.contains("🔴") {
                continue;
            }

            if let Some(owner) = owner_filter {
                if !line.contains(owner) {
                    continue;
                }
            }

            matching_lines.push(line);
        }

        // Most recent entries first
        matching_lines.reverse();
        Ok(matching_lines)
    }

    pub fn info(&self, owner: Option<&str>, event: &str, details: Option<&str>) -> Result<()> {
        self.log(LogLevel::Info, owner, event, details)
    }

    pub fn error(&self, owner: Option<&str>, event: &str, details: Option<&str>) -> Result<()> {
        self.log(LogLevel::Error, owner, event, details)
    }
}
