//! Record persistence.

use crate::error::{Result, TrackerError};
use crate::types::ApplicationRecord;
use chrono::Utc;
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Generic document-store seam: create/read/update/delete/list per owner.
/// Ids and timestamps are assigned by the store. Real backends (Firestore,
/// a SQL service, ...) plug in here.
pub trait RecordStore: Send + Sync {
    fn create(&self, record: ApplicationRecord) -> Result<ApplicationRecord>;
    fn get(&self, owner: &str, id: &str) -> Result<Option<ApplicationRecord>>;
    fn update(&self, record: &ApplicationRecord) -> Result<ApplicationRecord>;
    fn list(&self, owner: &str) -> Result<Vec<ApplicationRecord>>;
    fn delete(&self, owner: &str, id: &str) -> Result<()>;
}

/// One JSON document per record under `<data dir>/records/<owner>/<id>.json`.
pub struct LocalFsStore {
    root: PathBuf,
}

impl LocalFsStore {
    pub fn new() -> Result<Self> {
        let proj = ProjectDirs::from("io", "becandidature", "becandidature")
            .ok_or_else(|| TrackerError::Storage("could not resolve data dir".into()))?;
        let root = proj.data_local_dir().join("records");
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Explicit root, for tests and scripting.
    pub fn with_root(root: PathBuf) -> Result<Self> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn owner_dir(&self, owner: &str) -> PathBuf {
        self.root.join(sanitize(owner))
    }

    fn path_for(&self, owner: &str, id: &str) -> PathBuf {
        self.owner_dir(owner).join(format!("{}.json", sanitize(id)))
    }
}

/// Owner keys and ids become file names; anything path-hostile is mangled.
fn sanitize(key: &str) -> String {
    let cleaned: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_') {
                c
            } else {
                '-'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "-".to_string()
    } else {
        cleaned
    }
}

fn next_id() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{:012x}{:05x}", now.as_millis(), now.subsec_nanos() & 0xfffff)
}

impl RecordStore for LocalFsStore {
    fn create(&self, mut record: ApplicationRecord) -> Result<ApplicationRecord> {
        let dir = self.owner_dir(&record.owner);
        fs::create_dir_all(&dir)?;
        record.id = next_id();
        let now = Utc::now();
        record.created_at = now;
        record.updated_at = now;
        let file = fs::File::create(self.path_for(&record.owner, &record.id))?;
        serde_json::to_writer_pretty(file, &record)?;
        Ok(record)
    }

    fn get(&self, owner: &str, id: &str) -> Result<Option<ApplicationRecord>> {
        let path = self.path_for(owner, id);
        if !path.exists() {
            return Ok(None);
        }
        let file = fs::File::open(&path)?;
        Ok(Some(serde_json::from_reader(file)?))
    }

    fn update(&self, record: &ApplicationRecord) -> Result<ApplicationRecord> {
        let path = self.path_for(&record.owner, &record.id);
        if !path.exists() {
            return Err(TrackerError::NotFound(record.id.clone()));
        }
        let mut updated = record.clone();
        updated.updated_at = Utc::now();
        let file = fs::File::create(&path)?;
        serde_json::to_writer_pretty(file, &updated)?;
        Ok(updated)
    }

    fn list(&self, owner: &str) -> Result<Vec<ApplicationRecord>> {
        let dir = self.owner_dir(owner);
        let mut out = Vec::new();
        if !dir.exists() {
            return Ok(out);
        }
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            let file = match fs::File::open(&path) {
                Ok(f) => f,
                Err(_) => continue,
            };
            match serde_json::from_reader(file) {
                Ok(record) => out.push(record),
                Err(_) => continue, // skip corrupt files
            }
        }
        out.sort_by(|a: &ApplicationRecord, b: &ApplicationRecord| a.id.cmp(&b.id));
        Ok(out)
    }

    fn delete(&self, owner: &str, id: &str) -> Result<()> {
        let path = self.path_for(owner, id);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Status;
    use chrono::NaiveDate;

    fn temp_store() -> LocalFsStore {
        let root = std::env::temp_dir().join(format!("becandidature-store-{}", next_id()));
        LocalFsStore::with_root(root).unwrap()
    }

    fn sample(owner: &str) -> ApplicationRecord {
        let now = Utc::now();
        ApplicationRecord {
            id: String::new(),
            owner: owner.to_string(),
            company: "Acme".into(),
            title: "Rust Engineer".into(),
            applied_on: NaiveDate::from_ymd_opt(2025, 11, 15).unwrap(),
            status: Status::Pending,
            contract: None,
            contact: None,
            email: None,
            link: None,
            notes: None,
            next_follow_up: None,
            relances: vec![],
            status_history: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_create_assigns_id_and_roundtrips() {
        let store = temp_store();
        let created = store.create(sample("me")).unwrap();
        assert!(!created.id.is_empty());

        let loaded = store.get("me", &created.id).unwrap().unwrap();
        assert_eq!(loaded.company, "Acme");
        assert_eq!(loaded.owner, "me");
    }

    #[test]
    fn test_update_bumps_timestamp_and_persists() {
        let store = temp_store();
        let mut record = store.create(sample("me")).unwrap();
        record.status = Status::Interview;
        let updated = store.update(&record).unwrap();
        assert!(updated.updated_at >= record.updated_at);

        let loaded = store.get("me", &record.id).unwrap().unwrap();
        assert_eq!(loaded.status, Status::Interview);
    }

    #[test]
    fn test_update_missing_record_is_not_found() {
        let store = temp_store();
        let mut record = sample("me");
        record.id = "nope".into();
        assert!(matches!(
            store.update(&record),
            Err(TrackerError::NotFound(_))
        ));
    }

    #[test]
    fn test_list_is_scoped_to_owner() {
        let store = temp_store();
        store.create(sample("alice")).unwrap();
        store.create(sample("alice")).unwrap();
        store.create(sample("bob")).unwrap();

        assert_eq!(store.list("alice").unwrap().len(), 2);
        assert_eq!(store.list("bob").unwrap().len(), 1);
        assert!(store.list("carol").unwrap().is_empty());
    }

    #[test]
    fn test_delete_removes_record() {
        let store = temp_store();
        let created = store.create(sample("me")).unwrap();
        store.delete("me", &created.id).unwrap();
        assert!(store.get("me", &created.id).unwrap().is_none());
    }

    #[test]
    fn test_owner_keys_are_sanitized() {
        let store = temp_store();
        let created = store.create(sample("a/b/../c")).unwrap();
        assert!(store.get("a/b/../c", &created.id).unwrap().is_some());
    }
}
