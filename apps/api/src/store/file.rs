use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tempfile::NamedTempFile;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::models::analysis::{AnalysisResult, NewAnalysis};
use crate::store::{next_id, save_timestamp, ResultStore, StoreError};

/// Stores every result in one pretty-printed JSON array.
///
/// Writes land in a temp file beside the target and are renamed over it, so a
/// reader sees either the old array or the new one. `append` holds a mutex
/// across read → assign id → write.
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

enum Loaded {
    Records(Vec<AnalysisResult>),
    /// Exists but cannot be read or parsed.
    Unreadable(String),
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Loaded {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Loaded::Records(Vec::new()),
            Err(e) => return Loaded::Unreadable(e.to_string()),
        };
        if raw.trim().is_empty() {
            return Loaded::Records(Vec::new());
        }
        match serde_json::from_str(&raw) {
            Ok(records) => Loaded::Records(records),
            Err(e) => Loaded::Unreadable(e.to_string()),
        }
    }

    /// Moves an unparseable file out of the way so the next write does not destroy it.
    async fn quarantine(&self, reason: &str) -> Result<(), StoreError> {
        let path = self.path.clone();
        let target = tokio::task::spawn_blocking(move || move_aside(&path)).await??;
        warn!(
            "Results file {} was unreadable ({reason}); moved to {}",
            self.path.display(),
            target.display()
        );
        Ok(())
    }
}

#[async_trait]
impl ResultStore for JsonFileStore {
    fn backend(&self) -> &'static str {
        "file"
    }

    async fn append(&self, analysis: NewAnalysis) -> Result<AnalysisResult, StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut records = match self.load().await {
            Loaded::Records(records) => records,
            Loaded::Unreadable(reason) => {
                self.quarantine(&reason).await?;
                Vec::new()
            }
        };

        let result = analysis.into_result(next_id(&records)?, save_timestamp());
        records.push(result.clone());

        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_atomically(&path, &records)).await??;

        info!(
            "Saved analysis #{} to {}",
            result.id,
            self.path.display()
        );
        Ok(result)
    }

    async fn list_all(&self) -> Vec<AnalysisResult> {
        match self.load().await {
            Loaded::Records(records) => records,
            Loaded::Unreadable(reason) => {
                warn!(
                    "Results file {} is unreadable ({reason}); treating history as empty",
                    self.path.display()
                );
                Vec::new()
            }
        }
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Renames `path` to a fresh `<file>.corrupt-<unix-ts>-<random>` beside it.
/// The target name is reserved by creating it first, so an earlier
/// quarantined file is never replaced.
fn move_aside(path: &Path) -> Result<PathBuf, StoreError> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "results".to_string());
    let prefix = format!("{file_name}.corrupt-{}-", Utc::now().timestamp());

    let reserved = tempfile::Builder::new()
        .prefix(&prefix)
        .tempfile_in(parent_dir(path))?;
    let target = reserved.into_temp_path().keep().map_err(|e| e.error)?;

    if let Err(e) = std::fs::rename(path, &target) {
        let _ = std::fs::remove_file(&target);
        return Err(e.into());
    }
    Ok(target)
}

fn write_atomically(path: &Path, records: &[AnalysisResult]) -> Result<(), StoreError> {
    let dir = parent_dir(path);
    std::fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    serde_json::to_writer_pretty(&mut tmp, records)?;
    tmp.write_all(b"\n")?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::store::test_support::new_analysis;

    fn store_in(dir: &tempfile::TempDir) -> JsonFileStore {
        JsonFileStore::new(dir.path().join("data").join("job_descriptions.json"))
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.list_all().await.is_empty());
        assert!(store.get(1).await.is_none());
    }

    #[tokio::test]
    async fn test_append_creates_directory_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let saved = store.append(new_analysis("Rust developer")).await.unwrap();
        assert_eq!(saved.id, 1);
        assert!(store.path().exists());

        let before = store.list_all().await.len();
        let second = store.append(new_analysis("Go developer")).await.unwrap();
        let all = store.list_all().await;
        assert_eq!(all.len(), before + 1);
        assert_eq!(second.id, before as u64 + 1);
        assert_eq!(all[0], saved);
        assert_eq!(all[1], second);
    }

    #[tokio::test]
    async fn test_records_survive_a_new_store_instance() {
        let dir = tempfile::tempdir().unwrap();
        store_in(&dir).append(new_analysis("persisted")).await.unwrap();

        let reopened = store_in(&dir);
        let all = reopened.list_all().await;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].original_text, "persisted");
        assert_eq!(reopened.append(new_analysis("next")).await.unwrap().id, 2);
    }

    #[tokio::test]
    async fn test_on_disk_format_is_a_json_array_with_expected_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.append(new_analysis("Senior role")).await.unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let record = &value.as_array().unwrap()[0];
        for field in [
            "original_text",
            "cleaned_text",
            "skills",
            "experience_level",
            "insight",
            "timestamp",
            "id",
        ] {
            assert!(record.get(field).is_some(), "missing {field}");
        }
        assert_eq!(record["experience_level"], "Mid-level");
        assert_eq!(record["id"], 1);
    }

    #[tokio::test]
    async fn test_ids_continue_from_max_existing_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        let existing = vec![
            new_analysis("a").into_result(1, save_timestamp()),
            new_analysis("b").into_result(5, save_timestamp()),
        ];
        std::fs::write(store.path(), serde_json::to_string(&existing).unwrap()).unwrap();

        assert_eq!(store.append(new_analysis("c")).await.unwrap().id, 6);
    }

    #[tokio::test]
    async fn test_empty_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "  \n").unwrap();

        assert!(store.list_all().await.is_empty());
        assert_eq!(store.append(new_analysis("x")).await.unwrap().id, 1);
    }

    #[tokio::test]
    async fn test_corrupt_file_reads_as_empty_and_is_kept_aside_on_append() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let data_dir = store.path().parent().unwrap().to_path_buf();
        std::fs::create_dir_all(&data_dir).unwrap();
        std::fs::write(store.path(), "[{\"broken\": ").unwrap();

        assert!(store.list_all().await.is_empty());

        let saved = store.append(new_analysis("fresh")).await.unwrap();
        assert_eq!(saved.id, 1);
        assert_eq!(store.list_all().await.len(), 1);

        let quarantined: Vec<_> = std::fs::read_dir(&data_dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().contains(".corrupt-"))
            .collect();
        assert_eq!(quarantined.len(), 1);
        assert_eq!(
            std::fs::read_to_string(quarantined[0].path()).unwrap(),
            "[{\"broken\": "
        );
    }

    #[tokio::test]
    async fn test_repeated_corruption_keeps_every_quarantined_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let data_dir = store.path().parent().unwrap().to_path_buf();
        std::fs::create_dir_all(&data_dir).unwrap();

        std::fs::write(store.path(), "CORRUPT-ONE").unwrap();
        store.append(new_analysis("after first")).await.unwrap();
        std::fs::write(store.path(), "CORRUPT-TWO").unwrap();
        store.append(new_analysis("after second")).await.unwrap();

        let mut contents: Vec<String> = std::fs::read_dir(&data_dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().contains(".corrupt-"))
            .map(|e| std::fs::read_to_string(e.path()).unwrap())
            .collect();
        contents.sort();
        assert_eq!(contents, vec!["CORRUPT-ONE", "CORRUPT-TWO"]);

        let all = store.list_all().await;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].original_text, "after second");
    }

    #[tokio::test]
    async fn test_exhausted_id_space_is_an_error_not_a_panic() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        let existing = vec![new_analysis("last").into_result(u64::MAX, save_timestamp())];
        std::fs::write(store.path(), serde_json::to_string(&existing).unwrap()).unwrap();

        let err = store.append(new_analysis("overflow")).await.unwrap_err();
        assert!(matches!(err, StoreError::IdExhausted));

        let all = store.list_all().await;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, u64::MAX);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_appends_get_distinct_sequential_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(store_in(&dir));

        let handles: Vec<_> = (0..20)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.append(new_analysis(&format!("jd {i}"))).await })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap().id);
        }
        ids.sort_unstable();
        assert_eq!(ids, (1..=20).collect::<Vec<u64>>());
        assert_eq!(store.list_all().await.len(), 20);
    }
}
