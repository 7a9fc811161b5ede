//! Offline merge of two visitor lists.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use mercs_core::{VisitorRecord, reconcile};
use tracing::debug;

/// Load a visitor list; a missing file or `null` is an empty list
fn load_visitors(path: &Path) -> Result<Vec<VisitorRecord>> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("{} not found, treating as empty", path.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(e).with_context(|| format!("Failed to read {}", path.display())),
    };

    let visitors: Option<Vec<VisitorRecord>> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid visitor list in {}", path.display()))?;
    Ok(visitors.unwrap_or_default())
}

pub fn run(memory: &Path, saved: &Path, output: Option<&Path>) -> Result<()> {
    let from_memory = load_visitors(memory)?;
    let saved = load_visitors(saved)?;

    let merged = reconcile(&from_memory, &saved);
    let content = serde_json::to_string_pretty(&merged)?;

    if let Some(output_path) = output {
        fs::write(output_path, &content)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        eprintln!("Wrote {} visitors to {}", merged.len(), output_path.display());
    } else {
        println!("{}", content);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mercs_core::TaskStatus;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_and_null() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("visitors.json");
        assert!(load_visitors(&path).unwrap().is_empty());

        fs::write(&path, "null").unwrap();
        assert!(load_visitors(&path).unwrap().is_empty());
    }

    #[test]
    fn test_run_writes_output() {
        let dir = TempDir::new().unwrap();
        let memory = dir.path().join("memory.json");
        let saved = dir.path().join("saved.json");
        let output = dir.path().join("merged.json");
        fs::write(&memory, r#"[{ "TaskId": 1, "Status": 2 }]"#).unwrap();
        fs::write(
            &saved,
            r#"[{ "TaskId": 1, "Status": 3 }, { "TaskId": 2, "Status": 3 }, { "TaskId": 3, "Status": 1 }]"#,
        )
        .unwrap();

        run(&memory, &saved, Some(&output)).unwrap();

        let merged: Vec<VisitorRecord> =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(
            merged,
            vec![
                VisitorRecord::new(1, TaskStatus::InProgress),
                VisitorRecord::new(2, TaskStatus::Claimed),
            ]
        );
    }

    #[test]
    fn test_run_rejects_invalid_input() {
        let dir = TempDir::new().unwrap();
        let memory = dir.path().join("memory.json");
        fs::write(&memory, "{}").unwrap();

        assert!(run(&memory, &dir.path().join("saved.json"), None).is_err());
    }
}
