use std::io::Write;
use std::path::Path;

use anyhow::Context;
use anyhow::Result;
use serde::Serialize;
use tempfile::NamedTempFile;

/// Writes `contents` to a temporary file next to `path` and renames it into
/// place, so readers never observe a half-written file. The temporary file is
/// removed if anything fails.
pub fn write_file_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir).context("Failed to create temp file")?;
    file.write_all(contents.as_bytes())
        .context("Failed to write to temp file")?;
    file.flush().context("Failed to flush temp file")?;
    file.as_file()
        .sync_all()
        .context("Failed to sync temp file")?;
    // dropping the returned file removes it
    file.persist(path)
        .map_err(|err| err.error)
        .context("Failed to move temp file to output")?;
    Ok(())
}

pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;
    write_file_atomic(path, &json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");
        std::fs::write(&path, "stale").unwrap();

        write_file_atomic(&path, "fresh").unwrap();

        assert_eq!("fresh", std::fs::read_to_string(&path).unwrap());
        assert_eq!(1, std::fs::read_dir(dir.path()).unwrap().count());
    }

    #[test]
    fn output_may_carry_tmp_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.tmp");

        write_file_atomic(&path, "contents").unwrap();

        assert_eq!("contents", std::fs::read_to_string(&path).unwrap());
        assert_eq!(1, std::fs::read_dir(dir.path()).unwrap().count());
    }

    #[test]
    fn failed_write_leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        // renaming a file onto a non-empty directory fails
        let path = dir.path().join("occupied");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "").unwrap();

        assert!(write_file_atomic(&path, "contents").is_err());

        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(1, entries);
        assert!(path.is_dir());
    }

    #[test]
    fn atomic_write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("plan.json");
        assert!(write_file_atomic(&path, "contents").is_err());
    }

    #[test]
    fn json_is_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("value.json");
        write_json_atomic(&path, &vec![1, 2]).unwrap();
        assert_eq!("[\n  1,\n  2\n]", std::fs::read_to_string(&path).unwrap());
    }
}
