use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Writes `content` verbatim to `filename` inside `output_dir`, creating the
/// directory if needed and overwriting any existing file. Returns the final
/// path for display.
pub fn save_markdown(content: &str, filename: &str, output_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            output_dir.display()
        )
    })?;

    let path = output_dir.join(filename);
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn save_markdown_writes_content_verbatim() {
        let dir = TempDir::new().unwrap();

        let path = save_markdown("X", "f.md", dir.path()).unwrap();

        assert_eq!(path, dir.path().join("f.md"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "X");
    }

    #[test]
    fn save_markdown_creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("out").join("plans");

        let path = save_markdown("# Plan\n", "training_plan.md", &nested).unwrap();

        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "# Plan\n");
    }

    #[test]
    fn save_markdown_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();

        save_markdown("old", "f.md", dir.path()).unwrap();
        let path = save_markdown("new", "f.md", dir.path()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn save_markdown_errors_when_directory_is_a_file() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("out");
        fs::write(&blocker, "not a directory").unwrap();

        let err = save_markdown("X", "f.md", &blocker).unwrap_err();
        assert!(err.to_string().contains("Failed to create output directory"));
    }
}
