use std::fs;
use std::path::{Path, PathBuf};

/// A plain-text file held by the editor.
#[derive(Clone)]
pub struct TextFile {
    pub path: PathBuf,
    pub content: String,
}

pub struct FileStore;

impl FileStore {
    /// Load a file as text. A missing file yields an empty document so a
    /// fresh path can be written to on first save.
    pub fn load(path: &Path) -> Result<TextFile, String> {
        let content = if path.exists() {
            fs::read_to_string(path)
                .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?
        } else {
            String::new()
        };

        Ok(TextFile {
            path: path.to_path_buf(),
            content,
        })
    }

    /// Save the file's content. Creates parent directories if they don't
    /// exist.
    pub fn save(file: &TextFile) -> Result<(), String> {
        if let Some(parent) = file.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                format!(
                    "Failed to create directories for '{}': {}",
                    file.path.display(),
                    e
                )
            })?;
        }

        fs::write(&file.path, &file.content)
            .map_err(|e| format!("Failed to save '{}': {}", file.path.display(), e))
    }
}
