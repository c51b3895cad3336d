//! # Workspace
//!
//! The fixed root directory under which all file-creating/reading/deleting
//! actions are confined. Enforces sandboxing by rejecting paths that would
//! escape the root.

use anyhow::{Context as AnyhowContext, Result, bail};
use std::path::{Component, Path, PathBuf};

/// Filesystem sandbox rooted at a single directory.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Open (and create if needed) the workspace at `root`.
    pub fn open(root: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create workspace dir {:?}", root))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the persisted user profile file inside the workspace.
    pub fn profile_path(&self) -> PathBuf {
        self.root.join("user_memory.json")
    }

    /// Resolve a user-supplied filename against the workspace root.
    /// Absolute paths and parent-directory components are rejected so a
    /// hostile plan cannot reach outside the sandbox.
    pub fn resolve(&self, filename: &str) -> Result<PathBuf> {
        if filename.is_empty() {
            bail!("Empty filename");
        }
        let candidate = Path::new(filename);
        if candidate.is_absolute() {
            bail!("Absolute paths are not allowed: {}", filename);
        }
        for component in candidate.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                _ => bail!("Path escapes the workspace: {}", filename),
            }
        }
        Ok(self.root.join(candidate))
    }

    pub async fn write_file(&self, filename: &str, content: &str) -> Result<PathBuf> {
        let path = self.resolve(filename)?;
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(&path, content)
            .await
            .with_context(|| format!("Failed to write {:?}", path))?;
        Ok(path)
    }

    pub async fn read_file(&self, filename: &str) -> Result<String> {
        let path = self.resolve(filename)?;
        tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {:?}", path))
    }

    pub async fn delete_file(&self, filename: &str) -> Result<()> {
        let path = self.resolve(filename)?;
        tokio::fs::remove_file(&path)
            .await
            .with_context(|| format!("Failed to delete {:?}", path))
    }

    /// List file names in the workspace root (not recursive).
    pub async fn list_files(&self) -> Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(&self.root)
            .await
            .context("Failed to read workspace dir")?;
        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            files.push(entry.file_name().to_string_lossy().to_string());
        }
        files.sort();
        Ok(files)
    }

    /// Ensure a file exists, writing a stub header if it does not.
    /// Used before handing a filename to an editor.
    pub async fn ensure_file(&self, filename: &str, stub: &str) -> Result<PathBuf> {
        let path = self.resolve(filename)?;
        if !path.exists() {
            if let Some(parent) = path.parent() {
                if !parent.exists() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
            tokio::fs::write(&path, stub)
                .await
                .with_context(|| format!("Failed to create {:?}", path))?;
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn workspace() -> (TempDir, Workspace) {
        let dir = TempDir::new().unwrap();
        let ws = Workspace::open(dir.path().join("ws")).unwrap();
        (dir, ws)
    }

    #[tokio::test]
    async fn test_write_then_read_roundtrip() {
        let (_dir, ws) = workspace();
        ws.write_file("notes.txt", "hello").await.unwrap();
        assert_eq!(ws.read_file("notes.txt").await.unwrap(), "hello");
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let (_dir, ws) = workspace();
        assert!(ws.resolve("../outside.txt").is_err());
        assert!(ws.resolve("/etc/passwd").is_err());
        assert!(ws.resolve("").is_err());
        assert!(ws.resolve("ok/nested.txt").is_ok());
    }

    #[tokio::test]
    async fn test_list_and_delete() {
        let (_dir, ws) = workspace();
        ws.write_file("a.txt", "").await.unwrap();
        ws.write_file("b.txt", "").await.unwrap();
        let files = ws.list_files().await.unwrap();
        assert_eq!(files, vec!["a.txt".to_string(), "b.txt".to_string()]);

        ws.delete_file("a.txt").await.unwrap();
        assert_eq!(ws.list_files().await.unwrap(), vec!["b.txt".to_string()]);
    }

    #[tokio::test]
    async fn test_ensure_file_writes_stub_once() {
        let (_dir, ws) = workspace();
        ws.ensure_file("new.py", "# New Python File\n").await.unwrap();
        assert_eq!(ws.read_file("new.py").await.unwrap(), "# New Python File\n");

        // Existing content is left alone
        ws.write_file("new.py", "print(1)\n").await.unwrap();
        ws.ensure_file("new.py", "# New Python File\n").await.unwrap();
        assert_eq!(ws.read_file("new.py").await.unwrap(), "print(1)\n");
    }
}
