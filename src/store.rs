//! Workflow store - read-only access to a workflows directory
//!
//! Layout on disk:
//! ```text
//! workflows/
//!   <id>/
//!     conf.yaml
//!     src/
//!       <script files>
//! ```

use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

use crate::core::Workflow;

const CONF_FILE: &str = "conf.yaml";
const SRC_DIR: &str = "src";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("workflow '{0}' not found")]
    NotFound(String),

    #[error("invalid definition for workflow '{id}': {source}")]
    InvalidDefinition {
        id: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("access denied: '{0}' is outside the workflow sources")]
    AccessDenied(String),

    #[error("file '{0}' not found")]
    FileNotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A directory of workflow definitions
#[derive(Debug, Clone)]
pub struct WorkflowStore {
    root: PathBuf,
}

impl WorkflowStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn workflow_dir(&self, id: &str) -> Result<PathBuf, StoreError> {
        if !is_plain_name(id) {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(self.root.join(id))
    }

    /// Load every workflow under the root, sorted by id.
    ///
    /// A missing root is an empty store; unreadable definitions are skipped.
    pub fn list(&self) -> Result<Vec<Workflow>, StoreError> {
        if !self.root.is_dir() {
            log::debug!("Workflows root {} does not exist", self.root.display());
            return Ok(Vec::new());
        }

        let mut workflows = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if !path.join(CONF_FILE).is_file() {
                continue;
            }

            let id = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default()
                .to_string();

            match self.get(&id) {
                Ok(workflow) => workflows.push(workflow),
                Err(e) => log::warn!("Skipping workflow {}: {}", id, e),
            }
        }

        workflows.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(workflows)
    }

    /// Load one workflow by id
    pub fn get(&self, id: &str) -> Result<Workflow, StoreError> {
        let conf = self.workflow_dir(id)?.join(CONF_FILE);
        let content = match fs::read_to_string(&conf) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(id.to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        Workflow::from_yaml(id, &content).map_err(|source| StoreError::InvalidDefinition {
            id: id.to_string(),
            source,
        })
    }

    /// Names of the regular files in a workflow's src directory, sorted
    pub fn files(&self, id: &str) -> Result<Vec<String>, StoreError> {
        let dir = self.workflow_dir(id)?;
        if !dir.join(CONF_FILE).is_file() {
            return Err(StoreError::NotFound(id.to_string()));
        }

        let src = dir.join(SRC_DIR);
        if !src.is_dir() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(&src)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                if let Some(name) = entry.file_name().to_str() {
                    files.push(name.to_string());
                }
            }
        }

        files.sort();
        Ok(files)
    }

    /// Read one script file; names that would leave src/ are rejected
    pub fn read_file(&self, id: &str, name: &str) -> Result<String, StoreError> {
        let dir = self.workflow_dir(id)?;
        if !dir.join(CONF_FILE).is_file() {
            return Err(StoreError::NotFound(id.to_string()));
        }

        if !is_plain_name(name) {
            return Err(StoreError::AccessDenied(name.to_string()));
        }

        let path = dir.join(SRC_DIR).join(name);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::FileNotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// A single normal path component: no separators, `..`, or root
fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(workflows: &[(&str, &str)]) -> (tempfile::TempDir, WorkflowStore) {
        let dir = tempfile::tempdir().unwrap();
        for (id, conf) in workflows {
            let wf = dir.path().join(id);
            fs::create_dir_all(wf.join(SRC_DIR)).unwrap();
            fs::write(wf.join(CONF_FILE), conf).unwrap();
        }
        let store = WorkflowStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_plain_names() {
        assert!(is_plain_name("run.sh"));
        assert!(!is_plain_name("../conf.yaml"));
        assert!(!is_plain_name("a/b.sh"));
        assert!(!is_plain_name("/etc/passwd"));
        assert!(!is_plain_name(".."));
        assert!(!is_plain_name(""));
    }

    #[test]
    fn test_list_sorted_and_skips_broken() {
        let (_dir, store) = store_with(&[
            ("b", "name: second\nexpr: \"0 * * * * *\"\n"),
            ("a", "name: first\nexpr: \"0 * * * * *\"\n"),
            ("broken", "name: [unterminated\n"),
        ]);
        let ids: Vec<String> = store.list().unwrap().into_iter().map(|w| w.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_missing_root_is_empty() {
        let store = WorkflowStore::new("/nonexistent/orchestrium/workflows");
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_get_not_found() {
        let (_dir, store) = store_with(&[]);
        assert!(matches!(store.get("nope"), Err(StoreError::NotFound(_))));
        assert!(matches!(store.get("../x"), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_files_and_read() {
        let (dir, store) = store_with(&[("wf", "name: wf\n")]);
        let src = dir.path().join("wf").join(SRC_DIR);
        fs::write(src.join("b.sh"), "echo b").unwrap();
        fs::write(src.join("a.py"), "print('a')").unwrap();
        fs::create_dir(src.join("nested")).unwrap();

        assert_eq!(store.files("wf").unwrap(), vec!["a.py", "b.sh"]);
        assert_eq!(store.read_file("wf", "b.sh").unwrap(), "echo b");
        assert!(matches!(
            store.read_file("wf", "missing.sh"),
            Err(StoreError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_read_file_rejects_traversal() {
        let (_dir, store) = store_with(&[("wf", "name: wf\n")]);
        assert!(matches!(
            store.read_file("wf", "../conf.yaml"),
            Err(StoreError::AccessDenied(_))
        ));
    }
}
