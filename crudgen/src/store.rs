//! Project store - the configured root that holds generated projects and archives
//!
//! Layout under the root:
//!
//! ```text
//! <root>/
//! ├── Backend_Users/
//! │   ├── .env
//! │   ├── README.md
//! │   ├── app.py
//! │   ├── requirements.txt
//! │   └── static/swagger.json
//! └── Backend_Users.zip
//! ```
//!
//! Publishing the same project name twice replaces both entries. Writers of
//! one name are serialized, and the archive is moved into place with a
//! rename, so readers never observe a half-written archive.

use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::archive::zip_directory;
use crate::codegen::RenderedProject;
use crate::error::{CrudgenError, Result};

/// Where a project ended up on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedProject {
    /// Project name, e.g. `Backend_Users`
    pub name: String,
    /// `<root>/<name>/`
    pub project_dir: PathBuf,
    /// `<root>/<name>.zip`
    pub archive_path: PathBuf,
}

impl PublishedProject {
    /// Archive file name as handed to clients, e.g. `Backend_Users.zip`
    pub fn archive_name(&self) -> String {
        format!("{}.zip", self.name)
    }
}

/// Filesystem store rooted at a single directory
#[derive(Debug)]
pub struct ProjectStore {
    root: PathBuf,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl ProjectStore {
    /// Create a store rooted at `root`, creating the directory if needed
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if root.exists() && !root.is_dir() {
            return Err(CrudgenError::ConfigError(format!(
                "{} is not a directory",
                root.display()
            )));
        }
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            locks: Mutex::new(HashMap::new()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn lock_for(&self, name: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks.entry(name.to_string()).or_default().clone()
    }

    /// Drop the lock for `name` once no other publisher is waiting on it
    async fn release_lock(&self, name: &str, lock: Arc<Mutex<()>>) {
        let mut locks = self.locks.lock().await;
        // One reference in the map, one held here
        if Arc::strong_count(&lock) == 2 {
            locks.remove(name);
        }
        // Counts only change while the map is held
        drop(lock);
    }

    /// Write the project directory and its archive, replacing older copies
    pub async fn publish(&self, project: RenderedProject) -> Result<PublishedProject> {
        let name = project.name.clone();
        let lock = self.lock_for(&name).await;
        let result = {
            let _guard = lock.lock().await;
            let root = self.root.clone();
            tokio::task::spawn_blocking(move || write_project(&root, &project)).await
        };
        self.release_lock(&name, lock).await;

        let published = result??;
        info!(
            "Published {} -> {}",
            published.name,
            published.archive_path.display()
        );
        Ok(published)
    }

    /// Resolve a client-supplied archive name to a path inside the root
    ///
    /// Only a single plain file name ending in `.zip` is accepted; anything
    /// else (separators, `..`, hidden files) is reported as not found.
    pub fn archive_path(&self, name: &str) -> Result<PathBuf> {
        let mut components = Path::new(name).components();
        let single_component = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(part)), None) if part == name
        );
        if !single_component
            || name.starts_with('.')
            || name.contains('\\')
            || !name.ends_with(".zip")
        {
            return Err(CrudgenError::ArchiveNotFound(name.to_string()));
        }
        Ok(self.root.join(name))
    }

    /// Read a published archive
    pub async fn open_archive(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.archive_path(name)?;
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => {}
            _ => return Err(CrudgenError::ArchiveNotFound(name.to_string())),
        }
        tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CrudgenError::ArchiveNotFound(name.to_string()),
            _ => CrudgenError::IoError(e),
        })
    }
}

/// Blocking part of [`ProjectStore::publish`]
fn write_project(root: &Path, project: &RenderedProject) -> Result<PublishedProject> {
    fs::create_dir_all(root)?;

    let staging = tempfile::Builder::new()
        .prefix(".staging-")
        .tempdir_in(root)?;
    set_mode(staging.path(), 0o755)?;
    for file in &project.files {
        let path = staging.path().join(file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &file.contents)?;
        debug!("Wrote {}", file.path);
    }

    let mut archive = tempfile::Builder::new()
        .prefix(".archive-")
        .suffix(".zip")
        .tempfile_in(root)?;
    zip_directory(staging.path(), archive.as_file_mut())?;
    archive.as_file().sync_all()?;
    set_mode(archive.path(), 0o644)?;

    let archive_path = root.join(project.archive_name());
    archive.persist(&archive_path).map_err(std::io::Error::from)?;

    let project_dir = root.join(&project.name);
    replace_dir(root, staging.path(), &project_dir)?;

    Ok(PublishedProject {
        name: project.name.clone(),
        project_dir,
        archive_path,
    })
}

/// Move `staging` to `target`, discarding whatever was at `target`
///
/// If the new copy cannot be moved in, the old one is put back.
fn replace_dir(root: &Path, staging: &Path, target: &Path) -> Result<()> {
    // Removed when dropped, together with the old copy moved into it
    let trash = tempfile::Builder::new().prefix(".trash-").tempdir_in(root)?;
    let previous = trash.path().join("previous");
    let had_previous = target.exists();
    if had_previous {
        fs::rename(target, &previous)?;
    }
    if let Err(e) = fs::rename(staging, target) {
        if had_previous {
            if let Err(restore) = fs::rename(&previous, target) {
                warn!("Failed to restore {}: {}", target.display(), restore);
            }
        }
        return Err(e.into());
    }
    Ok(())
}

/// Temp files and dirs are created owner-only; published entries are not
#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::GeneratedFile;
    use std::io::Read;

    fn project(body: &str) -> RenderedProject {
        RenderedProject {
            name: "Backend_Users".into(),
            files: vec![
                GeneratedFile {
                    path: "app.py",
                    contents: body.to_string(),
                },
                GeneratedFile {
                    path: "static/swagger.json",
                    contents: "{}".into(),
                },
            ],
        }
    }

    fn read_entry(path: &Path, name: &str) -> String {
        let mut archive = zip::ZipArchive::new(fs::File::open(path).unwrap()).unwrap();
        let mut contents = String::new();
        archive
            .by_name(name)
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        contents
    }

    #[tokio::test]
    async fn test_publish_writes_directory_and_archive() {
        let root = tempfile::tempdir().unwrap();
        let store = ProjectStore::new(root.path()).unwrap();

        let published = store.publish(project("v1")).await.unwrap();
        assert_eq!(published.archive_name(), "Backend_Users.zip");
        assert_eq!(published.project_dir, root.path().join("Backend_Users"));
        assert_eq!(
            fs::read_to_string(published.project_dir.join("app.py")).unwrap(),
            "v1"
        );
        assert!(published.project_dir.join("static/swagger.json").is_file());
        assert_eq!(read_entry(&published.archive_path, "app.py"), "v1");
    }

    #[tokio::test]
    async fn test_republish_overwrites_and_leaves_no_staging() {
        let root = tempfile::tempdir().unwrap();
        let store = ProjectStore::new(root.path()).unwrap();

        store.publish(project("v1")).await.unwrap();
        let published = store.publish(project("v2")).await.unwrap();

        assert_eq!(
            fs::read_to_string(published.project_dir.join("app.py")).unwrap(),
            "v2"
        );
        assert_eq!(read_entry(&published.archive_path, "app.py"), "v2");

        let mut names: Vec<String> = fs::read_dir(root.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["Backend_Users", "Backend_Users.zip"]);
    }

    #[tokio::test]
    async fn test_concurrent_publishes_of_same_name() {
        let root = tempfile::tempdir().unwrap();
        let store = Arc::new(ProjectStore::new(root.path()).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.publish(project(&format!("v{}", i))).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let archive = root.path().join("Backend_Users.zip");
        let body = read_entry(&archive, "app.py");
        assert!(body.starts_with('v'));
        let on_disk = fs::read_to_string(root.path().join("Backend_Users/app.py")).unwrap();
        assert!(on_disk.starts_with('v'));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_published_entries_are_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let root = tempfile::tempdir().unwrap();
        let store = ProjectStore::new(root.path()).unwrap();
        let published = store.publish(project("v1")).await.unwrap();

        let mode = |path: &Path| fs::metadata(path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&published.archive_path), 0o644);
        assert_eq!(mode(&published.project_dir), 0o755);
    }

    #[test]
    fn test_replace_dir_restores_previous_on_failure() {
        let root = tempfile::tempdir().unwrap();
        let target = root.path().join("Backend_Users");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("app.py"), "old").unwrap();

        let missing_staging = root.path().join(".staging-gone");
        assert!(replace_dir(root.path(), &missing_staging, &target).is_err());

        assert_eq!(fs::read_to_string(target.join("app.py")).unwrap(), "old");
        let names: Vec<_> = fs::read_dir(root.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec!["Backend_Users"]);
    }

    #[tokio::test]
    async fn test_locks_are_released_after_publish() {
        let root = tempfile::tempdir().unwrap();
        let store = Arc::new(ProjectStore::new(root.path()).unwrap());

        store.publish(project("v1")).await.unwrap();
        assert!(store.locks.lock().await.is_empty());

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.publish(project(&format!("v{}", i))).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }
        assert!(store.locks.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_open_archive() {
        let root = tempfile::tempdir().unwrap();
        let store = ProjectStore::new(root.path()).unwrap();
        store.publish(project("v1")).await.unwrap();

        let bytes = store.open_archive("Backend_Users.zip").await.unwrap();
        assert!(bytes.starts_with(b"PK"));

        assert!(matches!(
            store.open_archive("Backend_Missing.zip").await,
            Err(CrudgenError::ArchiveNotFound(_))
        ));
    }

    #[test]
    fn test_archive_path_rejects_traversal() {
        let root = tempfile::tempdir().unwrap();
        let store = ProjectStore::new(root.path()).unwrap();

        assert!(store.archive_path("Backend_Users.zip").is_ok());
        for name in [
            "../Backend_Users.zip",
            "sub/Backend_Users.zip",
            "/etc/passwd",
            "..",
            ".archive-123.zip",
            "Backend_Users",
            "..\\x.zip",
            "",
        ] {
            assert!(
                matches!(store.archive_path(name), Err(CrudgenError::ArchiveNotFound(_))),
                "expected '{}' to be rejected",
                name
            );
        }
    }

    #[test]
    fn test_root_must_be_a_directory() {
        let root = tempfile::tempdir().unwrap();
        let file = root.path().join("file");
        fs::write(&file, "x").unwrap();
        assert!(ProjectStore::new(&file).is_err());
    }
}
