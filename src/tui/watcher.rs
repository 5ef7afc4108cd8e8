//! Live reload for the open post.
//!
//! Editors often save by writing a temporary file and renaming it over the
//! original, which drops a watch placed on the file itself. The watcher
//! therefore observes the post's directory and filters events by file name.

use notify::event::{AccessKind, AccessMode, ModifyKind};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

/// Bursts of events closer together than this trigger one reload.
const RELOAD_DEBOUNCE: Duration = Duration::from_millis(150);

/// The file a [`PostWatcher`] follows.
#[derive(Debug, Clone, PartialEq, Eq)]
struct WatchedPost {
    dir: PathBuf,
    file_name: OsString,
}

impl WatchedPost {
    fn from_path(path: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_os_string();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Some(Self { dir, file_name })
    }

    /// Whether `event` may have changed the post's contents.
    fn is_changed_by(&self, event: &Event) -> bool {
        let touches_post = event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(self.file_name.as_os_str()));
        touches_post
            && matches!(
                event.kind,
                EventKind::Create(_)
                    | EventKind::Modify(ModifyKind::Data(_))
                    | EventKind::Modify(ModifyKind::Name(_))
                    | EventKind::Modify(ModifyKind::Any)
                    | EventKind::Access(AccessKind::Close(AccessMode::Write))
            )
    }
}

pub struct PostWatcher {
    watcher: RecommendedWatcher,
    events: Receiver<notify::Result<Event>>,
    post: Option<WatchedPost>,
    last_reload: Option<Instant>,
}

impl PostWatcher {
    pub fn new() -> notify::Result<Self> {
        let (tx, events) = mpsc::channel();
        let watcher = notify::recommended_watcher(tx)?;
        Ok(Self {
            watcher,
            events,
            post: None,
            last_reload: None,
        })
    }

    /// Follow the post at `path`, replacing any previous one.
    pub fn follow(&mut self, path: &Path) -> notify::Result<()> {
        let post = WatchedPost::from_path(path)
            .ok_or_else(|| notify::Error::path_not_found().add_path(path.to_path_buf()))?;

        if let Some(previous) = self.post.take() {
            if previous.dir != post.dir {
                let _ = self.watcher.unwatch(&previous.dir);
            }
        }
        self.watcher.watch(&post.dir, RecursiveMode::NonRecursive)?;
        tracing::debug!(dir = %post.dir.display(), file = ?post.file_name, "following post");
        self.post = Some(post);
        Ok(())
    }

    /// Drain queued events. Returns true when the post should be reloaded.
    pub fn poll(&mut self) -> bool {
        let Some(ref post) = self.post else {
            return false;
        };

        let mut changed = false;
        for result in self.events.try_iter() {
            match result {
                Ok(event) => changed |= post.is_changed_by(&event),
                Err(err) => tracing::warn!(%err, "file watch error"),
            }
        }
        if !changed {
            return false;
        }

        let now = Instant::now();
        if self
            .last_reload
            .is_some_and(|at| now.duration_since(at) < RELOAD_DEBOUNCE)
        {
            return false;
        }
        self.last_reload = Some(now);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, DataChange, RenameMode};

    fn post() -> WatchedPost {
        WatchedPost::from_path(Path::new("/blog/posts/hello.md")).unwrap()
    }

    #[test]
    fn test_watched_post_splits_path() {
        let post = post();
        assert_eq!(post.dir, PathBuf::from("/blog/posts"));
        assert_eq!(post.file_name, OsString::from("hello.md"));

        let bare = WatchedPost::from_path(Path::new("hello.md")).unwrap();
        assert_eq!(bare.dir, PathBuf::from("."));
    }

    #[test]
    fn test_write_and_atomic_save_are_changes() {
        let post = post();
        let write = Event::new(EventKind::Modify(ModifyKind::Data(DataChange::Content)))
            .add_path(PathBuf::from("/blog/posts/hello.md"));
        let rename = Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::Both)))
            .add_path(PathBuf::from("/blog/posts/.hello.md.swp"))
            .add_path(PathBuf::from("/blog/posts/hello.md"));
        let recreate = Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("/blog/posts/hello.md"));

        assert!(post.is_changed_by(&write));
        assert!(post.is_changed_by(&rename));
        assert!(post.is_changed_by(&recreate));
    }

    #[test]
    fn test_other_files_and_reads_ignored() {
        let post = post();
        let sibling = Event::new(EventKind::Modify(ModifyKind::Data(DataChange::Content)))
            .add_path(PathBuf::from("/blog/posts/other.md"));
        let read = Event::new(EventKind::Access(AccessKind::Read))
            .add_path(PathBuf::from("/blog/posts/hello.md"));

        assert!(!post.is_changed_by(&sibling));
        assert!(!post.is_changed_by(&read));
    }

    #[test]
    fn test_poll_without_post_is_quiet() {
        let mut watcher = PostWatcher::new().unwrap();
        assert!(!watcher.poll());
    }

    #[test]
    fn test_follow_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("post.md");
        std::fs::write(&path, "# Draft\n").unwrap();

        let mut watcher = PostWatcher::new().unwrap();
        watcher.follow(&path).unwrap();
        assert_eq!(
            watcher.post.as_ref().map(|p| p.file_name.clone()),
            Some(OsString::from("post.md"))
        );
    }
}
