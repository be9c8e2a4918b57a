//! git::interface
//!
//! Git interface implementation using git2.
//!
//! # Design
//!
//! The `Git` struct wraps a `git2::Repository` and exposes exactly the
//! read-only queries the release-notes run needs. Errors are normalized into
//! typed [`GitError`] variants at this boundary so higher layers never see
//! raw git2 errors.
//!
//! # Path filtering
//!
//! libgit2's revwalk has no pathspec filter, so path scoping is done by
//! comparing the tree entry at the path between a commit and its first
//! parent. A commit "touches" a path when the entry's object id differs (or
//! the entry appears or disappears). Merge commits whose first-parent diff is
//! empty are skipped, which matches how release history is read here: the
//! interesting commits land on the first-parent chain.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// Repository is bare (no working directory).
    #[error("bare repository not supported")]
    BareRepo,

    /// The path does not exist in a commit's tree.
    #[error("path not found at commit {commit}: {path}")]
    PathNotFound {
        /// Abbreviated commit id
        commit: String,
        /// The path that was looked up
        path: String,
    },

    /// Blob content is not valid UTF-8.
    #[error("blob is not valid UTF-8: {oid}")]
    InvalidUtf8 {
        /// The OID of the blob
        oid: String,
    },

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        GitError::Internal {
            message: err.message().to_string(),
        }
    }
}

/// A commit identifier (full hex hash).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommitId(String);

impl CommitId {
    fn from_oid(oid: git2::Oid) -> Self {
        Self(oid.to_string())
    }

    fn to_oid(&self) -> Result<git2::Oid, GitError> {
        git2::Oid::from_str(&self.0).map_err(|e| GitError::Internal {
            message: e.message().to_string(),
        })
    }

    /// The full hex hash.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated hash of the given length.
    pub fn short(&self, len: usize) -> &str {
        &self.0[..len.min(self.0.len())]
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Information about a commit.
#[derive(Debug, Clone)]
pub struct CommitInfo {
    /// The commit id
    pub id: CommitId,
    /// First line of the commit message
    pub summary: String,
    /// Full commit message
    pub message: String,
}

/// The Git interface.
///
/// Opened once per run; the underlying repository handle is released when
/// this struct drops at the end of the run.
pub struct Git {
    repo: git2::Repository,
}

impl fmt::Debug for Git {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Git").field("path", &self.repo.path()).finish()
    }
}

impl Git {
    /// Open a repository at the given path.
    ///
    /// Uses `git2::Repository::discover`, so `path` can be any directory
    /// within the repository.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if no repository is found
    /// - [`GitError::BareRepo`] if the repository has no working directory
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;

        if repo.is_bare() {
            return Err(GitError::BareRepo);
        }

        Ok(Self { repo })
    }

    /// Resolve HEAD to its commit id.
    pub fn head(&self) -> Result<CommitId, GitError> {
        let commit = self.repo.head()?.peel_to_commit()?;
        Ok(CommitId::from_oid(commit.id()))
    }

    /// Walk commits reachable from `start` that touch `path`, newest first,
    /// visiting at most `max` matching commits.
    pub fn commits_touching(
        &self,
        start: &CommitId,
        path: &str,
        max: usize,
    ) -> Result<Vec<CommitInfo>, GitError> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(git2::Sort::TOPOLOGICAL | git2::Sort::TIME)?;
        revwalk.push(start.to_oid()?)?;

        let mut commits = Vec::new();
        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            if self.touches_path(&commit, path)? {
                commits.push(Self::commit_info(&commit));
                if commits.len() >= max {
                    break;
                }
            }
        }

        Ok(commits)
    }

    /// Walk commits in the range `(from, to]` that touch `path`, newest first.
    ///
    /// `from` is exclusive, `to` is inclusive: the walk visits commits
    /// reachable from `to` but not from `from`.
    pub fn commits_in_range(
        &self,
        from: &CommitId,
        to: &CommitId,
        path: &str,
    ) -> Result<Vec<CommitInfo>, GitError> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(git2::Sort::TOPOLOGICAL | git2::Sort::TIME)?;
        revwalk.push(to.to_oid()?)?;
        revwalk.hide(from.to_oid()?)?;

        let mut commits = Vec::new();
        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            if self.touches_path(&commit, path)? {
                commits.push(Self::commit_info(&commit));
            }
        }

        Ok(commits)
    }

    /// Read a file's content at a commit as UTF-8 text.
    ///
    /// # Errors
    ///
    /// - [`GitError::PathNotFound`] if the path is absent from the commit's tree
    /// - [`GitError::InvalidUtf8`] if the blob is not valid UTF-8
    pub fn file_content_at(&self, commit: &CommitId, path: &str) -> Result<String, GitError> {
        let found = self.repo.find_commit(commit.to_oid()?)?;
        let tree = found.tree()?;

        let entry = tree
            .get_path(Path::new(path))
            .map_err(|_| GitError::PathNotFound {
                commit: commit.short(12).to_string(),
                path: path.to_string(),
            })?;

        let blob = self.repo.find_blob(entry.id())?;
        String::from_utf8(blob.content().to_vec()).map_err(|_| GitError::InvalidUtf8 {
            oid: entry.id().to_string(),
        })
    }

    /// Whether a commit changed `path` relative to its first parent.
    ///
    /// Root commits touch the path if it exists in their tree. `path` may
    /// name a file or a directory; for directories the comparison is on the
    /// subtree's object id.
    fn touches_path(&self, commit: &git2::Commit, path: &str) -> Result<bool, GitError> {
        let entry = Self::tree_entry_id(&commit.tree()?, path);

        if commit.parent_count() == 0 {
            return Ok(entry.is_some());
        }

        let parent = commit.parent(0)?;
        let parent_entry = Self::tree_entry_id(&parent.tree()?, path);

        Ok(entry != parent_entry)
    }

    fn tree_entry_id(tree: &git2::Tree, path: &str) -> Option<git2::Oid> {
        tree.get_path(Path::new(path)).ok().map(|entry| entry.id())
    }

    fn commit_info(commit: &git2::Commit) -> CommitInfo {
        CommitInfo {
            id: CommitId::from_oid(commit.id()),
            summary: commit.summary().unwrap_or("").to_string(),
            message: commit.message().unwrap_or("").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_id_short_clamps_to_length() {
        let id = CommitId("deadbeefdeadbeefdeadbeefdeadbeefdeadbeef".to_string());
        assert_eq!(id.short(7), "deadbee");
        assert_eq!(id.short(100), id.as_str());
    }

    #[test]
    fn open_rejects_non_repository() {
        let dir = tempfile::tempdir().unwrap();
        let err = Git::open(dir.path()).unwrap_err();
        assert!(matches!(err, GitError::NotARepo { .. }));
    }

    #[test]
    fn error_display_is_stable() {
        let err = GitError::PathNotFound {
            commit: "deadbeefdead".to_string(),
            path: "modules/test/poshi".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "path not found at commit deadbeefdead: modules/test/poshi"
        );
    }
}
