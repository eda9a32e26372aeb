use std::path::Path;

use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use git2::{Commit, Repository, Sort};

use crate::core::{CommitRecord, ParentIds};

/// Commit feed adapter backed by libgit2.
///
/// `collect` walks HEAD and every branch tip in topological order, so the
/// records it yields satisfy the children-before-parents precondition of
/// the layout pass.
pub struct HistoryWalker {
    repo: Repository,
}

impl HistoryWalker {
    /// Open a repository by path, or from the environment when no path is
    /// given.
    pub fn open(repo_path: Option<&Path>) -> Result<Self> {
        let repo = match repo_path {
            Some(path) => Repository::open(path),
            None => Repository::open_from_env(),
        }
        .context("Failed to open repository")?;

        Ok(Self { repo })
    }

    /// Walk the history into an ordered commit feed.
    pub fn collect(&self, limit: Option<usize>) -> Result<Vec<CommitRecord>> {
        let mut revwalk = self.repo.revwalk()?;

        revwalk.push_head()?;
        for branch in self.repo.branches(None)? {
            let (branch, _) = branch?;
            if let Some(target) = branch.get().target() {
                revwalk.push(target)?;
            }
        }

        // Children before parents, ties broken by commit time
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;

        let mut records = Vec::new();
        for oid in revwalk {
            let oid = oid?;
            let commit = self.repo.find_commit(oid)?;
            records.push(self.commit_to_record(&commit)?);

            if let Some(limit) = limit {
                if records.len() >= limit {
                    break;
                }
            }
        }

        tracing::debug!(commits = records.len(), "collected commit feed");
        Ok(records)
    }

    fn commit_to_record(&self, commit: &Commit) -> Result<CommitRecord> {
        let id = commit.id().to_string();
        let parent_ids: ParentIds = commit.parent_ids().map(|oid| oid.to_string()).collect();

        let timestamp = Utc
            .timestamp_opt(commit.time().seconds(), 0)
            .single()
            .context("Invalid commit timestamp")?;

        let author = commit.author().name().unwrap_or("Unknown").to_string();
        let message = commit.summary().unwrap_or("").to_string();

        Ok(CommitRecord::new(id, parent_ids, timestamp, author, message))
    }

    /// Branch and tag names with their target ids.
    pub fn refs(&self) -> Result<Vec<(String, String)>> {
        let mut refs = Vec::new();

        for branch in self.repo.branches(None)? {
            let (branch, _) = branch?;
            if let Some(name) = branch.name()? {
                if let Some(target) = branch.get().target() {
                    refs.push((name.to_string(), target.to_string()));
                }
            }
        }

        self.repo.tag_foreach(|oid, name| {
            if let Ok(name_str) = std::str::from_utf8(name) {
                refs.push((name_str.to_string(), oid.to_string()));
            }
            true
        })?;

        Ok(refs)
    }

    /// Current HEAD target id, if the repository has one.
    pub fn head(&self) -> Result<Option<String>> {
        match self.repo.head() {
            Ok(head) => Ok(head.target().map(|oid| oid.to_string())),
            Err(_) => Ok(None),
        }
    }
}
