use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use uuid::Uuid;

use crate::domain::{entities::common::RelativePath, error::DomainError};

/// One change to the file tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FileMutation {
    /// Create a new file with the full content.
    Create { path: RelativePath, content: String },
    /// Insert `text` at byte offset `position` of an existing file, as the
    /// file read when the plan was computed.
    Insert {
        path: RelativePath,
        position: usize,
        /// Human-readable name of the insertion point.
        anchor: String,
        text: String,
    },
}

impl FileMutation {
    pub fn path(&self) -> &RelativePath {
        match self {
            Self::Create { path, .. } | Self::Insert { path, .. } => path,
        }
    }

    pub fn is_create(&self) -> bool {
        matches!(self, Self::Create { .. })
    }
}

/// Complete set of changes for one invocation.
///
/// This is the output of the planning phase. It contains no logic beyond
/// self-validation; applying it is the application layer's job.
#[derive(Debug, Clone, Serialize)]
pub struct MutationPlan {
    pub id: Uuid,
    pub(crate) mutations: Vec<FileMutation>,
    /// Content of each edited file as read at planning time.
    #[serde(skip)]
    pub(crate) baselines: BTreeMap<RelativePath, String>,
}

impl MutationPlan {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            mutations: Vec::new(),
            baselines: BTreeMap::new(),
        }
    }

    /// Remember the content insertion offsets into `path` refer to.
    pub fn record_baseline(&mut self, path: RelativePath, content: impl Into<String>) {
        self.baselines.insert(path, content.into());
    }

    /// Content of `path` when the plan was computed, if recorded.
    pub fn baseline(&self, path: &RelativePath) -> Option<&str> {
        self.baselines.get(path).map(String::as_str)
    }

    pub fn push(&mut self, mutation: FileMutation) {
        self.mutations.push(mutation);
    }

    pub fn extend(&mut self, mutations: impl IntoIterator<Item = FileMutation>) {
        self.mutations.extend(mutations);
    }

    pub fn with(mut self, mutation: FileMutation) -> Self {
        self.push(mutation);
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.mutations.is_empty() {
            return Err(DomainError::EmptyPlan);
        }

        let mut created = HashSet::new();
        for path in self.creations().map(|(path, _)| path) {
            if !created.insert(path) {
                return Err(DomainError::DuplicatePath {
                    path: path.to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn mutations(&self) -> &[FileMutation] {
        &self.mutations
    }

    /// `(path, content)` of every file creation, in plan order.
    pub fn creations(&self) -> impl Iterator<Item = (&RelativePath, &str)> {
        self.mutations.iter().filter_map(|m| match m {
            FileMutation::Create { path, content } => Some((path, content.as_str())),
            _ => None,
        })
    }

    /// Every insertion, in plan order.
    pub fn insertions(&self) -> impl Iterator<Item = &FileMutation> {
        self.mutations.iter().filter(|m| !m.is_create())
    }

    pub fn len(&self) -> usize {
        self.mutations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }
}

impl Default for MutationPlan {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply insertions to `content`.
///
/// Insertions are applied from the highest position down so earlier offsets
/// stay valid; insertions sharing a position keep their relative order.
/// Every position must be a char boundary of `content`.
pub fn apply_insertions<'a>(
    content: &str,
    insertions: impl IntoIterator<Item = (usize, &'a str)>,
) -> Result<String, DomainError> {
    let mut ordered: Vec<(usize, usize, &str)> = insertions
        .into_iter()
        .enumerate()
        .map(|(index, (position, text))| (position, index, text))
        .collect();
    if let Some(&(position, ..)) = ordered
        .iter()
        .find(|(position, ..)| !content.is_char_boundary(*position))
    {
        return Err(DomainError::InsertionOutOfBounds {
            position,
            len: content.len(),
        });
    }
    ordered.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));

    let mut result = content.to_string();
    for (position, _, text) in ordered {
        result.insert_str(position, text);
    }
    Ok(result)
}
