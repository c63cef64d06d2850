use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::rules::Category;

/// One applied change. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    file: PathBuf,
    category: Category,
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    count: Option<usize>,
}

impl ChangeRecord {
    pub fn new(file: &Path, category: Category, description: impl Into<String>) -> Self {
        Self {
            file: file.to_path_buf(),
            category,
            description: description.into(),
            count: None,
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn count(&self) -> Option<usize> {
        self.count
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: Category,
    pub changes: usize,
}

/// Append-only record of every change made during a session
#[derive(Debug, Clone, Default)]
pub struct ChangeLog {
    records: Vec<ChangeRecord>,
}

impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, change: ChangeRecord) {
        self.records.push(change);
    }

    pub fn extend(&mut self, changes: impl IntoIterator<Item = ChangeRecord>) {
        self.records.extend(changes);
    }

    pub fn records(&self) -> &[ChangeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record counts per category, in the order categories first appeared
    pub fn by_category(&self) -> Vec<CategoryCount> {
        let mut groups: Vec<CategoryCount> = Vec::new();

        for record in &self.records {
            match groups.iter_mut().find(|g| g.category == record.category) {
                Some(group) => group.changes += 1,
                None => groups.push(CategoryCount {
                    category: record.category,
                    changes: 1,
                }),
            }
        }

        groups
    }

    pub fn for_file<'a>(&'a self, file: &'a Path) -> impl Iterator<Item = &'a ChangeRecord> + 'a {
        self.records.iter().filter(move |r| r.file == file)
    }

    pub fn into_records(self) -> Vec<ChangeRecord> {
        self.records
    }
}
