use log::{info, warn};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::probe::FileProbe;
use crate::domain::DataFileReference;

/// A path rewrite performed by the corrector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Correction {
    pub from: String,
    pub to: String,
    pub line: u32,
}

/// Result of correcting a batch of references
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CorrectionOutcome {
    /// Same length and order as the input; only paths may differ
    pub references: Vec<DataFileReference>,
    pub corrections: Vec<Correction>,
    /// Missing references whose directory had no existing file to vote with
    pub uncorrectable: Vec<DataFileReference>,
}

/// Repairs references to data files that don't exist
///
/// References are grouped by directory. Within a group, the file name that
/// occurs most often among references that *do* exist (first seen wins a tie)
/// becomes the group's majority name, and every missing reference in the group
/// is pointed at it. A group with no existing reference is left alone.
pub struct ReferenceCorrector<P> {
    root: PathBuf,
    probe: P,
}

/// References sharing one directory, in first-seen order
struct DirectoryGroup {
    dir: String,
    members: Vec<usize>,
}

impl<P: FileProbe> ReferenceCorrector<P> {
    pub fn new(root: impl Into<PathBuf>, probe: P) -> Self {
        Self { root: root.into(), probe }
    }

    /// Where a reference's file lives on disk: absolute paths as-is, relative
    /// ones under the data root
    #[must_use]
    pub fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    #[must_use]
    pub fn correct(&self, references: Vec<DataFileReference>) -> CorrectionOutcome {
        let exists = self.probe_all(&references);
        let mut outcome = CorrectionOutcome::default();
        let mut references = references;

        for group in group_by_directory(&references) {
            let majority = majority_name(&references, &group.members, &exists);

            for &idx in &group.members {
                if exists[idx] {
                    continue;
                }
                let Some(name) = majority.as_deref() else {
                    warn!("Data file not found, nothing to correct from: {}", references[idx].path);
                    outcome.uncorrectable.push(references[idx].clone());
                    continue;
                };

                let corrected = join_directory(&group.dir, name);
                info!(
                    "Corrected {} -> {} (line {})",
                    references[idx].path, corrected, references[idx].line
                );
                outcome.corrections.push(Correction {
                    from: std::mem::replace(&mut references[idx].path, corrected.clone()),
                    to: corrected,
                    line: references[idx].line,
                });
            }
        }

        outcome.references = references;
        outcome
    }

    /// Existence of each reference's file, probing each distinct path once
    fn probe_all(&self, references: &[DataFileReference]) -> Vec<bool> {
        let mut seen: HashMap<&str, bool> = HashMap::new();
        references
            .iter()
            .map(|r| {
                *seen
                    .entry(r.path.as_str())
                    .or_insert_with(|| self.probe.exists(&self.resolve(&r.path)))
            })
            .collect()
    }
}

fn split_path(path: &str) -> (String, Option<String>) {
    let path = Path::new(path);
    let dir = path.parent().map(|p| p.to_string_lossy().into_owned()).unwrap_or_default();
    let name = path.file_name().map(|n| n.to_string_lossy().into_owned());
    (dir, name)
}

fn join_directory(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        Path::new(dir).join(name).to_string_lossy().into_owned()
    }
}

fn group_by_directory(references: &[DataFileReference]) -> Vec<DirectoryGroup> {
    let mut groups: Vec<DirectoryGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (idx, reference) in references.iter().enumerate() {
        let (dir, _) = split_path(&reference.path);
        if let Some(&g) = index.get(&dir) {
            groups[g].members.push(idx);
        } else {
            index.insert(dir.clone(), groups.len());
            groups.push(DirectoryGroup { dir, members: vec![idx] });
        }
    }

    groups
}

/// Most frequent file name among the group's existing references
fn majority_name(
    references: &[DataFileReference],
    members: &[usize],
    exists: &[bool],
) -> Option<String> {
    // (name, count) in first-seen order, so a strict `>` keeps the earliest on ties
    let mut counts: Vec<(String, usize)> = Vec::new();
    for &idx in members.iter().filter(|&&idx| exists[idx]) {
        let (_, Some(name)) = split_path(&references[idx].path) else {
            continue;
        };
        match counts.iter_mut().find(|(n, _)| *n == name) {
            Some((_, count)) => *count += 1,
            None => counts.push((name, 1)),
        }
    }

    let mut best: Option<(String, usize)> = None;
    for (name, count) in counts {
        let better = match &best {
            Some((_, best_count)) => count > *best_count,
            None => true,
        };
        if better {
            best = Some((name, count));
        }
    }
    best.map(|(name, _)| name)
}
