use crate::CoreError;
use crate::analyzer::{FileReport, MarkerRules, analyse_source};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct AnalysedFile {
    pub path: PathBuf,
    pub outcome: Result<FileReport, String>,
}

impl AnalysedFile {
    /// `true` when the file was read and has at least one violation.
    pub fn has_violations(&self) -> bool {
        self.outcome.as_ref().is_ok_and(|r| !r.is_empty())
    }

    pub fn is_unreadable(&self) -> bool {
        self.outcome.is_err()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub files_analysed: usize,
    pub files_with_violations: usize,
    pub files_unreadable: usize,
    pub violations: usize,
}

impl ScanSummary {
    pub fn is_clean(&self) -> bool {
        self.files_with_violations == 0 && self.files_unreadable == 0
    }
}

/// Reads `path` and checks its marker lines. Undecodable bytes are replaced
/// rather than rejected, so only I/O failures surface as errors.
pub fn analyse_file(path: &Path, rules: &MarkerRules) -> Result<FileReport, CoreError> {
    let bytes = fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes);
    let report = analyse_source(&text, rules);
    tracing::debug!(
        path = %path.display(),
        lines = report.line_count(),
        "analysed"
    );
    Ok(report)
}

/// Analyses every file in parallel. Results keep the order of `files`;
/// `on_file_done` runs once per file as it finishes.
pub fn process_files<F>(files: &[PathBuf], rules: &MarkerRules, on_file_done: F) -> Vec<AnalysedFile>
where
    F: Fn() + Sync,
{
    files
        .par_iter()
        .map(|p| {
            let outcome = analyse_file(p, rules).map_err(|e| {
                tracing::warn!("Could not read {}: {}", p.display(), e);
                e.to_string()
            });
            on_file_done();
            AnalysedFile {
                path: p.clone(),
                outcome,
            }
        })
        .collect()
}

pub fn summarize(results: &[AnalysedFile]) -> ScanSummary {
    let mut summary = ScanSummary {
        files_analysed: results.len(),
        ..ScanSummary::default()
    };
    for result in results {
        match &result.outcome {
            Ok(report) if !report.is_empty() => {
                summary.files_with_violations += 1;
                summary.violations += report.violation_count();
            }
            Ok(_) => {}
            Err(_) => summary.files_unreadable += 1,
        }
    }
    summary
}
