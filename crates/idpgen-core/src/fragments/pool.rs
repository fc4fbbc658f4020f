use super::pattern::SsPattern;
use super::record::FragmentRecord;
use crate::core::models::fragment::{AngleFragment, SsClass, TorsionTriple};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum PoolLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
}

/// The in-memory fragment database: contiguous same-label residue runs merged
/// into immutable [`AngleFragment`]s, grouped by secondary-structure class.
///
/// The pool is loaded once and shared read-only across all conformer builds.
#[derive(Debug, Clone, Default)]
pub struct FragmentPool {
    fragments: HashMap<SsClass, Vec<AngleFragment>>,
}

impl FragmentPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges one source's per-residue records into the pool.
    ///
    /// Contiguous records sharing a class letter become one fragment; a record
    /// with an unrecognized class letter ends the current run and is skipped
    /// with a warning, mirroring how annotation gaps appear in the data.
    pub fn add_records(&mut self, source: &str, records: &[FragmentRecord]) {
        let mut run_class: Option<SsClass> = None;
        let mut run_start = 0;
        let mut run_residues = String::new();
        let mut run_torsions: Vec<TorsionTriple> = Vec::new();

        for (index, record) in records.iter().enumerate() {
            let class = SsClass::from_char(record.label);
            if class.is_none() {
                warn!(
                    source,
                    index,
                    label = %record.label,
                    "Skipping record with unknown secondary-structure label."
                );
            }

            if class != run_class {
                self.flush_run(source, run_class.take(), run_start, &mut run_residues, &mut run_torsions);
                run_class = class;
                run_start = index;
            }

            if run_class.is_some() {
                run_residues.push(record.residue);
                run_torsions.push(TorsionTriple {
                    phi: record.phi,
                    psi: record.psi,
                    omega: record.omega,
                });
            }
        }
        self.flush_run(source, run_class, run_start, &mut run_residues, &mut run_torsions);
    }

    fn flush_run(
        &mut self,
        source: &str,
        class: Option<SsClass>,
        start: usize,
        residues: &mut String,
        torsions: &mut Vec<TorsionTriple>,
    ) {
        let Some(class) = class else {
            residues.clear();
            torsions.clear();
            return;
        };
        if torsions.is_empty() {
            return;
        }
        self.fragments.entry(class).or_default().push(AngleFragment {
            source: source.to_string(),
            start,
            class,
            residues: std::mem::take(residues),
            torsions: std::mem::take(torsions),
        });
    }

    /// Loads every `*.data` file in a directory, one record stream per file.
    /// Files are comma-separated, headerless, one record per residue; the
    /// file stem becomes the fragments' source identifier.
    pub fn load_dir(dir: &Path) -> Result<Self, PoolLoadError> {
        let io_err = |source| PoolLoadError::Io {
            path: dir.to_string_lossy().to_string(),
            source,
        };

        let mut paths: Vec<_> = std::fs::read_dir(dir)
            .map_err(io_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(io_err)?
            .into_iter()
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "data"))
            .collect();
        paths.sort();

        let mut pool = Self::new();
        for path in &paths {
            let mut reader = csv::ReaderBuilder::new()
                .has_headers(false)
                .trim(csv::Trim::All)
                .from_path(path)
                .map_err(|e| PoolLoadError::Csv {
                    path: path.to_string_lossy().to_string(),
                    source: e,
                })?;

            let records: Vec<FragmentRecord> = reader
                .deserialize()
                .collect::<Result<_, _>>()
                .map_err(|e| PoolLoadError::Csv {
                    path: path.to_string_lossy().to_string(),
                    source: e,
                })?;

            let source = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().to_string())
                .unwrap_or_default();
            pool.add_records(&source, &records);
        }

        info!(
            files = paths.len(),
            fragments = pool.len(),
            "Fragment pool loaded."
        );
        Ok(pool)
    }

    /// Total number of stored fragments across all classes.
    pub fn len(&self) -> usize {
        self.fragments.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The stored runs of one class, in load order.
    pub fn fragments_of(&self, class: SsClass) -> &[AngleFragment] {
        self.fragments.get(&class).map_or(&[], Vec::as_slice)
    }

    /// Answers a pattern query with every admissible window over the stored
    /// runs of the pattern's class: one greedy window per start offset,
    /// overlapping, clamped to the run tail (regex-lookahead semantics).
    ///
    /// An empty result is not an error here; the build request decides
    /// whether an empty candidate set is fatal.
    pub fn fragments_matching(&self, pattern: &SsPattern) -> Vec<AngleFragment> {
        let mut windows = Vec::new();
        for run in self.fragments_of(pattern.class) {
            for offset in 0..run.len() {
                let Some(len) = pattern.window_len_at(run.len(), offset) else {
                    continue;
                };
                windows.push(AngleFragment {
                    source: run.source.clone(),
                    start: run.start + offset,
                    class: run.class,
                    residues: run.residues[offset..offset + len].to_string(),
                    torsions: run.torsions[offset..offset + len].to_vec(),
                });
            }
        }
        debug!(pattern = %pattern, windows = windows.len(), "Resolved pattern query.");
        windows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn record(residue: char, label: char, phi: f64) -> FragmentRecord {
        FragmentRecord {
            residue,
            label,
            x: 0.0,
            y: 0.0,
            z: 0.0,
            phi,
            psi: phi + 0.1,
            omega: phi + 0.2,
            chi1: 0.0,
        }
    }

    #[test]
    fn contiguous_same_label_runs_merge_into_one_fragment() {
        let mut pool = FragmentPool::new();
        pool.add_records(
            "entry",
            &[
                record('A', 'L', 0.1),
                record('G', 'L', 0.2),
                record('S', 'L', 0.3),
            ],
        );

        let loops = pool.fragments_of(SsClass::Loop);
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].residues, "AGS");
        assert_eq!(loops[0].len(), 3);
        assert_eq!(loops[0].start, 0);
    }

    #[test]
    fn label_changes_split_runs() {
        let mut pool = FragmentPool::new();
        pool.add_records(
            "entry",
            &[
                record('A', 'L', 0.1),
                record('G', 'H', 0.2),
                record('S', 'H', 0.3),
                record('V', 'L', 0.4),
            ],
        );

        assert_eq!(pool.fragments_of(SsClass::Loop).len(), 2);
        assert_eq!(pool.fragments_of(SsClass::Helix).len(), 1);
        assert_eq!(pool.fragments_of(SsClass::Helix)[0].residues, "GS");
        assert_eq!(pool.fragments_of(SsClass::Loop)[1].start, 3);
    }

    #[test]
    fn unknown_labels_terminate_runs_and_are_skipped() {
        let mut pool = FragmentPool::new();
        pool.add_records(
            "entry",
            &[
                record('A', 'L', 0.1),
                record('G', '?', 0.2),
                record('S', 'L', 0.3),
            ],
        );

        let loops = pool.fragments_of(SsClass::Loop);
        assert_eq!(loops.len(), 2);
        assert_eq!(loops[0].residues, "A");
        assert_eq!(loops[1].residues, "S");
    }

    #[test]
    fn pattern_windows_overlap_and_clamp() {
        let mut pool = FragmentPool::new();
        let records: Vec<FragmentRecord> = "AGSVL"
            .chars()
            .enumerate()
            .map(|(i, c)| record(c, 'L', i as f64))
            .collect();
        pool.add_records("entry", &records);

        let pattern: SsPattern = "L{2,3}".parse().unwrap();
        let windows = pool.fragments_matching(&pattern);

        let spans: Vec<(usize, &str)> = windows
            .iter()
            .map(|w| (w.start, w.residues.as_str()))
            .collect();
        assert_eq!(
            spans,
            vec![(0, "AGS"), (1, "GSV"), (2, "SVL"), (3, "VL")]
        );
    }

    #[test]
    fn queries_for_an_absent_class_are_empty() {
        let mut pool = FragmentPool::new();
        pool.add_records("entry", &[record('A', 'L', 0.1), record('G', 'L', 0.2)]);

        let pattern: SsPattern = "H{2,6}".parse().unwrap();

        assert!(pool.fragments_matching(&pattern).is_empty());
    }

    #[test]
    fn load_dir_reads_data_files_and_skips_others() {
        let dir = tempfile::tempdir().unwrap();
        let mut data = std::fs::File::create(dir.path().join("entry1.data")).unwrap();
        writeln!(data, "A,L,0.0,0.0,0.0,-1.0,2.0,3.1,0.0").unwrap();
        writeln!(data, "G,L,0.0,0.0,0.0,-1.1,2.1,3.1,0.0").unwrap();
        let mut other = std::fs::File::create(dir.path().join("notes.txt")).unwrap();
        writeln!(other, "not a database file").unwrap();

        let pool = FragmentPool::load_dir(dir.path()).unwrap();

        assert_eq!(pool.len(), 1);
        let fragment = &pool.fragments_of(SsClass::Loop)[0];
        assert_eq!(fragment.source, "entry1");
        assert_eq!(fragment.residues, "AG");
        assert_eq!(fragment.torsions[1].phi, -1.1);
    }

    #[test]
    fn load_dir_propagates_csv_errors_with_path_context() {
        let dir = tempfile::tempdir().unwrap();
        let mut bad = std::fs::File::create(dir.path().join("bad.data")).unwrap();
        writeln!(bad, "A,L,not-a-number").unwrap();

        let result = FragmentPool::load_dir(dir.path());

        assert!(matches!(result, Err(PoolLoadError::Csv { path, .. }) if path.contains("bad.data")));
    }

    #[test]
    fn load_dir_reports_missing_directory() {
        let result = FragmentPool::load_dir(Path::new("no_such_database_dir"));

        assert!(matches!(result, Err(PoolLoadError::Io { .. })));
    }
}
