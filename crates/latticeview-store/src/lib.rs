//! Graph-document source.
//!
//! Lattice documents live as JSON files under a data directory, addressed by
//! a lattice identifier and a "full" flag. Loads are synchronous reads; the
//! [`LoadCoordinator`] moves them off the UI thread and discards results of
//! loads that have been superseded by a newer request.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

use crossbeam_channel::{Receiver, Sender, unbounded};
use latticeview_core::{ConceptLattice, LoadError};

/// Resolves and reads lattice documents from a data directory.
#[derive(Debug, Clone)]
pub struct DocumentSource {
    data_dir: PathBuf,
}

impl DocumentSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Deterministic document location for `(id, full)`:
    /// `<data_dir>/concept-<id>.json`, or `concept-<id>-full.json` when the
    /// full variant is requested.
    pub fn path_for(&self, id: &str, full: bool) -> PathBuf {
        let file = if full {
            format!("concept-{id}-full.json")
        } else {
            format!("concept-{id}.json")
        };
        self.data_dir.join(file)
    }

    /// Read, parse, reindex, and validate one document.
    ///
    /// Fails with a [`LoadError`] on read or parse failure, or when the
    /// document violates the structural invariants. Never retried here.
    pub fn load(&self, id: &str, full: bool) -> Result<ConceptLattice, LoadError> {
        let path = self.path_for(id, full);
        let content = fs::read_to_string(&path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;
        let mut lattice: ConceptLattice =
            serde_json::from_str(&content).map_err(|source| LoadError::Parse {
                path: path.clone(),
                source,
            })?;
        lattice.reindex_nodes();
        lattice
            .validate()
            .map_err(|source| LoadError::Malformed { path, source })?;
        tracing::debug!(
            id,
            full,
            nodes = lattice.nodes.len(),
            links = lattice.links.len(),
            "loaded lattice document"
        );
        Ok(lattice)
    }
}

/// Completed load, tagged with the request generation that produced it.
#[derive(Debug)]
pub struct LoadOutcome {
    pub generation: u64,
    pub id: String,
    pub full: bool,
    pub result: Result<ConceptLattice, LoadError>,
}

/// Runs document loads on background threads, one generation per request.
///
/// Requesting a new load bumps the generation; outcomes of earlier
/// generations still in flight are dropped on receipt, so switching lattices
/// quickly can never apply a stale response over a newer one.
pub struct LoadCoordinator {
    source: DocumentSource,
    generation: u64,
    tx: Sender<LoadOutcome>,
    rx: Receiver<LoadOutcome>,
}

impl LoadCoordinator {
    pub fn new(source: DocumentSource) -> Self {
        let (tx, rx) = unbounded();
        Self {
            source,
            generation: 0,
            tx,
            rx,
        }
    }

    pub fn source(&self) -> &DocumentSource {
        &self.source
    }

    /// Start loading `(id, full)` in the background. Returns the generation
    /// assigned to this request.
    pub fn request(&mut self, id: &str, full: bool) -> u64 {
        self.generation += 1;
        let generation = self.generation;
        let source = self.source.clone();
        let tx = self.tx.clone();
        let id = id.to_owned();

        thread::Builder::new()
            .name(format!("lattice-load-{generation}"))
            .spawn(move || {
                let result = source.load(&id, full);
                // The receiver may be gone if the app shut down mid-load.
                let _ = tx.send(LoadOutcome {
                    generation,
                    id,
                    full,
                    result,
                });
            })
            .expect("failed to spawn lattice load thread");

        generation
    }

    /// Drain completed loads, returning the outcome of the current
    /// generation if it has arrived. Stale outcomes are logged and dropped.
    pub fn poll(&mut self) -> Option<LoadOutcome> {
        let mut latest = None;
        for outcome in self.rx.try_iter() {
            if outcome.generation == self.generation {
                latest = Some(outcome);
            } else {
                tracing::debug!(
                    generation = outcome.generation,
                    current = self.generation,
                    id = outcome.id,
                    "dropping stale load outcome"
                );
            }
        }
        latest
    }

    /// Generation assigned to the most recent request.
    pub fn current_generation(&self) -> u64 {
        self.generation
    }
}
