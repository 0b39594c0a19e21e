use serde::{Deserialize, Serialize};

pub mod error;
pub mod lattice;
pub mod settings;

pub use error::{LoadError, MalformedGraphError};
pub use lattice::{ConceptLattice, ConceptNode, LatticeLink};
pub use settings::LatticeSettings;

/// Index of a concept node within one loaded lattice.
///
/// Node ids are rewritten at load time to equal the node's position in the
/// `nodes` sequence, so a `NodeIndex` is stable for the life of one load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeIndex(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LinkIndex(pub usize);
