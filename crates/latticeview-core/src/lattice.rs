use serde::{Deserialize, Serialize};

use crate::error::MalformedGraphError;

/// One concept of the lattice: a set of objects sharing a set of attributes,
/// placed at a hierarchy level (1 = top, most general).
///
/// The `objects`/`attributes` vectors carry the full, inherited-inclusive
/// sets from the document. The `owned_*` vectors are derived at layout time
/// and hold only the elements exclusive to this concept's level transition;
/// they are what collapsed labels display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptNode {
    /// Position of this node in the `nodes` sequence. Any id present in the
    /// source payload is overwritten at load time.
    #[serde(default)]
    pub id: usize,
    pub level: u32,
    #[serde(default)]
    pub objects: Vec<String>,
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default)]
    pub owned_objects: Vec<String>,
    #[serde(default)]
    pub owned_attributes: Vec<String>,

    // Simulation-mutable position. `initial_y` is fixed at layout time and
    // never changes; labels and link endpoints read it so vertical position
    // stays level-locked while `x` is free to move.
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub initial_y: f32,

    /// Pinned against force-driven movement. Only direct drag moves a fixed
    /// node.
    #[serde(default)]
    pub fixed: bool,
}

impl ConceptNode {
    /// Text shown above the node: the attribute set joined by `" | "`.
    pub fn top_label(&self, collapse: bool) -> String {
        if collapse {
            self.owned_attributes.join(" | ")
        } else {
            self.attributes.join(" | ")
        }
    }

    /// Text shown below the node: the object set joined by `" | "`.
    pub fn bottom_label(&self, collapse: bool) -> String {
        if collapse {
            self.owned_objects.join(" | ")
        } else {
            self.objects.join(" | ")
        }
    }
}

/// Direct subsumption edge between two concepts, as indices into `nodes`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LatticeLink {
    pub source: usize,
    pub target: usize,
}

/// A loaded concept-lattice graph document.
///
/// Created once per load, mutated in place by the simulation and the
/// interaction handlers for the life of one visualization session, and
/// discarded when a new lattice is loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptLattice {
    pub nodes: Vec<ConceptNode>,
    #[serde(default)]
    pub links: Vec<LatticeLink>,
    /// Index of the designated bottom-most node.
    pub last_node: usize,
    pub max_level: u32,
}

impl ConceptLattice {
    /// Rewrite every node's `id` to its zero-based position in `nodes`,
    /// overwriting whatever the payload carried.
    pub fn reindex_nodes(&mut self) {
        for (index, node) in self.nodes.iter_mut().enumerate() {
            node.id = index;
        }
    }

    /// Check the document's structural invariants before layout.
    pub fn validate(&self) -> Result<(), MalformedGraphError> {
        let node_count = self.nodes.len();
        if node_count == 0 {
            return Err(MalformedGraphError::Empty);
        }
        if self.max_level < 1 {
            return Err(MalformedGraphError::MaxLevelOutOfRange {
                max_level: self.max_level,
            });
        }
        if self.last_node >= node_count {
            return Err(MalformedGraphError::LastNodeOutOfRange {
                last_node: self.last_node,
                node_count,
            });
        }
        for (index, link) in self.links.iter().enumerate() {
            for endpoint in [link.source, link.target] {
                if endpoint >= node_count {
                    return Err(MalformedGraphError::DanglingLink {
                        link: index,
                        node: endpoint,
                        node_count,
                    });
                }
            }
        }
        for (index, node) in self.nodes.iter().enumerate() {
            if node.level > self.max_level {
                return Err(MalformedGraphError::LevelOutOfRange {
                    node: index,
                    level: node.level,
                    max_level: self.max_level,
                });
            }
        }
        Ok(())
    }

    /// Level of the designated bottom node, the upper end of the color ramp
    /// domain.
    pub fn bottom_level(&self) -> u32 {
        self.nodes[self.last_node].level
    }

    /// Pixel height of the mounting region for this lattice.
    pub fn viewport_height(&self) -> f32 {
        self.max_level as f32 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(level: u32) -> ConceptNode {
        ConceptNode {
            id: 0,
            level,
            objects: Vec::new(),
            attributes: Vec::new(),
            owned_objects: Vec::new(),
            owned_attributes: Vec::new(),
            x: 0.0,
            y: 0.0,
            initial_y: 0.0,
            fixed: false,
        }
    }

    fn lattice() -> ConceptLattice {
        ConceptLattice {
            nodes: vec![node(1), node(2), node(3)],
            links: vec![
                LatticeLink {
                    source: 0,
                    target: 1,
                },
                LatticeLink {
                    source: 1,
                    target: 2,
                },
            ],
            last_node: 2,
            max_level: 3,
        }
    }

    #[test]
    fn parses_camel_case_wire_format_and_ignores_unknown_fields() {
        let raw = r#"{
            "nodes": [
                {"id": 99, "level": 1, "objects": ["o1"], "attributes": []},
                {"id": 42, "level": 2, "objects": [], "attributes": ["a1"]}
            ],
            "links": [{"source": 0, "target": 1}],
            "lastNode": 1,
            "maxLevel": 2,
            "analogicalComplexes": [[0, 1]]
        }"#;

        let mut parsed: ConceptLattice = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.nodes.len(), 2);
        assert_eq!(parsed.max_level, 2);
        assert_eq!(parsed.last_node, 1);

        // Payload ids are untrusted; reindexing makes id == position.
        parsed.reindex_nodes();
        assert_eq!(parsed.nodes[0].id, 0);
        assert_eq!(parsed.nodes[1].id, 1);
    }

    #[test]
    fn validates_well_formed_document() {
        assert_eq!(lattice().validate(), Ok(()));
    }

    #[test]
    fn rejects_empty_document() {
        let mut l = lattice();
        l.nodes.clear();
        assert_eq!(l.validate(), Err(MalformedGraphError::Empty));
    }

    #[test]
    fn rejects_dangling_link() {
        let mut l = lattice();
        l.links.push(LatticeLink {
            source: 0,
            target: 7,
        });
        assert_eq!(
            l.validate(),
            Err(MalformedGraphError::DanglingLink {
                link: 2,
                node: 7,
                node_count: 3,
            })
        );
    }

    #[test]
    fn rejects_last_node_out_of_range() {
        let mut l = lattice();
        l.last_node = 3;
        assert_eq!(
            l.validate(),
            Err(MalformedGraphError::LastNodeOutOfRange {
                last_node: 3,
                node_count: 3,
            })
        );
    }

    #[test]
    fn rejects_level_above_max_level() {
        let mut l = lattice();
        l.nodes[1].level = 9;
        assert_eq!(
            l.validate(),
            Err(MalformedGraphError::LevelOutOfRange {
                node: 1,
                level: 9,
                max_level: 3,
            })
        );
    }

    #[test]
    fn zero_links_is_well_formed() {
        let mut l = lattice();
        l.links.clear();
        assert_eq!(l.validate(), Ok(()));
    }

    #[test]
    fn labels_join_full_or_owned_sets() {
        let mut n = node(1);
        n.attributes = vec!["a".into(), "b".into()];
        n.owned_attributes = vec!["b".into()];
        n.objects = vec!["x".into(), "y".into()];
        n.owned_objects = vec!["x".into()];

        assert_eq!(n.top_label(false), "a | b");
        assert_eq!(n.top_label(true), "b");
        assert_eq!(n.bottom_label(false), "x | y");
        assert_eq!(n.bottom_label(true), "x");
    }
}
