use std::collections::HashMap;

use latticeview_core::ConceptLattice;

/// Minimum visual radius assumed by the collision pass, independent of the
/// configured circle radius.
const MIN_COLLIDE_RADIUS: f32 = 15.0;
/// Margin added around the visual extent of a node.
const COLLIDE_MARGIN: f32 = 7.0;

/// Effective collision radius of a node.
///
/// `label_width` is the widest rendered label of the node when label
/// collapsing and that label's visibility are both enabled, and 0 otherwise;
/// the caller measures text since this crate has no rendering surface.
pub fn effective_radius(label_width: f32) -> f32 {
    MIN_COLLIDE_RADIUS.max(label_width / 2.0) + COLLIDE_MARGIN
}

/// Spatial partition used to prune collision tests.
///
/// Collision is level-scoped: the distance metric uses the difference of the
/// static `initial_y` values as one axis, so nodes on different levels never
/// collide and each level can be partitioned independently. Within a level,
/// nodes are sorted by `x` and a pair is pruned as soon as its x-extents
/// cannot possibly overlap.
pub struct LevelIntervalIndex {
    /// Node indices grouped per level, each group sorted by `x`.
    groups: Vec<Vec<usize>>,
}

impl LevelIntervalIndex {
    pub fn build(lattice: &ConceptLattice) -> Self {
        let mut by_level: HashMap<u32, Vec<usize>> = HashMap::new();
        for (index, node) in lattice.nodes.iter().enumerate() {
            by_level.entry(node.level).or_default().push(index);
        }

        let mut groups: Vec<Vec<usize>> = by_level.into_values().collect();
        for group in &mut groups {
            group.sort_by(|&a, &b| {
                lattice.nodes[a]
                    .x
                    .total_cmp(&lattice.nodes[b].x)
                    .then(a.cmp(&b))
            });
        }
        // Deterministic group order regardless of hash state.
        groups.sort_by_key(|group| lattice.nodes[group[0]].level);
        Self { groups }
    }

    /// Same-level pairs whose x-extents may overlap, in deterministic order.
    pub fn candidate_pairs(&self, lattice: &ConceptLattice, radii: &[f32]) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for group in &self.groups {
            let max_radius = group
                .iter()
                .map(|&index| radii[index])
                .fold(0.0f32, f32::max);

            for (position, &a) in group.iter().enumerate() {
                let reach = lattice.nodes[a].x + radii[a];
                for &b in &group[position + 1..] {
                    // Sorted by x, so the first node whose extent starts
                    // beyond the widest possible reach ends the scan.
                    if lattice.nodes[b].x - max_radius > reach {
                        break;
                    }
                    if lattice.nodes[b].x - radii[b] <= reach {
                        pairs.push((a, b));
                    }
                }
            }
        }
        pairs
    }
}

/// One collision-resolution pass over all nodes.
///
/// For each colliding same-level pair, both nodes are pushed apart along x
/// by half the overlap correction each. Coincident nodes are left alone; the
/// charge force separates them on the next tick.
pub fn resolve_collisions(lattice: &mut ConceptLattice, radii: &[f32]) {
    debug_assert_eq!(radii.len(), lattice.nodes.len());
    let index = LevelIntervalIndex::build(lattice);

    for (a, b) in index.candidate_pairs(lattice, radii) {
        let dx = lattice.nodes[a].x - lattice.nodes[b].x;
        let dy = lattice.nodes[a].initial_y - lattice.nodes[b].initial_y;
        let distance = (dx * dx + dy * dy).sqrt();
        let min_distance = radii[a] + radii[b];

        if distance > 0.0 && min_distance - distance > 0.0 {
            let shift = dx * ((distance - min_distance) / distance * 0.5);
            lattice.nodes[a].x -= shift;
            lattice.nodes[b].x += shift;
        }
    }
}
