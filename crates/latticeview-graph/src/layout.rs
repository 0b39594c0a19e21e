use latticeview_core::{ConceptLattice, LatticeSettings};

/// Assign initial positions, derive owned sets, and pin the extremal nodes.
///
/// Horizontal start is a deterministic stack near the viewport center (one
/// pixel per index); it only seeds the simulation and is not a layout.
/// `initial_y` is locked to the node's level and never changes afterwards.
pub fn initialize_layout(
    lattice: &mut ConceptLattice,
    viewport_width: f32,
    settings: &LatticeSettings,
) {
    if lattice.nodes.is_empty() {
        tracing::warn!("layout requested for an empty lattice");
        return;
    }

    for (index, node) in lattice.nodes.iter_mut().enumerate() {
        node.x = viewport_width / 2.0 - settings.circle_radius + index as f32;
        node.y = 50.0 + (node.level as f32 - 1.0) * 100.0;
        node.initial_y = node.y;
        node.owned_objects = node.objects.clone();
        node.owned_attributes = node.attributes.clone();
        node.fixed = false;
    }

    // An attribute inherited from a linked superconcept is not owned by the
    // subconcept; an object passed down to a linked subconcept is not owned
    // by the superconcept.
    for link_index in 0..lattice.links.len() {
        let link = lattice.links[link_index];
        let source_attributes = lattice.nodes[link.source].attributes.clone();
        lattice.nodes[link.target]
            .owned_attributes
            .retain(|attribute| !source_attributes.contains(attribute));

        let target_objects = lattice.nodes[link.target].objects.clone();
        lattice.nodes[link.source]
            .owned_objects
            .retain(|object| !target_objects.contains(object));
    }

    lattice.nodes[0].fixed = true;
    let last_node = lattice.last_node;
    lattice.nodes[last_node].fixed = true;
}

/// Stable sort of the nodes by ascending level.
///
/// Pure: the input is untouched; the returned lattice has link endpoints,
/// `last_node`, and node ids remapped to the new positions, so it describes
/// the same graph. Sorting an already sorted lattice is a no-op.
pub fn sort_nodes_by_level(lattice: &ConceptLattice) -> ConceptLattice {
    let mut order: Vec<usize> = (0..lattice.nodes.len()).collect();
    order.sort_by_key(|&index| lattice.nodes[index].level);

    let mut old_to_new = vec![0usize; lattice.nodes.len()];
    for (new_index, &old_index) in order.iter().enumerate() {
        old_to_new[old_index] = new_index;
    }

    let mut sorted = lattice.clone();
    sorted.nodes = order
        .iter()
        .map(|&old_index| lattice.nodes[old_index].clone())
        .collect();
    sorted.reindex_nodes();
    for link in &mut sorted.links {
        link.source = old_to_new[link.source];
        link.target = old_to_new[link.target];
    }
    sorted.last_node = old_to_new[lattice.last_node];
    sorted
}
