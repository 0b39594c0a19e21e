use std::collections::HashSet;

use latticeview_core::{ConceptLattice, LatticeSettings, LinkIndex, NodeIndex};

/// Which concepts and links are currently emphasized as related to the most
/// recently clicked concept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HighlightState {
    focus: Option<NodeIndex>,
    marked_links: HashSet<LinkIndex>,
    marked_nodes: HashSet<NodeIndex>,
    /// False until a click or reset has touched the strokes; links keep
    /// their initial hairline width until then.
    touched: bool,
}

impl HighlightState {
    /// Reset everything to defaults (background click).
    pub fn clear(&mut self) {
        self.focus = None;
        self.marked_links.clear();
        self.marked_nodes.clear();
        self.touched = true;
    }

    pub fn focus(&self) -> Option<NodeIndex> {
        self.focus
    }

    pub fn is_link_marked(&self, link: LinkIndex) -> bool {
        self.marked_links.contains(&link)
    }

    pub fn is_node_marked(&self, node: NodeIndex) -> bool {
        self.marked_nodes.contains(&node)
    }

    /// Radius the node is drawn at under the current highlighting.
    ///
    /// The clicked node and every endpoint of a marked link get the full
    /// radius; while a highlight is active all other nodes shrink by the
    /// configured variation.
    pub fn node_radius(&self, node: NodeIndex, settings: &LatticeSettings) -> f32 {
        match self.focus {
            None => settings.circle_radius,
            Some(focus) if focus == node || self.marked_nodes.contains(&node) => {
                settings.circle_radius
            }
            Some(_) => settings.circle_radius - settings.circle_radius_variation,
        }
    }

    /// Stroke width the link is drawn at under the current highlighting.
    pub fn link_stroke_width(&self, link: LinkIndex) -> f32 {
        if self.marked_links.contains(&link) {
            3.0
        } else if self.touched {
            1.0
        } else {
            0.6
        }
    }
}

/// Highlighting algorithm for a click on node `focus`.
///
/// A link is related when the clicked concept's full attribute set is
/// contained in both endpoints' attribute sets, or its full object set is;
/// containment is computed as a zero count of missing elements. Endpoints of
/// related links become marked nodes.
pub fn highlight_related(lattice: &ConceptLattice, focus: NodeIndex) -> HighlightState {
    let main = &lattice.nodes[focus.0];
    let mut state = HighlightState {
        focus: Some(focus),
        touched: true,
        ..HighlightState::default()
    };

    for (index, link) in lattice.links.iter().enumerate() {
        let source = &lattice.nodes[link.source];
        let target = &lattice.nodes[link.target];

        let missing_attributes = main
            .attributes
            .iter()
            .filter(|a| !source.attributes.contains(a))
            .count()
            + main
                .attributes
                .iter()
                .filter(|a| !target.attributes.contains(a))
                .count();
        let missing_objects = main
            .objects
            .iter()
            .filter(|o| !source.objects.contains(o))
            .count()
            + main
                .objects
                .iter()
                .filter(|o| !target.objects.contains(o))
                .count();

        if missing_attributes == 0 || missing_objects == 0 {
            state.marked_links.insert(LinkIndex(index));
            state.marked_nodes.insert(NodeIndex(link.source));
            state.marked_nodes.insert(NodeIndex(link.target));
        }
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use latticeview_core::{ConceptNode, LatticeLink};

    fn node(level: u32, objects: &[&str], attributes: &[&str]) -> ConceptNode {
        ConceptNode {
            id: 0,
            level,
            objects: objects.iter().map(|s| s.to_string()).collect(),
            attributes: attributes.iter().map(|s| s.to_string()).collect(),
            owned_objects: Vec::new(),
            owned_attributes: Vec::new(),
            x: 0.0,
            y: 0.0,
            initial_y: 0.0,
            fixed: false,
        }
    }

    fn link(source: usize, target: usize) -> LatticeLink {
        LatticeLink { source, target }
    }

    /// Chain where the middle concept's attributes are contained in both of
    /// its neighbors' attribute sets.
    fn chain() -> ConceptLattice {
        ConceptLattice {
            nodes: vec![
                node(1, &["o1", "o2", "o3"], &["a1"]),
                node(2, &["o1", "o2"], &["a1"]),
                node(3, &["o1"], &["a1", "a2"]),
            ],
            links: vec![link(0, 1), link(1, 2)],
            last_node: 2,
            max_level: 3,
        }
    }

    #[test]
    fn clicking_the_middle_node_marks_both_links_and_all_endpoints() {
        let state = highlight_related(&chain(), NodeIndex(1));

        assert!(state.is_link_marked(LinkIndex(0)));
        assert!(state.is_link_marked(LinkIndex(1)));
        for index in 0..3 {
            assert!(state.is_node_marked(NodeIndex(index)));
        }

        let settings = LatticeSettings::default();
        for index in 0..3 {
            assert_eq!(state.node_radius(NodeIndex(index), &settings), 18.0);
        }
    }

    #[test]
    fn unrelated_links_stay_unmarked_and_their_nodes_shrink() {
        let mut lattice = chain();
        // A side branch whose endpoint sets share nothing with node 1.
        lattice.nodes.push(node(2, &["o9"], &["a9"]));
        lattice.nodes.push(node(3, &["o9"], &["a8", "a9"]));
        lattice.links.push(link(3, 4));

        let state = highlight_related(&lattice, NodeIndex(1));

        assert!(!state.is_link_marked(LinkIndex(2)));
        assert!(!state.is_node_marked(NodeIndex(3)));

        let settings = LatticeSettings::default();
        assert_eq!(state.node_radius(NodeIndex(3), &settings), 11.0);
        // The clicked node always keeps the full radius.
        assert_eq!(state.node_radius(NodeIndex(1), &settings), 18.0);
    }

    #[test]
    fn marking_is_exactly_the_double_containment_rule() {
        let lattice = chain();
        let state = highlight_related(&lattice, NodeIndex(2));

        // Node 2's attributes {a1, a2} are not contained in node 0 or 1,
        // but its objects {o1} are contained in every endpoint on the chain.
        assert!(state.is_link_marked(LinkIndex(0)));
        assert!(state.is_link_marked(LinkIndex(1)));
    }

    #[test]
    fn stroke_widths_follow_the_highlight_lifecycle() {
        let mut state = HighlightState::default();
        assert_eq!(state.link_stroke_width(LinkIndex(0)), 0.6);

        state = highlight_related(&chain(), NodeIndex(1));
        assert_eq!(state.link_stroke_width(LinkIndex(0)), 3.0);

        state.clear();
        assert_eq!(state.link_stroke_width(LinkIndex(0)), 1.0);
        assert_eq!(state.focus(), None);
        assert_eq!(
            state.node_radius(NodeIndex(0), &LatticeSettings::default()),
            18.0
        );
    }
}
