use latticeview_core::{ConceptLattice, LatticeSettings, NodeIndex};

use crate::collide::{effective_radius, resolve_collisions};
use crate::color::{LevelRamp, NODE_ACCENT, Rgb};
use crate::highlight::{HighlightState, highlight_related};
use crate::interact::{Effect, InteractionState, PointerEvent, step};
use crate::layout::initialize_layout;
use crate::simulation::ForceSimulation;

/// All mutable state of one visualization session.
///
/// Owned by the visualization component and passed by reference to the
/// simulation, the interaction handling, and the renderer; nothing lives in
/// ambient global state. Discarded wholesale when a new lattice is loaded.
pub struct LatticeSession {
    pub lattice: ConceptLattice,
    pub settings: LatticeSettings,
    pub simulation: ForceSimulation,
    pub interaction: InteractionState,
    pub highlight: HighlightState,
    /// Width the lattice was laid out for, read once at layout time.
    pub viewport_width: f32,
    ramp: LevelRamp,
}

impl LatticeSession {
    /// Lay the lattice out for the given viewport width and start the
    /// simulation hot.
    pub fn new(mut lattice: ConceptLattice, viewport_width: f32, settings: LatticeSettings) -> Self {
        initialize_layout(&mut lattice, viewport_width, &settings);
        let ramp = LevelRamp::new(&lattice);
        Self {
            simulation: ForceSimulation::new(&settings),
            interaction: InteractionState::default(),
            highlight: HighlightState::default(),
            viewport_width,
            ramp,
            lattice,
            settings,
        }
    }

    /// Feed one hit-tested pointer event through the state machine and apply
    /// the resulting effects.
    pub fn pointer_event(&mut self, event: PointerEvent) {
        let (next, effects) = step(self.interaction, event);
        self.interaction = next;
        for effect in effects {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::Highlight(node) => {
                self.highlight = highlight_related(&self.lattice, node);
            }
            Effect::ClearHighlight => self.highlight.clear(),
            Effect::Pin(node) => self.lattice.nodes[node.0].fixed = true,
            Effect::Unpin(node) => self.lattice.nodes[node.0].fixed = false,
            Effect::Resume => self.simulation.resume(),
        }
    }

    /// Node currently being dragged, if any.
    pub fn dragging_node(&self) -> Option<NodeIndex> {
        match self.interaction {
            InteractionState::Dragging { node } => Some(node),
            _ => None,
        }
    }

    /// Direct drag manipulation: moves the node regardless of its pinned
    /// state. Only meaningful while a drag is in progress.
    pub fn drag_to(&mut self, x: f32, y: f32) {
        if let InteractionState::Dragging { node } = self.interaction {
            self.lattice.nodes[node.0].x = x;
            self.lattice.nodes[node.0].y = y;
        }
    }

    /// Topmost node whose drawn circle contains `(x, y)`, testing against
    /// the level-locked vertical position.
    pub fn node_at(&self, x: f32, y: f32) -> Option<NodeIndex> {
        let radius = self.settings.circle_radius;
        let mut found = None;
        for (index, node) in self.lattice.nodes.iter().enumerate() {
            let dx = node.x - x;
            let dy = node.initial_y - y;
            if (dx * dx + dy * dy).sqrt() <= radius {
                found = Some(NodeIndex(index));
            }
        }
        found
    }

    /// Advance the simulation by one tick, then run the collision pass when
    /// enabled. `label_widths` carries, per node, the widest label that
    /// currently participates in collision (zero when label collapsing or
    /// that label's visibility is off); the renderer measures text, tests
    /// pass synthetic widths.
    ///
    /// A node under drag is pinned for the duration of the tick so forces
    /// never pull it off the cursor between pointer-move events.
    pub fn tick(&mut self, label_widths: &[f32]) -> bool {
        let drag_pin = self.dragging_node().map(|node| {
            let was_fixed = self.lattice.nodes[node.0].fixed;
            self.lattice.nodes[node.0].fixed = true;
            (node, was_fixed)
        });
        let active = self.simulation.tick(&mut self.lattice);
        if let Some((node, was_fixed)) = drag_pin {
            self.lattice.nodes[node.0].fixed = was_fixed;
        }
        if active && self.settings.collision_detection {
            let radii: Vec<f32> = self
                .lattice
                .nodes
                .iter()
                .enumerate()
                .map(|(index, _)| effective_radius(label_widths.get(index).copied().unwrap_or(0.0)))
                .collect();
            resolve_collisions(&mut self.lattice, &radii);
        }
        active
    }

    /// Fill color of a node under the current highlighting.
    pub fn node_fill(&self, node: NodeIndex) -> Rgb {
        if self.highlight.focus() == Some(node) {
            NODE_ACCENT
        } else {
            self.ramp.color_for_level(self.lattice.nodes[node.0].level)
        }
    }
}
