use latticeview_core::NodeIndex;

/// Number of accumulated pointer movements after which a press becomes a
/// drag instead of a click.
pub const DRAG_THRESHOLD: u32 = 15;

/// Mouse-driven interaction lifecycle of the visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    /// Pressed on a node, not yet moved far enough to count as a drag.
    PointerDown { node: NodeIndex, moves: u32 },
    Dragging { node: NodeIndex },
}

/// Pointer input, already hit-tested by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    NodePressed(NodeIndex),
    BackgroundPressed,
    Moved,
    Released,
    NodeDoublePressed(NodeIndex),
}

/// Side effects requested by a transition; the session applies them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Run the highlighting algorithm for the clicked node.
    Highlight(NodeIndex),
    /// Reset link strokes and node radii/colors to defaults.
    ClearHighlight,
    /// Pin the node after a completed drag.
    Pin(NodeIndex),
    /// Free a previously pinned node.
    Unpin(NodeIndex),
    /// Re-heat the force simulation.
    Resume,
}

/// Pure transition function of the interaction state machine.
///
/// Click vs. drag is decided on release: a press that accumulated at most
/// [`DRAG_THRESHOLD`] movements is a click and triggers highlighting; past
/// the threshold the interaction is a drag and release pins the node
/// instead. A double-press unpins regardless of the current state.
pub fn step(state: InteractionState, event: PointerEvent) -> (InteractionState, Vec<Effect>) {
    use InteractionState::*;
    use PointerEvent::*;

    match (state, event) {
        (_, NodeDoublePressed(node)) => (Idle, vec![Effect::Unpin(node), Effect::Resume]),

        (Idle, NodePressed(node)) => (PointerDown { node, moves: 0 }, Vec::new()),
        (Idle, BackgroundPressed) => (Idle, vec![Effect::ClearHighlight, Effect::Resume]),
        (Idle, Moved | Released) => (Idle, Vec::new()),

        (PointerDown { node, moves }, Moved) => {
            let moves = moves + 1;
            if moves > DRAG_THRESHOLD {
                (Dragging { node }, Vec::new())
            } else {
                (PointerDown { node, moves }, Vec::new())
            }
        }
        (PointerDown { node, .. }, Released) => {
            (Idle, vec![Effect::Highlight(node), Effect::Resume])
        }
        // A second press event while already mid-interaction keeps the
        // current target.
        (PointerDown { node, moves }, NodePressed(_) | BackgroundPressed) => {
            (PointerDown { node, moves }, Vec::new())
        }

        (Dragging { node }, Moved) => (Dragging { node }, Vec::new()),
        (Dragging { node }, Released) => (Idle, vec![Effect::Pin(node), Effect::Resume]),
        (Dragging { node }, NodePressed(_) | BackgroundPressed) => (Dragging { node }, Vec::new()),
    }
}
