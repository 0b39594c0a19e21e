pub mod collide;
pub mod color;
pub mod highlight;
pub mod interact;
pub mod layout;
pub mod session;
pub mod simulation;

pub use collide::{LevelIntervalIndex, effective_radius, resolve_collisions};
pub use color::{LevelRamp, Rgb};
pub use highlight::{HighlightState, highlight_related};
pub use interact::{DRAG_THRESHOLD, Effect, InteractionState, PointerEvent, step};
pub use layout::{initialize_layout, sort_nodes_by_level};
pub use session::LatticeSession;
pub use simulation::ForceSimulation;
