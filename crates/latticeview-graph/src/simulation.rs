use latticeview_core::{ConceptLattice, LatticeSettings};

/// Constant repulsive charge applied to every node pair.
const CHARGE: f32 = -240.0;
/// Damping applied when integrating accumulated forces into positions.
const FRICTION: f32 = 0.9;
/// Cooling factor applied to alpha once per tick.
const ALPHA_DECAY: f32 = 0.99;
/// Below this alpha the simulation is considered converged and stops.
const ALPHA_FLOOR: f32 = 0.005;
/// Alpha assigned by [`ForceSimulation::resume`].
const ALPHA_RESUME: f32 = 0.1;
/// Lower bound on squared pair distance, keeps the charge force finite.
const MIN_DISTANCE_SQ: f32 = 0.01;

/// Iterative force-directed solver over the lattice's node positions.
///
/// Runs discrete ticks until the internal energy (alpha) cools below a
/// floor, and is resumed whenever an interaction perturbs the layout: a node
/// is unpinned, a drag is released, or a background click resets the
/// highlighting. There is no gravity term; the layout relies on charge,
/// link distance, and the level-locked vertical position.
///
/// Fixed nodes are excluded from force-driven updates; they only move under
/// direct drag manipulation.
#[derive(Debug, Clone)]
pub struct ForceSimulation {
    link_distance_unit: f32,
    alpha: f32,
}

impl ForceSimulation {
    pub fn new(settings: &LatticeSettings) -> Self {
        Self {
            link_distance_unit: settings.link_distance,
            alpha: ALPHA_RESUME,
        }
    }

    /// Re-heat the simulation so a converged layout reacts to a
    /// perturbation. Idle ticks otherwise perform no work.
    pub fn resume(&mut self) {
        self.alpha = ALPHA_RESUME;
    }

    pub fn is_active(&self) -> bool {
        self.alpha > 0.0
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Target separation for a link spanning `level_span` levels.
    fn link_target_distance(&self, level_span: u32) -> f32 {
        level_span as f32 * self.link_distance_unit - 20.0
    }

    /// Advance the layout by one tick. Returns false once converged; callers
    /// stop scheduling ticks until [`resume`](Self::resume).
    pub fn tick(&mut self, lattice: &mut ConceptLattice) -> bool {
        if self.alpha == 0.0 {
            return false;
        }
        self.alpha *= ALPHA_DECAY;
        if self.alpha < ALPHA_FLOOR {
            self.alpha = 0.0;
            tracing::debug!("force simulation converged");
            return false;
        }

        let node_count = lattice.nodes.len();
        let mut forces = vec![(0.0f32, 0.0f32); node_count];

        // Link distance: pull or push each linked pair toward a separation
        // proportional to the level span.
        for link in &lattice.links {
            let source = &lattice.nodes[link.source];
            let target = &lattice.nodes[link.target];
            let dx = target.x - source.x;
            let dy = target.y - source.y;
            let distance = (dx * dx + dy * dy).sqrt();
            if distance < 1e-6 {
                continue;
            }
            let span = source.level.abs_diff(target.level);
            let displacement =
                (distance - self.link_target_distance(span)) / distance * self.alpha * 0.5;
            forces[link.source].0 += dx * displacement;
            forces[link.source].1 += dy * displacement;
            forces[link.target].0 -= dx * displacement;
            forces[link.target].1 -= dy * displacement;
        }

        // Charge: every pair repels, regardless of level.
        for i in 0..node_count {
            for j in (i + 1)..node_count {
                let a = &lattice.nodes[i];
                let b = &lattice.nodes[j];
                let dx = b.x - a.x;
                let dy = b.y - a.y;
                let distance_sq = (dx * dx + dy * dy).max(MIN_DISTANCE_SQ);
                let force = CHARGE * self.alpha / distance_sq;
                forces[i].0 += dx * force;
                forces[i].1 += dy * force;
                forces[j].0 -= dx * force;
                forces[j].1 -= dy * force;
            }
        }

        for (node, (fx, fy)) in lattice.nodes.iter_mut().zip(forces) {
            if node.fixed {
                continue;
            }
            node.x += fx * FRICTION;
            node.y += fy * FRICTION;
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use latticeview_core::{ConceptNode, LatticeLink};

    fn node(level: u32, x: f32, y: f32) -> ConceptNode {
        ConceptNode {
            id: 0,
            level,
            objects: Vec::new(),
            attributes: Vec::new(),
            owned_objects: Vec::new(),
            owned_attributes: Vec::new(),
            x,
            y,
            initial_y: y,
            fixed: false,
        }
    }

    fn pair(distance: f32, linked: bool) -> ConceptLattice {
        ConceptLattice {
            nodes: vec![node(1, 0.0, 50.0), node(2, distance, 150.0)],
            links: if linked {
                vec![LatticeLink {
                    source: 0,
                    target: 1,
                }]
            } else {
                Vec::new()
            },
            last_node: 1,
            max_level: 2,
        }
    }

    #[test]
    fn charge_pushes_unlinked_nodes_apart() {
        let mut lattice = pair(10.0, false);
        let mut sim = ForceSimulation::new(&LatticeSettings::default());

        let before = lattice.nodes[1].x - lattice.nodes[0].x;
        for _ in 0..20 {
            sim.tick(&mut lattice);
        }
        let after = lattice.nodes[1].x - lattice.nodes[0].x;
        assert!(after > before, "{after} should exceed {before}");
    }

    #[test]
    fn link_force_pulls_overstretched_link_together() {
        // Target distance for one level of span is 160 - 20 = 140.
        let mut lattice = pair(1000.0, true);
        let mut sim = ForceSimulation::new(&LatticeSettings::default());

        let before = lattice.nodes[1].x - lattice.nodes[0].x;
        sim.tick(&mut lattice);
        let after = lattice.nodes[1].x - lattice.nodes[0].x;
        assert!(after < before, "{after} should shrink toward 140");
    }

    #[test]
    fn fixed_nodes_never_move_under_forces() {
        let mut lattice = pair(10.0, true);
        lattice.nodes[0].fixed = true;
        let (x0, y0) = (lattice.nodes[0].x, lattice.nodes[0].y);

        let mut sim = ForceSimulation::new(&LatticeSettings::default());
        for tick in 0..500 {
            if !sim.tick(&mut lattice) {
                sim.resume();
            }
            assert_eq!(lattice.nodes[0].x, x0, "moved at tick {tick}");
            assert_eq!(lattice.nodes[0].y, y0, "moved at tick {tick}");
        }
    }

    #[test]
    fn simulation_cools_down_and_resumes() {
        let mut lattice = pair(10.0, false);
        let mut sim = ForceSimulation::new(&LatticeSettings::default());

        let mut ticks = 0;
        while sim.tick(&mut lattice) {
            ticks += 1;
            assert!(ticks < 1_000, "simulation failed to converge");
        }
        assert!(!sim.is_active());
        assert!(!sim.tick(&mut lattice), "idle tick must be a no-op");

        sim.resume();
        assert!(sim.is_active());
        assert!(sim.tick(&mut lattice));
    }

    #[test]
    fn zero_link_graph_degrades_gracefully() {
        let mut lattice = ConceptLattice {
            nodes: vec![node(1, 100.0, 50.0)],
            links: Vec::new(),
            last_node: 0,
            max_level: 1,
        };
        let mut sim = ForceSimulation::new(&LatticeSettings::default());
        while sim.tick(&mut lattice) {}
        assert_eq!(lattice.nodes[0].x, 100.0);
    }
}
