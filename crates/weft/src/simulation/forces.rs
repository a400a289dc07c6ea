//! The four forces of the layout pipeline.
//!
//! Each force nudges node velocities (the center force translates positions
//! directly); the simulation integrates velocities into positions afterward.
//! Strengths are scaled by the current alpha so the whole system calms down
//! together as the cooling schedule runs.

use weft_core::geometry::Point;

use crate::network::{Network, Node};

use super::{Lcg, quadtree::QuadTree};

/// Barnes-Hut opening criterion, squared (theta = 0.9).
const THETA2: f32 = 0.81;

/// Lower clamp on squared distances in the charge force.
const DISTANCE_MIN2: f32 = 1.0;

/// A force that can be applied to the node arena for one tick.
pub(crate) trait Force {
    fn apply(&mut self, nodes: &mut [Node], alpha: f32, rng: &mut Lcg);
}

/// A resolved spring between two node indices.
#[derive(Debug)]
struct Spring {
    source: usize,
    target: usize,
    /// `1 / min(degree(source), degree(target))`: springs touching
    /// high-degree nodes pull more gently so hubs don't collapse.
    strength: f32,
    /// Share of the correction applied to the target; the rest goes to the
    /// source, weighted by relative degree.
    bias: f32,
}

/// Spring force along links with a fixed rest distance.
#[derive(Debug)]
pub(crate) struct LinkForce {
    springs: Vec<Spring>,
    distance: f32,
}

impl LinkForce {
    /// Resolves link endpoints against the network. The network is already
    /// validated, so resolution cannot fail.
    pub(crate) fn new(network: &Network, distance: f32) -> Self {
        let endpoints: Vec<(usize, usize)> = network
            .links()
            .iter()
            .map(|link| {
                let source = network
                    .node_index(link.source())
                    .expect("Validated network resolves every link source");
                let target = network
                    .node_index(link.target())
                    .expect("Validated network resolves every link target");
                (source, target)
            })
            .collect();

        let mut degree = vec![0usize; network.nodes().len()];
        for &(source, target) in &endpoints {
            degree[source] += 1;
            degree[target] += 1;
        }

        let springs = endpoints
            .into_iter()
            .map(|(source, target)| Spring {
                source,
                target,
                strength: 1.0 / degree[source].min(degree[target]).max(1) as f32,
                bias: degree[source] as f32 / (degree[source] + degree[target]) as f32,
            })
            .collect();

        Self { springs, distance }
    }
}

impl Force for LinkForce {
    fn apply(&mut self, nodes: &mut [Node], alpha: f32, rng: &mut Lcg) {
        for spring in &self.springs {
            let source = &nodes[spring.source];
            let target = &nodes[spring.target];

            let mut dx = target.x + target.vx - source.x - source.vx;
            let mut dy = target.y + target.vy - source.y - source.vy;
            if dx == 0.0 && dy == 0.0 {
                dx = rng.jiggle();
                dy = rng.jiggle();
            }

            let length = dx.hypot(dy);
            let correction = (length - self.distance) / length * alpha * spring.strength;
            let (cx, cy) = (dx * correction, dy * correction);

            nodes[spring.target].vx -= cx * spring.bias;
            nodes[spring.target].vy -= cy * spring.bias;
            nodes[spring.source].vx += cx * (1.0 - spring.bias);
            nodes[spring.source].vy += cy * (1.0 - spring.bias);
        }
    }
}

/// Uniform many-body repulsion, Barnes-Hut approximated.
#[derive(Debug)]
pub(crate) struct ManyBodyForce {
    strength: f32,
}

impl ManyBodyForce {
    pub(crate) fn new(strength: f32) -> Self {
        Self { strength }
    }
}

impl Force for ManyBodyForce {
    fn apply(&mut self, nodes: &mut [Node], alpha: f32, rng: &mut Lcg) {
        let positions: Vec<(f32, f32)> = nodes.iter().map(|n| (n.x, n.y)).collect();
        let tree = QuadTree::build(&positions);

        for (i, node) in nodes.iter_mut().enumerate() {
            let (x, y) = positions[i];
            let (dvx, dvy) =
                tree.repulsion(x, y, i, self.strength, alpha, THETA2, DISTANCE_MIN2, rng);
            node.vx += dvx;
            node.vy += dvy;
        }
    }
}

/// Weak centering force: translates the layout so its centroid drifts
/// toward a fixed point. Operates on positions, not velocities, and ignores
/// alpha, matching the reference behavior.
#[derive(Debug)]
pub(crate) struct CenterForce {
    center: Point,
    strength: f32,
}

impl CenterForce {
    pub(crate) fn new(center: Point) -> Self {
        Self {
            center,
            strength: 1.0,
        }
    }
}

impl Force for CenterForce {
    fn apply(&mut self, nodes: &mut [Node], _alpha: f32, _rng: &mut Lcg) {
        if nodes.is_empty() {
            return;
        }

        let n = nodes.len() as f32;
        let mut sx = 0.0;
        let mut sy = 0.0;
        for node in nodes.iter() {
            sx += node.x;
            sy += node.y;
        }
        let dx = (sx / n - self.center.x()) * self.strength;
        let dy = (sy / n - self.center.y()) * self.strength;

        for node in nodes.iter_mut() {
            node.x -= dx;
            node.y -= dy;
        }
    }
}

/// Iterative collision resolution with a uniform radius.
#[derive(Debug)]
pub(crate) struct CollideForce {
    radius: f32,
    strength: f32,
    iterations: usize,
}

impl CollideForce {
    pub(crate) fn new(radius: f32, strength: f32, iterations: usize) -> Self {
        Self {
            radius,
            strength,
            iterations,
        }
    }

    /// Replaces the collision radius; used when marker size or nesting mode
    /// changes.
    pub(crate) fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
    }
}

impl Force for CollideForce {
    fn apply(&mut self, nodes: &mut [Node], _alpha: f32, rng: &mut Lcg) {
        if self.radius <= 0.0 {
            return;
        }
        let radius = self.radius;
        let strength = self.strength;
        let diameter = radius * 2.0;

        for _ in 0..self.iterations {
            // Predicted positions for this relaxation pass
            let predicted: Vec<(f32, f32)> =
                nodes.iter().map(|n| (n.x + n.vx, n.y + n.vy)).collect();
            let tree = QuadTree::build(&predicted);

            for i in 0..nodes.len() {
                let xi = nodes[i].x + nodes[i].vx;
                let yi = nodes[i].y + nodes[i].vy;

                tree.visit_in_box(
                    xi - diameter,
                    yi - diameter,
                    xi + diameter,
                    yi + diameter,
                    &mut |j, xj, yj| {
                        if j <= i {
                            return;
                        }
                        let mut dx = xi - xj;
                        let mut dy = yi - yj;
                        let mut l = dx * dx + dy * dy;
                        if l >= diameter * diameter {
                            return;
                        }
                        if dx == 0.0 {
                            dx = rng.jiggle();
                            l += dx * dx;
                        }
                        if dy == 0.0 {
                            dy = rng.jiggle();
                            l += dy * dy;
                        }
                        let d = l.sqrt();
                        let push = (diameter - d) / d * strength;
                        // Equal radii split the correction evenly
                        let (px, py) = (dx * push * 0.5, dy * push * 0.5);
                        nodes[i].vx += px;
                        nodes[i].vy += py;
                        nodes[j].vx -= px;
                        nodes[j].vy -= py;
                    },
                );
            }
        }
    }
}
