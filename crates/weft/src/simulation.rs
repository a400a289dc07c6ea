//! Force-directed physics simulation.
//!
//! The simulation advances node positions in discrete ticks under four
//! forces: a spring force along links, many-body charge repulsion, a weak
//! centering pull toward the viewport center, and iterative collision
//! resolution. A decaying "temperature" parameter (alpha) controls step size
//! and doubles as the termination mechanism: once alpha decays below
//! `alpha_min` the simulation is cooled and stops advancing, which bounds
//! runtime and guarantees eventual visual stability.
//!
//! Everything here is deterministic. Unpositioned nodes are seeded on a
//! phyllotaxis spiral around the viewport center, and the jiggle applied to
//! coincident points comes from a fixed-seed linear congruential generator,
//! so a given network always settles into the same layout.
//!
//! The [`controller`] submodule wraps the simulation in the state machine
//! that host code interacts with.

pub mod controller;
mod forces;
mod quadtree;
pub mod radius;

use log::debug;

use weft_core::geometry::Size;

use crate::network::Network;

use forces::{CenterForce, CollideForce, Force, LinkForce, ManyBodyForce};

/// Alpha threshold below which the simulation is considered cooled.
pub const ALPHA_MIN: f32 = 0.025;

/// Alpha target applied at creation. Being slightly below [`ALPHA_MIN`], it
/// lets the simulation run warm for a while and still self-terminate.
pub const INITIAL_ALPHA_TARGET: f32 = 0.02;

/// Alpha applied by a reheat: a strong but bounded re-energize.
pub const REHEAT_ALPHA: f32 = 0.5;

/// Spring rest length between linked nodes, in layout units.
const LINK_DISTANCE: f32 = 60.0;

/// Many-body charge strength; negative is repulsive.
const CHARGE_STRENGTH: f32 = -300.0;

/// Collision force strength.
const COLLIDE_STRENGTH: f32 = 0.7;

/// Relaxation passes per tick for the collision force.
const COLLIDE_ITERATIONS: usize = 10;

/// Velocity retained per tick after damping.
const VELOCITY_DECAY_FACTOR: f32 = 0.6;

/// Spiral spacing for seeding unpositioned nodes.
const INITIAL_RADIUS: f32 = 10.0;

/// Deterministic linear congruential generator.
///
/// Used only to break exact position ties (coincident nodes, zero-length
/// links) with a sub-microscopic offset.
#[derive(Debug)]
pub(crate) struct Lcg(u32);

impl Lcg {
    fn new() -> Self {
        Self(1)
    }

    fn next(&mut self) -> f32 {
        self.0 = self.0.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        self.0 as f32 / 4_294_967_296.0
    }

    /// A tiny nonzero offset for separating coincident points.
    pub(crate) fn jiggle(&mut self) -> f32 {
        (self.next() - 0.5) * 1e-6
    }
}

/// The physics process: force pipeline plus cooling state.
///
/// Positions live in the [`Network`]; the simulation mutates them in place
/// on each [`step`](Simulation::step). Host code does not drive this type
/// directly, it goes through [`controller::Controller`].
#[derive(Debug)]
pub struct Simulation {
    alpha: f32,
    alpha_target: f32,
    alpha_decay: f32,
    link: LinkForce,
    charge: ManyBodyForce,
    center: CenterForce,
    collide: CollideForce,
    rng: Lcg,
}

impl Simulation {
    /// Builds the force pipeline for a validated network and seeds any
    /// unpositioned nodes.
    ///
    /// The collision radius comes from the marker dimensions through the
    /// [`radius`] model; `create` and reheat share
    /// [`configure_collision`](Simulation::configure_collision) so the two
    /// paths cannot drift apart.
    pub(crate) fn new(network: &mut Network, dimensions: Size, marker: Size, nested: bool) -> Self {
        seed_positions(network, dimensions);

        let link = LinkForce::new(network, LINK_DISTANCE);
        let charge = ManyBodyForce::new(CHARGE_STRENGTH);
        let center = CenterForce::new(dimensions.center());
        let collide = CollideForce::new(0.0, COLLIDE_STRENGTH, COLLIDE_ITERATIONS);

        let mut simulation = Self {
            alpha: 1.0,
            alpha_target: INITIAL_ALPHA_TARGET,
            // Chosen so that alpha alone would cross alpha_min in ~300 ticks
            alpha_decay: 1.0 - ALPHA_MIN.powf(1.0 / 300.0),
            link,
            charge,
            center,
            collide,
            rng: Lcg::new(),
        };
        simulation.configure_collision(marker, nested);

        debug!(
            nodes_len = network.nodes().len(),
            links_len = network.links().len();
            "Simulation created",
        );

        simulation
    }

    /// Reconfigures the collision force radius from marker dimensions.
    ///
    /// Shared by creation and reheat.
    pub(crate) fn configure_collision(&mut self, marker: Size, nested: bool) {
        self.collide.set_radius(radius::collide_radius(marker, nested));
    }

    /// Current simulation temperature.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// True once alpha has decayed below [`ALPHA_MIN`].
    pub fn is_cooled(&self) -> bool {
        self.alpha < ALPHA_MIN
    }

    /// One-shot energy bump. Does not touch the alpha target, so the
    /// existing cooling schedule settles the layout again on its own.
    pub(crate) fn reheat(&mut self) {
        self.alpha = REHEAT_ALPHA;
    }

    /// Advances the simulation by one tick.
    ///
    /// Returns `false` without moving anything once cooled. Otherwise decays
    /// alpha, applies the four forces in order, and integrates velocities
    /// into positions. Pinned axes snap to their pin and hold zero velocity.
    pub(crate) fn step(&mut self, network: &mut Network) -> bool {
        if self.is_cooled() {
            return false;
        }

        self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;

        let nodes = network.nodes_mut();
        self.link.apply(nodes, self.alpha, &mut self.rng);
        self.charge.apply(nodes, self.alpha, &mut self.rng);
        self.center.apply(nodes, self.alpha, &mut self.rng);
        self.collide.apply(nodes, self.alpha, &mut self.rng);

        for node in nodes.iter_mut() {
            match node.fx {
                Some(fx) => {
                    node.x = fx;
                    node.vx = 0.0;
                }
                None => {
                    node.vx *= VELOCITY_DECAY_FACTOR;
                    node.x += node.vx;
                }
            }
            match node.fy {
                Some(fy) => {
                    node.y = fy;
                    node.vy = 0.0;
                }
                None => {
                    node.vy *= VELOCITY_DECAY_FACTOR;
                    node.y += node.vy;
                }
            }
        }

        true
    }
}

/// Places unpositioned nodes on a phyllotaxis spiral around the viewport
/// center. Deterministic, and dense enough that the charge force can
/// separate the nodes immediately.
fn seed_positions(network: &mut Network, dimensions: Size) {
    let center = dimensions.center();
    let golden_angle = std::f32::consts::PI * (3.0 - 5.0_f32.sqrt());

    for (i, node) in network.nodes_mut().iter_mut().enumerate() {
        if node.is_positioned() {
            continue;
        }
        let radius = INITIAL_RADIUS * (0.5 + i as f32).sqrt();
        let angle = i as f32 * golden_angle;
        node.x = center.x() + radius * angle.cos();
        node.y = center.y() + radius * angle.sin();
        node.vx = 0.0;
        node.vy = 0.0;
    }
}
