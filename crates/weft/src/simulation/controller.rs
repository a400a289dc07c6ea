//! Simulation lifecycle controller.
//!
//! The controller owns the network and the physics process and is the only
//! writer of node positions while the simulation runs. Host code drives it
//! from its animation loop (`tick`), forwards interaction events into it
//! (`pin_node`, `unpin_node`, `set_selection`), and pauses it around drag
//! gestures so no tick races an external mutation.
//!
//! There is no "destroyed" state to misuse: [`Controller::destroy`] consumes
//! the controller and hands the network (with its final positions) back, so
//! operating on a dead simulation is a compile error.

use log::{debug, info};

use weft_core::{
    geometry::{Point, Size},
    identifier::Id,
};

use crate::{
    error::WeftError,
    highlight::{Selection, muted_links},
    network::Network,
};

use super::Simulation;

/// Host-side hook invoked after every advance of the layout.
///
/// The observer is injected at creation instead of being captured from
/// ambient view state; it receives the network (for position sync) and the
/// freshly recomputed muted link set on every tick and on every selection
/// change.
pub trait TickObserver {
    fn network_updated(&mut self, network: &Network, muted: &std::collections::HashSet<Id>);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Running,
    Paused,
}

/// Owns the simulation lifecycle: creation, ticking, cooling, pause/resume,
/// and pin management.
pub struct Controller<O: TickObserver> {
    network: Network,
    simulation: Simulation,
    observer: O,
    selection: Selection,
    state: State,
}

impl<O: TickObserver> Controller<O> {
    /// Binds a validated network to a new physics process and starts it.
    ///
    /// Malformed networks cannot reach this point: link resolution is
    /// enforced by [`Network::new`], which fails fast instead of letting a
    /// simulation run on undefined positions.
    pub fn create(
        network: Network,
        dimensions: Size,
        marker: Size,
        nested: bool,
        observer: O,
    ) -> Self {
        let mut network = network;
        let simulation = Simulation::new(&mut network, dimensions, marker, nested);

        info!(
            nodes_len = network.nodes().len(),
            links_len = network.links().len(),
            nested = nested;
            "Layout controller created",
        );

        Self {
            network,
            simulation,
            observer,
            selection: Selection::new(),
            state: State::Running,
        }
    }

    /// Advances one tick and notifies the observer.
    ///
    /// Returns `true` while the simulation is still hot. Paused or cooled,
    /// this is a no-op returning `false`.
    pub fn tick(&mut self) -> bool {
        if self.state != State::Running {
            return false;
        }
        if !self.simulation.step(&mut self.network) {
            return false;
        }

        let muted = muted_links(self.network.links(), &self.selection);
        self.observer.network_updated(&self.network, &muted);
        true
    }

    /// One-shot re-energize after interactive reconfiguration (marker size
    /// or nesting mode changed).
    ///
    /// Reapplies the collision radius through the same configuration step
    /// used at creation, then bumps alpha. The alpha target is deliberately
    /// left alone: the existing cooling schedule settles the layout again.
    pub fn reheat(&mut self, marker: Size, nested: bool) {
        self.simulation.configure_collision(marker, nested);
        self.simulation.reheat();
        self.state = State::Running;
        debug!(alpha = self.simulation.alpha() as f64; "Simulation reheated");
    }

    /// Stops ticking and snapshots every node's position for later
    /// restoration. External code may move nodes through the pin API while
    /// paused; no tick will race it.
    pub fn pause(&mut self) {
        for node in self.network.nodes_mut() {
            node.saved = Some(Point::new(node.x, node.y));
        }
        self.state = State::Paused;
        debug!("Simulation paused");
    }

    /// Clears every node's pin and reheats so the whole layout re-settles
    /// freely. Valid from any state; the result state is running.
    pub fn release_pins(&mut self, marker: Size, nested: bool) {
        for node in self.network.nodes_mut() {
            node.fx = None;
            node.fy = None;
        }
        self.reheat(marker, nested);
    }

    /// Pins a node at a target position (drag handling).
    ///
    /// While paused, the node's live position is updated too so the visual
    /// follows the pointer without a tick.
    pub fn pin_node(&mut self, id: Id, position: Point) -> Result<(), WeftError> {
        let paused = self.state == State::Paused;
        let node = self.network.node_mut(id).ok_or(WeftError::UnknownNode(id))?;
        node.fx = Some(position.x());
        node.fy = Some(position.y());
        if paused {
            node.x = position.x();
            node.y = position.y();
        }
        Ok(())
    }

    /// Releases a single node back to force-driven movement. Its current
    /// position is untouched.
    pub fn unpin_node(&mut self, id: Id) -> Result<(), WeftError> {
        let node = self.network.node_mut(id).ok_or(WeftError::UnknownNode(id))?;
        node.fx = None;
        node.fy = None;
        Ok(())
    }

    /// Replaces the selection and immediately re-derives the muted links,
    /// notifying the observer.
    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
        let muted = muted_links(self.network.links(), &self.selection);
        self.observer.network_updated(&self.network, &muted);
    }

    /// The network being laid out.
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// The muted link set for the current selection.
    pub fn muted(&self) -> std::collections::HashSet<Id> {
        muted_links(self.network.links(), &self.selection)
    }

    /// Current simulation temperature; mostly useful for diagnostics.
    pub fn alpha(&self) -> f32 {
        self.simulation.alpha()
    }

    /// True while ticks advance the layout.
    pub fn is_running(&self) -> bool {
        self.state == State::Running && !self.simulation.is_cooled()
    }

    /// True while paused for interaction.
    pub fn is_paused(&self) -> bool {
        self.state == State::Paused
    }

    /// Tears the simulation down, returning the network with its final
    /// positions.
    pub fn destroy(self) -> Network {
        self.network
    }
}
