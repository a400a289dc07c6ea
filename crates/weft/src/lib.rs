//! Weft - force-directed network layout with multi-encoding node glyphs.
//!
//! Weft lays out a network of nodes and links with a spring/charge/collision
//! physics simulation and renders each node as a composite glyph whose
//! geometry follows the data. The host application drives the simulation
//! from its animation loop and forwards interaction (dragging, pinning,
//! selecting) into the controller; Weft hands back positions, muted-link
//! sets, and SVG element groups.
//!
//! # Examples
//!
//! ```
//! use std::collections::HashSet;
//!
//! use weft::network::{Link, Network, Node};
//! use weft::simulation::controller::{Controller, TickObserver};
//! use weft_core::{geometry::Size, identifier::Id};
//!
//! struct Host;
//!
//! impl TickObserver for Host {
//!     fn network_updated(&mut self, network: &Network, _muted: &HashSet<Id>) {
//!         // Sync node visuals with network positions here
//!         let _ = network.nodes();
//!     }
//! }
//!
//! let network = Network::new(
//!     vec![Node::new(Id::new("a")), Node::new(Id::new("b"))],
//!     vec![Link::new(Id::new("a-b"), Id::new("a"), Id::new("b"))],
//! )
//! .expect("Valid network");
//!
//! let mut controller = Controller::create(
//!     network,
//!     Size::new(800.0, 600.0),
//!     Size::new(50.0, 50.0),
//!     false,
//!     Host,
//! );
//!
//! // Tick until the cooling schedule terminates the simulation
//! while controller.tick() {}
//! ```

pub mod error;
pub mod glyph;
pub mod highlight;
pub mod network;
pub mod simulation;

pub use weft_core::{color, geometry, identifier, scale};

pub use error::WeftError;
