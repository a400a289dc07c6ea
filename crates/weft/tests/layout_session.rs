//! End-to-end session: load a network from JSON, run the layout to
//! convergence, highlight a selection, and interact with the simulation the
//! way a host application would.

use std::collections::HashSet;

use weft::glyph::GlyphRenderer;
use weft::network::{Link, Network, Node};
use weft::simulation::controller::{Controller, TickObserver};
use weft_core::{
    geometry::{Point, Size},
    identifier::Id,
    scale::OrdinalScale,
};

const VIEWPORT: Size = Size::new(800.0, 600.0);
const MARKER: Size = Size::new(50.0, 50.0);

/// Observer standing in for the rendering host.
#[derive(Default)]
struct Recorder {
    ticks: usize,
    last_muted: HashSet<Id>,
}

impl TickObserver for Recorder {
    fn network_updated(&mut self, network: &Network, muted: &HashSet<Id>) {
        self.ticks += 1;
        self.last_muted = muted.clone();
        for node in network.nodes() {
            assert!(
                node.position().x().is_finite() && node.position().y().is_finite(),
                "Host must never observe a non-finite position"
            );
        }
    }
}

fn path_network() -> Network {
    let fixture = r#"{
        "nodes": [
            {"id": "a", "attributes": {"followers": 10, "kind": "person"}},
            {"id": "b", "attributes": {"followers": 20, "kind": "person"}},
            {"id": "c", "attributes": {"followers": 30, "kind": "bot"}}
        ],
        "links": [
            {"id": "a-b", "source": "a", "target": "b"},
            {"id": "b-c", "source": "b", "target": "c"}
        ]
    }"#;

    #[derive(serde::Deserialize)]
    struct Raw {
        nodes: Vec<Node>,
        links: Vec<Link>,
    }

    let raw: Raw = serde_json::from_str(fixture).expect("Fixture parses");
    Network::new(raw.nodes, raw.links).expect("Fixture network is valid")
}

#[test]
fn session_runs_to_convergence_with_selection_highlighting() {
    let mut controller = Controller::create(
        path_network(),
        VIEWPORT,
        MARKER,
        false,
        Recorder::default(),
    );

    // Selecting A mutes the one link that does not touch A
    controller.set_selection(HashSet::from([Id::new("a")]));

    let mut ticks = 0;
    while controller.tick() {
        ticks += 1;
        assert!(ticks < 1000, "Cooling schedule must terminate the session");
    }
    assert!(ticks > 0, "A fresh simulation runs warm for a while");
    assert!(!controller.is_running());

    let muted = controller.muted();
    assert!(!muted.contains(&Id::new("a-b")), "Link touching A stays active");
    assert!(muted.contains(&Id::new("b-c")), "Link away from A is muted");

    // Linked nodes end up near the spring rest length, not collapsed
    let network = controller.destroy();
    let a = network.node(Id::new("a")).unwrap().position();
    let b = network.node(Id::new("b")).unwrap().position();
    let gap = a.sub_point(b).hypot();
    assert!(gap > 10.0, "Nodes must not collapse (gap {gap})");
}

#[test]
fn pause_drag_release_workflow() {
    let mut controller = Controller::create(
        path_network(),
        VIEWPORT,
        MARKER,
        false,
        Recorder::default(),
    );

    for _ in 0..10 {
        controller.tick();
    }

    // User grabs node B: pause, drag, pin
    controller.pause();
    for node in controller.network().nodes() {
        assert_eq!(
            node.saved_position(),
            Some(node.position()),
            "Pause snapshots every node"
        );
    }

    let grab = Point::new(400.0, 120.0);
    controller.pin_node(Id::new("b"), grab).unwrap();
    assert_eq!(
        controller.network().node(Id::new("b")).unwrap().position(),
        grab,
        "Dragging while paused moves the node immediately"
    );

    // Drop: reheat and let the rest of the layout adapt around the pin
    controller.reheat(MARKER, false);
    for _ in 0..50 {
        controller.tick();
    }
    assert_eq!(
        controller.network().node(Id::new("b")).unwrap().position(),
        grab,
        "Pinned node holds its position against the forces"
    );

    // Release everything and let the layout settle freely again
    controller.release_pins(MARKER, false);
    assert!(controller.is_running());
    let b = controller.network().node(Id::new("b")).unwrap();
    assert_eq!(b.pinned(), None);
    assert_eq!(b.position(), grab, "Release keeps the last known position");

    let mut ticks = 0;
    while controller.tick() {
        ticks += 1;
        assert!(ticks < 1000);
    }
}

#[test]
fn glyphs_render_for_every_node_after_layout() {
    let mut controller = Controller::create(
        path_network(),
        VIEWPORT,
        MARKER,
        false,
        Recorder::default(),
    );
    while controller.tick() {}
    let network = controller.destroy();

    let mut renderer = GlyphRenderer::new(
        MARKER,
        OrdinalScale::category10(),
        vec!["followers".to_string()],
        vec!["kind".to_string()],
    );

    let glyphs = renderer.render(&network);
    assert_eq!(glyphs.len(), 3);

    let ids: Vec<Id> = glyphs.iter().map(|g| g.id()).collect();
    assert_eq!(
        ids,
        vec![Id::new("a"), Id::new("b"), Id::new("c")],
        "Glyph order follows network node order"
    );
}

#[test]
fn malformed_fixture_is_rejected_before_simulation() {
    let nodes = vec![Node::new(Id::new("a"))];
    let links = vec![Link::new(Id::new("a-x"), Id::new("a"), Id::new("x"))];

    assert!(
        Network::new(nodes, links).is_err(),
        "A dangling link must never reach a simulation"
    );
}
