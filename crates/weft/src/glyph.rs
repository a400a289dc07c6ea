//! Composite per-node glyph rendering.
//!
//! Each node is annotated with up to two visual encodings drawn inside its
//! marker: bar channels for numeric attributes and capsule glyphs colored by
//! categorical attributes. Geometry derives deterministically from the
//! marker dimensions and the field counts; there is no layout negotiation.
//!
//! Rendering is a pure rebuild: every call to [`GlyphRenderer::render`]
//! produces fresh element groups for all nodes, so replacing a node's
//! previous group wholesale gives the idempotent-redraw contract for free —
//! sub-elements never accumulate across calls.

use log::debug;
use svg::node::element as svg_element;

use weft_core::{
    geometry::Size,
    identifier::Id,
    scale::{LinearScale, OrdinalScale},
};

use crate::network::Network;

/// Padding between marker edge and encoding content.
const INSET: f32 = 5.0;

/// Vertical band at the top of the marker reserved for the node label.
const LABEL_BAND: f32 = 16.0;

/// Background track fill for bar channels.
const TRACK_FILL: &str = "#FFFFFF";

/// Foreground fill for bar values.
const BAR_FILL: &str = "#82b1ff";

/// Derived glyph geometry for a marker and a pair of encoding field counts.
#[derive(Debug, Clone, Copy)]
pub struct GlyphLayout {
    /// Width of one bar channel, including its insets.
    pub bar_width: f32,
    /// Vertical extent available to a full-scale bar.
    pub bar_extent: f32,
    /// Size of one capsule glyph.
    pub glyph_size: Size,
    /// Left edge of the glyph column.
    pub glyph_x: f32,
}

impl GlyphLayout {
    /// Splits the marker between encodings.
    ///
    /// Bars get the full marker width to themselves; when glyphs are also
    /// requested, bars cede the right half of the marker to them.
    pub fn new(marker: Size, bar_count: usize, glyph_count: usize) -> Self {
        let bar_width = if bar_count == 0 {
            0.0
        } else if glyph_count == 0 {
            marker.width() / bar_count as f32
        } else {
            (marker.width() / 2.0) / bar_count as f32
        };

        Self {
            bar_width,
            bar_extent: (marker.height() - LABEL_BAND - 2.0 * INSET).max(0.0),
            glyph_size: Size::new(
                (marker.width() / 2.0 - 3.0 * INSET).max(0.0),
                (marker.height() / 2.0 - 3.0 * INSET).max(0.0),
            ),
            glyph_x: marker.width() / 2.0 + INSET,
        }
    }

    /// Vertical position of the glyph in slot `i` (0 or 1), stacked below
    /// the label band.
    fn glyph_y(&self, i: usize) -> f32 {
        LABEL_BAND + INSET + i as f32 * (self.glyph_size.height() + INSET)
    }
}

/// A freshly rendered glyph group for one node.
pub struct NodeGlyph {
    id: Id,
    group: svg_element::Group,
}

impl NodeGlyph {
    /// The node this group annotates.
    pub fn id(&self) -> Id {
        self.id
    }

    /// The rendered element group.
    pub fn group(&self) -> &svg_element::Group {
        &self.group
    }

    pub fn into_group(self) -> svg_element::Group {
        self.group
    }
}

/// Draws the composite per-node visual from current data and scales.
pub struct GlyphRenderer {
    marker: Size,
    color_scale: OrdinalScale,
    bar_fields: Vec<String>,
    glyph_fields: Vec<String>,
}

impl GlyphRenderer {
    /// Configures a renderer. At most two glyph fields are honored; extras
    /// are dropped here rather than silently overflowing the marker.
    pub fn new(
        marker: Size,
        color_scale: OrdinalScale,
        bar_fields: Vec<String>,
        mut glyph_fields: Vec<String>,
    ) -> Self {
        if glyph_fields.len() > 2 {
            debug!(
                glyph_fields_len = glyph_fields.len();
                "More than two glyph fields requested, truncating",
            );
            glyph_fields.truncate(2);
        }
        Self {
            marker,
            color_scale,
            bar_fields,
            glyph_fields,
        }
    }

    /// Rebuilds the glyph group for every node in the network.
    ///
    /// Bar heights are scaled against the network-wide maximum of each bar
    /// field, recomputed per call so redraws track the bound data. A field
    /// whose maximum is zero or absent scales against 1 instead, rendering
    /// flat bars rather than dividing by zero.
    pub fn render(&mut self, network: &Network) -> Vec<NodeGlyph> {
        let layout = GlyphLayout::new(self.marker, self.bar_fields.len(), self.glyph_fields.len());

        let bar_scales: Vec<LinearScale> = self
            .bar_fields
            .iter()
            .map(|field| {
                let max = network
                    .nodes()
                    .iter()
                    .filter_map(|n| n.number(field))
                    .fold(f64::NEG_INFINITY, f64::max);
                LinearScale::new(max as f32, layout.bar_extent)
            })
            .collect();

        network
            .nodes()
            .iter()
            .map(|node| {
                let mut group = svg_element::Group::new().set("class", "node-glyph");

                for (i, (field, scale)) in
                    self.bar_fields.iter().zip(&bar_scales).enumerate()
                {
                    let x = INSET + i as f32 * layout.bar_width;
                    let width = (layout.bar_width - 2.0 * INSET).max(0.0);

                    // Background track
                    group = group.add(
                        svg_element::Rectangle::new()
                            .set("class", "bar")
                            .set("x", x)
                            .set("y", LABEL_BAND + INSET)
                            .set("width", width)
                            .set("height", layout.bar_extent)
                            .set("fill", TRACK_FILL),
                    );

                    // Value bar, bottom-aligned
                    let value = node.number(field).unwrap_or(0.0) as f32;
                    let height = scale.scale(value);
                    group = group.add(
                        svg_element::Rectangle::new()
                            .set("class", "bar")
                            .set("x", x)
                            .set("y", self.marker.height() - INSET - height)
                            .set("width", width)
                            .set("height", height)
                            .set("fill", BAR_FILL),
                    );
                }

                for (i, field) in self.glyph_fields.iter().enumerate() {
                    let category = match node.category(field) {
                        Some(category) => category.to_string(),
                        // Numeric values can still be color-encoded ordinally
                        None => node
                            .number(field)
                            .map(|v| v.to_string())
                            .unwrap_or_default(),
                    };
                    let fill = self.color_scale.scale(&category);

                    group = group.add(
                        svg_element::Rectangle::new()
                            .set("class", "glyph")
                            .set("x", layout.glyph_x)
                            .set("y", layout.glyph_y(i))
                            .set("width", layout.glyph_size.width())
                            .set("height", layout.glyph_size.height())
                            .set("rx", (self.marker.width() / 2.0 - 2.0 * INSET) / 2.0)
                            .set("ry", (self.marker.height() / 2.0 - 2.0 * INSET) / 2.0)
                            .set("fill", fill.to_string()),
                    );
                }

                NodeGlyph {
                    id: node.id(),
                    group,
                }
            })
            .collect()
    }
}
