//! Barnes-Hut quadtree over node positions.
//!
//! One tree serves both approximated forces: the charge force walks it with
//! the Barnes-Hut opening criterion against per-cell aggregates (point count
//! and centroid), and the collision force uses it as a spatial index via
//! box-bounded visits. Either way the naive O(n^2) pair loop is avoided.

use super::Lcg;

/// Cells smaller than this are never split; coincident and near-coincident
/// points pile up in one leaf instead of recursing forever.
const MIN_CELL: f32 = 1e-3;

#[derive(Debug)]
enum Quad {
    Leaf {
        x: f32,
        y: f32,
        items: Vec<usize>,
    },
    Internal {
        children: [Option<Box<Quad>>; 4],
        /// Number of points under this cell.
        count: f32,
        /// Centroid of the points under this cell.
        cx: f32,
        cy: f32,
    },
}

#[derive(Debug)]
pub(crate) struct QuadTree {
    root: Option<Box<Quad>>,
    x0: f32,
    y0: f32,
    side: f32,
}

impl QuadTree {
    /// Builds a tree over the given positions. Indices into `points` are the
    /// payload carried by the leaves.
    pub(crate) fn build(points: &[(f32, f32)]) -> Self {
        let mut min_x = f32::INFINITY;
        let mut min_y = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        let mut max_y = f32::NEG_INFINITY;
        for &(x, y) in points {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }

        let mut tree = if points.is_empty() {
            Self {
                root: None,
                x0: 0.0,
                y0: 0.0,
                side: 1.0,
            }
        } else {
            let side = (max_x - min_x).max(max_y - min_y).max(1.0);
            Self {
                root: None,
                x0: min_x,
                y0: min_y,
                side,
            }
        };

        for (index, &(x, y)) in points.iter().enumerate() {
            let (x0, y0, side) = (tree.x0, tree.y0, tree.side);
            insert(&mut tree.root, x0, y0, side, x, y, vec![index]);
        }
        if let Some(root) = tree.root.as_mut() {
            aggregate(root);
        }
        tree
    }

    /// Accumulates the Barnes-Hut charge force on the point at `index`.
    ///
    /// Cells whose extent is small relative to their distance (squared ratio
    /// below `theta2`) contribute through their aggregate; everything else
    /// is opened. Distances are clamped below by `distance_min2` so nearby
    /// points cannot produce unbounded impulses, and exactly coincident
    /// points are separated by a jiggle.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn repulsion(
        &self,
        x: f32,
        y: f32,
        index: usize,
        strength: f32,
        alpha: f32,
        theta2: f32,
        distance_min2: f32,
        rng: &mut Lcg,
    ) -> (f32, f32) {
        let mut out = (0.0, 0.0);
        if let Some(root) = self.root.as_deref() {
            accumulate_repulsion(
                root,
                self.side,
                x,
                y,
                index,
                strength * alpha,
                theta2,
                distance_min2,
                rng,
                &mut out,
            );
        }
        out
    }

    /// Calls `f(index, x, y)` for every point inside the given box.
    pub(crate) fn visit_in_box(
        &self,
        bx0: f32,
        by0: f32,
        bx1: f32,
        by1: f32,
        f: &mut impl FnMut(usize, f32, f32),
    ) {
        if let Some(root) = self.root.as_deref() {
            visit_box(root, self.x0, self.y0, self.side, bx0, by0, bx1, by1, f);
        }
    }
}

fn insert(
    slot: &mut Option<Box<Quad>>,
    x0: f32,
    y0: f32,
    side: f32,
    x: f32,
    y: f32,
    mut items: Vec<usize>,
) {
    match slot {
        None => {
            *slot = Some(Box::new(Quad::Leaf { x, y, items }));
        }
        Some(quad) => match quad.as_mut() {
            Quad::Leaf {
                x: lx,
                y: ly,
                items: leaf_items,
            } => {
                if (*lx == x && *ly == y) || side <= MIN_CELL {
                    leaf_items.append(&mut items);
                } else {
                    let (old_x, old_y) = (*lx, *ly);
                    let old_items = std::mem::take(leaf_items);
                    **quad = Quad::Internal {
                        children: [None, None, None, None],
                        count: 0.0,
                        cx: 0.0,
                        cy: 0.0,
                    };
                    insert_into_internal(&mut **quad, x0, y0, side, old_x, old_y, old_items);
                    insert_into_internal(&mut **quad, x0, y0, side, x, y, items);
                }
            }
            Quad::Internal { .. } => {
                insert_into_internal(&mut **quad, x0, y0, side, x, y, items);
            }
        },
    }
}

fn insert_into_internal(
    quad: &mut Quad,
    x0: f32,
    y0: f32,
    side: f32,
    x: f32,
    y: f32,
    items: Vec<usize>,
) {
    let Quad::Internal { children, .. } = quad else {
        unreachable!("Caller guarantees an internal cell");
    };
    let half = side / 2.0;
    let right = x >= x0 + half;
    let bottom = y >= y0 + half;
    let quadrant = usize::from(right) | (usize::from(bottom) << 1);
    let cx0 = if right { x0 + half } else { x0 };
    let cy0 = if bottom { y0 + half } else { y0 };
    insert(&mut children[quadrant], cx0, cy0, half, x, y, items);
}

/// Computes (count, sum_x, sum_y) bottom-up, storing aggregates in internal
/// cells.
fn aggregate(quad: &mut Quad) -> (f32, f32, f32) {
    match quad {
        Quad::Leaf { x, y, items } => {
            let count = items.len() as f32;
            (count, *x * count, *y * count)
        }
        Quad::Internal {
            children,
            count,
            cx,
            cy,
        } => {
            let mut total = (0.0, 0.0, 0.0);
            for child in children.iter_mut().flatten() {
                let (c, sx, sy) = aggregate(child);
                total.0 += c;
                total.1 += sx;
                total.2 += sy;
            }
            *count = total.0;
            *cx = total.1 / total.0;
            *cy = total.2 / total.0;
            total
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn accumulate_repulsion(
    quad: &Quad,
    side: f32,
    x: f32,
    y: f32,
    index: usize,
    scaled_strength: f32,
    theta2: f32,
    distance_min2: f32,
    rng: &mut Lcg,
    out: &mut (f32, f32),
) {
    match quad {
        Quad::Internal {
            children,
            count,
            cx,
            cy,
        } => {
            let dx = cx - x;
            let dy = cy - y;
            let l = dx * dx + dy * dy;
            if side * side / theta2 < l {
                let l = l.max(distance_min2);
                let w = count * scaled_strength / l;
                out.0 += dx * w;
                out.1 += dy * w;
            } else {
                for child in children.iter().flatten() {
                    accumulate_repulsion(
                        child,
                        side / 2.0,
                        x,
                        y,
                        index,
                        scaled_strength,
                        theta2,
                        distance_min2,
                        rng,
                        out,
                    );
                }
            }
        }
        Quad::Leaf {
            x: lx,
            y: ly,
            items,
        } => {
            for &item in items {
                if item == index {
                    continue;
                }
                let mut dx = lx - x;
                let mut dy = ly - y;
                if dx == 0.0 && dy == 0.0 {
                    dx = rng.jiggle();
                    dy = rng.jiggle();
                }
                let l = (dx * dx + dy * dy).max(distance_min2);
                let w = scaled_strength / l;
                out.0 += dx * w;
                out.1 += dy * w;
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn visit_box(
    quad: &Quad,
    x0: f32,
    y0: f32,
    side: f32,
    bx0: f32,
    by0: f32,
    bx1: f32,
    by1: f32,
    f: &mut impl FnMut(usize, f32, f32),
) {
    if x0 > bx1 || y0 > by1 || x0 + side < bx0 || y0 + side < by0 {
        return;
    }
    match quad {
        Quad::Leaf { x, y, items } => {
            for &item in items {
                f(item, *x, *y);
            }
        }
        Quad::Internal { children, .. } => {
            let half = side / 2.0;
            let origins = [
                (x0, y0),
                (x0 + half, y0),
                (x0, y0 + half),
                (x0 + half, y0 + half),
            ];
            for (child, (cx0, cy0)) in children.iter().zip(origins) {
                if let Some(child) = child {
                    visit_box(child, cx0, cy0, half, bx0, by0, bx1, by1, f);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tree_is_inert() {
        let tree = QuadTree::build(&[]);
        let mut rng = Lcg::new();

        let (fx, fy) = tree.repulsion(0.0, 0.0, 0, -30.0, 1.0, 0.81, 1.0, &mut rng);
        assert_eq!((fx, fy), (0.0, 0.0));

        let mut visited = 0;
        tree.visit_in_box(-10.0, -10.0, 10.0, 10.0, &mut |_, _, _| visited += 1);
        assert_eq!(visited, 0);
    }

    #[test]
    fn box_visit_finds_exactly_the_points_inside() {
        let points = vec![(0.0, 0.0), (5.0, 5.0), (100.0, 100.0), (5.0, 95.0)];
        let tree = QuadTree::build(&points);

        let mut found = Vec::new();
        tree.visit_in_box(-1.0, -1.0, 10.0, 10.0, &mut |i, _, _| found.push(i));
        found.sort_unstable();

        // Cell-level pruning may overreport, never underreport
        assert!(found.contains(&0));
        assert!(found.contains(&1));
        assert!(!found.contains(&2));
    }

    #[test]
    fn coincident_points_share_a_leaf() {
        let points = vec![(1.0, 1.0), (1.0, 1.0), (1.0, 1.0)];
        let tree = QuadTree::build(&points);

        let mut found = Vec::new();
        tree.visit_in_box(0.0, 0.0, 2.0, 2.0, &mut |i, _, _| found.push(i));
        found.sort_unstable();
        assert_eq!(found, vec![0, 1, 2]);
    }

    #[test]
    fn repulsion_pushes_away_from_the_crowd() {
        // A cluster to the right of the probe point: net force points left
        let points = vec![(0.0, 0.0), (10.0, 0.0), (11.0, 1.0), (12.0, -1.0)];
        let tree = QuadTree::build(&points);
        let mut rng = Lcg::new();

        let (fx, fy) = tree.repulsion(0.0, 0.0, 0, -30.0, 1.0, 0.81, 1.0, &mut rng);
        assert!(fx < 0.0, "Repulsion must point away from the cluster");
        assert!(fy.abs() < fx.abs());
    }

    #[test]
    fn aggregate_approximation_matches_exact_sum_for_far_cluster() {
        // Probe far from a tight cluster: the aggregate contribution is
        // within a fraction of a percent of the exact pairwise sum
        let cluster: Vec<(f32, f32)> = (0..16)
            .map(|i| (500.0 + (i % 4) as f32, 500.0 + (i / 4) as f32))
            .collect();
        let tree = QuadTree::build(&cluster);
        let mut rng = Lcg::new();

        let probe_index = cluster.len(); // not in the tree
        let (bh_x, bh_y) = tree.repulsion(0.0, 0.0, probe_index, -30.0, 1.0, 0.81, 1.0, &mut rng);

        let mut exact = (0.0f32, 0.0f32);
        for &(px, py) in &cluster {
            let l = px * px + py * py;
            let w = -30.0 / l;
            exact.0 += px * w;
            exact.1 += py * w;
        }

        let err_x = (bh_x - exact.0).abs() / exact.0.abs();
        let err_y = (bh_y - exact.1).abs() / exact.1.abs();
        assert!(err_x < 0.01, "x error {err_x} too large");
        assert!(err_y < 0.01, "y error {err_y} too large");
    }
}
