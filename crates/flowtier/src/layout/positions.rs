//! Coordinate Layout: node centers from levels.
//!
//! Placement is a pure function of the graph, its levels and the layout
//! constants. Levels are placed top-down so every parent on a lower level
//! already has its final `x` when its children are centered under it.

use log::{debug, trace};
use petgraph::graph::NodeIndex;

use flowtier_core::geometry::{Point, Size};

use super::levels::Levels;
use crate::{config::LayoutConfig, structure::FlowGraph};

/// Center point of every node, indexed like the graph.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Positions {
    centers: Vec<Point>,
}

impl Positions {
    /// Center of the node at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` does not belong to the placed graph.
    pub fn center(&self, idx: NodeIndex) -> Point {
        self.centers[idx.index()]
    }

    pub fn get(&self, idx: NodeIndex) -> Option<Point> {
        self.centers.get(idx.index()).copied()
    }

    pub fn len(&self) -> usize {
        self.centers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }
}

/// Places every node of `graph`.
///
/// For each level in increasing order:
///
/// 1. `y = base_y + level * level_spacing`.
/// 2. A node with parents on lower levels starts at the mean `x` of those
///    parents. The remaining nodes of the level are spread `min_spacing`
///    apart, centered on `base_x`, in tier order.
/// 3. Sorted by `x`, any node closer than `min_spacing` to its left
///    neighbour is pushed right together with everything right of it.
///
/// Finally the whole diagram is shifted right if any node's left edge falls
/// short of `margin`.
pub fn place_nodes(graph: &FlowGraph<'_>, levels: &Levels, config: &LayoutConfig) -> Positions {
    let mut centers: Vec<Option<Point>> = vec![None; graph.node_count()];

    for (level, tier) in levels.tiers().iter().enumerate() {
        let y = config.base_y() + level as f32 * config.level_spacing();

        let mut row: Vec<(NodeIndex, f32)> = Vec::with_capacity(tier.len());
        let mut orphans: Vec<NodeIndex> = Vec::new();
        for &idx in tier {
            let parent_xs: Vec<f32> = graph
                .parents(idx)
                .into_iter()
                .filter(|&parent| levels.level(parent) < level)
                .filter_map(|parent| centers[parent.index()].map(Point::x))
                .collect();

            if parent_xs.is_empty() {
                orphans.push(idx);
            } else {
                let mean = parent_xs.iter().sum::<f32>() / parent_xs.len() as f32;
                row.push((idx, mean));
            }
        }

        let spread = (orphans.len().saturating_sub(1)) as f32 * config.min_spacing();
        for (i, idx) in orphans.into_iter().enumerate() {
            let x = config.base_x() + i as f32 * config.min_spacing() - spread / 2.0;
            row.push((idx, x));
        }

        // Stable sort keeps tier order for equal x.
        row.sort_by(|(_, a), (_, b)| a.total_cmp(b));
        separate(&mut row, config.min_spacing());

        for (idx, x) in row {
            trace!(id:% = graph.node(idx).id(), level, x, y; "Node placed");
            centers[idx.index()] = Some(Point::new(x, y));
        }
    }

    let mut centers: Vec<Point> = centers.into_iter().map(Option::unwrap_or_default).collect();
    clamp_to_margin(graph, &mut centers, config.margin());

    debug!(nodes = centers.len(), levels = levels.len(); "Nodes placed");
    Positions { centers }
}

/// Walks a row sorted by `x` and opens every gap narrower than `min_spacing`,
/// moving the right-hand node and all nodes after it by the same amount.
fn separate(row: &mut [(NodeIndex, f32)], min_spacing: f32) {
    for i in 1..row.len() {
        let gap = row[i].1 - row[i - 1].1;
        if gap < min_spacing {
            let target = row[i - 1].1 + min_spacing;
            let shift = target - row[i].1;
            row[i].1 = target;
            for (_, x) in &mut row[i + 1..] {
                *x += shift;
            }
        }
    }
}

/// Shifts every center right when the leftmost box edge is left of `margin`.
fn clamp_to_margin(graph: &FlowGraph<'_>, centers: &mut [Point], margin: f32) {
    let left = graph
        .node_indices()
        .map(|idx| centers[idx.index()].x() - node_size(graph, idx).half_width())
        .min_by(f32::total_cmp);

    if let Some(left) = left.filter(|&left| left < margin) {
        let shift = margin - left;
        debug!(shift; "Shifting diagram right to respect the margin");
        for center in centers.iter_mut() {
            *center = center.with_x(center.x() + shift);
        }
    }
}

pub(super) fn node_size(graph: &FlowGraph<'_>, idx: NodeIndex) -> Size {
    graph.node(idx).kind().default_size()
}
