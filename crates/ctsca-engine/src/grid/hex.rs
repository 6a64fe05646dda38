//! # ctsca-engine::grid::hex
//!
//! An offset-coordinate hexagonal lattice (even-row offset, pointy-top).
//! Each node has up to three "forward" neighbors — east, northeast,
//! southeast — so every hex-to-hex edge is only ever built from one side,
//! the same trick `RasterGrid` uses for its two forward directions. When
//! `oriented`, these three families become orientations `{0, 1, 2}`
//! (`N_orient = 3`, matching an oriented hex lattice); otherwise every link
//! gets orientation 0 (`N_orient = 1`, the non-oriented hex variant).

use super::GridAdapter;
use ctsca_types::{
    id::{LinkId, NodeId, Orientation},
    topology::BoundaryMode,
};

pub struct HexGrid {
    rows: usize,
    cols: usize,
    oriented: bool,
    boundary: BoundaryMode,
    links: Vec<(NodeId, NodeId, Orientation)>,
    incident: Vec<Vec<LinkId>>,
}

impl HexGrid {
    pub fn new(rows: usize, cols: usize, oriented: bool, boundary: BoundaryMode) -> Self {
        assert!(rows >= 1 && cols >= 1, "hex grid must have at least one row and column");

        let node_id = |r: usize, c: usize| -> NodeId { (r * cols + c) as NodeId };
        let in_bounds = |r: isize, c: isize| -> bool {
            r >= 0 && c >= 0 && (r as usize) < rows && (c as usize) < cols
        };

        let mut links = Vec::new();
        let mut incident: Vec<Vec<LinkId>> = vec![Vec::new(); rows * cols];

        let mut push_link = |from: NodeId, to: NodeId, orient: Orientation, links: &mut Vec<(NodeId, NodeId, Orientation)>, incident: &mut Vec<Vec<LinkId>>| {
            let id = links.len() as LinkId;
            links.push((from, to, orient));
            incident[from as usize].push(id);
            incident[to as usize].push(id);
        };

        for r in 0..rows {
            for c in 0..cols {
                let (ir, ic) = (r as isize, c as isize);

                // East: same row, next column.
                if in_bounds(ir, ic + 1) {
                    push_link(node_id(r, c), node_id(r, c + 1), 0, &mut links, &mut incident);
                }

                // Even/odd row offset for the two diagonal families.
                let (ne_c, se_c) = if r % 2 == 0 { (ic, ic) } else { (ic + 1, ic + 1) };

                if in_bounds(ir - 1, ne_c) {
                    push_link(node_id(r, c), node_id((ir - 1) as usize, ne_c as usize), 1, &mut links, &mut incident);
                }
                if in_bounds(ir + 1, se_c) {
                    push_link(node_id(r, c), node_id((ir + 1) as usize, se_c as usize), 2, &mut links, &mut incident);
                }
            }
        }

        if !oriented {
            for link in links.iter_mut() {
                link.2 = 0;
            }
        }

        Self { rows, cols, oriented, boundary, links, incident }
    }

    fn row_col(&self, node: NodeId) -> (usize, usize) {
        let node = node as usize;
        (node / self.cols, node % self.cols)
    }
}

impl GridAdapter for HexGrid {
    fn node_count(&self) -> usize {
        self.rows * self.cols
    }

    fn active_link_count(&self) -> usize {
        self.links.len()
    }

    fn link_endpoints(&self, link: LinkId) -> (NodeId, NodeId, Orientation) {
        self.links[link as usize]
    }

    fn is_core(&self, node: NodeId) -> bool {
        match self.boundary {
            BoundaryMode::AllCore => true,
            BoundaryMode::FrozenEdges => {
                let (r, c) = self.row_col(node);
                r != 0 && r != self.rows - 1 && c != 0 && c != self.cols - 1
            }
        }
    }

    fn incident_active_links(&self, node: NodeId) -> &[LinkId] {
        &self.incident[node as usize]
    }

    fn orientation_count(&self) -> u32 {
        if self.oriented {
            3
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_oriented_hex_has_single_orientation() {
        let g = HexGrid::new(4, 4, false, BoundaryMode::AllCore);
        assert_eq!(g.orientation_count(), 1);
        for link in 0..g.active_link_count() as LinkId {
            assert_eq!(g.link_endpoints(link).2, 0);
        }
    }

    #[test]
    fn oriented_hex_uses_three_families() {
        let g = HexGrid::new(4, 4, true, BoundaryMode::AllCore);
        assert_eq!(g.orientation_count(), 3);
        let orients: std::collections::HashSet<_> =
            (0..g.active_link_count() as LinkId).map(|l| g.link_endpoints(l).2).collect();
        assert!(orients.contains(&0));
        assert!(orients.contains(&1) || orients.contains(&2));
    }

    #[test]
    fn incident_links_cover_every_active_link_twice() {
        let g = HexGrid::new(4, 4, true, BoundaryMode::AllCore);
        let mut count = vec![0u32; g.active_link_count()];
        for node in 0..g.node_count() as NodeId {
            for &link in g.incident_active_links(node) {
                count[link as usize] += 1;
            }
        }
        assert!(count.iter().all(|&c| c == 2));
    }
}
