//! # ctsca-engine::codec
//!
//! The link-state codec: a bijection between `(from_state, to_state,
//! orientation)` triples and dense link-state ids (§3, §4.1). Built once at
//! construction by iterating the triple space in the canonical order
//! (orientation outermost, then from-state, then to-state) so that
//! `decode` is a table lookup and `encode` is a closed-form computation —
//! the two must agree, which is exactly what the round-trip property (P5)
//! checks.

use ctsca_types::{
    errors::DomainError,
    id::{CellState, LinkStateId, Orientation},
};

/// Converts cell-state/orientation triples to and from dense link-state ids.
#[derive(Debug, Clone)]
pub struct LinkCodec {
    n_cell: u32,
    n_orient: u32,
    n_link: u32,
    /// `decode_table[id] = (from_state, to_state, orientation)`, populated
    /// in the canonical enumeration order at construction.
    decode_table: Vec<(CellState, CellState, Orientation)>,
}

impl LinkCodec {
    pub fn new(n_cell: u32, n_orient: u32) -> Self {
        let n_link = n_orient * n_cell * n_cell;
        let mut decode_table = Vec::with_capacity(n_link as usize);
        for orientation in 0..n_orient {
            for from_state in 0..n_cell {
                for to_state in 0..n_cell {
                    decode_table.push((from_state as CellState, to_state as CellState, orientation as Orientation));
                }
            }
        }
        Self {
            n_cell,
            n_orient,
            n_link,
            decode_table,
        }
    }

    pub fn n_cell(&self) -> u32 {
        self.n_cell
    }

    pub fn n_orient(&self) -> u32 {
        self.n_orient
    }

    pub fn n_link(&self) -> u32 {
        self.n_link
    }

    /// `id = orientation * N_cell^2 + from_state * N_cell + to_state`.
    pub fn encode(
        &self,
        from_state: CellState,
        to_state: CellState,
        orientation: Orientation,
    ) -> Result<LinkStateId, DomainError> {
        if from_state as u32 >= self.n_cell {
            return Err(DomainError::CellStateOutOfRange(from_state as u32, self.n_cell));
        }
        if to_state as u32 >= self.n_cell {
            return Err(DomainError::CellStateOutOfRange(to_state as u32, self.n_cell));
        }
        if orientation as u32 >= self.n_orient {
            return Err(DomainError::OrientationOutOfRange(orientation as u32, self.n_orient));
        }
        Ok(orientation as u32 * self.n_cell * self.n_cell + from_state as u32 * self.n_cell + to_state as u32)
    }

    pub fn decode(&self, link_state: LinkStateId) -> Result<(CellState, CellState, Orientation), DomainError> {
        self.decode_table
            .get(link_state as usize)
            .copied()
            .ok_or(DomainError::LinkStateOutOfRange(link_state, self.n_link))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_over_full_domain() {
        let codec = LinkCodec::new(3, 2);
        for id in 0..codec.n_link() {
            let (f, t, o) = codec.decode(id).unwrap();
            assert_eq!(codec.encode(f, t, o).unwrap(), id);
        }
    }

    #[test]
    fn canonical_enumeration_order() {
        // orientation outermost, then from_state, then to_state: matches §3.
        let codec = LinkCodec::new(2, 2);
        assert_eq!(codec.decode(0).unwrap(), (0, 0, 0));
        assert_eq!(codec.decode(1).unwrap(), (0, 1, 0));
        assert_eq!(codec.decode(2).unwrap(), (1, 0, 0));
        assert_eq!(codec.decode(3).unwrap(), (1, 1, 0));
        assert_eq!(codec.decode(4).unwrap(), (0, 0, 1));
    }

    #[test]
    fn n_link_matches_formula() {
        let codec = LinkCodec::new(4, 3);
        assert_eq!(codec.n_link(), 3 * 4 * 4);
    }

    #[test]
    fn rejects_out_of_range_inputs() {
        let codec = LinkCodec::new(2, 2);
        assert!(codec.encode(2, 0, 0).is_err());
        assert!(codec.encode(0, 0, 2).is_err());
        assert!(codec.decode(codec.n_link()).is_err());
    }
}
