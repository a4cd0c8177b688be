//! Brick-wall layer plan.
//!
//! A Trotter step is two layers. Even layers couple bonds `(0,1), (2,3), …`
//! and, when the chain has a field, carry the field rotation; odd layers
//! couple `(1,2), (3,4), …`.

use serde::Serialize;
use spinchain_ir::QubitId;

/// One layer of the brick wall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layer {
    /// Position in the schedule.
    pub index: u64,
    /// `index % 2`; also the first qubit of the first pair.
    pub parity: u32,
    /// Whether the field rotation precedes this layer's blocks.
    pub field: bool,
    /// Neighbouring pairs coupled in this layer, in ascending order.
    pub pairs: Vec<(QubitId, QubitId)>,
}

/// The full layer plan for a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrotterSchedule {
    num_qubits: u32,
    layers: Vec<Layer>,
}

impl TrotterSchedule {
    /// Plan `2 * trotter_num` layers over `num_qubits` sites. `field` marks
    /// whether even layers are preceded by a field rotation.
    pub fn new(num_qubits: u32, trotter_num: u32, field: bool) -> Self {
        let layers = (0..Self::layer_count(trotter_num))
            .map(|index| {
                let parity = u32::from(index % 2 == 1);
                let pairs = (parity..num_qubits.saturating_sub(1))
                    .step_by(2)
                    .map(|q| (QubitId(q), QubitId(q + 1)))
                    .collect();
                Layer {
                    index,
                    parity,
                    field: field && parity == 0,
                    pairs,
                }
            })
            .collect();
        Self { num_qubits, layers }
    }

    /// Number of layers planned for `trotter_num` steps.
    pub fn layer_count(trotter_num: u32) -> u64 {
        2 * u64::from(trotter_num)
    }

    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    /// Number of layers preceded by a field rotation.
    pub fn num_field_layers(&self) -> usize {
        self.layers.iter().filter(|l| l.field).count()
    }

    /// `ceil(layers * (qubits - 1) / 2)`, the number of propagator blocks.
    pub fn num_blocks(&self) -> usize {
        let bonds = self.num_qubits.saturating_sub(1) as usize;
        (self.num_layers() * bonds).div_ceil(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(layer: &Layer) -> Vec<(u32, u32)> {
        layer.pairs.iter().map(|(a, b)| (a.0, b.0)).collect()
    }

    #[test]
    fn test_four_qubit_pairings() {
        let schedule = TrotterSchedule::new(4, 2, true);
        assert_eq!(schedule.num_layers(), 4);
        assert_eq!(pairs(&schedule.layers()[0]), vec![(0, 1), (2, 3)]);
        assert_eq!(pairs(&schedule.layers()[1]), vec![(1, 2)]);
        assert_eq!(pairs(&schedule.layers()[2]), vec![(0, 1), (2, 3)]);
        assert_eq!(pairs(&schedule.layers()[3]), vec![(1, 2)]);
        assert_eq!(schedule.num_blocks(), 6);
        assert_eq!(schedule.num_field_layers(), 2);
    }

    #[test]
    fn test_odd_chain() {
        let schedule = TrotterSchedule::new(5, 1, true);
        assert_eq!(pairs(&schedule.layers()[0]), vec![(0, 1), (2, 3)]);
        assert_eq!(pairs(&schedule.layers()[1]), vec![(1, 2), (3, 4)]);
        assert_eq!(schedule.num_blocks(), 4);
    }

    #[test]
    fn test_degenerate_sizes() {
        let empty = TrotterSchedule::new(4, 0, true);
        assert_eq!(empty.num_layers(), 0);
        assert_eq!(empty.num_blocks(), 0);

        let single = TrotterSchedule::new(1, 3, true);
        assert_eq!(single.num_layers(), 6);
        assert!(single.layers().iter().all(|l| l.pairs.is_empty()));
        assert_eq!(single.num_blocks(), 0);
        assert_eq!(single.num_field_layers(), 3);
    }

    #[test]
    fn test_no_field_layers_without_field() {
        let schedule = TrotterSchedule::new(4, 2, false);
        assert_eq!(schedule.num_layers(), 4);
        assert_eq!(schedule.num_field_layers(), 0);
        assert!(schedule.layers().iter().all(|l| !l.field));
    }

    #[test]
    fn test_layer_count_does_not_overflow() {
        assert_eq!(TrotterSchedule::layer_count(3), 6);
        assert_eq!(TrotterSchedule::layer_count(1 << 31), 1 << 32);
        assert_eq!(
            TrotterSchedule::layer_count(u32::MAX),
            2 * u64::from(u32::MAX)
        );
    }
}
