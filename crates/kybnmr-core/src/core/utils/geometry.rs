use crate::core::models::structure::Structure;
use itertools::Itertools;
use nalgebra::Point3;

/// Number of unordered atom pairs for `n` atoms, i.e. `n * (n - 1) / 2`.
#[inline]
pub fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Euclidean distances of every unordered pair `(i, j)` with `i < j`, in enumeration order.
pub fn pairwise_distances(positions: &[Point3<f64>]) -> Vec<f64> {
    let mut distances = Vec::with_capacity(pair_count(positions.len()));
    distances.extend(
        positions
            .iter()
            .tuple_combinations()
            .map(|(a, b)| nalgebra::distance(a, b)),
    );
    distances
}

/// A rotation- and translation-invariant shape descriptor of one structure.
///
/// The fingerprint is the ascending-sorted list of all pairwise interatomic distances.
/// Sorting removes any dependence on pair enumeration order. Two different isomers that
/// happen to share the same multiset of distances are indistinguishable, so this is a
/// cheap screen and not a substitute for an aligned RMSD.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Fingerprint {
    distances: Vec<f64>,
}

impl Fingerprint {
    /// Computes the fingerprint of a structure in O(n²) time and space.
    ///
    /// Structures with fewer than two atoms yield an empty fingerprint.
    pub fn compute(structure: &Structure) -> Self {
        let positions: Vec<Point3<f64>> = structure.positions().copied().collect();
        Self::from_positions(&positions)
    }

    pub fn from_positions(positions: &[Point3<f64>]) -> Self {
        let mut distances = pairwise_distances(positions);
        distances.sort_unstable_by(f64::total_cmp);
        Self { distances }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.distances
    }

    /// Largest elementwise absolute difference between two fingerprints.
    ///
    /// Returns `None` when the fingerprints have different lengths, which means the
    /// underlying structures have different atom counts. Two empty fingerprints
    /// deviate by `0.0`. A NaN difference makes the result NaN, which never passes a
    /// distance threshold.
    pub fn max_deviation(&self, other: &Fingerprint) -> Option<f64> {
        if self.distances.len() != other.distances.len() {
            return None;
        }
        Some(
            self.distances
                .iter()
                .zip(&other.distances)
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, |max, d| if d.is_nan() || d > max { d } else { max }),
        )
    }
}
