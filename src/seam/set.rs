//! The per-cycle set of diverse seams.

use crate::random::UniformSource;

use super::energy::EnergyMatrix;
use super::maximizer::{Seam, SeamMaximizer};

/// K seams extracted from one matrix, best first.
///
/// Index 0 is the global optimum; each later seam was computed with all
/// earlier seams suppressed, so it is progressively more exploratory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeamSet {
    seams: Vec<Seam>,
}

impl SeamSet {
    /// Extracts exactly `count` seams from `matrix`.
    pub fn build(matrix: &EnergyMatrix, count: usize) -> Self {
        let mut maximizer = SeamMaximizer::new(matrix);
        let seams = (0..count).map(|_| maximizer.extract()).collect();
        SeamSet { seams }
    }

    pub fn len(&self) -> usize {
        self.seams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seams.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Seam> {
        self.seams.get(index)
    }

    pub fn best(&self) -> Option<&Seam> {
        self.seams.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Seam> {
        self.seams.iter()
    }

    /// Picks one seam uniformly at random.
    pub fn choose(&self, rng: &mut impl UniformSource) -> Option<&Seam> {
        if self.seams.is_empty() {
            return None;
        }
        self.seams.get(rng.below(self.seams.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedSource;

    fn ridge() -> EnergyMatrix {
        EnergyMatrix::from_rows(&[
            vec![1, 9, 1, 4],
            vec![1, 9, 1, 4],
            vec![1, 9, 1, 4],
        ])
    }

    #[test]
    fn builds_exactly_k_seams() {
        let set = SeamSet::build(&ridge(), 3);
        assert_eq!(set.len(), 3);
        assert!(set.iter().all(|s| s.len() == 3 && s.is_continuous()));
    }

    #[test]
    fn first_seam_is_best() {
        let set = SeamSet::build(&ridge(), 3);
        let best = set.best().unwrap();
        assert_eq!(best.columns(), &[1, 1, 1]);
        assert!(set.iter().all(|s| s.value() <= best.value()));
    }

    #[test]
    fn later_seams_differ() {
        let set = SeamSet::build(&ridge(), 3);
        let all: Vec<&[usize]> = set.iter().map(|s| s.columns()).collect();
        assert_ne!(all[0], all[1]);
        assert_ne!(all[1], all[2]);
        assert_ne!(all[0], all[2]);
        assert_eq!(all[1], &[3, 3, 3]);
    }

    #[test]
    fn zero_seams_or_empty_matrix() {
        assert!(SeamSet::build(&ridge(), 0).is_empty());
        let set = SeamSet::build(&EnergyMatrix::empty(), 2);
        assert_eq!(set.len(), 2);
        assert!(set.iter().all(|s| s.is_empty()));
    }

    #[test]
    fn choose_uses_source() {
        let set = SeamSet::build(&ridge(), 3);
        let mut rng = ScriptedSource::new(vec![2], vec![]);
        assert_eq!(set.choose(&mut rng), set.get(2));
        assert!(SeamSet::default().choose(&mut rng).is_none());
    }
}
