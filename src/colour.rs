//! Admissible colour triples of SU(2)_q at level `r`.
//! The table is computed once and only ever queried afterwards.
use itertools::iproduct;
use std::collections::BTreeSet;

use crate::debug::InputError;

pub type Colour = u32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColourTable {
    level: u32,
    triples: BTreeSet<[Colour; 3]>,
}

impl ColourTable {
    /// All sorted triples `(i, j, k)` with entries in `[0, r-1]`,
    /// even and non-negative `i+j-k`, `j+k-i`, `k+i-j`
    /// and `i+j+k <= 2r-4`.
    pub fn new(level: u32) -> Result<Self, InputError> {
        if level < 4 {
            return Err(InputError::Level(level));
        }

        let triples = iproduct!(0..level, 0..level, 0..level)
            .filter(|(i, j, k)| i <= j && j <= k)
            .filter(|(i, j, k)| (i + j + k) % 2 == 0 && i + j >= *k)
            .filter(|(i, j, k)| i + j + k <= 2 * level - 4)
            .map(|(i, j, k)| [i, j, k])
            .collect();

        Ok(ColourTable { level, triples })
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Order of the colours does not matter.
    pub fn contains(&self, mut colours: [Colour; 3]) -> bool {
        colours.sort_unstable();
        self.triples.contains(&colours)
    }

    pub fn triples(&self) -> impl Iterator<Item = &[Colour; 3]> + '_ {
        self.triples.iter()
    }
}
