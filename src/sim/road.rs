//! Road generation
//!
//! A road is a strip of cells, each solid or a gap. The player can clear at
//! most one gap per jump, so a road never holds two gaps in a row and always
//! starts on solid ground.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::motion::JumpStep;
use crate::consts::MAX_ROAD_LENGTH;
use crate::error::ConfigError;

/// Cell types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Solid,
    /// Lethal when landed on exactly
    Gap,
}

/// Outcome of landing on a cell index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Landing {
    Safe,
    /// Landed in a gap
    Gap,
    /// Jumped past the last cell
    Overshoot,
}

/// An immutable, validated road
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<CellKind>", into = "Vec<CellKind>")]
pub struct Road {
    cells: Vec<CellKind>,
}

impl Road {
    /// Build a road from explicit cells, checking both invariants
    pub fn from_cells(cells: Vec<CellKind>) -> Result<Self, ConfigError> {
        if cells.first() == Some(&CellKind::Gap) {
            return Err(ConfigError::StartsOnGap);
        }
        if let Some(index) = cells
            .windows(2)
            .position(|pair| pair == [CellKind::Gap, CellKind::Gap])
        {
            return Err(ConfigError::ConsecutiveGaps { index: index + 1 });
        }
        Ok(Self { cells })
    }

    /// A road with no cells (degraded configuration)
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<CellKind> {
        self.cells.get(index).copied()
    }

    pub fn cells(&self) -> &[CellKind] {
        &self.cells
    }

    /// Judge a landing at `index`
    pub fn judge(&self, index: usize) -> Landing {
        match self.cells.get(index) {
            Some(CellKind::Solid) => Landing::Safe,
            Some(CellKind::Gap) => Landing::Gap,
            None => Landing::Overshoot,
        }
    }

    /// Index of the furthest solid cell
    pub fn last_solid(&self) -> Option<usize> {
        self.cells.iter().rposition(|&c| c == CellKind::Solid)
    }

    /// Jumps that carry the player from cell 0 to the furthest solid cell,
    /// touching only solid cells. Prefers single steps.
    pub fn winning_path(&self) -> Option<Vec<JumpStep>> {
        let goal = self.last_solid()?;
        let mut path = Vec::new();
        let mut index = 0;
        while index < goal {
            let step = if self.judge(index + 1) == Landing::Safe {
                JumpStep::One
            } else {
                JumpStep::Two
            };
            index += step.cells() as usize;
            if self.judge(index) != Landing::Safe {
                return None;
            }
            path.push(step);
        }
        Some(path)
    }
}

impl TryFrom<Vec<CellKind>> for Road {
    type Error = ConfigError;

    fn try_from(cells: Vec<CellKind>) -> Result<Self, Self::Error> {
        Self::from_cells(cells)
    }
}

impl From<Road> for Vec<CellKind> {
    fn from(road: Road) -> Self {
        road.cells
    }
}

/// Generate a road of `length` cells.
///
/// Cell 0 is solid. After a gap the next cell is forced solid without a draw;
/// otherwise one fair coin is drawn per cell (`true` = solid).
pub fn generate_road<R: Rng>(length: u32, rng: &mut R) -> Result<Road, ConfigError> {
    if length < 1 {
        return Err(ConfigError::RoadTooShort { length });
    }
    if length > MAX_ROAD_LENGTH {
        return Err(ConfigError::RoadTooLong {
            length,
            max: MAX_ROAD_LENGTH,
        });
    }

    let mut cells = Vec::with_capacity(length as usize);
    cells.push(CellKind::Solid);

    for i in 1..length as usize {
        let kind = if cells[i - 1] == CellKind::Gap {
            CellKind::Solid
        } else if rng.random::<bool>() {
            CellKind::Solid
        } else {
            CellKind::Gap
        };
        cells.push(kind);
    }

    Ok(Road { cells })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::{RngCore, SeedableRng};
    use rand_pcg::Pcg32;

    use super::CellKind::{Gap, Solid};

    /// Bit source that alternates all-zero and all-one words
    struct Alternating {
        high: bool,
    }

    impl Alternating {
        fn next_word(&mut self) -> u64 {
            let word = if self.high { u64::MAX } else { 0 };
            self.high = !self.high;
            word
        }
    }

    impl RngCore for Alternating {
        fn next_u32(&mut self) -> u32 {
            self.next_word() as u32
        }

        fn next_u64(&mut self) -> u64 {
            self.next_word()
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            let word = self.next_word() as u8;
            dst.fill(word);
        }
    }

    #[test]
    fn test_alternating_draws_give_fixed_road() {
        let mut rng = Alternating { high: false };
        let road = generate_road(5, &mut rng).unwrap();
        // cell 2 is forced solid, so only cells 1, 3 and 4 consume draws
        assert_eq!(road.cells(), &[Solid, Gap, Solid, Solid, Gap]);
    }

    #[test]
    fn test_single_cell_road() {
        let mut rng = Pcg32::seed_from_u64(1);
        let road = generate_road(1, &mut rng).unwrap();
        assert_eq!(road.cells(), &[Solid]);
        assert_eq!(road.judge(0), Landing::Safe);
        assert_eq!(road.judge(1), Landing::Overshoot);
    }

    #[test]
    fn test_zero_length_rejected() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(matches!(
            generate_road(0, &mut rng),
            Err(ConfigError::RoadTooShort { length: 0 })
        ));
    }

    #[test]
    fn test_oversized_length_rejected_before_allocating() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(matches!(
            generate_road(u32::MAX, &mut rng),
            Err(ConfigError::RoadTooLong { length: u32::MAX, .. })
        ));
        let road = generate_road(MAX_ROAD_LENGTH, &mut rng).unwrap();
        assert_eq!(road.len(), MAX_ROAD_LENGTH as usize);
    }

    #[test]
    fn test_same_seed_same_road() {
        let a = generate_road(50, &mut Pcg32::seed_from_u64(42)).unwrap();
        let b = generate_road(50, &mut Pcg32::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_cells_validation() {
        assert!(Road::from_cells(vec![Solid, Gap, Solid]).is_ok());
        assert!(matches!(
            Road::from_cells(vec![Gap, Solid]),
            Err(ConfigError::StartsOnGap)
        ));
        assert!(matches!(
            Road::from_cells(vec![Solid, Solid, Gap, Gap, Solid]),
            Err(ConfigError::ConsecutiveGaps { index: 3 })
        ));
    }

    #[test]
    fn test_judge() {
        let road = Road::from_cells(vec![Solid, Gap, Solid]).unwrap();
        assert_eq!(road.judge(0), Landing::Safe);
        assert_eq!(road.judge(1), Landing::Gap);
        assert_eq!(road.judge(2), Landing::Safe);
        assert_eq!(road.judge(3), Landing::Overshoot);
        assert_eq!(road.judge(100), Landing::Overshoot);
    }

    #[test]
    fn test_winning_path_skips_gaps() {
        let road = Road::from_cells(vec![Solid, Gap, Solid, Solid, Gap, Solid, Gap]).unwrap();
        let path = road.winning_path().unwrap();
        assert_eq!(path, vec![JumpStep::Two, JumpStep::One, JumpStep::Two]);
        assert!(Road::empty().winning_path().is_none());
        assert_eq!(Road::from_cells(vec![Solid]).unwrap().winning_path(), Some(vec![]));
    }

    #[test]
    fn test_serde_rejects_invalid_road() {
        let road: Road = serde_json::from_str(r#"["Solid","Gap","Solid"]"#).unwrap();
        assert_eq!(road.len(), 3);
        assert_eq!(serde_json::to_string(&road).unwrap(), r#"["Solid","Gap","Solid"]"#);
        assert!(serde_json::from_str::<Road>(r#"["Solid","Gap","Gap"]"#).is_err());
    }

    proptest! {
        #[test]
        fn generated_roads_hold_invariants(length in 1u32..200, seed in any::<u64>()) {
            let road = generate_road(length, &mut Pcg32::seed_from_u64(seed)).unwrap();
            prop_assert_eq!(road.len(), length as usize);
            prop_assert_eq!(road.get(0), Some(Solid));
            for pair in road.cells().windows(2) {
                prop_assert!(!(pair[0] == Gap && pair[1] == Gap));
            }
            prop_assert!(Road::from_cells(road.cells().to_vec()).is_ok());
        }

        #[test]
        fn valid_roads_are_winnable(kinds in proptest::collection::vec(any::<bool>(), 1..120)) {
            // Build an arbitrary valid road by forcing solid after each gap
            let mut cells = vec![Solid];
            for &solid in &kinds[1..] {
                let forced = *cells.last().unwrap() == Gap;
                cells.push(if forced || solid { Solid } else { Gap });
            }
            let road = Road::from_cells(cells).unwrap();
            let path = road.winning_path().unwrap();

            let mut index = 0usize;
            for step in &path {
                index += step.cells() as usize;
                prop_assert_eq!(road.judge(index), Landing::Safe);
            }
            prop_assert_eq!(Some(index), road.last_solid());
        }
    }
}
