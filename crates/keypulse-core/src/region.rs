use crate::constants::REGION_COUNT;
use crate::theme::{self, Theme};

/// One of the fixed screen quadrants an input can route to.
///
/// Each region is bound 1:1 to a drawing surface and an effect pool for the
/// whole life of the process. Grid order is row-major: the first two regions
/// form the top row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    Meadow,
    Sky,
    Ocean,
    Night,
}

impl Region {
    pub const ALL: [Region; REGION_COUNT] =
        [Region::Meadow, Region::Sky, Region::Ocean, Region::Night];

    /// Region used for inputs the classifier does not know.
    pub const DEFAULT: Region = Region::Meadow;

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Region::Meadow => 0,
            Region::Sky => 1,
            Region::Ocean => 2,
            Region::Night => 3,
        }
    }

    #[inline]
    pub fn from_index(index: usize) -> Option<Region> {
        Self::ALL.get(index).copied()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Region::Meadow => "meadow",
            Region::Sky => "sky",
            Region::Ocean => "ocean",
            Region::Night => "night",
        }
    }

    /// (column, row) of this region in the 2x2 layout.
    #[inline]
    pub const fn grid_cell(self) -> (usize, usize) {
        (self.index() % 2, self.index() / 2)
    }

    #[inline]
    pub fn theme(self) -> &'static Theme {
        theme::theme(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_for_every_region() {
        for (i, r) in Region::ALL.iter().enumerate() {
            assert_eq!(r.index(), i);
            assert_eq!(Region::from_index(i), Some(*r));
        }
        assert_eq!(Region::from_index(REGION_COUNT), None);
    }

    #[test]
    fn grid_cells_are_row_major() {
        assert_eq!(Region::Meadow.grid_cell(), (0, 0));
        assert_eq!(Region::Sky.grid_cell(), (1, 0));
        assert_eq!(Region::Ocean.grid_cell(), (0, 1));
        assert_eq!(Region::Night.grid_cell(), (1, 1));
    }
}
