//! Grid geometry: directions, linear cell indexing and neighbor lookup
//!
//! Cells are addressed by the linear index `y * cols + x`. Directions are
//! numbered so that `index ^ 1` yields the opposite direction, which lets
//! adjacency tables pair a face with its counterpart without a lookup.
//! The front/back pair exists only to dimension buffers for a future third
//! axis; neighbor lookup and propagation cover the four planar directions.

use std::fmt;

/// Number of planar directions handled by propagation
pub const DIRECTIONS_2D: usize = 4;
/// Number of directions a volumetric grid would need
pub const DIRECTIONS_3D: usize = 6;

/// Face of a cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Towards row `y - 1`
    Top = 0,
    /// Towards row `y + 1`
    Bottom = 1,
    /// Towards column `x - 1`
    Left = 2,
    /// Towards column `x + 1`
    Right = 3,
    /// Towards layer `z - 1`
    Front = 4,
    /// Towards layer `z + 1`
    Back = 5,
}

impl Direction {
    /// Planar directions in propagation order
    pub const PLANAR: [Self; DIRECTIONS_2D] = [Self::Top, Self::Bottom, Self::Left, Self::Right];

    /// All directions including the volumetric pair
    pub const ALL: [Self; DIRECTIONS_3D] = [
        Self::Top,
        Self::Bottom,
        Self::Left,
        Self::Right,
        Self::Front,
        Self::Back,
    ];

    /// Dense index of this direction
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Direction for a dense index
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Top),
            1 => Some(Self::Bottom),
            2 => Some(Self::Left),
            3 => Some(Self::Right),
            4 => Some(Self::Front),
            5 => Some(Self::Back),
            _ => None,
        }
    }

    /// The facing direction on the neighboring cell
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Front => Self::Back,
            Self::Back => Self::Front,
        }
    }

    /// Upper-case name used in diagnostics
    pub const fn name(self) -> &'static str {
        match self {
            Self::Top => "TOP",
            Self::Bottom => "BOTTOM",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Front => "FRONT",
            Self::Back => "BACK",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed-size rectangular grid without wraparound
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridShape {
    /// Number of columns
    pub cols: usize,
    /// Number of rows
    pub rows: usize,
}

impl GridShape {
    /// Shape with `cols` columns and `rows` rows
    pub const fn new(cols: usize, rows: usize) -> Self {
        Self { cols, rows }
    }

    /// Number of cells
    pub const fn cell_count(&self) -> usize {
        self.cols * self.rows
    }

    /// Test whether `index` addresses a cell
    pub const fn contains(&self, index: usize) -> bool {
        index < self.cell_count()
    }

    /// Linear index of `(x, y)`
    pub const fn index(&self, x: usize, y: usize) -> usize {
        y * self.cols + x
    }

    /// `(x, y)` coordinates of a linear index
    pub const fn coordinates(&self, index: usize) -> (usize, usize) {
        (index % self.cols, index / self.cols)
    }

    /// Neighbor of `index` across `direction`, if the grid has one
    ///
    /// Volumetric directions never have a neighbor on a planar grid.
    pub const fn neighbor(&self, index: usize, direction: Direction) -> Option<usize> {
        let (x, y) = self.coordinates(index);
        match direction {
            Direction::Top if y > 0 => Some(index - self.cols),
            Direction::Bottom if y + 1 < self.rows => Some(index + self.cols),
            Direction::Left if x > 0 => Some(index - 1),
            Direction::Right if x + 1 < self.cols => Some(index + 1),
            _ => None,
        }
    }

    /// Existing planar neighbors of `index` paired with the direction leading to them
    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = (Direction, usize)> + '_ {
        Direction::PLANAR
            .into_iter()
            .filter_map(move |direction| {
                self.neighbor(index, direction)
                    .map(|neighbor| (direction, neighbor))
            })
    }
}
