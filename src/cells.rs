use smallvec::SmallVec;

pub type CoordinateSmallVec = SmallVec<[Cartesian2DCoordinate; 4]>;
pub type CoordinateOptionSmallVec = SmallVec<[Option<Cartesian2DCoordinate>; 4]>;

/// Grid position of a cell. `y` runs along the world z axis, so North is `y + 1`.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    pub fn from_row_major_index(index: usize, row_length: usize) -> Cartesian2DCoordinate {
        let y = index / row_length;
        let x = index - (y * row_length);
        Cartesian2DCoordinate::new(x as u32, y as u32)
    }

    /// The coordinate one step away in `dir`, ignoring any grid's upper bounds.
    /// None if the step would go below zero.
    pub fn offset(self, dir: CompassPrimary) -> Option<Cartesian2DCoordinate> {
        let (x, y) = (self.x, self.y);
        match dir {
            CompassPrimary::North => y.checked_add(1).map(|y| Cartesian2DCoordinate { x, y }),
            CompassPrimary::South => y.checked_sub(1).map(|y| Cartesian2DCoordinate { x, y }),
            CompassPrimary::East => x.checked_add(1).map(|x| Cartesian2DCoordinate { x, y }),
            CompassPrimary::West => x.checked_sub(1).map(|x| Cartesian2DCoordinate { x, y }),
        }
    }

    /// Direction to take from `self` to reach an orthogonally adjacent `other`.
    pub fn direction_to(self, other: Cartesian2DCoordinate) -> Option<CompassPrimary> {
        CompassPrimary::ALL
            .iter()
            .cloned()
            .find(|dir| self.offset(*dir) == Some(other))
    }
}

impl From<(u32, u32)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (u32, u32)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

impl CompassPrimary {
    /// Neighbour enumeration order used by the generators.
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::North,
                                          CompassPrimary::South,
                                          CompassPrimary::East,
                                          CompassPrimary::West];

    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::West => CompassPrimary::East,
        }
    }

    pub fn is_east_west(self) -> bool {
        self == CompassPrimary::East || self == CompassPrimary::West
    }
}

/// The four walls of one maze cell. A `true` flag means the wall stands.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct WallCell {
    pub north: bool,
    pub south: bool,
    pub east: bool,
    pub west: bool,
}

impl Default for WallCell {
    fn default() -> WallCell {
        WallCell {
            north: true,
            south: true,
            east: true,
            west: true,
        }
    }
}

impl WallCell {
    #[inline]
    pub fn has_wall(&self, dir: CompassPrimary) -> bool {
        match dir {
            CompassPrimary::North => self.north,
            CompassPrimary::South => self.south,
            CompassPrimary::East => self.east,
            CompassPrimary::West => self.west,
        }
    }

    // Only the grid may knock walls down so that both sides stay in step.
    pub(crate) fn remove_wall(&mut self, dir: CompassPrimary) {
        match dir {
            CompassPrimary::North => self.north = false,
            CompassPrimary::South => self.south = false,
            CompassPrimary::East => self.east = false,
            CompassPrimary::West => self.west = false,
        }
    }

    pub fn walls_count(&self) -> usize {
        CompassPrimary::ALL.iter().filter(|dir| self.has_wall(**dir)).count()
    }

    pub fn standing_walls(&self) -> SmallVec<[CompassPrimary; 4]> {
        CompassPrimary::ALL.iter().cloned().filter(|dir| self.has_wall(*dir)).collect()
    }
}
