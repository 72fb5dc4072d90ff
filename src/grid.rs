use std::fmt;

use petgraph::graph::{NodeIndex, UnGraph};

use crate::cells::{Cartesian2DCoordinate, CompassPrimary, CoordinateOptionSmallVec,
                   CoordinateSmallVec, WallCell};
use crate::units::{EdgesCount, Height, NodesCount, Width};


/// A rectangular grid of walled cells. Carving a passage knocks down the wall on both
/// sides of the boundary, so neighbouring cells always agree about the wall between them.
#[derive(Clone, Eq, PartialEq)]
pub struct MazeGrid {
    cells: Vec<WallCell>,
    width: Width,
    height: Height,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellLinkError {
    InvalidGridCoordinate,
    SelfLink,
    NotAdjacent,
}

impl fmt::Debug for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "MazeGrid :: width: {:?}, height: {:?}, passages: {:?}",
               self.width, self.height, self.passages_count())
    }
}

impl MazeGrid {
    /// Panics if either dimension is zero; sizes are validated by `MazeConfig` first.
    pub fn new(width: Width, height: Height) -> MazeGrid {
        assert!(width.0 > 0 && height.0 > 0, "maze grid dimensions must be positive");

        MazeGrid {
            cells: vec![WallCell::default(); width.0 * height.0],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> Width {
        self.width
    }

    #[inline]
    pub fn height(&self) -> Height {
        self.height
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// The middle cell. Exact when both dimensions are odd.
    #[inline]
    pub fn centre(&self) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new((self.width.0 / 2) as u32, (self.height.0 / 2) as u32)
    }

    /// Node and maximum edge counts of the passage graph.
    pub fn graph_size(&self) -> (NodesCount, EdgesCount) {
        let (w, h) = (self.width.0, self.height.0);
        (NodesCount(w * h), EdgesCount((w - 1) * h + w * (h - 1)))
    }

    #[inline]
    pub fn cell(&self, coord: Cartesian2DCoordinate) -> Option<&WallCell> {
        self.grid_coordinate_to_index(coord).map(|index| &self.cells[index])
    }

    /// Is there a wall on the `dir` side of the cell? Invalid coordinates count as solid.
    pub fn has_wall(&self, coord: Cartesian2DCoordinate, dir: CompassPrimary) -> bool {
        self.cell(coord).map_or(true, |cell| cell.has_wall(dir))
    }

    /// Knock down the wall between `coord` and its neighbour in direction `dir`.
    /// Walls on the outer boundary of the grid cannot be carved.
    pub fn carve(&mut self,
                 coord: Cartesian2DCoordinate,
                 dir: CompassPrimary)
                 -> Result<Cartesian2DCoordinate, CellLinkError> {

        let a_index = self.grid_coordinate_to_index(coord)
            .ok_or(CellLinkError::InvalidGridCoordinate)?;
        let neighbour = self.neighbour_at_direction(coord, dir)
            .ok_or(CellLinkError::InvalidGridCoordinate)?;
        let b_index = self.grid_coordinate_to_index(neighbour)
            .ok_or(CellLinkError::InvalidGridCoordinate)?;

        self.cells[a_index].remove_wall(dir);
        self.cells[b_index].remove_wall(dir.opposite());
        Ok(neighbour)
    }

    /// Link two adjacent cells by carving the wall pair between them.
    pub fn link(&mut self,
                a: Cartesian2DCoordinate,
                b: Cartesian2DCoordinate)
                -> Result<(), CellLinkError> {
        if a == b {
            return Err(CellLinkError::SelfLink);
        }
        if !self.is_valid_coordinate(a) || !self.is_valid_coordinate(b) {
            return Err(CellLinkError::InvalidGridCoordinate);
        }
        let dir = a.direction_to(b).ok_or(CellLinkError::NotAdjacent)?;
        self.carve(a, dir).map(|_| ())
    }

    /// Are two cells joined by an open passage?
    pub fn is_linked(&self, a: Cartesian2DCoordinate, b: Cartesian2DCoordinate) -> bool {
        match a.direction_to(b) {
            Some(dir) if self.is_valid_coordinate(b) => {
                self.cell(a).map_or(false, |cell| !cell.has_wall(dir))
            }
            _ => false,
        }
    }

    pub fn is_neighbour_linked(&self, coord: Cartesian2DCoordinate, direction: CompassPrimary) -> bool {
        self.neighbour_at_direction(coord, direction)
            .map_or(false, |neighbour_coord| self.is_linked(coord, neighbour_coord))
    }

    /// Cells linked to `coord` by a passage. None if `coord` is not on the grid.
    pub fn links(&self, coord: Cartesian2DCoordinate) -> Option<CoordinateSmallVec> {
        let cell = self.cell(coord)?;
        Some(CompassPrimary::ALL
            .iter()
            .filter(|dir| !cell.has_wall(**dir))
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect())
    }

    /// Cells to the North, South, East or West of `coord`, linked or not.
    pub fn neighbours(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        CompassPrimary::ALL
            .iter()
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect()
    }

    pub fn neighbours_at_directions(&self,
                                    coord: Cartesian2DCoordinate,
                                    dirs: &[CompassPrimary])
                                    -> CoordinateOptionSmallVec {
        dirs.iter()
            .map(|direction| self.neighbour_at_direction(coord, *direction))
            .collect()
    }

    pub fn neighbour_at_direction(&self,
                                  coord: Cartesian2DCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<Cartesian2DCoordinate> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        coord.offset(direction).filter(|neighbour| self.is_valid_coordinate(*neighbour))
    }

    /// Is the grid coordinate within the grid's dimensions?
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        (coord.x as usize) < self.width.0 && (coord.y as usize) < self.height.0
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.width.0 + coord.x as usize)
        } else {
            None
        }
    }

    /// Number of open passages between adjacent cells.
    pub fn passages_count(&self) -> usize {
        self.iter_links().count()
    }

    pub fn iter(&self) -> CellIter {
        CellIter {
            current_cell_number: 0,
            row_length: self.width.0,
            cells_count: self.size(),
        }
    }

    /// Rows from south (`y == 0`) to north.
    pub fn iter_row(&self) -> impl Iterator<Item = Vec<Cartesian2DCoordinate>> {
        let width = self.width.0 as u32;
        (0..self.height.0 as u32)
            .map(move |y| (0..width).map(|x| Cartesian2DCoordinate::new(x, y)).collect())
    }

    /// Every open passage once, as (cell, north or east neighbour) pairs.
    pub fn iter_links(&self) -> impl Iterator<Item = (Cartesian2DCoordinate, Cartesian2DCoordinate)> + '_ {
        self.iter().flat_map(move |coord| {
            [CompassPrimary::North, CompassPrimary::East]
                .iter()
                .filter(|dir| self.is_neighbour_linked(coord, **dir))
                .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
                .map(|neighbour| (coord, neighbour))
                .collect::<LinkPairSmallVec>()
        })
    }

    /// The open passages as an undirected graph with one node per cell in row major order.
    pub fn passage_graph(&self) -> UnGraph<Cartesian2DCoordinate, ()> {
        let (NodesCount(nodes), EdgesCount(edges)) = self.graph_size();
        let mut graph = UnGraph::with_capacity(nodes, edges);
        for coord in self.iter() {
            let _ = graph.add_node(coord);
        }
        for (a, b) in self.iter_links() {
            if let (Some(a_index), Some(b_index)) = (self.grid_coordinate_to_index(a),
                                                     self.grid_coordinate_to_index(b)) {
                let _ = graph.add_edge(NodeIndex::new(a_index), NodeIndex::new(b_index), ());
            }
        }
        graph
    }
}

type LinkPairSmallVec = smallvec::SmallVec<[(Cartesian2DCoordinate, Cartesian2DCoordinate); 2]>;

#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    current_cell_number: usize,
    row_length: usize,
    cells_count: usize,
}

impl Iterator for CellIter {
    type Item = Cartesian2DCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = Cartesian2DCoordinate::from_row_major_index(self.current_cell_number,
                                                                   self.row_length);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        (lower_bound, Some(lower_bound))
    }
}
impl ExactSizeIterator for CellIter {} // default impl using size_hint()

impl<'a> IntoIterator for &'a MazeGrid {
    type Item = Cartesian2DCoordinate;
    type IntoIter = CellIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
