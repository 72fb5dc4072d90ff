// Flood fill distances over the open passages of a maze.
//
// A perfect maze is a tree, so every step is one further from the start and the first
// distance written for a cell is already the shortest one. The distances map doubles as
// the visited set.

use itertools::Itertools;
use smallvec::SmallVec;

use crate::cells::Cartesian2DCoordinate;
use crate::grid::MazeGrid;
use crate::utils;
use crate::utils::FnvHashMap;


#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: Cartesian2DCoordinate,
    distances: FnvHashMap<Cartesian2DCoordinate, u32>,
    max_distance: u32,
}

impl Distances {
    /// Breadth first distances from `start_coordinate` to every cell reachable from it.
    /// None if the start is not on the grid.
    pub fn new(grid: &MazeGrid, start_coordinate: Cartesian2DCoordinate) -> Option<Distances> {

        if !grid.is_valid_coordinate(start_coordinate) {
            return None;
        }

        let mut max = 0;
        let mut distances = utils::fnv_hashmap(grid.size());
        distances.insert(start_coordinate, 0);

        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {

                let distance_to_cell = distances[cell_coord];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                let links = grid.links(*cell_coord)?;
                for link_coordinate in links.iter() {
                    if !distances.contains_key(link_coordinate) {
                        distances.insert(*link_coordinate, distance_to_cell + 1);
                        new_frontier.push(*link_coordinate);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> Cartesian2DCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    /// How many cells the flood fill reached, the start included.
    #[inline]
    pub fn reached_count(&self) -> usize {
        self.distances.len()
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: Cartesian2DCoordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    /// The cells at the maximum distance, in row major order.
    pub fn furthest_points_on_grid(&self) -> SmallVec<[Cartesian2DCoordinate; 8]> {
        let furthest_distance = self.max();
        self.distances
            .iter()
            .filter(|&(_, distance)| *distance == furthest_distance)
            .map(|(coord, _)| *coord)
            .sorted_by_key(|coord| (coord.y, coord.x))
            .collect()
    }
}

/// Walk downhill from `end_point` back to the start of `distances_from_start`.
/// None if the end point cannot be reached from the start.
pub fn shortest_path(grid: &MazeGrid,
                     distances_from_start: &Distances,
                     end_point: Cartesian2DCoordinate)
                     -> Option<Vec<Cartesian2DCoordinate>> {

    distances_from_start.distance_from_start_to(end_point)?;

    let mut path = vec![end_point];
    let start = distances_from_start.start();
    let mut current_coord = end_point;

    while current_coord != start {

        let current_distance_to_start = distances_from_start.distance_from_start_to(current_coord)?;

        let closest_to_start = grid.links(current_coord)?
            .iter()
            .filter_map(|coord| {
                distances_from_start.distance_from_start_to(*coord).map(|d| (*coord, d))
            })
            .min_by_key(|&(_, distance)| distance);

        match closest_to_start {
            Some((closer_coord, closer_distance)) if closer_distance < current_distance_to_start => {
                current_coord = closer_coord;
                path.push(current_coord);
            }
            // No linked neighbour is any closer, the distances belong to some other grid.
            _ => return None,
        }
    }

    path.reverse();
    Some(path)
}

/// The longest path in a perfect maze: the furthest cell from an arbitrary start is one end,
/// the furthest cell from that is the other.
pub fn longest_path(grid: &MazeGrid) -> Option<Vec<Cartesian2DCoordinate>> {
    let arbitrary_start_point = grid.iter().next()?;
    let first_distances = Distances::new(grid, arbitrary_start_point)?;

    let long_path_start_coordinate = *first_distances.furthest_points_on_grid().first()?;

    let distances_from_start = Distances::new(grid, long_path_start_coordinate)?;
    let end_point = *distances_from_start.furthest_points_on_grid().first()?;

    shortest_path(grid, &distances_from_start, end_point)
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::cells::CompassPrimary;
    use crate::units::{Height, Width};

    static OUT_OF_GRID_COORDINATE: Cartesian2DCoordinate = Cartesian2DCoordinate {
        x: u32::MAX,
        y: u32::MAX,
    };

    fn gc(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    fn open_square() -> MazeGrid {
        let mut g = MazeGrid::new(Width(2), Height(2));
        g.link(gc(0, 0), gc(1, 0)).expect("Link Failed");
        g.link(gc(0, 0), gc(0, 1)).expect("Link Failed");
        g.link(gc(1, 0), gc(1, 1)).expect("Link Failed");
        g.link(gc(0, 1), gc(1, 1)).expect("Link Failed");
        g
    }

    // One winding corridor: east along the bottom row, back west along the top.
    fn corridor() -> MazeGrid {
        let mut g = MazeGrid::new(Width(3), Height(2));
        g.link(gc(0, 0), gc(1, 0)).unwrap();
        g.link(gc(1, 0), gc(2, 0)).unwrap();
        g.link(gc(2, 0), gc(2, 1)).unwrap();
        g.link(gc(2, 1), gc(1, 1)).unwrap();
        g.link(gc(1, 1), gc(0, 1)).unwrap();
        g
    }

    #[test]
    fn distances_construction_requires_valid_start_coordinate() {
        let g = MazeGrid::new(Width(3), Height(3));
        assert!(Distances::new(&g, OUT_OF_GRID_COORDINATE).is_none());
    }

    #[test]
    fn distances_to_unreachable_cells_is_none() {
        let g = MazeGrid::new(Width(3), Height(3));
        let start_coordinate = gc(0, 0);
        let distances = Distances::new(&g, start_coordinate).unwrap();
        assert_eq!(distances.start(), start_coordinate);
        assert_eq!(distances.reached_count(), 1);
        for coord in g.iter() {
            let d = distances.distance_from_start_to(coord);
            if coord != start_coordinate {
                assert!(d.is_none());
            } else {
                assert_eq!(d, Some(0));
            }
        }
        assert_eq!(distances.distance_from_start_to(OUT_OF_GRID_COORDINATE), None);
    }

    #[test]
    fn distances_on_open_grid() {
        let g = open_square();
        let distances = Distances::new(&g, gc(0, 0)).unwrap();

        assert_eq!(distances.distance_from_start_to(gc(0, 0)), Some(0));
        assert_eq!(distances.distance_from_start_to(gc(1, 0)), Some(1));
        assert_eq!(distances.distance_from_start_to(gc(0, 1)), Some(1));
        assert_eq!(distances.distance_from_start_to(gc(1, 1)), Some(2));
        assert_eq!(distances.max(), 2);
        assert_eq!(&*distances.furthest_points_on_grid(), &[gc(1, 1)]);
    }

    #[test]
    fn path_along_corridor() {
        let g = corridor();
        let distances = Distances::new(&g, gc(0, 0)).unwrap();
        assert_eq!(distances.max(), 5);

        let path = shortest_path(&g, &distances, gc(0, 1)).expect("reachable");
        assert_eq!(path, vec![gc(0, 0), gc(1, 0), gc(2, 0), gc(2, 1), gc(1, 1), gc(0, 1)]);

        let to_self = shortest_path(&g, &distances, gc(0, 0)).unwrap();
        assert_eq!(to_self, vec![gc(0, 0)]);
    }

    #[test]
    fn no_path_to_walled_off_cell() {
        let mut g = MazeGrid::new(Width(3), Height(1));
        g.carve(gc(0, 0), CompassPrimary::East).unwrap();
        let distances = Distances::new(&g, gc(0, 0)).unwrap();
        assert_eq!(shortest_path(&g, &distances, gc(2, 0)), None);
    }

    #[test]
    fn longest_path_spans_the_corridor() {
        let g = corridor();
        let path = longest_path(&g).expect("path exists");
        assert_eq!(path.len(), 6);
        let ends = (path[0], path[5]);
        assert!(ends == (gc(0, 0), gc(0, 1)) || ends == (gc(0, 1), gc(0, 0)));
    }

    #[test]
    fn longest_path_of_single_cell() {
        let g = MazeGrid::new(Width(1), Height(1));
        assert_eq!(longest_path(&g), Some(vec![gc(0, 0)]));
    }
}
