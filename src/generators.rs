use bit_set::BitSet;
use log::{debug, info, trace};
use rand::Rng;
use rand::seq::SliceRandom;
use smallvec::SmallVec;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary, CoordinateSmallVec};
use crate::config::MazeConfig;
use crate::errors::*;
use crate::grid::MazeGrid;
use crate::placements::{build_geometry, Placement};


/// A carved maze and the geometry realising it.
#[derive(Debug, Clone)]
pub struct MazeResult {
    pub grid: MazeGrid,
    pub placements: Vec<Placement>,
}

/// Validate the configuration, carve a centre-cleared maze and build its placements.
///
/// This is the whole lifecycle of a maze level: one call, run to completion, no state kept
/// between calls. Separate calls with separate random sources can run in parallel.
pub fn generate_maze<R: Rng + ?Sized>(config: &MazeConfig, rng: &mut R) -> Result<MazeResult> {
    let settings = config.validate()?;
    debug!("Generating {}x{} maze (requested {}x{}, seed {:?})",
           settings.width.0, settings.height.0, config.width, config.height, config.seed);

    let mut grid = MazeGrid::new(settings.width, settings.height);
    let mut visited = BitSet::with_capacity(grid.size());

    let clear_zone = clear_centre(&mut grid, &mut visited);
    recursive_backtracker(&mut grid, &mut visited, &clear_zone, rng);

    let placements = build_geometry(&grid, &settings.build);
    info!("Generated {}x{} maze with {} passages and {} placements",
          settings.width.0, settings.height.0, grid.passages_count(), placements.len());

    Ok(MazeResult { grid, placements })
}

/// Open a cross shaped clear zone at the centre of the grid: the centre cell is joined to each
/// of its in-bounds neighbours and all of them are marked visited.
///
/// Returns the neighbouring arms of the cross, with the east arm (when it exists) last.
pub fn clear_centre(grid: &mut MazeGrid, visited: &mut BitSet) -> CoordinateSmallVec {
    let centre = grid.centre();
    mark_visited(grid, visited, centre);

    let mut arms = CoordinateSmallVec::new();
    for dir in [CompassPrimary::West, CompassPrimary::North, CompassPrimary::South, CompassPrimary::East].iter() {
        if let Ok(arm) = grid.carve(centre, *dir) {
            mark_visited(grid, visited, arm);
            arms.push(arm);
        }
    }
    arms
}

/// Randomised depth first search ("recursive backtracker") carving from the given entry cells.
///
/// The entries seed the frontier stack, so the last entry is where carving starts. Cells
/// already in `visited` are never carved into, which keeps any pre-cleared zone intact.
/// Once the stack empties every cell reachable from the entries has been visited and the
/// carved passages form a tree over them.
pub fn recursive_backtracker<R: Rng + ?Sized>(grid: &mut MazeGrid,
                                              visited: &mut BitSet,
                                              entries: &[Cartesian2DCoordinate],
                                              rng: &mut R) {
    let mut stack: Vec<Cartesian2DCoordinate> = Vec::with_capacity(grid.size());
    for entry in entries {
        if grid.is_valid_coordinate(*entry) {
            mark_visited(grid, visited, *entry);
            stack.push(*entry);
        }
    }

    let mut backtracks = 0usize;
    while let Some(&current) = stack.last() {

        let unvisited = unvisited_neighbours(grid, visited, current);
        if let Some(&(dir, next)) = unvisited.choose(rng) {
            // Unvisited neighbours are in bounds, so the wall between is never a boundary wall.
            let carved = grid.carve(current, dir);
            debug_assert!(carved == Ok(next), "failed to carve {:?} from {:?}", dir, current);
            mark_visited(grid, visited, next);
            stack.push(next);
        } else {
            let _ = stack.pop();
            backtracks += 1;
        }
    }
    trace!("Recursive backtracker finished after {} backtracks", backtracks);
}

type DirectionalNeighbours = SmallVec<[(CompassPrimary, Cartesian2DCoordinate); 4]>;

/// Adjacent cells not yet in the maze, in North, South, East, West order.
fn unvisited_neighbours(grid: &MazeGrid,
                        visited: &BitSet,
                        coord: Cartesian2DCoordinate)
                        -> DirectionalNeighbours {
    CompassPrimary::ALL
        .iter()
        .filter_map(|dir| grid.neighbour_at_direction(coord, *dir).map(|n| (*dir, n)))
        .filter(|&(_, neighbour)| !is_visited(grid, visited, neighbour))
        .collect()
}

fn mark_visited(grid: &MazeGrid, visited: &mut BitSet, coord: Cartesian2DCoordinate) {
    if let Some(index) = grid.grid_coordinate_to_index(coord) {
        let _ = visited.insert(index);
    }
}

fn is_visited(grid: &MazeGrid, visited: &BitSet, coord: Cartesian2DCoordinate) -> bool {
    grid.grid_coordinate_to_index(coord).map_or(true, |index| visited.contains(index))
}
