use std::fmt;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary, CoordinateSmallVec};
use crate::grid::MazeGrid;
use crate::grid_traits::GridDisplay;
use crate::pathing::Distances;
use crate::utils;
use crate::utils::FnvHashSet;

const WALL_L: &str = "╴";
const WALL_R: &str = "╶";
const WALL_U: &str = "╵";
const WALL_D: &str = "╷";
const WALL_LR_3: &str = "───";
const WALL_LR: &str = "─";
const WALL_UD: &str = "│";
const WALL_LD: &str = "┐";
const WALL_RU: &str = "└";
const WALL_LU: &str = "┘";
const WALL_RD: &str = "┌";
const WALL_LRU: &str = "┴";
const WALL_LRD: &str = "┬";
const WALL_LRUD: &str = "┼";
const WALL_RUD: &str = "├";
const WALL_LUD: &str = "┤";
const EMPTY_CELL_BODY: &str = "   ";


impl GridDisplay for Distances {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> String {
        if let Some(d) = self.distance_from_start_to(coord) {
            // centre align, padding 3, lowercase hexadecimal
            format!("{:^3x}", d)
        } else {
            String::from(EMPTY_CELL_BODY)
        }
    }
}

#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<Cartesian2DCoordinate>,
}
impl PathDisplay {
    pub fn new(path: &[Cartesian2DCoordinate]) -> Self {
        let mut on_path_coordinates = utils::fnv_hashset(path.len());
        on_path_coordinates.extend(path.iter().cloned());
        PathDisplay { on_path_coordinates }
    }
}
impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> String {
        if self.on_path_coordinates.contains(&coord) {
            String::from(" . ")
        } else {
            String::from(EMPTY_CELL_BODY)
        }
    }
}

#[derive(Debug)]
pub struct StartEndPointsDisplay {
    start_coordinates: CoordinateSmallVec,
    end_coordinates: CoordinateSmallVec,
}
impl StartEndPointsDisplay {
    pub fn new(starts: CoordinateSmallVec, ends: CoordinateSmallVec) -> StartEndPointsDisplay {
        StartEndPointsDisplay {
            start_coordinates: starts,
            end_coordinates: ends,
        }
    }
}
impl GridDisplay for StartEndPointsDisplay {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> String {
        if self.start_coordinates.contains(&coord) {
            String::from(" S ")
        } else if self.end_coordinates.contains(&coord) {
            String::from(" E ")
        } else {
            String::from(EMPTY_CELL_BODY)
        }
    }
}

/// Box drawing rendering of a maze, north at the top, with optional cell contents.
pub struct MazeTextRenderer<'a> {
    grid: &'a MazeGrid,
    display: Option<&'a dyn GridDisplay>,
}

impl<'a> MazeTextRenderer<'a> {
    pub fn new(grid: &'a MazeGrid, display: Option<&'a dyn GridDisplay>) -> MazeTextRenderer<'a> {
        MazeTextRenderer { grid, display }
    }

    fn columns(&self) -> usize {
        self.grid.width().0
    }

    fn rows(&self) -> usize {
        self.grid.height().0
    }

    // Display rows run north to south, grid rows south to north.
    fn cell_at(&self, column: usize, display_row: usize) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(column as u32, (self.rows() - 1 - display_row) as u32)
    }

    /// Horizontal wall segment above display row `line` (`line == rows` is the bottom edge).
    fn horizontal_wall(&self, line: usize, column: usize) -> bool {
        if line == self.rows() {
            self.grid.has_wall(self.cell_at(column, line - 1), CompassPrimary::South)
        } else {
            self.grid.has_wall(self.cell_at(column, line), CompassPrimary::North)
        }
    }

    /// Vertical wall segment left of `column` (`column == columns` is the east edge).
    fn vertical_wall(&self, display_row: usize, column: usize) -> bool {
        if column == self.columns() {
            self.grid.has_wall(self.cell_at(column - 1, display_row), CompassPrimary::East)
        } else {
            self.grid.has_wall(self.cell_at(column, display_row), CompassPrimary::West)
        }
    }

    fn junction(&self, line: usize, column: usize) -> &'static str {
        let left = column > 0 && self.horizontal_wall(line, column - 1);
        let right = column < self.columns() && self.horizontal_wall(line, column);
        let up = line > 0 && self.vertical_wall(line - 1, column);
        let down = line < self.rows() && self.vertical_wall(line, column);

        match (left, right, up, down) {
            (true, true, true, true) => WALL_LRUD,
            (true, true, true, false) => WALL_LRU,
            (true, true, false, true) => WALL_LRD,
            (true, false, true, true) => WALL_LUD,
            (false, true, true, true) => WALL_RUD,
            (true, true, false, false) => WALL_LR,
            (false, false, true, true) => WALL_UD,
            (false, true, true, false) => WALL_RU,
            (true, false, false, true) => WALL_LD,
            (true, false, true, false) => WALL_LU,
            (false, true, false, true) => WALL_RD,
            (true, false, false, false) => WALL_L,
            (false, true, false, false) => WALL_R,
            (false, false, true, false) => WALL_U,
            (false, false, false, true) => WALL_D,
            (false, false, false, false) => " ",
        }
    }
}

impl<'a> fmt::Display for MazeTextRenderer<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (columns, rows) = (self.columns(), self.rows());
        let mut output = String::new();

        for line in 0..=rows {
            for column in 0..=columns {
                output.push_str(self.junction(line, column));
                if column < columns {
                    let segment = if self.horizontal_wall(line, column) { WALL_LR_3 } else { EMPTY_CELL_BODY };
                    output.push_str(segment);
                }
            }
            output.push('\n');

            if line < rows {
                for column in 0..=columns {
                    output.push_str(if self.vertical_wall(line, column) { WALL_UD } else { " " });
                    if column < columns {
                        let coord = self.cell_at(column, line);
                        match self.display {
                            Some(displayer) => output.push_str(&displayer.render_cell_body(coord)),
                            None => output.push_str(EMPTY_CELL_BODY),
                        }
                    }
                }
                output.push('\n');
            }
        }

        write!(f, "{}", output)
    }
}

impl fmt::Display for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", MazeTextRenderer::new(self, None))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{Height, Width};

    fn gc(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    #[test]
    fn single_cell() {
        let g = MazeGrid::new(Width(1), Height(1));
        assert_eq!(format!("{}", g), "┌───┐\n│   │\n└───┘\n");
    }

    #[test]
    fn closed_and_open_pairs() {
        let mut g = MazeGrid::new(Width(2), Height(1));
        assert_eq!(format!("{}", g), "┌───┬───┐\n│   │   │\n└───┴───┘\n");

        g.link(gc(0, 0), gc(1, 0)).unwrap();
        assert_eq!(format!("{}", g), "┌───────┐\n│       │\n└───────┘\n");
    }

    #[test]
    fn north_is_drawn_at_the_top() {
        let mut g = MazeGrid::new(Width(1), Height(2));
        g.link(gc(0, 0), gc(0, 1)).unwrap();
        let display = StartEndPointsDisplay::new([gc(0, 0)].iter().cloned().collect(),
                                                 [gc(0, 1)].iter().cloned().collect());
        let text = format!("{}", MazeTextRenderer::new(&g, Some(&display as &dyn GridDisplay)));
        assert_eq!(text, "┌───┐\n│ E │\n│   │\n│ S │\n└───┘\n");
    }

    #[test]
    fn path_and_distance_overlays() {
        let mut g = MazeGrid::new(Width(3), Height(1));
        g.link(gc(0, 0), gc(1, 0)).unwrap();
        g.link(gc(1, 0), gc(2, 0)).unwrap();

        let path = PathDisplay::new(&[gc(0, 0), gc(1, 0)]);
        let text = format!("{}", MazeTextRenderer::new(&g, Some(&path as &dyn GridDisplay)));
        assert_eq!(text.lines().nth(1), Some("│ .   .     │"));

        let distances = Distances::new(&g, gc(0, 0)).unwrap();
        let text = format!("{}", MazeTextRenderer::new(&g, Some(&distances as &dyn GridDisplay)));
        assert_eq!(text.lines().nth(1), Some("│ 0   1   2 │"));
    }

    #[test]
    fn interior_junctions() {
        let g = MazeGrid::new(Width(2), Height(2));
        assert_eq!(format!("{}", g),
                   "┌───┬───┐\n│   │   │\n├───┼───┤\n│   │   │\n└───┴───┘\n");
    }
}
