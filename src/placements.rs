//! Realising a carved maze grid as world geometry.
//!
//! The library never instantiates anything itself. It produces placement records that an
//! external renderer or physics world turns into real objects through a `WorldBuilder`.

use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3};
use log::debug;
use serde_derive::{Deserialize, Serialize};

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::grid::MazeGrid;

/// Fraction of a cell the goal marker covers.
const GOAL_CELL_FRACTION: f32 = 0.8;

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash, Serialize, Deserialize)]
pub enum PlacementKind {
    Floor,
    Wall,
    Ceiling,
    Goal,
    Spawn,
}

#[derive(PartialEq, Copy, Clone, Debug, Serialize, Deserialize)]
pub struct Placement {
    pub kind: PlacementKind,
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub visible: bool,
    /// Material opacity, 1 unless the configuration asks otherwise.
    pub opacity: f32,
}

impl Placement {
    fn new(kind: PlacementKind, position: Vec3, rotation: Quat, scale: Vec3) -> Placement {
        Placement {
            kind,
            position,
            rotation,
            scale,
            visible: true,
            opacity: 1.0,
        }
    }
}

#[derive(PartialEq, Copy, Clone, Debug)]
pub struct BuildOptions {
    pub cell_size: f32,
    pub wall_height: f32,
    pub wall_thickness: f32,
    pub floor_thickness: f32,
    pub add_ceiling: bool,
    pub ceiling_visible: bool,
    pub ceiling_transparency: f32,
    pub goal_height: f32,
    pub place_goal: bool,
    pub place_spawn: bool,
    pub spawn_height: f32,
    pub centre_on_origin: bool,
    pub merge_shared_walls: bool,
}

impl Default for BuildOptions {
    fn default() -> BuildOptions {
        BuildOptions {
            cell_size: 1.0,
            wall_height: 1.0,
            wall_thickness: 0.1,
            floor_thickness: 0.25,
            add_ceiling: false,
            ceiling_visible: false,
            ceiling_transparency: 0.0,
            goal_height: 0.1,
            place_goal: true,
            place_spawn: true,
            spawn_height: 0.5,
            centre_on_origin: false,
            merge_shared_walls: false,
        }
    }
}

/// The rendering/physics collaborator that turns placement records into world objects.
pub trait WorldBuilder {
    fn place(&mut self, placement: &Placement);
}

impl WorldBuilder for Vec<Placement> {
    fn place(&mut self, placement: &Placement) {
        self.push(*placement);
    }
}

/// Hand every placement to the world builder, in order.
pub fn realise<W: WorldBuilder + ?Sized>(placements: &[Placement], builder: &mut W) {
    for placement in placements {
        builder.place(placement);
    }
}

/// Floor, ceiling and wall placements for every cell, followed by the goal marker and the
/// spawn point at the centre cell.
pub fn build_geometry(grid: &MazeGrid, options: &BuildOptions) -> Vec<Placement> {
    let cs = options.cell_size;
    let mut placements = Vec::with_capacity(grid.size() * 4 + 2);

    for coord in grid.iter() {
        let centre = cell_centre(coord, cs);

        placements.push(Placement::new(PlacementKind::Floor,
                                       centre,
                                       Quat::IDENTITY,
                                       Vec3::new(cs, options.floor_thickness, cs)));

        if options.add_ceiling {
            let mut ceiling = Placement::new(PlacementKind::Ceiling,
                                             Vec3::new(centre.x, options.wall_height, centre.z),
                                             Quat::IDENTITY,
                                             Vec3::new(cs, options.floor_thickness, cs));
            ceiling.visible = options.ceiling_visible;
            ceiling.opacity = options.ceiling_transparency;
            placements.push(ceiling);
        }

        for dir in CompassPrimary::ALL.iter().cloned() {
            if !grid.has_wall(coord, dir) {
                continue;
            }
            // A shared wall belongs to the cell on its south or west side.
            let shared = grid.neighbour_at_direction(coord, dir).is_some();
            let owned = dir == CompassPrimary::North || dir == CompassPrimary::East;
            if options.merge_shared_walls && shared && !owned {
                continue;
            }
            placements.push(wall_placement(centre, dir, options));
        }
    }

    let centre = cell_centre(grid.centre(), cs);
    let floor_top = options.floor_thickness / 2.0;

    if options.place_goal {
        let goal_scale = cs * GOAL_CELL_FRACTION;
        placements.push(Placement::new(PlacementKind::Goal,
                                       Vec3::new(centre.x, floor_top + options.goal_height, centre.z),
                                       Quat::IDENTITY,
                                       Vec3::new(goal_scale, options.goal_height, goal_scale)));
    }

    if options.place_spawn {
        placements.push(Placement::new(PlacementKind::Spawn,
                                       Vec3::new(centre.x, floor_top + options.spawn_height, centre.z),
                                       Quat::IDENTITY,
                                       Vec3::ONE));
    }

    if options.centre_on_origin {
        let offset = Vec3::new(-(grid.width().0 as f32) * cs / 2.0,
                               0.0,
                               -(grid.height().0 as f32) * cs / 2.0);
        for placement in &mut placements {
            placement.position += offset;
        }
    }

    debug!("Built {} placements for a {}x{} maze",
           placements.len(), grid.width().0, grid.height().0);
    placements
}

fn cell_centre(coord: Cartesian2DCoordinate, cell_size: f32) -> Vec3 {
    Vec3::new(coord.x as f32 * cell_size, 0.0, coord.y as f32 * cell_size)
}

fn wall_placement(cell_centre: Vec3, dir: CompassPrimary, options: &BuildOptions) -> Placement {
    let half = options.cell_size / 2.0;
    let offset = match dir {
        CompassPrimary::North => Vec3::new(0.0, 0.0, half),
        CompassPrimary::South => Vec3::new(0.0, 0.0, -half),
        CompassPrimary::East => Vec3::new(half, 0.0, 0.0),
        CompassPrimary::West => Vec3::new(-half, 0.0, 0.0),
    };
    let rotation = if dir.is_east_west() {
        Quat::from_rotation_y(FRAC_PI_2)
    } else {
        Quat::IDENTITY
    };
    Placement::new(PlacementKind::Wall,
                   cell_centre + offset,
                   rotation,
                   Vec3::new(options.cell_size, options.wall_height, options.wall_thickness))
}
