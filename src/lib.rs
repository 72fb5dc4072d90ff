//! **mazes** generates perfect mazes with an open cross at their centre and realises them as
//! floor, wall, ceiling, goal and spawn placements for a renderer or physics world.
//!
//! ```no_run
//! use mazes::{config::MazeConfig, generators};
//! use rand::SeedableRng;
//! use rand_xorshift::XorShiftRng;
//!
//! let config = MazeConfig { width: 11, height: 11, ..MazeConfig::default() };
//! let maze = generators::generate_maze(&config, &mut XorShiftRng::seed_from_u64(7)).unwrap();
//! println!("{}", maze.grid);
//! ```

pub mod cells;
pub mod config;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod grid_traits;
pub mod pathing;
pub mod placements;
pub mod units;
mod utils;
