//! Maze configuration as supplied from outside the library: JSON files or driver flags.
//!
//! Everything is checked here, before any grid is allocated, so the generators can
//! assume positive odd dimensions and sane measurements.

use std::convert::TryFrom;
use std::fs;
use std::mem;
use std::path::Path;

use log::debug;
use serde_derive::{Deserialize, Serialize};

use crate::cells::WallCell;
use crate::errors::*;
use crate::placements::BuildOptions;
use crate::units::{Height, Width};


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MazeConfig {
    pub width: i64,
    pub height: i64,
    /// World units between neighbouring cell centres.
    pub cell_size: f32,
    pub wall_height: f32,
    pub wall_thickness: f32,
    pub floor_thickness: f32,
    pub add_ceiling: bool,
    pub ceiling_visible: bool,
    /// 0 is fully transparent, 1 fully opaque.
    pub ceiling_transparency: f32,
    pub goal_height: f32,
    pub place_goal: bool,
    pub place_spawn: bool,
    /// Height of the spawn point above the floor surface.
    pub spawn_height: f32,
    pub centre_on_origin: bool,
    pub merge_shared_walls: bool,
    pub seed: Option<u64>,
}

impl Default for MazeConfig {
    fn default() -> MazeConfig {
        MazeConfig {
            width: 10,
            height: 10,
            cell_size: 1.0,
            wall_height: 1.0,
            wall_thickness: 0.1,
            floor_thickness: 0.25,
            add_ceiling: true,
            ceiling_visible: false,
            ceiling_transparency: 0.0,
            goal_height: 0.1,
            place_goal: true,
            place_spawn: true,
            spawn_height: 0.5,
            centre_on_origin: false,
            merge_shared_walls: false,
            seed: None,
        }
    }
}

/// A validated configuration: odd dimensions plus the geometry build options.
#[derive(Debug, Clone, PartialEq)]
pub struct MazeSettings {
    pub width: Width,
    pub height: Height,
    pub build: BuildOptions,
}

/// Round an even dimension up so the grid has a true centre cell.
pub fn odd_dimension(n: usize) -> usize {
    if n % 2 == 0 {
        n + 1
    } else {
        n
    }
}

impl MazeConfig {
    pub fn from_json_str(json: &str) -> Result<MazeConfig> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<MazeConfig> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .chain_err(|| format!("Failed to read maze config file {}", path.display()))?;
        let config = MazeConfig::from_json_str(&json)
            .chain_err(|| format!("Failed to parse maze config file {}", path.display()))?;
        debug!("Loaded maze config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn validate(&self) -> Result<MazeSettings> {
        let (width, height) = match (grid_dimension(self.width), grid_dimension(self.height)) {
            (Some(w), Some(h)) if fits_in_memory(w, h) => (w, h),
            _ => return Err(ErrorKind::InvalidDimensions(self.width, self.height).into()),
        };

        check_positive("cell_size", self.cell_size)?;
        check_positive("wall_height", self.wall_height)?;
        check_non_negative("wall_thickness", self.wall_thickness)?;
        check_non_negative("floor_thickness", self.floor_thickness)?;
        check_non_negative("goal_height", self.goal_height)?;
        check_non_negative("spawn_height", self.spawn_height)?;
        if !(0.0..=1.0).contains(&self.ceiling_transparency) {
            return Err(ErrorKind::InvalidMeasurement("ceiling_transparency",
                                                     self.ceiling_transparency).into());
        }

        Ok(MazeSettings {
            width: Width(width),
            height: Height(height),
            build: BuildOptions {
                cell_size: self.cell_size,
                wall_height: self.wall_height,
                wall_thickness: self.wall_thickness,
                floor_thickness: self.floor_thickness,
                add_ceiling: self.add_ceiling,
                ceiling_visible: self.ceiling_visible,
                ceiling_transparency: self.ceiling_transparency,
                goal_height: self.goal_height,
                place_goal: self.place_goal,
                place_spawn: self.place_spawn,
                spawn_height: self.spawn_height,
                centre_on_origin: self.centre_on_origin,
                merge_shared_walls: self.merge_shared_walls,
            },
        })
    }
}

/// Odd coerced grid dimension, None unless `1 <= n` and coordinates along it fit a `u32`.
fn grid_dimension(n: i64) -> Option<usize> {
    if n < 1 || n > i64::from(u32::MAX) {
        return None;
    }
    usize::try_from(n).ok().map(odd_dimension)
}

// The cell vector must stay addressable: no overflow counting cells or their bytes.
fn fits_in_memory(width: usize, height: usize) -> bool {
    width.checked_mul(height)
        .and_then(|cells| cells.checked_mul(mem::size_of::<WallCell>()))
        .map_or(false, |bytes| bytes <= isize::MAX as usize)
}

fn check_positive(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ErrorKind::InvalidMeasurement(name, value).into())
    }
}

fn check_non_negative(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ErrorKind::InvalidMeasurement(name, value).into())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    quickcheck! {
        fn odd_coercion_never_shrinks(n: usize) -> bool {
            let n = n % 10_000;
            let odd = odd_dimension(n);
            odd % 2 == 1 && odd >= n && odd - n <= 1
        }
    }

    #[test]
    fn even_dimensions_grow_by_one() {
        assert_eq!(odd_dimension(10), 11);
        assert_eq!(odd_dimension(11), 11);
        assert_eq!(odd_dimension(1), 1);

        let settings = MazeConfig { width: 4, height: 7, ..MazeConfig::default() }
            .validate()
            .expect("valid config");
        assert_eq!(settings.width, Width(5));
        assert_eq!(settings.height, Height(7));
    }

    #[test]
    fn non_positive_dimensions_rejected() {
        for &(w, h) in &[(0, 5), (5, 0), (-3, 5), (0, 0)] {
            let config = MazeConfig { width: w, height: h, ..MazeConfig::default() };
            match config.validate() {
                Err(Error(ErrorKind::InvalidDimensions(ew, eh), _)) => {
                    assert_eq!((ew, eh), (w, h));
                }
                other => panic!("expected invalid dimensions, got {:?}", other),
            }
        }
    }

    #[test]
    fn oversized_dimensions_rejected() {
        let too_wide = i64::from(u32::MAX) + 1;
        for &(w, h) in &[(i64::MAX, i64::MAX), (too_wide, 1), (1, too_wide),
                         (i64::from(u32::MAX), i64::from(u32::MAX))] {
            let config = MazeConfig { width: w, height: h, ..MazeConfig::default() };
            match config.validate() {
                Err(Error(ErrorKind::InvalidDimensions(ew, eh), _)) => {
                    assert_eq!((ew, eh), (w, h));
                }
                other => panic!("expected invalid dimensions, got {:?}", other),
            }
        }
    }

    #[test]
    fn widest_coordinate_range_accepted() {
        let config = MazeConfig { width: i64::from(u32::MAX) - 1, height: 1, ..MazeConfig::default() };
        let settings = config.validate().expect("u32 wide grid is addressable");
        assert_eq!(settings.width, Width(u32::MAX as usize));
        assert_eq!(settings.height, Height(1));
    }

    #[test]
    fn bad_measurements_rejected() {
        let bad = [MazeConfig { cell_size: 0.0, ..MazeConfig::default() },
                   MazeConfig { wall_height: -1.0, ..MazeConfig::default() },
                   MazeConfig { goal_height: ::std::f32::NAN, ..MazeConfig::default() },
                   MazeConfig { ceiling_transparency: 1.5, ..MazeConfig::default() }];
        for config in bad.iter() {
            match config.validate() {
                Err(Error(ErrorKind::InvalidMeasurement(..), _)) => {}
                other => panic!("expected invalid measurement, got {:?}", other),
            }
        }
    }

    #[test]
    fn json_fills_in_defaults() {
        let config = MazeConfig::from_json_str(r#"{ "width": 7, "cell_size": 2.0, "seed": 42 }"#)
            .expect("config parses");
        assert_eq!(config.width, 7);
        assert_eq!(config.height, 10);
        assert_eq!(config.cell_size, 2.0);
        assert_eq!(config.seed, Some(42));
        assert!(config.add_ceiling);
    }

    #[test]
    fn json_unknown_fields_rejected() {
        assert!(MazeConfig::from_json_str(r#"{ "widht": 7 }"#).is_err());
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let result = MazeConfig::from_json_file("/nonexistent/maze-config.json");
        assert!(result.is_err());
    }
}
