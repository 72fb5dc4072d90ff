use docopt::Docopt;
use log::{info, warn};
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use serde_derive::Deserialize;
use mazes::{
    config::MazeConfig,
    generators,
    grid::MazeGrid,
    grid_displays::{MazeTextRenderer, PathDisplay},
    grid_traits::GridDisplay,
    pathing,
};
use std::{
    fs::File,
    io,
    io::prelude::*,
};

const USAGE: &str = "Mazes

Usage:
    mazes_driver -h | --help
    mazes_driver [options]

Options:
    -h --help                Show this screen.
    --config=<path>          JSON maze configuration file. The flags below override its values.
    --width=<w>              Maze width in cells, rounded up to an odd number.
    --height=<h>             Maze height in cells, rounded up to an odd number.
    --cell-size=<c>          World units between neighbouring cell centres.
    --seed=<s>               Random seed. A random seed is chosen and logged when absent.
    --no-ceiling             Do not emit ceiling placements.
    --show-path              Mark the longest path through the maze in the text rendering.
    --show-distances         Show the distance from the centre cell to every cell in the text rendering.
    --text-out=<path>        Output file path for the text rendering instead of stdout.
    --placements-out=<path>  Output file path for the placement records as JSON.
    --save-edges=<path>      Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_config: Option<String>,
    flag_width: Option<i64>,
    flag_height: Option<i64>,
    flag_cell_size: Option<f32>,
    flag_seed: Option<u64>,
    flag_no_ceiling: bool,
    flag_show_path: bool,
    flag_show_distances: bool,
    flag_text_out: Option<String>,
    flag_placements_out: Option<String>,
    flag_save_edges: Option<String>,
}

// The driver's own error_chain, linking in the library errors.
mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::mazes::errors::Error, ::mazes::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
            Json(::serde_json::Error);
        }
    }
}
use crate::errors::*;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        match e.kind() {
            ErrorKind::DocOptFailure(docopt_error) => docopt_error.exit(),
            _ => {
                eprintln!("error: {}", e);
                for cause in e.iter().skip(1) {
                    eprintln!("caused by: {}", cause);
                }
                ::std::process::exit(1);
            }
        }
    }
}

fn run() -> Result<()> {

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let mut config = match args.flag_config {
        Some(ref path) => MazeConfig::from_json_file(path)?,
        None => MazeConfig::default(),
    };
    apply_overrides(&mut config, &args);

    let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
    config.seed = Some(seed);
    info!("Using maze seed {}", seed);

    let mut rng = XorShiftRng::seed_from_u64(seed);
    let maze = generators::generate_maze(&config, &mut rng)?;

    let text = render_text(&maze.grid, &args);
    match args.flag_text_out {
        Some(ref path) => {
            write_text_to_file(&text, path)
                .chain_err(|| format!("Failed to write maze to text file {}", path))?;
        }
        None => println!("{}", text),
    }

    if let Some(ref path) = args.flag_placements_out {
        let json = serde_json::to_string_pretty(&maze.placements)?;
        write_text_to_file(&json, path)
            .chain_err(|| format!("Failed to write placements to {}", path))?;
        info!("Wrote {} placements to {}", maze.placements.len(), path);
    }

    if let Some(ref path) = args.flag_save_edges {
        save_maze_graph(&maze.grid, path)?;
    }

    Ok(())
}

fn apply_overrides(config: &mut MazeConfig, args: &MazeArgs) {
    if let Some(width) = args.flag_width {
        config.width = width;
    }
    if let Some(height) = args.flag_height {
        config.height = height;
    }
    if let Some(cell_size) = args.flag_cell_size {
        config.cell_size = cell_size;
    }
    if let Some(seed) = args.flag_seed {
        config.seed = Some(seed);
    }
    if args.flag_no_ceiling {
        config.add_ceiling = false;
    }
}

/// Text rendering of the maze with whichever overlay the flags ask for.
/// Distances win over the path when both are requested.
fn render_text(grid: &MazeGrid, args: &MazeArgs) -> String {
    if args.flag_show_distances {
        if let Some(distances) = pathing::Distances::new(grid, grid.centre()) {
            return format!("{}", MazeTextRenderer::new(grid, Some(&distances as &dyn GridDisplay)));
        }
    } else if args.flag_show_path {
        match pathing::longest_path(grid) {
            Some(path) => {
                info!("Longest path is {} cells", path.len());
                let display_path = PathDisplay::new(&path);
                return format!("{}", MazeTextRenderer::new(grid, Some(&display_path as &dyn GridDisplay)));
            }
            // Somehow there is no route, maze generation failed to make a perfect maze
            None => warn!("No longest path found, rendering the bare maze"),
        }
    }
    format!("{}", grid)
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze_grid: &MazeGrid, file_path: &str) -> Result<()> {

    let mut graph_data = String::new();
    let vertices_count = maze_grid.size();
    let edges_count = maze_grid.passages_count();
    graph_data.push_str(&format!("{} {}\n", vertices_count, edges_count));

    for (src, dst) in maze_grid.iter_links() {
        if let (Some(index_a), Some(index_b)) = (maze_grid.grid_coordinate_to_index(src),
                                                 maze_grid.grid_coordinate_to_index(dst)) {
            graph_data.push_str(&format!("{} {}\n", index_a + 1, index_b + 1));
        }
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    Ok(())
}
