use bit_set::BitSet;
use criterion::{criterion_group, criterion_main, Criterion};
use mazes::{
    config::MazeConfig,
    generators,
    grid::MazeGrid,
    pathing,
    placements::{build_geometry, BuildOptions},
    units::{Height, Width},
};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

fn config(width: i64, height: i64) -> MazeConfig {
    MazeConfig { width, height, seed: Some(1), ..MazeConfig::default() }
}

fn bench_generate_maze_11(c: &mut Criterion) {
    let config = config(11, 11);
    let mut rng = XorShiftRng::seed_from_u64(1);
    c.bench_function("generate_maze_11", move |b| {
        b.iter(|| generators::generate_maze(&config, &mut rng))
    });
}

fn bench_generate_maze_31(c: &mut Criterion) {
    let config = config(31, 31);
    let mut rng = XorShiftRng::seed_from_u64(1);
    c.bench_function("generate_maze_31", move |b| {
        b.iter(|| generators::generate_maze(&config, &mut rng))
    });
}

fn bench_recursive_backtracker_101(c: &mut Criterion) {
    let mut rng = XorShiftRng::seed_from_u64(1);
    c.bench_function("recursive_backtracker_101", move |b| {
        b.iter(|| {
            let mut g = MazeGrid::new(Width(101), Height(101));
            let mut visited = BitSet::with_capacity(g.size());
            let arms = generators::clear_centre(&mut g, &mut visited);
            generators::recursive_backtracker(&mut g, &mut visited, &arms, &mut rng);
            g
        })
    });
}

fn bench_build_geometry_31(c: &mut Criterion) {
    let maze = generators::generate_maze(&config(31, 31), &mut XorShiftRng::seed_from_u64(1))
        .expect("valid bench config");
    let options = BuildOptions { add_ceiling: true, ..BuildOptions::default() };
    c.bench_function("build_geometry_31", move |b| {
        b.iter(|| build_geometry(&maze.grid, &options))
    });
}

fn bench_longest_path_31(c: &mut Criterion) {
    let maze = generators::generate_maze(&config(31, 31), &mut XorShiftRng::seed_from_u64(1))
        .expect("valid bench config");
    c.bench_function("longest_path_31", move |b| {
        b.iter(|| pathing::longest_path(&maze.grid))
    });
}

criterion_group!(benches,
                 bench_generate_maze_11,
                 bench_generate_maze_31,
                 bench_recursive_backtracker_101,
                 bench_build_geometry_31,
                 bench_longest_path_31);
criterion_main!(benches);
