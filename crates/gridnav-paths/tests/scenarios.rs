use std::cmp::Reverse;
use std::collections::BinaryHeap;

use gridnav_core::{AllWalkable, Cell, NavGrid, Point, StoredWalkability, WorldPos, build_grid};
use gridnav_paths::{Path, PathError, Pathfinder, octile};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn assert_well_formed(path: &Path, start: Point, target: Point) {
    assert_eq!(path.start(), Some(start));
    assert_eq!(path.target(), Some(target));
    for w in path.cells().windows(2) {
        assert!(w[0].is_adjacent(w[1]), "{} -> {} is not a step", w[0], w[1]);
    }
    let sum: i32 = path.cells().windows(2).map(|w| octile(w[0], w[1])).sum();
    assert_eq!(sum, path.cost());
}

/// Plain Dijkstra over the same movement rules, used as a reference for
/// optimal cost.
fn reference_cost(grid: &NavGrid, start: Point, target: Point) -> Option<i32> {
    let mut dist = vec![i32::MAX; grid.len()];
    let mut heap = BinaryHeap::new();
    let si = grid.index(start)?;
    dist[si] = 0;
    heap.push(Reverse((0, si)));
    while let Some(Reverse((d, i))) = heap.pop() {
        if d > dist[i] {
            continue;
        }
        let p = grid.point(i);
        if p == target {
            return Some(d);
        }
        for n in grid.neighbors_of(p) {
            let ni = grid.index(n)?;
            if !grid.cells()[ni].is_walkable() {
                continue;
            }
            let nd = d + octile(p, n);
            if nd < dist[ni] {
                dist[ni] = nd;
                heap.push(Reverse((nd, ni)));
            }
        }
    }
    None
}

#[test]
fn open_grid_diagonal() {
    let grid = build_grid(5, 5, 1.0, WorldPos::ZERO).unwrap();
    let mut pf = Pathfinder::for_grid(&grid);
    let path = pf.find_path(Point::new(0, 0), Point::new(4, 4), &AllWalkable).unwrap();
    assert_eq!(path.cost(), 56);
    assert_eq!(path.len(), 5);
    for w in path.cells().windows(2) {
        assert!(w[1].x > w[0].x && w[1].y > w[0].y);
    }
    assert_well_formed(&path, Point::new(0, 0), Point::new(4, 4));
}

#[test]
fn open_grid_horizontal() {
    let grid = build_grid(5, 5, 1.0, WorldPos::ZERO).unwrap();
    let mut pf = Pathfinder::for_grid(&grid);
    let path = pf.find_path(Point::new(0, 0), Point::new(4, 0), &AllWalkable).unwrap();
    assert_eq!(path.cost(), 40);
    assert_eq!(path.len(), 5);
    assert!(path.iter().all(|p| p.y == 0));
}

#[test]
fn spanning_wall_blocks_route() {
    let grid = build_grid(5, 5, 1.0, WorldPos::ZERO).unwrap();
    let mut pf = Pathfinder::for_grid(&grid);
    let wall = |c: &Cell| c.iy() != 2;
    assert_eq!(
        pf.find_path(Point::new(2, 0), Point::new(2, 4), &wall),
        Err(PathError::NotFound)
    );
}

#[test]
fn enclosed_target_is_not_found() {
    let grid = build_grid(7, 7, 1.0, WorldPos::ZERO).unwrap();
    let mut pf = Pathfinder::for_grid(&grid);
    let target = Point::new(3, 3);
    let ring = move |c: &Cell| !c.pos().is_adjacent(target);
    assert_eq!(
        pf.find_path(Point::new(0, 0), target, &ring),
        Err(PathError::NotFound)
    );
}

#[test]
fn world_positions_round_trip_through_search() {
    let grid = build_grid(8, 6, 0.5, WorldPos::new(10.0, 20.0, 1.0)).unwrap();
    let mut pf = Pathfinder::for_grid(&grid);
    let from = grid.cell_center(Point::new(1, 1)).unwrap();
    let to = grid.cell_center(Point::new(6, 4)).unwrap();
    let path = pf.find_path_from_positions(from, to, &AllWalkable).unwrap();
    assert_well_formed(&path, Point::new(1, 1), Point::new(6, 4));
    let world = path.world_points(&grid);
    assert_eq!(world.first(), Some(&from));
    assert_eq!(world.last(), Some(&to));
}

#[test]
fn several_pathfinders_share_one_grid() {
    let grid = build_grid(10, 10, 1.0, WorldPos::ZERO).unwrap();
    let mut a = Pathfinder::for_grid(&grid);
    let mut b = Pathfinder::for_grid(&grid);
    let pa = a.find_path(Point::new(0, 0), Point::new(9, 9), &AllWalkable).unwrap();
    let pb = b.find_path(Point::new(9, 0), Point::new(0, 9), &AllWalkable).unwrap();
    assert_eq!(pa.cost(), 126);
    assert_eq!(pb.cost(), 126);
    assert_eq!(a.last_path(), Some(&pa));
    assert_eq!(b.last_path(), Some(&pb));
}

#[test]
fn random_grids_match_reference_cost() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..40 {
        let mut grid = build_grid(12, 10, 1.0, WorldPos::ZERO).unwrap();
        let blocked: Vec<Point> = grid
            .bounds()
            .iter()
            .filter(|_| rng.random_range(0..100) < 30)
            .collect();
        for p in blocked {
            grid.set_walkable(p, false);
        }
        let mut pf = Pathfinder::for_grid(&grid);
        for _ in 0..5 {
            let start = Point::new(rng.random_range(0..12), rng.random_range(0..10));
            let target = Point::new(rng.random_range(0..12), rng.random_range(0..10));
            let expected = if start == target {
                Some(0)
            } else {
                reference_cost(&grid, start, target)
            };
            match pf.find_path(start, target, &StoredWalkability) {
                Ok(path) => {
                    assert_eq!(Some(path.cost()), expected, "{start} -> {target}");
                    assert_well_formed(&path, start, target);
                    for p in &path.cells()[1..] {
                        assert!(grid.cell(*p).unwrap().is_walkable());
                    }
                }
                Err(err) => {
                    assert_eq!(err, PathError::NotFound);
                    assert_eq!(expected, None, "{start} -> {target}");
                }
            }
        }
    }
}
