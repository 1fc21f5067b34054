//! Box-geometry scene and the probe that classifies cells against it.
//!
//! A cell is walkable when ground is found within `ground_detection` below
//! its center and no obstacle intersects a cube of half-size `radius` whose
//! center sits `radius + max_allowed_height` above the cell. Geometry lower
//! than `max_allowed_height` (kerbs, rubble) and geometry entirely above the
//! cube (overhangs) therefore do not block.

use gridnav_core::{Cell, NavGrid, Traversability, WorldPos};

/// An axis-aligned box.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    pub min: WorldPos,
    pub max: WorldPos,
}

impl Aabb {
    /// Box spanning two corners, canonicalized so `min` ≤ `max` per axis.
    pub fn new(a: WorldPos, b: WorldPos) -> Self {
        Self {
            min: WorldPos::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: WorldPos::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Box of the given half extents around `center`.
    pub fn from_center(center: WorldPos, half: WorldPos) -> Self {
        Self::new(center - half, center + half)
    }

    /// Whether the interiors of the two boxes intersect. Boxes that only
    /// touch do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
            && self.min.z < other.max.z
            && other.min.z < self.max.z
    }

    /// Whether the vertical segment at `(x, y)` from `z_lo` to `z_hi`
    /// touches the box.
    pub fn hit_by_vertical(&self, x: f64, y: f64, z_lo: f64, z_hi: f64) -> bool {
        x >= self.min.x
            && x <= self.max.x
            && y >= self.min.y
            && y <= self.max.y
            && z_lo <= self.max.z
            && z_hi >= self.min.z
    }
}

/// Static geometry: walkable surfaces and blocking volumes.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scene {
    pub ground: Vec<Aabb>,
    pub obstacles: Vec<Aabb>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// A scene with one ground slab of the given thickness covering the
    /// grid's rectangle, its top flush with the grid plane.
    pub fn with_floor(grid: &NavGrid, thickness: f64) -> Self {
        let lo = grid.bottom_left();
        let hi = grid.top_right();
        Self {
            ground: vec![Aabb::new(
                WorldPos::new(lo.x, lo.y, lo.z - thickness),
                WorldPos::new(hi.x, hi.y, hi.z),
            )],
            obstacles: Vec::new(),
        }
    }

    pub fn add_ground(&mut self, b: Aabb) {
        self.ground.push(b);
    }

    pub fn add_obstacle(&mut self, b: Aabb) {
        self.obstacles.push(b);
    }
}

// ---------------------------------------------------------------------------
// Probe
// ---------------------------------------------------------------------------

/// Probe distances used by [`SceneProbe`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProbeConfig {
    /// Height below which geometry is not an obstacle.
    pub max_allowed_height: f64,
    /// How far below a cell center ground must be found.
    pub ground_detection: f64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            max_allowed_height: 25.0,
            ground_detection: 50.0,
        }
    }
}

/// Classifies cells of one grid against a [`Scene`].
#[derive(Clone, Debug)]
pub struct SceneProbe<'s> {
    scene: &'s Scene,
    radius: f64,
    config: ProbeConfig,
}

impl<'s> SceneProbe<'s> {
    /// A probe sized for `grid`'s cells.
    pub fn new(scene: &'s Scene, grid: &NavGrid, config: ProbeConfig) -> Self {
        Self {
            scene,
            radius: grid.radius(),
            config,
        }
    }

    /// Ground within `ground_detection` straight below `center`.
    pub fn has_ground(&self, center: WorldPos) -> bool {
        let z_lo = center.z - self.config.ground_detection;
        self.scene
            .ground
            .iter()
            .any(|g| g.hit_by_vertical(center.x, center.y, z_lo, center.z))
    }

    /// An obstacle intersects the clearance cube above `center`.
    pub fn is_obstructed(&self, center: WorldPos) -> bool {
        let lift = self.radius + self.config.max_allowed_height;
        let cube = Aabb::from_center(
            WorldPos::new(center.x, center.y, center.z + lift),
            WorldPos::new(self.radius, self.radius, self.radius),
        );
        self.scene.obstacles.iter().any(|o| o.overlaps(&cube))
    }
}

impl Traversability for SceneProbe<'_> {
    fn is_walkable(&self, cell: &Cell) -> bool {
        let c = cell.center();
        self.has_ground(c) && !self.is_obstructed(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridnav_core::{Point, build_grid};

    fn setup() -> (NavGrid, Scene) {
        // 4x4 cells of side 50 centered on the origin: x, y in [-100, 100].
        let grid = build_grid(4, 4, 25.0, WorldPos::ZERO).unwrap();
        let scene = Scene::with_floor(&grid, 10.0);
        (grid, scene)
    }

    #[test]
    fn aabb_overlap_excludes_touching() {
        let a = Aabb::new(WorldPos::ZERO, WorldPos::new(1.0, 1.0, 1.0));
        let b = Aabb::new(WorldPos::new(1.0, 0.0, 0.0), WorldPos::new(2.0, 1.0, 1.0));
        let c = Aabb::new(WorldPos::new(0.5, 0.5, 0.5), WorldPos::new(3.0, 3.0, 3.0));
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&a));
    }

    #[test]
    fn floor_makes_every_cell_walkable() {
        let (mut grid, scene) = setup();
        let probe = SceneProbe::new(&scene, &grid, ProbeConfig::default());
        assert_eq!(grid.refresh_walkability(&probe), 16);
    }

    #[test]
    fn missing_ground_is_unwalkable() {
        let (mut grid, _) = setup();
        let mut scene = Scene::new();
        // Ground only under the left half.
        scene.add_ground(Aabb::new(
            WorldPos::new(-100.0, -100.0, -5.0),
            WorldPos::new(0.0, 100.0, 0.0),
        ));
        let probe = SceneProbe::new(&scene, &grid, ProbeConfig::default());
        assert_eq!(grid.refresh_walkability(&probe), 8);
        assert!(grid.cell(Point::new(1, 3)).unwrap().is_walkable());
        assert!(!grid.cell(Point::new(2, 0)).unwrap().is_walkable());
    }

    #[test]
    fn ground_too_far_below_is_missed() {
        let (mut grid, _) = setup();
        let mut scene = Scene::new();
        scene.add_ground(Aabb::new(
            WorldPos::new(-100.0, -100.0, -80.0),
            WorldPos::new(100.0, 100.0, -60.0),
        ));
        let probe = SceneProbe::new(&scene, &grid, ProbeConfig::default());
        assert_eq!(grid.refresh_walkability(&probe), 0);
    }

    #[test]
    fn obstacles_block_only_above_allowed_height() {
        let (mut grid, mut scene) = setup();
        // Tall pillar over cell (0, 0), centered at (-75, -75).
        scene.add_obstacle(Aabb::new(
            WorldPos::new(-90.0, -90.0, 0.0),
            WorldPos::new(-60.0, -60.0, 300.0),
        ));
        // Low kerb over cell (3, 3): stays under max_allowed_height.
        scene.add_obstacle(Aabb::new(
            WorldPos::new(60.0, 60.0, 0.0),
            WorldPos::new(90.0, 90.0, 20.0),
        ));
        // Overhang over cell (3, 0): starts above the clearance cube.
        scene.add_obstacle(Aabb::new(
            WorldPos::new(60.0, -90.0, 200.0),
            WorldPos::new(90.0, -60.0, 250.0),
        ));
        let probe = SceneProbe::new(&scene, &grid, ProbeConfig::default());
        assert_eq!(grid.refresh_walkability(&probe), 15);
        assert!(!grid.cell(Point::new(0, 0)).unwrap().is_walkable());
        assert!(grid.cell(Point::new(3, 3)).unwrap().is_walkable());
        assert!(grid.cell(Point::new(3, 0)).unwrap().is_walkable());
    }
}
