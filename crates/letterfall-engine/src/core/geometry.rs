//! Axis-aligned boxes and rays for collision and picking.

use glam::{EulerRot, Mat4, Quat, Vec3};

/// World transform for a position plus XYZ Euler rotation (unit scale).
pub fn pose_matrix(pos: Vec3, euler: Vec3) -> Mat4 {
    let rot = Quat::from_euler(EulerRot::XYZ, euler.x, euler.y, euler.z);
    Mat4::from_rotation_translation(rot, pos)
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Inverted box that any point will grow.
    pub const EMPTY: Self = Self {
        min: Vec3::INFINITY,
        max: Vec3::NEG_INFINITY,
    };

    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing all points, or `None` for no points.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut bounds = Self::EMPTY;
        for p in points {
            bounds.include(p);
        }
        (!bounds.is_empty()).then_some(bounds)
    }

    pub fn include(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn is_empty(&self) -> bool {
        self.max.x < self.min.x || self.max.y < self.min.y || self.max.z < self.min.z
    }

    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            self.max - self.min
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Grow each face outward by `margin`.
    pub fn expand(self, margin: Vec3) -> Self {
        Self {
            min: self.min - margin,
            max: self.max + margin,
        }
    }

    pub fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(b.x, b.y, b.z),
        ]
    }

    /// World-space box enclosing this (local) box after `m` is applied.
    pub fn transformed(&self, m: &Mat4) -> Self {
        if self.is_empty() {
            return *self;
        }
        let mut out = Self::EMPTY;
        for c in self.corners() {
            out.include(m.transform_point3(c));
        }
        out
    }

    /// Overlap test; touching faces count as intersecting.
    pub fn intersects(&self, other: &Aabb) -> bool {
        !(other.max.x < self.min.x
            || other.min.x > self.max.x
            || other.max.y < self.min.y
            || other.min.y > self.max.y
            || other.max.z < self.min.z
            || other.min.z > self.max.z)
    }

    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}

/// Half-line used for picking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction.
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self {
            origin,
            dir: dir.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }

    /// Distance along the ray to the first point inside `bounds`.
    /// Returns 0.0 when the origin is already inside.
    pub fn intersect_aabb(&self, bounds: &Aabb) -> Option<f32> {
        slab_test(self.origin, self.dir, bounds)
    }

    /// Hit test against a box given in local space and placed by a rigid
    /// `world_from_local` transform. Distances stay in world units.
    pub fn intersect_oriented(&self, local: &Aabb, world_from_local: &Mat4) -> Option<f32> {
        let local_from_world = world_from_local.inverse();
        let origin = local_from_world.transform_point3(self.origin);
        let dir = local_from_world.transform_vector3(self.dir);
        slab_test(origin, dir, local)
    }
}

fn slab_test(origin: Vec3, dir: Vec3, bounds: &Aabb) -> Option<f32> {
    if bounds.is_empty() {
        return None;
    }
    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;
    for axis in 0..3 {
        let o = origin[axis];
        let d = dir[axis];
        let (lo, hi) = (bounds.min[axis], bounds.max[axis]);
        if d.abs() < 1e-8 {
            if o < lo || o > hi {
                return None;
            }
            continue;
        }
        let t1 = (lo - o) / d;
        let t2 = (hi - o) / d;
        t_near = t_near.max(t1.min(t2));
        t_far = t_far.min(t1.max(t2));
    }
    if t_far < t_near.max(0.0) {
        return None;
    }
    Some(t_near.max(0.0))
}
