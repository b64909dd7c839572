use glam::{Mat4, Vec2, Vec3};
use crate::core::geometry::Ray;

/// Perspective camera orbiting a target point, with damped orbit controls.
///
/// The eye sits on a sphere around `target`: `azimuth` rotates about +Y
/// (0 = looking from +Z), `polar` is measured down from +Y.
#[derive(Debug, Clone)]
pub struct Camera3D {
    /// Point the camera looks at.
    pub target: Vec3,
    /// Distance from target.
    pub radius: f32,
    /// Rotation about +Y in radians.
    pub azimuth: f32,
    /// Angle from +Y in radians.
    pub polar: f32,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    /// Viewport size in CSS pixels.
    pub viewport: Vec2,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Upper polar clamp (π/2 keeps the eye above the ground plane).
    pub max_polar: f32,
    /// Fraction of pending orbit applied per update (0 = no damping).
    pub damping: f32,
    pending_azimuth: f32,
    pending_polar: f32,
}

impl Default for Camera3D {
    fn default() -> Self {
        Self::looking_at(Vec3::new(0.0, 15.0, 15.0), Vec3::ZERO, Vec2::new(800.0, 600.0))
    }
}

impl Camera3D {
    const POLAR_EPSILON: f32 = 1e-6;
    const ZOOM_STEP: f32 = 0.95;

    /// Place the camera at `eye` looking at `target`.
    pub fn looking_at(eye: Vec3, target: Vec3, viewport: Vec2) -> Self {
        let offset = eye - target;
        let radius = offset.length().max(Self::POLAR_EPSILON);
        Self {
            target,
            radius,
            azimuth: offset.x.atan2(offset.z),
            polar: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            fov_y: 75f32.to_radians(),
            near: 0.1,
            far: 1000.0,
            viewport,
            min_distance: 5.0,
            max_distance: 50.0,
            max_polar: std::f32::consts::FRAC_PI_2,
            damping: 0.05,
            pending_azimuth: 0.0,
            pending_polar: 0.0,
        }
    }

    /// Eye position in world space.
    pub fn eye(&self) -> Vec3 {
        let (sin_p, cos_p) = self.polar.sin_cos();
        let (sin_a, cos_a) = self.azimuth.sin_cos();
        self.target + Vec3::new(sin_p * sin_a, cos_p, sin_p * cos_a) * self.radius
    }

    pub fn aspect(&self) -> f32 {
        if self.viewport.y > 0.0 {
            self.viewport.x / self.viewport.y
        } else {
            1.0
        }
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width.max(1.0), height.max(1.0));
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y, self.aspect(), self.near, self.far)
    }

    /// Pixel coordinates (origin top-left) to normalized device coordinates.
    pub fn screen_to_ndc(&self, px: Vec2) -> Vec2 {
        Vec2::new(
            px.x / self.viewport.x * 2.0 - 1.0,
            -(px.y / self.viewport.y) * 2.0 + 1.0,
        )
    }

    /// Ray from the eye through a point in normalized device coordinates.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let world_from_clip = (self.projection_matrix() * self.view_matrix()).inverse();
        let through = world_from_clip.project_point3(Vec3::new(ndc.x, ndc.y, 0.5));
        let eye = self.eye();
        Ray::new(eye, through - eye)
    }

    /// Queue an orbit from a pointer drag of `(dx, dy)` pixels.
    /// A drag of one viewport height turns a full circle.
    pub fn orbit_by_pixels(&mut self, dx: f32, dy: f32) {
        let per_pixel = std::f32::consts::TAU / self.viewport.y.max(1.0);
        self.pending_azimuth -= dx * per_pixel;
        self.pending_polar -= dy * per_pixel;
    }

    /// Zoom by wheel steps; positive moves closer.
    pub fn zoom(&mut self, steps: f32) {
        self.radius *= Self::ZOOM_STEP.powf(steps);
        self.clamp();
    }

    /// Advance damping. Call once per fixed step.
    pub fn update(&mut self) {
        let factor = if self.damping > 0.0 { self.damping } else { 1.0 };
        self.azimuth += self.pending_azimuth * factor;
        self.polar += self.pending_polar * factor;
        self.pending_azimuth *= 1.0 - factor;
        self.pending_polar *= 1.0 - factor;
        self.clamp();
    }

    fn clamp(&mut self) {
        self.polar = self.polar.clamp(Self::POLAR_EPSILON, self.max_polar);
        self.radius = self.radius.clamp(self.min_distance, self.max_distance);
    }
}
