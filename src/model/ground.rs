use glam::Vec3;

use super::ray::{sort_hits, GroundSurface, Ray, RayHit};

const PARALLEL_EPS: f32 = 1e-6;

/// Solid capped cylinder standing on the Y axis, centered at `center`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Platform {
    pub center: Vec3,
    pub radius: f32,
    pub height: f32,
}

impl Platform {
    pub fn new(center: Vec3, radius: f32, height: f32) -> Self {
        Self { center, radius, height }
    }

    pub fn top(&self) -> f32 {
        self.center.y + self.height * 0.5
    }

    fn within_radius(&self, p: Vec3) -> bool {
        let dx = p.x - self.center.x;
        let dz = p.z - self.center.z;
        dx * dx + dz * dz <= self.radius * self.radius
    }

    fn cap_hit(&self, ray: &Ray, y: f32, normal: Vec3) -> Option<RayHit> {
        if ray.direction.y.abs() < PARALLEL_EPS {
            return None;
        }
        let distance = (y - ray.origin.y) / ray.direction.y;
        let point = ray.at(distance);
        self.within_radius(point).then_some(RayHit { distance, point, normal })
    }

    fn side_hits(&self, ray: &Ray, out: &mut Vec<RayHit>) {
        let (dx, dz) = (ray.direction.x, ray.direction.z);
        let (mx, mz) = (ray.origin.x - self.center.x, ray.origin.z - self.center.z);
        let a = dx * dx + dz * dz;
        if a < PARALLEL_EPS {
            return;
        }
        let b = 2.0 * (mx * dx + mz * dz);
        let c = mx * mx + mz * mz - self.radius * self.radius;
        let disc = b * b - 4.0 * a * c;
        if disc < 0.0 {
            return;
        }
        let root = disc.sqrt();
        let half_height = self.height * 0.5;
        for distance in [(-b - root) / (2.0 * a), (-b + root) / (2.0 * a)] {
            let point = ray.at(distance);
            if (point.y - self.center.y).abs() <= half_height {
                let normal = Vec3::new(point.x - self.center.x, 0.0, point.z - self.center.z)
                    .try_normalize()
                    .unwrap_or(Vec3::X);
                out.push(RayHit { distance, point, normal });
            }
        }
    }
}

impl GroundSurface for Platform {
    fn intersections(&self, ray: &Ray) -> Vec<RayHit> {
        let mut hits = Vec::with_capacity(4);
        hits.extend(self.cap_hit(ray, self.top(), Vec3::Y));
        hits.extend(self.cap_hit(ray, self.center.y - self.height * 0.5, Vec3::NEG_Y));
        self.side_hits(ray, &mut hits);
        sort_hits(hits)
    }
}

/// Infinite horizontal plane at `height`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundPlane {
    pub height: f32,
}

impl GroundSurface for GroundPlane {
    fn intersections(&self, ray: &Ray) -> Vec<RayHit> {
        if ray.direction.y.abs() < PARALLEL_EPS {
            return Vec::new();
        }
        let distance = (self.height - ray.origin.y) / ray.direction.y;
        sort_hits(vec![RayHit { distance, point: ray.at(distance), normal: Vec3::Y }])
    }
}

/// The navigable surface of a scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ground {
    Platform(Platform),
    Plane(GroundPlane),
}

impl GroundSurface for Ground {
    fn intersections(&self, ray: &Ray) -> Vec<RayHit> {
        match self {
            Ground::Platform(p) => p.intersections(ray),
            Ground::Plane(p) => p.intersections(ray),
        }
    }
}
