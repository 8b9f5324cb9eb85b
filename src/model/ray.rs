use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length
    pub direction: Vec3,
}

impl Ray {
    /// Returns `None` for a zero or non-finite direction.
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let direction = direction.try_normalize()?;
        if !origin.is_finite() {
            return None;
        }
        Some(Self { origin, direction })
    }

    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub distance: f32,
    /// World-space hit point
    pub point: Vec3,
    pub normal: Vec3,
}

/// A static surface that rays can be tested against.
pub trait GroundSurface {
    /// All intersections in front of the ray origin, nearest first.
    fn intersections(&self, ray: &Ray) -> Vec<RayHit>;

    fn first_hit(&self, ray: &Ray) -> Option<RayHit> {
        self.intersections(ray).into_iter().next()
    }
}

/// Sort hits nearest first, dropping anything behind the origin.
pub(crate) fn sort_hits(mut hits: Vec<RayHit>) -> Vec<RayHit> {
    hits.retain(|h| h.distance >= 0.0 && h.distance.is_finite());
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_rejects_degenerate_direction() {
        assert!(Ray::new(Vec3::ZERO, Vec3::ZERO).is_none());
        assert!(Ray::new(Vec3::ZERO, Vec3::new(f32::NAN, 0.0, 0.0)).is_none());
        assert!(Ray::new(Vec3::splat(f32::INFINITY), Vec3::X).is_none());
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -3.0)).unwrap();
        assert_eq!(ray.direction, Vec3::NEG_Z);
        assert_eq!(ray.at(2.0), Vec3::new(0.0, 0.0, -2.0));
    }

    #[test]
    fn hits_are_ordered_nearest_first() {
        let hit = |d: f32| RayHit { distance: d, point: Vec3::ZERO, normal: Vec3::Y };
        let sorted = sort_hits(vec![hit(3.0), hit(-1.0), hit(0.5), hit(f32::NAN)]);
        let distances: Vec<f32> = sorted.iter().map(|h| h.distance).collect();
        assert_eq!(distances, vec![0.5, 3.0]);
    }
}
