use glam::{Vec2, Vec3};
use tracing::{debug, trace};

use crate::config::{NavigationConfig, Smoothing};
use crate::model::{screen_to_ndc, Camera, GroundSurface, Node, NodeId, NodeKind, Scene};

use super::navigation::Viewport;

/// Where the camera is gliding to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationTarget {
    pub position: Vec3,
}

/// Result of one glide tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlideStatus {
    Idle,
    Gliding,
    Arrived,
}

/// Click a point on the ground, drop a marker there and glide the camera over.
pub struct ClickToMove {
    target: Option<NavigationTarget>,
    marker: Option<NodeId>,
    glide_height: f32,
    arrive_epsilon: f32,
    smoothing: Smoothing,
    marker_radius: f32,
}

impl ClickToMove {
    pub fn new(config: &NavigationConfig) -> Self {
        Self {
            target: None,
            marker: None,
            glide_height: config.glide_height,
            arrive_epsilon: config.arrive_epsilon,
            smoothing: config.smoothing,
            marker_radius: config.marker_radius,
        }
    }

    pub fn target(&self) -> Option<NavigationTarget> {
        self.target
    }

    pub fn is_animating(&self) -> bool {
        self.target.is_some()
    }

    pub fn marker(&self) -> Option<NodeId> {
        self.marker
    }

    /// Aim at the ground under a pixel. Returns the ground hit, or `None` on a miss.
    pub fn on_click(
        &mut self,
        pointer: Vec2,
        viewport: Viewport,
        camera: &Camera,
        scene: &mut Scene,
    ) -> Option<Vec3> {
        let ndc = screen_to_ndc(pointer.x, pointer.y, viewport.width, viewport.height)?;
        let ray = camera.ray_through_ndc(ndc)?;
        let Some(hit) = scene.ground.first_hit(&ray) else {
            trace!(x = pointer.x, y = pointer.y, "click missed the ground");
            return None;
        };

        let position = Vec3::new(hit.point.x, self.glide_height, hit.point.z);
        self.target = Some(NavigationTarget { position });
        self.place_marker(scene, hit.point);
        debug!(?position, "glide target set");
        Some(hit.point)
    }

    fn place_marker(&mut self, scene: &mut Scene, at: Vec3) {
        if let Some(node) = self.marker.and_then(|id| scene.node_mut(id)) {
            node.position = at;
            return;
        }
        let id = scene.add_node(Node {
            kind: NodeKind::Marker { radius: self.marker_radius },
            position: at,
        });
        self.marker = Some(id);
    }

    /// Advance the glide by one frame of `dt` seconds.
    pub fn tick(&mut self, dt: f32, camera: &mut Camera, scene: &mut Scene) -> GlideStatus {
        let Some(target) = self.target else {
            return GlideStatus::Idle;
        };

        camera.eye = camera.eye.lerp(target.position, self.smoothing.factor(dt));
        if camera.eye.distance(target.position) < self.arrive_epsilon {
            debug!(eye = ?camera.eye, "glide arrived");
            self.clear(scene);
            GlideStatus::Arrived
        } else {
            GlideStatus::Gliding
        }
    }

    /// Drop the target and marker without moving the camera.
    pub fn clear(&mut self, scene: &mut Scene) {
        self.target = None;
        if let Some(id) = self.marker.take() {
            scene.remove_node(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Ground, GroundPlane, Platform};
    use std::f32::consts::FRAC_PI_2;

    fn per_tick_config() -> NavigationConfig {
        NavigationConfig { smoothing: Smoothing::PerTick { step: 0.05 }, ..NavigationConfig::desktop() }
    }

    /// Camera straight above (1, _, 1) so the viewport center hits (1, 0, 1).
    fn overhead_camera() -> Camera {
        let mut cam = Camera::new(200, 200);
        cam.eye = Vec3::new(1.0, 5.0, 1.0);
        cam.set_yaw_pitch(0.0, -FRAC_PI_2);
        cam
    }

    fn plane_scene() -> Scene {
        Scene::new(Ground::Plane(GroundPlane { height: 0.0 }))
    }

    const VIEW: Viewport = Viewport { width: 200.0, height: 200.0 };

    #[test]
    fn click_on_ground_sets_target_and_one_marker() {
        let cam = overhead_camera();
        let mut scene = plane_scene();
        let mut nav = ClickToMove::new(&per_tick_config());

        let hit = nav.on_click(Vec2::new(100.0, 100.0), VIEW, &cam, &mut scene).expect("ground hit");
        assert!((hit - Vec3::new(1.0, 0.0, 1.0)).length() < 1e-3);
        assert!(nav.is_animating());
        let target = nav.target().unwrap().position;
        assert!((target - Vec3::new(1.0, 2.0, 1.0)).length() < 1e-3, "target sits at glide height");

        let markers: Vec<_> = scene.markers().collect();
        assert_eq!(markers.len(), 1);
        assert!((markers[0].position - hit).length() < 1e-6, "marker sits on the hit point");
    }

    #[test]
    fn miss_is_a_silent_no_op() {
        let mut cam = Camera::new(200, 200);
        cam.set_yaw_pitch(0.0, 0.5); // looking above the horizon
        let mut scene = plane_scene();
        let mut nav = ClickToMove::new(&per_tick_config());

        assert!(nav.on_click(Vec2::new(100.0, 100.0), VIEW, &cam, &mut scene).is_none());
        assert!(!nav.is_animating());
        assert_eq!(scene.markers().count(), 0);

        let degenerate = Viewport { width: 0.0, height: 0.0 };
        assert!(nav.on_click(Vec2::new(1.0, 1.0), degenerate, &cam, &mut scene).is_none());
    }

    #[test]
    fn distance_decays_by_095_per_tick_until_arrival() {
        let mut cam = overhead_camera();
        let mut scene = plane_scene();
        let mut nav = ClickToMove::new(&per_tick_config());
        nav.on_click(Vec2::new(100.0, 100.0), VIEW, &cam, &mut scene).unwrap();
        let target = nav.target().unwrap().position;

        let mut previous = cam.eye.distance(target);
        let mut ticks = 0;
        while nav.tick(1.0 / 60.0, &mut cam, &mut scene) == GlideStatus::Gliding {
            let d = cam.eye.distance(target);
            assert!((d / previous - 0.95).abs() < 1e-3, "ratio {}", d / previous);
            previous = d;
            ticks += 1;
            assert!(ticks < 1000, "glide never terminated");
        }

        assert!(cam.eye.distance(target) < 0.1);
        assert!(!nav.is_animating());
        assert_eq!(scene.markers().count(), 0, "marker removed on arrival");

        let resting = cam.eye;
        for _ in 0..10 {
            assert_eq!(nav.tick(1.0 / 60.0, &mut cam, &mut scene), GlideStatus::Idle);
        }
        assert_eq!(cam.eye, resting, "no movement after arrival");
    }

    #[test]
    fn reclick_while_gliding_reaims_without_second_marker() {
        let mut cam = overhead_camera();
        let mut scene = plane_scene();
        let mut nav = ClickToMove::new(&per_tick_config());
        nav.on_click(Vec2::new(100.0, 100.0), VIEW, &cam, &mut scene).unwrap();
        let first_marker = nav.marker();
        for _ in 0..5 {
            nav.tick(1.0 / 60.0, &mut cam, &mut scene);
        }

        let hit = nav.on_click(Vec2::new(150.0, 100.0), VIEW, &cam, &mut scene).unwrap();
        assert_eq!(nav.marker(), first_marker, "same marker node is reused");
        assert_eq!(scene.markers().count(), 1);
        assert_eq!(scene.markers().next().unwrap().position, hit);
        let target = nav.target().unwrap().position;
        assert!((target.x - hit.x).abs() < 1e-6 && (target.z - hit.z).abs() < 1e-6);
    }

    #[test]
    fn marker_is_recreated_after_arrival() {
        let mut cam = overhead_camera();
        let mut scene = plane_scene();
        let mut nav = ClickToMove::new(&per_tick_config());
        nav.on_click(Vec2::new(100.0, 100.0), VIEW, &cam, &mut scene).unwrap();
        while nav.tick(0.0, &mut cam, &mut scene) != GlideStatus::Arrived {}
        assert!(nav.marker().is_none());

        nav.on_click(Vec2::new(100.0, 100.0), VIEW, &cam, &mut scene).unwrap();
        assert!(nav.marker().is_some());
        assert_eq!(scene.markers().count(), 1);
    }

    #[test]
    fn time_based_glide_covers_same_ground_at_any_frame_rate() {
        let config = NavigationConfig::desktop();
        let run = |hz: f32, seconds: f32| {
            let mut cam = overhead_camera();
            cam.eye = Vec3::new(1.0, 30.0, 1.0);
            let mut scene = plane_scene();
            let mut nav = ClickToMove::new(&config);
            nav.on_click(Vec2::new(100.0, 100.0), VIEW, &cam, &mut scene).unwrap();
            for _ in 0..(hz * seconds) as usize {
                nav.tick(1.0 / hz, &mut cam, &mut scene);
            }
            cam.eye.y
        };
        let at_30 = run(30.0, 0.5);
        let at_144 = run(144.0, 0.5);
        assert!((at_30 - at_144).abs() < 0.05, "30 Hz {at_30} vs 144 Hz {at_144}");
    }

    #[test]
    fn clicks_beyond_the_platform_rim_miss() {
        let mut cam = Camera::new(200, 200);
        cam.eye = Vec3::new(10.0, 5.0, 10.0);
        cam.set_yaw_pitch(0.0, -FRAC_PI_2);
        let mut scene = Scene::new(Ground::Platform(Platform::new(Vec3::ZERO, 2.0, 0.2)));
        let mut nav = ClickToMove::new(&per_tick_config());
        assert!(nav.on_click(Vec2::new(100.0, 100.0), VIEW, &cam, &mut scene).is_none());
    }
}
