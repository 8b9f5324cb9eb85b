// MODEL: camera, ground surfaces and scene nodes
pub mod camera;
pub mod ground;
pub mod ray;
pub mod scene;

pub use camera::{screen_to_ndc, Camera};
pub use ground::{Ground, GroundPlane, Platform};
pub use ray::{GroundSurface, Ray, RayHit};
pub use scene::{Node, NodeId, NodeKind, Scene};
