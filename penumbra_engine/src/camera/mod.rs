//! Camera module: view and light projectors.
//!
//! The passes only see the `Projector` contract. The caller owns the
//! camera and the light and drives them between frames.

mod projector;
mod perspective_camera;
mod spot_light;

pub use projector::{Projector, ViewCamera, LightSource};
pub use perspective_camera::PerspectiveCamera;
pub use spot_light::SpotLight;
