// Gesture physics module
// Drag mapping, momentum, snapping springs and the settle loop

pub mod axis;
pub mod clock;
pub mod engine;
pub mod momentum;
pub mod snap;
pub mod spring;

pub use clock::FixedStep;
pub use engine::{GesturePhase, GesturePhysicsEngine, PhysicsConfig, PhysicsEvent};
pub use momentum::{momentum_displacement, Momentum};
pub use snap::snap_target;
pub use spring::Spring;
