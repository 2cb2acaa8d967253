use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum PhysicsError {
    #[error("non-finite position {0:?}")]
    NonFinitePosition([f32; 3]),
    #[error("non-finite orientation {0:?}")]
    NonFiniteOrientation([f32; 4]),
    #[error("non-positive timestep {0}")]
    NonPositiveTimestep(f32),
}
