use physics::{Quat, Vec3};

/// Number of scalars in one raw action.
pub const ACTION_SIZE: usize = 2;

pub const MOVE_LIMIT: f32 = 1.0;
/// Kept narrow so heading changes stay smooth.
pub const TURN_LIMIT: f32 = 0.01;

/// Clamped physical intent for one tick, applied by the physics collaborator.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControlIntent {
    /// Thrust along the body's forward axis, in `[-1, 1]`.
    pub thrust: f32,
    /// Yaw rate scale, in `[-0.01, 0.01]`.
    pub turn: f32,
}

impl ControlIntent {
    /// Acceleration to add along `forward`.
    #[must_use]
    pub fn forward_acceleration(&self, forward: Vec3, move_speed: f32) -> Vec3 {
        forward * (self.thrust * move_speed)
    }

    /// Yaw for one tick of length `dt`, in degrees.
    #[must_use]
    pub fn yaw_degrees(&self, degrees_per_unit: f32, dt: f32) -> f32 {
        self.turn * degrees_per_unit * dt
    }

    /// Yaw for one tick as a rotation about world up, to be post-multiplied
    /// onto the body's orientation.
    #[must_use]
    pub fn yaw_rotation(&self, degrees_per_unit: f32, dt: f32) -> Quat {
        Quat::from_rotation_y(self.yaw_degrees(degrees_per_unit, dt).to_radians())
    }
}

/// Stateless mapping from raw policy output to [`ControlIntent`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ActionDecoder;

impl ActionDecoder {
    #[must_use]
    pub fn decode(&self, raw: [f32; ACTION_SIZE]) -> ControlIntent {
        ControlIntent {
            thrust: clamp_finite(raw[0], MOVE_LIMIT),
            turn: clamp_finite(raw[1], TURN_LIMIT),
        }
    }
}

/// Clamp into `[-limit, limit]`. NaN maps to zero; infinities saturate.
fn clamp_finite(value: f32, limit: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-limit, limit)
    }
}
