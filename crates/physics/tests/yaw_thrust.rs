use physics::transform::inverse_transform_point;
use physics::{Pose, Quat, RigidBody, Vec3};

/// Constant thrust along the body's forward axis with a steady yaw should
/// curve the trajectory toward the turn side while the body keeps seeing its
/// own path ahead of it.
#[test]
fn thrust_with_yaw_curves_the_path() {
    let mut body = RigidBody::new(Pose::IDENTITY);
    let dt = 0.02_f32;
    for _ in 0..200 {
        body.add_acceleration(body.forward() * 1.0);
        let yaw = Quat::from_rotation_y((0.01_f32 * 180.0 * dt).to_radians());
        body.move_rotation(body.rotation() * yaw);
        body.integrate(dt).unwrap();
    }
    let state = body.state();
    assert!(state.pose.position.z > 0.0);
    assert!(state.pose.position.x > 0.0, "positive yaw turns toward +X");
    assert!(state.linear_velocity.length() > 0.0);
}

#[test]
fn straight_thrust_matches_analytic_distance() {
    let mut body = RigidBody::new(Pose::at(Vec3::new(0.0, 0.0, -10.0)));
    let dt = 0.01_f32;
    let steps = 100_usize;
    for _ in 0..steps {
        body.add_acceleration(body.forward() * 2.0);
        body.integrate(dt).unwrap();
    }
    // semi-implicit Euler: x = a dt^2 n(n+1)/2
    let n = steps as f32;
    let expected = -10.0 + 2.0 * dt * dt * n * (n + 1.0) / 2.0;
    let diff = (body.state().pose.position.z - expected).abs();
    assert!(diff < 1e-3, "diff={diff}");

    let ahead = inverse_transform_point(&body.state().pose, Vec3::new(0.0, 0.0, 10.0));
    assert!(ahead.z > 0.0);
}
