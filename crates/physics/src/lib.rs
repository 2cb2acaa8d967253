#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Point-to-Point Physics
//!
//! The physical layer underneath the point-to-point agent.
//!
//! This crate holds the data the agent reads every tick and the smallest
//! rigid-body integrator that can act on the agent's control intents. It is
//! deliberately narrow: one body, no gravity, no collisions. Hosts that embed a
//! real engine only need the [`types`] and [`transform`] modules and can feed
//! their own [`KinematicState`] snapshots to the agent.
//!
//! ## Key Components
//!
//! -   **Leaf data:** [`Pose`] and [`KinematicState`] in the [`types`] module.
//!     Orientation is a unit quaternion; the body's forward axis is `+Z` and
//!     world up is `+Y`.
//! -   **Frames:** the [`transform`] module converts world-space vectors into
//!     the body frame and builds "look at" frames.
//! -   **Integration:** [`RigidBody`] in the [`integrator`] module accumulates
//!     accelerations, applies yaw rotations and advances with a fixed `dt`.
//!
//! ## Usage
//!
//! ```rust
//! use physics::{Pose, RigidBody, Vec3};
//!
//! let mut body = RigidBody::new(Pose::at(Vec3::ZERO));
//! body.add_acceleration(body.forward() * 2.0);
//! body.integrate(0.02).unwrap();
//! assert!(body.state().pose.position.z > 0.0);
//! ```

pub mod error;
pub mod integrator;
pub mod transform;
pub mod types;

pub use error::PhysicsError;
pub use glam::{Quat, Vec3};
pub use integrator::RigidBody;
pub use types::{KinematicState, Pose, FORWARD, UP};
