//! Stacking simulation
//!
//! All gameplay rules live here. Nothing in this module renders or reads
//! devices; motion comes from a `PhysicsWorld` and randomness from a caller
//! supplied RNG, so every rule can be driven with fake contact batches.

pub mod contact;
pub mod input;
pub mod physics;
pub mod shape;
pub mod spawner;
pub mod stability;
pub mod state;

pub use contact::{on_collision_begin, on_collision_sustained};
pub use input::{InputSource, Key, TickInput, apply_input};
pub use physics::{BodyConfig, BodyHandle, ContactEvents, ContactPair, PhysicsWorld};
pub use shape::{Dimensions, ShapeDescriptor, ShapeKind, make_polygon, make_rectangle};
pub use spawner::{choose_shape, spawn_next, spawn_position};
pub use stability::{judge, spread};
pub use state::{Deferred, DeferredEvent, GamePhase, Piece, RunState};
