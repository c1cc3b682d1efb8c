mod combat;
mod control_params;
mod control_state;
mod input;
mod knockback;
mod loader;
mod movement;
mod system;


use bevy::asset::Handle;
use bevy::prelude::Component;
use bevy_rapier2d::dynamics::{ExternalImpulse, Velocity};
pub use combat::*;
pub use control_params::*;
pub use control_state::*;
pub use input::*;
pub use loader::*;
pub use movement::*;
pub use system::*;

/// Marks the player entity. Movement and combat are attached once the params asset has loaded.
#[derive(Component, Debug)]
#[require(Velocity, ExternalImpulse)]
pub struct Player(pub Handle<PlayerControlParams>);
