use bevy::math::Vec2;
use bevy_rapier2d::dynamics::{ExternalImpulse, Velocity};

/// The rigid body that the player's movement reads from and writes to.
///
/// Impulses are queued for the physics step rather than applied to the velocity immediately,
/// so a velocity write later in the same tick does not cancel them.
pub trait PhysicsBody {
	fn position(&self) -> Vec2;
	fn velocity(&self) -> Vec2;
	fn set_velocity(&mut self, velocity: Vec2);
	fn apply_impulse(&mut self, impulse: Vec2);
}

/// Answers "is anything solid inside this box?" for the contact sensors.
/// Implementations should answer `false` when the query can't be performed.
pub trait OverlapQuery {
	fn overlap_box(&self, center: Vec2, half_extents: Vec2, layers: u32) -> bool;
}

impl<F> OverlapQuery for F
where
	F: Fn(Vec2, Vec2, u32) -> bool,
{
	fn overlap_box(&self, center: Vec2, half_extents: Vec2, layers: u32) -> bool {
		self(center, half_extents, layers)
	}
}

/// [PhysicsBody] backed by a Rapier dynamic body's components
pub struct RapierBody<'a> {
	pub position: Vec2,
	pub velocity: &'a mut Velocity,
	pub impulse: &'a mut ExternalImpulse,
}

impl PhysicsBody for RapierBody<'_> {
	fn position(&self) -> Vec2 {
		self.position
	}

	fn velocity(&self) -> Vec2 {
		self.velocity.linvel
	}

	fn set_velocity(&mut self, velocity: Vec2) {
		self.velocity.linvel = velocity;
	}

	fn apply_impulse(&mut self, impulse: Vec2) {
		// Rapier clears this after every step, so impulses from one tick add up
		self.impulse.impulse += impulse;
	}
}
