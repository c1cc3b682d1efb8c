use crate::player::{PlayerCombat, PlayerMovement};
use crate::util::{PhysicsBody, RapierBody};
use bevy::log::warn_once;
use bevy::math::Vec2;
use bevy::prelude::{Component, EventReader, Query, Transform};
use bevy_rapier2d::dynamics::{ExternalImpulse, Velocity};
use bevy_rapier2d::pipeline::CollisionEvent;

/// Something that shoves the player away (and optionally hurts them) on contact.
/// Needs a sensor collider with collision events enabled.
#[derive(Component, Debug)]
pub struct Hazard {
	pub push_power: f32,
	pub contact_damage: i32,
}

impl Default for Hazard {
	fn default() -> Self {
		Self {
			push_power: 10.0,
			contact_damage: 0,
		}
	}
}

impl Hazard {
	/// A player `body` started touching this hazard, which sits at `position`.
	///
	/// Knockback goes first, so the invincibility from this hit's own damage can't cancel it.
	/// An already invincible player is neither pushed nor hurt. Returns whether the player was pushed.
	pub fn hit(
		&self,
		position: Vec2,
		movement: &mut PlayerMovement,
		combat: Option<&mut PlayerCombat>,
		body: &mut impl PhysicsBody,
	) -> bool {
		let pushed = movement.on_hazard_contact(position, self.push_power, body, combat.as_deref());
		if let Some(combat) = combat {
			if self.contact_damage > 0 && combat.apply_damage(self.contact_damage) && combat.refunds_air_jumps() {
				movement.refund_air_jumps();
			}
		}
		pushed
	}
}

pub fn hazard_contact_system(
	mut collisions: EventReader<CollisionEvent>,
	hazards: Query<(&Hazard, &Transform)>,
	mut players: Query<(
		&mut PlayerMovement,
		Option<&mut PlayerCombat>,
		&mut Velocity,
		&mut ExternalImpulse,
		&Transform,
	)>,
) {
	for event in collisions.read() {
		let &CollisionEvent::Started(a, b, _) = event else {
			continue;
		};
		let (hazard_entity, player_entity) = if hazards.contains(a) { (a, b) } else { (b, a) };
		let Ok((hazard, hazard_transform)) = hazards.get(hazard_entity) else {
			continue;
		};
		let Ok((mut movement, mut combat, mut velocity, mut impulse, player_transform)) =
			players.get_mut(player_entity)
		else {
			continue;
		};

		if combat.is_none() {
			warn_once!("player has no combat component; hazards will treat it as never invincible");
		}

		let mut body = RapierBody {
			position: player_transform.translation.truncate(),
			velocity: &mut velocity,
			impulse: &mut impulse,
		};
		hazard.hit(
			hazard_transform.translation.truncate(),
			&mut movement,
			combat.as_deref_mut(),
			&mut body,
		);
	}
}
