use crate::util::{ContactSensorParams, StaleResets};
use bevy::prelude::{Asset, TypePath};
use serde::Deserialize;
use thiserror::Error;

/// Everything tunable about the player, loaded from a `.ron` asset.
/// Durations are in seconds.
#[derive(Asset, Copy, Clone, Debug, Default, Deserialize, TypePath)]
pub struct PlayerControlParams {
	pub movement: MovementParams,
	#[serde(default)]
	pub sensors: ContactSensorParams,
	#[serde(default)]
	pub knockback: KnockbackParams,
	#[serde(default)]
	pub combat: CombatParams,
	#[serde(default)]
	pub stale_resets: StaleResets,
}

#[derive(Copy, Clone, Debug, Deserialize)]
pub struct MovementParams {
	pub move_speed: f32,
	pub jump_force: f32,
	pub wall_jump_horizontal_force: f32,
	pub wall_jump_vertical_multiplier: f32,
	/// how long regular running and wall sliding are suppressed after a wall jump
	pub wall_jump_lockout: f32,
	/// per-axis dash cooldown
	pub dash_cooldown: f32,
	/// after this long, a vertical dash's vertical velocity is cut to zero
	pub vertical_dash_duration: f32,
	/// vertical velocity while sliding down a grabbed wall (negative is down)
	pub grab_fall_speed: f32,
	pub max_fall_speed: f32,
	pub max_horizontal_speed: f32,
	pub dash_power: f32,
	pub max_air_jumps: u8,
	/// lockout shared by both dash axes
	pub shared_dash_lockout: f32,
}

impl Default for MovementParams {
	fn default() -> Self {
		Self {
			move_speed: 6.0,
			jump_force: 8.0,
			wall_jump_horizontal_force: 2.5,
			wall_jump_vertical_multiplier: 1.0,
			wall_jump_lockout: 0.35,
			dash_cooldown: 0.6,
			vertical_dash_duration: 0.3,
			grab_fall_speed: -1.0,
			max_fall_speed: 15.0,
			max_horizontal_speed: 100.0,
			dash_power: 100.0,
			max_air_jumps: 1,
			shared_dash_lockout: 0.4,
		}
	}
}

#[derive(Copy, Clone, Debug, Deserialize)]
pub struct KnockbackParams {
	/// how long player-directed movement stays disabled after being pushed
	pub lockout: f32,
}

impl Default for KnockbackParams {
	fn default() -> Self {
		Self { lockout: 0.4 }
	}
}

#[derive(Copy, Clone, Debug, Deserialize)]
pub struct CombatParams {
	pub max_health: i32,
	pub invincibility_duration: f32,
	/// taking damage gives back any air jumps already spent
	pub refund_air_jumps_on_damage: bool,
}

impl Default for CombatParams {
	fn default() -> Self {
		Self {
			max_health: 5,
			invincibility_duration: 3.0,
			refund_air_jumps_on_damage: true,
		}
	}
}

#[derive(Debug, Error, PartialEq)]
pub enum ParamsError {
	#[error("`{name}` must be a finite, non-negative number (got {value})")]
	NotNonNegative { name: &'static str, value: f32 },

	#[error("`grab_fall_speed` must be finite and not positive (got {0})")]
	GrabFallSpeed(f32),

	#[error("`max_health` must be positive (got {0})")]
	MaxHealth(i32),
}

impl PlayerControlParams {
	/// Reject values that would break the movement invariants (e.g. a negative clamp)
	pub fn validate(&self) -> Result<(), ParamsError> {
		let m = &self.movement;
		let non_negative = [
			("move_speed", m.move_speed),
			("jump_force", m.jump_force),
			("wall_jump_horizontal_force", m.wall_jump_horizontal_force),
			("wall_jump_vertical_multiplier", m.wall_jump_vertical_multiplier),
			("wall_jump_lockout", m.wall_jump_lockout),
			("dash_cooldown", m.dash_cooldown),
			("vertical_dash_duration", m.vertical_dash_duration),
			("max_fall_speed", m.max_fall_speed),
			("max_horizontal_speed", m.max_horizontal_speed),
			("dash_power", m.dash_power),
			("shared_dash_lockout", m.shared_dash_lockout),
			("knockback.lockout", self.knockback.lockout),
			("combat.invincibility_duration", self.combat.invincibility_duration),
		];
		for (name, value) in non_negative {
			if !value.is_finite() || value < 0.0 {
				return Err(ParamsError::NotNonNegative { name, value });
			}
		}
		if !m.grab_fall_speed.is_finite() || m.grab_fall_speed > 0.0 {
			return Err(ParamsError::GrabFallSpeed(m.grab_fall_speed));
		}
		if self.combat.max_health <= 0 {
			return Err(ParamsError::MaxHealth(self.combat.max_health));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn shipped_asset_parses_and_validates() {
		let params: PlayerControlParams = ron::de::from_str(include_str!("../../assets/player.ron")).unwrap();
		params.validate().unwrap();
		assert_eq!(params.movement.max_air_jumps, 1);
		assert!(params.sensors.ground.is_some());
		assert_eq!(params.stale_resets, StaleResets::Discard);
	}

	#[test]
	fn defaults_are_valid() {
		PlayerControlParams::default().validate().unwrap();
	}

	#[test]
	fn rejects_negative_clamp() {
		let mut params = PlayerControlParams::default();
		params.movement.max_fall_speed = -1.0;
		assert_eq!(
			params.validate(),
			Err(ParamsError::NotNonNegative {
				name: "max_fall_speed",
				value: -1.0
			})
		);
	}

	#[test]
	fn rejects_upward_grab_slide() {
		let mut params = PlayerControlParams::default();
		params.movement.grab_fall_speed = 2.0;
		assert_eq!(params.validate(), Err(ParamsError::GrabFallSpeed(2.0)));
	}

	#[test]
	fn rejects_empty_health() {
		let mut params = PlayerControlParams::default();
		params.combat.max_health = 0;
		assert_eq!(params.validate(), Err(ParamsError::MaxHealth(0)));
	}
}
