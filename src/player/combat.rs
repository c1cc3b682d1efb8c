use bevy::log::info;
use bevy::prelude::Component;
use crate::player::CombatParams;
use crate::util::{DeferredResets, FrameCount, StaleResets};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
enum CombatReset {
	Invincibility,
}

/// The player's health, and the invincibility window that follows each hit.
#[derive(Component, Debug)]
pub struct PlayerCombat {
	health: i32,
	max_health: i32,
	alive: bool,
	invincible: bool,
	invincibility: FrameCount,
	refund_air_jumps_on_damage: bool,
	resets: DeferredResets<CombatReset>,
}

impl PlayerCombat {
	/// Start at full health. `tick_rate` is the number of [PlayerCombat::refresh] calls per second.
	pub fn new(params: &CombatParams, stale_resets: StaleResets, tick_rate: f32) -> Self {
		Self {
			health: params.max_health,
			max_health: params.max_health,
			alive: params.max_health > 0,
			invincible: false,
			invincibility: FrameCount::from_secs(params.invincibility_duration, tick_rate),
			refund_air_jumps_on_damage: params.refund_air_jumps_on_damage,
			resets: DeferredResets::new(stale_resets),
		}
	}

	/// Subtract `amount` from health and become invincible for a while.
	/// Does nothing while already invincible. Returns whether the damage landed.
	pub fn apply_damage(&mut self, amount: i32) -> bool {
		if self.invincible {
			return false;
		}
		self.health -= amount;
		self.invincible = true;
		self.resets.schedule(CombatReset::Invincibility, self.invincibility);
		info!("player took {} damage, health now {}", amount, self.health);
		true
	}

	pub fn is_invincible(&self) -> bool {
		self.invincible
	}

	/// As of the latest [PlayerCombat::refresh]
	pub fn is_alive(&self) -> bool {
		self.alive
	}

	pub fn health(&self) -> i32 {
		self.health
	}

	pub fn max_health(&self) -> i32 {
		self.max_health
	}

	/// Overwrite health directly. No bounds are enforced; `is_alive` catches up on the next refresh.
	#[cfg(test)]
	pub fn set_health(&mut self, health: i32) {
		self.health = health;
	}

	pub fn refunds_air_jumps(&self) -> bool {
		self.refund_air_jumps_on_damage
	}

	/// Per-tick update: fire due resets and re-derive `alive` from the current health
	pub fn refresh(&mut self) {
		for reset in self.resets.advance() {
			match reset {
				CombatReset::Invincibility => self.invincible = false,
			}
		}

		let alive = self.health > 0;
		if self.alive && !alive {
			info!("player died");
		}
		self.alive = alive;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn combat() -> PlayerCombat {
		let params = CombatParams {
			max_health: 5,
			invincibility_duration: 0.3,
			refund_air_jumps_on_damage: true,
		};
		// 3 ticks of invincibility
		PlayerCombat::new(&params, StaleResets::Discard, 10.0)
	}

	#[test]
	fn starts_at_full_health() {
		let combat = combat();
		assert_eq!(combat.health(), combat.max_health());
		assert!(combat.is_alive());
		assert!(!combat.is_invincible());
	}

	#[test]
	fn damage_grants_invincibility_for_its_duration() {
		let mut combat = combat();
		assert!(combat.apply_damage(2));
		assert_eq!(combat.health(), 3);
		assert!(combat.is_invincible());

		combat.refresh();
		combat.refresh();
		assert!(combat.is_invincible());
		combat.refresh();
		assert!(!combat.is_invincible());
	}

	#[test]
	fn damage_while_invincible_is_ignored() {
		let mut combat = combat();
		combat.apply_damage(1);
		assert!(!combat.apply_damage(3));
		assert_eq!(combat.health(), 4);

		for _ in 0..3 {
			combat.refresh();
		}
		assert!(combat.apply_damage(3));
		assert_eq!(combat.health(), 1);
	}

	#[test]
	fn death_is_observed_on_refresh() {
		let mut combat = combat();
		combat.apply_damage(7);
		assert_eq!(combat.health(), -2);
		assert!(combat.is_alive());
		combat.refresh();
		assert!(!combat.is_alive());
	}

	#[test]
	fn external_health_writes_are_picked_up() {
		let mut combat = combat();
		combat.set_health(-1);
		combat.refresh();
		assert!(!combat.is_alive());

		combat.set_health(2);
		combat.refresh();
		assert!(combat.is_alive());
	}
}
