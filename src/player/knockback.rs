use bevy::log::{debug, info};
use bevy::math::Vec2;
use crate::player::{MovementReset, PlayerCombat, PlayerMovement};
use crate::util::PhysicsBody;

impl PlayerMovement {
    /// Knock the player away from a hazard at `hazard_position`.
    ///
    /// The direction comes from the relative positions alone, so the push always points
    /// away from the hazard no matter which side the contact happened on.
    pub fn on_hazard_contact(
        &mut self,
        hazard_position: Vec2,
        push_power: f32,
        body: &mut impl PhysicsBody,
        combat: Option<&PlayerCombat>,
    ) -> bool {
        let direction = body.position() - hazard_position;
        self.push(direction, push_power, body, combat)
    }

    /// Disable player-directed movement and shove the body along `direction`.
    /// Meant to be called between ticks, as the hazard system does.
    /// Does nothing while the player is invincible; a missing `combat` counts as not invincible.
    ///
    /// Returns whether the push happened.
    pub fn push(
        &mut self,
        direction: Vec2,
        push_power: f32,
        body: &mut impl PhysicsBody,
        combat: Option<&PlayerCombat>,
    ) -> bool {
        if combat.is_some_and(PlayerCombat::is_invincible) {
            debug!("ignoring knockback while invincible");
            return false;
        }

        self.state.movement_enabled = false;
        body.set_velocity(Vec2::ZERO);
        body.apply_impulse(direction.normalize_or_zero() * push_power);
        // pushes arrive between ticks; the lockout covers the next `knockback` ticks
        self.resets
            .schedule_from_next_tick(MovementReset::EnableMovement, self.lockouts.knockback);

        info!("knocked back along {:?} with power {}", direction, push_power);
        true
    }
}
