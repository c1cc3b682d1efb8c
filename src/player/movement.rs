use bevy::log::{debug, error};
use bevy::math::Vec2;
use bevy::prelude::Component;
use crate::player::{
    Action, ContactFlags, InputSnapshot, InputSource, Jump, MovementParams, MovementState, PlayerControlParams,
};
use crate::util::{Anchor, ContactSensors, DeferredResets, FrameCount, OverlapQuery, PhysicsBody};

/// State changes that happen some fixed time after the action that scheduled them
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MovementReset {
    VerticalDashCooldown,
    /// ends a vertical dash's airtime by zeroing the vertical velocity
    VerticalDashVelocity,
    HorizontalDashCooldown,
    SharedDashLockout,
    WallJump,
    /// ends a knockback
    EnableMovement,
}

/// Timed lockouts, converted from seconds to fixed ticks
#[derive(Debug)]
pub(crate) struct Lockouts {
    wall_jump: FrameCount,
    dash_cooldown: FrameCount,
    vertical_dash: FrameCount,
    shared_dash: FrameCount,
    pub(crate) knockback: FrameCount,
}

/// Drives one player body: senses contacts and inputs, resolves at most one action,
/// then applies running, wall sliding and the velocity clamp.
#[derive(Component, Debug)]
pub struct PlayerMovement {
    params: MovementParams,
    pub(crate) lockouts: Lockouts,
    sensors: ContactSensors,
    pub(crate) resets: DeferredResets<MovementReset>,
    pub(crate) state: MovementState,
}

impl PlayerMovement {
    /// `tick_rate` is the number of [PlayerMovement::tick] calls per second.
    /// Sensors without an anchor are reported here, once, and then behave as if nothing is there.
    pub fn new(params: &PlayerControlParams, tick_rate: f32) -> Self {
        let m = &params.movement;
        let ticks = |secs: f32| FrameCount::from_secs(secs, tick_rate);
        let movement = Self {
            params: *m,
            lockouts: Lockouts {
                wall_jump: ticks(m.wall_jump_lockout),
                dash_cooldown: ticks(m.dash_cooldown),
                vertical_dash: ticks(m.vertical_dash_duration),
                shared_dash: ticks(m.shared_dash_lockout),
                knockback: ticks(params.knockback.lockout),
            },
            sensors: ContactSensors::new(&params.sensors),
            resets: DeferredResets::new(params.stale_resets),
            state: MovementState::default(),
        };
        for anchor in movement.missing_anchors() {
            error!("player has no {:?} check anchor; it will never report contact", anchor);
        }
        movement
    }

    pub fn missing_anchors(&self) -> Vec<Anchor> {
        self.sensors.missing_anchors()
    }

    pub fn state(&self) -> &MovementState {
        &self.state
    }

    pub fn sensors(&self) -> &ContactSensors {
        &self.sensors
    }

    /// Give back every air jump spent since the player last touched the ground or a wall
    pub fn refund_air_jumps(&mut self) {
        self.state.consecutive_air_jumps = 0;
    }

    /// Advance by one fixed tick. Returns the action that was performed, if any.
    pub fn tick(
        &mut self,
        input: &impl InputSource,
        body: &mut impl PhysicsBody,
        world: &impl OverlapQuery,
    ) -> Option<Action> {
        for reset in self.resets.advance() {
            self.apply_reset(reset, body);
        }

        // sense
        let input = InputSnapshot::sample(input);
        let contacts = self.sensors.update(body.position(), world);
        let flags = ContactFlags::derive(contacts, &input, body.velocity());
        self.state.sense(flags, &input);

        // at most one action per tick
        let action = self.state.resolve(&input, self.params.max_air_jumps);
        if let Some(action) = action {
            self.perform(action, body);
        }

        self.slide_on_grabbed_wall(body);
        self.run(input.horizontal, body);
        self.clamp_velocity(body);

        action
    }

    fn perform(&mut self, action: Action, body: &mut impl PhysicsBody) {
        let p = &self.params;
        debug!("performing {:?} (air jumps used: {})", action, self.state.consecutive_air_jumps);
        match action {
            Action::VerticalDash { factor } => {
                body.set_velocity(Vec2::ZERO);
                body.apply_impulse(Vec2::new(0.0, factor * p.dash_power));
                self.state.dashed_since_cooldown = true;
                self.state.vertical_dash_cooling_down = true;
                self.resets.schedule(MovementReset::VerticalDashCooldown, self.lockouts.dash_cooldown);
                self.resets.schedule(MovementReset::VerticalDashVelocity, self.lockouts.vertical_dash);
                self.resets.schedule(MovementReset::SharedDashLockout, self.lockouts.shared_dash);
            }
            Action::HorizontalDash(side) => {
                body.set_velocity(Vec2::ZERO);
                body.apply_impulse(Vec2::new(p.dash_power * side, 0.0));
                self.state.dashed_since_cooldown = true;
                self.state.horizontal_dash_cooling_down = true;
                self.resets.schedule(MovementReset::HorizontalDashCooldown, self.lockouts.dash_cooldown);
                self.resets.schedule(MovementReset::SharedDashLockout, self.lockouts.shared_dash);
            }
            Action::Jump(Jump::Ground) => {
                body.set_velocity(Vec2::ZERO);
                body.apply_impulse(Vec2::new(0.0, p.jump_force));
                self.state.jump_key_consumed = true;
            }
            Action::Jump(Jump::Wall { wall }) => {
                body.set_velocity(Vec2::ZERO);
                // always away from the wall
                let push = Vec2::new(
                    p.wall_jump_horizontal_force * -wall,
                    p.jump_force * p.wall_jump_vertical_multiplier,
                );
                body.apply_impulse(push);
                self.state.wall_jumping = true;
                self.state.jump_key_consumed = true;
                self.resets.schedule(MovementReset::WallJump, self.lockouts.wall_jump);
            }
            Action::Jump(Jump::Air) => {
                let velocity = body.velocity();
                body.set_velocity(Vec2::new(velocity.x, 0.0));
                body.apply_impulse(Vec2::new(0.0, p.jump_force));
                self.state.jump_key_consumed = true;
                self.state.consecutive_air_jumps += 1;
            }
        }
    }

    fn apply_reset(&mut self, reset: MovementReset, body: &mut impl PhysicsBody) {
        match reset {
            MovementReset::VerticalDashCooldown => self.state.vertical_dash_cooling_down = false,
            MovementReset::VerticalDashVelocity => {
                let velocity = body.velocity();
                body.set_velocity(Vec2::new(velocity.x, 0.0));
            }
            MovementReset::HorizontalDashCooldown => self.state.horizontal_dash_cooling_down = false,
            MovementReset::SharedDashLockout => self.state.dashed_since_cooldown = false,
            MovementReset::WallJump => self.state.wall_jumping = false,
            MovementReset::EnableMovement => {
                debug!("knockback over, movement enabled");
                self.state.movement_enabled = true;
            }
        }
    }

    /// Holding onto a wall while moving down replaces the fall with a slow slide
    fn slide_on_grabbed_wall(&self, body: &mut impl PhysicsBody) {
        let contact = &self.state.contact;
        if !contact.grounded && !self.state.wall_jumping && contact.can_slide {
            let velocity = body.velocity();
            body.set_velocity(Vec2::new(velocity.x, self.params.grab_fall_speed));
        }
    }

    fn run(&self, horizontal: f32, body: &mut impl PhysicsBody) {
        if !self.state.wall_jumping && self.state.movement_enabled {
            let velocity = body.velocity();
            body.set_velocity(Vec2::new(horizontal * self.params.move_speed, velocity.y));
        }
    }

    fn clamp_velocity(&self, body: &mut impl PhysicsBody) {
        let velocity = body.velocity();
        let max_x = self.params.max_horizontal_speed;
        body.set_velocity(Vec2::new(
            velocity.x.clamp(-max_x, max_x),
            velocity.y.max(-self.params.max_fall_speed),
        ));
    }
}
