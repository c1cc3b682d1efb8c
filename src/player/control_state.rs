use bevy::math::Vec2;
use crate::player::InputSnapshot;
use crate::util::{Contacts, Side, SideMap};

/// Scale applied to `dash_power` for a downward dash.
/// There is no upward dash, so anything other than "down" scales to zero.
pub const VERTICAL_DASH_FACTOR: f32 = -0.125;

pub fn vertical_dash_factor(down_held: bool) -> f32 {
    if down_held { VERTICAL_DASH_FACTOR } else { 0.0 }
}

/// Contact and motion flags. Recomputed from scratch every tick; nothing here carries over.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ContactFlags {
    pub grounded: bool,
    pub touching_wall: SideMap<bool>,

    /// touching a wall while holding the direction key towards it
    pub grabbing_wall: SideMap<bool>,

    /// grabbing a wall while moving downward
    pub can_slide: bool,

    /// moving downward without holding onto a wall
    pub falling: bool,

    /// neither on the ground nor holding onto a wall
    pub airborne: bool,
}

impl ContactFlags {
    pub fn derive(contacts: Contacts, input: &InputSnapshot, velocity: Vec2) -> Self {
        let grabbing_wall = SideMap {
            left: contacts.walls.left && input.left,
            right: contacts.walls.right && input.right,
        };
        let grabbing = grabbing_wall.any();
        let moving_down = velocity.y < 0.0;
        ContactFlags {
            grounded: contacts.grounded,
            touching_wall: contacts.walls,
            grabbing_wall,
            can_slide: moving_down && grabbing,
            falling: moving_down && !grabbing,
            airborne: !contacts.grounded && !grabbing,
        }
    }

    pub fn touching_any_wall(&self) -> bool {
        self.touching_wall.any()
    }

    pub fn grabbing_any_wall(&self) -> bool {
        self.grabbing_wall.any()
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Jump {
    /// straight up, from the ground
    Ground,

    /// away from the wall on `wall`
    Wall { wall: Side },

    /// extra jump while airborne; keeps horizontal momentum
    Air,
}

/// The single top-level action a tick can resolve to
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Action {
    VerticalDash { factor: f32 },
    HorizontalDash(Side),
    Jump(Jump),
}

#[derive(Debug)]
pub struct MovementState {
    /// what the sensors and inputs said during the latest tick
    pub contact: ContactFlags,

    /// set by a wall jump; suppresses running and wall sliding until its lockout ends
    pub wall_jumping: bool,

    /// cleared while being knocked back; nothing player-directed happens while it is false
    pub movement_enabled: bool,

    /// set when a jump uses up the current press of the jump key, cleared when the key is released
    pub jump_key_consumed: bool,

    /// air jumps spent since last touching the ground or grabbing a wall
    pub consecutive_air_jumps: u8,

    /// lockout shared by both dash axes
    pub dashed_since_cooldown: bool,
    pub horizontal_dash_cooling_down: bool,
    pub vertical_dash_cooling_down: bool,

    /// raw input axes from the latest tick
    pub look: Vec2,

    /// last horizontal direction the player pointed at
    pub facing: Side,
}

impl Default for MovementState {
    fn default() -> Self {
        Self {
            contact: ContactFlags::default(),
            wall_jumping: false,
            movement_enabled: true,
            jump_key_consumed: false,
            consecutive_air_jumps: 0,
            dashed_since_cooldown: false,
            horizontal_dash_cooling_down: false,
            vertical_dash_cooling_down: false,
            look: Vec2::ZERO,
            facing: Side::Right,
        }
    }
}

impl MovementState {
    /// Take in this tick's contact flags and inputs
    pub fn sense(&mut self, contact: ContactFlags, input: &InputSnapshot) {
        self.contact = contact;

        self.look = Vec2::new(input.horizontal, input.vertical);
        if let Some(side) = Side::from_axis(input.horizontal) {
            self.facing = side;
        }

        if contact.grounded || contact.grabbing_any_wall() {
            self.consecutive_air_jumps = 0;
        }

        // re-arm the jump once the key is let go
        if !input.up {
            self.jump_key_consumed = false;
        }
    }

    /// Decide which action (if any) this tick resolves to.
    /// Priority is vertical dash, then horizontal dash, then jump.
    pub fn resolve(&self, input: &InputSnapshot, max_air_jumps: u8) -> Option<Action> {
        if !self.movement_enabled {
            return None;
        }

        let dash_ready = !self.dashed_since_cooldown && !self.wall_jumping && input.dash;

        if dash_ready && input.down && !self.vertical_dash_cooling_down {
            return Some(Action::VerticalDash {
                factor: vertical_dash_factor(input.down),
            });
        }

        if dash_ready && (input.left || input.right) && !self.horizontal_dash_cooling_down {
            // left wins when both are held
            let side = if input.left { Side::Left } else { Side::Right };
            return Some(Action::HorizontalDash(side));
        }

        if !input.up || self.jump_key_consumed || self.wall_jumping {
            return None;
        }

        let contact = &self.contact;
        if contact.grounded {
            Some(Action::Jump(Jump::Ground))
        } else if contact.touching_wall.right {
            Some(Action::Jump(Jump::Wall { wall: Side::Right }))
        } else if contact.touching_wall.left {
            Some(Action::Jump(Jump::Wall { wall: Side::Left }))
        } else if contact.airborne && self.consecutive_air_jumps < max_air_jumps {
            Some(Action::Jump(Jump::Air))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contacts(grounded: bool, left: bool, right: bool) -> Contacts {
        Contacts {
            grounded,
            walls: SideMap { left, right },
        }
    }

    #[test]
    fn grabbing_needs_key_towards_wall() {
        let input = InputSnapshot {
            left: true,
            horizontal: -1.0,
            ..Default::default()
        };
        let flags = ContactFlags::derive(contacts(false, true, false), &input, Vec2::new(0.0, -3.0));
        assert!(flags.grabbing_wall.left);
        assert!(flags.can_slide);
        assert!(!flags.falling);
        assert!(!flags.airborne);

        let flags = ContactFlags::derive(contacts(false, false, true), &input, Vec2::new(0.0, -3.0));
        assert!(flags.touching_any_wall());
        assert!(!flags.grabbing_any_wall());
        assert!(flags.falling);
        assert!(flags.airborne);
    }

    #[test]
    fn dash_takes_priority_over_jump() {
        let mut state = MovementState::default();
        let input = InputSnapshot {
            up: true,
            right: true,
            dash: true,
            ..Default::default()
        };
        state.sense(ContactFlags::derive(contacts(true, false, false), &input, Vec2::ZERO), &input);
        assert_eq!(state.resolve(&input, 1), Some(Action::HorizontalDash(Side::Right)));

        let input = InputSnapshot { down: true, ..input };
        assert_eq!(
            state.resolve(&input, 1),
            Some(Action::VerticalDash {
                factor: VERTICAL_DASH_FACTOR
            })
        );
    }

    #[test]
    fn left_wins_horizontal_dash_tie() {
        let state = MovementState::default();
        let input = InputSnapshot {
            left: true,
            right: true,
            dash: true,
            ..Default::default()
        };
        assert_eq!(state.resolve(&input, 1), Some(Action::HorizontalDash(Side::Left)));
    }

    #[test]
    fn vertical_dash_only_goes_down() {
        assert_eq!(vertical_dash_factor(true), -0.125);
        assert_eq!(vertical_dash_factor(false), 0.0);
    }

    #[test]
    fn right_wall_wins_when_touching_both() {
        let mut state = MovementState::default();
        let input = InputSnapshot {
            up: true,
            ..Default::default()
        };
        state.sense(ContactFlags::derive(contacts(false, true, true), &input, Vec2::ZERO), &input);
        assert_eq!(
            state.resolve(&input, 1),
            Some(Action::Jump(Jump::Wall { wall: Side::Right }))
        );
    }

    #[test]
    fn disabled_movement_resolves_nothing() {
        let state = MovementState {
            movement_enabled: false,
            ..Default::default()
        };
        let input = InputSnapshot {
            right: true,
            dash: true,
            ..Default::default()
        };
        assert_eq!(state.resolve(&input, 1), None);
    }

    #[test]
    fn release_rearms_jump_and_ground_refunds_air_jumps() {
        let mut state = MovementState {
            jump_key_consumed: true,
            consecutive_air_jumps: 1,
            ..Default::default()
        };
        let held = InputSnapshot {
            up: true,
            ..Default::default()
        };
        state.sense(ContactFlags::derive(contacts(false, false, false), &held, Vec2::ZERO), &held);
        assert!(state.jump_key_consumed);
        assert_eq!(state.consecutive_air_jumps, 1);

        let released = InputSnapshot::default();
        state.sense(ContactFlags::derive(contacts(true, false, false), &released, Vec2::ZERO), &released);
        assert!(!state.jump_key_consumed);
        assert_eq!(state.consecutive_air_jumps, 0);
    }
}
