use crate::player::{KeyBindings, KeyboardSource, Player, PlayerCombat, PlayerControlParams, PlayerMovement};
use crate::util::RapierBody;
use bevy::asset::Assets;
use bevy::input::ButtonInput;
use bevy::log::{debug, info};
use bevy::math::Vec2;
use bevy::prelude::{default, Commands, Entity, Fixed, Gizmos, KeyCode, Query, Res, Time, Transform, Without};
use bevy_rapier2d::dynamics::{ExternalImpulse, Velocity};
use bevy_rapier2d::geometry::{Collider, CollisionGroups, Group};
use bevy_rapier2d::pipeline::{QueryFilter, QueryFilterFlags};
use bevy_rapier2d::plugin::ReadRapierContext;

/// Attaches [PlayerMovement] and [PlayerCombat] to each [Player] once its params have loaded
pub fn init_player_system(
    mut commands: Commands,
    players: Query<(Entity, &Player), Without<PlayerMovement>>,
    control_params: Res<Assets<PlayerControlParams>>,
    fixed_time: Res<Time<Fixed>>,
) {
    let tick_rate = 1.0 / fixed_time.timestep().as_secs_f32();
    for (player_entity, player) in &players {
        if let Some(params) = control_params.get(player.0.id()) {
            info!("player params loaded, running movement at {} ticks/sec", tick_rate);
            commands.entity(player_entity).insert((
                PlayerMovement::new(params, tick_rate),
                PlayerCombat::new(&params.combat, params.stale_resets, tick_rate),
            ));
        } else {
            debug!("player params not loaded yet");
        }
    }
}

/// Fires combat timers and re-derives whether the player is alive
pub fn combat_refresh_system(mut players: Query<&mut PlayerCombat>) {
    for mut combat in &mut players {
        combat.refresh();
    }
}

pub fn player_movement_system(
    kb: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    mut player_query: Query<(
        Entity,
        &mut PlayerMovement,
        &mut Velocity,
        &mut ExternalImpulse,
        &Transform,
    )>,
    rapier_context: ReadRapierContext,
    mut gizmos: Gizmos,
) {
    let rapier_context = rapier_context.single();
    let input = KeyboardSource {
        kb: &kb,
        bindings: &bindings,
    };

    for (player_entity, mut movement, mut velocity, mut impulse, player_transform) in &mut player_query {
        let player_center = player_transform.translation.truncate();

        // box overlap against the requested collision groups, ignoring the player and any sensors
        let world = |center: Vec2, half_extents: Vec2, layers: u32| {
            rapier_context
                .query_pipeline
                .intersection_with_shape(
                    rapier_context.colliders,
                    rapier_context.rigidbody_set,
                    center,
                    0.0,
                    &Collider::cuboid(half_extents.x, half_extents.y),
                    QueryFilter {
                        flags: QueryFilterFlags::EXCLUDE_SENSORS,
                        groups: Some(CollisionGroups::new(Group::ALL, Group::from_bits_truncate(layers))),
                        exclude_collider: Some(player_entity),
                        exclude_rigid_body: Some(player_entity),
                        ..default()
                    },
                )
                .is_some()
        };

        let mut body = RapierBody {
            position: player_center,
            velocity: &mut velocity,
            impulse: &mut impulse,
        };
        if let Some(action) = movement.tick(&input, &mut body, &world) {
            debug!("player at {:?} resolved {:?}", player_center, action);
        }

        movement.sensors().draw(player_center, &mut gizmos);
    }
}
