mod camera;
mod hazard;
mod player;
mod util;

use crate::camera::{camera_follow_system, CameraFollow};
use crate::hazard::{hazard_contact_system, Hazard};
use crate::player::{
	combat_refresh_system, init_player_system, player_movement_system, KeyBindings, Player, PlayerAssetLoader,
	PlayerCombat, PlayerControlParams, PlayerMovement,
};
use bevy::prelude::*;
use bevy::render::camera::ScalingMode;
use bevy_rapier2d::prelude::*;

/// Collision group of everything the contact sensors treat as ground or wall
const GROUND_GROUP: Group = Group::GROUP_1;
const PLAYER_GROUP: Group = Group::GROUP_2;
const HAZARD_GROUP: Group = Group::GROUP_3;

fn main() {
	App::new()
		// baseline bevy stuff
		.add_plugins(DefaultPlugins)
		.insert_resource(Time::<Fixed>::from_hz(60.))
		//
		// player params are a RON asset
		.init_asset::<PlayerControlParams>()
		.init_asset_loader::<PlayerAssetLoader>()
		.init_resource::<KeyBindings>()
		.init_resource::<CameraFollow>()
		//
		.add_systems(Startup, setup_camera)
		.add_systems(Startup, setup_player)
		.add_systems(Startup, setup_platforms)
		.add_systems(
			FixedUpdate,
			(
				init_player_system,
				combat_refresh_system,
				hazard_contact_system,
				player_movement_system,
				status_text_system,
			)
				.chain(),
		)
		.add_systems(Update, camera_follow_system)
		//
		// rapier physics
		//
		.insert_resource(TimestepMode::Fixed {
			dt: 1. / 60.,
			substeps: 1,
		})
		.add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule())
		.add_plugins(RapierDebugRenderPlugin::default())
		.run();
}

fn setup_camera(mut commands: Commands) {
	commands.spawn((
		Camera2d,
		Transform::from_xyz(0.0, 2.0, 1.0),
		OrthographicProjection {
			scaling_mode: ScalingMode::AutoMin {
				min_width: 32.,
				min_height: 18.,
			},
			..OrthographicProjection::default_2d()
		},
	));
}

#[derive(Component)]
struct Platform;

struct WallArgs {
	color: Color,
	pos: Vec2,
	size: Vec2,
}
impl WallArgs {
	fn spawn(self, commands: &mut Commands) {
		let WallArgs { color, pos, size } = self;
		commands.spawn((
			Platform,
			RigidBody::Fixed,
			Sprite::from_color(color, size),
			Collider::cuboid(size.x * 0.5, size.y * 0.5),
			CollisionGroups::new(GROUND_GROUP, Group::ALL),
			Transform::from_xyz(pos.x, pos.y, 0.0),
		));
	}
}

struct HazardArgs {
	pos: Vec2,
	size: Vec2,
	hazard: Hazard,
}
impl HazardArgs {
	fn spawn(self, commands: &mut Commands) {
		let HazardArgs { pos, size, hazard } = self;
		commands.spawn((
			hazard,
			Sprite::from_color(Color::srgb(0.85, 0.1, 0.1), size),
			Collider::cuboid(size.x * 0.5, size.y * 0.5),
			Sensor,
			ActiveEvents::COLLISION_EVENTS,
			CollisionGroups::new(HAZARD_GROUP, PLAYER_GROUP),
			Transform::from_xyz(pos.x, pos.y, 0.0),
		));
	}
}

fn setup_platforms(mut commands: Commands) {
	let ground = Color::srgb(0.15, 0.8, 0.25);
	let wall = Color::srgb(0.15, 0.5, 0.15);

	// floor
	WallArgs {
		color: ground,
		pos: Vec2::new(0., -5.),
		size: Vec2::new(40.0, 2.0),
	}
	.spawn(&mut commands);

	// ledge
	WallArgs {
		color: ground,
		pos: Vec2::new(6.0, 1.0),
		size: Vec2::new(6.0, 0.5),
	}
	.spawn(&mut commands);

	// west wall
	WallArgs {
		color: wall,
		pos: Vec2::new(-19., 6.),
		size: Vec2::new(2.0, 24.0),
	}
	.spawn(&mut commands);

	// east wall
	WallArgs {
		color: wall,
		pos: Vec2::new(19., 6.),
		size: Vec2::new(2.0, 24.0),
	}
	.spawn(&mut commands);

	// a pillar to wall jump between
	WallArgs {
		color: wall,
		pos: Vec2::new(-13., 2.),
		size: Vec2::new(1.0, 10.0),
	}
	.spawn(&mut commands);

	// something that pushes the player around
	HazardArgs {
		pos: Vec2::new(-6.0, -3.5),
		size: Vec2::new(1.0, 1.0),
		hazard: Hazard {
			contact_damage: 1,
			..default()
		},
	}
	.spawn(&mut commands);

	// and one that only pushes
	HazardArgs {
		pos: Vec2::new(12.0, -3.5),
		size: Vec2::new(1.0, 1.0),
		hazard: Hazard::default(),
	}
	.spawn(&mut commands);
}

#[derive(Component)]
struct PlayerStatusText;

fn setup_player(mut commands: Commands, asset_server: Res<AssetServer>) {
	commands.spawn((
		Player(asset_server.load("player.ron")),
		Sprite::from_color(Color::srgb(1., 0.5, 0.), Vec2::new(1.0, 2.0)),
		Collider::cuboid(0.5, 1.0),
		ColliderMassProperties::Mass(1.0),
		Friction {
			coefficient: 0.0,
			combine_rule: CoefficientCombineRule::Min,
		},
		RigidBody::Dynamic,
		LockedAxes::ROTATION_LOCKED,
		Ccd::enabled(),
		CollisionGroups::new(PLAYER_GROUP, Group::ALL),
		Transform::from_xyz(0., 0., 0.),
	));

	// Debug text for player state
	commands.spawn((
		PlayerStatusText,
		Text::new("loading player..."),
		TextLayout::new_with_justify(JustifyText::Right),
		Node {
			position_type: PositionType::Absolute,
			top: Val::Px(10.0),
			right: Val::Px(10.0),
			..default()
		},
	));
}

fn status_text_system(
	players: Query<(&PlayerMovement, Option<&PlayerCombat>, &Velocity)>,
	mut status_text_query: Query<&mut Text, With<PlayerStatusText>>,
) {
	let Ok(mut status_text) = status_text_query.get_single_mut() else {
		return;
	};
	let Ok((movement, combat, velocity)) = players.get_single() else {
		return;
	};

	let state = movement.state();
	let contacts = movement.sensors().latest();
	let health = match combat {
		Some(combat) if combat.is_alive() => format!("Health: {}/{}", combat.health(), combat.max_health()),
		Some(combat) => format!("Health: {}/{} (dead)", combat.health(), combat.max_health()),
		None => "Health: -".to_string(),
	};
	status_text.0 = format!(
		"{}\nvx: {:.2}\nvy: {:.2}\ngrounded: {}\nwalls: {} {}\nair jumps: {}\nmovement: {}",
		health,
		velocity.linvel.x,
		velocity.linvel.y,
		contacts.grounded,
		if contacts.walls.left { "L" } else { "-" },
		if contacts.walls.right { "R" } else { "-" },
		state.consecutive_air_jumps,
		if state.movement_enabled { "enabled" } else { "knocked back" },
	);
}
