use crate::player::Player;
use bevy::math::{Vec2, Vec3};
use bevy::prelude::{Camera2d, Query, Res, Resource, Transform, With, Without};

/// How the camera trails the player
#[derive(Resource, Debug, Clone)]
pub struct CameraFollow {
	/// how far above the player the camera sits
	pub vertical_offset: f32,
	/// the camera never rises above this height
	pub max_height: f32,
}

impl Default for CameraFollow {
	fn default() -> Self {
		Self {
			vertical_offset: 2.0,
			max_height: 13.5,
		}
	}
}

/// Where the camera should be, given the player's position and the camera's current translation.
/// Depth is left alone.
pub fn follow_position(player: Vec2, current: Vec3, follow: &CameraFollow) -> Vec3 {
	let y = (player.y + follow.vertical_offset).min(follow.max_height);
	Vec3::new(player.x, y, current.z)
}

pub fn camera_follow_system(
	follow: Res<CameraFollow>,
	players: Query<&Transform, With<Player>>,
	mut cameras: Query<&mut Transform, (With<Camera2d>, Without<Player>)>,
) {
	let Ok(player_transform) = players.get_single() else {
		return;
	};
	let player = player_transform.translation.truncate();
	for mut camera_transform in &mut cameras {
		camera_transform.translation = follow_position(player, camera_transform.translation, &follow);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn follows_player_with_offset() {
		let follow = CameraFollow::default();
		let next = follow_position(Vec2::new(4.0, 1.0), Vec3::new(0.0, 0.0, 10.0), &follow);
		assert_eq!(next, Vec3::new(4.0, 3.0, 10.0));
	}

	#[test]
	fn stops_rising_at_max_height() {
		let follow = CameraFollow::default();
		let next = follow_position(Vec2::new(-2.0, 40.0), Vec3::new(0.0, 0.0, 1.0), &follow);
		assert_eq!(next, Vec3::new(-2.0, 13.5, 1.0));
	}
}
