use bevy::color::Color;
use bevy::math::{Isometry2d, Vec2};
use bevy::prelude::Gizmos;
use serde::Deserialize;
use crate::util::{OverlapQuery, Side, SideMap};

/// Where the contact sensors sit, relative to the center of the player's body.
///
/// Each anchor is optional; a sensor without an anchor never reports contact.
#[derive(Copy, Clone, Debug, Deserialize)]
pub struct ContactSensorParams {
	pub ground: Option<Vec2>,
	pub wall_left: Option<Vec2>,
	pub wall_right: Option<Vec2>,

	/// Half the width and height of the box tested at each anchor
	pub half_extents: Vec2,

	/// Collision group bits that count as "ground" (walls included)
	pub ground_layers: u32,
}

impl Default for ContactSensorParams {
	fn default() -> Self {
		Self {
			ground: Some(Vec2::new(0.0, -1.0)),
			wall_left: Some(Vec2::new(-0.55, 0.0)),
			wall_right: Some(Vec2::new(0.55, 0.0)),
			half_extents: Vec2::new(0.05, 0.5),
			ground_layers: 0b0001,
		}
	}
}

/// Identifies one of the sensors, mostly for diagnostics
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Anchor {
	Ground,
	Wall(Side),
}

/// What the sensors found during the latest update
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Contacts {
	pub grounded: bool,
	pub walls: SideMap<bool>,
}

/// A ground sensor below the player, and a wall sensor on each side.
#[derive(Debug)]
pub struct ContactSensors {
	ground: Option<Vec2>,
	walls: SideMap<Option<Vec2>>,
	half_extents: Vec2,
	layers: u32,
	latest: Contacts,
}

impl ContactSensors {
	pub fn new(params: &ContactSensorParams) -> Self {
		Self {
			ground: params.ground,
			walls: SideMap {
				left: params.wall_left,
				right: params.wall_right,
			},
			half_extents: params.half_extents,
			layers: params.ground_layers,
			latest: Contacts::default(),
		}
	}

	/// Sensors that were configured without an anchor
	pub fn missing_anchors(&self) -> Vec<Anchor> {
		let mut missing = Vec::new();
		if self.ground.is_none() {
			missing.push(Anchor::Ground);
		}
		for side in Side::BOTH {
			if self.walls[side].is_none() {
				missing.push(Anchor::Wall(side));
			}
		}
		missing
	}

	/// Re-test every sensor around a body centered at `center`
	pub fn update(&mut self, center: Vec2, world: &impl OverlapQuery) -> Contacts {
		let test = |anchor: Option<Vec2>| {
			anchor.is_some_and(|offset| world.overlap_box(center + offset, self.half_extents, self.layers))
		};
		let contacts = Contacts {
			grounded: test(self.ground),
			walls: SideMap {
				left: test(self.walls.left),
				right: test(self.walls.right),
			},
		};
		self.latest = contacts;
		contacts
	}

	pub fn latest(&self) -> Contacts {
		self.latest
	}

	/// Uses the given `gizmos` to draw each sensor box, highlighting the ones in contact
	pub fn draw(&self, center: Vec2, gizmos: &mut Gizmos) {
		let hit = Color::srgb(0.8, 0.5, 0.0);
		let miss = Color::srgb(0., 0., 1.);
		let mut draw_one = |anchor: Option<Vec2>, touching: bool| {
			if let Some(offset) = anchor {
				let color = if touching { hit } else { miss };
				gizmos.rect_2d(Isometry2d::from_translation(center + offset), self.half_extents * 2.0, color);
			}
		};
		draw_one(self.ground, self.latest.grounded);
		for side in Side::BOTH {
			draw_one(self.walls[side], self.latest.walls[side]);
		}
	}
}
