use bevy::prelude::Vec2;
use std::ops::{Index, IndexMut, Mul, Neg};

/// A horizontal side, relative to the player
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum Side {
	Left,
	Right,
}

impl Side {
	/// Left is checked first wherever both sides could apply
	pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

	/// The side an axis value points to, or `None` for a centered axis
	pub fn from_axis(value: f32) -> Option<Side> {
		if value < 0.0 {
			Some(Side::Left)
		} else if value > 0.0 {
			Some(Side::Right)
		} else {
			None
		}
	}
}

impl Neg for Side {
	type Output = Side;
	fn neg(self) -> Side {
		match self {
			Side::Left => Side::Right,
			Side::Right => Side::Left,
		}
	}
}

impl From<Side> for f32 {
	fn from(side: Side) -> f32 {
		match side {
			Side::Left => -1.0,
			Side::Right => 1.0,
		}
	}
}

impl Mul<Side> for f32 {
	type Output = f32;
	fn mul(self, side: Side) -> f32 {
		self * f32::from(side)
	}
}

impl Mul<Side> for Vec2 {
	type Output = Vec2;
	fn mul(self, side: Side) -> Vec2 {
		self * f32::from(side)
	}
}

/// One value per [Side]
#[derive(Default, Debug, Copy, Clone, Eq, PartialEq)]
pub struct SideMap<A> {
	pub left: A,
	pub right: A,
}

impl SideMap<bool> {
	pub fn any(&self) -> bool {
		self.left || self.right
	}
}

impl<A> Index<Side> for SideMap<A> {
	type Output = A;
	fn index(&self, side: Side) -> &A {
		match side {
			Side::Left => &self.left,
			Side::Right => &self.right,
		}
	}
}

impl<A> IndexMut<Side> for SideMap<A> {
	fn index_mut(&mut self, side: Side) -> &mut A {
		match side {
			Side::Left => &mut self.left,
			Side::Right => &mut self.right,
		}
	}
}
