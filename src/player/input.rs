use bevy::input::ButtonInput;
use bevy::prelude::{KeyCode, Resource};

/// The logical keys the movement cares about
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Key {
	/// jump
	Up,
	/// combined with `DashModifier` for a downward dash
	Down,
	Left,
	Right,
	DashModifier,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InputAxis {
	Horizontal,
	Vertical,
}

/// Source of the player's inputs, e.g. a keyboard
pub trait InputSource {
	fn is_held(&self, key: Key) -> bool;

	/// Value in `[-1, 1]`
	fn axis(&self, axis: InputAxis) -> f32;
}

/// Everything the movement reads from an [InputSource] during one tick
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct InputSnapshot {
	pub horizontal: f32,
	pub vertical: f32,
	pub up: bool,
	pub down: bool,
	pub left: bool,
	pub right: bool,
	pub dash: bool,
}

impl InputSnapshot {
	pub fn sample(source: &impl InputSource) -> Self {
		Self {
			horizontal: source.axis(InputAxis::Horizontal).clamp(-1.0, 1.0),
			vertical: source.axis(InputAxis::Vertical).clamp(-1.0, 1.0),
			up: source.is_held(Key::Up),
			down: source.is_held(Key::Down),
			left: source.is_held(Key::Left),
			right: source.is_held(Key::Right),
			dash: source.is_held(Key::DashModifier),
		}
	}
}

impl InputSource for InputSnapshot {
	fn is_held(&self, key: Key) -> bool {
		match key {
			Key::Up => self.up,
			Key::Down => self.down,
			Key::Left => self.left,
			Key::Right => self.right,
			Key::DashModifier => self.dash,
		}
	}

	fn axis(&self, axis: InputAxis) -> f32 {
		match axis {
			InputAxis::Horizontal => self.horizontal,
			InputAxis::Vertical => self.vertical,
		}
	}
}

/// Physical keys for each logical [Key]. Any of the listed keys counts as holding it.
#[derive(Resource, Debug, Clone)]
pub struct KeyBindings {
	pub up: Vec<KeyCode>,
	pub down: Vec<KeyCode>,
	pub left: Vec<KeyCode>,
	pub right: Vec<KeyCode>,
	pub dash: Vec<KeyCode>,
}

impl Default for KeyBindings {
	fn default() -> Self {
		Self {
			up: vec![KeyCode::KeyW, KeyCode::ArrowUp],
			down: vec![KeyCode::KeyS, KeyCode::ArrowDown],
			left: vec![KeyCode::KeyA, KeyCode::ArrowLeft],
			right: vec![KeyCode::KeyD, KeyCode::ArrowRight],
			dash: vec![KeyCode::KeyB],
		}
	}
}

impl KeyBindings {
	fn codes(&self, key: Key) -> &[KeyCode] {
		match key {
			Key::Up => &self.up,
			Key::Down => &self.down,
			Key::Left => &self.left,
			Key::Right => &self.right,
			Key::DashModifier => &self.dash,
		}
	}
}

/// [InputSource] reading Bevy's keyboard state through a set of [KeyBindings]
pub struct KeyboardSource<'a> {
	pub kb: &'a ButtonInput<KeyCode>,
	pub bindings: &'a KeyBindings,
}

impl InputSource for KeyboardSource<'_> {
	fn is_held(&self, key: Key) -> bool {
		self.kb.any_pressed(self.bindings.codes(key).iter().copied())
	}

	fn axis(&self, axis: InputAxis) -> f32 {
		let (negative, positive) = match axis {
			InputAxis::Horizontal => (Key::Left, Key::Right),
			InputAxis::Vertical => (Key::Down, Key::Up),
		};
		let value = |key| if self.is_held(key) { 1.0 } else { 0.0 };
		value(positive) - value(negative)
	}
}
