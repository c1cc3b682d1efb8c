use serde::Deserialize;
use std::collections::HashMap;
use std::hash::Hash;

/// Integer value representing a number of frames, or game "ticks".
/// Can be used to represent a duration, or a point on a tick clock.
#[derive(Default, Debug, Copy, Clone, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct FrameCount(pub usize);

impl FrameCount {
	/// Convert a duration in seconds to the nearest whole number of ticks at `tick_rate` Hz.
	/// Negative or non-finite durations count as zero ticks.
	pub fn from_secs(secs: f32, tick_rate: f32) -> Self {
		let ticks = (secs * tick_rate).round();
		if ticks.is_finite() && ticks > 0.0 {
			FrameCount(ticks as usize)
		} else {
			FrameCount(0)
		}
	}

	/// Add one to this counter (will saturate to [usize::MAX])
	pub fn increment(&mut self) {
		self.0 = self.0.saturating_add(1);
	}

	/// Add `other` to this count (will saturate to [usize::MAX])
	pub fn after(self, other: FrameCount) -> FrameCount {
		FrameCount(self.0.saturating_add(other.0))
	}
}

/// What to do with a scheduled reset whose timer was re-armed after it was scheduled.
#[derive(Copy, Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub enum StaleResets {
	/// Only the most recently scheduled reset of each timer fires.
	#[default]
	Discard,

	/// Every scheduled reset fires, even if a newer one replaced it.
	Fire,
}

#[derive(Debug)]
struct PendingReset<K> {
	fire_at: FrameCount,
	key: K,
	generation: u32,
}

/// A per-instance queue of single-shot state resets.
///
/// Each reset is keyed by the logical timer it belongs to. Scheduling the same key again
/// bumps that key's generation, so that (under [StaleResets::Discard]) the earlier entry is
/// dropped instead of firing on top of the newer one.
///
/// The queue has its own tick clock, which only moves when [DeferredResets::advance] is called.
#[derive(Debug)]
pub struct DeferredResets<K> {
	now: FrameCount,
	policy: StaleResets,
	generations: HashMap<K, u32>,
	pending: Vec<PendingReset<K>>,
}

impl<K: Copy + Eq + Hash> DeferredResets<K> {
	pub fn new(policy: StaleResets) -> Self {
		Self {
			now: FrameCount(0),
			policy,
			generations: HashMap::new(),
			pending: Vec::new(),
		}
	}

	/// Schedule `key` to fire `delay` ticks from now.
	/// A zero delay fires on the next call to `advance`.
	pub fn schedule(&mut self, key: K, delay: FrameCount) {
		let generation = self.generations.entry(key).or_insert(0);
		*generation = generation.wrapping_add(1);
		self.pending.push(PendingReset {
			fire_at: self.now.after(delay),
			key,
			generation: *generation,
		});
	}

	/// Schedule `key` from outside of a tick, counting `delay` from the tick that comes next.
	/// The clock only moves inside `advance`, so between ticks it still reads the previous tick.
	pub fn schedule_from_next_tick(&mut self, key: K, delay: FrameCount) {
		self.schedule(key, delay.after(FrameCount(1)));
	}

	/// Check whether a reset for `key` is still waiting to fire
	#[cfg(test)]
	pub fn pending(&self, key: K) -> bool {
		self.pending
			.iter()
			.any(|p| p.key == key && self.is_current(p))
	}

	/// Move the clock forward by one tick, and return the keys whose resets are due,
	/// in the order they were scheduled.
	pub fn advance(&mut self) -> Vec<K> {
		self.now.increment();
		let now = self.now;

		let (due, waiting): (Vec<_>, Vec<_>) = self.pending.drain(..).partition(|p| p.fire_at <= now);
		self.pending = waiting;

		due.into_iter()
			.filter(|p| self.is_current(p))
			.map(|p| p.key)
			.collect()
	}

	fn is_current(&self, reset: &PendingReset<K>) -> bool {
		match self.policy {
			StaleResets::Fire => true,
			StaleResets::Discard => self.generations.get(&reset.key) == Some(&reset.generation),
		}
	}
}
