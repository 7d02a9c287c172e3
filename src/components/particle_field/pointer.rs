//! Pointer/touch focus tracking.
//!
//! Raw input events only ever write the single [`PointerTarget`] held by
//! [`PointerTracker`]; the particle pool is never touched from a handler.

/// Where the user's pointer or primary touch currently is.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PointerTarget {
	/// No pointer focus. Never within reach of any particle.
	#[default]
	Inactive,
	/// Last known position in logical pixels (may lie outside the surface).
	At {
		/// Horizontal position.
		x: f64,
		/// Vertical position.
		y: f64,
	},
}

impl PointerTarget {
	/// Distance from `(x, y)` to the target; infinite when inactive so every
	/// threshold comparison fails.
	pub fn distance_from(&self, x: f64, y: f64) -> f64 {
		match *self {
			PointerTarget::Inactive => f64::INFINITY,
			PointerTarget::At { x: px, y: py } => {
				let (dx, dy) = (x - px, y - py);
				(dx * dx + dy * dy).sqrt()
			}
		}
	}

	/// The target's coordinates, `None` when inactive.
	pub fn position(&self) -> Option<(f64, f64)> {
		match *self {
			PointerTarget::Inactive => None,
			PointerTarget::At { x, y } => Some((x, y)),
		}
	}
}

/// Identifies one scheduled touch-end fade.
///
/// A fade only clears the target if no newer pointer activity happened since
/// it was scheduled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FadeToken(u64);

/// Throttled writer for the pointer target.
#[derive(Clone, Debug)]
pub struct PointerTracker {
	target: PointerTarget,
	throttle_ms: f64,
	last_update_ms: Option<f64>,
	generation: u64,
}

impl PointerTracker {
	/// Inactive tracker accepting at most one update per `throttle_ms`.
	pub fn new(throttle_ms: f64) -> Self {
		Self {
			target: PointerTarget::Inactive,
			throttle_ms,
			last_update_ms: None,
			generation: 0,
		}
	}

	/// Current target.
	pub fn target(&self) -> PointerTarget {
		self.target
	}

	/// Moves the target to `(x, y)` unless the previous accepted update was
	/// less than the throttle interval ago. Returns whether it was accepted.
	pub fn move_to(&mut self, x: f64, y: f64, now_ms: f64) -> bool {
		if let Some(last) = self.last_update_ms {
			if now_ms - last < self.throttle_ms {
				return false;
			}
		}
		self.last_update_ms = Some(now_ms);
		self.generation = self.generation.wrapping_add(1);
		self.target = PointerTarget::At { x, y };
		true
	}

	/// Pointer left the document: drop focus immediately.
	pub fn leave(&mut self) {
		self.generation = self.generation.wrapping_add(1);
		self.target = PointerTarget::Inactive;
	}

	/// Touch lifted. The target stays put until [`finish_fade`] is called
	/// with the returned token after the fade delay.
	///
	/// [`finish_fade`]: PointerTracker::finish_fade
	pub fn begin_fade(&mut self) -> FadeToken {
		FadeToken(self.generation)
	}

	/// Completes a fade. Stale tokens (newer input arrived) are ignored.
	pub fn finish_fade(&mut self, token: FadeToken) -> bool {
		if token.0 != self.generation {
			return false;
		}
		self.target = PointerTarget::Inactive;
		true
	}
}
