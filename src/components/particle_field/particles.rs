//! The drifting particle pool.

use std::f64::consts::TAU;

/// A single drifting point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
	/// Horizontal position in logical pixels.
	pub x: f64,
	/// Vertical position in logical pixels.
	pub y: f64,
	/// Horizontal velocity, logical pixels per frame.
	pub vx: f64,
	/// Vertical velocity, logical pixels per frame.
	pub vy: f64,
}

impl Particle {
	/// Places a particle uniformly inside `width` x `height`, heading in a
	/// uniformly random direction at `speed`.
	///
	/// `rng` must yield values in `[0, 1)`.
	pub fn random(width: f64, height: f64, speed: f64, rng: &mut impl FnMut() -> f64) -> Self {
		let x = rng() * width;
		let y = rng() * height;
		let angle = rng() * TAU;
		Self {
			x,
			y,
			vx: angle.cos() * speed,
			vy: angle.sin() * speed,
		}
	}

	/// Euclidean distance to `(x, y)`.
	pub fn distance_to(&self, x: f64, y: f64) -> f64 {
		let (dx, dy) = (self.x - x, self.y - y);
		(dx * dx + dy * dy).sqrt()
	}

	/// Moves one frame forward and bounces off the box edges.
	///
	/// Each axis is handled independently: leaving `[0, bound]` flips that
	/// axis' velocity and clamps the coordinate back onto the edge.
	fn advance(&mut self, width: f64, height: f64) {
		self.x += self.vx;
		self.y += self.vy;

		if self.x < 0.0 || self.x > width {
			self.vx = -self.vx;
			self.x = self.x.clamp(0.0, width);
		}
		if self.y < 0.0 || self.y > height {
			self.vy = -self.vy;
			self.y = self.y.clamp(0.0, height);
		}
	}
}

/// Fixed-size pool of particles bouncing around a rectangle.
#[derive(Clone, Debug, Default)]
pub struct ParticleSystem {
	/// The pool, in seeding order.
	pub particles: Vec<Particle>,
	width: f64,
	height: f64,
}

impl ParticleSystem {
	/// Seeds `count` particles over `width` x `height`.
	pub fn new(
		count: usize,
		speed: f64,
		width: f64,
		height: f64,
		rng: &mut impl FnMut() -> f64,
	) -> Self {
		let mut system = Self::default();
		system.reseed(count, speed, width, height, rng);
		system
	}

	/// Throws away every particle and scatters `count` fresh ones over the
	/// new bounds. Used on resize instead of rescaling positions.
	pub fn reseed(
		&mut self,
		count: usize,
		speed: f64,
		width: f64,
		height: f64,
		rng: &mut impl FnMut() -> f64,
	) {
		self.width = width.max(0.0);
		self.height = height.max(0.0);
		self.particles.clear();
		self.particles.reserve(count);
		for _ in 0..count {
			self.particles
				.push(Particle::random(self.width, self.height, speed, rng));
		}
	}

	/// Replaces the pool with `particles`, clamping each position into the
	/// current bounds.
	pub fn place(&mut self, particles: impl IntoIterator<Item = Particle>) {
		let (w, h) = (self.width, self.height);
		self.particles = particles
			.into_iter()
			.map(|p| Particle {
				x: p.x.clamp(0.0, w),
				y: p.y.clamp(0.0, h),
				..p
			})
			.collect();
	}

	/// Advances every particle by one frame.
	pub fn update(&mut self) {
		let (w, h) = (self.width, self.height);
		for p in &mut self.particles {
			p.advance(w, h);
		}
	}

	/// Number of particles in the pool.
	pub fn len(&self) -> usize {
		self.particles.len()
	}

	/// Whether the pool holds no particles.
	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	/// Right edge of the bounce box.
	pub fn width(&self) -> f64 {
		self.width
	}

	/// Bottom edge of the bounce box.
	pub fn height(&self) -> f64 {
		self.height
	}
}
