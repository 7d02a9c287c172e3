//! Drawing-surface sizing.
//!
//! The canvas backing store is allocated at `logical * device_pixel_ratio`
//! physical pixels while its CSS box stays at the logical size. The context
//! transform is then scaled by the ratio so all drawing stays in logical
//! pixels.

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

/// Logical surface size plus the device pixel ratio it is displayed at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceConfig {
	/// Logical width in CSS pixels.
	pub width: f64,
	/// Logical height in CSS pixels.
	pub height: f64,
	/// Device pixels per logical pixel.
	pub dpr: f64,
}

impl Default for SurfaceConfig {
	fn default() -> Self {
		Self::new(0.0, 0.0, 1.0)
	}
}

impl SurfaceConfig {
	/// Builds a config, falling back to a ratio of 1 for missing or
	/// nonsensical ratios and to 0 for negative sizes.
	pub fn new(width: f64, height: f64, dpr: f64) -> Self {
		let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
		Self {
			width: width.max(0.0),
			height: height.max(0.0),
			dpr,
		}
	}

	/// Reads the current viewport size and pixel ratio.
	pub fn from_window(window: &Window) -> Option<Self> {
		let width = window.inner_width().ok()?.as_f64()?;
		let height = window.inner_height().ok()?.as_f64()?;
		Some(Self::new(width, height, window.device_pixel_ratio()))
	}

	/// Backing-store width in device pixels.
	pub fn physical_width(&self) -> u32 {
		(self.width * self.dpr) as u32
	}

	/// Backing-store height in device pixels.
	pub fn physical_height(&self) -> u32 {
		(self.height * self.dpr) as u32
	}
}

/// Applies `surface` to the canvas: backing-store size, CSS size, and a
/// fresh `(dpr, dpr)` context scale.
pub fn provision(
	canvas: &HtmlCanvasElement,
	ctx: &CanvasRenderingContext2d,
	surface: &SurfaceConfig,
) -> Result<(), JsValue> {
	canvas.set_width(surface.physical_width());
	canvas.set_height(surface.physical_height());

	let style = canvas.style();
	style.set_property("width", &format!("{}px", surface.width))?;
	style.set_property("height", &format!("{}px", surface.height))?;

	// set_transform replaces rather than composes, so repeated resizes never
	// accumulate scale.
	ctx.set_transform(surface.dpr, 0.0, 0.0, surface.dpr, 0.0, 0.0)
}
