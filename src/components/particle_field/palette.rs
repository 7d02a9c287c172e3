//! Render colours and the site-wide flags they are derived from.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// Fully opaque colour.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Same colour at opacity `a`.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// CSS colour string: `#rrggbb` when opaque, `rgba(..)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Light or dark site theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorScheme {
	/// Dark background.
	#[default]
	Dark,
	/// Light background.
	Light,
}

impl ColorScheme {
	/// The other scheme.
	pub fn toggled(self) -> Self {
		match self {
			ColorScheme::Dark => ColorScheme::Light,
			ColorScheme::Light => ColorScheme::Dark,
		}
	}

	/// Opacity of the whole particle canvas under this scheme.
	pub fn canvas_opacity(self) -> f64 {
		match self {
			ColorScheme::Dark => 0.7,
			ColorScheme::Light => 0.5,
		}
	}
}

/// Presentation mode of the site.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
	/// Regular presentation.
	#[default]
	Visual,
	/// Terminal-style presentation.
	Technical,
}

impl ViewMode {
	/// The other mode.
	pub fn toggled(self) -> Self {
		match self {
			ViewMode::Visual => ViewMode::Technical,
			ViewMode::Technical => ViewMode::Visual,
		}
	}
}

/// One of the three fixed colours the field can be drawn in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PaletteMode {
	/// Terminal green, used whenever the technical view is active.
	Technical,
	/// Deep cyan for the light theme.
	Light,
	/// Bright cyan for the dark theme.
	#[default]
	Dark,
}

impl PaletteMode {
	/// Technical view wins over the colour scheme.
	pub fn from_flags(scheme: ColorScheme, view: ViewMode) -> Self {
		match (view, scheme) {
			(ViewMode::Technical, _) => PaletteMode::Technical,
			(ViewMode::Visual, ColorScheme::Light) => PaletteMode::Light,
			(ViewMode::Visual, ColorScheme::Dark) => PaletteMode::Dark,
		}
	}

	/// Opaque RGB for this mode.
	pub fn color(self) -> Color {
		match self {
			PaletteMode::Technical => Color::rgb(0, 255, 65),
			PaletteMode::Light => Color::rgb(8, 145, 178),
			PaletteMode::Dark => Color::rgb(34, 211, 238),
		}
	}
}
