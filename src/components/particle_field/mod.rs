//! Interactive particle-field background.
//!
//! Renders drifting particles on a full-viewport canvas with:
//! - Proximity links between nearby particles
//! - Highlighted links from particles to the pointer or primary touch
//! - Colour sampled every frame from the site's theme/view-mode palette
//! - DPR-aware surface sizing that reseeds the pool on resize
//!
//! # Example
//!
//! ```ignore
//! use particle_field::{ParticleField, PaletteMode};
//!
//! let palette = Signal::derive(|| PaletteMode::Dark);
//! view! { <ParticleField palette=palette opacity=Signal::derive(|| 0.7) /> }
//! ```

mod component;
pub mod config;
pub mod palette;
pub mod particles;
pub mod pointer;
pub mod render;
pub mod state;
pub mod surface;

pub use component::ParticleField;
pub use config::FieldConfig;
pub use palette::{Color, ColorScheme, PaletteMode, ViewMode};
pub use particles::{Particle, ParticleSystem};
pub use pointer::{FadeToken, PointerTarget, PointerTracker};
pub use render::{DrawCmd, Frame, proximity_alpha};
pub use state::FieldState;
pub use surface::SurfaceConfig;
