//! The complete animated backdrop: particle field, adaptive quality and
//! browser wiring.
//!
//! [`Scene`] steps everything for one frame and can be driven headlessly.
//! [`Backdrop`] runs a scene against a real canvas, and [`ParticleBackdrop`]
//! is the leptos component that mounts one.
//!
//! # Example
//!
//! ```ignore
//! use portfolio_fx::components::backdrop::{BackdropConfig, ParticleBackdrop};
//!
//! view! { <ParticleBackdrop config=BackdropConfig::default() fullscreen=true /> }
//! ```

mod animation;
mod component;
mod scene;
mod types;

pub use animation::AnimationLoop;
pub use component::{Backdrop, ParticleBackdrop, mount_backdrop};
pub use scene::Scene;
pub use types::BackdropConfig;
