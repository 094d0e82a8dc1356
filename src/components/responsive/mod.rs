//! Responsive quality adaptation.
//!
//! Classifies the device into a viewport tier and a performance class, turns
//! that into a particle target, and keeps the target current as the viewport
//! changes. A rolling frame-rate monitor backs quality off when the page
//! cannot keep up.

mod breakpoint;
mod config;
mod controller;
mod debounce;
pub mod dom;
mod events;
mod gestures;
mod monitor;
mod performance;
pub mod signals;

pub use breakpoint::Breakpoint;
pub use config::{MonitorConfig, QualityConfig};
pub use controller::AdaptiveQualityController;
pub use debounce::Debouncer;
pub use events::{EventBus, ListenerId, QualityEvent};
pub use gestures::{SwipeDetector, SwipeDirection};
pub use monitor::{FrameMetrics, FrameRateMonitor, PerformanceGrade};
pub use performance::{
	DeviceSignals, NetworkType, PerformanceClass, QualityTarget, classify_performance,
	target_particle_count,
};
