//! Device capability classification and particle targets.

use super::breakpoint::Breakpoint;

/// Reported network effective type (`navigator.connection.effectiveType`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NetworkType {
	Slow2g,
	TwoG,
	ThreeG,
	FourG,
	Unknown,
}

impl NetworkType {
	pub fn parse(effective_type: &str) -> Self {
		match effective_type.trim().to_ascii_lowercase().as_str() {
			"slow-2g" => NetworkType::Slow2g,
			"2g" => NetworkType::TwoG,
			"3g" => NetworkType::ThreeG,
			"4g" => NetworkType::FourG,
			_ => NetworkType::Unknown,
		}
	}

	/// The two slowest classes.
	pub fn is_slow(self) -> bool {
		matches!(self, NetworkType::Slow2g | NetworkType::TwoG)
	}
}

/// Snapshot of what the browser tells us about the device. Every capability
/// probe is optional; a missing value never marks the device as low-end.
#[derive(Clone, Debug, PartialEq)]
pub struct DeviceSignals {
	pub viewport_width: f64,
	pub viewport_height: f64,
	pub touch: bool,
	pub reduced_motion: bool,
	pub network: Option<NetworkType>,
	/// Logical CPU count (`navigator.hardwareConcurrency`).
	pub cpu_count: Option<u32>,
	/// Approximate memory in GiB (`navigator.deviceMemory`).
	pub device_memory_gb: Option<f64>,
}

impl Default for DeviceSignals {
	fn default() -> Self {
		Self {
			viewport_width: 1280.0,
			viewport_height: 720.0,
			touch: false,
			reduced_motion: false,
			network: None,
			cpu_count: None,
			device_memory_gb: None,
		}
	}
}

/// Coarse device performance class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PerformanceClass {
	Low,
	Normal,
}

impl PerformanceClass {
	pub const fn name(self) -> &'static str {
		match self {
			PerformanceClass::Low => "low",
			PerformanceClass::Normal => "normal",
		}
	}
}

/// Low if the network is one of the two slowest classes, or if the device
/// has both fewer than 4 logical CPUs and less than 4 GiB of memory.
pub fn classify_performance(signals: &DeviceSignals) -> PerformanceClass {
	let slow_network = signals.network.is_some_and(NetworkType::is_slow);
	let low_cpu = signals.cpu_count.is_some_and(|n| n < 4);
	let low_memory = signals
		.device_memory_gb
		.is_some_and(|gb| gb.is_finite() && gb < 4.0);

	if slow_network || (low_cpu && low_memory) {
		PerformanceClass::Low
	} else {
		PerformanceClass::Normal
	}
}

/// Desired particle count for a tier and performance class.
pub fn target_particle_count(tier: Breakpoint, performance: PerformanceClass) -> usize {
	if performance == PerformanceClass::Low {
		15
	} else if tier.is_mobile() {
		30
	} else if tier.is_tablet() {
		50
	} else {
		100
	}
}

/// What the quality controller wants the particle field to look like.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QualityTarget {
	pub particle_count: usize,
	pub reduce_animation: bool,
}

impl QualityTarget {
	pub fn compute(
		tier: Breakpoint,
		performance: PerformanceClass,
		signals: &DeviceSignals,
		max_particles: usize,
	) -> Self {
		Self {
			particle_count: target_particle_count(tier, performance).min(max_particles),
			reduce_animation: signals.reduced_motion
				|| performance == PerformanceClass::Low
				|| tier.is_mobile(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn signals(network: Option<NetworkType>, cpu: Option<u32>, mem: Option<f64>) -> DeviceSignals {
		DeviceSignals {
			network,
			cpu_count: cpu,
			device_memory_gb: mem,
			..DeviceSignals::default()
		}
	}

	#[test]
	fn performance_truth_table() {
		// (slow network, cpu < 4, memory < 4) -> low
		let cases = [
			(false, false, false, PerformanceClass::Normal),
			(false, false, true, PerformanceClass::Normal),
			(false, true, false, PerformanceClass::Normal),
			(false, true, true, PerformanceClass::Low),
			(true, false, false, PerformanceClass::Low),
			(true, false, true, PerformanceClass::Low),
			(true, true, false, PerformanceClass::Low),
			(true, true, true, PerformanceClass::Low),
		];
		for (slow, low_cpu, low_mem, expected) in cases {
			let network = if slow { NetworkType::TwoG } else { NetworkType::FourG };
			let cpu = if low_cpu { 3 } else { 4 };
			let mem = if low_mem { 3.9 } else { 4.0 };
			assert_eq!(
				classify_performance(&signals(Some(network), Some(cpu), Some(mem))),
				expected,
				"slow={slow} low_cpu={low_cpu} low_mem={low_mem}"
			);
		}
	}

	#[test]
	fn missing_signals_are_not_low_end() {
		assert_eq!(
			classify_performance(&signals(None, None, None)),
			PerformanceClass::Normal
		);
		assert_eq!(
			classify_performance(&signals(None, Some(1), None)),
			PerformanceClass::Normal
		);
		assert_eq!(
			classify_performance(&signals(None, None, Some(0.5))),
			PerformanceClass::Normal
		);
		assert_eq!(
			classify_performance(&signals(Some(NetworkType::Unknown), Some(8), Some(8.0))),
			PerformanceClass::Normal
		);
	}

	#[test]
	fn slow_2g_counts_as_slow() {
		assert!(NetworkType::parse("slow-2g").is_slow());
		assert!(NetworkType::parse("2g").is_slow());
		assert!(!NetworkType::parse("3g").is_slow());
		assert_eq!(NetworkType::parse("5g"), NetworkType::Unknown);
	}

	#[test]
	fn target_counts() {
		use Breakpoint::*;
		assert_eq!(target_particle_count(Xs, PerformanceClass::Normal), 30);
		assert_eq!(target_particle_count(Sm, PerformanceClass::Normal), 30);
		assert_eq!(target_particle_count(Md, PerformanceClass::Normal), 50);
		assert_eq!(target_particle_count(Lg, PerformanceClass::Normal), 100);
		assert_eq!(target_particle_count(Xxl, PerformanceClass::Normal), 100);
		for bp in Breakpoint::ALL {
			assert_eq!(target_particle_count(bp, PerformanceClass::Low), 15);
		}
	}

	#[test]
	fn quality_target_respects_ceiling_and_motion_preference() {
		let calm = DeviceSignals {
			reduced_motion: true,
			..DeviceSignals::default()
		};
		let target = QualityTarget::compute(Breakpoint::Xl, PerformanceClass::Normal, &calm, 60);
		assert_eq!(target.particle_count, 60);
		assert!(target.reduce_animation);

		let desktop = QualityTarget::compute(
			Breakpoint::Xl,
			PerformanceClass::Normal,
			&DeviceSignals::default(),
			150,
		);
		assert_eq!(desktop.particle_count, 100);
		assert!(!desktop.reduce_animation);
	}
}
