//! Benchmark modes (rendering back ends).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Mode a benchmark run was executed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkMode {
    /// OpenCL path tracer on all GPUs.
    OclGpu,
    /// OpenCL path tracer on CPUs and GPUs.
    OclCpuGpu,
    /// OpenCL path tracer on CPUs only.
    OclCpu,
    /// OpenCL path tracer on a user-selected device set.
    OclCustom,
    /// Hybrid CPU shading with GPU ray intersection.
    HybridGpu,
    /// Hybrid mode on a user-selected device set.
    HybridCustom,
    /// Native C++ path tracer.
    NativePath,
    /// Free-running interactive viewer; not a benchmark.
    Interactive,
    /// Rendering paused; not a benchmark.
    Pause,
}

impl BenchmarkMode {
    /// Every benchmark mode, in declaration order.
    pub const BENCHMARKS: [BenchmarkMode; 7] = [
        BenchmarkMode::OclGpu,
        BenchmarkMode::OclCpuGpu,
        BenchmarkMode::OclCpu,
        BenchmarkMode::OclCustom,
        BenchmarkMode::HybridGpu,
        BenchmarkMode::HybridCustom,
        BenchmarkMode::NativePath,
    ];

    /// Whether this mode is one of the rendering back ends whose output
    /// can be compared with a reference image.
    pub fn is_benchmark(self) -> bool {
        !matches!(self, BenchmarkMode::Interactive | BenchmarkMode::Pause)
    }

    pub fn label(self) -> &'static str {
        match self {
            BenchmarkMode::OclGpu => "OpenCL GPUs",
            BenchmarkMode::OclCpuGpu => "OpenCL CPUs+GPUs",
            BenchmarkMode::OclCpu => "OpenCL CPUs",
            BenchmarkMode::OclCustom => "OpenCL Custom",
            BenchmarkMode::HybridGpu => "Hybrid GPUs",
            BenchmarkMode::HybridCustom => "Hybrid Custom",
            BenchmarkMode::NativePath => "Native C++ Path",
            BenchmarkMode::Interactive => "Interactive",
            BenchmarkMode::Pause => "Pause",
        }
    }
}

impl fmt::Display for BenchmarkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
