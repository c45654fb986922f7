//! Typed configuration consumed by the scheduler simulator.
//!
//! A [`ConfigurationSet`] starts out holding the documented defaults and is
//! only ever mutated by the loader. Consumers get it behind an `Arc` and can
//! only read it through the accessors below.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// Scheduler Kind
// ============================================================================

/// Scheduling policy used by the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchedulerKind {
    /// Non-preemptive, processes run in arrival order.
    FirstComeFirstServed,
    /// Preemptive, each process runs for at most `quantum-cycles`.
    RoundRobin,
}

impl SchedulerKind {
    /// Every literal accepted for the `scheduler` key.
    pub const ACCEPTED: &'static [&'static str] =
        &["fcfs", "rr", "first-come-first-served", "round-robin"];

    /// Long-form name, as reported by the accessor.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstComeFirstServed => "first-come-first-served",
            Self::RoundRobin => "round-robin",
        }
    }

    /// Abbreviation used in configuration files.
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::FirstComeFirstServed => "fcfs",
            Self::RoundRobin => "rr",
        }
    }
}

impl fmt::Display for SchedulerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown scheduler '{0}'")]
pub struct UnknownScheduler(pub String);

impl FromStr for SchedulerKind {
    type Err = UnknownScheduler;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fcfs" | "first-come-first-served" => Ok(Self::FirstComeFirstServed),
            "rr" | "round-robin" => Ok(Self::RoundRobin),
            other => Err(UnknownScheduler(other.to_string())),
        }
    }
}

// ============================================================================
// Configuration Set
// ============================================================================

/// The full set of simulator parameters.
///
/// Serializes with the same key spelling the configuration file uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigurationSet {
    #[serde(rename = "num-cpu")]
    pub(crate) cpu_count: u32,
    #[serde(rename = "scheduler")]
    pub(crate) scheduler: SchedulerKind,
    #[serde(rename = "quantum-cycles")]
    pub(crate) quantum_cycles: u32,
    #[serde(rename = "batch-process-freq")]
    pub(crate) batch_process_freq: u32,
    #[serde(rename = "min-ins")]
    pub(crate) min_instructions: u32,
    #[serde(rename = "max-ins")]
    pub(crate) max_instructions: u32,
    #[serde(rename = "delay-per-exec")]
    pub(crate) delay_per_exec: u32,
    #[serde(rename = "max-overall-mem")]
    pub(crate) max_overall_mem: u64,
    #[serde(rename = "mem-per-frame")]
    pub(crate) mem_per_frame: u64,
    #[serde(rename = "min-mem-per-proc")]
    pub(crate) min_mem_per_proc: u64,
    #[serde(rename = "max-mem-per-proc")]
    pub(crate) max_mem_per_proc: u64,
}

impl Default for ConfigurationSet {
    fn default() -> Self {
        Self {
            cpu_count: 4,
            scheduler: SchedulerKind::RoundRobin,
            quantum_cycles: 5,
            batch_process_freq: 1,
            min_instructions: 1000,
            max_instructions: 2000,
            delay_per_exec: 0,
            max_overall_mem: 512,
            mem_per_frame: 256,
            min_mem_per_proc: 512,
            max_mem_per_proc: 512,
        }
    }
}

impl ConfigurationSet {
    /// Number of simulated CPU cores.
    #[must_use]
    pub const fn cpu_count(&self) -> u32 {
        self.cpu_count
    }

    /// Scheduling policy.
    #[must_use]
    pub const fn scheduler(&self) -> SchedulerKind {
        self.scheduler
    }

    /// Time slice, in CPU cycles, for round-robin scheduling.
    #[must_use]
    pub const fn quantum_cycles(&self) -> u32 {
        self.quantum_cycles
    }

    /// Cycles between generated batches of dummy processes.
    #[must_use]
    pub const fn batch_process_freq(&self) -> u32 {
        self.batch_process_freq
    }

    /// Lower bound on instructions per generated process.
    #[must_use]
    pub const fn min_instructions(&self) -> u32 {
        self.min_instructions
    }

    /// Upper bound on instructions per generated process.
    #[must_use]
    pub const fn max_instructions(&self) -> u32 {
        self.max_instructions
    }

    /// Busy-wait cycles inserted after each executed instruction.
    #[must_use]
    pub const fn delay_per_exec(&self) -> u32 {
        self.delay_per_exec
    }

    /// Total simulated memory, in bytes.
    #[must_use]
    pub const fn max_overall_mem(&self) -> u64 {
        self.max_overall_mem
    }

    /// Size of one memory frame, in bytes.
    #[must_use]
    pub const fn mem_per_frame(&self) -> u64 {
        self.mem_per_frame
    }

    /// Smallest memory allocation a process may request.
    #[must_use]
    pub const fn min_mem_per_proc(&self) -> u64 {
        self.min_mem_per_proc
    }

    /// Largest memory allocation a process may request.
    #[must_use]
    pub const fn max_mem_per_proc(&self) -> u64 {
        self.max_mem_per_proc
    }

    /// Number of frames the overall memory divides into.
    #[must_use]
    pub const fn frame_count(&self) -> u64 {
        self.max_overall_mem / self.mem_per_frame
    }
}

// ============================================================================
// Tests
// ============================================================================
