//! Registry of recognized configuration keys.
//!
//! Each [`FieldKey`] knows its external spelling, the rule its value must
//! satisfy, and how to store a parsed value into a [`ConfigurationSet`].

use std::fmt;

use crate::config::schema::ConfigurationSet;
use crate::config::validation::{
    Rule, Violation, check_power_of_two, check_range, check_scheduler, parse_integer,
};

/// One of the eleven recognized configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldKey {
    /// `num-cpu`
    NumCpu,
    /// `scheduler`
    Scheduler,
    /// `quantum-cycles`
    QuantumCycles,
    /// `batch-process-freq`
    BatchProcessFreq,
    /// `min-ins`
    MinIns,
    /// `max-ins`
    MaxIns,
    /// `delay-per-exec`
    DelayPerExec,
    /// `max-overall-mem`
    MaxOverallMem,
    /// `mem-per-frame`
    MemPerFrame,
    /// `min-mem-per-proc`
    MinMemPerProc,
    /// `max-mem-per-proc`
    MaxMemPerProc,
}

impl FieldKey {
    /// All keys, in the order they are documented and printed.
    pub const ALL: [Self; 11] = [
        Self::NumCpu,
        Self::Scheduler,
        Self::QuantumCycles,
        Self::BatchProcessFreq,
        Self::MinIns,
        Self::MaxIns,
        Self::DelayPerExec,
        Self::MaxOverallMem,
        Self::MemPerFrame,
        Self::MinMemPerProc,
        Self::MaxMemPerProc,
    ];

    /// The key as written in configuration files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NumCpu => "num-cpu",
            Self::Scheduler => "scheduler",
            Self::QuantumCycles => "quantum-cycles",
            Self::BatchProcessFreq => "batch-process-freq",
            Self::MinIns => "min-ins",
            Self::MaxIns => "max-ins",
            Self::DelayPerExec => "delay-per-exec",
            Self::MaxOverallMem => "max-overall-mem",
            Self::MemPerFrame => "mem-per-frame",
            Self::MinMemPerProc => "min-mem-per-proc",
            Self::MaxMemPerProc => "max-mem-per-proc",
        }
    }

    /// Exact-match lookup of a key token.
    #[must_use]
    pub fn lookup(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == token)
    }

    /// Closest recognized key to `token`, if within edit distance 3.
    #[must_use]
    pub fn suggest(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .map(|key| (key, strsim::damerau_levenshtein(token, key.as_str())))
            .filter(|(_, dist)| *dist <= 3)
            .min_by_key(|(_, dist)| *dist)
            .map(|(key, _)| key)
    }

    /// The rule the key's value must satisfy.
    #[must_use]
    pub const fn rule(self) -> Rule {
        match self {
            Self::NumCpu => Rule::Range { min: 1, max: 128 },
            Self::Scheduler => Rule::Scheduler,
            Self::QuantumCycles | Self::BatchProcessFreq | Self::MinIns | Self::MaxIns => {
                Rule::POSITIVE
            }
            Self::DelayPerExec => Rule::NON_NEGATIVE,
            Self::MaxOverallMem | Self::MemPerFrame | Self::MinMemPerProc | Self::MaxMemPerProc => {
                Rule::PowerOfTwo
            }
        }
    }

    /// Whether the value is a string with optional surrounding quotes.
    #[must_use]
    pub const fn is_string_valued(self) -> bool {
        matches!(self, Self::Scheduler)
    }

    /// Parses `token`, checks it against [`Self::rule`], and stores it.
    ///
    /// `set` is left untouched when the value is rejected.
    ///
    /// # Errors
    ///
    /// Returns the [`Violation`] describing why the value was rejected.
    pub fn assign(self, set: &mut ConfigurationSet, token: &str) -> Result<(), Violation> {
        match self.rule() {
            Rule::Scheduler => {
                set.scheduler = check_scheduler(token)?;
            }
            Rule::PowerOfTwo => {
                let value = check_power_of_two(parse_integer(token)?)?;
                if let Some(slot) = self.memory_slot(set) {
                    *slot = value;
                }
            }
            Rule::Range { min, max } => {
                let value = parse_integer(token)?;
                check_range(value, min, max)?;
                let value = u32::try_from(value).map_err(|_| Violation::Range {
                    expected: self.rule().describe(),
                })?;
                if let Some(slot) = self.count_slot(set) {
                    *slot = value;
                }
            }
        }
        Ok(())
    }

    /// Current value of the field, formatted as it would be written in a
    /// configuration file.
    #[must_use]
    pub fn render(self, set: &ConfigurationSet) -> String {
        match self {
            Self::Scheduler => format!("\"{}\"", set.scheduler.short_name()),
            other => other
                .numeric_value(set)
                .map(|v| v.to_string())
                .unwrap_or_default(),
        }
    }

    /// Current value of a numeric field; `None` for `scheduler`.
    #[must_use]
    pub const fn numeric_value(self, set: &ConfigurationSet) -> Option<u64> {
        let value = match self {
            Self::NumCpu => set.cpu_count as u64,
            Self::Scheduler => return None,
            Self::QuantumCycles => set.quantum_cycles as u64,
            Self::BatchProcessFreq => set.batch_process_freq as u64,
            Self::MinIns => set.min_instructions as u64,
            Self::MaxIns => set.max_instructions as u64,
            Self::DelayPerExec => set.delay_per_exec as u64,
            Self::MaxOverallMem => set.max_overall_mem,
            Self::MemPerFrame => set.mem_per_frame,
            Self::MinMemPerProc => set.min_mem_per_proc,
            Self::MaxMemPerProc => set.max_mem_per_proc,
        };
        Some(value)
    }

    /// Storage for keys held as `u32`; `None` for every other key.
    const fn count_slot(self, set: &mut ConfigurationSet) -> Option<&mut u32> {
        match self {
            Self::NumCpu => Some(&mut set.cpu_count),
            Self::QuantumCycles => Some(&mut set.quantum_cycles),
            Self::BatchProcessFreq => Some(&mut set.batch_process_freq),
            Self::MinIns => Some(&mut set.min_instructions),
            Self::MaxIns => Some(&mut set.max_instructions),
            Self::DelayPerExec => Some(&mut set.delay_per_exec),
            Self::Scheduler
            | Self::MaxOverallMem
            | Self::MemPerFrame
            | Self::MinMemPerProc
            | Self::MaxMemPerProc => None,
        }
    }

    /// Storage for memory sizes; `None` for every other key.
    const fn memory_slot(self, set: &mut ConfigurationSet) -> Option<&mut u64> {
        match self {
            Self::MaxOverallMem => Some(&mut set.max_overall_mem),
            Self::MemPerFrame => Some(&mut set.mem_per_frame),
            Self::MinMemPerProc => Some(&mut set.min_mem_per_proc),
            Self::MaxMemPerProc => Some(&mut set.max_mem_per_proc),
            Self::NumCpu
            | Self::Scheduler
            | Self::QuantumCycles
            | Self::BatchProcessFreq
            | Self::MinIns
            | Self::MaxIns
            | Self::DelayPerExec => None,
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Tests
// ============================================================================
