//! Flat price row stored in the `prices` table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Processor architecture inferred from the processor name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Architecture {
    Arm,
    X86,
}

impl Architecture {
    pub fn as_str(&self) -> &'static str {
        match self {
            Architecture::Arm => "arm",
            Architecture::X86 => "x86",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One normalized instance price, column for column with the `prices` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRow {
    /// Instance family, e.g. "General purpose"
    pub family: String,

    /// Type segment of the instance type, e.g. "t3"
    pub instance_type: String,

    /// Size segment of the instance type, e.g. "medium"
    pub size: String,

    /// Whether the type is treated as burstable
    pub burst: bool,

    /// Baseline performance in percent
    pub base: f64,

    pub processor: String,

    /// Processor bit width, e.g. "64-bit"
    pub bit: String,

    pub arch: Architecture,
    pub tenancy: String,

    /// Human-readable location, e.g. "US East (Ohio)"
    pub region: String,

    pub vcpu: String,
    pub memory: String,
    pub storage: String,
    pub os: String,

    /// Normalization size factor
    pub norm: String,

    /// Clock speed as published, e.g. "2.5 GHz"
    pub speed: String,

    /// Clock speed scaled by the baseline, e.g. "1.0 GHz"
    pub actual: String,

    pub network: String,

    /// Current generation flag
    pub generation: String,

    /// Currency code of the price
    pub cur: String,

    pub hourly: f64,
    pub monthly: f64,

    /// Effective date of the selected term
    pub starting: String,
}

impl PriceRow {
    /// Burst flag as stored in the table.
    pub fn burst_label(&self) -> &'static str {
        if self.burst { "Yes" } else { "No" }
    }
}
