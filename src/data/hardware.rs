//! Hardware-specific information structures

use crate::utils::parsing::{format_khz, format_usage, SizeUnit};
use std::fmt;

/// CPU information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuInfo {
    pub model: String,
    pub logical_cores: usize,
    /// Highest frequency in kHz, when cpufreq exposes it
    pub max_khz: Option<u64>,
}

impl fmt::Display for CpuInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.model)?;
        if self.logical_cores > 0 {
            write!(f, " ({})", self.logical_cores)?;
        }
        if let Some(khz) = self.max_khz {
            write!(f, " @ {}", format_khz(khz))?;
        }
        Ok(())
    }
}

/// Used and total bytes of some resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Usage {
    pub used: u64,
    pub total: u64,
}

impl Usage {
    pub fn format(&self, unit: SizeUnit) -> String {
        format_usage(self.used, self.total, unit)
    }
}

/// A battery from `/sys/class/power_supply`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatteryInfo {
    pub name: String,
    pub capacity: u8,
    pub status: Option<String>,
}

impl fmt::Display for BatteryInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.capacity)?;
        if let Some(status) = &self.status {
            write!(f, " [{}]", status)?;
        }
        Ok(())
    }
}
