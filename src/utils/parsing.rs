//! String parsing and formatting utilities

const MIB: u64 = 1024 * 1024;
const GIB: u64 = 1024 * MIB;

/// Binary size unit used in usage lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeUnit {
    MiB,
    GiB,
}

impl SizeUnit {
    fn divisor(self) -> u64 {
        match self {
            SizeUnit::MiB => MIB,
            SizeUnit::GiB => GIB,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            SizeUnit::MiB => "MiB",
            SizeUnit::GiB => "GiB",
        }
    }
}

/// `used / total (percent%)`, e.g. `2048MiB / 7861MiB (26%)`
pub fn format_usage(used_bytes: u64, total_bytes: u64, unit: SizeUnit) -> String {
    let divisor = unit.divisor();
    format!(
        "{}{suffix} / {}{suffix} ({}%)",
        used_bytes / divisor,
        total_bytes / divisor,
        percent(used_bytes, total_bytes),
        suffix = unit.suffix()
    )
}

pub fn percent(part: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    (part as u128 * 100 / total as u128) as u64
}

fn plural(count: u64, unit: &str) -> String {
    if count == 1 {
        format!("{} {}", count, unit)
    } else {
        format!("{} {}s", count, unit)
    }
}

/// Format uptime as `2 days, 3 hours, 1 min`; zero components are left out
pub fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3600;
    let minutes = (seconds % 3600) / 60;

    let parts: Vec<String> = [(days, "day"), (hours, "hour"), (minutes, "min")]
        .into_iter()
        .filter(|(count, _)| *count > 0)
        .map(|(count, unit)| plural(count, unit))
        .collect();

    if parts.is_empty() {
        plural(seconds, "sec")
    } else {
        parts.join(", ")
    }
}

/// Strip trademark noise and the embedded clock from a `/proc/cpuinfo` model name
pub fn clean_cpu_name(raw_name: &str) -> String {
    let without_clock = raw_name.split(" @ ").next().unwrap_or(raw_name);
    let cleaned = without_clock
        .replace("(R)", "")
        .replace("(TM)", "")
        .replace("(tm)", "")
        .replace(" CPU", "")
        .replace(" Processor", "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Format a frequency given in kHz as GHz with two decimals
pub fn format_khz(khz: u64) -> String {
    format!("{:.2} GHz", khz as f64 / 1_000_000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uptime_formatting() {
        assert_eq!(format_uptime(42), "42 secs");
        assert_eq!(format_uptime(1), "1 sec");
        assert_eq!(format_uptime(60), "1 min");
        assert_eq!(format_uptime(3600 + 120), "1 hour, 2 mins");
        assert_eq!(format_uptime(2 * 86_400 + 60), "2 days, 1 min");
        assert_eq!(format_uptime(86_400 + 3 * 3600 + 5 * 60), "1 day, 3 hours, 5 mins");
    }

    #[test]
    fn usage_formatting() {
        assert_eq!(
            format_usage(2048 * MIB, 8192 * MIB, SizeUnit::MiB),
            "2048MiB / 8192MiB (25%)"
        );
        assert_eq!(format_usage(50 * GIB, 200 * GIB, SizeUnit::GiB), "50GiB / 200GiB (25%)");
        assert_eq!(format_usage(0, 0, SizeUnit::GiB), "0GiB / 0GiB (0%)");
    }

    #[test]
    fn percent_does_not_overflow() {
        assert_eq!(percent(u64::MAX / 2, u64::MAX), 49);
    }

    #[test]
    fn cpu_names_are_cleaned() {
        assert_eq!(
            clean_cpu_name("Intel(R) Core(TM) i7-8565U CPU @ 1.80GHz"),
            "Intel Core i7-8565U"
        );
        assert_eq!(
            clean_cpu_name("AMD Ryzen 7 5800X 8-Core Processor"),
            "AMD Ryzen 7 5800X 8-Core"
        );
    }

    #[test]
    fn khz_to_ghz() {
        assert_eq!(format_khz(4_600_000), "4.60 GHz");
    }
}
