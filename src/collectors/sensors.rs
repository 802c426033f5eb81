//! Power supply information (batteries)

use crate::data::BatteryInfo;
use crate::error::{FastfetchError, Result};
use crate::utils::file::read_value;
use std::fs;
use std::path::Path;

const POWER_SUPPLY: &str = "/sys/class/power_supply";

pub fn collect_batteries() -> Result<Vec<BatteryInfo>> {
    let batteries = collect_batteries_in(Path::new(POWER_SUPPLY))?;
    if batteries.is_empty() {
        return Err(FastfetchError::Detection("No battery found".to_string()));
    }
    Ok(batteries)
}

/// Every `BAT*` supply below `dir` that reports a capacity, sorted by name
pub fn collect_batteries_in(dir: &Path) -> Result<Vec<BatteryInfo>> {
    let mut names: Vec<String> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("BAT"))
        .collect();
    names.sort();

    Ok(names
        .into_iter()
        .filter_map(|name| {
            let path = dir.join(&name);
            let capacity = read_value(path.join("capacity"))?.parse::<u8>().ok()?;
            Some(BatteryInfo {
                status: read_value(path.join("status")),
                name,
                capacity,
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supply(dir: &Path, name: &str, capacity: &str, status: Option<&str>) {
        let path = dir.join(name);
        fs::create_dir(&path).unwrap();
        fs::write(path.join("capacity"), capacity).unwrap();
        if let Some(status) = status {
            fs::write(path.join("status"), status).unwrap();
        }
    }

    #[test]
    fn batteries_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        supply(dir.path(), "BAT1", "40\n", None);
        supply(dir.path(), "BAT0", "87\n", Some("Charging\n"));
        supply(dir.path(), "AC", "0\n", Some("Online\n"));
        supply(dir.path(), "BAT2", "unknown\n", None);

        let batteries = collect_batteries_in(dir.path()).unwrap();
        assert_eq!(batteries.len(), 2);
        assert_eq!(batteries[0].name, "BAT0");
        assert_eq!(batteries[0].to_string(), "87% [Charging]");
        assert_eq!(batteries[1].to_string(), "40%");
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(collect_batteries_in(&dir.path().join("missing")).is_err());
    }
}
