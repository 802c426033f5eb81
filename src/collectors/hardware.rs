//! Hardware information collection (CPU, GPU, memory, disk, displays)

use crate::data::{CpuInfo, Usage};
use crate::error::{FastfetchError, Result};
use crate::state::Snapshot;
use crate::utils::{command::*, file::*, parsing::clean_cpu_name};
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

const CPUINFO: &str = "/proc/cpuinfo";
const CPU_MAX_FREQ: &str = "/sys/devices/system/cpu/cpu0/cpufreq/cpuinfo_max_freq";
const MEMINFO: &str = "/proc/meminfo";
const DRM_DIR: &str = "/sys/class/drm";

/// `model name` on x86; ARM kernels use one of the others
const CPU_MODEL_KEYS: &[&str] = &["model name", "Hardware", "Processor", "cpu model", "cpu"];

pub fn collect_cpu_info() -> Result<CpuInfo> {
    let model = read_cpu_model(CPUINFO)?;
    // SAFETY: sysconf has no preconditions
    let online = unsafe { libc::sysconf(libc::_SC_NPROCESSORS_ONLN) };

    Ok(CpuInfo {
        model,
        logical_cores: usize::try_from(online).unwrap_or(0),
        max_khz: read_value(CPU_MAX_FREQ).and_then(|khz| khz.parse().ok()),
    })
}

pub fn read_cpu_model<P: AsRef<Path>>(cpuinfo: P) -> Result<String> {
    let cpuinfo = cpuinfo.as_ref();
    CPU_MODEL_KEYS
        .iter()
        .find_map(|key| parse_prop_file_with(cpuinfo, key, ':').filter(|v| !v.is_empty()))
        .map(|raw| clean_cpu_name(&raw))
        .ok_or_else(|| FastfetchError::Detection("CPU info not found".to_string()))
}

/// Used and total RAM, preferring `/proc/meminfo` over the sysinfo snapshot
pub fn collect_memory_info(snapshot: &Snapshot) -> Result<Usage> {
    let from_meminfo = fs::File::open(MEMINFO)
        .map_err(|err| tracing::debug!(%err, "meminfo not readable"))
        .ok()
        .and_then(|file| parse_meminfo(BufReader::new(file)));

    match from_meminfo {
        Some(usage) => Ok(usage),
        None if snapshot.total_ram > 0 => Ok(Usage {
            used: snapshot
                .total_ram
                .saturating_sub(snapshot.free_ram)
                .saturating_sub(snapshot.buffer_ram),
            total: snapshot.total_ram,
        }),
        None => Err(FastfetchError::Detection("Memory info not found".to_string())),
    }
}

/// Sizes in `/proc/meminfo` are kB; the result is in bytes.
/// Kernels without `MemAvailable` get free + buffers + cached instead.
pub fn parse_meminfo<R: BufRead>(reader: R) -> Option<Usage> {
    let mut total = None;
    let mut available = None;
    let mut free_parts = [None; 3];

    for line in reader.lines().map_while(|line| line.ok()) {
        let Some((key, rest)) = line.split_once(':') else {
            continue;
        };
        let Some(kb) = rest.split_whitespace().next().and_then(|v| v.parse::<u64>().ok()) else {
            continue;
        };
        match key {
            "MemTotal" => total = Some(kb),
            "MemAvailable" => available = Some(kb),
            "MemFree" => free_parts[0] = Some(kb),
            "Buffers" => free_parts[1] = Some(kb),
            "Cached" => free_parts[2] = Some(kb),
            _ => {}
        }
        if total.is_some() && available.is_some() {
            break;
        }
    }

    let total = total?;
    let available = available.or_else(|| free_parts.iter().copied().sum())?;
    Some(Usage {
        used: total.saturating_sub(available) * 1024,
        total: total * 1024,
    })
}

/// Usage of the filesystem mounted at `/`
pub fn collect_disk_info() -> Result<Usage> {
    statvfs_usage(Path::new("/"))
}

pub fn statvfs_usage(path: &Path) -> Result<Usage> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let path_cstr = CString::new(path.as_os_str().as_bytes())
        .map_err(|_| FastfetchError::Parse("path contains a NUL byte".to_string()))?;

    // SAFETY: `stat` is a plain C struct that statvfs fills in completely on success
    let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
    if unsafe { libc::statvfs(path_cstr.as_ptr(), &mut stat) } != 0 {
        return Err(std::io::Error::last_os_error().into());
    }

    let frsize = stat.f_frsize as u64;
    let total = (stat.f_blocks as u64).saturating_mul(frsize);
    let free = (stat.f_bfree as u64).saturating_mul(frsize);
    Ok(Usage {
        used: total.saturating_sub(free),
        total,
    })
}

/// Display controllers from `lspci`, falling back to DRM vendor ids
pub fn collect_gpus() -> Result<Vec<String>> {
    if command_exists("lspci") {
        match run_command("lspci", &["-mm"]) {
            Ok(output) => {
                let gpus: Vec<String> = output.lines().filter_map(parse_lspci_line).collect();
                if !gpus.is_empty() {
                    return Ok(gpus);
                }
            }
            Err(err) => tracing::debug!(%err, "lspci failed"),
        }
    }

    let gpus = drm_gpus(Path::new(DRM_DIR));
    if gpus.is_empty() {
        return Err(FastfetchError::Detection("No GPU found".to_string()));
    }
    Ok(gpus)
}

/// Split a `lspci -mm` line into its quoted fields
fn quoted_fields(line: &str) -> Vec<&str> {
    line.split('"')
        .skip(1)
        .step_by(2)
        .collect()
}

/// `00:02.0 "VGA compatible controller" "Intel Corporation" "UHD Graphics 620" ...`
pub fn parse_lspci_line(line: &str) -> Option<String> {
    let fields = quoted_fields(line);
    let (class, vendor, device) = (fields.first()?, fields.get(1)?, fields.get(2)?);
    let is_display = ["VGA compatible controller", "3D controller", "Display controller"]
        .iter()
        .any(|c| class.starts_with(c));
    if !is_display {
        return None;
    }

    Some(format!("{} {}", short_vendor(vendor), device_model(device)))
}

fn short_vendor(vendor: &str) -> &str {
    if vendor.contains("Advanced Micro Devices") || vendor.contains("AMD") {
        "AMD"
    } else if vendor.contains("NVIDIA") {
        "NVIDIA"
    } else if vendor.contains("Intel") {
        "Intel"
    } else {
        vendor.split_whitespace().next().unwrap_or(vendor)
    }
}

/// Marketing name in the last bracket pair, e.g. `TU106 [GeForce RTX 2070]`
fn device_model(device: &str) -> &str {
    let device = device.trim();
    device
        .rfind('[')
        .and_then(|start| {
            let inner = &device[start + 1..];
            inner.find(']').map(|end| inner[..end].trim())
        })
        .filter(|inner| !inner.is_empty())
        .unwrap_or(device)
}

fn vendor_name(id: &str) -> Option<&'static str> {
    match id {
        "0x8086" => Some("Intel"),
        "0x1002" => Some("AMD"),
        "0x10de" => Some("NVIDIA"),
        _ => None,
    }
}

/// GPUs named from the `cardN/device/{vendor,device}` PCI ids
pub fn drm_gpus(drm: &Path) -> Vec<String> {
    let mut cards: Vec<_> = match fs::read_dir(drm) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with("card") && !name.contains('-'))
            .collect(),
        Err(err) => {
            tracing::debug!(%err, "no DRM devices");
            return Vec::new();
        }
    };
    cards.sort();

    cards
        .iter()
        .filter_map(|card| {
            let device = drm.join(card).join("device");
            let vendor = read_value(device.join("vendor"))?;
            let name = vendor_name(&vendor).unwrap_or("Unknown");
            Some(match read_value(device.join("device")) {
                Some(id) => format!("{} GPU ({})", name, id),
                None => format!("{} GPU", name),
            })
        })
        .collect()
}

pub fn collect_resolutions() -> Result<Vec<String>> {
    collect_resolutions_in(Path::new(DRM_DIR))
}

/// Preferred (first listed) mode of every connected connector below `drm`
pub fn collect_resolutions_in(drm: &Path) -> Result<Vec<String>> {
    let no_display = || FastfetchError::Detection("No connected display found".to_string());

    let entries = fs::read_dir(drm).map_err(|err| {
        tracing::debug!(path = %drm.display(), %err, "no DRM connectors");
        no_display()
    })?;
    let mut connectors: Vec<_> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|path| read_value(path.join("status")).as_deref() == Some("connected"))
        .collect();
    connectors.sort();

    let modes: Vec<String> = connectors
        .iter()
        .filter_map(|path| read_value(path.join("modes")))
        .collect();
    if modes.is_empty() {
        return Err(no_display());
    }
    Ok(modes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn lspci_display_controllers() {
        let intel = r#"00:02.0 "VGA compatible controller" "Intel Corporation" "UHD Graphics 620" -r07 "Lenovo" "Device 2279""#;
        assert_eq!(parse_lspci_line(intel).as_deref(), Some("Intel UHD Graphics 620"));

        let nvidia = r#"01:00.0 "3D controller" "NVIDIA Corporation" "TU106 [GeForce RTX 2070]" -ra1 "" """#;
        assert_eq!(parse_lspci_line(nvidia).as_deref(), Some("NVIDIA GeForce RTX 2070"));

        let amd = r#"03:00.0 "VGA compatible controller" "Advanced Micro Devices, Inc. [AMD/ATI]" "Navi 32 [Radeon RX 7700 XT / 7800 XT]" -rc8 "" """#;
        assert_eq!(
            parse_lspci_line(amd).as_deref(),
            Some("AMD Radeon RX 7700 XT / 7800 XT")
        );

        let usb = r#"00:14.0 "USB controller" "Intel Corporation" "Cannon Point-LP USB 3.1 xHCI Host Controller" -r30 "Lenovo" "Device 2292""#;
        assert_eq!(parse_lspci_line(usb), None);
        assert_eq!(parse_lspci_line("garbage"), None);
    }

    #[test]
    fn meminfo_with_available() {
        let meminfo = "\
MemTotal:        8049260 kB
MemFree:          901432 kB
MemAvailable:    4024630 kB
Buffers:          210000 kB
";
        let usage = parse_meminfo(Cursor::new(meminfo)).unwrap();
        assert_eq!(usage.total, 8049260 * 1024);
        assert_eq!(usage.used, (8049260 - 4024630) * 1024);
    }

    #[test]
    fn meminfo_without_available() {
        let meminfo = "\
MemTotal:        1000 kB
MemFree:          200 kB
Buffers:          100 kB
Cached:           300 kB
";
        let usage = parse_meminfo(Cursor::new(meminfo)).unwrap();
        assert_eq!(usage.used, 400 * 1024);
        assert_eq!(parse_meminfo(Cursor::new("MemFree: 1 kB\n")), None);
    }

    #[test]
    fn cpu_model_from_cpuinfo() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cpuinfo");
        fs::write(
            &path,
            "processor\t: 0\nvendor_id\t: GenuineIntel\nmodel name\t: Intel(R) Core(TM) i7-8565U CPU @ 1.80GHz\n",
        )
        .unwrap();
        assert_eq!(read_cpu_model(&path).unwrap(), "Intel Core i7-8565U");

        fs::write(&path, "processor\t: 0\nBogoMIPS\t: 108.00\n\nHardware\t: BCM2835\n").unwrap();
        assert_eq!(read_cpu_model(&path).unwrap(), "BCM2835");

        fs::write(&path, "processor\t: 0\n").unwrap();
        assert!(read_cpu_model(&path).is_err());
    }

    #[test]
    fn resolutions_of_connected_connectors() {
        let dir = tempfile::tempdir().unwrap();
        let connector = |name: &str, status: &str, modes: &str| {
            let path = dir.path().join(name);
            fs::create_dir(&path).unwrap();
            fs::write(path.join("status"), status).unwrap();
            fs::write(path.join("modes"), modes).unwrap();
        };
        connector("card0-eDP-1", "connected\n", "1920x1080\n1280x720\n");
        connector("card0-HDMI-A-1", "disconnected\n", "");
        connector("card1-DP-2", "connected\n", "2560x1440\n");

        assert_eq!(
            collect_resolutions_in(dir.path()).unwrap(),
            vec!["1920x1080".to_string(), "2560x1440".to_string()]
        );
    }

    #[test]
    fn missing_drm_reads_as_no_display() {
        let dir = tempfile::tempdir().unwrap();
        for drm in [dir.path().join("missing"), dir.path().to_path_buf()] {
            let err = collect_resolutions_in(&drm).unwrap_err();
            assert_eq!(err.to_string(), "No connected display found");
        }
    }

    #[test]
    fn gpus_from_drm_ids() {
        let dir = tempfile::tempdir().unwrap();
        let device = dir.path().join("card0/device");
        fs::create_dir_all(&device).unwrap();
        fs::write(device.join("vendor"), "0x8086\n").unwrap();
        fs::write(device.join("device"), "0x3ea0\n").unwrap();
        fs::create_dir_all(dir.path().join("card0-eDP-1")).unwrap();

        assert_eq!(drm_gpus(dir.path()), vec!["Intel GPU (0x3ea0)".to_string()]);
    }

    #[test]
    fn root_filesystem_has_size() {
        let usage = statvfs_usage(Path::new("/")).unwrap();
        assert!(usage.total > 0);
        assert!(usage.used <= usage.total);
    }
}
