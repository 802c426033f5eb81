//! Package management information collection

use crate::data::{PackageCount, PackageInfo};
use crate::error::Result;
use crate::utils::{command::*, file::*};
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Supported package managers, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Pacman,  // Arch Linux, Manjaro
    Dpkg,    // Debian, Ubuntu
    Rpm,     // Fedora, openSUSE
    Xbps,    // Void Linux
    Portage, // Gentoo
    Nix,     // NixOS
    Flatpak,
    Snap,
}

impl PackageManager {
    pub const ALL: [PackageManager; 8] = [
        PackageManager::Pacman,
        PackageManager::Dpkg,
        PackageManager::Rpm,
        PackageManager::Xbps,
        PackageManager::Portage,
        PackageManager::Nix,
        PackageManager::Flatpak,
        PackageManager::Snap,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PackageManager::Pacman => "pacman",
            PackageManager::Dpkg => "dpkg",
            PackageManager::Rpm => "rpm",
            PackageManager::Xbps => "xbps",
            PackageManager::Portage => "emerge",
            PackageManager::Nix => "nix",
            PackageManager::Flatpak => "flatpak",
            PackageManager::Snap => "snap",
        }
    }

    /// Installed packages; `Ok(0)` when the manager is not present
    pub fn count(self, home: &Path) -> Result<usize> {
        match self {
            PackageManager::Pacman => count_subdirs("/var/lib/pacman/local"),
            PackageManager::Dpkg => count_dpkg("/var/lib/dpkg/status"),
            PackageManager::Rpm => count_rpm(),
            PackageManager::Xbps => count_xbps(),
            PackageManager::Portage => count_portage("/var/db/pkg"),
            PackageManager::Nix => count_nix(),
            PackageManager::Flatpak => {
                let user = home_path(home, ".local/share/flatpak/app")?;
                Ok(count_subdirs("/var/lib/flatpak/app")? + count_subdirs(user)?)
            }
            PackageManager::Snap => count_snap("/snap"),
        }
    }
}

/// Count packages of every manager; managers that fail are logged and skipped
pub fn collect_package_info(home: &Path) -> PackageInfo {
    let counts = PackageManager::ALL
        .iter()
        .filter_map(|&manager| match manager.count(home) {
            Ok(0) => None,
            Ok(count) => Some(PackageCount {
                manager: manager.label(),
                count,
            }),
            Err(err) => {
                tracing::debug!(manager = manager.label(), %err, "package count failed");
                None
            }
        })
        .collect();

    PackageInfo { counts }
}

/// Directories directly below `dir`; a missing directory counts as zero
pub fn count_subdirs<P: AsRef<Path>>(dir: P) -> Result<usize> {
    let dir = dir.as_ref();
    if !file_exists(dir) {
        return Ok(0);
    }
    Ok(fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .count())
}

fn count_dpkg<P: AsRef<Path>>(status: P) -> Result<usize> {
    let status = status.as_ref();
    if !file_exists(status) {
        return Ok(0);
    }
    count_dpkg_installed(BufReader::new(fs::File::open(status)?))
}

/// Count `Status: install ok installed` stanzas of a dpkg status database
pub fn count_dpkg_installed<R: BufRead>(reader: R) -> Result<usize> {
    let mut count = 0;
    for line in reader.lines() {
        if line?.trim_end() == "Status: install ok installed" {
            count += 1;
        }
    }
    Ok(count)
}

fn count_rpm() -> Result<usize> {
    if !file_exists("/var/lib/rpm") || !command_exists("rpm") {
        return Ok(0);
    }
    let output = run_command("rpm", &["-qa"])?;
    Ok(output.lines().filter(|line| !line.is_empty()).count())
}

fn count_xbps() -> Result<usize> {
    if !file_exists("/var/db/xbps") || !command_exists("xbps-query") {
        return Ok(0);
    }
    let output = run_command("xbps-query", &["-l"])?;
    Ok(output.lines().filter(|line| line.starts_with("ii")).count())
}

/// Gentoo keeps one directory per package below one directory per category
pub fn count_portage<P: AsRef<Path>>(db: P) -> Result<usize> {
    let db = db.as_ref();
    if !file_exists(db) {
        return Ok(0);
    }
    let mut count = 0;
    for category in fs::read_dir(db)?.filter_map(|entry| entry.ok()) {
        if category.path().is_dir() {
            count += count_subdirs(category.path())?;
        }
    }
    Ok(count)
}

fn count_nix() -> Result<usize> {
    let profile = "/run/current-system/sw";
    if !file_exists(profile) || !command_exists("nix-store") {
        return Ok(0);
    }
    let output = run_command("nix-store", &["--query", "--requisites", profile])?;
    Ok(output.lines().count())
}

/// Mounted snaps, without the `bin` directory
pub fn count_snap<P: AsRef<Path>>(dir: P) -> Result<usize> {
    let dir = dir.as_ref();
    if !file_exists(dir) {
        return Ok(0);
    }
    Ok(fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir() && entry.file_name() != "bin")
        .count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn dpkg_counts_installed_only() {
        let status = "\
Package: bash
Status: install ok installed

Package: removed-thing
Status: deinstall ok config-files

Package: coreutils
Status: install ok installed
";
        assert_eq!(count_dpkg_installed(Cursor::new(status)).unwrap(), 2);
    }

    #[test]
    fn subdirectories_are_counted() {
        let dir = tempfile::tempdir().unwrap();
        for pkg in ["bash-5.2", "zsh-5.9", "vim-9.0"] {
            fs::create_dir(dir.path().join(pkg)).unwrap();
        }
        fs::write(dir.path().join("ALPM_DB_VERSION"), "9\n").unwrap();
        assert_eq!(count_subdirs(dir.path()).unwrap(), 3);
        assert_eq!(count_subdirs(dir.path().join("missing")).unwrap(), 0);
    }

    #[test]
    fn portage_counts_packages_across_categories() {
        let dir = tempfile::tempdir().unwrap();
        for pkg in ["app-shells/bash-5.2", "app-shells/zsh-5.9", "sys-apps/portage-3.0"] {
            fs::create_dir_all(dir.path().join(pkg)).unwrap();
        }
        assert_eq!(count_portage(dir.path()).unwrap(), 3);
    }

    #[test]
    fn snap_skips_bin() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["bin", "core22", "firefox"] {
            fs::create_dir(dir.path().join(name)).unwrap();
        }
        assert_eq!(count_snap(dir.path()).unwrap(), 2);
    }

    #[test]
    fn labels_follow_display_order() {
        let labels: Vec<_> = PackageManager::ALL.iter().map(|m| m.label()).collect();
        assert_eq!(
            labels,
            ["pacman", "dpkg", "rpm", "xbps", "emerge", "nix", "flatpak", "snap"]
        );
    }
}
