//! Desktop environment, window manager and toolkit appearance detection

use crate::data::{DesktopInfo, ToolkitSetting};
use crate::error::{FastfetchError, Result};
use crate::utils::file::{parse_prop_file, parse_prop_file_home};
use std::path::Path;

const WM_NAMES: &[&str] = &[
    "sway", "hyprland", "kwin_wayland", "kwin_x11", "niri", "mutter", "xfwm4", "openbox", "i3",
    "bspwm", "awesome", "weston", "gnome-session",
];

const PLASMA_SESSIONS: &[&str] = &[
    "/usr/share/xsessions/plasma.desktop",
    "/usr/share/wayland-sessions/plasma.desktop",
    "/usr/share/xsessions/plasmax11.desktop",
];

pub fn detect_desktop() -> Result<DesktopInfo> {
    detect_desktop_with(|var| std::env::var(var).ok(), scan_window_managers)
}

/// Desktop detection over any environment lookup and process scan
pub fn detect_desktop_with<E, S>(env: E, scan: S) -> Result<DesktopInfo>
where
    E: Fn(&str) -> Option<String>,
    S: FnOnce() -> Option<String>,
{
    let var = |name: &str| env(name).filter(|v| !v.is_empty());

    let name = var("XDG_CURRENT_DESKTOP")
        // "ubuntu:GNOME" names the actual desktop last
        .and_then(|v| v.rsplit(':').find(|part| !part.is_empty()).map(str::to_string))
        .or_else(|| var("DESKTOP_SESSION"))
        .map(|v| capitalize_first_letter(&v))
        .or_else(scan)
        .ok_or_else(|| FastfetchError::Detection("No desktop environment found".to_string()))?;

    let version = if is_plasma(&name) {
        plasma_version()
    } else {
        None
    };

    Ok(DesktopInfo {
        name,
        version,
        session: var("XDG_SESSION_TYPE"),
    })
}

fn is_plasma(name: &str) -> bool {
    matches!(name.to_lowercase().as_str(), "kde" | "plasma" | "plasmawayland")
}

fn plasma_version() -> Option<String> {
    PLASMA_SESSIONS.iter().find_map(|path| {
        parse_prop_file(path, "X-KDE-PluginInfo-Version").filter(|v| !v.is_empty())
    })
}

/// Look for a known window manager among the running processes
fn scan_window_managers() -> Option<String> {
    let entries = std::fs::read_dir("/proc").ok()?;
    for entry in entries.filter_map(|e| e.ok()) {
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if name.parse::<u32>().is_err() {
            continue;
        }
        let Ok(comm) = std::fs::read_to_string(entry.path().join("comm")) else {
            continue;
        };
        if let Some(wm) = match_window_manager(comm.trim()) {
            tracing::debug!(pid = name, wm = %wm, "window manager found");
            return Some(wm);
        }
    }
    None
}

pub fn match_window_manager(comm: &str) -> Option<String> {
    let wm = WM_NAMES.iter().find(|wm| comm.starts_with(*wm))?;
    if *wm == "gnome-session" {
        return Some("GNOME".to_string());
    }
    Some(capitalize_first_letter(wm))
}

pub fn capitalize_first_letter(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// An appearance setting and where each toolkit stores it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appearance {
    Theme,
    Icons,
    Font,
}

const GTK2_FILES: &[&str] = &[".gtkrc-2.0", ".config/gtk-2.0/gtkrc"];
const GTK3_FILE: &str = ".config/gtk-3.0/settings.ini";
const GTK4_FILE: &str = ".config/gtk-4.0/settings.ini";
const KDE_GLOBALS: &str = ".config/kdeglobals";

impl Appearance {
    pub fn key(self) -> &'static str {
        match self {
            Appearance::Theme => "Theme",
            Appearance::Icons => "Icons",
            Appearance::Font => "Font",
        }
    }

    fn gtk_key(self) -> &'static str {
        match self {
            Appearance::Theme => "gtk-theme-name",
            Appearance::Icons => "gtk-icon-theme-name",
            Appearance::Font => "gtk-font-name",
        }
    }

    /// `kdeglobals` is scanned without regard to sections; `Theme` only
    /// appears under `[Icons]` there.
    fn kde_key(self) -> &'static str {
        match self {
            Appearance::Theme => "widgetStyle",
            Appearance::Icons => "Theme",
            Appearance::Font => "font",
        }
    }

    fn prettify(self, value: String) -> String {
        match self {
            Appearance::Font => prettify_font(&value),
            _ => value,
        }
    }

    /// Read the setting from every toolkit's config below `home`
    pub fn read(self, home: &Path) -> Result<ToolkitSetting> {
        let read = |relative: &str, key: &str| -> Result<Option<String>> {
            Ok(parse_prop_file_home(home, relative, key)?
                .filter(|v| !v.is_empty())
                .map(|v| self.prettify(v)))
        };

        let mut gtk2 = None;
        for file in GTK2_FILES.iter().copied() {
            gtk2 = read(file, self.gtk_key())?;
            if gtk2.is_some() {
                break;
            }
        }

        Ok(ToolkitSetting {
            plasma: read(KDE_GLOBALS, self.kde_key())?,
            gtk2,
            gtk3: read(GTK3_FILE, self.gtk_key())?,
            gtk4: read(GTK4_FILE, self.gtk_key())?,
        })
    }
}

/// `Noto Sans,10,-1,5,50,...` (Qt) and `Cantarell 11` (GTK) both become
/// `Name (Npt)`
pub fn prettify_font(raw: &str) -> String {
    let mut fields = raw.split(',');
    let first = fields.next().unwrap_or_default().trim();
    if let Some(size) = fields.next() {
        let size = size.trim();
        if !size.is_empty() && size.parse::<f32>().is_ok() {
            return format!("{} ({}pt)", first, size);
        }
        return first.to_string();
    }

    match first.rsplit_once(' ') {
        Some((name, size)) if size.parse::<f32>().is_ok() => {
            format!("{} ({}pt)", name.trim_end(), size)
        }
        _ => first.to_string(),
    }
}
