//! System-wide information structures

use std::fmt;

/// Installed package count for one package manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageCount {
    pub manager: &'static str,
    pub count: usize,
}

/// Package counts for every manager that reported at least one package
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageInfo {
    pub counts: Vec<PackageCount>,
}

impl PackageInfo {
    pub fn total(&self) -> usize {
        self.counts.iter().map(|c| c.count).sum()
    }
}

impl fmt::Display for PackageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.counts.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} ({})", entry.count, entry.manager)?;
        }
        Ok(())
    }
}

/// Shell and the terminal it runs in, found by walking up the process tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionInfo {
    pub shell: Option<String>,
    pub terminal: Option<String>,
}

/// Desktop environment or window manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopInfo {
    pub name: String,
    pub version: Option<String>,
    /// `wayland`, `x11`, `tty`...
    pub session: Option<String>,
}

impl fmt::Display for DesktopInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(version) = &self.version {
            write!(f, " {}", version)?;
        }
        if let Some(session) = &self.session {
            write!(f, " ({})", session)?;
        }
        Ok(())
    }
}

/// One appearance setting (theme, icons, font) as seen by each toolkit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolkitSetting {
    pub plasma: Option<String>,
    pub gtk2: Option<String>,
    pub gtk3: Option<String>,
    pub gtk4: Option<String>,
}

impl ToolkitSetting {
    pub fn is_empty(&self) -> bool {
        [&self.plasma, &self.gtk2, &self.gtk3, &self.gtk4]
            .iter()
            .all(|value| value.as_deref().map_or(true, str::is_empty))
    }
}
