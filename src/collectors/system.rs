//! System information collection (OS, host, shell, terminal, locale)

use crate::data::SessionInfo;
use crate::error::{FastfetchError, Result};
use crate::utils::file::{parse_prop_file, read_value};
use std::path::Path;

pub const OS_RELEASE: &[&str] = &["/etc/os-release", "/usr/lib/os-release"];
const DMI_DIR: &str = "/sys/devices/virtual/dmi/id";
const DEVICETREE_MODEL: &str = "/sys/firmware/devicetree/base/model";

/// `PRETTY_NAME`, or `NAME` when there is no pretty name
pub fn read_os_name() -> Result<String> {
    OS_RELEASE
        .iter()
        .find_map(|path| read_os_name_from(Path::new(path)))
        .ok_or_else(|| FastfetchError::Detection("os-release has no NAME".to_string()))
}

pub fn read_os_name_from(os_release: &Path) -> Option<String> {
    ["PRETTY_NAME", "NAME"]
        .iter()
        .find_map(|key| parse_prop_file(os_release, key).filter(|name| !name.is_empty()))
}

pub fn read_host() -> Result<String> {
    read_host_from(Path::new(DMI_DIR), Path::new(DEVICETREE_MODEL))
}

/// DMI product name and version, or the device-tree model on boards without DMI
pub fn read_host_from(dmi: &Path, devicetree_model: &Path) -> Result<String> {
    let field = |name: &str| read_value(dmi.join(name)).filter(|v| !is_placeholder(v));

    match (field("product_name"), field("product_version")) {
        (Some(name), Some(version)) if !name.contains(&version) => {
            Ok(format!("{} {}", name, version))
        }
        (Some(name), _) => Ok(name),
        (None, _) => read_value(devicetree_model)
            .map(|model| model.trim_end_matches('\0').to_string())
            .filter(|model| !model.is_empty())
            .ok_or_else(|| FastfetchError::Detection("No host information found".to_string())),
    }
}

fn is_placeholder(value: &str) -> bool {
    const PLACEHOLDERS: &[&str] = &[
        "to be filled",
        "o.e.m",
        "default string",
        "system product name",
        "system version",
        "not specified",
        "not applicable",
    ];
    let lower = value.to_lowercase();
    lower == "none" || PLACEHOLDERS.iter().any(|p| lower.contains(p))
}

const KNOWN_SHELLS: &[&str] = &[
    "bash", "zsh", "fish", "dash", "ksh", "mksh", "oksh", "csh", "tcsh", "nu", "elvish", "xonsh",
    "ion", "yash", "sh",
];

/// Processes that sit between the shell and the terminal
const WRAPPERS: &[&str] = &["sudo", "su", "doas", "login", "script", "strace", "time"];

const MAX_DEPTH: usize = 16;

/// `/proc/<pid>/stat` reduced to the command name and the parent pid.
/// The name may contain spaces and parentheses, so it ends at the last `)`.
pub fn parse_stat(stat: &str) -> Option<(String, u32)> {
    let open = stat.find('(')?;
    let close = stat.rfind(')')?;
    let comm = stat.get(open + 1..close)?.to_string();
    let ppid = stat.get(close + 1..)?.split_whitespace().nth(1)?.parse().ok()?;
    Some((comm, ppid))
}

fn read_process(pid: u32) -> Option<(String, u32)> {
    let stat = std::fs::read_to_string(format!("/proc/{}/stat", pid)).ok()?;
    parse_stat(&stat)
}

/// Find the shell and terminal by walking up from our parent process
pub fn detect_session() -> SessionInfo {
    // SAFETY: getppid never fails
    let parent = unsafe { libc::getppid() } as u32;
    let mut session = walk_session(parent, read_process);

    if session.shell.is_none() {
        session.shell = std::env::var("SHELL").ok().map(|path| basename(&path));
    }
    if session.terminal.is_none() {
        session.terminal = ["TERM_PROGRAM", "TERM"]
            .iter()
            .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()));
    }
    session
}

/// Process tree walk over any `pid -> (name, ppid)` lookup
pub fn walk_session<F>(start: u32, lookup: F) -> SessionInfo
where
    F: Fn(u32) -> Option<(String, u32)>,
{
    let mut session = SessionInfo::default();
    let mut pid = start;

    for _ in 0..MAX_DEPTH {
        if pid <= 1 {
            break;
        }
        let Some((name, ppid)) = lookup(pid) else {
            break;
        };

        if KNOWN_SHELLS.contains(&name.as_str()) {
            // nested shells: the outermost one before the terminal wins
            session.shell = Some(name);
        } else if !WRAPPERS.contains(&name.as_str()) && session.shell.is_some() {
            session.terminal = Some(clean_terminal_name(&name));
            break;
        }
        pid = ppid;
    }

    session
}

fn clean_terminal_name(comm: &str) -> String {
    // comm is truncated to 15 bytes, e.g. "gnome-terminal-"
    comm.trim_end_matches('-').to_string()
}

fn basename(path: &str) -> String {
    path.rsplit('/').next().unwrap_or(path).to_string()
}

const LOCALE_FILES: &[&str] = &["/etc/locale.conf", "/etc/default/locale"];

pub fn read_locale() -> Result<String> {
    read_locale_with(|var| std::env::var(var).ok(), LOCALE_FILES)
}

pub fn read_locale_with<F>(env: F, files: &[&str]) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    ["LC_ALL", "LANG"]
        .iter()
        .find_map(|var| env(var).filter(|v| !v.is_empty()))
        .or_else(|| {
            files
                .iter()
                .find_map(|file| parse_prop_file(file, "LANG").filter(|v| !v.is_empty()))
        })
        .ok_or_else(|| FastfetchError::Detection("No locale set".to_string()))
}
