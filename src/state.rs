//! The state record every printer reads from.
//!
//! Built exactly once, before the first printer runs, and never mutated
//! afterwards. Everything that changes while printing lives in
//! [`crate::display::Printer`].

use crate::cli::Options;
use crate::config::{Config, DisplayConfig};
use crate::error::Result;
use crate::logo::Logo;
use std::ffi::CStr;
use std::io;
use std::mem::MaybeUninit;
use std::path::PathBuf;

pub const DEFAULT_SEPARATOR: i16 = 4;

/// Invoking user, from the passwd database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInfo {
    pub name: String,
    pub home: PathBuf,
    /// Login shell path
    pub shell: Option<String>,
}

/// `uname(2)` fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KernelInfo {
    pub nodename: String,
    pub release: String,
    pub machine: String,
}

/// `sysinfo(2)` snapshot, sizes in bytes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub uptime: u64,
    pub total_ram: u64,
    pub free_ram: u64,
    pub buffer_ram: u64,
}

#[derive(Debug, Clone)]
pub struct State {
    pub user: UserInfo,
    pub kernel: KernelInfo,
    pub snapshot: Snapshot,
    pub logo: Logo,
    /// Key color escape sequence
    pub color: String,
    pub logo_separator: i16,
    pub show_errors: bool,
}

impl State {
    /// Query the system and merge command line options over the config file
    pub fn init(options: &Options, config: &Config) -> Result<Self> {
        let display = &config.display;
        let logo = select_logo(options, display);

        // an explicit --logo brings its own color, hiding the configured one
        let color = options
            .color
            .clone()
            .or_else(|| options.logo.is_none().then(|| display.color_escape()).flatten())
            .unwrap_or_else(|| logo.color().to_string());

        Ok(Self {
            user: UserInfo::lookup(),
            kernel: KernelInfo::uname()?,
            snapshot: Snapshot::sysinfo()?,
            logo,
            color,
            logo_separator: options
                .separator
                .or(display.separator)
                .unwrap_or(DEFAULT_SEPARATOR),
            show_errors: options.show_errors || display.show_errors.unwrap_or(false),
        })
    }

    pub fn hostname(&self) -> &str {
        &self.kernel.nodename
    }
}

fn select_logo(options: &Options, display: &DisplayConfig) -> Logo {
    let logo = options
        .logo
        .as_deref()
        .or(display.logo.as_deref())
        .and_then(Logo::find)
        .unwrap_or_else(Logo::detect);

    match display.ascii_path() {
        Some(path) => logo.clone().with_art_file(path).unwrap_or_else(|err| {
            tracing::warn!(path, %err, "cannot read custom logo, using built-in art");
            logo
        }),
        None => logo,
    }
}

impl UserInfo {
    /// Look up the current uid; falls back to `$USER` and `$HOME` if the
    /// passwd database has no entry.
    pub fn lookup() -> Self {
        // SAFETY: getuid never fails
        let uid = unsafe { libc::getuid() };
        passwd_entry(uid).unwrap_or_else(|| {
            tracing::debug!(uid, "no passwd entry, using environment");
            Self {
                name: std::env::var("USER").unwrap_or_else(|_| "unknown".to_string()),
                home: dirs::home_dir().unwrap_or_else(|| PathBuf::from("/")),
                shell: std::env::var("SHELL").ok(),
            }
        })
    }
}

fn passwd_entry(uid: libc::uid_t) -> Option<UserInfo> {
    let mut buffer: Vec<libc::c_char> = vec![0; 1024];

    loop {
        // SAFETY: all pointers reference live locals; on success `result`
        // points at `pwd`, whose strings live in `buffer`.
        let mut pwd: libc::passwd = unsafe { std::mem::zeroed() };
        let mut result: *mut libc::passwd = std::ptr::null_mut();
        let rc = unsafe {
            libc::getpwuid_r(uid, &mut pwd, buffer.as_mut_ptr(), buffer.len(), &mut result)
        };

        if rc == libc::ERANGE && buffer.len() < 1 << 20 {
            let len = buffer.len() * 2;
            buffer.resize(len, 0);
            continue;
        }
        if rc != 0 || result.is_null() {
            return None;
        }

        let text = |ptr: *const libc::c_char| -> Option<String> {
            if ptr.is_null() {
                return None;
            }
            // SAFETY: non-null passwd fields are NUL-terminated strings in `buffer`
            let value = unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned();
            Some(value).filter(|value| !value.is_empty())
        };

        return Some(UserInfo {
            name: text(pwd.pw_name)?,
            home: PathBuf::from(text(pwd.pw_dir)?),
            shell: text(pwd.pw_shell),
        });
    }
}

impl KernelInfo {
    pub fn uname() -> Result<Self> {
        let mut uts = MaybeUninit::<libc::utsname>::uninit();
        // SAFETY: uname fills the whole struct when it returns 0
        if unsafe { libc::uname(uts.as_mut_ptr()) } != 0 {
            return Err(io::Error::last_os_error().into());
        }
        let uts = unsafe { uts.assume_init() };

        Ok(Self {
            nodename: c_field(&uts.nodename),
            release: c_field(&uts.release),
            machine: c_field(&uts.machine),
        })
    }
}

fn c_field(chars: &[libc::c_char]) -> String {
    let bytes: Vec<u8> = chars
        .iter()
        .take_while(|&&c| c != 0)
        .map(|&c| c as u8)
        .collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

impl Snapshot {
    pub fn sysinfo() -> Result<Self> {
        let mut info = MaybeUninit::<libc::sysinfo>::uninit();
        // SAFETY: sysinfo fills the whole struct when it returns 0
        if unsafe { libc::sysinfo(info.as_mut_ptr()) } != 0 {
            return Err(io::Error::last_os_error().into());
        }
        let info = unsafe { info.assume_init() };
        let unit = u64::from(info.mem_unit.max(1));

        Ok(Self {
            uptime: info.uptime.max(0) as u64,
            total_ram: info.totalram as u64 * unit,
            free_ram: info.freeram as u64 * unit,
            buffer_ram: info.bufferram as u64 * unit,
        })
    }
}

#[cfg(test)]
pub(crate) fn test_state() -> State {
    State {
        user: UserInfo {
            name: "tester".into(),
            home: PathBuf::from("/nonexistent/home/tester"),
            shell: Some("/bin/zsh".into()),
        },
        kernel: KernelInfo {
            nodename: "box".into(),
            release: "6.1.0-test".into(),
            machine: "x86_64".into(),
        },
        snapshot: Snapshot {
            uptime: 3 * 3600 + 120,
            total_ram: 8 << 30,
            free_ram: 4 << 30,
            ..Default::default()
        },
        logo: Logo::new("t", "\x1b[36m".into(), vec!["/\\".into(), "\\/".into()]),
        color: "\x1b[35m".into(),
        logo_separator: 1,
        show_errors: false,
    }
}
