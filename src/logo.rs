//! Built-in ASCII logos, default logo detection and logo row rendering

use crate::display::{BOLD, RESET};
use crate::error::Result;
use crate::utils::file::parse_prop_file;
use std::io::{self, BufRead, Write};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

struct LogoSpec {
    /// First entry is the name shown by `--list-logos`, the rest are aliases
    names: &'static [&'static str],
    color: &'static str,
    art: &'static str,
}

static LOGOS: &[LogoSpec] = &[
    LogoSpec {
        names: &["arch", "archlinux", "arch_linux"],
        color: "36",
        art: include_str!("../ascii/arch.txt"),
    },
    LogoSpec {
        names: &["debian"],
        color: "31",
        art: include_str!("../ascii/debian.txt"),
    },
    LogoSpec {
        names: &["ubuntu"],
        color: "31",
        art: include_str!("../ascii/ubuntu.txt"),
    },
    LogoSpec {
        names: &["fedora"],
        color: "34",
        art: include_str!("../ascii/fedora.txt"),
    },
    LogoSpec {
        names: &["gentoo"],
        color: "35",
        art: include_str!("../ascii/gentoo.txt"),
    },
    LogoSpec {
        names: &["void", "voidlinux"],
        color: "32",
        art: include_str!("../ascii/void.txt"),
    },
    LogoSpec {
        names: &["nixos", "nix"],
        color: "34",
        art: include_str!("../ascii/nixos.txt"),
    },
    LogoSpec {
        names: &["manjaro"],
        color: "32",
        art: include_str!("../ascii/manjaro.txt"),
    },
    LogoSpec {
        names: &["mint", "linuxmint"],
        color: "32",
        art: include_str!("../ascii/mint.txt"),
    },
    LogoSpec {
        names: &["opensuse", "opensuse-leap", "opensuse-tumbleweed", "suse"],
        color: "32",
        art: include_str!("../ascii/opensuse.txt"),
    },
    LogoSpec {
        names: &["linux", "tux"],
        color: "37",
        art: include_str!("../ascii/linux.txt"),
    },
];

const FALLBACK: &str = "linux";

/// A logo ready to be rendered next to the information rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logo {
    name: String,
    color: String,
    lines: Vec<String>,
    width: usize,
}

impl Logo {
    fn from_spec(spec: &LogoSpec) -> Self {
        Self::new(
            spec.names[0],
            format!("\x1b[{}m", spec.color),
            spec.art.lines().map(String::from).collect(),
        )
    }

    pub fn new(name: &str, color: String, lines: Vec<String>) -> Self {
        let width = lines
            .iter()
            .map(|line| UnicodeWidthStr::width(line.as_str()))
            .max()
            .unwrap_or(0);
        Self {
            name: name.to_string(),
            color,
            lines,
            width,
        }
    }

    /// Look up a built-in logo by name or alias, ignoring case
    pub fn find(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        LOGOS
            .iter()
            .find(|spec| spec.names.contains(&name.as_str()))
            .map(Self::from_spec)
    }

    /// Logo for the running distribution, falling back to Tux
    pub fn detect() -> Self {
        Self::detect_from(Path::new("/etc/os-release"))
    }

    /// Match `ID`, then every word of `ID_LIKE`, from an os-release file
    pub fn detect_from(os_release: &Path) -> Self {
        let id = parse_prop_file(os_release, "ID").unwrap_or_default();
        let id_like = parse_prop_file(os_release, "ID_LIKE").unwrap_or_default();

        std::iter::once(id.as_str())
            .chain(id_like.split_whitespace())
            .filter(|candidate| !candidate.is_empty())
            .find_map(Self::find)
            .unwrap_or_else(Self::fallback)
    }

    pub fn fallback() -> Self {
        LOGOS
            .iter()
            .find(|spec| spec.names[0] == FALLBACK)
            .map(Self::from_spec)
            .unwrap_or_else(|| Self::new(FALLBACK, RESET.to_string(), Vec::new()))
    }

    /// Replace the art with lines read from a file; `~` is expanded
    pub fn with_art_file(self, path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path).to_string();
        let file = std::fs::File::open(&expanded)?;
        let lines = io::BufReader::new(file)
            .lines()
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self::new(&self.name, self.color, lines))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// ANSI escape sequence of the logo's main color
    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }

    /// One row of art padded to the logo width, followed by `separator` spaces.
    /// Rows past the end of the art are blank padding.
    pub fn render_row(&self, row: usize, separator: i16) -> String {
        let line = self.lines.get(row).map(String::as_str).unwrap_or("");
        let padding = self.width.saturating_sub(UnicodeWidthStr::width(line));
        let gap = usize::try_from(separator).unwrap_or(0);
        format!(
            "{}{}{}{}{}{}",
            self.color,
            BOLD,
            line,
            " ".repeat(padding),
            RESET,
            " ".repeat(gap)
        )
    }
}

/// Primary names of all built-in logos, in table order
pub fn logo_names() -> impl Iterator<Item = &'static str> {
    LOGOS.iter().map(|spec| spec.names[0])
}

pub fn list_logos<W: Write>(out: &mut W) -> io::Result<()> {
    for name in logo_names() {
        writeln!(out, "{}", name)?;
    }
    Ok(())
}

pub fn print_logos<W: Write>(out: &mut W) -> io::Result<()> {
    for spec in LOGOS {
        let logo = Logo::from_spec(spec);
        writeln!(out, "{}{}:{}", BOLD, logo.name(), RESET)?;
        for row in 0..logo.height() {
            writeln!(out, "{}", logo.render_row(row, 0))?;
        }
        writeln!(out)?;
    }
    Ok(())
}
