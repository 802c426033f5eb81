//! File reading utilities and the property-file scanner

use crate::error::{FastfetchError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Longest path the home-relative scanner is willing to build
pub const PATH_MAX: usize = libc::PATH_MAX as usize;

/// Scan `path` for the first `key=value` line and return the value.
///
/// Whitespace around the `=` and one pair of surrounding quotes are removed.
/// Returns `None` when the file cannot be opened or the key never appears,
/// and `Some("")` when the key only ever appears with an empty value.
pub fn parse_prop_file<P: AsRef<Path>>(path: P, key: &str) -> Option<String> {
    parse_prop_file_with(path, key, '=')
}

/// Same as [`parse_prop_file`] with an explicit delimiter, e.g. `:` for
/// `/proc/cpuinfo`.
pub fn parse_prop_file_with<P: AsRef<Path>>(path: P, key: &str, delimiter: char) -> Option<String> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            tracing::debug!(path = %path.display(), %err, "property file not readable");
            return None;
        }
    };
    scan_properties(BufReader::new(file), key, delimiter)
}

/// Resolve `relative` under `home` and scan it.
///
/// Fails with [`FastfetchError::PathTooLong`] instead of building a path
/// longer than [`PATH_MAX`].
pub fn parse_prop_file_home(home: &Path, relative: &str, key: &str) -> Result<Option<String>> {
    Ok(parse_prop_file(home_path(home, relative)?, key))
}

/// `home` + `/` + `relative`, bounded by [`PATH_MAX`]
pub fn home_path(home: &Path, relative: &str) -> Result<PathBuf> {
    let relative = relative.trim_start_matches('/');
    let len = home.as_os_str().len() + 1 + relative.len();
    if len > PATH_MAX {
        return Err(FastfetchError::PathTooLong { len, max: PATH_MAX });
    }
    Ok(home.join(relative))
}

pub fn scan_properties<R: BufRead>(mut reader: R, key: &str, delimiter: char) -> Option<String> {
    let mut buf = Vec::with_capacity(128);
    let mut seen_empty = false;

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                tracing::debug!(%err, "stopped scanning property file");
                break;
            }
        }

        let line = String::from_utf8_lossy(&buf);
        if let Some(value) = match_property(&line, key, delimiter) {
            if !value.is_empty() {
                return Some(value.to_string());
            }
            seen_empty = true;
        }
    }

    seen_empty.then(String::new)
}

fn match_property<'a>(line: &'a str, key: &str, delimiter: char) -> Option<&'a str> {
    let rest = line.trim_start().strip_prefix(key)?;
    let value = rest.trim_start().strip_prefix(delimiter)?;
    Some(unquote(value.trim()))
}

/// Strip one pair of matching `"` or `'` quotes
pub fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

/// Read the first line of a small file, trimmed.
/// Meant for single-value sysfs/procfs files; reads with one `read(2)`.
pub fn read_first_line<P: AsRef<Path>>(path: P) -> Result<String> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let path_cstr = CString::new(path.as_ref().as_os_str().as_bytes())
        .map_err(|_| FastfetchError::Parse("path contains a NUL byte".to_string()))?;

    let mut buffer = [0u8; 512];
    // SAFETY: `path_cstr` is NUL-terminated, `buffer` outlives the read and
    // the descriptor is closed before returning.
    let bytes_read = unsafe {
        let fd = libc::open(path_cstr.as_ptr(), libc::O_RDONLY | libc::O_CLOEXEC);
        if fd < 0 {
            return Err(std::io::Error::last_os_error().into());
        }
        let n = libc::read(fd, buffer.as_mut_ptr() as *mut libc::c_void, buffer.len());
        libc::close(fd);
        n
    };

    if bytes_read < 0 {
        return Err(std::io::Error::last_os_error().into());
    }

    let content = String::from_utf8_lossy(&buffer[..bytes_read as usize]);
    Ok(content.lines().next().unwrap_or("").trim().to_string())
}

/// Like [`read_first_line`], but empty results and errors become `None`
pub fn read_value<P: AsRef<Path>>(path: P) -> Option<String> {
    read_first_line(path).ok().filter(|value| !value.is_empty())
}

pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    fn scan(content: &str, key: &str) -> Option<String> {
        scan_properties(Cursor::new(content), key, '=')
    }

    #[test]
    fn finds_quoted_os_release_values() {
        let os_release = "NAME=\"Arch Linux\"\nPRETTY_NAME=\"Arch Linux\"\nID=arch\n";
        assert_eq!(scan(os_release, "ID").as_deref(), Some("arch"));
        assert_eq!(scan(os_release, "NAME").as_deref(), Some("Arch Linux"));
    }

    #[test]
    fn key_must_be_followed_by_delimiter() {
        let content = "NAME_SUFFIX=wrong\nNAME = right\n";
        assert_eq!(scan(content, "NAME").as_deref(), Some("right"));
    }

    #[test]
    fn first_non_empty_match_wins() {
        let content = "gtk-theme-name=\ngtk-theme-name=Adwaita\ngtk-theme-name=Other\n";
        assert_eq!(scan(content, "gtk-theme-name").as_deref(), Some("Adwaita"));
    }

    #[test]
    fn empty_only_match_is_distinct_from_missing() {
        assert_eq!(scan("LANG=\"\"\n", "LANG").as_deref(), Some(""));
        assert_eq!(scan("LC_ALL=C\n", "LANG"), None);
    }

    #[test]
    fn colon_delimited_cpuinfo() {
        let cpuinfo = "processor\t: 0\nmodel name\t: AMD Ryzen 7 5800X 8-Core Processor\n";
        let value = scan_properties(Cursor::new(cpuinfo), "model name", ':');
        assert_eq!(value.as_deref(), Some("AMD Ryzen 7 5800X 8-Core Processor"));
    }

    #[test]
    fn missing_file_is_none() {
        assert_eq!(parse_prop_file("/nonexistent/fastfetch/os-release", "NAME"), None);
    }

    #[test]
    fn reads_from_disk_and_home() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join(".gtkrc-2.0")).unwrap();
        writeln!(file, "gtk-theme-name=\"Breeze\"").unwrap();

        assert_eq!(
            parse_prop_file(dir.path().join(".gtkrc-2.0"), "gtk-theme-name").as_deref(),
            Some("Breeze")
        );
        let home = parse_prop_file_home(dir.path(), ".gtkrc-2.0", "gtk-theme-name").unwrap();
        assert_eq!(home.as_deref(), Some("Breeze"));
    }

    #[test]
    fn overlong_home_path_is_rejected() {
        let relative = "a".repeat(PATH_MAX);
        let err = parse_prop_file_home(Path::new("/home/user"), &relative, "x").unwrap_err();
        assert!(matches!(err, FastfetchError::PathTooLong { max: PATH_MAX, .. }));
    }

    #[test]
    fn unquote_only_strips_matching_pairs() {
        assert_eq!(unquote("\"a\""), "a");
        assert_eq!(unquote("'a'"), "a");
        assert_eq!(unquote("\"a'"), "\"a'");
        assert_eq!(unquote("\""), "\"");
    }

    #[test]
    fn first_line_of_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("capacity");
        std::fs::write(&path, "87\n").unwrap();
        assert_eq!(read_first_line(&path).unwrap(), "87");
        assert!(read_first_line(dir.path().join("missing")).is_err());
    }
}
