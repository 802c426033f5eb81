//! Output formatting: logo rows, keys, errors and the GTK version line

use crate::state::State;
use std::io::{self, Write};

pub const BOLD: &str = "\x1b[1m";
pub const RESET: &str = "\x1b[0m";
pub const ERROR_STYLE: &str = "\x1b[1;31m";

/// Render cursor: owns the output and the current logo row.
///
/// The row counter starts at zero and only ever grows; every logo row that is
/// written advances it by one.
pub struct Printer<'a, W: Write> {
    out: W,
    state: &'a State,
    row: usize,
}

impl<'a, W: Write> Printer<'a, W> {
    pub fn new(state: &'a State, out: W) -> Self {
        Self { out, state, row: 0 }
    }

    pub fn state(&self) -> &'a State {
        self.state
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Raw output, for values that follow a key
    pub fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())
    }

    pub fn newline(&mut self) -> io::Result<()> {
        self.out.write_all(b"\n")
    }

    pub fn print_logo_line(&mut self) -> io::Result<()> {
        let line = self
            .state
            .logo
            .render_row(self.row, self.state.logo_separator);
        self.row += 1;
        self.out.write_all(line.as_bytes())
    }

    /// `key: ` in the key color, without a newline
    pub fn print_key(&mut self, key: &str) -> io::Result<()> {
        write!(self.out, "{}{}{}{}: ", self.state.color, BOLD, key, RESET)
    }

    pub fn print_logo_and_key(&mut self, key: &str) -> io::Result<()> {
        self.print_logo_line()?;
        self.print_key(key)
    }

    /// A complete `key: value` row
    pub fn print_value(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.print_logo_and_key(key)?;
        writeln!(self.out, "{}", value)
    }

    /// Shown only with `--show-errors`; otherwise the category disappears
    pub fn print_error(&mut self, key: &str, message: &str) -> io::Result<()> {
        tracing::debug!(key, message, "category failed");
        if !self.state.show_errors {
            return Ok(());
        }
        self.print_logo_and_key(key)?;
        writeln!(self.out, "{}{}{}", ERROR_STYLE, message, RESET)
    }

    pub fn print_gtk_pretty(
        &mut self,
        gtk2: Option<&str>,
        gtk3: Option<&str>,
        gtk4: Option<&str>,
    ) -> io::Result<()> {
        match format_gtk_pretty(gtk2, gtk3, gtk4) {
            Some(line) => self.write_str(&line),
            None => Ok(()),
        }
    }

    /// Emit the logo rows no category has reached yet
    pub fn print_remaining_logo(&mut self) -> io::Result<()> {
        while self.row < self.state.logo.height() {
            self.print_logo_line()?;
            self.newline()?;
        }
        self.out.flush()
    }
}

/// Merge GTK2/3/4 values into one line, grouping equal versions.
///
/// Empty strings count as unset. Returns `None` when nothing is set.
pub fn format_gtk_pretty(
    gtk2: Option<&str>,
    gtk3: Option<&str>,
    gtk4: Option<&str>,
) -> Option<String> {
    let line = match (non_empty(gtk2), non_empty(gtk3), non_empty(gtk4)) {
        (Some(g2), Some(g3), Some(g4)) => {
            if g2 == g3 && g2 == g4 {
                format!("{} [GTK2/3/4]", g2)
            } else if g2 == g3 {
                format!("{} [GTK2/3], {} [GTK4]", g2, g4)
            } else if g3 == g4 {
                format!("{} [GTK2], {} [GTK3/4]", g2, g3)
            } else {
                format!("{} [GTK2], {} [GTK3], {} [GTK4]", g2, g3, g4)
            }
        }
        (Some(a), Some(b), None) => pair(a, b, "2", "3"),
        (None, Some(a), Some(b)) => pair(a, b, "3", "4"),
        (Some(a), None, Some(b)) => pair(a, b, "2", "4"),
        (Some(v), None, None) => format!("{} [GTK2]", v),
        (None, Some(v), None) => format!("{} [GTK3]", v),
        (None, None, Some(v)) => format!("{} [GTK4]", v),
        (None, None, None) => return None,
    };
    Some(line)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn pair(a: &str, b: &str, first: &str, second: &str) -> String {
    if a == b {
        format!("{} [GTK{}/{}]", a, first, second)
    } else {
        format!("{} [GTK{}], {} [GTK{}]", a, first, b, second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_state;

    fn gtk(g2: &str, g3: &str, g4: &str) -> Option<String> {
        format_gtk_pretty(Some(g2), Some(g3), Some(g4))
    }

    #[test]
    fn gtk_all_three_set() {
        assert_eq!(gtk("1.0", "1.0", "1.0").as_deref(), Some("1.0 [GTK2/3/4]"));
        assert_eq!(gtk("1.0", "1.0", "2.0").as_deref(), Some("1.0 [GTK2/3], 2.0 [GTK4]"));
        assert_eq!(gtk("1.0", "2.0", "2.0").as_deref(), Some("1.0 [GTK2], 2.0 [GTK3/4]"));
        assert_eq!(
            gtk("1.0", "2.0", "1.0").as_deref(),
            Some("1.0 [GTK2], 2.0 [GTK3], 1.0 [GTK4]")
        );
        assert_eq!(
            gtk("a", "b", "c").as_deref(),
            Some("a [GTK2], b [GTK3], c [GTK4]")
        );
    }

    #[test]
    fn gtk_pairs_and_singles() {
        assert_eq!(gtk("", "1.0", "").as_deref(), Some("1.0 [GTK3]"));
        assert_eq!(gtk("x", "x", "").as_deref(), Some("x [GTK2/3]"));
        assert_eq!(gtk("", "x", "y").as_deref(), Some("x [GTK3], y [GTK4]"));
        assert_eq!(gtk("x", "", "x").as_deref(), Some("x [GTK2/4]"));
        assert_eq!(gtk("x", "", "y").as_deref(), Some("x [GTK2], y [GTK4]"));
        assert_eq!(format_gtk_pretty(None, None, Some("z")).as_deref(), Some("z [GTK4]"));
        assert_eq!(gtk("", "", ""), None);
        assert_eq!(format_gtk_pretty(None, None, None), None);
    }

    #[test]
    fn key_is_bold_and_colored() {
        let state = test_state();
        let mut printer = Printer::new(&state, Vec::new());
        printer.print_key("OS").unwrap();
        assert_eq!(printer.row(), 0);
        let out = String::from_utf8(printer.into_inner()).unwrap();
        assert_eq!(out, "\x1b[35m\x1b[1mOS\x1b[0m: ");
    }

    #[test]
    fn logo_rows_advance_the_counter() {
        let state = test_state();
        let mut printer = Printer::new(&state, Vec::new());
        printer.print_value("Kernel", "6.1.0").unwrap();
        assert_eq!(printer.row(), 1);
        let out = String::from_utf8(printer.into_inner()).unwrap();
        assert_eq!(
            out,
            "\x1b[36m\x1b[1m/\\\x1b[0m \x1b[35m\x1b[1mKernel\x1b[0m: 6.1.0\n"
        );
    }

    #[test]
    fn errors_hidden_by_default() {
        let state = test_state();
        let mut printer = Printer::new(&state, Vec::new());
        printer.print_error("Battery", "No battery found").unwrap();
        assert_eq!(printer.row(), 0);
        assert!(printer.into_inner().is_empty());
    }

    #[test]
    fn errors_shown_when_enabled() {
        let mut state = test_state();
        state.show_errors = true;
        let mut printer = Printer::new(&state, Vec::new());
        printer.print_error("Battery", "No battery found").unwrap();
        assert_eq!(printer.row(), 1);
        let out = String::from_utf8(printer.into_inner()).unwrap();
        assert!(out.ends_with("Battery\x1b[0m: \x1b[1;31mNo battery found\x1b[0m\n"));
    }

    #[test]
    fn remaining_logo_rows_are_flushed() {
        let state = test_state();
        let mut printer = Printer::new(&state, Vec::new());
        printer.print_value("OS", "Linux").unwrap();
        printer.print_remaining_logo().unwrap();
        assert_eq!(printer.row(), 2);

        // nothing left to print once the logo is exhausted
        printer.print_remaining_logo().unwrap();
        assert_eq!(printer.row(), 2);
        let out = String::from_utf8(printer.into_inner()).unwrap();
        assert_eq!(out.lines().count(), 2);
    }
}
