//! Spacer row and the terminal palette

use crate::display::{Printer, RESET};
use std::io::{self, Write};

const BLOCK: &str = "   ";

pub fn print_break<W: Write>(p: &mut Printer<'_, W>) -> io::Result<()> {
    p.print_logo_line()?;
    p.newline()
}

/// Normal (40-47) and bright (100-107) background colors, one row each
pub fn print_colors<W: Write>(p: &mut Printer<'_, W>) -> io::Result<()> {
    for base in [40, 100] {
        p.print_logo_line()?;
        let row: String = (0..8)
            .map(|i| format!("\x1b[{}m{}", base + i, BLOCK))
            .collect();
        p.write_str(&row)?;
        p.write_str(RESET)?;
        p.newline()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_state;

    #[test]
    fn palette_takes_two_logo_rows() {
        let state = test_state();
        let mut printer = Printer::new(&state, Vec::new());
        print_colors(&mut printer).unwrap();
        assert_eq!(printer.row(), 2);

        let out = String::from_utf8(printer.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\x1b[40m   \x1b[41m"));
        assert!(lines[0].ends_with("\x1b[47m   \x1b[0m"));
        assert!(lines[1].ends_with("\x1b[107m   \x1b[0m"));
    }

    #[test]
    fn break_is_a_bare_logo_row() {
        let state = test_state();
        let mut printer = Printer::new(&state, Vec::new());
        print_break(&mut printer).unwrap();
        let out = String::from_utf8(printer.into_inner()).unwrap();
        assert_eq!(out, "\x1b[36m\x1b[1m/\\\x1b[0m \n");
    }
}
