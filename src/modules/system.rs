//! Title, OS, host, kernel, uptime, packages, shell, terminal and locale rows

use crate::collectors::{packages, system};
use crate::display::{Printer, BOLD, RESET};
use crate::utils::parsing::format_uptime;
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

fn title_text<W: Write>(p: &Printer<'_, W>) -> String {
    let state = p.state();
    format!("{}@{}", state.user.name, state.hostname())
}

/// `user@host`, both halves bold in the key color
pub fn print_title<W: Write>(p: &mut Printer<'_, W>) -> io::Result<()> {
    let state = p.state();
    let color = &state.color;
    p.print_logo_line()?;
    let line = format!(
        "{color}{BOLD}{}{RESET}@{color}{BOLD}{}{RESET}",
        state.user.name,
        state.hostname(),
    );
    p.write_str(&line)?;
    p.newline()
}

/// Underline as wide as the title
pub fn print_separator<W: Write>(p: &mut Printer<'_, W>) -> io::Result<()> {
    let width = title_text(p).width();
    p.print_logo_line()?;
    p.write_str(&"-".repeat(width))?;
    p.newline()
}

pub fn print_os<W: Write>(p: &mut Printer<'_, W>) -> io::Result<()> {
    match system::read_os_name() {
        Ok(name) => {
            let machine = &p.state().kernel.machine;
            let value = if machine.is_empty() {
                name
            } else {
                format!("{} {}", name, machine)
            };
            p.print_value("OS", &value)
        }
        Err(err) => p.print_error("OS", &err.to_string()),
    }
}

pub fn print_host<W: Write>(p: &mut Printer<'_, W>) -> io::Result<()> {
    match system::read_host() {
        Ok(host) => p.print_value("Host", &host),
        Err(err) => p.print_error("Host", &err.to_string()),
    }
}

pub fn print_kernel<W: Write>(p: &mut Printer<'_, W>) -> io::Result<()> {
    let release = &p.state().kernel.release;
    if release.is_empty() {
        return p.print_error("Kernel", "uname reported no release");
    }
    p.print_value("Kernel", release)
}

pub fn print_uptime<W: Write>(p: &mut Printer<'_, W>) -> io::Result<()> {
    let uptime = format_uptime(p.state().snapshot.uptime);
    p.print_value("Uptime", &uptime)
}

pub fn print_packages<W: Write>(p: &mut Printer<'_, W>) -> io::Result<()> {
    let info = packages::collect_package_info(&p.state().user.home);
    if info.total() == 0 {
        return p.print_error("Packages", "No packages from any known package manager");
    }
    p.print_value("Packages", &info.to_string())
}

pub fn print_shell<W: Write>(p: &mut Printer<'_, W>) -> io::Result<()> {
    let login_shell = p.state().user.shell.as_deref();
    let shell = system::detect_session().shell.or_else(|| {
        login_shell
            .and_then(|path| path.rsplit('/').next())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
    });

    match shell {
        Some(shell) => p.print_value("Shell", &shell),
        None => p.print_error("Shell", "No shell found"),
    }
}

pub fn print_terminal<W: Write>(p: &mut Printer<'_, W>) -> io::Result<()> {
    match system::detect_session().terminal {
        Some(terminal) => p.print_value("Terminal", &terminal),
        None => p.print_error("Terminal", "No terminal found"),
    }
}

pub fn print_locale<W: Write>(p: &mut Printer<'_, W>) -> io::Result<()> {
    match system::read_locale() {
        Ok(locale) => p.print_value("Locale", &locale),
        Err(err) => p.print_error("Locale", &err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_state;

    fn render(print: fn(&mut Printer<'_, Vec<u8>>) -> io::Result<()>) -> String {
        let state = test_state();
        let mut printer = Printer::new(&state, Vec::new());
        print(&mut printer).unwrap();
        String::from_utf8(printer.into_inner()).unwrap()
    }

    #[test]
    fn title_and_separator() {
        let title = render(print_title);
        assert!(title.ends_with("\x1b[35m\x1b[1mtester\x1b[0m@\x1b[35m\x1b[1mbox\x1b[0m\n"));

        let separator = render(print_separator);
        assert!(separator.ends_with(&format!("{}\n", "-".repeat("tester@box".len()))));
    }

    #[test]
    fn kernel_and_uptime_come_from_state() {
        assert!(render(print_kernel).ends_with("Kernel\x1b[0m: 6.1.0-test\n"));
        assert!(render(print_uptime).ends_with("Uptime\x1b[0m: 3 hours, 2 mins\n"));
    }
}
