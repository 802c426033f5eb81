//! Category printers and the order they run in.
//!
//! Every printer writes zero or more complete rows through the [`Printer`],
//! each row starting with one logo row. Detector failures turn into error
//! rows, which are hidden unless errors are shown.

pub mod colors;
pub mod desktop;
pub mod hardware;
pub mod system;

use crate::display::Printer;
use std::io::{self, Write};

pub type PrintFn<W> = fn(&mut Printer<'_, W>) -> io::Result<()>;

pub struct Module<W: Write> {
    pub name: &'static str,
    pub print: PrintFn<W>,
}

macro_rules! module {
    ($name:literal, $print:path) => {
        Module {
            name: $name,
            print: $print,
        }
    };
}

/// All printers, in output order
pub fn modules<W: Write>() -> [Module<W>; 22] {
    [
        module!("title", system::print_title),
        module!("separator", system::print_separator),
        module!("os", system::print_os),
        module!("host", system::print_host),
        module!("kernel", system::print_kernel),
        module!("uptime", system::print_uptime),
        module!("packages", system::print_packages),
        module!("shell", system::print_shell),
        module!("resolution", hardware::print_resolution),
        module!("de", desktop::print_de),
        module!("theme", desktop::print_theme),
        module!("icons", desktop::print_icons),
        module!("font", desktop::print_font),
        module!("terminal", system::print_terminal),
        module!("cpu", hardware::print_cpu),
        module!("gpu", hardware::print_gpu),
        module!("memory", hardware::print_memory),
        module!("disk", hardware::print_disk),
        module!("battery", hardware::print_battery),
        module!("locale", system::print_locale),
        module!("break", colors::print_break),
        module!("colors", colors::print_colors),
    ]
}

/// Run every printer once, then finish the logo
pub fn print_all<W: Write>(printer: &mut Printer<'_, W>) -> io::Result<()> {
    for module in modules::<W>() {
        let _span = tracing::debug_span!("module", name = module.name).entered();
        (module.print)(printer)?;
    }
    printer.print_remaining_logo()
}
