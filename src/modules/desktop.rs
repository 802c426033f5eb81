//! Desktop environment and toolkit appearance rows

use crate::collectors::desktop::{self, Appearance};
use crate::data::ToolkitSetting;
use crate::display::Printer;
use std::io::{self, Write};

pub fn print_de<W: Write>(p: &mut Printer<'_, W>) -> io::Result<()> {
    match desktop::detect_desktop() {
        Ok(de) => p.print_value("DE", &de.to_string()),
        Err(err) => p.print_error("DE", &err.to_string()),
    }
}

pub fn print_theme<W: Write>(p: &mut Printer<'_, W>) -> io::Result<()> {
    print_appearance(p, Appearance::Theme)
}

pub fn print_icons<W: Write>(p: &mut Printer<'_, W>) -> io::Result<()> {
    print_appearance(p, Appearance::Icons)
}

pub fn print_font<W: Write>(p: &mut Printer<'_, W>) -> io::Result<()> {
    print_appearance(p, Appearance::Font)
}

/// `Breeze [Plasma], Adwaita [GTK2/3]`
fn print_appearance<W: Write>(p: &mut Printer<'_, W>, appearance: Appearance) -> io::Result<()> {
    let key = appearance.key();
    let setting = match appearance.read(&p.state().user.home) {
        Ok(setting) if !setting.is_empty() => setting,
        Ok(_) => {
            let message = format!("No {} setting found", key.to_lowercase());
            return p.print_error(key, &message);
        }
        Err(err) => return p.print_error(key, &err.to_string()),
    };
    print_setting(p, key, &setting)
}

fn set(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn print_setting<W: Write>(
    p: &mut Printer<'_, W>,
    key: &str,
    setting: &ToolkitSetting,
) -> io::Result<()> {
    let has_gtk = [&setting.gtk2, &setting.gtk3, &setting.gtk4]
        .into_iter()
        .any(|value| set(value).is_some());

    p.print_logo_and_key(key)?;
    if let Some(plasma) = set(&setting.plasma) {
        p.write_str(&format!("{} [Plasma]", plasma))?;
        if has_gtk {
            p.write_str(", ")?;
        }
    }
    p.print_gtk_pretty(set(&setting.gtk2), set(&setting.gtk3), set(&setting.gtk4))?;
    p.newline()
}
