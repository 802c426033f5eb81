//! Resolution, CPU, GPU, memory, disk and battery rows

use crate::collectors::{hardware, sensors};
use crate::display::Printer;
use crate::utils::parsing::SizeUnit;
use std::io::{self, Write};

/// `key` for a single entry, `key N` (1-based) when there are several
fn numbered(key: &str, index: usize, count: usize) -> String {
    if count > 1 {
        format!("{} {}", key, index + 1)
    } else {
        key.to_string()
    }
}

pub fn print_resolution<W: Write>(p: &mut Printer<'_, W>) -> io::Result<()> {
    match hardware::collect_resolutions() {
        Ok(modes) => p.print_value("Resolution", &modes.join(", ")),
        Err(err) => p.print_error("Resolution", &err.to_string()),
    }
}

pub fn print_cpu<W: Write>(p: &mut Printer<'_, W>) -> io::Result<()> {
    match hardware::collect_cpu_info() {
        Ok(cpu) => p.print_value("CPU", &cpu.to_string()),
        Err(err) => p.print_error("CPU", &err.to_string()),
    }
}

pub fn print_gpu<W: Write>(p: &mut Printer<'_, W>) -> io::Result<()> {
    let gpus = match hardware::collect_gpus() {
        Ok(gpus) => gpus,
        Err(err) => return p.print_error("GPU", &err.to_string()),
    };
    for (i, gpu) in gpus.iter().enumerate() {
        p.print_value(&numbered("GPU", i, gpus.len()), gpu)?;
    }
    Ok(())
}

pub fn print_memory<W: Write>(p: &mut Printer<'_, W>) -> io::Result<()> {
    match hardware::collect_memory_info(&p.state().snapshot) {
        Ok(usage) => p.print_value("Memory", &usage.format(SizeUnit::MiB)),
        Err(err) => p.print_error("Memory", &err.to_string()),
    }
}

pub fn print_disk<W: Write>(p: &mut Printer<'_, W>) -> io::Result<()> {
    match hardware::collect_disk_info() {
        Ok(usage) => p.print_value("Disk (/)", &usage.format(SizeUnit::GiB)),
        Err(err) => p.print_error("Disk (/)", &err.to_string()),
    }
}

pub fn print_battery<W: Write>(p: &mut Printer<'_, W>) -> io::Result<()> {
    let batteries = match sensors::collect_batteries() {
        Ok(batteries) => batteries,
        Err(err) => return p.print_error("Battery", &err.to_string()),
    };
    for (i, battery) in batteries.iter().enumerate() {
        p.print_value(&numbered("Battery", i, batteries.len()), &battery.to_string())?;
    }
    Ok(())
}
