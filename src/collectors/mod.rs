//! Detectors. Each one reads a single category of system information and
//! reports failure through `Result`/`Option`; nothing here prints.

pub mod desktop;
pub mod hardware;
pub mod packages;
pub mod sensors;
pub mod system;
