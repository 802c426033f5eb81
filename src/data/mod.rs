pub mod hardware;
pub mod system;

pub use hardware::{BatteryInfo, CpuInfo, Usage};
pub use system::{DesktopInfo, PackageCount, PackageInfo, SessionInfo, ToolkitSetting};
