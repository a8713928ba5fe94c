mod checksum;
mod toolchain;
mod web_sdk;

pub use checksum::ChecksumPort;
pub use toolchain::ToolchainPort;
pub use web_sdk::WebSdkPort;
