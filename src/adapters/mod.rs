pub mod checksum;
pub mod emscripten_sdk;
mod process;
pub mod zig_toolchain;

pub use checksum::{CommandChecksum, Sha256Checksum};
pub use emscripten_sdk::EmscriptenSdk;
pub use zig_toolchain::ZigToolchain;
