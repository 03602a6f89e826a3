pub mod traits;

// Record source implementations
pub mod http;
#[cfg(not(target_arch = "wasm32"))]
pub mod json_file;
pub mod memory;
