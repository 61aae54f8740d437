//! Core utilities (macros must be declared before any module that uses them)

#[macro_use]
#[path = "utils/safety.rs"]
pub mod safety;

#[cfg(target_arch = "wasm32")]
#[path = "utils/console_logger.rs"]
pub mod console_logger;
