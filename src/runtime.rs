//! Async runtime driving a session from external push sources

mod executor;
pub mod traits;


pub use executor::{ClientCommand, SessionRuntime};
pub use traits::*;
