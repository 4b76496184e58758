pub mod api;
pub mod components;
pub mod interop;
pub mod report;

pub use api::*;
pub use components::*;
pub use interop::*;
pub use report::*;
