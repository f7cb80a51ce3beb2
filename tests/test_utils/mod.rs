pub mod collector;

#[allow(unused_imports)]
pub use collector::{GelfCollector, closed_addr};
