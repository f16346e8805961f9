//! Domain models for the Climate Risk Analytics platform

mod anomaly;
mod crop;
mod forecast;
mod history;
mod impact;
mod strategy;
mod weather;

pub use anomaly::*;
pub use crop::*;
pub use forecast::*;
pub use history::*;
pub use impact::*;
pub use strategy::*;
pub use weather::*;
