pub mod config;
pub mod error;
pub mod mobility;
pub mod outputs;
pub mod render;
pub mod stats;
pub mod vitals;

pub use config::{AnalysisConfig, ConfigOverrides, MobilityConfig, VitalsConfig};
pub use error::{AnalysisError, Result};
pub use outputs::OutputDir;
