pub mod cache;
pub mod config;
pub mod dataset;
pub mod export;
pub mod fetch;
pub mod pipeline;
pub mod process;
pub mod schema;
pub mod views;

pub use config::Config;
pub use dataset::{CanonicalDataset, RateRow};
pub use pipeline::Pipeline;
