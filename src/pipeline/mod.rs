//! Multi-episode driver and its observers

pub mod observers;
pub mod training;

pub use observers::{EpisodeMetrics, MetricsObserver, ProgressObserver, TracingObserver};
pub use training::{TrainingConfig, TrainingPipeline, TrainingResult};

pub use crate::ports::Observer;
