pub mod dto;

pub use dto::PipelineStats;
