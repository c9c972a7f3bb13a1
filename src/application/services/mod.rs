mod batch_embedder;
mod cluster_engine;
mod pipeline;
mod summarizer;
mod task_tracker;
mod text_cleaner;
mod token_budget;

pub use batch_embedder::{BatchEmbedder, BatchEmbedderError};
pub use cluster_engine::{cluster, ClusterEngineError};
pub use pipeline::{ClusteringPipeline, ClusteringRequest, PipelineError};
pub use summarizer::{parse_summary, ClusterSummarizer};
pub use task_tracker::TaskTracker;
pub use text_cleaner::clean_text;
pub use token_budget::{count_tokens, count_tokens_all, optimal_batch_size};
