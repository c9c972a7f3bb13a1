use std::path::Path;
use std::sync::Arc;

use crate::application::ports::{
    ClusterSnapshot, DatasetStore, DatasetStoreError, LlmClientError, SnapshotStore,
    SnapshotStoreError,
};
use crate::application::services::cluster_engine::{self, ClusterEngineError};
use crate::application::services::{
    clean_text, optimal_batch_size, BatchEmbedder, ClusterSummarizer, TaskTracker,
};
use crate::domain::{
    ClusterMember, ClusterSummary, DatasetId, Embedding, RequestedClusters, Table, TableError,
    TaskId, TaskStatus,
};

// text-embedding-3-small output width.
const DEFAULT_EMBEDDING_DIMENSION: usize = 1536;

#[derive(Debug, Clone)]
pub struct ClusteringRequest {
    pub text_column: String,
    pub id_column: Option<String>,
    pub requested_clusters: RequestedClusters,
}

pub struct ClusteringPipeline {
    tracker: Arc<TaskTracker>,
    embedder: Arc<BatchEmbedder>,
    summarizer: Arc<ClusterSummarizer>,
    datasets: Arc<dyn DatasetStore>,
    snapshots: Arc<dyn SnapshotStore>,
}

impl ClusteringPipeline {
    pub fn new(
        tracker: Arc<TaskTracker>,
        embedder: Arc<BatchEmbedder>,
        summarizer: Arc<ClusterSummarizer>,
        datasets: Arc<dyn DatasetStore>,
        snapshots: Arc<dyn SnapshotStore>,
    ) -> Self {
        Self {
            tracker,
            embedder,
            summarizer,
            datasets,
            snapshots,
        }
    }

    pub fn create_task(&self, dataset_id: &DatasetId) -> TaskId {
        let task_id = TaskId::new();
        self.tracker.create(task_id, dataset_id.clone());
        task_id
    }

    pub fn get_status(&self, task_id: TaskId) -> Option<crate::domain::Task> {
        self.tracker.get(task_id)
    }

    pub fn spawn_run(
        self: &Arc<Self>,
        task_id: TaskId,
        dataset_id: DatasetId,
        table: Table,
        request: ClusteringRequest,
    ) {
        let pipeline = Arc::clone(self);
        tokio::spawn(async move {
            pipeline.run(task_id, dataset_id, table, request).await;
        });
    }

    pub async fn run(
        &self,
        task_id: TaskId,
        dataset_id: DatasetId,
        table: Table,
        request: ClusteringRequest,
    ) {
        tracing::info!(task_id = %task_id, dataset_id = %dataset_id, "Starting clustering run");
        if let Err(error) = self.execute(task_id, &dataset_id, table, &request).await {
            tracing::error!(task_id = %task_id, error = %error, "Clustering run failed");
            self.tracker.update(
                task_id,
                TaskStatus::Failed,
                0,
                &format!("Clustering failed: {}", error),
                None,
            );
        }
    }

    async fn execute(
        &self,
        task_id: TaskId,
        dataset_id: &DatasetId,
        table: Table,
        request: &ClusteringRequest,
    ) -> Result<(), PipelineError> {
        // Step 1: clean descriptions
        self.update(task_id, 10, "Starting clustering analysis...");
        let text_index = table
            .column_index(&request.text_column)
            .ok_or_else(|| PipelineError::MissingColumn(request.text_column.clone()))?;
        let id_index = request
            .id_column
            .as_deref()
            .and_then(|column| table.column_index(column));

        let mut kept_rows = Vec::new();
        let mut clean_texts = Vec::new();
        let mut identifiers = Vec::new();
        for (row_index, row) in table.rows().iter().enumerate() {
            let cleaned = clean_text(&row[text_index]);
            if cleaned.is_empty() {
                continue;
            }
            let identifier = match id_index {
                Some(index) => row[index].clone(),
                None => kept_rows.len().to_string(),
            };
            kept_rows.push(row_index);
            clean_texts.push(cleaned);
            identifiers.push(identifier);
        }
        if clean_texts.is_empty() {
            return Err(PipelineError::NoUsableText);
        }

        // Step 2: embeddings
        self.update(task_id, 10, "Generating embeddings...");
        let (embeddings, degraded_batches) = self.embed_all(task_id, &clean_texts).await;

        // Step 3: clustering
        self.update(task_id, 65, "Performing clustering...");
        let matrix: Vec<Vec<f32>> = embeddings
            .iter()
            .map(|e| e.l2_normalized().values().to_vec())
            .collect();
        if request.requested_clusters == RequestedClusters::Auto {
            self.update(task_id, 70, "Finding optimal clusters...");
        }
        let assignment = cluster_engine::cluster(&matrix, request.requested_clusters)?;

        // Step 4: intermediate snapshot
        self.update(task_id, 75, "Saving intermediate clustering data...");
        let original_filename = self.datasets.get_original_filename(dataset_id).await?;
        let base = table.select_rows(&kept_rows).without_column(text_index);
        let snapshot_filename = format!(
            "clustering_intermediate_{}",
            with_parquet_extension(&original_filename)
        );
        self.snapshots
            .write_snapshot(
                &snapshot_filename,
                ClusterSnapshot {
                    table: &base,
                    clean_texts: &clean_texts,
                    embeddings: &embeddings,
                    labels: &assignment.labels,
                },
            )
            .await?;

        // Step 5: cluster summaries
        self.update(task_id, 80, "Generating cluster insights...");
        let mut summaries: Vec<ClusterSummary> = Vec::with_capacity(assignment.k);
        for label in 0..assignment.k {
            let members: Vec<ClusterMember> = assignment
                .labels
                .iter()
                .enumerate()
                .filter(|(_, &l)| l == label)
                .map(|(i, _)| ClusterMember {
                    identifier: identifiers[i].clone(),
                    clean_text: clean_texts[i].clone(),
                })
                .collect();
            let summary = self.summarizer.summarize(label, &members).await?;
            summaries.push(summary);

            let progress = 80 + ((label + 1) * 15 / assignment.k) as u8;
            self.update(
                task_id,
                progress,
                &format!("Analyzing clusters... {}/{}", label + 1, assignment.k),
            );
        }

        // Step 6: final dataset, without embeddings
        self.update(task_id, 95, "Preparing final results...");
        let result_table = build_result_table(base, &clean_texts, &assignment.labels, &summaries)?;
        let result_filename = format!("clustered_{}", original_filename);
        let description = format!(
            "Clustered analysis of {} with {} clusters",
            original_filename, assignment.k
        );
        let result_id = self
            .datasets
            .save(&result_table, &result_filename, &description)
            .await?;

        let mut message = format!("Clustering completed! Found {} clusters.", assignment.k);
        if degraded_batches > 0 {
            message.push_str(&format!(
                " {} embedding batches fell back to zero vectors.",
                degraded_batches
            ));
        }
        self.tracker.update(
            task_id,
            TaskStatus::Completed,
            100,
            &message,
            Some(result_id),
        );
        tracing::info!(task_id = %task_id, k = assignment.k, "Clustering run completed");
        Ok(())
    }

    async fn embed_all(&self, task_id: TaskId, texts: &[String]) -> (Vec<Embedding>, usize) {
        let batch_size = optimal_batch_size(texts, self.embedder.token_ceiling());
        let total_batches = texts.len().div_ceil(batch_size);
        let mut embeddings: Vec<Embedding> = Vec::with_capacity(texts.len());
        let mut degraded_batches = 0usize;

        for (batch_index, batch) in texts.chunks(batch_size).enumerate() {
            match self.embedder.embed_batch(batch).await {
                Ok(batch_embeddings) => {
                    embeddings.extend(batch_embeddings);
                    tracing::debug!(
                        batch = batch_index + 1,
                        total_batches,
                        len = batch.len(),
                        "Embedded batch"
                    );
                }
                Err(error) => {
                    // Zero-vector fallback keeps the run alive on degraded data.
                    let dimension = embeddings
                        .last()
                        .map(Embedding::dimensions)
                        .unwrap_or(DEFAULT_EMBEDDING_DIMENSION);
                    tracing::error!(
                        batch = batch_index + 1,
                        error = %error,
                        dimension,
                        "Batch embedding failed, substituting zero vectors"
                    );
                    embeddings.extend(batch.iter().map(|_| Embedding::zeros(dimension)));
                    degraded_batches += 1;
                }
            }

            let progress = 30 + ((batch_index + 1) * 40 / total_batches) as u8;
            self.update(
                task_id,
                progress,
                &format!(
                    "Generating embeddings... {}/{} batches",
                    batch_index + 1,
                    total_batches
                ),
            );
        }

        (embeddings, degraded_batches)
    }

    fn update(&self, task_id: TaskId, progress: u8, message: &str) {
        self.tracker
            .update(task_id, TaskStatus::Processing, progress, message, None);
    }
}

fn build_result_table(
    base: Table,
    clean_texts: &[String],
    labels: &[usize],
    summaries: &[ClusterSummary],
) -> Result<Table, TableError> {
    base.with_column("clean_text", clean_texts.to_vec())?
        .with_column(
            "cluster_id",
            labels.iter().map(|l| l.to_string()).collect(),
        )?
        .with_column(
            "cluster_title",
            labels.iter().map(|&l| summaries[l].title.clone()).collect(),
        )?
        .with_column(
            "cluster_explanation",
            labels
                .iter()
                .map(|&l| summaries[l].explanation.clone())
                .collect(),
        )?
        .with_column(
            "detailed_analysis",
            labels
                .iter()
                .map(|&l| summaries[l].detailed_analysis.clone())
                .collect(),
        )?
        .with_column(
            "top_issues",
            labels
                .iter()
                .map(|&l| summaries[l].top_issues.clone())
                .collect(),
        )
}

fn with_parquet_extension(filename: &str) -> String {
    Path::new(filename)
        .with_extension("parquet")
        .to_string_lossy()
        .into_owned()
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("text column '{0}' not found in dataset")]
    MissingColumn(String),
    #[error("no non-empty descriptions left after cleaning")]
    NoUsableText,
    #[error("clustering: {0}")]
    Clustering(#[from] ClusterEngineError),
    #[error("summarization: {0}")]
    Summarization(#[from] LlmClientError),
    #[error("dataset store: {0}")]
    Store(#[from] DatasetStoreError),
    #[error("snapshot store: {0}")]
    Snapshot(#[from] SnapshotStoreError),
    #[error("result assembly: {0}")]
    ResultAssembly(#[from] TableError),
}
