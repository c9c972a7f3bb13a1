use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "mode", content = "k")]
pub enum RequestedClusters {
    Auto,
    Fixed(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClusterAssignment {
    pub labels: Vec<usize>,
    pub k: usize,
}

#[derive(Debug, Clone)]
pub struct ClusterMember {
    pub identifier: String,
    pub clean_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterSummary {
    pub title: String,
    pub explanation: String,
    pub detailed_analysis: String,
    pub top_issues: String,
}

impl ClusterSummary {
    pub fn placeholder(cluster_id: usize) -> Self {
        Self {
            title: format!("Cluster {}", cluster_id),
            explanation: "N/A".to_string(),
            detailed_analysis: "N/A".to_string(),
            top_issues: "N/A".to_string(),
        }
    }
}
