use std::sync::Arc;

use rand::seq::SliceRandom;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::{ClusterMember, ClusterSummary};

const SAMPLE_CAP: usize = 40;

const SYSTEM_PROMPT: &str = "You are **ClusterNameBot**, a Business Consulting Assistant.\n\n\
You will be shown a batch of ticket descriptions all belonging to the same cluster.\n\n\
Please do the following:\n\
1. Assign a **short, descriptive title** for this cluster (2-5 words max).\n\
2. Do not use markdown, just simple text.\n\
3. Give a brief explanation of **why** you chose this title, highlighting any recurring themes, language or keywords.\n\n\
Avoid generic names like 'Cluster 1' or 'Miscellaneous'. Avoid duplicate titles. Make the title informative.\n\n\
Format your output as:\n\
Title: <your title>\n\
Explanation: <your reasoning>\n\
Detailed Analysis: <common pain points and relationships>\n\
Five Top Issues: <reason with context given by the examples>";

const SECTION_LABELS: [&str; 4] = [
    "Title:",
    "Explanation:",
    "Detailed Analysis:",
    "Five Top Issues:",
];

pub struct ClusterSummarizer {
    llm: Arc<dyn LlmClient>,
}

impl ClusterSummarizer {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    pub async fn summarize(
        &self,
        cluster_id: usize,
        members: &[ClusterMember],
    ) -> Result<ClusterSummary, LlmClientError> {
        if members.is_empty() {
            return Ok(ClusterSummary::placeholder(cluster_id));
        }

        let sample: Vec<&ClusterMember> = members
            .choose_multiple(&mut rand::thread_rng(), SAMPLE_CAP.min(members.len()))
            .collect();
        let text_sample = sample
            .iter()
            .map(|m| format!("ID {}: {}", m.identifier, m.clean_text))
            .collect::<Vec<_>>()
            .join("\n");

        let user_prompt = format!(
            "Total records received: {}.\n\n\
             Here are sample records (incident ID and description) from a single cluster:\n\n\
             {}\n\n\
             Where possible, include in your explanation references to the incident IDs to \
             indicate the source of your insights.",
            members.len(),
            text_sample
        );

        let raw = self.llm.complete(SYSTEM_PROMPT, &user_prompt).await?;
        Ok(parse_summary(cluster_id, &raw))
    }
}

/// Missing or empty sections default to `Cluster <id>` for the title and
/// `N/A` for everything else.
pub fn parse_summary(cluster_id: usize, raw: &str) -> ClusterSummary {
    ClusterSummary {
        title: extract_section(raw, 0).unwrap_or_else(|| format!("Cluster {}", cluster_id)),
        explanation: extract_section(raw, 1).unwrap_or_else(|| "N/A".to_string()),
        detailed_analysis: extract_section(raw, 2).unwrap_or_else(|| "N/A".to_string()),
        top_issues: extract_section(raw, 3).unwrap_or_else(|| "N/A".to_string()),
    }
}

fn extract_section(raw: &str, index: usize) -> Option<String> {
    let label = SECTION_LABELS[index];
    let start = raw.find(label)? + label.len();
    let rest = &raw[start..];

    let end = SECTION_LABELS
        .iter()
        .skip(index + 1)
        .filter_map(|next| rest.find(next))
        .min()
        .unwrap_or(rest.len());

    let section = rest[..end].trim();
    if section.is_empty() {
        None
    } else {
        Some(section.to_string())
    }
}
