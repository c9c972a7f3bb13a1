use std::sync::LazyLock;

use tiktoken_rs::CoreBPE;

static TOKENIZER: LazyLock<CoreBPE> = LazyLock::new(|| {
    tiktoken_rs::cl100k_base().expect("Failed to initialize cl100k_base tokenizer")
});

const BATCH_SAMPLE_CAP: usize = 100;
const CEILING_BUFFER: f64 = 0.9;
const MIN_BATCH_SIZE: usize = 1;
const MAX_BATCH_SIZE: usize = 50;

pub fn count_tokens(text: &str) -> usize {
    TOKENIZER.encode_with_special_tokens(text).len()
}

pub fn count_tokens_all(texts: &[String]) -> usize {
    texts.iter().map(|t| count_tokens(t)).sum()
}

pub fn optimal_batch_size(texts: &[String], token_ceiling: usize) -> usize {
    let sample = &texts[..texts.len().min(BATCH_SAMPLE_CAP)];
    if sample.is_empty() {
        return MIN_BATCH_SIZE;
    }

    let total_tokens = count_tokens_all(sample);
    let mean_tokens = total_tokens as f64 / sample.len() as f64;
    if mean_tokens <= 0.0 {
        return MAX_BATCH_SIZE;
    }

    let safe_size = (token_ceiling as f64 * CEILING_BUFFER / mean_tokens) as usize;
    let batch_size = safe_size.clamp(MIN_BATCH_SIZE, MAX_BATCH_SIZE);

    tracing::debug!(
        batch_size,
        mean_tokens = format!("{:.1}", mean_tokens),
        "Calculated optimal embedding batch size"
    );
    batch_size
}
