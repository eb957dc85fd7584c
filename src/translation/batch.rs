/*!
 * Token-budget batch planning.
 *
 * This module groups input files into batches that fit under a model's
 * context-window token budget, so a whole batch can be submitted as a single
 * translation request. Token counting is delegated to a [`TokenCounter`], with
 * a tiktoken-backed implementation for OpenAI-family models.
 */

use std::path::PathBuf;

use anyhow::{Context, Result};
use tiktoken_rs::{CoreBPE, cl100k_base};

/// Delimiter inserted between the payloads of files concatenated into a batch
pub const BATCH_DELIMITER: &str = "\n\n";

/// Capability to estimate the token count of a piece of text
pub trait TokenCounter {
    /// Number of tokens `text` is expected to occupy in the model's context
    fn count(&self, text: &str) -> usize;
}

/// Token counter backed by the cl100k_base tiktoken encoding
pub struct TiktokenCounter {
    bpe: CoreBPE,
}

impl TiktokenCounter {
    /// Create a counter for the cl100k_base encoding
    pub fn new() -> Result<Self> {
        let bpe = cl100k_base().context("Failed to load cl100k_base tokenizer")?;
        Ok(Self { bpe })
    }
}

impl TokenCounter for TiktokenCounter {
    fn count(&self, text: &str) -> usize {
        self.bpe.encode_with_special_tokens(text).len()
    }
}

/// A token-budget-constrained group of files planned for one request
#[derive(Debug, Clone)]
pub struct Batch {
    /// Source files in this batch, in input order
    pub files: Vec<PathBuf>,

    /// Extracted payloads of the files, joined with [`BATCH_DELIMITER`]
    pub text: String,

    /// Estimated token total for this batch as tracked by the planner
    pub estimated_tokens: usize,
}

/// Greedy planner that packs files into batches under a token ceiling
pub struct BatchPlanner {
    /// Fixed token cost of the system prompt, charged once up front
    prompt_tokens: usize,

    /// Maximum estimated tokens per batch
    max_tokens: usize,
}

impl BatchPlanner {
    /// Create a planner with the given prompt cost and per-batch ceiling
    pub fn new(prompt_tokens: usize, max_tokens: usize) -> Self {
        Self {
            prompt_tokens,
            max_tokens,
        }
    }

    /// Pack `files` (path plus extracted payload) into batches, in input order.
    ///
    /// Greedy bin-packing: files accumulate into the current batch while the
    /// running total stays within the ceiling; a file that would overflow
    /// closes the batch and seeds a new one with just its own count. A single
    /// file whose count alone exceeds the ceiling still forms a singleton
    /// batch - files are never split.
    pub fn plan(&self, files: &[(PathBuf, String)], counter: &dyn TokenCounter) -> Vec<Batch> {
        let mut batches = Vec::new();
        let mut current: Vec<(&PathBuf, &str)> = Vec::new();
        let mut running = self.prompt_tokens;

        for (path, payload) in files {
            let tokens = counter.count(payload);

            if !current.is_empty() && running + tokens > self.max_tokens {
                batches.push(Self::seal(&current, running));
                current.clear();
                running = tokens;
            } else {
                running += tokens;
            }
            current.push((path, payload.as_str()));
        }

        if !current.is_empty() {
            batches.push(Self::seal(&current, running));
        }

        batches
    }

    fn seal(group: &[(&PathBuf, &str)], estimated_tokens: usize) -> Batch {
        let text = group
            .iter()
            .map(|(_, payload)| *payload)
            .collect::<Vec<_>>()
            .join(BATCH_DELIMITER)
            .trim_end()
            .to_string();

        Batch {
            files: group.iter().map(|(path, _)| (*path).clone()).collect(),
            text,
            estimated_tokens,
        }
    }
}
