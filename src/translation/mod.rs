/*!
 * AI-powered translation services.
 *
 * - `core`: the translation service that talks to the provider APIs
 * - `batch`: token-budget batch planning for grouped submissions
 */

pub mod core;
pub mod batch;

pub use self::core::{ApiUsage, TokenUsageStats, TranslationService};
pub use self::batch::{BATCH_DELIMITER, Batch, BatchPlanner, TiktokenCounter, TokenCounter};
