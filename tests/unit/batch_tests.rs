/*!
 * Tests for token-budget batch planning
 */

use std::path::PathBuf;

use msgwai::translation::batch::{BATCH_DELIMITER, BatchPlanner, TokenCounter};

/// Stub counter: one token per character, so payload sizes are explicit
struct CharCounter;

impl TokenCounter for CharCounter {
    fn count(&self, text: &str) -> usize {
        text.chars().count()
    }
}

fn file(name: &str, tokens: usize) -> (PathBuf, String) {
    (PathBuf::from(name), "x".repeat(tokens))
}

fn names(batch_files: &[PathBuf]) -> Vec<&str> {
    batch_files.iter().filter_map(|p| p.to_str()).collect()
}

/// Test the exact greedy behavior: [1000, 2000, 500] with ceiling 2500 and
/// prompt cost 100 packs as [[f1], [f2, f3]]
#[test]
fn test_plan_withReferenceSizes_shouldMatchGreedyGrouping() {
    let files = vec![file("f1", 1000), file("f2", 2000), file("f3", 500)];
    let planner = BatchPlanner::new(100, 2500);

    let batches = planner.plan(&files, &CharCounter);

    assert_eq!(batches.len(), 2);
    assert_eq!(names(&batches[0].files), vec!["f1"]);
    assert_eq!(names(&batches[1].files), vec!["f2", "f3"]);
    assert_eq!(batches[0].estimated_tokens, 1100);
    assert_eq!(batches[1].estimated_tokens, 2500);
}

/// Test that the ceiling is respected for every non-singleton batch
#[test]
fn test_plan_withManyFiles_shouldKeepBatchesUnderCeiling() {
    let files: Vec<_> = (0..20)
        .map(|i| file(&format!("f{}", i), 300 + i * 17))
        .collect();
    let planner = BatchPlanner::new(50, 1200);

    let batches = planner.plan(&files, &CharCounter);

    for batch in &batches {
        if batch.files.len() > 1 {
            assert!(
                batch.estimated_tokens <= 1200,
                "batch of {} files estimated at {} tokens",
                batch.files.len(),
                batch.estimated_tokens
            );
        }
    }
}

/// Test that input order is preserved across and within batches
#[test]
fn test_plan_withAnyInput_shouldPreserveFileOrder() {
    let files: Vec<_> = (0..10).map(|i| file(&format!("f{}", i), 400)).collect();
    let planner = BatchPlanner::new(10, 1000);

    let batches = planner.plan(&files, &CharCounter);

    let flattened: Vec<_> = batches
        .iter()
        .flat_map(|b| b.files.iter())
        .cloned()
        .collect();
    let expected: Vec<_> = files.iter().map(|(p, _)| p.clone()).collect();
    assert_eq!(flattened, expected);
}

/// Test that a single oversized file still forms its own batch
#[test]
fn test_plan_withOversizedFile_shouldFormSingletonBatch() {
    let files = vec![file("small", 100), file("huge", 5000), file("tail", 100)];
    let planner = BatchPlanner::new(50, 1000);

    let batches = planner.plan(&files, &CharCounter);

    assert_eq!(batches.len(), 3);
    assert_eq!(names(&batches[1].files), vec!["huge"]);
    assert!(batches[1].estimated_tokens > 1000);
}

/// Test that no files produce no batches
#[test]
fn test_plan_withNoFiles_shouldReturnNoBatches() {
    let planner = BatchPlanner::new(100, 2500);
    assert!(planner.plan(&[], &CharCounter).is_empty());
}

/// Test that batch text joins payloads with the delimiter and trims the tail
#[test]
fn test_plan_withSmallFiles_shouldConcatenatePayloads() {
    let files = vec![
        (PathBuf::from("a"), "first\n".to_string()),
        (PathBuf::from("b"), "second\n".to_string()),
    ];
    let planner = BatchPlanner::new(0, 1000);

    let batches = planner.plan(&files, &CharCounter);

    assert_eq!(batches.len(), 1);
    assert_eq!(
        batches[0].text,
        format!("first\n{}second", BATCH_DELIMITER)
    );
}
