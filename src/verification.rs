/*!
 * Line-structure verification for translated dialogue files.
 *
 * Compares an original file against a translated candidate to confirm the
 * translation preserved per-line record identity: same line count, same
 * leading `{id}` token on every brace-prefixed line, closing braces intact.
 * This is a structural check, not a content check - it guards against severe
 * corruption such as dropped or merged lines, not against mistranslation.
 */

use crate::errors::VerificationError;

/// Verify that `translated` preserves the record structure of `original`.
///
/// Returns the first failure encountered, with its 1-based line number.
/// Lines where neither side starts with `{` are not compared at all, and a
/// line where only one side starts with `{` is accepted as non-conflicting.
/// The latter is a deliberate tolerance carried over from earlier tooling; it
/// can mask real corruption, so treat a pass as advisory rather than proof.
pub fn verify_structure(original: &str, translated: &str) -> Result<(), VerificationError> {
    let original_lines: Vec<&str> = original.lines().map(str::trim_end).collect();
    let translated_lines: Vec<&str> = translated.lines().map(str::trim_end).collect();

    if original_lines.len() != translated_lines.len() {
        return Err(VerificationError::LineCountMismatch {
            original: original_lines.len(),
            translated: translated_lines.len(),
        });
    }

    for (idx, (orig, cand)) in original_lines.iter().zip(translated_lines.iter()).enumerate() {
        let line = idx + 1;

        let orig_id = leading_record_field(orig, line)?;
        let cand_id = leading_record_field(cand, line)?;

        if let (Some(orig_id), Some(cand_id)) = (orig_id, cand_id) {
            if orig_id != cand_id {
                return Err(VerificationError::IdMismatch {
                    line,
                    original: orig_id.to_string(),
                    translated: cand_id.to_string(),
                });
            }
        }
    }

    Ok(())
}

/// Extract the leading `{id}` field of a record line, validating its shape.
///
/// Returns `Ok(None)` for lines that do not start with `{` (free-form content,
/// accepted as-is). A brace-prefixed line must contain a closing brace and
/// must end with one, otherwise it is malformed.
fn leading_record_field(line: &str, line_number: usize) -> Result<Option<&str>, VerificationError> {
    let Some(rest) = line.strip_prefix('{') else {
        return Ok(None);
    };

    let close = rest
        .find('}')
        .ok_or(VerificationError::MalformedLine { line: line_number })?;

    if !line.ends_with('}') {
        return Err(VerificationError::MalformedLine { line: line_number });
    }

    Ok(Some(&rest[..close]))
}
