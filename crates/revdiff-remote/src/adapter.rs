//! Normalize remote hunks into a flat edit script.
//!
//! Hunks only cover changed regions plus context. Without the left
//! revision's lines the gaps between hunks are unknown, so [`flatten_hunks`]
//! reconstructs only the covered windows. [`flatten_hunks_with_base`] fills
//! the gaps from the left revision and yields a script whose left and right
//! projections are the full revisions.

use revdiff_types::{DiffOp, EditScript, Line};
use tracing::{debug, warn};

use crate::error::{AdaptError, AdaptResult};
use crate::wire::{ServerDiffResponse, ServerHunk};

/// Concatenate hunk bodies in order.
pub fn flatten_hunks(hunks: &[ServerHunk]) -> EditScript {
    hunks
        .iter()
        .flat_map(|hunk| hunk.lines.iter().map(|line| line.to_op()))
        .collect()
}

/// Concatenate hunk bodies, filling the lines before, between and after the
/// hunks with unchanged lines from `base` (the left revision).
///
/// Every hunk must carry as many lines as its header declares, start after
/// the previous hunk ends, stay inside `base`, and agree with `base` on its
/// context and removed lines.
pub fn flatten_hunks_with_base<S: AsRef<str>>(
    hunks: &[ServerHunk],
    base: &[S],
) -> AdaptResult<EditScript> {
    let mut script = EditScript::with_capacity(base.len());
    let mut cursor = 0usize;

    for (index, hunk) in hunks.iter().enumerate() {
        check_header(index, hunk)?;

        let offset = hunk.to_hunk().old_offset();
        if offset < cursor {
            return Err(AdaptError::Overlap {
                hunk: index,
                offset,
                cursor,
            });
        }
        let end = match offset.checked_add(hunk.old_lines) {
            Some(end) if end <= base.len() => end,
            end => {
                return Err(AdaptError::OutOfRange {
                    hunk: index,
                    end: end.unwrap_or(usize::MAX),
                    base_len: base.len(),
                })
            }
        };

        script.extend(base[cursor..offset].iter().map(equal));

        let mut position = offset;
        for line in &hunk.lines {
            if line.is_old() {
                if base[position].as_ref() != line.text {
                    return Err(AdaptError::BaseMismatch {
                        hunk: index,
                        line: position + 1,
                    });
                }
                position += 1;
            }
            script.push(line.to_op());
        }
        cursor = end;
    }

    script.extend(base[cursor..].iter().map(equal));
    debug!(
        hunks = hunks.len(),
        base = base.len(),
        ops = script.len(),
        "adapted remote hunks"
    );
    Ok(script)
}

/// Normalize a decoded response. Failures are logged and yield `None`.
pub fn adapt(response: &ServerDiffResponse, base: Option<&[Line]>) -> Option<EditScript> {
    match base {
        Some(base) => match flatten_hunks_with_base(&response.ops, base) {
            Ok(script) => Some(script),
            Err(e) => {
                warn!(error = %e, "remote hunks do not fit the base revision");
                None
            }
        },
        None => Some(flatten_hunks(&response.ops)),
    }
}

/// Decode a JSON response body and normalize it. Failures are logged and
/// yield `None`.
pub fn adapt_response(json: &str, base: Option<&[Line]>) -> Option<EditScript> {
    let response: ServerDiffResponse = match serde_json::from_str(json) {
        Ok(response) => response,
        Err(e) => {
            let e = AdaptError::Malformed(e.to_string());
            warn!(error = %e, "rejected remote diff response");
            return None;
        }
    };
    adapt(&response, base)
}

fn check_header(index: usize, hunk: &ServerHunk) -> AdaptResult<()> {
    let (actual_old, actual_new) = hunk.body_counts();
    if actual_old != hunk.old_lines || actual_new != hunk.new_lines {
        return Err(AdaptError::CountMismatch {
            hunk: index,
            declared_old: hunk.old_lines,
            declared_new: hunk.new_lines,
            actual_old,
            actual_new,
        });
    }
    if hunk.old_start == 0 && hunk.old_lines > 0 {
        return Err(AdaptError::InvalidStart {
            hunk: index,
            old_lines: hunk.old_lines,
        });
    }
    Ok(())
}

fn equal<S: AsRef<str>>(line: &S) -> DiffOp {
    DiffOp::Equal(line.as_ref().to_string())
}
