//! Document flattening: project a content tree onto comparable lines.
//!
//! Each top-level block contributes zero or more lines. Structure below one
//! line is not kept: nested list items are absorbed into their parent item's
//! text, and only the summary of a `details` block is emitted.

use revdiff_types::{ContentNode, Line, NodeKind, IMAGE_TAG};
use tracing::debug;

/// Flatten top-level nodes into an ordered sequence of lines.
///
/// - `heading` / `paragraph`: one line, even when empty.
/// - `bulletList` / `orderedList`: one line per direct `listItem` child.
/// - `details`: one line for the first child (the summary), if any.
/// - `image`: one [`image_placeholder`] line.
/// - `codeBlock`: one line with the untrimmed text.
/// - anything else: one line, only when its text is non-empty.
pub fn flatten(nodes: &[ContentNode]) -> Vec<Line> {
    let mut lines = Vec::with_capacity(nodes.len());
    for node in nodes {
        flatten_block(node, &mut lines);
    }
    debug!(nodes = nodes.len(), lines = lines.len(), "flattened document");
    lines
}

fn flatten_block(node: &ContentNode, lines: &mut Vec<Line>) {
    match &node.kind {
        NodeKind::Heading | NodeKind::Paragraph | NodeKind::CodeBlock => {
            lines.push(extract_text(node));
        }
        NodeKind::BulletList | NodeKind::OrderedList => {
            lines.extend(
                node.children
                    .iter()
                    .filter(|item| item.kind == NodeKind::ListItem)
                    .map(extract_text),
            );
        }
        NodeKind::Details => {
            if let Some(summary) = node.children.first() {
                lines.push(extract_text(summary));
            }
        }
        NodeKind::Image => lines.push(image_placeholder(node)),
        NodeKind::ListItem | NodeKind::Other(_) => {
            let text = extract_text(node);
            if !text.is_empty() {
                lines.push(text);
            }
        }
    }
}

/// Concatenate the text of a subtree in document order, with no separators.
///
/// A node carrying `text` contributes exactly that text and its children are
/// not visited. Walks with an explicit stack, so deep trees do not grow the
/// call stack.
pub fn extract_text(node: &ContentNode) -> String {
    let mut out = String::new();
    let mut stack = vec![node];
    while let Some(node) = stack.pop() {
        if let Some(text) = &node.text {
            out.push_str(text);
            continue;
        }
        stack.extend(node.children.iter().rev());
    }
    out
}

/// Placeholder line for an image: `"[image] <alt> <src>"`, trimmed.
///
/// The source is `src` when non-empty, else `url`, else empty.
pub fn image_placeholder(node: &ContentNode) -> Line {
    let alt = node.attr_str("alt").unwrap_or_default();
    let src = node
        .attr_str("src")
        .filter(|s| !s.is_empty())
        .or_else(|| node.attr_str("url"))
        .unwrap_or_default();
    format!("{IMAGE_TAG} {alt} {src}").trim().to_string()
}
