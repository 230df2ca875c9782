//! Excerpt truncation
//!
//! Notion caps a rich-text content object at 2000 characters. Counting bytes
//! of each line and stopping at 1900 keeps multi-byte text safely under the
//! limit without splitting a line.

/// Maximum number of lines kept in an excerpt
pub const MAX_EXCERPT_LINES: usize = 70;

/// Byte budget of an excerpt (line separators not counted)
pub const MAX_EXCERPT_BYTES: usize = 1900;

/// Cuts `content` down to whole lines within the line and byte budgets
///
/// Lines are taken in order until either 70 lines have been kept or the
/// running byte total of the kept lines would reach 1900. A first line that is
/// already over budget yields an empty excerpt.
pub fn truncate_excerpt(content: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut len = 0usize;
    for line in content.split('\n').take(MAX_EXCERPT_LINES) {
        len += line.len();
        if len >= MAX_EXCERPT_BYTES {
            break;
        }
        lines.push(line);
    }
    lines.join("\n")
}
