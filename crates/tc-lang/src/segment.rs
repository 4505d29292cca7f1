/// Tokens per clause after the anchor: `connector field operator threshold`.
pub const SEGMENT_SIZE: usize = 4;

/// Split a script source on whitespace and regroup the tokens into clauses.
///
/// The first group holds `SEGMENT_SIZE - 1` tokens because the anchor clause
/// has no connector; the rest are non-overlapping windows of `SEGMENT_SIZE`
/// starting at index 3. A token count that is not `3 + 4k` leaves a short
/// final group, which callers must tolerate.
pub fn segment_tokens(source: &str) -> Vec<Vec<&str>> {
    let tokens: Vec<&str> = source.split_whitespace().collect();
    if tokens.is_empty() {
        return Vec::new();
    }

    let head = (SEGMENT_SIZE - 1).min(tokens.len());
    let mut groups = Vec::with_capacity(1 + (tokens.len() - head).div_ceil(SEGMENT_SIZE));
    groups.push(tokens[..head].to_vec());
    groups.extend(tokens[head..].chunks(SEGMENT_SIZE).map(<[&str]>::to_vec));
    groups
}
