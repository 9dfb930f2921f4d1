//! Splitting of long responses into Discord-sized messages, and ordered delivery.
//!
//! Lengths are counted in characters, not bytes. Plain text is cut at fixed
//! character offsets. Code is packed line by line so no source line is ever
//! split, and every piece is fenced on its own so each message renders as code.

use crate::server::{bot::reply::ReplyChannel, error::delivery::DeliveryError};

/// Largest chunk sent as one message, leaving headroom under Discord's 2000 limit.
pub const MAX_CHUNK_LEN: usize = 1900;

/// Wraps `body` in a Markdown code fence tagged with `tag`.
pub fn fence(body: &str, tag: &str) -> String {
    format!("```{tag}\n{body}\n```")
}

/// Characters `fence` adds around a body: two fence markers, the tag, two newlines.
fn fence_overhead(tag: &str) -> usize {
    tag.chars().count() + 8
}

/// Splits `text` into chunks of at most `MAX_CHUNK_LEN` characters.
pub fn split_response(text: &str, code_tag: Option<&str>) -> Vec<String> {
    split_response_with_limit(text, code_tag, MAX_CHUNK_LEN)
}

/// Splits `text` into chunks of at most `max_len` characters.
///
/// Always returns at least one chunk, even for empty text. With a `code_tag`
/// the limit applies to the fenced chunk; a single line longer than the limit
/// becomes its own oversized chunk.
pub fn split_response_with_limit(
    text: &str,
    code_tag: Option<&str>,
    max_len: usize,
) -> Vec<String> {
    let max_len = max_len.max(1);

    match code_tag {
        Some(tag) => {
            let overhead = fence_overhead(tag);
            if text.chars().count() + overhead <= max_len {
                return vec![fence(text, tag)];
            }

            split_lines(text, max_len.saturating_sub(overhead))
                .iter()
                .map(|body| fence(body, tag))
                .collect()
        }
        None => {
            if text.chars().count() <= max_len {
                return vec![text.to_string()];
            }

            split_chars(text, max_len)
        }
    }
}

/// Cuts `text` every `max_len` characters.
fn split_chars(text: &str, max_len: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;

    for (offset, _) in text.char_indices() {
        if count == max_len {
            chunks.push(text[start..offset].to_string());
            start = offset;
            count = 0;
        }
        count += 1;
    }
    chunks.push(text[start..].to_string());

    chunks
}

/// Greedily packs whole lines into bodies of at most `budget` characters.
///
/// Joining the returned bodies with `\n` reproduces `text`.
fn split_lines(text: &str, budget: usize) -> Vec<String> {
    let mut bodies = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;
    let mut has_lines = false;

    for line in text.split('\n') {
        let line_len = line.chars().count();

        if has_lines && current_len + 1 + line_len > budget {
            bodies.push(std::mem::take(&mut current));
            current_len = 0;
            has_lines = false;
        }

        if has_lines {
            current.push('\n');
            current_len += 1;
        }
        current.push_str(line);
        current_len += line_len;
        has_lines = true;
    }
    bodies.push(current);

    bodies
}

/// Splits `text` and posts every chunk in order through `reply`.
///
/// The first chunk is the direct reply; later chunks are follow-ups. Each send
/// completes before the next starts, and delivery stops at the first failed send.
///
/// # Arguments
/// - `reply` - Reply channel of the invocation
/// - `text` - Full response text
/// - `code_tag` - Fence language for code payloads, `None` for plain text
///
/// # Returns
/// - `Ok(usize)` - Number of chunks delivered
/// - `Err(DeliveryError)` - A send failed; remaining chunks were abandoned
pub async fn deliver<R>(
    reply: &mut R,
    text: &str,
    code_tag: Option<&str>,
) -> Result<usize, DeliveryError>
where
    R: ReplyChannel + ?Sized,
{
    let chunks = split_response(text, code_tag);
    let total = chunks.len();

    for (index, chunk) in chunks.iter().enumerate() {
        let sent = if index == 0 {
            reply.reply(chunk).await
        } else {
            reply.follow_up(chunk).await
        };

        sent.map_err(|e| DeliveryError {
            index,
            total,
            source: Box::new(e),
        })?;
    }

    Ok(total)
}
