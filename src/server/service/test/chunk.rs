use test_utils::fixture::text;

use super::{RecordingReply, Sent};
use crate::server::service::{
    chunk::{deliver, fence, split_response, split_response_with_limit, MAX_CHUNK_LEN},
    prompt::{extract_code, FENCE},
};

fn strip_fence<'a>(chunk: &'a str, tag: &str) -> &'a str {
    chunk
        .strip_prefix(&format!("```{tag}\n"))
        .and_then(|rest| rest.strip_suffix("\n```"))
        .expect("chunk is fenced")
}

/// Tests a response at the size limit.
///
/// Expected: One chunk equal to the input
#[test]
fn short_text_is_single_chunk() {
    let answer = text::plain(MAX_CHUNK_LEN);

    assert_eq!(split_response(&answer, None), vec![answer.clone()]);
    assert_eq!(split_response("Hi", None), vec!["Hi".to_string()]);
}

/// Tests a 5000 character plain response.
///
/// Expected: 3 chunks of 1900, 1900, and 1200 characters that concatenate to the input
#[test]
fn long_text_splits_at_fixed_offsets() {
    let answer = text::plain(5000);

    let chunks = split_response(&answer, None);

    assert_eq!(chunks.len(), 3);
    assert_eq!(
        chunks.iter().map(|c| c.chars().count()).collect::<Vec<_>>(),
        vec![1900, 1900, 1200]
    );
    assert_eq!(chunks.concat(), answer);
}

/// Tests that splitting counts characters rather than bytes.
///
/// Expected: No chunk over the limit in characters, and lossless reassembly
#[test]
fn multibyte_text_splits_on_char_boundaries() {
    let answer = text::multibyte(4000);

    let chunks = split_response(&answer, None);

    assert_eq!(chunks.len(), 3);
    assert!(chunks.iter().all(|c| c.chars().count() <= MAX_CHUNK_LEN));
    assert_eq!(chunks.concat(), answer);
}

/// Tests the plain-text invariants over a range of sizes and limits.
///
/// Expected: Every chunk within the limit and concatenation equal to the input
#[test]
fn plain_chunks_reassemble_for_any_length() {
    for len in [1, 9, 10, 11, 99, 100, 101, 250] {
        for limit in [1, 7, 10, 100] {
            let answer = text::plain(len);
            let chunks = split_response_with_limit(&answer, None, limit);

            assert!(chunks.iter().all(|c| c.chars().count() <= limit));
            assert_eq!(chunks.concat(), answer, "len {len}, limit {limit}");
            assert_eq!(chunks.len(), len.div_ceil(limit).max(1));
        }
    }
}

#[test]
fn empty_text_is_one_chunk() {
    assert_eq!(split_response("", None), vec![String::new()]);
    assert_eq!(
        split_response("", Some("csharp")),
        vec![fence("", "csharp")]
    );
}

#[test]
fn short_code_is_fenced_once() {
    let code = "public class A : MonoBehaviour {}";

    assert_eq!(
        split_response(code, Some("csharp")),
        vec!["```csharp\npublic class A : MonoBehaviour {}\n```".to_string()]
    );
}

/// Tests line-preserving code splitting.
///
/// Verifies each fenced chunk fits the limit, each body is a run of whole
/// lines, and joining the bodies reproduces the source.
///
/// Expected: Several fenced chunks with no line split across them
#[test]
fn long_code_splits_on_line_boundaries() {
    let code = text::code_lines(200, 40);

    let chunks = split_response(&code, Some("csharp"));

    assert!(chunks.len() > 1);
    assert!(chunks.iter().all(|c| c.chars().count() <= MAX_CHUNK_LEN));

    let bodies: Vec<&str> = chunks.iter().map(|c| strip_fence(c, "csharp")).collect();
    for body in &bodies {
        assert!(body.lines().all(|line| line.len() == 40));
    }
    assert_eq!(bodies.join("\n"), code);
}

/// Tests that bodies are packed greedily.
///
/// Expected: With room for exactly two 10-char lines per chunk, 5 lines give 3 chunks
#[test]
fn code_chunks_pack_greedily() {
    let code = text::code_lines(5, 10);
    // "```cs\n" + 10 + "\n" + 10 + "\n```" = 31
    let chunks = split_response_with_limit(&code, Some("cs"), 31);

    let bodies: Vec<&str> = chunks.iter().map(|c| strip_fence(c, "cs")).collect();
    assert_eq!(bodies.len(), 3);
    assert_eq!(bodies[0].lines().count(), 2);
    assert_eq!(bodies[1].lines().count(), 2);
    assert_eq!(bodies[2].lines().count(), 1);
}

/// Tests a single source line longer than the limit.
///
/// Expected: The line becomes its own oversized chunk, unsplit
#[test]
fn oversized_line_is_its_own_chunk() {
    let long_line = "x".repeat(60);
    let code = format!("short one\n{long_line}\nshort two");

    let chunks = split_response_with_limit(&code, Some("cs"), 40);

    let bodies: Vec<&str> = chunks.iter().map(|c| strip_fence(c, "cs")).collect();
    assert_eq!(bodies, vec!["short one", long_line.as_str(), "short two"]);
}

/// Tests that blank lines inside code survive splitting.
///
/// Expected: Joined bodies equal to the input, blank lines included
#[test]
fn blank_lines_are_preserved() {
    let code = format!(
        "{}\n\n\n{}",
        text::code_lines(30, 20),
        text::code_lines(30, 20)
    );

    let chunks = split_response_with_limit(&code, Some("cs"), 200);

    let bodies: Vec<&str> = chunks.iter().map(|c| strip_fence(c, "cs")).collect();
    assert_eq!(bodies.join("\n"), code);
}

/// Tests a model reply with prose around its own fenced block.
///
/// Expected: One chunk with exactly an opening and a closing fence
#[tokio::test]
async fn prose_wrapped_code_is_fenced_once() {
    let code = extract_code(text::PROSE_WRAPPED_SCRIPT).unwrap();
    let mut reply = RecordingReply::new();

    deliver(&mut reply, &code, Some("csharp")).await.unwrap();

    let messages = reply.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].matches(FENCE).count(), 2);
    assert_eq!(strip_fence(&messages[0], "csharp"), text::DOOR_SCRIPT);
}

/// Tests a long fenced script with prose around it.
///
/// Expected: Every delivered chunk carries exactly two fence markers
#[tokio::test]
async fn every_code_chunk_has_two_fences() {
    let answer = format!(
        "Sure! Here it is:\n```csharp\n{}\n```\nLet me know if you need changes.",
        text::code_lines(200, 40)
    );
    let code = extract_code(&answer).unwrap();
    let mut reply = RecordingReply::new();

    let delivered = deliver(&mut reply, &code, Some("csharp")).await.unwrap();

    assert!(delivered > 1);
    for message in reply.messages() {
        assert_eq!(message.matches(FENCE).count(), 2);
    }
}

/// Tests ordered delivery of a long response.
///
/// Expected: First chunk as the reply, the rest as follow-ups, in order
#[tokio::test]
async fn delivers_first_chunk_as_reply_then_follow_ups() {
    let answer = text::plain(5000);
    let mut reply = RecordingReply::new();

    let delivered = deliver(&mut reply, &answer, None).await.unwrap();

    assert_eq!(delivered, 3);
    assert!(matches!(reply.sent[0], Sent::Reply(_)));
    assert!(matches!(reply.sent[1], Sent::FollowUp(_)));
    assert!(matches!(reply.sent[2], Sent::FollowUp(_)));
    assert_eq!(reply.messages().concat(), answer);
}

/// Tests that delivery stops at the first failed send.
///
/// Expected: Err naming chunk 1 of 3, with chunk 2 never sent
#[tokio::test]
async fn stops_at_first_failed_send() {
    let answer = text::plain(5000);
    let mut reply = RecordingReply::failing_send_at(1);

    let err = deliver(&mut reply, &answer, None).await.unwrap_err();

    assert_eq!(err.index, 1);
    assert_eq!(err.total, 3);
    assert_eq!(reply.sent.len(), 1);
    assert_eq!(reply.messages(), vec![answer[..1900].to_string()]);
}
