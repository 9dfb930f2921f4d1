use test_utils::fixture::text;

use super::FakeCompletion;
use crate::server::service::{
    prompt::{ASK_CONTEXT, CODE_CONTEXT, ERROR_CONTEXT},
    responder::{AiReply, AiResponder, APOLOGY, CODE_TAG},
};

/// Tests that exactly one completion call is made with context first.
///
/// Expected: Generated text returned, one prompt of "context\n\nprompt"
#[tokio::test]
async fn respond_sends_context_then_prompt() {
    let api = FakeCompletion::answering("Use Rigidbody.AddForce.");
    let responder = AiResponder::new(api.clone());

    let text = responder.respond("How do I jump?", "Be brief.").await;

    assert_eq!(text, "Use Rigidbody.AddForce.");
    assert_eq!(
        api.prompts(),
        vec!["Be brief.\n\nHow do I jump?".to_string()]
    );
}

/// Tests the fail-soft policy.
///
/// Expected: Apology string instead of an error
#[tokio::test]
async fn respond_returns_apology_on_failure() {
    let api = FakeCompletion::failing();
    let responder = AiResponder::new(api.clone());

    let text = responder.respond("How do I jump?", ASK_CONTEXT).await;

    assert_eq!(text, APOLOGY);
    assert_eq!(api.calls(), 1);
}

#[tokio::test]
async fn answer_question_uses_ask_context() {
    let api = FakeCompletion::answering("answer");
    let responder = AiResponder::new(api.clone());

    let reply = responder.answer_question("What is a prefab?").await;

    assert_eq!(reply, AiReply::Text("answer".to_string()));
    let prompt = &api.prompts()[0];
    assert!(prompt.starts_with(ASK_CONTEXT));
    assert!(prompt.ends_with("Unity question: What is a prefab?"));
}

/// Tests script generation with a fenced model answer.
///
/// Expected: Code reply tagged csharp with the model's fence removed
#[tokio::test]
async fn generate_code_strips_model_fence() {
    let api = FakeCompletion::answering("```csharp\npublic class Jump : MonoBehaviour {}\n```");
    let responder = AiResponder::new(api.clone());

    let reply = responder.generate_code("double jump", "movement").await;

    assert_eq!(
        reply,
        AiReply::Code {
            body: "public class Jump : MonoBehaviour {}".to_string(),
            tag: CODE_TAG,
        }
    );
    let prompt = &api.prompts()[0];
    assert!(prompt.starts_with(CODE_CONTEXT));
    assert!(prompt.contains("double jump"));
    assert!(prompt.contains("Category: movement"));
}

/// Tests a fenced script with explanation around it.
///
/// Expected: Code reply holding only the block body
#[tokio::test]
async fn generate_code_drops_prose_around_fence() {
    let api = FakeCompletion::answering(text::PROSE_WRAPPED_SCRIPT);
    let responder = AiResponder::new(api);

    let reply = responder.generate_code("door", "general").await;

    assert_eq!(
        reply,
        AiReply::Code {
            body: text::DOOR_SCRIPT.to_string(),
            tag: CODE_TAG,
        }
    );
}

/// Tests model output with an unclosed fence.
///
/// Expected: The output unchanged as plain text, not fenced again
#[tokio::test]
async fn generate_code_sends_unbalanced_fences_as_text() {
    let answer = "```csharp\npublic class Door : MonoBehaviour {}";
    let responder = AiResponder::new(FakeCompletion::answering(answer));

    let reply = responder.generate_code("door", "general").await;

    assert_eq!(reply, AiReply::Text(answer.to_string()));
}

/// Tests that a failed generation is not fenced as code.
///
/// Expected: Plain-text apology
#[tokio::test]
async fn generate_code_failure_is_plain_text() {
    let responder = AiResponder::new(FakeCompletion::failing());

    let reply = responder.generate_code("double jump", "movement").await;

    assert_eq!(reply, AiReply::Text(APOLOGY.to_string()));
}

/// Tests that a known error gets the quick-fix line before the explanation.
///
/// Expected: Text starting with the quick fix and ending with the explanation
#[tokio::test]
async fn explain_error_prepends_quick_fix() {
    let api = FakeCompletion::answering("The player reference is missing.");
    let responder = AiResponder::new(api.clone());

    let reply = responder
        .explain_error("NullReferenceException: Object reference not set")
        .await;

    let AiReply::Text(text) = reply else {
        panic!("expected text reply");
    };
    assert!(text.starts_with("**Quick fix:**"));
    assert!(text.ends_with("\n\nThe player reference is missing."));
    assert!(api.prompts()[0].starts_with(ERROR_CONTEXT));
}

/// Tests an unrecognised error.
///
/// Expected: Explanation only, with no prefix
#[tokio::test]
async fn explain_error_without_match_has_no_prefix() {
    let responder = AiResponder::new(FakeCompletion::answering("Check the shader."));

    let reply = responder
        .explain_error("Shader error in 'Custom/Water'")
        .await;

    assert_eq!(reply, AiReply::Text("Check the shader.".to_string()));
}

/// Tests that the quick fix survives a failed completion call.
///
/// Expected: Quick fix followed by the apology
#[tokio::test]
async fn explain_error_keeps_quick_fix_on_failure() {
    let responder = AiResponder::new(FakeCompletion::failing());

    let reply = responder.explain_error("IndexOutOfRangeException").await;

    let AiReply::Text(text) = reply else {
        panic!("expected text reply");
    };
    assert!(text.starts_with("**Quick fix:**"));
    assert!(text.ends_with(APOLOGY));
}
