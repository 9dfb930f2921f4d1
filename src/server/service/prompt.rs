//! Fixed system contexts, prompt templates, and lookup tables for each command.

/// System context for free-form questions.
pub const ASK_CONTEXT: &str =
    "You are a Unity development expert. Provide clear, practical advice.";

/// System context for script generation.
pub const CODE_CONTEXT: &str = "You are a senior Unity C# developer. Write clean, \
    well-commented C# scripts that follow Unity conventions. Reply with a single \
    C# code block and no prose outside it.";

/// System context for error explanations.
pub const ERROR_CONTEXT: &str = "You are a Unity debugging expert. Explain what causes \
    the error, how to fix it step by step, and how to avoid it in future.";

/// Category used when the user does not pick one.
pub const DEFAULT_CATEGORY: &str = "general";

const GENERAL_HINT: &str =
    "Write a general-purpose MonoBehaviour that follows Unity naming and lifecycle conventions.";

/// Script categories and the guidance added to the prompt for each.
const CATEGORY_HINTS: &[(&str, &str)] = &[
    (
        "movement",
        "Focus on character movement with CharacterController or Rigidbody, input handling, and smooth motion.",
    ),
    (
        "physics",
        "Focus on Rigidbody physics, colliders, forces, and doing physics work in FixedUpdate.",
    ),
    (
        "ui",
        "Focus on Unity UI, button and event wiring, and keeping UI logic out of gameplay scripts.",
    ),
    (
        "animation",
        "Focus on Animator controllers, parameters, and animation events.",
    ),
    (
        "audio",
        "Focus on AudioSource and AudioMixer usage, including pooling for frequent sounds.",
    ),
    (
        "ai",
        "Focus on NavMeshAgent pathfinding and a simple state machine for enemy behaviour.",
    ),
    (
        "networking",
        "Focus on Netcode for GameObjects, ownership checks, and RPCs.",
    ),
    (
        "input",
        "Focus on the Input System package with action maps and callbacks.",
    ),
];

/// Well-known error substrings (lowercase) and a one-line fix for each.
///
/// Order matters: the first entry contained in the user's error wins.
const COMMON_ERRORS: &[(&str, &str)] = &[
    (
        "nullreferenceexception",
        "A reference is null. Make sure every field is assigned in the Inspector or initialised in Awake/Start before it is used.",
    ),
    (
        "missingreferenceexception",
        "The object was destroyed but is still referenced. Null-check it, or clear the reference when the object is destroyed.",
    ),
    (
        "unassignedreferenceexception",
        "A serialized field was never assigned. Drag the object into the field in the Inspector.",
    ),
    (
        "indexoutofrangeexception",
        "An index is outside the collection. Check Length or Count before indexing.",
    ),
    (
        "missingcomponentexception",
        "The GameObject lacks the component being accessed. Add the component or check the result of GetComponent.",
    ),
    (
        "does not exist in the current context",
        "The name is misspelled or out of scope. Check spelling, declarations, and using directives.",
    ),
    (
        "the type or namespace name",
        "A type cannot be found. Add the missing using directive or assembly reference.",
    ),
];

/// Joins a system context and a user prompt into one completion input.
///
/// The context comes first, separated by a blank line, and is omitted entirely
/// when empty.
pub fn build_prompt(system_context: &str, user_prompt: &str) -> String {
    if system_context.is_empty() {
        user_prompt.to_string()
    } else {
        format!("{system_context}\n\n{user_prompt}")
    }
}

/// Guidance for a script category, falling back to the general hint.
pub fn category_hint(category: &str) -> &'static str {
    let category = category.trim().to_ascii_lowercase();

    CATEGORY_HINTS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, hint)| *hint)
        .unwrap_or(GENERAL_HINT)
}

/// One-line fix for the first well-known error contained in `error_text`.
pub fn quick_fix(error_text: &str) -> Option<&'static str> {
    let error_text = error_text.to_lowercase();

    COMMON_ERRORS
        .iter()
        .find(|(pattern, _)| error_text.contains(pattern))
        .map(|(_, fix)| *fix)
}

/// Line prepended to an error explanation, or an empty string when no fix is known.
pub fn quick_fix_prefix(error_text: &str) -> String {
    match quick_fix(error_text) {
        Some(fix) => format!("**Quick fix:** {fix}\n\n"),
        None => String::new(),
    }
}

pub fn ask_prompt(question: &str) -> String {
    format!("Unity question: {question}")
}

pub fn code_prompt(description: &str, category: &str) -> String {
    format!(
        "Create a Unity C# script: {description}\nCategory: {category}\n{}",
        category_hint(category)
    )
}

pub fn error_prompt(error_text: &str) -> String {
    format!("Explain this Unity error and how to fix it:\n{error_text}")
}

/// Markdown code fence marker.
pub const FENCE: &str = "```";

/// Extracts the source code from a model reply to `/code`.
///
/// Models often fence their answer themselves, sometimes with prose around it.
/// The body of the first fenced block is returned without the prose or the fence
/// lines, so the chunker can re-fence each piece. A reply with no fence at all is
/// taken as bare code, with surrounding blank lines removed and indentation kept.
///
/// # Returns
/// - `Some(String)` - Code body containing no fence marker
/// - `None` - The fences are unbalanced or nested; send the reply as plain text
pub fn extract_code(text: &str) -> Option<String> {
    let Some(open) = text.find(FENCE) else {
        return Some(text.trim_matches(['\n', '\r']).to_string());
    };

    // The opening line holds the language tag, if any
    let (_, rest) = text[open + FENCE.len()..].split_once('\n')?;

    let body = if rest.starts_with(FENCE) {
        ""
    } else {
        let close = rest.find("\n```")?;
        &rest[..close]
    };

    if body.contains(FENCE) {
        return None;
    }

    Some(body.trim_end_matches('\r').to_string())
}
