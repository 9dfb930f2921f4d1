const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Model answer to `/code` with explanation before and after its fenced script.
pub const PROSE_WRAPPED_SCRIPT: &str = concat!(
    "Here is your script:\n",
    "```csharp\n",
    "public class Door : MonoBehaviour {}\n",
    "```\n",
    "Attach it to the door.",
);

/// The script inside `PROSE_WRAPPED_SCRIPT`.
pub const DOOR_SCRIPT: &str = "public class Door : MonoBehaviour {}";

/// Plain text of exactly `len` characters with no line breaks.
///
/// Characters cycle through the alphabet with a space every tenth position so
/// chunk boundaries land mid-word, as they would for a real answer.
pub fn plain(len: usize) -> String {
    (0..len)
        .map(|i| {
            if i % 10 == 9 {
                ' '
            } else {
                ALPHABET[i % ALPHABET.len()] as char
            }
        })
        .collect()
}

/// Plain text of exactly `len` characters built from a multi-byte character.
///
/// Used to verify that splitting counts characters rather than bytes.
pub fn multibyte(len: usize) -> String {
    "é".repeat(len)
}

/// C#-like source of `count` lines, each exactly `width` characters long.
///
/// Lines are joined with `\n` and carry no trailing newline.
pub fn code_lines(count: usize, width: usize) -> String {
    (0..count)
        .map(|i| code_line(i, width))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A single numbered source line padded or truncated to `width` characters.
pub fn code_line(index: usize, width: usize) -> String {
    let mut line = format!("var value{index} = {index};");
    if line.len() < width {
        line.push_str(&" ".repeat(width - line.len()));
    }
    line.truncate(width);
    line
}
