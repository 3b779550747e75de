use std::fmt::Write;

use crate::Question;

/// Render questions as numbered blocks with lettered options and the answer.
///
/// ```text
/// 1. What is the capital of France?
///    a) Paris
///    b) Lyon
///    Answer: Paris
/// ```
pub fn format_mcqs(questions: &[Question]) -> String {
    let mut out = String::new();
    for (i, q) in questions.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, q.prompt);
        for (j, option) in q.options.iter().enumerate() {
            let _ = writeln!(out, "   {}) {}", option_letter(j), option);
        }
        let _ = writeln!(out, "   Answer: {}", q.correct_answer);
        out.push('\n');
    }
    out
}

/// `0 -> 'a'`, `1 -> 'b'`, ... Falls back to `'?'` past the code point range.
pub fn option_letter(index: usize) -> char {
    u32::try_from(index)
        .ok()
        .and_then(|i| char::from_u32(97 + i))
        .unwrap_or('?')
}
