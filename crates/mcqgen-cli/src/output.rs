use std::io::Write;

use mcqgen_core::format::option_letter;
use mcqgen_core::{Document, Question};
use owo_colors::OwoColorize;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print the loaded document's id and a content preview.
pub fn print_document(
    w: &mut dyn Write,
    label: &str,
    doc: &Document,
    full: bool,
    color: ColorMode,
) -> std::io::Result<()> {
    let chars = doc.content.chars().count();
    if color.enabled() {
        writeln!(w, "{} {}", "Source:".bold(), label)?;
        writeln!(w, "{} {}", "Document id:".bold(), doc.id.dimmed())?;
        writeln!(w, "{} {}", "Characters:".bold(), chars)?;
    } else {
        writeln!(w, "Source: {}", label)?;
        writeln!(w, "Document id: {}", doc.id)?;
        writeln!(w, "Characters: {}", chars)?;
    }
    writeln!(w)?;

    if full {
        writeln!(w, "{}", doc.content)?;
    } else {
        writeln!(w, "{}", truncate(&doc.content, 300))?;
    }
    writeln!(w)?;
    Ok(())
}

/// Print questions in the same layout as [`mcqgen_core::format_mcqs`],
/// highlighting the answer when color is on.
pub fn print_questions(
    w: &mut dyn Write,
    questions: &[Question],
    color: ColorMode,
) -> std::io::Result<()> {
    if !color.enabled() {
        return write!(w, "{}", mcqgen_core::format_mcqs(questions));
    }

    for (i, q) in questions.iter().enumerate() {
        writeln!(w, "{} {}", format!("{}.", i + 1).bold(), q.prompt.bold())?;
        for (j, option) in q.options.iter().enumerate() {
            let line = format!("   {}) {}", option_letter(j), option);
            if option == &q.correct_answer {
                writeln!(w, "{}", line.green())?;
            } else {
                writeln!(w, "{}", line)?;
            }
        }
        writeln!(w, "   {} {}", "Answer:".green().bold(), q.correct_answer)?;
        writeln!(w)?;
    }
    Ok(())
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
