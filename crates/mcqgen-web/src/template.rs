use axum::response::Html;

use mcqgen_core::{Difficulty, QuestionCount, SourceKind};

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>MCQ Generator</title>
<style>
body { font-family: system-ui, sans-serif; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; }
label { display: block; margin-top: 1rem; font-weight: 600; }
pre { background: #f4f4f4; padding: 1rem; white-space: pre-wrap; }
.error { color: #b00020; }
</style>
</head>
<body>
<h1>MCQ Generator</h1>
"#;

const PAGE_TAIL: &str = "</body>\n</html>\n";

/// Escape text for inclusion in HTML bodies and attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn options_html<T: PartialEq + Copy>(
    items: &[T],
    selected: T,
    value: impl Fn(T) -> &'static str,
) -> String {
    items
        .iter()
        .map(|&item| {
            let v = value(item);
            let sel = if item == selected { " selected" } else { "" };
            format!("<option value=\"{v}\"{sel}>{v}</option>")
        })
        .collect::<Vec<_>>()
        .join("")
}

/// Render the input form for the chosen source type.
pub fn render_index(kind: SourceKind, num: QuestionCount, difficulty: Difficulty) -> Html<String> {
    let source_options = options_html(&SourceKind::ALL, kind, |k| k.as_str());
    let difficulty_options = options_html(&Difficulty::ALL, difficulty, |d| d.label());

    let input = match kind {
        SourceKind::Pdf => {
            r#"<label for="file">Choose a PDF file</label>
<input id="file" type="file" name="file" accept=".pdf" required>"#
        }
        SourceKind::Text => {
            r#"<label for="file">Choose a text file</label>
<input id="file" type="file" name="file" accept=".txt" required>"#
        }
        SourceKind::Url => {
            r#"<label for="url">Enter a URL</label>
<input id="url" type="url" name="url" required>"#
        }
    };

    let body = format!(
        r#"<form method="get" action="/">
<label for="source_type">Select source type</label>
<select id="source_type" name="source_type" onchange="this.form.submit()">{source_options}</select>
<noscript><button type="submit">Switch</button></noscript>
</form>
<form method="post" action="/generate" enctype="multipart/form-data">
<input type="hidden" name="source_type" value="{kind}">
<label for="num">Number of MCQs</label>
<input id="num" type="number" name="num" min="{min}" max="{max}" value="{num}">
<label for="difficulty">Difficulty Level</label>
<select id="difficulty" name="difficulty">{difficulty_options}</select>
{input}
<label for="learning_objective">Learning objective (optional)</label>
<input id="learning_objective" type="text" name="learning_objective">
<p><button type="submit">Generate MCQs</button></p>
</form>
"#,
        min = QuestionCount::MIN,
        max = QuestionCount::MAX,
    );

    Html(format!("{PAGE_HEAD}{body}{PAGE_TAIL}"))
}

/// Render generated questions as preformatted text.
pub fn render_result(label: &str, formatted: &str) -> Html<String> {
    let body = format!(
        "<p>Questions from <strong>{}</strong></p>\n<pre>{}</pre>\n<p><a href=\"/\">Generate more</a></p>\n",
        escape_html(label),
        escape_html(formatted)
    );
    Html(format!("{PAGE_HEAD}{body}{PAGE_TAIL}"))
}

/// Render an error message.
pub fn render_error(message: &str) -> Html<String> {
    let body = format!(
        "<p class=\"error\">{}</p>\n<p><a href=\"/\">Back</a></p>\n",
        escape_html(message)
    );
    Html(format!("{PAGE_HEAD}{body}{PAGE_TAIL}"))
}
