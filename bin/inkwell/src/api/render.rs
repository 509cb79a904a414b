use std::fmt::Write as _;

use inkwell_core::{
    GenerationError, GenerationResult,
    model::{Audience, Industry, Language, Length, Purpose, ReplyType, Tone, Urgency},
    validator::{MAX_KEY_POINTS_CHARS, MAX_NAME_CHARS, allowed_values, fields},
};

use crate::api::errors::user_message;

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn select(out: &mut String, field: &str, label: &str, values: &[&'static str], selected: &str) {
    let _ = writeln!(out, r#"<label for="{field}">{label}</label>"#);
    let _ = writeln!(out, r#"<select id="{field}" name="{field}" required>"#);
    for value in values {
        let marker = if *value == selected { " selected" } else { "" };
        let _ = writeln!(out, r#"  <option value="{value}"{marker}>{value}</option>"#);
    }
    out.push_str("</select>\n");
}

/// The generation form. Choices come straight from the enumerated sets.
pub fn index_page() -> String {
    let mut form = String::new();
    select(&mut form, fields::PURPOSE, "Purpose", &allowed_values::<Purpose>(), "general");
    select(&mut form, fields::TONE, "Tone", &allowed_values::<Tone>(), "neutral");
    select(&mut form, fields::LENGTH, "Length", &allowed_values::<Length>(), "medium");
    select(&mut form, fields::LANGUAGE, "Language", &allowed_values::<Language>(), "English");
    select(&mut form, fields::AUDIENCE, "Audience", &allowed_values::<Audience>(), "general");
    select(&mut form, fields::INDUSTRY, "Industry", &allowed_values::<Industry>(), "general");
    select(&mut form, fields::URGENCY, "Urgency", &allowed_values::<Urgency>(), "normal");
    select(&mut form, fields::REPLY_TYPE, "Message type", &allowed_values::<ReplyType>(), "new");

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Inkwell</title>
<script src="https://unpkg.com/htmx.org@1.9.12"></script>
</head>
<body>
<main>
<h1>Inkwell</h1>
<form method="post" action="/generate" hx-post="/generate" hx-target="#result" hx-indicator="#busy">
{form}<label for="{recipient}">Recipient name</label>
<input id="{recipient}" name="{recipient}" maxlength="{name_max}">
<label for="{sender}">Your name</label>
<input id="{sender}" name="{sender}" maxlength="{name_max}">
<label for="{incoming}">Email you are replying to</label>
<textarea id="{incoming}" name="{incoming}" rows="6"></textarea>
<label for="{key_points}">Key points</label>
<textarea id="{key_points}" name="{key_points}" rows="6" maxlength="{key_points_max}" required></textarea>
<button type="submit">Generate</button>
<span id="busy" class="htmx-indicator">Writing...</span>
</form>
<section id="result"></section>
</main>
</body>
</html>
"##,
        recipient = fields::RECIPIENT_NAME,
        sender = fields::SENDER_NAME,
        incoming = fields::INCOMING_EMAIL,
        key_points = fields::KEY_POINTS,
        name_max = MAX_NAME_CHARS,
        key_points_max = MAX_KEY_POINTS_CHARS,
    )
}

/// HTML fragment for a generated email. All model text is escaped.
pub fn result_fragment(result: &GenerationResult) -> String {
    let mut out = String::from("<article class=\"result\">\n");
    let _ = writeln!(out, "<h2 class=\"subject\">{}</h2>", html_escape(result.subject()));

    out.push_str("<ul class=\"subject-variants\">\n");
    for variant in result.subject_variants() {
        let _ = writeln!(out, "  <li>{}</li>", html_escape(variant));
    }
    out.push_str("</ul>\n");

    let _ = writeln!(
        out,
        "<pre class=\"body\">{}</pre>",
        html_escape(result.body())
    );
    let _ = writeln!(
        out,
        "<p class=\"meta\">{} words &middot; {} &middot; spam score {}/100</p>",
        result.word_count(),
        result.read_time_display(),
        result.spam_score()
    );

    if !result.spam_warnings().is_empty() {
        out.push_str("<ul class=\"spam-warnings\">\n");
        for warning in result.spam_warnings() {
            let _ = writeln!(out, "  <li>{}</li>", html_escape(warning));
        }
        out.push_str("</ul>\n");
    }
    out.push_str("</article>\n");
    out
}

pub fn error_fragment(err: &GenerationError) -> String {
    format!(
        "<div class=\"error\" data-kind=\"{}\">{}</div>\n",
        err.kind(),
        html_escape(&user_message(err))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkwell_core::{ValidationError, parse_reply};

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"a & b < c > d "e" 'f'"#),
            "a &amp; b &lt; c &gt; d &quot;e&quot; &#39;f&#39;"
        );
    }

    #[test]
    fn test_index_page_lists_every_language() {
        let page = index_page();
        for language in allowed_values::<Language>() {
            assert!(page.contains(&format!(r#"<option value="{language}""#)));
        }
        assert!(page.contains(r#"<option value="English" selected>"#));
        assert!(page.contains(r#"name="key_points""#));
    }

    #[test]
    fn test_result_fragment_escapes_model_text() {
        let result = parse_reply(
            r#"{"subject":"<script>alert(1)</script>","subject_variants":["A & B","C"],
                "body":"Hi <b>there</b>","spam_score":40,"spam_warnings":["FREE!!!"]}"#,
        )
        .unwrap();
        let html = result_fragment(&result);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("A &amp; B"));
        assert!(html.contains("spam score 40/100"));
        assert!(html.contains("FREE!!!"));
    }

    #[test]
    fn test_error_fragment_carries_kind() {
        let html = error_fragment(&ValidationError::required("key_points").into());
        assert!(html.contains(r#"data-kind="validation_error""#));
        assert!(html.contains("key_points"));
    }
}
