//! Page shell around a rendered body.

use pulldown_cmark::{html, Parser};
use pulldown_cmark_escape::escape_html;

/// Title of every generated page.
pub const DEFAULT_TITLE: &str = "Template";

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>"#;

const PAGE_STYLE: &str = r#"</title>
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <style>
        body { font-family: 'Segoe UI', Arial, sans-serif; background: #f8f9fa; margin: 0; padding: 0; }
        .container { max-width: 900px; margin: 40px auto; background: #fff; border-radius: 12px;
                     box-shadow: 0 4px 24px rgba(0,0,0,0.08); padding: 32px 40px; }
        h1, h2, h3 { color: #2c3e50; margin-top: 1.5em; }
        h1 { border-bottom: 2px solid #3498db; padding-bottom: 0.3em; }
        h2 { border-left: 4px solid #3498db; padding-left: 0.5em; margin-top: 1.2em; }
        p { color: #444; line-height: 1.7; }
        ul, ol { margin-left: 2em; }
        a { color: #3498db; text-decoration: none; }
        a:hover { text-decoration: underline; }
        @media (max-width: 600px) { .container { padding: 16px 8px; } }
    </style>
</head>
<body>
    <div class="container">
"#;

const PAGE_TAIL: &str = r#"    </div>
</body>
</html>
"#;

/// Convert a Markdown body to HTML and embed it in the page shell.
pub fn wrap_in_page(body_markdown: &str, title: &str) -> String {
    let mut body_html = String::with_capacity(body_markdown.len() * 3 / 2);
    html::push_html(&mut body_html, Parser::new(body_markdown));

    let mut page = String::with_capacity(PAGE_HEAD.len() + PAGE_STYLE.len() + body_html.len() + 64);
    page.push_str(PAGE_HEAD);
    escape_html(&mut page, title).expect("writing to a String cannot fail");
    page.push_str(PAGE_STYLE);
    page.push_str(&body_html);
    page.push_str(PAGE_TAIL);
    page
}
