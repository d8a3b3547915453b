// Markup rendering for bot message content

use pulldown_cmark::{html, Options, Parser};

/// Render a message's markup to HTML for the bubble body. Bot content only
/// ever uses simple inline markup and line breaks; the renderer still
/// accepts the full common subset.
pub fn render_markdown(content: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(content, options);

    let mut out = String::with_capacity(content.len() * 2);
    html::push_html(&mut out, parser);
    out
}
