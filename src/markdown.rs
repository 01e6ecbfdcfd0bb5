//! Converts markdown bodies into the plain-text excerpts that feed items
//! carry as their content.

use pulldown_cmark::*;

/// The marker appended to an excerpt that was cut short.
pub const OMISSION: char = '…';

/// Renders `markdown` as plain text and prunes the result to at most
/// `prune_length` characters (see [`prune`]).
pub fn excerpt(markdown: &str, prune_length: usize) -> String {
    prune(&plain_text(markdown), prune_length)
}

/// Strips all markup from `markdown`, keeping text and inline code. Block
/// boundaries and line breaks become single spaces, and runs of whitespace
/// are collapsed.
pub fn plain_text(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_SMART_PUNCTUATION);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut text = String::with_capacity(markdown.len());
    for ev in Parser::new_ext(markdown, options) {
        match ev {
            Event::Text(s) | Event::Code(s) => text.push_str(&s),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            Event::End(
                Tag::Paragraph
                | Tag::Heading(_)
                | Tag::BlockQuote
                | Tag::CodeBlock(_)
                | Tag::Item
                | Tag::FootnoteDefinition(_)
                | Tag::TableCell,
            ) => text.push(' '),
            _ => {}
        }
    }
    text.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// Truncates `text` to at most `length` characters, followed by the
/// [`OMISSION`] marker when anything was cut. The cut happens at the last
/// word boundary that fits; a single word longer than the budget is cut
/// mid-word.
pub fn prune(text: &str, length: usize) -> String {
    if text.chars().count() <= length {
        return text.to_owned();
    }

    let budget: String = text.chars().take(length).collect();
    let cut = match text[budget.len()..].starts_with(char::is_whitespace) {
        // the budget ends exactly on a word boundary
        true => budget.as_str(),
        false => match budget.rfind(char::is_whitespace) {
            Some(i) => &budget[..i],
            None => budget.as_str(),
        },
    };

    let mut pruned = cut.trim_end().to_owned();
    pruned.push(OMISSION);
    pruned
}
