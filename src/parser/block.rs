//! Comment-block helpers: prose splitting and code-line naming.

use crate::input::{Element, SourceLine};

/// Untagged prose of a comment block, split around the first tag line.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Prose {
    /// Text before any tag, rendered as a fenced excerpt
    pub before: String,
    /// Text after the first tag, rendered verbatim after the body
    pub after: String,
}

/// Collect the untagged lines of a block. Tagged lines are handed to
/// `on_tagged` in order.
pub fn split_prose<'a>(lines: &'a [SourceLine], mut on_tagged: impl FnMut(&'a SourceLine)) -> Prose {
    let mut prose = Prose::default();
    let mut seen_tag = false;

    for line in lines {
        if line.annotations.is_some() {
            seen_tag = true;
            on_tagged(line);
            continue;
        }

        let text = strip_comment_junk(&line.text);
        if text.is_empty() {
            // Blank lines only matter once the tags have started
            if seen_tag {
                prose.after.push('\n');
            }
        } else if seen_tag {
            prose.after.push_str(text);
            prose.after.push('\n');
        } else {
            prose.before.push_str(text);
            prose.before.push('\n');
        }
    }

    prose
}

/// Remove the comment delimiters and the leading ` * ` decoration of a
/// block comment line.
fn strip_comment_junk(text: &str) -> &str {
    let text = text.trim_start();
    let text = text.strip_prefix("/*").unwrap_or(text);
    let text = text.strip_suffix("*/").unwrap_or(text);
    text.trim_start_matches([' ', '*'])
}

/// The code line a block documents, plus the identifier derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeAnchor {
    pub name: String,
    pub text: String,
    pub line: u32,
}

/// Find the first code element after `index` and derive its anchor.
/// `None` marks a standalone comment.
pub fn code_anchor(elements: &[Element], index: usize) -> Option<CodeAnchor> {
    let first = elements
        .iter()
        .skip(index + 1)
        .find_map(|e| match e {
            Element::Code(lines) => Some(lines),
            _ => None,
        })?
        .first()?;

    Some(CodeAnchor {
        name: identifier_of(&first.text),
        text: first.text.clone(),
        line: first.line,
    })
}

/// `function foo()` → `foo`, `Foo.bar = function() {` → `Foo.bar`.
pub fn identifier_of(code: &str) -> String {
    let code = code.trim_start();
    let code = code.strip_prefix("function ").unwrap_or(code);
    let head = code.split("function ").next().unwrap_or_default();
    let head = head.split('(').next().unwrap_or_default();
    let head = head.replacen(" =", "=", 1).replacen("= ", "=", 1);
    head.split('=').next().unwrap_or_default().trim().to_string()
}
