//! Type expression linking.
//!
//! Built-in types pass through; any other name becomes a Markdown link to an
//! in-document anchor of the same name.

use std::collections::HashSet;

/// Built-in type names, lower-case.
const BUILTIN_TYPES: &[&str] = &[
    "number",
    "boolean",
    "string",
    "object",
    "function",
    "null",
    "any",
    "array",
    "binary",
    "arraybuffer",
    "float32array",
    "float64array",
    "int32array",
    "uint8array",
    "buffer",
];

/// Links the tokens of `{A|B}` type expressions.
#[derive(Debug, Clone)]
pub struct TypeLinker {
    builtin_types: HashSet<&'static str>,
}

impl Default for TypeLinker {
    fn default() -> Self {
        Self {
            builtin_types: BUILTIN_TYPES.iter().copied().collect(),
        }
    }
}

impl TypeLinker {
    pub fn new() -> Self {
        Self::default()
    }

    /// `{string|Cursor}` → `{string|[Cursor](#Cursor)}`
    pub fn link(&self, expr: &str) -> String {
        let inner = expr.strip_prefix('{').unwrap_or(expr);
        let inner = inner.strip_suffix('}').unwrap_or(inner);

        let linked: Vec<String> = inner
            .split('|')
            .map(|token| {
                if token.is_empty() || self.is_builtin(token) || token.starts_with('[') {
                    token.to_string()
                } else {
                    format!("[{}]({})", token, anchor_for(token))
                }
            })
            .collect();

        format!("{{{}}}", linked.join("|"))
    }

    pub fn is_builtin(&self, token: &str) -> bool {
        self.builtin_types.contains(token.to_lowercase().as_str())
    }
}

/// In-document anchor for a type name. Type docs are expected to live in
/// the same document, under the type's own name.
fn anchor_for(token: &str) -> String {
    format!("#{}", token)
}
