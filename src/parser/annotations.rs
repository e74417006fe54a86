//! Annotation accumulator: folds one comment block's tags into a [`DocNode`].
//!
//! The assembler drives it per block: `reset()`, then `add()` for every tag
//! found on the block's lines, then `add_name()`/`add_reference()` from the
//! code line that follows, and finally `finish()`.

use crate::model::*;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

// -- Regex patterns -----------------------------------------------------------

// `{type} name rest`, `{type} [name] rest`, `{type} [name=default] rest`
static RE_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\{[^}]*\})?\s*(\[[^\]]*\]|[^\s\[]+)?\s*(.*?)\s*$").unwrap()
});

// `{type} rest`
static RE_TYPED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\{[^}]*\})?\s*(.*?)\s*$").unwrap());

// `word rest`
static RE_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\S+)\s*(.*?)\s*$").unwrap());

static RE_DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:var|let|const)\s+").unwrap());

// -- Accumulator --------------------------------------------------------------

/// Kind tag seen in the current block, before the name is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KindTag {
    Method,
    Callback,
    Property,
}

/// Per-block tag state. Cleared by [`Annotator::reset`].
#[derive(Debug, Default)]
struct BlockState {
    kind: Option<KindTag>,
    explicit_name: Option<String>,
    code_name: Option<String>,
    type_name: Option<String>,
    is_constructor: bool,
    is_private: bool,
    is_public: bool,
    is_remote: bool,
    is_reactive: bool,
    is_prototype: bool,
    deprecated: Option<Deprecation>,
    namespace: Option<String>,
    params: Vec<Param>,
    returns: Option<Returns>,
    todos: Vec<Todo>,
    ejson_type: Option<EjsonType>,
    reference: Option<CodeReference>,
    where_label: Option<String>,
}

/// Builds one [`DocNode`] per comment block of a single source file.
#[derive(Debug)]
pub struct Annotator {
    filename: String,
    where_label: String,
    state: BlockState,
}

impl Annotator {
    pub fn new(filename: &str, where_: &[String]) -> Self {
        let where_label = if where_.is_empty() {
            String::new()
        } else {
            format!("{{{}}}", where_.join("|"))
        };
        Self {
            filename: filename.to_string(),
            where_label,
            state: BlockState::default(),
        }
    }

    /// Forget everything collected for the previous block.
    pub fn reset(&mut self) {
        self.state = BlockState::default();
    }

    /// Ingest one tag and its raw value.
    pub fn add(&mut self, tag: &str, value: &str, line: u32) {
        let s = &mut self.state;
        let value = value.trim();
        match tag.trim_start_matches('@').to_ascii_lowercase().as_str() {
            "method" => set_kind(s, KindTag::Method, value),
            "callback" => set_kind(s, KindTag::Callback, value),
            "property" => set_kind(s, KindTag::Property, value),
            "constructor" => s.is_constructor = true,
            "private" => s.is_private = true,
            "public" => s.is_public = true,
            "remote" => s.is_remote = true,
            "reactive" => s.is_reactive = true,
            "prototype" => s.is_prototype = true,
            "deprecated" => {
                s.deprecated = Some(if value.is_empty() {
                    Deprecation::Flagged
                } else {
                    Deprecation::Note(value.to_string())
                });
            }
            "namespace" => s.namespace = non_empty(value),
            "type" => s.type_name = non_empty(value),
            "param" => add_param(s, value),
            "return" | "returns" => {
                let caps = RE_TYPED.captures(value);
                s.returns = Some(Returns {
                    type_expr: caps.as_ref().and_then(|c| c.get(1)).map(|m| m.as_str().to_string()),
                    comment: caps.as_ref().and_then(|c| c.get(2)).and_then(|m| non_empty(m.as_str())),
                });
            }
            "todo" => s.todos.push(Todo {
                comment: non_empty(value),
            }),
            "ejsontype" => {
                if let Some(caps) = RE_WORD.captures(value) {
                    s.ejson_type = Some(EjsonType {
                        name: caps[1].to_string(),
                        comment: non_empty(&caps[2]),
                    });
                }
            }
            "where" => s.where_label = non_empty(value),
            other => {
                debug!(file = %self.filename, line, tag = other, "ignoring unknown annotation");
            }
        }
    }

    /// Name derived from the code line that follows the block.
    pub fn add_name(&mut self, identifier: &str) {
        let name = RE_DECLARATION.replace(identifier.trim(), "");
        self.state.code_name = non_empty(name.trim());
    }

    pub fn add_reference(&mut self, line: u32, text: &str) {
        self.state.reference = Some(CodeReference {
            line,
            text: text.to_string(),
        });
    }

    /// Finalize the block. `None` when the block names no kind or no name
    /// could be found: it is prose, not an API node.
    pub fn finish(&mut self) -> Option<DocNode> {
        let s = std::mem::take(&mut self.state);

        let kind_tag = match (s.kind, s.is_constructor) {
            (Some(kind), _) => kind,
            (None, true) => KindTag::Method,
            (None, false) => return None,
        };
        let name = s.explicit_name.or(s.code_name)?;

        let kind = match kind_tag {
            KindTag::Method => NodeKind::Method,
            KindTag::Callback => NodeKind::Callback,
            KindTag::Property => NodeKind::Property {
                type_name: s.type_name,
            },
        };

        Some(DocNode {
            kind,
            name,
            is_constructor: s.is_constructor,
            is_private: s.is_private,
            is_public: s.is_public,
            is_remote: s.is_remote,
            is_reactive: s.is_reactive,
            is_prototype: s.is_prototype,
            deprecated: s.deprecated,
            namespace: s.namespace,
            params: s.params,
            returns: s.returns,
            todos: s.todos,
            ejson_type: s.ejson_type,
            reference: s.reference,
            where_label: s.where_label.unwrap_or_else(|| self.where_label.clone()),
        })
    }
}

// -- Helper functions ---------------------------------------------------------

fn set_kind(s: &mut BlockState, kind: KindTag, value: &str) {
    if s.kind.is_some() {
        debug!(?kind, "block already has a kind, ignoring");
        return;
    }
    s.kind = Some(kind);
    s.explicit_name = non_empty(value);
}

/// Parse a `@param` value and attach it, nesting `parent.child` names
/// under an already declared `parent`.
fn add_param(s: &mut BlockState, value: &str) {
    let Some(caps) = RE_PARAM.captures(value) else {
        return;
    };
    let Some(raw_name) = caps.get(2).map(|m| m.as_str()) else {
        return;
    };

    let mut param = Param {
        type_expr: caps.get(1).map(|m| m.as_str().to_string()),
        comment: caps.get(3).and_then(|m| non_empty(m.as_str())),
        ..Default::default()
    };

    match raw_name.strip_prefix('[').and_then(|n| n.strip_suffix(']')) {
        Some(inner) => {
            param.optional = true;
            match inner.split_once('=') {
                Some((name, default)) => {
                    param.name = name.trim().to_string();
                    param.default = non_empty(default.trim());
                }
                None => param.name = inner.trim().to_string(),
            }
        }
        None => param.name = raw_name.to_string(),
    }

    if let Some((parent, child)) = param.name.split_once('.') {
        if let Some(owner) = s.params.iter_mut().rev().find(|p| p.name == parent) {
            param.name = child.to_string();
            owner.children.push(param);
            return;
        }
    }
    s.params.push(param);
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
