//! Documentation model produced by the annotator and consumed by the renderer.

/// One documented method, callback or property.
#[derive(Debug, Clone, PartialEq)]
pub struct DocNode {
    pub kind: NodeKind,
    /// Raw dotted identifier, e.g. `Foo.prototype.bar`
    pub name: String,
    pub is_constructor: bool,
    pub is_private: bool,
    pub is_public: bool,
    pub is_remote: bool,
    pub is_reactive: bool,
    /// Explicit `@prototype` marker
    pub is_prototype: bool,
    pub deprecated: Option<Deprecation>,
    /// `@namespace`, matched against the export table
    pub namespace: Option<String>,
    pub params: Vec<Param>,
    pub returns: Option<Returns>,
    pub todos: Vec<Todo>,
    pub ejson_type: Option<EjsonType>,
    /// The code line the comment block documents
    pub reference: Option<CodeReference>,
    /// Free-text location label shown in the headline, e.g. `{client|server}`
    pub where_label: String,
}

impl DocNode {
    /// A bare node of the given kind, with every optional part empty.
    pub fn new(kind: NodeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            is_constructor: false,
            is_private: false,
            is_public: false,
            is_remote: false,
            is_reactive: false,
            is_prototype: false,
            deprecated: None,
            namespace: None,
            params: Vec::new(),
            returns: None,
            todos: Vec::new(),
            ejson_type: None,
            reference: None,
            where_label: String::new(),
        }
    }

    /// Word used in body notes: "method", "callback" or "property".
    pub fn kind_word(&self) -> &'static str {
        match self.kind {
            NodeKind::Method => "method",
            NodeKind::Callback => "callback",
            NodeKind::Property { .. } => "property",
        }
    }
}

/// What a node documents. Exactly one per node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Method,
    Callback,
    /// `type_name` is the raw `@type` text, braces included
    Property { type_name: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deprecation {
    Flagged,
    Note(String),
}

/// A documented parameter. `children` is one level of nested docs
/// (e.g. `options.limit` under `options`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    /// Raw type expression, e.g. `{string|Foo}`
    pub type_expr: Option<String>,
    pub optional: bool,
    pub default: Option<String>,
    pub comment: Option<String>,
    pub children: Vec<Param>,
}

impl Param {
    /// Optional in the signature: explicitly optional or defaulted.
    pub fn is_optional(&self) -> bool {
        self.optional || self.default.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Returns {
    pub type_expr: Option<String>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Todo {
    pub comment: Option<String>,
}

/// Custom EJSON type registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EjsonType {
    pub name: String,
    pub comment: Option<String>,
}

/// Source line a node was attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeReference {
    pub line: u32,
    pub text: String,
}
