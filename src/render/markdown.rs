//! Markdown rendering of a single documentation node.
//!
//! A node becomes three fragments: the headline (anchor, name, signature),
//! the body (notes, arguments, returns, todos) and the source reference.

use crate::model::*;
use crate::names::{resolve_name, ResolvedName};
use crate::render::types::TypeLinker;

const HEADING: &str = "###";
const THIN_RULE: &str = "\n-\n";

/// Rendered text of one node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedNode {
    pub headline: String,
    pub body: String,
    pub reference: String,
}

/// Renders nodes against a shared type linker.
pub struct NodeRenderer<'a> {
    linker: &'a TypeLinker,
    /// Todo lists are internal notes, only shown in the unfiltered document
    show_todos: bool,
}

impl<'a> NodeRenderer<'a> {
    pub fn new(linker: &'a TypeLinker, show_todos: bool) -> Self {
        Self { linker, show_todos }
    }

    pub fn render(&self, node: &DocNode, source_filename: &str) -> RenderedNode {
        let resolved = resolve_name(&node.name, node.is_remote);
        RenderedNode {
            headline: self.headline(node, &resolved),
            body: self.body(node, &resolved),
            reference: reference(node, source_filename),
        }
    }

    fn headline(&self, node: &DocNode, resolved: &ResolvedName) -> String {
        let mut out = format!("-\n\n{} ", HEADING);
        out.push_str(&format!("<a name=\"{}\"></a>", node.name));

        if node.is_constructor {
            out.push_str("new ");
        }
        out.push_str(&resolved.pretty_name);

        match &node.kind {
            NodeKind::Method | NodeKind::Callback => {
                let params: Vec<String> = node
                    .params
                    .iter()
                    .map(|p| {
                        // Defaults are documented in the body only
                        if p.is_optional() {
                            format!("[{}]", p.name)
                        } else {
                            p.name.clone()
                        }
                    })
                    .collect();
                out.push_str(&format!("({})", params.join(", ")));
            }
            NodeKind::Property { type_name } => {
                if let Some(type_name) = type_name {
                    out.push(' ');
                    out.push_str(type_name);
                }
            }
        }

        out.push_str(&nbsp(2));
        out.push_str(&format!("<sub><i>{}</i></sub>", node.where_label));
        out.push_str(&format!(" {}\n\n", HEADING));
        out
    }

    fn body(&self, node: &DocNode, resolved: &ResolvedName) -> String {
        let kind = node.kind_word();
        let mut out = String::new();

        if let Some(deprecation) = &node.deprecated {
            out.push_str("> __Warning!__\n");
            out.push_str(&format!(
                "> This {} \"{}\" has deprecated from the API\n",
                kind, node.name
            ));
            match deprecation {
                Deprecation::Note(note) => out.push_str(&format!("> {}\n\n", note)),
                Deprecation::Flagged => out.push('\n'),
            }
        }

        if node.is_private {
            out.push_str(&format!("*This {} is private*\n", kind));
        }

        if node.is_remote {
            out.push_str(&format!("*This {} is a remote method*\n", kind));
        }

        if !resolved.is_empty() {
            let prototype = if node.is_prototype || resolved.is_prototype_member {
                "`prototype` of "
            } else {
                ""
            };
            out.push_str(&format!(
                "*This {} __{}__ is defined in {}`{}`*\n",
                kind,
                resolved.member,
                prototype,
                resolved.class_names.join(".")
            ));
        }

        if let Some(ejson) = &node.ejson_type {
            out.push_str(&format!("Adds custom EJSON-type: `{}` ", ejson.name));
            out.push_str(ejson.comment.as_deref().unwrap_or_default());
            out.push('\n');
        }

        // Arguments, returns and todos, separated by thin rules
        let sections: Vec<String> = [
            self.arguments(&node.params),
            node.returns
                .as_ref()
                .map(|r| self.returns(r, node.is_reactive))
                .unwrap_or_default(),
            self.todos(&node.todos),
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
        out.push_str(&sections.join(THIN_RULE));

        out
    }

    fn arguments(&self, params: &[Param]) -> String {
        if params.is_empty() {
            return String::new();
        }

        let mut out = String::from("\n__Arguments__\n\n");
        for param in params {
            out.push_str(&format!("* {}\n", self.param_line(param)));
            if let Some(comment) = param.comment.as_deref() {
                out.push_str(&format!("\n{}\n\n", param_comment(comment)));
            }

            for child in &param.children {
                out.push_str(&format!("    * {}\n", self.param_line(child)));
                if let Some(comment) = child.comment.as_deref() {
                    let comment = comment.strip_prefix('-').unwrap_or(comment);
                    out.push_str(&format!("\n    {}\n\n", comment));
                }
            }
        }
        out
    }

    /// `__name__ *{type}*  (Optional, Default = x)`
    fn param_line(&self, param: &Param) -> String {
        let mut line = format!(
            "__{}__ *{}*  ",
            param.name,
            self.linker.link(param.type_expr.as_deref().unwrap_or("{any}"))
        );
        if let Some(default) = &param.default {
            line.push_str(&format!("(Optional, Default = {})", default));
        } else if param.optional {
            line.push_str("(Optional)");
        }
        line
    }

    fn returns(&self, returns: &Returns, reactive: bool) -> String {
        let mut out = String::from("\n__Returns__  ");
        out.push_str(&format!(
            "*{}*",
            self.linker.link(returns.type_expr.as_deref().unwrap_or("{any}"))
        ));
        if reactive {
            out.push_str("  __(is reactive)__");
        }
        out.push('\n');
        if let Some(comment) = &returns.comment {
            out.push_str(comment);
            out.push('\n');
        }
        out
    }

    fn todos(&self, todos: &[Todo]) -> String {
        if !self.show_todos || todos.is_empty() {
            return String::new();
        }

        let mut out = String::from("\n__TODO__\n```\n");
        for comment in todos.iter().filter_map(|t| t.comment.as_deref()) {
            out.push_str(&format!("* {}\n", comment));
        }
        out.push_str("```\n");
        out
    }
}

/// Fenced excerpt of the documented line plus a `file:line` link.
fn reference(node: &DocNode, source_filename: &str) -> String {
    match &node.reference {
        Some(r) => format!(
            "\n> ```{}``` [{file}:{line}]({file}#L{line})\n",
            r.text,
            file = source_filename,
            line = r.line
        ),
        None => String::new(),
    }
}

/// Strip a leading `-` and make sure the comment starts with one space.
fn param_comment(comment: &str) -> String {
    let comment = comment.strip_prefix('-').unwrap_or(comment);
    if comment.starts_with(' ') {
        comment.to_string()
    } else {
        format!(" {}", comment)
    }
}

fn nbsp(len: usize) -> String {
    "&nbsp;".repeat(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(name: &str) -> DocNode {
        DocNode::new(NodeKind::Method, name)
    }

    fn render(node: &DocNode, show_todos: bool) -> RenderedNode {
        let linker = TypeLinker::new();
        NodeRenderer::new(&linker, show_todos).render(node, "lib/foo.js")
    }

    #[test]
    fn headline_with_params() {
        let mut node = method("Foo.bar");
        node.where_label = "{client}".into();
        node.params = vec![
            Param {
                name: "a".into(),
                ..Default::default()
            },
            Param {
                name: "b".into(),
                default: Some("1".into()),
                ..Default::default()
            },
        ];
        let out = render(&node, true);
        assert_eq!(
            out.headline,
            "-\n\n### <a name=\"Foo.bar\"></a>*Foo*.bar(a, [b])&nbsp;&nbsp;<sub><i>{client}</i></sub> ###\n\n"
        );
    }

    #[test]
    fn headline_constructor_and_property() {
        let mut ctor = method("Foo");
        ctor.is_constructor = true;
        assert!(render(&ctor, true).headline.contains("</a>new Foo()&nbsp;"));

        let prop = DocNode::new(
            NodeKind::Property {
                type_name: Some("{Number}".into()),
            },
            "Foo.count",
        );
        let headline = render(&prop, true).headline;
        assert!(headline.contains("*Foo*.count {Number}&nbsp;"));
        assert!(!headline.contains('('));
    }

    #[test]
    fn callback_shows_signature() {
        let mut cb = DocNode::new(NodeKind::Callback, "done");
        cb.params.push(Param {
            name: "err".into(),
            ..Default::default()
        });
        assert!(render(&cb, true).headline.contains("done(err)"));
    }

    #[test]
    fn optional_param_body() {
        let mut node = method("foo");
        node.params.push(Param {
            name: "x".into(),
            optional: true,
            ..Default::default()
        });
        let out = render(&node, true);
        assert!(out.headline.contains("foo([x])"));
        assert!(out.body.contains("__x__ *{any}*  (Optional)"));
    }

    #[test]
    fn param_comment_and_children() {
        let mut node = method("find");
        node.params.push(Param {
            name: "options".into(),
            type_expr: Some("{Object}".into()),
            comment: Some("-Query options".into()),
            children: vec![Param {
                name: "limit".into(),
                type_expr: Some("{Number}".into()),
                default: Some("10".into()),
                comment: Some("-Max docs".into()),
                ..Default::default()
            }],
            ..Default::default()
        });
        let body = render(&node, true).body;
        assert_eq!(
            body,
            "\n__Arguments__\n\n\
             * __options__ *{Object}*  \n\n Query options\n\n\
             \x20   * __limit__ *{Number}*  (Optional, Default = 10)\n\n    Max docs\n\n"
        );
    }

    #[test]
    fn modifiers_and_class_note() {
        let mut node = method("Collection.prototype.find");
        node.deprecated = Some(Deprecation::Note("Use query".into()));
        node.is_private = true;
        node.is_remote = true;
        let body = render(&node, true).body;
        assert!(body.starts_with(
            "> __Warning!__\n> This method \"Collection.prototype.find\" has deprecated from the API\n> Use query\n\n"
        ));
        assert!(body.contains("*This method is private*\n"));
        assert!(body.contains("*This method is a remote method*\n"));
        assert!(body.contains(
            "*This method __find__ is defined in `prototype` of `Collection`*\n"
        ));
    }

    #[test]
    fn explicit_prototype_marker() {
        let mut node = method("Foo.bar");
        node.is_prototype = true;
        assert!(render(&node, true)
            .body
            .contains("is defined in `prototype` of `Foo`"));
    }

    #[test]
    fn child_comment_keeps_its_spacing() {
        let mut node = method("find");
        node.params.push(Param {
            name: "options".into(),
            children: vec![Param {
                name: "sort".into(),
                comment: Some("- Sort spec".into()),
                ..Default::default()
            }],
            ..Default::default()
        });
        let body = render(&node, true).body;
        assert!(body.contains("    * __sort__ *{any}*  \n\n     Sort spec\n\n"));
    }

    #[test]
    fn returns_and_todos_separated() {
        let mut node = method("foo");
        node.params.push(Param {
            name: "a".into(),
            type_expr: Some("{number}".into()),
            ..Default::default()
        });
        node.returns = Some(Returns {
            type_expr: Some("{Cursor}".into()),
            comment: Some("A cursor".into()),
        });
        node.is_reactive = true;
        node.todos.push(Todo {
            comment: Some("cache it".into()),
        });

        let body = render(&node, true).body;
        assert_eq!(
            body,
            "\n__Arguments__\n\n* __a__ *{number}*  \n\
             \n-\n\
             \n__Returns__  *{[Cursor](#Cursor)}*  __(is reactive)__\nA cursor\n\
             \n-\n\
             \n__TODO__\n```\n* cache it\n```\n"
        );
    }

    #[test]
    fn todos_hidden_when_filtering() {
        let mut node = method("foo");
        node.todos.push(Todo {
            comment: Some("secret".into()),
        });
        let body = render(&node, false).body;
        assert!(!body.contains("__TODO__"));
        assert!(!body.contains(THIN_RULE));
    }

    #[test]
    fn returns_default_any() {
        let mut node = method("foo");
        node.returns = Some(Returns::default());
        assert!(render(&node, true).body.contains("__Returns__  *{any}*\n"));
    }

    #[test]
    fn reference_link() {
        let mut node = method("foo");
        assert_eq!(render(&node, true).reference, "");
        node.reference = Some(CodeReference {
            line: 12,
            text: "foo = function(a) {".into(),
        });
        assert_eq!(
            render(&node, true).reference,
            "\n> ```foo = function(a) {``` [lib/foo.js:12](lib/foo.js#L12)\n"
        );
    }

    #[test]
    fn ejson_note() {
        let mut node = method("EJSON.addType");
        node.ejson_type = Some(EjsonType {
            name: "oid".into(),
            comment: Some("Object ids".into()),
        });
        assert!(render(&node, true)
            .body
            .contains("Adds custom EJSON-type: `oid` Object ids\n"));
    }
}
