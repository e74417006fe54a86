//! Pre-parsed input records: the element lists of each source file and the
//! optional package description that switches on filtering mode.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// One source file, already split into elements.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceFile {
    pub filename: String,
    /// Environments the file is loaded in, e.g. `["client", "server"]`
    #[serde(default, rename = "where")]
    pub where_: Vec<String>,
    #[serde(default)]
    pub elements: Vec<Element>,
}

/// A run of source lines of a single kind.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Element {
    BlockComment(Vec<SourceLine>),
    MarkdownComment(Vec<SourceLine>),
    Code(Vec<SourceLine>),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceLine {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub line: u32,
    /// Tag name to raw value, in the order they appear on the line
    #[serde(default)]
    pub annotations: Option<IndexMap<String, Value>>,
}

impl SourceLine {
    pub fn new(text: impl Into<String>, line: u32) -> Self {
        Self {
            text: text.into(),
            line,
            annotations: None,
        }
    }

    /// Builder used by tests and embedders: attach one annotation.
    pub fn with_annotation(mut self, tag: &str, value: impl Into<Value>) -> Self {
        self.annotations
            .get_or_insert_with(IndexMap::new)
            .insert(tag.to_string(), value.into());
        self
    }
}

/// Text form of an annotation value. `true` and `null` carry no text.
pub fn annotation_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null | Value::Bool(true) => String::new(),
        other => other.to_string(),
    }
}

/// Package metadata. Supplying one restricts output to the exported API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageInfo {
    #[serde(default)]
    pub exports: IndexMap<String, Value>,
    #[serde(default)]
    pub describe: Option<Describe>,
}

impl PackageInfo {
    /// Whether `namespace` is exported with a truthy value.
    pub fn exports(&self, namespace: &str) -> bool {
        self.exports.get(namespace).is_some_and(is_truthy)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Describe {
    pub name: Option<String>,
    pub summary: Option<String>,
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_element_variants() {
        let json = r##"[{
            "filename": "foo.js",
            "where": ["client"],
            "elements": [
                {"block-comment": [{"text": "/**", "line": 1},
                                   {"text": " * @method", "line": 2, "annotations": {"method": true}}]},
                {"markdown-comment": [{"text": "# Title", "line": 4}]},
                {"code": [{"text": "Foo.bar = function() {", "line": 5}]}
            ]
        }]"##;
        let files: Vec<SourceFile> = serde_json::from_str(json).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].where_, vec!["client"]);
        let elements = &files[0].elements;
        assert!(matches!(elements[0], Element::BlockComment(ref l) if l.len() == 2));
        assert!(matches!(elements[1], Element::MarkdownComment(ref l) if l[0].text == "# Title"));
        assert!(matches!(elements[2], Element::Code(_)));
        assert!(matches!(elements[0], Element::BlockComment(ref l) if l[1].annotations.is_some()));
    }

    #[test]
    fn where_defaults_to_empty() {
        let file: SourceFile = serde_json::from_str(r#"{"filename": "a.js"}"#).unwrap();
        assert!(file.where_.is_empty());
        assert!(file.elements.is_empty());
    }

    #[test]
    fn exports_require_truthy_values() {
        let pkg: PackageInfo =
            serde_json::from_str(r#"{"exports": {"Foo": true, "Bar": false, "Baz": 0}}"#).unwrap();
        assert!(pkg.exports("Foo"));
        assert!(!pkg.exports("Bar"));
        assert!(!pkg.exports("Baz"));
        assert!(!pkg.exports("Qux"));
    }

    #[test]
    fn annotation_text_forms() {
        assert_eq!(annotation_text(&Value::from("{string} name")), "{string} name");
        assert_eq!(annotation_text(&Value::Bool(true)), "");
        assert_eq!(annotation_text(&Value::Null), "");
        assert_eq!(annotation_text(&Value::from(3)), "3");
    }
}
