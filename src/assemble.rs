//! Document assembly: walks every file's elements, decides which nodes are
//! published and joins the rendered fragments into one Markdown document.

use crate::input::{annotation_text, Element, PackageInfo, SourceFile};
use crate::model::DocNode;
use crate::parser::block::{code_anchor, split_prose};
use crate::parser::Annotator;
use crate::render::{NodeRenderer, TypeLinker};
use tracing::debug;

const ATTRIBUTION: &str = "_API documentation automatically generated by annodoc._\n\n";
const LEADING_RULE: &str = "-\n\n";
const THIN_RULE: &str = "\n-\n";

/// Whether a node belongs in the output.
///
/// Private nodes never do. Without a package every other node does; with
/// one, only nodes whose namespace is exported or that are marked public.
pub fn is_eligible(node: &DocNode, package: Option<&PackageInfo>) -> bool {
    if node.is_private {
        return false;
    }
    match package {
        None => true,
        Some(pkg) => node.is_public || node.namespace.as_deref().is_some_and(|ns| pkg.exports(ns)),
    }
}

/// Ordered text fragments, joined once at the end.
#[derive(Debug, Default)]
pub struct Fragments {
    parts: Vec<String>,
}

impl Fragments {
    pub fn push(&mut self, part: impl Into<String>) {
        let part = part.into();
        if !part.is_empty() {
            self.parts.push(part);
        }
    }

    pub fn append(&mut self, other: Fragments) {
        self.parts.extend(other.parts);
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Drop `prefix` from the start of the text, if it is there.
    pub fn trim_leading(&mut self, prefix: &str) {
        if let Some(first) = self.parts.first_mut() {
            if let Some(rest) = first.strip_prefix(prefix) {
                *first = rest.to_string();
            }
        }
    }

    pub fn join(self) -> String {
        self.parts.concat()
    }
}

/// Builds the Markdown document for a set of source files.
pub struct DocumentAssembler<'a> {
    package: Option<&'a PackageInfo>,
    linker: TypeLinker,
}

impl<'a> DocumentAssembler<'a> {
    /// `package` switches on filtering mode: only the exported API is kept,
    /// file banners and todo lists are left out.
    pub fn new(package: Option<&'a PackageInfo>) -> Self {
        Self {
            package,
            linker: TypeLinker::new(),
        }
    }

    fn filtering(&self) -> bool {
        self.package.is_some()
    }

    pub fn assemble(&self, files: &[SourceFile]) -> String {
        let mut doc = Fragments::default();
        doc.push(self.preamble());

        let mut emitted_files = 0usize;
        for file in files {
            let Some(mut text) = self.assemble_file(file) else {
                debug!(file = %file.filename, "no published nodes");
                continue;
            };

            if !self.filtering() {
                doc.push(banner(file));
                text.trim_leading(LEADING_RULE);
            } else if emitted_files == 0 {
                text.trim_leading(LEADING_RULE);
            }

            doc.append(text);
            emitted_files += 1;
        }

        doc.join()
    }

    /// Title, optional summary and the attribution line.
    fn preamble(&self) -> String {
        let mut out = String::new();
        let describe = self.package.and_then(|p| p.describe.as_ref());
        let name = describe.and_then(|d| d.name.as_deref());
        let summary = describe.and_then(|d| d.summary.as_deref());

        if let Some(name) = name {
            out.push_str(&format!("## {} Public API ##\n\n", name));
        }
        if let Some(summary) = summary {
            out.push_str(summary);
            out.push_str("\n\n");
        }
        if name.is_none() && summary.is_none() {
            out.push_str("## Public and Private API ##\n\n");
        }
        out.push_str(ATTRIBUTION);
        out
    }

    /// Rendered content of one file, `None` when none of its nodes are
    /// published.
    fn assemble_file(&self, file: &SourceFile) -> Option<Fragments> {
        let renderer = NodeRenderer::new(&self.linker, !self.filtering());
        let mut annotator = Annotator::new(&file.filename, &file.where_);
        let mut text = Fragments::default();
        let mut published = 0usize;

        for (index, element) in file.elements.iter().enumerate() {
            match element {
                Element::BlockComment(lines) if lines.len() > 1 => {
                    annotator.reset();
                    let prose = split_prose(lines, |line| {
                        for (tag, value) in line.annotations.iter().flatten() {
                            annotator.add(tag, &annotation_text(value), line.line);
                        }
                    });

                    let Some(anchor) = code_anchor(&file.elements, index) else {
                        debug!(file = %file.filename, line = lines[0].line, "standalone comment");
                        continue;
                    };
                    annotator.add_name(&anchor.name);
                    annotator.add_reference(anchor.line, &anchor.text);

                    let Some(node) = annotator.finish() else {
                        debug!(file = %file.filename, line = lines[0].line, "comment block without API node");
                        continue;
                    };
                    if !is_eligible(&node, self.package) {
                        debug!(file = %file.filename, name = %node.name, "node not published");
                        continue;
                    }

                    let rendered = renderer.render(&node, &file.filename);
                    text.push(rendered.headline);
                    if !prose.before.is_empty() {
                        text.push(format!("```\n{}```\n", prose.before));
                    }
                    text.push(rendered.body);
                    text.push(prose.after);
                    text.push(rendered.reference);
                    text.push("\n\n");
                    published += 1;
                }
                Element::MarkdownComment(lines) if lines.len() > 1 => {
                    if !text.is_empty() {
                        text.push(THIN_RULE);
                    }
                    for line in lines {
                        text.push(format!("{}\n", line.text));
                    }
                }
                _ => {}
            }
        }

        (published > 0).then_some(text)
    }
}

/// Per-file header naming the source and where it is loaded.
fn banner(file: &SourceFile) -> String {
    format!(
        "***\n\n__File: [\"{name}\"]({name}) Where: {{{where_}}}__\n\n***\n\n",
        name = file.filename,
        where_ = file.where_.join("|")
    )
}

/// Render `files` into a single Markdown document.
pub fn render_document(files: &[SourceFile], package: Option<&PackageInfo>) -> String {
    DocumentAssembler::new(package).assemble(files)
}
