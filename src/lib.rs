//! annodoc: render annotated source comments into one Markdown API document.
//!
//! Input is a list of source files already split into elements (block
//! comments carrying annotation tags, markdown comments and code lines).
//! Each annotated block is folded into a [`model::DocNode`], filtered
//! against an optional [`input::PackageInfo`] export table and rendered
//! with stable anchors and `file:line` back-references.
//!
//! ```
//! use annodoc::input::SourceFile;
//!
//! let files: Vec<SourceFile> = serde_json::from_str(r#"[{
//!     "filename": "foo.js",
//!     "where": ["client"],
//!     "elements": [
//!         {"block-comment": [
//!             {"text": "/**", "line": 1},
//!             {"text": " * @method", "line": 2, "annotations": {"method": ""}},
//!             {"text": " */", "line": 3}
//!         ]},
//!         {"code": [{"text": "Foo.bar = function(a) {", "line": 4}]}
//!     ]
//! }]"#).unwrap();
//!
//! let doc = annodoc::render_document(&files, None);
//! assert!(doc.contains("<a name=\"Foo.bar\"></a>*Foo*.bar()"));
//! ```

pub mod assemble;
pub mod error;
pub mod input;
pub mod load;
pub mod logger;
pub mod model;
pub mod names;
pub mod parser;
pub mod render;

pub use assemble::{is_eligible, render_document, DocumentAssembler};
pub use error::{Error, Result};
