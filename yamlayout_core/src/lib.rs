//! `yamlayout_core` is the core library for [yamlayout](https://github.com/ifiokjr/yamlayout).
//! It compiles layouts written as YAML documents into JSX-style markup and
//! wraps that markup in a React component module.
//!
//! ## Processing Pipeline
//!
//! ```text
//! YAML source
//!   → Document (string / list / mapping, plus scalar property values)
//!   → Compiler::fragment (one TagNode per mapping entry, recursively)
//!   → Fragment::render (self-closing or paired tags, literal text)
//!   → to_component (import header, directives, component definition)
//! ```
//!
//! ## Layout Syntax
//!
//! ```yaml
//! # include Header
//! div#main.page:
//!   onClick: { function: "() => go()" }
//!   children:
//!     - Header
//!     - h1: Welcome
//!     - txt: "<b>raw</b>"
//! ```
//!
//! - A mapping key is a tag name with optional `#id` and `.class` shortcuts.
//! - A string value becomes the tag's only text child.
//! - A list value becomes the tag's children.
//! - A mapping value holds properties. `children` and `txt` are reserved.
//! - A `{ function: ... }` property is embedded as a raw expression.
//!
//! ## Modules
//!
//! - [`config`]: configuration loading from `yamlayout.toml`.
//! - [`project`]: compiling layout files and building directory trees.
//! - [`directives`]: scanning `# import` / `# include` / `# nocompile`
//!   comment directives.
//!
//! ## Quick Start
//!
//! ```rust
//! use yamlayout_core::Directives;
//! use yamlayout_core::Document;
//! use yamlayout_core::to_component;
//! use yamlayout_core::to_markup;
//!
//! let document = Document::from_yaml("ul:\n  - li: a\n  - li: b\n").unwrap();
//! let markup = to_markup(&document).unwrap();
//! assert_eq!(markup, "<ul><li>{`a`}</li><li>{`b`}</li></ul>");
//!
//! let module = to_component(Some("list"), &markup, &Directives::default());
//! assert!(module.ends_with("export default list"));
//! ```

pub use accumulator::*;
pub use component::*;
pub use config::*;
pub use directives::*;
pub use document::*;
pub use entities::*;
pub use error::*;
pub use markup::*;
pub use project::*;
pub use tag::*;

mod accumulator;
mod component;
pub mod config;
pub mod directives;
mod document;
mod entities;
#[allow(unused_assignments)]
mod error;
mod markup;
pub mod project;
mod tag;
