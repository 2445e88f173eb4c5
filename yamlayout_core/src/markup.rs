use crate::Accumulator;
use crate::ChildNode;
use crate::Document;
use crate::EntityEncoder;
use crate::HtmlEntities;
use crate::TagNode;
use crate::Writable;
use crate::YamlayoutError;
use crate::YamlayoutResult;

/// A compiled document, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
	/// A bare string, rendered as a self-closing tag.
	Leaf(Box<TagNode>),
	/// Sibling items, each followed by a newline.
	List(Vec<ChildNode>),
	/// The entries of a mapping, one tag each. Newline-joined at the top
	/// level only.
	Tags(Vec<TagNode>),
}

impl Fragment {
	/// Render as a whole document. Only here are the entries of a mapping
	/// joined with newlines; a mapping nested as a child is concatenated.
	pub fn render(&self) -> String {
		let mut output = Accumulator::new();
		match self {
			Self::Tags(nodes) => {
				for (index, node) in nodes.iter().enumerate() {
					if index > 0 {
						output.write("\n");
					}
					node.write_to(&mut output);
				}
			}
			Self::Leaf(_) | Self::List(_) => self.write_to(&mut output),
		}
		output.into_string()
	}
}

impl Writable for Fragment {
	fn write_to(&self, output: &mut Accumulator) {
		match self {
			Self::Leaf(node) => {
				output.write(&node.self_close());
			}
			Self::List(items) => {
				output.write_all(items, true);
			}
			Self::Tags(nodes) => {
				output.write_all(nodes, false);
			}
		}
	}
}

/// Compiles documents to markup.
///
/// The encoder is applied to every attribute name. [`Compiler::new`] uses
/// [`HtmlEntities`]; any other [`EntityEncoder`] can be supplied through
/// [`Compiler::with_encoder`].
#[derive(Debug, Clone, Default)]
pub struct Compiler<E = HtmlEntities> {
	encoder: E,
}

impl Compiler {
	pub fn new() -> Self {
		Self::default()
	}
}

impl<E: EntityEncoder> Compiler<E> {
	pub fn with_encoder(encoder: E) -> Self {
		Self { encoder }
	}

	pub fn encoder(&self) -> &E {
		&self.encoder
	}

	/// Build the tag tree for `document` without rendering it.
	pub fn fragment(&self, document: &Document) -> YamlayoutResult<Fragment> {
		match document {
			Document::Text(name) => {
				let node = TagNode::new(name, &Document::Null, self)?;
				Ok(Fragment::Leaf(Box::new(node)))
			}
			Document::List(items) => {
				let items: YamlayoutResult<Vec<ChildNode>> = items
					.iter()
					.map(|item| {
						match item {
							Document::Text(text) => Ok(ChildNode::Literal(text.clone())),
							other => self.fragment(other).map(ChildNode::Nested),
						}
					})
					.collect();
				Ok(Fragment::List(items?))
			}
			Document::Mapping(mapping) => {
				let nodes: YamlayoutResult<Vec<TagNode>> = mapping
					.iter()
					.map(|(key, value)| TagNode::new(key, value, self))
					.collect();
				Ok(Fragment::Tags(nodes?))
			}
			Document::Null | Document::Bool(_) | Document::Number(_) => {
				Err(YamlayoutError::InvalidInputKind {
					kind: document.kind(),
				})
			}
		}
	}

	/// Compile `document` to markup.
	pub fn to_markup(&self, document: &Document) -> YamlayoutResult<String> {
		tracing::debug!(kind = document.kind(), "compiling document to markup");
		Ok(self.fragment(document)?.render())
	}
}

/// Compile `document` to markup with the default [`HtmlEntities`] encoder.
///
/// ```rust
/// use yamlayout_core::Document;
/// use yamlayout_core::to_markup;
///
/// let document = Document::from_yaml("div#main.big: hello").unwrap();
/// assert_eq!(
/// 	to_markup(&document).unwrap(),
/// 	"<div id={`main`} className={`big`}>{`hello`}</div>"
/// );
/// ```
pub fn to_markup(document: &Document) -> YamlayoutResult<String> {
	Compiler::new().to_markup(document)
}
