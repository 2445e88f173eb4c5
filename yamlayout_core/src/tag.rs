use crate::Accumulator;
use crate::Compiler;
use crate::Document;
use crate::EntityEncoder;
use crate::Fragment;
use crate::Mapping;
use crate::Writable;
use crate::YamlayoutResult;

/// Mapping key whose value supplies a tag's children.
pub const CHILDREN_KEY: &str = "children";
/// Mapping key whose value becomes a literal text child.
pub const TXT_KEY: &str = "txt";
/// Sole key of a mapping that holds a raw expression.
pub const FUNCTION_KEY: &str = "function";

/// Escape a back-tick so `text` can sit inside a template literal.
///
/// Only the first back-tick is escaped. Layouts compiled by earlier releases
/// depend on this, so a replace-all needs a deliberate format change.
pub fn escape_backtick(text: &str) -> String {
	text.replacen('`', "\\`", 1)
}

/// Wrap `text` as a template-literal expression: `` {`text`} ``.
pub fn string_expression(text: &str) -> String {
	format!("{{`{}`}}", escape_backtick(text))
}

/// A property value, classified once when the tag is built.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
	/// Serialized as text (or json for structured values) inside a template
	/// literal.
	Plain(Document),
	/// Embedded verbatim between braces.
	RawExpression(String),
}

impl PropValue {
	pub fn from_document(value: &Document) -> Self {
		if value.is_falsy() {
			return Self::Plain(Document::Text(String::new()));
		}

		match value.sole_value(FUNCTION_KEY) {
			Some(Document::Text(expression)) => Self::RawExpression(expression.clone()),
			Some(other) => Self::RawExpression(other.to_string()),
			None => Self::Plain(value.clone()),
		}
	}

	/// The attribute value as it appears after `=`.
	pub fn render(&self) -> String {
		match self {
			Self::RawExpression(expression) => format!("{{{expression}}}"),
			Self::Plain(Document::Text(text)) => string_expression(text),
			Self::Plain(other) => string_expression(&other.to_string()),
		}
	}
}

/// A child of a tag.
#[derive(Debug, Clone, PartialEq)]
pub enum ChildNode {
	/// Text written as-is. String children are escaped into an expression
	/// before they get here; `txt` children are not.
	Literal(String),
	Nested(Fragment),
}

impl ChildNode {
	pub fn expression(text: &str) -> Self {
		Self::Literal(string_expression(text))
	}
}

impl Writable for ChildNode {
	fn write_to(&self, output: &mut Accumulator) {
		match self {
			Self::Literal(text) => {
				output.write(text);
			}
			Self::Nested(fragment) => fragment.write_to(output),
		}
	}
}

/// Tag name, id and classes parsed from a key like `div#main.big.red`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
	pub tag: String,
	pub id: Option<String>,
	pub class_names: Vec<String>,
}

impl Shortcut {
	/// Classes may follow the tag name or the id. Segments after a second
	/// `#` are ignored and empty id and class segments are dropped. When
	/// nothing precedes the first `#` or `.` the raw key stays the tag name.
	pub fn parse(raw: &str) -> Self {
		let mut hash_segments = raw.split('#');
		let head = hash_segments.next().unwrap_or_default();
		let mut id_segments = hash_segments.next().unwrap_or_default().split('.');
		let id = id_segments
			.next()
			.filter(|segment| !segment.is_empty())
			.map(str::to_string);

		let mut dot_segments = head.split('.');
		let name = dot_segments.next().unwrap_or_default();
		let class_names = dot_segments
			.chain(id_segments)
			.filter(|segment| !segment.is_empty())
			.map(str::to_string)
			.collect();

		let tag = if name.is_empty() { raw } else { name };

		Self {
			tag: tag.to_string(),
			id,
			class_names,
		}
	}

	pub fn class_name(&self) -> Option<String> {
		(!self.class_names.is_empty()).then(|| self.class_names.join(" "))
	}
}

/// Where a value puts its properties and children.
struct Shape<'a> {
	properties: Option<&'a Mapping>,
	children: Vec<ChildNode>,
}

fn resolve_shape<'a, E: EntityEncoder>(
	value: &'a Document,
	compiler: &Compiler<E>,
) -> YamlayoutResult<Shape<'a>> {
	let shape = match value {
		Document::Text(text) => {
			Shape {
				properties: None,
				children: vec![ChildNode::expression(text)],
			}
		}
		Document::List(items) => {
			Shape {
				properties: None,
				children: normalize_children(items, compiler)?,
			}
		}
		Document::Mapping(mapping) => {
			let children = match mapping.get(CHILDREN_KEY) {
				Some(children) if children.is_falsy() => Vec::new(),
				Some(Document::List(items)) => normalize_children(items, compiler)?,
				Some(single) => normalize_children(std::slice::from_ref(single), compiler)?,
				None => Vec::new(),
			};

			Shape {
				properties: Some(mapping),
				children,
			}
		}
		Document::Null | Document::Bool(_) | Document::Number(_) => {
			Shape {
				properties: None,
				children: Vec::new(),
			}
		}
	};

	Ok(shape)
}

fn normalize_children<E: EntityEncoder>(
	items: &[Document],
	compiler: &Compiler<E>,
) -> YamlayoutResult<Vec<ChildNode>> {
	items
		.iter()
		.map(|item| normalize_child(item, compiler))
		.collect()
}

fn normalize_child<E: EntityEncoder>(
	child: &Document,
	compiler: &Compiler<E>,
) -> YamlayoutResult<ChildNode> {
	// `- txt: <b>raw</b>` is raw text, not a `<txt>` tag.
	if let Some(raw) = child.sole_value(TXT_KEY) {
		return match raw {
			Document::Text(text) => Ok(ChildNode::Literal(text.clone())),
			other => compiler.fragment(other).map(ChildNode::Nested),
		};
	}

	match child {
		Document::Text(text) => Ok(ChildNode::expression(text)),
		other => compiler.fragment(other).map(ChildNode::Nested),
	}
}

fn set_property(properties: &mut Vec<(String, PropValue)>, key: &str, value: PropValue) {
	if let Some(slot) = properties.iter_mut().find(|(k, _)| k == key) {
		slot.1 = value;
	} else {
		properties.push((key.to_string(), value));
	}
}

/// One tag built from a mapping entry, ready to serialize.
#[derive(Debug, Clone, PartialEq)]
pub struct TagNode {
	tag: String,
	id: Option<String>,
	class_names: Vec<String>,
	properties: Vec<(String, PropValue)>,
	children: Vec<ChildNode>,
	attributes: String,
}

impl TagNode {
	/// Build a tag from a mapping entry. Nested documents among the children
	/// are compiled with `compiler`, whose encoder also encodes attribute
	/// names.
	pub fn new<E: EntityEncoder>(
		key: &str,
		value: &Document,
		compiler: &Compiler<E>,
	) -> YamlayoutResult<Self> {
		let Shape {
			properties: source,
			mut children,
		} = resolve_shape(value, compiler)?;
		let shortcut = Shortcut::parse(key);

		let mut properties: Vec<(String, PropValue)> = source
			.into_iter()
			.flat_map(|mapping| mapping.iter())
			.filter(|(name, _)| *name != CHILDREN_KEY)
			.map(|(name, value)| (name.to_string(), PropValue::from_document(value)))
			.collect();

		if let Some(id) = &shortcut.id {
			set_property(&mut properties, "id", PropValue::Plain(id.as_str().into()));
		}

		if let Some(class_name) = shortcut.class_name() {
			set_property(
				&mut properties,
				"className",
				PropValue::Plain(class_name.into()),
			);
		}

		let mut attributes = String::new();
		properties.retain(|(name, value)| {
			let rendered = value.render();
			if name == TXT_KEY {
				children.push(ChildNode::Literal(rendered));
				return false;
			}

			attributes.push(' ');
			attributes.push_str(&compiler.encoder().encode(name));
			attributes.push('=');
			attributes.push_str(&rendered);
			true
		});

		let Shortcut {
			tag,
			id,
			class_names,
		} = shortcut;

		Ok(Self {
			tag,
			id,
			class_names,
			properties,
			children,
			attributes,
		})
	}

	pub fn tag(&self) -> &str {
		&self.tag
	}

	pub fn id(&self) -> Option<&str> {
		self.id.as_deref()
	}

	pub fn class_names(&self) -> &[String] {
		&self.class_names
	}

	/// Properties in attribute order, without the reserved keys.
	pub fn properties(&self) -> &[(String, PropValue)] {
		&self.properties
	}

	pub fn children(&self) -> &[ChildNode] {
		&self.children
	}

	/// The encoded attribute list. Every attribute is preceded by a space.
	pub fn attributes(&self) -> &str {
		&self.attributes
	}

	pub fn self_close(&self) -> String {
		format!("<{}{} />", self.tag, self.attributes)
	}

	pub fn open(&self) -> String {
		format!("<{}{}>", self.tag, self.attributes)
	}

	pub fn close(&self) -> String {
		format!("</{}>", self.tag)
	}

	/// Serialize the tag and its children.
	pub fn build(&self) -> String {
		let mut output = Accumulator::new();
		self.write_to(&mut output);
		output.into_string()
	}
}

impl Writable for TagNode {
	fn write_to(&self, output: &mut Accumulator) {
		if self.children.is_empty() {
			output.write(&self.self_close());
			return;
		}

		output.write(&self.open());
		output.write_all(&self.children, false);
		output.write(&self.close());
	}
}
