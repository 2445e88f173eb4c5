use crate::Accumulator;
use crate::Directives;

/// The component name used when none is given.
pub const DEFAULT_COMPONENT_NAME: &str = "Home";

/// First line of every generated module.
pub const FRAMEWORK_IMPORT: &str = "import React from 'react'\n";

/// Make `name` usable as a component identifier.
///
/// A leading digit gets a `p` prefix, then the first `-` is removed. Later
/// hyphens are kept; generated module names rely on it.
pub fn sanitize_name(name: &str) -> String {
	let prefixed = if name.starts_with(|c: char| c.is_ascii_digit()) {
		format!("p{name}")
	} else {
		name.to_string()
	};

	prefixed.replacen('-', "", 1)
}

/// Wrap compiled `markup` in a React component module.
///
/// ```rust
/// use yamlayout_core::Directives;
/// use yamlayout_core::to_component;
///
/// let module = to_component(Some("404"), "<p />", &Directives::default());
/// assert_eq!(
/// 	module,
/// 	"import React from 'react'\n\nconst p404 = (props) => (<><p /></>);\n\nexport default p404"
/// );
/// ```
pub fn to_component(name: Option<&str>, markup: &str, directives: &Directives) -> String {
	let name = sanitize_name(name.unwrap_or(DEFAULT_COMPONENT_NAME));
	let mut output = Accumulator::with(FRAMEWORK_IMPORT);

	output
		.write_all(&directives.imports, true)
		.write_all(&directives.includes, true);
	output.write(&format!("\nconst {name} = (props) => (<>{markup}</>);\n\n"));
	output.write(&format!("export default {name}"));

	output.into_string()
}
