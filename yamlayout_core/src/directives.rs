use crate::YamlayoutError;
use crate::YamlayoutResult;

/// Where `# include` directives resolve components from, relative to the
/// compiled module.
pub const DEFAULT_COMPONENTS_DIR: &str = "../components";

const IMPORT_MARKER: &str = "# import";
const INCLUDE_MARKER: &str = "# include";
const NOCOMPILE_MARKER: &str = "# nocompile";

/// Import statements collected from a layout's comment directives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directives {
	/// `# import X from 'y'` lines, copied without the leading `#`.
	pub imports: Vec<String>,
	/// `# include Name` lines, rewritten to import from the components
	/// directory.
	pub includes: Vec<String>,
}

impl Directives {
	pub fn is_empty(&self) -> bool {
		self.imports.is_empty() && self.includes.is_empty()
	}
}

/// Collect the `# import` and `# include` directives of a layout source, in
/// line order.
///
/// ```yaml
/// # import { useState } from 'react'
/// # include Header
/// ```
///
/// yields `import { useState } from 'react'` and
/// `import Header from '<components_dir>/header'`.
pub fn scan_directives(source: &str, components_dir: &str) -> YamlayoutResult<Directives> {
	let mut directives = Directives::default();

	for (index, line) in source.lines().enumerate() {
		if line.starts_with(IMPORT_MARKER) {
			directives.imports.push(strip_comment(line).to_string());
		} else if line.starts_with(INCLUDE_MARKER) {
			let statement = strip_comment(line);
			let base = format!("import{}", &statement["include".len()..]);
			let Some(name) = base.split_whitespace().nth(1) else {
				return Err(YamlayoutError::MalformedInclude {
					line: index + 1,
					text: line.to_string(),
				});
			};
			let include = format!("{base} from '{components_dir}/{}'", name.to_lowercase());
			directives.includes.push(include);
		}
	}

	tracing::debug!(
		imports = directives.imports.len(),
		includes = directives.includes.len(),
		"scanned directives"
	);

	Ok(directives)
}

/// Whether the first line opts the file out of compilation with
/// `# nocompile` (any case).
pub fn is_nocompile(source: &str) -> bool {
	let first_line = source.split('\n').next().unwrap_or_default();
	first_line
		.get(..NOCOMPILE_MARKER.len())
		.is_some_and(|prefix| prefix.eq_ignore_ascii_case(NOCOMPILE_MARKER))
}

/// Drop the leading `#` and surrounding whitespace.
fn strip_comment(line: &str) -> &str {
	line[1..].trim()
}
