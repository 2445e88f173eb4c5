use std::path::Path;
use std::path::PathBuf;

use ignore::gitignore::Gitignore;
use ignore::gitignore::GitignoreBuilder;

use crate::DEFAULT_COMPONENTS_DIR;
use crate::Document;
use crate::YamlayoutError;
use crate::YamlayoutResult;
use crate::config::YamlayoutConfig;
use crate::directives::is_nocompile;
use crate::directives::scan_directives;
use crate::to_component;
use crate::to_markup;

/// Extensions of files that are compiled rather than copied.
pub const YAML_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// Extension of compiled modules.
pub const MODULE_EXTENSION: &str = "js";

/// Returns true for `.yaml` and `.yml` paths.
pub fn is_yaml(path: &Path) -> bool {
	path.extension()
		.and_then(|ext| ext.to_str())
		.is_some_and(|ext| YAML_EXTENSIONS.contains(&ext))
}

/// Options for compiling a single layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
	/// Module path prefix for `# include` directives.
	pub components_dir: String,
}

impl Default for CompileOptions {
	fn default() -> Self {
		Self {
			components_dir: DEFAULT_COMPONENTS_DIR.to_string(),
		}
	}
}

impl CompileOptions {
	pub fn from_config(config: Option<&YamlayoutConfig>) -> Self {
		config.map_or_else(Self::default, |c| {
			Self {
				components_dir: c.components.directory.clone(),
			}
		})
	}
}

/// The result of compiling a layout.
#[derive(Debug, Clone, PartialEq)]
pub enum Compiled {
	/// The generated component module.
	Component(String),
	/// The source opted out with `# nocompile`; this is its parsed document.
	Skipped(Document),
}

impl Compiled {
	pub fn is_skipped(&self) -> bool {
		matches!(self, Self::Skipped(_))
	}

	/// The text to write out. Skipped documents are written as pretty json.
	pub fn contents(&self) -> YamlayoutResult<String> {
		match self {
			Self::Component(module) => Ok(module.clone()),
			Self::Skipped(document) => Ok(serde_json::to_string_pretty(document)?),
		}
	}
}

/// Compile layout `source` into a component module called `name`.
pub fn compile_source(
	name: &str,
	source: &str,
	options: &CompileOptions,
) -> YamlayoutResult<Compiled> {
	compile_named(name, source, name, options)
}

/// Compile the layout at `path`. The component is named after the file
/// stem.
pub fn compile_file(path: &Path, options: &CompileOptions) -> YamlayoutResult<Compiled> {
	let metadata = std::fs::metadata(path)?;
	if !metadata.is_file() {
		return Err(YamlayoutError::NotAFile {
			path: path.display().to_string(),
		});
	}

	if !is_yaml(path) {
		return Err(YamlayoutError::NotYaml {
			path: path.display().to_string(),
		});
	}

	let name = path
		.file_stem()
		.map(|stem| stem.to_string_lossy().into_owned())
		.unwrap_or_default();
	let source = std::fs::read_to_string(path)?;

	compile_named(&name, &source, &path.display().to_string(), options)
}

fn compile_named(
	name: &str,
	source: &str,
	path_display: &str,
	options: &CompileOptions,
) -> YamlayoutResult<Compiled> {
	let document = Document::from_yaml_at(source, path_display)?;

	if is_nocompile(source) {
		tracing::debug!(path = path_display, "skipping nocompile layout");
		return Ok(Compiled::Skipped(document));
	}

	let markup = to_markup(&document)?;
	let directives = scan_directives(source, &options.components_dir)?;
	tracing::debug!(path = path_display, component = name, "compiled layout");

	Ok(Compiled::Component(to_component(
		Some(name),
		&markup,
		&directives,
	)))
}

/// Options for building a file or a directory tree.
#[derive(Debug, Clone)]
pub struct BuildOptions {
	/// Output paths mirror each source's location below this directory.
	pub root: PathBuf,
	/// The file or directory to build.
	pub input: PathBuf,
	/// The directory written to.
	pub output: PathBuf,
	/// Gitignore-style patterns, relative to `input`, to leave out.
	pub exclude_patterns: Vec<String>,
	pub compile: CompileOptions,
}

impl BuildOptions {
	/// Build options from the config, with every path resolved against
	/// `base`.
	pub fn from_config(base: &Path, config: Option<&YamlayoutConfig>) -> Self {
		let build = config.map(|c| c.build.clone()).unwrap_or_default();
		let exclude_patterns = config
			.map(|c| c.exclude.patterns.clone())
			.unwrap_or_default();

		Self {
			root: base.join(build.root),
			input: base.join(build.input),
			output: base.join(build.output),
			exclude_patterns,
			compile: CompileOptions::from_config(config),
		}
	}
}

/// What a build did with one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildAction {
	/// A layout compiled into a component module.
	Compiled,
	/// A layout marked `# nocompile`, written as json.
	Skipped,
	/// A non-yaml file copied verbatim.
	Copied,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildEntry {
	pub source: PathBuf,
	pub destination: PathBuf,
	pub action: BuildAction,
}

/// Every file a build wrote, in the order they were written.
#[derive(Debug, Default)]
pub struct BuildReport {
	pub entries: Vec<BuildEntry>,
}

impl BuildReport {
	pub fn count(&self, action: BuildAction) -> usize {
		self.entries
			.iter()
			.filter(|entry| entry.action == action)
			.count()
	}
}

/// Where a build writes `file`: its path below `root`, moved under
/// `output`, with yaml files renamed to `.js`. A file outside `root` is
/// written directly into `output`.
pub fn output_path_for(root: &Path, output: &Path, file: &Path) -> PathBuf {
	let relative = match file.strip_prefix(root) {
		Ok(relative) if !relative.as_os_str().is_empty() => relative.to_path_buf(),
		_ => file.file_name().map(PathBuf::from).unwrap_or_default(),
	};

	let destination = output.join(relative);
	if is_yaml(&destination) {
		destination.with_extension(MODULE_EXTENSION)
	} else {
		destination
	}
}

/// Build a single file or every file below a directory.
pub fn build(options: &BuildOptions) -> YamlayoutResult<BuildReport> {
	let metadata = std::fs::metadata(&options.input)?;
	let files = if metadata.is_dir() {
		collect_files(options)?
	} else {
		vec![options.input.clone()]
	};

	let mut report = BuildReport::default();
	for file in files {
		report.entries.push(build_file(&file, options)?);
	}

	Ok(report)
}

fn build_file(source: &Path, options: &BuildOptions) -> YamlayoutResult<BuildEntry> {
	let destination = output_path_for(&options.root, &options.output, source);
	if let Some(parent) = destination.parent() {
		std::fs::create_dir_all(parent)?;
	}

	let action = if is_yaml(source) {
		let compiled = compile_file(source, &options.compile)?;
		std::fs::write(&destination, compiled.contents()?)?;
		if compiled.is_skipped() {
			BuildAction::Skipped
		} else {
			BuildAction::Compiled
		}
	} else {
		std::fs::copy(source, &destination)?;
		BuildAction::Copied
	};

	tracing::info!(
		source = %source.display(),
		destination = %destination.display(),
		?action,
		"built file"
	);

	Ok(BuildEntry {
		source: source.to_path_buf(),
		destination,
		action,
	})
}

fn build_exclude_matcher(root: &Path, patterns: &[String]) -> YamlayoutResult<Gitignore> {
	let mut builder = GitignoreBuilder::new(root);
	for pattern in patterns {
		builder.add_line(None, pattern).map_err(|e| {
			YamlayoutError::ConfigParse(format!("invalid exclude pattern `{pattern}`: {e}"))
		})?;
	}
	builder
		.build()
		.map_err(|e| YamlayoutError::ConfigParse(format!("failed to build exclude rules: {e}")))
}

/// Collect every file below the build input in sorted order.
fn collect_files(options: &BuildOptions) -> YamlayoutResult<Vec<PathBuf>> {
	let exclude = build_exclude_matcher(&options.input, &options.exclude_patterns)?;
	let mut files = Vec::new();
	walk_dir(&options.input, &options.output, &exclude, &mut files)?;

	Ok(files)
}

/// Symlinks are not followed. `.git` and the output directory itself are
/// never entered.
fn walk_dir(
	dir: &Path,
	output: &Path,
	exclude: &Gitignore,
	files: &mut Vec<PathBuf>,
) -> YamlayoutResult<()> {
	let mut entries = std::fs::read_dir(dir)?.collect::<Result<Vec<_>, _>>()?;
	entries.sort_by_key(std::fs::DirEntry::file_name);

	for entry in entries {
		let path = entry.path();
		let file_type = entry.file_type()?;
		if file_type.is_symlink() {
			continue;
		}

		let is_dir = file_type.is_dir();
		if is_dir && (entry.file_name() == ".git" || path == output) {
			continue;
		}

		if exclude.matched(&path, is_dir).is_ignore() {
			continue;
		}

		if is_dir {
			walk_dir(&path, output, exclude, files)?;
		} else if file_type.is_file() {
			files.push(path);
		}
	}

	Ok(())
}
