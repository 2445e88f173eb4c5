use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::DEFAULT_COMPONENTS_DIR;
use crate::YamlayoutError;
use crate::YamlayoutResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = [
	"yamlayout.toml",
	".yamlayout.toml",
	".config/yamlayout.toml",
];

/// Configuration loaded from a `yamlayout.toml` file.
///
/// ```toml
/// [build]
/// root = "dev"
/// input = "dev"
/// output = "build"
///
/// [components]
/// directory = "../components"
///
/// [exclude]
/// patterns = ["drafts/", "*.bak"]
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct YamlayoutConfig {
	/// Default locations for `yamlayout build`.
	#[serde(default)]
	pub build: BuildConfig,
	/// Where `# include` directives import components from.
	#[serde(default)]
	pub components: ComponentsConfig,
	/// Files to leave out of directory builds.
	#[serde(default)]
	pub exclude: ExcludeConfig,
}

/// The `[build]` section. Paths are relative to the project directory.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct BuildConfig {
	/// The source tree root. Output paths mirror the input's location below
	/// this directory.
	#[serde(default = "default_root")]
	pub root: PathBuf,
	/// The file or directory to build.
	#[serde(default = "default_root")]
	pub input: PathBuf,
	/// The directory compiled modules are written to.
	#[serde(default = "default_output")]
	pub output: PathBuf,
}

impl Default for BuildConfig {
	fn default() -> Self {
		Self {
			root: default_root(),
			input: default_root(),
			output: default_output(),
		}
	}
}

fn default_root() -> PathBuf {
	PathBuf::from("./dev")
}

fn default_output() -> PathBuf {
	PathBuf::from("./build")
}

/// The `[components]` section.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ComponentsConfig {
	/// Module path prefix for `# include` directives.
	#[serde(default = "default_components_dir")]
	pub directory: String,
}

impl Default for ComponentsConfig {
	fn default() -> Self {
		Self {
			directory: default_components_dir(),
		}
	}
}

fn default_components_dir() -> String {
	DEFAULT_COMPONENTS_DIR.to_string()
}

/// Exclusion configuration for directory builds.
///
/// Patterns follow gitignore syntax relative to the build root. Supports
/// negation (`!pattern`) and directory markers (trailing `/`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExcludeConfig {
	#[serde(default)]
	pub patterns: Vec<String>,
}

impl YamlayoutConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> YamlayoutResult<Option<YamlayoutConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		tracing::debug!(path = %config_path.display(), "loading config");
		let content = std::fs::read_to_string(&config_path)?;
		let config: YamlayoutConfig =
			toml::from_str(&content).map_err(|e| YamlayoutError::ConfigParse(e.to_string()))?;

		Ok(Some(config))
	}
}
