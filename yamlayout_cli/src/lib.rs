use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use supports_color::Stream;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Compile YAML layouts into React components.",
	long_about = "yamlayout compiles layouts written as YAML documents into JSX markup wrapped in \
	              a React component module.\n\nMapping keys are tag names with optional `#id` and \
	              `.class` shortcuts, strings become text, and lists become children. Comment \
	              directives (`# import`, `# include`, `# nocompile`) control the generated \
	              module.\n\nQuick start:\n  yamlayout compile dev/home.yaml  Print one compiled \
	              module\n  yamlayout build                  Compile every layout below ./dev"
)]
pub struct YamlayoutCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory. Config discovery and relative
	/// build paths start here.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Compile a single layout and print the result.
	///
	/// Prints the generated component module to stdout. A layout whose first
	/// line is `# nocompile` is printed as pretty json instead.
	Compile {
		/// The `.yaml` or `.yml` layout to compile.
		file: PathBuf,
	},
	/// Compile every layout below a directory into an output directory.
	///
	/// Layout files are compiled to `.js` modules and every other file is
	/// copied unchanged. Output paths mirror each file's location below the
	/// root. Defaults come from `yamlayout.toml` when present.
	Build {
		/// The file or directory to build. Defaults to `./dev`.
		#[arg(long, short)]
		input: Option<PathBuf>,

		/// The directory to write to. Defaults to `./build`.
		#[arg(long, short)]
		output: Option<PathBuf>,

		/// The source tree root that output paths are relative to. Defaults
		/// to `./dev`.
		#[arg(long, short)]
		root: Option<PathBuf>,
	},
}

/// Which output streams get ANSI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSupport {
	/// Build reports and compiled output.
	pub stdout: bool,
	/// Logs and diagnostics.
	pub stderr: bool,
}

impl ColorSupport {
	/// `disabled` covers `--no-color` and `NO_COLOR`. Otherwise each stream is
	/// asked separately, so piping stdout keeps diagnostics on a terminal
	/// colored.
	pub fn detect(disabled: bool, supports: impl Fn(Stream) -> bool) -> Self {
		Self {
			stdout: !disabled && supports(Stream::Stdout),
			stderr: !disabled && supports(Stream::Stderr),
		}
	}
}
