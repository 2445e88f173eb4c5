use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;
use supports_color::Stream;
use yamlayout_cli::ColorSupport;
use yamlayout_cli::Commands;
use yamlayout_cli::YamlayoutCli;
use yamlayout_core::BuildAction;
use yamlayout_core::BuildOptions;
use yamlayout_core::CompileOptions;
use yamlayout_core::YamlayoutConfig;
use yamlayout_core::compile_file;

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "YAMLAYOUT_LOG";

static STDOUT_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);
static STDERR_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled(stream: Stream) -> bool {
	let flag = if matches!(stream, Stream::Stderr) {
		&STDERR_COLOR
	} else {
		&STDOUT_COLOR
	};
	flag.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled for the stream the text
/// is written to.
macro_rules! colored {
	($text:expr, $color:ident, $stream:ident) => {
		if color_enabled(Stream::$stream) {
			format!("{}", $text.$color())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = YamlayoutCli::parse();

	let disabled = args.no_color || std::env::var_os("NO_COLOR").is_some();
	let colors = ColorSupport::detect(disabled, |stream| supports_color::on(stream).is_some());
	STDOUT_COLOR.store(colors.stdout, std::sync::atomic::Ordering::Relaxed);
	STDERR_COLOR.store(colors.stderr, std::sync::atomic::Ordering::Relaxed);

	let use_color = colors.stderr;
	init_logging(args.verbose, use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::Compile { file }) => run_compile(&args, file),
		Some(Commands::Build {
			input,
			output,
			root,
		}) => run_build(&args, input.as_deref(), output.as_deref(), root.as_deref()),
		None => {
			eprintln!("No subcommand specified. Run `yamlayout --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<yamlayout_core::YamlayoutError>() {
			Ok(yamlayout_err) => {
				let report: miette::Report = (*yamlayout_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red, Stderr));
			}
		}
		process::exit(2);
	}
}

/// Log to stderr. `YAMLAYOUT_LOG` takes precedence over `--verbose`.
fn init_logging(verbose: bool, use_color: bool) {
	let default_directive = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_ansi(use_color)
		.with_writer(std::io::stderr)
		.without_time()
		.init();
}

fn resolve_root(args: &YamlayoutCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn run_compile(args: &YamlayoutCli, file: &Path) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config = YamlayoutConfig::load(&root)?;
	let options = CompileOptions::from_config(config.as_ref());

	let compiled = compile_file(file, &options)?;
	if args.verbose && compiled.is_skipped() {
		eprintln!(
			"{} {} is marked `# nocompile`, printing json",
			colored!("note:", yellow, Stderr),
			file.display()
		);
	}
	println!("{}", compiled.contents()?);

	Ok(())
}

fn run_build(
	args: &YamlayoutCli,
	input: Option<&Path>,
	output: Option<&Path>,
	root: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
	let base = resolve_root(args);
	let config = YamlayoutConfig::load(&base)?;
	let mut options = BuildOptions::from_config(&base, config.as_ref());

	if let Some(input) = input {
		options.input = base.join(input);
	}
	if let Some(output) = output {
		options.output = base.join(output);
	}
	if let Some(root) = root {
		options.root = base.join(root);
	}

	println!("YAMLAYOUT: Building...\n");
	let report = yamlayout_core::build(&options)?;

	for entry in &report.entries {
		let destination = entry.destination.display().to_string();
		let arrow = match entry.action {
			BuildAction::Compiled => colored!("-->", green, Stdout),
			BuildAction::Skipped => colored!("-->", yellow, Stdout),
			BuildAction::Copied => colored!("-->", dimmed, Stdout),
		};
		println!("{}", entry.source.display());
		println!("{arrow} {destination}\n");
	}

	if args.verbose {
		println!(
			"{} compiled, {} skipped, {} copied",
			report.count(BuildAction::Compiled),
			report.count(BuildAction::Skipped),
			report.count(BuildAction::Copied)
		);
	}

	Ok(())
}
