use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum YamlayoutError {
	#[error(transparent)]
	#[diagnostic(code(yamlayout::io_error))]
	Io(#[from] std::io::Error),

	#[error("only strings, lists, and mappings can be compiled to markup, got {kind}")]
	#[diagnostic(
		code(yamlayout::invalid_input_kind),
		help("wrap scalar content in a tag, e.g. `p: \"42\"`, or quote it as a string")
	)]
	InvalidInputKind { kind: &'static str },

	#[error("failed to parse yaml in `{path}`: {reason}")]
	#[diagnostic(code(yamlayout::yaml))]
	Yaml { path: String, reason: String },

	#[error("unsupported mapping key: {key}")]
	#[diagnostic(
		code(yamlayout::unsupported_key),
		help("mapping keys must be strings, numbers, booleans, or null")
	)]
	UnsupportedKey { key: String },

	#[error("unconvertible float value: {value}")]
	#[diagnostic(
		code(yamlayout::unconvertible_float),
		help("NaN and Infinity are not valid JSON numbers")
	)]
	UnconvertibleFloat { value: String },

	#[error("`{path}` is not a file")]
	#[diagnostic(
		code(yamlayout::not_a_file),
		help("the `compile` command is for single files, use `build` to compile a directory")
	)]
	NotAFile { path: String },

	#[error("`{path}` is not a yaml file")]
	#[diagnostic(
		code(yamlayout::not_yaml),
		help("only files ending in `.yaml` or `.yml` can be compiled")
	)]
	NotYaml { path: String },

	#[error("malformed include directive on line {line}: `{text}`")]
	#[diagnostic(
		code(yamlayout::malformed_include),
		help("include directives name a component: `# include Header`")
	)]
	MalformedInclude { line: usize, text: String },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(yamlayout::config_parse),
		help("check that yamlayout.toml is valid TOML with [build], [components] and/or [exclude] sections")
	)]
	ConfigParse(String),

	#[error(transparent)]
	#[diagnostic(code(yamlayout::json))]
	Json(#[from] serde_json::Error),
}

pub type YamlayoutResult<T> = Result<T, YamlayoutError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
