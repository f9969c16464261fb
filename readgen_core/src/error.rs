use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum ReadgenError {
	#[error(transparent)]
	#[diagnostic(code(readgen::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(readgen::config_parse),
		help("check that readgen.toml is valid TOML with [directory] and/or [env] sections")
	)]
	ConfigParse(String),

	#[error("failed to load data file `{path}`: {reason}")]
	#[diagnostic(code(readgen::data_file))]
	DataFile { path: String, reason: String },

	#[error("unsupported manifest format: `{0}`")]
	#[diagnostic(
		code(readgen::unsupported_format),
		help("supported formats: toml, json, yaml, yml")
	)]
	UnsupportedDataFormat(String),

	#[error("failed to read directory `{path}`: {reason}")]
	#[diagnostic(
		code(readgen::directory_read),
		help("add the directory to `exclude_dirs` in readgen.toml to skip it")
	)]
	DirectoryRead { path: String, reason: String },
}

pub type ReadgenResult<T> = Result<T, ReadgenError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
