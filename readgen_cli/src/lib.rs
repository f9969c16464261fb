use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

/// Default output file for `generate` and `check`.
pub const DEFAULT_OUTPUT: &str = "README.md";

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Generate a project README from readgen.toml, project metadata, and the source tree.",
	long_about = "readgen builds a README from three sources: content blocks written in \
	              readgen.toml (with ${project.name}-style variables), metadata from the project \
	              manifest, and a rendered tree of the project directory annotated with module \
	              doc strings.\n\nQuick start:\n  readgen init      Create a sample readgen.toml\n  \
	              readgen generate  Write README.md\n  readgen check     Verify README.md is up to \
	              date"
)]
pub struct ReadgenCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Generator configuration file, relative to the project root.
	#[arg(long, global = true)]
	pub config: Option<PathBuf>,

	/// Project manifest used for `${...}` variables, relative to the project
	/// root. The format (toml, json, yaml) is taken from the extension.
	#[arg(long, global = true)]
	pub manifest: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Create a sample `readgen.toml` in the project root.
	///
	/// The sample defines an introduction block using the project name and
	/// description and documents the `[directory]` and `[env]` settings. If
	/// the file already exists, this command is a no-op and exits
	/// successfully.
	Init,
	/// Generate the README and write it to disk.
	///
	/// Content blocks from `readgen.toml` are emitted in file order, followed
	/// by the environment variable table and the directory tree. Use
	/// `--dry-run` to print the document instead of writing it.
	Generate {
		/// Output file, relative to the project root.
		#[arg(long, short, default_value = DEFAULT_OUTPUT)]
		output: PathBuf,

		/// Print the generated document instead of writing it.
		#[arg(long, default_value_t = false)]
		dry_run: bool,

		/// Overwrite the output file if it already exists.
		#[arg(long, short, default_value_t = false)]
		force: bool,
	},
	/// Check that the README on disk matches a fresh generation.
	///
	/// Exits with a non-zero status code when the file is missing or out of
	/// date. Ideal for CI pipelines.
	Check {
		/// Output file, relative to the project root.
		#[arg(long, short, default_value = DEFAULT_OUTPUT)]
		output: PathBuf,

		/// Show a line diff between the file on disk and the expected
		/// content.
		#[arg(long, default_value_t = false)]
		diff: bool,
	},
}
