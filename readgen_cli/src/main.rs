use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use readgen_cli::Commands;
use readgen_cli::ReadgenCli;
use readgen_core::CONFIG_FILE_NAME;
use readgen_core::ConfigSources;
use readgen_core::ReadmeGenerator;
use similar::ChangeTag;
use similar::TextDiff;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
}

const SAMPLE_CONFIG: &str = r#"# readgen configuration
# Top-level sections become README sections, in order. Use ${...} to insert
# values from pyproject.toml, e.g. ${project.name} or ${project.authors[0].name}.

[introduction]
title = "${project.name}"
content = """
${project.description}
"""

# [installation]
# title = "Installation"
# content = "pip install ${project.name}"

[directory]
# enable = true
# title = "Directory Structure"
# show_files = true
# show_docstrings = true
exclude_dirs = ["__pycache__", "build", "dist", "node_modules", "venv"]
# depth_limits = { "src" = 2 }

[env]
# enable = true
# env_file = ".env.example"
"#;

fn main() {
	let args = ReadgenCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose);

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
		Some(Commands::Init) => run_init(&args),
		Some(Commands::Generate {
			output,
			dry_run,
			force,
		}) => run_generate(&args, output, *dry_run, *force),
		Some(Commands::Check { output, diff }) => run_check(&args, output, *diff),
		None => {
			eprintln!("No subcommand specified. Run `readgen --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		match e.downcast::<readgen_core::ReadgenError>() {
			Ok(readgen_err) => {
				let report: miette::Report = (*readgen_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

fn init_tracing(verbose: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let _ = tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env()
				.or_else(|_| EnvFilter::try_new(default_level))
				.unwrap_or_else(|_| EnvFilter::new(default_level)),
		)
		.with_writer(std::io::stderr)
		.with_ansi(color_enabled())
		.try_init();
}

fn resolve_root(args: &ReadgenCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn config_sources(args: &ReadgenCli) -> ConfigSources {
	let defaults = ConfigSources::default();
	ConfigSources {
		config: args.config.clone().unwrap_or(defaults.config),
		manifest: args.manifest.clone().unwrap_or(defaults.manifest),
	}
}

fn build_readme(
	args: &ReadgenCli,
	root: &Path,
	output: &Path,
) -> Result<String, Box<dyn std::error::Error>> {
	let generator =
		ReadmeGenerator::with_sources(root, &config_sources(args)).with_output(output);
	tracing::debug!(
		blocks = generator.config().content_blocks().len(),
		"loaded configuration"
	);

	Ok(generator.try_generate()?)
}

fn run_init(args: &ReadgenCli) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config_path = root.join(args.config.as_deref().unwrap_or(Path::new(CONFIG_FILE_NAME)));

	if config_path.exists() {
		println!("Config file already exists: {}", config_path.display());
		return Ok(());
	}

	std::fs::write(&config_path, SAMPLE_CONFIG)?;
	println!("Created {}", config_path.display());
	println!();
	println!("Next steps:");
	println!("  1. Edit {} to add your sections", config_path.display());
	println!("  2. Run `readgen generate` to write README.md");

	Ok(())
}

fn run_generate(
	args: &ReadgenCli,
	output: &Path,
	dry_run: bool,
	force: bool,
) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let readme = build_readme(args, &root, output)?;

	if dry_run {
		print!("{readme}");
		return Ok(());
	}

	let output_path = root.join(output);
	if output_path.exists() && !force {
		return Err(format!(
			"`{}` already exists, pass --force to overwrite it",
			output_path.display()
		)
		.into());
	}

	std::fs::write(&output_path, readme)?;
	println!(
		"{} {}",
		colored!("Generated", green),
		output_path.display()
	);

	Ok(())
}

fn run_check(
	args: &ReadgenCli,
	output: &Path,
	show_diff: bool,
) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let expected = build_readme(args, &root, output)?;
	let output_path = root.join(output);

	let Ok(current) = std::fs::read_to_string(&output_path) else {
		eprintln!(
			"{} {} does not exist, run `readgen generate` to create it",
			colored!("stale:", yellow),
			output_path.display()
		);
		process::exit(1);
	};

	if current == expected {
		println!("{} is up to date", output_path.display());
		return Ok(());
	}

	eprintln!(
		"{} {} is out of date, run `readgen generate --force` to update it",
		colored!("stale:", yellow),
		output_path.display()
	);
	if show_diff {
		print_diff(&current, &expected);
	}
	process::exit(1);
}

/// Print a unified diff between two strings, colorized.
fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				eprint!("  {}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				eprint!("  {}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				eprint!("   {change}");
			}
		}
	}
}
