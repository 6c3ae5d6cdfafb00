//! Router Demo CLI
//!
//! Mounts the demo page on an in-memory history, clicks links and prints
//! what the page renders.
//!
//! ## Usage
//!
//! ```bash
//! router-demo --click people --click people/1
//! router-demo --mode path --basename /app --url http://localhost/app/ --click hello
//! router-demo --config router.toml --json
//! RUST_LOG=reinhardt_router=debug router-demo -v --click hello
//! ```

#[cfg(not(target_arch = "wasm32"))]
mod cli {
	use clap::Parser;
	use reinhardt_router::{RouterConfig, RouterMode};
	use reinhardt_router_demo::{DemoError, DemoSession, default_config};
	use std::path::PathBuf;
	use std::process;
	use tracing_subscriber::EnvFilter;

	#[derive(Parser)]
	#[command(name = "router-demo")]
	#[command(about = "Drive the reinhardt-router demo page from the command line", long_about = None)]
	#[command(version)]
	struct Cli {
		/// Prefix applied to every route
		#[arg(long, value_name = "BASENAME")]
		basename: Option<String>,

		/// Router mode: hash or path
		#[arg(long, value_name = "MODE")]
		mode: Option<RouterMode>,

		/// TOML file with `basename` and `mode` (flags take precedence)
		#[arg(long, value_name = "PATH")]
		config: Option<PathBuf>,

		/// Initial location
		#[arg(long, value_name = "URL", default_value = "http://localhost/")]
		url: String,

		/// Link target to click; repeat to click several in order
		#[arg(long, value_name = "TO")]
		click: Vec<String>,

		/// Print the final router state as JSON instead of HTML
		#[arg(long)]
		json: bool,

		/// Verbosity level (can be repeated)
		#[arg(short, long, action = clap::ArgAction::Count)]
		verbosity: u8,
	}

	fn init_tracing(verbosity: u8) {
		let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbosity {
			0 => EnvFilter::new("warn"),
			1 => EnvFilter::new("reinhardt_router=info,reinhardt_router_demo=info,warn"),
			_ => EnvFilter::new("reinhardt_router=debug,reinhardt_router_demo=debug,info"),
		});
		tracing_subscriber::fmt()
			.with_env_filter(filter)
			.with_writer(std::io::stderr)
			.init();
	}

	fn load_config(cli: &Cli) -> Result<RouterConfig, DemoError> {
		let mut config = match &cli.config {
			Some(path) => RouterConfig::from_file(path)?,
			None => default_config(),
		};
		if let Some(basename) = &cli.basename {
			config = config.with_basename(basename.clone());
		}
		if let Some(mode) = cli.mode {
			config = config.with_mode(mode);
		}
		Ok(config)
	}

	fn run(cli: Cli) -> Result<(), DemoError> {
		let config = load_config(&cli)?;
		tracing::info!(mode = %config.mode, basename = %config.basename, "Starting demo");

		let session = DemoSession::new(&cli.url, config)?;
		if !cli.json {
			println!("{}", session.html());
		}

		for to in &cli.click {
			let navigation = session.click(to)?;
			tracing::info!(to = %to, ?navigation, "Link activated");
			if !cli.json {
				println!("{}", session.html());
			}
		}

		if cli.json {
			println!("{}", session.state_json()?);
		}
		Ok(())
	}

	pub fn main() {
		let cli = Cli::parse();
		init_tracing(cli.verbosity);

		if let Err(e) = run(cli) {
			eprintln!("Error: {}", e);
			process::exit(1);
		}
	}
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
	cli::main();
}

#[cfg(target_arch = "wasm32")]
fn main() {}
