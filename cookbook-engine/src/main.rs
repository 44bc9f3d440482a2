use clap::Parser;
use cookbook_engine::config::CliArgs;
use cookbook_engine::cookbook::{Cookbook, CookbookConfig};
use cookbook_engine::server::CookbookServer;
use cookbook_engine::transport::NdjsonTransport;

fn main() {
	let args = CliArgs::parse();

	// stdout carries the protocol, so logs go to stderr
	tracing_subscriber::fmt()
		.with_writer(std::io::stderr)
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level)),
		)
		.init();

	let config = CookbookConfig {
		data_dir: args.data_dir.clone(),
		page_limit: args.page_limit(),
	};
	tracing::info!(
		data_dir = %config.data_dir.display(),
		page_limit = ?config.page_limit.get(),
		"cookbook-engine ready"
	);

	let transport = NdjsonTransport::new();
	let mut server = CookbookServer::new(transport, Cookbook::new(config));

	if let Err(e) = server.run() {
		tracing::error!("Server error: {}", e);
		std::process::exit(1);
	}
}
