use color_eyre::Result;
use tracing::{error, Level, Subscriber};
use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt::format, layer::SubscriberExt, EnvFilter, FmtSubscriber};

fn env_filter(log_level: Level) -> EnvFilter {
	EnvFilter::new(format!(
		"hostlist_core={log_level},hostlist_resolver={log_level},warn"
	))
}

pub fn json_subscriber(log_level: Level) -> impl Subscriber + Send + Sync {
	FmtSubscriber::builder()
		.json()
		.with_env_filter(env_filter(log_level))
		.with_span_events(format::FmtSpan::CLOSE)
		.finish()
		.with(ErrorLayer::default())
}

pub fn default_subscriber(log_level: Level) -> impl Subscriber + Send + Sync {
	FmtSubscriber::builder()
		.with_env_filter(env_filter(log_level))
		.with_span_events(format::FmtSpan::CLOSE)
		.finish()
		.with(ErrorLayer::default())
}

pub fn install_panic_hooks() -> Result<()> {
	let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default()
		.display_location_section(true)
		.display_env_section(true)
		.into_hooks();

	eyre_hook.install()?;

	std::panic::set_hook(Box::new(move |panic_info| {
		error!("Error: {}", panic_hook.panic_report(panic_info));
	}));
	Ok(())
}
