use clap::Parser;
use miette::Result;
use std::env;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use traceline::cli::{Cli, Commands};
use traceline::core::Config;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior so piping to `head` exits quietly
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    init_tracing(global.verbose);

    let config = Config::load();

    match cli.command {
        Commands::Seed(args) => traceline::cli::commands::seed::run(args, &global, &config),
        Commands::List(args) => traceline::cli::commands::list::run(args, &global, &config),
        Commands::Show(args) => traceline::cli::commands::show::run(args, &global, &config),
        Commands::Conformance(args) => {
            traceline::cli::commands::conformance::run(args, &global, &config)
        }
        Commands::Completions(args) => traceline::cli::commands::completions::run(args),
    }
}

/// Install the stderr subscriber; `TRACELINE_LOG` overrides the level filter
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("TRACELINE_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "traceline=debug,info"
        } else {
            "traceline=info,warn"
        })
    });

    let format = env::var("TRACELINE_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}
