//! menu-tunnel binary entry point.

use std::process::ExitCode;
use std::sync::Arc;

use menu_tunnel::api::{serve, AppState, ConnectionHub};
use menu_tunnel::cli::{parse_args, print_help, print_version};
use menu_tunnel::config::Config;
use menu_tunnel::{demo, logging, Bundle, BundleFormatter, MenuDispatcher};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("Run with --help for usage.");
            return ExitCode::FAILURE;
        }
    };

    if args.help {
        print_help();
        return ExitCode::SUCCESS;
    }
    if args.version {
        print_version();
        return ExitCode::SUCCESS;
    }

    let config = match Config::load(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let _ = logging::init_with_filter(config.log_filter());
    info!("menu-tunnel v{}", env!("CARGO_PKG_VERSION"));

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let server_config = config.to_server_config()?;

    let bundle = Bundle::load(&config.menus.bundles_dir, &config.menus.default_locale)?;
    let hub = Arc::new(ConnectionHub::new());
    let formatter = Arc::new(BundleFormatter::new(Arc::new(bundle), hub.clone()));

    let dispatcher = Arc::new(MenuDispatcher::new());
    let menus = demo::install(&dispatcher, hub.clone(), formatter)?;
    info!("{} menus registered", dispatcher.count());

    let state = AppState {
        dispatcher,
        hub,
        entry_menu: None,
    }
    .with_entry_menu(menus.main);

    serve(server_config, state).await?;
    Ok(())
}
