use clap::Parser;
use colored::Colorize;
use subnet_router_planner::cli::{run, Args};
use subnet_router_planner::config::{log_config_path, Settings};

fn main() {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let log_config = log_config_path();
    if let Err(e) = log4rs::init_file(&log_config, Default::default()) {
        eprintln!("Logging disabled, cannot load {log_config}: {e}");
    }
    log::info!("#Start main()");

    let args = Args::parse();
    let result = Settings::from_env().and_then(|settings| run(&args, &settings));
    if let Err(e) = result {
        eprintln!("{} {e}", "ERROR".on_red());
        std::process::exit(1);
    }
}
