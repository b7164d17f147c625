use clap::Parser;
use jasmine::cli::{demo, handle_completions, handle_config_init, render, Cli, Commands, ConfigCommands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render(args) => render::run_render(&args),
        Commands::Demo(args) => demo::run_demo(&args),
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Init(args) => handle_config_init(&args),
        },
        Commands::Completions(args) => {
            handle_completions(&args);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
