use clap::{Arg, ArgAction, Command};
use css_module_companion::CompanionCommand;
use dotenv::dotenv;
use std::path::PathBuf;
use std::process;

mod cli;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv().ok();

    let matches = build_cli().get_matches();

    if let Err(e) = run_command(matches).await {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn file_arg() -> Arg {
    Arg::new("file")
        .help("The file open in the editor")
        .required(true)
        .index(1)
        .value_parser(clap::value_parser!(PathBuf))
}

fn build_cli() -> Command {
    Command::new("cssmod")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Jump between components and their CSS modules")
        .long_about(
            "Links a component file to its co-located `{name}.module.{ext}` style file: \
             toggle between the two, create the module on demand and import it.",
        )
        .arg_required_else_help(true)
        .subcommand(
            Command::new("toggle")
                .about("Go from a component to its CSS module or back")
                .arg(file_arg()),
        )
        .subcommand(
            Command::new("import")
                .about("Import the component's CSS module, creating it if needed")
                .arg(file_arg())
                .arg(
                    Arg::new("write")
                        .short('w')
                        .long("write")
                        .help("Save the component after inserting the import")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("open-module")
                .about("Open the component's CSS module, creating it if needed")
                .arg(file_arg()),
        )
        .subcommand(
            Command::new("open-component")
                .about("Open the component a CSS module belongs to")
                .arg(file_arg()),
        )
        .subcommand(
            Command::new("resolve")
                .about("Print the sibling path without creating or editing anything")
                .arg(file_arg())
                .arg(
                    Arg::new("direction")
                        .short('d')
                        .long("direction")
                        .help("Resolution direction (default: from the file name)")
                        .value_parser(["component-to-module", "module-to-component"]),
                ),
        )
        .subcommand(Command::new("detect").about("Show the style extension detected for the workspace"))
        .arg(
            Arg::new("root")
                .long("root")
                .help("Workspace root")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("yes")
                .short('y')
                .long("yes")
                .help("Create missing modules without asking")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .help("Output format")
                .global(true)
                .value_parser(["text", "json"])
                .default_value("text"),
        )
        .arg(
            Arg::new("file-extension")
                .long("file-extension")
                .help("Style extension for new modules")
                .global(true)
                .value_parser(["auto", "scss", "sass", "less", "styl", "css"]),
        )
        .arg(
            Arg::new("import-name")
                .long("import-name")
                .help("Identifier bound by the generated import")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Verbose logging")
                .global(true)
                .action(ArgAction::SetTrue),
        )
}

async fn run_command(matches: clap::ArgMatches) -> anyhow::Result<()> {
    let ctx = cli::CliContext::from_matches(&matches)?;
    cli::init_tracing(&ctx.config.logging, matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("toggle", sub_matches)) => {
            cli::commands::run::handle_run(CompanionCommand::Toggle, sub_matches, &ctx).await?
        }
        Some(("import", sub_matches)) => {
            cli::commands::run::handle_run(CompanionCommand::Import, sub_matches, &ctx).await?
        }
        Some(("open-module", sub_matches)) => {
            cli::commands::run::handle_run(CompanionCommand::OpenModule, sub_matches, &ctx).await?
        }
        Some(("open-component", sub_matches)) => {
            cli::commands::run::handle_run(CompanionCommand::OpenComponent, sub_matches, &ctx)
                .await?
        }
        Some(("resolve", sub_matches)) => {
            cli::commands::resolve::handle_resolve(sub_matches, &ctx).await?
        }
        Some(("detect", _)) => cli::commands::detect::handle_detect(&ctx).await?,
        _ => {
            unreachable!("Command parsing should ensure we never reach this");
        }
    }

    Ok(())
}
