use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use xlsx_translator::{
    logging, run_translation, server, AppConfig, GoogleTranslator, ServerState,
};

#[derive(Parser, Debug)]
#[command(
    name = "xlsx-translator",
    version,
    about = "Translate an Excel workbook into several languages"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, global = true, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP upload/download server
    Serve {
        #[arg(long)]
        bind: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Translate a workbook on disk
    Translate {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Target language, repeatable (defaults to the configured selection)
        #[arg(short = 'l', long = "lang")]
        languages: Vec<String>,
    },
    /// Print the offered target languages
    Languages,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_or_default(Some(&cli.config));
    logging::init(&config.logging)?;
    tracing::info!("Loaded configuration: {:?}", config.server.name);

    match cli.command {
        Command::Serve { bind, port } => {
            let bind_addr = bind.unwrap_or_else(|| config.server.bind_addr.clone());
            let port = port.unwrap_or(config.server.port);
            let translator = Arc::new(GoogleTranslator::new(&config.translation)?);
            let state = Arc::new(ServerState { config, translator });

            server::serve(state, &bind_addr, port).await?;
        }
        Command::Translate {
            input,
            output,
            languages,
        } => {
            let languages = if languages.is_empty() {
                config.translation.default_languages.clone()
            } else {
                languages
            };
            let translator = GoogleTranslator::new(&config.translation)?;
            let bytes = tokio::fs::read(&input).await?;

            let result = run_translation(&bytes, &languages, &translator, &config).await?;
            for message in &result.messages {
                tracing::info!("{}", message);
            }

            let output = output.unwrap_or_else(|| PathBuf::from(&result.file_name));
            tokio::fs::write(&output, &result.workbook).await?;
            println!("{}", output.display());
        }
        Command::Languages => {
            for lang in &config.translation.languages {
                let marker = if config.translation.default_languages.contains(lang) {
                    " (default)"
                } else {
                    ""
                };
                println!("{}{}", lang, marker);
            }
        }
    }

    tracing::info!("Shutting down");
    Ok(())
}
