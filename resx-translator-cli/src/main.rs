use std::{path::PathBuf, sync::Arc};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use resx_translator::{
    Document, RenderStrategy, ReqwestTransport, TranslationJob, Translator,
    extract::translatable_records, fetch_languages, traits::Parser as _, translate_file,
    validate_version,
};
use resx_translator_cli::{
    FileConfig, ServiceOverrides, ValidationContext,
    config::{ENDPOINT_ENV, KEY_ENV, REGION_ENV},
    resolve_service_config, validate_context,
    validation::validate_file_path,
    view::{print_languages, print_view},
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "resxlate", author, version, about, long_about = None)]
struct Args {
    /// Increase log output (-v info, -vv debug); overrides RUST_LOG
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Config file to read service settings from [default: ./resxlate.toml if present]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    commands: Commands,
}

/// Translator service connection flags.
#[derive(clap::Args, Debug, Default)]
struct ServiceArgs {
    /// Subscription key
    #[arg(long, env = KEY_ENV, hide_env_values = true)]
    key: Option<String>,

    /// Subscription region
    #[arg(long, env = REGION_ENV)]
    region: Option<String>,

    /// Service endpoint (absolute https URL)
    #[arg(long, env = ENDPOINT_ENV)]
    endpoint: Option<String>,
}

impl From<ServiceArgs> for ServiceOverrides {
    fn from(args: ServiceArgs) -> Self {
        Self {
            key: args.key,
            region: args.region,
            endpoint: args.endpoint,
        }
    }
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a .resx file into another language.
    Translate {
        /// The .resx file to translate
        #[arg(short, long)]
        input: String,

        /// Where to write the translated .resx file
        #[arg(short, long)]
        output: String,

        /// Source language code (e.g. en)
        #[arg(long)]
        from: String,

        /// Target language code (e.g. fr)
        #[arg(long)]
        to: String,

        /// How to build the output file: tree or template
        #[arg(long, default_value = "template")]
        strategy: String,

        #[command(flatten)]
        service: ServiceArgs,
    },

    /// List the languages the service can translate into.
    Languages {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        service: ServiceArgs,
    },

    /// Check that a .resx file parses and declares version 2.0.
    Validate {
        /// The .resx file to check
        #[arg(short, long)]
        input: String,
    },

    /// View the records of a .resx file.
    View {
        /// The .resx file to view
        #[arg(short, long)]
        input: String,

        /// Display full value without truncation
        #[arg(long)]
        full: bool,
    },

    /// Generate shell completions.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<(), String> {
    match args.commands {
        Commands::Translate {
            input,
            output,
            from,
            to,
            strategy,
            service,
        } => {
            let mut context = ValidationContext::new()
                .with_input_file(input.clone())
                .with_output_file(output.clone())
                .with_languages(from.clone(), to.clone())
                .with_strategy(strategy.clone());
            if let Some(endpoint) = &service.endpoint {
                context = context.with_endpoint(endpoint.clone());
            }
            validate_context(&context)?;

            let file = FileConfig::load(args.config.as_deref())?;
            let config = resolve_service_config(&service.into(), &file);
            debug!(?config, "resolved service config");
            config.validate().map_err(|e| e.to_string())?;

            let strategy = strategy
                .parse::<RenderStrategy>()
                .map_err(|e| e.to_string())?;
            let job = TranslationJob::new(from, to).with_strategy(strategy);

            let transport = ReqwestTransport::new(&config).map_err(|e| e.to_string())?;
            let translator = Translator::new(Arc::new(transport), config);

            let report = runtime()?
                .block_on(translate_file(&input, &output, &job, &translator))
                .map_err(|e| e.to_string())?;
            println!(
                "✅ Translated {} record(s) from {} to {}: {}",
                report.records,
                job.source_language,
                job.target_language,
                report.output.display()
            );
            Ok(())
        }
        Commands::Languages { json, service } => {
            let file = FileConfig::load(args.config.as_deref())?;
            let config = resolve_service_config(&service.into(), &file);
            config.endpoint_url().map_err(|e| e.to_string())?;

            let transport = ReqwestTransport::new(&config).map_err(|e| e.to_string())?;
            let catalog = runtime()?
                .block_on(fetch_languages(&transport, &config))
                .or_builtin();
            print_languages(&catalog, json)
        }
        Commands::Validate { input } => {
            let document = read_document(&input)?;
            validate_version(&document).map_err(|e| e.to_string())?;
            println!(
                "✅ {} is a valid resx 2.0 file: {} record(s), {} translatable",
                input,
                document.records().count(),
                translatable_records(&document).count()
            );
            Ok(())
        }
        Commands::View { input, full } => {
            let document = read_document(&input)?;
            print_view(&document, full);
            Ok(())
        }
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Args::command(),
                "resxlate",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}

fn read_document(input: &str) -> Result<Document, String> {
    validate_file_path(input)?;
    Document::read_from(input).map_err(|e| e.to_string())
}

fn runtime() -> Result<tokio::runtime::Runtime, String> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Cannot start async runtime: {}", e))
}
