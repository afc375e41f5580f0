//! Command-line interface for xsdgen

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "cli")]
use xsdgen::{resolve_source, GeneratorConfig, SchemaDownloader, SchemaTransformer};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "xsdgen")]
#[command(author, version, about = "XML Schema and WSDL data binding generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate code from schema or WSDL documents
    Generate {
        /// File, directory or URL of the source documents
        #[arg(value_name = "SOURCE")]
        source: String,

        /// Target package, e.g. api.models
        #[arg(short, long)]
        package: Option<String>,

        /// Output format
        #[arg(short, long)]
        output: Option<String>,

        /// The source is a WSDL document
        #[arg(long)]
        wsdl: bool,

        /// Print to stdout instead of writing files
        #[arg(long)]
        print: bool,

        /// Directory generated files are written to
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// OASIS XML catalog for schema locations
        #[arg(long, value_name = "CATALOG")]
        catalog: Option<PathBuf>,

        /// TOML configuration file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Log level: error, warn, info, debug, trace
        #[arg(short, long)]
        verbosity: Option<String>,
    },

    /// Download a schema or WSDL document with all its dependencies
    Download {
        /// File or URL of the source document
        #[arg(value_name = "SOURCE")]
        source: String,

        /// Target package, mirrored as a directory path
        #[arg(short, long)]
        package: String,

        /// Base directory of the mirror
        #[arg(long, value_name = "DIR", default_value = ".")]
        output_dir: PathBuf,

        /// Log level: error, warn, info, debug, trace
        #[arg(short, long)]
        verbosity: Option<String>,
    },
}

#[cfg(feature = "cli")]
fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            source,
            package,
            output,
            wsdl,
            print,
            output_dir,
            catalog,
            config,
            verbosity,
        } => {
            let level = if print { Some("error") } else { verbosity.as_deref() };
            init_logging(level);
            cmd_generate(source, package, output, wsdl, print, output_dir, catalog, config)
        }
        Commands::Download {
            source,
            package,
            output_dir,
            verbosity,
        } => {
            init_logging(verbosity.as_deref());
            cmd_download(source, package, output_dir)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
#[allow(clippy::too_many_arguments)]
fn cmd_generate(
    source: String,
    package: Option<String>,
    output: Option<String>,
    wsdl: bool,
    print: bool,
    output_dir: Option<PathBuf>,
    catalog: Option<PathBuf>,
    config_file: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match config_file {
        Some(path) => GeneratorConfig::from_file(path)?,
        None => GeneratorConfig::default(),
    };

    if let Some(package) = package {
        config = config.with_package(package);
    }
    if let Some(output) = output {
        config = config.with_output(output);
    }
    if let Some(dir) = output_dir {
        config = config.with_output_dir(dir);
    }
    if let Some(catalog) = catalog {
        config = config.with_catalog(catalog);
    }
    if wsdl {
        config = config.with_wsdl(true);
    }
    if print {
        config = config.with_print(true);
    }

    let uris = resolve_source(&source, config.wsdl)?;
    let wsdl = config.wsdl;
    let mut transformer = SchemaTransformer::new(config)?;

    if wsdl {
        let uri = uris
            .first()
            .ok_or_else(|| format!("No WSDL document found at {}", source))?;
        transformer.process_definitions(uri)?;
    } else {
        transformer.process_schemas(&uris)?;
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_download(
    source: String,
    package: String,
    output_dir: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let uris = resolve_source(&source, false)?;
    let files = SchemaDownloader::new(output_dir).process(&uris, &package)?;
    tracing::info!("Downloaded {} documents", files.len());
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
