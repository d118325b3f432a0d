use std::path::PathBuf;
use std::process;
use std::str::FromStr;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use zabuni::pipeline::{DEFAULT_CONCURRENCY, Pipeline};
use zabuni::ranking::{FileRanking, RankingSource, StaticRanking};
use zabuni::resolver::DirectoryResolver;
use zabuni::scraper::ContactScraper;
use zabuni::tenders::NullTenderSource;
use zabuni::types::ContactChannel;
use zabuni::utils::{RecordFilter, RecordStats};

#[derive(Parser)]
#[command(name = "zabuni")]
#[command(about = "A company prospecting and tender tracking pipeline", long_about = None)]
struct Cli {
    #[arg(
        short = 'l',
        long = "log-level",
        value_enum,
        default_value = "info",
        global = true,
        help = "Set the logging level"
    )]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline: ranking, contact sweep and tender lookup
    Run {
        #[arg(long, default_value_t = 20, help = "Number of top-ranked companies to process")]
        top: usize,

        #[arg(
            long,
            default_value_t = DEFAULT_CONCURRENCY,
            help = "Maximum number of companies enriched in parallel"
        )]
        concurrency: usize,

        #[arg(
            long,
            value_name = "FILE",
            help = "Load the company ranking from a JSON file instead of the built-in table"
        )]
        seed: Option<PathBuf>,

        #[arg(
            long,
            value_parser = parse_channel,
            help = "Keep only records with the given contact channel"
        )]
        require: Option<ContactChannel>,

        #[arg(long, help = "Maximum number of records to emit")]
        limit: Option<usize>,

        #[arg(long, help = "Number of records to skip from the beginning")]
        offset: Option<usize>,

        #[arg(
            short = 'o',
            long = "output",
            value_enum,
            default_value = "text",
            help = "Output format"
        )]
        format: OutputFormat,
    },
    /// Print the company ranking without any enrichment
    Companies {
        #[arg(long, default_value_t = 20, help = "Number of top-ranked companies to list")]
        top: usize,

        #[arg(
            long,
            value_name = "FILE",
            help = "Load the company ranking from a JSON file instead of the built-in table"
        )]
        seed: Option<PathBuf>,

        #[arg(
            short = 'o',
            long = "output",
            value_enum,
            default_value = "text",
            help = "Output format"
        )]
        format: OutputFormat,
    },
    /// Sweep a single website for contact details
    Scrape {
        #[arg(help = "Website to sweep, e.g. https://www.safaricom.co.ke")]
        website: String,

        #[arg(
            short = 'o',
            long = "output",
            value_enum,
            default_value = "text",
            help = "Output format"
        )]
        format: OutputFormat,
    },
}

fn parse_channel(s: &str) -> Result<ContactChannel, String> {
    ContactChannel::from_str(s).map_err(|e| e.to_string())
}

fn serialize_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            log::error!("Error serializing to JSON: {}", e);
            process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.clone().into())
        .init();

    match cli.command {
        Commands::Run {
            top,
            concurrency,
            seed,
            require,
            limit,
            offset,
            format,
        } => {
            let filter = RecordFilter {
                require,
                limit,
                offset,
            };
            let filter = filter.validate().unwrap_or_else(|e| {
                log::error!("Invalid args: {e}");
                process::exit(1);
            });

            let scraper = ContactScraper::new().unwrap_or_else(|e| {
                log::error!("Error creating scraper: {}", e);
                process::exit(1);
            });

            log::info!("Running pipeline for the top {} companies...", top);

            let result = match seed {
                Some(path) => {
                    Pipeline::new(
                        FileRanking::new(path),
                        DirectoryResolver,
                        scraper,
                        NullTenderSource,
                        concurrency,
                    )
                    .run(top)
                    .await
                }
                None => {
                    Pipeline::new(
                        StaticRanking,
                        DirectoryResolver,
                        scraper,
                        NullTenderSource,
                        concurrency,
                    )
                    .run(top)
                    .await
                }
            };

            let records = result.unwrap_or_else(|e| {
                log::error!("Pipeline failed: {}", e);
                process::exit(1);
            });
            let records = filter.apply(records);

            match format {
                OutputFormat::Json => serialize_json(&records),
                OutputFormat::Text => {
                    if records.is_empty() {
                        println!("No records to display.");
                    } else {
                        for record in &records {
                            print!("{}", record);
                        }
                        print!("{}", RecordStats::from_records(&records));
                    }
                }
            }
        }

        Commands::Companies { top, seed, format } => {
            let result = match seed {
                Some(path) => FileRanking::new(path).top_companies(top),
                None => StaticRanking.top_companies(top),
            };
            let companies = result.unwrap_or_else(|e| {
                log::error!("Error loading ranking: {}", e);
                process::exit(1);
            });

            match format {
                OutputFormat::Json => serialize_json(&companies),
                OutputFormat::Text => {
                    if companies.is_empty() {
                        println!("No companies to display.");
                    } else {
                        for company in &companies {
                            println!("{}", company);
                        }
                    }
                }
            }
        }

        Commands::Scrape { website, format } => {
            let scraper = ContactScraper::new().unwrap_or_else(|e| {
                log::error!("Error creating scraper: {}", e);
                process::exit(1);
            });

            log::info!("Sweeping {} for contact details...", website);

            let details = scraper.sweep(&website).await.unwrap_or_else(|e| {
                log::error!("Error sweeping {}: {}", website, e);
                process::exit(1);
            });

            match format {
                OutputFormat::Json => serialize_json(&details),
                OutputFormat::Text => {
                    println!(
                        "Pages fetched: {} ({} failed)",
                        details.pages_scanned, details.pages_failed
                    );
                    if details.is_empty() {
                        println!("No contact details found.");
                    }
                    if !details.emails.is_empty() {
                        println!("Emails:");
                        for email in &details.emails {
                            println!("  {}", email);
                        }
                    }
                    if !details.phones.is_empty() {
                        println!("Phones:");
                        for phone in &details.phones {
                            println!("  {}", phone);
                        }
                    }
                }
            }
        }
    }
}
