// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{debug, info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tikkun::app_config::{Config, LogLevel};
use tikkun::file_utils::FileManager;
use tikkun::numerals;
use tikkun::session::{ReaderCommand, ReaderSession, ReaderView, ReadingScope};
use tikkun::text::document::{Document, Manifest, Tradition};
use tikkun::text::pagination::PageUnit;
use tikkun::text::practice;
use tikkun::text::tokenizer::Token;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for PageUnit to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliPageUnit {
    Tokens,
    Words,
}

impl From<CliPageUnit> for PageUnit {
    fn from(cli_unit: CliPageUnit) -> Self {
        match cli_unit {
            CliPageUnit::Tokens => PageUnit::Tokens,
            CliPageUnit::Words => PageUnit::Words,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show a page of a reading document
    Read(ReadArgs),

    /// Convert numbers to traditional numerals, or back with --decode
    Numeral {
        /// Numbers (or numerals with --decode)
        #[arg(required = true)]
        values: Vec<String>,

        /// Decode numerals instead of encoding numbers
        #[arg(short, long)]
        decode: bool,
    },

    /// Derive practice script from fully marked text
    Practice {
        /// Text to convert; read from stdin when neither TEXT nor --file is given
        text: Option<String>,

        /// Read the text from a file
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,
    },

    /// List the books and readings available in the data directory
    List {
        /// Only list readings of this book
        #[arg(short, long)]
        book: Option<String>,
    },

    /// Generate shell completions for tikkun
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ReadArgs {
    /// Document file, or a document id looked up in the data directory
    #[arg(value_name = "DOCUMENT")]
    document: PathBuf,

    /// Tradition to read (standard, yemenite)
    #[arg(short, long, value_parser = parse_tradition)]
    tradition: Option<Tradition>,

    /// Page to show, starting at 1
    #[arg(short, long)]
    page: Option<usize>,

    /// Page size in the chosen unit
    #[arg(short = 's', long)]
    page_size: Option<usize>,

    /// Count page size in tokens or in words
    #[arg(short, long, value_enum)]
    unit: Option<CliPageUnit>,

    /// Read only this verse group, starting at 1
    #[arg(short, long)]
    group: Option<usize>,

    /// Leave out group markers
    #[arg(long)]
    no_boundaries: bool,

    /// Show the marked source word next to each word
    #[arg(long)]
    hints: bool,

    /// Print every page instead of one
    #[arg(short, long, conflicts_with = "page")]
    all: bool,

    /// Print the page view as JSON
    #[arg(long)]
    json: bool,
}

/// tikkun - reading practice for scripture portions
///
/// Shows reading documents in practice script, page by page, with the fully
/// marked source word available as a hint.
#[derive(Parser, Debug)]
#[command(name = "tikkun")]
#[command(version)]
#[command(about = "Reading practice for scripture portions")]
#[command(long_about = "tikkun shows reading documents in practice script, page by page.

EXAMPLES:
    tikkun read noach                          # First page of data_dir/noach.json
    tikkun read noach -t yemenite -p 3         # Third page in the Yemenite tradition
    tikkun read noach -g 2 --hints             # Second verse group with source hints
    tikkun read noach -s 50 -u words --all     # Every page, 50 words per page
    tikkun numeral 15 116 248                  # טו קטז רמח
    tikkun numeral --decode קטז                # 116
    echo 'בְּרֵאשִׁ֖ית' | tikkun practice          # בראשית
    tikkun list --book Genesis                 # Readings of one book
    tikkun completions bash > tikkun.bash      # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

fn parse_tradition(value: &str) -> Result<Tradition, tikkun::TraditionError> {
    value.parse()
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour and marker for a log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "❌"),
            Level::Warn => ("\x1B[1;33m", "🚧"),
            Level::Info => ("\x1B[1;32m", " "),
            Level::Debug => ("\x1B[1;36m", "🔍"),
            Level::Trace => ("\x1B[1;35m", "📋"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let now = chrono::Local::now().format("%H:%M:%S.%3f");
        let (colour, marker) = Self::style_for_level(record.level());
        let _ = writeln!(
            std::io::stderr(),
            "{}{} {} {}\x1B[0m",
            colour,
            now,
            marker,
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Trace is the ceiling; the effective level is lowered below
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Some(level) = cli.log_level {
        log::set_max_level(LogLevel::from(level).into());
    }

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "tikkun", &mut std::io::stdout());
            Ok(())
        }
        Commands::Numeral { values, decode } => run_numeral(&values, decode),
        Commands::Practice { text, file } => run_practice(text, file),
        Commands::Read(args) => {
            let config = load_config(&cli.config_path, cli.log_level)?;
            run_read(args, &config)
        }
        Commands::List { book } => {
            let config = load_config(&cli.config_path, cli.log_level)?;
            run_list(book.as_deref(), &config)
        }
    }
}

fn load_config(config_path: &str, cli_level: Option<CliLogLevel>) -> Result<Config> {
    let mut config = Config::load_or_create(config_path)?;

    if let Some(level) = cli_level {
        config.log_level = level.into();
    }

    config
        .validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, take it from the config now
    if cli_level.is_none() {
        log::set_max_level(config.log_level.into());
    }

    Ok(config)
}

fn run_read(args: ReadArgs, config: &Config) -> Result<()> {
    let path = resolve_document_path(&args.document, config)?;
    let document =
        Document::load(&path).with_context(|| format!("Failed to load document: {:?}", path))?;

    let mut settings = config.reader_settings();
    if let Some(tradition) = args.tradition {
        settings.tradition = tradition;
    }
    if let Some(page_size) = args.page_size {
        settings.page_size = page_size;
    }
    if let Some(unit) = args.unit {
        settings.page_unit = unit.into();
    }
    if args.no_boundaries {
        settings.include_group_boundaries = false;
    }
    if args.group.is_some() {
        settings.scope = ReadingScope::SingleGroup;
    }

    let mut session = ReaderSession::open(document, settings);

    if let Some(group) = args.group {
        if group == 0 || group > session.group_count() {
            warn!(
                "Group {} is out of range (1-{}), showing the nearest",
                group,
                session.group_count()
            );
        }
        session.apply(ReaderCommand::GoToGroup(group.saturating_sub(1)));
    }

    let mut view = match args.page {
        Some(page) => session.apply(ReaderCommand::GoToPage(page.saturating_sub(1))),
        None => session.view(),
    };

    debug!(
        "Showing page {} of {} ({} tokens)",
        view.page_index() + 1,
        view.page_count,
        view.page.len()
    );

    loop {
        if args.json {
            let json = serde_json::to_string_pretty(&view).context("Failed to serialize page view")?;
            println!("{}", json);
        } else {
            print!("{}", render_view(&view, args.hints));
        }

        if !args.all || view.is_last_page {
            break;
        }
        view = session.apply(ReaderCommand::NextPage);
    }

    Ok(())
}

fn resolve_document_path(input: &Path, config: &Config) -> Result<PathBuf> {
    if FileManager::file_exists(input) {
        return Ok(input.to_path_buf());
    }

    let candidate = config.data_path().join(input).with_extension("json");
    if FileManager::file_exists(&candidate) {
        return Ok(candidate);
    }

    Err(anyhow!(
        "Document not found: {:?} (also looked for {:?})",
        input,
        candidate
    ))
}

fn render_view(view: &ReaderView, hints: bool) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{} | {} | {} | {} {}/{}\n\n",
        view.title,
        view.reference,
        view.tradition.display_name(),
        "עמוד",
        view.page_label,
        numerals::encode(view.page_count as i64)
    ));

    for token in &view.page.tokens {
        match token {
            Token::GroupBoundary { label, sublabel } => {
                out.push_str(&format!("\n[{} {}]\n", label, sublabel));
            }
            Token::Whitespace { text } => out.push_str(text),
            Token::Word {
                text,
                hint,
                citation,
            } => {
                if let Some(citation) = citation {
                    out.push_str(&format!(
                        "({}) ",
                        numerals::format_citation(citation.chapter, citation.verse)
                    ));
                }
                out.push_str(text);
                if hints && hint != text {
                    out.push_str(&format!(" ⟨{}⟩", hint));
                }
            }
        }
    }

    out.push('\n');
    out
}

fn run_numeral(values: &[String], decode: bool) -> Result<()> {
    for value in values {
        if decode {
            match numerals::decode(value) {
                Some(number) => println!("{}", number),
                None => warn!("Not a numeral: {}", value),
            }
        } else {
            let number: i64 = value
                .parse()
                .with_context(|| format!("Not a number: {}", value))?;
            println!("{}", numerals::encode(number));
        }
    }

    Ok(())
}

fn run_practice(text: Option<String>, file: Option<PathBuf>) -> Result<()> {
    let source = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) => FileManager::read_to_string(&path)?,
        (None, None) => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read text from stdin")?;
            buffer
        }
    };

    let normalized = practice::normalize_source(&source);
    println!("{}", practice::derive_practice_text(&normalized));

    Ok(())
}

fn run_list(book: Option<&str>, config: &Config) -> Result<()> {
    let data_dir = config.data_path();
    if !FileManager::dir_exists(&data_dir) {
        warn!("Data directory {:?} does not exist", data_dir);
        return Ok(());
    }

    let manifest_path = data_dir.join("manifest.json");
    if !FileManager::file_exists(&manifest_path) {
        info!("No manifest in {:?}, listing document files", data_dir);
        for path in FileManager::find_files(&data_dir, "json")? {
            if let Some(stem) = path.file_stem() {
                println!("{}", stem.to_string_lossy());
            }
        }
        return Ok(());
    }

    let json = FileManager::read_to_string(&manifest_path)?;
    let manifest = Manifest::from_json_str(&json)
        .with_context(|| format!("Failed to parse manifest: {:?}", manifest_path))?;

    let books: Vec<_> = match book {
        Some(name) => vec![manifest
            .find_book(name)
            .ok_or_else(|| anyhow!("Unknown book: {}", name))?],
        None => manifest.books.iter().collect(),
    };

    for book in books {
        println!("{} ({})", book.book, book.hebrew);
        for reading in &book.parashot {
            println!("  {:<20} {:<16} {}", reading.id, reading.display_name(), reading.reference);
        }
    }

    Ok(())
}
