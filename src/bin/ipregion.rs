//! ipregion: resolve IPv4 addresses against an ip2region database.

use clap::{Parser, Subcommand};
use ipregion::binary::{DatabaseSource, FileSource, SuperBlock, SUPER_BLOCK_SIZE};
use ipregion::search::HeaderTable;
use ipregion::{CachedSearcher, GeoRecord, SearcherConfig, Strategy};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ipregion")]
#[command(author = "Kaitu.io")]
#[command(version = "0.1.0")]
#[command(about = "Look up IPv4 addresses in an ip2region database", long_about = None)]
struct Cli {
    /// Database file
    #[arg(short, long, default_value = "./ip2region.db", global = true)]
    db: PathBuf,

    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print records as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read "<address> [b-tree|binary|memory]" lines from stdin (default)
    Shell,

    /// Resolve addresses given on the command line
    Query {
        /// Addresses to resolve
        #[arg(required = true)]
        addresses: Vec<String>,

        /// Lookup strategy (defaults to the configured one)
        #[arg(short, long)]
        strategy: Option<Strategy>,
    },

    /// Show the database layout
    Inspect,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if !cli.db.exists() {
        eprintln!("Error: database file {:?} not found", cli.db);
        std::process::exit(1);
    }

    let result = match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => open(&cli.db, cli.config.as_deref())
            .and_then(|searcher| run_shell(&searcher, cli.json)),
        Commands::Query {
            addresses,
            strategy,
        } => open(&cli.db, cli.config.as_deref())
            .and_then(|searcher| run_query(&searcher, &addresses, strategy, cli.json)),
        Commands::Inspect => inspect(&cli.db),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn open(db: &Path, config: Option<&Path>) -> CliResult<CachedSearcher> {
    let config = match config {
        Some(path) => SearcherConfig::load(path)?,
        None => SearcherConfig::default(),
    };
    Ok(CachedSearcher::open_with_config(db, config)?)
}

fn print_record(out: &mut impl Write, record: &GeoRecord, json: bool) -> io::Result<()> {
    if json {
        let line = serde_json::to_string(record).map_err(io::Error::other)?;
        writeln!(out, "{}", line)
    } else {
        writeln!(out, "{}", record)
    }
}

fn run_query(
    searcher: &CachedSearcher,
    addresses: &[String],
    strategy: Option<Strategy>,
    json: bool,
) -> CliResult<()> {
    let strategy = strategy.unwrap_or(searcher.inner().config().default_strategy);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut failed = false;

    for address in addresses {
        match searcher.lookup(address, strategy) {
            Ok(record) => print_record(&mut out, &record, json)?,
            Err(e) => {
                eprintln!("{}: {}", address, e);
                failed = true;
            }
        }
    }

    if failed {
        return Err("some addresses could not be resolved".into());
    }
    Ok(())
}

/// One parsed line of shell input.
#[derive(Debug, PartialEq)]
enum ShellLine {
    Empty,
    Quit,
    Lookup { address: String, strategy: String },
}

fn parse_line(line: &str, default_strategy: Strategy) -> ShellLine {
    let mut fields = line.split_whitespace();
    let address = match fields.next() {
        Some(address) => address,
        None => return ShellLine::Empty,
    };
    if address.eq_ignore_ascii_case("quit") {
        return ShellLine::Quit;
    }

    let strategy = fields
        .next()
        .map(str::to_string)
        .unwrap_or_else(|| default_strategy.to_string());
    ShellLine::Lookup {
        address: address.to_string(),
        strategy,
    }
}

fn run_shell(searcher: &CachedSearcher, json: bool) -> CliResult<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    shell_loop(searcher, stdin.lock(), stdout.lock(), json)
}

/// Answer lookup lines from `input` until it ends or a `quit` line, then
/// close the searcher.
fn shell_loop<R, W>(searcher: &CachedSearcher, input: R, mut out: W, json: bool) -> CliResult<()>
where
    R: BufRead,
    W: Write,
{
    let default_strategy = searcher.inner().config().default_strategy;

    for line in input.lines() {
        let line = line?;
        match parse_line(&line, default_strategy) {
            ShellLine::Empty => continue,
            ShellLine::Quit => break,
            ShellLine::Lookup { address, strategy } => {
                let result = strategy
                    .parse::<Strategy>()
                    .and_then(|strategy| searcher.lookup(&address, strategy));
                match result {
                    Ok(record) => print_record(&mut out, &record, json)?,
                    Err(e) => writeln!(out, "{}", e)?,
                }
            }
        }
        out.flush()?;
    }

    searcher.close();
    Ok(())
}

fn inspect(db: &Path) -> CliResult<()> {
    let source = FileSource::open(db)?;
    let super_block = SuperBlock::parse(&source.read_at(0, SUPER_BLOCK_SIZE)?)?;
    super_block.validate(source.total_size())?;
    let header = HeaderTable::load(&source)?;

    println!("File size:        {} bytes", source.total_size());
    println!("First index ptr:  {}", super_block.first_index_ptr);
    println!("Last index ptr:   {}", super_block.last_index_ptr);
    println!("Index entries:    {}", super_block.total_blocks());
    println!("Header entries:   {}", header.len());
    if let (Some(first), Some(last)) = (header.entries().first(), header.entries().last()) {
        println!(
            "Header span:      {} .. {}",
            ipregion::format_ip(first.start_ip),
            ipregion::format_ip(last.start_ip)
        );
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/common/mod.rs"]
mod common;
