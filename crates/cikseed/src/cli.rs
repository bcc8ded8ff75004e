use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Sets the level of tracing.
    ///
    /// Without one, progress is shown as banners and progress bars instead.
    #[arg(short, long, global = true)]
    pub trace: Option<TraceLevel>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the schema, then collect and insert every company (the full seeding run).
    Seed(SourceArgs),

    /// Collect and insert companies into an existing schema.
    Ingest(SourceArgs),

    /// Create the schema and seed the statement headers, nothing else.
    Schema,
}

#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Where the CIKs come from.
    #[arg(short, long, value_enum, default_value_t = Source::Static)]
    pub source: Source,

    /// Process a CIK once per occurrence, rather than once overall.
    #[arg(long)]
    pub keep_duplicates: bool,

    /// How CIKs are read from the cells of the constituents table.
    #[arg(long, value_enum, default_value_t = Extraction::Structured)]
    pub extraction: Extraction,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
#[clap(rename_all = "UPPERCASE")]
pub enum TraceLevel {
    DEBUG,
    ERROR,
    INFO,
    TRACE,
    WARN,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Source {
    /// The built-in S&P 500 CIK list.
    Static,

    /// The S&P 500 constituents table on Wikipedia.
    Scrape,

    /// The built-in list followed by the scraped table.
    All,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Extraction {
    /// Cell text, or a `CIK=` link parameter.
    Structured,

    /// Fixed character offsets of the serialized cell.
    Positional,
}
