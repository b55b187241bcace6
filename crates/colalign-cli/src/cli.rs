//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use colalign::{
    AlignConfig, AlignerConfig, AlignmentPolicy, ColumnKind, IngestConfig, KindPolicy,
    NumericMethod, ParserConfig, ProfileConfig, ScorerConfig,
};

/// colalign: match columns across tables by content
#[derive(Parser)]
#[command(name = "colalign")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the JSON profile of every column in a table
    Profile {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        load: LoadArgs,

        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the similarity matrix of two tables
    Matrix {
        #[arg(value_name = "LEFT")]
        left: PathBuf,

        #[arg(value_name = "RIGHT")]
        right: PathBuf,

        #[command(flatten)]
        load: LoadArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Align the columns of two tables
    Align {
        #[arg(value_name = "LEFT")]
        left: PathBuf,

        #[arg(value_name = "RIGHT")]
        right: PathBuf,

        #[command(flatten)]
        load: LoadArgs,

        #[command(flatten)]
        select: SelectArgs,

        /// Write the full JSON report to this path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the full JSON report
        #[arg(long)]
        json: bool,
    },

    /// Align each table with the next one in the list
    Chain {
        /// Two or more data files, in order
        #[arg(value_name = "FILES", num_args = 2.., required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        load: LoadArgs,

        #[command(flatten)]
        select: SelectArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Options for loading and scoring tables.
#[derive(Args, Clone, Debug)]
pub struct LoadArgs {
    /// Field delimiter (default: auto-detect)
    #[arg(short, long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,

    /// Rows to skip before the header row
    #[arg(long, default_value = "0")]
    pub skip_rows: usize,

    /// Treat the first row as data and generate column names
    #[arg(long)]
    pub no_header: bool,

    /// Only read this many data rows
    #[arg(long)]
    pub max_rows: Option<usize>,

    /// Infer numeric columns only when every cell is numeric
    #[arg(long)]
    pub strict: bool,

    /// Fix a column's kind, e.g. `zip=text` or `amount=numeric` (repeatable)
    #[arg(long = "declare", value_name = "COLUMN=KIND", value_parser = parse_declaration)]
    pub declared: Vec<(String, ColumnKind)>,

    /// Number of top tokens kept in text profiles
    #[arg(long, default_value = "8")]
    pub top_k: usize,

    /// Numeric similarity method
    #[arg(long, default_value = "distance")]
    pub numeric: NumericChoice,
}

/// Options for selecting an alignment.
#[derive(Args, Clone, Debug)]
pub struct SelectArgs {
    /// Alignment policy
    #[arg(short, long, default_value = "greedy")]
    pub policy: PolicyChoice,

    /// Scores at or below this never match
    #[arg(long, default_value = "0.0")]
    pub min_score: f64,
}

impl LoadArgs {
    pub fn to_config(&self) -> AlignerConfig {
        let mut ingest = IngestConfig::default().with_policy(if self.strict {
            KindPolicy::Strict
        } else {
            KindPolicy::Majority
        });
        for (column, kind) in &self.declared {
            ingest = ingest.declare(column.clone(), *kind);
        }

        AlignerConfig {
            parser: ParserConfig {
                delimiter: self.delimiter,
                has_header: !self.no_header,
                skip_rows: self.skip_rows,
                max_rows: self.max_rows,
                ..ParserConfig::default()
            },
            ingest,
            profile: ProfileConfig { top_k: self.top_k },
            scorer: ScorerConfig {
                numeric: self.numeric.into(),
                ..ScorerConfig::default()
            },
            alignment: AlignConfig::default(),
        }
    }
}

impl SelectArgs {
    pub fn to_config(&self) -> AlignConfig {
        AlignConfig {
            policy: self.policy.into(),
            min_score: self.min_score,
        }
    }
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "tab" | "\\t" => Ok(b'\t'),
        "comma" => Ok(b','),
        "semicolon" => Ok(b';'),
        "pipe" => Ok(b'|'),
        _ => {
            let mut bytes = s.bytes();
            match (bytes.next(), bytes.next()) {
                (Some(b), None) if b.is_ascii() => Ok(b),
                _ => Err(format!(
                    "Invalid delimiter: {}. Use a single ASCII character or tab/comma/semicolon/pipe.",
                    s
                )),
            }
        }
    }
}

fn parse_declaration(s: &str) -> Result<(String, ColumnKind), String> {
    let (column, kind) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("Expected COLUMN=KIND, got: {}", s))?;
    let kind = match kind.trim().to_lowercase().as_str() {
        "text" | "string" => ColumnKind::Text,
        "numeric" | "number" => ColumnKind::Numeric,
        other => return Err(format!("Unknown kind: {}. Use text or numeric.", other)),
    };
    Ok((column.to_string(), kind))
}

/// Numeric similarity method choice
#[derive(Clone, Copy, Debug, Default)]
pub enum NumericChoice {
    /// Relative difference of the seven statistics
    #[default]
    Distance,
    /// Pairwise z-score ranking
    Zscore,
}

impl std::str::FromStr for NumericChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "distance" | "statistic-distance" => Ok(NumericChoice::Distance),
            "zscore" | "z-score" | "pairwise-zscore" => Ok(NumericChoice::Zscore),
            _ => Err(format!("Unknown numeric method: {}. Use distance or zscore.", s)),
        }
    }
}

impl std::fmt::Display for NumericChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumericChoice::Distance => write!(f, "distance"),
            NumericChoice::Zscore => write!(f, "zscore"),
        }
    }
}

impl From<NumericChoice> for NumericMethod {
    fn from(choice: NumericChoice) -> Self {
        match choice {
            NumericChoice::Distance => NumericMethod::StatisticDistance,
            NumericChoice::Zscore => NumericMethod::PairwiseZScore,
        }
    }
}

/// Alignment policy choice
#[derive(Clone, Copy, Debug, Default)]
pub enum PolicyChoice {
    /// Highest score first, one-to-one
    #[default]
    Greedy,
    /// Maximum total score, one-to-one
    Optimal,
    /// Best column per row, columns may repeat
    BestPerRow,
}

impl std::str::FromStr for PolicyChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "greedy" => Ok(PolicyChoice::Greedy),
            "optimal" | "hungarian" => Ok(PolicyChoice::Optimal),
            "best-per-row" | "best" => Ok(PolicyChoice::BestPerRow),
            _ => Err(format!(
                "Unknown policy: {}. Use greedy, optimal, or best-per-row.",
                s
            )),
        }
    }
}

impl std::fmt::Display for PolicyChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyChoice::Greedy => write!(f, "greedy"),
            PolicyChoice::Optimal => write!(f, "optimal"),
            PolicyChoice::BestPerRow => write!(f, "best-per-row"),
        }
    }
}

impl From<PolicyChoice> for AlignmentPolicy {
    fn from(choice: PolicyChoice) -> Self {
        match choice {
            PolicyChoice::Greedy => AlignmentPolicy::Greedy,
            PolicyChoice::Optimal => AlignmentPolicy::Optimal,
            PolicyChoice::BestPerRow => AlignmentPolicy::BestPerRow,
        }
    }
}
