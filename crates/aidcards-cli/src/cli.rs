use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "aidcards",
    about = "aidcards: convert the policy-card workbook to JSON collections and validate them",
    version
)]
pub struct Cli {
    /// TOML config file (default: ./aidcards.toml when present)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert the workbook's PolicyCards and Evidence sheets into JSON collections
    Convert {
        /// Path to the .xlsx workbook
        workbook: Option<String>,

        /// Output data directory
        #[arg(long)]
        out: Option<String>,
    },

    /// Validate the JSON collections in a data directory
    Validate {
        /// Data directory holding the collection files
        #[arg(long)]
        data_dir: Option<String>,

        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert, then validate the freshly written collections
    Build {
        /// Path to the .xlsx workbook
        workbook: Option<String>,

        /// Output data directory
        #[arg(long)]
        out: Option<String>,

        /// Output the validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summarize the collections in a data directory
    Summary {
        /// Data directory holding the collection files
        #[arg(long)]
        data_dir: Option<String>,

        /// Restrict card counts to one province slug (nationwide cards included)
        #[arg(long)]
        province: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List policy cards matching the given criteria
    List {
        /// Data directory holding the collection files
        #[arg(long)]
        data_dir: Option<String>,

        /// Case-insensitive text in the title, short title or tags
        #[arg(long)]
        search: Option<String>,

        /// Province slug (nationwide cards included)
        #[arg(long)]
        province: Option<String>,

        /// Stage the card applies to
        #[arg(long)]
        stage: Option<String>,

        /// Cost kind the benefit covers
        #[arg(long)]
        coverage: Option<String>,

        #[arg(long)]
        category: Option<String>,

        /// Whether a financial-hardship assessment is required (true/false)
        #[arg(long)]
        assessment: Option<bool>,

        #[arg(long)]
        education_level: Option<String>,

        #[arg(long)]
        level: Option<String>,

        #[arg(long)]
        status: Option<String>,

        /// Ordering; repeat to break ties
        #[arg(long, value_enum)]
        sort: Vec<SortArg>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a stage-grouped action plan
    Plan {
        /// Restrict the plan to these card ids
        card_ids: Vec<String>,

        /// Data directory holding the collection files
        #[arg(long)]
        data_dir: Option<String>,

        /// Province slug (nationwide cards included)
        #[arg(long)]
        province: Option<String>,

        /// Stage the student is in
        #[arg(long)]
        stage: Option<String>,

        /// Cost kind of concern
        #[arg(long)]
        coverage: Option<String>,
    },

    /// Print one policy card as JSON
    Show {
        /// Card identifier
        card_id: String,

        /// Data directory holding the collection files
        #[arg(long)]
        data_dir: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SortArg {
    #[value(name = "priority")]
    Priority,
    #[value(name = "verified")]
    Verified,
    #[value(name = "category")]
    Category,
}
