use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "simc-data")]
#[command(version, about = "Decode SimulationCraft game-data dumps and scale items and spells")]
pub struct Cli {
    /// Custom cache directory
    #[arg(long, global = true, env = "SIMC_DATA_CACHE")]
    pub cache_dir: Option<PathBuf>,

    /// Upstream branch to read dumps from (use a `-ptr` branch for PTR data)
    #[arg(long, global = true, env = "SIMC_DATA_BRANCH", default_value = "shadowlands")]
    pub branch: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where a data command reads its dumps from
#[derive(Args, Debug, Clone)]
pub struct DumpArgs {
    /// Directory of raw dumps; defaults to the cached branch directory
    #[arg(short, long)]
    pub dump_dir: Option<PathBuf>,

    /// Keep decoded tables as JSON next to the dumps
    #[arg(long)]
    pub persist_parsed: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download (if changed) the raw dumps for the selected file types
    Download {
        /// Only include these file types (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        include: Option<Vec<String>>,

        /// Exclude these file types (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        exclude: Option<Vec<String>>,

        /// Ignore stored ETags
        #[arg(short, long)]
        force: bool,
    },

    /// Decode one file type and print it as JSON
    Decode {
        /// File type name, see `list-file-types`
        file_type: String,

        #[command(flatten)]
        dumps: DumpArgs,
    },

    /// Build an item from a profile line such as `trinket1=,id=178769,bonus_id=6536`
    Item {
        line: String,

        #[command(flatten)]
        dumps: DumpArgs,
    },

    /// Build a spell scaled by an item's level, quality and slot
    ItemSpell {
        spell_id: u32,

        #[arg(long)]
        item_level: i32,

        /// Raw item quality (4 = epic)
        #[arg(long, default_value_t = 4)]
        quality: i32,

        /// Raw inventory type (12 = trinket)
        #[arg(long, default_value_t = 12)]
        inventory_type: i32,

        #[command(flatten)]
        dumps: DumpArgs,
    },

    /// Build a spell scaled by player level
    PlayerSpell {
        spell_id: u32,

        #[arg(long, default_value_t = 60)]
        level: u32,

        #[command(flatten)]
        dumps: DumpArgs,
    },

    /// Resolve a conduit id to its spell and build it
    Conduit {
        conduit_id: u32,

        #[arg(long, default_value_t = 60)]
        level: u32,

        #[command(flatten)]
        dumps: DumpArgs,
    },

    /// List all file type names
    ListFileTypes,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
