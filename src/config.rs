use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::view::{MapType, Selection};
use crate::worldcup::DEFAULT_YEAR;

#[derive(Parser, Debug)]
#[command(
    name = "worldcup-map",
    about = "FIFA Soccer World Cup winners and runner-ups on a terminal world map",
    version
)]
pub struct Cli {
    /// Directory holding Natural Earth GeoJSON files
    #[arg(long, env = "WORLDCUP_MAP_DATA", default_value = "data")]
    pub data_dir: PathBuf,

    /// Map shown at startup
    #[arg(long, value_enum, default_value_t = ModeArg::Wins)]
    pub mode: ModeArg,

    /// Tournament year selected at startup
    #[arg(long, default_value_t = DEFAULT_YEAR)]
    pub year: u16,

    /// Print the resolved view as JSON and exit
    #[arg(long)]
    pub dump: bool,

    /// Write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Countries that have won a World Cup
    Wins,
    /// The winner and the runner-up by year
    Years,
}

impl From<ModeArg> for MapType {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Wins => MapType::Aggregate,
            ModeArg::Years => MapType::ByYear,
        }
    }
}

impl Cli {
    /// Selection the dashboard starts with
    pub fn selection(&self) -> Selection {
        Selection {
            map_type: self.mode.into(),
            selected_year: self.year,
        }
    }
}
