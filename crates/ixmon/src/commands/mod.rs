pub(crate) mod drill;
pub(crate) mod kb;
pub(crate) mod oid;
pub(crate) mod summary;

use anyhow::Result;
use ixmon_settings::Settings;

use crate::cli::Commands;

pub(crate) fn dispatch(command: Commands, settings: &Settings) -> Result<()> {
    match command {
        Commands::Summary(args) => summary::handle(args, settings),
        Commands::Drill(args) => drill::handle(args, settings),
        Commands::Kb(args) => kb::handle(args, settings),
        Commands::Oid(args) => oid::handle(args, settings),
    }
}
