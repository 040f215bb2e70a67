use crate::cards::CardDir;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use failure::{Error, ResultExt};
use std::path::PathBuf;
use structopt::StructOpt;

/// Settings shared by the binaries, read from the command line or the
/// environment (a `.env` file is loaded first).
#[derive(Debug, Clone, StructOpt)]
pub struct Config {
    #[structopt(short, long, env = "DATABASE_URL")]
    pub database_url: String,
    /// Root of the static assets; card scans live under `cards/fg1/`.
    #[structopt(
        long,
        env = "STATIC_ROOT",
        default_value = "static",
        parse(from_os_str)
    )]
    pub static_root: PathBuf,
}

impl Config {
    pub fn connect(&self) -> Result<PgConnection, Error> {
        Ok(PgConnection::establish(&self.database_url).context("unable to connect database")?)
    }

    pub fn cards(&self) -> CardDir {
        CardDir::new(&self.static_root)
    }
}
