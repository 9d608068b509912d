mod app;
mod context;
mod commands;
mod formatters;
mod utils;

use anyhow::Result;

fn main() -> Result<()> {
    app::run()
}
