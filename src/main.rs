mod aggregate;
mod amount;
mod config;
mod models;
mod run;
mod store;
mod ui;

#[cfg(test)]
#[path = "amount_tests.rs"]
mod amount_tests;

use anyhow::Result;

use config::Settings;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (settings, rest) = Settings::load(&args)?;

    if rest.is_empty() {
        run::as_tui(&settings)
    } else {
        run::as_cli(&rest, &settings)
    }
}
