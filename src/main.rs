use std::io;

use anyhow::Context;
use chess_engine::command::run_loop;
use chess_engine::Session;
use log::info;

fn main() -> anyhow::Result<()> {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).
    info!("Starting new game");
    let mut session = Session::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run_loop(&mut session, stdin.lock(), &mut stdout).context("terminal I/O failed")?;
    Ok(())
}
