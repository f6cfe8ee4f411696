//! Terminal front end for the bar admin view.
//!
//! Renders the manager state after every command and maps typed commands
//! onto its mutators. `BAR_API_URL` points it at a different server for
//! manual runs.

mod command;

use std::io::{self, BufRead, Write};

use bar_core::{render, BarApi, BarManager, ClientConfig};

use command::Command;

fn ask(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    let _ = io::stdout().flush();
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim(), "y" | "Y" | "yes")
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bar_admin=info,bar_core=warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let config = match std::env::var("BAR_API_URL") {
        Ok(url) => ClientConfig::new(url),
        Err(_) => ClientConfig::default(),
    };
    tracing::info!(base_url = %config.base_url, "starting bar admin");

    let mut manager = BarManager::new(BarApi::from_config(&config));
    manager.refresh();

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        println!("\n{}", render::render(&manager));
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let command = match command::parse(&line) {
            Ok(command) => command,
            Err(msg) => {
                println!("{msg} (type `help`)");
                continue;
            }
        };
        match command {
            Command::Refresh => manager.refresh(),
            Command::New => manager.open_for_create(),
            Command::Edit(id) => match manager.bars().iter().find(|b| b.id == id).cloned() {
                Some(record) => manager.open_for_edit(&record),
                None => println!("no bar with id {id}"),
            },
            Command::Set(field, value) => {
                if manager.is_open() {
                    manager.edit_field(field, &value);
                } else {
                    println!("no dialog open");
                }
            }
            Command::Submit => manager.submit(),
            Command::Cancel => manager.cancel(),
            Command::Delete(id) => manager.delete(id, &mut ask),
            Command::Sample => manager.quick_create(),
            Command::Help => println!("{}", command::HELP),
            Command::Quit => break,
        }
    }
    Ok(())
}
