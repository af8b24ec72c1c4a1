//! YamlDB CLI Client
//!
//! Interactive client: reads commands from stdin, keeps the current
//! database, and prints the server's answers.

use std::io::{self, BufRead, Write};

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};
use yamldb::network::{Client, Prepared, Session};

/// YamlDB CLI
#[derive(Parser, Debug)]
#[command(name = "yamldb-cli")]
#[command(about = "CLI for the YamlDB tabular store")]
#[command(version)]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:7999")]
    server: String,

    /// Run these commands instead of reading stdin (repeatable)
    #[arg(short = 'e', long = "execute")]
    execute: Vec<String>,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let args = Args::parse();

    let mut client = match Client::connect(&args.server) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to get connection: ({})", e);
            std::process::exit(1);
        }
    };
    let mut session = Session::new();

    if !args.execute.is_empty() {
        for line in &args.execute {
            if !run_line(&mut client, &mut session, line) {
                std::process::exit(1);
            }
        }
        return;
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    loop {
        print!("Text to send: ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("Cannot read: ({})", e);
                continue;
            }
        }

        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
            break;
        }
        if !run_line(&mut client, &mut session, trimmed) {
            break;
        }
    }
}

/// Returns false when the connection is no longer usable
fn run_line(client: &mut Client, session: &mut Session, line: &str) -> bool {
    let command = match session.prepare(line) {
        Prepared::Send(command) => command,
        Prepared::Local(message) => {
            println!("{}", message);
            return true;
        }
    };

    match client.send(&command) {
        Ok(response) => {
            match session.observe(&command, &response) {
                Some(message) => println!("{}", message),
                None => println!("{}", response),
            }
            true
        }
        Err(e) => {
            eprintln!("Lost connection to server: {}", e);
            false
        }
    }
}
