//! Medicines inventory CLI.

use std::io::{self, IsTerminal, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;
use medicines_client::cli::{Cli, Command, MedicineArgs};
use medicines_client::shell::{ask, run_shell};
use medicines_client::{init_logging, ClientConfig, HttpApi, LogConfig, Session};
use medicines_core::{ListView, NotificationKind, SubmitRejected};

fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig::from_verbosity(cli.verbose)
        .with_format(cli.log_format.into())
        .with_ansi(io::stderr().is_terminal());
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    if let Err(error) = run(cli) {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = ClientConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(url) = cli.base_url {
        config = config.with_base_url(url)?;
    }

    let api = HttpApi::new(config.clone()).context("building HTTP client")?;
    let mut session = Session::new(api, &config);

    match cli.command {
        Command::List { html } => {
            let view = session.refresh();
            if html {
                println!("{}", view.to_html());
            } else {
                print!("{}", view.to_text());
            }
            if let ListView::Failed { message, .. } = view {
                bail!("{}", message);
            }
            Ok(())
        }
        Command::Add(fields) => submit(&mut session, fields),
        Command::Update { original, fields } => {
            if !session.edit(&original) {
                report(&session)?;
                bail!("no medicine named '{}'", original);
            }
            submit(&mut session, fields)
        }
        Command::Delete { name, yes } => {
            let sent = session.delete(&name, |prompt| {
                yes || ask(&mut io::stdin().lock(), &mut io::stdout(), prompt).unwrap_or(false)
            });
            if !sent {
                println!("Delete cancelled.");
                return Ok(());
            }
            report(&session)
        }
        Command::Average => {
            println!("{}", session.fetch_average());
            Ok(())
        }
        Command::Shell => {
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            run_shell(&mut session, stdin.lock(), &mut stdout).context("shell I/O")?;
            stdout.flush()?;
            Ok(())
        }
    }
}

fn submit(session: &mut Session<HttpApi>, fields: MedicineArgs) -> Result<()> {
    session.set_name(fields.name);
    session.set_price(fields.price);
    match session.submit() {
        Ok(()) => report(session),
        Err(SubmitRejected::Invalid(errors)) => bail!("{}", errors),
        Err(rejected) => bail!("{}", rejected),
    }
}

/// Print the notification left by the last action; fail if it was an error.
fn report(session: &Session<HttpApi>) -> Result<()> {
    let Some(notification) = session.notification() else {
        return Ok(());
    };
    if notification.kind == NotificationKind::Error {
        bail!("{}", notification.message);
    }
    println!("{}", notification.message);
    if let ListView::Loaded(list) = session.list() {
        if let Some(summary) = list.summary() {
            println!("{} medicines, {}% clean", summary.total, summary.percentage);
        }
    }
    Ok(())
}
