use std::io;

use clap::Parser;
use futures::channel::mpsc;

use skw_gauth::now_unix_seconds;
use skw_gauth_cli::{
    commands, credentials::load_credentials, env::EnvironmentVar, listing::ListingEventLoop,
    ClapArgs, CliError, Operation,
};

async fn run(operation: Operation) -> Result<(), CliError> {
    let mut stdout = io::stdout();

    match operation {
        Operation::Create { user, domain } => commands::create(&mut stdout, &user, &domain),
        Operation::Verify { secret, code, window, counter } => {
            commands::verify(&mut stdout, &secret, &code, window, counter, now_unix_seconds())
                .map(|_| ())
        },
        Operation::Display { secret, counter } => {
            commands::display(&mut stdout, &secret, counter, now_unix_seconds())
        },
        Operation::List { path, continuous } => {
            let env = EnvironmentVar::load();
            let credentials = load_credentials(&path)?
                .into_iter()
                .map(|(_, credential)| credential)
                .collect();

            // Nothing is sent here: Ctrl+C ends the process and the loop with it.
            // Holding the sender keeps the receiver from terminating.
            let (_termination_sender, termination_receiver) = mpsc::channel(0);
            ListingEventLoop::new(credentials, env.table_style, termination_receiver)
                .continuous(continuous)
                .run(|frame| println!("{}", frame))
                .await;
            Ok(())
        },
    }
}

#[async_std::main]
async fn main() {
    // --- Initialize environmental variables and settings ---
    dotenv::dotenv().ok();
    pretty_env_logger::init();

    let result = match ClapArgs::parse().operation() {
        Ok(operation) => run(operation).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        log::debug!("gauth failed: {:?}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
