use std::io::Write;

use clap::{ArgGroup, Parser};

use skw_gauth::{
    build_barcode_url, build_otpauth_uri, derive_code, derive_time_based_code, generate_secret,
    verify_counter_based, verify_time_based_at, MovingFactor, Timestamp, DEFAULT_WINDOW,
};

use crate::error::CliError;

#[derive(Parser, Debug)]
#[command(name = "gauth", version, about = "Google Authenticator compatible one-time passwords")]
#[command(group(
    ArgGroup::new("operation")
        .required(true)
        .args(["create", "verify", "display", "list"])
))]
pub struct ClapArgs {
    /// Generate a new secret and its provisioning URLs
    #[arg(short = 'c', long = "create", num_args = 0..=2, value_names = ["USER", "DOMAIN"])]
    pub create: Option<Vec<String>>,

    /// Check a code against a secret
    #[arg(short = 'v', long = "verify", num_args = 2, value_names = ["SECRET", "CODE"])]
    pub verify: Option<Vec<String>>,

    /// Print the current code of a secret
    #[arg(short = 'd', long = "display", value_name = "SECRET")]
    pub display: Option<String>,

    /// Print the codes of every credential in a file
    #[arg(short = 'l', long = "list", value_name = "FILE")]
    pub list: Option<String>,

    /// Keep refreshing the list every second
    #[arg(long = "continue", conflicts_with_all = ["create", "verify", "display"])]
    pub continuous: bool,

    /// Number of moving factors probed by --verify
    #[arg(long, default_value_t = DEFAULT_WINDOW)]
    pub window: u64,

    /// Use counter based codes, starting after this counter
    #[arg(long)]
    pub counter: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Create { user: String, domain: String },
    Verify { secret: String, code: String, window: u64, counter: Option<u64> },
    Display { secret: String, counter: Option<u64> },
    List { path: String, continuous: bool },
}

impl ClapArgs {
    pub fn operation(self) -> Result<Operation, CliError> {
        if self.continuous && self.list.is_none() {
            return Err(CliError::MissingArgument("--continue only applies to --list"));
        }

        if let Some(args) = self.create {
            let mut args = args.into_iter();
            return Ok(Operation::Create {
                user: args.next().unwrap_or_default(),
                domain: args.next().unwrap_or_default(),
            });
        }
        if let Some(args) = self.verify {
            let mut args = args.into_iter();
            let (Some(secret), Some(code)) = (args.next(), args.next()) else {
                return Err(CliError::MissingArgument("require secret and code parameters"));
            };
            return Ok(Operation::Verify { secret, code, window: self.window, counter: self.counter });
        }
        if let Some(secret) = self.display {
            return Ok(Operation::Display { secret, counter: self.counter });
        }
        if let Some(path) = self.list {
            return Ok(Operation::List { path, continuous: self.continuous });
        }

        Err(CliError::MissingArgument("require an operation"))
    }
}

pub fn create<W: Write>(out: &mut W, user: &str, domain: &str) -> Result<(), CliError> {
    let secret = generate_secret()?;

    writeln!(out, "secret: {}", secret)?;
    writeln!(out, "url: {}", build_otpauth_uri(user, domain, secret.as_str()))?;
    writeln!(out, "barcode: {}", build_barcode_url(user, domain, secret.as_str()))?;
    Ok(())
}

/// Time based unless `counter` is given. Returns whether the code matched.
pub fn verify<W: Write>(
    out: &mut W,
    secret: &str,
    code: &str,
    window: u64,
    counter: Option<u64>,
    now: Timestamp,
) -> Result<bool, CliError> {
    let matched = match counter {
        Some(counter) => verify_counter_based(secret, code, counter, window)?,
        None => verify_time_based_at(secret, code, window, now)?
            .map(|step| step as u64),
    };

    match matched {
        Some(moving_factor) => {
            log::debug!("verified at moving factor {}", moving_factor);
            writeln!(out, "verification succeeded")?;
        },
        None => writeln!(out, "verification failed")?,
    }
    Ok(matched.is_some())
}

pub fn display<W: Write>(
    out: &mut W,
    secret: &str,
    counter: Option<u64>,
    now: Timestamp,
) -> Result<(), CliError> {
    let code = match counter {
        Some(counter) => derive_code(secret, MovingFactor(counter))?,
        None => derive_time_based_code(secret, now)?,
    };

    writeln!(out, "{}", code)?;
    Ok(())
}
