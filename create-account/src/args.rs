//! Command-line argument parsing of the signup flow runner.

use std::{fmt::Display, path::PathBuf, process, str::FromStr};

use crate::{environment::ApiEnvironment, error::Error};

/// Parsed command-line argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    ConfigPath(PathBuf),
    Environment(ApiEnvironment),
    Product(String),
    Cancel,
    Url(String),
}

/// Parse command-line arguments, `args[0]` being the program name.
pub fn parse_args(args: Vec<String>, version: impl Display) -> Result<Vec<Arg>, Error> {
    let mut res = Vec::new();

    let app_name = args
        .first()
        .and_then(|a| std::path::Path::new(a).file_name())
        .and_then(|s| s.to_str())
        .unwrap_or("create-account-probe");

    if args.len() > 1 && (args[1] == "--version" || args[1] == "-v") {
        eprintln!("{}", version);
        process::exit(0);
    }

    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h") {
        eprintln!(
            r#"
Usage: {app_name} --product <NAME> [OPTIONS] [URL]...

Feeds each URL to the navigation policy of the registration screen and prints
the decision.

Options:
    --product <NAME>    Signup product (drive, mail, euria or a configured target)
    --conf <PATH>       Path of the configuration file
    --env <ENV>         prod, preprod or a custom deployment host
    --cancel            Press cancel once every URL was handled
    -v, --version       Display {app_name} version
    -h, --help          Print help
        "#
        );
        process::exit(0);
    }

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--conf" => {
                let path = iter.next().ok_or_else(|| missing_value(arg))?;
                res.push(Arg::ConfigPath(PathBuf::from(path)));
            }
            "--env" => {
                let env = iter.next().ok_or_else(|| missing_value(arg))?;
                res.push(Arg::Environment(
                    ApiEnvironment::from_str(env).map_err(Error::Args)?,
                ));
            }
            "--product" => {
                let product = iter.next().ok_or_else(|| missing_value(arg))?;
                res.push(Arg::Product(product.clone()));
            }
            "--cancel" => res.push(Arg::Cancel),
            a if a.starts_with("--") => {
                return Err(Error::Args(format!("unknown option {}", a)));
            }
            url => res.push(Arg::Url(url.to_string())),
        }
    }

    Ok(res)
}

/// Value of a mandatory option.
pub fn required<T>(value: Option<T>, option: &str) -> Result<T, Error> {
    value.ok_or_else(|| Error::Args(format!("missing {}", option)))
}

fn missing_value(arg: &str) -> Error {
    Error::Args(format!("missing arg to {}", arg))
}
