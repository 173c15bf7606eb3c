use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;
use std::str::FromStr;

use matrix_calc::math::ops;
use matrix_calc::Operation;
use matrix_calc_cli::grid::{parse_grid, render_state};
use matrix_calc_cli::session::{run_session, SessionConfig};

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or(
            "MATCALC_LOG",
            "error,matcalc=info,matrix_calc=info,matrix_calc_cli=info",
        ))
        .init();

    let matches = Command::new("matcalc")
        .version(clap::crate_version!())
        .about("Matrix calculator: add, subtract, multiply and invert small square matrices")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("session")
                .about("Replay a JSON session of calculator form events")
                .arg(
                    Arg::new("config")
                        .help("Path to the session file. Prints a template when omitted.")
                        .required(false)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the session report as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("compute")
                .about("Apply one operation to inline matrices")
                .arg(
                    Arg::new("operation")
                        .long("op")
                        .help("Operation to run")
                        .required(true)
                        .value_parser(["add", "subtract", "multiply", "inverse"])
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("a")
                        .short('a')
                        .long("a")
                        .help("First matrix, rows separated by ';' and values by ',' (e.g. \"1,2;3,4\")")
                        .required(true)
                        .allow_hyphen_values(true)
                        .value_parser(clap::builder::NonEmptyStringValueParser::new()),
                )
                .arg(
                    Arg::new("b")
                        .short('b')
                        .long("b")
                        .help("Second matrix. Required for every operation except inverse.")
                        .allow_hyphen_values(true)
                        .value_parser(clap::builder::NonEmptyStringValueParser::new()),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the result as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    match matches.subcommand() {
        Some(("session", sub_m)) => handle_session(sub_m),
        Some(("compute", sub_m)) => handle_compute(sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn handle_session(matches: &ArgMatches) -> Result<()> {
    let Some(config_path) = matches.get_one::<PathBuf>("config") else {
        eprintln!("[matcalc::session] No config file provided; printing a template session.");
        println!("{}", serde_json::to_string_pretty(&SessionConfig::template())?);
        return Ok(());
    };

    log::info!("[matcalc::session] Replaying session: {:?}", config_path);
    let config = SessionConfig::from_path(config_path)?;
    let report = run_session(&config);

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for step in &report.steps {
        match (&step.result, &step.error) {
            (_, Some(error)) => {
                eprintln!("[step {}] {} error: {}", step.step, step.event, error)
            }
            (Some(result), None) => {
                println!("[step {}] {}:\n{}", step.step, step.operation, result)
            }
            (None, None) => {}
        }
    }
    print!("{}", render_state(&report.final_state)?);
    Ok(())
}

fn handle_compute(matches: &ArgMatches) -> Result<()> {
    let op_name: &String = matches
        .get_one("operation")
        .ok_or_else(|| anyhow::anyhow!("--op is required"))?;
    let operation = Operation::from_str(op_name)?;

    let a_text: &String = matches
        .get_one("a")
        .ok_or_else(|| anyhow::anyhow!("--a is required"))?;
    let a = parse_grid(a_text)?;
    let b = match matches.get_one::<String>("b") {
        Some(text) => parse_grid(text)?,
        None if operation.is_binary() => {
            anyhow::bail!("{} needs a second matrix (--b)", operation)
        }
        None => a.clone(),
    };

    match ops::apply(operation, &a, &b) {
        Ok(result) => {
            if matches.get_flag("json") {
                println!("{}", serde_json::to_string(&result)?);
            } else {
                println!("{}", result);
            }
            Ok(())
        }
        Err(e) => {
            log::debug!("{} failed on {:?} and {:?}", operation, a.shape(), b.shape());
            eprintln!("error: {}", e);
            std::process::exit(1)
        }
    }
}
