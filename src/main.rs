use std::path::PathBuf;

use anyhow::{anyhow, Result};
use dotenv::dotenv;
use env_logger::Env;

use aq_extract::argsets::ExtractArgs;
use aq_extract::command;
use aq_extract::constants::{defaults, envvars};

const CMD_EXTRACT: &str = "extract";

const ARG_CONFIG: [&str; 2] = ["-c", "--config"];
const ARG_OUTPUT: [&str; 2] = ["-o", "--output"];

fn main() -> Result<()> {
    let _ = dotenv();
    env_logger::Builder::from_env(Env::default().filter_or(envvars::LOG_LEVEL, defaults::LOG_LEVEL))
        .init();

    let mut args = pico_args::Arguments::from_env();
    match args.subcommand()?.as_deref() {
        None | Some(CMD_EXTRACT) => {
            let extract_args = ExtractArgs {
                config: args
                    .opt_value_from_str(ARG_CONFIG)?
                    .unwrap_or_else(|| PathBuf::from(defaults::CONFIG_FILE)),
                output: args.opt_value_from_str(ARG_OUTPUT)?,
            };
            let remaining = args.finish();
            if !remaining.is_empty() {
                return Err(anyhow!("Unexpected arguments: {:?}", remaining));
            }
            command::extract(extract_args)
        }
        Some(other) => Err(anyhow!(
            "Unknown subcommand '{other}'; subcommand must be 'extract' (or omitted)"
        )),
    }
}
