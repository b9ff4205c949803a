#![deny(
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications
)]

//! Local Certificate Check

use std::process;

use clap::Parser;
use lcc::{CheckResult, CheckResultJSON, CheckState, Checker};
use log::debug;

use crate::cert::CertificateInfo;
use crate::opts::Opts;

mod cert;
mod opts;

fn main() {
    let opts: Opts = Opts::parse();

    let level = if opts.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    pretty_env_logger::formatted_builder()
        .filter_level(level)
        .init();

    let checker = Checker::default();
    match run(&opts, &checker) {
        Ok(result) => {
            if opts.json {
                let json = CheckResultJSON::new(&result);
                println!("{}", serde_json::to_string(&json).unwrap_or_default());
            } else {
                println!("{result}");
            }
            process::exit(result.state.exit_code());
        }
        Err(e) => {
            println!("{e}");
            process::exit(CheckState::Unknown.exit_code());
        }
    }
}

fn run(opts: &Opts, checker: &Checker) -> anyhow::Result<CheckResult> {
    let params = opts.check_params()?;
    let source = opts.file.display().to_string();
    let cert = CertificateInfo::load(&opts.file)?;
    debug!("loaded certificate {cert:?} from {source}");
    Ok(checker.check(&source, &cert, &params))
}
