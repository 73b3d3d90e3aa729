use anyhow::Result;

use scval_core::config::{validate_config, CoreConfig, LimitsConfig};

use crate::args::{Cli, Command};

mod decode;
mod encode;
mod event;
mod functions;
mod inspect;

pub fn dispatch(cli: Cli) -> Result<()> {
    let limits = limits(&cli)?;
    match cli.command {
        Command::Functions { spec } => functions::run(&spec),
        Command::Encode { spec, function, args } => encode::run(&spec, &function, &args, limits),
        Command::Decode { spec, function, xdr } => decode::run(&spec, &function, &xdr, limits),
        Command::Inspect { xdr } => inspect::run(&xdr, limits),
        Command::Event { spec, name, topics, data } => event::run(&spec, &name, &topics, &data, limits),
    }
}

fn limits(cli: &Cli) -> Result<LimitsConfig> {
    let cfg = CoreConfig {
        limits: LimitsConfig::default().with_max_depth(cli.max_depth),
    };
    validate_config(&cfg)?;
    Ok(cfg.limits)
}
