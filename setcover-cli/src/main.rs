mod cli;
mod dispatch;
mod log;
mod output;

use clap::Parser;
use cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion
            {
                e.exit();
            }
            eprint!("{e}");
            // Exit code 1 on bad CLI usage, per the documented interface
            // (clap's own default usage-error code is 2).
            std::process::exit(1);
        }
    };

    dispatch::run(cli)
}
