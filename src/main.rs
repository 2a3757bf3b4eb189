use clap::{crate_description, crate_name, crate_version, Arg, ArgAction, ArgMatches, Command};
use std::{
    io::{self, IsTerminal},
    path::PathBuf,
};

use mkstruct::{InputSource, Policy};

fn cli() -> Command {
    Command::new(crate_name!())
        .about(crate_description!())
        .version(crate_version!())
        .arg(
            Arg::new("file")
                .help("structure file (omit to read from stdin)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("text")
                .short('t')
                .long("text")
                .help("structure given inline instead of a file")
                .conflicts_with_all(["file", "stdin"]),
        )
        .arg(
            Arg::new("stdin")
                .short('s')
                .long("stdin")
                .help("read structure from stdin")
                .action(ArgAction::SetTrue)
                .conflicts_with("file"),
        )
        .arg(
            Arg::new("directory")
                .short('C')
                .long("directory")
                .help("create the structure inside this directory instead of the current one")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("dry-run")
                .short('d')
                .long("dry-run")
                .help("show actions without creating files")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("force")
                .short('f')
                .long("force")
                .help("overwrite existing files")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
}

fn init_logging(is_verbose: bool) {
    let default_level = if is_verbose { "debug" } else { "warn" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn input_source(args: &ArgMatches) -> Result<InputSource, mkstruct::source::SourceError> {
    InputSource::resolve(
        args.get_one::<String>("text").cloned(),
        args.get_one::<PathBuf>("file").cloned(),
        args.get_flag("stdin"),
        io::stdin().is_terminal(),
    )
}

// The CLI layer should only parse inputs and forward them to library code.
fn main() -> miette::Result<()> {
    let matches = cli().get_matches();

    init_logging(matches.get_flag("verbose"));

    let source = input_source(&matches)?;

    let policy = Policy::from_flags(
        matches.get_flag("dry-run"),
        matches.get_flag("force"),
        matches.get_one::<PathBuf>("directory").map(PathBuf::as_path),
    )?;

    log::debug!("input: {:?}, policy: {:?}", source, policy);

    mkstruct::run(source, &policy)?;

    Ok(())
}
