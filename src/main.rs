use anyhow::{Context, Result};
use std::io;
use std::path::PathBuf;
use tracing::info;

use arface_db::config::Config;
use arface_db::dump::{self, DumpFormat, DumpOptions};
use arface_db::{logging, Database, Filter, ObjectQuery};

/// Arguments of the `dumplist` command
#[derive(Debug, Default, PartialEq, Eq)]
struct DumpArgs {
    directory: Option<String>,
    extension: Option<String>,
    group: Option<String>,
    protocol: Option<String>,
    purpose: Option<String>,
    session: Option<String>,
    gender: Option<String>,
    expression: Option<String>,
    illumination: Option<String>,
    occlusion: Option<String>,
    format: Option<DumpFormat>,
    self_test: bool,
}

impl DumpArgs {
    fn query(&self, config: &Config) -> ObjectQuery {
        let protocol = self
            .protocol
            .clone()
            .unwrap_or_else(|| config.dump.protocol.clone());
        ObjectQuery::new()
            .groups(Filter::from(self.group.clone()))
            .protocol(protocol.as_str())
            .purposes(Filter::from(self.purpose.clone()))
            .sessions(Filter::from(self.session.clone()))
            .genders(Filter::from(self.gender.clone()))
            .expressions(Filter::from(self.expression.clone()))
            .illuminations(Filter::from(self.illumination.clone()))
            .occlusions(Filter::from(self.occlusion.clone()))
    }

    fn options(&self, config: &Config) -> DumpOptions {
        DumpOptions {
            directory: self.directory.clone().or_else(|| config.dump.directory.clone()),
            extension: self.extension.clone().or_else(|| config.dump.extension.clone()),
            format: self.format.unwrap_or(config.dump.format),
            self_test: self.self_test,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    DumpList(DumpArgs),
}

#[derive(Debug, PartialEq, Eq)]
struct Cli {
    config_path: Option<PathBuf>,
    command: Command,
}

fn take_value(args: &[String], i: &mut usize) -> Result<String, String> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .cloned()
        .ok_or_else(|| format!("{} requires a value", flag))
}

fn parse_args(args: &[String]) -> Result<Cli, String> {
    let mut config_path = None;
    let mut dump = DumpArgs::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--version" | "-V" => {
                println!("arface {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "dumplist" => {}
            "--config" | "-c" => config_path = Some(PathBuf::from(take_value(args, &mut i)?)),
            "--directory" | "-d" => dump.directory = Some(take_value(args, &mut i)?),
            "--extension" | "-e" => dump.extension = Some(take_value(args, &mut i)?),
            "--group" | "-g" => dump.group = Some(take_value(args, &mut i)?),
            "--protocol" | "-p" => dump.protocol = Some(take_value(args, &mut i)?),
            "--purpose" | "-u" => dump.purpose = Some(take_value(args, &mut i)?),
            "--session" | "-s" => dump.session = Some(take_value(args, &mut i)?),
            "--gender" | "-w" => dump.gender = Some(take_value(args, &mut i)?),
            "--expression" | "-x" => dump.expression = Some(take_value(args, &mut i)?),
            "--illumination" | "-i" => dump.illumination = Some(take_value(args, &mut i)?),
            "--occlusion" | "-o" => dump.occlusion = Some(take_value(args, &mut i)?),
            "--format" | "-f" => {
                let value = take_value(args, &mut i)?;
                let format = DumpFormat::from_str(&value)
                    .ok_or_else(|| format!("Unknown format: {} (expected list, json or csv)", value))?;
                dump.format = Some(format);
            }
            "--self-test" => dump.self_test = true,
            other => return Err(format!("Unknown argument: {}", other)),
        }
        i += 1;
    }

    Ok(Cli {
        config_path,
        command: Command::DumpList(dump),
    })
}

fn print_help() {
    println!(
        r#"arface - query the AR face database

USAGE:
    arface [OPTIONS] [dumplist] [FILTERS]

OPTIONS:
    --config, -c PATH         Path to config file
    --version, -V             Show version
    --help, -h                Show this help message

DUMPLIST:
    --directory, -d DIR       Prepend DIR to every path
    --extension, -e EXT       Append EXT to every path
    --group, -g GROUP         world, dev or eval
    --protocol, -p NAME       all, expression, illumination, occlusion,
                              occlusion_and_illumination (default: all)
    --purpose, -u PURPOSE     enrol or probe
    --session, -s SESSION     first or second
    --gender, -w GENDER       m or w
    --expression, -x EXPR     neutral, smile, anger or scream
    --illumination, -i ILLUM  front, left, right or all
    --occlusion, -o OCCL      none, sunglasses or scarf
    --format, -f FORMAT       list, json or csv (default: list)

ENVIRONMENT:
    ARFACE_CONFIG             Path to config file (overrides default location)
    ARFACE_DB                 Path to the database file
    ARFACE_LOG                Log level (trace, debug, info, warn, error)

Config file location: $XDG_CONFIG_HOME/arface/config.toml"#
    );
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(message) => {
            eprintln!("Error: {}", message);
            print_help();
            std::process::exit(1);
        }
    };

    let config = match &cli.config_path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let _ = logging::init(&config.logging);

    let db = Database::open(&config).context("failed to open the arface database")?;

    match cli.command {
        Command::DumpList(args) => {
            let query = args.query(&config);
            let options = args.options(&config);
            let stdout = io::stdout();
            let mut out = stdout.lock();
            let count = dump::dump_list(&db, &query, &options, &mut out)?;
            info!("Dumped {} file(s)", count);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_dumplist_filters() {
        let cli = parse_args(&args(&[
            "-c", "/etc/arface.toml", "dumplist", "-g", "dev", "--purpose", "probe", "-p",
            "occlusion", "-e", ".bmp", "--self-test",
        ]))
        .unwrap();
        assert_eq!(cli.config_path, Some(PathBuf::from("/etc/arface.toml")));
        let Command::DumpList(dump) = cli.command;
        assert_eq!(dump.group.as_deref(), Some("dev"));
        assert_eq!(dump.purpose.as_deref(), Some("probe"));
        assert_eq!(dump.protocol.as_deref(), Some("occlusion"));
        assert_eq!(dump.extension.as_deref(), Some(".bmp"));
        assert!(dump.self_test);
    }

    #[test]
    fn test_parse_rejects_missing_value_and_unknown_flags() {
        assert!(parse_args(&args(&["-g"])).is_err());
        assert!(parse_args(&args(&["--colour"])).is_err());
        assert!(parse_args(&args(&["-f", "xml"])).is_err());
    }

    #[test]
    fn test_query_uses_configured_protocol() {
        let mut config = Config::default();
        config.dump.protocol = "expression".to_string();
        config.dump.extension = Some(".ppm".to_string());

        let dump = DumpArgs {
            session: Some("first".to_string()),
            ..Default::default()
        };
        let query = dump.query(&config);
        assert_eq!(query.protocol, Filter::One("expression".to_string()));
        assert_eq!(query.sessions, Filter::One("first".to_string()));
        assert!(query.groups.is_unset());
        assert_eq!(dump.options(&config).extension.as_deref(), Some(".ppm"));
    }
}
