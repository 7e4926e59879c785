use clap::{Arg, ArgAction, ArgGroup, ArgMatches, Command, value_parser};
use env_logger::{self as logger};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use textmask::{MaskConfig, MaskSpec, Masker, Result};

const LOG_ENV: &str = "TEXTMASK_LOG";
const LOG_STYLE_ENV: &str = "TEXTMASK_LOG_STYLE";

fn main() -> ExitCode {
    init_logging();
    match run(&cli().get_matches()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    if std::env::var_os(LOG_ENV).is_some() {
        logger::Builder::from_env(logger::Env::new().filter(LOG_ENV).write_style(LOG_STYLE_ENV))
            .format_timestamp_micros()
            .init();
        log::debug!("logging initialized");
    } else {
        logger::Builder::new()
            .filter_level(log::LevelFilter::Error)
            .format_timestamp_millis()
            .init();
    }
}

fn cli() -> Command {
    Command::new("textmask")
        .about("Format text with input masks")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("YAML or JSON file with placeholders and named masks")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .subcommand(
            with_mask_args(Command::new("format").about("Conform values to a mask"))
                .arg(
                    Arg::new("values")
                        .value_name("VALUE")
                        .help("Values to format; read from stdin line by line when omitted")
                        .num_args(0..)
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("consumed")
                        .long("consumed")
                        .help("Also print how many input characters were accepted")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(with_mask_args(
            Command::new("compile").about("Print the compiled slots of a mask"),
        ))
        .subcommand(Command::new("masks").about("List named masks from the config"))
        .subcommand(Command::new("schema").about("Print the JSON schema of the config file"))
}

fn with_mask_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("mask")
                .short('m')
                .long("mask")
                .value_name("PATTERN")
                .help("Placeholder pattern, e.g. \"##.##.####\""),
        )
        .arg(
            Arg::new("elements")
                .short('e')
                .long("elements")
                .value_name("JSON")
                .help("JSON array of literal strings and {\"pattern\": \"<regex>\"} objects"),
        )
        .arg(
            Arg::new("name")
                .short('n')
                .long("name")
                .value_name("NAME")
                .help("Named mask from the config"),
        )
        .group(
            ArgGroup::new("source")
                .args(["mask", "elements", "name"])
                .required(true),
        )
}

fn run(matches: &ArgMatches) -> Result<()> {
    let masker = load_masker(matches)?;
    let mut out = io::stdout().lock();

    match matches.subcommand() {
        Some(("format", sub)) => {
            let spec = mask_spec(&masker, sub)?;
            let show_consumed = sub.get_flag("consumed");
            let mut emit = |raw: &str| -> Result<()> {
                let conformed = masker.conform(raw, &spec);
                if show_consumed {
                    writeln!(out, "{}\t{}", conformed.value, conformed.consumed)?;
                } else {
                    writeln!(out, "{}", conformed.value)?;
                }
                Ok(())
            };

            match sub.get_many::<String>("values") {
                Some(values) => {
                    for value in values {
                        emit(value.as_str())?;
                    }
                }
                None => {
                    for line in io::stdin().lock().lines() {
                        emit(line?.as_str())?;
                    }
                }
            }
        }
        Some(("compile", sub)) => {
            let spec = mask_spec(&masker, sub)?;
            for (idx, slot) in masker.compile(&spec).iter().enumerate() {
                writeln!(out, "{idx:>3}  {slot}")?;
            }
        }
        Some(("masks", _)) => {
            for name in masker.mask_names() {
                let spec = masker.named_mask(name)?;
                writeln!(out, "{name}\t{spec:?}")?;
            }
        }
        Some(("schema", _)) => {
            let schema = schemars::schema_for!(MaskConfig);
            writeln!(out, "{}", serde_json::to_string_pretty(&schema)?)?;
        }
        _ => {}
    }
    Ok(())
}

fn load_masker(matches: &ArgMatches) -> Result<Masker> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => Masker::from_config(&MaskConfig::load(path)?),
        None => Ok(Masker::default()),
    }
}

fn mask_spec(masker: &Masker, matches: &ArgMatches) -> Result<MaskSpec> {
    if let Some(pattern) = matches.get_one::<String>("mask") {
        return Ok(MaskSpec::pattern(pattern.as_str()));
    }
    if let Some(json) = matches.get_one::<String>("elements") {
        return MaskSpec::from_json_str(json.as_str());
    }
    match matches.get_one::<String>("name") {
        Some(name) => masker.named_mask(name.as_str()).cloned(),
        None => Ok(MaskSpec::pattern("")),
    }
}
