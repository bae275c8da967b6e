//! Purpose: `boundjson` CLI entry point and command dispatch bootstrap.
//! Role: Binary crate root; parses args, decodes one document, emits JSON on stdout.
//! Invariants: Successful commands emit exactly one compact JSON line on stdout.
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
//! Invariants: Logging goes to stderr and is off below `warn` unless `BOUNDJSON_LOG` says otherwise.
use std::io::{self, IsTerminal};

use boundjson::api::{DEFAULT_MAX_DEPTH, Error, ErrorKind, ParseOptions, ScanMode, to_exit_code};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum, error::ErrorKind as ClapErrorKind};
use clap_complete::aot::Shell;
use serde_json::{Map, Value, json};
use std::error::Error as StdError;
use tracing_subscriber::EnvFilter;

mod command_dispatch;
mod input;
mod inspect;

const LOG_ENV: &str = "BOUNDJSON_LOG";

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err((err, color_mode)) => {
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, (Error, ColorMode)> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ColorMode::Auto,
                    )
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                return Err((
                    Error::new(ErrorKind::Usage)
                        .with_message(clap_error_summary(&err))
                        .with_hint("Try `boundjson --help`."),
                    ColorMode::Auto,
                ));
            }
        },
    };

    init_tracing();

    let color_mode = cli.color;
    let options = cli.parse_options();

    command_dispatch::dispatch_command(cli.command, options)
        .map_err(|err| add_parse_hint(err, options))
        .map_err(|err| (err, color_mode))
}

#[derive(Parser)]
#[command(
    name = "boundjson",
    version,
    about = "Decode a JSON document and report its value, shape, or first error",
    long_about = r#"Decode a JSON document with a locate-then-parse decoder.

Objects and arrays are bounded (their closing delimiter is found) before their members are parsed.
Results go to stdout as compact JSON; failures go to stderr with a stable exit code."#,
    after_help = r#"EXIT CODES
  0 ok, 1 internal, 2 usage, 3 i/o, 4 invalid input, 5 syntax, 6 malformed number, 7 nesting too deep

LOGGING
  BOUNDJSON_LOG=debug boundjson parse doc.json   (tracing filter syntax; logs go to stderr)"#
)]
struct Cli {
    #[arg(
        long,
        global = true,
        default_value = "auto",
        value_enum,
        help = "Colorize stderr diagnostics: auto|always|never"
    )]
    color: ColorMode,

    #[arg(
        long,
        global = true,
        default_value = "string-aware",
        value_enum,
        help = "How the composite locator treats delimiters inside strings"
    )]
    scan: ScanModeCli,

    #[arg(long, global = true, help = "Reject junk between members instead of skipping it")]
    strict: bool,

    #[arg(long, global = true, help = "Fail when text follows the top-level value")]
    reject_trailing: bool,

    #[arg(
        long,
        global = true,
        default_value_t = DEFAULT_MAX_DEPTH,
        help = "Deepest allowed object/array nesting"
    )]
    max_depth: usize,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn parse_options(&self) -> ParseOptions {
        ParseOptions::new()
            .scan(self.scan.into())
            .strict_members(self.strict)
            .reject_trailing(self.reject_trailing)
            .max_depth(self.max_depth)
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ScanModeCli {
    StringAware,
    Literal,
}

impl From<ScanModeCli> for ScanMode {
    fn from(value: ScanModeCli) -> Self {
        match value {
            ScanModeCli::StringAware => ScanMode::StringAware,
            ScanModeCli::Literal => ScanMode::Literal,
        }
    }
}

#[derive(Args, Debug)]
struct InputArgs {
    #[arg(help = "Inline JSON text (omit to read --file or stdin)")]
    input: Option<String>,
    #[arg(
        short = 'f',
        long = "file",
        help = "Input file path (use - for stdin)",
        conflicts_with = "input",
        value_hint = clap::ValueHint::FilePath
    )]
    file: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    #[command(
        about = "Decode a document and print its value",
        after_help = r#"EXAMPLES
  $ boundjson parse '{"debug":"on","window":{"size":500}}'
  $ boundjson parse -f config.json
  $ cat config.json | boundjson parse --strict"#
    )]
    Parse(InputArgs),
    #[command(
        about = "Decode a document and print only whether it succeeded",
        after_help = r#"EXAMPLES
  $ boundjson check -f config.json && echo valid"#
    )]
    Check(InputArgs),
    #[command(
        about = "Decode a document and print a structural summary",
        after_help = r#"EXAMPLES
  $ boundjson inspect -f config.json"#
    )]
    Inspect(InputArgs),
    #[command(
        arg_required_else_help = true,
        about = "Generate shell completions",
        after_help = r#"EXAMPLES
  $ boundjson completion bash > ~/.local/share/bash-completion/completions/boundjson
  $ boundjson completion zsh > ~/.zfunc/_boundjson"#
    )]
    Completion {
        #[arg(help = "Shell to generate completions for")]
        shell: Shell,
    },
}

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn add_parse_hint(err: Error, options: ParseOptions) -> Error {
    if err.hint().is_some() {
        return err;
    }
    match err.kind() {
        ErrorKind::NestingTooDeep => {
            let limit = options.max_depth;
            err.with_hint(format!("Raise --max-depth (currently {limit}) if the nesting is expected."))
        }
        ErrorKind::UnexpectedToken if options.strict_members || options.reject_trailing => err
            .with_hint("Drop --strict / --reject-trailing to skip structural junk."),
        ErrorKind::UnexpectedToken if options.scan == ScanMode::Literal => {
            err.with_hint("Strings containing braces or brackets need --scan string-aware.")
        }
        ErrorKind::MalformedNumber => {
            err.with_hint("Integers must fit in 32 bits; write large values with a '.' or exponent.")
        }
        ErrorKind::InvalidInput => err.with_hint("Provide JSON via INPUT, --file, or stdin."),
        _ => err,
    }
}

fn emit_json(value: Value) {
    let json = serde_json::to_string(&value)
        .unwrap_or_else(|_| "{\"error\":\"json encode failed\"}".to_string());
    println!("{json}");
}

fn emit_error(err: &Error, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", error_text(err, color_mode.use_color(is_tty)));
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

#[derive(Copy, Clone, Debug)]
enum AnsiColor {
    Red,
    Yellow,
}

fn colorize_label(label: &str, enabled: bool, color: AnsiColor) -> String {
    if !enabled {
        return label.to_string();
    }
    let code = match color {
        AnsiColor::Red => "31",
        AnsiColor::Yellow => "33",
    };
    format!("\u{1b}[{code}m{label}\u{1b}[0m")
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::InvalidInput => "invalid input".to_string(),
        ErrorKind::UnexpectedToken => "unexpected token".to_string(),
        ErrorKind::UnterminatedComposite => "unterminated object or array".to_string(),
        ErrorKind::UnterminatedString => "unterminated string".to_string(),
        ErrorKind::IllegalEscape => "illegal escape sequence".to_string(),
        ErrorKind::MalformedNumber => "malformed number".to_string(),
        ErrorKind::NestingTooDeep => "nesting too deep".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
        ErrorKind::Internal => "internal error".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(path) = err.path() {
        inner.insert("path".to_string(), json!(path.display().to_string()));
    }
    if let Some(offset) = err.offset() {
        inner.insert("offset".to_string(), json!(offset));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error, use_color: bool) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} {}",
        colorize_label("error:", use_color, AnsiColor::Red),
        error_message(err)
    ));

    if let Some(hint) = err.hint() {
        lines.push(format!(
            "{} {hint}",
            colorize_label("hint:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(path) = err.path() {
        lines.push(format!(
            "{} {}",
            colorize_label("path:", use_color, AnsiColor::Yellow),
            path.display()
        ));
    }
    if let Some(offset) = err.offset() {
        lines.push(format!(
            "{} {offset}",
            colorize_label("offset:", use_color, AnsiColor::Yellow)
        ));
    }

    let causes = error_causes(err);
    if let Some(cause) = causes.first() {
        lines.push(format!(
            "{} {cause}",
            colorize_label("caused by:", use_color, AnsiColor::Yellow)
        ));
    }

    lines.join("\n")
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}
