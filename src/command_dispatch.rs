//! Purpose: Hold top-level CLI command dispatch for `boundjson`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: Every decoding command reads exactly one document and decodes it once.
//! Invariants: Output envelopes are compact JSON; error envelopes are built in `main.rs`.

use super::*;
use boundjson::api::{parse_prefix_with_options, parse_with_options};
use super::input::{InputSource, read_input};
use tracing::debug;

pub(super) fn dispatch_command(command: Command, options: ParseOptions) -> Result<RunOutcome, Error> {
    match command {
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "boundjson", &mut io::stdout());
            Ok(RunOutcome::ok())
        }
        Command::Parse(args) => {
            let text = load(args)?;
            let value = parse_with_options(&text, options)?;
            let encoded = serde_json::to_value(&value).map_err(|err| {
                Error::new(ErrorKind::Internal)
                    .with_message("failed to encode decoded value")
                    .with_source(err)
            })?;
            emit_json(encoded);
            Ok(RunOutcome::ok())
        }
        Command::Check(args) => {
            let text = load(args)?;
            let parsed = parse_prefix_with_options(&text, options)?;
            emit_json(json!({
                "ok": true,
                "kind": parsed.value.kind_name(),
                "consumed": parsed.next,
                "len": text.trim().len(),
            }));
            Ok(RunOutcome::ok())
        }
        Command::Inspect(args) => {
            let text = load(args)?;
            let parsed = parse_prefix_with_options(&text, options)?;
            let summary = super::inspect::summarize(&parsed.value, parsed.next);
            let encoded = serde_json::to_value(&summary).map_err(|err| {
                Error::new(ErrorKind::Internal)
                    .with_message("failed to encode summary")
                    .with_source(err)
            })?;
            emit_json(encoded);
            Ok(RunOutcome::ok())
        }
    }
}

fn load(args: InputArgs) -> Result<String, Error> {
    let source = InputSource::resolve(args.input, args.file)?;
    let label = source.label();
    let text = read_input(source.clone()).map_err(|err| match source {
        InputSource::File(_) => err,
        _ => err.with_hint("Provide JSON via INPUT, --file, or stdin."),
    })?;
    debug!(source = %label, bytes = text.len(), "loaded input");
    Ok(text)
}
