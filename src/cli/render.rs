//! Render command implementation

use crate::cli::{load_config, CliError, RenderArgs};
use crate::config::JasmineConfig;
use crate::logging::{init_tracing, Logger};
use crate::message::{FixedClock, MessageBuilder, RequestContext};

/// Split `KEY=VALUE` at the first `=`.
pub fn parse_pair(flag: &'static str, raw: &str) -> Result<(String, String), CliError> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(CliError::InvalidPair {
            flag,
            value: raw.to_string(),
        }),
    }
}

/// Assemble the message described by `args`.
///
/// Descriptions precede fields; context entries keep flag order; plain
/// blocks are attached before JSON blocks.
pub fn build_message(
    args: &RenderArgs,
    config: &JasmineConfig,
) -> Result<MessageBuilder, CliError> {
    let mut msg = match args.at {
        Some(at) => MessageBuilder::with_clock(FixedClock(at)),
        None => MessageBuilder::new(),
    };

    for desc in &args.desc {
        msg.add_description(desc.as_str());
    }
    for raw in &args.field {
        let (key, value) = parse_pair("--field", raw)?;
        msg.add_field(key, value);
    }

    if !args.context.is_empty() {
        let mut ctx = RequestContext::new();
        let mut keys = Vec::with_capacity(args.context.len());
        for raw in &args.context {
            let (key, value) = parse_pair("--context", raw)?;
            ctx = ctx.with_value(key.clone(), value);
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        msg.add_context(&ctx, keys.as_slice());
    }

    if args.timestamp || config.message.timestamp {
        msg.mark_timestamp();
    }

    for raw in &args.block {
        let (label, text) = parse_pair("--block", raw)?;
        msg.add_large_block(label, text);
    }

    let indent = args.indent || config.message.indent_json;
    for raw in &args.json {
        let (label, text) = parse_pair("--json", raw)?;
        let value: serde_json::Value =
            serde_json::from_str(&text).map_err(|source| CliError::InvalidJson {
                label: label.clone(),
                source,
            })?;
        if indent {
            msg.add_serialized_block_indented(label, &value);
        } else {
            msg.add_serialized_block(label, &value);
        }
    }

    if let Some(error) = &args.error {
        msg.set_error(error.clone());
    }

    Ok(msg)
}

/// Handle `jasmine render`
///
/// Prints the message to stdout, or logs it through tracing when `--log`
/// is given.
pub fn run_render(args: &RenderArgs) -> Result<(), CliError> {
    let config = load_config(&args.config)?;
    config.validate()?;

    let msg = build_message(args, &config)?;
    tracing::debug!(
        fields = msg.fields().len(),
        context = msg.context_entries().len(),
        "Built message"
    );

    match args.log {
        Some(severity) => {
            init_tracing(&config.logging)?;
            let logger: Logger = Logger::default();
            logger.log(severity, &msg);
        }
        None => println!("{}", msg.render()),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    fn render_args(argv: &[&str]) -> RenderArgs {
        let mut full = vec!["jasmine", "render"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Commands::Render(args) => args,
            _ => panic!("Expected Render command"),
        }
    }

    fn render(argv: &[&str]) -> Result<String, CliError> {
        let args = render_args(argv);
        build_message(&args, &JasmineConfig::default()).map(|m| m.render())
    }

    #[test]
    fn test_parse_pair() {
        assert_eq!(
            parse_pair("--field", "a=b=c").unwrap(),
            ("a".to_string(), "b=c".to_string())
        );
        assert_eq!(
            parse_pair("--field", "empty=").unwrap(),
            ("empty".to_string(), String::new())
        );
        assert!(matches!(
            parse_pair("--field", "novalue"),
            Err(CliError::InvalidPair { flag: "--field", .. })
        ));
        assert!(parse_pair("--field", "=v").is_err());
    }

    #[test]
    fn test_render_round_trip_scenario() {
        let out = render(&[
            "-d", "login fail", "-f", "retry=5", "-e", "sql connect err", "-t", "--at", "1700000000",
        ])
        .unwrap();
        assert_eq!(
            out,
            "login fail | retry=5\nTimestamp: 1700000000\nError: sql connect err"
        );
    }

    #[test]
    fn test_render_context_and_blocks() {
        let out = render(&[
            "-x", "retry=2", "-x", "sessionID=sess-789", "-b", "Note=hello", "-j",
            "User={\"id\": 1}",
        ])
        .unwrap();
        assert_eq!(
            out,
            "\nContext: retry=2 | sessionID=sess-789\nNote: hello\nUser: {\"id\":1}"
        );
    }

    #[test]
    fn test_render_repeated_context_key_uses_latest_value_once() {
        let out = render(&["-x", "k=1", "-x", "k=2"]).unwrap();
        assert_eq!(out, "\nContext: k=2");
    }

    #[test]
    fn test_render_indented_json() {
        let out = render(&["--indent", "-j", "J=[1]"]).unwrap();
        assert_eq!(out, "\nJ: [\n  1\n]");
    }

    #[test]
    fn test_render_config_enables_timestamp_and_indent() {
        let args = render_args(&["--at", "42", "-j", "J={\"a\":1}"]);
        let mut config = JasmineConfig::default();
        config.message.timestamp = true;
        config.message.indent_json = true;

        let out = build_message(&args, &config).unwrap().render();
        assert_eq!(out, "\nTimestamp: 42\nJ: {\n  \"a\": 1\n}");
    }

    #[test]
    fn test_render_invalid_json_is_error() {
        let err = render(&["-j", "J={not json"]).unwrap_err();
        assert!(matches!(err, CliError::InvalidJson { ref label, .. } if label == "J"));
        assert!(err.to_string().contains("Invalid JSON for block 'J'"));
    }

    #[test]
    fn test_render_invalid_field_is_error() {
        assert!(matches!(
            render(&["-f", "oops"]),
            Err(CliError::InvalidPair { flag: "--field", .. })
        ));
    }
}
