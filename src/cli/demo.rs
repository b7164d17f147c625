//! Demo command implementation

use crate::cli::{load_config, CliError, DemoArgs};
use crate::logging::{init_tracing, Logger};
use crate::message::{Clock, MessageBuilder, RequestContext};
use serde::Serialize;
use serde_json::json;

#[derive(Debug, Serialize)]
struct UserInfo {
    user_id: u64,
    status: &'static str,
    attempts: u32,
}

/// Build the sample login-failure message.
pub fn sample_message(clock: impl Clock + 'static, indent: bool) -> MessageBuilder {
    let ctx = RequestContext::new()
        .with_value("retry", 2)
        .with_value("sessionID", "sess-789")
        .with_request_id();

    let detailed = json!({
        "user_id": 123,
        "status": "failed",
        "attempts": 3,
        "error": "database connection error",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "details": {
            "retry_count": 5,
            "source": "es",
            "duration": "200ms",
        },
    });
    let user = UserInfo {
        user_id: 123,
        status: "failed",
        attempts: 3,
    };

    let mut msg = MessageBuilder::with_clock(clock);
    msg.add_context(&ctx, &["retry", "sessionID", "requestID"])
        .add_formatted_description("[uid {}] user login fail", &[&"123"])
        .add_field("retry", "5")
        .add_field("source", "es")
        .add_field("spend", "200ms")
        .set_error("sql connect err");
    if indent {
        msg.add_serialized_block_indented("DetailedLog", &detailed)
            .add_serialized_block_indented("UserDetails", &user);
    } else {
        msg.add_serialized_block("DetailedLog", &detailed)
            .add_serialized_block("UserDetails", &user);
    }
    msg.mark_timestamp();
    msg
}

/// Handle `jasmine demo`
pub fn run_demo(args: &DemoArgs) -> Result<(), CliError> {
    let mut config = load_config(&args.config)?;
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    config.validate()?;

    init_tracing(&config.logging)?;

    let indent = args.indent || config.message.indent_json;
    let logger: Logger = Logger::default();
    logger.info(sample_message(crate::message::SystemClock, indent));

    Ok(())
}
