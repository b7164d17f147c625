//! Fluent assembly of human-readable diagnostic messages
//!
//! A [`MessageBuilder`] collects free-text descriptions, `key=value` fields,
//! request context, an error, a timestamp and labelled large blocks, then
//! renders them as one ordered text block:
//!
//! ```text
//! <fields joined by " | ">
//! Context: <context entries joined by " | ">
//! Timestamp: <unix seconds>
//! <label>: <payload>
//! Error: <error message>
//! ```
//!
//! Sections without content are omitted. Building a message never fails:
//! serialization and formatting problems are rendered as descriptive text.
//!
//! # Example
//!
//! ```rust
//! use jasmine::message::clock::FixedClock;
//! use jasmine::message::MessageBuilder;
//!
//! let message = MessageBuilder::with_clock(FixedClock(1_700_000_000))
//!     .add_description("login fail")
//!     .add_field("retry", "5")
//!     .set_error("sql connect err")
//!     .mark_timestamp()
//!     .render();
//!
//! assert_eq!(
//!     message,
//!     "login fail | retry=5\nTimestamp: 1700000000\nError: sql connect err"
//! );
//! ```

pub mod clock;
pub mod context;
pub mod format;

pub use clock::{Clock, FixedClock, SystemClock};
pub use context::{ContextSource, RequestContext};

use serde::Serialize;
use std::error::Error;
use std::fmt;

/// Separator between entries on the fields and context lines.
pub const FIELD_SEPARATOR: &str = " | ";

type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Accumulates message contributions and renders them on demand.
///
/// Every contribution method returns `&mut Self` so calls chain. Rendering
/// borrows the builder immutably, so it can be rendered more than once and
/// mutated again afterwards.
#[derive(Debug)]
pub struct MessageBuilder {
    fields: Vec<String>,
    context: Vec<String>,
    error: Option<BoxError>,
    timestamp: Option<i64>,
    // Insertion order of each label's first occurrence.
    large_blocks: Vec<(String, String)>,
    clock: Box<dyn Clock>,
}

impl Default for MessageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageBuilder {
    /// Create an empty builder that stamps times from the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Create an empty builder that reads "now" from `clock`.
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            fields: Vec::new(),
            context: Vec::new(),
            error: None,
            timestamp: None,
            large_blocks: Vec::new(),
            clock: Box::new(clock),
        }
    }

    /// Append `text` verbatim to the fields line.
    pub fn add_description(&mut self, text: impl Into<String>) -> &mut Self {
        self.fields.push(text.into());
        self
    }

    /// Append a description built by interpolating `args` into `format`.
    ///
    /// Uses `{}`/`{N}` placeholders; see [`format::interpolate`] for how
    /// malformed formats and mismatched arguments degrade.
    pub fn add_formatted_description(
        &mut self,
        format: &str,
        args: &[&dyn fmt::Display],
    ) -> &mut Self {
        self.fields.push(format::interpolate(format, args));
        self
    }

    /// Append a description from compile-time checked `format_args!`.
    ///
    /// ```
    /// use jasmine::message::MessageBuilder;
    ///
    /// let uid = 123;
    /// let message = MessageBuilder::new()
    ///     .add_formatted_args(format_args!("[uid {}] user login fail", uid))
    ///     .render();
    /// assert_eq!(message, "[uid 123] user login fail");
    /// ```
    pub fn add_formatted_args(&mut self, args: fmt::Arguments<'_>) -> &mut Self {
        self.fields.push(format::arguments_lossy(args));
        self
    }

    /// Record the error for the message. A later call replaces it.
    pub fn set_error(&mut self, err: impl Into<BoxError>) -> &mut Self {
        self.error = Some(err.into());
        self
    }

    /// Append `key=value` context entries for each key present in `source`.
    ///
    /// Keys are visited in the order given; absent keys are skipped.
    pub fn add_context<S, K>(&mut self, source: &S, keys: &[K]) -> &mut Self
    where
        S: ContextSource + ?Sized,
        K: AsRef<str>,
    {
        for key in keys {
            let key = key.as_ref();
            if let Some(value) = source.lookup(key) {
                self.context
                    .push(format!("{}={}", key, format::display_lossy(value)));
            }
        }
        self
    }

    /// Append `key=value` to the fields line.
    pub fn add_field(&mut self, key: impl fmt::Display, value: impl fmt::Display) -> &mut Self {
        self.fields.push(format!(
            "{}={}",
            format::display_lossy(&key),
            format::display_lossy(&value)
        ));
        self
    }

    /// Stamp the message with the clock's current second.
    pub fn mark_timestamp(&mut self) -> &mut Self {
        self.timestamp = Some(self.clock.now_unix());
        self
    }

    /// Attach `text` under `label`, replacing any payload already there.
    ///
    /// A replaced label keeps its original position.
    pub fn add_large_block(
        &mut self,
        label: impl Into<String>,
        text: impl Into<String>,
    ) -> &mut Self {
        let label = label.into();
        let text = text.into();
        match self.large_blocks.iter_mut().find(|(l, _)| *l == label) {
            Some((_, payload)) => *payload = text,
            None => self.large_blocks.push((label, text)),
        }
        self
    }

    /// Attach `value` as compact JSON under `label`.
    ///
    /// When `value` cannot be serialized the payload describes the failure.
    pub fn add_serialized_block<T>(&mut self, label: impl Into<String>, value: &T) -> &mut Self
    where
        T: Serialize + ?Sized,
    {
        let payload = serde_json::to_string(value).unwrap_or_else(serialization_failure);
        self.add_large_block(label, payload)
    }

    /// Attach `value` as two-space indented JSON under `label`.
    pub fn add_serialized_block_indented<T>(
        &mut self,
        label: impl Into<String>,
        value: &T,
    ) -> &mut Self
    where
        T: Serialize + ?Sized,
    {
        let payload = serde_json::to_string_pretty(value).unwrap_or_else(serialization_failure);
        self.add_large_block(label, payload)
    }

    /// Fields and descriptions in the order they were added.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Rendered context entries in the order they were added.
    pub fn context_entries(&self) -> &[String] {
        &self.context
    }

    pub fn timestamp(&self) -> Option<i64> {
        self.timestamp
    }

    pub fn error(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.error.as_deref()
    }

    /// Large blocks as `(label, payload)` in render order.
    pub fn large_blocks(&self) -> impl Iterator<Item = (&str, &str)> {
        self.large_blocks
            .iter()
            .map(|(label, payload)| (label.as_str(), payload.as_str()))
    }

    /// Render the accumulated contributions into one string.
    pub fn render(&self) -> String {
        let mut msg = String::new();

        if !self.fields.is_empty() {
            msg.push_str(&self.fields.join(FIELD_SEPARATOR));
        }

        if !self.context.is_empty() {
            msg.push_str("\nContext: ");
            msg.push_str(&self.context.join(FIELD_SEPARATOR));
        }

        if let Some(ts) = self.timestamp.filter(|ts| *ts > 0) {
            msg.push_str("\nTimestamp: ");
            msg.push_str(&ts.to_string());
        }

        for (label, payload) in &self.large_blocks {
            msg.push('\n');
            msg.push_str(label);
            msg.push_str(": ");
            msg.push_str(payload);
        }

        if let Some(err) = &self.error {
            msg.push_str("\nError: ");
            msg.push_str(&format::display_lossy(err));
        }

        msg
    }
}

impl fmt::Display for MessageBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn serialization_failure(err: serde_json::Error) -> String {
    format!("failed to serialize value: {}", err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, HashMap};

    const T: i64 = 1_731_000_000;

    fn builder() -> MessageBuilder {
        MessageBuilder::with_clock(FixedClock(T))
    }

    #[derive(Debug, thiserror::Error)]
    #[error("{0}")]
    struct TestError(&'static str);

    #[test]
    fn test_empty_builder_renders_empty_string() {
        assert_eq!(MessageBuilder::new().render(), "");
    }

    #[test]
    fn test_descriptions_and_fields_interleave_in_call_order() {
        let msg = builder()
            .add_field("a", 1)
            .add_description("middle")
            .add_field("b", "two")
            .render();
        assert_eq!(msg, "a=1 | middle | b=two");
    }

    #[test]
    fn test_description_is_verbatim() {
        let msg = builder().add_description("  spaced | piped\nline  ").render();
        assert_eq!(msg, "  spaced | piped\nline  ");
    }

    #[test]
    fn test_round_trip_scenario() {
        let msg = builder()
            .add_description("login fail")
            .add_field("retry", "5")
            .set_error(TestError("sql connect err"))
            .mark_timestamp()
            .render();
        assert_eq!(
            msg,
            format!("login fail | retry=5\nTimestamp: {}\nError: sql connect err", T)
        );
    }

    #[test]
    fn test_last_error_wins() {
        let msg = builder()
            .set_error("first failure")
            .set_error(TestError("second failure"))
            .render();
        assert_eq!(msg, "\nError: second failure");
        assert!(!msg.contains("first failure"));
    }

    #[test]
    fn test_context_skips_absent_keys_and_keeps_request_order() {
        let mut source = HashMap::new();
        source.insert("sessionID", "sess-789".to_string());
        source.insert("retry", "2".to_string());

        let mut b = builder();
        b.add_context(&source, &["retry", "missing", "sessionID"]);

        assert_eq!(b.context_entries(), ["retry=2", "sessionID=sess-789"]);
        assert_eq!(b.render(), "\nContext: retry=2 | sessionID=sess-789");
        assert!(b.fields().is_empty());
    }

    #[test]
    fn test_context_with_no_present_keys_is_omitted() {
        let source: BTreeMap<String, i32> = BTreeMap::new();
        let msg = builder()
            .add_description("x")
            .add_context(&source, &["a", "b"])
            .render();
        assert_eq!(msg, "x");
    }

    #[test]
    fn test_context_from_request_context() {
        let ctx = RequestContext::new()
            .with_value("retry", 2)
            .with_value("sessionID", "sess-789");
        let msg = builder()
            .add_context(&ctx, &["retry", "sessionID"])
            .render();
        assert_eq!(msg, "\nContext: retry=2 | sessionID=sess-789");
    }

    #[test]
    fn test_timestamp_uses_clock_and_overwrites() {
        let mut b = builder();
        b.mark_timestamp().mark_timestamp();
        assert_eq!(b.timestamp(), Some(T));
        assert_eq!(b.render(), format!("\nTimestamp: {}", T));
    }

    #[test]
    fn test_non_positive_timestamp_is_omitted() {
        let msg = MessageBuilder::with_clock(FixedClock(0))
            .add_description("d")
            .mark_timestamp()
            .render();
        assert_eq!(msg, "d");
    }

    #[test]
    fn test_large_block_overwrite_keeps_single_label() {
        let msg = builder()
            .add_large_block("x", "a")
            .add_large_block("x", "b")
            .render();
        assert_eq!(msg, "\nx: b");
    }

    #[test]
    fn test_large_blocks_render_in_first_insertion_order() {
        let msg = builder()
            .add_large_block("zeta", "1")
            .add_large_block("alpha", "2")
            .add_large_block("zeta", "3")
            .render();
        assert_eq!(msg, "\nzeta: 3\nalpha: 2");
    }

    #[test]
    fn test_serialized_block_is_compact_json() {
        let mut data = BTreeMap::new();
        data.insert("user_id", serde_json::json!(123));
        data.insert("status", serde_json::json!("failed"));

        let msg = builder().add_serialized_block("UserDetails", &data).render();
        assert_eq!(msg, r#"
UserDetails: {"status":"failed","user_id":123}"#);
    }

    #[test]
    fn test_serialized_block_indented() {
        let msg = builder()
            .add_serialized_block_indented("Detail", &serde_json::json!({"a": 1}))
            .render();
        assert_eq!(msg, "\nDetail: {\n  \"a\": 1\n}");
    }

    #[test]
    fn test_serialization_failure_is_embedded() {
        // JSON object keys must be strings.
        let mut bad = HashMap::new();
        bad.insert((1, 2), "tuple key");

        let mut b = builder();
        b.add_serialized_block("Bad", &bad)
            .add_serialized_block_indented("AlsoBad", &bad);

        let blocks: Vec<_> = b.large_blocks().collect();
        assert_eq!(blocks.len(), 2);
        for (_, payload) in blocks {
            assert!(payload.starts_with("failed to serialize value: "));
            assert!(payload.contains("key must be a string"));
        }
    }

    #[test]
    fn test_formatted_description_best_effort() {
        let msg = builder()
            .add_formatted_description("[uid {}] user login fail", &[&"123"])
            .add_formatted_description("{} {}", &[&"only"])
            .render();
        assert_eq!(msg, "[uid 123] user login fail | only <missing>");
    }

    #[test]
    fn test_full_section_order() {
        let ctx = RequestContext::new().with_value("sessionID", "s-1");
        let msg = builder()
            .set_error("boom")
            .add_large_block("Block", "payload")
            .mark_timestamp()
            .add_context(&ctx, &["sessionID"])
            .add_description("desc")
            .render();
        assert_eq!(
            msg,
            format!(
                "desc\nContext: sessionID=s-1\nTimestamp: {}\nBlock: payload\nError: boom",
                T
            )
        );
        assert!(!msg.ends_with('\n'));
    }

    #[test]
    fn test_render_is_idempotent_and_does_not_finalize() {
        let mut b = builder();
        b.add_description("one").add_large_block("b", "1").add_large_block("a", "2");
        let first = b.render();
        assert_eq!(first, b.render());
        assert_eq!(first, b.to_string());

        b.add_description("two");
        assert_eq!(b.render(), "one | two\nb: 1\na: 2");
    }

    #[test]
    fn test_builder_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MessageBuilder>();
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Piece {
            Desc(String),
            Field(String, String),
        }

        fn piece() -> impl Strategy<Value = Piece> {
            prop_oneof![
                "[a-z ]{0,12}".prop_map(Piece::Desc),
                ("[a-z]{1,6}", "[a-z0-9]{0,6}").prop_map(|(k, v)| Piece::Field(k, v)),
            ]
        }

        proptest! {
            /// Property: the first line is every description and field joined in call order.
            #[test]
            fn prop_fields_line_matches_call_order(pieces in prop::collection::vec(piece(), 0..12)) {
                let mut b = builder();
                let mut expected = Vec::new();
                for p in &pieces {
                    match p {
                        Piece::Desc(text) => {
                            b.add_description(text.clone());
                            expected.push(text.clone());
                        }
                        Piece::Field(k, v) => {
                            b.add_field(k, v);
                            expected.push(format!("{}={}", k, v));
                        }
                    }
                }
                prop_assert_eq!(b.render(), expected.join(" | "));
            }

            /// Property: only present keys appear, in request order.
            #[test]
            fn prop_context_contains_exactly_present_keys(
                present in prop::collection::btree_map("[a-z]{1,4}", 0u32..100, 0..6),
                requested in prop::collection::vec("[a-z]{1,4}", 0..10),
            ) {
                let mut b = builder();
                b.add_context(&present, requested.as_slice());

                let expected: Vec<String> = requested
                    .iter()
                    .filter_map(|k| present.get(k).map(|v| format!("{}={}", k, v)))
                    .collect();
                prop_assert_eq!(b.context_entries(), expected.as_slice());
            }

            /// Property: rendering twice without mutation is identical.
            #[test]
            fn prop_render_is_idempotent(labels in prop::collection::vec("[a-z]{1,3}", 0..8)) {
                let mut b = builder();
                for (i, label) in labels.iter().enumerate() {
                    b.add_large_block(label.clone(), i.to_string());
                }
                prop_assert_eq!(b.render(), b.render());
            }
        }
    }
}
