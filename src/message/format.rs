//! Best-effort runtime formatting
//!
//! Message construction must never fail, so everything here degrades to
//! marker text instead of returning an error or panicking.

use std::fmt::{self, Write};

/// Rendered in place of a placeholder that has no matching argument.
pub const MISSING_MARKER: &str = "<missing>";

/// Rendered in place of a value whose `Display` implementation errored.
pub const UNFORMATTABLE_MARKER: &str = "<unformattable>";

/// Render a value with `Display`, tolerating implementations that error.
///
/// `ToString` panics when `Display::fmt` returns `Err`; this helper
/// returns [`UNFORMATTABLE_MARKER`] instead.
///
/// # Examples
///
/// ```
/// use jasmine::message::format::display_lossy;
///
/// assert_eq!(display_lossy(&42), "42");
/// ```
pub fn display_lossy(value: &dyn fmt::Display) -> String {
    let mut out = String::new();
    match write!(out, "{}", value) {
        Ok(()) => out,
        Err(_) => UNFORMATTABLE_MARKER.to_string(),
    }
}

/// Render pre-checked format arguments, degrading like [`display_lossy`].
pub fn arguments_lossy(args: fmt::Arguments<'_>) -> String {
    let mut out = String::new();
    match out.write_fmt(args) {
        Ok(()) => out,
        Err(_) => UNFORMATTABLE_MARKER.to_string(),
    }
}

/// Interpolate `args` into `format` using `{}` and `{N}` placeholders.
///
/// - `{}` consumes the next implicit argument, `{N}` selects argument `N`
/// - `{{` and `}}` are literal braces
/// - placeholders without a matching argument render as [`MISSING_MARKER`]
/// - any other placeholder content, an unterminated `{`, or a stray `}`
///   is copied through verbatim
/// - arguments that were never referenced are appended as ` <extra: ...>`
///
/// # Examples
///
/// ```
/// use jasmine::message::format::interpolate;
///
/// assert_eq!(interpolate("[uid {}] user login fail", &[&"123"]), "[uid 123] user login fail");
/// assert_eq!(interpolate("{} and {}", &[&1]), "1 and <missing>");
/// assert_eq!(interpolate("{1}-{0}", &[&"a", &"b"]), "b-a");
/// ```
pub fn interpolate(format: &str, args: &[&dyn fmt::Display]) -> String {
    let mut out = String::with_capacity(format.len());
    let mut used = vec![false; args.len()];
    let mut next_implicit = 0usize;
    let mut rest = format;

    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if tail.starts_with("{{") {
            out.push('{');
            rest = &tail[2..];
            continue;
        }
        if tail.starts_with("}}") {
            out.push('}');
            rest = &tail[2..];
            continue;
        }
        if tail.starts_with('}') {
            out.push('}');
            rest = &tail[1..];
            continue;
        }

        // Opening brace: find its close, or copy the remainder through.
        let Some(close) = tail.find('}') else {
            out.push_str(tail);
            rest = "";
            break;
        };
        let inner = &tail[1..close];
        let index = if inner.is_empty() {
            let i = next_implicit;
            next_implicit += 1;
            Some(i)
        } else {
            inner.parse::<usize>().ok()
        };

        match index {
            Some(i) => match args.get(i) {
                Some(arg) => {
                    used[i] = true;
                    out.push_str(&display_lossy(*arg));
                }
                None => out.push_str(MISSING_MARKER),
            },
            None => out.push_str(&tail[..=close]),
        }
        rest = &tail[close + 1..];
    }
    out.push_str(rest);

    let extra: Vec<String> = args
        .iter()
        .zip(&used)
        .filter(|(_, used)| !**used)
        .map(|(arg, _)| display_lossy(*arg))
        .collect();
    if !extra.is_empty() {
        out.push_str(&format!(" <extra: {}>", extra.join(", ")));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl fmt::Display for Broken {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[test]
    fn test_interpolate_implicit_placeholders() {
        assert_eq!(interpolate("{} {}", &[&"a", &2]), "a 2");
    }

    #[test]
    fn test_interpolate_without_placeholders() {
        assert_eq!(interpolate("plain text", &[]), "plain text");
        assert_eq!(interpolate("", &[]), "");
    }

    #[test]
    fn test_interpolate_escaped_braces() {
        assert_eq!(interpolate("{{}} {}", &[&"x"]), "{} x");
    }

    #[test]
    fn test_interpolate_missing_argument() {
        assert_eq!(interpolate("{} {} {}", &[&"a"]), "a <missing> <missing>");
        assert_eq!(interpolate("{5}", &[&"a"]), "<missing> <extra: a>");
    }

    #[test]
    fn test_interpolate_extra_arguments() {
        assert_eq!(interpolate("only {}", &[&1, &2, &3]), "only 1 <extra: 2, 3>");
    }

    #[test]
    fn test_interpolate_positional_does_not_advance_implicit() {
        assert_eq!(interpolate("{0} {} {}", &[&"a", &"b"]), "a a b");
    }

    #[test]
    fn test_interpolate_unsupported_placeholder_is_verbatim() {
        assert_eq!(interpolate("{name} {:>5}", &[]), "{name} {:>5}");
    }

    #[test]
    fn test_interpolate_unterminated_and_stray_braces() {
        assert_eq!(interpolate("open { here", &[]), "open { here");
        assert_eq!(interpolate("close } here", &[]), "close } here");
        assert_eq!(interpolate("{} {", &[&1]), "1 {");
    }

    #[test]
    fn test_interpolate_non_ascii() {
        assert_eq!(interpolate("用户 {} 登录失败", &[&"123"]), "用户 123 登录失败");
    }

    #[test]
    fn test_display_lossy_handles_failing_display() {
        assert_eq!(display_lossy(&Broken), UNFORMATTABLE_MARKER);
        assert_eq!(interpolate("value={}", &[&Broken]), "value=<unformattable>");
    }

    #[test]
    fn test_arguments_lossy() {
        assert_eq!(arguments_lossy(format_args!("{}-{}", 1, "b")), "1-b");
        assert_eq!(arguments_lossy(format_args!("{}", Broken)), UNFORMATTABLE_MARKER);
    }
}
