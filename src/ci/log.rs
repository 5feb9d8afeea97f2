//! Failing-build log extraction and sanitization.
//!
//! A build's log is the concatenated output of its first failed action.
//! Terminal color codes are stripped before the text is embedded in a
//! Markdown comment: npm and friends emit ANSI SGR sequences whose
//! escape byte often arrives mangled by the log pipeline, so the
//! matcher accepts any control byte in front of the `[..m` body.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

use super::api::BuildApi;
use super::build::{Action, Build, BuildRef, LogEntry};
use super::error::CiApiError;

/// Matches a color/format escape sequence: one control character
/// (C0 except tab/newline, DEL, or C1) followed by `[`, digits, an
/// optional `;` plus digits, and a final `m`.
fn color_code_regex() -> &'static Regex {
    static COLOR_CODE: OnceLock<Regex> = OnceLock::new();
    COLOR_CODE.get_or_init(|| {
        Regex::new(r"[\x00-\x09\x0B-\x0C\x0E-\x1F\x7F-\x9F]\[[0-9]+;?[0-9]*m")
            .expect("color code pattern is valid")
    })
}

/// Removes color/format escape sequences from log text.
///
/// Only exact matches of the pattern are removed; all other content,
/// including non-printable bytes that don't complete the pattern, is
/// left untouched.
pub fn strip_color_codes(text: &str) -> Cow<'_, str> {
    color_code_regex().replace_all(text, "")
}

/// Returns the first failed action of a build, in step-then-action order.
pub fn first_failed_action(build: &Build) -> Option<&Action> {
    build
        .steps
        .iter()
        .flat_map(|step| step.actions.iter())
        .find(|action| action.is_failed())
}

/// Concatenates log entry messages in order, with no separator.
pub fn concat_messages(entries: &[LogEntry]) -> String {
    entries.iter().map(|entry| entry.message.as_str()).collect()
}

/// Fetches and sanitizes the log of the failing build, if any.
///
/// Returns the empty string when there is no build reference, the build
/// has no failed action, or the failed action has no output URL. Only
/// transport failures are errors.
pub async fn failing_build_log<C: BuildApi>(
    ci: &C,
    build_ref: Option<&BuildRef>,
) -> Result<String, CiApiError> {
    let Some(build_ref) = build_ref else {
        return Ok(String::new());
    };

    let build = ci.build(build_ref).await?;

    let Some(action) = first_failed_action(&build) else {
        return Ok(String::new());
    };
    let Some(output_url) = action.output_url.as_deref() else {
        return Ok(String::new());
    };

    let entries = ci.action_output(output_url).await?;
    Ok(strip_color_codes(&concat_messages(&entries)).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn build_from_json(json: &str) -> Build {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn strips_ansi_color_codes() {
        assert_eq!(strip_color_codes("\x1b[31mred text\x1b[0m"), "red text");
        assert_eq!(strip_color_codes("\x1b[38;5m styled"), " styled");
    }

    #[test]
    fn strips_codes_with_mangled_escape_bytes() {
        // Any control byte in the accepted ranges works as the lead-in.
        assert_eq!(strip_color_codes("\x01[31mtext"), "text");
        assert_eq!(strip_color_codes("\u{7f}[1mtext"), "text");
        assert_eq!(strip_color_codes("\u{9b}[42mtext"), "text");
    }

    #[test]
    fn leaves_tabs_newlines_and_lone_controls_alone() {
        // Tab (0x09 is in range, but \n and \r are not) and sequences
        // that don't complete the pattern must survive.
        assert_eq!(strip_color_codes("line1\nline2\r\n"), "line1\nline2\r\n");
        assert_eq!(strip_color_codes("\x1b[31 no final m"), "\x1b[31 no final m");
        assert_eq!(strip_color_codes("\x1bno bracket"), "\x1bno bracket");
        assert_eq!(strip_color_codes("\x07bell"), "\x07bell");
        // Bracket without a control byte in front stays too.
        assert_eq!(strip_color_codes("[31m"), "[31m");
    }

    #[test]
    fn does_not_strip_multi_parameter_sequences() {
        // Two semicolons don't fit the digits;digits shape.
        assert_eq!(strip_color_codes("\x1b[38;5;2mdeep"), "\x1b[38;5;2mdeep");
    }

    #[test]
    fn first_failed_action_is_step_then_action_ordered() {
        let build = build_from_json(
            r#"{ "steps": [
                { "actions": [ { "failed": null, "output_url": "https://logs/0" } ] },
                { "actions": [
                    { "failed": null, "output_url": "https://logs/1" },
                    { "failed": true, "output_url": "https://logs/2" },
                    { "failed": true, "output_url": "https://logs/3" }
                ] }
            ] }"#,
        );

        let action = first_failed_action(&build).expect("has a failed action");
        assert_eq!(action.output_url.as_deref(), Some("https://logs/2"));
    }

    #[test]
    fn first_failed_action_none_when_all_green() {
        let build = build_from_json(
            r#"{ "steps": [ { "actions": [ { "failed": null, "output_url": "https://logs/0" } ] } ] }"#,
        );
        assert!(first_failed_action(&build).is_none());

        let empty = build_from_json(r#"{ "steps": [] }"#);
        assert!(first_failed_action(&empty).is_none());
    }

    #[test]
    fn concat_joins_messages_without_separator() {
        let entries: Vec<LogEntry> = serde_json::from_str(
            r#"[ { "message": "a" }, { "message": "b c" }, { "message": "d" } ]"#,
        )
        .unwrap();
        assert_eq!(concat_messages(&entries), "ab cd");
        assert_eq!(concat_messages(&[]), "");
    }

    proptest! {
        #[test]
        fn sanitizing_never_grows_text(text: String) {
            prop_assert!(strip_color_codes(&text).len() <= text.len());
        }

        #[test]
        fn plain_ascii_text_is_unchanged(text in "[ -~]*") {
            // Printable ASCII can never contain the control lead-in.
            let stripped = strip_color_codes(&text);
            prop_assert_eq!(stripped.as_ref(), text.as_str());
        }
    }

    mod pipeline {
        use std::sync::atomic::{AtomicUsize, Ordering};

        use crate::ci::api::BuildApi;
        use crate::ci::build::{Build, BuildRef, LogEntry};
        use crate::ci::error::CiApiError;
        use crate::ci::log::failing_build_log;

        /// Fake CI API serving canned responses and counting fetches.
        struct FakeCi {
            build_json: &'static str,
            output_json: &'static str,
            output_fetches: AtomicUsize,
        }

        impl FakeCi {
            fn new(build_json: &'static str, output_json: &'static str) -> Self {
                FakeCi {
                    build_json,
                    output_json,
                    output_fetches: AtomicUsize::new(0),
                }
            }

            fn output_fetch_count(&self) -> usize {
                self.output_fetches.load(Ordering::SeqCst)
            }
        }

        impl BuildApi for FakeCi {
            async fn build(&self, _build: &BuildRef) -> Result<Build, CiApiError> {
                Ok(serde_json::from_str(self.build_json).unwrap())
            }

            async fn action_output(&self, _url: &str) -> Result<Vec<LogEntry>, CiApiError> {
                self.output_fetches.fetch_add(1, Ordering::SeqCst);
                Ok(serde_json::from_str(self.output_json).unwrap())
            }
        }

        fn some_build_ref() -> BuildRef {
            BuildRef {
                account: "org".to_string(),
                project: "project".to_string(),
                build_num: 42,
            }
        }

        #[tokio::test]
        async fn no_build_ref_yields_empty_log_without_fetching() {
            let ci = FakeCi::new("{}", "[]");
            let log = failing_build_log(&ci, None).await.unwrap();
            assert_eq!(log, "");
            assert_eq!(ci.output_fetch_count(), 0);
        }

        #[tokio::test]
        async fn no_failed_action_yields_empty_log() {
            let ci = FakeCi::new(
                r#"{ "steps": [ { "actions": [ { "failed": null, "output_url": "u" } ] } ] }"#,
                "[]",
            );
            let log = failing_build_log(&ci, Some(&some_build_ref())).await.unwrap();
            assert_eq!(log, "");
            assert_eq!(ci.output_fetch_count(), 0);
        }

        #[tokio::test]
        async fn failed_action_without_output_url_yields_empty_log() {
            let ci = FakeCi::new(r#"{ "steps": [ { "actions": [ { "failed": true } ] } ] }"#, "[]");
            let log = failing_build_log(&ci, Some(&some_build_ref())).await.unwrap();
            assert_eq!(log, "");
            assert_eq!(ci.output_fetch_count(), 0);
        }

        #[tokio::test]
        async fn fetches_once_concatenates_and_sanitizes() {
            let ci = FakeCi::new(
                r#"{ "steps": [ { "actions": [ { "failed": true, "output_url": "u" } ] } ] }"#,
                r#"[ { "message": "npm ERR! \u001b[31m" }, { "message": "broken build" } ]"#,
            );
            let log = failing_build_log(&ci, Some(&some_build_ref())).await.unwrap();
            assert_eq!(log, "npm ERR! broken build");
            assert_eq!(ci.output_fetch_count(), 1);
        }
    }
}
