//! Accept the single-dash camelCase flags (`-maxElapsedTime=3`) of the
//! classic `retry` tool by rewriting them to their long forms before clap
//! sees them. Scanning stops where the command starts.

use std::ffi::OsString;

const LEGACY_FLAGS: [(&str, &str); 3] = [
    ("-initialInterval", "--initial-interval"),
    ("-maxInterval", "--max-interval"),
    ("-maxElapsedTime", "--max-elapsed-time"),
];

const NO_VALUE_FLAGS: [&str; 4] = ["-h", "-V", "--help", "--version"];

/// Rewrite legacy flags in `args` (including `argv[0]`); everything from
/// the first non-flag token or `--` onward is passed through untouched.
pub fn normalize_legacy_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut it = args.into_iter().map(Into::into);
    let mut out: Vec<OsString> = it.next().into_iter().collect();
    let mut expect_value = false;

    while let Some(arg) = it.next() {
        if expect_value {
            expect_value = false;
            out.push(arg);
            continue;
        }
        let Some(text) = arg.to_str().filter(|s| s.starts_with('-') && *s != "--") else {
            // Command (or `--`) starts here.
            out.push(arg);
            out.extend(it);
            break;
        };

        let (name, value) = match text.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (text, None),
        };
        let name = LEGACY_FLAGS
            .iter()
            .find(|(legacy, _)| *legacy == name)
            .map_or(name, |(_, long)| *long);

        expect_value = value.is_none() && !NO_VALUE_FLAGS.contains(&name);
        out.push(match value {
            Some(value) => OsString::from(format!("{name}={value}")),
            None => OsString::from(name),
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(args: &[&str]) -> Vec<String> {
        normalize_legacy_flags(args.iter().copied())
            .into_iter()
            .map(|a| a.into_string().unwrap())
            .collect()
    }

    #[test]
    fn rewrites_legacy_flags_with_and_without_equals() {
        assert_eq!(
            norm(&["retry", "-maxElapsedTime=3", "-initialInterval", "2", "false"]),
            ["retry", "--max-elapsed-time=3", "--initial-interval", "2", "false"]
        );
    }

    #[test]
    fn command_arguments_are_untouched() {
        assert_eq!(
            norm(&["retry", "--max-interval", "5", "tool", "-maxInterval=1", "-x"]),
            ["retry", "--max-interval", "5", "tool", "-maxInterval=1", "-x"]
        );
        assert_eq!(
            norm(&["retry", "--", "-maxInterval=1"]),
            ["retry", "--", "-maxInterval=1"]
        );
    }

    #[test]
    fn help_takes_no_value() {
        assert_eq!(norm(&["retry", "-h", "true"]), ["retry", "-h", "true"]);
    }
}
