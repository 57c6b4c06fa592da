//! Structured taskwarrior invocations.

use serde::Serialize;

/// One taskwarrior invocation: a verb plus its arguments.
///
/// Arguments stay a list until the process boundary; the string form is only
/// for display and logging.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SynthesizedCommand {
    pub verb: String,
    pub args: Vec<String>,
}

impl SynthesizedCommand {
    pub fn new(verb: impl Into<String>, args: Vec<String>) -> Self {
        Self { verb: verb.into(), args }
    }

    /// Parse a raw command line such as `"add 'call bob' due:tomorrow"`.
    ///
    /// The first word is the verb. Returns `None` for a blank line.
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = tokenize(line).into_iter();
        let verb = words.next()?;
        Some(Self { verb, args: words.collect() })
    }

    /// Arguments joined by single spaces.
    pub fn argument_string(&self) -> String {
        self.args.join(" ")
    }

    /// Process argument vector, verb first.
    pub fn to_argv(&self) -> Vec<String> {
        std::iter::once(self.verb.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }
}

impl std::fmt::Display for SynthesizedCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.verb, self.argument_string())
    }
}

/// Split text into words with shell quoting rules.
///
/// Unbalanced quotes (`don't forget`) fall back to plain whitespace splitting
/// so free text never fails to tokenize.
pub fn tokenize(text: &str) -> Vec<String> {
    shell_words::split(text).unwrap_or_else(|_| split_words(text))
}

/// Split free text on whitespace only.
///
/// Task descriptions keep backslashes and quote characters as written.
pub fn split_words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}
