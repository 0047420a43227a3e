use std::fmt;
use std::str::FromStr;

/// Scheme prefix that marks text as a direct content address.
pub const SCHEME: &str = "rove://";

/// A validated, canonical content address.
///
/// Two forms exist: `rove://name` for standalone content and
/// `rove://@channel/name` for content published under a channel.
/// Canonical form is lowercase with no trailing slashes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator {
    channel: Option<String>,
    name: String,
}

/// Errors produced while parsing a locator.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum LocatorError {
    #[error("missing '{SCHEME}' scheme")]
    MissingScheme,
    #[error("locator has no name")]
    EmptyName,
    #[error("invalid character '{0}' in locator segment")]
    InvalidCharacter(char),
    #[error("too many path segments")]
    TooManySegments,
}

impl Locator {
    /// Channel segment without the leading `@`, if present.
    pub fn channel(&self) -> Option<&str> {
        self.channel.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Whether text should be treated as a locator rather than a search term.
///
/// This is classification only; the text may still fail to parse.
pub fn is_locator_like(text: &str) -> bool {
    text.trim_start().starts_with(SCHEME)
}

/// Parse text into canonical form. Shorthand for `text.parse()`.
pub fn normalize(text: &str) -> Result<Locator, LocatorError> {
    text.parse()
}

impl FromStr for Locator {
    type Err = LocatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let rest = trimmed
            .strip_prefix(SCHEME)
            .ok_or(LocatorError::MissingScheme)?;
        let rest = rest.trim_end_matches('/');

        let mut segments = rest.split('/');
        let first = segments.next().unwrap_or("");
        let second = segments.next();
        if segments.next().is_some() {
            return Err(LocatorError::TooManySegments);
        }

        let (channel, name) = match second {
            Some(name) => {
                let channel = first
                    .strip_prefix('@')
                    .ok_or(LocatorError::InvalidCharacter('/'))?;
                (Some(channel), name)
            }
            None => match first.strip_prefix('@') {
                // A bare channel address is itself valid content.
                Some(channel) => (Some(channel), ""),
                None => (None, first),
            },
        };

        let channel = channel.map(validate_segment).transpose()?;
        let name = if name.is_empty() && channel.is_some() {
            String::new()
        } else {
            validate_segment(name)?
        };

        if name.is_empty() && channel.is_none() {
            return Err(LocatorError::EmptyName);
        }

        Ok(Locator { channel, name })
    }
}

fn validate_segment(segment: &str) -> Result<String, LocatorError> {
    if segment.is_empty() {
        return Err(LocatorError::EmptyName);
    }
    for c in segment.chars() {
        if !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')) {
            return Err(LocatorError::InvalidCharacter(c));
        }
    }
    Ok(segment.to_ascii_lowercase())
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.channel, self.name.is_empty()) {
            (Some(channel), true) => write!(f, "{SCHEME}@{channel}"),
            (Some(channel), false) => write!(f, "{SCHEME}@{channel}/{}", self.name),
            (None, _) => write!(f, "{SCHEME}{}", self.name),
        }
    }
}
