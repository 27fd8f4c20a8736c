//! # SIWS Message Parser
//!
//! Parses the human-readable message a wallet signs:
//!
//! ```text
//! ${domain} wants you to sign in with your ${chain} account:
//! ${address}
//!
//! ${statement}
//!
//! URI: ${uri}
//! Version: ${version}
//! Nonce: ${nonce}
//! Issued At: ${issued-at}
//! Expiration Time: ${expiration-time}
//! ```
//!
//! The statement and version lines are optional. Fields appear in this
//! order; lines after the expiration time are ignored.
//!
//! Parsing also validates every field: the domain must be a bare URL
//! authority, the URI must be an RFC 3986 URI reference, the account must
//! be a valid SS58 address, both timestamps must be RFC 3339 with a `T`
//! separator, and the message must not have expired at the verification
//! instant.
//!
//! A line after the account is the statement when it is followed by a blank
//! line, even if it starts with a field tag such as `Nonce: `.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::config::SiwsConfig;
use super::entities::{MessageField, SiwsMessage};
use super::errors::SiwsError;
use super::ss58;

const HEADER_SEPARATOR: &str = " wants you to sign in with your ";
const HEADER_SUFFIX: &str = " account:";

const URI_TAG: &str = "URI: ";
const VERSION_TAG: &str = "Version: ";
const NONCE_TAG: &str = "Nonce: ";
const ISSUED_AT_TAG: &str = "Issued At: ";
const EXPIRATION_TIME_TAG: &str = "Expiration Time: ";

const FIELD_TAGS: [&str; 5] = [
    URI_TAG,
    VERSION_TAG,
    NONCE_TAG,
    ISSUED_AT_TAG,
    EXPIRATION_TIME_TAG,
];

/// Parses and validates SIWS messages.
#[derive(Clone, Debug, Default)]
pub struct MessageParser {
    max_message_bytes: Option<usize>,
    expected_domain: Option<String>,
}

impl MessageParser {
    /// Create a parser applying the size cap and domain pin from `config`.
    pub fn new(config: &SiwsConfig) -> Self {
        Self {
            max_message_bytes: config.max_message_bytes,
            expected_domain: config.expected_domain.clone(),
        }
    }

    /// Parse `message`, checking expiry against the system clock.
    pub fn parse(&self, message: &str) -> Result<SiwsMessage, SiwsError> {
        self.parse_at(message, Utc::now())
    }

    /// Parse `message`, checking expiry against `now`.
    pub fn parse_at(&self, message: &str, now: DateTime<Utc>) -> Result<SiwsMessage, SiwsError> {
        if let Some(max) = self.max_message_bytes {
            if message.len() > max {
                return Err(SiwsError::MessageTooLarge {
                    size: message.len(),
                    max,
                });
            }
        }

        let raw = RawFields::scan(message).inspect_err(|err| {
            debug!(error = %err, "SIWS message does not match the grammar");
        })?;

        validate_uri(raw.uri)?;
        validate_domain(raw.domain)?;

        if let Some(expected) = &self.expected_domain {
            if raw.domain != expected.as_str() {
                debug!(expected = %expected, actual = %raw.domain, "SIWS domain rejected");
                return Err(SiwsError::DomainMismatch {
                    expected: expected.clone(),
                    actual: raw.domain.to_string(),
                });
            }
        }

        ss58::decode(raw.account)?;

        let issued_at = parse_timestamp(raw.issued_at, MessageField::IssuedAt)?;
        let expire_at = parse_timestamp(raw.expiration_time, MessageField::ExpireAt)?;

        if now >= expire_at {
            debug!(expired_at = %expire_at, now = %now, "SIWS message expired");
            return Err(SiwsError::MessageExpired {
                expired_at: expire_at,
            });
        }

        Ok(SiwsMessage {
            domain: raw.domain.to_string(),
            chain_name: raw.chain_name.to_string(),
            address: raw.account.to_string(),
            statement: raw.statement.map(str::to_string),
            uri: raw.uri.to_string(),
            version: raw.version.map(str::to_string),
            nonce: raw.nonce.to_string(),
            issued_at,
            expire_at,
        })
    }
}

/// Parse `message` with the default parser against the system clock.
pub fn parse(message: &str) -> Result<SiwsMessage, SiwsError> {
    MessageParser::default().parse(message)
}

// =============================================================================
// GRAMMAR
// =============================================================================

/// Field values sliced out of the message text, before validation.
struct RawFields<'a> {
    domain: &'a str,
    chain_name: &'a str,
    account: &'a str,
    statement: Option<&'a str>,
    uri: &'a str,
    version: Option<&'a str>,
    nonce: &'a str,
    issued_at: &'a str,
    expiration_time: &'a str,
}

impl<'a> RawFields<'a> {
    fn scan(message: &'a str) -> Result<Self, SiwsError> {
        let mut lines = LineScanner::new(message);

        let (domain, chain_name) = lines
            .next_line()
            .and_then(parse_header)
            .ok_or(SiwsError::MissingField(MessageField::Domain))?;

        let account = lines
            .next_line()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !is_field_line(line))
            .ok_or(SiwsError::MissingField(MessageField::Account))?;

        lines.skip_blank();
        let statement = match lines.peek() {
            Some(line) if !is_field_line(line) || lines.followed_by_blank() => {
                lines.next_line();
                lines.skip_blank();
                Some(line.trim())
            }
            _ => None,
        };

        let uri = lines.required(URI_TAG, MessageField::Uri)?;
        let version = lines.optional(VERSION_TAG);
        let nonce = lines.required(NONCE_TAG, MessageField::Nonce)?;
        let issued_at = lines.required(ISSUED_AT_TAG, MessageField::IssuedAt)?;
        let expiration_time = lines.required(EXPIRATION_TIME_TAG, MessageField::ExpireAt)?;

        Ok(Self {
            domain,
            chain_name,
            account,
            statement,
            uri,
            version,
            nonce,
            issued_at,
            expiration_time,
        })
    }
}

/// Splits `<domain> wants you to sign in with your <chain> account:`.
fn parse_header(line: &str) -> Option<(&str, &str)> {
    let (domain, chain_name) = line
        .trim_end()
        .strip_suffix(HEADER_SUFFIX)?
        .split_once(HEADER_SEPARATOR)?;

    (!domain.is_empty()).then_some((domain, chain_name))
}

fn is_field_line(line: &str) -> bool {
    FIELD_TAGS.iter().any(|tag| line.starts_with(tag))
}

struct LineScanner<'a> {
    lines: std::iter::Peekable<std::str::Lines<'a>>,
}

impl<'a> LineScanner<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().peekable(),
        }
    }

    fn next_line(&mut self) -> Option<&'a str> {
        self.lines.next()
    }

    fn peek(&mut self) -> Option<&'a str> {
        self.lines.peek().copied()
    }

    /// Whether the line after the next one is blank.
    fn followed_by_blank(&self) -> bool {
        let mut ahead = self.lines.clone();
        ahead.next();
        ahead.next().is_some_and(|line| line.trim().is_empty())
    }

    fn skip_blank(&mut self) {
        while self.lines.next_if(|line| line.trim().is_empty()).is_some() {}
    }

    /// Consume the next line if it carries `tag` and a non-empty value.
    fn optional(&mut self, tag: &str) -> Option<&'a str> {
        let value = self.peek()?.strip_prefix(tag)?.trim();
        if value.is_empty() {
            return None;
        }
        self.lines.next();
        Some(value)
    }

    fn required(&mut self, tag: &str, field: MessageField) -> Result<&'a str, SiwsError> {
        self.optional(tag).ok_or(SiwsError::MissingField(field))
    }
}

// =============================================================================
// FIELD VALIDATION
// =============================================================================

/// The domain must survive a round trip as the authority of an `https` URL.
fn validate_domain(domain: &str) -> Result<(), SiwsError> {
    let url = format!("https://{domain}");
    let parsed: http::Uri = url
        .parse()
        .map_err(|err: http::uri::InvalidUri| SiwsError::InvalidDomain(format!("{domain}: {err}")))?;

    match parsed.authority() {
        Some(authority) if authority.as_str() == domain => Ok(()),
        _ => {
            debug!(domain = %domain, "SIWS domain is not a bare authority");
            Err(SiwsError::InvalidDomain(domain.to_string()))
        }
    }
}

fn validate_uri(uri: &str) -> Result<(), SiwsError> {
    iri_string::types::UriReferenceStr::new(uri)
        .map(|_| ())
        .map_err(|err| SiwsError::InvalidUri {
            uri: uri.to_string(),
            reason: err.to_string(),
        })
}

/// RFC 3339 date-time. chrono also accepts a space separator, which is rejected here.
fn parse_timestamp(value: &str, field: MessageField) -> Result<DateTime<Utc>, SiwsError> {
    if !matches!(value.as_bytes().get(10), Some(b'T' | b't')) {
        return Err(SiwsError::MalformedTimestamp {
            field,
            reason: format!("{value}: expected 'T' between date and time"),
        });
    }

    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|err| SiwsError::MalformedTimestamp {
            field,
            reason: format!("{value}: {err}"),
        })
}
