//! URI-reference grammar for data-source URLs
//!
//! Structural check only: the reference is split into scheme, authority,
//! path, query and fragment and each part is checked for malformed syntax.
//! The query is never inspected, ports are any run of digits, and a string
//! without a scheme is a relative reference.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UriError {
    #[error("invalid control character in URL")]
    ControlCharacter,
    #[error("missing protocol scheme")]
    MissingScheme,
    #[error("first path segment in URL cannot contain colon")]
    ColonInFirstSegment,
    #[error("missing ']' in host")]
    UnclosedBracket,
    #[error("invalid port {0:?} after host")]
    InvalidPort(String),
    #[error("invalid character {0:?} in host name")]
    InvalidHostCharacter(char),
    #[error("invalid userinfo")]
    InvalidUserinfo,
    #[error("invalid URL escape {0:?}")]
    InvalidEscape(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Component {
    Host,
    Zone,
    Userinfo,
    Path,
    Fragment,
}

/// Check `raw` against the URI-reference grammar
pub fn check_uri_reference(raw: &str) -> Result<(), UriError> {
    let (reference, fragment) = match raw.split_once('#') {
        Some((reference, fragment)) => (reference, fragment),
        None => (raw, ""),
    };

    check_reference(reference)?;
    check_escapes(fragment, Component::Fragment)
}

fn check_reference(reference: &str) -> Result<(), UriError> {
    if reference.bytes().any(|b| b < 0x20 || b == 0x7f) {
        return Err(UriError::ControlCharacter);
    }
    if reference == "*" {
        return Ok(());
    }

    let (scheme, rest) = split_scheme(reference)?;
    let rest = match rest.split_once('?') {
        Some((rest, _query)) => rest,
        None => rest,
    };

    if !rest.starts_with('/') {
        // opaque, e.g. "mailto:ops@example.com"
        if scheme.is_some() {
            return Ok(());
        }
        let first_segment = rest.split('/').next().unwrap_or_default();
        if first_segment.contains(':') {
            return Err(UriError::ColonInFirstSegment);
        }
    }

    let mut path = rest;
    if (scheme.is_some() || !rest.starts_with("///")) && rest.starts_with("//") {
        let authority = &rest[2..];
        let (authority, after) = match authority.find('/') {
            Some(i) => (&authority[..i], &authority[i..]),
            None => (authority, ""),
        };
        check_authority(authority)?;
        path = after;
    }

    check_escapes(path, Component::Path)
}

/// Split off a leading `scheme:`. Anything that is not a well-formed scheme
/// leaves the whole reference as the remainder.
fn split_scheme(reference: &str) -> Result<(Option<&str>, &str), UriError> {
    for (i, b) in reference.bytes().enumerate() {
        match b {
            b'a'..=b'z' | b'A'..=b'Z' => {}
            b'0'..=b'9' | b'+' | b'-' | b'.' => {
                if i == 0 {
                    return Ok((None, reference));
                }
            }
            b':' => {
                if i == 0 {
                    return Err(UriError::MissingScheme);
                }
                return Ok((Some(&reference[..i]), &reference[i + 1..]));
            }
            _ => return Ok((None, reference)),
        }
    }
    Ok((None, reference))
}

fn check_authority(authority: &str) -> Result<(), UriError> {
    let (userinfo, host) = match authority.rfind('@') {
        Some(i) => (Some(&authority[..i]), &authority[i + 1..]),
        None => (None, authority),
    };

    check_host(host)?;

    if let Some(userinfo) = userinfo {
        if !userinfo.bytes().all(is_userinfo_byte) {
            return Err(UriError::InvalidUserinfo);
        }
        check_escapes(userinfo, Component::Userinfo)?;
    }
    Ok(())
}

fn check_host(host: &str) -> Result<(), UriError> {
    if host.starts_with('[') {
        let close = host.rfind(']').ok_or(UriError::UnclosedBracket)?;
        check_port(&host[close + 1..])?;

        // IPv6 zone, e.g. "[fe80::1%25eth0]"
        if let Some(zone) = host[..close].find("%25") {
            check_escapes(&host[..zone], Component::Host)?;
            check_escapes(&host[zone..close], Component::Zone)?;
            return check_escapes(&host[close..], Component::Host);
        }
    } else if let Some(colon) = host.rfind(':') {
        check_port(&host[colon..])?;
    }

    check_escapes(host, Component::Host)
}

fn check_port(colon_port: &str) -> Result<(), UriError> {
    if colon_port.is_empty() {
        return Ok(());
    }
    match colon_port.strip_prefix(':') {
        Some(port) if port.bytes().all(|b| b.is_ascii_digit()) => Ok(()),
        _ => Err(UriError::InvalidPort(colon_port.to_string())),
    }
}

fn check_escapes(s: &str, component: Component) -> Result<(), UriError> {
    let bytes = s.as_bytes();
    let in_host = matches!(component, Component::Host | Component::Zone);
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let (hi, lo) = match bytes.get(i + 1..i + 3) {
                    Some(&[hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => (hi, lo),
                    _ => return Err(invalid_escape(bytes, i)),
                };
                let is_percent = hi == b'2' && lo == b'5';
                let decoded = hex_value(hi) << 4 | hex_value(lo);

                // hosts may only escape non-ASCII bytes
                if component == Component::Host && hex_value(hi) < 8 && !is_percent {
                    return Err(invalid_escape(bytes, i));
                }
                if component == Component::Zone
                    && !is_percent
                    && decoded != b' '
                    && !is_host_byte(decoded)
                {
                    return Err(invalid_escape(bytes, i));
                }
                i += 3;
            }
            b if in_host && b.is_ascii() && !is_host_byte(b) => {
                return Err(UriError::InvalidHostCharacter(b as char));
            }
            _ => i += 1,
        }
    }
    Ok(())
}

fn invalid_escape(bytes: &[u8], at: usize) -> UriError {
    let end = (at + 3).min(bytes.len());
    UriError::InvalidEscape(String::from_utf8_lossy(&bytes[at..end]).into_owned())
}

fn hex_value(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        b'A'..=b'F' => b - b'A' + 10,
        _ => 0,
    }
}

fn is_host_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'!' | b'$'
                | b'&'
                | b'\''
                | b'('
                | b')'
                | b'*'
                | b'+'
                | b','
                | b';'
                | b'='
                | b':'
                | b'['
                | b']'
                | b'<'
                | b'>'
                | b'"'
                | b'-'
                | b'_'
                | b'.'
                | b'~'
        )
}

fn is_userinfo_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'-' | b'.'
                | b'_'
                | b':'
                | b'~'
                | b'!'
                | b'$'
                | b'&'
                | b'\''
                | b'('
                | b')'
                | b'*'
                | b'+'
                | b','
                | b';'
                | b'='
                | b'%'
                | b'@'
        )
}
