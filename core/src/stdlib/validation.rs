//! Validation Functions
//!
//! Predicates over the textual form of their arguments. A value is tested
//! through its `Display` rendering, so `IS_INTEGER(5)` and `IS_INTEGER('5')`
//! agree.
//!
//! Design notes:
//! - Every argument must be non-null and valid for the call to be true
//! - Domain checks follow RFC 1034 section 3 and RFC 1123 section 2.1, with
//!   an alphabetic top-level label instead of a registry lookup

use crate::api::Context;
use crate::resolver::{FunctionError, FunctionInfo, FunctionRegistryBuilder, StellarFunction};
use crate::values::Value;
use crate::{String, ToString};
use alloc::borrow::Cow;
use core::net::{Ipv4Addr, Ipv6Addr};
use core::str::FromStr;

/// Lifts a single-string predicate to a function over all its arguments.
#[derive(Clone, Copy)]
pub struct AllValid {
    predicate: fn(&str) -> bool,
}

impl AllValid {
    pub const fn new(predicate: fn(&str) -> bool) -> Self {
        Self { predicate }
    }

    fn test(&self, value: &Value) -> bool {
        !value.is_null() && (self.predicate)(&text(value))
    }
}

impl StellarFunction for AllValid {
    fn apply(&self, args: &[Value], _context: &Context) -> Result<Value, FunctionError> {
        FunctionError::check_arity(args, 1, usize::MAX)?;
        Ok(Value::Bool(args.iter().all(|arg| self.test(arg))))
    }

    fn is_initialized(&self) -> bool {
        true
    }
}

fn text(value: &Value) -> Cow<'_, str> {
    match value.as_str() {
        Some(s) => Cow::Borrowed(s),
        None => Cow::Owned(value.to_string()),
    }
}

// ============================================================================
// Predicates
// ============================================================================

pub fn is_integer(s: &str) -> bool {
    i64::from_str(s).is_ok()
}

pub fn is_ipv4(s: &str) -> bool {
    Ipv4Addr::from_str(s).is_ok()
}

pub fn is_ipv6(s: &str) -> bool {
    Ipv6Addr::from_str(s).is_ok()
}

pub fn is_ip(s: &str) -> bool {
    is_ipv4(s) || is_ipv6(s)
}

pub fn is_domain(s: &str) -> bool {
    let s = s.strip_suffix('.').unwrap_or(s);
    if s.is_empty() || s.len() > 253 {
        return false;
    }
    let labels: crate::Vec<&str> = s.split('.').collect();
    let Some((tld, rest)) = labels.split_last() else {
        return false;
    };
    !rest.is_empty()
        && rest.iter().all(|label| is_label(label))
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphabetic())
}

fn is_label(label: &str) -> bool {
    (1..=63).contains(&label.len())
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

pub fn is_email(s: &str) -> bool {
    let Some((local, domain)) = s.rsplit_once('@') else {
        return false;
    };
    is_local_part(local) && (is_domain(domain) || is_bracketed_ipv4(domain))
}

fn is_local_part(local: &str) -> bool {
    const SPECIALS: &str = "!#$%&'*+/=?^_`{|}~-";
    (1..=64).contains(&local.len())
        && !local.starts_with('.')
        && !local.ends_with('.')
        && !local.contains("..")
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || SPECIALS.contains(c))
}

fn is_bracketed_ipv4(s: &str) -> bool {
    s.strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .is_some_and(is_ipv4)
}

/// `http`, `https` and `ftp` URLs with a domain or IP host.
pub fn is_url(s: &str) -> bool {
    let Some((scheme, rest)) = s.split_once("://") else {
        return false;
    };
    let scheme = scheme.to_ascii_lowercase();
    if !matches!(scheme.as_str(), "http" | "https" | "ftp") {
        return false;
    }
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let authority = &rest[..authority_end];
    let host_port = match authority.rsplit_once('@') {
        Some((user_info, host_port)) => {
            if user_info.is_empty() {
                return false;
            }
            host_port
        }
        None => authority,
    };
    let (host, port) = split_port(host_port);
    if let Some(port) = port {
        if port.is_empty() || u16::from_str(port).is_err() {
            return false;
        }
    }
    match host.strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
        Some(v6) => is_ipv6(v6),
        None => is_ipv4(host) || is_domain(host),
    }
}

fn split_port(host_port: &str) -> (&str, Option<&str>) {
    if host_port.starts_with('[') {
        return match host_port.find("]:") {
            Some(i) => (&host_port[..=i], Some(&host_port[i + 2..])),
            None => (host_port, None),
        };
    }
    match host_port.rsplit_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (host_port, None),
    }
}

// ============================================================================
// IS_IP
// ============================================================================

/// `IS_IP(ip, type?)`: `type` is `IPV4`, `IPV6`, or anything else for either.
/// Arguments after the second are ignored.
fn is_ip_function(args: &[Value], _context: &Context) -> Result<Value, FunctionError> {
    let Some(ip) = args.first().filter(|ip| !ip.is_null()) else {
        return Ok(Value::Bool(false));
    };
    let ip = text(ip);
    let kind: Option<String> = args
        .get(1)
        .filter(|kind| !kind.is_null())
        .map(|kind| text(kind).into_owned());
    let valid = match kind.as_deref() {
        Some("IPV4") => is_ipv4(&ip),
        Some("IPV6") => is_ipv6(&ip),
        _ => is_ip(&ip),
    };
    Ok(Value::Bool(valid))
}

pub fn register(builder: &mut FunctionRegistryBuilder) {
    let predicates: [(FunctionInfo, fn(&str) -> bool); 4] = [
        (
            FunctionInfo::new("IS_INTEGER", "Determines whether or not an object is an integer.")
                .params(&["x - The object to test"])
                .returns("True if the object can be converted to an integer and false if otherwise."),
            is_integer,
        ),
        (
            FunctionInfo::new(
                "IS_DOMAIN",
                "Tests if a string refers to a valid domain name. Domain names are evaluated according to the standards RFC1034 section 3, and RFC1123 section 2.1.",
            )
            .params(&["address - The string to test"])
            .returns("True if the string refers to a valid domain name and false if otherwise"),
            is_domain,
        ),
        (
            FunctionInfo::new("IS_EMAIL", "Tests if a string is a valid email address")
                .params(&["address - The string to test"])
                .returns("True if the string is a valid email address and false if otherwise."),
            is_email,
        ),
        (
            FunctionInfo::new("IS_URL", "Tests if a string is a valid URL")
                .params(&["url - The string to test"])
                .returns("True if the string is a valid URL and false if otherwise."),
            is_url,
        ),
    ];
    for (info, predicate) in predicates {
        builder.register(info, move || AllValid::new(predicate));
    }
    super::register_native(
        builder,
        FunctionInfo::new(
            "IS_IP",
            "Determine if an string is an IP or not. Excess arguments after the first two are ignored.",
        )
        .params(&[
            "ip - An object which we wish to test is an ip",
            "type (optional) - One of IPV4 or IPV6. Either is accepted by default.",
        ])
        .returns("True if the string is an IP and false otherwise."),
        is_ip_function,
    );
}
