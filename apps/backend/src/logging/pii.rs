use std::fmt;
use std::net::IpAddr;
use std::sync::LazyLock;

use regex::Regex;

/// Regex patterns used for log redaction.
pub struct PiiRegexRegistry;

impl PiiRegexRegistry {
    pub fn email() -> &'static Regex {
        static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap()
        });
        &EMAIL_REGEX
    }

    pub fn ipv4() -> &'static Regex {
        static IPV4_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b(\d{1,3})\.(\d{1,3})\.\d{1,3}\.\d{1,3}\b").unwrap()
        });
        &IPV4_REGEX
    }

    /// Hex runs of 16+ characters (hashes, session ids)
    pub fn hex_token() -> &'static Regex {
        static HEX_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Fa-f0-9]{16,}\b").unwrap()
        });
        &HEX_TOKEN_REGEX
    }

    /// Quoted literals as they appear in SQL error text
    pub fn quoted_literal() -> &'static Regex {
        static QUOTED_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"'[^']*'").unwrap()
        });
        &QUOTED_REGEX
    }
}

/// Masks an IP address for logging: IPv4 keeps the first two octets,
/// IPv6 keeps the first two groups. Unparseable input is fully masked.
pub fn mask_ip(raw: &str) -> String {
    match raw.trim().parse::<IpAddr>() {
        Ok(IpAddr::V4(v4)) => {
            let o = v4.octets();
            format!("{}.{}.x.x", o[0], o[1])
        }
        Ok(IpAddr::V6(v6)) => {
            let s = v6.segments();
            format!("{:x}:{:x}:x:x:x:x:x:x", s[0], s[1])
        }
        Err(_) => "[REDACTED_IP]".to_string(),
    }
}

/// Redacts emails, IPv4 addresses, long hex tokens and quoted SQL literals.
pub fn redact(input: &str) -> String {
    let out = PiiRegexRegistry::email().replace_all(input, |caps: &regex::Captures| {
        let full = &caps[0];
        match full.find('@') {
            Some(0) | None => full.to_string(),
            Some(at) => format!("{}***{}", &full[..1], &full[at..]),
        }
    });
    let out = PiiRegexRegistry::ipv4().replace_all(&out, "$1.$2.x.x");
    let out = PiiRegexRegistry::quoted_literal().replace_all(&out, "'[REDACTED]'");
    PiiRegexRegistry::hex_token()
        .replace_all(&out, "[REDACTED_TOKEN]")
        .to_string()
}

/// Display wrapper that applies [`redact`] when formatted.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}
