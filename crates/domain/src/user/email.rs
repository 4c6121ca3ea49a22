//! Syntactic email validation.
//!
//! Rules:
//! - exactly one `@`
//! - local part non-empty, at most 64 bytes, no leading, trailing or doubled dots
//! - host made of at least two non-empty dot separated labels
//! - domain (host without the TLD) at most 255 bytes, TLD at most 24 bytes

const MAX_LOCAL_LEN: usize = 64;
const MAX_DOMAIN_LEN: usize = 255;
const MAX_TLD_LEN: usize = 24; // longest TLD currently in existence

const LOCAL_SPECIALS: &str = "!#$%&'*+/=?^_`{|}~.-";

pub fn is_email(email: &str) -> bool {
    if email.is_empty() {
        return false;
    }

    let Some((local, host)) = email.split_once('@') else {
        return false;
    };
    if host.contains('@') {
        return false;
    }

    if local.is_empty() || local.len() > MAX_LOCAL_LEN {
        return false;
    }

    let Some((domain, tld)) = host.rsplit_once('.') else {
        return false;
    };

    if domain.is_empty() || domain.split('.').any(str::is_empty) || domain.len() > MAX_DOMAIN_LEN
    {
        return false;
    }
    if tld.is_empty() || tld.len() > MAX_TLD_LEN {
        return false;
    }

    valid_local(local) && !host.chars().any(char::is_whitespace)
}

fn valid_local(local: &str) -> bool {
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }

    // Non-ASCII characters are accepted as internationalized local parts.
    local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || LOCAL_SPECIALS.contains(c) || !c.is_ascii())
}
