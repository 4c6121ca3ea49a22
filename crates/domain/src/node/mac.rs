use regex::Regex;
use std::sync::LazyLock;

// 00:1B:44:11:3A:B7, 00-1B-44-11-3A-B7 or 001B.4411.3AB7
static MAC_ADDR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?:[0-9A-Fa-f]{2}[:-]){5}[0-9A-Fa-f]{2}|[0-9A-Fa-f]{4}\.[0-9A-Fa-f]{4}\.[0-9A-Fa-f]{4})$",
    )
    .expect("MAC address pattern is valid")
});

/// Validate a hardware address in colon, hyphen or dotted-hextet form.
pub fn is_mac_addr(addr: &str) -> bool {
    !addr.is_empty() && MAC_ADDR.is_match(addr)
}
