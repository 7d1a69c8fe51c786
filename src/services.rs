//! Service naming from well-known port numbers.
//!
//! A static IANA-style table; no I/O, no failure path. Ports outside the
//! table name as "unknown".

use std::collections::HashMap;
use std::sync::LazyLock;

/// Well-known TCP ports and their conventional service names.
const WELL_KNOWN: &[(u16, &str)] = &[
    (20, "ftp-data"),
    (21, "ftp"),
    (22, "ssh"),
    (23, "telnet"),
    (25, "smtp"),
    (43, "whois"),
    (53, "domain"),
    (69, "tftp"),
    (79, "finger"),
    (80, "http"),
    (88, "kerberos"),
    (110, "pop3"),
    (111, "rpcbind"),
    (113, "ident"),
    (119, "nntp"),
    (123, "ntp"),
    (135, "msrpc"),
    (139, "netbios-ssn"),
    (143, "imap"),
    (179, "bgp"),
    (194, "irc"),
    (389, "ldap"),
    (427, "svrloc"),
    (443, "https"),
    (445, "microsoft-ds"),
    (465, "smtps"),
    (514, "syslog"),
    (515, "printer"),
    (543, "klogin"),
    (548, "afp"),
    (554, "rtsp"),
    (587, "submission"),
    (631, "ipp"),
    (636, "ldaps"),
    (873, "rsync"),
    (990, "ftps"),
    (993, "imaps"),
    (995, "pop3s"),
    (1080, "socks"),
    (1194, "openvpn"),
    (1433, "ms-sql-s"),
    (1521, "oracle"),
    (1723, "pptp"),
    (1883, "mqtt"),
    (2049, "nfs"),
    (2181, "zookeeper"),
    (2375, "docker"),
    (3128, "squid-http"),
    (3306, "mysql"),
    (3389, "ms-wbt-server"),
    (3690, "svn"),
    (5060, "sip"),
    (5222, "xmpp-client"),
    (5432, "postgresql"),
    (5672, "amqp"),
    (5900, "vnc"),
    (5984, "couchdb"),
    (6379, "redis"),
    (6667, "irc"),
    (8000, "http-alt"),
    (8080, "http-proxy"),
    (8443, "https-alt"),
    (8888, "http-alt"),
    (9090, "websm"),
    (9092, "kafka"),
    (9200, "elasticsearch"),
    (9418, "git"),
    (11211, "memcached"),
    (27017, "mongodb"),
];

static SERVICE_TABLE: LazyLock<HashMap<u16, &'static str>> =
    LazyLock::new(|| WELL_KNOWN.iter().copied().collect());

/// Look up the conventional service name for a port.
///
/// Returns `None` for ports outside the well-known table.
pub fn lookup(port: u16) -> Option<&'static str> {
    SERVICE_TABLE.get(&port).copied()
}

/// The conventional service name for a port, or "unknown".
pub fn name_for(port: u16) -> &'static str {
    lookup(port).unwrap_or("unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_ports() {
        assert_eq!(lookup(22), Some("ssh"));
        assert_eq!(lookup(80), Some("http"));
        assert_eq!(lookup(443), Some("https"));
        assert_eq!(lookup(5432), Some("postgresql"));
    }

    #[test]
    fn test_unmapped_port_names_unknown() {
        assert_eq!(lookup(47283), None);
        assert_eq!(name_for(47283), "unknown");
    }

    #[test]
    fn test_name_for_is_idempotent() {
        assert_eq!(name_for(80), name_for(80));
        assert_eq!(name_for(47283), name_for(47283));
    }
}
