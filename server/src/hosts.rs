use dnsd_message::Lookup;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::path::Path;
use tracing::{debug, instrument, warn};

/// The static table names are answered from, read from a file in
/// `/etc/hosts` format:
///
/// ```text
/// # address   name   [alias...]
/// 192.0.2.1   www.example.com   example.com
/// ```
#[derive(Debug, Default)]
pub(crate) struct HostTable {
    entries: HashMap<String, Ipv4Addr>,
}

impl HostTable {
    #[instrument]
    pub fn from_file(path: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::parse(&text))
    }

    /// Lines that do not start with an IPv4 address are skipped. When a name
    /// appears more than once the first address wins.
    pub fn parse(text: &str) -> Self {
        let mut entries = HashMap::new();

        for (number, line) in text.lines().enumerate() {
            let line = match line.find('#') {
                Some(comment) => &line[..comment],
                None => line,
            };
            let mut fields = line.split_whitespace();
            let address = match fields.next() {
                Some(address) => address,
                None => continue,
            };

            let address: Ipv4Addr = match address.parse() {
                Ok(address) => address,
                Err(_) if address.parse::<Ipv6Addr>().is_ok() => {
                    debug!(line = number + 1, "Skipping IPv6 entry {}", address);
                    continue;
                }
                Err(_) => {
                    warn!(line = number + 1, "Skipping entry with bad address {:?}", address);
                    continue;
                }
            };

            let mut named = false;
            for name in fields {
                named = true;
                entries.entry(name.to_string()).or_insert(address);
            }
            if !named {
                warn!(line = number + 1, "Address {} has no names", address);
            }
        }

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Lookup for HostTable {
    fn lookup(&self, hostname: &str) -> Option<Ipv4Addr> {
        self.entries.get(hostname).copied()
    }
}
