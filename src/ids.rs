use std::collections::HashSet;

const SUFFIX_LEN: usize = 7;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Mints item identifiers of the form `<unix millis><7 base-36 chars>`.
///
/// Every id handed out (and every id the minter was seeded with) is
/// remembered, so ids minted in one burst never collide even when they share
/// the same millisecond.
#[derive(Debug, Default)]
pub struct IdMinter {
    issued: HashSet<String>,
}

impl IdMinter {
    /// Create a minter that will never return any of `existing`
    pub fn seeded<'a, I: IntoIterator<Item = &'a str>>(existing: I) -> Self {
        Self {
            issued: existing.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn mint(&mut self) -> String {
        let prefix = chrono::Utc::now().timestamp_millis();
        loop {
            let id = format!("{}{}", prefix, random_suffix());
            if self.issued.insert(id.clone()) {
                return id;
            }
            log::debug!("Id collision on {}, re-rolling suffix", id);
        }
    }
}

fn random_suffix() -> String {
    uuid::Uuid::new_v4()
        .as_bytes()
        .iter()
        .take(SUFFIX_LEN)
        .map(|b| BASE36[(*b as usize) % BASE36.len()] as char)
        .collect()
}
