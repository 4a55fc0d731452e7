/// Ledger identifier parsing and id <-> address conversion
///
/// Ledger entities are identified as `shard.realm.num`. Their ledger address is
/// the 20-byte big-endian packing of shard (4 bytes), realm (8 bytes) and num
/// (8 bytes), written as 40 hex digits.
use crate::errors::CoreError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

static LEDGER_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)$").expect("valid regex")
});

static ADDRESS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(0[xX])?[0-9a-fA-F]{40}$").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId {
    pub shard: u32,
    pub realm: u64,
    pub num: u64,
}

impl EntityId {
    pub fn new(shard: u32, realm: u64, num: u64) -> Self {
        Self { shard, realm, num }
    }

    /// 40-hex ledger address (no `0x` prefix)
    pub fn to_address(&self) -> String {
        format!("{:08x}{:016x}{:016x}", self.shard, self.realm, self.num)
    }

    /// Decode a ledger address into its entity id
    pub fn from_address(address: &str) -> Result<Self, CoreError> {
        let address = address.trim();
        if !ADDRESS_RE.is_match(address) {
            return Err(CoreError::InvalidIdentifier {
                value: address.to_string(),
            });
        }
        let hex = &address[address.len() - 40..];
        let invalid = || CoreError::InvalidIdentifier {
            value: address.to_string(),
        };

        let shard = u32::from_str_radix(&hex[0..8], 16).map_err(|_| invalid())?;
        let realm = u64::from_str_radix(&hex[8..24], 16).map_err(|_| invalid())?;
        let num = u64::from_str_radix(&hex[24..40], 16).map_err(|_| invalid())?;
        Ok(Self { shard, realm, num })
    }
}

impl FromStr for EntityId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || CoreError::InvalidIdentifier {
            value: s.to_string(),
        };

        let caps = LEDGER_ID_RE.captures(s).ok_or_else(invalid)?;
        let shard = caps[1].parse::<u32>().map_err(|_| invalid())?;
        let realm = caps[2].parse::<u64>().map_err(|_| invalid())?;
        let num = caps[3].parse::<u64>().map_err(|_| invalid())?;
        Ok(Self { shard, realm, num })
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.shard, self.realm, self.num)
    }
}

/// Shape of a query that looks like a token identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierKind {
    /// `shard.realm.num`
    LedgerId(EntityId),
    /// 40 hex digits, optional `0x`
    Address(String),
}

impl IdentifierKind {
    /// The ledger id for the lookup call, when it can be derived locally
    pub fn lookup_id(&self) -> Option<EntityId> {
        match self {
            IdentifierKind::LedgerId(id) => Some(*id),
            IdentifierKind::Address(address) => EntityId::from_address(address)
                .ok()
                .filter(|_| is_long_zero_address(address)),
        }
    }
}

pub fn is_ledger_id_valid(value: &str) -> bool {
    value.trim().parse::<EntityId>().is_ok()
}

pub fn is_address_valid(value: &str) -> bool {
    ADDRESS_RE.is_match(value.trim())
}

/// Addresses whose shard and realm bytes are zero map directly to an entity id;
/// other addresses are EVM aliases that only the network can resolve
pub fn is_long_zero_address(address: &str) -> bool {
    let address = address.trim();
    is_address_valid(address)
        && address[address.len() - 40..address.len() - 16]
            .bytes()
            .all(|b| b == b'0')
}

/// Classify a query as an identifier, if it has one of the identifier shapes
pub fn classify_identifier(query: &str) -> Option<IdentifierKind> {
    let query = query.trim();
    if let Ok(id) = query.parse::<EntityId>() {
        return Some(IdentifierKind::LedgerId(id));
    }
    if is_address_valid(query) {
        return Some(IdentifierKind::Address(query.to_string()));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let id: EntityId = "0.0.1234".parse().unwrap();
        assert_eq!(id, EntityId::new(0, 0, 1234));
        assert_eq!(id.to_string(), "0.0.1234");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("0.0".parse::<EntityId>().is_err());
        assert!("0.0.01".parse::<EntityId>().is_err());
        assert!("a.b.c".parse::<EntityId>().is_err());
        assert!("0.0.99999999999999999999".parse::<EntityId>().is_err());
    }

    #[test]
    fn test_address_conversion() {
        let id = EntityId::new(0, 0, 1234);
        assert_eq!(id.to_address(), "00000000000000000000000000000000000004d2");

        let back = EntityId::from_address("0x00000000000000000000000000000000000004D2").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_nonzero_shard_round_trip() {
        let id = EntityId::new(1, 2, 3);
        assert_eq!(EntityId::from_address(&id.to_address()).unwrap(), id);
    }

    #[test]
    fn test_validators() {
        assert!(is_ledger_id_valid(" 0.0.42 "));
        assert!(!is_ledger_id_valid("0.0.42.1"));
        assert!(is_address_valid("0x00000000000000000000000000000000000004d2"));
        assert!(is_address_valid("00000000000000000000000000000000000004d2"));
        assert!(!is_address_valid("0x04d2"));
        assert!(!is_address_valid("0xzz000000000000000000000000000000000004d2"));
    }

    #[test]
    fn test_long_zero_detection() {
        assert!(is_long_zero_address("0x00000000000000000000000000000000000004d2"));
        assert!(!is_long_zero_address("0x5fbdb2315678afecb367f032d93f642f64180aa3"));
    }

    #[test]
    fn test_classify_identifier() {
        assert_eq!(
            classify_identifier("0.0.5"),
            Some(IdentifierKind::LedgerId(EntityId::new(0, 0, 5)))
        );
        assert!(matches!(
            classify_identifier("0x5fbdb2315678afecb367f032d93f642f64180aa3"),
            Some(IdentifierKind::Address(_))
        ));
        assert_eq!(classify_identifier("usdc"), None);
    }

    #[test]
    fn test_lookup_id_for_alias_address() {
        let alias = IdentifierKind::Address("0x5fbdb2315678afecb367f032d93f642f64180aa3".to_string());
        assert_eq!(alias.lookup_id(), None);

        let long_zero =
            IdentifierKind::Address("00000000000000000000000000000000000004d2".to_string());
        assert_eq!(long_zero.lookup_id(), Some(EntityId::new(0, 0, 1234)));
    }
}
