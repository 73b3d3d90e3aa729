//! Address strkey handling.
//!
//! Addresses travel through the native boundary as prefixed strkey strings.
//! The first character selects the kind: `G` for an account, `M` for a muxed
//! account and `C` for a contract.

use stellar_strkey::{ed25519, Contract, Strkey};

use crate::errors::{ScvalError, ScvalResult};
use crate::wire::ScAddress;

/// Parse a strkey string into an address payload.
pub fn parse_address(s: &str) -> ScvalResult<ScAddress> {
    let mismatch = || ScvalError::type_mismatch("Address", format!("string {s:?}"));

    match s.chars().next() {
        Some('G' | 'M' | 'C') => {}
        _ => return Err(mismatch()),
    }

    match Strkey::from_string(s).map_err(|_| mismatch())? {
        Strkey::PublicKeyEd25519(ed25519::PublicKey(key)) => Ok(ScAddress::Account(key)),
        Strkey::MuxedAccountEd25519(ed25519::MuxedAccount { ed25519, id }) => {
            Ok(ScAddress::MuxedAccount { id, ed25519 })
        }
        Strkey::Contract(Contract(id)) => Ok(ScAddress::Contract(id)),
        _ => Err(mismatch()),
    }
}

/// Render an address payload as a strkey string.
pub fn format_address(addr: &ScAddress) -> String {
    match addr {
        ScAddress::Account(key) => ed25519::PublicKey(*key).to_string(),
        ScAddress::Contract(id) => Contract(*id).to_string(),
        ScAddress::MuxedAccount { id, ed25519 } => ed25519::MuxedAccount {
            ed25519: *ed25519,
            id: *id,
        }
        .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const ZERO_ACCOUNT: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";
    const ZERO_CONTRACT: &str = "CAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAABSC4";
    const ACCOUNT: &str = "GA3D5KRYM6CB7OWQ6TWYRR3Z4T7GNZLKERYNZGGA5SOAOPIFY6YQHES5";
    const CONTRACT: &str = "CA3D5KRYM6CB7OWQ6TWYRR3Z4T7GNZLKERYNZGGA5SOAOPIFY6YQGAXE";

    const KEY: [u8; 32] = [
        0x36, 0x3e, 0xaa, 0x38, 0x67, 0x84, 0x1f, 0xba, 0xd0, 0xf4, 0xed, 0x88, 0xc7, 0x79, 0xe4,
        0xfe, 0x66, 0xe5, 0x6a, 0x24, 0x70, 0xdc, 0x98, 0xc0, 0xec, 0x9c, 0x07, 0x3d, 0x05, 0xc7,
        0xb1, 0x03,
    ];

    #[test]
    fn detects_kind_by_prefix() {
        assert_eq!(parse_address(ZERO_ACCOUNT).unwrap(), ScAddress::Account([0; 32]));
        assert_eq!(parse_address(ZERO_CONTRACT).unwrap(), ScAddress::Contract([0; 32]));
        assert_eq!(parse_address(ACCOUNT).unwrap(), ScAddress::Account(KEY));
        assert_eq!(parse_address(CONTRACT).unwrap(), ScAddress::Contract(KEY));
    }

    #[test]
    fn formats_back_to_strkey() {
        assert_eq!(format_address(&ScAddress::Account(KEY)), ACCOUNT);
        assert_eq!(format_address(&ScAddress::Contract(KEY)), CONTRACT);
    }

    #[test]
    fn muxed_roundtrip() {
        let addr = ScAddress::MuxedAccount { id: 123, ed25519: KEY };
        let s = format_address(&addr);
        assert!(s.starts_with('M'));
        assert_eq!(parse_address(&s).unwrap(), addr);
    }

    #[test]
    fn rejects_unknown_prefix_and_bad_checksum() {
        assert_matches!(
            parse_address("XA3D5KRYM6CB7OWQ6TWYRR3Z4T7GNZLKERYNZGGA5SOAOPIFY6YQHES5"),
            Err(ScvalError::TypeMismatch { .. })
        );
        assert_matches!(
            parse_address("GA3D5KRYM6CB7OWQ6TWYRR3Z4T7GNZLKERYNZGGA5SOAOPIFY6YQHES4"),
            Err(ScvalError::TypeMismatch { .. })
        );
        assert_matches!(parse_address(""), Err(ScvalError::TypeMismatch { .. }));
    }
}
