use std::fmt::Write as _;

use rand::Rng;

/// Generate a random RFC4122 v4 GUID as raw bytes.
pub fn generate_guid_bytes() -> [u8; 16] {
    let mut bytes = [0u8; 16];
    let mut rng = rand::rng();
    rng.fill(&mut bytes);
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;
    bytes
}

/// Generate a random GUID in the form `{XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX}`,
/// the shape Word uses for bookmark and revision-session identifiers.
pub fn generate_guid_braced() -> String {
    format_guid_braced(&generate_guid_bytes())
}

pub fn format_guid_braced(bytes: &[u8; 16]) -> String {
    let mut out = String::with_capacity(38);
    out.push('{');
    for (i, chunk) in [0..4, 4..6, 6..8, 8..10, 10..16].into_iter().enumerate() {
        if i > 0 {
            out.push('-');
        }
        for b in &bytes[chunk] {
            write!(out, "{b:02X}").expect("write! to String never fails");
        }
    }
    out.push('}');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn braced_format_shape() {
        let s = generate_guid_braced();
        assert_eq!(s.len(), 38);
        assert!(s.starts_with('{'));
        assert!(s.ends_with('}'));
        assert_eq!(&s[9..10], "-");
        assert_eq!(&s[14..15], "-");
        assert_eq!(&s[19..20], "-");
        assert_eq!(&s[24..25], "-");
    }
}
