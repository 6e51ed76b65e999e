//! Conversion between dotted hostnames and the RFC1035 label sequence: each
//! label is a length octet followed by that many octets, and the name ends
//! with the zero length label of the root.

use crate::{parser, MessageError, Result};
use bytes::{BufMut, Bytes, BytesMut};
use tracing::{instrument, trace};

/// Decodes a zero terminated label sequence into a dotted hostname. Anything
/// after the terminator is ignored.
pub fn decode(input: &[u8]) -> Result<String> {
    let (_, name) = read_name(input)?;
    Ok(name)
}

/// Encodes a dotted hostname as a label sequence. Empty components (a
/// trailing dot, or the root name `""`) produce no label.
///
/// Every component must fit a single length octet; names handled here only
/// ever come off the wire, so a longer one is a bug in the caller.
#[instrument]
pub fn encode(name: &str) -> Bytes {
    let mut buf = BytesMut::with_capacity(name.len() + 2);
    for part in name.split('.').filter(|part| !part.is_empty()) {
        debug_assert!(part.len() <= u8::MAX as usize, "label too long: {}", part);
        buf.put_u8(part.len() as u8);
        buf.put_slice(part.as_bytes());
    }
    buf.put_u8(0);

    trace!("Wrote {} bytes", buf.len());

    buf.freeze()
}

/// Reads a name off the front of `input`, returning what follows it.
#[instrument(skip(input))]
pub(crate) fn read_name(input: &[u8]) -> Result<(&[u8], String)> {
    let (rest, labels) = parser::read_labels(input)?;

    let mut parts = Vec::with_capacity(labels.len());
    let mut offset = 0;
    for label in labels {
        let part = std::str::from_utf8(label).map_err(|_| MessageError::InvalidLabel(offset))?;
        parts.push(part);
        offset += label.len() + 1;
    }
    let name = parts.join(".");

    trace!("Read name {}", name);

    Ok((rest, name))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::setup;

    const EXAMPLE_COM: &[u8] = &[
        7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', // len: 7 - example
        3, b'c', b'o', b'm', // len: 3 - com
        0,    // name terminator
    ];

    #[test]
    fn test_encode() {
        setup();
        assert_eq!(encode("example.com").as_ref(), EXAMPLE_COM);
        assert_eq!(encode("example.com.").as_ref(), EXAMPLE_COM);
        assert_eq!(encode("").as_ref(), &[0]);
    }

    #[test]
    fn test_decode() {
        setup();
        assert_eq!(decode(EXAMPLE_COM).unwrap(), "example.com");
        assert_eq!(decode(&[0]).unwrap(), "");

        let mut with_trailer = EXAMPLE_COM.to_vec();
        with_trailer.extend_from_slice(&[0, 1, 0, 1]);
        assert_eq!(decode(&with_trailer).unwrap(), "example.com");
    }

    #[test]
    fn test_decode_malformed() {
        setup();
        assert_eq!(
            decode(&EXAMPLE_COM[..10]),
            Err(MessageError::MalformedLabel(8))
        );
        assert_eq!(
            decode(&EXAMPLE_COM[..12]),
            Err(MessageError::MalformedLabel(12))
        );
    }

    #[test]
    fn test_decode_invalid_utf8() {
        setup();
        let input: &[u8] = &[3, b'w', b'w', b'w', 2, 0xff, 0xfe, 0];
        assert_eq!(decode(input), Err(MessageError::InvalidLabel(4)));
    }

    #[test]
    fn test_read_name_returns_rest() {
        setup();
        let mut input = EXAMPLE_COM.to_vec();
        input.extend_from_slice(&[0, 1, 0, 1]);
        let (rest, name) = read_name(&input).unwrap();
        assert_eq!(name, "example.com");
        assert_eq!(rest, &[0, 1, 0, 1]);
    }
}
