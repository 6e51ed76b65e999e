use crate::{Class, Type};
use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;
use std::net::Ipv4Addr;
use tracing::{instrument, trace};

#[derive(Debug, Clone, PartialEq)]
/// The answer, authority and additional sections all share the same format,
/// that is a variable number of [`ResourceRecord`]s.
pub struct ResourceRecord {
    /// The owner name in wire form. For answers this is the name bytes of
    /// the question, shared rather than re-encoded.
    pub name: Bytes,

    /// The type code, copied from the question it answers.
    pub r_type: Type,

    /// The class of the data in the `data` field.
    pub class: Class,

    /// RFC1035 - a 32 bit unsigned integer that specifies the time interval (in
    /// seconds) that the resource record may be cached before it should be
    /// discarded.  Zero values are interpreted to mean that the RR can only be
    /// used for the transaction in progress, and should not be cached.
    pub ttl: u32,

    pub data: RData,
}

impl ResourceRecord {
    /// Number of RDATA bytes, written as RDLENGTH.
    pub fn rd_length(&self) -> u16 {
        self.data.len() as u16
    }

    #[instrument(skip(self))]
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.name.len() + 10 + self.data.len());
        buf.put_slice(&self.name);
        buf.put_u16(self.r_type.into());
        buf.put_u16(self.class.into());
        buf.put_u32(self.ttl);
        buf.put_u16(self.rd_length());
        self.data.write(&mut buf);

        trace!("Wrote {} bytes", buf.len());

        buf.freeze()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The [`ResourceRecord`] data.
pub enum RData {
    /// RFC1035 - (1) a host address, four octets in network order.
    A(Ipv4Addr),
}

impl RData {
    pub fn len(&self) -> usize {
        match self {
            RData::A(_) => 4,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn write(&self, buf: &mut BytesMut) {
        match self {
            RData::A(v4) => buf.put_slice(&v4.octets()),
        }
    }
}

impl fmt::Display for RData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::A(v4) => write!(f, "A({})", v4),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{label, test::setup};

    #[test]
    fn test_to_bytes() {
        setup();
        let record = ResourceRecord {
            name: label::encode("www.example.com"),
            r_type: Type::A,
            class: Class::IN,
            ttl: 600,
            data: RData::A(Ipv4Addr::new(155, 33, 17, 68)),
        };

        let expected: &[u8] = &[
            3, 119, 119, 119, 7, 101, 120, 97, 109, 112, 108, 101, 3, 99, 111, 109, 0, // name
            0, 1, // type - A
            0, 1, // class - IN
            0, 0, 2, 88, // ttl - 600
            0, 4, // rdlength
            155, 33, 17, 68, // rdata
        ];
        assert_eq!(record.rd_length(), 4);
        assert_eq!(record.to_bytes().as_ref(), expected);
    }

    #[test]
    fn test_copies_type_and_class_codes() {
        setup();
        let record = ResourceRecord {
            name: Bytes::from_static(&[0]),
            r_type: Type::ALL,
            class: Class::Unknown(77),
            ttl: 0,
            data: RData::A(Ipv4Addr::new(10, 0, 0, 1)),
        };

        assert_eq!(
            record.to_bytes().as_ref(),
            &[0, 0, 255, 0, 77, 0, 0, 0, 0, 0, 4, 10, 0, 0, 1]
        );
    }
}
