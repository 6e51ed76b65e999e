use crate::{label, Class, Flags, OpCode, Type, HEADER_LEN};
use bytes::{BufMut, Bytes, BytesMut};

/// Builds raw query datagrams, the way a stub resolver would send them.
///
/// Every field can be set to a value this server rejects, so the builder
/// doubles as a source of malformed queries.
#[derive(Debug)]
pub struct QueryBuilder {
    id: u16,
    flags: Flags,
    qd_count: u16,
    name: String,
    q_type: u16,
    q_class: u16,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self {
            id: 0,
            flags: Flags::default(),
            qd_count: 1,
            name: String::new(),
            q_type: Type::A.into(),
            q_class: Class::IN.into(),
        }
    }
}

impl QueryBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn build(self) -> Bytes {
        let name = label::encode(&self.name);
        let mut buf = BytesMut::with_capacity(HEADER_LEN + name.len() + 4);

        buf.put_u16(self.id);
        buf.put_u8(self.flags.to_byte());
        buf.put_u8(0);
        buf.put_u16(self.qd_count);
        buf.put_u16(0);
        buf.put_u16(0);
        buf.put_u16(0);

        buf.put(name);
        buf.put_u16(self.q_type);
        buf.put_u16(self.q_class);

        buf.freeze()
    }

    pub fn id(mut self, id: u16) -> Self {
        self.id = id;
        self
    }

    pub fn qr(mut self, qr: bool) -> Self {
        self.flags.qr = qr;
        self
    }

    pub fn opcode(mut self, opcode: OpCode) -> Self {
        self.flags.opcode = opcode;
        self
    }

    pub fn aa(mut self, aa: bool) -> Self {
        self.flags.aa = aa;
        self
    }

    pub fn tc(mut self, tc: bool) -> Self {
        self.flags.tc = tc;
        self
    }

    pub fn rd(mut self, rd: bool) -> Self {
        self.flags.rd = rd;
        self
    }

    /// QDCOUNT as written in the header. One question is written whatever
    /// the count says.
    pub fn qd_count(mut self, qd_count: u16) -> Self {
        self.qd_count = qd_count;
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn q_type(mut self, t: impl Into<u16>) -> Self {
        self.q_type = t.into();
        self
    }

    pub fn class(mut self, cls: impl Into<u16>) -> Self {
        self.q_class = cls.into();
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_query_builder() {
        let query = QueryBuilder::new()
            .id(0x1234)
            .rd(true)
            .name("www.example.com")
            .build();

        let expected: &[u8] = &[
            0x12, 0x34, // ID
            0x01, 0x00, // Flags - RD
            0, 1, // qdcount
            0, 0, // ancount
            0, 0, // nscount
            0, 0, // arcount
            3, 119, 119, 119, // len: 3 - www
            7, 101, 120, 97, 109, 112, 108, 101, // len: 7 - example
            3, 99, 111, 109, // len: 3 - com
            0,   // name terminator
            0, 1, // qtype
            0, 1, // qclass
        ];
        assert_eq!(query.as_ref(), expected);
    }

    #[test]
    fn test_query_builder_odd_shapes() {
        let query = QueryBuilder::new()
            .qr(true)
            .opcode(OpCode::Status)
            .tc(true)
            .qd_count(0)
            .name("a")
            .q_type(Type::AAAA)
            .class(3u16)
            .build();

        assert_eq!(query[2], 0b1001_0010);
        assert_eq!(&query[4..6], &[0, 0]);
        assert_eq!(&query[12..], &[1, b'a', 0, 0, 28, 0, 3]);
    }
}
