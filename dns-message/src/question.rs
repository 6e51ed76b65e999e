use crate::{label, parser, MessageError, Result};
use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;
use tracing::{instrument, trace};

#[derive(Debug, Clone, PartialEq)]
/// The question section is used to carry the "question" in most queries, i.e.,
/// the parameters that define what is being asked.
pub struct Question {
    /// RFC1035 - a domain name represented as a sequence of labels, decoded
    /// into its dotted form.
    pub q_name: String,

    /// The name exactly as it arrived on the wire, terminator included. Echoed
    /// back in responses instead of re-encoding `q_name`.
    pub raw_name: Bytes,

    /// RFC1035 - a two octet code which specifies the type of the query.
    pub q_type: Type,

    /// RFC1035 - a two octet code that specifies the [`Class`] of the query.
    pub q_class: Class,
}

impl Question {
    /// Decodes the single question at the start of `input` and checks that it
    /// asks for something this server answers. Bytes after QCLASS are not
    /// looked at.
    pub fn decode(input: &[u8]) -> Result<Question> {
        let question = Question::read(input)?;
        question.validate()?;
        Ok(question)
    }

    /// Reads the question at the start of `input` without checking its type
    /// or class.
    #[instrument(skip(input))]
    pub fn read(input: &[u8]) -> Result<Question> {
        trace!("reading question");
        let (rest, q_name) = label::read_name(input)?;
        let raw_name = Bytes::copy_from_slice(&input[..input.len() - rest.len()]);

        let (_, (q_type, q_class)) =
            parser::read_type_class(rest).map_err(|_| MessageError::QuestionTooShort)?;

        let question = Question {
            q_name,
            raw_name,
            q_type,
            q_class,
        };

        trace!("Read question {}", question);

        Ok(question)
    }

    /// Only host address queries are answered, and the CHAOS class is
    /// refused. Every other class, known or not, is let through.
    pub fn validate(&self) -> Result<()> {
        match self.q_type {
            Type::A | Type::ALL => {}
            t => return Err(MessageError::UnsupportedType(t.into())),
        }
        if self.q_class == Class::CH {
            return Err(MessageError::UnsupportedClass(self.q_class.into()));
        }
        Ok(())
    }

    /// Length of this section on the wire.
    pub fn wire_len(&self) -> usize {
        self.raw_name.len() + 4
    }

    #[instrument(skip(self))]
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.wire_len());
        buf.put_slice(&self.raw_name);
        buf.put_u16(self.q_type.into());
        buf.put_u16(self.q_class.into());

        trace!("Wrote {} bytes", buf.len());

        buf.freeze()
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}({}, {})", self.q_name, self.q_type, self.q_class)
    }
}

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Types used in [`Question`]s.
pub enum Type {
    /// RFC1035 - (1) a host address.
    A,

    /// RFC1035 - (2) an authoritative name server.
    NS,

    /// RFC1035 - (5) the canonical name for an alias.
    CNAME,

    /// RFC1035 - (6) marks the start of a zone of authority.
    SOA,

    /// RFC1035 - (12) a domain name pointer.
    PTR,

    /// RFC1035 - (15) mail exchange.
    MX,

    /// RFC1035 - (16) text strings.
    TXT,

    /// RFC3596 - (28) a single IPv6 address.
    AAAA,

    /// RFC1035 - (252) A request for a transfer of an entire zone.
    AXFR,

    /// RFC1035 - (255) A request for all records.
    ALL,

    /// Any other type - the value is contained within.
    Unknown(u16),
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let disp = match self {
            Self::A => "A",
            Self::NS => "NS",
            Self::CNAME => "CNAME",
            Self::SOA => "SOA",
            Self::PTR => "PTR",
            Self::MX => "MX",
            Self::TXT => "TXT",
            Self::AAAA => "AAAA",
            Self::AXFR => "AXFR",
            Self::ALL => "*",
            Self::Unknown(i) => return write!(f, "TYPE{}", i),
        };
        write!(f, "{}", disp)
    }
}

impl Default for Type {
    fn default() -> Self {
        Self::A
    }
}

impl From<Type> for u16 {
    fn from(t: Type) -> u16 {
        match t {
            Type::A => 1,
            Type::NS => 2,
            Type::CNAME => 5,
            Type::SOA => 6,
            Type::PTR => 12,
            Type::MX => 15,
            Type::TXT => 16,
            Type::AAAA => 28,
            Type::AXFR => 252,
            Type::ALL => 255,
            Type::Unknown(i) => i,
        }
    }
}

impl From<u16> for Type {
    fn from(val: u16) -> Self {
        match val {
            1 => Type::A,
            2 => Type::NS,
            5 => Type::CNAME,
            6 => Type::SOA,
            12 => Type::PTR,
            15 => Type::MX,
            16 => Type::TXT,
            28 => Type::AAAA,
            252 => Type::AXFR,
            255 => Type::ALL,
            _ => Type::Unknown(val),
        }
    }
}

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The class of the query.
pub enum Class {
    /// RFC1035 - 1 the Internet.
    IN,

    /// RFC1035 - 2 the CSNET class (Obsolete).
    CS,

    /// RFC1035 - 3 the CHAOS class.
    CH,

    /// RFC1035 - 4 Hesiod [Dyer 87].
    HS,

    /// RFC1035 - 255 any class.
    ANY,

    /// An unknown class - contained within.
    Unknown(u16),
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let disp = match self {
            Self::IN => "IN",
            Self::CS => "CS",
            Self::CH => "CH",
            Self::HS => "HS",
            Self::ANY => "ANY",
            Self::Unknown(i) => return write!(f, "CLASS{}", i),
        };
        write!(f, "{}", disp)
    }
}

impl Default for Class {
    fn default() -> Self {
        Class::IN
    }
}

impl From<Class> for u16 {
    fn from(c: Class) -> u16 {
        match c {
            Class::IN => 1,
            Class::CS => 2,
            Class::CH => 3,
            Class::HS => 4,
            Class::ANY => 255,
            Class::Unknown(i) => i,
        }
    }
}

impl From<u16> for Class {
    fn from(val: u16) -> Self {
        match val {
            1 => Class::IN,
            2 => Class::CS,
            3 => Class::CH,
            4 => Class::HS,
            255 => Class::ANY,
            _ => Class::Unknown(val),
        }
    }
}
