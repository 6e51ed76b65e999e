use crate::{parser, MessageError, Result};
use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;
use tracing::{instrument, trace};

/// Size of the fixed header at the start of every message.
pub const HEADER_LEN: usize = 12;

const QR: u8 = 0b1000_0000;
const OPCODE: u8 = 0b0111_1000;
const AA: u8 = 0b0000_0100;
const TC: u8 = 0b0000_0010;
const RD: u8 = 0b0000_0001;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The DNS Message Header as per RFC1035.
///
/// The third byte (RA, Z and RCODE) of a query carries nothing this server
/// acts on, so only the response code that will be sent back is kept.
pub struct Header {
    /// RFC1035 - A 16 bit identifier assigned by the program that generates any
    /// kind of query. This identifier is copied the corresponding reply and
    /// can be used by the requester to match up replies to outstanding queries.
    pub id: u16,

    /// The flags from the second header byte, decoded into named fields.
    pub flags: Flags,

    /// RFC1035 - Response code - this 4 bit field is set as part of responses.
    pub rcode: RCode,

    /// The four section counts, as received.
    pub counts: Counts,
}

impl Header {
    /// Reads the header from the start of `input` without judging its content.
    #[instrument(skip(input))]
    pub fn read(input: &[u8]) -> Result<Header> {
        let (_, header) =
            parser::read_header(input).map_err(|_| MessageError::HeaderTooShort(input.len()))?;
        trace!("Read header {:?}", header);
        Ok(header)
    }

    /// Builds a header from a datagram too short to hold one. The bytes that
    /// are present are used, the rest read as zero and every count is zero.
    pub fn padded(input: &[u8]) -> Header {
        let mut raw = [0u8; HEADER_LEN];
        let len = input.len().min(HEADER_LEN);
        raw[..len].copy_from_slice(&input[..len]);
        Header {
            id: u16::from_be_bytes([raw[0], raw[1]]),
            flags: Flags::from(raw[2]),
            rcode: RCode::NoError,
            counts: Counts::default(),
        }
    }

    /// Checks that this header describes a query the server can answer.
    /// The flags are checked before the counts.
    pub fn validate(&self) -> Result<()> {
        check_flags(&self.flags)?;
        check_counts(&self.counts)
    }

    /// Serializes this header as the header of a response carrying
    /// `an_count` answers.
    #[instrument(skip(self))]
    pub fn to_bytes(&self, an_count: u16) -> Bytes {
        let mut buf = BytesMut::with_capacity(HEADER_LEN);
        buf.put_u16(self.id);
        buf.put_u8(encode_response_flags(&self.flags));
        buf.put_u8(encode_rcode(self.rcode));
        buf.put_slice(&encode_counts(&self.counts, an_count));

        trace!("Wrote {} bytes", HEADER_LEN);

        buf.freeze()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The second header byte, `QR | Opcode | AA | TC | RD`.
pub struct Flags {
    /// RFC1035 - A one bit field that specifies whether this message is a query
    /// (0), or a response (1).
    pub qr: bool,

    /// RFC1035 - A four bit field that specifies kind of query in this
    /// message.  This value is set by the originator of a query and copied into
    /// the response.
    pub opcode: OpCode,

    /// RFC1035 - Authoritative Answer.
    pub aa: bool,

    /// RFC1035 - TrunCation - specifies that this message was truncated due to
    /// length greater than that permitted on the transmission channel.
    pub tc: bool,

    /// RFC1035 - Recursion Desired - copied into the response. Recursion is
    /// never performed, so RA always goes back as 0.
    pub rd: bool,
}

impl Flags {
    pub fn to_byte(&self) -> u8 {
        let mut val = self.opcode.as_u8() << 3;
        if self.qr {
            val |= QR;
        }
        if self.aa {
            val |= AA;
        }
        if self.tc {
            val |= TC;
        }
        if self.rd {
            val |= RD;
        }
        val
    }
}

impl From<u8> for Flags {
    fn from(byte: u8) -> Self {
        Flags {
            qr: byte & QR != 0,
            opcode: OpCode::from((byte & OPCODE) >> 3),
            aa: byte & AA != 0,
            tc: byte & TC != 0,
            rd: byte & RD != 0,
        }
    }
}

impl Default for Flags {
    fn default() -> Self {
        Flags::from(0)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Counts {
    pub qd_count: u16,
    pub an_count: u16,
    pub ns_count: u16,
    pub ar_count: u16,
}

#[instrument]
fn check_flags(flags: &Flags) -> Result<()> {
    // A reply arriving where a query was expected.
    if flags.qr {
        return Err(MessageError::ResponseAsQuery);
    }
    if flags.opcode != OpCode::Query {
        return Err(MessageError::UnsupportedOpCode(flags.opcode.as_u8()));
    }
    if flags.tc {
        return Err(MessageError::Truncated);
    }
    Ok(())
}

#[instrument]
fn check_counts(counts: &Counts) -> Result<()> {
    match counts.qd_count {
        0 => Err(MessageError::NoQuestion),
        1 => Ok(()),
        n => Err(MessageError::TooManyQuestions(n)),
    }
}

/// Decodes the flag byte and checks it belongs to a standard, untruncated
/// query.
pub fn decode_flags(byte: u8) -> Result<Flags> {
    let flags = Flags::from(byte);
    check_flags(&flags)?;
    Ok(flags)
}

/// Decodes the eight count bytes and checks there is exactly one question.
pub fn decode_counts(input: &[u8]) -> Result<Counts> {
    let (_, counts) =
        parser::read_counts(input).map_err(|_| MessageError::CountsTooShort(input.len()))?;
    check_counts(&counts)?;
    Ok(counts)
}

/// The flag byte of a response: QR set, everything else as decoded.
pub fn encode_response_flags(flags: &Flags) -> u8 {
    Flags { qr: true, ..*flags }.to_byte()
}

/// The count bytes of a response. QDCOUNT is echoed, the authority and
/// additional sections are always empty.
pub fn encode_counts(counts: &Counts, an_count: u16) -> [u8; 8] {
    let mut out = [0u8; 8];
    out[0..2].copy_from_slice(&counts.qd_count.to_be_bytes());
    out[2..4].copy_from_slice(&an_count.to_be_bytes());
    out
}

/// The fourth header byte of a response. RA and Z are always zero.
pub fn encode_rcode(rcode: RCode) -> u8 {
    rcode.as_u8()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A four bit field that specifies kind of query in this message.  This value
/// is set by the originator of a query and copied into the response.
pub enum OpCode {
    /// A standard query.
    Query,

    /// An inverse query.
    IQuery,

    /// A server status request.
    Status,

    /// Any other (reserved) 4 bit value.
    Unknown(u8),
}

impl OpCode {
    pub fn as_u8(&self) -> u8 {
        match self {
            OpCode::Query => 0,
            OpCode::IQuery => 1,
            OpCode::Status => 2,
            // OpCodes can only be 4 bits wide.
            OpCode::Unknown(opcode) => *opcode & 0xf,
        }
    }
}

impl From<u8> for OpCode {
    fn from(val: u8) -> Self {
        match val {
            0 => OpCode::Query,
            1 => OpCode::IQuery,
            2 => OpCode::Status,
            n => OpCode::Unknown(n & 0xf),
        }
    }
}

impl Default for OpCode {
    fn default() -> Self {
        OpCode::Query
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Response code - this 4 bit field is set as part of responses.
pub enum RCode {
    /// No error condition.
    NoError,

    /// Format error - The name server was unable to interpret the query.
    FormatError,

    /// Server failure - The name server was unable to process this query due to
    /// a problem with the name server.
    ServerFailure,

    /// Name Error - Meaningful only for responses from an authoritative name
    /// server, this code signifies that the domain name referenced in the query
    /// does not exist.
    NameError,

    /// Not Implemented - The name server does not support the requested kind of
    /// query.
    NotImplemented,

    /// Refused - The name server refuses to perform the specified operation for
    /// policy reasons.
    Refused,
}

impl RCode {
    pub fn as_u8(&self) -> u8 {
        match self {
            RCode::NoError => 0,
            RCode::FormatError => 1,
            RCode::ServerFailure => 2,
            RCode::NameError => 3,
            RCode::NotImplemented => 4,
            RCode::Refused => 5,
        }
    }
}

impl Default for RCode {
    fn default() -> Self {
        RCode::NoError
    }
}

impl fmt::Display for RCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let disp = match self {
            RCode::NoError => "NOERROR",
            RCode::FormatError => "FORMERR",
            RCode::ServerFailure => "SERVFAIL",
            RCode::NameError => "NXDOMAIN",
            RCode::NotImplemented => "NOTIMP",
            RCode::Refused => "REFUSED",
        };
        write!(f, "{}", disp)
    }
}
