use crate::{Header, Question, ResourceRecord, HEADER_LEN};
use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;
use tracing::{instrument, trace};

/// A response as this server builds it: the query's header and question, and
/// at most one answer.
///
/// The authority and additional sections are never filled in; they stay
/// empty and NSCOUNT/ARCOUNT always go out as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub header: Header,
    pub question: Question,
    pub answer: Option<ResourceRecord>,
    pub name_servers: Vec<ResourceRecord>,
    pub additional_records: Vec<ResourceRecord>,
}

impl Message {
    pub fn new(header: Header, question: Question, answer: Option<ResourceRecord>) -> Self {
        Message {
            header,
            question,
            answer,
            name_servers: Vec::new(),
            additional_records: Vec::new(),
        }
    }

    pub fn an_count(&self) -> u16 {
        self.answer.is_some() as u16
    }

    /// Serializes the response. The question section is the query's, byte
    /// for byte.
    #[instrument(skip(self))]
    pub fn to_bytes(&self) -> Bytes {
        let answer = self.answer.as_ref().map(ResourceRecord::to_bytes);

        let mut buf = BytesMut::with_capacity(
            HEADER_LEN + self.question.wire_len() + answer.as_ref().map_or(0, Bytes::len),
        );
        buf.put(self.header.to_bytes(self.an_count()));
        buf.put(self.question.to_bytes());
        if let Some(answer) = answer {
            buf.put(answer);
        }

        trace!("Wrote {} bytes", buf.len());

        buf.freeze()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Message(id:{}) - ", self.header.id)?;
        write!(f, "Query [{}]", self.question)?;
        write!(f, " - Response {} [", self.header.rcode)?;
        if let Some(a) = &self.answer {
            write!(f, "{} => {}", self.question.q_name, a.data)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{build_answer, test::setup, Counts, Flags, RCode};
    use std::net::Ipv4Addr;

    fn header(rcode: RCode) -> Header {
        Header {
            id: 0xdb42,
            flags: Flags::from(0x01),
            rcode,
            counts: Counts {
                qd_count: 1,
                an_count: 0,
                ns_count: 0,
                ar_count: 1,
            },
        }
    }

    fn question() -> Question {
        let input: &[u8] = &[
            0x03, 0x77, 0x77, 0x77, 0x0c, 0x6e, 0x6f, 0x72, 0x74, 0x68, 0x65, 0x61, 0x73, 0x74,
            0x65, 0x72, 0x6e, 0x03, 0x65, 0x64, 0x75, 0x00, 0x00, 0x01, 0x00, 0x01,
        ];
        Question::decode(input).unwrap()
    }

    #[test]
    fn test_to_bytes_with_answer() {
        setup();
        let question = question();
        let answer = build_answer(&question, Ipv4Addr::new(155, 33, 17, 68));
        let message = Message::new(header(RCode::NoError), question, Some(answer));

        let expected: &[u8] = &[
            0xdb, 0x42, 0x81, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, // header
            0x03, 0x77, 0x77, 0x77, 0x0c, 0x6e, 0x6f, 0x72, 0x74, 0x68, 0x65, 0x61, 0x73, 0x74,
            0x65, 0x72, 0x6e, 0x03, 0x65, 0x64, 0x75, 0x00, 0x00, 0x01, 0x00, 0x01, // question
            0x03, 0x77, 0x77, 0x77, 0x0c, 0x6e, 0x6f, 0x72, 0x74, 0x68, 0x65, 0x61, 0x73, 0x74,
            0x65, 0x72, 0x6e, 0x03, 0x65, 0x64, 0x75, 0x00, 0x00, 0x01, 0x00, 0x01, // name
            0x00, 0x00, 0x00, 0x00, // ttl
            0x00, 0x04, 0x9b, 0x21, 0x11, 0x44, // rdata
        ];
        assert_eq!(message.to_bytes().as_ref(), expected);
        assert_eq!(
            message.to_string(),
            "Message(id:56130) - Query [www.northeastern.edu(A, IN)] - Response NOERROR \
             [www.northeastern.edu => A(155.33.17.68)]"
        );
    }

    #[test]
    fn test_to_bytes_without_answer() {
        setup();
        let message = Message::new(header(RCode::NameError), question(), None);

        let bytes = message.to_bytes();
        assert_eq!(
            &bytes[..12],
            &[0xdb, 0x42, 0x81, 0x03, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
        );
        assert_eq!(bytes.len(), 12 + 26);
    }
}
