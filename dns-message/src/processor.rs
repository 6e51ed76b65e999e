use crate::{
    build_answer, Header, Message, MessageError, Question, RCode, ResourceRecord, HEADER_LEN,
};
use bytes::{BufMut, Bytes, BytesMut};
use std::collections::HashMap;
use std::hash::BuildHasher;
use std::net::Ipv4Addr;
use std::sync::Arc;
use tracing::{debug, info, instrument, trace, warn};

/// Where hostnames are resolved. Implementations are only ever read from
/// while datagrams are processed.
pub trait Lookup {
    fn lookup(&self, hostname: &str) -> Option<Ipv4Addr>;
}

impl<S: BuildHasher> Lookup for HashMap<String, Ipv4Addr, S> {
    fn lookup(&self, hostname: &str) -> Option<Ipv4Addr> {
        self.get(hostname).copied()
    }
}

impl<L: Lookup + ?Sized> Lookup for Arc<L> {
    fn lookup(&self, hostname: &str) -> Option<Ipv4Addr> {
        (**self).lookup(hostname)
    }
}

/// What became of one datagram.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub rcode: RCode,
    /// The queried hostname, if the question got as far as being decoded.
    pub host: Option<String>,
    /// The datagram to send back.
    pub response: Bytes,
}

/// The steps a datagram goes through. Every datagram ends up `Built`, and
/// only once.
enum Stage<'a> {
    Received(&'a [u8]),
    HeaderChecked {
        header: Header,
        body: &'a [u8],
    },
    QuestionChecked {
        header: Header,
        question: Question,
    },
    Resolved {
        header: Header,
        question: Question,
        answer: Option<ResourceRecord>,
    },
    Built(Outcome),
}

/// Turns query datagrams into response datagrams.
///
/// Holds nothing but the lookup, so one processor can be shared between any
/// number of concurrent requests.
#[derive(Debug)]
pub struct MessageProcessor<L> {
    lookup: L,
}

impl<L: Lookup> MessageProcessor<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Answers one query datagram. Never fails: problems with the query are
    /// reported in the response code.
    pub fn process_datagram(&self, input: &[u8]) -> Bytes {
        self.process(input).response
    }

    /// Same as [`MessageProcessor::process_datagram`], keeping the decided
    /// response code and hostname alongside the response.
    #[instrument(skip(self, input), fields(len = input.len()))]
    pub fn process(&self, input: &[u8]) -> Outcome {
        let mut stage = Stage::Received(input);
        loop {
            stage = match stage {
                Stage::Received(input) => check_header(input),
                Stage::HeaderChecked { header, body } => check_question(header, body),
                Stage::QuestionChecked { header, question } => self.resolve(header, question),
                Stage::Resolved {
                    header,
                    question,
                    answer,
                } => build(header, question, answer),
                Stage::Built(outcome) => return outcome,
            };
        }
    }

    fn resolve<'a>(&self, header: Header, question: Question) -> Stage<'a> {
        let answer = match self.lookup.lookup(&question.q_name) {
            Some(address) => {
                info!(
                    id = header.id,
                    rcode = %RCode::NoError,
                    "Host {} is {}",
                    question.q_name,
                    address
                );
                Some(build_answer(&question, address))
            }
            None => {
                // Authoritative for everything in the table, so a miss means
                // the name does not exist.
                info!(
                    id = header.id,
                    rcode = %RCode::NameError,
                    "Host {} not found",
                    question.q_name
                );
                None
            }
        };

        Stage::Resolved {
            header,
            question,
            answer,
        }
    }
}

fn check_header(input: &[u8]) -> Stage<'_> {
    let header = match Header::read(input) {
        Ok(header) => header,
        Err(e) => return reject(Header::padded(input), e, &[]),
    };
    let body = &input[HEADER_LEN..];

    if let Err(e) = header.validate() {
        return reject(header, e, body);
    }

    trace!("Header checked");
    Stage::HeaderChecked { header, body }
}

/// A question that cannot be read is echoed with everything after it. Once
/// it has been read, only its own bytes go back.
fn check_question(header: Header, body: &[u8]) -> Stage<'_> {
    let question = match Question::read(body) {
        Ok(question) => question,
        Err(e) => return reject(header, e, body),
    };
    if let Err(e) = question.validate() {
        return reject(header, e, &body[..question.wire_len()]);
    }

    trace!("Question checked: {}", question);
    Stage::QuestionChecked { header, question }
}

fn build<'a>(header: Header, question: Question, answer: Option<ResourceRecord>) -> Stage<'a> {
    let rcode = match answer {
        Some(_) => RCode::NoError,
        None => RCode::NameError,
    };
    let header = Header { rcode, ..header };
    let message = Message::new(header, question, answer);
    let response = message.to_bytes();

    debug!("{}", message);

    Stage::Built(Outcome {
        rcode,
        host: Some(message.question.q_name),
        response,
    })
}

/// Answers with the error's response code, no answer, and `body` echoed as
/// it arrived.
fn reject<'a>(header: Header, error: MessageError, body: &[u8]) -> Stage<'a> {
    let rcode = error.rcode();
    warn!(id = header.id, rcode = %rcode, "Rejecting query: {}", error);

    let header = Header { rcode, ..header };
    let mut buf = BytesMut::with_capacity(HEADER_LEN + body.len());
    buf.put(header.to_bytes(0));
    buf.put_slice(body);

    Stage::Built(Outcome {
        rcode,
        host: None,
        response: buf.freeze(),
    })
}
