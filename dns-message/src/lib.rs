//! Wire codec and per-datagram processing for an authoritative server that
//! answers A queries out of a static host table.
//!
//! [`MessageProcessor::process_datagram`] is the whole outward surface: one
//! query datagram in, one response datagram out. Everything else in here is
//! the RFC1035 plumbing it is built from.

mod answer;
mod builder;
mod error;
mod header;
pub mod label;
mod message;
mod parser;
mod processor;
mod question;
mod resource_record;

pub use answer::build_answer;
pub use builder::QueryBuilder;
pub use error::MessageError;
pub use header::{
    decode_counts, decode_flags, encode_counts, encode_rcode, encode_response_flags, Counts,
    Flags, Header, OpCode, RCode, HEADER_LEN,
};
pub use message::Message;
pub use processor::{Lookup, MessageProcessor, Outcome};
pub use question::{Class, Question, Type};
pub use resource_record::{RData, ResourceRecord};

type Result<T> = std::result::Result<T, MessageError>;

#[cfg(test)]
mod test {
    use std::sync::Once;

    static INIT: Once = Once::new();

    pub fn setup() {
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
                .with_test_writer()
                .try_init();
        });
    }
}
