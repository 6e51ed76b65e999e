use crate::{Question, RData, ResourceRecord};
use std::net::Ipv4Addr;
use tracing::{instrument, trace};

/// Answers are only ever valid for the transaction in progress.
const ANSWER_TTL: u32 = 0;

/// Builds the one answer record for `question`, resolved to `address`.
///
/// Name, type and class are taken from the question as they arrived, so an
/// `ALL` query gets an answer typed `ALL` carrying an address.
#[instrument(skip(question), fields(name = %question.q_name))]
pub fn build_answer(question: &Question, address: Ipv4Addr) -> ResourceRecord {
    let record = ResourceRecord {
        name: question.raw_name.clone(),
        r_type: question.q_type,
        class: question.q_class,
        ttl: ANSWER_TTL,
        data: RData::A(address),
    };

    trace!("Built answer {}", record.data);

    record
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{label, test::setup, Class, Type};

    fn question(q_type: Type, q_class: Class) -> Question {
        Question {
            q_name: "www.example.com".to_string(),
            raw_name: label::encode("www.example.com"),
            q_type,
            q_class,
        }
    }

    #[test]
    fn test_build_answer() {
        setup();
        let question = question(Type::A, Class::IN);
        let record = build_answer(&question, Ipv4Addr::new(192, 0, 2, 1));

        assert_eq!(record.name, question.raw_name);
        assert_eq!(record.r_type, Type::A);
        assert_eq!(record.class, Class::IN);
        assert_eq!(record.ttl, 0);
        assert_eq!(record.rd_length(), 4);

        let bytes = record.to_bytes();
        assert_eq!(&bytes[bytes.len() - 4..], &[0xc0, 0x00, 0x02, 0x01]);
    }

    #[test]
    fn test_build_answer_echoes_question_codes() {
        setup();
        let question = question(Type::ALL, Class::ANY);
        let record = build_answer(&question, Ipv4Addr::new(10, 1, 2, 3));

        assert_eq!(record.r_type, Type::ALL);
        assert_eq!(record.class, Class::ANY);
        assert_eq!(record.data, RData::A(Ipv4Addr::new(10, 1, 2, 3)));
    }
}
