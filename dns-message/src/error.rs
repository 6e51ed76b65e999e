use crate::RCode;
use thiserror::Error;

/// Everything that can stop a datagram from being answered with data.
///
/// Each variant maps onto exactly one [`RCode`], see [`MessageError::rcode`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MessageError {
    #[error("datagram of {0} bytes is shorter than the header")]
    HeaderTooShort(usize),
    #[error("count section of {0} bytes is shorter than 8 bytes")]
    CountsTooShort(usize),
    #[error("query arrived with the QR bit set")]
    ResponseAsQuery,
    #[error("opcode {0} is not a standard query")]
    UnsupportedOpCode(u8),
    #[error("truncated queries are not supported")]
    Truncated,
    #[error("message carries no question")]
    NoQuestion,
    #[error("{0} questions in one message are not supported")]
    TooManyQuestions(u16),
    #[error("label length at offset {0} runs past the end of the buffer")]
    MalformedLabel(usize),
    #[error("label at offset {0} is not valid UTF-8")]
    InvalidLabel(usize),
    #[error("question is missing its type or class")]
    QuestionTooShort,
    #[error("query type {0} is not supported")]
    UnsupportedType(u16),
    #[error("query class {0} is not supported")]
    UnsupportedClass(u16),
}

impl MessageError {
    /// The response code a reply to the offending query carries.
    pub fn rcode(&self) -> RCode {
        match self {
            MessageError::HeaderTooShort(_)
            | MessageError::CountsTooShort(_)
            | MessageError::ResponseAsQuery
            | MessageError::NoQuestion => RCode::FormatError,
            MessageError::UnsupportedOpCode(_)
            | MessageError::Truncated
            | MessageError::TooManyQuestions(_)
            | MessageError::MalformedLabel(_)
            | MessageError::InvalidLabel(_)
            | MessageError::QuestionTooShort
            | MessageError::UnsupportedType(_)
            | MessageError::UnsupportedClass(_) => RCode::NotImplemented,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_header_problems_are_format_errors() {
        assert_eq!(MessageError::HeaderTooShort(3).rcode(), RCode::FormatError);
        assert_eq!(MessageError::CountsTooShort(3).rcode(), RCode::FormatError);
        assert_eq!(MessageError::ResponseAsQuery.rcode(), RCode::FormatError);
        assert_eq!(MessageError::NoQuestion.rcode(), RCode::FormatError);
    }

    #[test]
    fn test_unsupported_shapes_are_not_implemented() {
        assert_eq!(
            MessageError::UnsupportedOpCode(2).rcode(),
            RCode::NotImplemented
        );
        assert_eq!(
            MessageError::TooManyQuestions(2).rcode(),
            RCode::NotImplemented
        );
        assert_eq!(MessageError::UnsupportedClass(3).rcode(), RCode::NotImplemented);
        assert_eq!(MessageError::MalformedLabel(0).rcode(), RCode::NotImplemented);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            MessageError::UnsupportedType(28).to_string(),
            "query type 28 is not supported"
        );
        assert_eq!(
            MessageError::CountsTooShort(3).to_string(),
            "count section of 3 bytes is shorter than 8 bytes"
        );
    }
}
