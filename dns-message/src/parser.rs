use crate::{Class, Counts, Flags, Header, MessageError, RCode, Result, Type};
use nom::combinator::map;
use nom::multi::length_data;
use nom::number::complete::{be_u16, be_u8};
use nom::sequence::tuple;
use nom::IResult;
use tracing::{instrument, trace};

#[instrument(skip(input))]
fn read_u16(input: &[u8]) -> IResult<&[u8], u16> {
    trace!("reading u16");
    be_u16(input)
}

#[instrument(skip(input))]
pub(crate) fn read_counts(input: &[u8]) -> IResult<&[u8], Counts> {
    trace!("reading counts");
    map(
        tuple((read_u16, read_u16, read_u16, read_u16)),
        |(qd_count, an_count, ns_count, ar_count)| Counts {
            qd_count,
            an_count,
            ns_count,
            ar_count,
        },
    )(input)
}

#[instrument(skip(input))]
pub(crate) fn read_header(input: &[u8]) -> IResult<&[u8], Header> {
    trace!("reading header");
    let (input, id) = read_u16(input)?;
    let (input, flags) = map(be_u8, Flags::from)(input)?;
    // RA, Z and RCODE mean nothing in a query.
    let (input, _) = be_u8(input)?;
    let (input, counts) = read_counts(input)?;

    Ok((
        input,
        Header {
            id,
            flags,
            rcode: RCode::NoError,
            counts,
        },
    ))
}

/// Reads a sequence of length prefixed labels up to and including the zero
/// length terminator. Returns the remaining input and the labels without
/// their length bytes.
#[instrument(skip(input))]
pub(crate) fn read_labels(input: &[u8]) -> Result<(&[u8], Vec<&[u8]>)> {
    trace!("reading labels");
    let mut labels = Vec::new();
    let mut rest = input;

    loop {
        let offset = input.len() - rest.len();
        let (i, label) = length_data(be_u8)(rest).map_err(
            |_: nom::Err<nom::error::Error<&[u8]>>| MessageError::MalformedLabel(offset),
        )?;
        rest = i;

        // Names are terminated with a NULL byte.
        if label.is_empty() {
            break;
        }
        trace!("Label of length {} found", label.len());
        labels.push(label);
    }

    Ok((rest, labels))
}

#[instrument(skip(input))]
pub(crate) fn read_type_class(input: &[u8]) -> IResult<&[u8], (Type, Class)> {
    trace!("reading type and class");
    tuple((map(read_u16, Type::from), map(read_u16, Class::from)))(input)
}
