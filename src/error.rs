/*!
# Error types

This module holds the error types returned by the various functions of this
crate.

All errors are configuration errors: they indicate that the writer was set up
with an encoding it cannot handle, or that it was handed bytes which do not
conform to the declared input encoding. There are no transient errors; the
writer performs no I/O.
*/
use std::error;
use std::fmt;
use std::result::Result as StdResult;

/// Error types which may be returned from the writer.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
	/// The given encoding label does not name a known character encoding.
	///
	/// Returned from the writer constructors (for the output encoding) and
	/// from [`XmlWriter::start_document`] (for the input encoding).
	///
	///   [`XmlWriter::start_document`]: crate::XmlWriter::start_document
	UnknownEncoding(String),

	/// Input bytes do not form a valid sequence in the declared input
	/// encoding.
	///
	/// The contained string is the canonical name of the encoding the bytes
	/// were declared to be in.
	MalformedInput(&'static str),
}

pub type Result<T> = StdResult<T, Error>;

impl fmt::Display for Error {
	fn fmt<'f>(&self, f: &'f mut fmt::Formatter) -> fmt::Result {
		match self {
			Error::UnknownEncoding(label) => write!(f, "unknown character encoding: {}", label),
			Error::MalformedInput(encoding) => {
				write!(f, "input is not a valid {} byte sequence", encoding)
			}
		}
	}
}

impl error::Error for Error {}
