/*!
# Character encoding bridge

Thin layer over [`encoding_rs`] used by the writer to accept content in a
declared input encoding and to emit the document in the output encoding
chosen at construction.

Both directions go through UTF-8, which is the writer's working encoding.
Conversion is skipped entirely when the respective side already is UTF-8; for
decoding, the bytes are then only validated.
*/
use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_8};

use crate::error::{Error, Result};

/// Resolve an encoding label to a concrete encoding.
///
/// Labels are matched case-insensitively against the WHATWG label set
/// (`"utf-8"`, `"ISO-8859-1"`, `"windows-1252"`, …).
pub(crate) fn resolve(label: &str) -> Result<&'static Encoding> {
	Encoding::for_label(label.as_bytes()).ok_or_else(|| Error::UnknownEncoding(label.to_string()))
}

/// Decode bytes in the given encoding to UTF-8.
///
/// Malformed byte sequences are an error, never silently replaced; the
/// writer treats them as a configuration problem of the caller.
pub(crate) fn decode<'a>(encoding: &'static Encoding, bytes: &'a [u8]) -> Result<Cow<'a, str>> {
	if encoding == UTF_8 {
		// no conversion needed, only validation
		match std::str::from_utf8(bytes) {
			Ok(s) => Ok(Cow::Borrowed(s)),
			Err(_) => Err(Error::MalformedInput(encoding.name())),
		}
	} else {
		let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
		if had_errors {
			return Err(Error::MalformedInput(encoding.name()));
		}
		Ok(text)
	}
}

/// Encode UTF-8 text into the given output encoding.
///
/// Characters with no representation in the output encoding become decimal
/// numeric character references, which keeps the document well-formed.
pub(crate) fn encode<'a>(encoding: &'static Encoding, text: &'a str) -> Cow<'a, [u8]> {
	if encoding == UTF_8 {
		Cow::Borrowed(text.as_bytes())
	} else {
		let (bytes, _, _) = encoding.encode(text);
		bytes
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn resolve_known_labels() {
		assert_eq!(resolve("UTF-8").unwrap(), UTF_8);
		assert_eq!(resolve("utf8").unwrap(), UTF_8);
		assert_eq!(resolve("ISO-8859-1").unwrap().name(), "windows-1252");
	}

	#[test]
	fn resolve_unknown_label() {
		match resolve("no-such-encoding") {
			Err(Error::UnknownEncoding(label)) => assert_eq!(label, "no-such-encoding"),
			other => panic!("unexpected resolve result: {:?}", other),
		}
	}

	#[test]
	fn decode_utf8_is_validating_passthrough() {
		let bytes = "grün".as_bytes();
		match decode(UTF_8, bytes).unwrap() {
			Cow::Borrowed(s) => assert_eq!(s, "grün"),
			other => panic!("unexpected decode result: {:?}", other),
		}
	}

	#[test]
	fn decode_rejects_malformed_utf8() {
		match decode(UTF_8, b"\xff\xfe") {
			Err(Error::MalformedInput("UTF-8")) => (),
			other => panic!("unexpected decode result: {:?}", other),
		}
	}

	#[test]
	fn decode_latin1() {
		let enc = resolve("ISO-8859-1").unwrap();
		assert_eq!(decode(enc, b"r\xe9sum\xe9").unwrap(), "résumé");
	}

	#[test]
	fn encode_utf8_is_passthrough() {
		assert_eq!(&*encode(UTF_8, "résumé"), "résumé".as_bytes());
	}

	#[test]
	fn encode_latin1() {
		let enc = resolve("ISO-8859-1").unwrap();
		assert_eq!(&*encode(enc, "résumé"), b"r\xe9sum\xe9");
	}

	#[test]
	fn encode_unrepresentable_uses_decimal_reference() {
		let enc = resolve("ISO-8859-1").unwrap();
		assert_eq!(&*encode(enc, "日"), b"&#26085;");
	}
}
