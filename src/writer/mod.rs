/*!
# Writer for namespaced XML 1.0 documents

The writer emits a serialized document into an in-memory buffer while keeping
track of element nesting and namespace scope. Namespace handling is the
interesting part: callers pass namespace *URIs*, never prefixes, and the
writer assigns each distinct URI a short generated prefix, declares it on the
element where it first appears, and re-declares it with the same prefix if it
goes out of scope and is used again.

The lifecycle of an [`XmlWriter`] is: construct, start a document, add
elements, attributes and data, end the document, read the content, and
optionally repeat any number of times from the start-document step.

```rust
use wxml::XmlWriter;

let mut w = XmlWriter::new("UTF-8").unwrap();
w.start_document("UTF-8").unwrap();
w.start_element("report", Some("urn:example:report"));
w.add_attribute("failures", None, 0).unwrap();
w.data_element("case", None, "passed").unwrap();
w.end_document();
assert_eq!(
	w.content(),
	&b"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
	   <a:report xmlns:a=\"urn:example:report\" failures=\"0\">\
	   <case>passed</case></a:report>\n"[..],
);
```

Element and attribute names must stay within 7-bit ASCII; attribute values,
text data and comments may contain any byte sequence valid in the input
encoding declared at [`XmlWriter::start_document`].
*/
use std::borrow::Cow;

use bytes::{BufMut, BytesMut};
use encoding_rs::{Encoding, UTF_8};
use log::error;
use smartstring::alias::String as SmartString;

use crate::encoding;
use crate::error::Result;
use crate::validation;

mod prefix;

pub use prefix::XML_NAMESPACE_URI;
use prefix::PrefixMapper;

/// The literal written for `true` values.
static TRUE_VALUE: &'static [u8] = b"true";

/// The literal written for `false` values.
static FALSE_VALUE: &'static [u8] = b"false";

/// Characters which must not appear literally in text content.
static TEXT_SPECIALS: &'static [u8] = &[b'<', b'>', b'&', b'\r'];

// Report a usage-contract violation: fatal in debug builds, a log signal
// plus a skipped operation in release builds.
fn usage_violation(msg: &str) {
	error!("{}", msg);
	debug_assert!(false, "{}", msg);
}

fn check_name(name: &str) {
	if let Err(e) = validation::validate_ncname(name) {
		usage_violation(&format!("invalid name {:?}: {}", name, e));
	}
}

// An empty namespace URI cannot be declared; treat it as absent.
fn nonempty_uri(ns_uri: Option<&str>) -> Option<&str> {
	match ns_uri {
		Some("") => {
			usage_violation("namespace URIs must not be empty");
			None
		}
		other => other,
	}
}

fn escape_text<B: BufMut>(out: &mut B, data: &[u8]) {
	let mut last_index = 0;
	for i in 0..data.len() {
		let ch = data[i];
		if !TEXT_SPECIALS.contains(&ch) {
			continue;
		}
		if i > last_index {
			out.put_slice(&data[last_index..i]);
		}
		match ch {
			b'<' => out.put_slice(b"&lt;"),
			b'>' => out.put_slice(b"&gt;"),
			b'&' => out.put_slice(b"&amp;"),
			b'\r' => out.put_slice(b"&#13;"),
			_ => panic!("byte is not in the specials table"),
		}
		last_index = i + 1;
	}
	out.put_slice(&data[last_index..data.len()]);
}

// Attribute values additionally escape quotes and whitespace control
// characters, and render any character outside 7-bit ASCII as a hexadecimal
// character reference. The escaped form is therefore pure ASCII and needs no
// output-encoding pass.
fn escape_attr_value<B: BufMut>(out: &mut B, value: &str) {
	let mut last_index = 0;
	for (i, ch) in value.char_indices() {
		if !matches!(ch, '"' | '<' | '>' | '&' | '\n' | '\r' | '\t') && (ch as u32) < 0x80 {
			continue;
		}
		if i > last_index {
			out.put_slice(&value.as_bytes()[last_index..i]);
		}
		match ch {
			'"' => out.put_slice(b"&quot;"),
			'<' => out.put_slice(b"&lt;"),
			'>' => out.put_slice(b"&gt;"),
			'&' => out.put_slice(b"&amp;"),
			'\n' => out.put_slice(b"&#10;"),
			'\r' => out.put_slice(b"&#13;"),
			'\t' => out.put_slice(b"&#9;"),
			other => out.put_slice(format!("&#x{:X};", other as u32).as_bytes()),
		}
		last_index = i + ch.len_utf8();
	}
	out.put_slice(&value.as_bytes()[last_index..]);
}

// Append ` xmlns:prefix="uri"` (or ` xmlns="uri"` for the default
// namespace).
fn put_nsdecl(out: &mut BytesMut, ns_prefix: Option<&str>, ns_uri: &str) {
	match ns_prefix {
		Some(ns_prefix) => {
			out.put_slice(b" xmlns:");
			out.put_slice(ns_prefix.as_bytes());
			out.put_slice(b"=\"");
		}
		None => {
			out.put_slice(b" xmlns=\"");
		}
	}
	escape_attr_value(out, ns_uri);
	out.put_u8(b'"');
}

fn put_indent(out: &mut BytesMut, depth: usize) {
	out.put_u8(b'\n');
	for _ in 0..depth {
		out.put_u8(b' ');
	}
}

/// A value writable as attribute value or text content.
///
/// String and byte types are interpreted as text in the declared input
/// encoding. Integers render in decimal, booleans as the literals `true` and
/// `false`.
pub trait ToText {
	/// Return the value as bytes in the writer's input encoding.
	fn to_text(&self) -> Cow<'_, [u8]>;
}

impl<'a, T: ToText + ?Sized> ToText for &'a T {
	fn to_text(&self) -> Cow<'_, [u8]> {
		(**self).to_text()
	}
}

impl ToText for str {
	fn to_text(&self) -> Cow<'_, [u8]> {
		Cow::Borrowed(self.as_bytes())
	}
}

impl ToText for String {
	fn to_text(&self) -> Cow<'_, [u8]> {
		Cow::Borrowed(self.as_bytes())
	}
}

impl ToText for [u8] {
	fn to_text(&self) -> Cow<'_, [u8]> {
		Cow::Borrowed(self)
	}
}

impl ToText for Vec<u8> {
	fn to_text(&self) -> Cow<'_, [u8]> {
		Cow::Borrowed(&self[..])
	}
}

impl ToText for bool {
	fn to_text(&self) -> Cow<'_, [u8]> {
		Cow::Borrowed(if *self { TRUE_VALUE } else { FALSE_VALUE })
	}
}

macro_rules! to_text_via_decimal {
	($($t:ty),*) => {
		$(
			impl ToText for $t {
				fn to_text(&self) -> Cow<'_, [u8]> {
					Cow::Owned(self.to_string().into_bytes())
				}
			}
		)*
	}
}

to_text_via_decimal!(i32, i64, u32, u64);

struct OpenElement {
	qname: SmartString,
	has_child_elements: bool,
	has_text: bool,
}

/**
Writer for namespaced XML 1.0 documents.

See the [module documentation](crate::writer) for an overview and an
example. Two rules are easy to trip over:

* Attributes (and namespace declarations, which are attributes) may only be
  added while the current element has no child content yet. Violations are
  fatal in debug builds and logged and skipped in release builds.
* A writer is single-threaded; it has no internal synchronization.
*/
pub struct XmlWriter {
	mapper: PrefixMapper,
	buf: BytesMut,
	output_encoding: &'static Encoding,
	// the constructor argument, written verbatim into the declaration line
	declared_encoding: String,
	input_encoding: &'static Encoding,
	pretty_print: bool,
	document_open: bool,
	// Adding an attribute after child content was emitted for the same
	// element cannot work: the element header is already closed. The flag
	// lets us catch that aggressively instead of corrupting output.
	attribute_still_ok: bool,
	header_open: bool,
	open_elements: Vec<OpenElement>,
}

impl XmlWriter {
	/// Construct a writer emitting the given output encoding.
	///
	/// The encoding label is resolved immediately; an unknown label is a
	/// configuration error. The label string itself is what ends up in the
	/// `encoding=` pseudo-attribute of the declaration line.
	pub fn new(output_encoding: &str) -> Result<XmlWriter> {
		Self::with_pretty_print(output_encoding, false)
	}

	/// Construct a writer, optionally with automatic newlines and
	/// indentation in the output.
	pub fn with_pretty_print(output_encoding: &str, pretty_print: bool) -> Result<XmlWriter> {
		let encoding = encoding::resolve(output_encoding)?;
		Ok(XmlWriter {
			mapper: PrefixMapper::new(),
			buf: BytesMut::new(),
			output_encoding: encoding,
			declared_encoding: output_encoding.to_string(),
			input_encoding: UTF_8,
			pretty_print,
			document_open: false,
			attribute_still_ok: false,
			header_open: false,
			open_elements: Vec::new(),
		})
	}

	// Reset internal state to the same as right after construction.
	fn reset(&mut self) {
		self.mapper.reset();
		self.buf.clear();
		self.open_elements.clear();
		self.input_encoding = UTF_8;
		self.document_open = false;
		self.attribute_still_ok = false;
		self.header_open = false;
	}

	/// Start a document, discarding any previously accumulated content.
	///
	/// `input_encoding` declares the encoding of the content subsequently
	/// passed to [`add_attribute`], [`data`] and [`write_comment`]; an
	/// unrecognized label is a configuration error. Emits the XML
	/// declaration. A writer may be reused for any number of documents by
	/// calling this once per document.
	///
	///   [`add_attribute`]: Self::add_attribute
	///   [`data`]: Self::data
	///   [`write_comment`]: Self::write_comment
	pub fn start_document(&mut self, input_encoding: &str) -> Result<()> {
		self.reset();
		self.input_encoding = encoding::resolve(input_encoding)?;
		self.document_open = true;
		self.buf.put_slice(b"<?xml version=\"1.0\" encoding=\"");
		self.buf.put_slice(self.declared_encoding.as_bytes());
		self.buf.put_slice(b"\"?>\n");
		Ok(())
	}

	/// End the document: close all elements still open, append a trailing
	/// newline and seal the writer until the next [`start_document`].
	///
	/// The content remains readable via [`content`].
	///
	///   [`start_document`]: Self::start_document
	///   [`content`]: Self::content
	pub fn end_document(&mut self) {
		if !self.require_open() {
			return;
		}
		while !self.open_elements.is_empty() {
			self.end_element();
		}
		self.buf.put_u8(b'\n');
		// namespace bindings do not carry over into the next document
		self.mapper.reset();
		self.document_open = false;
		self.attribute_still_ok = false;
	}

	/// Open an element, optionally belonging to a namespace.
	///
	/// With a namespace URI, the element name is written with the prefix
	/// assigned to that URI, and an `xmlns:` declaration is emitted right
	/// after the name if the URI is not in scope yet. Each call must be
	/// balanced by an [`end_element`] call.
	///
	///   [`end_element`]: Self::end_element
	pub fn start_element(&mut self, name: &str, ns_uri: Option<&str>) {
		if !self.require_open() {
			return;
		}
		check_name(name);
		let ns_uri = nonempty_uri(ns_uri);

		self.begin_child(false);

		// the scope frame opens before prefix resolution so that a mapping
		// established for this element ends with it
		self.mapper.push();
		self.attribute_still_ok = true;

		self.buf.put_u8(b'<');
		let qname: SmartString = match ns_uri {
			Some(ns_uri) => {
				// declare on first use only; reuse within an enclosing
				// scope refers to the existing declaration
				let fresh = !self.mapper.is_mapped(ns_uri);
				let ns_prefix = self.mapper.get_prefix(ns_uri);
				let mut qname = ns_prefix.clone();
				qname.push(':');
				qname.push_str(name);
				self.buf.put_slice(qname.as_bytes());
				if fresh {
					put_nsdecl(&mut self.buf, Some(&*ns_prefix), ns_uri);
				}
				qname
			}
			None => {
				self.buf.put_slice(name.as_bytes());
				name.into()
			}
		};
		self.open_elements.push(OpenElement {
			qname,
			has_child_elements: false,
			has_text: false,
		});
		self.header_open = true;
	}

	/// Open an element and make `ns_uri` the default namespace for it and
	/// its unprefixed descendants.
	///
	/// No prefix is allocated; the URI is declared as `xmlns="…"` on this
	/// element, bypassing the prefix bookkeeping entirely. Nested elements
	/// repeating the call re-declare the URI each time.
	pub fn start_element_default_ns(&mut self, name: &str, ns_uri: &str) {
		if !self.require_open() {
			return;
		}
		check_name(name);
		if ns_uri.is_empty() {
			usage_violation("namespace URIs must not be empty");
			return;
		}

		self.begin_child(false);

		self.mapper.push();
		self.attribute_still_ok = true;

		self.buf.put_u8(b'<');
		self.buf.put_slice(name.as_bytes());
		put_nsdecl(&mut self.buf, None, ns_uri);
		self.open_elements.push(OpenElement {
			qname: name.into(),
			has_child_elements: false,
			has_text: false,
		});
		self.header_open = true;
	}

	/// Close the most recently opened element.
	///
	/// An element without any content closes in self-closing form
	/// (`<name/>`).
	pub fn end_element(&mut self) {
		if !self.require_open() {
			return;
		}
		let element = match self.open_elements.pop() {
			Some(element) => element,
			None => {
				usage_violation("attempting to end an element while none is open");
				return;
			}
		};
		if self.header_open {
			self.buf.put_slice(b"/>");
			self.header_open = false;
		} else {
			if self.pretty_print && element.has_child_elements && !element.has_text {
				put_indent(&mut self.buf, self.open_elements.len());
			}
			self.buf.put_slice(b"</");
			self.buf.put_slice(element.qname.as_bytes());
			self.buf.put_u8(b'>');
		}
		self.mapper.pop();
		self.attribute_still_ok = false;
	}

	/// Add an attribute to the currently open element.
	///
	/// Must be called before any child content is added to the element.
	/// With a namespace URI, the URI is declared on this element first if
	/// necessary, and the attribute name is written with its prefix.
	///
	/// Characters of the value outside 7-bit ASCII are escaped to
	/// hexadecimal character references (such as `&#xF6;`).
	pub fn add_attribute<T: ToText>(
		&mut self,
		name: &str,
		ns_uri: Option<&str>,
		value: T,
	) -> Result<()> {
		if !self.require_open() {
			return Ok(());
		}
		check_name(name);
		let ns_uri = nonempty_uri(ns_uri);
		if !self.attribute_still_ok {
			usage_violation("attempting to add an attribute after adding child content");
			return Ok(());
		}

		let ns_prefix = match ns_uri {
			Some(ns_uri) => {
				// make sure the URI has a prefix and that the mapping is
				// declared in the document
				self.declare_namespace(ns_uri);
				Some(self.mapper.get_prefix(ns_uri))
			}
			None => None,
		};

		let value = value.to_text();
		let text = self.convert(&*value)?;

		self.buf.put_u8(b' ');
		if let Some(ns_prefix) = &ns_prefix {
			self.buf.put_slice(ns_prefix.as_bytes());
			self.buf.put_u8(b':');
		}
		self.buf.put_slice(name.as_bytes());
		self.buf.put_slice(b"=\"");
		escape_attr_value(&mut self.buf, &*text);
		self.buf.put_u8(b'"');
		Ok(())
	}

	/// Declare a namespace URI on the currently open element.
	///
	/// Allocates a prefix and writes the `xmlns:` declaration if the URI is
	/// not in scope yet; a no-op otherwise. Useful to pull a namespace used
	/// by many descendants up to a common ancestor that is not itself part
	/// of it. Subject to the same ordering contract as [`add_attribute`].
	///
	///   [`add_attribute`]: Self::add_attribute
	pub fn declare_namespace(&mut self, ns_uri: &str) {
		if !self.require_open() {
			return;
		}
		if ns_uri.is_empty() {
			usage_violation("namespace URIs must not be empty");
			return;
		}
		if !self.attribute_still_ok {
			usage_violation("attempting to declare a namespace after adding child content");
			return;
		}
		if self.mapper.is_mapped(ns_uri) {
			return;
		}
		let ns_prefix = self.mapper.get_prefix(ns_uri);
		put_nsdecl(&mut self.buf, Some(&*ns_prefix), ns_uri);
	}

	/// Bind a namespace URI to a caller-chosen prefix for the lifetime of
	/// the current document.
	///
	/// Call right after [`start_document`], before the URI is first used.
	/// Prefix management is normally automatic; this exists for recipients
	/// which insist on a particular prefix. The URI is not declared here;
	/// the binding takes effect where the URI is first used. `xml` and
	/// `xmlns` cannot be bound.
	///
	///   [`start_document`]: Self::start_document
	pub fn bind_prefix(&mut self, ns_uri: &str, ns_prefix: &str) {
		if !self.require_open() {
			return;
		}
		if ns_uri.is_empty() {
			usage_violation("namespace URIs must not be empty");
			return;
		}
		if ns_prefix == "xml" || ns_prefix == "xmlns" {
			usage_violation("the prefixes xml and xmlns are reserved and cannot be bound");
			return;
		}
		check_name(ns_prefix);
		self.mapper.associate_prefix(ns_uri, ns_prefix);
		debug_assert!(
			!self.mapper.is_mapped(ns_uri),
			"prefix bound for a namespace URI that is already in scope"
		);
	}

	/// Append text content to the currently open element.
	///
	/// With a namespace URI, the URI is declared on the element first if
	/// necessary (which writes an attribute, so this form is subject to the
	/// attribute ordering contract) and the content is rendered as
	/// `prefix:value`. That content-level namespacing is a convention of
	/// this API, not XML namespace semantics.
	pub fn data<T: ToText>(&mut self, value: T, ns_uri: Option<&str>) -> Result<()> {
		if !self.require_open() {
			return Ok(());
		}
		if self.open_elements.is_empty() {
			usage_violation("attempting to write text content outside of an element");
			return Ok(());
		}
		let ns_uri = nonempty_uri(ns_uri);

		let ns_prefix = match ns_uri {
			Some(ns_uri) => {
				self.declare_namespace(ns_uri);
				Some(self.mapper.get_prefix(ns_uri))
			}
			None => None,
		};

		let value = value.to_text();
		let text = self.convert(&*value)?;

		self.begin_child(true);
		match ns_prefix {
			Some(ns_prefix) => {
				let mut prefixed = String::with_capacity(ns_prefix.len() + 1 + text.len());
				prefixed.push_str(&ns_prefix);
				prefixed.push(':');
				prefixed.push_str(&*text);
				self.put_text(&prefixed);
			}
			None => {
				self.put_text(&*text);
			}
		}
		self.attribute_still_ok = false;
		Ok(())
	}

	/// Insert a literal newline into the current element's content.
	///
	/// Equivalent to `data("\n")`; it has no effect outside of an open
	/// element.
	pub fn newline(&mut self) -> Result<()> {
		self.data("\n", None)
	}

	/// Write the given string as a CDATA section.
	///
	/// The text is written without escaping and without input-encoding
	/// conversion. Call after all attributes of the current element
	/// (including [`declare_namespace`], which writes an attribute), and at
	/// most once per element; content around a second section will not end
	/// up where one would expect.
	///
	///   [`declare_namespace`]: Self::declare_namespace
	pub fn write_cdata(&mut self, text: &str) {
		if !self.require_open() {
			return;
		}
		if self.open_elements.is_empty() {
			usage_violation("attempting to write a CDATA section outside of an element");
			return;
		}
		self.begin_child(true);
		self.buf.put_slice(b"<![CDATA[");
		self.put_raw(text);
		self.buf.put_slice(b"]]>");
		self.attribute_still_ok = false;
	}

	/// Write a comment.
	///
	/// The comment text undergoes input-encoding conversion like text
	/// content, but no escaping.
	pub fn write_comment<T: AsRef<[u8]>>(&mut self, comment: T) -> Result<()> {
		if !self.require_open() {
			return Ok(());
		}
		let text = self.convert(comment.as_ref())?;
		self.begin_child(false);
		self.buf.put_slice(b"<!--");
		self.put_raw(&*text);
		self.buf.put_slice(b"-->");
		self.attribute_still_ok = false;
		Ok(())
	}

	/// Write an element without attributes holding the given value:
	/// `start_element`, unprefixed `data`, `end_element`.
	pub fn data_element<T: ToText>(
		&mut self,
		name: &str,
		ns_uri: Option<&str>,
		value: T,
	) -> Result<()> {
		self.start_element(name, ns_uri);
		let result = self.data(value, None);
		self.end_element();
		result
	}

	/// Return the document written so far.
	///
	/// The slice borrows the internal buffer and is invalidated by the next
	/// mutating call; copy it if it needs to outlive the writer's use.
	/// Typically read after [`end_document`], but valid at any point.
	///
	///   [`end_document`]: Self::end_document
	pub fn content(&self) -> &[u8] {
		&self.buf[..]
	}

	/// Length in bytes of the document written so far.
	pub fn content_len(&self) -> usize {
		self.buf.len()
	}

	/// The number of currently open elements.
	///
	/// Intended for consistency checks when handing control to another
	/// component that fills in a subtree: the depth before and after must
	/// match if that component balances its element calls.
	pub fn element_depth(&self) -> usize {
		self.mapper.depth()
	}

	fn require_open(&self) -> bool {
		if self.document_open {
			return true;
		}
		usage_violation("attempting to write without an open document");
		false
	}

	// Decode content bytes from the declared input encoding.
	fn convert<'a>(&self, bytes: &'a [u8]) -> Result<Cow<'a, str>> {
		encoding::decode(self.input_encoding, bytes)
	}

	// Close the header of the innermost element if it is still open.
	fn close_header(&mut self) {
		if self.header_open {
			self.buf.put_u8(b'>');
			self.header_open = false;
		}
	}

	// Bookkeeping common to all child content. In pretty-print mode,
	// element-like children (elements, comments) start on an indented line
	// of their own as long as the parent has no text content; text glues
	// everything onto one line.
	fn begin_child(&mut self, is_text: bool) {
		self.close_header();
		let pretty = self.pretty_print;
		let depth = self.open_elements.len();
		match self.open_elements.last_mut() {
			Some(parent) if is_text => {
				parent.has_text = true;
			}
			Some(parent) => {
				parent.has_child_elements = true;
				if pretty && !parent.has_text {
					put_indent(&mut self.buf, depth);
				}
			}
			None => {}
		}
	}

	// Escape and append text content, re-encoded into the output encoding
	// when that is not UTF-8.
	fn put_text(&mut self, text: &str) {
		if self.output_encoding == UTF_8 {
			escape_text(&mut self.buf, text.as_bytes());
		} else {
			let mut escaped = BytesMut::new();
			escape_text(&mut escaped, text.as_bytes());
			let escaped = std::str::from_utf8(&escaped).expect("escaped text is valid UTF-8");
			self.buf
				.put_slice(&encoding::encode(self.output_encoding, escaped));
		}
	}

	// Append text verbatim (no escaping), in the output encoding.
	fn put_raw(&mut self, text: &str) {
		self.buf
			.put_slice(&encoding::encode(self.output_encoding, text));
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn mkwriter() -> XmlWriter {
		let mut w = XmlWriter::new("UTF-8").unwrap();
		w.start_document("UTF-8").unwrap();
		w
	}

	fn content_str(w: &XmlWriter) -> &str {
		std::str::from_utf8(w.content()).unwrap()
	}

	#[test]
	fn writes_declaration_line() {
		let w = mkwriter();
		assert_eq!(
			content_str(&w),
			"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"
		);
	}

	#[test]
	fn empty_element_is_self_closing() {
		let mut w = mkwriter();
		w.start_element("root", None);
		w.end_element();
		w.end_document();
		assert_eq!(
			content_str(&w),
			"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<root/>\n"
		);
	}

	#[test]
	fn integer_values() {
		let mut w = mkwriter();
		w.start_element("root", None);
		w.add_attribute("int", None, i32::MIN).unwrap();
		w.data(i32::MIN, None).unwrap();
		w.end_element();
		w.end_document();
		assert_eq!(
			content_str(&w),
			"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
			 <root int=\"-2147483648\">-2147483648</root>\n"
		);
	}

	#[test]
	fn boolean_values() {
		let mut w = mkwriter();
		w.start_element("root", None);
		w.add_attribute("bool1", None, true).unwrap();
		w.add_attribute("bool2", None, false).unwrap();
		w.data(true, None).unwrap();
		w.end_element();
		w.end_document();
		assert_eq!(
			content_str(&w),
			"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
			 <root bool1=\"true\" bool2=\"false\">true</root>\n"
		);
	}

	#[test]
	fn attributes_render_in_call_order() {
		let mut w = mkwriter();
		w.start_element("e", None);
		w.add_attribute("n", None, 5).unwrap();
		w.add_attribute("n2", None, true).unwrap();
		w.data("x", None).unwrap();
		w.end_element();
		w.end_document();
		assert_eq!(
			content_str(&w),
			"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
			 <e n=\"5\" n2=\"true\">x</e>\n"
		);
	}

	#[test]
	fn text_content_is_escaped() {
		let mut w = mkwriter();
		w.start_element("root", None);
		w.data("<!-- & -->", None).unwrap();
		w.end_element();
		w.end_document();
		assert_eq!(
			content_str(&w),
			"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
			 <root>&lt;!-- &amp; --&gt;</root>\n"
		);
	}

	#[test]
	fn attribute_values_escape_quotes_and_whitespace() {
		let mut w = mkwriter();
		w.start_element("root", None);
		w.add_attribute("a", None, "say \"hi\"\tplease\n").unwrap();
		w.end_element();
		w.end_document();
		assert_eq!(
			content_str(&w),
			"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
			 <root a=\"say &quot;hi&quot;&#9;please&#10;\"/>\n"
		);
	}

	#[test]
	fn attribute_values_escape_non_ascii_to_hex_references() {
		let mut w = mkwriter();
		w.start_element("root", None);
		w.add_attribute("name", None, "Hölzle").unwrap();
		w.end_element();
		w.end_document();
		assert_eq!(
			content_str(&w),
			"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
			 <root name=\"H&#xF6;lzle\"/>\n"
		);
	}

	#[test]
	fn cdata_and_comments_are_not_escaped() {
		let mut w = mkwriter();
		w.start_element("root", None);
		w.write_cdata("<&cdataisnotescaped");
		w.write_comment("another <!--comment-->").unwrap();
		w.end_element();
		w.end_document();
		assert_eq!(
			content_str(&w),
			"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
			 <root><![CDATA[<&cdataisnotescaped]]><!--another <!--comment-->--></root>\n"
		);
	}

	#[test]
	fn newline_is_plain_data() {
		let mut w = mkwriter();
		w.start_element("root", None);
		w.data("a", None).unwrap();
		w.newline().unwrap();
		w.data("b", None).unwrap();
		w.end_element();
		w.end_document();
		assert_eq!(
			content_str(&w),
			"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<root>a\nb</root>\n"
		);
	}

	#[test]
	fn data_element_convenience() {
		let mut w = mkwriter();
		w.start_element("root", None);
		w.data_element("child", None, "content").unwrap();
		w.data_element("count", None, 123).unwrap();
		w.data_element("ok", None, false).unwrap();
		w.end_element();
		w.end_document();
		assert_eq!(
			content_str(&w),
			"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
			 <root><child>content</child><count>123</count><ok>false</ok></root>\n"
		);
	}

	#[test]
	fn content_is_readable_before_end_document() {
		let mut w = mkwriter();
		w.start_element("root", None);
		w.data("partial", None).unwrap();
		assert_eq!(
			content_str(&w),
			"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<root>partial"
		);
		assert_eq!(w.content_len(), w.content().len());
		w.end_element();
		w.end_document();
	}

	#[test]
	fn element_depth_is_balanced() {
		let mut w = mkwriter();
		assert_eq!(w.element_depth(), 0);
		w.start_element("a", None);
		w.start_element("b", None);
		assert_eq!(w.element_depth(), 2);
		w.end_element();
		assert_eq!(w.element_depth(), 1);
		w.end_element();
		assert_eq!(w.element_depth(), 0);
		w.end_document();
	}

	#[test]
	fn end_document_closes_open_elements() {
		let mut w = mkwriter();
		w.start_element("a", None);
		w.start_element("b", None);
		w.start_element("c", None);
		w.end_document();
		assert_eq!(
			content_str(&w),
			"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<a><b><c/></b></a>\n"
		);
	}

	#[test]
	fn unknown_output_encoding_is_an_error() {
		match XmlWriter::new("no-such-encoding") {
			Err(crate::Error::UnknownEncoding(label)) => {
				assert_eq!(label, "no-such-encoding");
			}
			other => panic!("unexpected constructor result: {:?}", other.map(|_| ())),
		}
	}

	#[test]
	fn unknown_input_encoding_is_an_error() {
		let mut w = XmlWriter::new("UTF-8").unwrap();
		match w.start_document("no-such-encoding") {
			Err(crate::Error::UnknownEncoding(_)) => (),
			other => panic!("unexpected start_document result: {:?}", other),
		}
	}

	#[test]
	fn malformed_input_is_an_error() {
		let mut w = mkwriter();
		w.start_element("root", None);
		match w.data(&b"\xff\xfe"[..], None) {
			Err(crate::Error::MalformedInput("UTF-8")) => (),
			other => panic!("unexpected data result: {:?}", other),
		}
	}

	#[test]
	fn input_encoding_conversion() {
		let mut w = XmlWriter::new("UTF-8").unwrap();
		w.start_document("ISO-8859-1").unwrap();
		w.start_element("root", None);
		w.start_element("nested", None);
		w.add_attribute("name", None, "John Doe").unwrap();
		w.add_attribute("i18n-name", None, &b"Urs H\xf6lzle"[..])
			.unwrap();
		w.data(&b"r\xe9sum\xe9"[..], None).unwrap();

		let expected_start = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
			 <root><nested name=\"John Doe\" i18n-name=\"Urs H&#xF6;lzle\">résumé";
		assert_eq!(content_str(&w), expected_start);
		assert_eq!(w.content_len(), expected_start.len());

		w.end_element();
		w.data_element("some-text", None, &b"Urs H\xf6lzle's r\xe9sum\xe9"[..])
			.unwrap();
		w.end_element();
		w.end_document();
		assert_eq!(
			content_str(&w),
			"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
			 <root><nested name=\"John Doe\" i18n-name=\"Urs H&#xF6;lzle\">résumé</nested>\
			 <some-text>Urs Hölzle's résumé</some-text></root>\n"
		);
	}

	#[test]
	fn comment_undergoes_input_conversion() {
		let mut w = XmlWriter::new("UTF-8").unwrap();
		w.start_document("ISO-8859-1").unwrap();
		w.start_element("root", None);
		w.write_comment(&b"gr\xfcn"[..]).unwrap();
		w.end_element();
		w.end_document();
		assert_eq!(
			content_str(&w),
			"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<root><!--grün--></root>\n"
		);
	}

	#[test]
	fn non_utf8_output_encoding() {
		let mut w = XmlWriter::new("ISO-8859-1").unwrap();
		w.start_document("UTF-8").unwrap();
		w.start_element("root", None);
		w.data("résumé", None).unwrap();
		w.end_element();
		w.end_document();
		assert_eq!(
			w.content(),
			&b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\n\
			   <root>r\xe9sum\xe9</root>\n"[..]
		);
	}

	#[test]
	fn non_utf8_output_replaces_unrepresentable_characters() {
		let mut w = XmlWriter::new("ISO-8859-1").unwrap();
		w.start_document("UTF-8").unwrap();
		w.start_element("root", None);
		w.data("日", None).unwrap();
		w.end_element();
		w.end_document();
		assert_eq!(
			w.content(),
			&b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\n\
			   <root>&#26085;</root>\n"[..]
		);
	}

	#[test]
	fn pretty_print() {
		let mut w = XmlWriter::with_pretty_print("UTF-8", true).unwrap();
		w.start_document("UTF-8").unwrap();
		w.start_element("root", None);
		w.start_element("child1", None);
		w.start_element("child2", None);
		w.start_element("child3", None);
		w.data("data", None).unwrap();
		w.end_element();
		w.end_element();
		w.end_element();
		w.end_document();
		assert_eq!(
			content_str(&w),
			"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
			 <root>\n\
			 \x20<child1>\n\
			 \x20\x20<child2>\n\
			 \x20\x20\x20<child3>data</child3>\n\
			 \x20\x20</child2>\n\
			 \x20</child1>\n\
			 </root>\n"
		);
	}

	#[cfg(debug_assertions)]
	#[test]
	#[should_panic(expected = "attempting to add an attribute after adding child content")]
	fn attribute_after_child_panics_in_debug() {
		let mut w = mkwriter();
		w.start_element("child_1", None);
		w.start_element("sub_1", None);
		w.end_element();
		let _ = w.add_attribute("name", None, "value");
	}

	#[cfg(debug_assertions)]
	#[test]
	#[should_panic(expected = "attempting to write without an open document")]
	fn element_before_start_document_panics_in_debug() {
		let mut w = XmlWriter::new("UTF-8").unwrap();
		w.start_element("root", None);
	}

	#[cfg(debug_assertions)]
	#[test]
	#[should_panic(expected = "attempting to end an element while none is open")]
	fn unbalanced_end_element_panics_in_debug() {
		let mut w = mkwriter();
		w.end_element();
	}

	#[cfg(debug_assertions)]
	#[test]
	#[should_panic(expected = "reserved")]
	fn binding_the_xmlns_prefix_panics_in_debug() {
		let mut w = mkwriter();
		w.bind_prefix("uri:foo", "xmlns");
	}
}
