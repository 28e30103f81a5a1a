/*!
# Namespace-aware writer for XML 1.0 documents

This crate serializes XML documents into an in-memory buffer, managing
namespace prefixes automatically: callers deal in namespace *URIs* only, and
each distinct URI gets a short generated prefix (`a`, `b`, …, `z`, `aa`, …),
declared where it is first used and correctly scoped to the element subtree
it appears in. A URI used again after its scope closed is re-declared with
the prefix it had before, so a document never refers to one namespace by two
names.

## Features

* Elements, attributes, text, CDATA sections and comments, with value
  overloads for strings, byte strings, integers and booleans.
* Automatic, deterministic prefix assignment; explicit prefix binding for
  recipients that insist on a particular prefix; default-namespace elements.
* Input content accepted in any declared encoding, output in the encoding
  chosen at construction (UTF-8 recommended), converted via [`encoding_rs`].
* Optional pretty-printing.
* Writers are reusable: one document per [`XmlWriter::start_document`] /
  [`XmlWriter::end_document`] cycle.

## Example

```
use wxml::XmlWriter;

let mut w = XmlWriter::new("UTF-8")?;
w.start_document("UTF-8")?;
w.start_element("testsuite", Some("urn:example:report"));
w.add_attribute("tests", None, 2)?;
w.add_attribute("failures", None, 0)?;
w.data_element("testcase", None, "ok")?;
w.end_document();

let xml = std::str::from_utf8(w.content()).unwrap();
assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
assert!(xml.contains("<a:testsuite xmlns:a=\"urn:example:report\""));
# Ok::<(), wxml::Error>(())
```

## Restrictions

Element and attribute names (and bound prefixes) must be NCNames within
7-bit ASCII; see [`validation`]. Attribute values, text, and comments may
contain anything representable in the declared input encoding. The writer is
strictly synchronous and not internally synchronized.
*/
pub mod error;
pub mod validation;
pub mod writer;

mod encoding;


pub use error::{Error, Result};
pub use writer::{ToText, XmlWriter, XML_NAMESPACE_URI};
