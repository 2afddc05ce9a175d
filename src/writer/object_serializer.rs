//! PDF object serialization.
//!
//! Serializes PDF objects to their byte representation according to
//! PDF specification ISO 32000-1:2008, Section 7.3. Output is compact and
//! single-line: `<< /Type /Pages /Kids [4 0 R] /Count 1 >>`.

use crate::error::Result;
use crate::object::{Dictionary, Object, ObjectRef};
use std::io::Write;

/// Serializer for PDF objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectSerializer;

impl ObjectSerializer {
    /// Create a new object serializer.
    pub fn new() -> Self {
        Self
    }

    /// Serialize an object to bytes.
    pub fn serialize(&self, obj: &Object) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_object(&mut buf, obj)?;
        Ok(buf)
    }

    /// Write an indirect object definition to `w`.
    ///
    /// Format: `{id} {gen} obj\n{object}\nendobj\n`
    pub fn write_indirect<W: Write>(
        &self,
        w: &mut W,
        id: u32,
        gen: u16,
        obj: &Object,
    ) -> std::io::Result<()> {
        writeln!(w, "{} {} obj", id, gen)?;
        self.write_object(w, obj)?;
        write!(w, "\nendobj\n")
    }

    /// Write an object to a buffer.
    pub fn write_object<W: Write>(&self, w: &mut W, obj: &Object) -> std::io::Result<()> {
        match obj {
            Object::Null => write!(w, "null"),
            Object::Integer(i) => write!(w, "{}", i),
            Object::Real(r) => self.write_real(w, *r),
            Object::Name(n) => self.write_name(w, n),
            Object::Array(arr) => self.write_array(w, arr),
            Object::Dictionary(dict) => self.write_dictionary(w, dict),
            Object::Stream { dict, data } => self.write_stream(w, dict, data),
            Object::Reference(r) => write!(w, "{} {} R", r.id, r.gen),
        }
    }

    /// Write a real number, integral values without a fraction.
    fn write_real<W: Write>(&self, w: &mut W, value: f64) -> std::io::Result<()> {
        if value.fract() == 0.0 {
            write!(w, "{}", value as i64)
        } else {
            let formatted = format!("{:.5}", value);
            let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
            write!(w, "{}", trimmed)
        }
    }

    /// Write a PDF name.
    ///
    /// Names start with `/` and escape special characters with `#xx`.
    fn write_name<W: Write>(&self, w: &mut W, name: &str) -> std::io::Result<()> {
        write!(w, "/")?;
        for byte in name.bytes() {
            match byte {
                b'!'
                | b'"'
                | b'$'..=b'&'
                | b'\''..=b'.'
                | b'0'..=b'9'
                | b';'
                | b'<'
                | b'>'
                | b'?'
                | b'@'
                | b'A'..=b'Z'
                | b'^'..=b'z'
                | b'|'
                | b'~' => {
                    w.write_all(&[byte])?;
                },
                _ => {
                    write!(w, "#{:02X}", byte)?;
                },
            }
        }
        Ok(())
    }

    /// Write a PDF array.
    fn write_array<W: Write>(&self, w: &mut W, arr: &[Object]) -> std::io::Result<()> {
        write!(w, "[")?;
        for (i, obj) in arr.iter().enumerate() {
            if i > 0 {
                write!(w, " ")?;
            }
            self.write_object(w, obj)?;
        }
        write!(w, "]")
    }

    /// Write a PDF dictionary in insertion order.
    fn write_dictionary<W: Write>(&self, w: &mut W, dict: &Dictionary) -> std::io::Result<()> {
        write!(w, "<<")?;
        for (key, value) in dict {
            write!(w, " ")?;
            self.write_name(w, key)?;
            write!(w, " ")?;
            self.write_object(w, value)?;
        }
        write!(w, " >>")
    }

    /// Write a PDF stream. `/Length` always reflects `data.len()`.
    fn write_stream<W: Write>(
        &self,
        w: &mut W,
        dict: &Dictionary,
        data: &[u8],
    ) -> std::io::Result<()> {
        let length = Object::Integer(data.len() as i64);
        if dict.get("Length") == Some(&length) {
            self.write_dictionary(w, dict)?;
        } else {
            let mut dict_with_length = dict.clone();
            dict_with_length.insert("Length".to_string(), length);
            self.write_dictionary(w, &dict_with_length)?;
        }
        write!(w, "\nstream\n")?;
        w.write_all(data)?;
        write!(w, "\nendstream")
    }
}

/// Helper functions for building PDF objects.
impl ObjectSerializer {
    /// Create a Name object.
    pub fn name(s: &str) -> Object {
        Object::Name(s.to_string())
    }

    /// Create an Integer object.
    pub fn integer(i: i64) -> Object {
        Object::Integer(i)
    }

    /// Create an Array object.
    pub fn array(items: Vec<Object>) -> Object {
        Object::Array(items)
    }

    /// Create an ordered Dictionary object.
    pub fn dict(entries: Vec<(&str, Object)>) -> Object {
        Object::Dictionary(Self::dictionary(entries))
    }

    /// Create an ordered dictionary map.
    pub fn dictionary(entries: Vec<(&str, Object)>) -> Dictionary {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    /// Create a Reference object.
    pub fn reference(r: ObjectRef) -> Object {
        Object::Reference(r)
    }

    /// Create a rectangle array [x, y, width, height] -> [llx, lly, urx, ury].
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Object {
        Object::Array(vec![
            Object::Real(x),
            Object::Real(y),
            Object::Real(x + width),
            Object::Real(y + height),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(obj: &Object) -> String {
        String::from_utf8(ObjectSerializer::new().serialize(obj).unwrap()).unwrap()
    }

    #[test]
    fn test_serialize_scalars() {
        assert_eq!(render(&Object::Null), "null");
        assert_eq!(render(&Object::Integer(-123)), "-123");
    }

    #[test]
    fn test_serialize_real() {
        assert_eq!(render(&Object::Real(3.14258)), "3.14258");
        assert_eq!(render(&Object::Real(612.0)), "612");
        assert_eq!(render(&Object::Real(0.5)), "0.5");
    }

    #[test]
    fn test_serialize_name_with_special_chars() {
        assert_eq!(render(&ObjectSerializer::name("DCTDecode")), "/DCTDecode");
        assert_eq!(render(&ObjectSerializer::name("Name With Space")), "/Name#20With#20Space");
    }

    #[test]
    fn test_serialize_catalog() {
        let catalog = ObjectSerializer::dict(vec![
            ("Type", ObjectSerializer::name("Catalog")),
            ("Pages", ObjectSerializer::reference(ObjectRef::new(2, 0))),
        ]);
        assert_eq!(render(&catalog), "<< /Type /Catalog /Pages 2 0 R >>");
    }

    #[test]
    fn test_serialize_nested_dictionary() {
        let resources = ObjectSerializer::dict(vec![(
            "XObject",
            ObjectSerializer::dict(vec![("Im0", Object::Reference(ObjectRef::new(5, 0)))]),
        )]);
        assert_eq!(render(&resources), "<< /XObject << /Im0 5 0 R >> >>");
    }

    #[test]
    fn test_serialize_array_and_rect() {
        let kids = ObjectSerializer::array(vec![
            Object::Reference(ObjectRef::new(4, 0)),
            Object::Reference(ObjectRef::new(7, 0)),
        ]);
        assert_eq!(render(&kids), "[4 0 R 7 0 R]");
        assert_eq!(render(&ObjectSerializer::rect(0.0, 0.0, 612.0, 792.0)), "[0 0 612 792]");
    }

    #[test]
    fn test_serialize_indirect() {
        let mut bytes = Vec::new();
        ObjectSerializer::new()
            .write_indirect(&mut bytes, 1, 0, &Object::Integer(42))
            .unwrap();
        assert_eq!(bytes, b"1 0 obj\n42\nendobj\n");
    }

    #[test]
    fn test_stream_length_added() {
        let stream = Object::Stream {
            dict: Dictionary::new(),
            data: bytes::Bytes::from_static(b"q\nQ\n"),
        };
        assert_eq!(render(&stream), "<< /Length 4 >>\nstream\nq\nQ\n\nendstream");
    }

    #[test]
    fn test_stream_length_corrected_in_place() {
        let dict = ObjectSerializer::dictionary(vec![
            ("Filter", ObjectSerializer::name("DCTDecode")),
            ("Length", ObjectSerializer::integer(999)),
        ]);
        let stream = Object::Stream {
            dict,
            data: bytes::Bytes::from_static(b"abc"),
        };
        assert_eq!(
            render(&stream),
            "<< /Filter /DCTDecode /Length 3 >>\nstream\nabc\nendstream"
        );
    }

    #[test]
    fn test_empty_dictionary() {
        assert_eq!(render(&Object::Dictionary(Dictionary::new())), "<< >>");
    }
}
