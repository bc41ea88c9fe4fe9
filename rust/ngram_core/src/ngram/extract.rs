//! Value-extraction capability supplied by the host.
//!
//! The index never copies or caches value bytes: every add, delete and
//! search asks the extractor again. An extractor must return the same bytes
//! for an unchanged value between index operations.

use std::borrow::Cow;

use super::error::Result;

/// Produces the raw bytes behind a value handle.
pub trait ValueExtractor<V: ?Sized> {
    /// Bytes of `value`. Borrow from the handle where possible.
    fn value_bytes<'v>(&self, value: &'v V) -> Result<Cow<'v, [u8]>>;
}

impl<V: ?Sized, E: ValueExtractor<V> + ?Sized> ValueExtractor<V> for &E {
    fn value_bytes<'v>(&self, value: &'v V) -> Result<Cow<'v, [u8]>> {
        (**self).value_bytes(value)
    }
}

/// Extractor for any value that already is a byte buffer. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsBytes;

impl<V: AsRef<[u8]> + ?Sized> ValueExtractor<V> for AsBytes {
    fn value_bytes<'v>(&self, value: &'v V) -> Result<Cow<'v, [u8]>> {
        Ok(Cow::Borrowed(value.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ngram::error::NgramError;

    #[test]
    fn test_as_bytes_str() {
        let bytes = AsBytes.value_bytes("hello").unwrap();
        assert_eq!(&*bytes, b"hello");
        assert!(matches!(bytes, Cow::Borrowed(_)));
    }

    #[test]
    fn test_as_bytes_owned_buffers() {
        let value = String::from("owned");
        assert_eq!(&*AsBytes.value_bytes(&value).unwrap(), b"owned");

        let buf = vec![1u8, 2, 3];
        assert_eq!(&*AsBytes.value_bytes(&buf).unwrap(), &[1u8, 2, 3]);
    }

    struct Upper;

    impl ValueExtractor<str> for Upper {
        fn value_bytes<'v>(&self, value: &'v str) -> Result<Cow<'v, [u8]>> {
            if value.is_empty() {
                return Err(NgramError::Extraction("empty handle".to_string()));
            }
            Ok(Cow::Owned(value.to_ascii_uppercase().into_bytes()))
        }
    }

    #[test]
    fn test_owned_and_failing_extractor() {
        assert_eq!(&*Upper.value_bytes("abc").unwrap(), b"ABC");
        assert!(matches!(
            Upper.value_bytes(""),
            Err(NgramError::Extraction(_))
        ));
    }

    fn first_byte<E: ValueExtractor<str>>(extractor: E, value: &str) -> Option<u8> {
        extractor.value_bytes(value).ok()?.first().copied()
    }

    #[test]
    fn test_reference_extractor() {
        let upper = Upper;
        assert_eq!(first_byte(&upper, "x"), Some(b'X'));
        assert_eq!(first_byte(&upper, ""), None);
    }
}
