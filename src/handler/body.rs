use std::fmt;
use std::io;

/// Output buffer handlers write their response body into
///
/// For HEAD requests the dispatcher marks the buffer as suppressed: handlers still
/// write into it, and the contents are discarded once dispatch finishes.
#[derive(Debug, Default, Clone)]
pub struct ResponseBody {
    buf: Vec<u8>,
    suppressed: bool,
}

impl ResponseBody {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A buffer whose contents will be discarded
    #[must_use]
    pub fn suppressed() -> Self {
        Self {
            buf: Vec::new(),
            suppressed: true,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    pub fn write_str(&mut self, s: &str) {
        self.buf.extend_from_slice(s.as_bytes());
    }

    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Drop anything written so far
    pub fn discard(&mut self) {
        self.buf.clear();
    }

    /// Take the buffered bytes, or nothing if the body is suppressed
    #[must_use]
    pub fn finish(mut self) -> Vec<u8> {
        if self.suppressed {
            self.discard();
        }
        self.buf
    }
}

impl io::Write for ResponseBody {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl fmt::Write for ResponseBody {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        ResponseBody::write_str(self, s);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_finish_returns_written_bytes() {
        let mut body = ResponseBody::new();
        body.write_str("Hello! ");
        write!(body, "{}", 42).unwrap();
        assert_eq!(body.finish(), b"Hello! 42".to_vec());
    }

    #[test]
    fn test_suppressed_body_is_discarded() {
        let mut body = ResponseBody::suppressed();
        body.write_str("should vanish");
        assert_eq!(body.len(), 13);
        assert!(body.finish().is_empty());
    }
}
