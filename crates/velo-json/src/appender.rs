//! Scratch buffer for string and word literals.

/// Clearable, append-only buffer of UTF-16 code units.
///
/// `\uXXXX` escapes append a single code unit, so a surrogate pair written as
/// two escapes comes out as one character. Unpaired surrogates become U+FFFD
/// when the buffer is taken.
#[derive(Debug, Default)]
pub struct Appender {
    units: Vec<u16>,
}

impl Appender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.units.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn push_char(&mut self, c: char) {
        let mut buf = [0u16; 2];
        self.units.extend_from_slice(c.encode_utf16(&mut buf));
    }

    pub fn push_unit(&mut self, unit: u16) {
        self.units.push(unit);
    }

    /// Decode the accumulated units and clear the buffer.
    pub fn take(&mut self) -> String {
        let s = String::from_utf16_lossy(&self.units);
        self.units.clear();
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_clears_buffer() {
        let mut a = Appender::new();
        a.push_char('h');
        a.push_char('é');
        assert_eq!(a.take(), "hé");
        assert!(a.is_empty());
        assert_eq!(a.take(), "");
    }

    #[test]
    fn surrogate_units_combine() {
        let mut a = Appender::new();
        a.push_unit(0xD83D);
        a.push_unit(0xDE00);
        assert_eq!(a.take(), "\u{1F600}");
    }

    #[test]
    fn lone_surrogate_is_replaced() {
        let mut a = Appender::new();
        a.push_char('x');
        a.push_unit(0xD800);
        assert_eq!(a.take(), "x\u{FFFD}");
    }

    #[test]
    fn astral_char_round_trips() {
        let mut a = Appender::new();
        a.push_char('🦀');
        assert_eq!(a.take(), "🦀");
    }
}
