use crate::Error;

/// How writes at the cursor treat the characters already there.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Mode {
    /// Shift the tail up to make room; the string only grows.
    #[default]
    Insert = 0,
    /// Replace characters in place; the string grows only when writing past
    /// its end.
    Overwrite = 1,
}

impl TryFrom<u8> for Mode {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Mode::Insert),
            1 => Ok(Mode::Overwrite),
            other => Err(Error::InvalidMode(other)),
        }
    }
}

impl From<Mode> for u8 {
    fn from(mode: Mode) -> Self {
        mode as u8
    }
}

#[cfg(test)]
mod tests {
    use super::Mode;
    use crate::Error;

    #[test]
    fn raw_values_round_trip() {
        assert_eq!(Mode::try_from(0), Ok(Mode::Insert));
        assert_eq!(Mode::try_from(1), Ok(Mode::Overwrite));
        assert_eq!(u8::from(Mode::Overwrite), 1);
    }

    #[test]
    fn unknown_raw_value_is_rejected() {
        assert_eq!(Mode::try_from(7), Err(Error::InvalidMode(7)));
    }
}
