use std::{fmt, num::ParseIntError, str};

/// The identifier of a switch port, `1..=N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InterfaceId(u32);

impl InterfaceId {
    pub const FIRST: Self = InterfaceId::new(1);

    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use = "function does not modify the current value"]
    pub(crate) fn next(self) -> Self {
        Self::new(self.0 + 1)
    }

    #[inline(always)]
    pub fn into_u32(self) -> u32 {
        self.0
    }

    /// Position of the interface in a port list ordered by id.
    #[inline(always)]
    pub(crate) fn index(self) -> usize {
        (self.0 as usize).saturating_sub(1)
    }
}

impl str::FromStr for InterfaceId {
    type Err = ParseIntError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl fmt::Display for InterfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print() {
        assert_eq!(format!("{}", InterfaceId(42)), "42");
        assert_eq!(format!("{:<6}|", InterfaceId(7)), "7     |");
    }
    #[test]
    fn parse() {
        assert_eq!("42".parse::<InterfaceId>().unwrap(), InterfaceId(42));
        assert!("-1".parse::<InterfaceId>().is_err());
    }
    #[test]
    fn ids_follow_each_other() {
        assert_eq!(InterfaceId::FIRST.next(), InterfaceId(2));
        assert_eq!(InterfaceId::FIRST.index(), 0);
        assert_eq!(InterfaceId(48).index(), 47);
    }
}
