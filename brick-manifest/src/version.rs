use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, Serializer};

/// `MAJOR.MINOR.PATCH` version of a brick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("invalid version '{s}', expected 'MAJOR.MINOR.PATCH'");

        let mut numbers = s.split('.').map(|part| part.parse::<u32>().map_err(|_| invalid()));
        let version = Version {
            major: numbers.next().ok_or_else(invalid)??,
            minor: numbers.next().ok_or_else(invalid)??,
            patch: numbers.next().ok_or_else(invalid)??,
        };
        match numbers.next() {
            Some(_) => Err(invalid()),
            None => Ok(version),
        }
    }
}

impl TryFrom<String> for Version {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let v: Version = "1.20.3".parse().unwrap();
        assert_eq!(v, Version::new(1, 20, 3));
        assert_eq!(v.to_string(), "1.20.3");
    }

    #[test]
    fn test_parse_invalid() {
        for s in ["", "1", "1.2", "1.2.3.4", "a.b.c", "1.2.x", "1..3", "-1.0.0"] {
            assert!(s.parse::<Version>().is_err(), "{s:?} should not parse");
        }
    }

    #[test]
    fn test_ordering() {
        assert!(Version::new(0, 2, 0) > Version::new(0, 1, 9));
        assert!(Version::new(1, 0, 0) > Version::new(0, 99, 99));
    }

    #[test]
    fn test_serialize_as_string() {
        let json = serde_json::to_string(&Version::new(0, 1, 0)).unwrap();
        assert_eq!(json, "\"0.1.0\"");
    }
}
