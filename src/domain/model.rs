use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An integer field that may hold the "not a number" marker.
///
/// Parsing is permissive: anything without a leading integer becomes
/// [`Numeric::NotANumber`] instead of an error. The marker never matches
/// anything in a query, not even another marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Numeric {
    Int(i64),
    NotANumber,
}

impl Numeric {
    /// Leading-integer parse: skips leading whitespace, accepts one sign,
    /// then takes the longest run of ASCII digits and ignores the rest.
    pub fn parse(input: &str) -> Self {
        let s = input.trim_start();
        let (negative, rest) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };

        let digits_len = rest
            .bytes()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if digits_len == 0 {
            return Numeric::NotANumber;
        }

        let digits = &rest[..digits_len];
        let parsed = if negative {
            format!("-{}", digits).parse::<i64>()
        } else {
            digits.parse::<i64>()
        };

        match parsed {
            Ok(n) => Numeric::Int(n),
            Err(_) => Numeric::NotANumber,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Numeric::Int(n) => Some(*n),
            Numeric::NotANumber => None,
        }
    }

    /// Query equality: true only when both sides are the same integer.
    pub fn matches(&self, other: &Numeric) -> bool {
        match (self, other) {
            (Numeric::Int(a), Numeric::Int(b)) => a == b,
            _ => false,
        }
    }
}

impl From<i64> for Numeric {
    fn from(n: i64) -> Self {
        Numeric::Int(n)
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Int(n) => write!(f, "{}", n),
            Numeric::NotANumber => f.write_str("NaN"),
        }
    }
}

impl Serialize for Numeric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Numeric::Int(n) => serializer.serialize_i64(*n),
            Numeric::NotANumber => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Numeric {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<i64>::deserialize(deserializer)?;
        Ok(value.map(Numeric::Int).unwrap_or(Numeric::NotANumber))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    #[serde(rename = "StLastName")]
    pub last_name: String,
    #[serde(rename = "StFirstName")]
    pub first_name: String,
    #[serde(rename = "Grade")]
    pub grade: Numeric,
    #[serde(rename = "Classroom")]
    pub classroom: Numeric,
    #[serde(rename = "Bus")]
    pub bus: Numeric,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    #[serde(rename = "TLastName")]
    pub last_name: String,
    #[serde(rename = "TFirstName")]
    pub first_name: String,
    #[serde(rename = "Classroom")]
    pub classroom: Numeric,
}

/// Immutable snapshot of both datasets as loaded at startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchoolData {
    pub students: Vec<Student>,
    pub teachers: Vec<Teacher>,
}

impl SchoolData {
    pub fn new(students: Vec<Student>, teachers: Vec<Teacher>) -> Self {
        Self { students, teachers }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_parse_leading_integer() {
        assert_eq!(Numeric::parse("12"), Numeric::Int(12));
        assert_eq!(Numeric::parse("  7"), Numeric::Int(7));
        assert_eq!(Numeric::parse("-3"), Numeric::Int(-3));
        assert_eq!(Numeric::parse("+4"), Numeric::Int(4));
        assert_eq!(Numeric::parse("12abc"), Numeric::Int(12));
        assert_eq!(Numeric::parse("3.7"), Numeric::Int(3));
    }

    #[test]
    fn test_numeric_parse_marker() {
        assert_eq!(Numeric::parse(""), Numeric::NotANumber);
        assert_eq!(Numeric::parse("abc"), Numeric::NotANumber);
        assert_eq!(Numeric::parse("-"), Numeric::NotANumber);
        assert_eq!(Numeric::parse("99999999999999999999"), Numeric::NotANumber);
    }

    #[test]
    fn test_marker_never_matches() {
        assert!(Numeric::Int(5).matches(&Numeric::Int(5)));
        assert!(!Numeric::Int(5).matches(&Numeric::Int(6)));
        assert!(!Numeric::NotANumber.matches(&Numeric::NotANumber));
        assert!(!Numeric::NotANumber.matches(&Numeric::Int(5)));
    }

    #[test]
    fn test_student_json_shape() {
        let student = Student {
            last_name: "Doe".to_string(),
            first_name: "John".to_string(),
            grade: Numeric::Int(5),
            classroom: Numeric::Int(101),
            bus: Numeric::NotANumber,
        };

        let json = serde_json::to_string(&student).unwrap();
        assert_eq!(
            json,
            r#"{"StLastName":"Doe","StFirstName":"John","Grade":5,"Classroom":101,"Bus":null}"#
        );

        let back: Student = serde_json::from_str(&json).unwrap();
        assert_eq!(back, student);
    }

    #[test]
    fn test_numeric_display() {
        assert_eq!(Numeric::Int(42).to_string(), "42");
        assert_eq!(Numeric::NotANumber.to_string(), "NaN");
    }
}
