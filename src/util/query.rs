use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

#[derive(Debug, Default)]
pub struct QueryParams {
    map: HashMap<String, String>,
}

impl<'de> Deserialize<'de> for QueryParams {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = HashMap::<String, String>::deserialize(deserializer)?;
        Ok(QueryParams { map })
    }
}

impl QueryParams {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(|x| x.as_str())
    }

    /// Value of `key` if present and not empty.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// Leading integer of the value, the way browsers' `parseInt` reads it:
    /// whitespace is skipped, an optional sign is accepted and parsing stops
    /// at the first non-digit. `"12abc"` is 12, `"abc"` is `None`.
    pub fn leading_int(&self, key: &str) -> Option<i64> {
        let value = self.get(key)?.trim_start();
        let (negative, digits) = match value.as_bytes().first() {
            Some(b'-') => (true, &value[1..]),
            Some(b'+') => (false, &value[1..]),
            _ => (false, value),
        };
        let end = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());
        let n: i64 = digits[..end].parse().ok()?;
        Some(if negative { -n } else { n })
    }

    /// Requested episode number; missing, unparseable or zero means 1.
    pub fn episode(&self) -> i64 {
        match self.leading_int("ep") {
            Some(0) | None => 1,
            Some(n) => n,
        }
    }
}
