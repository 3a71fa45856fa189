// Query-string assembly for action endpoints.
//
// Parameters are appended in call order and only when they carry a value,
// so the rendered string never has a dangling `&` or a bare `?`.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters left as-is inside a single path segment (RFC 3986 unreserved).
const SEGMENT_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// An ordered list of `key=value` query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    params: Vec<(String, String)>,
}

impl QueryString {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter unconditionally. The value is form-url-encoded.
    pub fn push(&mut self, key: &str, value: &str) -> &mut Self {
        self.params.push((key.to_owned(), encode(value)));
        self
    }

    /// Append a parameter whose value is already encoded.
    pub(crate) fn push_raw(&mut self, key: &str, value: String) -> &mut Self {
        self.params.push((key.to_owned(), value));
        self
    }

    /// Append a non-empty string; empty strings are skipped.
    pub fn push_str(&mut self, key: &str, value: Option<&str>) -> &mut Self {
        match value {
            Some(v) if !v.is_empty() => self.push(key, v),
            _ => self,
        }
    }

    /// Append a Unix timestamp (seconds). `None` and the epoch are skipped.
    pub fn push_timestamp(&mut self, key: &str, value: Option<DateTime<Utc>>) -> &mut Self {
        match value.map(|t| t.timestamp()) {
            Some(secs) if secs != 0 => self.push_raw(key, secs.to_string()),
            _ => self,
        }
    }

    /// Append a duration in milliseconds. `None` and zero are skipped.
    pub fn push_millis(&mut self, key: &str, value: Option<Duration>) -> &mut Self {
        match value.map(|d| d.as_millis()) {
            Some(ms) if ms != 0 => self.push_raw(key, ms.to_string()),
            _ => self,
        }
    }

    /// Append `key=true` when `flag` is set.
    pub fn push_flag(&mut self, key: &str, flag: bool) -> &mut Self {
        if flag {
            self.push_raw(key, "true".into());
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }
}

/// Renders `?k=v&k2=v2`, or nothing at all when there are no parameters.
impl fmt::Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.params.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{key}={value}")?;
        }
        Ok(())
    }
}

/// Form-url-encode a single query value.
pub(crate) fn encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Percent-encode one path segment. Spaces become `%20` and `/` is escaped.
pub(crate) fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT_SET).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn empty_query_renders_nothing() {
        let q = QueryString::new();
        assert!(q.is_empty());
        assert_eq!(q.to_string(), "");
    }

    #[test]
    fn single_parameter_has_no_ampersand() {
        let mut q = QueryString::new();
        q.push_str("dvrConverterOutputFilename", Some("clip.mp4"));
        assert_eq!(q.to_string(), "?dvrConverterOutputFilename=clip.mp4");
    }

    #[test]
    fn absent_values_are_skipped() {
        let mut q = QueryString::new();
        q.push_timestamp("dvrConverterStartTime", None)
            .push_timestamp("dvrConverterEndTime", Some(DateTime::UNIX_EPOCH))
            .push_millis("dvrConverterDuration", Some(Duration::ZERO))
            .push_str("dvrConverterOutputFilename", Some(""))
            .push_flag("dvrConverterDebugConversions", false);
        assert_eq!(q.len(), 0);
        assert_eq!(q.to_string(), "");
    }

    #[test]
    fn parameters_join_in_order() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).single();
        let mut q = QueryString::new();
        q.push_timestamp("dvrConverterStartTime", start)
            .push_millis("dvrConverterDuration", Some(Duration::from_secs(90)))
            .push_flag("dvrConverterDebugConversions", true);
        assert_eq!(
            q.to_string(),
            "?dvrConverterStartTime=1709294400&dvrConverterDuration=90000&dvrConverterDebugConversions=true"
        );
    }

    #[test]
    fn values_are_encoded() {
        let mut q = QueryString::new();
        q.push("dvrConverterOutputFilename", "my clip&more.mp4");
        assert_eq!(
            q.to_string(),
            "?dvrConverterOutputFilename=my+clip%26more.mp4"
        );
    }

    #[test]
    fn path_segments_use_percent_encoding() {
        assert_eq!(encode_segment("myStream.0"), "myStream.0");
        assert_eq!(encode_segment("my clip.0"), "my%20clip.0");
        assert_eq!(encode_segment("a/b+c"), "a%2Fb%2Bc");
    }
}
