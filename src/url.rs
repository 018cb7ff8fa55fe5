// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use lazy_static::lazy_static;
use regex::Regex;

use crate::quantize::PLACEHOLDER;

lazy_static! {
    // Maximal digit runs, replaced individually inside the index segment.
    // [0-9] rather than \d: the regex crate's \d is Unicode-aware.
    static ref DIGIT_RUN_REGEX: Regex = Regex::new(r"[0-9]+").expect("failed creating regex");
    // A whole path segment containing at least one digit, bounded by the
    // next '/', the query string, or the end of the URL. The leading slash
    // is consumed (no lookbehind support) and re-emitted on replacement.
    static ref SEGMENT_WITH_DIGITS_REGEX: Regex =
        Regex::new(r"/[^?/0-9]*[0-9][^?/]*").expect("failed creating regex");
}

/// Rewrites a request path into a low-cardinality resource string.
///
/// The first path segment names the index/table and keeps its textual
/// shape: each run of digits inside it collapses to a single `?`. Every
/// later segment containing any digit is replaced wholesale by `?`. URLs
/// with no second segment are returned unchanged.
pub fn sanitize_url(url: &str) -> String {
    let Some(index_end) = url
        .get(1..)
        .and_then(|rest| rest.find('/'))
        .map(|at| at + 1)
    else {
        return url.to_string();
    };

    let (index_part, rest) = url.split_at(index_end);
    let sanitized = format!("{}{}", DIGIT_RUN_REGEX.replace_all(index_part, PLACEHOLDER), rest);

    SEGMENT_WITH_DIGITS_REGEX
        .replace_all(&sanitized, "/?")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::sanitize_url;

    #[test]
    fn test_digit_runs_in_index_segment() {
        assert_eq!(sanitize_url("/my-index-2024/_search"), "/my-index-?/_search");
        assert_eq!(sanitize_url("/logs-2024-01/_search"), "/logs-?-?/_search");
    }

    #[test]
    fn test_later_segments_collapse_wholesale() {
        assert_eq!(sanitize_url("/foo/123/bar"), "/foo/?/bar");
        assert_eq!(sanitize_url("/foo/123/456"), "/foo/?/?");
        assert_eq!(sanitize_url("/idx/user99x/get"), "/idx/?/get");
    }

    #[test]
    fn test_index_and_document_id() {
        assert_eq!(sanitize_url("/my-index-2024/doc/42"), "/my-index-?/doc/?");
    }

    #[test]
    fn test_no_second_segment_is_unchanged() {
        assert_eq!(sanitize_url("/onlysegment"), "/onlysegment");
        assert_eq!(sanitize_url("/index-2024"), "/index-2024");
        assert_eq!(sanitize_url("_cat"), "_cat");
        assert_eq!(sanitize_url(""), "");
    }

    #[test]
    fn test_no_digits_anywhere_is_unchanged() {
        assert_eq!(sanitize_url("/idx/_search"), "/idx/_search");
    }

    #[test]
    fn test_query_string_bounds_segments() {
        assert_eq!(sanitize_url("/idx/doc1?q=2"), "/idx/??q=2");
        assert_eq!(sanitize_url("/idx/_search?size=100"), "/idx/_search?size=100");
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(sanitize_url("foo1/bar2"), "foo?/?");
    }
}
