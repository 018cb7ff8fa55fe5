// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Resource-name quantization for Elasticsearch-style requests.
//!
//! Outgoing search/indexing requests carry high-cardinality literals
//! (document ids, numeric values, free-text terms) in both their URL path
//! and their JSON body. Used verbatim as span resource names, those
//! literals defeat aggregation in the trace backend and can leak payload
//! data into trace metadata. The functions in this crate rewrite both
//! surfaces into low-cardinality resource strings:
//!
//! ```
//! use dd_trace_elasticsearch::{format_body, sanitize_url, QuantizeOptions};
//!
//! assert_eq!(sanitize_url("/my-index-2024/_search"), "/my-index-?/_search");
//!
//! let body = format_body(r#"{"query":{"match":{"age":30}}}"#, &QuantizeOptions::default());
//! assert_eq!(body, r#"{"query":{"match":{"age":"?"}}}"#);
//! ```
//!
//! Everything here is a pure function of its arguments; there is no shared
//! state and calls may run concurrently without coordination.

mod error;
pub use error::{Error, Result};

pub mod log;

mod options;
pub use options::{QuantizeOptions, Show, DEFAULT_SHOW_KEYS};

mod quantize;
pub use quantize::{
    format_body, format_body_strict, quantize_statement, quantize_value, PLACEHOLDER,
};

mod url;
pub use url::sanitize_url;
