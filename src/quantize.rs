// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use serde_json::{Map, Value};

use crate::{
    dd_debug,
    error::{Error, Result},
    options::QuantizeOptions,
};

/// Stands in for every redacted value; serialized into statements as the
/// JSON string `"?"`.
pub const PLACEHOLDER: &str = "?";

/// Rewrites a request body into a low-cardinality resource string.
///
/// Caller options are merged over the engine defaults
/// ([`QuantizeOptions::defaults`]). Never fails: any condition the strict
/// path surfaces is swallowed here and the whole call degrades to
/// [`PLACEHOLDER`], so tracing can never break the traced application.
pub fn format_body(body: &str, options: &QuantizeOptions) -> String {
    match format_body_strict(body, options) {
        Ok(quantized) => quantized,
        Err(e) => {
            dd_debug!("body quantization failed, using placeholder resource: {e}");
            PLACEHOLDER.to_string()
        }
    }
}

/// Non-degraded variant of [`format_body`] for callers that want to handle
/// errors explicitly.
///
/// Statements are processed independently: a statement that is not valid
/// JSON becomes [`PLACEHOLDER`] in the output without affecting its
/// siblings. Only a reserialization failure propagates.
pub fn format_body_strict(body: &str, options: &QuantizeOptions) -> Result<String> {
    let options = QuantizeOptions::defaults().merge(options);

    let statements = split_statements(body);

    let mut quantized = Vec::with_capacity(statements.len());
    for statement in statements {
        match reserialize_statement(statement, &options) {
            Ok(output) => quantized.push(output),
            Err(Error::MalformedInput(e)) => {
                dd_debug!("replacing malformed statement with placeholder: {e}");
                quantized.push(PLACEHOLDER.to_string());
            }
            Err(e) => return Err(e),
        }
    }

    Ok(quantized.join("\n"))
}

// A body is a bulk query iff it ends with a newline; trailing empty lines
// are discarded, interior ones are kept (and fail parsing).
fn split_statements(body: &str) -> Vec<&str> {
    if !body.ends_with('\n') {
        return vec![body];
    }

    let mut statements: Vec<&str> = body.split('\n').collect();
    while statements.last() == Some(&"") {
        statements.pop();
    }
    statements
}

fn reserialize_statement(statement: &str, options: &QuantizeOptions) -> Result<String> {
    let parsed: Value = serde_json::from_str(statement).map_err(Error::MalformedInput)?;
    serde_json::to_string(&quantize_statement(parsed, options)).map_err(Error::Reserialize)
}

/// Quantizes one parsed statement.
///
/// Mappings get the per-key policy: keys in `show` keep their value
/// verbatim (no recursion, even into containers), keys in `exclude` are
/// dropped, everything else recurses through [`quantize_value`]. Surviving
/// keys keep their original order. Non-mapping statements are quantized as
/// plain values.
pub fn quantize_statement(statement: Value, options: &QuantizeOptions) -> Value {
    if options.show.is_all() {
        return statement;
    }

    match statement {
        Value::Object(mapping) => {
            let mut quantized = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                if options.show.contains(&key) {
                    quantized.insert(key, value);
                } else if !options.exclude.contains(&key) {
                    let value = quantize_value(value, options);
                    quantized.insert(key, value);
                }
            }
            Value::Object(quantized)
        }
        other => quantize_value(other, options),
    }
}

/// Quantizes one JSON value.
///
/// Mappings recurse through [`quantize_statement`]. An array containing at
/// least one mapping or array is quantized element-wise (scalar elements
/// collapse individually); an all-scalar array collapses to a single
/// [`PLACEHOLDER`]. Scalars always collapse.
pub fn quantize_value(value: Value, options: &QuantizeOptions) -> Value {
    if options.show.is_all() {
        return value;
    }

    match value {
        Value::Object(_) => quantize_statement(value, options),
        Value::Array(items) => {
            if items.iter().any(|item| item.is_object() || item.is_array()) {
                Value::Array(
                    items
                        .into_iter()
                        .map(|item| quantize_value(item, options))
                        .collect(),
                )
            } else {
                Value::String(PLACEHOLDER.to_string())
            }
        }
        _ => Value::String(PLACEHOLDER.to_string()),
    }
}
