// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A body statement is not syntactically valid JSON.
    ///
    /// Recovered locally by the statement loop, which substitutes the
    /// placeholder for the affected statement only.
    #[error("statement is not valid JSON: {0}")]
    MalformedInput(#[source] serde_json::Error),

    /// A quantized statement could not be serialized back to text.
    #[error("cannot reserialize quantized statement: {0}")]
    Reserialize(#[source] serde_json::Error),
}
