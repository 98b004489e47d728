// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use thiserror::Error;

/// Fault code used when the server could not be reached at all.
pub const TRANSPORT_FAULT: i64 = -1;
/// Fault code used when a response arrived but could not be decoded.
pub const DECODE_FAULT: i64 = -2;

/// Failure of a single remote call, as reported by the server or transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("remote call failed ({code}): {message}")]
pub struct RemoteCallError {
    pub code: i64,
    pub message: String,
}

impl RemoteCallError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(TRANSPORT_FAULT, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(DECODE_FAULT, message)
    }

    pub const fn is_transport(&self) -> bool {
        self.code == TRANSPORT_FAULT
    }
}
