//! The response envelope shared by every pool service endpoint.
//!
//! ```json
//! {"code": "0", "msg": "success", "data": ...}
//! ```
//!
//! `code` arrives as a string from some deployments and as an integer from
//! others. Both spellings of zero mean success.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::SUCCESS_CODE;
use crate::error::PoolError;

/// Envelope status code, in whichever JSON type the service used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseCode {
    Int(i64),
    Text(String),
}

impl ResponseCode {
    pub fn is_success(&self) -> bool {
        match self {
            Self::Int(code) => *code == SUCCESS_CODE,
            Self::Text(code) => code.trim().parse::<i64>() == Ok(SUCCESS_CODE),
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(code) => write!(f, "{}", code),
            Self::Text(code) => write!(f, "{}", code),
        }
    }
}

/// A decoded `{code, msg, data}` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub code: ResponseCode,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub data: Value,
}

impl ResponseEnvelope {
    /// Success envelope carrying `data`.
    pub fn success(data: Value) -> Self {
        Self {
            code: ResponseCode::Int(SUCCESS_CODE),
            msg: "success".to_string(),
            data,
        }
    }

    /// Rejection envelope with the given code and message.
    pub fn rejection(code: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            code: ResponseCode::Text(code.into()),
            msg: msg.into(),
            data: Value::Null,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code.is_success()
    }

    /// Returns `data` on success. Any other code becomes
    /// [`PoolError::RemoteRejection`] with `code` and `msg` verbatim.
    pub fn into_data(self) -> Result<Value, PoolError> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(PoolError::RemoteRejection {
                code: self.code.to_string(),
                msg: self.msg,
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
