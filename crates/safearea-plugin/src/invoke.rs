// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge invocations.
//
// An invocation is one call from the web view to a named command. It owns
// its reply callback and is consumed by `resolve` or `reject`, so it can
// only ever be answered once.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use safearea_core::{Result, SafeAreaError};

/// The answer sent back across the bridge.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum InvokeResponse {
    Resolved {
        #[serde(skip_serializing_if = "Option::is_none")]
        payload: Option<Value>,
    },
    Rejected {
        code: String,
        message: String,
    },
}

/// One pending call from the web view.
pub struct Invocation {
    args: Value,
    reply: Box<dyn FnOnce(InvokeResponse)>,
}

impl std::fmt::Debug for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Invocation").field("args", &self.args).finish()
    }
}

impl Invocation {
    pub fn new(args: Value, reply: impl FnOnce(InvokeResponse) + 'static) -> Self {
        Self {
            args,
            reply: Box::new(reply),
        }
    }

    /// An invocation whose response is captured in the returned slot.
    pub fn pending(args: Value) -> (Self, ResponseSlot) {
        let slot = ResponseSlot::default();
        let sink = slot.clone();
        let invocation = Self::new(args, move |response| {
            *sink.0.borrow_mut() = Some(response);
        });
        (invocation, slot)
    }

    /// Decode the raw arguments into `T`. A call with no arguments at all
    /// decodes as an empty object.
    pub fn parse_args<T: DeserializeOwned>(&self) -> Result<T> {
        let args = match &self.args {
            Value::Null => Value::Object(Map::new()),
            other => other.clone(),
        };
        serde_json::from_value(args).map_err(|e| SafeAreaError::Decode(e.to_string()))
    }

    pub fn resolve(self) {
        (self.reply)(InvokeResponse::Resolved { payload: None });
    }

    pub fn reject(self, error: &SafeAreaError) {
        (self.reply)(InvokeResponse::Rejected {
            code: error.code().to_string(),
            message: error.to_string(),
        });
    }
}

/// Shared cell that receives an invocation's response.
#[derive(Debug, Clone, Default)]
pub struct ResponseSlot(Rc<RefCell<Option<InvokeResponse>>>);

impl ResponseSlot {
    pub fn take(&self) -> Option<InvokeResponse> {
        self.0.borrow_mut().take()
    }
}
