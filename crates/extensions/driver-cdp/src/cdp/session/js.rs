//! JavaScript execution operations for CDP page session.

use serde_json::{Value, json};

use crate::cdp::error::CdpError;
use crate::cdp::protocol::{PropertyDescriptor, RemoteObject};

use super::core::PageSession;

/// Error carried by a `Runtime` result, if the script threw.
pub(super) fn exception_error(result: &Value) -> Option<CdpError> {
    let exception = result.get("exceptionDetails")?;
    let text = exception["exception"]["description"]
        .as_str()
        .or_else(|| exception["text"].as_str())
        .unwrap_or("Unknown error");
    Some(CdpError::JavaScript(text.to_string()))
}

impl PageSession {
    /// Evaluate an expression and return its value.
    pub async fn evaluate(&self, expression: &str) -> Result<Value, CdpError> {
        let result = self
            .call(
                "Runtime.evaluate",
                Some(json!({
                    "expression": expression,
                    "returnByValue": true,
                    "awaitPromise": true,
                })),
            )
            .await?;

        if let Some(e) = exception_error(&result) {
            return Err(e);
        }

        Ok(result["result"]["value"].clone())
    }

    /// Evaluate an expression and return a handle to the result.
    pub async fn evaluate_handle(&self, expression: &str) -> Result<RemoteObject, CdpError> {
        let result = self
            .call(
                "Runtime.evaluate",
                Some(json!({
                    "expression": expression,
                    "returnByValue": false,
                })),
            )
            .await?;

        if let Some(e) = exception_error(&result) {
            return Err(e);
        }

        let remote_obj: RemoteObject = serde_json::from_value(result["result"].clone())?;
        Ok(remote_obj)
    }

    /// Call a function with `this` bound to a remote object.
    pub async fn call_function_on(
        &self,
        object_id: &str,
        function: &str,
        args: Option<Vec<Value>>,
    ) -> Result<Value, CdpError> {
        let mut params = json!({
            "objectId": object_id,
            "functionDeclaration": function,
            "returnByValue": true,
            "awaitPromise": true,
        });

        if let Some(a) = args {
            params["arguments"] = json!(a.into_iter().map(|v| json!({"value": v})).collect::<Vec<_>>());
        }

        let result = self.call("Runtime.callFunctionOn", Some(params)).await?;

        if let Some(e) = exception_error(&result) {
            return Err(e);
        }

        Ok(result["result"]["value"].clone())
    }

    /// Handles to the indexed entries of a remote array.
    pub async fn array_items(&self, object_id: &str) -> Result<Vec<RemoteObject>, CdpError> {
        let result = self
            .call(
                "Runtime.getProperties",
                Some(json!({
                    "objectId": object_id,
                    "ownProperties": true,
                })),
            )
            .await?;

        let properties: Vec<PropertyDescriptor> = serde_json::from_value(result["result"].clone())?;
        let mut items: Vec<(usize, RemoteObject)> = properties
            .into_iter()
            .filter_map(|p| Some((p.name.parse::<usize>().ok()?, p.value?)))
            .collect();
        items.sort_by_key(|(index, _)| *index);
        Ok(items.into_iter().map(|(_, obj)| obj).collect())
    }

    /// Release a remote object. Failures are ignored.
    pub async fn release_object(&self, object_id: &str) {
        let _ = self
            .call("Runtime.releaseObject", Some(json!({"objectId": object_id})))
            .await;
    }
}
