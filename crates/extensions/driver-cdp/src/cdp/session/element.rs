//! Element-level operations on remote element handles.

use ariaref_snapshot::dom::Rect;
use serde_json::{Value, json};
use tracing::debug;

use crate::cdp::error::CdpError;
use crate::cdp::protocol::RemoteObject;
use crate::scripts;

use super::core::PageSession;

/// Handle to a live element, valid until the page navigates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementHandle {
    object_id: String,
}

impl ElementHandle {
    pub fn new(object_id: impl Into<String>) -> Self {
        Self {
            object_id: object_id.into(),
        }
    }

    pub fn object_id(&self) -> &str {
        &self.object_id
    }
}

impl TryFrom<RemoteObject> for ElementHandle {
    type Error = CdpError;

    fn try_from(obj: RemoteObject) -> Result<Self, Self::Error> {
        if !obj.is_node() {
            return Err(CdpError::InvalidResponse(format!(
                "expected an element, got {}",
                obj.description.as_deref().unwrap_or(&obj.object_type)
            )));
        }
        obj.object_id
            .map(ElementHandle::new)
            .ok_or_else(|| CdpError::InvalidResponse("element without objectId".to_string()))
    }
}

/// Parse the result of the rect script. `None` for a box without area.
pub(super) fn parse_rect(value: Value) -> Result<Option<Rect>, CdpError> {
    if value.is_null() {
        return Ok(None);
    }
    let rect: Rect = serde_json::from_value(value)?;
    Ok(rect.has_area().then_some(rect))
}

impl PageSession {
    /// Evaluate `expression` to an array and return handles to its elements.
    pub async fn query_elements(&self, expression: &str) -> Result<Vec<ElementHandle>, CdpError> {
        let array = self.evaluate_handle(expression).await?;
        let Some(array_id) = array.object_id else {
            return Ok(Vec::new());
        };

        let items = self.array_items(&array_id).await;
        self.release_object(&array_id).await;

        items?.into_iter().map(ElementHandle::try_from).collect()
    }

    async fn call_on(
        &self,
        element: &ElementHandle,
        function: &str,
        args: Option<Vec<Value>>,
    ) -> Result<Value, CdpError> {
        self.call_function_on(&element.object_id, function, args)
            .await
    }

    /// Scroll the element into view and return the center of its box in
    /// top-level viewport coordinates.
    pub async fn element_center(&self, element: &ElementHandle) -> Result<(f64, f64), CdpError> {
        let value = self
            .call_on(element, scripts::ELEMENT_RECT_FUNCTION, None)
            .await?;
        let rect = parse_rect(value)?
            .ok_or_else(|| CdpError::ElementNotFound("element has no visible box".to_string()))?;
        Ok(rect.center())
    }

    pub async fn click_element(&self, element: &ElementHandle) -> Result<(), CdpError> {
        let (x, y) = self.element_center(element).await?;
        self.click_at(x, y).await
    }

    pub async fn hover_element(&self, element: &ElementHandle) -> Result<(), CdpError> {
        let (x, y) = self.element_center(element).await?;
        self.move_mouse(x, y).await
    }

    pub async fn focus_element(&self, element: &ElementHandle) -> Result<(), CdpError> {
        self.call_on(element, scripts::FOCUS_FUNCTION, None).await?;
        Ok(())
    }

    /// Replace the element's content with `value` by typing it.
    pub async fn fill_element(&self, element: &ElementHandle, value: &str) -> Result<(), CdpError> {
        self.call_on(element, scripts::PREPARE_FILL_FUNCTION, None)
            .await?;
        self.insert_text(value).await?;
        self.call_on(element, scripts::FINISH_FILL_FUNCTION, Some(vec![json!(value)]))
            .await?;
        Ok(())
    }

    pub async fn set_element_checked(
        &self,
        element: &ElementHandle,
        checked: bool,
    ) -> Result<(), CdpError> {
        let reached = self
            .call_on(element, scripts::SET_CHECKED_FUNCTION, Some(vec![json!(checked)]))
            .await?;
        if reached.as_bool() != Some(true) {
            return Err(CdpError::JavaScript(format!(
                "element did not become {}",
                if checked { "checked" } else { "unchecked" }
            )));
        }
        Ok(())
    }

    /// Select the option matching `value` by value, label or text.
    pub async fn select_element_option(
        &self,
        element: &ElementHandle,
        value: &str,
    ) -> Result<(), CdpError> {
        let found = self
            .call_on(element, scripts::SELECT_OPTION_FUNCTION, Some(vec![json!(value)]))
            .await?;
        if found.as_bool() != Some(true) {
            return Err(CdpError::ElementNotFound(format!("option {:?}", value)));
        }
        debug!("Selected option {:?}", value);
        Ok(())
    }

    pub async fn press_enter_on(&self, element: &ElementHandle) -> Result<(), CdpError> {
        self.focus_element(element).await?;
        self.press_key("Enter").await
    }
}
