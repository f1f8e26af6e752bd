//! Function-call tools exposed to the conversational layer.
//!
//! Each salon request kind is one [`Tool`]: the model-facing dispatcher hands
//! over a JSON payload, the tool deserializes it into the typed request and
//! delegates to the shared [`SchedulingService`].

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde_json::Value;

use salonbook_core::service::{
    BookAppointmentRequest, CancelAppointmentRequest, CheckAvailabilityRequest,
    EditAppointmentRequest, EscalationRequest, SchedulingService,
};

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    async fn execute(&self, input: Value) -> Result<Value>;
}

#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn register<T>(&mut self, tool: T)
    where
        T: Tool + 'static,
    {
        self.tools.insert(tool.name().to_string(), Box::new(tool));
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub async fn dispatch(&self, name: &str, input: Value) -> Result<Value> {
        let Some(tool) = self.tools.get(name) else {
            bail!("unknown tool `{name}`");
        };
        tool.execute(input).await
    }
}

pub struct CheckAvailabilityTool {
    service: Arc<SchedulingService>,
}

impl CheckAvailabilityTool {
    pub fn new(service: Arc<SchedulingService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for CheckAvailabilityTool {
    fn name(&self) -> &'static str {
        "check_availability"
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let request: CheckAvailabilityRequest =
            serde_json::from_value(input).context("check_availability arguments")?;
        Ok(serde_json::to_value(self.service.check_availability(request))?)
    }
}

pub struct BookAppointmentTool {
    service: Arc<SchedulingService>,
}

impl BookAppointmentTool {
    pub fn new(service: Arc<SchedulingService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for BookAppointmentTool {
    fn name(&self) -> &'static str {
        "book_appointment"
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let request: BookAppointmentRequest =
            serde_json::from_value(input).context("book_appointment arguments")?;
        Ok(serde_json::to_value(self.service.book_appointment(request))?)
    }
}

pub struct CancelAppointmentTool {
    service: Arc<SchedulingService>,
}

impl CancelAppointmentTool {
    pub fn new(service: Arc<SchedulingService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for CancelAppointmentTool {
    fn name(&self) -> &'static str {
        "cancel_appointment"
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let request: CancelAppointmentRequest =
            serde_json::from_value(input).context("cancel_appointment arguments")?;
        Ok(serde_json::to_value(self.service.cancel_appointment(request))?)
    }
}

pub struct EditAppointmentTool {
    service: Arc<SchedulingService>,
}

impl EditAppointmentTool {
    pub fn new(service: Arc<SchedulingService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for EditAppointmentTool {
    fn name(&self) -> &'static str {
        "edit_appointment"
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let request: EditAppointmentRequest =
            serde_json::from_value(input).context("edit_appointment arguments")?;
        Ok(serde_json::to_value(self.service.edit_appointment(request))?)
    }
}

pub struct SendMessageToManagerTool {
    service: Arc<SchedulingService>,
}

impl SendMessageToManagerTool {
    pub fn new(service: Arc<SchedulingService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for SendMessageToManagerTool {
    fn name(&self) -> &'static str {
        "send_message_to_manager"
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let request: EscalationRequest =
            serde_json::from_value(input).context("send_message_to_manager arguments")?;
        Ok(serde_json::to_value(self.service.send_message_to_manager(request))?)
    }
}
