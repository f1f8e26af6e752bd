use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;
use tracing::debug;

use salonbook_core::service::SchedulingService;

use crate::tools::{
    BookAppointmentTool, CancelAppointmentTool, CheckAvailabilityTool, EditAppointmentTool,
    SendMessageToManagerTool, ToolRegistry,
};

/// The receptionist's tool surface: all five scheduling tools wired to one
/// shared service.
pub struct ReceptionistRuntime {
    registry: ToolRegistry,
    service: Arc<SchedulingService>,
}

impl ReceptionistRuntime {
    pub fn new(service: Arc<SchedulingService>) -> Self {
        let mut registry = ToolRegistry::default();
        registry.register(CheckAvailabilityTool::new(Arc::clone(&service)));
        registry.register(BookAppointmentTool::new(Arc::clone(&service)));
        registry.register(CancelAppointmentTool::new(Arc::clone(&service)));
        registry.register(EditAppointmentTool::new(Arc::clone(&service)));
        registry.register(SendMessageToManagerTool::new(Arc::clone(&service)));
        Self { registry, service }
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.registry.names()
    }

    pub fn service(&self) -> &Arc<SchedulingService> {
        &self.service
    }

    /// Executes one function call from the conversational layer.
    pub async fn handle_tool_call(&self, name: &str, args: Value) -> Result<Value> {
        debug!(tool = name, "tool call received");
        self.registry.dispatch(name, args).await
    }
}
