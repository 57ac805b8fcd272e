//! Shared helpers for integration tests.

use std::sync::Arc;

use deskdriver::backend::scripted::ScriptedAutomation;
use deskdriver::service::{ExcelService, MailService, SlidesService, WordService};
use deskdriver::AutomationConfig;
use serde_json::{Map, Value};

/// A scripted backend plus a word service sharing its state.
pub fn word_service() -> (ScriptedAutomation, WordService) {
    let backend = ScriptedAutomation::new();
    let service = WordService::new(Arc::new(backend.clone()), &AutomationConfig::default())
        .expect("word service composes");
    (backend, service)
}

/// A scripted backend plus an excel service sharing its state.
pub fn excel_service() -> (ScriptedAutomation, ExcelService) {
    let backend = ScriptedAutomation::new();
    let service = ExcelService::new(Arc::new(backend.clone()), &AutomationConfig::default())
        .expect("excel service composes");
    (backend, service)
}

/// A scripted backend plus a slides service sharing its state.
pub fn slides_service() -> (ScriptedAutomation, SlidesService) {
    let backend = ScriptedAutomation::new();
    let service = SlidesService::new(Arc::new(backend.clone()), &AutomationConfig::default())
        .expect("slides service composes");
    (backend, service)
}

/// A scripted backend plus a mail service sharing its state.
pub fn mail_service() -> (ScriptedAutomation, MailService) {
    let backend = ScriptedAutomation::new();
    let service = MailService::new(Arc::new(backend.clone()), &AutomationConfig::default())
        .expect("mail service composes");
    (backend, service)
}

/// Build a flat argument map from a JSON object literal.
pub fn args(value: Value) -> Map<String, Value> {
    value.as_object().expect("object literal").clone()
}

/// Foreign calls recorded after session setup (alert suppression and
/// visibility), i.e. the calls operations themselves made.
pub fn operation_calls(backend: &ScriptedAutomation) -> Vec<String> {
    backend
        .calls()
        .into_iter()
        .filter(|call| call != "SuppressAlerts" && call != "SetVisible")
        .collect()
}
