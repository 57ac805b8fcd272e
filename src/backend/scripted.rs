//! Deterministic in-memory automation backend.
//!
//! [`ScriptedAutomation`] stands in for the platform binding in tests and
//! in the CLI self-check: it records every foreign call, supports
//! per-method failure injection, and keeps a small item/folder store so
//! lookup and search operations behave realistically without a real
//! application process.
//!
//! The backend is cheaply cloneable; clones share state, so a test can
//! keep one clone for assertions after handing another to a service.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::{json, Value};

use super::{Application, Automation, Document, Fault, FaultResult};

/// Lock a mutex, recovering the inner value if a panicking test poisoned it.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Shared state behind every clone of a [`ScriptedAutomation`].
#[derive(Default)]
struct ScriptedState {
    calls: Mutex<Vec<String>>,
    fail_on: Mutex<HashSet<String>>,
    fail_launch: AtomicBool,
    fail_release: AtomicBool,
    launches: AtomicUsize,
    releases: AtomicUsize,
    items: Mutex<HashMap<String, Value>>,
    folders: Mutex<Vec<String>>,
    doc_counter: AtomicUsize,
}

impl ScriptedState {
    /// Record a foreign call and fault if failure injection targets it.
    fn check(&self, method: &str) -> FaultResult<()> {
        lock(&self.calls).push(method.to_owned());
        if lock(&self.fail_on).contains(method) {
            return Err(Fault::new(method, "scripted fault"));
        }
        Ok(())
    }
}

/// In-memory [`Automation`] implementation with call recording and
/// failure injection.
#[derive(Clone, Default)]
pub struct ScriptedAutomation {
    state: Arc<ScriptedState>,
}

impl ScriptedAutomation {
    /// Create a backend with an empty call log and default folders.
    #[must_use]
    pub fn new() -> Self {
        let backend = Self::default();
        *lock(&backend.state.folders) = vec!["Inbox".to_owned(), "Sent".to_owned()];
        backend
    }

    /// Make every subsequent call to `method` fault.
    pub fn fail_on(&self, method: &str) {
        lock(&self.state.fail_on).insert(method.to_owned());
    }

    /// Make application acquisition fault.
    pub fn set_fail_launch(&self, fail: bool) {
        self.state.fail_launch.store(fail, Ordering::SeqCst);
    }

    /// Make subsystem release fault.
    pub fn set_fail_release(&self, fail: bool) {
        self.state.fail_release.store(fail, Ordering::SeqCst);
    }

    /// Seed an item retrievable through `GetItemById` and `FindItems`.
    pub fn insert_item(&self, id: &str, value: Value) {
        lock(&self.state.items).insert(id.to_owned(), value);
    }

    /// All foreign calls recorded so far, in order. Launch and release
    /// are counted separately and do not appear here.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        lock(&self.state.calls).clone()
    }

    /// Number of recorded calls to `method`.
    #[must_use]
    pub fn call_count(&self, method: &str) -> usize {
        lock(&self.state.calls).iter().filter(|c| *c == method).count()
    }

    /// Number of successful or failed acquisition attempts.
    #[must_use]
    pub fn launch_count(&self) -> usize {
        self.state.launches.load(Ordering::SeqCst)
    }

    /// Number of subsystem release attempts.
    #[must_use]
    pub fn release_count(&self) -> usize {
        self.state.releases.load(Ordering::SeqCst)
    }
}

impl Automation for ScriptedAutomation {
    fn launch(&self, prog_id: &str) -> FaultResult<Box<dyn Application>> {
        self.state.launches.fetch_add(1, Ordering::SeqCst);
        if self.state.fail_launch.load(Ordering::SeqCst) {
            return Err(Fault::new("Launch", format!("cannot acquire '{prog_id}'")));
        }
        Ok(Box::new(ScriptedApplication {
            state: Arc::clone(&self.state),
        }))
    }

    fn release(&self) -> FaultResult<()> {
        self.state.releases.fetch_add(1, Ordering::SeqCst);
        if self.state.fail_release.load(Ordering::SeqCst) {
            return Err(Fault::new("Release", "scripted fault"));
        }
        Ok(())
    }
}

/// Scripted foreign application handle.
struct ScriptedApplication {
    state: Arc<ScriptedState>,
}

impl Application for ScriptedApplication {
    fn suppress_alerts(&self, _suppress: bool) -> FaultResult<()> {
        self.state.check("SuppressAlerts")
    }

    fn set_visible(&self, _visible: bool) -> FaultResult<()> {
        self.state.check("SetVisible")
    }

    fn create_document(&self) -> FaultResult<Box<dyn Document>> {
        self.state.check("CreateDocument")?;
        let n = self.state.doc_counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(Box::new(ScriptedDocument::new(
            Arc::clone(&self.state),
            format!("Document{n}"),
        )))
    }

    fn open_document(&self, path: &str) -> FaultResult<Box<dyn Document>> {
        self.state.check("OpenDocument")?;
        let name = path.rsplit(['/', '\\']).next().unwrap_or(path).to_owned();
        Ok(Box::new(ScriptedDocument::new(Arc::clone(&self.state), name)))
    }

    fn get(&self, property: &str) -> FaultResult<Value> {
        self.state.check(property)?;
        match property {
            "Version" => Ok(json!("16.0")),
            "Name" => Ok(json!("ScriptedApplication")),
            _ => Ok(Value::Null),
        }
    }

    fn invoke(&self, method: &str, args: &[Value]) -> FaultResult<Value> {
        self.state.check(method)?;
        match method {
            "GetItemById" => {
                let id = args.first().and_then(Value::as_str).unwrap_or_default();
                Ok(lock(&self.state.items).get(id).cloned().unwrap_or(Value::Null))
            }
            "FindItems" => {
                let query = args.first().and_then(Value::as_str).unwrap_or_default();
                let items = lock(&self.state.items);
                let hits: Vec<Value> = items
                    .iter()
                    .filter(|(_, v)| v.to_string().contains(query))
                    .map(|(id, _)| json!(id))
                    .collect();
                Ok(Value::Array(hits))
            }
            "ListFolders" => {
                let folders = lock(&self.state.folders);
                Ok(Value::Array(folders.iter().map(|f| json!(f)).collect()))
            }
            "AddFolder" => {
                let name = args.first().and_then(Value::as_str).unwrap_or_default();
                lock(&self.state.folders).push(name.to_owned());
                Ok(json!(name))
            }
            "CreateAppointment" => {
                let n = self.state.doc_counter.fetch_add(1, Ordering::SeqCst) + 1;
                Ok(json!(format!("appointment-{n}")))
            }
            "ListEvents" => Ok(Value::Array(Vec::new())),
            _ => Ok(Value::Null),
        }
    }

    fn quit(&self) -> FaultResult<()> {
        self.state.check("Quit")
    }
}

/// Scripted foreign document handle with enough behavior for the text,
/// sheet, and slide capability groups.
struct ScriptedDocument {
    state: Arc<ScriptedState>,
    name: String,
    props: Mutex<HashMap<String, Value>>,
    text: Mutex<String>,
    cells: Mutex<HashMap<String, Value>>,
    slides: Mutex<Vec<String>>,
}

impl ScriptedDocument {
    fn new(state: Arc<ScriptedState>, name: String) -> Self {
        Self {
            state,
            name,
            props: Mutex::new(HashMap::new()),
            text: Mutex::new(String::new()),
            cells: Mutex::new(HashMap::new()),
            slides: Mutex::new(Vec::new()),
        }
    }
}

impl Document for ScriptedDocument {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn get(&self, property: &str) -> FaultResult<Value> {
        self.state.check(property)?;
        if property == "WordCount" {
            let words = lock(&self.text).split_whitespace().count();
            return Ok(json!(words));
        }
        Ok(lock(&self.props).get(property).cloned().unwrap_or(Value::Null))
    }

    fn set(&self, property: &str, value: Value) -> FaultResult<()> {
        self.state.check(property)?;
        lock(&self.props).insert(property.to_owned(), value);
        Ok(())
    }

    fn invoke(&self, method: &str, args: &[Value]) -> FaultResult<Value> {
        self.state.check(method)?;
        match method {
            "InsertText" => {
                let text = args.first().and_then(Value::as_str).unwrap_or_default();
                lock(&self.text).push_str(text);
                Ok(Value::Null)
            }
            "ReplaceText" => {
                let find = args.first().and_then(Value::as_str).unwrap_or_default();
                let replace = args.get(1).and_then(Value::as_str).unwrap_or_default();
                let mut text = lock(&self.text);
                let count = text.matches(find).count();
                *text = text.replace(find, replace);
                Ok(json!(count))
            }
            "SetCell" => {
                let sheet = args.first().and_then(Value::as_str).unwrap_or_default();
                let cell = args.get(1).and_then(Value::as_str).unwrap_or_default();
                let value = args.get(2).cloned().unwrap_or(Value::Null);
                lock(&self.cells).insert(format!("{sheet}!{cell}"), value);
                Ok(Value::Null)
            }
            "GetCell" => {
                let sheet = args.first().and_then(Value::as_str).unwrap_or_default();
                let cell = args.get(1).and_then(Value::as_str).unwrap_or_default();
                Ok(lock(&self.cells)
                    .get(&format!("{sheet}!{cell}"))
                    .cloned()
                    .unwrap_or(Value::Null))
            }
            "AddSheet" => {
                let name = args.first().and_then(Value::as_str).unwrap_or_default();
                Ok(json!(name))
            }
            "AddSlide" => {
                let title = args.first().and_then(Value::as_str).unwrap_or_default();
                let mut slides = lock(&self.slides);
                slides.push(title.to_owned());
                Ok(json!(slides.len()))
            }
            "SetSlideTitle" => {
                let index = args
                    .first()
                    .and_then(Value::as_u64)
                    .and_then(|n| usize::try_from(n).ok())
                    .unwrap_or(0);
                let title = args.get(1).and_then(Value::as_str).unwrap_or_default();
                let mut slides = lock(&self.slides);
                if index == 0 || index > slides.len() {
                    return Err(Fault::new("SetSlideTitle", format!("no slide {index}")));
                }
                slides[index - 1] = title.to_owned();
                Ok(Value::Null)
            }
            "GetSlideCount" => Ok(json!(lock(&self.slides).len())),
            _ => Ok(Value::Null),
        }
    }

    fn save(&self) -> FaultResult<()> {
        self.state.check("Save")
    }

    fn save_as(&self, path: &str) -> FaultResult<()> {
        self.state.check("SaveAs")?;
        lock(&self.props).insert("FullName".to_owned(), json!(path));
        Ok(())
    }

    fn close(&self, _save: bool) -> FaultResult<()> {
        self.state.check("Close")
    }
}
