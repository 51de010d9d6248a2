/*
[INPUT]:  Scripted replies for every ResourceApi operation
[OUTPUT]: StubApi plus fixtures and wait helpers shared by console tests
[POS]:    Test infrastructure - shared across all console test modules
[UPDATE]: When ResourceApi gains operations or tests need new fixtures
*/

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use interceptor_adapter::{
    ArgumentSpec, Credential, Host, InterceptorError, Interface, Module, ModuleSummary,
    ResourceApi, Result, Service, TaskStatus, TaskSummary,
};
use interceptor_console::{SharedView, ViewState, lock_view};
use tokio::sync::Notify;

/// One scripted answer
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Ok(T),
    Fail(u16),
}

/// Answers in order; the last one repeats forever
#[derive(Debug)]
pub struct Scripted<T> {
    replies: Mutex<VecDeque<Reply<T>>>,
    calls: AtomicUsize,
}

impl<T: Clone> Scripted<T> {
    pub fn new(replies: Vec<Reply<T>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn always(value: T) -> Self {
        Self::new(vec![Reply::Ok(value)])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next(&self) -> Result<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut replies = self.replies.lock().unwrap();
        let reply = if replies.len() > 1 {
            replies.pop_front()
        } else {
            replies.front().cloned()
        };
        match reply {
            Some(Reply::Ok(value)) => Ok(value),
            Some(Reply::Fail(code)) => Err(InterceptorError::Api {
                code,
                message: "scripted failure".to_string(),
            }),
            None => Err(InterceptorError::Api {
                code: 404,
                message: "nothing scripted".to_string(),
            }),
        }
    }
}

/// In-memory ResourceApi driven by scripts
pub struct StubApi {
    pub modules: Scripted<Vec<ModuleSummary>>,
    pub tasks: Scripted<Vec<TaskSummary>>,
    pub hosts: Scripted<Vec<Host>>,
    pub interfaces: Scripted<Vec<Interface>>,
    pub services: Scripted<Vec<Service>>,
    pub credentials: Scripted<Vec<Credential>>,
    pub module_details: HashMap<String, Module>,
    pub task_status: HashMap<String, Scripted<TaskStatus>>,
    pub gates: HashMap<String, Arc<Notify>>,
    pub interface_gate: Option<Arc<Notify>>,
    pub started: Mutex<Vec<(String, Vec<(String, String)>)>>,
    pub stopped: Mutex<Vec<String>>,
    pub resets: AtomicUsize,
}

impl Default for StubApi {
    fn default() -> Self {
        Self {
            modules: Scripted::always(Vec::new()),
            tasks: Scripted::always(Vec::new()),
            hosts: Scripted::always(Vec::new()),
            interfaces: Scripted::always(Vec::new()),
            services: Scripted::always(Vec::new()),
            credentials: Scripted::always(Vec::new()),
            module_details: HashMap::new(),
            task_status: HashMap::new(),
            gates: HashMap::new(),
            interface_gate: None,
            started: Mutex::new(Vec::new()),
            stopped: Mutex::new(Vec::new()),
            resets: AtomicUsize::new(0),
        }
    }
}

impl StubApi {
    pub fn with_module(mut self, module: Module) -> Self {
        self.modules = Scripted::always(
            self.module_details
                .keys()
                .cloned()
                .chain(std::iter::once(module.name.clone()))
                .map(|name| ModuleSummary { name })
                .collect(),
        );
        self.module_details.insert(module.name.clone(), module);
        self
    }

    pub fn with_task(mut self, name: &str, replies: Vec<Reply<TaskStatus>>) -> Self {
        self.task_status.insert(name.to_string(), Scripted::new(replies));
        let mut names = self.task_status.keys().cloned().collect::<Vec<_>>();
        names.sort();
        self.tasks = Scripted::always(names.into_iter().map(|name| TaskSummary { name }).collect());
        self
    }

    /// `get_task(name)` waits for one notification on the returned gate
    pub fn gate_task(mut self, name: &str) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.gates.insert(name.to_string(), gate.clone());
        (self, gate)
    }

    /// `list_interfaces()` waits for one notification on the returned gate
    pub fn gate_interfaces(mut self) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.interface_gate = Some(gate.clone());
        (self, gate)
    }

    pub fn task_calls(&self, name: &str) -> usize {
        self.task_status.get(name).map(Scripted::calls).unwrap_or(0)
    }
}

#[async_trait]
impl ResourceApi for StubApi {
    async fn list_modules(&self) -> Result<Vec<ModuleSummary>> {
        self.modules.next()
    }

    async fn get_module(&self, name: &str) -> Result<Module> {
        self.module_details
            .get(name)
            .cloned()
            .ok_or_else(|| InterceptorError::Api {
                code: 404,
                message: format!("no module {name}"),
            })
    }

    async fn start_module(&self, name: &str, args: &[(String, String)]) -> Result<String> {
        let mut started = self.started.lock().unwrap();
        started.push((name.to_string(), args.to_vec()));
        Ok(format!("task-{}", started.len()))
    }

    async fn list_tasks(&self) -> Result<Vec<TaskSummary>> {
        self.tasks.next()
    }

    async fn get_task(&self, name: &str) -> Result<TaskStatus> {
        if let Some(gate) = self.gates.get(name) {
            gate.notified().await;
        }
        match self.task_status.get(name) {
            Some(script) => script.next(),
            None => Err(InterceptorError::Api {
                code: 404,
                message: format!("no task {name}"),
            }),
        }
    }

    async fn stop_task(&self, name: &str) -> Result<()> {
        self.stopped.lock().unwrap().push(name.to_string());
        Ok(())
    }

    async fn list_hosts(&self) -> Result<Vec<Host>> {
        self.hosts.next()
    }

    async fn get_host(&self, id: &str) -> Result<Host> {
        Ok(host(id))
    }

    async fn list_interfaces(&self) -> Result<Vec<Interface>> {
        if let Some(gate) = &self.interface_gate {
            gate.notified().await;
        }
        self.interfaces.next()
    }

    async fn list_services(&self) -> Result<Vec<Service>> {
        self.services.next()
    }

    async fn list_credentials(&self) -> Result<Vec<Credential>> {
        self.credentials.next()
    }

    async fn reset_database(&self) -> Result<()> {
        self.resets.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub fn host(id: &str) -> Host {
    Host {
        id: id.to_string(),
        ipv4: Some(format!("10.0.0.{id}")),
        ipv6: None,
        mac: None,
    }
}

pub fn interface(name: &str) -> Interface {
    Interface {
        name: name.to_string(),
        ipv4: None,
        mac: None,
    }
}

pub fn arg(name: &str, type_name: &str, default: &str) -> ArgumentSpec {
    ArgumentSpec {
        name: name.to_string(),
        type_name: type_name.to_string(),
        default: default.to_string(),
        required: false,
    }
}

pub fn module(name: &str, args: Vec<ArgumentSpec>) -> Module {
    Module {
        name: name.to_string(),
        description: format!("{name} module"),
        args,
    }
}

pub fn status(name: &str, running: bool, full_output: &str, new_output: &str) -> TaskStatus {
    TaskStatus {
        name: name.to_string(),
        running,
        full_output: full_output.to_string(),
        new_output: Some(new_output.to_string()),
    }
}

/// Let spawned chains run; under paused time this also advances the clock
pub async fn settle(duration: Duration) {
    tokio::time::sleep(duration).await;
}

/// Poll `condition` against the view with real sleeps until it holds or 5s pass
pub async fn wait_for(view: &SharedView, condition: impl Fn(&ViewState) -> bool) -> bool {
    for _ in 0..250 {
        if condition(&lock_view(view)) {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    false
}
