/*
[INPUT]:  Resource operations of the interceptor API
[OUTPUT]: ResourceApi trait implemented by InterceptorClient
[POS]:    Abstraction layer - lets callers swap the HTTP client for stubs
[UPDATE]: When adding endpoints that console code consumes
*/

use async_trait::async_trait;

use crate::http::{InterceptorClient, Result};
use crate::types::{
    Credential, Host, Interface, Module, ModuleSummary, Service, TaskStatus, TaskSummary,
};

/// Request/response operations the console performs against the service
///
/// Every method is stateless; implementors must be shareable across tasks.
#[async_trait]
pub trait ResourceApi: Send + Sync {
    async fn list_modules(&self) -> Result<Vec<ModuleSummary>>;

    async fn get_module(&self, name: &str) -> Result<Module>;

    /// Start a module and return the name of the created task
    async fn start_module(&self, name: &str, args: &[(String, String)]) -> Result<String>;

    async fn list_tasks(&self) -> Result<Vec<TaskSummary>>;

    async fn get_task(&self, name: &str) -> Result<TaskStatus>;

    async fn stop_task(&self, name: &str) -> Result<()>;

    async fn list_hosts(&self) -> Result<Vec<Host>>;

    async fn get_host(&self, id: &str) -> Result<Host>;

    async fn list_interfaces(&self) -> Result<Vec<Interface>>;

    async fn list_services(&self) -> Result<Vec<Service>>;

    async fn list_credentials(&self) -> Result<Vec<Credential>>;

    async fn reset_database(&self) -> Result<()>;
}

#[async_trait]
impl ResourceApi for InterceptorClient {
    async fn list_modules(&self) -> Result<Vec<ModuleSummary>> {
        InterceptorClient::list_modules(self).await
    }

    async fn get_module(&self, name: &str) -> Result<Module> {
        InterceptorClient::get_module(self, name).await
    }

    async fn start_module(&self, name: &str, args: &[(String, String)]) -> Result<String> {
        InterceptorClient::start_module(self, name, args).await
    }

    async fn list_tasks(&self) -> Result<Vec<TaskSummary>> {
        InterceptorClient::list_tasks(self).await
    }

    async fn get_task(&self, name: &str) -> Result<TaskStatus> {
        InterceptorClient::get_task(self, name).await
    }

    async fn stop_task(&self, name: &str) -> Result<()> {
        InterceptorClient::stop_task(self, name).await
    }

    async fn list_hosts(&self) -> Result<Vec<Host>> {
        InterceptorClient::list_hosts(self).await
    }

    async fn get_host(&self, id: &str) -> Result<Host> {
        InterceptorClient::get_host(self, id).await
    }

    async fn list_interfaces(&self) -> Result<Vec<Interface>> {
        InterceptorClient::list_interfaces(self).await
    }

    async fn list_services(&self) -> Result<Vec<Service>> {
        InterceptorClient::list_services(self).await
    }

    async fn list_credentials(&self) -> Result<Vec<Credential>> {
        InterceptorClient::list_credentials(self).await
    }

    async fn reset_database(&self) -> Result<()> {
        InterceptorClient::reset_database(self).await
    }
}
