/*
[INPUT]:  Module names and form-encoded argument values
[OUTPUT]: Module listings, module schemas, new task names
[POS]:    HTTP layer - module endpoints
[UPDATE]: When adding new module endpoints or changing response format
*/

use crate::http::{InterceptorClient, InterceptorError, Result};
use crate::types::{Module, ModuleListResponse, ModuleSummary};
use reqwest::Method;

impl InterceptorClient {
    /// List available modules
    ///
    /// GET /modules
    pub async fn list_modules(&self) -> Result<Vec<ModuleSummary>> {
        let builder = self.request(Method::GET, &["modules"])?;
        let response: ModuleListResponse = self.send_json(builder).await?;
        Ok(response.modules)
    }

    /// Fetch a module's description and argument schema
    ///
    /// GET /modules/{name}
    pub async fn get_module(&self, name: &str) -> Result<Module> {
        let builder = self.request(Method::GET, &["modules", name])?;
        self.send_json(builder).await
    }

    /// Start a module with form-encoded arguments, returning the new task name
    ///
    /// POST /modules/{name}/start
    pub async fn start_module(&self, name: &str, args: &[(String, String)]) -> Result<String> {
        let builder = self
            .request(Method::POST, &["modules", name, "start"])?
            .form(args);
        let task_name = self.send_text(builder).await?;
        let task_name = task_name.trim();
        if task_name.is_empty() {
            return Err(InterceptorError::InvalidResponse(
                "start response did not name a task".to_string(),
            ));
        }
        Ok(task_name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use crate::http::{InterceptorClient, InterceptorError};
    use crate::types::{ArgumentSpec, Module, ModuleSummary};
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_list_modules() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("GET"))
            .and(path("/modules"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "modules": [{"name": "discover.arp.scan"}, {"name": "sniff.dump"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = InterceptorClient::new(&server.uri()).expect("client init");
        let modules = client.list_modules().await.expect("list_modules failed");

        assert_eq!(
            modules,
            vec![
                ModuleSummary {
                    name: "discover.arp.scan".to_string()
                },
                ModuleSummary {
                    name: "sniff.dump".to_string()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_get_module() {
        let server = MockServer::start().await;
        let mock_response = r#"{
            "name": "discover.arp.scan",
            "description": "Sweep a subnet with ARP requests",
            "args": [
                {"name": "iface", "type": "Interface", "required": false, "default": "eth0"},
                {"name": "targets", "type": "list[str]", "required": true, "default": "None"},
                {"name": "store", "type": "bool", "required": false, "default": "True"}
            ]
        }"#;

        let _mock = Mock::given(method("GET"))
            .and(path("/modules/discover.arp.scan"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(mock_response, "application/json"))
            .expect(1)
            .mount(&server)
            .await;

        let client = InterceptorClient::new(&server.uri()).expect("client init");
        let module = client
            .get_module("discover.arp.scan")
            .await
            .expect("get_module failed");

        let expected = Module {
            name: "discover.arp.scan".to_string(),
            description: "Sweep a subnet with ARP requests".to_string(),
            args: vec![
                ArgumentSpec {
                    name: "iface".to_string(),
                    type_name: "Interface".to_string(),
                    default: "eth0".to_string(),
                    required: false,
                },
                ArgumentSpec {
                    name: "targets".to_string(),
                    type_name: "list[str]".to_string(),
                    default: "None".to_string(),
                    required: true,
                },
                ArgumentSpec {
                    name: "store".to_string(),
                    type_name: "bool".to_string(),
                    default: "True".to_string(),
                    required: false,
                },
            ],
        };
        assert_eq!(module, expected);
    }

    #[tokio::test]
    async fn test_start_module_posts_form_and_returns_task_name() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("POST"))
            .and(path("/modules/test/start"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string("verbose=true&targets=10.0.0.1%2C10.0.0.2"))
            .respond_with(ResponseTemplate::new(200).set_body_string("task-42\n"))
            .expect(1)
            .mount(&server)
            .await;

        let client = InterceptorClient::new(&server.uri()).expect("client init");
        let args = vec![
            ("verbose".to_string(), "true".to_string()),
            ("targets".to_string(), "10.0.0.1,10.0.0.2".to_string()),
        ];
        let task = client
            .start_module("test", &args)
            .await
            .expect("start_module failed");

        assert_eq!(task, "task-42");
    }

    #[tokio::test]
    async fn test_start_module_surfaces_api_error() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("POST"))
            .and(path("/modules/missing/start"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Module not found"))
            .mount(&server)
            .await;

        let client = InterceptorClient::new(&server.uri()).expect("client init");
        let err = client
            .start_module("missing", &[])
            .await
            .expect_err("start should fail");

        match err {
            InterceptorError::Api { code, message } => {
                assert_eq!(code, 404);
                assert_eq!(message, "Module not found");
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_start_module_rejects_empty_task_name() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("POST"))
            .and(path("/modules/test/start"))
            .respond_with(ResponseTemplate::new(200).set_body_string("  "))
            .mount(&server)
            .await;

        let client = InterceptorClient::new(&server.uri()).expect("client init");
        let err = client
            .start_module("test", &[])
            .await
            .expect_err("empty name should fail");
        assert!(matches!(err, InterceptorError::InvalidResponse(_)));
    }
}
