/*
[INPUT]:  Host ids
[OUTPUT]: Hosts, services, credentials and local network interfaces
[POS]:    HTTP layer - discovery database and reference data endpoints
[UPDATE]: When adding new database endpoints or changing response format
*/

use crate::http::{InterceptorClient, Result};
use crate::types::{
    Credential, CredentialListResponse, Host, HostListResponse, HostResponse, Interface,
    InterfaceListResponse, Service, ServiceListResponse,
};
use reqwest::Method;

impl InterceptorClient {
    /// List discovered hosts
    ///
    /// GET /hosts
    pub async fn list_hosts(&self) -> Result<Vec<Host>> {
        let builder = self.request(Method::GET, &["hosts"])?;
        let response: HostListResponse = self.send_json(builder).await?;
        Ok(response.hosts)
    }

    /// Fetch a single host
    ///
    /// GET /hosts/{id}
    pub async fn get_host(&self, id: &str) -> Result<Host> {
        let builder = self.request(Method::GET, &["hosts", id])?;
        let response: HostResponse = self.send_json(builder).await?;
        Ok(response.host)
    }

    /// List network interfaces available to modules
    ///
    /// GET /interfaces
    pub async fn list_interfaces(&self) -> Result<Vec<Interface>> {
        let builder = self.request(Method::GET, &["interfaces"])?;
        let response: InterfaceListResponse = self.send_json(builder).await?;
        Ok(response.interfaces)
    }

    /// List discovered services
    ///
    /// GET /services
    pub async fn list_services(&self) -> Result<Vec<Service>> {
        let builder = self.request(Method::GET, &["services"])?;
        let response: ServiceListResponse = self.send_json(builder).await?;
        Ok(response.services)
    }

    /// List captured credentials
    ///
    /// GET /credentials
    pub async fn list_credentials(&self) -> Result<Vec<Credential>> {
        let builder = self.request(Method::GET, &["credentials"])?;
        let response: CredentialListResponse = self.send_json(builder).await?;
        Ok(response.credentials)
    }

    /// Drop every host, service and credential
    ///
    /// POST /db-reset
    pub async fn reset_database(&self) -> Result<()> {
        let builder = self.request(Method::POST, &["db-reset"])?;
        self.send_empty(builder).await
    }
}

#[cfg(test)]
mod tests {
    use crate::http::InterceptorClient;
    use crate::types::{Credential, Host, Interface, Service};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_list_hosts() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("GET"))
            .and(path("/hosts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "hosts": [
                    {"id": 1, "ipv4": "10.0.0.1", "ipv6": null, "mac": "aa:bb:cc:dd:ee:01"},
                    {"id": 2, "ipv4": null, "ipv6": null, "mac": null}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = InterceptorClient::new(&server.uri()).expect("client init");
        let hosts = client.list_hosts().await.expect("list_hosts failed");

        assert_eq!(
            hosts,
            vec![
                Host {
                    id: "1".to_string(),
                    ipv4: Some("10.0.0.1".to_string()),
                    ipv6: None,
                    mac: Some("aa:bb:cc:dd:ee:01".to_string()),
                },
                Host {
                    id: "2".to_string(),
                    ipv4: None,
                    ipv6: None,
                    mac: None,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_get_host() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("GET"))
            .and(path("/hosts/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "host": {"id": "7", "ipv4": null, "ipv6": "fe80::7", "mac": null}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = InterceptorClient::new(&server.uri()).expect("client init");
        let host = client.get_host("7").await.expect("get_host failed");

        assert_eq!(host.id, "7");
        assert_eq!(host.display_address(), Some("fe80::7"));
    }

    #[tokio::test]
    async fn test_list_interfaces() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("GET"))
            .and(path("/interfaces"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "interfaces": [
                    {"name": "eth0", "ipv4": "192.168.1.10", "mac": "aa:bb:cc:dd:ee:ff"},
                    {"name": "lo", "ipv4": "127.0.0.1", "mac": "00:00:00:00:00:00"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = InterceptorClient::new(&server.uri()).expect("client init");
        let interfaces = client.list_interfaces().await.expect("list_interfaces failed");

        assert_eq!(interfaces.len(), 2);
        assert_eq!(
            interfaces[0],
            Interface {
                name: "eth0".to_string(),
                ipv4: Some("192.168.1.10".to_string()),
                mac: Some("aa:bb:cc:dd:ee:ff".to_string()),
            }
        );
        assert_eq!(interfaces[0].label(), "eth0 (192.168.1.10, aa:bb:cc:dd:ee:ff)");
    }

    #[tokio::test]
    async fn test_list_services_and_credentials() {
        let server = MockServer::start().await;
        let _services = Mock::given(method("GET"))
            .and(path("/services"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "services": [
                    {"id": 4, "host_id": 1, "transport_protocol": "tcp", "port": 22, "service": "ssh"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;
        let _credentials = Mock::given(method("GET"))
            .and(path("/credentials"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "credentials": [
                    {"id": 9, "service_id": 4, "login_name": "root", "credential": "toor"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = InterceptorClient::new(&server.uri()).expect("client init");
        let services = client.list_services().await.expect("list_services failed");
        let credentials = client
            .list_credentials()
            .await
            .expect("list_credentials failed");

        assert_eq!(
            services,
            vec![Service {
                id: "4".to_string(),
                host_id: "1".to_string(),
                transport_protocol: Some("tcp".to_string()),
                port: Some(22),
                service: Some("ssh".to_string()),
            }]
        );
        assert_eq!(
            credentials,
            vec![Credential {
                id: "9".to_string(),
                service_id: "4".to_string(),
                login_name: Some("root".to_string()),
                credential: Some("toor".to_string()),
            }]
        );
    }

    #[tokio::test]
    async fn test_reset_database() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("POST"))
            .and(path("/db-reset"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Database cleared"))
            .expect(1)
            .mount(&server)
            .await;

        let client = InterceptorClient::new(&server.uri()).expect("client init");
        client.reset_database().await.expect("reset_database failed");
    }
}
