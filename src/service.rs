//! Child service invocation.

use crate::config;
use std::collections::HashMap;
use std::ffi::OsString;

/// What to launch and with which environment.
///
/// The environment is an explicit key-value map handed to the spawn call; the
/// supervisor never mutates its own ambient environment on the child's
/// behalf.
#[derive(Debug, Clone)]
pub struct ServiceSpec {
    pub program: String,
    pub args: Vec<OsString>,
    pub env: HashMap<String, String>,
}

impl ServiceSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: HashMap::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// The fixed production invocation of the order service: uvicorn bound to
    /// 0.0.0.0:5000, serving mutual TLS with the image's certificate
    /// material. Only the injected host address varies between containers.
    pub fn order_service(host_ip: &str) -> Self {
        Self::new(config::SERVER_BIN)
            .arg(config::SERVER_APP)
            .arg("--host")
            .arg(config::BIND_HOST)
            .arg("--port")
            .arg(config::BIND_PORT.to_string())
            .arg("--ssl-keyfile")
            .arg(config::TLS_KEY_FILE)
            .arg("--ssl-certfile")
            .arg(config::TLS_CERT_FILE)
            .arg("--ssl-ca-certs")
            .arg(config::TLS_CA_FILE)
            .arg("--ssl-cert-reqs")
            .arg(config::TLS_CERT_REQS_REQUIRED)
            .env(config::HOST_IP_ENV, host_ip)
    }
}
