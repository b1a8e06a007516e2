use std::time::Duration;

pub const SERVER_BIN: &str = "uvicorn";
pub const SERVER_APP: &str = "main:app";

pub const BIND_HOST: &str = "0.0.0.0";
pub const BIND_PORT: u16 = 5000;

// TLS material is provisioned into the image by the deployment pipeline.
pub const TLS_KEY_FILE: &str = "/certs/order/order-key.pem";
pub const TLS_CERT_FILE: &str = "/certs/order/order-cert.pem";
pub const TLS_CA_FILE: &str = "/certs/ca.pem";
// Client certificates are mandatory; uvicorn takes the raw ssl module
// constant (ssl.CERT_REQUIRED == 2).
pub const TLS_CERT_REQS_REQUIRED: &str = "2";

pub const SERVICE_NAME_ENV: &str = "SERVICE_NAME";
pub const HOST_IP_ENV: &str = "IP";

pub const SHUTDOWN_GRACE_DEFAULT: Duration = Duration::from_secs(30);
