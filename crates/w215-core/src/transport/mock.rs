//! Scripted in-memory transport for unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::{
    error::Error,
    soap::HNAP_NAMESPACE,
    transport::{Headers, Transport},
};

/// One request as seen by the scripted transport.
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub path: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Action name taken from the `SOAPAction` header.
    pub fn action(&self) -> Option<&str> {
        self.header("SOAPAction")?
            .trim_matches('"')
            .strip_prefix(HNAP_NAMESPACE)
    }

    pub fn is_login_request(&self) -> bool {
        self.action() == Some("Login") && self.body.contains("<Action>request</Action>")
    }

    pub fn is_login_proof(&self) -> bool {
        self.action() == Some("Login") && self.body.contains("<Action>login</Action>")
    }
}

type Responder = dyn Fn(&RecordedRequest) -> Result<String, Error> + Send + Sync;

/// Transport answering every request through a closure and recording it.
#[derive(Clone)]
pub(crate) struct ScriptedTransport {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    responder: Arc<Responder>,
}

impl ScriptedTransport {
    pub fn new(
        responder: impl Fn(&RecordedRequest) -> Result<String, Error> + Send + Sync + 'static,
    ) -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            responder: Arc::new(responder),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, predicate: impl Fn(&RecordedRequest) -> bool) -> usize {
        self.requests().iter().filter(|r| predicate(r)).count()
    }

    pub fn clear(&self) {
        self.requests.lock().unwrap().clear();
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post(&self, path: &str, headers: &Headers, body: String) -> Result<String, Error> {
        let request = RecordedRequest {
            path: path.to_string(),
            headers: headers.to_vec(),
            body,
        };
        self.requests.lock().unwrap().push(request.clone());
        (self.responder)(&request)
    }

    fn host(&self) -> &str {
        "plug.test"
    }
}

/// Wraps `inner` in an HNAP response envelope for `action`.
pub(crate) fn hnap_response(action: &str, inner: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?><soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/"><soap:Body><{action}Response xmlns="{ns}">{inner}</{action}Response></soap:Body></soap:Envelope>"#,
        action = action,
        ns = HNAP_NAMESPACE,
        inner = inner,
    )
}

pub(crate) const PUBLIC_KEY: &str = "PUBKEY123";
pub(crate) const CHALLENGE: &str = "CHALLENGE456";
pub(crate) const COOKIE: &str = "COOKIE789";
pub(crate) const PASSWORD: &str = "secret";

/// First-round login answer carrying the fixed test challenge.
pub(crate) fn challenge_response() -> String {
    hnap_response(
        "Login",
        &format!(
            "<LoginResult>OK</LoginResult><Challenge>{}</Challenge><Cookie>{}</Cookie><PublicKey>{}</PublicKey>",
            CHALLENGE, COOKIE, PUBLIC_KEY
        ),
    )
}

/// Second-round login answer with the given result.
pub(crate) fn login_result(result: &str) -> String {
    hnap_response("Login", &format!("<LoginResult>{}</LoginResult>", result))
}

/// Answers both login rounds successfully, delegating everything else to `actions`.
pub(crate) fn with_login(
    actions: impl Fn(&RecordedRequest) -> Result<String, Error> + Send + Sync + 'static,
) -> ScriptedTransport {
    ScriptedTransport::new(move |request| {
        if request.is_login_request() {
            Ok(challenge_response())
        } else if request.is_login_proof() {
            Ok(login_result("success"))
        } else {
            actions(request)
        }
    })
}
