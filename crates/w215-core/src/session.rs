//! HNAP login handshake and session caching.
//!
//! A session is the `(signing key, cookie)` pair produced by one successful
//! two-round login. [`SessionManager`] is the only place sessions are created
//! or dropped:
//!
//! ```text
//! Unauthenticated --request--> challenge --login--> Active   (legacy mode)
//!                                   |                  \--> handed out, not kept (current mode)
//!                                   \--> failure: None, state stays Unauthenticated
//! ```

use std::fmt;

use tracing::{debug, error, warn};

use crate::{
    Credentials,
    crypto::hnap::{action_url, derive_login_proof, derive_private_key},
    error::Error,
    soap::{self, CONTENT_TYPE},
    transport::{HNAP_PATH, ProtocolMode, Transport},
};

/// Signing key and cookie from one successful login.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    signing_key: String,
    cookie: String,
}

impl Session {
    /// Upper-case hex private key used to sign actions.
    pub fn signing_key(&self) -> &str {
        &self.signing_key
    }

    /// Value sent as `Cookie: uid=<cookie>`.
    pub fn cookie(&self) -> &str {
        &self.cookie
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("signing_key", &"[REDACTED]")
            .field("cookie", &"[REDACTED]")
            .finish()
    }
}

/// Cached session, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    /// No usable session; the next call logs in.
    #[default]
    Unauthenticated,
    /// Session retained between calls (legacy mode only).
    Active(Session),
}

/// Suppresses repeated warnings while the same fault keeps occurring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorReport {
    reported: bool,
}

impl ErrorReport {
    /// Returns `true` if a fault has been reported and not yet cleared.
    pub fn is_set(&self) -> bool {
        self.reported
    }

    /// Marks a fault as reported.
    pub fn set(&mut self) {
        self.reported = true;
    }

    /// Clears the flag after a success.
    pub fn clear(&mut self) {
        self.reported = false;
    }

    /// Marks a fault as reported, returning `true` if it was not already.
    pub fn first(&mut self) -> bool {
        !std::mem::replace(&mut self.reported, true)
    }
}

/// Owns the login credentials and the session derived from them.
#[derive(Debug)]
pub struct SessionManager {
    credentials: Credentials,
    mode: ProtocolMode,
    state: SessionState,
}

impl SessionManager {
    /// Creates a manager with no session.
    pub fn new(credentials: Credentials, mode: ProtocolMode) -> Self {
        Self {
            credentials,
            mode,
            state: SessionState::Unauthenticated,
        }
    }

    /// Current cached state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Drops any cached session.
    pub fn invalidate(&mut self) {
        if self.state != SessionState::Unauthenticated {
            debug!("invalidating cached session");
        }
        self.state = SessionState::Unauthenticated;
    }

    /// Returns a usable session, logging in if none is cached.
    ///
    /// Handshake failures are logged once per fault episode (guarded by
    /// `report`) and come back as `None`.
    pub async fn acquire(
        &mut self,
        transport: &dyn Transport,
        report: &mut ErrorReport,
    ) -> Option<Session> {
        if let SessionState::Active(session) = &self.state {
            return Some(session.clone());
        }

        match self.login(transport).await {
            Ok(session) => {
                report.clear();
                if self.mode.caches_session() {
                    self.state = SessionState::Active(session.clone());
                }
                Some(session)
            }
            Err(e) => {
                self.state = SessionState::Unauthenticated;
                if report.first() {
                    match &e {
                        Error::AuthenticationFailed(_) => {
                            error!(host = %transport.host(), error = %e, "failed to authenticate with smart plug");
                        }
                        err if err.is_transport() => {
                            warn!(host = %transport.host(), error = %e, "unable to open a connection to smart plug");
                        }
                        _ => {
                            warn!(host = %transport.host(), error = %e, "failed to receive initial authentication from smart plug");
                        }
                    }
                } else {
                    debug!(error = %e, "login failed again");
                }
                None
            }
        }
    }

    /// Runs both login rounds.
    async fn login(&self, transport: &dyn Transport) -> Result<Session, Error> {
        let username = &self.credentials.username;
        debug!(host = %transport.host(), username = %username, "requesting login challenge");

        let headers = [
            ("Content-Type", CONTENT_TYPE.to_string()),
            ("SOAPAction", action_url("Login")),
        ];
        let xml = transport
            .post(HNAP_PATH, &headers, soap::login_request(username))
            .await?;

        let challenge = required_element(&xml, "Challenge")?;
        let cookie = required_element(&xml, "Cookie")?;
        let public_key = required_element(&xml, "PublicKey")?;

        let private_key =
            derive_private_key(&public_key, &challenge, self.credentials.expose_password());
        let login_proof = derive_login_proof(&private_key, &challenge);

        debug!(host = %transport.host(), "submitting login proof");
        let headers = [
            ("Content-Type", CONTENT_TYPE.to_string()),
            ("SOAPAction", action_url("Login")),
            ("HNAP_AUTH", format!("\"{}\"", private_key)),
            ("Cookie", format!("uid={}", cookie)),
        ];
        let xml = transport
            .post(
                HNAP_PATH,
                &headers,
                soap::login_response(username, &login_proof),
            )
            .await?;

        match soap::find_element(&xml, "LoginResult")? {
            Some(result) if result.eq_ignore_ascii_case("success") => {
                debug!(host = %transport.host(), "login succeeded");
                Ok(Session {
                    signing_key: private_key,
                    cookie,
                })
            }
            Some(result) => Err(Error::AuthenticationFailed(format!(
                "login result was {:?}",
                result
            ))),
            None => Err(Error::AuthenticationFailed(
                "response carried no LoginResult".into(),
            )),
        }
    }
}

/// Extracts a non-empty element or fails with a protocol error.
fn required_element(xml: &str, name: &str) -> Result<String, Error> {
    match soap::find_element(xml, name)? {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::Protocol(format!("missing {} in login challenge", name))),
    }
}
