//! High-level client for one D-Link smart plug.
//!
//! [`SmartPlug`] owns the transport, the session manager and the small
//! amount of per-device state (channel map, fault-report flag). Every
//! operation takes `&mut self`, so calls on one plug are always serialised.
//!
//! Faults never surface as errors from the read operations: they are logged
//! and come back as [`PlugState::Unknown`], [`Reading::Unavailable`] or
//! `None`. The only error a caller sees after construction is
//! [`Error::InvalidArgument`] from [`SmartPlug::set_state`].

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::{
    channel::{Channel, ChannelMap},
    crypto::hnap::{action_url, hnap_auth, timestamp},
    error::Error,
    response::{DeviceInfo, PlugState, Reading, parse_status_lines},
    session::{ErrorReport, SessionManager},
    soap::{self, CONTENT_TYPE},
    transport::{DeviceConfig, HNAP_PATH, HttpTransport, ProtocolMode, STATUS_PATH, Transport},
};

/// Attempts per action: the first try plus one re-authenticated retry.
const MAX_ATTEMPTS: usize = 2;

/// Field of the legacy status page holding the current draw in watts.
const LEGACY_POWER_FIELD: &str = "Meter Watt";

/// Body requesting the legacy status page.
const STATUS_REQUEST: &str = "request=create_chklst";

/// Client for a single plug.
///
/// # Example
///
/// ```no_run
/// use w215_core::{DeviceConfig, PlugState, SmartPlug};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut plug = SmartPlug::connect(DeviceConfig::new("192.168.0.10", "123456")).await?;
///
///     plug.set_state("ON").await?;
///     assert_eq!(plug.state().await, PlugState::On);
///
///     println!("drawing {} W", plug.current_consumption().await);
///     Ok(())
/// }
/// ```
pub struct SmartPlug {
    transport: Box<dyn Transport>,
    mode: ProtocolMode,
    session: SessionManager,
    error_report: ErrorReport,
    channels: ChannelMap,
    model_name: Option<String>,
    hardware_version: Option<String>,
}

impl SmartPlug {
    /// Connects to the plug over HTTP and probes its model.
    ///
    /// The probe is a regular authenticated action; if it fails the client is
    /// still returned, with no model information and the default channel map.
    pub async fn connect(config: DeviceConfig) -> Result<Self, Error> {
        let transport = HttpTransport::new(config.host.clone(), config.timeout)?;
        Ok(Self::with_transport(config, Box::new(transport)).await)
    }

    /// Builds a client on top of an arbitrary transport and probes the plug.
    pub async fn with_transport(config: DeviceConfig, transport: Box<dyn Transport>) -> Self {
        if config.mode == ProtocolMode::Legacy {
            info!(host = %config.host, "enabled support for legacy firmware");
        }

        let mut plug = Self {
            transport,
            mode: config.mode,
            session: SessionManager::new(config.credentials, config.mode),
            error_report: ErrorReport::default(),
            channels: ChannelMap::Default,
            model_name: None,
            hardware_version: None,
        };
        plug.probe().await;
        plug
    }

    /// Reads model and hardware version, and fixes the channel map.
    async fn probe(&mut self) {
        let Some(xml) = self.call("GetDeviceSettings", "").await else {
            return;
        };

        self.model_name = self.extract(&xml, "ModelName");
        self.hardware_version = soap::find_element(&xml, "HardwareVersion")
            .ok()
            .flatten()
            .filter(|v| !v.is_empty());
        // Only legacy firmware numbers its modules by hardware revision.
        if self.mode == ProtocolMode::Legacy {
            self.channels = ChannelMap::for_hardware_version(self.hardware_version.as_deref());
        }

        debug!(
            host = %self.transport.host(),
            model = ?self.model_name,
            hardware_version = ?self.hardware_version,
            channel_map = ?self.channels,
            "probed device"
        );
    }

    /// Invokes `action` and returns the text of `response_element`.
    ///
    /// Transport faults invalidate the session and are retried once with a
    /// fresh login. A response without the element is not retried.
    pub async fn invoke(
        &mut self,
        action: &str,
        response_element: &str,
        params: &str,
    ) -> Option<String> {
        let xml = self.call(action, params).await?;
        self.extract(&xml, response_element)
    }

    /// Sends a signed action and returns the raw response body.
    async fn call(&mut self, action: &str, params: &str) -> Option<String> {
        for attempt in 1..=MAX_ATTEMPTS {
            let session = self
                .session
                .acquire(self.transport.as_ref(), &mut self.error_report)
                .await?;

            let auth = hnap_auth(session.signing_key(), timestamp(), action);
            let headers = [
                ("Content-Type", CONTENT_TYPE.to_string()),
                ("SOAPAction", action_url(action)),
                ("HNAP_AUTH", auth),
                ("Cookie", format!("uid={}", session.cookie())),
            ];

            debug!(host = %self.transport.host(), action, attempt, "invoking action");
            match self
                .transport
                .post(HNAP_PATH, &headers, soap::envelope(action, params))
                .await
            {
                Ok(xml) => return Some(xml),
                Err(e) if e.is_transport() && attempt < MAX_ATTEMPTS => {
                    debug!(action, error = %e, "action failed, re-authenticating");
                    self.session.invalidate();
                }
                Err(e) => {
                    self.session.invalidate();
                    warn!(host = %self.transport.host(), action, error = %e, "failed to open url to smart plug");
                    self.error_report.set();
                    return None;
                }
            }
        }
        None
    }

    /// Pulls `element` out of a response, applying the fault-report policy.
    fn extract(&mut self, xml: &str, element: &str) -> Option<String> {
        match soap::find_element(xml, element) {
            Ok(Some(value)) if !value.is_empty() => {
                self.error_report.clear();
                Some(value)
            }
            Ok(Some(_)) => {
                if self.error_report.first() {
                    warn!(element, "could not find value of {} in response", element);
                }
                None
            }
            Ok(None) => {
                if self.error_report.first() {
                    warn!(element, "unable to find {} in response", element);
                }
                None
            }
            Err(e) => {
                if self.error_report.first() {
                    warn!(element, error = %e, "unreadable response while looking for {}", element);
                }
                None
            }
        }
    }

    fn module_parameters(&self, channel: Channel) -> String {
        soap::module_parameters(self.channels.module_id(channel))
    }

    /// Current relay state.
    pub async fn state(&mut self) -> PlugState {
        let params = self.module_parameters(Channel::Switch);
        let Some(response) = self.invoke("GetSocketSettings", "OPStatus", &params).await else {
            return PlugState::Unknown;
        };

        PlugState::from_op_status(&response).unwrap_or_else(|| {
            warn!(state = %response.to_lowercase(), "unknown state returned");
            PlugState::Unknown
        })
    }

    /// Switches the relay to `value` (`ON` or `OFF`, any case).
    ///
    /// Returns the device's `SetSocketSettingsResult`, or `None` if the
    /// action could not be carried out.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for any other value, without
    /// contacting the plug.
    pub async fn set_state(&mut self, value: &str) -> Result<Option<String>, Error> {
        let on = match value.parse::<PlugState>()? {
            PlugState::On => true,
            PlugState::Off => false,
            PlugState::Unknown => {
                return Err(Error::InvalidArgument(format!(
                    "state {:?} is not valid",
                    value
                )));
            }
        };
        Ok(self.set_power(on).await)
    }

    /// Switches the relay on or off.
    pub async fn set_power(&mut self, on: bool) -> Option<String> {
        let module_id = self.channels.module_id(Channel::Switch);
        let params = soap::control_parameters(self.mode, module_id, on);
        self.invoke("SetSocketSettings", "SetSocketSettingsResult", &params)
            .await
    }

    /// Switches the relay on.
    pub async fn turn_on(&mut self) -> Option<String> {
        self.set_power(true).await
    }

    /// Switches the relay off.
    pub async fn turn_off(&mut self) -> Option<String> {
        self.set_power(false).await
    }

    /// Current power draw in watts.
    pub async fn current_consumption(&mut self) -> Reading {
        let raw = match self.mode {
            ProtocolMode::Legacy => self
                .fetch_status()
                .await
                .and_then(|mut status| status.remove(LEGACY_POWER_FIELD)),
            ProtocolMode::Current => {
                let params = self.module_parameters(Channel::PowerMeter);
                self.invoke("GetCurrentPowerConsumption", "CurrentConsumption", &params)
                    .await
            }
        };
        Reading::from_response(raw.as_deref(), "current power consumption")
    }

    /// Energy consumed over the device lifetime in kWh.
    ///
    /// Legacy firmware does not answer this reliably, so it is always
    /// unavailable there and no request is made.
    pub async fn total_consumption(&mut self) -> Reading {
        if self.mode == ProtocolMode::Legacy {
            return Reading::Unavailable;
        }
        let params = self.module_parameters(Channel::PowerMeter);
        let raw = self
            .invoke("GetPMWarningThreshold", "TotalConsumption", &params)
            .await;
        Reading::from_response(raw.as_deref(), "total power consumption")
    }

    /// Device temperature in degrees Celsius.
    pub async fn temperature(&mut self) -> Reading {
        let params = self.module_parameters(Channel::Thermal);
        let raw = self
            .invoke("GetCurrentTemperature", "CurrentTemperature", &params)
            .await;
        Reading::from_response(raw.as_deref(), "temperature")
    }

    /// Fetches the legacy plain-text status page as a map.
    pub async fn fetch_status(&mut self) -> Option<HashMap<String, String>> {
        let headers = [(
            "Content-Type",
            "application/x-www-form-urlencoded".to_string(),
        )];
        match self
            .transport
            .post(STATUS_PATH, &headers, STATUS_REQUEST.to_string())
            .await
        {
            Ok(text) => Some(parse_status_lines(&text)),
            Err(e) => {
                warn!(host = %self.transport.host(), error = %e, "failed to open url to smart plug");
                self.error_report.set();
                None
            }
        }
    }

    /// `ModelName` reported during the probe.
    pub fn model_name(&self) -> Option<&str> {
        self.model_name.as_deref()
    }

    /// `HardwareVersion` reported during the probe.
    pub fn hardware_version(&self) -> Option<&str> {
        self.hardware_version.as_deref()
    }

    /// Firmware dialect in use.
    pub fn mode(&self) -> ProtocolMode {
        self.mode
    }

    /// Active module id table.
    pub fn channel_map(&self) -> ChannelMap {
        self.channels
    }

    /// Device host.
    pub fn host(&self) -> &str {
        self.transport.host()
    }

    /// Returns `true` while a fault is being suppressed from the logs.
    pub fn has_reported_error(&self) -> bool {
        self.error_report.is_set()
    }

    /// Summary of what the probe found.
    pub fn info(&self) -> DeviceInfo {
        DeviceInfo {
            host: self.host().to_string(),
            model_name: self.model_name.clone(),
            hardware_version: self.hardware_version.clone(),
            protocol: self.mode,
            channel_map: self.channels,
        }
    }
}

impl std::fmt::Debug for SmartPlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmartPlug")
            .field("host", &self.transport.host())
            .field("mode", &self.mode)
            .field("channels", &self.channels)
            .field("model_name", &self.model_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    };

    use super::*;
    use crate::transport::mock::{
        PASSWORD, RecordedRequest, ScriptedTransport, hnap_response, with_login,
    };

    fn device_settings(request: &RecordedRequest) -> Option<Result<String, Error>> {
        (request.action() == Some("GetDeviceSettings")).then(|| {
            Ok(hnap_response(
                "GetDeviceSettings",
                "<ModelName>DSP-W215</ModelName><HardwareVersion>A1</HardwareVersion>",
            ))
        })
    }

    async fn plug(mode: ProtocolMode, transport: &ScriptedTransport) -> SmartPlug {
        let config = DeviceConfig::new("plug.test", PASSWORD)
            .with_legacy_protocol(mode == ProtocolMode::Legacy);
        let plug = SmartPlug::with_transport(config, Box::new(transport.clone())).await;
        transport.clear();
        plug
    }

    fn action_attempts(transport: &ScriptedTransport, action: &str) -> usize {
        transport.count(|r| r.action() == Some(action))
    }

    #[tokio::test]
    async fn test_probe_reads_model() {
        let transport = with_login(|r| {
            device_settings(r).unwrap_or_else(|| Err(Error::Protocol("unexpected".into())))
        });
        let plug = plug(ProtocolMode::Current, &transport).await;
        assert_eq!(plug.model_name(), Some("DSP-W215"));
        assert_eq!(plug.hardware_version(), Some("A1"));
        assert_eq!(plug.channel_map(), ChannelMap::Default);
    }

    #[tokio::test]
    async fn test_action_is_signed() {
        let transport = with_login(|r| {
            device_settings(r).unwrap_or_else(|| {
                Ok(hnap_response("GetSocketSettings", "<OPStatus>true</OPStatus>"))
            })
        });
        let mut plug = plug(ProtocolMode::Current, &transport).await;
        assert_eq!(plug.state().await, PlugState::On);

        let requests = transport.requests();
        let action = requests
            .iter()
            .find(|r| r.action() == Some("GetSocketSettings"))
            .unwrap();
        assert_eq!(action.path, HNAP_PATH);
        assert_eq!(action.header("Content-Type"), Some(CONTENT_TYPE));
        assert_eq!(
            action.header("SOAPAction"),
            Some("\"http://purenetworks.com/HNAP1/GetSocketSettings\"")
        );
        assert!(action.header("Cookie").unwrap().starts_with("uid="));

        let auth = action.header("HNAP_AUTH").unwrap();
        let (signature, ts) = auth.split_once(' ').unwrap();
        assert_eq!(signature.len(), 32);
        assert!(ts.parse::<u64>().is_ok());
        assert!(action.body.contains("<ModuleID>1</ModuleID>"));
    }

    #[tokio::test]
    async fn test_current_mode_logs_in_every_call() {
        let transport = with_login(|r| {
            device_settings(r).unwrap_or_else(|| {
                Ok(hnap_response("GetSocketSettings", "<OPStatus>false</OPStatus>"))
            })
        });
        let mut plug = plug(ProtocolMode::Current, &transport).await;
        assert_eq!(plug.state().await, PlugState::Off);
        assert_eq!(plug.state().await, PlugState::Off);
        assert_eq!(transport.count(|r| r.is_login_request()), 2);
    }

    #[tokio::test]
    async fn test_legacy_mode_reuses_session() {
        let transport = with_login(|r| {
            device_settings(r).unwrap_or_else(|| {
                Ok(hnap_response("GetSocketSettings", "<OPStatus>true</OPStatus>"))
            })
        });
        let mut plug = plug(ProtocolMode::Legacy, &transport).await;
        plug.state().await;
        plug.state().await;
        // Session from the probe is still cached.
        assert_eq!(transport.count(|r| r.is_login_request()), 0);
    }

    #[tokio::test]
    async fn test_retry_once_after_transport_fault() {
        let failures = Arc::new(AtomicUsize::new(1));
        let remaining = failures.clone();
        let transport = with_login(move |r| {
            if let Some(resp) = device_settings(r) {
                return resp;
            }
            if remaining.load(Ordering::SeqCst) > 0 {
                remaining.fetch_sub(1, Ordering::SeqCst);
                return Err(Error::ConnectionFailed("reset".into()));
            }
            Ok(hnap_response("GetCurrentTemperature", "<CurrentTemperature>31</CurrentTemperature>"))
        });
        let mut plug = plug(ProtocolMode::Legacy, &transport).await;

        assert_eq!(plug.temperature().await, Reading::Value(31.0));
        assert_eq!(action_attempts(&transport, "GetCurrentTemperature"), 2);
        // Cached legacy session was dropped and re-derived for the retry.
        assert_eq!(transport.count(|r| r.is_login_request()), 1);
        assert!(!plug.has_reported_error());
    }

    #[tokio::test]
    async fn test_no_third_attempt() {
        let transport = with_login(|r| {
            device_settings(r).unwrap_or_else(|| Err(Error::Timeout("read".into())))
        });
        let mut plug = plug(ProtocolMode::Current, &transport).await;

        assert_eq!(plug.state().await, PlugState::Unknown);
        assert_eq!(action_attempts(&transport, "GetSocketSettings"), 2);
        assert_eq!(transport.count(|r| r.is_login_request()), 2);
        assert!(plug.has_reported_error());
    }

    #[tokio::test]
    async fn test_missing_element_not_retried() {
        let transport = with_login(|r| {
            device_settings(r)
                .unwrap_or_else(|| Ok(hnap_response("GetSocketSettings", "<Other>1</Other>")))
        });
        let mut plug = plug(ProtocolMode::Current, &transport).await;

        assert_eq!(plug.invoke("GetSocketSettings", "OPStatus", "").await, None);
        assert_eq!(action_attempts(&transport, "GetSocketSettings"), 1);
    }

    #[tokio::test]
    async fn test_missing_element_reported_until_success() {
        let missing = Arc::new(AtomicBool::new(true));
        let flag = missing.clone();
        let transport = with_login(move |r| {
            if let Some(resp) = device_settings(r) {
                return resp;
            }
            let inner = if flag.load(Ordering::SeqCst) {
                "<Other>1</Other>"
            } else {
                "<CurrentTemperature>30</CurrentTemperature>"
            };
            Ok(hnap_response("GetCurrentTemperature", inner))
        });
        let mut plug = plug(ProtocolMode::Legacy, &transport).await;
        assert!(!plug.has_reported_error());

        assert_eq!(plug.temperature().await, Reading::Unavailable);
        assert!(plug.has_reported_error());
        assert_eq!(plug.temperature().await, Reading::Unavailable);
        assert!(plug.has_reported_error());

        missing.store(false, Ordering::SeqCst);
        assert_eq!(plug.temperature().await, Reading::Value(30.0));
        assert!(!plug.has_reported_error());
    }

    #[tokio::test]
    async fn test_malformed_response_reported() {
        let transport = with_login(|r| {
            device_settings(r).unwrap_or_else(|| Ok("<broken><xml></broken>".to_string()))
        });
        let mut plug = plug(ProtocolMode::Legacy, &transport).await;

        assert_eq!(plug.state().await, PlugState::Unknown);
        assert!(plug.has_reported_error());
        assert_eq!(action_attempts(&transport, "GetSocketSettings"), 1);
    }

    #[tokio::test]
    async fn test_empty_element_sets_and_success_clears_report() {
        let empty = Arc::new(AtomicBool::new(true));
        let flag = empty.clone();
        let transport = with_login(move |r| {
            if let Some(resp) = device_settings(r) {
                return resp;
            }
            let value = if flag.load(Ordering::SeqCst) { "" } else { "12.5" };
            Ok(hnap_response(
                "GetCurrentPowerConsumption",
                &format!("<CurrentConsumption>{}</CurrentConsumption>", value),
            ))
        });
        let mut plug = plug(ProtocolMode::Current, &transport).await;

        assert_eq!(plug.current_consumption().await, Reading::Unavailable);
        assert!(plug.has_reported_error());
        assert_eq!(action_attempts(&transport, "GetCurrentPowerConsumption"), 1);

        empty.store(false, Ordering::SeqCst);
        assert_eq!(plug.current_consumption().await, Reading::Value(12.5));
        assert!(!plug.has_reported_error());
    }

    #[tokio::test]
    async fn test_no_session_means_no_action() {
        let transport =
            ScriptedTransport::new(|_| Err(Error::ConnectionFailed("refused".into())));
        let mut plug = plug(ProtocolMode::Current, &transport).await;

        assert_eq!(plug.model_name(), None);
        assert_eq!(plug.state().await, PlugState::Unknown);
        assert_eq!(action_attempts(&transport, "GetSocketSettings"), 0);
    }

    #[tokio::test]
    async fn test_invalid_state_makes_no_request() {
        let transport = with_login(|r| {
            device_settings(r).unwrap_or_else(|| Err(Error::Protocol("unexpected".into())))
        });
        let mut plug = plug(ProtocolMode::Current, &transport).await;

        assert!(matches!(
            plug.set_state("maybe").await,
            Err(Error::InvalidArgument(_))
        ));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_unexpected_state_text() {
        let transport = with_login(|r| {
            device_settings(r).unwrap_or_else(|| {
                Ok(hnap_response("GetSocketSettings", "<OPStatus>maybe</OPStatus>"))
            })
        });
        let mut plug = plug(ProtocolMode::Current, &transport).await;
        assert_eq!(plug.state().await, PlugState::Unknown);
    }

    #[tokio::test]
    async fn test_set_state_legacy_encoding() {
        let transport = with_login(|r| {
            device_settings(r).unwrap_or_else(|| {
                Ok(hnap_response(
                    "SetSocketSettings",
                    "<SetSocketSettingsResult>OK</SetSocketSettingsResult>",
                ))
            })
        });
        let mut plug = plug(ProtocolMode::Legacy, &transport).await;

        assert_eq!(plug.set_state("off").await.unwrap().as_deref(), Some("OK"));
        let request = transport
            .requests()
            .into_iter()
            .find(|r| r.action() == Some("SetSocketSettings"))
            .unwrap();
        assert!(request.body.contains("<OPStatus>false</OPStatus>"));
        assert!(request.body.contains("<Controller>1</Controller>"));
    }

    #[tokio::test]
    async fn test_legacy_current_consumption_uses_status_page() {
        let transport = with_login(|r| {
            if let Some(resp) = device_settings(r) {
                return resp;
            }
            if r.path == STATUS_PATH {
                assert_eq!(r.body, STATUS_REQUEST);
                return Ok("Meter Watt: 4.2\nTemperature: 30\n".to_string());
            }
            Err(Error::Protocol("unexpected".into()))
        });
        let mut plug = plug(ProtocolMode::Legacy, &transport).await;

        assert_eq!(plug.current_consumption().await, Reading::Value(4.2));
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_legacy_status_page_failure() {
        let transport = with_login(|r| {
            device_settings(r).unwrap_or_else(|| Err(Error::HttpStatus(500)))
        });
        let mut plug = plug(ProtocolMode::Legacy, &transport).await;

        assert_eq!(plug.current_consumption().await, Reading::Unavailable);
        assert!(plug.has_reported_error());
    }

    #[tokio::test]
    async fn test_legacy_total_consumption_makes_no_request() {
        let transport = with_login(|r| {
            device_settings(r).unwrap_or_else(|| {
                Ok(hnap_response(
                    "GetPMWarningThreshold",
                    "<TotalConsumption>9.9</TotalConsumption>",
                ))
            })
        });
        let mut plug = plug(ProtocolMode::Legacy, &transport).await;

        assert_eq!(plug.total_consumption().await, Reading::Unavailable);
        assert!(transport.requests().is_empty());
    }

    fn alternate_revision_transport() -> ScriptedTransport {
        with_login(|r| match r.action() {
            Some("GetDeviceSettings") => Ok(hnap_response(
                "GetDeviceSettings",
                "<ModelName>DSP-W215</ModelName><HardwareVersion>B1</HardwareVersion>",
            )),
            _ => Ok(hnap_response(
                "GetCurrentTemperature",
                "<CurrentTemperature>25</CurrentTemperature>",
            )),
        })
    }

    #[tokio::test]
    async fn test_current_firmware_keeps_default_map() {
        let transport = alternate_revision_transport();
        let mut plug = plug(ProtocolMode::Current, &transport).await;
        assert_eq!(plug.hardware_version(), Some("B1"));
        assert_eq!(plug.channel_map(), ChannelMap::Default);

        plug.temperature().await;
        let request = transport
            .requests()
            .into_iter()
            .find(|r| r.action() == Some("GetCurrentTemperature"))
            .unwrap();
        assert!(request.body.contains("<ModuleID>3</ModuleID>"));
    }

    #[tokio::test]
    async fn test_alternate_channel_map() {
        let transport = alternate_revision_transport();
        let mut plug = plug(ProtocolMode::Legacy, &transport).await;
        assert_eq!(plug.channel_map(), ChannelMap::Alternate);

        plug.temperature().await;
        let request = transport
            .requests()
            .into_iter()
            .find(|r| r.action() == Some("GetCurrentTemperature"))
            .unwrap();
        assert!(request.body.contains("<ModuleID>2</ModuleID>"));
    }

    #[tokio::test]
    async fn test_info() {
        let transport = with_login(|r| {
            device_settings(r).unwrap_or_else(|| Err(Error::Protocol("unexpected".into())))
        });
        let plug = plug(ProtocolMode::Legacy, &transport).await;
        let info = plug.info();
        assert_eq!(info.host, "plug.test");
        assert_eq!(info.model_name.as_deref(), Some("DSP-W215"));
        assert_eq!(info.protocol, ProtocolMode::Legacy);
    }
}
