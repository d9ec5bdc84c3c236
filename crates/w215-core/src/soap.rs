//! SOAP envelope building and parsing for HNAP.
//!
//! Requests are SOAP 1.1 envelopes wrapping a single action element in the
//! HNAP namespace. Responses are searched for one element by local name,
//! resolved against the same namespace.

use quick_xml::{
    NsReader,
    escape::escape,
    events::Event,
    name::{Namespace, ResolveResult},
};

use crate::{error::Error, transport::ProtocolMode};

/// XML namespace of every HNAP action and response element.
pub const HNAP_NAMESPACE: &str = "http://purenetworks.com/HNAP1/";

/// Content type sent with every HNAP request.
pub const CONTENT_TYPE: &str = "text/xml; charset=utf-8";

const ENVELOPE_HEAD: &str = concat!(
    r#"<?xml version="1.0" encoding="utf-8"?>"#,
    r#"<soap:Envelope xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" "#,
    r#"xmlns:xsd="http://www.w3.org/2001/XMLSchema" "#,
    r#"xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">"#,
    "<soap:Body>"
);

const ENVELOPE_TAIL: &str = "</soap:Body></soap:Envelope>";

/// Builds the request envelope for `action` with a raw parameter fragment.
///
/// # Example
///
/// ```
/// use w215_core::soap::envelope;
///
/// let body = envelope("GetSocketSettings", "<ModuleID>1</ModuleID>");
/// assert!(body.contains(r#"<GetSocketSettings xmlns="http://purenetworks.com/HNAP1/">"#));
/// assert!(body.contains("<ModuleID>1</ModuleID></GetSocketSettings>"));
/// ```
pub fn envelope(action: &str, params: &str) -> String {
    format!(
        r#"{head}<{action} xmlns="{ns}">{params}</{action}>{tail}"#,
        head = ENVELOPE_HEAD,
        action = action,
        ns = HNAP_NAMESPACE,
        params = params,
        tail = ENVELOPE_TAIL,
    )
}

/// First login round: asks the device for a challenge.
pub fn login_request(username: &str) -> String {
    let params = format!(
        "<Action>request</Action><Username>{}</Username><LoginPassword/><Captcha/>",
        escape(username)
    );
    envelope("Login", &params)
}

/// Second login round: submits the derived proof.
pub fn login_response(username: &str, login_proof: &str) -> String {
    let params = format!(
        "<Action>login</Action><Username>{}</Username><LoginPassword>{}</LoginPassword><Captcha/>",
        escape(username),
        escape(login_proof)
    );
    envelope("Login", &params)
}

/// `<ModuleID>` fragment addressing one channel of the plug.
pub fn module_parameters(module_id: u8) -> String {
    format!("<ModuleID>{}</ModuleID>", module_id)
}

/// Parameter fragment for `SetSocketSettings`.
///
/// Legacy firmware additionally needs the `Controller` element.
pub fn control_parameters(mode: ProtocolMode, module_id: u8, on: bool) -> String {
    let mut params = format!(
        "{}<NickName>Socket 1</NickName><Description>Socket 1</Description><OPStatus>{}</OPStatus>",
        module_parameters(module_id),
        on
    );
    if mode == ProtocolMode::Legacy {
        params.push_str("<Controller>1</Controller>");
    }
    params
}

/// Finds the first HNAP-namespaced element named `local_name` and returns its text.
///
/// Returns `Ok(None)` when no such element exists and `Ok(Some(""))` for an
/// element without text. Only the text before the element's first child is
/// collected; surrounding whitespace is trimmed.
///
/// # Errors
///
/// Returns [`Error::ParseError`] if the document is not well-formed.
pub fn find_element(xml: &str, local_name: &str) -> Result<Option<String>, Error> {
    let mut reader = NsReader::from_str(xml);
    let wanted = local_name.as_bytes();
    let mut capture: Option<String> = None;

    loop {
        let (ns, event) = reader.read_resolved_event()?;
        let in_hnap = matches!(ns, ResolveResult::Bound(Namespace(n)) if n == HNAP_NAMESPACE.as_bytes());

        if let Some(text) = capture.as_mut() {
            match event {
                Event::Text(t) => {
                    let decoded = t.decode().map_err(|e| Error::ParseError(e.to_string()))?;
                    text.push_str(&decoded);
                }
                Event::CData(c) => text.push_str(&String::from_utf8_lossy(&c.into_inner())),
                Event::GeneralRef(r) => {
                    let name = r.decode().map_err(|e| Error::ParseError(e.to_string()))?;
                    let resolved = resolve_reference(&name).ok_or_else(|| {
                        Error::ParseError(format!("unknown entity reference &{};", name))
                    })?;
                    text.push(resolved);
                }
                Event::Comment(_) | Event::PI(_) => {}
                _ => return Ok(capture.map(|t| t.trim().to_string())),
            }
            continue;
        }

        match event {
            Event::Start(e) if in_hnap && e.local_name().as_ref() == wanted => {
                capture = Some(String::new());
            }
            Event::Empty(e) if in_hnap && e.local_name().as_ref() == wanted => {
                return Ok(Some(String::new()));
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

/// Resolves a predefined XML entity or a numeric character reference.
fn resolve_reference(name: &str) -> Option<char> {
    match name {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "apos" => Some('\''),
        "quot" => Some('"'),
        _ => {
            let code = name.strip_prefix('#')?;
            let value = match code.strip_prefix('x').or_else(|| code.strip_prefix('X')) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse().ok()?,
            };
            char::from_u32(value)
        }
    }
}
