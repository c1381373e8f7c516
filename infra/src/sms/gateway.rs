//! HTTP plumbing shared by the gateway adapters

use mn_core::SendResult;
use mn_shared::{mask_phone_number, PhoneNumber, PhoneShape};
use reqwest::{RequestBuilder, StatusCode};
use std::time::Duration;
use tracing::{error, info, warn};

use crate::InfrastructureError;

/// Status and body of a gateway response
#[derive(Debug)]
pub(crate) struct GatewayResponse {
    pub status: StatusCode,
    pub body: String,
}

impl GatewayResponse {
    /// `Ok(())` for 2xx, otherwise a status error carrying the body
    pub fn require_success(&self) -> Result<(), InfrastructureError> {
        if self.status.is_success() {
            Ok(())
        } else {
            Err(InfrastructureError::Status {
                status: self.status.as_u16(),
                body: self.body.clone(),
            })
        }
    }
}

/// Send a request and read the whole body, applying `timeout` when given
///
/// Without a timeout the client's own defaults apply.
pub(crate) async fn dispatch(
    request: RequestBuilder,
    timeout: Option<Duration>,
) -> Result<GatewayResponse, InfrastructureError> {
    let request = match timeout {
        Some(limit) => request.timeout(limit),
        None => request,
    };

    let response = request
        .send()
        .await
        .map_err(|e| transport_error(e, timeout))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| transport_error(e, timeout))?;

    Ok(GatewayResponse { status, body })
}

fn transport_error(e: reqwest::Error, timeout: Option<Duration>) -> InfrastructureError {
    match timeout {
        Some(limit) if e.is_timeout() => {
            InfrastructureError::Timeout(format!("request timed out after {:?}", limit))
        }
        _ => InfrastructureError::Http(e),
    }
}

/// Log a destination whose shape none of the gateways expect
pub(crate) fn note_destination(provider: &str, to: &str) {
    if PhoneNumber::new(to).shape() == PhoneShape::Unrecognized {
        warn!(
            provider = provider,
            phone = %mask_phone_number(to),
            "Destination is not a recognised PH mobile number, sending as given"
        );
    }
}

/// Turn an adapter outcome into the boundary result, logging either way
pub(crate) fn into_send_result(
    provider: &str,
    to: &str,
    outcome: Result<(), InfrastructureError>,
) -> SendResult {
    match &outcome {
        Ok(()) => info!(
            target: "sms_service",
            provider = provider,
            phone = %mask_phone_number(to),
            "SMS sent successfully"
        ),
        Err(e) => error!(
            target: "sms_service",
            provider = provider,
            phone = %mask_phone_number(to),
            error = %e,
            "Failed to send SMS"
        ),
    }

    SendResult::from(outcome)
}
