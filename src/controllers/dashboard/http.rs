use embassy_net::Stack;
use embassy_time::Instant;
use sensor_node_dashboard::{
    OperatingMode,
    PinBankError,
    PinControlRequest,
    PinLevel,
    PinsResponse,
    RenderContext,
    render_to_string,
};

use super::{DashboardPins, PIN_BANK};
use crate::{
    config::{DEVICE, FIRMWARE, RELAY_PIN},
    infrastructure::services::{serial_snapshot, temperature},
    net::http::{Error as HttpError, HttpConnection, HttpHandler, HttpMethod, HttpResult, Status},
};

/// Routes the dashboard page and the endpoints its script polls.
pub struct DashboardHttpController {
    stack: Stack<'static>,
}

impl DashboardHttpController {
    pub(super) fn new(stack: Stack<'static>) -> Self {
        Self { stack }
    }

    fn mode(&self) -> OperatingMode {
        if self.stack.is_link_up() && !DEVICE.master_url.is_empty() {
            OperatingMode::Online
        } else {
            OperatingMode::Offline
        }
    }
}

impl HttpHandler for DashboardHttpController {
    async fn handle_request(&self, conn: HttpConnection<'_>) -> HttpResult {
        let mut conn = conn;
        match conn.route() {
            (HttpMethod::Get, "/") => handle_get_page(&mut conn, self.mode()).await,
            (HttpMethod::Get, "/api/pins") => handle_get_pins(&mut conn).await,
            (HttpMethod::Post, "/api/pin-control") => handle_pin_control(&mut conn).await,
            (HttpMethod::Get, "/api/serial") => handle_get_serial(&mut conn).await,
            (_, "/" | "/api/pins" | "/api/pin-control" | "/api/serial") => {
                conn.respond(Status::MethodNotAllowed).await
            }
            _ => conn.respond(Status::NotFound).await,
        }
    }
}

fn with_pins<R>(
    op: impl FnOnce(&mut DashboardPins) -> Result<R, PinBankError>,
) -> Result<R, PinBankError> {
    PIN_BANK.lock(|cell| match cell.borrow_mut().as_mut() {
        Some(bank) => op(bank),
        None => Err(PinBankError::Driver),
    })
}

async fn handle_get_page(conn: &mut HttpConnection<'_>, mode: OperatingMode) -> HttpResult {
    let relay = matches!(with_pins(|bank| bank.level(RELAY_PIN.gpio)), Ok(PinLevel::High));
    let context = RenderContext {
        sensor_name: DEVICE.name,
        sensor_id: DEVICE.id,
        sensor_type: DEVICE.sensor_type,
        mode,
        master_url: DEVICE.master_url,
        firmware_version: FIRMWARE.version,
        temperature: temperature(),
        relay,
        uptime_secs: Instant::now().as_secs(),
    };

    let html = render_to_string(&context, &DEVICE.board);
    conn.write_html(&html).await
}

async fn handle_get_pins(conn: &mut HttpConnection<'_>) -> HttpResult {
    let statuses = with_pins(|bank| Ok(bank.statuses())).unwrap_or_default();
    write_json_or_500(conn, &PinsResponse { pins: &statuses }).await
}

async fn handle_pin_control(conn: &mut HttpConnection<'_>) -> HttpResult {
    let request = match conn.read_json::<PinControlRequest>().await {
        Ok(request) => request,
        Err(HttpError::Parse | HttpError::NoData) => {
            return conn.respond(Status::BadRequest).await;
        }
        Err(e) => return Err(e),
    };

    match with_pins(|bank| bank.set(request.pin, request.value)) {
        Ok(()) => conn.respond(Status::NoContent).await,
        Err(PinBankError::UnknownPin(pin)) => {
            log::warn!("dashboard: rejected control of gpio {}", pin);
            conn.respond(Status::NotFound).await
        }
        Err(e) => {
            log::error!("dashboard: gpio {}: {}", request.pin, e);
            conn.respond(Status::InternalError).await
        }
    }
}

async fn handle_get_serial(conn: &mut HttpConnection<'_>) -> HttpResult {
    let lines = serial_snapshot();
    write_json_or_500(conn, &lines).await
}

/// Nothing is written when serialization fails, so the error can still be
/// reported with a status line.
async fn write_json_or_500<T: serde::Serialize>(
    conn: &mut HttpConnection<'_>,
    data: &T,
) -> HttpResult {
    match conn.write_json(data).await {
        Err(HttpError::Serialize) => {
            log::warn!("dashboard: response body too large");
            conn.respond(Status::InternalError).await
        }
        result => result,
    }
}
