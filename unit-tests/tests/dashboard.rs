//! Rendered dashboard page and the payloads its script consumes.

use std::collections::HashSet;

use sensor_node_dashboard::{
    ESP32_WROOM_32, OperatingMode, PinCapability, PinControlRequest, PinLevel, PinStatus,
    PinsResponse, RenderContext, SerialLog, render_to_string,
};
use serde::Deserialize;
use tests::ScriptedPage;

#[derive(Debug, Deserialize)]
struct Layout {
    name: String,
    pins: Vec<LayoutPin>,
}

#[derive(Debug, Deserialize)]
struct LayoutPin {
    pin: u8,
    name: String,
    x: u16,
    y: u16,
    side: String,
}

fn context() -> RenderContext<'static> {
    RenderContext {
        sensor_name: "Battery Monitor",
        sensor_id: "node-07",
        sensor_type: "voltage",
        mode: OperatingMode::Offline,
        master_url: "",
        firmware_version: "0.1.0",
        temperature: 23.0,
        relay: false,
        uptime_secs: 42,
    }
}

fn page() -> String {
    render_to_string(&context(), &ESP32_WROOM_32)
}

fn embedded_layout(html: &str) -> Layout {
    const START: &str = "const BOARD_CONFIG = ";
    let start = html.find(START).expect("board config missing") + START.len();
    let end = start + html[start..].find(";\n").expect("board config not terminated");
    serde_json::from_str(&html[start..end]).expect("board config is not JSON")
}

#[test]
fn title_temperature_and_relay_are_rendered() {
    for (temperature, expected) in [(23.0, "23.0°C"), (-4.26, "-4.3°C"), (99.99, "100.0°C")] {
        for relay in [true, false] {
            let html = render_to_string(
                &RenderContext {
                    temperature,
                    relay,
                    ..context()
                },
                &ESP32_WROOM_32,
            );
            assert!(html.contains("<title>Battery Monitor - ESP32</title>"));
            assert!(html.contains(&format!("<div class='sensor-value'>{expected}</div>")));
            let relay_text = if relay { "ON" } else { "OFF" };
            assert!(html.contains(&format!("<div class='sensor-value'>{relay_text}</div>")));
        }
    }
}

#[test]
fn unvalidated_values_render_verbatim() {
    let html = render_to_string(
        &RenderContext {
            sensor_name: "",
            uptime_secs: 0,
            ..context()
        },
        &ESP32_WROOM_32,
    );
    assert!(html.contains("<title> - ESP32</title>"));
    assert!(html.contains("<div class='sensor-value'>0s</div>"));
}

#[test]
fn embedded_layout_has_26_unique_pins_with_valid_sides() {
    let layout = embedded_layout(&page());

    assert_eq!(layout.name, "ESP32-WROOM-32");
    assert_eq!(layout.pins.len(), 26);

    let unique: HashSet<u8> = layout.pins.iter().map(|pin| pin.pin).collect();
    assert_eq!(unique.len(), 26);

    for pin in &layout.pins {
        assert!(pin.side == "left" || pin.side == "right", "bad side {}", pin.side);
        assert!(!pin.name.is_empty());
        assert!(pin.x <= 290 && pin.y <= 500, "pin {} is off the board", pin.pin);
    }
}

#[test]
fn embedded_layout_matches_static_table() {
    let layout = embedded_layout(&page());
    for (parsed, descriptor) in layout.pins.iter().zip(ESP32_WROOM_32.pins) {
        assert_eq!(parsed.pin, descriptor.pin);
        assert_eq!(parsed.name, descriptor.name);
        assert_eq!((parsed.x, parsed.y), (descriptor.x, descriptor.y));
    }
}

#[derive(Debug, Deserialize, PartialEq)]
struct Timer {
    name: String,
    ms: u32,
}

#[derive(Debug, Deserialize, PartialEq)]
struct Request {
    url: String,
    method: String,
    body: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Control {
    html: String,
    high: String,
    low: String,
}

fn pins_json(statuses: &[PinStatus<'_>]) -> String {
    serde_json::to_string(&PinsResponse { pins: statuses }).unwrap()
}

fn writable(pin: u8, state: PinLevel, alias: Option<&'static str>) -> PinStatus<'static> {
    PinStatus {
        pin,
        state,
        capability: PinCapability::GpioWrite,
        alias,
    }
}

#[test]
fn script_builds_board_and_starts_polling() {
    let mut page = ScriptedPage::load(&page(), &pins_json(&[]));

    let board_children: usize = page.query("elements.boardContainer.children.length");
    assert_eq!(board_children, 2 * ESP32_WROOM_32.pins.len());
    let title: String = page.query("elements['pin-36'].title");
    assert_eq!(title, "Pin 36 - VP/A0");

    let timers: Vec<Timer> = page.query("timers");
    assert_eq!(
        timers,
        [
            Timer {
                name: "updateSerial".into(),
                ms: 2000
            },
            Timer {
                name: "updatePinStates".into(),
                ms: 3000
            },
        ]
    );
    let requests: Vec<Request> = page.query("requests");
    assert_eq!(
        requests,
        [Request {
            url: "/api/pins".into(),
            method: "GET".into(),
            body: None
        }]
    );
}

#[test]
fn low_pin_gets_one_control_with_low_highlighted() {
    let json = pins_json(&[writable(4, PinLevel::Low, Some("Relay"))]);
    let mut page = ScriptedPage::load(&page(), &json);

    let controls: Vec<Control> = page.query("pinControls()");
    assert_eq!(controls.len(), 1);
    assert_eq!(controls[0].high, "btn-secondary");
    assert_eq!(controls[0].low, "btn-danger");
    assert!(controls[0].html.contains("Pin 4 (Relay)"));
    assert!(controls[0].html.contains("gpio_write"));

    let active: bool = page.query("elements['pin-4'].classList.contains('pin-active')");
    assert!(!active);
}

#[test]
fn high_pin_lights_board_and_high_button() {
    let json = pins_json(&[writable(2, PinLevel::High, None)]);
    let mut page = ScriptedPage::load(&page(), &json);

    let controls: Vec<Control> = page.query("pinControls()");
    assert_eq!(controls.len(), 1);
    assert_eq!(controls[0].high, "btn-success");
    assert_eq!(controls[0].low, "btn-secondary");
    assert!(!controls[0].html.contains("Pin 2 ("));

    let active: bool = page.query("elements['pin-2'].classList.contains('pin-active')");
    assert!(active);
}

#[test]
fn only_writable_pins_get_controls() {
    let json = r#"{"pins":[
        {"pin":36,"state":1,"type":"gpio_read"},
        {"pin":4,"state":"LOW","type":"gpio_write"}
    ]}"#;
    let mut page = ScriptedPage::load(&page(), json);

    let controls: Vec<Control> = page.query("pinControls()");
    assert_eq!(controls.len(), 1);
    assert!(controls[0].html.contains("Pin 4"));

    // Numeric 1 still lights the board pin.
    let active: bool = page.query("elements['pin-36'].classList.contains('pin-active')");
    assert!(active);
}

#[test]
fn empty_pin_list_shows_placeholder_and_no_controls() {
    let mut page = ScriptedPage::load(&page(), &pins_json(&[]));

    let controls: Vec<Control> = page.query("pinControls()");
    assert!(controls.is_empty());
    let html: String = page.query("elements.pinControls.innerHTML");
    assert!(html.contains("Pin Controls"));
    assert!(html.contains("No controllable pins in current logic"));
}

#[test]
fn refresh_replaces_previous_controls() {
    let json = pins_json(&[writable(4, PinLevel::Low, None)]);
    let mut page = ScriptedPage::load(&page(), &json);

    let json = pins_json(&[writable(4, PinLevel::High, None)]);
    page.run(&format!("responses['/api/pins'] = {json}; updatePinStates();"));

    let controls: Vec<Control> = page.query("pinControls()");
    assert_eq!(controls.len(), 1);
    assert_eq!(controls[0].high, "btn-success");
}

#[test]
fn control_button_posts_level_and_refreshes() {
    let json = pins_json(&[writable(4, PinLevel::Low, None)]);
    let mut page = ScriptedPage::load(&page(), &json);
    page.run("requests = []; setPinState(4, 'HIGH');");

    let requests: Vec<Request> = page.query("requests");
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].url, "/api/pin-control");
    assert_eq!(requests[0].method, "POST");
    let body: PinControlRequest =
        serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body.pin, 4);
    assert_eq!(body.value, PinLevel::High);
    assert_eq!(requests[1].url, "/api/pins");
}

#[test]
fn rejected_control_does_not_refresh() {
    let mut page = ScriptedPage::load(&page(), &pins_json(&[]));
    page.run("requests = []; fetchOk = false; setPinState(4, 'LOW');");

    let requests: Vec<Request> = page.query("requests");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url, "/api/pin-control");
}

#[test]
fn auto_scroll_label_round_trips() {
    let mut page = ScriptedPage::load(&page(), &pins_json(&[]));

    page.run("toggleAutoScroll();");
    let label: String = page.query("elements.autoScrollBtn.innerText");
    assert_eq!(label, "⬇️ Auto-scroll: OFF");

    page.run("toggleAutoScroll();");
    let label: String = page.query("elements.autoScrollBtn.innerText");
    assert_eq!(label, "⬇️ Auto-scroll: ON");
}

#[test]
fn serial_panel_shows_log_lines_and_clears() {
    let mut log = SerialLog::<4, 64>::new();
    log.push("boot");
    log.push("wifi: connected");
    let lines = serde_json::to_string(&log).unwrap();

    let mut page = ScriptedPage::load(&page(), &pins_json(&[]));
    page.run(&format!("responses['/api/serial'] = {lines}; updateSerial();"));

    let html: String = page.query("elements.serialMonitor.innerHTML");
    assert_eq!(html, "boot<br>wifi: connected");
    let scroll: u32 = page.query("elements.serialMonitor.scrollTop");
    assert_eq!(scroll, 480);

    page.run("clearSerial();");
    let html: String = page.query("elements.serialMonitor.innerHTML");
    assert_eq!(html, "");
}

#[test]
fn failed_serial_poll_keeps_panel() {
    let mut page = ScriptedPage::load(&page(), &pins_json(&[]));
    page.run("delete responses['/api/serial']; updateSerial();");

    let html: String = page.query("elements.serialMonitor.innerHTML");
    assert_eq!(html, "Connecting...");
    let errors: Vec<String> = page.query("consoleErrors");
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Serial update failed"));
}

#[test]
fn log_panel_markup_and_viewport() {
    let html = page();
    assert!(html.contains("initial-scale=1.0"));
    assert!(html.contains("<div id='serialMonitor' class='log-monitor'>Connecting...</div>"));
}

#[test]
fn pins_payload_matches_script_expectations() {
    let statuses = [PinStatus {
        pin: 4,
        state: PinLevel::Low,
        capability: PinCapability::GpioWrite,
        alias: Some("Relay"),
    }];
    let value = serde_json::to_value(PinsResponse { pins: &statuses }).unwrap();

    assert_eq!(
        value,
        serde_json::json!({
            "pins": [{"pin": 4, "state": "LOW", "type": "gpio_write", "alias": "Relay"}]
        })
    );
}

#[test]
fn pin_control_body_sent_by_script_parses() {
    let request: PinControlRequest = serde_json::from_str(r#"{"pin":4,"value":"LOW"}"#).unwrap();
    assert_eq!(request.pin, 4);
    assert_eq!(request.value, PinLevel::Low);
}

#[test]
fn serial_payload_is_array_of_lines_most_recent_last() {
    let mut log = SerialLog::<2, 64>::new();
    log.push("first");
    log.push("second");
    log.push("third");

    let value = serde_json::to_value(&log).unwrap();
    assert_eq!(value, serde_json::json!(["second", "third"]));
}
