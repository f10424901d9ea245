//! Dashboard page rendering.
//!
//! The page is a one-shot snapshot of the render context. Everything that
//! changes afterwards (pin levels, log lines) is fetched by the embedded
//! script from `/api/pins` and `/api/serial`.

use alloc::string::String;
use core::fmt::{self, Write};

use crate::{
    PINS_POLL_INTERVAL_MS,
    SERIAL_POLL_INTERVAL_MS,
    board::BoardLayout,
    context::RenderContext,
    escape::{Escaped, write_or},
};

const STYLE: &str = include_str!("../assets/dashboard.css");
const SCRIPT: &str = include_str!("../assets/dashboard.js");

/// Initial size reserved for the rendered page.
const PAGE_CAPACITY: usize = 12 * 1024;

/// Render the page into a string.
///
/// Writing into a `String` never fails by itself. The only error source is a
/// board layout larger than [`LAYOUT_JSON_CAPACITY`](crate::board::LAYOUT_JSON_CAPACITY),
/// which leaves the page cut off where the script would start.
pub fn render_to_string(ctx: &RenderContext<'_>, board: &BoardLayout) -> String {
    let mut html = String::with_capacity(PAGE_CAPACITY);
    let _ = render(ctx, board, &mut html);
    html
}

/// Render the page into any formatter target.
pub fn render(ctx: &RenderContext<'_>, board: &BoardLayout, out: &mut impl Write) -> fmt::Result {
    write_head(ctx, out)?;
    out.write_str("<body>\n<div class='container'>\n")?;
    write_header(ctx, out)?;
    out.write_str("<div class='content'>\n")?;
    write_board_section(out)?;
    out.write_str("<div class='logs-section'>\n")?;
    write_status(ctx, out)?;
    write_sensor_grid(ctx, out)?;
    write_device_info(ctx, out)?;
    write_log_panel(out)?;
    out.write_str("</div>\n</div>\n</div>\n")?;
    write_script(board, out)?;
    out.write_str("</body></html>")
}

fn write_head(ctx: &RenderContext<'_>, out: &mut impl Write) -> fmt::Result {
    write!(
        out,
        "<!DOCTYPE html>\n<html><head>\n<title>{} - ESP32</title>\n",
        Escaped(ctx.sensor_name)
    )?;
    out.write_str("<meta charset='UTF-8'>\n")?;
    out.write_str("<meta name='viewport' content='width=device-width, initial-scale=1.0'>\n")?;
    out.write_str("<style>\n")?;
    out.write_str(STYLE)?;
    out.write_str("</style>\n</head>\n")
}

fn write_header(ctx: &RenderContext<'_>, out: &mut impl Write) -> fmt::Result {
    write!(
        out,
        "<div class='header'>\n<h1>🔧 {}</h1>\n<h2>ESP32 Interactive Board Monitor</h2>\n</div>\n",
        Escaped(ctx.sensor_name)
    )
}

fn write_board_section(out: &mut impl Write) -> fmt::Result {
    out.write_str(concat!(
        "<div class='board-section'>\n",
        "<h3 style='margin-top: 0;'>🖥️ Board Visualization</h3>\n",
        "<div class='board-container' id='boardContainer'></div>\n",
        "<div class='pin-controls' id='pinControls'></div>\n",
        "</div>\n",
    ))
}

fn write_status(ctx: &RenderContext<'_>, out: &mut impl Write) -> fmt::Result {
    write!(
        out,
        "<div class='status {}'>\n<span style='font-size: 1.3em; margin-right: 10px;'>{}</span>\n<span><strong>Status:</strong> {}</span>\n</div>\n",
        ctx.mode.status_class(),
        ctx.mode.status_icon(),
        ctx.mode.status_text(),
    )
}

fn write_card(out: &mut impl Write, label: &str, value: fmt::Arguments<'_>) -> fmt::Result {
    write!(
        out,
        "<div class='sensor-card'>\n<div class='sensor-label'>{label}</div>\n<div class='sensor-value'>{value}</div>\n</div>\n"
    )
}

fn write_sensor_grid(ctx: &RenderContext<'_>, out: &mut impl Write) -> fmt::Result {
    out.write_str("<div class='sensor-grid'>\n")?;
    write_card(out, "🌡️ Temperature", format_args!("{:.1}°C", ctx.temperature))?;
    write_card(
        out,
        "🔌 Relay",
        format_args!("{}", if ctx.relay { "ON" } else { "OFF" }),
    )?;
    write_card(out, "⏱️ Uptime", format_args!("{}s", ctx.uptime_secs))?;
    out.write_str("</div>\n")
}

fn write_device_info(ctx: &RenderContext<'_>, out: &mut impl Write) -> fmt::Result {
    out.write_str("<dl class='device-info'>\n")?;
    for (label, value) in [
        ("Sensor ID", ctx.sensor_id),
        ("Type", ctx.sensor_type),
        ("Firmware", ctx.firmware_version),
        ("Master", ctx.master_url),
    ] {
        write!(out, "<dt>{label}</dt><dd>")?;
        write_or(out, value, "—")?;
        out.write_str("</dd>\n")?;
    }
    out.write_str("</dl>\n")
}

fn write_log_panel(out: &mut impl Write) -> fmt::Result {
    out.write_str(concat!(
        "<h3>📟 Live Logs</h3>\n",
        "<div id='serialMonitor' class='log-monitor'>Connecting...</div>\n",
        "<div>\n",
        "<button class='btn btn-secondary' onclick='clearSerial()'>🗑️ Clear</button>\n",
        "<button class='btn btn-secondary' onclick='toggleAutoScroll()' id='autoScrollBtn'>⬇️ Auto-scroll: ON</button>\n",
        "</div>\n",
    ))
}

fn write_script(board: &BoardLayout, out: &mut impl Write) -> fmt::Result {
    out.write_str("<script>\nconst BOARD_CONFIG = ")?;
    board.write_json(out)?;
    write!(
        out,
        ";\nconst PINS_POLL_MS = {PINS_POLL_INTERVAL_MS};\nconst SERIAL_POLL_MS = {SERIAL_POLL_INTERVAL_MS};\n"
    )?;
    out.write_str(SCRIPT)?;
    out.write_str("</script>\n")
}
