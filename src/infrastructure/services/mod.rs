mod node_status;
mod serial_log;

pub use node_status::{set_temperature, temperature};
pub use serial_log::{
    SERIAL_LINE_WIDTH, SERIAL_LINES, SerialLines, init_capturing_logger, serial_snapshot,
};
