mod http_server;
mod sampling;
mod temperature;

pub use http_server::http_server_task;
pub use sampling::{BatterySampler, sampling_task};
pub use temperature::temperature_probe_task;
