use embassy_net::Stack;

use crate::controllers::DashboardHttpController;
use crate::infrastructure::adapters::http_server::run_http_server;

#[embassy_executor::task]
pub async fn http_server_task(stack: Stack<'static>, handler: &'static DashboardHttpController) {
    run_http_server(stack, handler).await;
}
