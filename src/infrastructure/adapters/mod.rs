pub(crate) mod http_server;
