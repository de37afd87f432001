// Dashboard server: HTTP and WebSocket surface over the chart renderers.

pub mod logging;
pub mod protocol;
pub mod render;
pub mod routes;
pub mod ws;
