use gpui::*;

use crate::services::{ApiClient, ConnectionParams};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ConnectionStatus {
    Disconnected,
    Connecting,
    Connected,
}

pub struct ConnectionState {
    /// Gateway handle; the base URL is fixed at startup.
    pub api: ApiClient,
    /// Present only between a successful connect and the next disconnect.
    pub active_connection: Option<ConnectionParams>,
    pub status: ConnectionStatus,
}

impl Global for ConnectionState {}

impl ConnectionState {
    pub fn init(cx: &mut App) {
        let this = ConnectionState {
            api: ApiClient::from_env(),
            active_connection: None,
            status: ConnectionStatus::Disconnected,
        };
        cx.set_global(this);
    }
}
