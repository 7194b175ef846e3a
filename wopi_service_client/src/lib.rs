//! http client for the collabora plugin backend api

use models_wopi::edit_scope::PLUGIN_NAMESPACE;

pub mod collabora_url;
pub mod config;
pub mod error;
pub mod file_info;
pub mod file_permissions;
pub mod ports;
pub mod wopi_file_list;

#[derive(Clone)]
pub struct WopiServiceClient {
    url: String,
    client: reqwest::Client,
}

impl WopiServiceClient {
    /// Create a client addressed at the site base url,
    /// e.g. `https://chat.example.com`.
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }

    /// Create a client reusing a preconfigured [reqwest::Client] (cookies,
    /// auth headers, proxies).
    pub fn new_with_client(url: String, client: reqwest::Client) -> Self {
        Self { url, client }
    }

    /// Download url for a file attachment. Served by the host itself, not
    /// the plugin.
    pub fn get_file_url(&self, file_id: &str) -> String {
        format!("{}/api/v4/files/{}", self.url, file_id)
    }

    pub(crate) fn api_url(&self, path: &str) -> String {
        format!("{}/plugins/{}/api/v1/{}", self.url, PLUGIN_NAMESPACE, path)
    }
}
