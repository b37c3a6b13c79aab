//! What the server screens show for a fetched (or failed) server list.

use matreshka_shared::{default_server, Server, ServerList};

/// Server list as rendered. A failed or malformed fetch is simply empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServerCatalog {
    servers: Vec<Server>,
}

/// Outcome of tapping a server row.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Selected(Server),
    NeedsPremium(Server),
    Unknown,
}

impl ServerCatalog {
    pub fn from_response(response: Option<ServerList>) -> Self {
        Self {
            servers: response.map(|list| list.servers).unwrap_or_default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn servers(&self) -> &[Server] {
        &self.servers
    }

    pub fn get(&self, id: &str) -> Option<&Server> {
        self.servers.iter().find(|s| s.id == id)
    }

    pub fn free(&self) -> impl Iterator<Item = &Server> {
        self.servers.iter().filter(|s| !s.is_premium)
    }

    pub fn premium(&self) -> impl Iterator<Item = &Server> {
        self.servers.iter().filter(|s| s.is_premium)
    }

    /// Server picked on the dashboard when the user has not chosen one.
    pub fn default_selection(&self) -> Option<&Server> {
        default_server(&self.servers)
    }

    pub fn select(&self, id: &str, premium_user: bool) -> Selection {
        match self.get(id) {
            Some(server) if server.is_accessible(premium_user) => Selection::Selected(server.clone()),
            Some(server) => Selection::NeedsPremium(server.clone()),
            None => Selection::Unknown,
        }
    }
}
