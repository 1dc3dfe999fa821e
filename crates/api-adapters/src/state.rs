//! State shared across all handlers: one instance of each domain
//! service, all speaking to the same injected ports.

use std::sync::Arc;

use domains::{AuthProvider, DatingRepo};
use services::{
    AccountService, ChatService, DiscoveryService, FriendService, MatchingService,
    MatchmakerService,
};

#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<AccountService>,
    pub matching: Arc<MatchingService>,
    pub friends: Arc<FriendService>,
    pub matchmaker: Arc<MatchmakerService>,
    pub discovery: Arc<DiscoveryService>,
    pub chat: Arc<ChatService>,
}

impl AppState {
    /// Wires every service to the given store and auth ports.
    pub fn new(repo: Arc<dyn DatingRepo>, auth: Arc<dyn AuthProvider>) -> Self {
        Self {
            accounts: Arc::new(AccountService::new(repo.clone(), auth)),
            matching: Arc::new(MatchingService::new(repo.clone())),
            friends: Arc::new(FriendService::new(repo.clone())),
            matchmaker: Arc::new(MatchmakerService::new(repo.clone())),
            discovery: Arc::new(DiscoveryService::new(repo.clone())),
            chat: Arc::new(ChatService::new(repo)),
        }
    }
}
