// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Ontime: team time tracking
//!
//! Users log daily tasks and keep a backlog of planned work; the team view
//! filters, pages and exports everyone's logs.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod pipeline;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::DocumentStore;
use services::{BucketService, FirebaseTokenVerifier, IdentityHub, TaskLogService, UserDirectory};
use std::sync::Arc;
use time_utils::ReferenceClock;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn DocumentStore>,
    pub token_verifier: Arc<FirebaseTokenVerifier>,
    pub identity_hub: Arc<IdentityHub>,
    pub task_logs: Arc<TaskLogService>,
    pub bucket: BucketService,
    pub users: UserDirectory,
}

impl AppState {
    /// Wire services over `store`, with "today" taken from `clock`.
    pub fn new(
        config: Config,
        store: Arc<dyn DocumentStore>,
        token_verifier: Arc<FirebaseTokenVerifier>,
        clock: ReferenceClock,
    ) -> Self {
        let task_logs = Arc::new(TaskLogService::new(store.clone(), clock));
        Self {
            bucket: BucketService::new(store.clone(), task_logs.clone()),
            users: UserDirectory::new(store.clone()),
            identity_hub: Arc::new(IdentityHub::new()),
            config,
            store,
            token_verifier,
            task_logs,
        }
    }
}
