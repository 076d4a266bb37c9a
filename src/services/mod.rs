// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod bucket;
pub mod firebase_auth;
pub mod identity;
pub mod task_log;
pub mod users;

pub use bucket::{BucketService, BUCKET_PAGE_SIZE};
pub use firebase_auth::{FirebaseTokenVerifier, TokenError, VerifiedIdentity};
pub use identity::{Identity, IdentityHub, IdentitySubscription};
pub use task_log::{Author, TaskLogService};
pub use users::UserDirectory;
