// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod bucket;
pub mod task_log;
pub mod user;

pub use bucket::{BucketInput, BucketItem, BucketItemView};
pub use task_log::{TaskLogInput, TaskLogRecord, TaskLogUpdate, TaskQuery};
pub use user::UserProfile;
