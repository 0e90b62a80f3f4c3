// ABOUTME: Remote endpoint paths relative to the configured API base
// ABOUTME: Record CRUD, guidance, feedback, sign-in, and admin collaborator routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalTrack Contributors

/// Record collection (GET) and per-record PUT/DELETE prefix
pub const HEALTH_RECORDS: &str = "/user/health-records";
/// Record creation
pub const HEALTH_RECORDS_ADD: &str = "/user/health-records/add";
/// Personalized health guidance
pub const HEALTH_GUIDE: &str = "/user/health-guide";
/// User feedback submission
pub const FEEDBACK: &str = "/user/feedback";
/// Credential issuance
pub const LOGIN: &str = "/auth/login";
/// Admin user listing
pub const ADMIN_USERS: &str = "/admin/users";
/// Admin dataset upload (multipart)
pub const ADMIN_UPLOAD: &str = "/admin/upload";

/// Query parameter naming the reporting period
pub const PERIOD_PARAM: &str = "dateRange";
