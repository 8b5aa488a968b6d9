// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod access;
pub mod auth;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod messenger;
pub mod models;
pub mod period;
pub mod records;
pub mod report;
pub mod source;
pub mod utils;
