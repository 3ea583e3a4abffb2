// peekenv-rs: Windows registry environment exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)        config (layered)
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          export           |
//!              |  ExportOptions -> Output  |
//!              '--+-----------+--------+---'
//!                 |           |        |
//!                 v           v        v
//!               merge       expand   format
//!                 |        %NAME%   [Name]
//!                 v                 segments
//!             registry
//!       RegistrySource trait
//!     Windows | MemoryRegistry
//!
//!   +-----------------------------------------+
//!   |  env     Snapshot, VarName, FilterSet   |
//!   +-----------------------------------------+
//!   |  foundation   error, logging            |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod config;
pub mod env;
pub mod error;
pub mod expand;
pub mod export;
pub mod format;
pub mod logging;
pub mod merge;
pub mod registry;
