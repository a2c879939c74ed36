// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! # Throng Agents
//!
//! Orchestration of a crowd import pass: the build-cache engine that
//! deduplicates scene constructs, and the per-agent builder on top of it.

pub mod build_cache;
pub mod config;
pub mod crowd_agent;

pub use build_cache::{BuildCache, CacheStats};
pub use config::{BuildConfig, SkinType};
pub use crowd_agent::{AgentInstance, CrowdAgent};
