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

/// Builds the canonical scene name of an agent.
///
/// Agent names are read either whole or as a name/id pair and may contain
/// `.` separators; every variant maps to the same `name_id` form.
///
/// # Examples
///
/// ```
/// use throng_core::description::format_agent_name;
/// assert_eq!(format_agent_name("soldier.lod0", "12"), "soldier_lod0_12");
/// assert_eq!(format_agent_name("soldier", ""), "soldier");
/// ```
pub fn format_agent_name(name: &str, id: &str) -> String {
    let joined = if id.is_empty() {
        name.to_string()
    } else {
        format!("{name}_{id}")
    };
    joined.replace('.', "_")
}
