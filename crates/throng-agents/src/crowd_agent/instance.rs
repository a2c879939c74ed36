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

use std::collections::HashMap;
use std::sync::Arc;
use throng_core::description::{format_agent_name, VariableSource};
use throng_data::description::Description;

/// One simulated agent: its type and the variable values it was given.
#[derive(Debug, Clone)]
pub struct AgentInstance {
    description: Arc<Description>,
    id: String,
    variables: HashMap<String, f32>,
}

impl AgentInstance {
    /// Creates an agent using the defaults of its type.
    pub fn new(description: Arc<Description>, id: impl Into<String>) -> Self {
        Self {
            description,
            id: id.into(),
            variables: HashMap::new(),
        }
    }

    /// Overrides one variable.
    pub fn with_variable(mut self, name: impl Into<String>, value: f32) -> Self {
        self.variables.insert(name.into(), value);
        self
    }

    /// Returns the description of the agent's type.
    pub fn description(&self) -> &Description {
        &self.description
    }

    /// Returns the agent id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the scene name of the agent.
    pub fn name(&self) -> String {
        format_agent_name(self.description.agent_type(), &self.id)
    }
}

impl VariableSource for AgentInstance {
    /// Agent overrides win over the type's default; unknown variables read 0.
    fn variable_value(&self, name: &str) -> f32 {
        self.variables
            .get(name)
            .copied()
            .or_else(|| self.description.variable(name).map(|v| v.default))
            .unwrap_or(0.0)
    }
}
