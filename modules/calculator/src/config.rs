use serde::{Deserialize, Serialize};

/// Configuration for the `calculator` module (`modules.calculator`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalculatorConfig {
    /// Path of the calculate endpoint.
    #[serde(default = "default_route")]
    pub route: String,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            route: default_route(),
        }
    }
}

fn default_route() -> String {
    "/api/v1/calculate".to_owned()
}

impl CalculatorConfig {
    /// Check values that would otherwise fail at route registration.
    ///
    /// # Errors
    /// Returns a description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if !self.route.starts_with('/') {
            return Err(format!("route must start with '/': '{}'", self.route));
        }
        if self.route.contains(['{', '}', '*']) {
            return Err(format!("route must be a literal path: '{}'", self.route));
        }
        Ok(())
    }
}
