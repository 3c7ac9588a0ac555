use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CleanupRule {
    pub directory: String, //path
    pub max_age: u64, //seconds
    pub pattern: String, //regex
}
