use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};

use crate::models::identifiable::Identifiable;

/// Hospital department; static reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentModel {
    pub dept_code: HeaplessString<50>,

    /// Display name in Thai
    pub dept_name_th: HeaplessString<200>,
}

impl Identifiable for DepartmentModel {
    fn get_id(&self) -> &str {
        self.dept_code.as_str()
    }
}
