use heapless::String as HeaplessString;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

use crate::models::identifiable::Identifiable;

/// # Documentation
/// Staff member whose scans are logged.
///
/// `department` references `DepartmentModel::dept_code`; department-scoped
/// views resolve records to departments through this field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeModel {
    pub emp_id: HeaplessString<50>,

    /// Full name in Thai
    pub name_th: HeaplessString<200>,

    /// Full name in English - optional
    pub name_en: Option<HeaplessString<200>>,

    pub department: HeaplessString<50>,

    pub position: Option<HeaplessString<100>>,

    #[serde(
        serialize_with = "serialize_employee_status",
        deserialize_with = "deserialize_employee_status"
    )]
    pub status: EmployeeStatus,
}

impl Identifiable for EmployeeModel {
    fn get_id(&self) -> &str {
        self.emp_id.as_str()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmployeeStatus {
    #[default]
    Active,
    Inactive,
}

impl std::fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmployeeStatus::Active => write!(f, "active"),
            EmployeeStatus::Inactive => write!(f, "inactive"),
        }
    }
}

impl FromStr for EmployeeStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(EmployeeStatus::Active),
            "inactive" => Ok(EmployeeStatus::Inactive),
            _ => Err(()),
        }
    }
}

pub fn serialize_employee_status<S>(value: &EmployeeStatus, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let value_str = match value {
        EmployeeStatus::Active => "active",
        EmployeeStatus::Inactive => "inactive",
    };
    serializer.serialize_str(value_str)
}

pub fn deserialize_employee_status<'de, D>(deserializer: D) -> Result<EmployeeStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let value_str = String::deserialize(deserializer)?;
    EmployeeStatus::from_str(&value_str).map_err(|_| {
        serde::de::Error::custom(format!("Invalid EmployeeStatus: {value_str}"))
    })
}
