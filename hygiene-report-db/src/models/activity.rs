use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::identifiable::Identifiable;

/// # Documentation
/// A hand-hygiene campaign or audit round that scans are recorded under.
///
/// Only `activity_id` and `name` are interpreted. Any other column of the
/// activity table is carried through untouched in `attributes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityModel {
    pub activity_id: HeaplessString<50>,

    pub name: HeaplessString<200>,

    #[serde(flatten)]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

impl Identifiable for ActivityModel {
    fn get_id(&self) -> &str {
        self.activity_id.as_str()
    }
}
