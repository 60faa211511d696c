use std::collections::BTreeMap;

use parking_lot::RwLock;

use crate::model::results::ComputedAssessmentResults;
use crate::store::{ResultStore, StoreError, validate_id};

#[derive(Debug, Default)]
pub struct MemoryResultStore {
    results: RwLock<BTreeMap<String, ComputedAssessmentResults>>,
}

impl MemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.results.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.read().is_empty()
    }
}

impl ResultStore for MemoryResultStore {
    fn load(&self, assessment_id: &str) -> Result<Option<ComputedAssessmentResults>, StoreError> {
        validate_id(assessment_id)?;
        Ok(self.results.read().get(assessment_id).cloned())
    }

    fn replace(
        &self,
        assessment_id: &str,
        results: &ComputedAssessmentResults,
    ) -> Result<(), StoreError> {
        validate_id(assessment_id)?;
        self.results
            .write()
            .insert(assessment_id.to_string(), results.clone());
        Ok(())
    }
}
