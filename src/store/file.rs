use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::model::results::ComputedAssessmentResults;
use crate::store::{ResultStore, StoreError, validate_id};

/// One `<assessment-id>.json` per assessment under `root`. Writes go to a
/// sibling temp file first and are renamed into place.
#[derive(Debug, Clone)]
pub struct FileResultStore {
    root: PathBuf,
}

impl FileResultStore {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| StoreError::Io {
            path: root.clone(),
            source,
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, assessment_id: &str) -> Result<PathBuf, StoreError> {
        validate_id(assessment_id)?;
        Ok(self.root.join(format!("{assessment_id}.json")))
    }
}

impl ResultStore for FileResultStore {
    fn load(&self, assessment_id: &str) -> Result<Option<ComputedAssessmentResults>, StoreError> {
        let path = self.path_for(assessment_id)?;
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| StoreError::Corrupt {
                id: assessment_id.to_string(),
                source,
            })
    }

    fn replace(
        &self,
        assessment_id: &str,
        results: &ComputedAssessmentResults,
    ) -> Result<(), StoreError> {
        let path = self.path_for(assessment_id)?;
        let json = serde_json::to_string_pretty(results).map_err(|source| StoreError::Serialize {
            id: assessment_id.to_string(),
            source,
        })?;

        let tmp = self.root.join(format!(".{assessment_id}.json.tmp"));
        let mut file = fs::File::create(&tmp).map_err(io_err(&tmp))?;
        file.write_all(json.as_bytes()).map_err(io_err(&tmp))?;
        file.write_all(b"\n").map_err(io_err(&tmp))?;
        file.sync_all().map_err(io_err(&tmp))?;
        drop(file);
        fs::rename(&tmp, &path).map_err(io_err(&path))?;
        Ok(())
    }
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + use<> {
    let path = path.to_path_buf();
    move |source| StoreError::Io { path, source }
}
