//! A survey-taking station: the engine, the store finished responses go to,
//! and the running count of completed submissions.

use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::{debug, error, info, warn};

use crate::engine::{Advance, EngineError, Questionnaire};
use crate::store::{Collections, Document, ResponseStore};
use crate::voice::VoiceCapture;
use crate::{QuestionSpec, RespondentClass, ResponseRecord, ResponseValue};

/// What happened after an accepted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// The question at `index` is now current.
    Next { index: usize },

    /// The survey finished and was handed to the store. `completed` is the
    /// count including this one.
    Completed {
        mode: RespondentClass,
        completed: u64,
    },
}

/// Owns one survey session and the completed-submissions counter.
///
/// Persistence is fire-and-forget: a finished record is written on a spawned
/// Tokio task. Completed outside a Tokio runtime, the record cannot be written;
/// the failure is logged and the survey still counts.
pub struct Kiosk {
    questionnaire: Questionnaire,
    store: Arc<dyn ResponseStore>,
    collections: Collections,
    completed: u64,
}

impl Kiosk {
    pub fn new(questionnaire: Questionnaire, store: Arc<dyn ResponseStore>) -> Self {
        Self {
            questionnaire,
            store,
            collections: Collections::default(),
            completed: 0,
        }
    }

    /// Use custom collection names.
    pub fn with_collections(mut self, collections: Collections) -> Self {
        self.collections = collections;
        self
    }

    /// Start a survey for `mode`. Any survey in progress is discarded unsaved.
    pub fn select_mode(&mut self, mode: RespondentClass) {
        self.questionnaire.select_mode(mode);
    }

    pub fn current_question(&self) -> Option<&QuestionSpec> {
        self.questionnaire.current_question()
    }

    pub fn mode(&self) -> Option<RespondentClass> {
        self.questionnaire.mode()
    }

    pub fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    /// Number of surveys completed since this kiosk was created.
    pub fn completed_count(&self) -> u64 {
        self.completed
    }

    /// Answer the current question.
    ///
    /// When this answer finishes the survey, the record is dispatched to the
    /// store, the counter goes up and the session is idle again, regardless of
    /// whether the write later succeeds.
    pub fn submit_answer(
        &mut self,
        id: &str,
        value: impl Into<ResponseValue>,
    ) -> Result<Progress, EngineError> {
        match self.questionnaire.submit_answer(id, value)? {
            Advance::Next { index } => Ok(Progress::Next { index }),
            Advance::Completed(record) => {
                let mode = record.mode();
                self.dispatch(&record);
                self.completed += 1;
                info!("Respondents: {}", self.completed);
                Ok(Progress::Completed {
                    mode,
                    completed: self.completed,
                })
            }
        }
    }

    /// Dictate the answer to the current question.
    ///
    /// Does nothing when the platform cannot capture speech or no survey is in
    /// progress. A failed capture is logged and delivers no answer, leaving
    /// the question on screen.
    pub async fn capture_voice(
        &mut self,
        voice: &dyn VoiceCapture,
    ) -> Result<Option<Progress>, EngineError> {
        if !voice.is_supported() {
            return Ok(None);
        }
        let Some(question) = self.current_question() else {
            return Ok(None);
        };
        let id = question.id().clone();

        match voice.transcribe(&id).await {
            Ok(Some(text)) => self.submit_answer(id.as_str(), text).map(Some),
            Ok(None) => {
                debug!("No speech recognised for '{}'", id);
                Ok(None)
            }
            Err(e) => {
                warn!("Voice capture for '{}' failed: {}", id, e);
                Ok(None)
            }
        }
    }

    fn dispatch(&self, record: &ResponseRecord) {
        let collection = self.collections.for_class(record.mode()).to_string();
        let document = Document::from_record(record);
        let store = Arc::clone(&self.store);

        let Ok(runtime) = Handle::try_current() else {
            error!("Error saving response to {}: no Tokio runtime", collection);
            return;
        };
        runtime.spawn(async move {
            match store.save(&collection, document).await {
                Ok(id) => debug!("Saved response {} to {}", id, collection),
                Err(e) => error!("Error saving response to {}: {}", collection, e),
            }
        });
    }
}

impl std::fmt::Debug for Kiosk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Kiosk")
            .field("questionnaire", &self.questionnaire)
            .field("collections", &self.collections)
            .field("completed", &self.completed)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Catalogue, MemoryStore, YesNo};

    fn finish_parent_survey(kiosk: &mut Kiosk) -> Progress {
        kiosk.select_mode(RespondentClass::Parent);
        kiosk.submit_answer("age", "25").unwrap();
        kiosk.submit_answer("city", "Pune").unwrap();
        kiosk.submit_answer("state", "Goa").unwrap();
        kiosk.submit_answer("use_social", YesNo::No).unwrap()
    }

    #[test]
    fn completes_without_runtime() {
        let store = Arc::new(MemoryStore::new());
        let questionnaire = Questionnaire::new(&Catalogue::builtin()).unwrap();
        let mut kiosk = Kiosk::new(questionnaire, store.clone());

        let progress = finish_parent_survey(&mut kiosk);

        assert_eq!(
            progress,
            Progress::Completed {
                mode: RespondentClass::Parent,
                completed: 1
            }
        );
        assert!(kiosk.current_question().is_none());

        let runtime = tokio::runtime::Runtime::new().unwrap();
        assert!(runtime.block_on(store.is_empty()));
    }
}
