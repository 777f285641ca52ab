use tracing::{debug, info, instrument, warn};
use validator::Validate;

use super::{AfterSave, Editable, EntityRef, FieldErrors, Notice};
use crate::clients::ResourceClient;
use crate::error::{ApiError, ErrorKind};

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// New entity: blank draft, nothing fetched.
    Blank,
    Loaded,
    NotFound,
    Failed(Notice),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// Local validation failed; no request was sent.
    Invalid(FieldErrors),
    Created { id: String, after: AfterSave },
    Updated { id: String, after: AfterSave },
    /// The server rejected the draft with a known problem code.
    Rejected(FieldErrors),
    Conflict(Notice),
    Failed(Notice),
    /// The form is bound to an entity the server does not have; nothing was sent.
    NotFound,
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveOutcome::Created { .. } | SaveOutcome::Updated { .. })
    }
}

/// Controller behind one detail/edit form.
pub struct DetailController<R: Editable> {
    client: ResourceClient<R>,
    entity: EntityRef,
    draft: R::Draft,
    errors: FieldErrors,
    not_found: bool,
}

impl<R: Editable> DetailController<R> {
    pub fn new(client: ResourceClient<R>) -> Self {
        Self {
            client,
            entity: EntityRef::New,
            draft: R::Draft::default(),
            errors: FieldErrors::new(),
            not_found: false,
        }
    }

    pub fn entity(&self) -> &EntityRef {
        &self.entity
    }

    pub fn is_new(&self) -> bool {
        self.entity.is_new()
    }

    pub fn is_not_found(&self) -> bool {
        self.not_found
    }

    pub fn draft(&self) -> &R::Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut R::Draft {
        &mut self.draft
    }

    /// Inline errors from the last validation or rejected save.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    #[instrument(skip(self), fields(resource = R::NAME))]
    pub async fn load(&mut self, entity: EntityRef) -> LoadOutcome {
        self.entity = entity;
        self.errors = FieldErrors::new();
        self.not_found = false;
        self.draft = R::Draft::default();

        let id = match &self.entity {
            EntityRef::New => {
                debug!("Starting blank draft");
                return LoadOutcome::Blank;
            }
            EntityRef::Existing(id) => id.clone(),
        };

        match self.client.get(&id).await {
            Ok(item) => {
                self.draft = R::draft_from(&item);
                debug!(id = %id, "Draft loaded");
                LoadOutcome::Loaded
            }
            Err(ApiError::NotFound(_)) => {
                info!(id = %id, "Entity not found");
                self.not_found = true;
                LoadOutcome::NotFound
            }
            Err(e) => {
                warn!(id = %id, error = %e, "Failed to load entity");
                LoadOutcome::Failed(Notice::unexpected(&e))
            }
        }
    }

    /// Runs the local rules and records the resulting inline errors.
    pub fn validate(&mut self) -> Result<(), FieldErrors> {
        match self.draft.validate() {
            Ok(()) => {
                self.errors = FieldErrors::new();
                Ok(())
            }
            Err(e) => {
                self.errors = FieldErrors::from(&e);
                Err(self.errors.clone())
            }
        }
    }

    /// Validates, then creates or updates. An invalid draft never reaches
    /// the network.
    #[instrument(skip(self), fields(resource = R::NAME, id = ?self.entity.id()))]
    pub async fn save(&mut self) -> SaveOutcome {
        if self.not_found {
            debug!("Entity does not exist, not saving");
            return SaveOutcome::NotFound;
        }
        if let Err(errors) = self.validate() {
            debug!(errors = %errors, "Draft is invalid");
            return SaveOutcome::Invalid(errors);
        }
        self.submit().await
    }

    /// Sends the draft without validating it again.
    pub(crate) async fn submit(&mut self) -> SaveOutcome {
        let payload = R::payload_from(&self.draft);
        let result = match &self.entity {
            EntityRef::New => self.client.create(&payload).await,
            EntityRef::Existing(id) => self.client.update(id, &payload).await,
        };

        match result {
            Ok(item) => {
                let id = R::id(&item).to_string();
                let created = self.entity.is_new();
                self.entity = EntityRef::Existing(id.clone());
                self.draft = R::draft_from(&item);
                self.errors = FieldErrors::new();
                info!(id = %id, created, "Entity saved");
                if created {
                    SaveOutcome::Created { id, after: R::AFTER_SAVE }
                } else {
                    SaveOutcome::Updated { id, after: R::AFTER_SAVE }
                }
            }
            Err(e) => self.failure(e),
        }
    }

    /// Maps a failed request onto the form. Known problem codes are checked
    /// before any status based handling.
    pub(crate) fn failure(&mut self, error: ApiError) -> SaveOutcome {
        warn!(error = %error, "Save failed");

        if let ApiError::Network(_) = error {
            return SaveOutcome::Failed(Notice::unexpected(&error));
        }

        if let Some(errors) = error.problem().and_then(|p| R::problem_errors(p, &self.draft)) {
            self.errors = errors.clone();
            return SaveOutcome::Rejected(errors);
        }

        match error.kind() {
            ErrorKind::Conflict => SaveOutcome::Conflict(Notice::conflict(R::NAME)),
            _ => SaveOutcome::Failed(Notice::unexpected(&error)),
        }
    }
}
