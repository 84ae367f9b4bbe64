// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout document service.
//!
//! Handles the storage-facing workflow:
//! 1. Save new or edited workouts as canonical documents
//! 2. Load workouts back from their frontmatter
//! 3. Reconcile documents after manual edits
//! 4. Aggregate statistics over the workout folder

use futures_util::{stream, StreamExt};

use crate::document;
use crate::error::{AppError, Result};
use crate::models::{Workout, WorkoutStatistics};
use crate::services::{statistics, sync};
use crate::storage::{join_path, DocumentHandle, DocumentStore, MARKDOWN_EXTENSION};

const MAX_CONCURRENT_READS: usize = 16;

/// Reads and writes workout documents in one folder of a document store.
pub struct WorkoutFileService<S> {
    store: S,
    folder: String,
}

impl<S: DocumentStore> WorkoutFileService<S> {
    pub fn new(store: S, folder: impl Into<String>) -> Self {
        Self {
            store,
            folder: folder.into().trim_matches('/').to_string(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn folder(&self) -> &str {
        &self.folder
    }

    /// Path a workout is saved under.
    pub fn path_for(&self, workout: &Workout) -> String {
        join_path(&self.folder, &file_name(workout))
    }

    /// Save a workout, creating the folder and document as needed.
    ///
    /// A workout without an id is given one before its file name is chosen.
    pub async fn save_workout(&self, workout: &Workout) -> Result<DocumentHandle> {
        let mut workout = workout.clone();
        workout.ensure_id();

        if !self.store.exists(&self.folder).await? {
            self.store.create_folder(&self.folder).await?;
            tracing::info!(folder = %self.folder, "Created workout folder");
        }

        let path = self.path_for(&workout);
        let content = document::generate(&workout)?;

        if self.store.exists(&path).await? {
            self.store.write_text(&path, &content).await?;
            tracing::info!(path = %path, id = %workout.id, "Workout updated");
            Ok(DocumentHandle::new(path))
        } else {
            let handle = self.store.create_text(&path, &content).await?;
            tracing::info!(path = %path, id = %workout.id, "Workout saved");
            Ok(handle)
        }
    }

    /// Load a workout from its frontmatter. `Ok(None)` means the document is
    /// not a workout tracker record.
    pub async fn load_workout(&self, handle: &DocumentHandle) -> Result<Option<Workout>> {
        let content = self.store.read_text(&handle.path).await?;
        Ok(document::parse(&content, &handle.basename))
    }

    /// Load a workout, treating a non-workout document as an error.
    pub async fn require_workout(&self, handle: &DocumentHandle) -> Result<Workout> {
        self.load_workout(handle)
            .await?
            .ok_or_else(|| AppError::InvalidDocument(handle.path.clone()))
    }

    /// Overwrite an existing document with a workout's canonical text.
    pub async fn update_workout(&self, handle: &DocumentHandle, workout: &Workout) -> Result<()> {
        let content = document::generate(workout)?;
        self.store.write_text(&handle.path, &content).await?;
        tracing::info!(path = %handle.path, id = %workout.id, "Workout updated");
        Ok(())
    }

    /// Markdown documents in the workout folder; empty if the folder does not
    /// exist yet.
    pub async fn list_workout_files(&self) -> Result<Vec<DocumentHandle>> {
        if !self.store.exists(&self.folder).await? {
            return Ok(Vec::new());
        }
        self.store.list_documents(&self.folder).await
    }

    /// Load every workout in the folder, in path order.
    ///
    /// Documents that fail to read or are not workouts are skipped.
    pub async fn load_all_workouts(&self) -> Result<Vec<Workout>> {
        let files = self.list_workout_files().await?;

        let mut loaded: Vec<(usize, Option<Workout>)> = stream::iter(files.iter().enumerate())
            .map(|(index, handle)| async move {
                match self.load_workout(handle).await {
                    Ok(workout) => (index, workout),
                    Err(e) => {
                        tracing::error!(path = %handle.path, error = %e, "Failed to load workout");
                        (index, None)
                    }
                }
            })
            .buffer_unordered(MAX_CONCURRENT_READS)
            .collect()
            .await;

        loaded.sort_by_key(|(index, _)| *index);
        let workouts: Vec<Workout> = loaded.into_iter().filter_map(|(_, w)| w).collect();

        tracing::debug!(
            files = files.len(),
            workouts = workouts.len(),
            "Loaded workouts"
        );
        Ok(workouts)
    }

    /// True when the document exists and is owned by this crate. Read
    /// failures count as "not a workout".
    pub async fn is_workout_file(&self, path: &str) -> bool {
        match self.store.read_text(path).await {
            Ok(content) => sync::is_owned_document(&content),
            Err(e) => {
                tracing::debug!(path, error = %e, "Could not read document");
                false
            }
        }
    }

    /// Reconcile a document with its body and rewrite it when the canonical
    /// text differs. Returns whether a rewrite happened.
    pub async fn sync_file(&self, handle: &DocumentHandle) -> Result<bool> {
        let content = self.store.read_text(&handle.path).await?;
        let outcome = sync::reconcile(&content, &handle.basename)?;

        match outcome.updated_text {
            Some(updated) if outcome.changed => {
                self.store.write_text(&handle.path, &updated).await?;
                tracing::info!(path = %handle.path, source = ?outcome.source, "Synced workout frontmatter");
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Reconcile every owned document in the folder. Returns the number of
    /// documents rewritten; failures are logged and skipped.
    pub async fn sync_all(&self) -> Result<usize> {
        let mut rewritten = 0;
        for handle in self.list_workout_files().await? {
            if !self.is_workout_file(&handle.path).await {
                continue;
            }
            match self.sync_file(&handle).await {
                Ok(true) => rewritten += 1,
                Ok(false) => {}
                Err(e) => {
                    tracing::error!(path = %handle.path, error = %e, "Failed to sync workout")
                }
            }
        }
        Ok(rewritten)
    }

    /// Statistics over every workout in the folder.
    pub async fn statistics(&self) -> Result<WorkoutStatistics> {
        let workouts = self.load_all_workouts().await?;
        Ok(statistics::aggregate(&workouts))
    }
}

/// Document file name: `{date}-{id}-{name}.md`, with the name reduced to
/// ASCII letters and digits and every whitespace run (leading and trailing
/// ones included) turned into a single dash.
pub fn file_name(workout: &Workout) -> String {
    let mut safe_name = String::with_capacity(workout.name.len());
    let mut in_whitespace = false;
    for c in workout.name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                safe_name.push('-');
            }
            in_whitespace = true;
        } else if c.is_ascii_alphanumeric() {
            safe_name.push(c);
            in_whitespace = false;
        }
    }

    format!(
        "{}-{}-{}.{}",
        workout.date, workout.id, safe_name, MARKDOWN_EXTENSION
    )
}
