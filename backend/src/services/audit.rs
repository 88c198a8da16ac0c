//! Change auditing for tracked entities.
//!
//! The auditor is an explicit pre-commit hook: repositories hand it the
//! entity revisions involved in a write, on the transaction they are about
//! to commit, so the audit row and the data change persist or fail
//! together. Diffing is explicit per entity kind through [`Audited`]; there
//! is no runtime type inspection.

use chrono::Utc;
use serde_json::{Map, Value};
use sqlx::postgres::PgTransaction;

use crate::error::AppError;
use crate::models::audit_log::{AuditAction, NewAuditLog};
use crate::repositories::audit_log;

/// One field whose value differs between two revisions of an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    pub field: &'static str,
    pub old: Value,
    pub new: Value,
}

impl FieldChange {
    pub fn new(field: &'static str, old: Value, new: Value) -> Self {
        Self { field, old, new }
    }
}

/// Implemented by every entity kind whose mutations are audited.
///
/// `AuditLog` itself does not implement this trait, so a recorded row can
/// never feed back into the auditor.
pub trait Audited {
    /// Name recorded in `audit_logs.entity_name`.
    const ENTITY_NAME: &'static str;

    /// Single-column primary key of the row, 0 when not resolvable.
    fn entity_id(&self) -> i64;

    /// Full field -> value snapshot of the current state.
    fn snapshot(&self) -> Value;

    /// Field-level difference against a newer revision, in the entity's
    /// declared field order.
    fn diff(&self, after: &Self) -> Vec<FieldChange>;
}

/// Synthesizes audit rows for entity mutations and stages them on the
/// caller's open transaction.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChangeAuditor;

impl ChangeAuditor {
    pub fn new() -> Self {
        Self
    }

    /// Records a freshly inserted entity: full snapshot in `new_values`.
    pub async fn record_created<E: Audited>(
        &self,
        tx: &mut PgTransaction<'_>,
        entity: &E,
    ) -> Result<(), AppError> {
        audit_log::insert_audit_log(tx, &created_log(entity)).await?;
        Ok(())
    }

    /// Records an update. Emits nothing when no field differs; returns
    /// whether a row was written.
    pub async fn record_updated<E: Audited>(
        &self,
        tx: &mut PgTransaction<'_>,
        before: &E,
        after: &E,
    ) -> Result<bool, AppError> {
        let Some(log) = updated_log(before, after) else {
            return Ok(false);
        };
        audit_log::insert_audit_log(tx, &log).await?;
        Ok(true)
    }

    /// Records a removal: full prior snapshot in `old_values`.
    pub async fn record_deleted<E: Audited>(
        &self,
        tx: &mut PgTransaction<'_>,
        entity: &E,
    ) -> Result<(), AppError> {
        audit_log::insert_audit_log(tx, &deleted_log(entity)).await?;
        Ok(())
    }
}

fn created_log<E: Audited>(entity: &E) -> NewAuditLog {
    NewAuditLog {
        entity_name: E::ENTITY_NAME.to_string(),
        entity_id: entity.entity_id(),
        action: AuditAction::Created,
        timestamp: Utc::now(),
        user_id: None,
        old_values: None,
        new_values: Some(entity.snapshot()),
        changes: Some("Entity created".to_string()),
    }
}

/// Builds the Updated row for a pair of revisions, restricted to changed
/// fields, or None when nothing changed.
fn updated_log<E: Audited>(before: &E, after: &E) -> Option<NewAuditLog> {
    let changes = before.diff(after);
    if changes.is_empty() {
        return None;
    }

    let mut old_values = Map::new();
    let mut new_values = Map::new();
    let mut summaries = Vec::with_capacity(changes.len());
    for change in &changes {
        old_values.insert(change.field.to_string(), change.old.clone());
        new_values.insert(change.field.to_string(), change.new.clone());
        summaries.push(format!(
            "{}: '{}' -> '{}'",
            change.field,
            display_value(&change.old),
            display_value(&change.new)
        ));
    }

    Some(NewAuditLog {
        entity_name: E::ENTITY_NAME.to_string(),
        entity_id: after.entity_id(),
        action: AuditAction::Updated,
        timestamp: Utc::now(),
        user_id: None,
        old_values: Some(Value::Object(old_values)),
        new_values: Some(Value::Object(new_values)),
        changes: Some(summaries.join("; ")),
    })
}

fn deleted_log<E: Audited>(entity: &E) -> NewAuditLog {
    NewAuditLog {
        entity_name: E::ENTITY_NAME.to_string(),
        entity_id: entity.entity_id(),
        action: AuditAction::Deleted,
        timestamp: Utc::now(),
        user_id: None,
        old_values: Some(entity.snapshot()),
        new_values: None,
        changes: Some("Entity deleted".to_string()),
    }
}

/// Renders a value the way it reads in a change summary: strings bare,
/// nulls empty, everything else in JSON notation.
fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Ticket {
        id: i64,
        subject: String,
        open: bool,
    }

    impl Audited for Ticket {
        const ENTITY_NAME: &'static str = "Ticket";

        fn entity_id(&self) -> i64 {
            self.id
        }

        fn snapshot(&self) -> Value {
            json!({
                "Id": self.id,
                "Subject": self.subject,
                "Open": self.open,
            })
        }

        fn diff(&self, after: &Self) -> Vec<FieldChange> {
            let mut changes = Vec::new();
            if self.subject != after.subject {
                changes.push(FieldChange::new(
                    "Subject",
                    json!(self.subject),
                    json!(after.subject),
                ));
            }
            if self.open != after.open {
                changes.push(FieldChange::new("Open", json!(self.open), json!(after.open)));
            }
            changes
        }
    }

    fn ticket(subject: &str, open: bool) -> Ticket {
        Ticket {
            id: 5,
            subject: subject.to_string(),
            open,
        }
    }

    #[test]
    fn created_log_holds_full_snapshot() {
        let log = created_log(&ticket("Leaky faucet", true));
        assert_eq!(log.entity_name, "Ticket");
        assert_eq!(log.entity_id, 5);
        assert_eq!(log.action, AuditAction::Created);
        assert_eq!(log.changes.as_deref(), Some("Entity created"));
        assert!(log.old_values.is_none());
        assert_eq!(log.new_values.expect("snapshot")["Subject"], "Leaky faucet");
    }

    #[test]
    fn updated_log_restricts_values_to_changed_fields() {
        let before = ticket("Leaky faucet", true);
        let after = ticket("Leaky faucet", false);

        let log = updated_log(&before, &after).expect("change detected");
        assert_eq!(log.action, AuditAction::Updated);
        let old_values = log.old_values.expect("old values");
        let new_values = log.new_values.expect("new values");
        assert_eq!(old_values, json!({"Open": true}));
        assert_eq!(new_values, json!({"Open": false}));
        assert_eq!(log.changes.as_deref(), Some("Open: 'true' -> 'false'"));
    }

    #[test]
    fn updated_log_is_none_when_nothing_changed() {
        let before = ticket("Leaky faucet", true);
        let after = ticket("Leaky faucet", true);
        assert!(updated_log(&before, &after).is_none());
    }

    #[test]
    fn updated_log_joins_summaries_with_semicolons_in_field_order() {
        let before = ticket("Leaky faucet", true);
        let after = ticket("Burst pipe", false);

        let log = updated_log(&before, &after).expect("changes detected");
        assert_eq!(
            log.changes.as_deref(),
            Some("Subject: 'Leaky faucet' -> 'Burst pipe'; Open: 'true' -> 'false'")
        );
    }

    #[test]
    fn deleted_log_holds_prior_snapshot() {
        let log = deleted_log(&ticket("Leaky faucet", true));
        assert_eq!(log.action, AuditAction::Deleted);
        assert_eq!(log.changes.as_deref(), Some("Entity deleted"));
        assert!(log.new_values.is_none());
        assert_eq!(log.old_values.expect("snapshot")["Id"], 5);
    }

    #[test]
    fn display_value_renders_strings_bare_and_nulls_empty() {
        assert_eq!(display_value(&json!("Pending")), "Pending");
        assert_eq!(display_value(&Value::Null), "");
        assert_eq!(display_value(&json!(3)), "3");
    }
}
