use crate::{
    error::Error,
    model::{AuditChanges, ChangeSet, FieldChange},
};
use serde::Serialize;
use serde_json::{Map, Value};

/// Field-level diff between two versions of the same record.
///
/// Both versions are flattened to JSON objects; the result carries exactly
/// the fields whose serialized value differs, as `{field: {from, to}}`.
/// Update paths call this before bumping `updated_at`, so an update that
/// changes nothing yields an empty set.
pub(crate) fn between<T: Serialize>(before: &T, after: &T) -> Result<ChangeSet, Error> {
    let before = to_object(before)?;
    let after = to_object(after)?;

    let mut set = ChangeSet::default();

    for (field, to) in &after {
        let from = before.get(field).cloned().unwrap_or(Value::Null);
        if from != *to {
            set.insert(
                field.clone(),
                FieldChange {
                    from,
                    to: to.clone(),
                },
            );
        }
    }

    // Optional fields cleared to None disappear from the serialized form.
    for (field, from) in before {
        if !after.contains_key(&field) {
            set.insert(
                field,
                FieldChange {
                    from,
                    to: Value::Null,
                },
            );
        }
    }

    Ok(set)
}

/// Full-record audit payload for create/delete entries.
pub(crate) fn full<T: Serialize>(record: &T) -> Result<AuditChanges, Error> {
    serde_json::to_value(record)
        .map(AuditChanges::Full)
        .map_err(|err| Error::internal(format!("record serialization: {err}")))
}

fn to_object<T: Serialize>(record: &T) -> Result<Map<String, Value>, Error> {
    match serde_json::to_value(record) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(Error::internal("diffed records must serialize to objects")),
        Err(err) => Err(Error::internal(format!("record serialization: {err}"))),
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Sample {
        name: String,
        active: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        notes: Option<String>,
    }

    #[test]
    fn identical_records_yield_empty_set() {
        let a = Sample {
            name: "Ana".into(),
            active: true,
            notes: None,
        };
        let set = between(&a, &a).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn only_changed_fields_appear() {
        let before = Sample {
            name: "Ana".into(),
            active: true,
            notes: None,
        };
        let after = Sample {
            name: "Ana Lopes".into(),
            active: true,
            notes: None,
        };

        let set = between(&before, &after).unwrap();
        assert_eq!(set.len(), 1);

        let change = set.field("name").unwrap();
        assert_eq!(change.from, json!("Ana"));
        assert_eq!(change.to, json!("Ana Lopes"));
    }

    #[test]
    fn cleared_optional_diffs_to_null() {
        let before = Sample {
            name: "Ana".into(),
            active: true,
            notes: Some("call first".into()),
        };
        let after = Sample {
            name: "Ana".into(),
            active: true,
            notes: None,
        };

        let set = between(&before, &after).unwrap();
        assert_eq!(set.field("notes").unwrap().to, Value::Null);
    }

    #[test]
    fn non_object_records_are_rejected() {
        let err = between(&1, &2).unwrap_err();
        assert!(matches!(err, Error::Internal { .. }));
    }
}
