use expense_core::{
    sqlite_category_service, sqlite_code_service, CodePatch, ErrorKind, ExpenseCode, NewCategory,
    NewCode, ServiceError, Store, UnitOfWork,
};
use std::sync::Arc;

struct Fixture {
    uow: UnitOfWork,
    category_id: i64,
    code: ExpenseCode,
}

fn fixture(description: Option<&str>) -> Fixture {
    let uow = UnitOfWork::new(Arc::new(Store::open_in_memory().unwrap()));
    let (category_id, code) = uow
        .run(|conn| -> Result<(i64, ExpenseCode), ServiceError> {
            let service = sqlite_category_service(conn);
            let category = service.create_category(&NewCategory {
                name: "Meals".to_string(),
            })?;
            let code = service.create_code_for_category(
                category.id,
                &NewCode {
                    code: "MEAL".to_string(),
                    description: description.map(str::to_string),
                },
            )?;
            Ok((category.id, code))
        })
        .unwrap();
    Fixture {
        uow,
        category_id,
        code,
    }
}

fn update(fixture: &Fixture, patch: &CodePatch) -> Result<ExpenseCode, ServiceError> {
    fixture
        .uow
        .run(|conn| sqlite_code_service(conn).update_code(fixture.code.id, patch))
}

fn listed(fixture: &Fixture) -> Vec<ExpenseCode> {
    fixture
        .uow
        .run(|conn| sqlite_category_service(conn).list_codes_for_category(fixture.category_id))
        .unwrap()
}

#[test]
fn update_code_changes_fields_and_persists() {
    let fixture = fixture(None);

    let updated = update(
        &fixture,
        &CodePatch {
            description: Some("Updated".to_string()),
            is_active: Some(false),
        },
    )
    .unwrap();

    assert_eq!(updated.id, fixture.code.id);
    assert_eq!(updated.code, "MEAL");
    assert_eq!(updated.description.as_deref(), Some("Updated"));
    assert!(!updated.is_active);
    assert_eq!(listed(&fixture), vec![updated]);
}

#[test]
fn update_code_partial_patch_preserves_other_fields() {
    let fixture = fixture(None);

    let updated = update(
        &fixture,
        &CodePatch {
            description: Some("Only description".to_string()),
            is_active: None,
        },
    )
    .unwrap();

    assert_eq!(updated.description.as_deref(), Some("Only description"));
    assert!(updated.is_active);
}

#[test]
fn update_code_with_empty_patch_changes_nothing() {
    let fixture = fixture(Some("Initial"));

    let updated = update(&fixture, &CodePatch::default()).unwrap();

    assert_eq!(updated, fixture.code);
    assert_eq!(listed(&fixture), vec![fixture.code.clone()]);
}

#[test]
fn update_code_stores_empty_description_verbatim() {
    let fixture = fixture(Some("Initial"));

    let updated = update(
        &fixture,
        &CodePatch {
            description: Some(String::new()),
            is_active: None,
        },
    )
    .unwrap();

    assert_eq!(updated.description.as_deref(), Some(""));
    assert_eq!(listed(&fixture)[0].description.as_deref(), Some(""));
}

#[test]
fn update_code_ignores_code_field_in_payload() {
    let fixture = fixture(None);
    let patch: CodePatch =
        serde_json::from_str(r#"{"code": "NEW", "description": "Updated"}"#).unwrap();

    let updated = update(&fixture, &patch).unwrap();

    assert_eq!(updated.code, "MEAL");
    assert_eq!(updated.description.as_deref(), Some("Updated"));
}

#[test]
fn null_fields_in_payload_are_treated_as_absent() {
    let fixture = fixture(Some("Initial"));
    let patch: CodePatch =
        serde_json::from_str(r#"{"description": null, "is_active": null}"#).unwrap();

    let updated = update(&fixture, &patch).unwrap();

    assert_eq!(updated, fixture.code);
}

#[test]
fn is_active_can_be_toggled_back_and_forth() {
    let fixture = fixture(None);

    for is_active in [false, true, false] {
        let updated = update(
            &fixture,
            &CodePatch {
                description: None,
                is_active: Some(is_active),
            },
        )
        .unwrap();
        assert_eq!(updated.is_active, is_active);
    }
}

#[test]
fn update_code_missing_id_is_not_found() {
    let fixture = fixture(None);

    let err = fixture
        .uow
        .run(|conn| {
            sqlite_code_service(conn).update_code(
                999_999,
                &CodePatch {
                    description: Some("Updated".to_string()),
                    is_active: None,
                },
            )
        })
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.code(), "not_found");
    assert_eq!(err.suggested_status(), 404);
}
