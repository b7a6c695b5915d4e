//! Service-level tests against an in-memory database

use chrono::{Duration, Utc};

use equiloan_server::{
    config::AuthConfig,
    db,
    error::AppError,
    models::{
        equipment::{CreateEquipment, Equipment, EquipmentStatus, UpdateEquipment},
        repair::{CreateRepair, RepairStatus},
        request::{CreateRequest, RequestStatus},
        user::{RegisterUser, Role, User, UserClaims},
    },
    repository::Repository,
    services::Services,
};

async fn setup() -> Services {
    let pool = db::connect_in_memory().await.expect("in-memory pool");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");
    Services::new(
        Repository::new(pool),
        AuthConfig {
            jwt_secret: "test-secret".to_string(),
            jwt_expiration_hours: 1,
        },
    )
}

async fn register(services: &Services, username: &str, role: Role) -> User {
    services
        .users
        .register(&RegisterUser {
            username: username.to_string(),
            password: "password".to_string(),
            role,
        })
        .await
        .expect("register user")
}

fn claims_for(user: &User) -> UserClaims {
    let now = Utc::now().timestamp();
    UserClaims {
        sub: user.username.clone(),
        user_id: user.id,
        role: user.role,
        exp: now + 3600,
        iat: now,
    }
}

async fn add_equipment(services: &Services, name: &str, quantity: i64) -> Equipment {
    services
        .equipment
        .create(&CreateEquipment {
            name: name.to_string(),
            category: "sports".to_string(),
            condition: "good".to_string(),
            total_quantity: quantity,
            status: None,
        })
        .await
        .expect("create equipment")
}

fn borrow_body(equipment_id: i64) -> CreateRequest {
    let today = Utc::now().date_naive();
    CreateRequest {
        equipment_id,
        borrow_date: today,
        expected_return_date: today + Duration::days(7),
    }
}

#[tokio::test]
async fn register_and_authenticate() {
    let services = setup().await;

    let user = register(&services, "alice", Role::Student).await;
    assert_eq!(user.username, "alice");
    assert_eq!(user.role, Role::Student);

    let token = services
        .users
        .authenticate("alice", "password")
        .await
        .expect("authenticate");
    assert_eq!(token.token_type, "bearer");
    assert!(!token.access_token.is_empty());

    let err = services
        .users
        .authenticate("alice", "wrong")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Authentication(_)));

    let err = services
        .users
        .register(&RegisterUser {
            username: "alice".to_string(),
            password: "other".to_string(),
            role: Role::Staff,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[tokio::test]
async fn request_lifecycle_approve_and_return() {
    let services = setup().await;
    let student = register(&services, "bob", Role::Student).await;
    let admin = register(&services, "root", Role::Admin).await;
    let equipment = add_equipment(&services, "Projector", 2).await;

    let today = Utc::now().date_naive();

    let request = services
        .requests
        .submit(student.id, &borrow_body(equipment.id))
        .await
        .expect("submit request");
    assert_eq!(request.status, RequestStatus::Pending);
    assert_eq!(request.request_date, today);
    assert!(request.approved_by_user_id.is_none());

    let official_return = today + Duration::days(14);
    let approved = services
        .requests
        .approve(request.id, admin.id, official_return)
        .await
        .expect("approve request");
    assert_eq!(approved.status, RequestStatus::Approved);
    assert_eq!(approved.approved_by_user_id, Some(admin.id));
    assert_eq!(approved.expected_return_date, official_return);

    let equipment = services.equipment.get_by_id(equipment.id).await.unwrap();
    assert_eq!(equipment.available_quantity, 1);

    let returned = services
        .requests
        .return_equipment(request.id, &claims_for(&student))
        .await
        .expect("return equipment");
    assert_eq!(returned.status, RequestStatus::Returned);
    assert_eq!(returned.actual_return_date, Some(today));

    let equipment = services.equipment.get_by_id(equipment.id).await.unwrap();
    assert_eq!(equipment.available_quantity, 2);
}

#[tokio::test]
async fn approve_and_reject_require_pending() {
    let services = setup().await;
    let student = register(&services, "carol", Role::Student).await;
    let admin = register(&services, "root", Role::Admin).await;
    let equipment = add_equipment(&services, "Microscope", 1).await;

    let today = Utc::now().date_naive();
    let request = services
        .requests
        .submit(student.id, &borrow_body(equipment.id))
        .await
        .unwrap();

    services
        .requests
        .approve(request.id, admin.id, today + Duration::days(7))
        .await
        .unwrap();

    let err = services
        .requests
        .approve(request.id, admin.id, today + Duration::days(7))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = services
        .requests
        .reject(request.id, admin.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn approve_fails_when_no_units_left() {
    let services = setup().await;
    let student = register(&services, "dave", Role::Student).await;
    let admin = register(&services, "root", Role::Admin).await;
    let equipment = add_equipment(&services, "Camera", 1).await;

    let today = Utc::now().date_naive();
    let first = services
        .requests
        .submit(student.id, &borrow_body(equipment.id))
        .await
        .unwrap();
    let second = services
        .requests
        .submit(student.id, &borrow_body(equipment.id))
        .await
        .unwrap();

    services
        .requests
        .approve(first.id, admin.id, today + Duration::days(7))
        .await
        .unwrap();

    let err = services
        .requests
        .approve(second.id, admin.id, today + Duration::days(7))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn submit_requires_available_equipment() {
    let services = setup().await;
    let student = register(&services, "erin", Role::Student).await;
    let empty = add_equipment(&services, "Broken Kit", 0).await;

    let err = services
        .requests
        .submit(student.id, &borrow_body(empty.id))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = services
        .requests
        .submit(student.id, &borrow_body(9999))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[tokio::test]
async fn return_requires_requester_or_admin() {
    let services = setup().await;
    let student = register(&services, "frank", Role::Student).await;
    let other = register(&services, "grace", Role::Student).await;
    let admin = register(&services, "root", Role::Admin).await;
    let equipment = add_equipment(&services, "Tripod", 1).await;

    let today = Utc::now().date_naive();
    let request = services
        .requests
        .submit(student.id, &borrow_body(equipment.id))
        .await
        .unwrap();
    services
        .requests
        .approve(request.id, admin.id, today + Duration::days(7))
        .await
        .unwrap();

    let err = services
        .requests
        .return_equipment(request.id, &claims_for(&other))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Authorization(_)));

    let returned = services
        .requests
        .return_equipment(request.id, &claims_for(&admin))
        .await
        .expect("admin can return");
    assert_eq!(returned.status, RequestStatus::Returned);

    let err = services
        .requests
        .return_equipment(request.id, &claims_for(&admin))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[tokio::test]
async fn overdue_sweep_flips_only_past_due() {
    let services = setup().await;
    let student = register(&services, "hank", Role::Student).await;
    let admin = register(&services, "root", Role::Admin).await;
    let equipment = add_equipment(&services, "Laptop", 2).await;

    let today = Utc::now().date_naive();
    let late = services
        .requests
        .submit(student.id, &borrow_body(equipment.id))
        .await
        .unwrap();
    let on_time = services
        .requests
        .submit(student.id, &borrow_body(equipment.id))
        .await
        .unwrap();

    services
        .requests
        .approve(late.id, admin.id, today - Duration::days(1))
        .await
        .unwrap();
    services
        .requests
        .approve(on_time.id, admin.id, today + Duration::days(7))
        .await
        .unwrap();

    let flipped = services.requests.sweep_overdue().await.unwrap();
    assert_eq!(flipped.len(), 1);
    assert_eq!(flipped[0].id, late.id);
    assert_eq!(flipped[0].status, RequestStatus::Overdue);

    let overdue = services.requests.list_overdue().await.unwrap();
    assert_eq!(overdue.len(), 1);

    let on_time = services.requests.get_by_id(on_time.id).await.unwrap();
    assert_eq!(on_time.status, RequestStatus::Approved);

    // Re-running the sweep finds nothing new
    let flipped = services.requests.sweep_overdue().await.unwrap();
    assert!(flipped.is_empty());
}

#[tokio::test]
async fn usage_analytics_ranks_most_requested() {
    let services = setup().await;
    let student = register(&services, "ivy", Role::Student).await;
    let popular = add_equipment(&services, "VR Headset", 5).await;
    let niche = add_equipment(&services, "Theodolite", 5).await;
    add_equipment(&services, "Unused Gear", 5).await;

    for _ in 0..3 {
        services
            .requests
            .submit(student.id, &borrow_body(popular.id))
            .await
            .unwrap();
    }
    services
        .requests
        .submit(student.id, &borrow_body(niche.id))
        .await
        .unwrap();

    let analytics = services.requests.usage_analytics().await.unwrap();
    assert_eq!(analytics.len(), 2);
    assert_eq!(analytics[0].equipment_id, popular.id);
    assert_eq!(analytics[0].request_count, 3);
    assert_eq!(analytics[1].equipment_id, niche.id);
    assert_eq!(analytics[1].request_count, 1);
}

#[tokio::test]
async fn damage_report_cycle() {
    let services = setup().await;
    let student = register(&services, "judy", Role::Student).await;
    let equipment = add_equipment(&services, "3D Printer", 1).await;

    let today = Utc::now().date_naive();
    let repair = services
        .repairs
        .report(
            student.id,
            &CreateRepair {
                equipment_id: equipment.id,
                description: "Extruder jammed".to_string(),
            },
        )
        .await
        .expect("report damage");
    assert_eq!(repair.repair_status, RepairStatus::Pending);
    assert_eq!(repair.report_date, today);
    assert_eq!(repair.reported_by_user_id, student.id);

    let equipment_row = services.equipment.get_by_id(equipment.id).await.unwrap();
    assert_eq!(equipment_row.status, EquipmentStatus::UnderRepair);

    let completed = services.repairs.complete(repair.id).await.unwrap();
    assert_eq!(completed.repair_status, RepairStatus::Completed);
    assert_eq!(completed.completed_date, Some(today));

    let equipment_row = services.equipment.get_by_id(equipment.id).await.unwrap();
    assert_eq!(equipment_row.status, EquipmentStatus::Available);

    let err = services.repairs.complete(repair.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn equipment_update_preserves_loaned_units() {
    let services = setup().await;
    let student = register(&services, "kate", Role::Student).await;
    let admin = register(&services, "root", Role::Admin).await;
    let equipment = add_equipment(&services, "Keyboard", 5).await;

    let today = Utc::now().date_naive();
    let request = services
        .requests
        .submit(student.id, &borrow_body(equipment.id))
        .await
        .unwrap();
    services
        .requests
        .approve(request.id, admin.id, today + Duration::days(7))
        .await
        .unwrap();

    let updated = services
        .equipment
        .update(
            equipment.id,
            &UpdateEquipment {
                name: None,
                category: None,
                condition: None,
                total_quantity: Some(10),
                status: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.total_quantity, 10);
    // One unit is still out on loan
    assert_eq!(updated.available_quantity, 9);
}

#[tokio::test]
async fn equipment_delete_is_unconditional() {
    let services = setup().await;
    let student = register(&services, "liam", Role::Student).await;
    let equipment = add_equipment(&services, "Scanner", 1).await;

    services
        .requests
        .submit(student.id, &borrow_body(equipment.id))
        .await
        .unwrap();

    services
        .equipment
        .delete(equipment.id)
        .await
        .expect("delete with outstanding request");

    let err = services.equipment.get_by_id(equipment.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = services.equipment.delete(equipment.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn user_history_requires_existing_user() {
    let services = setup().await;
    let student = register(&services, "mona", Role::Student).await;
    let equipment = add_equipment(&services, "Easel", 1).await;

    services
        .requests
        .submit(student.id, &borrow_body(equipment.id))
        .await
        .unwrap();

    let history = services
        .requests
        .history_for_user(student.id)
        .await
        .unwrap();
    assert_eq!(history.len(), 1);

    let err = services
        .requests
        .history_for_user(9999)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
